pub mod commands;

// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{format_adjacency, output_path, resolve_path};

// Re-export pipeline functionality from zidgraph-core
pub use zidgraph_core::pipeline::{PipelineOptions, PipelineOutput, execute_pipeline};
