pub mod attributes;
pub mod error;
pub mod export;
pub mod graph;
pub mod model;
pub mod pipeline;
pub mod record;
pub mod render;
pub mod scan;
pub mod summary;

pub use attributes::{AttributeAssigner, Color};
pub use error::{ExtractionError, PipelineError};
pub use graph::{AdjacencyList, build_edges};
pub use model::{Edge, ObjectType, Record};
pub use pipeline::{PipelineOptions, PipelineOutput, execute_pipeline};
pub use record::RecordExtractor;
pub use scan::{collect_call_references, unique_call_targets};
