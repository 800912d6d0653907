pub mod error;
pub mod page;
pub mod reader;

pub use error::DumpError;
pub use page::RawPage;
pub use reader::DumpReader;
