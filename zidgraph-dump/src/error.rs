use thiserror::Error;

#[derive(Error, Debug)]
pub enum DumpError {
    #[error("Failed to open dump {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("XML error at byte {position}: {message}")]
    Xml { position: u64, message: String },

    #[error("Dump has no root element")]
    MissingRoot,
}

pub type Result<T> = std::result::Result<T, DumpError>;
