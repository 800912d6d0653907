use thiserror::Error;
use zidgraph_dump::DumpError;

/// Why a single page did not become a record.
///
/// None of these stop a run; the pipeline counts them and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("title '{0}' does not name a persistent object")]
    TitleMismatch(String),

    #[error("page '{0}' has no revision text")]
    EmptyRevision(String),

    #[error("page '{title}' is not valid JSON: {message}")]
    MalformedPayload { title: String, message: String },

    #[error("page '{title}' is missing {path}")]
    SchemaMismatch { title: String, path: String },

    #[error("page '{title}' has unsupported type {tag}")]
    UnsupportedType { title: String, tag: String },

    #[error("implementation '{0}' has a composition but no parent function")]
    IntegrityViolation(String),

    #[error("page '{0}' has no page id")]
    MissingPageId(String),
}

impl ExtractionError {
    pub fn schema(title: &str, path: &str) -> Self {
        ExtractionError::SchemaMismatch {
            title: title.to_string(),
            path: path.to_string(),
        }
    }

    /// Short category name, used as a key in run summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractionError::TitleMismatch(_) => "title_mismatch",
            ExtractionError::EmptyRevision(_) => "empty_revision",
            ExtractionError::MalformedPayload { .. } => "malformed_payload",
            ExtractionError::SchemaMismatch { .. } => "schema_mismatch",
            ExtractionError::UnsupportedType { .. } => "unsupported_type",
            ExtractionError::IntegrityViolation(_) => "integrity_violation",
            ExtractionError::MissingPageId(_) => "missing_page_id",
        }
    }

    /// Whether the discard points at a page that looked relevant but could
    /// not be classified, as opposed to an ordinary filter outcome.
    pub fn is_diagnostic(&self) -> bool {
        match self {
            ExtractionError::IntegrityViolation(_) | ExtractionError::MissingPageId(_) => true,
            ExtractionError::SchemaMismatch { path, .. } => path.starts_with("Z2K2.Z14"),
            _ => false,
        }
    }
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Dump error: {0}")]
    Dump(#[from] DumpError),

    #[error("Invalid title pattern: {0}")]
    TitlePattern(#[from] regex::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
