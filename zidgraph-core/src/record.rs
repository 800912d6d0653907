// Record extraction from raw dump pages

use crate::error::ExtractionError;
use crate::model::{ObjectType, Record};
use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use zidgraph_dump::RawPage;

/// Titles of persistent objects: `Z` followed by digits.
pub const DEFAULT_TITLE_PATTERN: &str = r"^Z\d+$";

static DEFAULT_TITLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_TITLE_PATTERN).expect("default title pattern is valid"));

const BODY_KEY: &str = "Z2K2";
const TYPE_KEY: &str = "Z1K1";
const IMPLEMENTATION_FUNCTION_KEY: &str = "Z14K1";
const IMPLEMENTATION_COMPOSITION_KEY: &str = "Z14K2";
const FUNCTION_RETURN_TYPE_KEY: &str = "Z8K2";

/// Turns raw pages into classified records.
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    title_pattern: Regex,
}

impl Default for RecordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordExtractor {
    pub fn new() -> Self {
        Self {
            title_pattern: DEFAULT_TITLE_REGEX.clone(),
        }
    }

    pub fn with_title_pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            title_pattern: Regex::new(pattern)?,
        })
    }

    pub fn title_matches(&self, title: &str) -> bool {
        self.title_pattern.is_match(title)
    }

    /// Classify one page.
    ///
    /// Only implementations and function definitions come back as records;
    /// every other outcome is an [`ExtractionError`] describing why the page
    /// was dropped.
    pub fn extract(&self, page: &RawPage) -> Result<Record, ExtractionError> {
        let title = page.title.as_str();
        if !self.title_matches(title) {
            return Err(ExtractionError::TitleMismatch(title.to_string()));
        }

        let text = page
            .text
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ExtractionError::EmptyRevision(title.to_string()))?;

        let document = decode_payload(text).map_err(|e| ExtractionError::MalformedPayload {
            title: title.to_string(),
            message: e.to_string(),
        })?;

        let body = document
            .as_object()
            .and_then(|doc| doc.get(BODY_KEY))
            .and_then(Value::as_object)
            .ok_or_else(|| ExtractionError::schema(title, BODY_KEY))?;

        let otype = classify(title, body)?;

        let id = page
            .id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ExtractionError::MissingPageId(title.to_string()))?;

        match otype {
            ObjectType::Implementation => {
                let composition = present(body, IMPLEMENTATION_COMPOSITION_KEY)
                    .ok_or_else(|| ExtractionError::schema(title, "Z2K2.Z14K2"))?;
                let parent = match present(body, IMPLEMENTATION_FUNCTION_KEY) {
                    Some(Value::String(parent)) => parent,
                    Some(_) => return Err(ExtractionError::schema(title, "Z2K2.Z14K1")),
                    None => return Err(ExtractionError::IntegrityViolation(title.to_string())),
                };
                Ok(Record::implementation(id, title, parent.as_str(), composition.clone()))
            }
            ObjectType::FunctionDefinition => {
                let result_type = match present(body, FUNCTION_RETURN_TYPE_KEY) {
                    Some(Value::String(tag)) => tag.clone(),
                    Some(typed) => typed.to_string(),
                    None => return Err(ExtractionError::schema(title, "Z2K2.Z8K2")),
                };
                Ok(Record::function(id, title, result_type))
            }
        }
    }

    /// Extract every page, keeping successes in input order.
    pub fn extract_all<'a, I>(&self, pages: I) -> Vec<Record>
    where
        I: IntoIterator<Item = &'a RawPage>,
    {
        pages
            .into_iter()
            .filter_map(|page| self.extract(page).ok())
            .collect()
    }
}

/// Revision text is HTML-unescaped once more before it is parsed as JSON.
///
/// Nesting depth is not limited; the stack grows as the parser descends.
fn decode_payload(text: &str) -> Result<Value, serde_json::Error> {
    let unescaped = html_escape::decode_html_entities(text);
    let mut deserializer = serde_json::Deserializer::from_str(&unescaped);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(value)
}

fn classify(title: &str, body: &Map<String, Value>) -> Result<ObjectType, ExtractionError> {
    let tag = match present(body, TYPE_KEY) {
        Some(Value::String(tag)) => tag.as_str(),
        Some(other) => {
            return Err(ExtractionError::UnsupportedType {
                title: title.to_string(),
                tag: other.to_string(),
            });
        }
        None => return Err(ExtractionError::schema(title, "Z2K2.Z1K1")),
    };

    ObjectType::from_tag(tag).ok_or_else(|| ExtractionError::UnsupportedType {
        title: title.to_string(),
        tag: tag.to_string(),
    })
}

/// A key that exists and is not `null`.
fn present<'a>(body: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    body.get(key).filter(|v| !v.is_null())
}
