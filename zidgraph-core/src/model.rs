use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Type tags carried in `Z2K2.Z1K1` of a persistent object.
pub const IMPLEMENTATION_TAG: &str = "Z14";
pub const FUNCTION_TAG: &str = "Z8";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    Implementation,
    FunctionDefinition,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Implementation => IMPLEMENTATION_TAG,
            ObjectType::FunctionDefinition => FUNCTION_TAG,
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            IMPLEMENTATION_TAG => Some(ObjectType::Implementation),
            FUNCTION_TAG => Some(ObjectType::FunctionDefinition),
            _ => None,
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified object pulled out of one dump page.
///
/// Implementations always carry `parent` and `composition`; function
/// definitions always carry `result_type`. The constructors are the only
/// way to build one, so the two never mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub title: String,
    pub otype: ObjectType,
    pub parent: Option<String>,
    pub composition: Option<Value>,
    pub result_type: Option<String>,
}

impl Record {
    pub fn implementation(
        id: impl Into<String>,
        title: impl Into<String>,
        parent: impl Into<String>,
        composition: Value,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            otype: ObjectType::Implementation,
            parent: Some(parent.into()),
            composition: Some(composition),
            result_type: None,
        }
    }

    pub fn function(
        id: impl Into<String>,
        title: impl Into<String>,
        result_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            otype: ObjectType::FunctionDefinition,
            parent: None,
            composition: None,
            result_type: Some(result_type.into()),
        }
    }

    pub fn is_implementation(&self) -> bool {
        self.otype == ObjectType::Implementation
    }
}

/// Directed relationship between two vertex names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl From<(&str, &str)> for Edge {
    fn from((source, target): (&str, &str)) -> Self {
        Edge::new(source, target)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}
