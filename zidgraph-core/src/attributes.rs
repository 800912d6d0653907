// Per-vertex colors for graph rendering

use crate::model::{ObjectType, Record};
use serde::{Deserialize, Serialize};
use md5::{Digest, Md5};
use std::collections::HashMap;
use std::fmt;

/// Fill for implementation vertices (`lightblue`).
pub const IMPLEMENTATION_COLOR: Color = Color::rgb(0xad, 0xd8, 0xe6);
/// Fill for call targets that are not records themselves (`red`).
pub const EXTERNAL_COLOR: Color = Color::rgb(0xff, 0x00, 0x00);

/// Seed used when a function definition has no result type.
const MISSING_RESULT_TYPE: &str = "None";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Stable color for an arbitrary string: the first three bytes of its
    /// MD5 digest, i.e. the first six hex digits.
    pub fn from_hash(seed: &str) -> Self {
        let digest = Md5::digest(seed.as_bytes());
        Self::rgb(digest[0], digest[1], digest[2])
    }

    /// `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Color for a vertex with the given classification.
pub fn color_for(otype: Option<ObjectType>, result_type: Option<&str>) -> Color {
    match otype {
        Some(ObjectType::Implementation) => IMPLEMENTATION_COLOR,
        Some(ObjectType::FunctionDefinition) => {
            Color::from_hash(result_type.unwrap_or(MISSING_RESULT_TYPE))
        }
        None => EXTERNAL_COLOR,
    }
}

/// Looks up vertex classifications built once from the record list.
#[derive(Debug, Clone, Default)]
pub struct AttributeAssigner {
    otype_by_title: HashMap<String, ObjectType>,
    result_type_by_title: HashMap<String, Option<String>>,
}

impl AttributeAssigner {
    pub fn from_records(records: &[Record]) -> Self {
        let mut assigner = AttributeAssigner::default();
        for record in records {
            assigner
                .otype_by_title
                .insert(record.title.clone(), record.otype);
            assigner
                .result_type_by_title
                .insert(record.title.clone(), record.result_type.clone());
        }
        assigner
    }

    pub fn otype(&self, vertex: &str) -> Option<ObjectType> {
        self.otype_by_title.get(vertex.trim()).copied()
    }

    pub fn result_type(&self, vertex: &str) -> Option<&str> {
        self.result_type_by_title
            .get(vertex.trim())
            .and_then(|rt| rt.as_deref())
    }

    pub fn color(&self, vertex: &str) -> Color {
        color_for(self.otype(vertex), self.result_type(vertex))
    }
}
