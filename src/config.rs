//! Output style: the names and punctuation stamped into each literal.
//!
//! Every field has a default matching the Direct3D sample code the output is
//! pasted into, so an empty style file (or none at all) is valid.

use crate::error::{ConvertError, Result};
use clap::ValueEnum;
use serde::Deserialize;
use std::path::Path;

/// Largest index type the consumer stores indices in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IndexWidth {
    /// `unsigned short`
    U16,
    #[default]
    U32,
}

impl IndexWidth {
    pub fn max(self) -> u64 {
        match self {
            IndexWidth::U16 => u64::from(u16::MAX),
            IndexWidth::U32 => u64::from(u32::MAX),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            IndexWidth::U16 => "u16",
            IndexWidth::U32 => "u32",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LiteralStyle {
    /// Vector constructor wrapping each coordinate triple.
    pub constructor: String,
    /// Trailing expression after the constructor, e.g. the vertex colour.
    pub tag: String,
    pub float_suffix: String,
    /// Field separator for delimited vertex lists.
    pub field_delimiter: char,
    /// Field separator inside OBJ `v` records; whitespace when unset.
    pub vertex_delimiter: Option<char>,
    pub indent: String,
    pub index_width: IndexWidth,
    /// When set, the block is emitted as `static const <type> <name>[] =`.
    pub declaration: Option<String>,
    pub vertex_type: String,
    pub index_type: String,
}

impl Default for LiteralStyle {
    fn default() -> Self {
        LiteralStyle {
            constructor: "XMFLOAT3".to_string(),
            tag: "colour".to_string(),
            float_suffix: "f".to_string(),
            field_delimiter: ';',
            vertex_delimiter: None,
            indent: "    ".to_string(),
            index_width: IndexWidth::default(),
            declaration: None,
            vertex_type: "VertexPositionColor".to_string(),
            index_type: "unsigned short".to_string(),
        }
    }
}

impl LiteralStyle {
    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))?;
        Self::from_toml(&text).map_err(|source| ConvertError::Style {
            path: path.to_path_buf(),
            source,
        })
    }
}
