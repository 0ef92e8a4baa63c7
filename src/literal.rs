use crate::config::LiteralStyle;
use crate::obj_file::Bounds;
use itertools::Itertools;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Vertices,
    Indices,
}

/// A brace-delimited initializer list, ready to paste into C++ source.
///
/// Entries are stored unindented; `Display` renders the whole block,
/// newline-terminated. An empty block renders as `{\n\n};\n`.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralBlock {
    kind: BlockKind,
    entries: Vec<String>,
    header: Option<String>,
    indent: String,
    bounds: Option<Bounds>,
}

impl LiteralBlock {
    pub fn new(kind: BlockKind, entries: Vec<String>, style: &LiteralStyle) -> Self {
        let header = style.declaration.as_ref().map(|name| {
            let ty = match kind {
                BlockKind::Vertices => &style.vertex_type,
                BlockKind::Indices => &style.index_type,
            };
            format!("static const {ty} {name}[] =")
        });

        LiteralBlock {
            kind,
            entries,
            header,
            indent: style.indent.clone(),
            bounds: None,
        }
    }

    pub(crate) fn with_bounds(mut self, bounds: Option<Bounds>) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Extent of the vertex positions, for vertex blocks with at least one entry.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }
}

impl fmt::Display for LiteralBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(header) = &self.header {
            writeln!(f, "{header}")?;
        }
        writeln!(f, "{{")?;
        let body = self
            .entries
            .iter()
            .map(|entry| format!("{}{}", self.indent, entry))
            .join(",\n");
        writeln!(f, "{body}")?;
        writeln!(f, "}};")
    }
}

/// Formats one source coordinate as a float literal with `suffix`.
///
/// Integer-looking text gains a `.0` so the result stays a valid C++ float
/// literal (`1f` is not).
pub fn float_literal(text: &str, suffix: &str) -> String {
    let text = text.trim();
    if text.contains(|c: char| matches!(c, '.' | 'e' | 'E')) {
        format!("{text}{suffix}")
    } else {
        format!("{text}.0{suffix}")
    }
}

/// `{XMFLOAT3(x, y, z), colour}` with the names taken from `style`.
pub fn vertex_entry<S: AsRef<str>>(
    fields: &[S; 3],
    suffix: &str,
    style: &LiteralStyle,
) -> String {
    let coords = fields
        .iter()
        .map(|field| float_literal(field.as_ref(), suffix))
        .join(", ");
    format!("{{{}({}), {}}}", style.constructor, coords, style.tag)
}

pub fn index_entry(indices: &[u64]) -> String {
    indices.iter().join(", ")
}
