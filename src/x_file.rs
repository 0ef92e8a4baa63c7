//! Records from DirectX `.x` mesh blocks.
//!
//! Vertex lines look like `1.000000;2.000000;3.000000;,` and face lines like
//! `3;0,1,2;,` (the final line of a block ends in `;;` instead). Terminators
//! are removed by stripping trailing punctuation, never by fixed offsets.

use crate::error::{ConvertError, ParseErrorKind, Result};
use crate::obj_file::Vertex;

/// Drops surrounding whitespace and any trailing `,`/`;` run.
pub fn strip_terminator(line: &str, delimiter: char) -> &str {
    line.trim()
        .trim_end_matches(|c: char| c == ',' || c == ';' || c == delimiter)
        .trim_end()
}

pub fn parse_vertex(line: &str, delimiter: char, line_no: usize) -> Result<Vertex> {
    Vertex::from_fields(strip_terminator(line, delimiter).split(delimiter), line_no)
}

/// Parses one face line into its (already 0-based) indices.
///
/// A leading `N;` count is checked against the number of indices listed.
/// Lines without a count are taken as a bare comma-separated list.
pub fn parse_index_line(line: &str, line_no: usize) -> Result<Vec<u64>> {
    let body = strip_terminator(line, ';');

    let (declared, list) = match body.split_once(';') {
        Some((count, list)) => {
            let count = count.trim();
            let declared = count.parse::<usize>().map_err(|source| {
                ConvertError::parse(
                    line_no,
                    ParseErrorKind::InvalidIndex {
                        field: count.to_string(),
                        source,
                    },
                )
            })?;
            (Some(declared), list)
        }
        None => (None, body),
    };

    let indices = list
        .split(',')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(|field| {
            field.parse::<u64>().map_err(|source| {
                ConvertError::parse(
                    line_no,
                    ParseErrorKind::InvalidIndex {
                        field: field.to_string(),
                        source,
                    },
                )
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if indices.is_empty() {
        return Err(ConvertError::parse(line_no, ParseErrorKind::EmptyFace));
    }

    if let Some(declared) = declared {
        if declared != indices.len() {
            return Err(ConvertError::parse(
                line_no,
                ParseErrorKind::IndexCountMismatch {
                    declared,
                    found: indices.len(),
                },
            ));
        }
    }

    Ok(indices)
}
