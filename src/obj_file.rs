use crate::error::{ConvertError, ParseErrorKind, Result};
use nalgebra::{Point3, Vector3};

/// One vertex record.
///
/// The source text of each coordinate is kept so literals reproduce the
/// input digits exactly; `position` is the parsed value.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub fields: [String; 3],
}

impl Vertex {
    /// Builds a vertex from already-split fields. Fields are trimmed and
    /// empty ones dropped before counting.
    pub fn from_fields<'a, I>(fields: I, line: usize) -> Result<Vertex>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let fields: Vec<&str> = fields
            .into_iter()
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .collect();

        let [x, y, z] = fields[..] else {
            return Err(ConvertError::parse(
                line,
                ParseErrorKind::FieldCount {
                    expected: 3,
                    found: fields.len(),
                },
            ));
        };

        let position = Point3::new(
            parse_coordinate(x, line)?,
            parse_coordinate(y, line)?,
            parse_coordinate(z, line)?,
        );

        Ok(Vertex {
            position,
            fields: [x.to_string(), y.to_string(), z.to_string()],
        })
    }
}

fn parse_coordinate(field: &str, line: usize) -> Result<f32> {
    let value = field.parse::<f32>().map_err(|source| {
        ConvertError::parse(
            line,
            ParseErrorKind::InvalidFloat {
                field: field.to_string(),
                source,
            },
        )
    })?;

    if !value.is_finite() {
        return Err(ConvertError::parse(
            line,
            ParseErrorKind::NonFiniteFloat {
                field: field.to_string(),
            },
        ));
    }
    Ok(value)
}

/// One `f` record, already shifted to 0-based indices.
///
/// `groups` mirrors the `v/t/n` groups of the source line; empty slots
/// (`1//3`) are left out of their group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    pub groups: Vec<Vec<u64>>,
}

impl Face {
    pub fn parse(rest: &str, line: usize) -> Result<Face> {
        let groups = rest
            .split_whitespace()
            .map(|group| parse_group(group, line))
            .collect::<Result<Vec<Vec<u64>>>>()?;

        if groups.iter().all(Vec::is_empty) {
            return Err(ConvertError::parse(line, ParseErrorKind::EmptyFace));
        }
        Ok(Face { groups })
    }

    /// Indices in group order, then intra-group order.
    pub fn indices(&self) -> impl Iterator<Item = u64> + '_ {
        self.groups.iter().flatten().copied()
    }
}

fn parse_group(group: &str, line: usize) -> Result<Vec<u64>> {
    group
        .split('/')
        .filter(|index| !index.is_empty())
        .map(|index| {
            let one_based = index.parse::<u64>().map_err(|source| {
                ConvertError::parse(
                    line,
                    ParseErrorKind::InvalidIndex {
                        field: index.to_string(),
                        source,
                    },
                )
            })?;
            one_based.checked_sub(1).ok_or_else(|| {
                ConvertError::parse(
                    line,
                    ParseErrorKind::ZeroIndex {
                        group: group.to_string(),
                    },
                )
            })
        })
        .collect()
}

/// Splits an OBJ line into its directive keyword and the remainder.
///
/// Blank lines and `#` comments yield `None`.
pub fn directive(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => Some((keyword, rest.trim_start())),
        None => Some((line, "")),
    }
}

/// Axis-aligned box around a set of vertex positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Bounds {
    pub fn from_points<'a, I>(points: I) -> Option<Bounds>
    where
        I: IntoIterator<Item = &'a Point3<f32>>,
    {
        let mut points = points.into_iter();
        let first = *points.next()?;

        Some(points.fold(
            Bounds {
                min: first,
                max: first,
            },
            |bounds, point| Bounds {
                min: bounds.min.inf(point),
                max: bounds.max.sup(point),
            },
        ))
    }

    pub fn extent(&self) -> Vector3<f32> {
        self.max - self.min
    }

    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.min, &self.max)
    }
}
