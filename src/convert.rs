use crate::config::LiteralStyle;
use crate::error::{ConvertError, ParseErrorKind, Result};
use crate::literal::{index_entry, vertex_entry, BlockKind, LiteralBlock};
use crate::obj_file::{directive, Bounds, Face, Vertex};
use crate::x_file;
use clap::ValueEnum;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Input layout to convert from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// `v x y z` records of a Wavefront OBJ file
    Vertices,
    /// `f a/b/c ...` records of a Wavefront OBJ file
    Faces,
    /// One delimited vertex per line, as in DirectX `.x` files
    XVertices,
    /// `N;i,j,k;,` face lines, as in DirectX `.x` files
    XIndices,
}

/// How `convert_vertices` splits the fields of a `v` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldDelimiter {
    #[default]
    Whitespace,
    Char(char),
}

impl From<Option<char>> for FieldDelimiter {
    fn from(delimiter: Option<char>) -> Self {
        delimiter.map_or(FieldDelimiter::Whitespace, FieldDelimiter::Char)
    }
}

impl FieldDelimiter {
    fn split<'a>(self, text: &'a str) -> Vec<&'a str> {
        match self {
            FieldDelimiter::Whitespace => text.split_whitespace().collect(),
            FieldDelimiter::Char(delimiter) => text.split(delimiter).collect(),
        }
    }
}

pub struct ModelLiteralConverter {
    style: LiteralStyle,
}

impl ModelLiteralConverter {
    pub fn new(style: LiteralStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &LiteralStyle {
        &self.style
    }

    /// Converts every `v` record into a vertex literal, in input order.
    pub fn convert_vertices<I>(
        &self,
        lines: I,
        delimiter: FieldDelimiter,
    ) -> Result<LiteralBlock>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut vertices = Vec::new();
        for (line_no, line) in numbered(lines) {
            let Some(("v", rest)) = directive(line.as_ref()) else {
                continue;
            };
            vertices.push(Vertex::from_fields(delimiter.split(rest), line_no)?);
        }

        Ok(self.vertex_block(&vertices, &self.style.float_suffix))
    }

    /// Converts every `f` record into one entry of 0-based indices.
    pub fn convert_faces<I>(&self, lines: I) -> Result<LiteralBlock>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut entries = Vec::new();
        for (line_no, line) in numbered(lines) {
            let Some(("f", rest)) = directive(line.as_ref()) else {
                continue;
            };
            let face = Face::parse(rest, line_no)?;
            let indices: Vec<u64> = face.indices().collect();
            self.check_width(&indices, line_no)?;
            entries.push(index_entry(&indices));
        }

        debug!(faces = entries.len(), "converted face records");
        Ok(LiteralBlock::new(BlockKind::Indices, entries, &self.style))
    }

    /// Converts one delimited vertex per non-blank line.
    pub fn convert_delimited<I>(
        &self,
        lines: I,
        delimiter: char,
        field_suffix: &str,
    ) -> Result<LiteralBlock>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut vertices = Vec::new();
        for (line_no, line) in numbered(lines) {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            vertices.push(x_file::parse_vertex(line, delimiter, line_no)?);
        }

        Ok(self.vertex_block(&vertices, field_suffix))
    }

    /// Converts `.x` face lines, whose indices are already 0-based.
    pub fn convert_index_list<I>(&self, lines: I) -> Result<LiteralBlock>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut entries = Vec::new();
        for (line_no, line) in numbered(lines) {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            let indices = x_file::parse_index_line(line, line_no)?;
            self.check_width(&indices, line_no)?;
            entries.push(index_entry(&indices));
        }

        debug!(faces = entries.len(), "converted index lines");
        Ok(LiteralBlock::new(BlockKind::Indices, entries, &self.style))
    }

    pub fn convert_str(&self, text: &str, mode: Mode) -> Result<LiteralBlock> {
        match mode {
            Mode::Vertices => {
                self.convert_vertices(text.lines(), self.style.vertex_delimiter.into())
            }
            Mode::Faces => self.convert_faces(text.lines()),
            Mode::XVertices => self.convert_delimited(
                text.lines(),
                self.style.field_delimiter,
                &self.style.float_suffix,
            ),
            Mode::XIndices => self.convert_index_list(text.lines()),
        }
    }

    /// Reads `input`, converts it, and replaces `output` only on success.
    pub fn convert_file(
        &self,
        input: &Path,
        output: &Path,
        mode: Mode,
    ) -> Result<ConversionSummary> {
        let text = std::fs::read_to_string(input).map_err(|e| ConvertError::io(input, e))?;
        let block = self.convert_str(&text, mode)?;
        write_atomic(output, &block.to_string())?;

        let summary = ConversionSummary::new(mode, &block, output);
        summary.log();
        Ok(summary)
    }

    fn vertex_block(&self, vertices: &[Vertex], suffix: &str) -> LiteralBlock {
        let entries = vertices
            .iter()
            .map(|vertex| vertex_entry(&vertex.fields, suffix, &self.style))
            .collect();
        let bounds = Bounds::from_points(vertices.iter().map(|vertex| &vertex.position));

        debug!(vertices = vertices.len(), "converted vertex records");
        LiteralBlock::new(BlockKind::Vertices, entries, &self.style).with_bounds(bounds)
    }

    fn check_width(&self, indices: &[u64], line_no: usize) -> Result<()> {
        let width = self.style.index_width;
        match indices.iter().find(|&&index| index > width.max()) {
            Some(&index) => Err(ConvertError::parse(
                line_no,
                ParseErrorKind::IndexOutOfRange {
                    index,
                    width: width.name(),
                },
            )),
            None => Ok(()),
        }
    }
}

impl Default for ModelLiteralConverter {
    fn default() -> Self {
        Self::new(LiteralStyle::default())
    }
}

/// Pairs each line with its 1-based line number.
fn numbered<I>(lines: I) -> impl Iterator<Item = (usize, I::Item)>
where
    I: IntoIterator,
{
    lines.into_iter().enumerate().map(|(i, line)| (i + 1, line))
}

/// Writes through a temporary file next to `path` and renames it into place.
///
/// The temporary file takes the permissions of the file it replaces. A new
/// destination is first created empty so it gets the process umask.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let placeholder = !path.exists();
    if placeholder {
        std::fs::File::create(path).map_err(|e| ConvertError::io(path, e))?;
    }

    let result = replace_contents(dir, path, contents);
    if result.is_err() && placeholder {
        let _ = std::fs::remove_file(path);
    }
    result
}

fn replace_contents(dir: &Path, path: &Path, contents: &str) -> Result<()> {
    let permissions = std::fs::metadata(path)
        .map_err(|e| ConvertError::io(path, e))?
        .permissions();

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(|e| ConvertError::io(dir, e))?;
    file.write_all(contents.as_bytes())
        .and_then(|()| file.flush())
        .and_then(|()| file.as_file().set_permissions(permissions))
        .map_err(|e| ConvertError::io(path, e))?;
    file.persist(path).map_err(|e| ConvertError::io(path, e.error))?;
    Ok(())
}

/// What a finished file conversion produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSummary {
    pub mode: Mode,
    pub entries: usize,
    pub bounds: Option<Bounds>,
    pub output: PathBuf,
}

impl ConversionSummary {
    pub fn new(mode: Mode, block: &LiteralBlock, output: &Path) -> Self {
        ConversionSummary {
            mode,
            entries: block.len(),
            bounds: block.bounds(),
            output: output.to_path_buf(),
        }
    }

    pub fn log(&self) {
        match &self.bounds {
            Some(bounds) => info!(
                mode = ?self.mode,
                entries = self.entries,
                min = ?bounds.min,
                max = ?bounds.max,
                extent = ?bounds.extent(),
                output = %self.output.display(),
                "wrote literal block"
            ),
            None => info!(
                mode = ?self.mode,
                entries = self.entries,
                output = %self.output.display(),
                "wrote literal block"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndexWidth;

    const SPHERE: &str = "\
# Blender v2.79 OBJ File
mtllib sphere.mtl
o Sphere
v 1.0 2.0 3.0
v -0.5 0.25 1e-3
vt 0.5 0.5
vn 0.0 1.0 0.0
usemtl None
s off
f 1/2/3 4/5/6 7/8/9
f 3/1/1 2/1/1 1/1/1
";

    #[test]
    fn vertices_in_input_order() {
        let block = ModelLiteralConverter::default()
            .convert_vertices(SPHERE.lines(), FieldDelimiter::Whitespace)
            .unwrap();

        assert_eq!(
            block.entries(),
            [
                "{XMFLOAT3(1.0f, 2.0f, 3.0f), colour}",
                "{XMFLOAT3(-0.5f, 0.25f, 1e-3f), colour}",
            ]
        );
        assert_eq!(block.kind(), BlockKind::Vertices);
    }

    #[test]
    fn vertex_scenario_renders_in_block() {
        let block = ModelLiteralConverter::default()
            .convert_str("v 1.0 2.0 3.0\n", Mode::Vertices)
            .unwrap();
        assert_eq!(
            block.to_string(),
            "{\n    {XMFLOAT3(1.0f, 2.0f, 3.0f), colour}\n};\n"
        );
    }

    #[test]
    fn vertices_track_bounds() {
        let block = ModelLiteralConverter::default()
            .convert_str(SPHERE, Mode::Vertices)
            .unwrap();
        let bounds = block.bounds().unwrap();
        assert_eq!(bounds.max.x, 1.0);
        assert_eq!(bounds.min.x, -0.5);
    }

    #[test]
    fn vertex_with_two_fields_reports_line() {
        let err = ModelLiteralConverter::default()
            .convert_str("# header\nv 1.0 2.0 3.0\nv 1.0 2.0\n", Mode::Vertices)
            .unwrap_err();
        assert_eq!(err.line(), Some(3));
        assert!(err.to_string().starts_with("line 3:"));
    }

    #[test]
    fn vertices_ignore_malformed_faces() {
        let block = ModelLiteralConverter::default()
            .convert_str("v 0 0 0\nf a/b/c\n", Mode::Vertices)
            .unwrap();
        assert_eq!(block.len(), 1);
    }

    #[test]
    fn vertices_with_custom_delimiter() {
        let block = ModelLiteralConverter::default()
            .convert_vertices(["v 1.5,2.5,3.5"], FieldDelimiter::Char(','))
            .unwrap();
        assert_eq!(block.entries(), ["{XMFLOAT3(1.5f, 2.5f, 3.5f), colour}"]);
    }

    #[test]
    fn faces_shift_every_index() {
        let block = ModelLiteralConverter::default()
            .convert_faces(SPHERE.lines())
            .unwrap();
        assert_eq!(
            block.entries(),
            ["0, 1, 2, 3, 4, 5, 6, 7, 8", "2, 0, 0, 1, 0, 0, 0, 0, 0"]
        );
    }

    #[test]
    fn faces_are_symmetrically_braced() {
        let block = ModelLiteralConverter::default()
            .convert_str("f 1 2 3\nf 3 2 4\n", Mode::Faces)
            .unwrap();
        assert_eq!(block.to_string(), "{\n    0, 1, 2,\n    2, 1, 3\n};\n");
    }

    #[test]
    fn vertex_delimiter_from_style() {
        let converter = ModelLiteralConverter::new(LiteralStyle {
            vertex_delimiter: Some(','),
            ..LiteralStyle::default()
        });
        let block = converter.convert_str("v 1.0, 2.0, 3.0\n", Mode::Vertices).unwrap();
        assert_eq!(block.entries(), ["{XMFLOAT3(1.0f, 2.0f, 3.0f), colour}"]);
    }

    #[test]
    fn non_finite_vertex_fails() {
        let err = ModelLiteralConverter::default()
            .convert_str("v 0 0 0\nv inf 0 0\n", Mode::Vertices)
            .unwrap_err();
        assert!(matches!(
            err,
            ConvertError::Parse {
                line: 2,
                kind: ParseErrorKind::NonFiniteFloat { .. }
            }
        ));
    }

    #[test]
    fn bare_face_record_fails() {
        let err = ModelLiteralConverter::default()
            .convert_str("f\nf 1 2 3\n", Mode::Faces)
            .unwrap_err();
        assert!(matches!(
            err,
            ConvertError::Parse {
                line: 1,
                kind: ParseErrorKind::EmptyFace
            }
        ));
    }

    #[test]
    fn index_line_without_indices_fails() {
        let err = ModelLiteralConverter::default()
            .convert_str("3;0,1,2;,\n;;\n", Mode::XIndices)
            .unwrap_err();
        assert!(matches!(
            err,
            ConvertError::Parse {
                line: 2,
                kind: ParseErrorKind::EmptyFace
            }
        ));
    }

    #[test]
    fn face_with_bad_index() {
        let err = ModelLiteralConverter::default()
            .convert_str("f 1/1/1 x/1/1 3/1/1\n", Mode::Faces)
            .unwrap_err();
        assert!(matches!(
            err,
            ConvertError::Parse {
                line: 1,
                kind: ParseErrorKind::InvalidIndex { .. }
            }
        ));
    }

    #[test]
    fn narrow_index_width() {
        let converter = ModelLiteralConverter::new(LiteralStyle {
            index_width: IndexWidth::U16,
            ..LiteralStyle::default()
        });
        assert!(converter.convert_str("f 65536 1 2\n", Mode::Faces).is_ok());

        let err = converter.convert_str("f 65537 1 2\n", Mode::Faces).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::Parse {
                kind: ParseErrorKind::IndexOutOfRange {
                    index: 65536,
                    width: "u16"
                },
                ..
            }
        ));
    }

    #[test]
    fn no_matching_records() {
        let converter = ModelLiteralConverter::default();
        for mode in [Mode::Vertices, Mode::Faces] {
            let block = converter.convert_str("# comment only\nvn 0 1 0\n", mode).unwrap();
            assert_eq!(block.to_string(), "{\n\n};\n");
        }
        for mode in [Mode::XVertices, Mode::XIndices] {
            let block = converter.convert_str("\n  \n", mode).unwrap();
            assert_eq!(block.to_string(), "{\n\n};\n");
        }
    }

    #[test]
    fn delimited_vertices() {
        let text = "1.000000;2.000000;3.000000;,\n-1.000000;0.000000;0.500000;;\n";
        let block = ModelLiteralConverter::default()
            .convert_delimited(text.lines(), ';', "f")
            .unwrap();
        assert_eq!(
            block.entries(),
            [
                "{XMFLOAT3(1.000000f, 2.000000f, 3.000000f), colour}",
                "{XMFLOAT3(-1.000000f, 0.000000f, 0.500000f), colour}",
            ]
        );
    }

    #[test]
    fn delimited_vertices_custom_suffix() {
        let block = ModelLiteralConverter::default()
            .convert_delimited(["1.0|2.0|3.0"], '|', "")
            .unwrap();
        assert_eq!(block.entries(), ["{XMFLOAT3(1.0, 2.0, 3.0), colour}"]);
    }

    #[test]
    fn delimited_vertex_with_two_fields() {
        let err = ModelLiteralConverter::default()
            .convert_delimited(["1.0;2.0;3.0;,", "", "1.0;2.0;,"], ';', "f")
            .unwrap_err();
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn index_lines() {
        let text = "3;0,1,2;,\n3;2,1,3;;\n";
        let block = ModelLiteralConverter::default()
            .convert_str(text, Mode::XIndices)
            .unwrap();
        assert_eq!(block.entries(), ["0, 1, 2", "2, 1, 3"]);
    }

    #[test]
    fn conversion_is_repeatable() {
        let converter = ModelLiteralConverter::default();
        let first = converter.convert_str(SPHERE, Mode::Faces).unwrap().to_string();
        let second = converter.convert_str(SPHERE, Mode::Faces).unwrap().to_string();
        assert_eq!(first, second);
    }
}
