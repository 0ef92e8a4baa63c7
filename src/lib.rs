//! Converts mesh text into C++ initializer literals.
//!
//! Wavefront OBJ `v`/`f` records and DirectX `.x` vertex and face lists are
//! re-emitted as brace-delimited blocks such as
//!
//! ```text
//! {
//!     {XMFLOAT3(1.0f, 2.0f, 3.0f), colour},
//!     {XMFLOAT3(-1.0f, 0.0f, 0.5f), colour}
//! };
//! ```
//!
//! ready to paste into a Direct3D vertex or index buffer definition.

pub mod config;
pub mod convert;
pub mod error;
pub mod literal;
pub mod obj_file;
pub mod x_file;

pub use config::{IndexWidth, LiteralStyle};
pub use convert::{ConversionSummary, FieldDelimiter, Mode, ModelLiteralConverter};
pub use error::{ConvertError, ParseErrorKind, Result};
pub use literal::{BlockKind, LiteralBlock};
