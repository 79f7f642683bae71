use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The path resolves outside every allowed directory.
    #[error("access denied: {} is outside the allowed directories", .0.display())]
    Unauthorized(PathBuf),

    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Not a ZIP container, or a ZIP without a WordprocessingML body.
    #[error("invalid DOCX: {0}")]
    InvalidDocx(String),

    #[error("file already exists at {}; pass overwrite to replace it", .0.display())]
    AlreadyExists(PathBuf),

    #[error("style not found: {0:?}")]
    StyleNotFound(String),

    /// A name that is not a member of a closed enumeration (alignment, highlight, underline).
    #[error("unknown {kind} name: {name:?}")]
    UnknownName { kind: &'static str, name: String },

    /// A grid cell refers to content missing from the table's arena.
    #[error("invalid table: {0}")]
    InvalidTable(String),

    /// Text holding a character XML 1.0 cannot carry, such as a C0 control.
    #[error("text contains a character XML cannot store: {0}")]
    InvalidText(String),

    #[error("invalid color {0:?}: expected 6 hex digits")]
    InvalidColor(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
