mod access;
mod config;
mod docx;
mod error;
mod model;

pub use access::PathGuard;
pub use config::{ALLOWED_DIR_ENV, Config};
pub use error::{Error, Result};
pub use model::{
    Alignment, Block, CellContent, CellContentId, DocData, GridCell, Highlight, LineSpacing,
    LineSpacingRule, ParagraphData, RunData, TableData, Underline, UnderlineStyle, VMerge,
};

use std::path::Path;
use std::time::Instant;

/// Reads .docx files that lie inside the configured directories.
pub struct Reader<'a> {
    config: &'a Config,
}

impl<'a> Reader<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn read(&self, path: &Path) -> Result<DocData> {
        let t0 = Instant::now();

        let path = self.config.guard().authorize(path)?;
        let doc = docx::parse(&path)?;

        log::info!(
            "Read {}: {} blocks in {:.1}ms",
            path.display(),
            doc.blocks.len(),
            t0.elapsed().as_secs_f64() * 1000.0,
        );
        Ok(doc)
    }

    /// Parse an in-memory .docx. No path check applies.
    pub fn read_bytes(&self, data: &[u8]) -> Result<DocData> {
        docx::parse_bytes(data)
    }
}

/// Writes `DocData` as new .docx files inside the configured directories.
pub struct Writer<'a> {
    config: &'a Config,
}

impl<'a> Writer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Nothing is built or written when the target exists and `overwrite`
    /// is false.
    pub fn write(&self, doc: &DocData, path: &Path, overwrite: bool) -> Result<()> {
        let t0 = Instant::now();

        let path = self.config.guard().authorize(path)?;
        if !overwrite && path.exists() {
            return Err(Error::AlreadyExists(path));
        }

        let bytes = docx::render(doc)?;
        let t_render = t0.elapsed();

        std::fs::write(&path, &bytes).map_err(Error::Io)?;
        let t_total = t0.elapsed();

        log::info!(
            "Wrote {}: render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
            path.display(),
            t_render.as_secs_f64() * 1000.0,
            (t_total - t_render).as_secs_f64() * 1000.0,
            t_total.as_secs_f64() * 1000.0,
            bytes.len(),
        );
        Ok(())
    }

    /// Render `doc` to .docx bytes without touching the filesystem.
    pub fn write_bytes(&self, doc: &DocData) -> Result<Vec<u8>> {
        docx::render(doc)
    }
}

pub fn read_docx(path: &Path, config: &Config) -> Result<DocData> {
    Reader::new(config).read(path)
}

pub fn read_docx_bytes(data: &[u8]) -> Result<DocData> {
    docx::parse_bytes(data)
}

pub fn write_docx(doc: &DocData, path: &Path, overwrite: bool, config: &Config) -> Result<()> {
    Writer::new(config).write(doc, path, overwrite)
}

pub fn render_docx(doc: &DocData) -> Result<Vec<u8>> {
    docx::render(doc)
}
