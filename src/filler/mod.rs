//! Form filler core: walks a document and rewrites labeled text nodes.

mod node;

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};

use docx_rust::document::{BodyContent, Paragraph, TableCell, TableRowContent};
use docx_rust::{Docx, DocxFile};

use crate::error::{Error, Result};
use crate::fields::FieldTable;

/// Fills labeled fields in DOCX documents.
pub struct FormFiller {
    fields: FieldTable,
}

impl FormFiller {
    /// Creates a filler using the given alias table.
    pub fn new(fields: FieldTable) -> Self {
        Self { fields }
    }

    /// Creates a filler with the built-in Vietnamese alias table.
    pub fn with_defaults() -> Self {
        Self::new(FieldTable::standard())
    }

    /// Fills `path` with the values in `data` and saves the result next to
    /// the input as `<stem>_filled.docx`.
    ///
    /// Returns the output path and the number of rewritten nodes. A document
    /// in which nothing matched is still written out, with a count of zero.
    pub fn fill<P: AsRef<Path>>(
        &self,
        path: P,
        data: &HashMap<String, String>,
    ) -> Result<(PathBuf, usize)> {
        let path = path.as_ref();
        log::debug!("processing {}", path.display());
        verify_docx_container(path)?;

        let docx_file =
            DocxFile::from_file(path).map_err(|e| Error::DocxParse(format!("{:?}", e)))?;
        let mut docx = docx_file
            .parse()
            .map_err(|e| Error::DocxParse(format!("{:?}", e)))?;

        let replacements = self.apply(&mut docx, data);

        let output = filled_output_path(path);
        docx.write_file(&output)
            .map_err(|e| Error::DocxWrite(format!("{:?}", e)))?;

        log::info!(
            "filled {}: {} replacement(s) -> {}",
            path.display(),
            replacements,
            output.display()
        );
        Ok((output, replacements))
    }

    /// Rewrites every matching node of an in-memory document.
    ///
    /// Body paragraphs are visited first, then each cell of every top-level
    /// table. Returns the number of nodes whose text changed.
    pub fn apply(&self, docx: &mut Docx<'_>, data: &HashMap<String, String>) -> usize {
        let mut replacements = 0;

        for content in docx.document.body.content.iter_mut() {
            if let BodyContent::Paragraph(paragraph) = content {
                replacements += self.rewrite_paragraph(paragraph, data);
            }
        }

        for content in docx.document.body.content.iter_mut() {
            if let BodyContent::Table(table) = content {
                for row in table.rows.iter_mut() {
                    for cell in row.cells.iter_mut() {
                        if let TableRowContent::TableCell(cell) = cell {
                            replacements += self.rewrite_cell(cell, data);
                        }
                    }
                }
            }
        }

        replacements
    }

    fn rewrite_paragraph(
        &self,
        paragraph: &mut Paragraph<'_>,
        data: &HashMap<String, String>,
    ) -> usize {
        let original = node::paragraph_text(paragraph);
        match self.fields.rewrite(&original, data) {
            Some(new_text) if new_text != original => {
                log::debug!("updated paragraph: {:.40} -> {:.40}", original, new_text);
                node::set_paragraph_text(paragraph, &new_text);
                1
            }
            _ => 0,
        }
    }

    fn rewrite_cell(&self, cell: &mut TableCell<'_>, data: &HashMap<String, String>) -> usize {
        let original = node::cell_text(cell);
        match self.fields.rewrite(&original, data) {
            Some(new_text) if new_text != original => {
                log::debug!("updated cell: {:.40} -> {:.40}", original, new_text);
                node::set_cell_text(cell, &new_text);
                1
            }
            _ => 0,
        }
    }
}

/// Checks that `path` is an OOXML container with a `word/document.xml` entry.
fn verify_docx_container(path: &Path) -> Result<()> {
    let file = File::open(path)?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|_| Error::NotDocx(path.display().to_string()))?;
    if archive.by_name("word/document.xml").is_err() {
        return Err(Error::NotDocx(path.display().to_string()));
    }
    Ok(())
}

/// Derives the save path: `report.docx` becomes `report_filled.docx`; any
/// other name simply gains the `_filled.docx` suffix.
fn filled_output_path(path: &Path) -> PathBuf {
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        if let Some(stem) = name.strip_suffix(".docx") {
            return path.with_file_name(format!("{stem}_filled.docx"));
        }
    }
    let mut name = OsString::from(path.as_os_str());
    name.push("_filled.docx");
    PathBuf::from(name)
}
