//! Plain-text access to paragraphs and table cells.

use docx_rust::document::{
    Paragraph, ParagraphContent, Run, RunContent, TableCell, TableCellContent, Text,
};

/// Concatenates the visible text of a paragraph.
///
/// Tabs map to `\t` and breaks to `\n`, so the rewrite rules can see line
/// boundaries inside a single paragraph. Hyperlink and field content is not
/// part of the visible text.
pub(crate) fn paragraph_text(paragraph: &Paragraph<'_>) -> String {
    let mut text = String::new();
    for content in &paragraph.content {
        if let ParagraphContent::Run(run) = content {
            push_run_text(run, &mut text);
        }
    }
    text
}

/// Replaces a paragraph's content with one unformatted run holding `text`.
/// The paragraph's own properties (style, numbering, alignment) are kept.
pub(crate) fn set_paragraph_text<'a>(paragraph: &mut Paragraph<'a>, text: &str) {
    let mut run = Run::default();
    run.content.push(RunContent::Text(Text {
        text: text.to_string().into(),
        ..Default::default()
    }));
    paragraph.content.clear();
    paragraph.content.push(ParagraphContent::Run(run));
}

/// Concatenates the text of a cell's direct paragraphs, one line each.
/// Nested tables are not flattened into the cell text.
pub(crate) fn cell_text(cell: &TableCell<'_>) -> String {
    let mut lines = Vec::new();
    for item in &cell.content {
        if let TableCellContent::Paragraph(paragraph) = item {
            lines.push(paragraph_text(paragraph));
        }
    }
    lines.join("\n")
}

/// Replaces a cell's content with one plain paragraph holding `text`.
pub(crate) fn set_cell_text<'a>(cell: &mut TableCell<'a>, text: &str) {
    let mut paragraph = Paragraph::default();
    set_paragraph_text(&mut paragraph, text);
    cell.content.clear();
    cell.content.push(TableCellContent::Paragraph(paragraph));
}

fn push_run_text(run: &Run<'_>, out: &mut String) {
    for content in &run.content {
        match content {
            RunContent::Text(t) => out.push_str(&t.text),
            RunContent::Tab(_) => out.push('\t'),
            RunContent::Break(_) => out.push('\n'),
            RunContent::CarriageReturn(_) => out.push('\n'),
            _ => {}
        }
    }
}
