//! PDF layout with the builtin Helvetica fonts

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use tracing::debug;

use super::ExportError;
use super::markdown::{Block, markdown_blocks, pdf_safe, wrap};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 18.0;
const LAYER_NAME: &str = "Itinerary";

/// Points to millimetres
const PT_TO_MM: f32 = 0.3528;

/// Rough Helvetica advance as a fraction of the font size
const AVG_CHAR_WIDTH: f32 = 0.5;

const BODY_SIZE: f32 = 10.5;
const TITLE_SIZE: f32 = 18.0;

/// Writes lines top to bottom, adding pages as it runs out of room
struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    /// Baseline of the next line, from the page bottom
    y: f32,
    pages: usize,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self, ExportError> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER_NAME);
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ExportError::Render(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ExportError::Render(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_HEIGHT - MARGIN,
            pages: 1,
        })
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER_NAME);
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - MARGIN;
        self.pages += 1;
        debug!(pages = self.pages, "PageWriter::new_page: called");
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }

    /// Wrap and draw `text`; `indent` is in millimetres from the left margin
    fn write(&mut self, text: &str, size: f32, bold: bool, indent: f32) {
        let line_height = size * PT_TO_MM * 1.45;
        let usable = PAGE_WIDTH - 2.0 * MARGIN - indent;
        let max_chars = (usable / (size * PT_TO_MM * AVG_CHAR_WIDTH)).floor() as usize;

        for line in wrap(text, max_chars) {
            if self.y - line_height < MARGIN {
                self.new_page();
            }
            self.y -= line_height;
            let font = if bold { &self.bold } else { &self.regular };
            self.layer.use_text(line, size, Mm(MARGIN + indent), Mm(self.y), font);
        }
    }

    fn finish(self) -> Result<Vec<u8>, ExportError> {
        debug!(pages = self.pages, "PageWriter::finish: called");
        self.doc.save_to_bytes().map_err(|e| ExportError::Render(e.to_string()))
    }
}

fn heading_size(level: u8) -> f32 {
    match level {
        1 => 15.0,
        2 => 13.0,
        _ => 11.5,
    }
}

/// Render the itinerary as an A4 PDF titled `Trip Plan to {destination}`
pub fn render_pdf(markdown: &str, destination: &str) -> Result<Vec<u8>, ExportError> {
    debug!(%destination, len = markdown.len(), "render_pdf: called");
    let title = pdf_safe(&format!("Trip Plan to {}", destination));
    let mut writer = PageWriter::new(&title)?;

    writer.write(&title, TITLE_SIZE, true, 0.0);
    writer.gap(4.0);

    for block in markdown_blocks(markdown) {
        match block {
            Block::Heading(level, text) => {
                writer.gap(3.0);
                writer.write(&pdf_safe(&text), heading_size(level), true, 0.0);
                writer.gap(1.0);
            }
            Block::Paragraph(text) => {
                writer.write(&pdf_safe(&text), BODY_SIZE, false, 0.0);
                writer.gap(2.0);
            }
            Block::ListItem(depth, text) => {
                let indent = 5.0 * depth as f32;
                writer.write(&format!("- {}", pdf_safe(&text)), BODY_SIZE, false, indent);
            }
            Block::TableRow { cells, header } => {
                let row = cells.iter().map(|c| pdf_safe(c)).collect::<Vec<_>>().join(" | ");
                writer.write(&row, BODY_SIZE, header, 2.0);
            }
        }
    }

    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_pdf_produces_document() {
        let bytes = render_pdf("# Day 1\n\nBeach time, ₹500 only 🏖️", "Goa").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_long_itinerary_spans_pages() {
        let markdown = (1..=120)
            .map(|i| format!("- Day {}: morning chai, afternoon fort, evening sunset point", i))
            .collect::<Vec<_>>()
            .join("\n");
        let bytes = render_pdf(&markdown, "Leh").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 1000);
    }

    #[test]
    fn test_empty_markdown_still_renders_title() {
        let bytes = render_pdf("", "Manali").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
