use crate::fonts::FontResources;
use crate::helpers;
use labelsheet_layout::{FitResult, LabelFonts};
use labelsheet_render_core::utils::encode_text_string;
use labelsheet_render_core::{DocumentRenderer, RenderError};
use labelsheet_types::Size;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, StringFormat, dictionary};

const DEFAULT_TITLE: &str = "Shipping Labels";
const PRODUCER: &str = concat!("labelsheet ", env!("CARGO_PKG_VERSION"));

/// A PDF renderer using the `lopdf` library. The document is assembled in
/// memory and serialized by `finish`.
///
/// Every page shares one resource dictionary. Its font objects are written
/// by `finish`, once the glyphs each embedded face needs are known.
pub struct LopdfRenderer {
    doc: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    page_size: Size,
    title: String,
    fonts: FontResources,
    page_ids: Vec<ObjectId>,
    current: Vec<Operation>,
}

impl LopdfRenderer {
    pub fn new(page_size: Size) -> Self {
        Self::with_title(page_size, DEFAULT_TITLE)
    }

    pub fn with_title(page_size: Size, title: impl Into<String>) -> Self {
        Self::with_fonts(page_size, title, LabelFonts::Standard)
    }

    /// A renderer that sets text in `fonts`. These must be the faces the
    /// blocks were fitted with.
    pub fn with_fonts(page_size: Size, title: impl Into<String>, fonts: LabelFonts) -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let resources_id = doc.new_object_id();

        Self {
            doc,
            pages_id,
            resources_id,
            page_size,
            title: title.into(),
            fonts: FontResources::new(fonts),
            page_ids: Vec::new(),
            current: Vec::new(),
        }
    }

    fn close_page(&mut self) -> Result<(), RenderError> {
        let content = Content {
            operations: std::mem::take(&mut self.current),
        };
        let content_id = self
            .doc
            .add_object(Stream::new(dictionary! {}, content.encode()?));

        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                0.0.into(),
                0.0.into(),
                self.page_size.width.into(),
                self.page_size.height.into(),
            ],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        });
        self.page_ids.push(page_id);
        log::debug!("Closed page {}", self.page_ids.len());
        Ok(())
    }
}

impl DocumentRenderer for LopdfRenderer {
    fn new_page(&mut self) -> Result<(), RenderError> {
        self.close_page()
    }

    fn draw_text(&mut self, x: f32, top: f32, block: &FitResult) -> Result<f32, RenderError> {
        if !x.is_finite() || !top.is_finite() {
            return Err(RenderError::Other(format!(
                "Cannot draw text at non-finite position ({}, {})",
                x, top
            )));
        }
        let ops = helpers::block_operations(x, top, block, &mut self.fonts);
        self.current.extend(ops);
        Ok(block.height)
    }

    fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn finish(self: Box<Self>) -> Result<Vec<u8>, RenderError> {
        let mut renderer = *self;
        if !renderer.current.is_empty() {
            renderer.close_page()?;
        }

        let kids: Vec<Object> = renderer
            .page_ids
            .iter()
            .map(|id| Object::Reference(*id))
            .collect();
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => renderer.page_ids.len() as i64,
        };
        let doc = &mut renderer.doc;
        doc.objects.insert(renderer.pages_id, Object::Dictionary(pages));

        let font_dict = renderer.fonts.write(doc)?;
        let resources = dictionary! { "Font" => font_dict };
        doc.objects.insert(renderer.resources_id, Object::Dictionary(resources));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => renderer.pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => text_string(&renderer.title),
            "Producer" => Object::string_literal(PRODUCER),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        log::debug!(
            "Serialized {} pages into {} bytes",
            renderer.page_ids.len(),
            buffer.len()
        );
        Ok(buffer)
    }
}

/// A document-information string: literal when ASCII, otherwise UTF-16BE
/// in hex.
fn text_string(text: &str) -> Object {
    let format = if text.is_ascii() {
        StringFormat::Literal
    } else {
        StringFormat::Hexadecimal
    };
    Object::String(encode_text_string(text), format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use labelsheet_layout::{FitSettings, FontFace, FontMetrics, StandardFonts, fit_text};
    use labelsheet_style::RichText;

    const A4: Size = Size {
        width: 595.28,
        height: 841.89,
    };

    const REGULAR: &str = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../tests/fixtures/fonts/LabelTest-Regular.ttf"
    );

    fn block_in(text: &str, metrics: &dyn FontMetrics) -> FitResult {
        let text = RichText::new().bold("DELIVERY TO:").line_break().text(text);
        fit_text(&text, Size::new(250.0, 180.0), &FitSettings::default(), metrics)
    }

    fn block(text: &str) -> FitResult {
        block_in(text, &StandardFonts)
    }

    fn load(bytes: &[u8]) -> Document {
        Document::load_mem(bytes).unwrap()
    }

    #[test]
    fn test_single_page_document() {
        let mut renderer: Box<dyn DocumentRenderer> = Box::new(LopdfRenderer::new(A4));
        let height = renderer.draw_text(56.7, 765.0, &block("Ana Lopez")).unwrap();
        assert_eq!(height, 24.0);
        let bytes = renderer.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));

        let doc = load(&bytes);
        assert_eq!(doc.get_pages().len(), 1);
        let text = doc.extract_text(&[1]).unwrap();
        assert!(text.contains("DELIVERY TO:"));
        assert!(text.contains("Ana Lopez"));
    }

    #[test]
    fn test_new_page_closes_current_page() {
        let mut renderer = Box::new(LopdfRenderer::new(A4));
        renderer.draw_text(10.0, 800.0, &block("First")).unwrap();
        renderer.new_page().unwrap();
        assert_eq!(renderer.page_count(), 1);
        renderer.draw_text(10.0, 800.0, &block("Second")).unwrap();
        let doc = load(&renderer.finish().unwrap());
        assert_eq!(doc.get_pages().len(), 2);
        assert!(doc.extract_text(&[2]).unwrap().contains("Second"));
    }

    #[test]
    fn test_trailing_empty_page_is_not_emitted() {
        let mut renderer = Box::new(LopdfRenderer::new(A4));
        renderer.draw_text(10.0, 800.0, &block("Only")).unwrap();
        renderer.new_page().unwrap();
        let doc = load(&renderer.finish().unwrap());
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_document_info_and_fonts() {
        let mut renderer = Box::new(LopdfRenderer::with_title(A4, "Batch 7"));
        renderer.draw_text(10.0, 800.0, &block("Ana")).unwrap();
        let doc = load(&renderer.finish().unwrap());

        let info_id = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
        let info = doc.get_dictionary(info_id).unwrap();
        assert_eq!(info.get(b"Title").unwrap().as_str().unwrap(), b"Batch 7");

        let mut base_fonts: Vec<String> = doc
            .objects
            .values()
            .filter_map(|obj| obj.as_dict().ok())
            .filter(|dict| dict.get(b"Type").and_then(|t| t.as_name()).ok() == Some(b"Font"))
            .filter_map(|dict| dict.get(b"BaseFont").and_then(|n| n.as_name()).ok())
            .map(|name| String::from_utf8_lossy(name).to_string())
            .collect();
        base_fonts.sort();
        assert_eq!(base_fonts, vec!["Helvetica", "Helvetica-Bold"]);
    }

    #[test]
    fn test_non_ascii_title_is_utf16() {
        let mut renderer = Box::new(LopdfRenderer::with_title(A4, "Envíos"));
        renderer.draw_text(10.0, 800.0, &block("Ana")).unwrap();
        let doc = load(&renderer.finish().unwrap());

        let info_id = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
        let title = doc.get_dictionary(info_id).unwrap().get(b"Title").unwrap();
        let mut expected = vec![0xFE, 0xFF];
        for unit in "Envíos".encode_utf16() {
            expected.extend_from_slice(&unit.to_be_bytes());
        }
        assert_eq!(title.as_str().unwrap(), expected.as_slice());
    }

    #[test]
    fn test_embedded_font_text_is_extractable() {
        let fonts = LabelFonts::embedded(FontFace::from_file(REGULAR).unwrap(), None);
        let mut renderer = Box::new(LopdfRenderer::with_fonts(A4, "Batch", fonts.clone()));
        let block = block_in("山田太郎 東京都渋谷区", &fonts);
        renderer.draw_text(10.0, 800.0, &block).unwrap();
        let doc = load(&renderer.finish().unwrap());

        let text = doc.extract_text(&[1]).unwrap();
        assert!(text.contains("DELIVERY TO:"));
        assert!(text.contains("山田太郎"));
        assert!(text.contains("東京都渋谷区"));
        assert!(!text.contains('?'));
    }

    #[test]
    fn test_rejects_non_finite_position() {
        let mut renderer = LopdfRenderer::new(A4);
        assert!(renderer.draw_text(f32::NAN, 10.0, &block("x")).is_err());
    }
}
