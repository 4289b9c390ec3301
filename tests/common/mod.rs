#![allow(dead_code)]

use labelsheet::{CsvRowSource, LabelPipeline, LabelSheet, PipelineError};
use lopdf::Document as LopdfDocument;
use std::path::{Path, PathBuf};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub const HEADER: &str = "Name,Shipping Name,Shipping Street,Shipping City,Shipping Zip,Shipping Province,Shipping Phone,Lineitem quantity,Lineitem name";

/// Path of a TrueType face under `tests/fixtures/fonts`.
pub fn fixture_font(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/fonts")
        .join(name)
}

/// One order shipped to Tokyo, addressed in Japanese.
pub fn tokyo_order() -> String {
    export(&[[
        "#3001",
        "山田太郎",
        "渋谷区 1-2-3",
        "東京都",
        "150-0002",
        "東京",
        "81312345678",
        "2",
        "City Pass (English)",
    ]])
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text of one page, 1-based.
    pub fn page_text(&self, page: u32) -> String {
        self.doc.extract_text(&[page]).unwrap_or_default()
    }

    /// Number of labels drawn on a page.
    pub fn labels_on_page(&self, page: u32) -> usize {
        self.page_text(page).matches("DELIVERY TO:").count()
    }

    /// All text content, page by page
    pub fn text(&self) -> String {
        (1..=self.page_count() as u32)
            .map(|p| self.page_text(p))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Builds an order export. Each row is
/// `[order, name, street, city, zip, province, phone, quantity, item name]`.
pub fn export(rows: &[[&str; 9]]) -> String {
    let mut csv = String::from(HEADER);
    csv.push('\n');
    for row in rows {
        csv.push_str(&row.join(","));
        csv.push('\n');
    }
    csv
}

/// An export with `n` single-item orders, each to a different recipient.
pub fn distinct_orders(n: usize) -> String {
    let mut csv = String::from(HEADER);
    csv.push('\n');
    for i in 0..n {
        csv.push_str(&format!(
            "#{},Customer {},{} Market St,Springfield,{:05},IL,555{:07}.0,1,Walking Tour (English)\n",
            2000 + i,
            i,
            i + 1,
            10000 + i,
            i
        ));
    }
    csv
}

/// Runs `pipeline` over an in-memory CSV export.
pub fn generate_from_csv(pipeline: &LabelPipeline, csv: &str) -> Result<LabelSheet, PipelineError> {
    let mut source = CsvRowSource::from_reader(
        csv.as_bytes(),
        pipeline.config().aggregation.requires_item_name(),
    )?;
    pipeline.generate(&mut source)
}
