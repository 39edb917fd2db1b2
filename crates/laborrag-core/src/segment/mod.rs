//! Document segmentation strategies.
//!
//! - `window`: generic sliding window over whitespace-normalized text
//! - `article`: statute-style documents split at `제N조` article markers
//! - `ocr`: noisy OCR output split at bullet glyphs with a running article header
//!
//! The strategy for a document is decided once at ingestion (see
//! [`SegmentStrategy::classify`]) and recorded on its `Document`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::SegmentSettings;
use crate::traits::Segmenter;

mod article;
mod ocr;
mod window;

pub use article::ArticleSegmenter;
pub use ocr::OcrSegmenter;
pub use window::WindowSegmenter;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SegmentStrategy {
    Window,
    Article,
    Ocr,
}

impl SegmentStrategy {
    /// Picks a strategy from hints in a document's file name.
    pub fn classify(source_name: &str) -> Self {
        if source_name.to_uppercase().contains("OCR") || source_name.contains("요약") {
            SegmentStrategy::Ocr
        } else if source_name.contains('법') || source_name.contains("계약서") {
            SegmentStrategy::Article
        } else {
            SegmentStrategy::Window
        }
    }

    pub fn segmenter(self, settings: &SegmentSettings) -> Box<dyn Segmenter> {
        match self {
            SegmentStrategy::Window => Box::new(WindowSegmenter::from_settings(settings)),
            SegmentStrategy::Article => Box::new(ArticleSegmenter::from_settings(settings)),
            SegmentStrategy::Ocr => Box::new(OcrSegmenter::from_settings(settings)),
        }
    }
}

impl fmt::Display for SegmentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SegmentStrategy::Window => "window",
            SegmentStrategy::Article => "article",
            SegmentStrategy::Ocr => "ocr",
        };
        f.write_str(name)
    }
}

/// Header line prefixed to chunks that belong to an article.
pub(crate) fn article_header(article: &str) -> String {
    format!("【{article}】")
}

/// Splits `text` at every byte offset in `cuts` (ascending, deduplicated).
/// The piece before the first cut is included.
pub(crate) fn split_at_offsets<'a>(text: &'a str, cuts: impl IntoIterator<Item = usize>) -> Vec<&'a str> {
    let mut pieces = Vec::new();
    let mut prev = 0;
    for cut in cuts {
        if cut > prev {
            pieces.push(&text[prev..cut]);
            prev = cut;
        }
    }
    pieces.push(&text[prev..]);
    pieces
}
