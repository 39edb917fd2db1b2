use regex::Regex;
use std::sync::LazyLock;

use super::{article_header, split_at_offsets};
use crate::config::SegmentSettings;
use crate::traits::Segmenter;
use crate::types::Segment;

/// Section starts in OCR output: bullet glyphs anywhere, `o`/`O`/`Q` used as
/// bullets at the start of a line, and article markers opening a line.
static SECTION_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)[•■○●◦▪□◆◇※]|^[ \t]*[oOQ][ \t]|^[ \t]*제\d+조").expect("valid OCR section regex")
});

/// Article marker opening a section, optionally behind one bullet.
static ARTICLE_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[•■○●◦▪□◆◇※]|[oOQ][ \t])?\s*(제\d+조(?:의\d+)?)").expect("valid OCR article regex")
});

/// Segmenter for low-quality OCR text.
///
/// Sections are accumulated under the most recent article header until a new
/// article starts or the block grows past `max_chars`.
#[derive(Debug, Clone)]
pub struct OcrSegmenter {
    pub max_chars: usize,
    /// Blocks whose trimmed length is at most this are dropped.
    pub min_block_chars: usize,
    /// Size of the single fallback chunk when nothing else survives.
    pub fallback_chars: usize,
}

impl Default for OcrSegmenter {
    fn default() -> Self {
        Self::from_settings(&SegmentSettings::default())
    }
}

impl OcrSegmenter {
    pub fn from_settings(settings: &SegmentSettings) -> Self {
        Self {
            max_chars: settings.ocr_max_chars,
            min_block_chars: settings.ocr_min_block_chars,
            fallback_chars: settings.ocr_fallback_chars,
        }
    }
}

struct Block {
    header: String,
    article: Option<String>,
    lines: Vec<String>,
}

impl Block {
    fn content_chars(&self) -> usize {
        let text_len: usize = self.lines.iter().map(|l| l.chars().count()).sum();
        text_len + self.lines.len().saturating_sub(1)
    }

    fn flush(&mut self, min_chars: usize, out: &mut Vec<Segment>) {
        if self.lines.is_empty() {
            return;
        }
        let body = self.lines.join("\n");
        let text = if self.header.is_empty() { body } else { format!("{}\n{}", self.header, body) };
        let text = text.trim();
        if text.chars().count() > min_chars {
            out.push(Segment { chunk_id: out.len(), text: text.to_string(), article: self.article.clone() });
        }
        self.lines.clear();
    }
}

impl Segmenter for OcrSegmenter {
    fn name(&self) -> &str {
        "ocr"
    }

    fn segment(&self, text: &str) -> Vec<Segment> {
        let cuts = SECTION_START.find_iter(text).map(|m| m.start());
        let mut segments = Vec::new();
        let mut block = Block { header: String::new(), article: None, lines: Vec::new() };

        for section in split_at_offsets(text, cuts) {
            let section = section.trim();
            if section.is_empty() {
                continue;
            }

            if let Some(m) = ARTICLE_START.captures(section).and_then(|caps| caps.get(1)) {
                block.flush(self.min_block_chars, &mut segments);
                block.header = article_header(m.as_str());
                block.article = Some(m.as_str().to_string());
                block.lines.push(section.to_string());
            } else if block.content_chars() > self.max_chars {
                block.flush(self.min_block_chars, &mut segments);
                block.lines.push(section.to_string());
            } else {
                block.lines.push(section.to_string());
            }
        }
        block.flush(self.min_block_chars, &mut segments);

        let trimmed = text.trim();
        if segments.is_empty() && !trimmed.is_empty() {
            segments.push(Segment {
                chunk_id: 0,
                text: trimmed.chars().take(self.fallback_chars).collect(),
                article: None,
            });
        }
        segments
    }
}
