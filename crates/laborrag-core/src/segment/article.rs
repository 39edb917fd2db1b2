use regex::Regex;
use std::sync::LazyLock;

use super::{article_header, split_at_offsets};
use crate::config::SegmentSettings;
use crate::traits::Segmenter;
use crate::types::Segment;

/// An article marker that opens a line, or a titled marker that opens a
/// sentence. Group 1 or 2 is the marker itself.
static ARTICLE_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(제\d+조(?:의\d+)?)|[.。][ \t]+(제\d+조(?:의\d+)?)\(")
        .expect("valid article boundary regex")
});

/// `제50조(근로시간)` or bare `제50조` at the start of an article segment.
static ARTICLE_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(제\d+조(?:의\d+)?)(?:\(([^)\n]{1,100})\))?").expect("valid article head regex")
});

/// Circled-numeral sub-paragraph markers ① through ⑳.
fn is_paragraph_marker(c: char) -> bool {
    ('\u{2460}'..='\u{2473}').contains(&c)
}

/// Segmenter for statutes and contracts organised as `제N조(title)` articles.
#[derive(Debug, Clone)]
pub struct ArticleSegmenter {
    /// Articles longer than this are split into sub-paragraphs.
    pub max_chars: usize,
    /// Sub-paragraph fragments shorter than this are dropped.
    pub min_fragment_chars: usize,
}

impl Default for ArticleSegmenter {
    fn default() -> Self {
        Self::from_settings(&SegmentSettings::default())
    }
}

impl ArticleSegmenter {
    pub fn from_settings(settings: &SegmentSettings) -> Self {
        Self { max_chars: settings.article_max_chars, min_fragment_chars: settings.min_fragment_chars }
    }

    fn push(segments: &mut Vec<Segment>, header: Option<&str>, body: &str, article: &Option<String>) {
        let text = match header {
            Some(h) => format!("{h}\n{body}"),
            None => body.to_string(),
        };
        segments.push(Segment { chunk_id: segments.len(), text, article: article.clone() });
    }
}

impl Segmenter for ArticleSegmenter {
    fn name(&self) -> &str {
        "article"
    }

    fn segment(&self, text: &str) -> Vec<Segment> {
        let cuts = ARTICLE_BOUNDARY
            .captures_iter(text)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|m| m.start());
        let mut segments = Vec::new();

        for piece in split_at_offsets(text, cuts) {
            let body = piece.trim();
            if body.is_empty() {
                continue;
            }

            let article = ARTICLE_HEAD.captures(body).map(|caps| match caps.get(2) {
                Some(title) => format!("{}({})", &caps[1], title.as_str()),
                None => caps[1].to_string(),
            });
            let header = article.as_deref().map(article_header);

            if body.chars().count() <= self.max_chars {
                Self::push(&mut segments, header.as_deref(), body, &article);
                continue;
            }

            let cuts = body.char_indices().filter(|(_, c)| is_paragraph_marker(*c)).map(|(i, _)| i);
            for fragment in split_at_offsets(body, cuts) {
                let fragment = fragment.trim();
                if fragment.chars().count() < self.min_fragment_chars {
                    continue;
                }
                Self::push(&mut segments, header.as_deref(), fragment, &article);
            }
        }
        segments
    }
}
