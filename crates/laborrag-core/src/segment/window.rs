use crate::config::SegmentSettings;
use crate::traits::Segmenter;
use crate::types::Segment;

/// Sliding-window segmenter for documents without recognizable structure.
///
/// Works on whitespace-collapsed text and counts characters, not bytes. A
/// window is cut back to the last sentence terminator when that terminator lies
/// past `cut_ratio * window_size`; consecutive chunks share `overlap` characters.
#[derive(Debug, Clone)]
pub struct WindowSegmenter {
    pub window_size: usize,
    pub overlap: usize,
    pub cut_ratio: f32,
}

impl Default for WindowSegmenter {
    fn default() -> Self {
        Self::from_settings(&SegmentSettings::default())
    }
}

impl WindowSegmenter {
    pub fn from_settings(settings: &SegmentSettings) -> Self {
        Self {
            window_size: settings.window_size,
            overlap: settings.overlap,
            cut_ratio: settings.sentence_cut_ratio,
        }
    }
}

impl Segmenter for WindowSegmenter {
    fn name(&self) -> &str {
        "window"
    }

    fn segment(&self, text: &str) -> Vec<Segment> {
        let cleaned = normalize_whitespace(text);
        let chars: Vec<char> = cleaned.chars().collect();
        let window = self.window_size.max(1);
        let min_cut = window as f32 * self.cut_ratio;

        let mut segments = Vec::new();
        let mut start = 0usize;
        while start < chars.len() {
            let window_end = (start + window).min(chars.len());
            let mut end = window_end;
            if let Some(last) = chars[start..window_end].iter().rposition(|c| is_sentence_end(*c)) {
                if last as f32 > min_cut {
                    end = start + last + 1;
                }
            }

            segments.push(Segment {
                chunk_id: segments.len(),
                text: chars[start..end].iter().collect(),
                article: None,
            });

            if end >= chars.len() {
                break;
            }
            // always advance, even when a sentence cut lands inside the overlap
            start = end.saturating_sub(self.overlap).max(start + 1);
        }
        segments
    }
}

/// Collapses every whitespace run to a single space and trims the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_sentence_end(c: char) -> bool {
    matches!(c, '.' | '?' | '!' | '。')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(window_size: usize, overlap: usize) -> WindowSegmenter {
        WindowSegmenter { window_size, overlap, cut_ratio: 0.4 }
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        assert_eq!(normalize_whitespace("  a \n\n b\t\tc  "), "a b c");
    }

    #[test]
    fn test_overlap_without_terminators() {
        let chunks = seg(10, 4).segment("0123456789abcdefghij");
        let texts: Vec<_> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["0123456789", "6789abcdef", "cdefghij"]);
    }

    #[test]
    fn test_cut_at_sentence_end() {
        // terminator at index 6 of a 10-char window (> 4.0) -> cut after it
        let chunks = seg(10, 2).segment("abcdef. ghijklmnop");
        assert_eq!(chunks[0].text, "abcdef.");
        assert!(chunks[1].text.starts_with("f."));
    }

    #[test]
    fn test_early_terminator_is_ignored() {
        // terminator at index 1 is not past 40% of the window
        let chunks = seg(10, 0).segment("a.cdefghijklmn");
        assert_eq!(chunks[0].text, "a.cdefghij");
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let text = "가나다라마바사아자차카타파하";
        let chunks = seg(5, 1).segment(text);
        assert_eq!(chunks[0].text.chars().count(), 5);
        assert_eq!(chunks[0].text, "가나다라마");
        assert_eq!(chunks[1].text, "마바사아자");
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(seg(10, 2).segment("").is_empty());
        assert!(seg(10, 2).segment(" \n\t ").is_empty());
    }

    #[test]
    fn test_no_trailing_duplicate_chunk() {
        let chunks = seg(10, 3).segment("0123456789");
        assert_eq!(chunks.len(), 1);
    }
}
