use regex::Regex;
use std::sync::LazyLock;

static ARTICLE_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"제\d+조(?:의\d+)?").expect("valid article reference regex"));

/// Article references mentioned in `query`, in order of first appearance,
/// without duplicates.
pub fn article_refs(query: &str) -> Vec<String> {
    let mut refs: Vec<String> = Vec::new();
    for m in ARTICLE_REF.find_iter(query) {
        if !refs.iter().any(|r| r == m.as_str()) {
            refs.push(m.as_str().to_string());
        }
    }
    refs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_plain_and_branch_articles() {
        assert_eq!(article_refs("제50조가 뭐야?"), vec!["제50조"]);
        assert_eq!(article_refs("제76조의2와 제76조의3, 다시 제76조의2"), vec!["제76조의2", "제76조의3"]);
        assert!(article_refs("연차휴가는 며칠인가요?").is_empty());
    }
}
