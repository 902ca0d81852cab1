//! Line grouper: rebuild text lines from positioned words.
//!
//! Words are bucketed by `top` rounded to one decimal, sorted by `x0`
//! within a bucket, and buckets are returned top of page first.

use std::collections::BTreeMap;

use stmtx_core::PositionedWord;

/// Words sharing one rounded vertical coordinate, left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub top: f64,
    pub words: Vec<PositionedWord>,
    pub text: String,
}

fn line_key(top: f64) -> i64 {
    (top * 10.0).round() as i64
}

pub fn group_lines(words: &[PositionedWord]) -> Vec<TextLine> {
    let mut buckets: BTreeMap<i64, Vec<&PositionedWord>> = BTreeMap::new();
    for w in words.iter().filter(|w| !w.text.trim().is_empty()) {
        buckets.entry(line_key(w.top)).or_default().push(w);
    }

    buckets
        .into_iter()
        .map(|(key, mut row)| {
            row.sort_by(|a, b| a.x0.total_cmp(&b.x0));
            let text = row
                .iter()
                .map(|w| w.text.trim())
                .collect::<Vec<_>>()
                .join(" ");
            TextLine {
                top: key as f64 / 10.0,
                words: row.into_iter().cloned().collect(),
                text,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(text: &str, x0: f64, top: f64) -> PositionedWord {
        PositionedWord::new(text, x0, x0 + 10.0, top)
    }

    #[test]
    fn test_groups_and_orders() {
        let words = vec![
            w("world", 60.0, 100.02),
            w("second", 10.0, 120.0),
            w("hello", 10.0, 99.98),
            w("line", 50.0, 120.0),
        ];
        let lines = group_lines(&words);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "hello world");
        assert_eq!(lines[0].top, 100.0);
        assert_eq!(lines[1].text, "second line");
    }

    #[test]
    fn test_jitter_beyond_rounding_splits_lines() {
        let words = vec![w("a", 10.0, 100.0), w("b", 20.0, 100.3)];
        assert_eq!(group_lines(&words).len(), 2);
    }

    #[test]
    fn test_blank_words_ignored() {
        let words = vec![w("a", 10.0, 5.0), w("  ", 15.0, 5.0), w("b", 20.0, 5.0)];
        let lines = group_lines(&words);
        assert_eq!(lines[0].text, "a b");
        assert_eq!(lines[0].words.len(), 2);
    }

    #[test]
    fn test_idempotent() {
        let words = vec![
            w("03/10", 10.0, 50.0),
            w("COFFEE", 40.0, 50.0),
            w("-4.50", 200.0, 50.0),
            w("SEATTLE", 40.0, 62.0),
        ];
        let first = group_lines(&words);
        let second = group_lines(&words);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_lines(&[]).is_empty());
    }
}
