use super::*;
use crate::text::layout::CellMetrics;

/// One pixel per character at size 1.
fn mono() -> CellMetrics {
    CellMetrics { advance_em: 1.0 }
}

fn tokens(s: &str) -> Vec<&str> {
    s.split_whitespace().collect()
}

#[test]
fn empty_and_blank_input_yield_no_lines() {
    assert!(wrap_text_to_width("", &mut mono(), 1.0, 10.0).is_empty());
    assert!(wrap_text_to_width(" \t\n ", &mut mono(), 1.0, 10.0).is_empty());
}

#[test]
fn wraps_greedily_at_width() {
    let lines = wrap_text_to_width("aa bb cc dd", &mut mono(), 1.0, 5.0);
    assert_eq!(lines, vec!["aa bb", "cc dd"]);

    let lines = wrap_text_to_width("aa bb cc dd", &mut mono(), 1.0, 8.0);
    assert_eq!(lines, vec!["aa bb cc", "dd"]);
}

#[test]
fn width_is_inclusive() {
    let lines = wrap_text_to_width("abc def", &mut mono(), 1.0, 7.0);
    assert_eq!(lines, vec!["abc def"]);
    let lines = wrap_text_to_width("abc def", &mut mono(), 1.0, 6.9);
    assert_eq!(lines, vec!["abc", "def"]);
}

#[test]
fn oversized_words_get_their_own_line() {
    let lines = wrap_text_to_width("a supercalifragilistic b", &mut mono(), 1.0, 4.0);
    assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
}

#[test]
fn whitespace_runs_collapse_to_single_spaces() {
    let lines = wrap_text_to_width("  one\t two \n three  ", &mut mono(), 1.0, 100.0);
    assert_eq!(lines, vec!["one two three"]);
}

#[test]
fn size_scales_measurement() {
    let text = "ab cd ef";
    assert_eq!(wrap_text_to_width(text, &mut mono(), 1.0, 8.0).len(), 1);
    assert_eq!(wrap_text_to_width(text, &mut mono(), 2.0, 8.0).len(), 3);
}

#[test]
fn tokens_round_trip_and_no_line_is_empty() {
    let samples = [
        "Sukhbinder Singh",
        "The quick brown fox jumps over the lazy dog",
        "x",
        "a bb ccc dddd eeeee ffffff ggggggg",
        "  leading and trailing  ",
        "unicode wörds ünd ñ characters",
    ];
    for text in samples {
        for width in [0.0, 1.0, 3.0, 7.0, 12.0, 40.0, 1000.0] {
            let lines = wrap_text_to_width(text, &mut mono(), 1.0, width);
            assert!(lines.iter().all(|l| !l.trim().is_empty()), "{text} @ {width}");
            let rejoined = lines.join(" ");
            assert_eq!(tokens(&rejoined), tokens(text), "{text} @ {width}");
        }
    }
}

#[test]
fn multi_word_lines_respect_the_budget() {
    let text = "a bb ccc dddd eeeee ffffff ggggggg";
    let mut m = mono();
    for width in [5.0, 9.0, 13.0] {
        for line in wrap_text_to_width(text, &mut m, 1.0, width) {
            if line.contains(' ') {
                assert!(m.text_width(&line, 1.0) <= width, "{line} > {width}");
            }
        }
    }
}

#[test]
fn max_line_width_picks_the_widest() {
    let lines = vec!["ab".to_owned(), "abcde".to_owned(), "abc".to_owned()];
    assert_eq!(max_line_width(&lines, &mut mono(), 2.0), 10.0);
    assert_eq!(max_line_width(&[], &mut mono(), 2.0), 0.0);
}
