//! Fit a line of text into a fixed number of terminal columns.
//!
//! Contract:
//! - Tabs expand to the next multiple of `tab_width` measured from the start
//!   of the field.
//! - C0 controls and DEL become U+FFFD so file content can never inject
//!   escape sequences into the frame.
//! - Truncation never splits a grapheme cluster; a wide cluster that would
//!   straddle the limit is dropped and the gap is left to the caller's
//!   padding.

use unicode_segmentation::UnicodeSegmentation;

use crate::egc_width;

const REPLACEMENT: char = '\u{FFFD}';

/// Text trimmed to a column budget together with its display width.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fitted {
    pub text: String,
    pub width: usize,
}

impl Fitted {
    /// Append spaces until the text occupies exactly `target` columns.
    pub fn padded(mut self, target: usize) -> String {
        let fill = target.saturating_sub(self.width);
        self.text.extend(std::iter::repeat_n(' ', fill));
        self.text
    }
}

/// Fit `input` into at most `max` display columns.
pub fn fit_to_width(input: &str, max: usize, tab_width: usize) -> Fitted {
    let tab_width = tab_width.max(1);
    let mut out = Fitted {
        text: String::with_capacity(input.len().min(max.saturating_mul(4))),
        width: 0,
    };
    for g in input.graphemes(true) {
        if g == "\t" {
            let advance = tab_width - (out.width % tab_width);
            let take = advance.min(max - out.width);
            out.text.extend(std::iter::repeat_n(' ', take));
            out.width += take;
            if out.width >= max {
                break;
            }
            continue;
        }
        let is_control = g.chars().any(|c| c.is_control());
        let w = if is_control { 1 } else { egc_width(g) as usize };
        if out.width + w > max {
            break;
        }
        if is_control {
            out.text.push(REPLACEMENT);
        } else {
            out.text.push_str(g);
        }
        out.width += w;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display_width(input: &str, tab_width: usize) -> usize {
        fit_to_width(input, usize::MAX / 2, tab_width).width
    }

    #[test]
    fn truncates_ascii_at_limit() {
        let f = fit_to_width("abcdefgh", 5, 4);
        assert_eq!(f.text, "abcde");
        assert_eq!(f.width, 5);
    }

    #[test]
    fn pads_short_text() {
        assert_eq!(fit_to_width("ab", 5, 4).padded(5), "ab   ");
        assert_eq!(fit_to_width("", 3, 4).padded(3), "   ");
    }

    #[test]
    fn wide_cluster_never_straddles_limit() {
        let f = fit_to_width("a漢字", 4, 4);
        assert_eq!(f.text, "a漢");
        assert_eq!(f.width, 3);
        assert_eq!(f.padded(4), "a漢 ");
    }

    #[test]
    fn tabs_expand_to_stops() {
        let f = fit_to_width("a\tb", 10, 4);
        assert_eq!(f.text, "a   b");
        assert_eq!(f.width, 5);
        // Tab clipped by the limit.
        assert_eq!(fit_to_width("ab\tc", 3, 4).text, "ab ");
    }

    #[test]
    fn control_bytes_are_neutralised() {
        let f = fit_to_width("x\x1b[31my", 20, 4);
        assert!(!f.text.contains('\x1b'));
        assert!(f.text.starts_with("x\u{FFFD}"));
        assert_eq!(f.width, display_width("x\x1b[31my", 4));
    }

    #[test]
    fn zero_budget_yields_empty() {
        assert_eq!(fit_to_width("abc", 0, 4), Fitted::default());
    }
}
