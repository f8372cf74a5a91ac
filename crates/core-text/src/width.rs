//! Grapheme cluster display width.
//!
//! All column arithmetic in the renderer flows through `egc_width`. The base
//! value comes from `unicode_width`; clusters carrying an Extended
//! Pictographic or Regional Indicator code point are widened to 2 because the
//! baseline crate under-measures several emoji compositions (ZWJ sequences,
//! flags, keycaps). Over-estimating costs one blank cell; under-estimating
//! shifts the divider.

use unicode_width::UnicodeWidthStr;

fn is_regional_indicator(c: char) -> bool {
    ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)
}

// Rough Extended Pictographic heuristic (emoji blocks + misc symbols/dingbats).
fn is_extended_pictographic(c: char) -> bool {
    ('\u{1F300}'..='\u{1FAFF}').contains(&c) || ('\u{2600}'..='\u{27BF}').contains(&c)
}

/// Display width of a single grapheme cluster.
///
/// Precondition: `egc` is one cluster as produced by
/// `unicode_segmentation::UnicodeSegmentation::graphemes`.
#[inline]
pub fn egc_width(egc: &str) -> u16 {
    if egc.is_empty() {
        return 0;
    }
    if egc.is_ascii() {
        return egc.len().min(1) as u16;
    }
    let base = UnicodeWidthStr::width(egc).min(2) as u16;
    if base < 2
        && egc
            .chars()
            .any(|c| is_extended_pictographic(c) || is_regional_indicator(c))
    {
        return 2;
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_is_single_column() {
        assert_eq!(egc_width("a"), 1);
        assert_eq!(egc_width(""), 0);
    }

    #[test]
    fn cjk_and_emoji_are_wide() {
        assert_eq!(egc_width("漢"), 2);
        assert_eq!(egc_width("😀"), 2);
        assert_eq!(egc_width("🇫🇷"), 2);
        assert_eq!(egc_width("👨‍👩‍👧"), 2);
    }

    #[test]
    fn combining_cluster_keeps_base_width() {
        assert_eq!(egc_width("e\u{0301}"), 1);
    }
}
