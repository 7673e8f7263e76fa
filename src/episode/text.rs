// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use unicode_normalization::UnicodeNormalization;

/// Replace typographic ("smart") quotes with plain ASCII quotes
///
/// Only the right single quotation mark and the left/right double quotation
/// marks are rewritten; everything else is left untouched.
pub fn normalize_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            other => other,
        })
        .collect()
}

/// Apply Unicode NFKC normalization
pub fn nfkc(text: &str) -> String {
    text.nfkc().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_replaces_smart_quotes() {
        assert_eq!(
            normalize_text("It\u{2019}s a \u{201C}test\u{201D}"),
            "It's a \"test\""
        );
    }

    #[test]
    fn leaves_other_quotes_alone() {
        // Left single quotation mark and guillemets are not rewritten
        let text = "\u{2018}quoted\u{2019} \u{00AB}fr\u{00BB}";
        assert_eq!(normalize_text(text), "\u{2018}quoted' \u{00AB}fr\u{00BB}");
    }

    #[test]
    fn normalize_text_is_idempotent() {
        let samples = [
            "",
            "plain ascii",
            "It\u{2019}s \u{201C}fine\u{201D}",
            "\u{201D}\u{201D}\u{2019}\u{2019}",
            "caf\u{00E9} \u{FB01}",
        ];

        for sample in samples {
            let once = normalize_text(sample);
            assert_eq!(normalize_text(&once), once);
        }
    }

    #[test]
    fn nfkc_folds_compatibility_characters() {
        // "fi" ligature and decomposed e + combining acute accent
        assert_eq!(nfkc("\u{FB01}ne caf\u{0065}\u{0301}"), "fine caf\u{00E9}");
        assert_eq!(nfkc("\u{00A0}"), " ");
    }
}
