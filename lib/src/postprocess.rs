/// Collapse every run of consecutive newlines into a single newline
///
/// Removes the blank rows the pipeline puts between line blocks. Applied at
/// display, copy and save time only; cached art is never post-processed.
pub fn strip_blank_separators(art: &str) -> String {
    let mut out = String::with_capacity(art.len());
    let mut prev_newline = false;

    for ch in art.chars() {
        if ch == '\n' {
            if prev_newline {
                continue;
            }
            prev_newline = true;
        } else {
            prev_newline = false;
        }
        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_double_newline() {
        assert_eq!(strip_blank_separators("a\n\nb"), "a\nb");
    }

    #[test]
    fn test_strip_long_run() {
        assert_eq!(strip_blank_separators("a\n\n\n\nb"), "a\nb");
    }

    #[test]
    fn test_single_newlines_untouched() {
        assert_eq!(strip_blank_separators("a\nb\nc"), "a\nb\nc");
        assert_eq!(strip_blank_separators(""), "");
    }

    #[test]
    fn test_whitespace_rows_kept() {
        // A row of spaces is part of the glyph, not a separator
        assert_eq!(strip_blank_separators("a\n  \nb"), "a\n  \nb");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "",
            "\n",
            "\n\n\n",
            "x\n\ny",
            "x\n\n\ny\n\n",
            " _ \n| |\n\n\n\n|_|",
        ];
        for sample in samples {
            let once = strip_blank_separators(sample);
            assert_eq!(strip_blank_separators(&once), once, "sample {sample:?}");
        }
    }
}
