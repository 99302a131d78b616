//! Title to filename-fragment sanitization

/// Maximum length of a sanitized title, in characters
pub const MAX_TITLE_LEN: usize = 100;

/// Turn a raw page title into a string that is safe to use inside a file name.
///
/// Steps, in order:
/// 1. `\ / * ? : " < > |` become `_`
/// 2. emoji and pictographs are removed, including modifiers, flags,
///    keycaps and joined sequences
/// 3. whitespace runs collapse to one space, ends are trimmed
/// 4. the result is cut to [`MAX_TITLE_LEN`] characters; underscores or
///    spaces left dangling by the cut are dropped
///
/// The function is idempotent.
pub fn sanitize(raw: &str) -> String {
    let title = regex!(r#"[\\/*?:"<>|]"#).replace_all(raw, "_");

    let title = regex!(
        r"[0-9#*]\x{FE0F}?\x{20E3}|[\x{1F1E6}-\x{1F1FF}]|\p{Extended_Pictographic}(?:[\x{FE0F}\x{1F3FB}-\x{1F3FF}\x{E0020}-\x{E007F}]|\x{200D}\p{Extended_Pictographic})*|[\x{FE0F}\x{20E3}\x{1F3FB}-\x{1F3FF}]"
    )
    .replace_all(&title, "");

    let title = regex!(r"\s+").replace_all(&title, " ");
    let title = title.trim();

    if title.chars().count() <= MAX_TITLE_LEN {
        return title.to_string();
    }

    let truncated: String = title.chars().take(MAX_TITLE_LEN).collect();
    truncated
        .trim_end_matches(|c: char| c == '_' || c.is_whitespace())
        .to_string()
}
