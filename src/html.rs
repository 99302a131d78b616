//! Markup helper for timedtext cues.

/// Remove inline markup tags, keeping their text content
pub fn strip_tags(input: &str) -> String {
    regex!(r"<[^>]*>").replace_all(input, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<i>hello</i> <b>world</b>"), "hello world");
        assert_eq!(strip_tags("plain"), "plain");
    }
}
