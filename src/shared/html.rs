/// Convert literal CRLF sequences in stored message bodies to `<br>` for
/// browser rendering. Presentation only; the stored value is untouched.
pub fn replace_newlines(input: &str) -> String {
    input.replace("\r\n", "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_crlf_with_br() {
        assert_eq!(replace_newlines("line one\r\nline two"), "line one<br>line two");
        assert_eq!(
            replace_newlines("a\r\nb\r\nc"),
            "a<br>b<br>c"
        );
    }

    #[test]
    fn leaves_bare_lf_alone() {
        assert_eq!(replace_newlines("line one\nline two"), "line one\nline two");
    }

    #[test]
    fn passes_through_plain_text() {
        assert_eq!(replace_newlines("no newlines here"), "no newlines here");
    }
}
