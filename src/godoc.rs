//! Section headers that documentation generators pick up as headings.
//!
//! A heading is a single unindented line with unindented paragraphs before
//! and after it, starting with an uppercase letter, ending with a letter or
//! digit, and free of most punctuation. Headers that would not be recognized
//! fall back to the bare command path.

/// Header for the section documenting `path`, e.g. `"Foo bar - does a thing"`.
pub fn godoc_header(path: &str, short: &str) -> String {
    if path.is_empty() {
        return first_rune_to_upper(short);
    }
    if short.is_empty() {
        return first_rune_to_upper(path);
    }
    let header = first_rune_to_upper(&format!("{path} - {short}"));
    if is_heading(&header) {
        header
    } else {
        first_rune_to_upper(path)
    }
}

pub fn first_rune_to_upper(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whether `line` would be extracted as a section heading.
pub fn is_heading(line: &str) -> bool {
    if line.contains('\n') {
        return false;
    }
    let line = line.trim();
    let Some(first) = line.chars().next() else {
        return false;
    };
    if !first.is_alphabetic() || !first.is_uppercase() {
        return false;
    }
    let Some(last) = line.chars().last() else {
        return false;
    };
    if !last.is_alphanumeric() {
        return false;
    }
    // "(),-" and friends are fine.
    const FORBIDDEN: &str = ";:!?+*/=[]{}_^°&§~%#@<\">\\";
    if line.chars().any(|ch| FORBIDDEN.contains(ch)) {
        return false;
    }
    // "'" only as a possessive "'s".
    let mut rest = line;
    while let Some(idx) = rest.find('\'') {
        let after = &rest[idx + 1..];
        if !after.starts_with('s') || !(after.len() == 1 || after[1..].starts_with(' ')) {
            return false;
        }
        rest = &after[1..];
    }
    // "." only when followed by a non-space.
    let mut rest = line;
    while let Some(idx) = rest.find('.') {
        let after = &rest[idx + 1..];
        if after.is_empty() || after.starts_with(' ') {
            return false;
        }
        rest = after;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combines_path_and_short_when_recognized() {
        assert_eq!(godoc_header("foo bar", "does a thing"), "Foo bar - does a thing");
    }

    #[test]
    fn falls_back_to_path_on_forbidden_characters() {
        assert_eq!(godoc_header("foo bar", "does a thing."), "Foo bar");
        assert_eq!(godoc_header("foo bar", "runs: everything"), "Foo bar");
        assert_eq!(godoc_header("foo bar", "the user's files"), "Foo bar - the user's files");
        assert_eq!(godoc_header("foo bar", "don't stop"), "Foo bar");
    }

    #[test]
    fn empty_parts_use_the_other_one() {
        assert_eq!(godoc_header("", "short text"), "Short text");
        assert_eq!(godoc_header("tool sub", ""), "Tool sub");
        assert_eq!(godoc_header("", ""), "");
    }

    #[test]
    fn heading_rules() {
        assert!(is_heading("Tool v1.2 release"));
        assert!(!is_heading("lowercase start"));
        assert!(!is_heading("Ends with a dash -"));
        assert!(!is_heading("Two\nlines"));
        assert!(!is_heading("Uses a_b name"));
    }

    #[test]
    fn uppercases_multibyte_first_rune() {
        assert_eq!(first_rune_to_upper("élan"), "Élan");
    }
}
