use lazy_regex::{regex_find, regex_replace_all};

/// Cleans leading, trailing, and redundant whitespace from a string, in-place.
///
/// Any run of whitespace, including a single tab or newline, becomes a single space.
pub fn clean_text(s: &mut String) {
    let trimmed = s.trim();
    // Skip the copy/realloc if nothing to do.
    if trimmed.len() != s.len() || regex_find!(r"\s{2,}|[^\S ]", trimmed).is_some() {
        let new = regex_replace_all!(r"\s+", trimmed, " ");
        *s = new.to_string();
    }
}

/// Cleans the text of a cell, returning `None` when nothing is left.
pub fn clean_cell<S: AsRef<str>>(text: S) -> Option<String> {
    let mut s = text.as_ref().to_string();
    clean_text(&mut s);
    if s.is_empty() { None } else { Some(s) }
}

/// Splits `s` on whitespace into exactly `N` tokens.
///
/// Returns `None` if there are more or fewer than `N` tokens.
pub fn split_tokens<const N: usize>(s: &str) -> Option<[&str; N]> {
    let mut tokens = [""; N];
    let mut iter = s.split_whitespace();
    for token in tokens.iter_mut() {
        *token = iter.next()?;
    }
    match iter.next() {
        Some(_) => None,
        None => Some(tokens),
    }
}

/// Splits `s` at its last whitespace into everything before it and the final token.
pub fn split_last_token(s: &str) -> Option<(&str, &str)> {
    let (head, last) = s.trim().rsplit_once(char::is_whitespace)?;
    let head = head.trim_end();
    if head.is_empty() || last.is_empty() {
        None
    } else {
        Some((head, last))
    }
}

/// Parses a decimal number.
pub fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use test_casing::{TestCases, cases, test_casing};

    use super::*;

    const CLEAN_TEXT_CASES: TestCases<(&'static str, &'static str)> = cases! {
        [
            ("", ""),
            ("foo", "foo"),
            ("  foo ", "foo"),
            ("foo  bar", "foo bar"),
            ("foo\tbar", "foo bar"),
            ("\n25.5 USD\r\n0.0   USD ", "25.5 USD 0.0 USD"),
        ]
    };

    #[test]
    fn test_clean_text_cases_len() {
        assert_eq!(6, CLEAN_TEXT_CASES.into_iter().count());
    }

    #[test_casing(6, CLEAN_TEXT_CASES)]
    #[gtest]
    fn test_clean_text(input: &'static str, expected: &'static str) {
        let mut s = input.to_string();
        clean_text(&mut s);
        expect_eq!(s, expected);
    }

    #[gtest]
    fn test_clean_cell_empty_is_none() {
        expect_eq!(clean_cell(""), None);
        expect_eq!(clean_cell(" \t "), None);
        expect_eq!(clean_cell(" Sale  10.0"), Some("Sale 10.0".to_string()));
    }

    #[gtest]
    fn test_split_tokens() {
        expect_eq!(split_tokens::<2>("Sale 10.0"), Some(["Sale", "10.0"]));
        expect_eq!(
            split_tokens::<4>("25.5 USD 0.0 USD"),
            Some(["25.5", "USD", "0.0", "USD"])
        );
        expect_eq!(split_tokens::<2>("Sale"), None);
        expect_eq!(split_tokens::<2>("Sale 10.0 extra"), None);
        expect_eq!(split_tokens::<2>(""), None);
    }

    #[gtest]
    fn test_split_last_token() {
        expect_eq!(split_last_token("12.0 USD"), Some(("12.0", "USD")));
        expect_eq!(split_last_token("1 234.50 CHF"), Some(("1 234.50", "CHF")));
        expect_eq!(split_last_token("USD"), None);
        expect_eq!(split_last_token(""), None);
    }

    #[gtest]
    fn test_parse_number() {
        expect_eq!(parse_number("10.0"), Some(10.0));
        expect_eq!(parse_number("-3"), Some(-3.0));
        expect_eq!(parse_number("1e3"), Some(1000.0));
        expect_eq!(parse_number("ten"), None);
        expect_eq!(parse_number("1000.0 CHF"), None);
    }
}
