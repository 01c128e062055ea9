//! Binding-expression scanner.
//!
//! A logos lexer picks `[[path]]` and `{{path}}` occurrences out of free-form
//! attribute/text content in a single pass. Path segments follow the
//! identifier grammar `[A-Za-z0-9_]+`, joined by `.`. Pure functions, no
//! shared state.

use logos::Logos;
use std::ops::Range;

#[derive(Logos, Debug, Clone, PartialEq)]
enum ExprToken<'src> {
    #[regex(r"\[\[[A-Za-z0-9_]+(\.[A-Za-z0-9_]+)*\]\]", |lex| lex.slice())]
    OneWay(&'src str),

    #[regex(r"\{\{[A-Za-z0-9_]+(\.[A-Za-z0-9_]+)*\}\}", |lex| lex.slice())]
    TwoWay(&'src str),
}

/// Every one-way binding path in `text`, with the byte range of the full
/// `[[...]]` occurrence. Literal text between occurrences is ignored.
pub fn one_way_paths(text: &str) -> Vec<(String, Range<usize>)> {
    ExprToken::lexer(text)
        .spanned()
        .filter_map(|(token, span)| match token {
            Ok(ExprToken::OneWay(slice)) => {
                Some((slice[2..slice.len() - 2].to_string(), span))
            }
            _ => None,
        })
        .collect()
}

/// `Some(path)` iff the *entire* string is a two-way expression `{{path}}`.
/// Surrounding text disqualifies it; two-way bindings own the whole
/// attribute value.
pub fn two_way_path(text: &str) -> Option<String> {
    let mut lexer = ExprToken::lexer(text).spanned();
    match lexer.next() {
        Some((Ok(ExprToken::TwoWay(slice)), span)) if span == (0..text.len()) => {
            Some(slice[2..slice.len() - 2].to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_way_single() {
        let found = one_way_paths("[[Name]]");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, "Name");
        assert_eq!(found[0].1, 0..8);
    }

    #[test]
    fn test_one_way_mixed_with_text() {
        let found = one_way_paths("Hello [[First]] [[Last]]!");
        let paths: Vec<&str> = found.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(paths, vec!["First", "Last"]);
    }

    #[test]
    fn test_one_way_dotted_path() {
        let found = one_way_paths("[[user.Address.City]]");
        assert_eq!(found[0].0, "user.Address.City");
    }

    #[test]
    fn test_one_way_rejects_malformed() {
        assert!(one_way_paths("[[]]").is_empty());
        assert!(one_way_paths("[[a..b]]").is_empty());
        assert!(one_way_paths("[[.a]]").is_empty());
        assert!(one_way_paths("[ [a] ]").is_empty());
    }

    #[test]
    fn test_two_way_exact_match_only() {
        assert_eq!(two_way_path("{{Age}}"), Some("Age".to_string()));
        assert_eq!(
            two_way_path("{{inputObject.Age}}"),
            Some("inputObject.Age".to_string())
        );
        assert_eq!(two_way_path("x{{Age}}"), None);
        assert_eq!(two_way_path("{{Age}} "), None);
        assert_eq!(two_way_path("{{}}"), None);
        assert_eq!(two_way_path("[[Age]]"), None);
    }

    #[test]
    fn test_two_way_not_confused_by_one_way_scan() {
        // {{...}} inside literal text is not a one-way binding.
        assert!(one_way_paths("{{Age}}").is_empty());
    }
}
