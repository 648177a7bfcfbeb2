use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;
use rayon::prelude::*;
use regex::Regex;

use crate::candidate::Candidate;
use crate::models::{Suggestion, SuggestionKind};
use crate::sig::parse_type;
use crate::snippet::{generate_snippet, SnippetMode};

/// Name filter applied to candidates before they are upgraded.
pub enum Matcher {
    Literal(String),
    MultiTerm(Vec<String>),
    Regex(Regex),
}

impl Matcher {
    pub fn build(pattern: &str, is_regex: bool) -> Result<Self, String> {
        if is_regex {
            Regex::new(pattern)
                .map(Matcher::Regex)
                .map_err(|e| format!("Invalid regex: {}", e))
        } else if pattern.contains('|') {
            let terms: Vec<String> = pattern
                .split('|')
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_owned())
                .collect();
            if terms.is_empty() {
                Err("Empty filter pattern".into())
            } else {
                Ok(Matcher::MultiTerm(terms))
            }
        } else {
            Ok(Matcher::Literal(pattern.to_owned()))
        }
    }

    #[inline]
    pub fn is_match(&self, name: &str) -> bool {
        match self {
            Matcher::Literal(pat) => contains_ci(name, pat),
            Matcher::MultiTerm(terms) => terms.iter().any(|t| contains_ci(name, t)),
            Matcher::Regex(re) => re.is_match(name),
        }
    }
}

#[inline]
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_ascii_lowercase().contains(&needle.to_ascii_lowercase())
}

#[inline]
fn starts_with_ci(name: &str, prefix: &str) -> bool {
    name.len() >= prefix.len()
        && name.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

pub struct UpgradeOptions<'a> {
    pub mode: SnippetMode,
    pub prefix: &'a str,
    pub filter: Option<&'a Matcher>,
}

/// Turn one candidate into a suggestion for the completion list.
pub fn upgrade(candidate: &Candidate, mode: SnippetMode, prefix: &str) -> Suggestion {
    let kind = SuggestionKind::from_class(&candidate.class);
    let mut suggestion = Suggestion {
        text: candidate.name.clone(),
        snippet: None,
        display_text: candidate.name.clone(),
        kind,
        left_label: candidate.type_text.clone(),
        right_label: candidate.class.clone(),
        replacement_prefix: prefix.to_owned(),
        package: candidate.package.clone(),
    };

    match kind {
        SuggestionKind::Function => match parse_type(&candidate.type_text) {
            Ok(func) => {
                let snippet = generate_snippet(&candidate.name, &func, mode);
                suggestion.display_text = snippet.display_text;
                suggestion.snippet = Some(snippet.template);
                suggestion.left_label = func.return_label();
            }
            Err(e) => debug!("{}: {}, offering plain text", candidate.name, e),
        },
        SuggestionKind::Import => suggestion.left_label.clear(),
        _ => {}
    }

    suggestion
}

/// Upgrade every candidate that passes the prefix and name filters, in
/// input order. Stops early once `cancelled` is set.
pub fn upgrade_all(
    candidates: &[Candidate],
    opts: &UpgradeOptions<'_>,
    cancelled: &AtomicBool,
) -> Vec<Suggestion> {
    candidates
        .par_iter()
        .filter_map(|candidate| {
            if cancelled.load(Ordering::Relaxed) {
                return None;
            }
            if !starts_with_ci(&candidate.name, opts.prefix) {
                return None;
            }
            if let Some(filter) = opts.filter {
                if !filter.is_match(&candidate.name) {
                    return None;
                }
            }
            Some(upgrade(candidate, opts.mode, opts.prefix))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn print_candidate() -> Candidate {
        Candidate::new("func", "Print", "func(a ...interface{}) (n int, err error)")
    }

    #[test]
    fn function_name_and_type() {
        let s = upgrade(&print_candidate(), SnippetMode::NameAndType, "P");
        assert_eq!(s.display_text, "Print(a ...interface{})");
        assert_eq!(s.snippet.as_deref(), Some("Print()$0"));
        assert_eq!(s.replacement_prefix, "P");
        assert_eq!(s.kind, SuggestionKind::Function);
        assert_eq!(s.left_label, "(n int, err error)");
        assert_eq!(s.right_label, "func");
    }

    #[test]
    fn function_name_mode() {
        let s = upgrade(&print_candidate(), SnippetMode::Name, "P");
        assert_eq!(s.snippet.as_deref(), Some("Print()$0"));
    }

    #[test]
    fn function_none_mode() {
        let s = upgrade(&print_candidate(), SnippetMode::None, "P");
        assert_eq!(s.snippet.as_deref(), Some("Print($1)$0"));
        assert_eq!(s.display_text, "Print(a ...interface{})");
    }

    #[test]
    fn fatal_without_returns_has_empty_label() {
        let c = Candidate::new("func", "Fatal", "func(v ...interface{})");
        let s = upgrade(&c, SnippetMode::NameAndType, "");
        assert_eq!(s.display_text, "Fatal(v ...interface{})");
        assert_eq!(s.snippet.as_deref(), Some("Fatal()$0"));
        assert_eq!(s.left_label, "");
    }

    #[test]
    fn callback_parameter() {
        let c = Candidate::new("func", "Abc", "func(f func() int)");
        let s = upgrade(&c, SnippetMode::NameAndType, "");
        assert_eq!(s.snippet.as_deref(), Some("Abc(${1:func() int {\n\t$2\n\\}})$0"));
    }

    #[test]
    fn variable_is_plain() {
        let c = Candidate::new("var", "Stdout", "*os.File");
        let s = upgrade(&c, SnippetMode::NameAndType, "Std");
        assert_eq!(s.kind, SuggestionKind::Variable);
        assert_eq!(s.snippet, None);
        assert_eq!(s.display_text, "Stdout");
        assert_eq!(s.left_label, "*os.File");
    }

    #[test]
    fn package_has_no_label() {
        let c = Candidate::new("package", "fmt", "");
        let s = upgrade(&c, SnippetMode::NameAndType, "");
        assert_eq!(s.kind, SuggestionKind::Import);
        assert_eq!(s.left_label, "");
    }

    #[test]
    fn func_class_with_non_function_type_degrades() {
        let c = Candidate::new("func", "Broken", "func(a int");
        let s = upgrade(&c, SnippetMode::NameAndType, "");
        assert_eq!(s.snippet, None);
        assert_eq!(s.display_text, "Broken");
        assert_eq!(s.kind, SuggestionKind::Function);
    }

    #[test]
    fn upgrade_all_keeps_order_and_filters_prefix() {
        let candidates = vec![
            Candidate::new("func", "Print", "func(a ...interface{}) (n int, err error)"),
            Candidate::new("func", "Errorf", "func(format string, a ...interface{}) error"),
            Candidate::new("func", "Printf", "func(format string, a ...interface{}) (n int, err error)"),
            Candidate::new("func", "println", "func(a ...interface{})"),
        ];
        let opts = UpgradeOptions { mode: SnippetMode::Name, prefix: "pr", filter: None };
        let cancelled = AtomicBool::new(false);
        let out = upgrade_all(&candidates, &opts, &cancelled);
        let names: Vec<&str> = out.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(names, vec!["Print", "Printf", "println"]);
        assert_eq!(out[1].snippet.as_deref(), Some("Printf(${1:format})$0"));
    }

    #[test]
    fn upgrade_all_applies_name_filter() {
        let candidates = vec![
            Candidate::new("func", "Print", "func()"),
            Candidate::new("func", "Sprint", "func()"),
            Candidate::new("var", "Stdin", "*os.File"),
        ];
        let filter = Matcher::build("^S", true).unwrap();
        let opts = UpgradeOptions { mode: SnippetMode::None, prefix: "", filter: Some(&filter) };
        let cancelled = AtomicBool::new(false);
        let names: Vec<String> = upgrade_all(&candidates, &opts, &cancelled)
            .into_iter()
            .map(|s| s.text)
            .collect();
        assert_eq!(names, vec!["Sprint", "Stdin"]);
    }

    #[test]
    fn upgrade_all_respects_cancellation() {
        let candidates = vec![print_candidate(); 8];
        let opts = UpgradeOptions { mode: SnippetMode::None, prefix: "", filter: None };
        let cancelled = AtomicBool::new(true);
        assert!(upgrade_all(&candidates, &opts, &cancelled).is_empty());
    }

    #[test]
    fn deeply_nested_candidate_does_not_stop_the_list() {
        let deep = format!("{}int{}", "func(f ".repeat(5000), ")".repeat(5000));
        let candidates = vec![
            Candidate::new("func", "Deep", &deep),
            Candidate::new("func", "Print", "func(x int) int"),
        ];
        let opts = UpgradeOptions { mode: SnippetMode::NameAndType, prefix: "", filter: None };
        let cancelled = AtomicBool::new(false);
        let out = upgrade_all(&candidates, &opts, &cancelled);
        assert_eq!(out.len(), 2);
        assert!(out[0].snippet.as_deref().unwrap().starts_with("Deep(${1:func(${2:f} func(f "));
        assert_eq!(out[1].snippet.as_deref(), Some("Print(${1:x int})$0"));
    }

    #[test]
    fn matcher_multi_term() {
        let m = Matcher::build("print|scan", false).unwrap();
        assert!(m.is_match("Sprintf"));
        assert!(m.is_match("Fscanln"));
        assert!(!m.is_match("Errorf"));
    }

    #[test]
    fn matcher_invalid_regex() {
        assert!(Matcher::build("(", true).is_err());
    }

    #[test]
    fn matcher_empty_multi_term() {
        assert!(Matcher::build(" | ", false).is_err());
    }
}
