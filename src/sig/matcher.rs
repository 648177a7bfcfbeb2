use std::sync::OnceLock;

use regex::Regex;

static FUNC_PREFIX: OnceLock<Regex> = OnceLock::new();

fn func_prefix() -> &'static Regex {
    FUNC_PREFIX.get_or_init(|| Regex::new(r"^func\(").expect("static regex"))
}

/// True when `text` opens with the `func` keyword directly followed by `(`.
pub fn starts_with_func(text: &str) -> bool {
    func_prefix().is_match(text.trim_start())
}

/// How the text after the parameter list declares results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnText<'a> {
    None,
    /// Interior of an outer `(...)` pair; may hold zero or more entries.
    List(&'a str),
    /// A single unparenthesized result, possibly a function type itself.
    Single(&'a str),
}

impl<'a> ReturnText<'a> {
    pub fn text(&self) -> Option<&'a str> {
        match *self {
            ReturnText::None => None,
            ReturnText::List(t) | ReturnText::Single(t) => Some(t),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuncMatch<'a> {
    pub whole: &'a str,
    pub params: &'a str,
    pub returns: ReturnText<'a>,
}

/// Recognise a function type and slice out its parameter and result text.
pub fn match_func(text: &str) -> Option<FuncMatch<'_>> {
    let whole = text.trim();
    let m = func_prefix().find(whole)?;
    let open = m.end() - 1;
    let close = matching_paren(whole, open)?;

    let params = whole[open + 1..close].trim();
    let rest = whole[close + 1..].trim();

    let returns = if rest.is_empty() {
        ReturnText::None
    } else if rest.starts_with('(') && matching_paren(rest, 0) == Some(rest.len() - 1) {
        ReturnText::List(rest[1..rest.len() - 1].trim())
    } else {
        ReturnText::Single(rest)
    };

    Some(FuncMatch { whole, params, returns })
}

/// Index of the `)` closing the `(` at `open`. Braces are not tracked: a
/// literal such as `interface{}` never holds an unmatched paren.
fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let mut depth: i32 = 0;
    for (i, c) in text[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}
