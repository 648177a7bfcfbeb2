//! Display text and insertion templates for function completions.
//!
//! Templates use `$N` / `${N:content}` tab-stops with `$0` as the final
//! cursor position. Inside placeholder content a literal `}` would close the
//! placeholder early, so content passes through [`escape_placeholder`];
//! scaffolding (`${N:`, the closing `}`, `$0`) never does.

use std::fmt;

use log::{debug, warn};

use crate::sig::{parse_type, FunctionType, Parameter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnippetMode {
    /// One generic stop when the function takes arguments.
    None,
    /// One stop per non-variadic parameter holding its identifier.
    Name,
    /// One stop per non-variadic parameter holding `identifier type`;
    /// function-typed parameters expand to a callback literal.
    #[default]
    NameAndType,
}

impl SnippetMode {
    /// Map a setting value onto a mode. Unknown values behave like `none`.
    pub fn from_setting(value: &str) -> Self {
        match value {
            "none" => SnippetMode::None,
            "name" => SnippetMode::Name,
            "nameAndType" => SnippetMode::NameAndType,
            other => {
                warn!("unknown snippet mode '{}', using 'none'", other);
                SnippetMode::None
            }
        }
    }
}

impl fmt::Display for SnippetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SnippetMode::None => "none",
            SnippetMode::Name => "name",
            SnippetMode::NameAndType => "nameAndType",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub display_text: String,
    pub template: String,
}

/// Escape text that lands inside `${N:...}`.
pub fn escape_placeholder(text: &str) -> String {
    text.replace('}', "\\}")
}

/// Hands out tab-stop numbers left to right across the whole template.
struct TabStops {
    next: usize,
}

impl TabStops {
    fn new() -> Self {
        Self { next: 1 }
    }

    fn take(&mut self) -> usize {
        let n = self.next;
        self.next += 1;
        n
    }
}

/// Build display text and insertion template for `name` called with `func`.
pub fn generate_snippet(name: &str, func: &FunctionType, mode: SnippetMode) -> Snippet {
    let shown: Vec<&str> = func.parameters.iter().map(|p| p.raw.as_str()).collect();
    let display_text = format!("{}({})", name, shown.join(", "));

    let body = match mode {
        SnippetMode::None if func.parameters.is_empty() => String::new(),
        SnippetMode::None => "$1".to_owned(),
        SnippetMode::Name | SnippetMode::NameAndType => {
            let mut stops = TabStops::new();
            let placeholders: Vec<String> = func
                .parameters
                .iter()
                .filter(|p| !p.is_variadic())
                .map(|p| placeholder(p, mode, &mut stops))
                .collect();
            placeholders.join(", ")
        }
    };

    Snippet {
        display_text,
        template: format!("{}({})$0", name, body),
    }
}

/// Like [`generate_snippet`], starting from unparsed type text. A type that
/// is not a function yields the bare name for both fields.
pub fn synthesize(name: &str, raw_type: &str, mode: SnippetMode) -> Snippet {
    match parse_type(raw_type) {
        Ok(func) => generate_snippet(name, &func, mode),
        Err(e) => {
            debug!("{}: {}", name, e);
            Snippet {
                display_text: name.to_owned(),
                template: name.to_owned(),
            }
        }
    }
}

fn placeholder(param: &Parameter, mode: SnippetMode, stops: &mut TabStops) -> String {
    let n = stops.take();
    let content = match (mode, param.nested_type()) {
        (SnippetMode::NameAndType, Some(nested)) => callback_literal(nested, stops),
        (SnippetMode::NameAndType, None) => escape_placeholder(&param.raw),
        _ => escape_placeholder(&param.identifier),
    };
    format!("${{{}:{}}}", n, content)
}

/// `func(${N:a} int, ...) ret {\n\t$M\n\}` with every stop numbered after
/// the enclosing one.
fn callback_literal(func: &FunctionType, stops: &mut TabStops) -> String {
    let args: Vec<String> = func
        .parameters
        .iter()
        .map(|p| {
            let n = stops.take();
            if p.identifier.is_empty() {
                format!("${{{}:{}}}", n, escape_placeholder(p.type_str()))
            } else {
                format!(
                    "${{{}:{}}} {}",
                    n,
                    escape_placeholder(&p.identifier),
                    escape_placeholder(p.type_str())
                )
            }
        })
        .collect();

    let mut out = format!("func({})", args.join(", "));

    match func.returns.as_slice() {
        [] => {}
        [only] => {
            out.push(' ');
            out.push_str(&escape_placeholder(only.type_str()));
        }
        many => {
            let rets: Vec<String> = many.iter().map(|r| escape_placeholder(r.type_str())).collect();
            out.push_str(&format!(" ({})", rets.join(", ")));
        }
    }

    out.push_str(&format!(" {{\n\t${}\n\\}}", stops.take()));
    out
}
