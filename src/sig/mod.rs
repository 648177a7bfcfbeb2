//! Surface-level grammar for Go function-type signatures as gocode prints them.

mod matcher;
mod parser;
mod split;

pub use matcher::{match_func, starts_with_func, FuncMatch, ReturnText};
pub use parser::{parse_param, parse_type};
pub use split::{ensure_next_arg, first_top_level_space, split_top_level};

use thiserror::Error;

/// Variadic marker that prefixes the type of a trailing repeated parameter.
pub const VARIADIC_PREFIX: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a function type: {0}")]
pub struct NotAFunctionType(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    Plain(String),
    Func(FunctionType),
}

/// One entry of a parameter or return list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Token text exactly as it appeared in the list.
    pub raw: String,
    /// Empty when the token is a bare type.
    pub identifier: String,
    pub kind: ParamType,
}

impl Parameter {
    pub fn is_function(&self) -> bool {
        matches!(self.kind, ParamType::Func(_))
    }

    pub fn type_text(&self) -> Option<&str> {
        match &self.kind {
            ParamType::Plain(text) => Some(text),
            ParamType::Func(_) => None,
        }
    }

    pub fn nested_type(&self) -> Option<&FunctionType> {
        match &self.kind {
            ParamType::Plain(_) => None,
            ParamType::Func(func) => Some(func),
        }
    }

    /// The type portion as text, whichever variant holds it.
    pub fn type_str(&self) -> &str {
        match &self.kind {
            ParamType::Plain(text) => text,
            ParamType::Func(func) => &func.raw,
        }
    }

    pub fn is_variadic(&self) -> bool {
        self.type_str().starts_with(VARIADIC_PREFIX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionType {
    pub raw: String,
    pub parameters: Vec<Parameter>,
    pub returns: Vec<Parameter>,
}

impl FunctionType {
    /// Returns rendered for a completion label, e.g. `(n int, err error)`.
    pub fn return_label(&self) -> String {
        match self.returns.as_slice() {
            [] => String::new(),
            [only] if only.identifier.is_empty() => only.raw.clone(),
            many => {
                let joined: Vec<&str> = many.iter().map(|r| r.raw.as_str()).collect();
                format!("({})", joined.join(", "))
            }
        }
    }
}
