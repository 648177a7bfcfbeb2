use log::{trace, warn};

use super::matcher::{match_func, starts_with_func, FuncMatch, ReturnText};
use super::split::{first_top_level_space, split_top_level};
use super::{FunctionType, NotAFunctionType, ParamType, Parameter};

/// Function types nested deeper than this keep their text as a plain type.
pub const MAX_NESTING: usize = 256;

/// Parse a function-type signature into its parameter and return lists,
/// recursing into function-typed entries.
pub fn parse_type(text: &str) -> Result<FunctionType, NotAFunctionType> {
    let m = match_func(text).ok_or_else(|| NotAFunctionType(text.trim().to_owned()))?;
    Ok(build(m, 0))
}

fn build(m: FuncMatch<'_>, depth: usize) -> FunctionType {
    let parameters = split_top_level(m.params, ',')
        .iter()
        .map(|token| parse_param_at(token, depth + 1))
        .collect();

    let returns = match m.returns {
        ReturnText::None => Vec::new(),
        ReturnText::List(list) => split_top_level(list, ',')
            .iter()
            .map(|token| parse_param_at(token, depth + 1))
            .collect(),
        ReturnText::Single(token) => vec![parse_param_at(token, depth + 1)],
    };

    trace!("parsed {:?}", m.whole);
    FunctionType {
        raw: m.whole.to_owned(),
        parameters,
        returns,
    }
}

/// Parse one list token. Text before the first top-level whitespace is the
/// identifier; a token without such whitespace is a bare type. Shared
/// trailing types (`a, b int`) are not propagated to earlier names.
pub fn parse_param(token: &str) -> Parameter {
    parse_param_at(token, 1)
}

fn parse_param_at(token: &str, depth: usize) -> Parameter {
    let token = token.trim();

    let (identifier, type_part) = if starts_with_func(token) {
        ("", token)
    } else {
        match first_top_level_space(token) {
            Some(pos) => (&token[..pos], token[pos..].trim_start()),
            None => ("", token),
        }
    };

    let kind = match match_func(type_part) {
        Some(m) if depth <= MAX_NESTING => ParamType::Func(build(m, depth)),
        Some(_) => {
            warn!("function type nested deeper than {} levels kept as text", MAX_NESTING);
            ParamType::Plain(type_part.to_owned())
        }
        None => ParamType::Plain(type_part.to_owned()),
    };

    Parameter {
        raw: token.to_owned(),
        identifier: identifier.to_owned(),
        kind,
    }
}
