//! Completion suggestions for Go candidates reported by gocode.
//!
//! [`sig`] recognises and decomposes function-type signatures, [`snippet`]
//! renders display text and insertion templates from them, and [`suggest`]
//! turns daemon candidates into list entries.

pub mod candidate;
pub mod cli;
pub mod file_reader;
pub mod models;
pub mod output;
pub mod sig;
pub mod snippet;
pub mod suggest;

pub use sig::{ensure_next_arg, match_func, parse_type, split_top_level, FunctionType, NotAFunctionType, Parameter};
pub use snippet::{generate_snippet, synthesize, Snippet, SnippetMode};
