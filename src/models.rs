use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Function,
    Variable,
    Constant,
    Type,
    Import,
    Value,
}

impl SuggestionKind {
    /// Map a gocode candidate class onto the kind shown in the list.
    pub fn from_class(class: &str) -> Self {
        match class {
            "func" => SuggestionKind::Function,
            "var" => SuggestionKind::Variable,
            "const" => SuggestionKind::Constant,
            "type" => SuggestionKind::Type,
            "package" => SuggestionKind::Import,
            _ => SuggestionKind::Value,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionKind::Function => "function",
            SuggestionKind::Variable => "variable",
            SuggestionKind::Constant => "constant",
            SuggestionKind::Type => "type",
            SuggestionKind::Import => "import",
            SuggestionKind::Value => "value",
        }
    }
}

impl fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub text: String,
    pub display_text: String,
    /// Insertion template; `None` for plain-text suggestions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub left_label: String,
    pub right_label: String,
    pub replacement_prefix: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub package: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaInfo {
    pub elapsed_ms: u64,
    pub timeout: bool,
    pub mode: String,
    pub candidates: usize,
    pub suggestions: usize,
    #[serde(rename = "prefixLength", skip_serializing_if = "Option::is_none")]
    pub prefix_len: Option<usize>,
}

#[derive(Default, Serialize)]
pub struct OutputEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<MetaInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<Suggestion>>,
}

impl OutputEnvelope {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Default::default()
        }
    }
}
