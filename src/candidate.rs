//! Completion candidates as emitted by the gocode daemon.

use log::{debug, error};
use serde::Deserialize;
use thiserror::Error;

/// Class gocode reports when it crashed while computing candidates.
const PANIC_CLASS: &str = "PANIC";
const CSV_SEPARATOR: &str = ",,";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Candidate {
    pub class: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub type_text: String,
    #[serde(default)]
    pub package: String,
}

impl Candidate {
    pub fn new(class: &str, name: &str, type_text: &str) -> Self {
        Self {
            class: class.to_owned(),
            name: name.to_owned(),
            type_text: type_text.to_owned(),
            package: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Csv,
}

/// Decoded daemon output.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CandidateList {
    /// Length of the partial identifier gocode completed against.
    pub prefix_len: usize,
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("input is not valid UTF-8")]
    Utf8,
    #[error("malformed gocode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed candidate on line {line}: {text}")]
    MalformedLine { line: usize, text: String },
    #[error("gocode panicked while computing candidates")]
    DaemonPanic,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonReply {
    Candidates(usize, Vec<Candidate>),
    Empty([(); 0]),
}

pub fn parse_candidates(text: &str, format: InputFormat) -> Result<CandidateList, InputError> {
    let list = match format {
        InputFormat::Json => parse_json(text)?,
        InputFormat::Csv => parse_csv(text)?,
    };

    if let [only] = list.candidates.as_slice() {
        if only.class == PANIC_CLASS {
            error!("gocode reported a panic: {}", only.type_text);
            return Err(InputError::DaemonPanic);
        }
    }

    debug!("decoded {} candidates", list.candidates.len());
    Ok(list)
}

fn parse_json(text: &str) -> Result<CandidateList, InputError> {
    if text.trim().is_empty() {
        return Ok(CandidateList::default());
    }
    let reply: JsonReply = serde_json::from_str(text)?;
    Ok(match reply {
        JsonReply::Empty(_) => CandidateList::default(),
        JsonReply::Candidates(prefix_len, candidates) => CandidateList { prefix_len, candidates },
    })
}

fn parse_csv(text: &str) -> Result<CandidateList, InputError> {
    let mut candidates = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let fields: Vec<&str> = trimmed.splitn(4, CSV_SEPARATOR).collect();
        if fields.len() < 3 || fields[0].is_empty() || fields[1].is_empty() {
            return Err(InputError::MalformedLine {
                line: idx + 1,
                text: trimmed.to_owned(),
            });
        }

        candidates.push(Candidate {
            class: fields[0].to_owned(),
            name: fields[1].to_owned(),
            type_text: fields[2].to_owned(),
            package: fields.get(3).map(|p| (*p).to_owned()).unwrap_or_default(),
        });
    }

    Ok(CandidateList {
        prefix_len: 0,
        candidates,
    })
}
