use std::io::{self, BufWriter, Write};

use crate::models::{MetaInfo, OutputEnvelope, Suggestion};

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum OutputFormat {
    Yaml,
    Json,
}

pub fn write_output(envelope: &OutputEnvelope, format: OutputFormat) {
    let stdout = io::stdout();
    let mut w = BufWriter::with_capacity(64 * 1024, stdout.lock());
    write_envelope(&mut w, envelope, format).ok();
    w.flush().ok();
}

pub fn write_output_to(envelope: &OutputEnvelope, format: OutputFormat, path: &str) -> io::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut w = BufWriter::with_capacity(64 * 1024, file);
    write_envelope(&mut w, envelope, format)?;
    w.flush()
}

fn write_envelope(w: &mut impl Write, envelope: &OutputEnvelope, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Yaml => write_envelope_yaml(w, envelope),
        OutputFormat::Json => write_envelope_json(w, envelope),
    }
}

// ── YAML output ──

fn write_envelope_yaml(w: &mut impl Write, envelope: &OutputEnvelope) -> io::Result<()> {
    if let Some(ref meta) = envelope.meta {
        write_meta(w, meta)?;
    }
    if let Some(ref error) = envelope.error {
        write!(w, "error: ")?;
        write_inline_string(w, error)?;
        writeln!(w)?;
    }
    if let Some(ref suggestions) = envelope.suggestions {
        if !suggestions.is_empty() {
            write_suggestions(w, suggestions)?;
        }
    }
    Ok(())
}

fn write_meta(w: &mut impl Write, meta: &MetaInfo) -> io::Result<()> {
    writeln!(w, "meta:")?;
    if meta.elapsed_ms != 0 {
        writeln!(w, "  elapsedMs: {}", meta.elapsed_ms)?;
    }
    if meta.timeout {
        writeln!(w, "  timeout: true")?;
    }
    writeln!(w, "  mode: {}", meta.mode)?;
    writeln!(w, "  candidates: {}", meta.candidates)?;
    writeln!(w, "  suggestions: {}", meta.suggestions)?;
    if let Some(len) = meta.prefix_len {
        writeln!(w, "  prefixLength: {}", len)?;
    }
    Ok(())
}

fn write_suggestions(w: &mut impl Write, suggestions: &[Suggestion]) -> io::Result<()> {
    writeln!(w, "suggestions:")?;
    for s in suggestions {
        write!(w, "- text: ")?;
        write_inline_string(w, &s.text)?;
        writeln!(w)?;
        write_field(w, "displayText", &s.display_text)?;
        if let Some(ref snippet) = s.snippet {
            write_field(w, "snippet", snippet)?;
        }
        writeln!(w, "  type: {}", s.kind)?;
        if !s.left_label.is_empty() {
            write_field(w, "leftLabel", &s.left_label)?;
        }
        if !s.right_label.is_empty() {
            write_field(w, "rightLabel", &s.right_label)?;
        }
        if !s.replacement_prefix.is_empty() {
            write_field(w, "replacementPrefix", &s.replacement_prefix)?;
        }
        if !s.package.is_empty() {
            write_field(w, "package", &s.package)?;
        }
    }
    Ok(())
}

fn write_field(w: &mut impl Write, key: &str, value: &str) -> io::Result<()> {
    write!(w, "  {}: ", key)?;
    write_inline_string(w, value)?;
    writeln!(w)
}

fn write_inline_string(w: &mut impl Write, value: &str) -> io::Result<()> {
    if value.is_empty() {
        return write!(w, "''");
    }

    if needs_quoting(value) {
        write!(w, "\"")?;
        for c in value.chars() {
            match c {
                '"' => write!(w, "\\\"")?,
                '\\' => write!(w, "\\\\")?,
                '\n' => write!(w, "\\n")?,
                '\r' => write!(w, "\\r")?,
                '\t' => write!(w, "\\t")?,
                _ => write!(w, "{}", c)?,
            }
        }
        write!(w, "\"")?;
    } else {
        write!(w, "{}", value)?;
    }
    Ok(())
}

fn needs_quoting(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }

    let first = value.as_bytes()[0];
    if matches!(first, b'-' | b'[' | b']' | b'{' | b'}' | b'\'' | b'"' |
        b'!' | b'&' | b'*' | b'|' | b'>' | b'%' | b'@' | b'`' | b',' | b'?' | b'#' | b' ') {
        return true;
    }

    match value {
        "true" | "false" | "null" | "True" | "False" | "Null" |
        "TRUE" | "FALSE" | "NULL" | "yes" | "no" | "Yes" | "No" |
        "YES" | "NO" | "on" | "off" | "On" | "Off" | "ON" | "OFF" => return true,
        _ => {}
    }

    if looks_numeric(value) || value.ends_with(' ') {
        return true;
    }

    value.chars().any(|c| matches!(c, ':' | '#' | '\\' | '\n' | '\r' | '\t'))
}

fn looks_numeric(value: &str) -> bool {
    let digits = value.strip_prefix(&['-', '+'][..]).unwrap_or(value);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
}

// ── JSON output ──

fn write_envelope_json(w: &mut impl Write, envelope: &OutputEnvelope) -> io::Result<()> {
    serde_json::to_writer(&mut *w, envelope)?;
    writeln!(w)
}
