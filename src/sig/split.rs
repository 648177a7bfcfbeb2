/// Depth of the two independent bracket families. Closers never take a
/// counter below zero, so a stray `)` cannot hide every later separator.
#[derive(Default)]
struct Depth {
    paren: u32,
    brace: u32,
}

impl Depth {
    #[inline]
    fn update(&mut self, c: char) {
        match c {
            '(' => self.paren += 1,
            ')' => self.paren = self.paren.saturating_sub(1),
            '{' => self.brace += 1,
            '}' => self.brace = self.brace.saturating_sub(1),
            _ => {}
        }
    }

    #[inline]
    fn is_top(&self) -> bool {
        self.paren == 0 && self.brace == 0
    }
}

/// Split `text` on `sep` wherever it appears outside `()` and `{}`.
/// Every piece is trimmed; blank input yields no pieces.
pub fn split_top_level(text: &str, sep: char) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut parts = Vec::new();
    let mut depth = Depth::default();
    let mut start = 0;

    for (i, c) in text.char_indices() {
        if c == sep && depth.is_top() {
            parts.push(text[start..i].trim().to_owned());
            start = i + c.len_utf8();
            continue;
        }
        depth.update(c);
    }
    parts.push(text[start..].trim().to_owned());
    parts
}

/// Byte offset of the first whitespace character that sits outside any
/// bracket pair.
pub fn first_top_level_space(text: &str) -> Option<usize> {
    let mut depth = Depth::default();
    for (i, c) in text.char_indices() {
        if c.is_whitespace() && depth.is_top() {
            return Some(i);
        }
        depth.update(c);
    }
    None
}

/// Recover top-level parameter tokens from fragments that were split on
/// every comma regardless of nesting.
pub fn ensure_next_arg<S: AsRef<str>>(fragments: &[S]) -> Vec<String> {
    let joined: Vec<&str> = fragments.iter().map(|f| f.as_ref()).collect();
    split_top_level(&joined.join(","), ',')
}
