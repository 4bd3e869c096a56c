//! Indentation-aware string builder for generated Rust source.

/// Writes lines at the current indentation (4 spaces per level).
#[derive(Debug)]
pub struct Emitter {
    buf: String,
    depth: usize,
    comment_width: usize,
}

impl Emitter {
    #[must_use]
    pub fn new(comment_width: usize) -> Self {
        Self {
            buf: String::new(),
            depth: 0,
            comment_width,
        }
    }

    /// Write a line at the current indentation level. Empty text writes a
    /// bare newline.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            self.write_indent();
            self.buf.push_str(text);
        }
        self.buf.push('\n');
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Write `text {` and increase indent.
    pub fn open(&mut self, text: impl AsRef<str>) {
        self.line(format!("{} {{", text.as_ref()));
        self.depth += 1;
    }

    /// Decrease indent and write `}` followed by `suffix` (e.g. `;`, `,`, `)`).
    pub fn close_with(&mut self, suffix: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(format!("}}{suffix}"));
    }

    pub fn close(&mut self) {
        self.close_with("");
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn outdent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Emit a doc comment: each line becomes a `///` line, wrapped so no
    /// line runs past the comment width.
    pub fn doc_comment(&mut self, text: Option<&str>) {
        self.comment("///", text);
    }

    /// Emit a plain `//` comment, wrapped like [`Emitter::doc_comment`].
    pub fn plain_comment(&mut self, text: &str) {
        self.comment("//", Some(text));
    }

    fn comment(&mut self, marker: &str, text: Option<&str>) {
        let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
            return;
        };
        let available = self
            .comment_width
            .saturating_sub(self.depth * 4 + marker.len() + 1)
            .max(20);
        for paragraph in text.lines() {
            let wrapped = wrap(paragraph.trim_end(), available);
            if wrapped.is_empty() {
                self.line(marker);
            }
            for line in wrapped {
                self.line(format!("{marker} {line}"));
            }
        }
    }

    /// Consume and return the built string.
    #[must_use]
    pub fn finish(self) -> String {
        self.buf
    }

    fn write_indent(&mut self) {
        for _ in 0..self.depth {
            self.buf.push_str("    ");
        }
    }
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Escape a string for a Rust double-quoted literal.
#[must_use]
pub fn escape_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

/// A raw string literal with enough `#`s to hold `s` verbatim.
#[must_use]
pub fn raw_str(s: &str) -> String {
    let mut hashes = String::new();
    while s.contains(&format!("\"{hashes}")) {
        hashes.push('#');
    }
    format!("r{hashes}\"{s}\"{hashes}")
}
