//! Word-wrapping output sink.
//!
//! Input is processed line by line:
//! - consecutive unindented lines form a paragraph that is reflowed to the
//!   target width, with per-line indents set by [`LineWriter::set_indents`];
//! - lines starting with whitespace are emitted as-is (after the indent);
//! - blank lines separate paragraphs. Runs of blank lines collapse into one,
//!   and blank lines before the first output line or after the last are
//!   dropped.
//!
//! Spacing inside a single input line is kept, so padded table columns
//! survive reflow. Widths count runes, not bytes.

use std::fmt;
use std::io::{self, Write};

pub struct LineWriter<W: Write> {
    sink: W,
    width: i32,
    indents: Vec<String>,
    verbatim: bool,
    partial: String,
    // (separator, word) pairs; the separator is dropped at a wrap point.
    paragraph: Vec<(String, String)>,
    pending_blank: bool,
    wrote_any: bool,
    error: Option<io::Error>,
}

impl<W: Write> LineWriter<W> {
    /// Creates a writer wrapping at `width` runes; negative means unlimited.
    pub fn new(sink: W, width: i32) -> Self {
        LineWriter {
            sink,
            width,
            indents: Vec::new(),
            verbatim: false,
            partial: String::new(),
            paragraph: Vec::new(),
            pending_blank: false,
            wrote_any: false,
            error: None,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    /// Ends the current line and sets indents for what follows. The first
    /// indent applies to the first line of each paragraph, the second to the
    /// next line, and the last one repeats.
    pub fn set_indents(&mut self, indents: &[&str]) {
        self.end_line();
        self.indents = indents.iter().map(|indent| indent.to_string()).collect();
    }

    /// Ends the current line and toggles verbatim mode, in which every line
    /// is emitted exactly as written.
    pub fn force_verbatim(&mut self, verbatim: bool) {
        self.end_line();
        self.verbatim = verbatim;
    }

    /// Ends the current line and paragraph and flushes the sink, returning
    /// the first write error seen since the previous flush.
    pub fn flush(&mut self) -> io::Result<()> {
        self.end_line();
        if let Err(err) = self.sink.flush() {
            self.error.get_or_insert(err);
        }
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Writes already formatted text straight to the sink.
    pub fn write_raw(&mut self, text: &str) -> io::Result<()> {
        self.flush()?;
        if text.is_empty() {
            return Ok(());
        }
        if std::mem::take(&mut self.pending_blank) {
            self.sink.write_all(b"\n")?;
        }
        self.wrote_any = true;
        self.sink.write_all(text.as_bytes())
    }

    /// Flushes and returns the underlying sink.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.flush()?;
        Ok(self.sink)
    }

    fn end_line(&mut self) {
        if !self.partial.is_empty() {
            let line = std::mem::take(&mut self.partial);
            self.process_line(&line);
        }
        self.end_paragraph();
    }

    fn process_line(&mut self, line: &str) {
        if self.verbatim {
            self.end_paragraph();
            self.emit(line.to_string());
            return;
        }
        if line.trim().is_empty() {
            self.end_paragraph();
            if self.wrote_any {
                self.pending_blank = true;
            }
            return;
        }
        if line.starts_with(char::is_whitespace) {
            self.end_paragraph();
            let indented = format!("{}{}", self.indent(0), line);
            self.emit(indented);
            return;
        }
        let mut sep = if self.paragraph.is_empty() {
            String::new()
        } else {
            " ".to_string()
        };
        let mut word = String::new();
        for ch in line.chars() {
            if ch.is_whitespace() {
                if !word.is_empty() {
                    self.paragraph
                        .push((std::mem::take(&mut sep), std::mem::take(&mut word)));
                }
                sep.push(ch);
            } else {
                word.push(ch);
            }
        }
        if !word.is_empty() {
            self.paragraph.push((sep, word));
        }
    }

    fn end_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let words = std::mem::take(&mut self.paragraph);
        let mut line_index = 0;
        let mut line = self.indent(0).to_string();
        let mut line_len = line.chars().count();
        let mut has_word = false;
        for (sep, word) in words {
            let sep_len = sep.chars().count();
            let word_len = word.chars().count();
            if has_word && self.width >= 0 && line_len + sep_len + word_len > self.width as usize {
                self.emit(std::mem::take(&mut line));
                line_index += 1;
                line = self.indent(line_index).to_string();
                line_len = line.chars().count();
                line.push_str(&word);
                line_len += word_len;
                continue;
            }
            if has_word {
                line.push_str(&sep);
                line_len += sep_len;
            }
            line.push_str(&word);
            line_len += word_len;
            has_word = true;
        }
        self.emit(line);
    }

    fn indent(&self, line_index: usize) -> &str {
        self.indents
            .get(line_index)
            .or_else(|| self.indents.last())
            .map(String::as_str)
            .unwrap_or("")
    }

    fn emit(&mut self, line: String) {
        let mut out = String::new();
        if self.pending_blank {
            out.push('\n');
            self.pending_blank = false;
        }
        out.push_str(line.trim_end());
        out.push('\n');
        self.wrote_any = true;
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.sink.write_all(out.as_bytes()) {
            self.error = Some(err);
        }
    }
}

impl<W: Write> fmt::Write for LineWriter<W> {
    fn write_str(&mut self, text: &str) -> fmt::Result {
        self.partial.push_str(text);
        while let Some(idx) = self.partial.find('\n') {
            let line: String = self.partial.drain(..=idx).collect();
            self.process_line(line.trim_end_matches('\n'));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write as _;

    fn render(width: i32, f: impl FnOnce(&mut LineWriter<Vec<u8>>)) -> String {
        let mut w = LineWriter::new(Vec::new(), width);
        f(&mut w);
        String::from_utf8(w.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn reflows_paragraphs_to_width() {
        let out = render(20, |w| {
            writeln!(w, "the quick brown fox\njumps over the lazy dog").unwrap();
        });
        assert_eq!(out, "the quick brown fox\njumps over the lazy\ndog\n");
    }

    #[test]
    fn negative_width_is_unlimited() {
        let out = render(-1, |w| {
            writeln!(w, "one\ntwo three").unwrap();
        });
        assert_eq!(out, "one two three\n");
    }

    #[test]
    fn collapses_and_trims_blank_lines() {
        let out = render(80, |w| {
            writeln!(w, "\n\nfirst\n\n\n\nsecond\n\n").unwrap();
        });
        assert_eq!(out, "first\n\nsecond\n");
    }

    #[test]
    fn indented_lines_are_verbatim() {
        let out = render(10, |w| {
            writeln!(w, "Usage:\n   tool [flags] <command>").unwrap();
        });
        assert_eq!(out, "Usage:\n   tool [flags] <command>\n");
    }

    #[test]
    fn hanging_indent_keeps_column_padding() {
        let out = render(30, |w| {
            w.set_indents(&["   ", "               "]);
            write!(w, "{:<11} {}", "build", "compiles every package in the tree").unwrap();
            w.flush().unwrap();
            w.set_indents(&[]);
        });
        assert_eq!(
            out,
            "   build       compiles every\n               package in the\n               tree\n"
        );
    }

    #[test]
    fn set_indents_ends_the_current_line() {
        let out = render(80, |w| {
            write!(w, " -v=0").unwrap();
            w.set_indents(&["   "]);
            writeln!(w, "log level").unwrap();
            w.set_indents(&[]);
        });
        assert_eq!(out, " -v=0\n   log level\n");
    }

    #[test]
    fn verbatim_mode_skips_wrapping() {
        let out = render(5, |w| {
            w.force_verbatim(true);
            writeln!(w, "Root build - compiles things").unwrap();
            w.force_verbatim(false);
        });
        assert_eq!(out, "Root build - compiles things\n");
    }

    #[test]
    fn raw_output_keeps_pending_blank() {
        let out = render(80, |w| {
            writeln!(w, "parent").unwrap();
            writeln!(w).unwrap();
            w.write_raw("child\n").unwrap();
        });
        assert_eq!(out, "parent\n\nchild\n");
    }
}
