//! Operator-facing output.
//!
//! Everything the session prints goes through a [`Reporter`] handed in by
//! the caller, so tests can capture output instead of reading stdout.

use crate::prelude::*;

/// How a line should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Info,
    Success,
    Warning,
    Error,
    Heading,
    Detail,
}

/// Sink for operator-visible messages.
pub trait Reporter: Send {
    /// Writes one line of output.
    fn line(&mut self, tone: Tone, text: &str);

    fn plain(&mut self, text: &str) {
        self.line(Tone::Plain, text);
    }

    fn info(&mut self, text: &str) {
        self.line(Tone::Info, text);
    }

    fn success(&mut self, text: &str) {
        self.line(Tone::Success, text);
    }

    fn warning(&mut self, text: &str) {
        self.line(Tone::Warning, text);
    }

    fn error(&mut self, text: &str) {
        self.line(Tone::Error, text);
    }

    fn heading(&mut self, text: &str) {
        self.line(Tone::Heading, text);
    }

    /// A `label value` pair, with the label highlighted.
    fn detail(&mut self, label: &str, value: &str) {
        self.line(Tone::Detail, &format!("{:<14}{}", label, value));
    }
}

/// Writes colored output to stdout.
///
/// Colors are stripped automatically when stdout is not a terminal.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn line(&mut self, tone: Tone, text: &str) {
        match tone {
            Tone::Plain => aprintln!("{}", text),
            Tone::Info => aprintln!("{}", p_b(text)),
            Tone::Success => aprintln!("{}", p_g(text)),
            Tone::Warning => aprintln!("{}", p_y(text)),
            Tone::Error => aprintln!("{}", p_r(text)),
            Tone::Heading => aprintln!("\n{}", p_bold(&p_m(text))),
            Tone::Detail => aprintln!("  {}", p_c(text)),
        }
    }

    fn detail(&mut self, label: &str, value: &str) {
        aprintln!("  {} {}", p_c(&format!("{:<13}", label)), value);
    }
}

/// Collects output in memory.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryReporter {
    lines: Vec<(Tone, String)>,
}

#[cfg(test)]
impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[(Tone, String)] {
        &self.lines
    }

    /// True if any line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|(_, line)| line.contains(needle))
    }

    /// True if a line with the given tone contains `needle`.
    pub fn contains_with(&self, tone: Tone, needle: &str) -> bool {
        self.lines
            .iter()
            .any(|(t, line)| *t == tone && line.contains(needle))
    }

    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|(_, line)| line.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
impl Reporter for MemoryReporter {
    fn line(&mut self, tone: Tone, text: &str) {
        self.lines.push((tone, text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_reporter_records_tone() {
        let mut out = MemoryReporter::new();
        out.success("Added vibe: 'Sunset Drive'");
        out.error("Failed to list vibes: boom");

        assert!(out.contains_with(Tone::Success, "Sunset Drive"));
        assert!(out.contains_with(Tone::Error, "boom"));
        assert!(!out.contains_with(Tone::Success, "boom"));
    }

    #[test]
    fn test_detail_pads_label() {
        let mut out = MemoryReporter::new();
        out.detail("ID:", "abc");
        assert_eq!(out.lines()[0], (Tone::Detail, format!("{:<14}abc", "ID:")));
    }
}
