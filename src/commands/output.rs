//! Terminal output lines and number formatting.

use serde::Serialize;

/// Kind of an output line; drives colouring in the terminal UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    User,
    System,
    Info,
    Success,
    Error,
    Danger,
}

/// One line of command output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogLine {
    pub kind: LogKind,
    pub text: String,
}

impl LogLine {
    pub fn new(kind: LogKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Everything a command produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandOutput {
    pub lines: Vec<LogLine>,
    /// The log should be wiped before showing `lines`.
    pub clear_screen: bool,
}

impl CommandOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(text: impl Into<String>) -> Self {
        let mut out = Self::new();
        out.push(LogKind::Error, text);
        out
    }

    pub fn push(&mut self, kind: LogKind, text: impl Into<String>) {
        self.lines.push(LogLine::new(kind, text));
    }

    pub fn system(&mut self, text: impl Into<String>) {
        self.push(LogKind::System, text);
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(LogKind::Info, text);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(LogKind::Success, text);
    }

    pub fn fail(&mut self, text: impl Into<String>) {
        self.push(LogKind::Error, text);
    }

    /// True if any line is an error.
    pub fn has_error(&self) -> bool {
        self.lines.iter().any(|l| l.kind == LogKind::Error)
    }

    /// Concatenated text, one line per entry.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `$97,123.45` style formatting with a fixed number of decimals.
pub fn format_usd(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let sign = if value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };

    match frac_part {
        Some(f) => format!("{}${}.{}", sign, group_thousands(int_part), f),
        None => format!("{}${}", sign, group_thousands(int_part)),
    }
}

/// `$3.21B` / `$450.00M` style compact formatting for large notionals.
pub fn format_compact_usd(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e9 {
        format!("${:.2}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("${:.2}M", value / 1e6)
    } else {
        format_usd(value, 0)
    }
}

/// Signed percent, e.g. `+1.23%`.
pub fn format_signed_pct(value: f64) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{}{:.2}%", sign, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(97123.456, 2), "$97,123.46");
        assert_eq!(format_usd(1_234_567.0, 0), "$1,234,567");
        assert_eq!(format_usd(999.0, 0), "$999");
        assert_eq!(format_usd(0.0, 2), "$0.00");
        assert_eq!(format_usd(-1500.5, 1), "-$1,500.5");
    }

    #[test]
    fn test_format_compact_usd() {
        assert_eq!(format_compact_usd(3_000_000_000.0), "$3.00B");
        assert_eq!(format_compact_usd(450_000_000.0), "$450.00M");
        assert_eq!(format_compact_usd(12_345.0), "$12,345");
    }

    #[test]
    fn test_format_signed_pct() {
        assert_eq!(format_signed_pct(1.234), "+1.23%");
        assert_eq!(format_signed_pct(-0.5), "-0.50%");
    }
}
