//! Theme and color definitions for the TUI.

use btc_oracle::LogKind;
use ratatui::style::{Color, Modifier, Style};

/// Green-on-black terminal palette.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub info: Color,
    pub muted: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Green,
            success: Color::LightGreen,
            warning: Color::Yellow,
            danger: Color::Red,
            info: Color::Gray,
            muted: Color::DarkGray,
        }
    }
}

impl Theme {
    /// Get style for titles.
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for muted text.
    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Get style for borders.
    pub fn border(&self) -> Style {
        Style::default().fg(self.primary)
    }

    /// Style for the input prompt while a command runs.
    pub fn busy(&self) -> Style {
        Style::default()
            .fg(self.warning)
            .add_modifier(Modifier::SLOW_BLINK)
    }

    /// Style for a command output line.
    pub fn log_line(&self, kind: LogKind) -> Style {
        match kind {
            LogKind::User => Style::default()
                .fg(self.primary)
                .add_modifier(Modifier::BOLD),
            LogKind::System => Style::default().fg(self.warning),
            LogKind::Info => Style::default().fg(self.info),
            LogKind::Success => Style::default().fg(self.success),
            LogKind::Error => Style::default()
                .fg(self.danger)
                .add_modifier(Modifier::BOLD),
            LogKind::Danger => Style::default().fg(self.danger),
        }
    }
}
