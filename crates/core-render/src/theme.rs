use core_config::ThemeConfig;
use core_model::Command;
use crossterm::style::Color;
use tracing::warn;

/// Resolved colours for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub cursor_line: Color,
    pub deleted: Color,
    pub inserted: Color,
    pub changed: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            cursor_line: Color::Yellow,
            deleted: Color::Red,
            inserted: Color::Green,
            changed: Color::Blue,
        }
    }
}

impl Theme {
    /// Resolve colour names; unknown names use the terminal default colour.
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        Self {
            cursor_line: resolve("cursor_line", &cfg.cursor_line),
            deleted: resolve("deleted", &cfg.deleted),
            inserted: resolve("inserted", &cfg.inserted),
            changed: resolve("changed", &cfg.changed),
        }
    }

    /// Row foreground. Kept rows use the terminal default.
    pub fn foreground(&self, command: Command) -> Color {
        match command {
            Command::Deleted => self.deleted,
            Command::Inserted => self.inserted,
            Command::Changed => self.changed,
            Command::Kept => Color::Reset,
        }
    }
}

fn resolve(field: &'static str, name: &str) -> Color {
    Color::try_from(name.trim()).unwrap_or_else(|_| {
        warn!(target: "config", field, name, "theme_color_unknown");
        Color::Reset
    })
}
