use tasker_core::config::{self, Config};
use tasker_core::error::AppError;
use tasker_core::model::TaskStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_name(name: &str) -> Option<Self> {
        match config::canonical_theme_name(name)?.as_str() {
            "dark" => Some(Self::Dark),
            _ => Some(Self::Light),
        }
    }
}

/// ANSI (background, foreground) pair for one status under one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusColors {
    pub background: &'static str,
    pub foreground: &'static str,
}

const RESET: &str = "\x1b[0m";

/// The full {Pending, Completed} x {Light, Dark} table, approximating the
/// palette of the original desktop application.
pub fn status_colors(theme: Theme, status: TaskStatus) -> StatusColors {
    match (theme, status) {
        (Theme::Light, TaskStatus::Pending) => StatusColors {
            background: "\x1b[48;5;230m",
            foreground: "\x1b[38;5;23m",
        },
        (Theme::Light, TaskStatus::Completed) => StatusColors {
            background: "\x1b[48;5;120m",
            foreground: "\x1b[38;5;23m",
        },
        (Theme::Dark, TaskStatus::Pending) => StatusColors {
            background: "\x1b[48;5;241m",
            foreground: "\x1b[38;5;255m",
        },
        (Theme::Dark, TaskStatus::Completed) => StatusColors {
            background: "\x1b[48;5;28m",
            foreground: "\x1b[38;5;255m",
        },
    }
}

pub fn paint(theme: Theme, status: TaskStatus, text: &str) -> String {
    let colors = status_colors(theme, status);
    format!("{}{}{text}{RESET}", colors.background, colors.foreground)
}

/// The --theme flag wins over the config file; the default is light.
pub fn resolve_theme(flag: Option<&str>, config: &Config) -> Result<Theme, AppError> {
    if let Some(name) = flag {
        return Theme::from_name(name)
            .ok_or_else(|| AppError::invalid_data(format!("unknown theme '{name}'")));
    }

    Ok(config
        .theme
        .as_deref()
        .and_then(Theme::from_name)
        .unwrap_or(Theme::Light))
}
