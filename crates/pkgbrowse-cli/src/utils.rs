use std::{
    fmt::Display,
    sync::{LazyLock, RwLock},
};

use chrono::{Local, TimeZone};
use nu_ansi_term::Color;
use pkgbrowse_config::{config::get_config, display::DisplaySettings};
use serde::Serialize;

pub struct Icons;

impl Icons {
    pub const ARCH: &str = "🧩";
    pub const CALENDAR: &str = "📅";
    pub const CHECKSUM: &str = "🔏";
    pub const DEPENDENCY: &str = "🔗";
    pub const DESCRIPTION: &str = "📝";
    pub const HOME: &str = "🏠";
    pub const LICENSE: &str = "📜";
    pub const MAINTAINER: &str = "👤";
    pub const ORIGIN: &str = "🌱";
    pub const PACKAGE: &str = "📦";
    pub const REPO: &str = "📁";
    pub const SIZE: &str = "💾";
    pub const VERSION: &str = "🏁";
}

pub fn icon_or<'a>(icon: &'a str, fallback: &'a str) -> &'a str {
    if get_config().display().icons() {
        icon
    } else {
        fallback
    }
}

pub fn display_settings() -> DisplaySettings {
    get_config().display()
}

pub fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

pub static COLOR: LazyLock<RwLock<bool>> = LazyLock::new(|| RwLock::new(true));

pub struct Colored<T: Display>(pub Color, pub T);

impl<T: Display> Display for Colored<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let color = COLOR.read().unwrap();
        if *color {
            write!(f, "{}", self.0.prefix())?;
            self.1.fmt(f)?;
            write!(f, "{}", self.0.suffix())
        } else {
            self.1.fmt(f)
        }
    }
}

pub fn vec_string<T: Display + Serialize>(value: Option<&Vec<T>>) -> Option<String> {
    value.and_then(|json| serde_json::to_string(json).ok())
}

/// Renders a unix timestamp as a local date and time.
pub fn format_timestamp(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|secs| Local.timestamp_opt(secs, 0).single())
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| secs.to_string())
}

/// Formats a size given in MiB with two decimals.
pub fn format_mib(mib: f64) -> String {
    format!("{mib:.2} MiB")
}
