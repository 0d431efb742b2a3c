//! Settings loaded from a TOML file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ReportError;
use crate::period::ReportPeriod;
use crate::types::{ClientContext, ReportContext};

/// Top-level settings.
///
/// ```toml
/// broker_name = "Pune e Stock Broking"
/// output_dir = "reports"
///
/// [pdf]
/// table_font_size = 7.5
///
/// [debounce]
/// filter_ms = 500
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Broker printed in the title as `<broker_name> Limited`.
    pub broker_name: String,
    /// Directory exports are written to.
    pub output_dir: PathBuf,
    /// PDF page geometry and fonts.
    pub pdf: PdfConfig,
    /// Quiet windows of the change notifications.
    pub debounce: DebounceConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            broker_name: "Pune e Stock Broking".to_string(),
            output_dir: PathBuf::from("."),
            pdf: PdfConfig::default(),
            debounce: DebounceConfig::default(),
        }
    }
}

impl ReportConfig {
    /// Reads settings from a TOML file; absent keys keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ReportError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Parses settings from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ReportError> {
        Ok(toml::from_str(text)?)
    }

    /// Letterhead context for a client and period.
    pub fn context(&self, client: ClientContext, period: ReportPeriod) -> ReportContext {
        ReportContext {
            broker_name: self.broker_name.clone(),
            client,
            period,
        }
    }
}

/// PDF layout settings, all lengths in millimetres.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Page width (A4 by default).
    pub page_width: f64,
    /// Page height.
    pub page_height: f64,
    /// Left and right margin.
    pub margin_x: f64,
    /// Top and bottom margin; also where the cursor starts on a page.
    pub margin_y: f64,
    /// Height of one table row.
    pub line_height: f64,
    /// Title size in points.
    pub title_font_size: f64,
    /// Letterhead and section label size.
    pub heading_font_size: f64,
    /// Table text size.
    pub table_font_size: f64,
    /// Prefix of amounts; the built-in fonts have no rupee glyph.
    pub currency_symbol: String,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margin_x: 10.0,
            margin_y: 10.0,
            line_height: 6.0,
            title_font_size: 16.0,
            heading_font_size: 11.0,
            table_font_size: 8.0,
            currency_symbol: "Rs.".to_string(),
        }
    }
}

/// Debounce windows in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    /// Row selection changes.
    pub selection_ms: u64,
    /// Filter input changes.
    pub filter_ms: u64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            selection_ms: 200,
            filter_ms: 300,
        }
    }
}

impl DebounceConfig {
    /// Selection window as a `Duration`.
    #[inline]
    pub const fn selection(self) -> Duration {
        Duration::from_millis(self.selection_ms)
    }

    /// Filter window as a `Duration`.
    #[inline]
    pub const fn filter(self) -> Duration {
        Duration::from_millis(self.filter_ms)
    }
}
