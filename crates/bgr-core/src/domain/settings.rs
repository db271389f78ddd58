//! User-controlled output settings and the per-request removal options
//! derived from them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A settings value could not be parsed from its wire string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field} '{value}', expected one of: {expected}")]
pub struct ParseSettingError {
    field: &'static str,
    value: String,
    expected: &'static str,
}

/// Requested output container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpg,
}

impl OutputFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpg),
            _ => Err(ParseSettingError {
                field: "output format",
                value: s.to_string(),
                expected: "png, jpg",
            }),
        }
    }
}

/// Requested output resolution.
///
/// `Preview` is capped at roughly 0.25 megapixels by the service, `Full`
/// keeps the original resolution, and `Auto` lets the service pick the
/// highest resolution the account allows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputSize {
    #[default]
    Auto,
    Preview,
    Full,
}

impl OutputSize {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Preview => "preview",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for OutputSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputSize {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "preview" => Ok(Self::Preview),
            "full" => Ok(Self::Full),
            _ => Err(ParseSettingError {
                field: "size",
                value: s.to_string(),
                expected: "auto, preview, full",
            }),
        }
    }
}

/// Hint about the kind of foreground subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForegroundType {
    Auto,
    Person,
    Product,
}

impl ForegroundType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Person => "person",
            Self::Product => "product",
        }
    }
}

impl fmt::Display for ForegroundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ForegroundType {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "person" => Ok(Self::Person),
            "product" => Ok(Self::Product),
            _ => Err(ParseSettingError {
                field: "foreground type",
                value: s.to_string(),
                expected: "auto, person, product",
            }),
        }
    }
}

/// Output settings, passed verbatim into every removal request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub output_format: OutputFormat,
    pub size: OutputSize,
    /// Omitted from the request when `None`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub foreground_type: Option<ForegroundType>,
}

impl Settings {
    /// Merge a partial update, only touching fields that are `Some`.
    pub fn merge(&mut self, update: &SettingsUpdate) {
        if let Some(format) = update.output_format {
            self.output_format = format;
        }
        if let Some(size) = update.size {
            self.size = size;
        }
        if let Some(foreground_type) = update.foreground_type {
            self.foreground_type = foreground_type;
        }
    }
}

/// Partial settings update.
///
/// `foreground_type` is `Option<Option<T>>`:
/// - `None` = don't change this field
/// - `Some(None)` = clear the field
/// - `Some(Some(value))` = set field to value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub output_format: Option<OutputFormat>,
    pub size: Option<OutputSize>,
    #[serde(rename = "type")]
    pub foreground_type: Option<Option<ForegroundType>>,
}

impl SettingsUpdate {
    pub const fn is_empty(&self) -> bool {
        self.output_format.is_none() && self.size.is_none() && self.foreground_type.is_none()
    }
}

/// Options for a single removal request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemovalOptions {
    /// Always sent.
    pub size: OutputSize,
    /// Sent as `format` when present.
    pub format: Option<OutputFormat>,
    /// Sent as `type` when present.
    pub foreground_type: Option<ForegroundType>,
}

impl From<&Settings> for RemovalOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            size: settings.size,
            format: Some(settings.output_format),
            foreground_type: settings.foreground_type,
        }
    }
}
