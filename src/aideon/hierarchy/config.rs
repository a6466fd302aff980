use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::aideon::hierarchy::error::{HierarchyError, Result};

/// Separator used when none is configured.
pub const DEFAULT_SEPARATOR: char = '/';
/// Field label used when none is configured.
pub const DEFAULT_TARGET_FIELD: &str = "dept";

/// Options shared by the builders and the loaders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyOptions {
    /// Character joining codes inside a materialised path.
    pub separator: char,
    /// Name of the source field the codes came from. Carried as a label only.
    pub target_field: String,
}

impl Default for HierarchyOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            target_field: DEFAULT_TARGET_FIELD.to_string(),
        }
    }
}

/// Text encoding used for delimited files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextEncoding {
    /// UTF-8 without a byte order mark.
    Utf8,
    /// UTF-8 prefixed with a byte order mark, the form spreadsheet tools expect.
    #[default]
    Utf8Bom,
}

/// Quoting policy for delimited files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quoting {
    /// Quote every field.
    #[default]
    All,
    /// Quote only fields containing delimiters, quotes or line breaks.
    Necessary,
}

/// Options for the delimited text persistence backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    pub delimiter: char,
    pub encoding: TextEncoding,
    pub quoting: Quoting,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            encoding: TextEncoding::default(),
            quoting: Quoting::default(),
        }
    }
}

impl CsvOptions {
    /// Returns the delimiter as the single byte the CSV codec works with.
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(HierarchyError::InvalidConfig(format!(
                "delimiter '{}' is not an ASCII character",
                self.delimiter
            )))
        }
    }
}

/// Top-level settings document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub hierarchy: HierarchyOptions,
    pub csv: CsvOptions,
}

impl Settings {
    /// Loads settings from a JSON document. Missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(HierarchyError::MissingInput(path.to_path_buf()));
        }
        let source = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&source)?;
        settings.check()?;
        Ok(settings)
    }

    fn check(&self) -> Result<()> {
        if self.hierarchy.separator.is_whitespace() {
            return Err(HierarchyError::InvalidConfig(
                "separator must not be whitespace".into(),
            ));
        }
        self.csv.delimiter_byte()?;
        Ok(())
    }
}
