//! Marker configuration files and CLI marker syntax.
//!
//! A marker config declares which custom and paired markers to look for:
//!
//! ```json
//! {
//!   "package": "com.example.app",
//!   "markers": ["app_js_initialized"],
//!   "paired_markers": [
//!     { "start": "bundle_load_start", "end": "bundle_load_end", "name": "bundleLoad" }
//!   ]
//! }
//! ```
//!
//! The same structure is accepted as TOML.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::schema::{ExtractionConfig, PairedMarkerSpec};
use crate::utils::config::PAIRED_MARKER_SEPARATOR;
use crate::utils::error::ConfigError;

/// Marker configuration as read from disk
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MarkerConfig {
    /// Package id (optional; the CLI flag takes precedence)
    #[serde(default, alias = "packageId", alias = "package_id")]
    pub package: Option<String>,

    /// Custom markers
    #[serde(default, alias = "customMarkers")]
    pub markers: Vec<String>,

    /// Paired markers
    #[serde(default, alias = "pairedMarkers")]
    pub paired_markers: Vec<PairedMarkerSpec>,
}

impl MarkerConfig {
    /// Append CLI-provided markers, skipping names already declared
    pub fn merge(&mut self, markers: Vec<String>, paired_markers: Vec<PairedMarkerSpec>) {
        for marker in markers {
            if !self.markers.contains(&marker) {
                self.markers.push(marker);
            }
        }
        for pair in paired_markers {
            if !self.paired_markers.contains(&pair) {
                self.paired_markers.push(pair);
            }
        }
    }

    /// Check marker names without requiring a package id
    pub fn validate_markers(&self) -> Result<(), ConfigError> {
        if let Some(index) = self.markers.iter().position(|m| m.trim().is_empty()) {
            return Err(ConfigError::EmptyMarkerName(index));
        }
        self.paired_markers.iter().try_for_each(PairedMarkerSpec::validate)
    }

    /// Build a validated `ExtractionConfig`
    ///
    /// `package_override` wins over the package named in the file.
    pub fn into_extraction_config(
        self,
        package_override: Option<String>,
    ) -> Result<ExtractionConfig, ConfigError> {
        let package_id = package_override
            .or(self.package)
            .ok_or(ConfigError::EmptyPackageId)?;
        ExtractionConfig::new(package_id, self.markers, self.paired_markers)
    }
}

/// Load a marker config from a `.json` or `.toml` file
///
/// # Errors
/// * `ConfigError::IoError` - file cannot be read
/// * `ConfigError::JsonError` / `TomlError` - contents do not parse
/// * `ConfigError::UnsupportedFormat` - unknown file extension
pub fn load_marker_config(path: impl AsRef<Path>) -> Result<MarkerConfig, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let config = match extension.as_deref() {
        Some("json") => serde_json::from_str(&contents)?,
        Some("toml") => toml::from_str(&contents)?,
        _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
    };

    Ok(config)
}

/// Split a comma-separated marker list, dropping blanks
pub fn split_marker_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse `start:end:name` (or `start:end`, named `start_to_end`)
pub fn parse_paired_marker(arg: &str) -> Result<PairedMarkerSpec, ConfigError> {
    let parts: Vec<&str> = arg.split(PAIRED_MARKER_SEPARATOR).map(str::trim).collect();

    let pair = match parts.as_slice() {
        [start, end] => PairedMarkerSpec::new(*start, *end, format!("{}_to_{}", start, end)),
        [start, end, name] => PairedMarkerSpec::new(*start, *end, *name),
        _ => return Err(ConfigError::InvalidPairedSyntax(arg.to_string())),
    };

    pair.validate()?;
    Ok(pair)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_paired_marker() {
        let pair = parse_paired_marker("load_start:load_end:load").unwrap();
        assert_eq!(pair, PairedMarkerSpec::new("load_start", "load_end", "load"));

        let unnamed = parse_paired_marker("a:b").unwrap();
        assert_eq!(unnamed.name, "a_to_b");

        assert!(parse_paired_marker("only_one").is_err());
        assert!(parse_paired_marker(":end:name").is_err());
        assert!(parse_paired_marker("a:b:c:d").is_err());
    }

    #[test]
    fn test_split_marker_list() {
        assert_eq!(split_marker_list(" a, b,,c "), vec!["a", "b", "c"]);
        assert!(split_marker_list("").is_empty());
    }

    #[test]
    fn test_load_toml_config() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
package = "com.example.app"
markers = ["app_js_initialized"]

[[paired_markers]]
start = "a"
end = "b"
name = "ab"
"#
        )
        .unwrap();

        let config = load_marker_config(file.path()).unwrap();
        assert_eq!(config.package.as_deref(), Some("com.example.app"));
        assert_eq!(config.markers, vec!["app_js_initialized"]);
        assert_eq!(config.paired_markers.len(), 1);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        assert!(matches!(
            load_marker_config(file.path()),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_package_override_wins() {
        let config = MarkerConfig {
            package: Some("com.from.file".to_string()),
            ..Default::default()
        };
        let extraction = config
            .into_extraction_config(Some("com.from.cli".to_string()))
            .unwrap();
        assert_eq!(extraction.package_id, "com.from.cli");
    }

    #[test]
    fn test_missing_package_is_an_error() {
        let result = MarkerConfig::default().into_extraction_config(None);
        assert!(matches!(result, Err(ConfigError::EmptyPackageId)));
    }

    #[test]
    fn test_validate_markers_without_package() {
        let mut config = MarkerConfig::default();
        config.merge(
            vec!["ready".to_string()],
            vec![PairedMarkerSpec::new("a", "b", "ab")],
        );
        assert!(config.validate_markers().is_ok());

        config.paired_markers.push(PairedMarkerSpec::new("a", "", "broken"));
        assert!(matches!(
            config.validate_markers(),
            Err(ConfigError::EmptyPairedSide { side: "end", .. })
        ));
    }
}
