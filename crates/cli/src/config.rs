use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tint_scanner::ScannerConfig;
use tint_tokens::TokenNaming;

pub(crate) const CONFIG_FILE_NAME: &str = "tint.toml";

/// Project settings, read from `tint.toml`. Every path is relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct TintConfig {
    /// Directory walked for source files
    pub source_root: String,

    /// Token file whose root block is indexed and, in apply mode, extended
    pub token_file: String,

    /// File name endings that select a file for scanning
    pub suffixes: Vec<String>,

    /// Paths (prefixes or globs) never scanned
    pub exclude: Vec<String>,

    pub report_dir: String,

    /// Standalone file holding only the minted declarations
    pub generated_token_file: String,

    /// Optional CommonJS palette module for a companion build tool
    pub palette_file: Option<String>,

    pub scanner: ScannerConfig,

    pub naming: TokenNaming,
}

impl Default for TintConfig {
    fn default() -> Self {
        Self {
            source_root: "ui/src".to_string(),
            token_file: "ui/src/styles/variables.css".to_string(),
            suffixes: vec![".module.css".to_string(), ".tsx".to_string()],
            exclude: vec![
                "ui/src/styles/globals.css".to_string(),
                "ui/src/styles/animations.css".to_string(),
            ],
            report_dir: ".codex/reports".to_string(),
            generated_token_file: "ui/src/styles/variables.generated.css".to_string(),
            palette_file: None,
            scanner: ScannerConfig::default(),
            naming: TokenNaming::default(),
        }
    }
}

impl TintConfig {
    /// Load the explicit config file, or `<root>/tint.toml` if present, or defaults
    pub(crate) fn load(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) if path.is_absolute() => Some(path.to_path_buf()),
            Some(path) => Some(root.join(path)),
            None => {
                let candidate = root.join(CONFIG_FILE_NAME);
                candidate.is_file().then_some(candidate)
            }
        };

        let Some(path) = path else {
            log::debug!("No {CONFIG_FILE_NAME} under {}, using defaults", root.display());
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config.validate().map_err(anyhow::Error::msg)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.suffixes.iter().all(|s| s.trim().is_empty()) {
            return Err("suffixes must name at least one file ending".to_string());
        }
        for (key, value) in [
            ("source_root", &self.source_root),
            ("token_file", &self.token_file),
            ("report_dir", &self.report_dir),
            ("generated_token_file", &self.generated_token_file),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{key} must not be empty"));
            }
        }
        self.scanner.validate()?;
        self.naming.validate().map_err(|err| err.to_string())?;
        Ok(())
    }
}

/// Absolute locations derived from the config and the project root
#[derive(Debug, Clone)]
pub(crate) struct ProjectPaths {
    pub root: PathBuf,
    pub source_root: PathBuf,
    pub token_file: PathBuf,
    pub report_json: PathBuf,
    pub report_md: PathBuf,
    pub report_patch: PathBuf,
    pub generated_token_file: PathBuf,
    pub palette_file: Option<PathBuf>,
}

impl ProjectPaths {
    pub(crate) fn resolve(root: &Path, config: &TintConfig) -> Self {
        let report_dir = root.join(&config.report_dir);
        Self {
            root: root.to_path_buf(),
            source_root: root.join(&config.source_root),
            token_file: root.join(&config.token_file),
            report_json: report_dir.join("color-map.json"),
            report_md: report_dir.join("color-report.md"),
            report_patch: report_dir.join("color-tokenization.patch"),
            generated_token_file: root.join(&config.generated_token_file),
            palette_file: config.palette_file.as_ref().map(|p| root.join(p)),
        }
    }

    /// `/`-separated path relative to the project root, for reports and stdout
    pub(crate) fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: TintConfig = toml::from_str(
            r#"
source_root = "web/src"
palette_file = "web/palette.cjs"

[naming]
prefix = "--tint-"
"#,
        )
        .unwrap();

        assert_eq!(config.source_root, "web/src");
        assert_eq!(config.token_file, "ui/src/styles/variables.css");
        assert_eq!(config.palette_file.as_deref(), Some("web/palette.cjs"));
        assert_eq!(config.naming.prefix, "--tint-");
        assert_eq!(config.naming.width, 3);
        assert_eq!(config.scanner, ScannerConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let parsed: std::result::Result<TintConfig, _> = toml::from_str("sources = \"x\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn validation_rejects_empty_suffixes() {
        let config = TintConfig {
            suffixes: vec![String::new()],
            ..TintConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn paths_are_resolved_against_root() {
        let root = Path::new("/project");
        let paths = ProjectPaths::resolve(root, &TintConfig::default());
        assert_eq!(paths.report_json, root.join(".codex/reports/color-map.json"));
        assert_eq!(paths.relative(&paths.token_file), "ui/src/styles/variables.css");
        assert_eq!(paths.palette_file, None);
    }
}
