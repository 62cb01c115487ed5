use crate::models::settings::Settings;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Load settings from disk. A missing file means defaults; a malformed
/// file is an error the caller reports before falling back to defaults.
pub fn load(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("read settings {}", path.display()))?;
    let settings: Settings =
        toml::from_str(&content).with_context(|| format!("parse settings {}", path.display()))?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = load(&dir.path().join("settings.toml")).unwrap();
        assert_eq!(
            settings.generate.default_length,
            constants::DEFAULT_PASSWORD_LENGTH
        );
        assert!(!settings.display.conceal_secrets);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "[display]\nconceal_secrets = true\n").unwrap();
        let settings = load(&path).unwrap();
        assert!(settings.display.conceal_secrets);
        assert_eq!(
            settings.generate.default_length,
            constants::DEFAULT_PASSWORD_LENGTH
        );
    }

    #[test]
    fn test_full_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(
            &path,
            "[generate]\ndefault_length = 24\n\n[display]\nconceal_secrets = true\n",
        )
        .unwrap();
        let settings = load(&path).unwrap();
        assert_eq!(settings.generate.default_length, 24);
        assert!(settings.display.conceal_secrets);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "not toml = = =").unwrap();
        assert!(load(&path).is_err());
    }
}
