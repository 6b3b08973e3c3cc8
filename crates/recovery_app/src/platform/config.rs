use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use engine_logging::{engine_info, engine_warn};
use recovery_core::RecoveryConfig;
use serde::{Deserialize, Serialize};

pub(crate) const CONFIG_FILENAME: &str = "recovery.ron";

/// On-disk shape of `recovery.ron`; every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct PersistedConfig {
    recovery_root: Option<PathBuf>,
    output_root: Option<PathBuf>,
    year_directories: Vec<String>,
}

/// Reads `recovery.ron` from `dir`, falling back to defaults when it is
/// absent or unreadable.
pub(crate) fn load_config(dir: &Path) -> RecoveryConfig {
    let path = dir.join(CONFIG_FILENAME);
    match read_config(&path) {
        Ok(Some(persisted)) => {
            engine_info!("Loaded configuration from {:?}", path);
            apply(persisted)
        }
        Ok(None) => RecoveryConfig::default(),
        Err(err) => {
            engine_warn!("Ignoring configuration {:?}: {:#}", path, err);
            RecoveryConfig::default()
        }
    }
}

fn read_config(path: &Path) -> anyhow::Result<Option<PersistedConfig>> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err).with_context(|| format!("reading {}", path.display())),
    };
    let persisted = ron::from_str(&content).context("parsing RON")?;
    Ok(Some(persisted))
}

fn apply(persisted: PersistedConfig) -> RecoveryConfig {
    let defaults = RecoveryConfig::default();
    RecoveryConfig {
        recovery_root: persisted.recovery_root.unwrap_or(defaults.recovery_root),
        output_root: persisted.output_root.unwrap_or(defaults.output_root),
        year_directories: persisted
            .year_directories
            .into_iter()
            .map(|y| y.trim().to_string())
            .filter(|y| !y.is_empty())
            .collect::<BTreeSet<_>>(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        assert_eq!(load_config(temp.path()), RecoveryConfig::default());
    }

    #[test]
    fn partial_file_overrides_given_fields() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILENAME),
            r#"(recovery_root: Some("/backup/site"), year_directories: ["2021", " 2022 "])"#,
        )
        .unwrap();

        let config = load_config(temp.path());

        assert_eq!(config.recovery_root, PathBuf::from("/backup/site"));
        assert_eq!(config.output_root, RecoveryConfig::default().output_root);
        assert_eq!(
            config.year_directories.into_iter().collect::<Vec<_>>(),
            vec!["2021".to_string(), "2022".to_string()]
        );
    }

    #[test]
    fn malformed_file_is_ignored() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), "(recovery_root: 42").unwrap();
        assert_eq!(load_config(temp.path()), RecoveryConfig::default());
    }
}
