//! Configuration file resolution with global fallback.
//!
//! Resolves the configuration file path using a deterministic priority order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `{project}/yamllintx.toml` or `.yamllintx.toml`
//! 3. `~/.yamllintx/config.toml` (global fallback)
//! 4. No config found → defaults
//!
//! The project directory is the lint target itself, or the directory
//! holding it when the target is a single YAML file. Parent directories are
//! not searched.

use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config` flag.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Loaded from the global config directory (`~/.yamllintx/`).
    Global(PathBuf),
    /// No config found; defaults will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the config was loaded from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

const PROJECT_CONFIG_NAMES: &[&str] = &["yamllintx.toml", ".yamllintx.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration file for a lint target.
#[must_use]
pub fn resolve(target: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(target, explicit, global_config_dir())
}

/// Directory searched for project config: the target, or its parent for a file.
fn project_dir(target: &Path) -> &Path {
    if !target.is_file() {
        return target;
    }
    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Testable core: accepts `global_dir` as parameter to avoid env var races.
fn resolve_inner(
    target: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    let dir = project_dir(target);
    if let Some(found) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
    {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    match global_dir.map(|dir| dir.join(GLOBAL_CONFIG_NAME)) {
        Some(candidate) if candidate.is_file() => {
            tracing::debug!("Found global config: {}", candidate.display());
            ConfigSource::Global(candidate)
        }
        _ => ConfigSource::Default,
    }
}

/// Returns the global config directory path.
///
/// Resolution: `$YAMLLINTX_CONFIG_DIR` > `~/.yamllintx/`
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("YAMLLINTX_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".yamllintx"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Lays out `deploy/app.yaml` under a temp root.
    fn yaml_project() -> (TempDir, PathBuf) {
        let tmp = TempDir::new().expect("tempdir");
        let deploy = tmp.path().join("deploy");
        fs::create_dir(&deploy).expect("mkdir");
        let file = deploy.join("app.yaml");
        fs::write(&file, "replicas: 3\n").expect("write");
        (tmp, file)
    }

    #[test]
    fn yaml_file_uses_config_beside_it() {
        let (tmp, file) = yaml_project();
        let config = tmp.path().join("deploy").join("yamllintx.toml");
        fs::write(&config, "preset = \"relaxed\"\n").expect("write");

        assert_eq!(resolve_inner(&file, None, None), ConfigSource::Project(config));
    }

    #[test]
    fn yaml_file_and_its_directory_resolve_alike() {
        let (tmp, file) = yaml_project();
        let deploy = tmp.path().join("deploy");
        fs::write(deploy.join(".yamllintx.toml"), "").expect("write");

        let from_file = resolve_inner(&file, None, None);
        assert_eq!(from_file, resolve_inner(&deploy, None, None));
        assert_eq!(from_file.path(), Some(deploy.join(".yamllintx.toml").as_path()));
    }

    #[test]
    fn plain_name_wins_over_dot_prefix() {
        let (tmp, file) = yaml_project();
        let deploy = tmp.path().join("deploy");
        fs::write(deploy.join(".yamllintx.toml"), "").expect("write");
        fs::write(deploy.join("yamllintx.toml"), "").expect("write");

        assert_eq!(
            resolve_inner(&file, None, None),
            ConfigSource::Project(deploy.join("yamllintx.toml"))
        );
    }

    #[test]
    fn config_in_parent_directory_is_not_picked_up() {
        let (tmp, file) = yaml_project();
        fs::write(tmp.path().join("yamllintx.toml"), "").expect("write");

        assert_eq!(resolve_inner(&file, None, None), ConfigSource::Default);
        assert!(matches!(
            resolve_inner(tmp.path(), None, None),
            ConfigSource::Project(_)
        ));
    }

    #[test]
    fn explicit_config_beats_one_beside_the_file() {
        let (tmp, file) = yaml_project();
        fs::write(tmp.path().join("deploy").join("yamllintx.toml"), "").expect("write");
        let explicit = PathBuf::from("/etc/yamllintx/ci.toml");

        assert_eq!(
            resolve_inner(&file, Some(&explicit), None),
            ConfigSource::Explicit(explicit)
        );
    }

    #[test]
    fn global_config_covers_unconfigured_yaml_file() {
        let (_tmp, file) = yaml_project();
        let global = TempDir::new().expect("tempdir");
        fs::write(global.path().join("config.toml"), "").expect("write");

        let result = resolve_inner(&file, None, Some(global.path().to_path_buf()));
        assert!(result.is_global());
        assert_eq!(result.path(), Some(global.path().join("config.toml").as_path()));
    }

    #[test]
    fn directory_named_like_config_is_ignored() {
        let (tmp, file) = yaml_project();
        fs::create_dir(tmp.path().join("deploy").join("yamllintx.toml")).expect("mkdir");
        let global = TempDir::new().expect("tempdir");

        assert_eq!(
            resolve_inner(&file, None, Some(global.path().to_path_buf())),
            ConfigSource::Default
        );
    }

    #[test]
    fn missing_yaml_target_falls_back_to_default() {
        let tmp = TempDir::new().expect("tempdir");
        let missing = tmp.path().join("absent.yaml");

        assert_eq!(resolve_inner(&missing, None, None), ConfigSource::Default);
    }
}
