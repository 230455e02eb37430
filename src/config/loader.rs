//! Config lookup and parsing.
//!
//! A run takes its settings from `--config <path>`, else from `scalify.toml`
//! in the working directory, else from [`RewriteConfig::default`]. Every
//! error names the source it came from.

use crate::config::schema::{RewriteConfig, ValidationError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the working directory when no config is given.
pub const DEFAULT_CONFIG_FILE: &str = "scalify.toml";

/// Label used for configs parsed from memory.
const INLINE_ORIGIN: &str = "<inline>";

/// Where the effective config came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Passed with `--config`
    Explicit(PathBuf),
    /// `scalify.toml` found in the working directory
    Discovered(PathBuf),
    /// No file; built-in defaults
    Builtin,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file {} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config {origin}: {source}")]
    Syntax {
        origin: String,
        #[source]
        source: toml_edit::de::Error,
    },

    #[error("invalid config {origin}: {source}")]
    Invalid {
        origin: String,
        #[source]
        source: ValidationError,
    },
}

fn parse(input: &str, origin: &str) -> Result<RewriteConfig, ConfigError> {
    let config: RewriteConfig =
        toml_edit::de::from_str(input).map_err(|source| ConfigError::Syntax {
            origin: origin.to_string(),
            source,
        })?;
    config.validate().map_err(|source| ConfigError::Invalid {
        origin: origin.to_string(),
        source,
    })?;
    Ok(config)
}

/// Parse and validate a config held in memory.
pub fn load_from_str(input: &str) -> Result<RewriteConfig, ConfigError> {
    parse(input, INLINE_ORIGIN)
}

/// Read, parse and validate the config file at `path`.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RewriteConfig, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
        _ => ConfigError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;
    parse(&contents, &path.display().to_string())
}

/// Pick the config source for a run started in `dir`.
pub fn locate(explicit: Option<&Path>, dir: &Path) -> ConfigOrigin {
    if let Some(path) = explicit {
        return ConfigOrigin::Explicit(path.to_path_buf());
    }

    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    if candidate.is_file() {
        ConfigOrigin::Discovered(candidate)
    } else {
        ConfigOrigin::Builtin
    }
}

/// Resolve the effective config and where it came from.
///
/// An explicit path must exist; a missing `scalify.toml` falls back to the
/// built-in defaults.
pub fn resolve(
    explicit: Option<&Path>,
    dir: &Path,
) -> Result<(RewriteConfig, ConfigOrigin), ConfigError> {
    let origin = locate(explicit, dir);
    let config = match &origin {
        ConfigOrigin::Explicit(path) | ConfigOrigin::Discovered(path) => load_from_path(path)?,
        ConfigOrigin::Builtin => RewriteConfig::default(),
    };
    Ok((config, origin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::DEFAULT_HELPER_IMPORT;

    #[test]
    fn empty_input_gives_defaults() {
        let config = load_from_str("").unwrap();
        assert_eq!(config, RewriteConfig::default());
        assert_eq!(config.helper_import, DEFAULT_HELPER_IMPORT);
    }

    #[test]
    fn parses_all_fields() {
        let config = load_from_str(
            r#"
extension = "dart"
helper_import = "package:app/units.dart"
exclude_dirs = [".dart_tool", "build"]
"#,
        )
        .unwrap();
        assert_eq!(config.helper_import, "package:app/units.dart");
        assert_eq!(config.exclude_dirs, vec![".dart_tool", "build"]);

        let filter = config.file_filter();
        assert_eq!(filter.extension, "dart");
        assert_eq!(filter.exclude_dirs.len(), 2);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = load_from_str("extensions = \"dart\"").unwrap_err();
        assert!(matches!(err, ConfigError::Syntax { ref origin, .. } if origin == INLINE_ORIGIN));
        assert!(err.to_string().starts_with("malformed config <inline>"));
    }

    #[test]
    fn validation_collects_every_issue() {
        let err = load_from_str(
            r#"
extension = ".dart"
helper_import = "'quoted'"
exclude_dirs = ["lib/gen"]
"#,
        )
        .unwrap_err();
        match err {
            ConfigError::Invalid { source, .. } => assert_eq!(source.issues.len(), 3),
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn file_errors_name_the_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("scalify.toml");
        fs::write(&path, "extension = \"\"").unwrap();

        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref origin, .. } if origin.ends_with("scalify.toml")));
        assert!(err.to_string().starts_with("invalid config "));
    }

    #[test]
    fn locate_prefers_explicit_then_directory_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path();
        let explicit = dir.join("other.toml");

        assert_eq!(locate(None, dir), ConfigOrigin::Builtin);
        assert_eq!(
            locate(Some(explicit.as_path()), dir),
            ConfigOrigin::Explicit(explicit.clone())
        );

        fs::write(dir.join(DEFAULT_CONFIG_FILE), "").unwrap();
        assert_eq!(
            locate(None, dir),
            ConfigOrigin::Discovered(dir.join(DEFAULT_CONFIG_FILE))
        );
        assert_eq!(
            locate(Some(explicit.as_path()), dir),
            ConfigOrigin::Explicit(explicit)
        );
    }

    #[test]
    fn resolve_loads_the_located_source() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path();

        let (config, origin) = resolve(None, dir).unwrap();
        assert_eq!(config, RewriteConfig::default());
        assert_eq!(origin, ConfigOrigin::Builtin);

        fs::write(dir.join(DEFAULT_CONFIG_FILE), "exclude_dirs = [\"build\"]").unwrap();
        let (config, _) = resolve(None, dir).unwrap();
        assert_eq!(config.exclude_dirs, vec!["build"]);

        let explicit = dir.join("other.toml");
        fs::write(&explicit, "extension = \"txt\"").unwrap();
        let (config, origin) = resolve(Some(explicit.as_path()), dir).unwrap();
        assert_eq!(config.extension, "txt");
        assert!(config.exclude_dirs.is_empty());
        assert_eq!(origin, ConfigOrigin::Explicit(explicit));
    }

    #[test]
    fn missing_explicit_file_is_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("missing.toml");

        let err = resolve(Some(missing.as_path()), temp_dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(ref p) if p == &missing));
        assert!(err.to_string().contains("does not exist"));
    }
}
