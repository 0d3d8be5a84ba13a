//! Root resolution and reading of the persisted config file.
//!
//! # Root
//!
//! Each [`RootPath`] variant resolves to one directory, or `None` when the
//! location cannot be determined (no home directory, unreadable CWD).
//! [`RootPath::EnvOr`] checks the process environment first and the `.env`
//! file second. Custom
//! strategies implement [`RootResolver`]; closures returning `Option<PathBuf>`
//! implement it too, which keeps tests off the real home directory.
//!
//! # Layout
//!
//! ```text
//! <root>/
//!   <namespace>/
//!     config.yaml
//! ```
//!
//! # Reading
//!
//! [`read_config_file`] separates "no file yet" (`Ok(None)`) from real I/O and
//! decode failures. An empty document reads as an empty mapping; any other
//! non-mapping top level is rejected.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::ConfigMap;
use crate::env;
use crate::error::ConfigError;
use crate::types::RootPath;

/// Produces the directory under which namespace folders are created.
pub trait RootResolver {
    fn resolve_root(&self) -> Option<PathBuf>;
}

impl RootResolver for RootPath {
    fn resolve_root(&self) -> Option<PathBuf> {
        resolve_root_path(self)
    }
}

impl<F> RootResolver for F
where
    F: Fn() -> Option<PathBuf>,
{
    fn resolve_root(&self) -> Option<PathBuf> {
        self()
    }
}

/// Resolve a [`RootPath`] to a concrete directory.
pub fn resolve_root_path(root: &RootPath) -> Option<PathBuf> {
    match root {
        RootPath::Platform(app_name) => {
            let proj = directories::ProjectDirs::from("", "", app_name)?;
            Some(proj.data_dir().to_path_buf())
        }
        RootPath::Home(subdir) => {
            let user = directories::UserDirs::new()?;
            Some(user.home_dir().join(subdir))
        }
        RootPath::Cwd => std::env::current_dir().ok(),
        RootPath::Path(p) => Some(p.clone()),
        RootPath::EnvOr { var, fallback } => {
            env_dir(std::env::var_os(var), || env::dotenv_var(var))
                .or_else(|| resolve_root_path(fallback))
        }
    }
}

/// The process value if set, else the `.env` value. Empty counts as unset.
fn env_dir(process: Option<OsString>, dotenv: impl FnOnce() -> Option<String>) -> Option<PathBuf> {
    match process {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => dotenv().filter(|dir| !dir.is_empty()).map(PathBuf::from),
    }
}

/// Folder and file locations for one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespacePaths {
    pub folder: PathBuf,
    pub file: PathBuf,
}

impl NamespacePaths {
    pub fn new(root: &Path, namespace: &str, file_name: &str) -> Self {
        let folder = root.join(namespace);
        let file = folder.join(file_name);
        Self { folder, file }
    }
}

/// Create `folder` and any missing parents.
pub fn ensure_folder(folder: &Path) -> Result<(), ConfigError> {
    if folder.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(folder).map_err(|e| ConfigError::Io {
        path: folder.to_path_buf(),
        source: e,
    })
}

/// Read and decode the config file. `Ok(None)` means the file does not exist.
pub fn read_config_file(path: &Path) -> Result<Option<ConfigMap>, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    decode(&content, path).map(Some)
}

/// Decode YAML text into a mapping. `path` is only used for error messages.
pub fn decode(content: &str, path: &Path) -> Result<ConfigMap, ConfigError> {
    if is_blank_document(content) {
        return Ok(ConfigMap::new());
    }
    let value: Value = serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(ConfigMap::new()),
        _ => Err(ConfigError::NotAMapping {
            path: path.to_path_buf(),
        }),
    }
}

/// Only whitespace, comments, and document markers.
fn is_blank_document(content: &str) -> bool {
    content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn resolve_explicit_path() {
        let p = PathBuf::from("/tmp/myapp");
        assert_eq!(resolve_root_path(&RootPath::Path(p.clone())), Some(p));
    }

    #[test]
    fn env_or_falls_back_when_unset() {
        let root = RootPath::env_or(
            "NSCONFIG_TEST_ROOT_THAT_IS_NEVER_SET",
            RootPath::Path("/tmp/fallback".into()),
        );
        assert_eq!(root.resolve_root(), Some(PathBuf::from("/tmp/fallback")));
    }

    #[test]
    fn env_dir_prefers_process_value() {
        let dir = env_dir(Some("/from/process".into()), || Some("/from/dotenv".into()));
        assert_eq!(dir, Some(PathBuf::from("/from/process")));
    }

    #[test]
    fn env_dir_reads_dotenv_when_process_unset_or_empty() {
        let dotenv = || Some("/from/dotenv".to_string());
        assert_eq!(env_dir(None, dotenv), Some(PathBuf::from("/from/dotenv")));
        assert_eq!(
            env_dir(Some(OsString::new()), dotenv),
            Some(PathBuf::from("/from/dotenv"))
        );
    }

    #[test]
    fn env_dir_empty_everywhere_is_unset() {
        assert_eq!(env_dir(None, || Some(String::new())), None);
        assert_eq!(env_dir(None, || None), None);
    }

    #[test]
    fn closure_resolver() {
        let resolver = || Some(PathBuf::from("/tmp/closure"));
        assert_eq!(resolver.resolve_root(), Some(PathBuf::from("/tmp/closure")));
    }

    #[test]
    fn namespace_paths_layout() {
        let paths = NamespacePaths::new(Path::new("/srv/root"), "wallet", "config.yaml");
        assert_eq!(paths.folder, PathBuf::from("/srv/root/wallet"));
        assert_eq!(paths.file, PathBuf::from("/srv/root/wallet/config.yaml"));
    }

    #[test]
    fn ensure_folder_creates_parents() {
        let dir = TempDir::new().unwrap();
        let deep = dir.path().join("a").join("b").join("c");
        ensure_folder(&deep).unwrap();
        assert!(deep.is_dir());
        ensure_folder(&deep).unwrap();
    }

    #[test]
    fn read_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let result = read_config_file(&dir.path().join("config.yaml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn read_mapping() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "a: 1\nb:\n  c: two\n").unwrap();
        let map = read_config_file(&path).unwrap().unwrap();
        assert_eq!(Value::Object(map), json!({"a": 1, "b": {"c": "two"}}));
    }

    #[test]
    fn empty_file_reads_as_empty_mapping() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "").unwrap();
        let map = read_config_file(&path).unwrap().unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn comment_only_file_reads_as_empty_mapping() {
        let map = decode("# nothing yet\n---\n", Path::new("config.yaml")).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn explicit_null_reads_as_empty_mapping() {
        let map = decode("~\n", Path::new("config.yaml")).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "a: [unclosed\n").unwrap();
        let err = read_config_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.yaml"));
    }

    #[test]
    fn scalar_top_level_rejected() {
        let err = decode("just a string\n", Path::new("config.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotAMapping { .. }));
    }

    #[test]
    fn sequence_top_level_rejected() {
        let err = decode("- a\n- b\n", Path::new("config.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotAMapping { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_file_returns_io_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "a: 1\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();

        let result = read_config_file(&path);
        let readable_anyway = fs::read_to_string(&path).is_ok();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        // root ignores permission bits
        if !readable_anyway {
            assert!(matches!(result, Err(ConfigError::Io { .. })));
        }
    }
}
