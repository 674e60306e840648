//! Executable location
//!
//! Maps a logical binding to a concrete runnable path under the configured
//! binary directory, probing the platform executable suffix and, for the
//! native-script binary, its ASCII alias. Bindings are re-resolved per case;
//! nothing is cached.

use std::env::consts::EXE_SUFFIX;
use std::path::{Path, PathBuf};

use crate::convention::Binding;
use crate::resolve::ResolveError;

/// Resolve `binding` to an existing executable under `bin_dir`.
///
/// Probe order: the nominal name, the nominal name with the platform
/// executable suffix, then the ASCII alias under the same suffix rule. The
/// error carries the nominal path so the verdict reason points at the
/// expected location.
pub fn locate(binding: Binding, bin_dir: &Path) -> Result<PathBuf, ResolveError> {
    let nominal = bin_dir.join(binding.binary_name());

    let mut candidates = vec![nominal.clone()];
    if !EXE_SUFFIX.is_empty() {
        candidates.push(with_exe_suffix(&nominal));
    }
    if let Some(alias) = binding.ascii_alias() {
        let alias_path = bin_dir.join(alias);
        candidates.push(alias_path.clone());
        if !EXE_SUFFIX.is_empty() {
            candidates.push(with_exe_suffix(&alias_path));
        }
    }

    candidates
        .into_iter()
        .find(|candidate| candidate.is_file())
        .ok_or(ResolveError::MissingExecutable { path: nominal })
}

fn with_exe_suffix(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(EXE_SUFFIX);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn finds_nominal_binary() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("polyglot"), "").unwrap();
        let path = locate(Binding::Primary, dir.path()).unwrap();
        assert!(path.ends_with("polyglot"));
    }

    #[test]
    fn falls_back_to_ascii_alias_for_localized() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("wenda_cn"), "").unwrap();
        let path = locate(Binding::Localized, dir.path()).unwrap();
        assert!(path.ends_with("wenda_cn"));
    }

    #[test]
    fn native_name_wins_over_alias() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("文达"), "").unwrap();
        fs::write(dir.path().join("wenda_cn"), "").unwrap();
        let path = locate(Binding::Localized, dir.path()).unwrap();
        assert!(path.ends_with("文达"));
    }

    #[test]
    fn missing_binary_names_the_nominal_path() {
        let dir = TempDir::new().unwrap();
        let err = locate(Binding::Primary, dir.path()).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("missing executable:"));
        assert!(message.contains("polyglot"));
    }

    #[test]
    fn primary_has_no_alias() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("wenda_cn"), "").unwrap();
        assert!(locate(Binding::Primary, dir.path()).is_err());
    }
}
