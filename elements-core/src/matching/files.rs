//! File Match Resolver
//!
//! Picks the file record inside a fetched manifest that corresponds to a file
//! the index (or the tree) asked for. Manifests are produced by a different
//! build step than the index, so paths do not always line up exactly.

use serde::{Deserialize, Serialize};

use crate::registry::{basename, RegistryFile, RegistryFileWithContent};

/// The file being looked for. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl FileRequest {
    pub fn by_target(target: impl Into<String>) -> Self {
        Self {
            path: None,
            target: Some(target.into()),
        }
    }

    pub fn by_path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            target: None,
        }
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref().filter(|t| !t.is_empty())
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }

    /// File name used for the last-resort comparison
    pub fn file_name(&self) -> Option<&str> {
        self.target()
            .or_else(|| self.path())
            .map(basename)
            .filter(|n| !n.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.target().is_none() && self.path().is_none()
    }
}

impl From<&RegistryFile> for FileRequest {
    fn from(file: &RegistryFile) -> Self {
        Self {
            path: Some(file.path.clone()),
            target: Some(file.target.clone()),
        }
    }
}

/// How a file match was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileMatchKind {
    Target,
    Path,
    FileName,
}

/// Find the manifest file matching `requested`, or `None`
pub fn find_best_file_match<'a>(
    requested: &FileRequest,
    candidates: &'a [RegistryFileWithContent],
) -> Option<&'a RegistryFileWithContent> {
    find_file_match_with_kind(requested, candidates).map(|(file, _)| file)
}

/// Like [`find_best_file_match`], also reporting which rule matched.
///
/// Rules, in order: exact target, exact path, then the requested file name
/// against the file name of each candidate's target.
pub fn find_file_match_with_kind<'a>(
    requested: &FileRequest,
    candidates: &'a [RegistryFileWithContent],
) -> Option<(&'a RegistryFileWithContent, FileMatchKind)> {
    if candidates.is_empty() || requested.is_empty() {
        return None;
    }

    if let Some(target) = requested.target() {
        if let Some(file) = candidates.iter().find(|f| f.target() == target) {
            return Some((file, FileMatchKind::Target));
        }
    }

    if let Some(path) = requested.path() {
        if let Some(file) = candidates.iter().find(|f| f.path() == path) {
            return Some((file, FileMatchKind::Path));
        }
    }

    let name = requested.file_name()?;
    candidates
        .iter()
        .find(|f| basename(f.target()) == name)
        .map(|file| (file, FileMatchKind::FileName))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_content(path: &str, target: &str, content: &str) -> RegistryFileWithContent {
        RegistryFileWithContent::new(
            RegistryFile::new(path, "registry:component", target),
            content,
        )
    }

    fn candidates() -> Vec<RegistryFileWithContent> {
        vec![
            with_content("registry/a/y.tsx", "a/y.tsx", "basename"),
            with_content("registry/x/y.tsx", "x/y.tsx", "exact"),
            with_content("registry/lib/utils.ts", "lib/utils.ts", "utils"),
        ]
    }

    #[test]
    fn test_exact_target_beats_file_name() {
        let files = candidates();
        let (file, kind) =
            find_file_match_with_kind(&FileRequest::by_target("x/y.tsx"), &files).unwrap();
        assert_eq!(file.content, "exact");
        assert_eq!(kind, FileMatchKind::Target);
    }

    #[test]
    fn test_exact_path() {
        let files = candidates();
        let request = FileRequest {
            path: Some("registry/lib/utils.ts".to_string()),
            target: Some("src/lib/helpers.ts".to_string()),
        };
        let (file, kind) = find_file_match_with_kind(&request, &files).unwrap();
        assert_eq!(file.content, "utils");
        assert_eq!(kind, FileMatchKind::Path);
    }

    #[test]
    fn test_file_name_fallback_uses_target() {
        let files = candidates();
        let (file, kind) =
            find_file_match_with_kind(&FileRequest::by_target("components/y.tsx"), &files)
                .unwrap();
        // first candidate in list order with the same file name
        assert_eq!(file.content, "basename");
        assert_eq!(kind, FileMatchKind::FileName);
    }

    #[test]
    fn test_file_name_fallback_uses_path_without_target() {
        let files = candidates();
        let file = find_best_file_match(&FileRequest::by_path("elsewhere/utils.ts"), &files);
        assert_eq!(file.unwrap().content, "utils");
    }

    #[test]
    fn test_no_match() {
        let files = candidates();
        assert!(find_best_file_match(&FileRequest::by_target("nope.tsx"), &files).is_none());
        assert!(find_best_file_match(&FileRequest::default(), &files).is_none());
        assert!(find_best_file_match(&FileRequest::by_target("x/y.tsx"), &[]).is_none());
    }

    #[test]
    fn test_empty_strings_are_absent() {
        let files = candidates();
        let request = FileRequest {
            path: Some(String::new()),
            target: Some(String::new()),
        };
        assert!(request.is_empty());
        assert!(find_best_file_match(&request, &files).is_none());
    }

    #[test]
    fn test_from_registry_file() {
        let file = RegistryFile::new("registry/x/y.tsx", "registry:ui", "x/y.tsx");
        let request = FileRequest::from(&file);
        assert_eq!(request.target(), Some("x/y.tsx"));
        assert_eq!(request.file_name(), Some("y.tsx"));
    }
}
