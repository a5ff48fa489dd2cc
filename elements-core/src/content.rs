//! File content shown in the viewer
//!
//! Content either comes from the item manifest or, when the manifest cannot
//! be fetched or lacks the file, from a placeholder template. The viewer
//! never sees a hard failure.

use serde::{Deserialize, Serialize};

use crate::install::PackageManager;
use crate::matching::{find_best_file_match, FileRequest};
use crate::registry::{basename, ItemManifest};

/// Where displayed content came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentOrigin {
    Manifest,
    Placeholder,
}

/// Content for one file of an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileContent {
    pub item: String,
    pub target: String,
    pub content: String,
    pub origin: ContentOrigin,
}

impl FileContent {
    pub fn is_placeholder(&self) -> bool {
        self.origin == ContentOrigin::Placeholder
    }
}

/// Template body shown when real content is unavailable
pub fn placeholder_content(item: &str, requested: &FileRequest) -> String {
    let target = requested
        .target()
        .or_else(|| requested.path())
        .unwrap_or("unknown");
    let file_name = basename(target);

    format!(
        "// {file_name}\n\
         // Target: {target}\n\
         // Part of the \"{item}\" element.\n\
         //\n\
         // Source is not available in this preview. Install the element to get the full file:\n\
         //\n\
         //   {command}\n",
        command = PackageManager::Npm.install_command(item),
    )
}

/// Pick the requested file out of a fetched manifest, falling back to a
/// placeholder when there is no manifest or no matching file
pub fn resolve_content(
    item: &str,
    requested: &FileRequest,
    manifest: Option<&ItemManifest>,
) -> FileContent {
    let target = requested
        .target()
        .or_else(|| requested.path())
        .unwrap_or_default()
        .to_string();

    if let Some(file) = manifest.and_then(|m| find_best_file_match(requested, &m.files)) {
        return FileContent {
            item: item.to_string(),
            target,
            content: file.content.clone(),
            origin: ContentOrigin::Manifest,
        };
    }

    if manifest.is_some() {
        tracing::warn!("Manifest for '{}' has no file matching '{}'", item, target);
    }

    FileContent {
        item: item.to_string(),
        content: placeholder_content(item, requested),
        target,
        origin: ContentOrigin::Placeholder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{RegistryFile, RegistryFileWithContent};

    fn manifest() -> ItemManifest {
        ItemManifest {
            name: "clerk-sign-in".to_string(),
            item_type: None,
            title: None,
            description: None,
            files: vec![RegistryFileWithContent::new(
                RegistryFile::new(
                    "registry/clerk/sign-in.tsx",
                    "registry:component",
                    "components/elements/sign-in.tsx",
                ),
                "export function SignIn() {}",
            )],
            dependencies: vec![],
            registry_dependencies: vec![],
        }
    }

    #[test]
    fn test_content_from_manifest() {
        let request = FileRequest::by_target("components/elements/sign-in.tsx");
        let content = resolve_content("clerk-sign-in", &request, Some(&manifest()));
        assert_eq!(content.origin, ContentOrigin::Manifest);
        assert_eq!(content.content, "export function SignIn() {}");
    }

    #[test]
    fn test_placeholder_when_file_missing() {
        let request = FileRequest::by_target("components/elements/sign-up.tsx");
        let content = resolve_content("clerk-sign-in", &request, Some(&manifest()));
        assert!(content.is_placeholder());
        assert!(content.content.starts_with("// sign-up.tsx\n"));
        assert!(content
            .content
            .contains("npx -y shadcn@latest add @elements/clerk-sign-in"));
    }

    #[test]
    fn test_placeholder_without_manifest() {
        let request = FileRequest::by_path("registry/waitlist.tsx");
        let content = resolve_content("waitlist", &request, None);
        assert!(content.is_placeholder());
        assert_eq!(content.target, "registry/waitlist.tsx");
        assert!(content.content.contains("Target: registry/waitlist.tsx"));
    }
}
