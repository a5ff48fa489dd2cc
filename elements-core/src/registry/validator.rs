//! Registry Validator
//!
//! Checks registry documents for problems the tree builder and match engine
//! would otherwise silently carry into the UI:
//! - Missing or duplicate item names
//! - Empty or malformed target paths
//! - Extension-less file names (displayed as folders)
//! - Registry dependencies that point nowhere

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use super::manifest::{normalize_item_name, ItemManifest, RegistryFile, RegistryIndex};

static ITEM_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid item name pattern"));

/// Validation result with detailed findings
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// Whether validation passed
    pub is_valid: bool,

    /// Error-level issues that must be fixed
    pub errors: Vec<ValidationIssue>,

    /// Warning-level issues that should be addressed
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: vec![],
            warnings: vec![],
        }
    }

    pub fn add_error(&mut self, issue: ValidationIssue) {
        self.is_valid = false;
        self.errors.push(issue);
    }

    pub fn add_warning(&mut self, issue: ValidationIssue) {
        self.warnings.push(issue);
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        if !other.is_valid {
            self.is_valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Error messages prefixed with their path
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    pub fn summary(&self) -> String {
        format!(
            "{}: {} errors, {} warnings",
            if self.is_valid { "VALID" } else { "INVALID" },
            self.errors.len(),
            self.warnings.len()
        )
    }
}

/// A single validation issue
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Issue code
    pub code: String,

    /// Human-readable message
    pub message: String,

    /// Path to the problematic element (e.g., "items[0].files[1].target")
    pub path: Option<String>,
}

impl ValidationIssue {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(path) => write!(f, "[{}] {}: {}", self.code, path, self.message),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}

/// Registry validator
pub struct RegistryValidator {
    /// Whether to warn about registry dependencies missing from the index
    check_references: bool,
}

impl RegistryValidator {
    pub fn new() -> Self {
        Self {
            check_references: true,
        }
    }

    /// Skip cross-reference checks (useful for partial registries)
    pub fn skip_references(mut self) -> Self {
        self.check_references = false;
        self
    }

    /// Validate a `registry.json` index
    pub fn validate_index(&self, index: &RegistryIndex) -> ValidationResult {
        let mut result = ValidationResult::valid();
        let mut seen = HashSet::new();

        for (i, item) in index.items.iter().enumerate() {
            let path = format!("items[{}]", i);

            self.validate_name(&item.name, &path, &mut result);
            if !item.name.is_empty() && !seen.insert(item.name.as_str()) {
                result.add_error(
                    ValidationIssue::new("E003", format!("Duplicate item name: {}", item.name))
                        .with_path(format!("{}.name", path)),
                );
            }

            if item.files.is_empty() {
                result.add_warning(
                    ValidationIssue::new("W003", format!("Item '{}' has no files", item.name))
                        .with_path(format!("{}.files", path)),
                );
            }

            for (j, file) in item.files.iter().enumerate() {
                self.validate_file(file, &format!("{}.files[{}]", path, j), &mut result);
            }
        }

        if self.check_references {
            let names: HashSet<&str> = index.items.iter().map(|i| i.name.as_str()).collect();
            for (i, item) in index.items.iter().enumerate() {
                for (j, dep) in item.registry_dependencies.iter().enumerate() {
                    let target = normalize_item_name(dep);
                    // Plain names may refer to an upstream registry (e.g. "button")
                    if dep.starts_with(super::NAMESPACE) && !names.contains(target) {
                        result.add_warning(
                            ValidationIssue::new(
                                "W002",
                                format!(
                                    "Item '{}' depends on '{}', which is not in this registry",
                                    item.name, dep
                                ),
                            )
                            .with_path(format!("items[{}].registryDependencies[{}]", i, j)),
                        );
                    }
                }
            }
        }

        result
    }

    /// Validate an item manifest (`/r/{name}.json`)
    pub fn validate_manifest(&self, manifest: &ItemManifest) -> ValidationResult {
        let mut result = ValidationResult::valid();

        self.validate_name(&manifest.name, "", &mut result);

        for (i, file) in manifest.files.iter().enumerate() {
            let path = format!("files[{}]", i);
            self.validate_file(&file.file, &path, &mut result);

            if file.content.is_empty() {
                result.add_warning(
                    ValidationIssue::new(
                        "W005",
                        format!("File '{}' has no content", file.target()),
                    )
                    .with_path(format!("{}.content", path)),
                );
            }
        }

        result
    }

    fn validate_name(&self, name: &str, path: &str, result: &mut ValidationResult) {
        let name_path = if path.is_empty() {
            "name".to_string()
        } else {
            format!("{}.name", path)
        };

        if name.is_empty() {
            result.add_error(
                ValidationIssue::new("E002", "Item name cannot be empty").with_path(name_path),
            );
        } else if !ITEM_NAME.is_match(name) {
            result.add_warning(
                ValidationIssue::new(
                    "W004",
                    format!("Item name '{}' is not kebab-case", name),
                )
                .with_path(name_path),
            );
        }
    }

    fn validate_file(&self, file: &RegistryFile, path: &str, result: &mut ValidationResult) {
        let target_path = format!("{}.target", path);

        if file.target.is_empty() {
            result.add_error(
                ValidationIssue::new(
                    "E004",
                    format!("File '{}' has no target path", file.path),
                )
                .with_path(target_path),
            );
            return;
        }

        if file.target.split('/').any(|segment| segment.is_empty()) {
            result.add_error(
                ValidationIssue::new(
                    "E005",
                    format!(
                        "Target '{}' contains an empty path segment",
                        file.target
                    ),
                )
                .with_path(target_path.clone()),
            );
        }

        if !file.file_name().contains('.') {
            result.add_warning(
                ValidationIssue::new(
                    "W001",
                    format!(
                        "Target '{}' has no extension and will be displayed as a folder",
                        file.target
                    ),
                )
                .with_path(target_path),
            );
        }
    }
}

impl Default for RegistryValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{RegistryFileWithContent, RegistryItem};

    fn file(target: &str) -> RegistryFile {
        RegistryFile::new("registry/x", "registry:component", target)
    }

    #[test]
    fn test_valid_index() {
        let index = RegistryIndex::new(
            "elements",
            vec![
                RegistryItem::new("clerk-sign-in", vec![file("components/sign-in.tsx")]),
                RegistryItem::new("logos", vec![file("components/logos.tsx")]),
            ],
        );
        let result = RegistryValidator::new().validate_index(&index);
        assert!(result.is_valid, "{}", result.summary());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_duplicate_and_empty_names() {
        let index = RegistryIndex::new(
            "elements",
            vec![
                RegistryItem::new("waitlist", vec![file("a.tsx")]),
                RegistryItem::new("waitlist", vec![file("b.tsx")]),
                RegistryItem::new("", vec![file("c.tsx")]),
            ],
        );
        let result = RegistryValidator::new().validate_index(&index);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.code == "E003"));
        assert!(result.errors.iter().any(|e| e.code == "E002"));
    }

    #[test]
    fn test_target_problems() {
        let index = RegistryIndex::new(
            "elements",
            vec![RegistryItem::new(
                "broken",
                vec![file(""), file("src//x.tsx"), file("src/ui/")],
            )],
        );
        let result = RegistryValidator::new().validate_index(&index);
        let codes: Vec<&str> = result.errors.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["E004", "E005", "E005"]);
        assert_eq!(
            result.errors[1].path.as_deref(),
            Some("items[0].files[1].target")
        );
    }

    #[test]
    fn test_extensionless_file_warns() {
        let index = RegistryIndex::new(
            "elements",
            vec![RegistryItem::new("tooling", vec![file("scripts/Makefile")])],
        );
        let result = RegistryValidator::new().validate_index(&index);
        assert!(result.is_valid);
        assert_eq!(result.warnings[0].code, "W001");
    }

    #[test]
    fn test_unknown_registry_dependency() {
        let item = RegistryItem::new("clerk-sign-in", vec![file("a.tsx")])
            .with_registry_dependencies(vec![
                "@elements/logos".to_string(),
                "button".to_string(),
            ]);
        let index = RegistryIndex::new("elements", vec![item]);

        let result = RegistryValidator::new().validate_index(&index);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, "W002");

        let result = RegistryValidator::new()
            .skip_references()
            .validate_index(&index);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_manifest_empty_content_warns() {
        let manifest = ItemManifest {
            name: "Theme Switcher".to_string(),
            item_type: None,
            title: None,
            description: None,
            files: vec![RegistryFileWithContent::new(file("theme.tsx"), "")],
            dependencies: vec![],
            registry_dependencies: vec![],
        };
        let result = RegistryValidator::new().validate_manifest(&manifest);
        assert!(result.is_valid);
        let codes: Vec<&str> = result.warnings.iter().map(|w| w.code.as_str()).collect();
        assert_eq!(codes, vec!["W004", "W005"]);
    }

    #[test]
    fn test_issue_display() {
        let issue = ValidationIssue::new("E002", "Item name cannot be empty").with_path("name");
        assert_eq!(issue.to_string(), "[E002] name: Item name cannot be empty");
    }
}
