//! Install command strings
//!
//! The catalog shows a copyable command per package manager. Commands are
//! only produced here, never executed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ElementsError;
use crate::registry::{normalize_item_name, NAMESPACE};

/// Supported package managers, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Bun,
    Npm,
    Pnpm,
    Yarn,
}

impl PackageManager {
    pub const ALL: [PackageManager; 4] = [
        PackageManager::Bun,
        PackageManager::Npm,
        PackageManager::Pnpm,
        PackageManager::Yarn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Bun => "bun",
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
        }
    }

    /// Prefix that runs a package binary without installing it
    pub fn runner(&self) -> &'static str {
        match self {
            PackageManager::Bun => "bunx --bun",
            PackageManager::Npm => "npx -y",
            PackageManager::Pnpm => "pnpm dlx",
            PackageManager::Yarn => "yarn dlx",
        }
    }

    /// `shadcn add` command for a registry item
    pub fn install_command(&self, item: &str) -> String {
        format!(
            "{} shadcn@latest add {}/{}",
            self.runner(),
            NAMESPACE,
            normalize_item_name(item)
        )
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = ElementsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bun" => Ok(PackageManager::Bun),
            "npm" => Ok(PackageManager::Npm),
            "pnpm" => Ok(PackageManager::Pnpm),
            "yarn" => Ok(PackageManager::Yarn),
            _ => Err(ElementsError::UnknownPackageManager {
                value: s.to_string(),
            }),
        }
    }
}

/// A single install command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallCommand {
    pub package_manager: PackageManager,
    pub command: String,
}

/// Install commands for one item across all package managers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallCommands {
    pub item: String,
    pub commands: Vec<InstallCommand>,
}

impl InstallCommands {
    pub fn for_item(name: &str) -> Self {
        let item = normalize_item_name(name).to_string();
        let commands = PackageManager::ALL
            .iter()
            .map(|pm| InstallCommand {
                package_manager: *pm,
                command: pm.install_command(&item),
            })
            .collect();
        Self { item, commands }
    }

    pub fn get(&self, package_manager: PackageManager) -> Option<&str> {
        self.commands
            .iter()
            .find(|c| c.package_manager == package_manager)
            .map(|c| c.command.as_str())
    }
}
