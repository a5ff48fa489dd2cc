//! Elements CLI - query a component registry
//!
//! Usage:
//!     elements resolve sign-in
//!     elements --registry public/registry.json tree clerk-sign-in
//!     elements --registry public/ install theme-switcher --pm pnpm
//!     elements validate --json

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use elements_core::registry::{RegistryLoader, RegistryValidator};
use elements_core::{
    flatten, render_tree, FileTree, InstallCommands, MatchTier, PackageManager, RegistryIndex,
    RegistryItem,
};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "elements")]
#[command(about = "Resolve, inspect and validate Elements registry items")]
#[command(version)]
struct Args {
    /// Path to registry.json or to a registry directory
    #[arg(short, long, global = true, default_value = "registry.json")]
    registry: PathBuf,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a loose key to a registry item
    Resolve {
        /// Key to resolve (e.g. "sign-in")
        key: String,
    },
    /// Show the file tree of an item
    Tree {
        /// Item name or loose key
        name: String,
    },
    /// Print install commands for an item
    Install {
        /// Item name or loose key
        name: String,

        /// Only print the command for this package manager
        #[arg(long)]
        pm: Option<PackageManager>,
    },
    /// Validate the registry
    Validate,
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let index = match load_index(&args.registry) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("Error loading registry: {}", e);
            process::exit(1);
        }
    };

    let code = match &args.command {
        Command::Resolve { key } => resolve(&index, key, args.json),
        Command::Tree { name } => tree(&index, name, args.json),
        Command::Install { name, pm } => install(&index, name, *pm, args.json),
        Command::Validate => validate(&index, args.json),
    };
    process::exit(code);
}

fn load_index(path: &Path) -> elements_core::Result<RegistryIndex> {
    // Validation is reported by the `validate` command instead
    let mut loader = RegistryLoader::new().skip_validation();
    if path.is_dir() {
        loader.load_from_directory(path)?;
    } else {
        loader.load_index_from_file(path)?;
    }
    tracing::debug!("Loaded registry from {}", path.display());
    Ok(loader.index_or_synthesized())
}

/// Exact name first, then the match engine
fn find_item<'a>(index: &'a RegistryIndex, name: &str) -> Option<(&'a RegistryItem, MatchTier)> {
    if let Some(item) = index.get(name) {
        return Some((item, MatchTier::Exact));
    }
    index.resolve_with_tier(name).map(|m| (m.item, m.tier))
}

fn not_found(name: &str, as_json: bool) -> i32 {
    let err = elements_core::ElementsError::ItemNotFound {
        name: name.to_string(),
    };
    if as_json {
        print_json(&err.to_error_response());
    } else {
        eprintln!("{}", err);
    }
    1
}

fn resolve(index: &RegistryIndex, key: &str, as_json: bool) -> i32 {
    let Some(found) = index.resolve_with_tier(key) else {
        return not_found(key, as_json);
    };

    if as_json {
        print_json(&json!({
            "key": key,
            "name": found.item.name,
            "tier": found.tier,
        }));
    } else {
        println!("{} ({} match)", found.item.name, found.tier);
    }
    0
}

fn tree(index: &RegistryIndex, name: &str, as_json: bool) -> i32 {
    let Some((item, _)) = find_item(index, name) else {
        return not_found(name, as_json);
    };

    let tree = FileTree::from_item(item);
    let view = flatten(&tree);

    if as_json {
        print_json(&json!({
            "name": item.name,
            "tree": tree,
            "flattened": view,
        }));
    } else {
        print!("{}", render_tree(&item.name, &view));
    }
    0
}

fn install(index: &RegistryIndex, name: &str, pm: Option<PackageManager>, as_json: bool) -> i32 {
    let Some((item, _)) = find_item(index, name) else {
        return not_found(name, as_json);
    };

    let commands = InstallCommands::for_item(&item.name);

    match pm {
        Some(pm) => {
            let command = pm.install_command(&item.name);
            if as_json {
                print_json(&json!({ "packageManager": pm, "command": command }));
            } else {
                println!("{}", command);
            }
        }
        None if as_json => print_json(&commands),
        None => {
            for c in &commands.commands {
                println!("{:<5} {}", c.package_manager, c.command);
            }
        }
    }
    0
}

fn validate(index: &RegistryIndex, as_json: bool) -> i32 {
    let result = RegistryValidator::new().validate_index(index);

    if as_json {
        print_json(&json!({
            "valid": result.is_valid,
            "errors": result.errors.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
            "warnings": result.warnings.iter().map(|w| w.to_string()).collect::<Vec<_>>(),
        }));
    } else {
        for error in &result.errors {
            println!("error   {}", error);
        }
        for warning in &result.warnings {
            println!("warning {}", warning);
        }
        println!("{}", result.summary());
    }

    if result.is_valid {
        0
    } else {
        1
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Error serializing output: {}", e),
    }
}
