//! Command-line interface for purecheck.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::detect::{AnalysisResult, Runner};
use crate::graph::BlueprintAsset;
use crate::policy::{self, Policy};
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Default policy file names to search for.
const DEFAULT_POLICY_NAMES: &[&str] = &["purecheck.yaml", ".purecheck.yaml"];

/// File suffix that marks a graph asset.
const ASSET_SUFFIX: &str = ".blueprint.json";

/// Blueprint graph quality gate - detect pure nodes that evaluate more
/// than once.
///
/// Purecheck analyzes visual-scripting graph assets and reports pure
/// computation nodes whose output feeds more than one execution path (the
/// computation silently runs once per path), container outputs wired into
/// macro inputs, empty tick events, and blocking asset loads.
#[derive(Parser)]
#[command(name = "purecheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate graph assets against a policy
    #[command(visible_alias = "validate")]
    Check(CheckArgs),
    /// Create a new purecheck policy from a template
    Init(InitArgs),
}

/// Arguments for the check command.
#[derive(Parser)]
pub struct CheckArgs {
    /// Path to check (asset file or directory)
    pub path: PathBuf,

    /// Path to policy YAML file (default: auto-discover, else built-in defaults)
    #[arg(short, long)]
    pub policy: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "purecheck.yaml")]
    pub output: PathBuf,

    /// Template to use
    #[arg(short, long, default_value = "default")]
    pub template: String,

    /// List available templates
    #[arg(short, long)]
    pub list: bool,
}

/// Available policy templates.
struct Template {
    name: &'static str,
    description: &'static str,
    content: &'static str,
}

/// All available templates.
static TEMPLATES: &[Template] = &[
    Template {
        name: "default",
        description: "Everything enabled, findings are errors",
        content: include_str!("templates/default.yaml"),
    },
    Template {
        name: "warn-only",
        description: "Everything enabled, findings are warnings",
        content: include_str!("templates/warn-only.yaml"),
    },
];

/// Discover a policy file in the current directory.
fn discover_policy() -> Option<PathBuf> {
    DEFAULT_POLICY_NAMES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

/// Collect asset files to check under a directory, honoring policy
/// exclusions. Sorted so runs are deterministic.
fn collect_assets(root: &Path, policy: &Policy) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            // Skip hidden directories, but never the scan root itself.
            if e.depth() == 0 {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            !(e.file_type().is_dir() && name.starts_with('.'))
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if !name.ends_with(ASSET_SUFFIX) {
            continue;
        }
        if policy.is_path_excluded(path) {
            continue;
        }
        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

/// Run the check command.
pub fn run_check(args: &CheckArgs) -> anyhow::Result<i32> {
    // Validate format
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    // Resolve the policy: explicit flag, discovered file, or defaults. An
    // absent policy is not an error - the defaults exempt nothing.
    let (policy, policy_label) = match &args.policy {
        Some(p) => match Policy::parse_file(p) {
            Ok(policy) => (policy, p.to_string_lossy().to_string()),
            Err(e) => {
                eprintln!("Error parsing policy: {}", e);
                return Ok(EXIT_ERROR);
            }
        },
        None => match discover_policy() {
            Some(p) => match Policy::parse_file(&p) {
                Ok(policy) => (policy, p.to_string_lossy().to_string()),
                Err(e) => {
                    eprintln!("Error parsing policy: {}", e);
                    return Ok(EXIT_ERROR);
                }
            },
            None => (Policy::default(), "(built-in defaults)".to_string()),
        },
    };

    // Validate policy
    if let Err(e) = policy::validate(&policy) {
        eprintln!("Error: invalid policy: {}", e);
        return Ok(EXIT_ERROR);
    }

    // Check path exists
    let metadata = match std::fs::metadata(&args.path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    // Collect assets to check
    let files = if metadata.is_dir() {
        collect_assets(&args.path, &policy)?
    } else {
        vec![args.path.clone()]
    };

    if files.is_empty() {
        eprintln!("Warning: no graph assets to check");
        return Ok(EXIT_SUCCESS);
    }

    // Run validation per asset, skipping unreadable files with a warning.
    let runner = Runner::new(policy);
    let mut result = AnalysisResult::new();
    let mut load_errors = 0usize;

    for file in &files {
        match BlueprintAsset::load(file) {
            Ok(asset) => result.merge(runner.run(&asset)),
            Err(e) => {
                eprintln!("Warning: {}", e);
                load_errors += 1;
            }
        }
    }

    if load_errors == files.len() {
        eprintln!("Error: no asset could be loaded");
        return Ok(EXIT_ERROR);
    }

    // Output results
    let path_str = args.path.to_string_lossy().to_string();
    match args.format.as_str() {
        "json" => {
            report::write_json(&path_str, &policy_label, &result)?;
        }
        _ => {
            report::write_pretty(&path_str, &policy_label, &result);
        }
    }

    // Return appropriate exit code
    if result.has_errors() {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    // List mode
    if args.list {
        return list_templates();
    }

    // Find template
    let template = match TEMPLATES.iter().find(|t| t.name == args.template) {
        Some(t) => t,
        None => {
            eprintln!("Error: unknown template {:?}", args.template);
            eprintln!("Run 'purecheck init --list' to see available templates");
            return Ok(EXIT_ERROR);
        }
    };

    // Check if output already exists
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    // Create output directory if needed
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    // Write policy file
    if let Err(e) = std::fs::write(&args.output, template.content) {
        eprintln!("Error: failed to write policy: {}", e);
        return Ok(EXIT_ERROR);
    }

    // Success message
    println!(
        "Created {} from template '{}'",
        args.output.display(),
        template.name
    );
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to whitelist known-safe node types", args.output.display());
    println!(
        "  2. Run: purecheck check <assets dir> --policy {}",
        args.output.display()
    );

    Ok(EXIT_SUCCESS)
}

/// List available templates.
fn list_templates() -> anyhow::Result<i32> {
    println!("Available templates:");
    println!();

    for template in TEMPLATES {
        let name = if template.name == "default" {
            format!("{} (default)", template.name)
        } else {
            template.name.to_string()
        };
        println!("  {:<20} {}", name, template.description);
    }

    println!();
    println!("Usage:");
    println!("  purecheck init --template <name>");

    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn collect_assets_filters_and_sorts() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("Deprecated")).unwrap();
        std::fs::write(temp.path().join("b.blueprint.json"), "{}").unwrap();
        std::fs::write(temp.path().join("a.blueprint.json"), "{}").unwrap();
        std::fs::write(temp.path().join("notes.json"), "{}").unwrap();
        std::fs::write(
            temp.path().join("Deprecated/c.blueprint.json"),
            "{}",
        )
        .unwrap();

        let policy = Policy::parse_str("excluded_paths:\n  - \"**/Deprecated/**\"\n").unwrap();
        let files = collect_assets(temp.path(), &policy).unwrap();

        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.blueprint.json", "b.blueprint.json"]);
    }

    #[test]
    fn template_contents_parse_as_policies() {
        for template in TEMPLATES {
            let policy = Policy::parse_str(template.content)
                .unwrap_or_else(|e| panic!("template {}: {}", template.name, e));
            assert!(policy.multi_exec.enabled);
        }
    }
}
