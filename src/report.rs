//! Output formatting for purecheck results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};

use crate::detect::{AnalysisResult, Finding, Severity};

// =============================================================================
// JSON Format
// =============================================================================

/// JSON report structure.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    pub policy: String,
    pub passed: bool,
    pub assets_scanned: usize,
    pub graphs_analyzed: usize,
    pub errors: usize,
    pub warnings: usize,
    pub findings: Vec<JsonFinding>,
}

/// JSON finding structure.
#[derive(Serialize, Deserialize)]
pub struct JsonFinding {
    pub kind: String,
    pub severity: String,
    pub asset: String,
    pub graph: String,
    pub node: String,
    pub title: String,
    pub message: String,
}

/// Build the JSON report structure from an analysis result.
pub fn json_report(path: &str, policy_path: &str, result: &AnalysisResult) -> JsonReport {
    let findings: Vec<JsonFinding> = result.findings.iter().map(finding_to_json).collect();

    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        path: path.to_string(),
        policy: policy_path.to_string(),
        passed: !result.has_errors(),
        assets_scanned: result.assets,
        graphs_analyzed: result.graphs,
        errors: result.count_by_severity(Severity::Error),
        warnings: result.count_by_severity(Severity::Warning),
        findings,
    }
}

/// Write results in JSON format.
pub fn write_json(path: &str, policy_path: &str, result: &AnalysisResult) -> anyhow::Result<()> {
    let report = json_report(path, policy_path, result);
    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}

fn finding_to_json(f: &Finding) -> JsonFinding {
    JsonFinding {
        kind: f.kind.as_str().to_string(),
        severity: f.severity.to_string(),
        asset: f.asset.clone(),
        graph: f.graph.clone(),
        node: f.node.clone(),
        title: f.title.clone(),
        message: f.message.clone(),
    }
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in pretty (human-readable) format.
pub fn write_pretty(path: &str, policy_path: &str, result: &AnalysisResult) {
    // Header
    println!();
    print!("  ");
    print!("{}", "purecheck".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    // Scan info
    print!("  {}", "Scanning: ".dimmed());
    println!("{}", path);
    print!("  {}", "Policy:   ".dimmed());
    println!("{}", policy_path);
    println!();

    // Result summary
    write_result_summary(result);
    println!();

    // Findings
    if !result.findings.is_empty() {
        write_findings(&result.findings);
        println!();
    }

    // Final status line
    write_final_status(result);
    println!();
}

fn write_result_summary(result: &AnalysisResult) {
    if result.has_errors() {
        print!("  {}", "✗ FAIL".red());
    } else {
        print!("  {}", "✓ PASS".green());
    }

    print!(
        "  {} asset{}, {} graph{}",
        result.assets,
        plural(result.assets),
        result.graphs,
        plural(result.graphs)
    );

    let errors = result.count_by_severity(Severity::Error);
    let warnings = result.count_by_severity(Severity::Warning);
    if errors > 0 {
        print!("  {}", format!("{} error{}", errors, plural(errors)).red());
    }
    if warnings > 0 {
        print!(
            "  {}",
            format!("{} warning{}", warnings, plural(warnings)).yellow()
        );
    }

    println!();
}

fn plural(n: usize) -> &'static str {
    if n != 1 {
        "s"
    } else {
        ""
    }
}

fn write_findings(findings: &[Finding]) {
    println!("  {} ({}):", "Findings".bold(), findings.len());
    println!();

    for f in findings {
        write_severity_tag(&f.severity);
        print!("   ");
        print!("{:<18}", f.kind.as_str().dimmed());
        print!("{}", f.asset.blue());
        print!("{}", format!(":{}:{}", f.graph, f.node).dimmed());
        println!();

        // Message on next line, indented
        println!("            {}", f.message);
        println!();
    }
}

fn write_severity_tag(severity: &Severity) {
    match severity {
        Severity::Error => print!("    {} ", "ERROR".red()),
        Severity::Warning => print!("    {} ", "WARN ".yellow()),
    }
}

fn write_final_status(result: &AnalysisResult) {
    print!(
        "  {}",
        format!("Findings: {}", result.findings.len()).dimmed()
    );
    print!("  ");

    if result.has_errors() {
        print!("{}", "FAILED".red());
    } else {
        print!("{}", "PASSED".green());
    }
    println!();
}
