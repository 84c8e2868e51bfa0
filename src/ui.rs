use colored::Colorize;
use placement::{ErrorCategory, GroupNames, Outcome, PlacementGroup};
use serde::Serialize;

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", "ℹ".blue(), msg);
}

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a dim/muted message
pub fn dim(msg: &str) {
    println!("  {}", msg.dimmed());
}

/// Print a header/title
pub fn header(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(title.chars().count()).dimmed());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", key.dimmed(), value);
}

// ============================================================================
// Results
// ============================================================================

/// Failure payload, mirroring the success payload's `msg` field
#[derive(Debug, Serialize)]
pub struct Failure<'a> {
    pub failed: bool,
    pub msg: &'a str,
}

/// Print a reconciliation outcome as text
pub fn outcome(outcome: &Outcome, verbose: bool) {
    if matches!(outcome.name, GroupNames::Many(_)) {
        header(&outcome.msg);
        if outcome.groups.is_empty() {
            dim("(none)");
        }
        for group in &outcome.groups {
            group_line(group, verbose);
        }
        return;
    }

    if outcome.changed {
        success(&outcome.msg);
    } else {
        info(&outcome.msg);
    }
    if verbose {
        kv("strategy", outcome.strategy.as_str());
    }
}

fn group_line(group: &PlacementGroup, verbose: bool) {
    if !verbose {
        println!("  {}", group.name);
        return;
    }
    let details: Vec<&str> = [group.strategy.as_deref(), group.state.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if details.is_empty() {
        println!("  {}", group.name);
    } else {
        println!("  {} {}", group.name, format!("({})", details.join(", ")).dimmed());
    }
}

/// Print a failure as text, with advice when the category is known
pub fn failure(msg: &str, category: Option<ErrorCategory>) {
    error(msg);
    if let Some(category) = category {
        eprintln!("  {}", category.advice().dimmed());
    }
}

/// Print any serializable value as pretty JSON on stdout
pub fn json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
