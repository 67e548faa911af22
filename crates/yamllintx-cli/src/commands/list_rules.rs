//! List rules command implementation.

use yamllintx_rules::{all_rules, Preset};

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<18} {:<10} Description", "Name", "Severity");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<18} {:<10} {}",
            rule.name(),
            rule.default_severity().to_string(),
            rule.description()
        );
    }

    println!("\nPresets:");
    for (name, preset) in [
        ("default", Preset::Default),
        ("relaxed", Preset::Relaxed),
        ("none", Preset::Off),
    ] {
        let rules = preset.rule_names();
        let listed = if rules.is_empty() {
            "(only rules configured under [rules.*])".to_string()
        } else {
            rules.join(", ")
        };
        println!("  {name:<9} - {listed}");
    }

    println!("\nUse --rules to run specific rules, e.g.:");
    println!("  yamllintx check --rules anchors,trailing-spaces");
}
