//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# yamllintx configuration

# Rule preset: "default" (all rules), "relaxed" or "none"
preset = "default"

# Lowest severity that makes `yamllintx check` exit non-zero
fail-on = "error"

# File names treated as YAML
yaml-files = ["*.yaml", "*.yml", ".yamllint"]

# Paths to skip, relative to the lint root
ignore = [
    "vendor/**",
]

# Respect .gitignore files
respect-gitignore = true

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.anchors]
forbid-undeclared-aliases = true
forbid-duplicated-anchors = false
forbid-unused-anchors = false

[rules.braces]
# forbid = "non-empty"  # "none", "all" or "non-empty"
min-spaces-inside = 0
max-spaces-inside = 0

[rules.brackets]
min-spaces-inside = 0
max-spaces-inside = 0

[rules.comments]
# severity = "warning"  # Override default severity
require-starting-space = true
ignore-shebangs = true

[rules.hyphens]
max-spaces-after = 1

[rules.octal]
forbid-implicit-octal = true
forbid-explicit-octal = true

# [rules.trailing-spaces]
# enabled = false
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("yamllintx.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created yamllintx.toml");
    println!("\nNext steps:");
    println!("  1. Edit yamllintx.toml to configure rules");
    println!("  2. Run: yamllintx check");

    Ok(())
}
