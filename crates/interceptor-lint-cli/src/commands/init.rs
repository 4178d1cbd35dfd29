//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_FILE_NAME: &str = "interceptor-lint.toml";

const DEFAULT_CONFIG: &str = r#"# interceptor-lint configuration

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./app/code"

# Glob patterns to exclude from analysis
exclude = [
    "**/vendor/**",
    "**/generated/**",
]

# Respect .gitignore files
respect_gitignore = true

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.plugin-method]
enabled = true
# severity = "warning"  # Override default severity

# Plugin method names that are never checked
exclude = []
"#;

/// Runs the init command, writing the config file into `dir`.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created {CONFIG_FILE_NAME}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE_NAME} to configure rules");
    println!("  2. Run: interceptor-lint check");

    Ok(())
}
