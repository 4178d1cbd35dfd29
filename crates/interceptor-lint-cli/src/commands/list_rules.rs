//! List rules command implementation.

use interceptor_lint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!(
        "{:<12} {:<16} {:<18} Description",
        "Code", "Name", "Applies to"
    );
    println!("{}", "-".repeat(96));

    for rule in all_rules() {
        let kinds = rule
            .register()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{:<12} {:<16} {:<18} {}",
            rule.code(),
            rule.name(),
            kinds,
            rule.description()
        );
    }

    println!("\nSkip specific methods with --exclude-method, e.g.:");
    println!("  interceptor-lint check --exclude-method aroundDispatch");
}
