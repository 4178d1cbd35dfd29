//! Rule traits for defining lint rules.

use crate::context::DeclarationContext;
use crate::source::{DeclarationKind, SourceFile};
use crate::types::{Location, Severity, Violation};

/// Sink for diagnostics produced by a rule.
///
/// Rules report through this trait and never own diagnostic storage.
/// Reporting is infallible and never interrupts the calling rule.
pub trait Reporter {
    /// Records one diagnostic.
    fn report(&mut self, message: String, location: Location, code: &'static str);
}

/// A per-declaration lint rule.
///
/// The host invokes [`Rule::process`] once for every declaration whose kind
/// is listed by [`Rule::register`].
///
/// # Example
///
/// ```ignore
/// use interceptor_lint_core::{DeclarationContext, DeclarationKind, Reporter, Rule};
///
/// pub struct NoEmptyNames;
///
/// impl Rule for NoEmptyNames {
///     fn name(&self) -> &'static str { "no-empty-names" }
///     fn code(&self) -> &'static str { "EmptyName" }
///     fn register(&self) -> &'static [DeclarationKind] { &[DeclarationKind::Function] }
///
///     fn process(&self, ctx: &DeclarationContext<'_>, reporter: &mut dyn Reporter) {
///         if ctx.name().is_some_and(str::is_empty) {
///             reporter.report("empty name".into(), ctx.location(), self.code());
///         }
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "plugin-method").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "PluginError").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Declaration kinds this rule wants to be invoked for.
    fn register(&self) -> &'static [DeclarationKind];

    /// Checks a single declaration, reporting any violations.
    fn process(&self, ctx: &DeclarationContext<'_>, reporter: &mut dyn Reporter);
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// [`Reporter`] that turns reports into [`Violation`]s for one rule.
#[derive(Debug)]
pub struct ViolationCollector {
    rule: &'static str,
    severity: Severity,
    violations: Vec<Violation>,
}

impl ViolationCollector {
    /// Creates a collector stamping violations with `rule` and `severity`.
    #[must_use]
    pub fn new(rule: &'static str, severity: Severity) -> Self {
        Self {
            rule,
            severity,
            violations: Vec::new(),
        }
    }

    /// Consumes the collector, returning the collected violations.
    #[must_use]
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

impl Reporter for ViolationCollector {
    fn report(&mut self, message: String, location: Location, code: &'static str) {
        self.violations.push(Violation::new(
            code,
            self.rule,
            self.severity,
            location,
            message,
        ));
    }
}

/// Runs `rule` over every registered declaration in `file`.
#[must_use]
pub fn check_file(rule: &dyn Rule, file: &SourceFile, severity: Severity) -> Vec<Violation> {
    let kinds = rule.register();
    let mut collector = ViolationCollector::new(rule.name(), severity);

    for declaration in &file.stream.declarations {
        if !kinds.contains(&declaration.kind) {
            continue;
        }
        let ctx = DeclarationContext::new(file, declaration);
        rule.process(&ctx, &mut collector);
    }

    collector.into_violations()
}
