//! Rule to validate interceptor (plugin) method declarations.
//!
//! # Rationale
//!
//! Methods in a plugin class intercept a target method by naming
//! convention: `before<Target>`, `around<Target>`, and `after<Target>`.
//! The framework calls them with a fixed shape, so a plugin method that
//! drops the subject or payload parameter, forgets the `$proceed`
//! continuation, or never hands back a value silently breaks the
//! intercepted call.
//!
//! # Checks
//!
//! | Kind   | At least two parameters | `callable $proceed` | Returns a value |
//! |--------|:-----------------------:|:-------------------:|:---------------:|
//! | before | yes                     |                     |                 |
//! | around | yes                     | yes                 | yes             |
//! | after  | yes                     |                     | yes             |
//!
//! Only files below a `Plugin` directory are checked.
//!
//! # Configuration
//!
//! - `exclude`: method names to skip entirely (default: none)

use interceptor_lint_core::{
    DeclarationContext, DeclarationKind, Reporter, Rule, RuleConfig, Severity,
};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Rule code for plugin-method.
pub const CODE: &str = "PluginError";

/// Rule name for plugin-method.
pub const NAME: &str = "plugin-method";

/// Directory marker a file path must contain to be checked.
pub const PLUGIN_DIRECTORY: &str = "/Plugin/";

/// Minimum number of parameters of any plugin method.
pub const MIN_PARAMETERS: usize = 2;

/// Exact parameter text an around method must declare.
pub const PROCEED_PARAMETER: &str = "callable $proceed";

/// Interception kind derived from a method name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    /// `before*`: runs ahead of the target method.
    Before,
    /// `around*`: wraps the target method and controls whether it runs.
    Around,
    /// `after*`: post-processes the target method's result.
    After,
    /// Not an interceptor method.
    NotAPlugin,
}

impl MethodKind {
    /// Recognized kinds in precedence order.
    const PLUGINS: [Self; 3] = [Self::Before, Self::Around, Self::After];

    /// Returns the name prefix for this kind.
    #[must_use]
    pub fn prefix(self) -> Option<&'static str> {
        match self {
            Self::Before => Some("before"),
            Self::Around => Some("around"),
            Self::After => Some("after"),
            Self::NotAPlugin => None,
        }
    }

    /// Whether the `callable $proceed` parameter is required.
    #[must_use]
    pub fn requires_proceed(self) -> bool {
        self == Self::Around
    }

    /// Whether the method must return a value.
    #[must_use]
    pub fn requires_return(self) -> bool {
        matches!(self, Self::Around | Self::After)
    }
}

/// Returns true if `path` lies inside a plugin directory.
///
/// A match anywhere in the path counts, including at its very start.
#[must_use]
pub fn is_plugin_path(path: &Path) -> bool {
    path.to_string_lossy()
        .replace('\\', "/")
        .contains(PLUGIN_DIRECTORY)
}

/// Classifies a declaration by its file path and name.
///
/// Matching is case-sensitive and the name must be strictly longer than the
/// prefix: a method called just `after` is not a plugin method.
#[must_use]
pub fn classify(path: &Path, name: &str, exclusions: &HashSet<String>) -> MethodKind {
    if !is_plugin_path(path) || exclusions.contains(name) {
        return MethodKind::NotAPlugin;
    }

    MethodKind::PLUGINS
        .into_iter()
        .find(|kind| {
            kind.prefix()
                .is_some_and(|p| name.len() > p.len() && name.starts_with(p))
        })
        .unwrap_or(MethodKind::NotAPlugin)
}

/// Validates interceptor method declarations.
#[derive(Debug, Clone, Default)]
pub struct PluginMethod {
    /// Method names that are never checked.
    pub exclude: HashSet<String>,
}

impl PluginMethod {
    /// Creates a new rule with an empty exclusion list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the rule from its `[rules.plugin-method]` section.
    #[must_use]
    pub fn from_config(config: Option<&RuleConfig>) -> Self {
        let exclude = config
            .map(|c| c.get_str_array("exclude"))
            .unwrap_or_default();
        Self::new().excludes(exclude)
    }

    /// Adds a method name to skip.
    #[must_use]
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.exclude.insert(name.into());
        self
    }

    /// Adds several method names to skip.
    #[must_use]
    pub fn excludes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(names.into_iter().map(Into::into));
        self
    }

    fn validate(
        ctx: &DeclarationContext<'_>,
        name: &str,
        kind: MethodKind,
        reporter: &mut dyn Reporter,
    ) {
        let parameters = &ctx.declaration.parameters;

        if parameters.len() < MIN_PARAMETERS {
            reporter.report(
                format!("Plugin {name} function should have at least two parameters."),
                ctx.location(),
                CODE,
            );
        }

        if kind.requires_proceed() && !parameters.iter().any(|p| p.raw_text == PROCEED_PARAMETER)
        {
            reporter.report(
                format!("Plugin {name} is an around function and must call a callable $proceed"),
                ctx.location(),
                CODE,
            );
        }

        if kind.requires_return() && !ctx.has_direct_return() {
            reporter.report(
                format!("Plugin {name} function must return value."),
                ctx.location(),
                CODE,
            );
        }
    }
}

impl Rule for PluginMethod {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Validates before/around/after plugin method signatures and returns"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn register(&self) -> &'static [DeclarationKind] {
        &[DeclarationKind::Function, DeclarationKind::Method]
    }

    fn process(&self, ctx: &DeclarationContext<'_>, reporter: &mut dyn Reporter) {
        let Some(name) = ctx.name() else {
            debug!("Skipping unnamed {}", ctx.declaration.kind);
            return;
        };

        let kind = classify(ctx.file_path(), name, &self.exclude);
        if kind == MethodKind::NotAPlugin {
            debug!("Skipping {} {}: not a plugin method", ctx.declaration.kind, name);
            return;
        }

        debug!("Checking {:?} plugin method {}", kind, name);
        Self::validate(ctx, name, kind, reporter);
    }
}
