//! Integration test: discovery, configuration, and rule dispatch via Analyzer.
//!
//! Uses a line-based extractor over temporary fixture trees so the host
//! pipeline can be verified without a real grammar.

use interceptor_lint_core::{
    Analyzer, Config, DeclId, Declaration, DeclarationContext, DeclarationKind, ExtractError,
    LanguageExtractor, Reporter, Rule, Severity, Span, TokenStream,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// One declaration per `fn NAME` line; a line `!!` fails extraction and a
/// line `??` is a recoverable syntax error.
struct LineExtractor;

impl LanguageExtractor for LineExtractor {
    fn language_id(&self) -> &'static str {
        "lines"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["fn"]
    }

    fn extract(&self, source: &str) -> Result<TokenStream, ExtractError> {
        let mut stream = TokenStream::new();
        for (row, line) in source.lines().enumerate() {
            if line.trim() == "!!" {
                return Err(ExtractError::Parse { language: "lines" });
            }
            if line.trim() == "??" {
                stream.syntax_errors = true;
                continue;
            }
            if let Some(name) = line.strip_prefix("fn ") {
                let id = DeclId(stream.declarations.len());
                stream.declarations.push(Declaration {
                    id,
                    kind: DeclarationKind::Function,
                    name: Some(name.trim().to_string()),
                    parameters: Vec::new(),
                    body: None,
                    span: Span::new(row + 1, 1, 0, line.len()),
                });
            }
        }
        Ok(stream)
    }
}

/// Reports every function whose name starts with `bad`.
struct NoBadNames;

impl Rule for NoBadNames {
    fn name(&self) -> &'static str {
        "no-bad-names"
    }

    fn code(&self) -> &'static str {
        "BadName"
    }

    fn register(&self) -> &'static [DeclarationKind] {
        &[DeclarationKind::Function]
    }

    fn process(&self, ctx: &DeclarationContext<'_>, reporter: &mut dyn Reporter) {
        if let Some(name) = ctx.name().filter(|n| n.starts_with("bad")) {
            reporter.report(format!("{name} is bad"), ctx.location(), self.code());
        }
    }
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn fixture() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "src/a.fn", "fn good\nfn badOne\n");
    write(tmp.path(), "src/nested/b.fn", "fn badTwo\n");
    write(tmp.path(), "vendor/lib/c.fn", "fn badVendored\n");
    write(tmp.path(), "src/notes.txt", "fn badIgnoredExtension\n");
    tmp
}

fn analyze(root: &Path, config: Config) -> interceptor_lint_core::LintResult {
    Analyzer::builder()
        .root(root)
        .config(config)
        .extractor(LineExtractor)
        .rule(NoBadNames)
        .build()
        .expect("analyzer should build")
        .analyze()
        .expect("analysis should succeed")
}

#[test]
fn reports_sorted_violations_with_relative_paths() {
    let tmp = fixture();
    let result = analyze(tmp.path(), Config::default());

    assert_eq!(result.files_checked, 2);
    let found: Vec<(String, usize, &str)> = result
        .violations
        .iter()
        .map(|v| {
            (
                v.location.file.to_string_lossy().replace('\\', "/"),
                v.location.line,
                v.message.as_str(),
            )
        })
        .collect();
    assert_eq!(
        found,
        vec![
            ("src/a.fn".to_string(), 2, "badOne is bad"),
            ("src/nested/b.fn".to_string(), 1, "badTwo is bad"),
        ]
    );
    assert!(result.violations.iter().all(|v| v.code == "BadName"));
    assert!(result.has_errors());
}

#[test]
fn severity_override_and_extra_excludes_apply() {
    let tmp = fixture();
    let config = Config::parse(
        r#"
[analyzer]
exclude = ["**/vendor/**", "**/nested/**"]

[rules.no-bad-names]
severity = "warning"
"#,
    )
    .unwrap();

    let result = analyze(tmp.path(), config);

    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].severity, Severity::Warning);
    assert!(!result.has_errors());
}

#[test]
fn disabled_rule_produces_nothing() {
    let tmp = fixture();
    let config = Config::parse("[rules.no-bad-names]\nenabled = false\n").unwrap();

    let result = analyze(tmp.path(), config);

    assert!(result.violations.is_empty());
    assert_eq!(result.files_checked, 2);
}

#[test]
fn parse_failures_are_skipped_unless_fatal() {
    let tmp = fixture();
    write(tmp.path(), "src/broken.fn", "fn badBroken\n!!\n");

    let result = analyze(tmp.path(), Config::default());
    assert_eq!(result.files_checked, 2);

    let fatal = Analyzer::builder()
        .root(tmp.path())
        .extractor(LineExtractor)
        .rule(NoBadNames)
        .fail_on_parse_error(true)
        .build()
        .unwrap()
        .analyze();
    assert!(fatal.is_err());
}

#[test]
fn recovered_syntax_errors_still_report() {
    let tmp = fixture();
    write(tmp.path(), "src/recovered.fn", "fn badRecovered\n??\n");

    let result = analyze(tmp.path(), Config::default());

    assert_eq!(result.files_checked, 3);
    assert!(result
        .violations
        .iter()
        .any(|v| v.message == "badRecovered is bad"));
}

#[test]
fn single_file_root_keeps_file_name() {
    let tmp = fixture();
    let file = tmp.path().join("src/a.fn");

    let result = analyze(&file, Config::default());

    assert_eq!(result.files_checked, 1);
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].location.file, Path::new("a.fn"));
}
