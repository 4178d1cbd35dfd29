//! PHP language extractor using Tree-sitter.

use interceptor_lint_core::{
    DeclId, Declaration, DeclarationKind, ExtractError, LanguageExtractor, Parameter, Span, Token,
    TokenKind, TokenRange, TokenStream,
};
use tracing::debug;
use tree_sitter::{Language, Node, Parser};

const LANGUAGE_ID: &str = "php";

/// Extracts declarations and `return` tokens from PHP source.
pub struct PhpExtractor {
    language: Language,
}

impl PhpExtractor {
    /// Creates a new PHP extractor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_php::LANGUAGE_PHP.into(),
        }
    }
}

impl Default for PhpExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageExtractor for PhpExtractor {
    fn language_id(&self) -> &'static str {
        LANGUAGE_ID
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["php", "phtml"]
    }

    fn extract(&self, source: &str) -> Result<TokenStream, ExtractError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ExtractError::Language {
                language: LANGUAGE_ID,
                message: e.to_string(),
            })?;

        let tree = parser
            .parse(source, None)
            .ok_or(ExtractError::Parse {
                language: LANGUAGE_ID,
            })?;
        let root = tree.root_node();

        let mut walker = Walker {
            src: source.as_bytes(),
            stream: TokenStream::new(),
            owners: Vec::new(),
        };
        walker.walk(root);
        walker.stream.syntax_errors = root.has_error();

        debug!(
            "Extracted {} declarations and {} tokens",
            walker.stream.declarations.len(),
            walker.stream.tokens.len()
        );
        Ok(walker.stream)
    }
}

/// Depth-first walk that records tokens in source order.
struct Walker<'s> {
    src: &'s [u8],
    stream: TokenStream,
    /// Stack of enclosing declarations, innermost last.
    owners: Vec<DeclId>,
}

impl Walker<'_> {
    fn walk(&mut self, node: Node<'_>) {
        match node.kind() {
            "function_definition" => self.declaration(node, DeclarationKind::Function),
            "method_declaration" => self.declaration(node, DeclarationKind::Method),
            "anonymous_function" | "anonymous_function_creation_expression" | "arrow_function" => {
                self.declaration(node, DeclarationKind::Closure);
            }
            "return_statement" => {
                self.push_token(TokenKind::Return, span_of(&node));
                self.walk_children(node);
            }
            _ => self.walk_children(node),
        }
    }

    fn walk_children(&mut self, node: Node<'_>) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.walk(child);
        }
    }

    fn declaration(&mut self, node: Node<'_>, kind: DeclarationKind) {
        let id = DeclId(self.stream.declarations.len());
        let span = span_of(&keyword(&node).unwrap_or(node));

        let token_kind = match kind {
            DeclarationKind::Closure => TokenKind::Closure,
            DeclarationKind::Function | DeclarationKind::Method => TokenKind::Function,
        };
        self.push_token(token_kind, span);

        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(&n).to_owned());
        let parameters = node
            .child_by_field_name("parameters")
            .map(|p| self.parameters(&p))
            .unwrap_or_default();

        self.stream.declarations.push(Declaration {
            id,
            kind,
            name,
            parameters,
            body: None,
            span,
        });

        if let Some(body) = node.child_by_field_name("body") {
            self.owners.push(id);
            let start = self.stream.tokens.len();
            self.walk(body);
            let end = self.stream.tokens.len();
            self.owners.pop();
            self.stream.declarations[id.0].body = Some(TokenRange::new(start, end));
        }
    }

    fn parameters(&self, node: &Node<'_>) -> Vec<Parameter> {
        let mut cursor = node.walk();
        let parameters = node
            .named_children(&mut cursor)
            .filter(|child| child.kind().ends_with("parameter"))
            .map(|child| Parameter::new(self.text(&child), span_of(&child)))
            .collect();
        parameters
    }

    fn push_token(&mut self, kind: TokenKind, span: Span) {
        self.stream.tokens.push(Token {
            kind,
            span,
            owner: self.owners.last().copied(),
        });
    }

    fn text(&self, node: &Node<'_>) -> &str {
        node.utf8_text(self.src).unwrap_or("")
    }
}

/// Finds the `function`/`fn` keyword of a declaration node.
fn keyword<'t>(node: &Node<'t>) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .find(|child| matches!(child.kind(), "function" | "fn"));
    found
}

fn span_of(node: &Node<'_>) -> Span {
    let start = node.start_position();
    Span::new(
        start.row + 1,
        start.column + 1,
        node.start_byte(),
        node.end_byte() - node.start_byte(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(src: &str) -> TokenStream {
        PhpExtractor::new().extract(src).expect("php should parse")
    }

    fn by_name<'a>(stream: &'a TokenStream, name: &str) -> &'a Declaration {
        stream
            .declarations
            .iter()
            .find(|d| d.name.as_deref() == Some(name))
            .unwrap_or_else(|| panic!("no declaration named {name}"))
    }

    const PLUGIN: &str = r#"<?php
namespace Vendor\Module\Plugin;

class ProductPlugin
{
    public function afterLoad($subject, $result)
    {
        return $result;
    }

    public function aroundSave(\Magento\Catalog\Model\Product $subject, callable $proceed, ...$args)
    {
        $log = function ($value) {
            return $value;
        };
        $log(1);
    }
}
"#;

    #[test]
    fn extracts_methods_with_raw_parameters() {
        let stream = extract(PLUGIN);

        let after = by_name(&stream, "afterLoad");
        assert_eq!(after.kind, DeclarationKind::Method);
        let raw: Vec<&str> = after.parameters.iter().map(|p| p.raw_text.as_str()).collect();
        assert_eq!(raw, vec!["$subject", "$result"]);

        let around = by_name(&stream, "aroundSave");
        let raw: Vec<&str> = around.parameters.iter().map(|p| p.raw_text.as_str()).collect();
        assert_eq!(
            raw,
            vec![
                "\\Magento\\Catalog\\Model\\Product $subject",
                "callable $proceed",
                "...$args"
            ]
        );
    }

    #[test]
    fn span_points_at_function_keyword() {
        let stream = extract(PLUGIN);
        let after = by_name(&stream, "afterLoad");
        assert_eq!((after.span.line, after.span.column), (6, 12));
        assert_eq!(after.span.length, "function".len());
        assert_eq!(
            &PLUGIN[after.span.offset..after.span.offset + after.span.length],
            "function"
        );
    }

    #[test]
    fn return_ownership_respects_nesting() {
        let stream = extract(PLUGIN);

        assert!(stream.has_direct_return(by_name(&stream, "afterLoad")));
        assert!(!stream.has_direct_return(by_name(&stream, "aroundSave")));

        let closure = stream
            .declarations
            .iter()
            .find(|d| d.kind == DeclarationKind::Closure)
            .expect("closure should be extracted");
        assert!(closure.name.is_none());
        assert!(stream.has_direct_return(closure));
    }

    #[test]
    fn declarations_are_indexed_by_id() {
        let stream = extract(PLUGIN);
        for (i, decl) in stream.declarations.iter().enumerate() {
            assert_eq!(decl.id, DeclId(i));
        }
    }

    #[test]
    fn abstract_and_interface_methods_have_no_body() {
        let stream = extract(
            r#"<?php
interface PluginInterface
{
    public function afterGet($subject, $result);
}

abstract class Base
{
    abstract protected function beforeRun($subject, $input);
}
"#,
        );

        assert_eq!(stream.declarations.len(), 2);
        assert!(stream.declarations.iter().all(|d| d.body.is_none()));
        assert!(!stream.has_direct_return(by_name(&stream, "afterGet")));
    }

    #[test]
    fn free_functions_and_arrow_functions() {
        let stream = extract(
            r#"<?php
function afterHelper($a, $b)
{
    $double = fn($x) => $x * 2;
    return $double($a);
}
"#,
        );

        let helper = by_name(&stream, "afterHelper");
        assert_eq!(helper.kind, DeclarationKind::Function);
        assert!(stream.has_direct_return(helper));

        let arrow = stream
            .declarations
            .iter()
            .find(|d| d.kind == DeclarationKind::Closure)
            .expect("arrow function should be extracted");
        assert_eq!(arrow.parameters.len(), 1);
        assert_eq!(arrow.parameters[0].raw_text, "$x");
    }

    #[test]
    fn return_inside_control_flow_is_direct() {
        let stream = extract(
            r#"<?php
class P
{
    public function afterFind($subject, $result)
    {
        if ($result === null) {
            return [];
        }
        foreach ($result as $item) {
            $item->touch();
        }
    }
}
"#,
        );

        assert!(stream.has_direct_return(by_name(&stream, "afterFind")));
    }

    #[test]
    fn syntax_errors_are_flagged() {
        let stream = extract(
            r#"<?php
class P
{
    public function afterBroken($a, $b)
    {
        return $a + ;
    }
}
"#,
        );
        assert!(stream.syntax_errors);
        assert!(!extract(PLUGIN).syntax_errors);
    }

    #[test]
    fn empty_source() {
        let stream = extract("");
        assert!(stream.tokens.is_empty());
        assert!(stream.declarations.is_empty());
    }
}
