use std::path::Path;
use std::sync::Arc;

use tracing::warn;
use tree_sitter::{Node, Parser};

use crate::models::FunctionSignature;

/// A language-specific extractor of function signatures
///
/// Implementations must be side-effect free: one unparseable file degrades to
/// an empty result and must never abort the scan that dispatched it.
pub trait SourceAnalyzer: Send + Sync {
    /// Human-readable language name, used in logs
    fn language(&self) -> &'static str;

    /// File extensions (without the dot) this analyzer accepts
    fn extensions(&self) -> &'static [&'static str];

    /// Extracts function signatures from source text
    fn analyze(&self, source: &str) -> Vec<FunctionSignature>;
}

/// Maps file extensions to the analyzer responsible for them
#[derive(Clone)]
pub struct AnalyzerRegistry {
    analyzers: Vec<Arc<dyn SourceAnalyzer>>,
}

impl AnalyzerRegistry {
    /// Creates a registry with the given analyzers
    pub fn new(analyzers: Vec<Arc<dyn SourceAnalyzer>>) -> Self {
        Self { analyzers }
    }

    /// Returns the analyzer registered for the extension of `path`, if any
    pub fn for_path(&self, path: &Path) -> Option<Arc<dyn SourceAnalyzer>> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        self.analyzers
            .iter()
            .find(|a| a.extensions().contains(&ext.as_str()))
            .cloned()
    }
}

impl Default for AnalyzerRegistry {
    fn default() -> Self {
        Self::new(vec![Arc::new(PythonAnalyzer)])
    }
}

/// Reads and analyzes one source file, degrading every failure to an empty list
pub async fn analyze_file(analyzer: Arc<dyn SourceAnalyzer>, path: &Path) -> Vec<FunctionSignature> {
    let source = match tokio::fs::read_to_string(path).await {
        Ok(source) => source,
        Err(e) => {
            warn!("skipping unreadable {} file {}: {}", analyzer.language(), path.display(), e);
            return Vec::new();
        }
    };
    analyzer.analyze(&source)
}

/// Python function-signature extractor backed by tree-sitter
///
/// Walks the whole syntax tree, so nested and method definitions are captured
/// in tree order.
pub struct PythonAnalyzer;

impl SourceAnalyzer for PythonAnalyzer {
    fn language(&self) -> &'static str {
        "Python"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["py"]
    }

    fn analyze(&self, source: &str) -> Vec<FunctionSignature> {
        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&tree_sitter_python::LANGUAGE.into()) {
            warn!("failed to load Python grammar: {}", e);
            return Vec::new();
        }

        let Some(tree) = parser.parse(source, None) else {
            warn!("Python parse produced no tree");
            return Vec::new();
        };

        let mut functions = Vec::new();
        collect_functions(tree.root_node(), source.as_bytes(), &mut functions);
        functions
    }
}

fn collect_functions(node: Node, source: &[u8], out: &mut Vec<FunctionSignature>) {
    if node.kind() == "function_definition" {
        if let Some(signature) = extract_signature(node, source) {
            out.push(signature);
        }
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_functions(child, source, out);
    }
}

fn extract_signature(node: Node, source: &[u8]) -> Option<FunctionSignature> {
    let name = node
        .child_by_field_name("name")
        .and_then(|n| node_text(n, source))?;
    if name.is_empty() {
        return None;
    }

    let parameters = node
        .child_by_field_name("parameters")
        .map(|params| parameter_names(params, source))
        .unwrap_or_default();

    let return_type = node
        .child_by_field_name("return_type")
        .and_then(|n| node_text(n, source));

    let description = node
        .child_by_field_name("body")
        .and_then(|body| docstring(body, source))
        .unwrap_or_default();

    Some(FunctionSignature {
        name,
        description,
        parameters,
        return_type,
    })
}

fn parameter_names(params: Node, source: &[u8]) -> Vec<String> {
    let mut names = Vec::new();
    let mut cursor = params.walk();

    for child in params.named_children(&mut cursor) {
        let name = match child.kind() {
            "identifier" => node_text(child, source),
            "typed_parameter" | "list_splat_pattern" | "dictionary_splat_pattern" => {
                first_identifier(child, source)
            }
            "default_parameter" | "typed_default_parameter" => child
                .child_by_field_name("name")
                .and_then(|n| node_text(n, source)),
            // Bare "*" and "/" markers carry no name.
            _ => None,
        };
        if let Some(name) = name {
            names.push(name);
        }
    }
    names
}

fn first_identifier(node: Node, source: &[u8]) -> Option<String> {
    let mut cursor = node.walk();
    let result = node
        .named_children(&mut cursor)
        .find(|c| c.kind() == "identifier")
        .and_then(|c| node_text(c, source));
    result
}

/// Returns the docstring of a function body: the leading expression statement
/// when it is a bare string literal
fn docstring(body: Node, source: &[u8]) -> Option<String> {
    let first = body.named_child(0)?;
    if first.kind() != "expression_statement" {
        return None;
    }
    let string = first.named_child(0)?;
    if string.kind() != "string" {
        return None;
    }

    // Prefer the grammar's string_content node; fall back to trimming quotes.
    let mut cursor = string.walk();
    let content = string
        .children(&mut cursor)
        .find(|c| c.kind() == "string_content")
        .and_then(|c| node_text(c, source))
        .or_else(|| node_text(string, source).map(|raw| trim_quotes(&raw)))?;

    Some(content.trim().to_string())
}

fn trim_quotes(raw: &str) -> String {
    let raw = raw.trim();
    for delim in ["\"\"\"", "'''", "\"", "'"] {
        if raw.len() >= delim.len() * 2 && raw.starts_with(delim) && raw.ends_with(delim) {
            return raw[delim.len()..raw.len() - delim.len()].to_string();
        }
    }
    raw.to_string()
}

fn node_text(node: Node, source: &[u8]) -> Option<String> {
    node.utf8_text(source).ok().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn analyze(source: &str) -> Vec<FunctionSignature> {
        PythonAnalyzer.analyze(source)
    }

    #[test]
    fn test_extracts_name_params_and_return_type() {
        let functions = analyze("def add(a, b: int, c=1) -> int:\n    return a + b + c\n");

        assert_eq!(functions.len(), 1);
        assert_eq!(functions[0].name, "add");
        assert_eq!(functions[0].parameters, vec!["a", "b", "c"]);
        assert_eq!(functions[0].return_type.as_deref(), Some("int"));
        assert_eq!(functions[0].description, "");
    }

    #[test]
    fn test_extracts_docstring() {
        let source = "def greet(name):\n    \"\"\"Say hello.\"\"\"\n    print(name)\n";
        let functions = analyze(source);

        assert_eq!(functions.len(), 1);
        assert_eq!(functions[0].description, "Say hello.");
        assert_eq!(functions[0].return_type, None);
    }

    #[test]
    fn test_nested_functions_are_captured() {
        let source = "\
def outer():
    def inner(x):
        return x
    return inner

class Thing:
    def method(self, value):
        pass
";
        let names: Vec<_> = analyze(source).into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["outer", "inner", "method"]);
    }

    #[test]
    fn test_splat_parameters_keep_their_names() {
        let functions = analyze("def call(fn, *args, **kwargs):\n    pass\n");
        assert_eq!(functions[0].parameters, vec!["fn", "args", "kwargs"]);
    }

    #[test]
    fn test_broken_source_degrades_to_empty() {
        // tree-sitter is error tolerant, so feed it something with no defs.
        let functions = analyze("this is not ) python (((");
        assert!(functions.is_empty());
    }

    #[test]
    fn test_registry_matches_extension_case_insensitively() {
        let registry = AnalyzerRegistry::default();
        assert!(registry.for_path(Path::new("m.py")).is_some());
        assert!(registry.for_path(Path::new("M.PY")).is_some());
        assert!(registry.for_path(Path::new("m.rs")).is_none());
        assert!(registry.for_path(Path::new("noext")).is_none());
    }
}
