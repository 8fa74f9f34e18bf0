use once_cell::sync::Lazy;
use regex::Regex;

use carver_syntax::{named_children, node_text, Language, Node};

/// Placeholder used when every name-extraction rule fails
pub(crate) const ANONYMOUS: &str = "<anonymous>";

/// Placeholder for markup elements without a tag name (`<>...</>`)
const NAMELESS_TAG: &str = "<fragment>";

/// Per-language node classification table
///
/// Answers the questions the splitter and merger ask: is this node a
/// chunkable unit, does entering it push a scope segment, is it an
/// import/export, what name does it contribute, and is a given text span
/// pure closing syntax. Adding a language means adding a table, not
/// touching the algorithms.
pub(crate) struct NodeClassifier {
    /// Node kinds eligible to become (part of) a chunk
    wanted_kinds: &'static [&'static str],
    /// Node kinds that push a segment onto the scope path
    scope_kinds: &'static [&'static str],
    /// Subset of scope kinds that yield a fragment but never a scope segment
    import_kinds: &'static [&'static str],
    extract_name: fn(Node<'_>, &str) -> Option<String>,
    /// Matches spans that are only whitespace plus trailing punctuation
    closing: &'static Lazy<Regex>,
}

impl NodeClassifier {
    pub fn is_wanted(&self, kind: &str) -> bool {
        self.wanted_kinds.contains(&kind)
    }

    pub fn is_scope(&self, kind: &str) -> bool {
        self.scope_kinds.contains(&kind)
    }

    pub fn is_import(&self, kind: &str) -> bool {
        self.import_kinds.contains(&kind)
    }

    /// Name the node contributes to its scope segment
    ///
    /// Exhausting every extraction rule is non-fatal: the node gets a fixed
    /// placeholder and chunking continues.
    pub fn name_of(&self, node: Node<'_>, source: &str) -> String {
        (self.extract_name)(node, source).unwrap_or_else(|| ANONYMOUS.to_string())
    }

    /// Whether a span is pure closing syntax for this language
    ///
    /// Exists only to decide gap placement in the merger, not to validate
    /// syntax.
    pub fn is_closing_syntax(&self, text: &str) -> bool {
        self.closing.is_match(text)
    }

    #[cfg(test)]
    fn check_import_kinds_are_scope_kinds(&self) {
        for kind in self.import_kinds {
            assert!(
                self.scope_kinds.contains(kind),
                "import kind {kind} missing from scope kinds"
            );
        }
    }
}

/// Look up the classifier table for a language
pub(crate) fn classifier_for(language: Language) -> &'static NodeClassifier {
    match language {
        Language::TypeScript | Language::Tsx | Language::JavaScript => &JS_TS,
        Language::Json => &JSON,
        Language::Rust => &RUST,
        Language::Python => &PYTHON,
    }
}

// ---------------------------------------------------------------------------
// JavaScript / TypeScript / TSX
// ---------------------------------------------------------------------------

static JS_TS_KINDS: &[&str] = &[
    "import_statement",
    "export_statement",
    "function_declaration",
    "generator_function_declaration",
    "function_expression",
    "generator_function",
    "arrow_function",
    "method_definition",
    "class_declaration",
    "abstract_class_declaration",
    "interface_declaration",
    "type_alias_declaration",
    "enum_declaration",
    "module",
    "internal_module",
    "lexical_declaration",
    "variable_declaration",
    "jsx_element",
    "jsx_self_closing_element",
    "jsx_fragment",
];

static JS_TS_IMPORT_KINDS: &[&str] = &["import_statement", "export_statement"];

static JS_TS_CLOSING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\s|[)\]};,>]|/>|</[A-Za-z_$][\w$.:-]*\s*>)*$").expect("Invalid regex")
});

static JS_TS: NodeClassifier = NodeClassifier {
    wanted_kinds: JS_TS_KINDS,
    scope_kinds: JS_TS_KINDS,
    import_kinds: JS_TS_IMPORT_KINDS,
    extract_name: js_ts_name,
    closing: &JS_TS_CLOSING,
};

fn js_ts_name(node: Node<'_>, source: &str) -> Option<String> {
    if let Some(name) = node.child_by_field_name("name") {
        return Some(node_text(name, source).to_string());
    }

    // const/let/var statements name through their first declarator
    if matches!(node.kind(), "lexical_declaration" | "variable_declaration") {
        let declarator = named_children(node)
            .into_iter()
            .find(|child| child.kind() == "variable_declarator")?;
        let name = declarator.child_by_field_name("name")?;
        return Some(node_text(name, source).to_string());
    }

    if let Some(name) = first_identifier_child(node, source) {
        return Some(name);
    }

    // Anonymous function expressions borrow the name they are bound to
    if matches!(
        node.kind(),
        "arrow_function" | "function_expression" | "generator_function"
    ) {
        if let Some(name) = binding_name(node, source) {
            return Some(name);
        }
    }

    // Markup elements name through their opening tag
    if node.kind() == "jsx_element" {
        let opening = named_children(node)
            .into_iter()
            .find(|child| child.kind() == "jsx_opening_element")?;
        return match opening.child_by_field_name("name") {
            Some(name) => Some(node_text(name, source).to_string()),
            None => Some(NAMELESS_TAG.to_string()),
        };
    }
    if node.kind() == "jsx_fragment" {
        return Some(NAMELESS_TAG.to_string());
    }

    None
}

/// Walk upward to the binding an anonymous function is assigned to:
/// a declarator's name (`const f = () => ...`) or an object-literal key
/// (`{ f: () => ... }`). The walk stops at the first statement boundary so
/// names from unrelated enclosing constructs never leak in.
fn binding_name(node: Node<'_>, source: &str) -> Option<String> {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        match ancestor.kind() {
            "variable_declarator" => {
                let name = ancestor.child_by_field_name("name")?;
                return Some(node_text(name, source).to_string());
            }
            "pair" => {
                let key = ancestor.child_by_field_name("key")?;
                return Some(strip_quotes(node_text(key, source)).to_string());
            }
            kind if is_statement_boundary(kind) => return None,
            _ => current = ancestor.parent(),
        }
    }
    None
}

fn is_statement_boundary(kind: &str) -> bool {
    kind.ends_with("statement")
        || kind.ends_with("declaration")
        || matches!(kind, "program" | "statement_block" | "class_body")
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

static JSON_KINDS: &[&str] = &[
    "object", "array", "pair", "string", "number", "true", "false", "null",
];

static JSON_SCOPE_KINDS: &[&str] = &["pair"];

static JSON_CLOSING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\s\]},]*$").expect("Invalid regex"));

static JSON: NodeClassifier = NodeClassifier {
    wanted_kinds: JSON_KINDS,
    scope_kinds: JSON_SCOPE_KINDS,
    import_kinds: &[],
    extract_name: json_name,
    closing: &JSON_CLOSING,
};

fn json_name(node: Node<'_>, source: &str) -> Option<String> {
    let key = node.child_by_field_name("key")?;
    Some(strip_quotes(node_text(key, source)).to_string())
}

// ---------------------------------------------------------------------------
// Rust
// ---------------------------------------------------------------------------

static RUST_KINDS: &[&str] = &[
    "use_declaration",
    "extern_crate_declaration",
    "function_item",
    "struct_item",
    "enum_item",
    "union_item",
    "impl_item",
    "trait_item",
    "mod_item",
    "const_item",
    "static_item",
    "type_item",
    "macro_definition",
    "foreign_mod_item",
];

static RUST_SCOPE_KINDS: &[&str] = &[
    "use_declaration",
    "extern_crate_declaration",
    "function_item",
    "struct_item",
    "enum_item",
    "union_item",
    "impl_item",
    "trait_item",
    "mod_item",
];

static RUST_IMPORT_KINDS: &[&str] = &["use_declaration", "extern_crate_declaration"];

static RUST_CLOSING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\s)\]};,>]*$").expect("Invalid regex"));

static RUST: NodeClassifier = NodeClassifier {
    wanted_kinds: RUST_KINDS,
    scope_kinds: RUST_SCOPE_KINDS,
    import_kinds: RUST_IMPORT_KINDS,
    extract_name: rust_name,
    closing: &RUST_CLOSING,
};

fn rust_name(node: Node<'_>, source: &str) -> Option<String> {
    if let Some(name) = node.child_by_field_name("name") {
        return Some(node_text(name, source).to_string());
    }

    // impl blocks name the type they implement
    if node.kind() == "impl_item" {
        let target = node.child_by_field_name("type")?;
        return Some(impl_target_name(target, source));
    }

    first_identifier_child(node, source)
}

/// Base type name of an impl target, unwrapping generics (`Stack<T>`) and
/// path qualifiers (`module::Stack`)
fn impl_target_name(node: Node<'_>, source: &str) -> String {
    match node.kind() {
        "generic_type" => {
            if let Some(inner) = node.child_by_field_name("type") {
                return impl_target_name(inner, source);
            }
        }
        "scoped_type_identifier" => {
            if let Some(inner) = node.child_by_field_name("name") {
                return impl_target_name(inner, source);
            }
        }
        _ => {}
    }
    node_text(node, source).to_string()
}

// ---------------------------------------------------------------------------
// Python
// ---------------------------------------------------------------------------

static PYTHON_KINDS: &[&str] = &[
    "import_statement",
    "import_from_statement",
    "future_import_statement",
    "function_definition",
    "class_definition",
    "decorated_definition",
];

static PYTHON_IMPORT_KINDS: &[&str] = &[
    "import_statement",
    "import_from_statement",
    "future_import_statement",
];

static PYTHON_CLOSING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\s)\]},]*$").expect("Invalid regex"));

static PYTHON: NodeClassifier = NodeClassifier {
    wanted_kinds: PYTHON_KINDS,
    scope_kinds: PYTHON_KINDS,
    import_kinds: PYTHON_IMPORT_KINDS,
    extract_name: python_name,
    closing: &PYTHON_CLOSING,
};

fn python_name(node: Node<'_>, source: &str) -> Option<String> {
    // Decorated definitions name through the definition they wrap
    if node.kind() == "decorated_definition" {
        let definition = node.child_by_field_name("definition")?;
        return python_name(definition, source);
    }

    if let Some(name) = node.child_by_field_name("name") {
        return Some(node_text(name, source).to_string());
    }

    first_identifier_child(node, source)
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

static IDENTIFIER_KINDS: &[&str] = &[
    "identifier",
    "type_identifier",
    "property_identifier",
    "field_identifier",
];

fn first_identifier_child(node: Node<'_>, source: &str) -> Option<String> {
    named_children(node)
        .into_iter()
        .find(|child| IDENTIFIER_KINDS.contains(&child.kind()))
        .map(|child| node_text(child, source).to_string())
}

fn strip_quotes(text: &str) -> &str {
    text.trim_matches(|c| c == '"' || c == '\'')
}
