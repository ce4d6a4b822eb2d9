use crate::parsers::GrammarFrontend;
use crate::syntax::{Declaration, Member, MemberRole, SyntaxNode, SyntaxTree};
use log::warn;
use tree_sitter::{Node, Parser};

// CST kinds that introduce a named type.
const DECLARATION_KINDS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "object_declaration",
    "enum_declaration",
    "companion_object",
];

/// Kotlin grammar frontend: parses with tree-sitter and lowers the
/// concrete tree into the typed syntax subset.
///
/// tree-sitter recovers from localized syntax errors, so a partially
/// malformed file still yields whatever declarations were reconstructed;
/// a file that parses to nothing recognizable lowers to an empty tree.
pub struct KotlinFrontend;

impl KotlinFrontend {
    pub fn new() -> Self {
        KotlinFrontend
    }
}

impl GrammarFrontend for KotlinFrontend {
    fn parse(&self, content: &str) -> Option<SyntaxTree> {
        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&tree_sitter_kotlin_ng::LANGUAGE.into()) {
            warn!("Failed to load Kotlin grammar: {}", e);
            return None;
        }
        let tree = parser.parse(content.as_bytes(), None)?;
        Some(SyntaxTree::new(lower_children(tree.root_node(), content)))
    }
}

fn lower_children(node: Node, source: &str) -> Vec<SyntaxNode> {
    let mut lowered = Vec::new();
    for i in 0..node.named_child_count() {
        if let Some(child) = node.named_child(i) {
            if let Some(syntax) = lower_node(child, source) {
                lowered.push(syntax);
            }
        }
    }
    lowered
}

fn lower_node(node: Node, source: &str) -> Option<SyntaxNode> {
    match node.kind() {
        kind if DECLARATION_KINDS.contains(&kind) => Some(lower_declaration(node, source)),
        "delegation_specifiers" | "delegation_specifier" => {
            Some(SyntaxNode::Inheritance(supertype_names(node, source)))
        }
        "property_declaration" => Some(SyntaxNode::Member(
            Member::new(MemberRole::Property, property_type(node, source))
                .with_children(lower_children(node, source)),
        )),
        "class_parameter" | "parameter" => Some(SyntaxNode::Member(Member::new(
            MemberRole::Parameter,
            annotated_type(node, source),
        ))),
        "function_declaration" => Some(SyntaxNode::Member(
            Member::new(MemberRole::Function, annotated_type(node, source))
                .with_children(lower_children(node, source)),
        )),
        // Constructor parameters sit one wrapper deeper in the CST; the
        // wrapper is flattened so the members land directly in the group,
        // at the same depth as class body members.
        "primary_constructor" => Some(SyntaxNode::Group(constructor_parameters(node, source))),
        "class_body" | "enum_class_body" => Some(SyntaxNode::Group(lower_children(node, source))),
        _ => {
            let children = lower_children(node, source);
            if children.is_empty() {
                None
            } else {
                Some(SyntaxNode::Group(children))
            }
        }
    }
}

fn lower_declaration(node: Node, source: &str) -> SyntaxNode {
    let name = child_of_kind(node, "identifier").map(|n| node_text(n, source));
    SyntaxNode::Declaration(Declaration::new(name, lower_children(node, source)))
}

// One supertype name per delegation specifier: the outermost user type's
// identifier, whether the specifier is a bare type or a constructor
// invocation. Generic arguments are not unwrapped.
fn supertype_names(node: Node, source: &str) -> Vec<String> {
    if node.kind() == "delegation_specifier" {
        return specifier_name(node, source).into_iter().collect();
    }

    let mut names = Vec::new();
    for i in 0..node.named_child_count() {
        if let Some(child) = node.named_child(i) {
            if child.kind() == "delegation_specifier" {
                names.extend(specifier_name(child, source));
            }
        }
    }
    names
}

fn specifier_name(specifier: Node, source: &str) -> Option<String> {
    let user_type = find_descendant(specifier, "user_type")?;
    child_of_kind(user_type, "identifier").map(|n| node_text(n, source))
}

fn property_type(node: Node, source: &str) -> Option<String> {
    let variable = child_of_kind(node, "variable_declaration")?;
    annotated_type(variable, source)
}

// The declared type annotation among a node's direct children, resolved to
// its outermost identifier: a collection-of-X annotation yields the
// collection's own name, and anything that is not a simple user type
// (function types, absent annotations) yields None. For functions this
// only ever sees the return type; parameter types live one wrapper deeper.
fn annotated_type(node: Node, source: &str) -> Option<String> {
    for i in 0..node.named_child_count() {
        if let Some(child) = node.named_child(i) {
            let resolved = match child.kind() {
                "user_type" => child_of_kind(child, "identifier"),
                "nullable_type" => {
                    child_of_kind(child, "user_type").and_then(|t| child_of_kind(t, "identifier"))
                }
                _ => None,
            };
            if let Some(identifier) = resolved {
                return Some(node_text(identifier, source));
            }
        }
    }
    None
}

fn constructor_parameters(node: Node, source: &str) -> Vec<SyntaxNode> {
    let mut parameters = Vec::new();
    collect_class_parameters(node, source, &mut parameters);
    parameters
}

fn collect_class_parameters(node: Node, source: &str, parameters: &mut Vec<SyntaxNode>) {
    for i in 0..node.named_child_count() {
        if let Some(child) = node.named_child(i) {
            if child.kind() == "class_parameter" {
                parameters.push(SyntaxNode::Member(Member::new(
                    MemberRole::Parameter,
                    annotated_type(child, source),
                )));
            } else {
                collect_class_parameters(child, source, parameters);
            }
        }
    }
}

fn child_of_kind<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    for i in 0..node.named_child_count() {
        if let Some(child) = node.named_child(i) {
            if child.kind() == kind {
                return Some(child);
            }
        }
    }
    None
}

fn find_descendant<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    for i in 0..node.named_child_count() {
        if let Some(child) = node.named_child(i) {
            if child.kind() == kind {
                return Some(child);
            }
            if let Some(found) = find_descendant(child, kind) {
                return Some(found);
            }
        }
    }
    None
}

fn node_text(node: Node, source: &str) -> String {
    let start_byte = node.start_byte();
    let end_byte = node.end_byte();

    if start_byte >= source.len() || end_byte > source.len() {
        return String::new();
    }

    source[start_byte..end_byte].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::extractor::extract_declarations;
    use crate::model::Analysis;
    use std::collections::BTreeSet;

    fn analyze(source: &str) -> Vec<Analysis> {
        let tree = KotlinFrontend::new()
            .parse(source)
            .expect("Kotlin frontend should produce a tree");
        extract_declarations(&tree)
    }

    fn names(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn class_with_supertype_and_constructor_parameter() {
        let analyses = analyze(
            r#"
            package org.jay.sample.computing

            class Gamma(val extraCapacity: Int) : ProcessorCategory()
            "#,
        );

        assert_eq!(analyses.len(), 1);
        assert_eq!(analyses[0].name, "Gamma");
        assert_eq!(analyses[0].inherits, names(&["ProcessorCategory"]));
        assert_eq!(analyses[0].uses, names(&["Int"]));
    }

    #[test]
    fn properties_and_return_types_feed_the_usage_set() {
        let analyses = analyze(
            r#"
            class ProcessorDelay(delayFactor: Int, private val packaging: String) :
                Processor(delayFactor), Chip {

                private var rando: Random = Random.Default
                val temp: Float? = null

                fun startProcessing(category: ProcessorCategory): Int {
                    return delayFactor
                }
            }
            "#,
        );

        assert_eq!(analyses.len(), 1);
        let delay = &analyses[0];
        assert_eq!(delay.name, "ProcessorDelay");
        assert_eq!(delay.inherits, names(&["Chip", "Processor"]));
        // Function parameter types sit a level too deep and are not
        // captured; the return type is.
        assert_eq!(delay.uses, names(&["Float", "Int", "Random", "String"]));
    }

    #[test]
    fn interface_members_are_extracted() {
        let analyses = analyze(
            r#"
            internal interface IProcessorDelay<T> {
                fun processData(data: T): Any?
                fun emptyParamFuncName()
            }
            "#,
        );

        assert_eq!(analyses.len(), 1);
        assert_eq!(analyses[0].name, "IProcessorDelay");
        assert_eq!(analyses[0].inherits, names(&[]));
        assert_eq!(analyses[0].uses, names(&["Any"]));
    }

    #[test]
    fn object_declarations_are_type_declarations() {
        let analyses = analyze(
            r#"
            sealed class FormFactor

            object SimpleForm : FormFactor()
            "#,
        );

        let extracted: Vec<&str> = analyses.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(extracted, vec!["FormFactor", "SimpleForm"]);
        assert_eq!(analyses[1].inherits, names(&["FormFactor"]));
    }

    #[test]
    fn generic_arguments_are_not_unwrapped() {
        let analyses = analyze(
            r#"
            class Inventory {
                val items: List<Int> = listOf()
            }
            "#,
        );

        assert_eq!(analyses[0].uses, names(&["List"]));
    }

    #[test]
    fn data_class_parameters_are_captured() {
        let analyses = analyze(
            r#"
            private data class Input(
                val sourcePath: String,
                val destinationPath: String,
            )
            "#,
        );

        assert_eq!(analyses.len(), 1);
        assert_eq!(analyses[0].name, "Input");
        assert_eq!(analyses[0].uses, names(&["String"]));
    }

    #[test]
    fn nested_class_members_stay_with_the_inner_entity() {
        let analyses = analyze(
            r#"
            class Outer {
                val id: Long = 0

                class Inner {
                    val secret: Token = Token()
                }
            }
            "#,
        );

        let extracted: Vec<&str> = analyses.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(extracted, vec!["Outer", "Inner"]);
        assert_eq!(analyses[0].uses, names(&["Long"]));
        assert_eq!(analyses[1].uses, names(&["Token"]));
    }

    #[test]
    fn unparseable_source_yields_no_declarations() {
        let analyses = analyze("}}}} %%% not kotlin at all ((((");
        assert!(analyses.is_empty());
    }

    #[test]
    fn unannotated_members_contribute_nothing() {
        let analyses = analyze(
            r#"
            class Quiet {
                val inferred = 42
                fun fireAndForget() {}
            }
            "#,
        );

        assert_eq!(analyses[0].uses, names(&[]));
    }
}
