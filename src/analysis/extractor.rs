use crate::model::Analysis;
use crate::syntax::{Declaration, SyntaxNode, SyntaxTree};
use log::trace;
use std::collections::BTreeSet;

/// Walks a lowered syntax tree and emits one `Analysis` per named
/// declaration, in tree-encounter order. Anonymous declarations are
/// skipped, not reported as errors: a declaration without a name cannot be
/// a join key.
pub fn extract_declarations(tree: &SyntaxTree) -> Vec<Analysis> {
    tree.declarations()
        .into_iter()
        .filter_map(|decl| {
            let name = decl.name.as_ref()?;
            trace!("Extracting declaration: {}", name);
            Some(Analysis::new(
                name.clone(),
                extract_inherits(decl),
                extract_uses(decl),
            ))
        })
        .collect()
}

fn extract_inherits(decl: &Declaration) -> BTreeSet<String> {
    let mut inherits = BTreeSet::new();
    for child in &decl.children {
        if let SyntaxNode::Inheritance(supertypes) = child {
            inherits.extend(supertypes.iter().cloned());
        }
    }
    inherits
}

/// Depth-bounded composition scan: direct children of the declaration that
/// are nested declarations or groups are inspected one level deep for
/// typed members, and no further. Members of a doubly-nested inner
/// declaration are deliberately invisible to the outer entity.
fn extract_uses(decl: &Declaration) -> BTreeSet<String> {
    let mut uses = BTreeSet::new();
    for child in &decl.children {
        let grandchildren = match child {
            SyntaxNode::Declaration(nested) => &nested.children,
            SyntaxNode::Group(children) => children,
            _ => continue,
        };
        for node in grandchildren {
            if let SyntaxNode::Member(member) = node {
                if let Some(type_name) = &member.type_name {
                    uses.insert(type_name.clone());
                }
            }
        }
    }
    uses
}
