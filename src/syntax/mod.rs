//! Typed subset of source syntax shared by all grammar frontends.
//!
//! Frontends lower a parser's concrete tree into exactly the node kinds the
//! extractor needs: type declarations, inheritance clauses, typed members,
//! and grouping nodes for everything in between. The closed enum replaces
//! runtime role-string dispatch with exhaustive matching.

/// One lowered source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    pub roots: Vec<SyntaxNode>,
}

impl SyntaxTree {
    pub fn new(roots: Vec<SyntaxNode>) -> Self {
        SyntaxTree { roots }
    }

    /// All declarations in the tree, in preorder encounter order,
    /// regardless of nesting depth.
    pub fn declarations(&self) -> Vec<&Declaration> {
        let mut found = Vec::new();
        for node in &self.roots {
            collect_declarations(node, &mut found);
        }
        found
    }
}

fn collect_declarations<'a>(node: &'a SyntaxNode, found: &mut Vec<&'a Declaration>) {
    match node {
        SyntaxNode::Declaration(decl) => {
            found.push(decl);
            for child in &decl.children {
                collect_declarations(child, found);
            }
        }
        SyntaxNode::Member(member) => {
            for child in &member.children {
                collect_declarations(child, found);
            }
        }
        SyntaxNode::Group(children) => {
            for child in children {
                collect_declarations(child, found);
            }
        }
        SyntaxNode::Inheritance(_) => {}
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNode {
    Declaration(Declaration),
    /// Supertype identifiers listed by a declaration's inheritance clause.
    Inheritance(Vec<String>),
    Member(Member),
    /// Structural node with no meaning of its own (class body, constructor
    /// parameter list, function body). Its position in the tree carries the
    /// nesting depth the extractor relies on.
    Group(Vec<SyntaxNode>),
}

/// A named type declaration (class, interface, object, enum).
/// `name == None` models anonymous constructs, which are never emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: Option<String>,
    pub children: Vec<SyntaxNode>,
}

impl Declaration {
    pub fn new(name: Option<String>, children: Vec<SyntaxNode>) -> Self {
        Declaration { name, children }
    }
}

/// A typed member declaration inside a type's body.
///
/// `type_name` is the outermost identifier of the declared type annotation
/// (a collection-of-X annotation yields the collection's own name), or
/// `None` when the annotation is absent or not a simple identifier.
/// `children` retains declarations nested inside the member's body so the
/// flattened enumeration still reaches them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub role: MemberRole,
    pub type_name: Option<String>,
    pub children: Vec<SyntaxNode>,
}

impl Member {
    pub fn new(role: MemberRole, type_name: Option<String>) -> Self {
        Member {
            role,
            type_name,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<SyntaxNode>) -> Self {
        self.children = children;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberRole {
    Property,
    Parameter,
    Function,
}
