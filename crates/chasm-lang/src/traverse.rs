//! Post-order walks over the AST.
//!
//! Every node's children are visited before the node itself. Children are visited in the order
//! their fields are declared, and sequences of children in sequence order.

use crate::parser::ast::*;

/// A borrowed reference to any node of the AST.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    Proc(&'a ProcDef),
    Stmt(&'a Stmt),
    Expr(&'a Expr),
}

impl<'a> Node<'a> {
    /// The direct children of this node, in field order.
    pub fn children(self) -> Vec<Node<'a>> {
        match self {
            Node::Proc(proc) => proc.body.iter().map(Node::Stmt).collect(),
            Node::Stmt(stmt) => match stmt {
                Stmt::Print(Print { expr }) => vec![Node::Expr(expr)],
                Stmt::VarDecl(VarDecl { init, .. }) => vec![Node::Expr(init)],
                Stmt::VarAssign(VarAssign { value, .. }) => vec![Node::Expr(value)],
                Stmt::While(While { condition, body }) => std::iter::once(Node::Expr(condition))
                    .chain(body.iter().map(Node::Stmt))
                    .collect(),
                Stmt::If(If {
                    condition,
                    consequent,
                    alternate,
                }) => std::iter::once(Node::Expr(condition))
                    .chain(consequent.iter().map(Node::Stmt))
                    .chain(alternate.iter().map(Node::Stmt))
                    .collect(),
                Stmt::Call(Call { args, .. }) => args.iter().map(Node::Expr).collect(),
            },
            Node::Expr(expr) => match expr {
                Expr::Number(_) | Expr::Ident(_) => vec![],
                Expr::Binary(Binary { left, right, .. }) => {
                    vec![Node::Expr(left), Node::Expr(right)]
                }
            },
        }
    }
}

impl<'a> From<&'a ProcDef> for Node<'a> {
    fn from(proc: &'a ProcDef) -> Self {
        Self::Proc(proc)
    }
}

impl<'a> From<&'a Stmt> for Node<'a> {
    fn from(stmt: &'a Stmt) -> Self {
        Self::Stmt(stmt)
    }
}

impl<'a> From<&'a Expr> for Node<'a> {
    fn from(expr: &'a Expr) -> Self {
        Self::Expr(expr)
    }
}

/// Walk `node` in post-order, calling `visit` on every node. The first error returned by
/// `visit` stops the walk.
pub fn traverse<'a, F, E>(node: impl Into<Node<'a>>, visit: &mut F) -> Result<(), E>
where
    F: FnMut(Node<'a>) -> Result<(), E>,
{
    let node = node.into();
    for child in node.children() {
        traverse(child, visit)?;
    }
    visit(node)
}

/// Walk each of `nodes` in post-order, one after the other.
pub fn traverse_all<'a, N, F, E>(nodes: &'a [N], visit: &mut F) -> Result<(), E>
where
    &'a N: Into<Node<'a>>,
    F: FnMut(Node<'a>) -> Result<(), E>,
{
    for node in nodes {
        traverse(node, visit)?;
    }
    Ok(())
}
