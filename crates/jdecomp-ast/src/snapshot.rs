//! Debug views of a subtree: a serializable snapshot and a compact
//! Java-like rendering.
//!
//! The rendering parenthesizes every compound operator expression so tests
//! can compare shapes without precedence rules: `(c ? a : b)`, `(l + r)`.

use crate::base::NodeIndex;
use crate::node::{NodeArena, NodeData, NodeKind, WildcardKind};
use crate::pattern::Pattern;
use crate::role::Role;
use crate::visitor::{AstVisitor, accept};
use serde::Serialize;
use std::fmt::Write;
use std::sync::Arc;

/// Serializable view of one node and its non-token descendants.
#[derive(Debug, Clone, Serialize)]
pub struct NodeSnapshot {
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

impl NodeSnapshot {
    pub fn capture(arena: &NodeArena, node: NodeIndex) -> Self {
        let children = arena
            .children(node)
            .into_iter()
            .filter(|child| arena.kind(*child) != NodeKind::Token)
            .map(|child| Self::capture(arena, child))
            .collect();
        Self {
            kind: arena.kind(node),
            role: arena.role(node).map(|role| role.name),
            text: payload_text(arena, node),
            children,
        }
    }
}

fn payload_text(arena: &NodeArena, node: NodeIndex) -> Option<String> {
    let text = match arena.data(node)? {
        NodeData::Primitive(value) => value.literal_text(),
        NodeData::Identifier { name }
        | NodeData::SimpleType { name }
        | NodeData::VariableDeclaration { name } => name.to_string(),
        NodeData::MemberReference { member_name } => member_name.to_string(),
        NodeData::Assignment { operator } => operator.token().to_string(),
        NodeData::BinaryOperator { operator } => operator.token().to_string(),
        NodeData::UnaryOperator { operator } => operator.token().to_string(),
        NodeData::WildcardType { kind } => format!("{kind:?}"),
        NodeData::ComposedType { array_rank } => "[]".repeat(*array_rank as usize),
        NodeData::Token { text } => text.to_string(),
        _ => return None,
    };
    Some(text)
}

/// Snapshot of a subtree as JSON.
pub fn to_json(arena: &NodeArena, node: NodeIndex) -> serde_json::Value {
    serde_json::to_value(NodeSnapshot::capture(arena, node)).unwrap_or(serde_json::Value::Null)
}

/// Compact source-like rendering of a subtree.
pub fn debug_string(arena: &NodeArena, node: NodeIndex) -> String {
    let mut printer = DebugPrinter {
        arena,
        out: String::new(),
    };
    accept(&mut printer, node, ());
    printer.out
}

struct DebugPrinter<'a> {
    arena: &'a NodeArena,
    out: String,
}

impl DebugPrinter<'_> {
    fn child(&self, node: NodeIndex, role: Role) -> NodeIndex {
        self.arena.child_by_role(node, role).unwrap_or(NodeIndex::NONE)
    }

    fn children(&self, node: NodeIndex, role: Role) -> Vec<NodeIndex> {
        self.arena
            .children_by_role(node, role)
            .map(<[NodeIndex]>::to_vec)
            .unwrap_or_default()
    }

    fn list(&mut self, items: &[NodeIndex], separator: &str) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.push_str(separator);
            }
            accept(self, *item, ());
        }
    }

    fn type_arguments(&mut self, node: NodeIndex) {
        let arguments = self.children(node, Role::TYPE_ARGUMENT);
        if !arguments.is_empty() {
            self.out.push('<');
            self.list(&arguments, ", ");
            self.out.push('>');
        }
    }

    fn name(&self, node: NodeIndex) -> &str {
        self.arena.name(node).unwrap_or("")
    }
}

impl AstVisitor for DebugPrinter<'_> {
    type Input = ();
    type Output = ();

    fn arena(&self) -> &NodeArena {
        self.arena
    }

    fn visit_null(&mut self, _input: ()) {}

    fn visit_pattern_placeholder(&mut self, _node: NodeIndex, _pattern: &Arc<Pattern>, _input: ()) {
        self.out.push_str("<pattern>");
    }

    fn visit_token(&mut self, node: NodeIndex, _input: ()) {
        let text = self.name(node).to_string();
        self.out.push_str(&text);
    }

    fn visit_primitive(&mut self, node: NodeIndex, _input: ()) {
        if let Some(value) = self.arena.primitive_value(node) {
            self.out.push_str(&value.literal_text());
        }
    }

    fn visit_null_reference(&mut self, _node: NodeIndex, _input: ()) {
        self.out.push_str("null");
    }

    fn visit_identifier(&mut self, node: NodeIndex, _input: ()) {
        let name = self.name(node).to_string();
        self.out.push_str(&name);
    }

    fn visit_this(&mut self, _node: NodeIndex, _input: ()) {
        self.out.push_str("this");
    }

    fn visit_member_reference(&mut self, node: NodeIndex, _input: ()) {
        let target = self.child(node, Role::TARGET_EXPRESSION);
        if target.is_some() {
            accept(self, target, ());
            self.out.push('.');
        }
        self.type_arguments(node);
        let name = self.name(node).to_string();
        self.out.push_str(&name);
    }

    fn visit_invocation(&mut self, node: NodeIndex, _input: ()) {
        let target = self.child(node, Role::TARGET_EXPRESSION);
        accept(self, target, ());
        self.out.push('(');
        let arguments = self.children(node, Role::ARGUMENT);
        self.list(&arguments, ", ");
        self.out.push(')');
    }

    fn visit_object_creation(&mut self, node: NodeIndex, _input: ()) {
        self.out.push_str("new ");
        let ty = self.child(node, Role::TYPE);
        accept(self, ty, ());
        self.out.push('(');
        let arguments = self.children(node, Role::ARGUMENT);
        self.list(&arguments, ", ");
        self.out.push(')');
    }

    fn visit_cast(&mut self, node: NodeIndex, _input: ()) {
        self.out.push('(');
        let ty = self.child(node, Role::TYPE);
        accept(self, ty, ());
        self.out.push_str(") ");
        let expression = self.child(node, Role::EXPRESSION);
        accept(self, expression, ());
    }

    fn visit_assignment(&mut self, node: NodeIndex, _input: ()) {
        let operator = self.arena.assignment_operator(node).map_or("=", |op| op.token());
        let left = self.child(node, Role::LEFT);
        accept(self, left, ());
        let _ = write!(self.out, " {operator} ");
        let right = self.child(node, Role::RIGHT);
        accept(self, right, ());
    }

    fn visit_conditional(&mut self, node: NodeIndex, _input: ()) {
        self.out.push('(');
        let condition = self.child(node, Role::CONDITION);
        accept(self, condition, ());
        self.out.push_str(" ? ");
        let when_true = self.child(node, Role::TRUE_EXPRESSION);
        accept(self, when_true, ());
        self.out.push_str(" : ");
        let when_false = self.child(node, Role::FALSE_EXPRESSION);
        accept(self, when_false, ());
        self.out.push(')');
    }

    fn visit_binary_operator(&mut self, node: NodeIndex, _input: ()) {
        let operator = self.arena.binary_operator(node).map_or("?", |op| op.token());
        self.out.push('(');
        let left = self.child(node, Role::LEFT);
        accept(self, left, ());
        let _ = write!(self.out, " {operator} ");
        let right = self.child(node, Role::RIGHT);
        accept(self, right, ());
        self.out.push(')');
    }

    fn visit_unary_operator(&mut self, node: NodeIndex, _input: ()) {
        let Some(operator) = self.arena.unary_operator(node) else {
            return;
        };
        let operand = self.child(node, Role::EXPRESSION);
        if operator.is_postfix() {
            accept(self, operand, ());
            self.out.push_str(operator.token());
        } else {
            self.out.push_str(operator.token());
            accept(self, operand, ());
        }
    }

    fn visit_simple_type(&mut self, node: NodeIndex, _input: ()) {
        let name = self.name(node).to_string();
        self.out.push_str(&name);
        self.type_arguments(node);
    }

    fn visit_wildcard_type(&mut self, node: NodeIndex, _input: ()) {
        self.out.push('?');
        let keyword = match self.arena.wildcard_kind(node) {
            Some(WildcardKind::Extends) => " extends ",
            Some(WildcardKind::Super) => " super ",
            _ => return,
        };
        self.out.push_str(keyword);
        let bound = self.child(node, Role::TYPE);
        accept(self, bound, ());
    }

    fn visit_composed_type(&mut self, node: NodeIndex, _input: ()) {
        let element = self.child(node, Role::TYPE);
        accept(self, element, ());
        let rank = self.arena.array_rank(node).unwrap_or(0);
        self.out.push_str(&"[]".repeat(rank as usize));
    }

    fn visit_block(&mut self, node: NodeIndex, _input: ()) {
        let statements = self.children(node, Role::STATEMENT);
        if statements.is_empty() {
            self.out.push_str("{}");
            return;
        }
        self.out.push_str("{ ");
        self.list(&statements, " ");
        self.out.push_str(" }");
    }

    fn visit_expression_statement(&mut self, node: NodeIndex, _input: ()) {
        let expression = self.child(node, Role::EXPRESSION);
        accept(self, expression, ());
        self.out.push(';');
    }

    fn visit_return_statement(&mut self, node: NodeIndex, _input: ()) {
        let expression = self.child(node, Role::EXPRESSION);
        if expression.is_none() {
            self.out.push_str("return;");
            return;
        }
        self.out.push_str("return ");
        accept(self, expression, ());
        self.out.push(';');
    }

    fn visit_variable_declaration(&mut self, node: NodeIndex, _input: ()) {
        let ty = self.child(node, Role::TYPE);
        accept(self, ty, ());
        let name = self.name(node).to_string();
        let _ = write!(self.out, " {name}");
        let initializer = self.child(node, Role::INITIALIZER);
        if initializer.is_some() {
            self.out.push_str(" = ");
            accept(self, initializer, ());
        }
        self.out.push(';');
    }
}

#[cfg(test)]
#[path = "../tests/snapshot_tests.rs"]
mod tests;
