//! NodeArena creation methods (add_* methods).
//!
//! Builders allocate a node, then attach the given children under the
//! kind's roles. Punctuation tokens (`(`, `)`, `new`, `.`) are created and
//! attached automatically. Passing `NodeIndex::NONE` for a single-valued
//! child leaves that role empty.

use crate::base::NodeIndex;
use crate::error::StructuralError;
use crate::node::{
    AssignmentOperatorType, BinaryOperatorType, Node, NodeArena, NodeData, PrimitiveValue,
    UnaryOperatorType, WildcardKind,
};
use crate::pattern::Pattern;
use crate::role::Role;
use std::sync::Arc;

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Allocate a detached node.
    pub fn add_node(&mut self, data: NodeData) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(Node::new(data));
        index
    }

    fn add_with_children(
        &mut self,
        data: NodeData,
        children: &[(Role, NodeIndex)],
    ) -> Result<NodeIndex, StructuralError> {
        let parent = self.add_node(data);
        for &(role, child) in children {
            self.add_child(parent, role, child)?;
        }
        Ok(parent)
    }

    fn add_role_tokens(&mut self, parent: NodeIndex, roles: &[Role]) -> Result<(), StructuralError> {
        for role in roles {
            if let Some(text) = role.token_text() {
                let token = self.add_token(text);
                self.add_child(parent, *role, token)?;
            }
        }
        Ok(())
    }

    // =========================================================================
    // Leaves
    // =========================================================================

    pub fn add_primitive(&mut self, value: PrimitiveValue) -> NodeIndex {
        self.add_node(NodeData::Primitive(value))
    }

    /// The `null` literal.
    pub fn add_null_reference(&mut self) -> NodeIndex {
        self.add_node(NodeData::NullReference)
    }

    pub fn add_identifier(&mut self, name: &str) -> NodeIndex {
        self.add_node(NodeData::Identifier {
            name: Arc::from(name),
        })
    }

    pub fn add_this(&mut self) -> NodeIndex {
        self.add_node(NodeData::This)
    }

    pub fn add_token(&mut self, text: &str) -> NodeIndex {
        self.add_node(NodeData::Token {
            text: Arc::from(text),
        })
    }

    /// Embed a pattern as a tree node.
    pub fn add_pattern_placeholder(&mut self, pattern: Pattern) -> NodeIndex {
        self.add_node(NodeData::PatternPlaceholder {
            pattern: Arc::new(pattern),
        })
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// `target.name` (`target.<T>name` with type arguments).
    pub fn add_member_reference(
        &mut self,
        target: NodeIndex,
        member_name: &str,
        type_arguments: &[NodeIndex],
    ) -> Result<NodeIndex, StructuralError> {
        let node = self.add_with_children(
            NodeData::MemberReference {
                member_name: Arc::from(member_name),
            },
            &[(Role::TARGET_EXPRESSION, target)],
        )?;
        self.add_role_tokens(node, &[Role::DOT])?;
        for &arg in type_arguments {
            self.add_child(node, Role::TYPE_ARGUMENT, arg)?;
        }
        Ok(node)
    }

    /// `target(arguments)`.
    pub fn add_invocation(
        &mut self,
        target: NodeIndex,
        arguments: &[NodeIndex],
    ) -> Result<NodeIndex, StructuralError> {
        let node = self.add_with_children(NodeData::Invocation, &[(Role::TARGET_EXPRESSION, target)])?;
        self.add_role_tokens(node, &[Role::LEFT_PARENTHESIS, Role::RIGHT_PARENTHESIS])?;
        for &arg in arguments {
            self.add_child(node, Role::ARGUMENT, arg)?;
        }
        Ok(node)
    }

    /// `target.<type_arguments>name(arguments)`.
    pub fn add_method_invocation(
        &mut self,
        target: NodeIndex,
        method_name: &str,
        type_arguments: &[NodeIndex],
        arguments: &[NodeIndex],
    ) -> Result<NodeIndex, StructuralError> {
        let member = self.add_member_reference(target, method_name, type_arguments)?;
        self.add_invocation(member, arguments)
    }

    /// `new Type(arguments)`.
    pub fn add_object_creation(
        &mut self,
        ty: NodeIndex,
        arguments: &[NodeIndex],
    ) -> Result<NodeIndex, StructuralError> {
        let node = self.add_with_children(NodeData::ObjectCreation, &[(Role::TYPE, ty)])?;
        self.add_role_tokens(
            node,
            &[Role::NEW_KEYWORD, Role::LEFT_PARENTHESIS, Role::RIGHT_PARENTHESIS],
        )?;
        for &arg in arguments {
            self.add_child(node, Role::ARGUMENT, arg)?;
        }
        Ok(node)
    }

    /// `(Type) expression`.
    pub fn add_cast(&mut self, ty: NodeIndex, expression: NodeIndex) -> Result<NodeIndex, StructuralError> {
        let node = self.add_with_children(
            NodeData::Cast,
            &[(Role::TYPE, ty), (Role::EXPRESSION, expression)],
        )?;
        self.add_role_tokens(node, &[Role::LEFT_PARENTHESIS, Role::RIGHT_PARENTHESIS])?;
        Ok(node)
    }

    pub fn add_assignment(
        &mut self,
        operator: AssignmentOperatorType,
        left: NodeIndex,
        right: NodeIndex,
    ) -> Result<NodeIndex, StructuralError> {
        self.add_with_children(
            NodeData::Assignment { operator },
            &[(Role::LEFT, left), (Role::RIGHT, right)],
        )
    }

    /// `condition ? when_true : when_false`.
    pub fn add_conditional(
        &mut self,
        condition: NodeIndex,
        when_true: NodeIndex,
        when_false: NodeIndex,
    ) -> Result<NodeIndex, StructuralError> {
        self.add_with_children(
            NodeData::Conditional,
            &[
                (Role::CONDITION, condition),
                (Role::TRUE_EXPRESSION, when_true),
                (Role::FALSE_EXPRESSION, when_false),
            ],
        )
    }

    pub fn add_binary(
        &mut self,
        operator: BinaryOperatorType,
        left: NodeIndex,
        right: NodeIndex,
    ) -> Result<NodeIndex, StructuralError> {
        self.add_with_children(
            NodeData::BinaryOperator { operator },
            &[(Role::LEFT, left), (Role::RIGHT, right)],
        )
    }

    pub fn add_unary(
        &mut self,
        operator: UnaryOperatorType,
        expression: NodeIndex,
    ) -> Result<NodeIndex, StructuralError> {
        self.add_with_children(
            NodeData::UnaryOperator { operator },
            &[(Role::EXPRESSION, expression)],
        )
    }

    // =========================================================================
    // Type syntax
    // =========================================================================

    /// `Name` or `Name<type_arguments>`.
    pub fn add_simple_type(
        &mut self,
        name: &str,
        type_arguments: &[NodeIndex],
    ) -> Result<NodeIndex, StructuralError> {
        let node = self.add_node(NodeData::SimpleType {
            name: Arc::from(name),
        });
        for &arg in type_arguments {
            self.add_child(node, Role::TYPE_ARGUMENT, arg)?;
        }
        Ok(node)
    }

    /// `?`, `? extends bound` or `? super bound`.
    pub fn add_wildcard_type(
        &mut self,
        kind: WildcardKind,
        bound: NodeIndex,
    ) -> Result<NodeIndex, StructuralError> {
        self.add_with_children(NodeData::WildcardType { kind }, &[(Role::TYPE, bound)])
    }

    /// `element[]...[]` with `array_rank` dimensions.
    pub fn add_composed_type(
        &mut self,
        element: NodeIndex,
        array_rank: u32,
    ) -> Result<NodeIndex, StructuralError> {
        self.add_with_children(NodeData::ComposedType { array_rank }, &[(Role::TYPE, element)])
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub fn add_block(&mut self, statements: &[NodeIndex]) -> Result<NodeIndex, StructuralError> {
        let node = self.add_node(NodeData::Block);
        for &statement in statements {
            self.add_child(node, Role::STATEMENT, statement)?;
        }
        Ok(node)
    }

    pub fn add_expression_statement(&mut self, expression: NodeIndex) -> Result<NodeIndex, StructuralError> {
        self.add_with_children(NodeData::ExpressionStatement, &[(Role::EXPRESSION, expression)])
    }

    pub fn add_return(&mut self, expression: NodeIndex) -> Result<NodeIndex, StructuralError> {
        self.add_with_children(NodeData::ReturnStatement, &[(Role::EXPRESSION, expression)])
    }

    /// `Type name = initializer;`
    pub fn add_variable_declaration(
        &mut self,
        ty: NodeIndex,
        name: &str,
        initializer: NodeIndex,
    ) -> Result<NodeIndex, StructuralError> {
        self.add_with_children(
            NodeData::VariableDeclaration {
                name: Arc::from(name),
            },
            &[(Role::TYPE, ty), (Role::INITIALIZER, initializer)],
        )
    }
}

#[cfg(test)]
#[path = "../tests/node_arena_tests.rs"]
mod tests;
