//! NodeArena access and mutation methods.
//!
//! Navigation (`parent`, `children_by_role`, `next_sibling`, ...) never fails:
//! absent nodes read as `NodeIndex::NONE` or empty lists. Mutation and role
//! queries report `StructuralError` for schema violations.

use crate::base::NodeIndex;
use crate::error::StructuralError;
use crate::node::{
    AssignmentOperatorType, BinaryOperatorType, Node, NodeArena, NodeData, NodeKind,
    PrimitiveValue, UnaryOperatorType, WildcardKind,
};
use crate::pattern::Pattern;
use crate::role::Role;
use jdecomp_metadata::{MemberReference, TypeRef};
use smallvec::SmallVec;
use std::sync::Arc;

impl NodeArena {
    // =========================================================================
    // Lookup
    // =========================================================================

    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    fn node(&self, index: NodeIndex) -> Result<&Node, StructuralError> {
        self.get(index)
            .ok_or(StructuralError::InvalidNode { node: index })
    }

    /// Number of nodes in the arena (attached or not).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Kind of a node; the null node (and any unknown index) is `Null`.
    #[inline]
    pub fn kind(&self, index: NodeIndex) -> NodeKind {
        self.get(index).map_or(NodeKind::Null, Node::kind)
    }

    #[inline]
    pub fn data(&self, index: NodeIndex) -> Option<&NodeData> {
        self.get(index).map(|n| &n.data)
    }

    #[inline]
    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.get(index).map_or(NodeIndex::NONE, |n| n.parent)
    }

    /// Role the node occupies in its parent.
    #[inline]
    pub fn role(&self, index: NodeIndex) -> Option<Role> {
        self.get(index).and_then(|n| n.role)
    }

    pub fn root(&self, index: NodeIndex) -> NodeIndex {
        let mut current = index;
        loop {
            let parent = self.parent(current);
            if parent.is_none() {
                return current;
            }
            current = parent;
        }
    }

    /// Is `ancestor` equal to `index` or one of its ancestors?
    pub fn is_ancestor_or_self(&self, ancestor: NodeIndex, index: NodeIndex) -> bool {
        let mut current = index;
        while current.is_some() {
            if current == ancestor {
                return true;
            }
            current = self.parent(current);
        }
        false
    }

    // =========================================================================
    // Role queries
    // =========================================================================

    fn slot_index(&self, node: NodeIndex, role: Role) -> Result<usize, StructuralError> {
        let kind = self.node(node)?.kind();
        kind.slot_of(role).ok_or(StructuralError::UnknownRole {
            kind,
            role: role.name,
        })
    }

    /// The child in a single-valued role, or the null node if the role is
    /// empty. The null node itself has no children.
    pub fn child_by_role(&self, node: NodeIndex, role: Role) -> Result<NodeIndex, StructuralError> {
        if node.is_none() {
            return Ok(NodeIndex::NONE);
        }
        let slot = self.slot_index(node, role)?;
        Ok(self.nodes[node.0 as usize].slots[slot]
            .children
            .first()
            .copied()
            .unwrap_or(NodeIndex::NONE))
    }

    /// The children in a role, in order.
    pub fn children_by_role(&self, node: NodeIndex, role: Role) -> Result<&[NodeIndex], StructuralError> {
        if node.is_none() {
            return Ok(&[]);
        }
        let slot = self.slot_index(node, role)?;
        Ok(self.nodes[node.0 as usize].slots[slot].children.as_slice())
    }

    /// All children in role-declaration order.
    pub fn children(&self, node: NodeIndex) -> Vec<NodeIndex> {
        self.get(node).map_or_else(Vec::new, |n| {
            n.slots
                .iter()
                .flat_map(|slot| slot.children.iter().copied())
                .collect()
        })
    }

    pub fn first_child(&self, node: NodeIndex) -> NodeIndex {
        self.get(node)
            .and_then(|n| n.slots.iter().find_map(|slot| slot.children.first().copied()))
            .unwrap_or(NodeIndex::NONE)
    }

    pub fn last_child(&self, node: NodeIndex) -> NodeIndex {
        self.get(node)
            .and_then(|n| n.slots.iter().rev().find_map(|slot| slot.children.last().copied()))
            .unwrap_or(NodeIndex::NONE)
    }

    /// `(parent, slot, position)` of an attached node.
    fn location(&self, node: NodeIndex) -> Option<(NodeIndex, usize, usize)> {
        let n = self.get(node)?;
        let role = n.role?;
        let parent = self.get(n.parent)?;
        let slot = parent.slots.iter().position(|s| s.role == role)?;
        let position = parent.slots[slot].children.iter().position(|c| *c == node)?;
        Some((n.parent, slot, position))
    }

    /// The following sibling across all of the parent's roles.
    pub fn next_sibling(&self, node: NodeIndex) -> NodeIndex {
        let Some((parent, slot, position)) = self.location(node) else {
            return NodeIndex::NONE;
        };
        let slots = &self.nodes[parent.0 as usize].slots;
        if let Some(next) = slots[slot].children.get(position + 1) {
            return *next;
        }
        slots[slot + 1..]
            .iter()
            .find_map(|s| s.children.first().copied())
            .unwrap_or(NodeIndex::NONE)
    }

    /// The preceding sibling across all of the parent's roles.
    pub fn prev_sibling(&self, node: NodeIndex) -> NodeIndex {
        let Some((parent, slot, position)) = self.location(node) else {
            return NodeIndex::NONE;
        };
        let slots = &self.nodes[parent.0 as usize].slots;
        if position > 0 {
            return slots[slot].children[position - 1];
        }
        slots[..slot]
            .iter()
            .rev()
            .find_map(|s| s.children.last().copied())
            .unwrap_or(NodeIndex::NONE)
    }

    /// Pre-order list of `node` and everything below it.
    pub fn descendants_and_self(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            let Some(n) = self.get(current) else {
                continue;
            };
            out.push(current);
            for slot in n.slots.iter().rev() {
                stack.extend(slot.children.iter().rev().copied());
            }
        }
        out
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Append `child` to `parent`'s `role`. Adding the null node is a no-op.
    pub fn add_child(&mut self, parent: NodeIndex, role: Role, child: NodeIndex) -> Result<(), StructuralError> {
        let position = usize::MAX;
        self.insert_child(parent, role, position, child)
    }

    /// Insert `child` at `position` within `parent`'s `role` (clamped to the
    /// end of the role).
    pub fn insert_child(
        &mut self,
        parent: NodeIndex,
        role: Role,
        position: usize,
        child: NodeIndex,
    ) -> Result<(), StructuralError> {
        if child.is_none() {
            return Ok(());
        }
        let slot = self.slot_index(parent, role)?;
        let child_node = self.node(child)?;
        if child_node.parent.is_some() {
            return Err(StructuralError::AlreadyAttached { node: child });
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(StructuralError::WouldCreateCycle { node: child });
        }

        let children = &mut self.nodes[parent.0 as usize].slots[slot].children;
        if !role.is_collection() && !children.is_empty() {
            return Err(StructuralError::SingleRoleOccupied {
                node: parent,
                role: role.name,
            });
        }
        let position = position.min(children.len());
        children.insert(position, child);

        let child_node = &mut self.nodes[child.0 as usize];
        child_node.parent = parent;
        child_node.role = Some(role);
        Ok(())
    }

    /// Replace whatever occupies `role` with `child` (the null node clears it).
    pub fn set_child_by_role(&mut self, parent: NodeIndex, role: Role, child: NodeIndex) -> Result<(), StructuralError> {
        let existing: SmallVec<[NodeIndex; 2]> = self.children_by_role(parent, role)?.iter().copied().collect();
        for old in existing {
            self.remove(old)?;
        }
        self.add_child(parent, role, child)
    }

    /// Detach `node` from its parent, closing the gap in the parent's role.
    /// Removing a detached node (or the null node) does nothing.
    pub fn remove(&mut self, node: NodeIndex) -> Result<(), StructuralError> {
        let Some((parent, slot, position)) = self.location(node) else {
            return Ok(());
        };
        self.nodes[parent.0 as usize].slots[slot]
            .children
            .remove(position);
        let n = &mut self.nodes[node.0 as usize];
        n.parent = NodeIndex::NONE;
        n.role = None;
        Ok(())
    }

    /// Replace an attached node with the node returned by `factory`.
    ///
    /// `node` is detached before `factory` runs, so the factory may reuse it
    /// (e.g. wrap it in a cast). The result is inserted at the same role and
    /// position and returned. If the factory fails, `node` is put back.
    /// A factory returning the null node leaves the position empty.
    pub fn replace_with<E, F>(&mut self, node: NodeIndex, factory: F) -> Result<NodeIndex, E>
    where
        E: From<StructuralError>,
        F: FnOnce(&mut Self, NodeIndex) -> Result<NodeIndex, E>,
    {
        let Some((parent, slot, position)) = self.location(node) else {
            return Err(StructuralError::NotAttached { node }.into());
        };
        let role = self.nodes[parent.0 as usize].slots[slot].role;
        self.remove(node)?;

        let replacement = match factory(self, node) {
            Ok(replacement) => replacement,
            Err(err) => {
                if self.parent(node).is_none() {
                    self.insert_child(parent, role, position, node)?;
                }
                return Err(err);
            }
        };
        if replacement.is_none() {
            return Ok(NodeIndex::NONE);
        }
        self.insert_child(parent, role, position, replacement)?;
        Ok(replacement)
    }

    /// Replace an attached node with an existing detached node.
    pub fn replace(&mut self, node: NodeIndex, replacement: NodeIndex) -> Result<NodeIndex, StructuralError> {
        self.replace_with(node, |_, _| Ok(replacement))
    }

    /// Deep copy of a subtree, annotations included. The copy is detached.
    pub fn clone_subtree(&mut self, node: NodeIndex) -> NodeIndex {
        if self.get(node).is_none() {
            return NodeIndex::NONE;
        }
        let root = self.push_copy(node);
        let mut stack = vec![(node, root)];
        while let Some((source, copy)) = stack.pop() {
            let slots: SmallVec<[(Role, SmallVec<[NodeIndex; 2]>); 4]> = self.nodes[source.0 as usize]
                .slots
                .iter()
                .map(|s| (s.role, s.children.clone()))
                .collect();
            for (slot_index, (role, children)) in slots.into_iter().enumerate() {
                for child in children {
                    let child_copy = self.push_copy(child);
                    let copied = &mut self.nodes[child_copy.0 as usize];
                    copied.parent = copy;
                    copied.role = Some(role);
                    self.nodes[copy.0 as usize].slots[slot_index]
                        .children
                        .push(child_copy);
                    stack.push((child, child_copy));
                }
            }
        }
        root
    }

    fn push_copy(&mut self, source: NodeIndex) -> NodeIndex {
        let original = &self.nodes[source.0 as usize];
        let mut copy = Node::new(original.data.clone());
        copy.user_data = original.user_data.clone();
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(copy);
        index
    }

    // =========================================================================
    // Annotations
    // =========================================================================

    pub fn member_reference(&self, node: NodeIndex) -> Option<&Arc<MemberReference>> {
        self.get(node)?.user_data.member_reference.as_ref()
    }

    pub fn set_member_reference(&mut self, node: NodeIndex, member: Arc<MemberReference>) {
        if let Some(n) = self.get_mut(node) {
            n.user_data.member_reference = Some(member);
        }
    }

    pub fn type_reference(&self, node: NodeIndex) -> Option<&TypeRef> {
        self.get(node)?.user_data.type_reference.as_ref()
    }

    pub fn set_type_reference(&mut self, node: NodeIndex, ty: TypeRef) {
        if let Some(n) = self.get_mut(node) {
            n.user_data.type_reference = Some(ty);
        }
    }

    // =========================================================================
    // Typed payload accessors
    // =========================================================================

    pub fn primitive_value(&self, node: NodeIndex) -> Option<&PrimitiveValue> {
        match self.data(node)? {
            NodeData::Primitive(value) => Some(value),
            _ => None,
        }
    }

    /// Identifier, member, type and variable names.
    pub fn name(&self, node: NodeIndex) -> Option<&str> {
        match self.data(node)? {
            NodeData::Identifier { name }
            | NodeData::SimpleType { name }
            | NodeData::VariableDeclaration { name } => Some(name),
            NodeData::MemberReference { member_name } => Some(member_name),
            NodeData::Token { text } => Some(text),
            _ => None,
        }
    }

    pub fn assignment_operator(&self, node: NodeIndex) -> Option<AssignmentOperatorType> {
        match self.data(node)? {
            NodeData::Assignment { operator } => Some(*operator),
            _ => None,
        }
    }

    pub fn binary_operator(&self, node: NodeIndex) -> Option<BinaryOperatorType> {
        match self.data(node)? {
            NodeData::BinaryOperator { operator } => Some(*operator),
            _ => None,
        }
    }

    pub fn unary_operator(&self, node: NodeIndex) -> Option<UnaryOperatorType> {
        match self.data(node)? {
            NodeData::UnaryOperator { operator } => Some(*operator),
            _ => None,
        }
    }

    pub fn wildcard_kind(&self, node: NodeIndex) -> Option<WildcardKind> {
        match self.data(node)? {
            NodeData::WildcardType { kind } => Some(*kind),
            _ => None,
        }
    }

    pub fn array_rank(&self, node: NodeIndex) -> Option<u32> {
        match self.data(node)? {
            NodeData::ComposedType { array_rank } => Some(*array_rank),
            _ => None,
        }
    }

    pub fn pattern(&self, node: NodeIndex) -> Option<Arc<Pattern>> {
        match self.data(node)? {
            NodeData::PatternPlaceholder { pattern } => Some(Arc::clone(pattern)),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../tests/node_access_tests.rs"]
mod tests;
