//! Node records, payloads and the arena that owns them.
//!
//! A node's kind is determined by its `NodeData` variant. Each kind has a
//! fixed role schema (`NodeKind::roles`); a node carries one `ChildSlot` per
//! schema role, in schema order.

use crate::base::NodeIndex;
use crate::pattern::Pattern;
use crate::role::Role;
use jdecomp_metadata::{JvmType, MemberReference, TypeRef};
use serde::Serialize;
use smallvec::SmallVec;
use std::sync::Arc;

// =============================================================================
// NodeKind
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    /// The null node (`NodeIndex::NONE`).
    Null,
    Primitive,
    NullReference,
    Identifier,
    This,
    MemberReference,
    Invocation,
    ObjectCreation,
    Cast,
    Assignment,
    Conditional,
    BinaryOperator,
    UnaryOperator,
    SimpleType,
    WildcardType,
    ComposedType,
    Block,
    ExpressionStatement,
    ReturnStatement,
    VariableDeclaration,
    Token,
    PatternPlaceholder,
}

const NO_ROLES: &[Role] = &[];
const MEMBER_REFERENCE_ROLES: &[Role] = &[Role::TARGET_EXPRESSION, Role::DOT, Role::TYPE_ARGUMENT];
const INVOCATION_ROLES: &[Role] = &[
    Role::TARGET_EXPRESSION,
    Role::LEFT_PARENTHESIS,
    Role::ARGUMENT,
    Role::RIGHT_PARENTHESIS,
];
const OBJECT_CREATION_ROLES: &[Role] = &[
    Role::NEW_KEYWORD,
    Role::TYPE,
    Role::LEFT_PARENTHESIS,
    Role::ARGUMENT,
    Role::RIGHT_PARENTHESIS,
];
const CAST_ROLES: &[Role] = &[
    Role::LEFT_PARENTHESIS,
    Role::TYPE,
    Role::RIGHT_PARENTHESIS,
    Role::EXPRESSION,
];
const BINARY_ROLES: &[Role] = &[Role::LEFT, Role::RIGHT];
const CONDITIONAL_ROLES: &[Role] = &[Role::CONDITION, Role::TRUE_EXPRESSION, Role::FALSE_EXPRESSION];
const EXPRESSION_ROLES: &[Role] = &[Role::EXPRESSION];
const TYPE_ROLES: &[Role] = &[Role::TYPE];
const TYPE_ARGUMENT_ROLES: &[Role] = &[Role::TYPE_ARGUMENT];
const STATEMENT_ROLES: &[Role] = &[Role::STATEMENT];
const VARIABLE_ROLES: &[Role] = &[Role::TYPE, Role::INITIALIZER];

impl NodeKind {
    /// The role schema, in declaration (and traversal) order.
    pub const fn roles(self) -> &'static [Role] {
        match self {
            Self::Null
            | Self::Primitive
            | Self::NullReference
            | Self::Identifier
            | Self::This
            | Self::Token
            | Self::PatternPlaceholder => NO_ROLES,
            Self::MemberReference => MEMBER_REFERENCE_ROLES,
            Self::Invocation => INVOCATION_ROLES,
            Self::ObjectCreation => OBJECT_CREATION_ROLES,
            Self::Cast => CAST_ROLES,
            Self::Assignment | Self::BinaryOperator => BINARY_ROLES,
            Self::Conditional => CONDITIONAL_ROLES,
            Self::UnaryOperator | Self::ExpressionStatement | Self::ReturnStatement => {
                EXPRESSION_ROLES
            }
            Self::WildcardType | Self::ComposedType => TYPE_ROLES,
            Self::SimpleType => TYPE_ARGUMENT_ROLES,
            Self::Block => STATEMENT_ROLES,
            Self::VariableDeclaration => VARIABLE_ROLES,
        }
    }

    /// Position of `role` in this kind's schema.
    pub fn slot_of(self, role: Role) -> Option<usize> {
        self.roles().iter().position(|r| *r == role)
    }

    pub const fn is_expression(self) -> bool {
        matches!(
            self,
            Self::Primitive
                | Self::NullReference
                | Self::Identifier
                | Self::This
                | Self::MemberReference
                | Self::Invocation
                | Self::ObjectCreation
                | Self::Cast
                | Self::Assignment
                | Self::Conditional
                | Self::BinaryOperator
                | Self::UnaryOperator
        )
    }

    pub const fn is_type_syntax(self) -> bool {
        matches!(
            self,
            Self::SimpleType | Self::WildcardType | Self::ComposedType
        )
    }

    pub const fn is_statement(self) -> bool {
        matches!(
            self,
            Self::Block | Self::ExpressionStatement | Self::ReturnStatement | Self::VariableDeclaration
        )
    }
}

// =============================================================================
// Payloads
// =============================================================================

/// Literal constant value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum PrimitiveValue {
    Boolean(bool),
    Char(u16),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(Arc<str>),
}

impl PrimitiveValue {
    /// The JVM type of the literal. String literals report `None`.
    pub const fn jvm_type(&self) -> Option<JvmType> {
        match self {
            Self::Boolean(_) => Some(JvmType::Boolean),
            Self::Char(_) => Some(JvmType::Character),
            Self::Byte(_) => Some(JvmType::Byte),
            Self::Short(_) => Some(JvmType::Short),
            Self::Int(_) => Some(JvmType::Integer),
            Self::Long(_) => Some(JvmType::Long),
            Self::Float(_) => Some(JvmType::Float),
            Self::Double(_) => Some(JvmType::Double),
            Self::String(_) => None,
        }
    }

    /// The `1` and `0` literals a boolean becomes when converted to `kind`.
    /// Kinds narrower than `int` have no literal syntax of their own and get
    /// `int` literals.
    pub fn boolean_literals(kind: JvmType) -> Option<(Self, Self)> {
        match kind {
            JvmType::Long => Some((Self::Long(1), Self::Long(0))),
            JvmType::Float => Some((Self::Float(1.0), Self::Float(0.0))),
            JvmType::Double => Some((Self::Double(1.0), Self::Double(0.0))),
            k if k.is_numeric() => Some((Self::Int(1), Self::Int(0))),
            _ => None,
        }
    }

    /// The literal `0` of exactly `kind`.
    pub const fn zero_of(kind: JvmType) -> Option<Self> {
        match kind {
            JvmType::Character => Some(Self::Char(0)),
            JvmType::Byte => Some(Self::Byte(0)),
            JvmType::Short => Some(Self::Short(0)),
            JvmType::Integer => Some(Self::Int(0)),
            JvmType::Long => Some(Self::Long(0)),
            JvmType::Float => Some(Self::Float(0.0)),
            JvmType::Double => Some(Self::Double(0.0)),
            _ => None,
        }
    }

    /// Integral value of an integral (or `char`) literal.
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Char(v) => Some(*v as i64),
            Self::Byte(v) => Some(*v as i64),
            Self::Short(v) => Some(*v as i64),
            Self::Int(v) => Some(*v as i64),
            Self::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// True if the literal's value survives conversion to `kind` unchanged.
    pub fn fits_in(&self, kind: JvmType) -> bool {
        if self.jvm_type() == Some(kind) {
            return true;
        }
        if let Some(v) = self.as_i64() {
            return match kind {
                JvmType::Byte => i8::try_from(v).is_ok(),
                JvmType::Short => i16::try_from(v).is_ok(),
                JvmType::Character => u16::try_from(v).is_ok(),
                JvmType::Integer => i32::try_from(v).is_ok(),
                JvmType::Long => true,
                // Integers up to 2^24 (2^53) are exact in a float (double).
                JvmType::Float => v.unsigned_abs() <= 1 << 24,
                JvmType::Double => v.unsigned_abs() <= 1 << 53,
                _ => false,
            };
        }
        matches!((self, kind), (Self::Float(_), JvmType::Double))
    }

    /// Java source spelling, used for debug output.
    pub fn literal_text(&self) -> String {
        match self {
            Self::Boolean(b) => b.to_string(),
            Self::Char(c) => match char::from_u32(u32::from(*c)) {
                Some(ch) if !ch.is_control() => format!("'{ch}'"),
                _ => format!("'\\u{c:04x}'"),
            },
            Self::Byte(v) => v.to_string(),
            Self::Short(v) => v.to_string(),
            Self::Int(v) => v.to_string(),
            Self::Long(v) => format!("{v}L"),
            Self::Float(v) => format!("{v:?}f"),
            Self::Double(v) => format!("{v:?}"),
            Self::String(s) => format!("{s:?}"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum AssignmentOperatorType {
    Assign,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,
    ShiftLeft,
    ShiftRight,
    UnsignedShiftRight,
    BitwiseAnd,
    BitwiseOr,
    ExclusiveOr,
    /// Pattern-only: matches any assignment operator.
    Any,
}

impl AssignmentOperatorType {
    pub const fn token(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::Add => "+=",
            Self::Subtract => "-=",
            Self::Multiply => "*=",
            Self::Divide => "/=",
            Self::Modulus => "%=",
            Self::ShiftLeft => "<<=",
            Self::ShiftRight => ">>=",
            Self::UnsignedShiftRight => ">>>=",
            Self::BitwiseAnd => "&=",
            Self::BitwiseOr => "|=",
            Self::ExclusiveOr => "^=",
            Self::Any => "<any>=",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOperatorType {
    BitwiseAnd,
    BitwiseOr,
    LogicalAnd,
    LogicalOr,
    ExclusiveOr,
    GreaterThan,
    GreaterThanOrEqual,
    Equality,
    InEquality,
    LessThan,
    LessThanOrEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,
    ShiftLeft,
    ShiftRight,
    UnsignedShiftRight,
    /// Pattern-only: matches any binary operator.
    Any,
}

impl BinaryOperatorType {
    pub const fn token(self) -> &'static str {
        match self {
            Self::BitwiseAnd => "&",
            Self::BitwiseOr => "|",
            Self::LogicalAnd => "&&",
            Self::LogicalOr => "||",
            Self::ExclusiveOr => "^",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::Equality => "==",
            Self::InEquality => "!=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulus => "%",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::UnsignedShiftRight => ">>>",
            Self::Any => "<any>",
        }
    }

    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::GreaterThan
                | Self::GreaterThanOrEqual
                | Self::Equality
                | Self::InEquality
                | Self::LessThan
                | Self::LessThanOrEqual
        )
    }

    pub const fn is_logical(self) -> bool {
        matches!(self, Self::LogicalAnd | Self::LogicalOr)
    }

    pub const fn is_bitwise(self) -> bool {
        matches!(self, Self::BitwiseAnd | Self::BitwiseOr | Self::ExclusiveOr)
    }

    pub const fn is_shift(self) -> bool {
        matches!(
            self,
            Self::ShiftLeft | Self::ShiftRight | Self::UnsignedShiftRight
        )
    }

    pub const fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide | Self::Modulus
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum UnaryOperatorType {
    Not,
    BitNot,
    Minus,
    Plus,
    Increment,
    Decrement,
    PostIncrement,
    PostDecrement,
    /// Pattern-only: matches any unary operator.
    Any,
}

impl UnaryOperatorType {
    pub const fn token(self) -> &'static str {
        match self {
            Self::Not => "!",
            Self::BitNot => "~",
            Self::Minus => "-",
            Self::Plus => "+",
            Self::Increment | Self::PostIncrement => "++",
            Self::Decrement | Self::PostDecrement => "--",
            Self::Any => "<any>",
        }
    }

    pub const fn is_postfix(self) -> bool {
        matches!(self, Self::PostIncrement | Self::PostDecrement)
    }

    pub const fn is_increment_or_decrement(self) -> bool {
        matches!(
            self,
            Self::Increment | Self::Decrement | Self::PostIncrement | Self::PostDecrement
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum WildcardKind {
    Unbounded,
    Extends,
    Super,
}

/// Kind-specific payload. The variant determines the node's `NodeKind`.
#[derive(Clone, Debug)]
pub enum NodeData {
    Primitive(PrimitiveValue),
    NullReference,
    Identifier { name: Arc<str> },
    This,
    MemberReference { member_name: Arc<str> },
    Invocation,
    ObjectCreation,
    Cast,
    Assignment { operator: AssignmentOperatorType },
    Conditional,
    BinaryOperator { operator: BinaryOperatorType },
    UnaryOperator { operator: UnaryOperatorType },
    SimpleType { name: Arc<str> },
    WildcardType { kind: WildcardKind },
    ComposedType { array_rank: u32 },
    Block,
    ExpressionStatement,
    ReturnStatement,
    VariableDeclaration { name: Arc<str> },
    Token { text: Arc<str> },
    PatternPlaceholder { pattern: Arc<Pattern> },
}

impl NodeData {
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Primitive(_) => NodeKind::Primitive,
            Self::NullReference => NodeKind::NullReference,
            Self::Identifier { .. } => NodeKind::Identifier,
            Self::This => NodeKind::This,
            Self::MemberReference { .. } => NodeKind::MemberReference,
            Self::Invocation => NodeKind::Invocation,
            Self::ObjectCreation => NodeKind::ObjectCreation,
            Self::Cast => NodeKind::Cast,
            Self::Assignment { .. } => NodeKind::Assignment,
            Self::Conditional => NodeKind::Conditional,
            Self::BinaryOperator { .. } => NodeKind::BinaryOperator,
            Self::UnaryOperator { .. } => NodeKind::UnaryOperator,
            Self::SimpleType { .. } => NodeKind::SimpleType,
            Self::WildcardType { .. } => NodeKind::WildcardType,
            Self::ComposedType { .. } => NodeKind::ComposedType,
            Self::Block => NodeKind::Block,
            Self::ExpressionStatement => NodeKind::ExpressionStatement,
            Self::ReturnStatement => NodeKind::ReturnStatement,
            Self::VariableDeclaration { .. } => NodeKind::VariableDeclaration,
            Self::Token { .. } => NodeKind::Token,
            Self::PatternPlaceholder { .. } => NodeKind::PatternPlaceholder,
        }
    }

    /// Payload comparison used by structural matching. `self` is the pattern
    /// side: its `Any` operators match every operator.
    pub fn matches_payload(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primitive(a), Self::Primitive(b)) => a == b,
            (Self::Identifier { name: a }, Self::Identifier { name: b })
            | (Self::MemberReference { member_name: a }, Self::MemberReference { member_name: b })
            | (Self::SimpleType { name: a }, Self::SimpleType { name: b })
            | (Self::VariableDeclaration { name: a }, Self::VariableDeclaration { name: b })
            | (Self::Token { text: a }, Self::Token { text: b }) => a == b,
            (Self::Assignment { operator: a }, Self::Assignment { operator: b }) => {
                *a == AssignmentOperatorType::Any || a == b
            }
            (Self::BinaryOperator { operator: a }, Self::BinaryOperator { operator: b }) => {
                *a == BinaryOperatorType::Any || a == b
            }
            (Self::UnaryOperator { operator: a }, Self::UnaryOperator { operator: b }) => {
                *a == UnaryOperatorType::Any || a == b
            }
            (Self::WildcardType { kind: a }, Self::WildcardType { kind: b }) => a == b,
            (Self::ComposedType { array_rank: a }, Self::ComposedType { array_rank: b }) => a == b,
            (Self::PatternPlaceholder { pattern: a }, Self::PatternPlaceholder { pattern: b }) => {
                Arc::ptr_eq(a, b)
            }
            _ => self.kind() == other.kind(),
        }
    }
}

// =============================================================================
// Node record
// =============================================================================

/// One role's children.
#[derive(Clone, Debug)]
pub struct ChildSlot {
    pub role: Role,
    pub children: SmallVec<[NodeIndex; 2]>,
}

/// Annotations attached by earlier decompiler stages.
#[derive(Clone, Debug, Default)]
pub struct UserData {
    /// The field or method this node refers to.
    pub member_reference: Option<Arc<MemberReference>>,
    /// The type this node denotes (type syntax) or evaluates to (variables).
    pub type_reference: Option<TypeRef>,
}

#[derive(Clone, Debug)]
pub struct Node {
    pub data: NodeData,
    pub parent: NodeIndex,
    /// Role occupied in the parent; `None` for roots and detached nodes.
    pub role: Option<Role>,
    pub slots: SmallVec<[ChildSlot; 4]>,
    pub user_data: UserData,
}

impl Node {
    pub fn new(data: NodeData) -> Self {
        let slots = data
            .kind()
            .roles()
            .iter()
            .map(|role| ChildSlot {
                role: *role,
                children: SmallVec::new(),
            })
            .collect();
        Self {
            data,
            parent: NodeIndex::NONE,
            role: None,
            slots,
            user_data: UserData::default(),
        }
    }

    #[inline]
    pub const fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    pub fn slot(&self, role: Role) -> Option<&ChildSlot> {
        self.slots.iter().find(|slot| slot.role == role)
    }
}

/// Arena owning every node of one method body (and any detached nodes
/// created while rewriting it).
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    pub(crate) nodes: Vec<Node>,
}
