//! Type references.
//!
//! A `TypeRef` is a value-level description of a Java type as it appears in
//! signatures and in resolved expressions. Class types point at their
//! definition through a `DefId`; everything else is structural.

use crate::def::DefId;
use crate::jvm_type::JvmType;
use std::sync::Arc;

/// A (possibly generic) Java type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A primitive type or `void`.
    Primitive(JvmType),
    /// A class or interface type. No type arguments means raw (or non-generic).
    Class(ClassType),
    /// A reference to a generic parameter such as `T`.
    TypeVariable(TypeVariable),
    /// A wildcard type argument (`?`, `? extends B`, `? super B`).
    Wildcard(WildcardBound),
    /// An array of the element type.
    Array(Arc<TypeRef>),
    /// The type of the `null` literal.
    Null,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClassType {
    pub def: DefId,
    pub type_arguments: Arc<[TypeRef]>,
}

/// A generic parameter reference.
///
/// `owner` is the declaring type for class-level parameters and `None` for
/// parameters declared by a generic method. Identity is `(owner, name)`; the
/// bound is carried along for convenience and does not take part in equality.
#[derive(Clone, Debug)]
pub struct TypeVariable {
    pub name: Arc<str>,
    pub owner: Option<DefId>,
    pub bound: Option<Arc<TypeRef>>,
}

impl PartialEq for TypeVariable {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.name == other.name
    }
}

impl Eq for TypeVariable {}

impl std::hash::Hash for TypeVariable {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
        self.name.hash(state);
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum WildcardBound {
    Unbounded,
    Extends(Arc<TypeRef>),
    Super(Arc<TypeRef>),
}

/// A generic parameter as declared on a type or method.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GenericParameter {
    pub name: Arc<str>,
    pub bound: Option<TypeRef>,
}

impl GenericParameter {
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            bound: None,
        }
    }

    pub fn bounded(name: &str, bound: TypeRef) -> Self {
        Self {
            name: Arc::from(name),
            bound: Some(bound),
        }
    }

    /// The type variable referring to this parameter.
    pub fn as_type_variable(&self, owner: Option<DefId>) -> TypeVariable {
        TypeVariable {
            name: Arc::clone(&self.name),
            owner,
            bound: self.bound.clone().map(Arc::new),
        }
    }
}

impl TypeRef {
    pub const BOOLEAN: Self = Self::Primitive(JvmType::Boolean);
    pub const BYTE: Self = Self::Primitive(JvmType::Byte);
    pub const CHAR: Self = Self::Primitive(JvmType::Character);
    pub const SHORT: Self = Self::Primitive(JvmType::Short);
    pub const INT: Self = Self::Primitive(JvmType::Integer);
    pub const LONG: Self = Self::Primitive(JvmType::Long);
    pub const FLOAT: Self = Self::Primitive(JvmType::Float);
    pub const DOUBLE: Self = Self::Primitive(JvmType::Double);
    pub const VOID: Self = Self::Primitive(JvmType::Void);

    /// A non-generic or raw class type.
    pub fn class(def: DefId) -> Self {
        Self::Class(ClassType {
            def,
            type_arguments: Arc::from(Vec::new()),
        })
    }

    /// A parameterized class type.
    pub fn generic(def: DefId, type_arguments: Vec<Self>) -> Self {
        Self::Class(ClassType {
            def,
            type_arguments: Arc::from(type_arguments),
        })
    }

    pub fn array(element: Self) -> Self {
        Self::Array(Arc::new(element))
    }

    pub fn type_variable(name: &str, owner: Option<DefId>) -> Self {
        Self::TypeVariable(TypeVariable {
            name: Arc::from(name),
            owner,
            bound: None,
        })
    }

    pub fn unbounded_wildcard() -> Self {
        Self::Wildcard(WildcardBound::Unbounded)
    }

    pub fn extends_wildcard(bound: Self) -> Self {
        Self::Wildcard(WildcardBound::Extends(Arc::new(bound)))
    }

    pub fn super_wildcard(bound: Self) -> Self {
        Self::Wildcard(WildcardBound::Super(Arc::new(bound)))
    }

    /// The JVM-level shape of this type.
    pub const fn simple_type(&self) -> JvmType {
        match self {
            Self::Primitive(p) => *p,
            Self::Class(_) | Self::Null => JvmType::Object,
            Self::TypeVariable(_) => JvmType::TypeVariable,
            Self::Wildcard(_) => JvmType::Wildcard,
            Self::Array(_) => JvmType::Array,
        }
    }

    /// Primitive value type (`void` excluded).
    pub const fn is_primitive(&self) -> bool {
        match self {
            Self::Primitive(p) => p.is_primitive(),
            _ => false,
        }
    }

    pub const fn is_void(&self) -> bool {
        matches!(self, Self::Primitive(JvmType::Void))
    }

    pub const fn is_boolean(&self) -> bool {
        matches!(self, Self::Primitive(JvmType::Boolean))
    }

    pub const fn is_numeric(&self) -> bool {
        match self {
            Self::Primitive(p) => p.is_numeric(),
            _ => false,
        }
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn is_reference(&self) -> bool {
        !matches!(self, Self::Primitive(_))
    }

    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    pub const fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard(_))
    }

    pub const fn is_generic_parameter(&self) -> bool {
        matches!(self, Self::TypeVariable(_))
    }

    pub const fn primitive_kind(&self) -> Option<JvmType> {
        match self {
            Self::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    pub const fn as_class(&self) -> Option<&ClassType> {
        match self {
            Self::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn element_type(&self) -> Option<&Self> {
        match self {
            Self::Array(e) => Some(e.as_ref()),
            _ => None,
        }
    }

    pub fn type_arguments(&self) -> &[Self] {
        match self {
            Self::Class(c) => c.type_arguments.as_ref(),
            _ => &[],
        }
    }

    /// True if the type mentions a generic parameter anywhere.
    pub fn contains_generic_parameters(&self) -> bool {
        match self {
            Self::TypeVariable(_) => true,
            Self::Class(c) => c.type_arguments.iter().any(Self::contains_generic_parameters),
            Self::Array(e) => e.contains_generic_parameters(),
            Self::Wildcard(WildcardBound::Extends(b) | WildcardBound::Super(b)) => {
                b.contains_generic_parameters()
            }
            Self::Wildcard(WildcardBound::Unbounded) | Self::Primitive(_) | Self::Null => false,
        }
    }

    /// The upper bound used when a wildcard or type variable must stand in for
    /// a concrete type. `None` means `java.lang.Object`.
    pub fn upper_bound(&self) -> Option<&Self> {
        match self {
            Self::Wildcard(WildcardBound::Extends(b)) => Some(b.as_ref()),
            Self::Wildcard(_) => None,
            Self::TypeVariable(v) => v.bound.as_deref(),
            _ => Some(self),
        }
    }
}

impl ClassType {
    pub fn is_raw(&self) -> bool {
        self.type_arguments.is_empty()
    }
}
