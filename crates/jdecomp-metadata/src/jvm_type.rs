//! JVM-level classification of types.

/// The "simple type" of a type reference: the shape the JVM itself sees.
///
/// Every reference type collapses to `Object`, `Array`, `TypeVariable` or
/// `Wildcard`; the eight primitives and `void` keep their own tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum JvmType {
    Boolean,
    Byte,
    Character,
    Short,
    Integer,
    Long,
    Float,
    Double,
    Object,
    Array,
    TypeVariable,
    Wildcard,
    Void,
}

impl JvmType {
    /// Primitive value types (including `boolean`, excluding `void`).
    pub const fn is_primitive(self) -> bool {
        matches!(
            self,
            Self::Boolean
                | Self::Byte
                | Self::Character
                | Self::Short
                | Self::Integer
                | Self::Long
                | Self::Float
                | Self::Double
        )
    }

    /// Numeric primitive types. `char` counts as numeric, `boolean` does not.
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Byte
                | Self::Character
                | Self::Short
                | Self::Integer
                | Self::Long
                | Self::Float
                | Self::Double
        )
    }

    pub const fn is_integral(self) -> bool {
        matches!(
            self,
            Self::Byte | Self::Character | Self::Short | Self::Integer | Self::Long
        )
    }

    pub const fn is_floating(self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }

    /// Storage width in bits. Reference and pseudo types report 0.
    pub const fn bit_width(self) -> u32 {
        match self {
            Self::Boolean => 1,
            Self::Byte => 8,
            Self::Character | Self::Short => 16,
            Self::Integer | Self::Float => 32,
            Self::Long | Self::Double => 64,
            Self::Object | Self::Array | Self::TypeVariable | Self::Wildcard | Self::Void => 0,
        }
    }

    /// Java source keyword for primitive types.
    pub const fn keyword(self) -> Option<&'static str> {
        match self {
            Self::Boolean => Some("boolean"),
            Self::Byte => Some("byte"),
            Self::Character => Some("char"),
            Self::Short => Some("short"),
            Self::Integer => Some("int"),
            Self::Long => Some("long"),
            Self::Float => Some("float"),
            Self::Double => Some("double"),
            Self::Void => Some("void"),
            Self::Object | Self::Array | Self::TypeVariable | Self::Wildcard => None,
        }
    }

    /// Internal name of the wrapper class used when boxing this primitive.
    pub const fn box_class_name(self) -> Option<&'static str> {
        match self {
            Self::Boolean => Some("java/lang/Boolean"),
            Self::Byte => Some("java/lang/Byte"),
            Self::Character => Some("java/lang/Character"),
            Self::Short => Some("java/lang/Short"),
            Self::Integer => Some("java/lang/Integer"),
            Self::Long => Some("java/lang/Long"),
            Self::Float => Some("java/lang/Float"),
            Self::Double => Some("java/lang/Double"),
            _ => None,
        }
    }

    /// Widening primitive conversion (JLS 5.1.2), excluding identity.
    pub const fn widens_to(self, target: Self) -> bool {
        match self {
            Self::Byte => matches!(
                target,
                Self::Short | Self::Integer | Self::Long | Self::Float | Self::Double
            ),
            Self::Short | Self::Character => matches!(
                target,
                Self::Integer | Self::Long | Self::Float | Self::Double
            ),
            Self::Integer => matches!(target, Self::Long | Self::Float | Self::Double),
            Self::Long => matches!(target, Self::Float | Self::Double),
            Self::Float => matches!(target, Self::Double),
            _ => false,
        }
    }

    /// Unary numeric promotion (JLS 5.6.1).
    pub const fn unary_promotion(self) -> Option<Self> {
        match self {
            Self::Byte | Self::Short | Self::Character | Self::Integer => Some(Self::Integer),
            Self::Long | Self::Float | Self::Double => Some(self),
            _ => None,
        }
    }

    /// Binary numeric promotion (JLS 5.6.2).
    pub const fn binary_promotion(left: Self, right: Self) -> Option<Self> {
        if !left.is_numeric() || !right.is_numeric() {
            return None;
        }
        if matches!(left, Self::Double) || matches!(right, Self::Double) {
            Some(Self::Double)
        } else if matches!(left, Self::Float) || matches!(right, Self::Float) {
            Some(Self::Float)
        } else if matches!(left, Self::Long) || matches!(right, Self::Long) {
            Some(Self::Long)
        } else {
            Some(Self::Integer)
        }
    }
}

#[cfg(test)]
#[path = "../tests/jvm_type_tests.rs"]
mod tests;
