//! Conversion classification between two types.
//!
//! `get_conversion_type(target, source)` answers "what does it take to turn a
//! value of type `source` into a `target`":
//!
//! | Source \ Target | primitive | reference |
//! |-----------------|-----------|-----------|
//! | primitive | identity / widening / narrowing | boxing |
//! | reference | unboxing | identity / upcast / downcast |
//! | `null` | none | implicit |

use crate::catalog::TypeCatalog;
use crate::instantiate::erase;
use crate::jvm_type::JvmType;
use crate::relations::is_sub_type;
use crate::types::TypeRef;

/// How a value of one type converts to another.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConversionType {
    /// No legal conversion exists, not even with a cast.
    None,
    /// Both types are the same.
    Identity,
    /// Legal without any syntax (widening, boxing, upcast).
    Implicit,
    /// Requires a cast (narrowing, downcast).
    Explicit,
    /// Requires a cast and crosses the boxed/primitive boundary.
    ExplicitToUnboxed,
}

impl ConversionType {
    /// The value converts without a cast.
    pub const fn is_implicit(self) -> bool {
        matches!(self, Self::Identity | Self::Implicit)
    }

    /// The conversion needs a cast.
    pub const fn is_explicit(self) -> bool {
        matches!(self, Self::Explicit | Self::ExplicitToUnboxed)
    }
}

pub fn get_conversion_type(
    catalog: &dyn TypeCatalog,
    target: &TypeRef,
    source: &TypeRef,
) -> ConversionType {
    if target == source {
        return ConversionType::Identity;
    }
    match (target, source) {
        (_, TypeRef::Null) => {
            if target.is_reference() {
                ConversionType::Implicit
            } else {
                ConversionType::None
            }
        }
        (TypeRef::Primitive(t), TypeRef::Primitive(s)) => primitive_conversion(*t, *s),
        (TypeRef::Primitive(t), _) => unboxing_conversion(catalog, *t, source),
        (_, TypeRef::Primitive(s)) => boxing_conversion(catalog, target, *s),
        _ => reference_conversion(catalog, target, source),
    }
}

/// Conversion between two primitive types.
pub const fn primitive_conversion(target: JvmType, source: JvmType) -> ConversionType {
    if !target.is_primitive() || !source.is_primitive() {
        return ConversionType::None;
    }
    if target as u8 == source as u8 {
        return ConversionType::Identity;
    }
    if matches!(target, JvmType::Boolean) || matches!(source, JvmType::Boolean) {
        return ConversionType::None;
    }
    if source.widens_to(target) {
        ConversionType::Implicit
    } else {
        ConversionType::Explicit
    }
}

/// The box class type of a primitive.
pub fn box_type(catalog: &dyn TypeCatalog, primitive: JvmType) -> Option<TypeRef> {
    catalog.well_known().box_of(primitive).map(TypeRef::class)
}

/// The primitive a box class type wraps.
pub fn unboxed_type(catalog: &dyn TypeCatalog, ty: &TypeRef) -> Option<JvmType> {
    let class = ty.as_class()?;
    catalog.well_known().unbox_of(class.def)
}

pub fn is_boxed_type(catalog: &dyn TypeCatalog, ty: &TypeRef) -> bool {
    unboxed_type(catalog, ty).is_some()
}

/// The primitive type of `ty`, unboxing box classes.
pub fn underlying_primitive(catalog: &dyn TypeCatalog, ty: &TypeRef) -> Option<JvmType> {
    match ty {
        TypeRef::Primitive(p) if p.is_primitive() => Some(*p),
        _ => unboxed_type(catalog, ty),
    }
}

fn unboxing_conversion(catalog: &dyn TypeCatalog, target: JvmType, source: &TypeRef) -> ConversionType {
    if !target.is_primitive() {
        return ConversionType::None;
    }
    if let Some(unboxed) = unboxed_type(catalog, source) {
        return match primitive_conversion(target, unboxed) {
            ConversionType::Identity | ConversionType::Implicit => ConversionType::Implicit,
            ConversionType::Explicit | ConversionType::ExplicitToUnboxed => {
                ConversionType::ExplicitToUnboxed
            }
            ConversionType::None => ConversionType::None,
        };
    }
    // (int) obj: a checked cast to the box followed by unboxing.
    let Some(boxed) = box_type(catalog, target) else {
        return ConversionType::None;
    };
    let source = erase(catalog, source);
    if is_sub_type(catalog, &boxed, &source) {
        ConversionType::ExplicitToUnboxed
    } else {
        ConversionType::None
    }
}

fn boxing_conversion(catalog: &dyn TypeCatalog, target: &TypeRef, source: JvmType) -> ConversionType {
    let Some(boxed) = box_type(catalog, source) else {
        return ConversionType::None;
    };
    if is_sub_type(catalog, &boxed, target) {
        return ConversionType::Implicit;
    }
    match unboxed_type(catalog, target) {
        Some(target_primitive) => match primitive_conversion(target_primitive, source) {
            ConversionType::Implicit | ConversionType::Explicit => ConversionType::Explicit,
            _ => ConversionType::None,
        },
        None => ConversionType::None,
    }
}

fn reference_conversion(catalog: &dyn TypeCatalog, target: &TypeRef, source: &TypeRef) -> ConversionType {
    let well_known = catalog.well_known();
    if target.as_class().is_some_and(|c| c.def == well_known.object) {
        return ConversionType::Implicit;
    }
    if is_sub_type(catalog, source, target) {
        return ConversionType::Implicit;
    }

    if let (TypeRef::Array(target_element), TypeRef::Array(source_element)) = (target, source) {
        if target_element.is_primitive() || source_element.is_primitive() {
            return ConversionType::None;
        }
        return match reference_conversion(catalog, target_element, source_element) {
            ConversionType::None => ConversionType::None,
            ConversionType::Identity | ConversionType::Implicit => ConversionType::Implicit,
            ConversionType::Explicit | ConversionType::ExplicitToUnboxed => ConversionType::Explicit,
        };
    }

    if is_sub_type(catalog, target, source) {
        return ConversionType::Explicit;
    }

    let erased_target = erase(catalog, target);
    let erased_source = erase(catalog, source);
    if is_sub_type(catalog, &erased_target, &erased_source)
        || is_sub_type(catalog, &erased_source, &erased_target)
    {
        return ConversionType::Explicit;
    }

    // An interface may be implemented by any non-final class.
    let target_def = erased_target.as_class().and_then(|c| catalog.definition(c.def));
    let source_def = erased_source.as_class().and_then(|c| catalog.definition(c.def));
    if let (Some(t), Some(s)) = (target_def, source_def) {
        let castable = (t.is_interface() && !s.is_final()) || (s.is_interface() && !t.is_final());
        if castable {
            return ConversionType::Explicit;
        }
    }
    ConversionType::None
}

#[cfg(test)]
#[path = "../tests/conversions_tests.rs"]
mod tests;
