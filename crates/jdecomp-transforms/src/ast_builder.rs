//! Type syntax construction.
//!
//! `AstBuilder` turns a `TypeRef` into type-syntax nodes (`SimpleType`,
//! `WildcardType`, `ComposedType`) and annotates every produced node with
//! the type it denotes, so the resolver can read cast types back without a
//! name lookup.

use jdecomp_ast::{NodeArena, NodeIndex, StructuralError, WildcardKind};
use jdecomp_metadata::{DefId, TypeCatalog, TypeRef, WildcardBound};
use std::sync::Arc;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ConvertTypeOptions {
    /// Emit wildcard type arguments. When false, `? extends B` becomes `B`
    /// and other wildcards become `Object`.
    pub allow_wildcards: bool,
    /// Emit type arguments at all. When false, generic classes are written
    /// as raw types.
    pub include_type_arguments: bool,
}

impl Default for ConvertTypeOptions {
    fn default() -> Self {
        Self {
            allow_wildcards: true,
            include_type_arguments: true,
        }
    }
}

pub struct AstBuilder {
    catalog: Arc<dyn TypeCatalog>,
    options: ConvertTypeOptions,
}

impl AstBuilder {
    pub fn new(catalog: Arc<dyn TypeCatalog>) -> Self {
        Self {
            catalog,
            options: ConvertTypeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ConvertTypeOptions) -> Self {
        self.options = options;
        self
    }

    /// Options used by `convert_type`.
    pub fn options(&self) -> ConvertTypeOptions {
        self.options
    }

    /// Build type syntax for `ty` with the builder's default options.
    pub fn convert_type(&self, arena: &mut NodeArena, ty: &TypeRef) -> Result<NodeIndex, StructuralError> {
        self.convert_type_with(arena, ty, self.options)
    }

    /// Build type syntax for `ty`. The returned node is detached.
    pub fn convert_type_with(
        &self,
        arena: &mut NodeArena,
        ty: &TypeRef,
        options: ConvertTypeOptions,
    ) -> Result<NodeIndex, StructuralError> {
        let normalized = self.normalize(ty, options, true);
        self.emit(arena, &normalized)
    }

    /// The type the produced syntax will denote under `options`.
    fn normalize(&self, ty: &TypeRef, options: ConvertTypeOptions, top_level: bool) -> TypeRef {
        match ty {
            TypeRef::Class(class) => {
                if !options.include_type_arguments || class.type_arguments.is_empty() {
                    return TypeRef::class(class.def);
                }
                let arguments = class
                    .type_arguments
                    .iter()
                    .map(|arg| self.normalize(arg, options, false))
                    .collect();
                TypeRef::generic(class.def, arguments)
            }
            TypeRef::Array(element) => TypeRef::array(self.normalize(element, options, false)),
            // A wildcard only makes sense as a type argument.
            TypeRef::Wildcard(bound) if options.allow_wildcards && !top_level => match bound {
                WildcardBound::Unbounded => TypeRef::unbounded_wildcard(),
                WildcardBound::Extends(upper) => {
                    TypeRef::extends_wildcard(self.normalize(upper, options, false))
                }
                WildcardBound::Super(lower) => {
                    TypeRef::super_wildcard(self.normalize(lower, options, false))
                }
            },
            TypeRef::Wildcard(WildcardBound::Extends(upper)) => self.normalize(upper, options, top_level),
            TypeRef::Wildcard(_) | TypeRef::Null => self.catalog.well_known().object_type(),
            TypeRef::Primitive(_) | TypeRef::TypeVariable(_) => ty.clone(),
        }
    }

    fn emit(&self, arena: &mut NodeArena, ty: &TypeRef) -> Result<NodeIndex, StructuralError> {
        let node = match ty {
            TypeRef::Primitive(primitive) => arena.add_simple_type(primitive.keyword().unwrap_or("void"), &[])?,
            TypeRef::Class(class) => {
                let arguments = class
                    .type_arguments
                    .iter()
                    .map(|arg| self.emit(arena, arg))
                    .collect::<Result<Vec<_>, _>>()?;
                arena.add_simple_type(&self.type_name(class.def), &arguments)?
            }
            TypeRef::TypeVariable(var) => arena.add_simple_type(&var.name, &[])?,
            TypeRef::Wildcard(bound) => match bound {
                WildcardBound::Unbounded => arena.add_wildcard_type(WildcardKind::Unbounded, NodeIndex::NONE)?,
                WildcardBound::Extends(upper) => {
                    let upper = self.emit(arena, upper)?;
                    arena.add_wildcard_type(WildcardKind::Extends, upper)?
                }
                WildcardBound::Super(lower) => {
                    let lower = self.emit(arena, lower)?;
                    arena.add_wildcard_type(WildcardKind::Super, lower)?
                }
            },
            TypeRef::Array(_) => {
                let mut rank = 0u32;
                let mut element = ty;
                while let TypeRef::Array(inner) = element {
                    rank += 1;
                    element = inner.as_ref();
                }
                let element = self.emit(arena, element)?;
                arena.add_composed_type(element, rank)?
            }
            TypeRef::Null => arena.add_simple_type("Object", &[])?,
        };
        arena.set_type_reference(node, ty.clone());
        Ok(node)
    }

    /// Simple name of a class, without package or enclosing classes.
    fn type_name(&self, def: DefId) -> String {
        self.catalog
            .definition(def)
            .map_or_else(|| format!("<unknown {def}>"), |d| d.simple_name().to_string())
    }
}

#[cfg(test)]
#[path = "../tests/ast_builder_tests.rs"]
mod tests;
