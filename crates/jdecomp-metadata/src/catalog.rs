//! The metadata catalog.
//!
//! `TypeCatalog` is the read-only query surface the resolver and the
//! transforms see. `MetadataCatalog` is the in-memory implementation used
//! when definitions are registered programmatically (tests, embedders that
//! decode class files themselves).

use crate::def::{DefId, TypeDefinition, TypeFlags};
use crate::jvm_type::JvmType;
use crate::members::MemberReference;
use crate::types::{GenericParameter, TypeRef};
use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use tracing::trace;

/// Global counter for assigning unique instance IDs to catalogs.
static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

/// Query interface over loaded type metadata.
pub trait TypeCatalog: Send + Sync {
    fn definition(&self, id: DefId) -> Option<Arc<TypeDefinition>>;

    /// Look up a definition by internal name (`java/lang/String`).
    fn lookup(&self, internal_name: &str) -> Option<DefId>;

    fn well_known(&self) -> &WellKnownTypes;
}

/// `DefId`s of the `java.lang` types the conversion rules refer to.
#[derive(Clone, Debug)]
pub struct WellKnownTypes {
    pub object: DefId,
    pub string: DefId,
    pub number: DefId,
    pub comparable: DefId,
    pub serializable: DefId,
    pub cloneable: DefId,
    /// Box classes in `JvmType` primitive order: boolean, byte, char,
    /// short, int, long, float, double.
    pub boxes: [DefId; 8],
}

const BOX_ORDER: [JvmType; 8] = [
    JvmType::Boolean,
    JvmType::Byte,
    JvmType::Character,
    JvmType::Short,
    JvmType::Integer,
    JvmType::Long,
    JvmType::Float,
    JvmType::Double,
];

impl WellKnownTypes {
    pub fn object_type(&self) -> TypeRef {
        TypeRef::class(self.object)
    }

    pub fn string_type(&self) -> TypeRef {
        TypeRef::class(self.string)
    }

    /// The wrapper class of a primitive.
    pub fn box_of(&self, primitive: JvmType) -> Option<DefId> {
        BOX_ORDER
            .iter()
            .position(|p| *p == primitive)
            .map(|i| self.boxes[i])
    }

    /// The primitive wrapped by a box class.
    pub fn unbox_of(&self, def: DefId) -> Option<JvmType> {
        self.boxes
            .iter()
            .position(|b| *b == def)
            .map(|i| BOX_ORDER[i])
    }
}

/// In-memory catalog backed by a concurrent map.
///
/// A fresh catalog already contains `java/lang/Object`, `java/lang/Number`,
/// `java/lang/String`, `java/lang/Comparable`, `java/io/Serializable`,
/// `java/lang/Cloneable` and the eight box classes.
pub struct MetadataCatalog {
    /// Unique instance ID for debugging.
    instance_id: u64,
    definitions: DashMap<DefId, Arc<TypeDefinition>>,
    by_name: DashMap<Arc<str>, DefId>,
    next_id: AtomicU32,
    well_known: WellKnownTypes,
}

impl Default for MetadataCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataCatalog {
    pub fn new() -> Self {
        let instance_id = NEXT_INSTANCE_ID.fetch_add(1, Ordering::SeqCst);
        trace!(instance_id, "MetadataCatalog::new - creating new instance");
        let mut catalog = Self {
            instance_id,
            definitions: DashMap::new(),
            by_name: DashMap::new(),
            next_id: AtomicU32::new(DefId::FIRST_VALID),
            well_known: WellKnownTypes {
                object: DefId::INVALID,
                string: DefId::INVALID,
                number: DefId::INVALID,
                comparable: DefId::INVALID,
                serializable: DefId::INVALID,
                cloneable: DefId::INVALID,
                boxes: [DefId::INVALID; 8],
            },
        };
        catalog.well_known = catalog.bootstrap();
        catalog
    }

    fn bootstrap(&self) -> WellKnownTypes {
        let object = self.register(TypeDefinition::class("java/lang/Object"));
        let serializable = self.register(TypeDefinition::interface("java/io/Serializable"));
        let cloneable = self.register(TypeDefinition::interface("java/lang/Cloneable"));
        let comparable = self.register(
            TypeDefinition::interface("java/lang/Comparable")
                .with_generic_parameters(vec![GenericParameter::new("T")]),
        );
        let number = self.register(
            TypeDefinition::class("java/lang/Number")
                .with_flags(TypeFlags::ABSTRACT)
                .with_base_type(TypeRef::class(object))
                .with_interfaces(vec![TypeRef::class(serializable)]),
        );
        let comparable_of = |def: DefId| TypeRef::generic(comparable, vec![TypeRef::class(def)]);

        let string = self.register_with(|id| {
            TypeDefinition::class("java/lang/String")
                .with_flags(TypeFlags::FINAL)
                .with_base_type(TypeRef::class(object))
                .with_interfaces(vec![TypeRef::class(serializable), comparable_of(id)])
        });

        let mut boxes = [DefId::INVALID; 8];
        for (slot, primitive) in boxes.iter_mut().zip(BOX_ORDER) {
            let Some(name) = primitive.box_class_name() else {
                continue;
            };
            *slot = self.register_with(|id| {
                let definition = TypeDefinition::class(name).with_flags(TypeFlags::FINAL);
                if primitive.is_numeric() && primitive != JvmType::Character {
                    definition
                        .with_base_type(TypeRef::class(number))
                        .with_interfaces(vec![comparable_of(id)])
                } else {
                    definition
                        .with_base_type(TypeRef::class(object))
                        .with_interfaces(vec![TypeRef::class(serializable), comparable_of(id)])
                }
            });
        }

        WellKnownTypes {
            object,
            string,
            number,
            comparable,
            serializable,
            cloneable,
            boxes,
        }
    }

    /// Allocate a fresh `DefId`.
    fn allocate(&self) -> DefId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        trace!(
            instance_id = self.instance_id,
            allocated_def_id = id,
            "MetadataCatalog::allocate"
        );
        DefId(id)
    }

    /// Register a new definition and return its `DefId`.
    pub fn register(&self, definition: TypeDefinition) -> DefId {
        self.register_with(|_| definition)
    }

    /// Register a definition whose supertypes or members mention its own
    /// `DefId` (e.g. `class Foo implements Comparable<Foo>`).
    pub fn register_with(&self, build: impl FnOnce(DefId) -> TypeDefinition) -> DefId {
        let id = self.allocate();
        let definition = build(id);
        trace!(
            instance_id = self.instance_id,
            def_id = id.0,
            name = %definition.internal_name,
            kind = ?definition.kind,
            "MetadataCatalog::register"
        );
        self.by_name
            .insert(Arc::clone(&definition.internal_name), id);
        self.definitions.insert(id, Arc::new(definition));
        id
    }

    /// Add a member to an existing definition. Returns `false` if `def` is unknown.
    pub fn add_member(&self, def: DefId, member: MemberReference) -> bool {
        let Some(mut entry) = self.definitions.get_mut(&def) else {
            return false;
        };
        trace!(def_id = def.0, member = %member.name, "MetadataCatalog::add_member");
        Arc::make_mut(entry.value_mut()).add_member(Arc::new(member));
        true
    }

    pub fn contains(&self, id: DefId) -> bool {
        self.definitions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl TypeCatalog for MetadataCatalog {
    fn definition(&self, id: DefId) -> Option<Arc<TypeDefinition>> {
        self.definitions.get(&id).map(|r| Arc::clone(r.value()))
    }

    fn lookup(&self, internal_name: &str) -> Option<DefId> {
        self.by_name.get(internal_name).map(|r| *r.value())
    }

    fn well_known(&self) -> &WellKnownTypes {
        &self.well_known
    }
}

#[cfg(test)]
#[path = "../tests/catalog_tests.rs"]
mod tests;
