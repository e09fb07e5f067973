//! Type descriptors.
//!
//! A `TypeDescriptor` is the immutable metadata the engine reasons about:
//! identity, generic shape, base type and implemented interfaces. Descriptors
//! live in a [`TypeStore`](crate::TypeStore) and are referenced by `TypeId`
//! handles. Instantiations are interned, so two handles denote the same type
//! exactly when they are equal.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use typerel_common::Atom;

/// Handle to a descriptor in a `TypeStore`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId(pub u32);

impl TypeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// What kind of type a descriptor denotes.
///
/// | Kind | Base type | Example |
/// |------|-----------|---------|
/// | Class | root or declared | `List<T>` |
/// | Interface | none | `IEnumerable<T>` |
/// | ValueType | value-type root | `Int32`, `Nullable<T>` |
/// | Parameter | none | `T` in `List<T>` |
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Interface,
    #[serde(rename = "struct")]
    ValueType,
    Parameter,
}

bitflags! {
    /// Pre-computed descriptor properties.
    ///
    /// Computed once when the descriptor is produced and never recomputed.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct TypeFlags: u16 {
        /// Open generic definition: `List<>`, `IDictionary<,>`.
        const GENERIC_DEFINITION = 1 << 0;
        /// Some generic argument, at any depth, is a generic parameter.
        const CONTAINS_PARAMETERS = 1 << 1;
        /// Generic parameter declared by a method rather than a type.
        const METHOD_PARAMETER = 1 << 2;
        /// Class with no instance constructor and only static members.
        const STATIC = 1 << 3;
        const ABSTRACT = 1 << 4;
        const SEALED = 1 << 5;
    }
}

/// Immutable metadata for one type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Simple name without arity: `Dictionary`, `T`.
    pub name: Atom,
    /// Namespace, if any: `System.Collections.Generic`.
    pub namespace: Option<Atom>,
    pub kind: TypeKind,
    pub flags: TypeFlags,
    /// The generic definition this type was built from.
    /// A definition points at itself; non-generic types have none.
    pub definition: Option<TypeId>,
    /// Parameters for a definition, arguments for an instantiation.
    pub generic_arguments: SmallVec<[TypeId; 2]>,
    pub base_type: Option<TypeId>,
    /// Directly declared interfaces. Inherited ones are reached by walking.
    pub interfaces: SmallVec<[TypeId; 4]>,
    /// For generic parameters: the declaring type (none for method parameters)
    /// and the position in its parameter list.
    pub declaring_type: Option<TypeId>,
    pub parameter_position: Option<u32>,
}

impl TypeDescriptor {
    #[inline]
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    #[inline]
    pub fn is_class(&self) -> bool {
        self.kind == TypeKind::Class
    }

    #[inline]
    pub fn is_value_type(&self) -> bool {
        self.kind == TypeKind::ValueType
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.flags.contains(TypeFlags::STATIC)
    }

    #[inline]
    pub fn is_generic_parameter(&self) -> bool {
        self.kind == TypeKind::Parameter
    }

    #[inline]
    pub fn is_generic_definition(&self) -> bool {
        self.flags.contains(TypeFlags::GENERIC_DEFINITION)
    }

    /// Definition or instantiation of a generic type.
    #[inline]
    pub fn is_generic(&self) -> bool {
        self.definition.is_some()
    }

    #[inline]
    pub fn contains_generic_parameters(&self) -> bool {
        self.is_generic_parameter() || self.flags.contains(TypeFlags::CONTAINS_PARAMETERS)
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.generic_arguments.len()
    }
}
