//! Pattern shape classification.
//!
//! Both generic-definition assignability and structural matching dispatch on
//! the shape of the type on the "pattern" side:
//!
//! | Shape | Example |
//! |-------|---------|
//! | Variable | `T` |
//! | Plain | `int`, `IEnumerable` |
//! | NullableWrapper | `Nullable<>`, `T?`, `int?` |
//! | Definition | `IDictionary<,>` |
//! | Facade | `IEnumerable<TSource>` taken from `Count<TSource>(IEnumerable<TSource>)` |
//! | Instantiation | `List<int>`, `List<KeyValuePair<TKey, int>>` |
//!
//! A facade looks like an ordinary constructed type, but every argument is a
//! free parameter, so it stands for its generic definition. Reflection
//! facilities produce these for parameter types of generic methods.

use crate::error::RelationError;
use crate::store::TypeStore;
use crate::types::TypeId;
use typerel_common::Atom;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PatternShape {
    Variable { name: Atom },
    Plain,
    NullableWrapper { definition: TypeId, open: bool },
    Definition { definition: TypeId },
    Facade { definition: TypeId },
    Instantiation { definition: TypeId },
}

impl PatternShape {
    pub fn classify(store: &TypeStore, ty: TypeId) -> Result<Self, RelationError> {
        let desc = store.descriptor(ty)?;
        if desc.is_generic_parameter() {
            return Ok(PatternShape::Variable { name: desc.name });
        }
        let Some(definition) = desc.definition else {
            return Ok(PatternShape::Plain);
        };

        let facade = !desc.is_generic_definition()
            && desc
                .generic_arguments
                .iter()
                .all(|&arg| store.get(arg).is_some_and(|d| d.is_generic_parameter()));

        if store.well_known().nullable == Some(definition) {
            return Ok(PatternShape::NullableWrapper {
                definition,
                open: desc.is_generic_definition() || facade,
            });
        }
        Ok(if desc.is_generic_definition() {
            PatternShape::Definition { definition }
        } else if facade {
            PatternShape::Facade { definition }
        } else {
            PatternShape::Instantiation { definition }
        })
    }

    /// The generic definition behind a generic shape.
    pub fn definition(self) -> Option<TypeId> {
        match self {
            PatternShape::Variable { .. } | PatternShape::Plain => None,
            PatternShape::NullableWrapper { definition, .. }
            | PatternShape::Definition { definition }
            | PatternShape::Facade { definition }
            | PatternShape::Instantiation { definition } => Some(definition),
        }
    }

    /// Shapes that stand for "any instantiation of the definition".
    pub fn is_open_generic(self) -> bool {
        matches!(
            self,
            PatternShape::Definition { .. }
                | PatternShape::Facade { .. }
                | PatternShape::NullableWrapper { open: true, .. }
        )
    }
}

#[cfg(test)]
#[path = "../tests/shape_tests.rs"]
mod tests;
