//! Human-readable type names for logs, errors and the CLI.

use crate::store::TypeStore;
use crate::types::TypeId;

/// Formats descriptors in source-like syntax.
///
/// | Descriptor | Output |
/// |------------|--------|
/// | `System.Int32` with alias `int` | `int` |
/// | `List<T>` definition | `List<T>` |
/// | `Dictionary<Int32, String>` | `Dictionary<int, string>` |
/// | `Nullable<Int32>` | `int?` |
pub struct TypeFormatter<'a> {
    store: &'a TypeStore,
    qualified: bool,
    use_aliases: bool,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(store: &'a TypeStore) -> Self {
        Self {
            store,
            qualified: false,
            use_aliases: true,
        }
    }

    /// Print namespaces and skip keyword aliases.
    pub fn qualified(mut self) -> Self {
        self.qualified = true;
        self.use_aliases = false;
        self
    }

    pub fn format(&self, id: TypeId) -> String {
        let mut out = String::new();
        self.write(id, &mut out);
        out
    }

    fn write(&self, id: TypeId, out: &mut String) {
        let Some(desc) = self.store.get(id) else {
            out.push_str(&format!("<unknown {}>", id.0));
            return;
        };

        if self.use_aliases {
            if let Some(alias) = self.store.display_alias(id) {
                out.push_str(self.store.resolve_atom(alias));
                return;
            }
        }

        // Closed `Nullable<X>` reads as `X?`; the definition stays `Nullable<T>`.
        if self.use_aliases
            && desc.definition.is_some()
            && desc.definition == self.store.well_known().nullable
            && !desc.is_generic_definition()
        {
            if let [inner] = desc.generic_arguments.as_slice() {
                self.write(*inner, out);
                out.push('?');
                return;
            }
        }

        if self.qualified {
            out.push_str(&self.store.qualified_name(id));
        } else {
            out.push_str(self.store.resolve_atom(desc.name));
        }

        if !desc.generic_arguments.is_empty() {
            out.push('<');
            for (i, &arg) in desc.generic_arguments.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                self.write(arg, out);
            }
            out.push('>');
        }
    }
}
