//! Type declarations.
//!
//! A `TypeDecl` is the input a metadata source hands to
//! [`TypeStore::declare`](crate::TypeStore::declare). Supertypes are written
//! as type expressions and may refer to the declaration's own generic
//! parameters by name:
//!
//! ```ignore
//! let derived = store.declare(
//!     &TypeDecl::class("Derived")
//!         .with_params(["T"])
//!         .extends("Base<T>")
//!         .implements(["IBase<T>"]),
//! )?;
//! ```
//!
//! Declarations deserialize from JSON, which is how universe files are
//! loaded:
//!
//! ```json
//! { "name": "Derived", "params": ["T"], "base": "Base<T>", "interfaces": ["IBase<T>"] }
//! ```

use crate::types::TypeKind;
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TypeDecl {
    pub name: String,

    #[serde(default)]
    pub namespace: Option<String>,

    #[serde(default = "default_kind")]
    pub kind: TypeKind,

    /// Generic parameter names. Non-empty makes this a generic definition.
    #[serde(default)]
    pub params: Vec<String>,

    /// Base class expression. Classes default to the universal root and
    /// value types to the value-type root.
    #[serde(default)]
    pub base: Option<String>,

    #[serde(default)]
    pub interfaces: Vec<String>,

    #[serde(default, rename = "static")]
    pub is_static: bool,

    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,

    #[serde(default, rename = "sealed")]
    pub is_sealed: bool,
}

const fn default_kind() -> TypeKind {
    TypeKind::Class
}

impl TypeDecl {
    fn new(name: &str, kind: TypeKind) -> Self {
        Self {
            name: name.to_string(),
            namespace: None,
            kind,
            params: Vec::new(),
            base: None,
            interfaces: Vec::new(),
            is_static: false,
            is_abstract: false,
            is_sealed: false,
        }
    }

    pub fn class(name: &str) -> Self {
        Self::new(name, TypeKind::Class)
    }

    pub fn interface(name: &str) -> Self {
        Self::new(name, TypeKind::Interface)
    }

    pub fn value_type(name: &str) -> Self {
        Self::new(name, TypeKind::ValueType)
    }

    pub fn in_namespace(mut self, namespace: &str) -> Self {
        self.namespace = Some(namespace.to_string());
        self
    }

    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn extends(mut self, base: &str) -> Self {
        self.base = Some(base.to_string());
        self
    }

    pub fn implements<I, S>(mut self, interfaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interfaces
            .extend(interfaces.into_iter().map(Into::into));
        self
    }

    /// `static class`: abstract and sealed, no instance constructor.
    pub const fn static_class(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub const fn abstract_class(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub const fn sealed(mut self) -> Self {
        self.is_sealed = true;
        self
    }

    /// `Namespace.Name`, or just the name.
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) if !ns.is_empty() => format!("{ns}.{}", self.name),
            _ => self.name.clone(),
        }
    }
}
