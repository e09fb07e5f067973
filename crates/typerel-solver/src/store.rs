//! Type metadata store.
//!
//! `TypeStore` plays the role of a reflection facility: it declares types,
//! builds generic instantiations by substituting arguments into the
//! definition's base type and interfaces, and hands out `TypeId` handles.
//!
//! ## Identity
//!
//! Instantiations are interned by `(definition, arguments)`, so
//! `Dictionary<int, string>` resolved twice yields the same handle and type
//! identity is handle equality. Instantiating a definition with its own
//! parameters yields the definition itself.
//!
//! ## Lifecycle
//!
//! The store is built through `&mut self` methods and then shared as
//! `&TypeStore`. Every relation query takes the store by shared reference and
//! never mutates it, so a built store can serve any number of threads.

use crate::decl::TypeDecl;
use crate::error::{RelationError, StoreError};
use crate::format::TypeFormatter;
use crate::type_expr::TypeExpr;
use crate::types::{TypeDescriptor, TypeFlags, TypeId, TypeKind};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, trace};
use typerel_common::limits::MAX_INSTANTIATION_DEPTH;
use typerel_common::{Atom, Interner};

type ArgList = SmallVec<[TypeId; 2]>;

/// Types with a dedicated role in the relation algorithms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WellKnownTypes {
    /// The universal root every class derives from.
    pub root: Option<TypeId>,
    /// Implicit base of value types.
    pub value_type_root: Option<TypeId>,
    /// The nullable wrapper definition, `Nullable<T>`.
    pub nullable: Option<TypeId>,
}

#[derive(Debug)]
pub struct TypeStore {
    interner: Interner,
    types: Vec<TypeDescriptor>,
    /// `(simple name, arity)` -> declared types, possibly from several namespaces.
    by_simple_name: FxHashMap<(Atom, usize), SmallVec<[TypeId; 1]>>,
    /// `(qualified name, arity)` -> declared type.
    by_qualified_name: FxHashMap<(Atom, usize), TypeId>,
    aliases: FxHashMap<Atom, TypeId>,
    /// First alias registered for a type, used when formatting.
    display_aliases: FxHashMap<TypeId, Atom>,
    instantiations: FxHashMap<(TypeId, ArgList), TypeId>,
    method_parameters: FxHashMap<Atom, TypeId>,
    well_known: WellKnownTypes,
}

impl Default for TypeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeStore {
    /// Create an empty store with no well-known types.
    pub fn new() -> Self {
        let mut interner = Interner::new();
        interner.intern_common();
        Self {
            interner,
            types: Vec::with_capacity(128),
            by_simple_name: FxHashMap::default(),
            by_qualified_name: FxHashMap::default(),
            aliases: FxHashMap::default(),
            display_aliases: FxHashMap::default(),
            instantiations: FxHashMap::default(),
            method_parameters: FxHashMap::default(),
            well_known: WellKnownTypes::default(),
        }
    }

    /// Create a store pre-populated with the core runtime types
    /// (see [`crate::well_known`]).
    pub fn with_core_library() -> Result<Self, StoreError> {
        let mut store = Self::new();
        crate::well_known::install_core_library(&mut store)?;
        Ok(store)
    }

    // =========================================================================
    // Access
    // =========================================================================

    #[inline]
    pub fn get(&self, id: TypeId) -> Option<&TypeDescriptor> {
        self.types.get(id.index())
    }

    /// Like [`get`](Self::get), reporting a foreign handle as misuse.
    #[inline]
    pub fn descriptor(&self, id: TypeId) -> Result<&TypeDescriptor, RelationError> {
        self.get(id).ok_or(RelationError::UnknownType(id))
    }

    #[inline]
    pub fn contains(&self, id: TypeId) -> bool {
        id.index() < self.types.len()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = TypeId> + '_ {
        (0..self.types.len() as u32).map(TypeId)
    }

    pub fn well_known(&self) -> WellKnownTypes {
        self.well_known
    }

    #[inline]
    pub fn is_root(&self, id: TypeId) -> bool {
        self.well_known.root == Some(id)
    }

    /// Generic definition of `id`, if it is generic at all.
    #[inline]
    pub fn definition_of(&self, id: TypeId) -> Option<TypeId> {
        self.get(id).and_then(|d| d.definition)
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    pub fn intern(&mut self, s: &str) -> Atom {
        self.interner.intern(s)
    }

    /// Look up an already interned name, e.g. a binding variable.
    pub fn atom(&self, s: &str) -> Option<Atom> {
        self.interner.lookup(s)
    }

    pub fn resolve_atom(&self, atom: Atom) -> &str {
        self.interner.resolve(atom)
    }

    pub fn display_alias(&self, id: TypeId) -> Option<Atom> {
        self.display_aliases.get(&id).copied()
    }

    /// Short, human-readable name: `List<int>`, `int?`, `IDictionary<TKey, TValue>`.
    pub fn display(&self, id: TypeId) -> String {
        TypeFormatter::new(self).format(id)
    }

    // =========================================================================
    // Roles
    // =========================================================================

    pub fn set_root(&mut self, id: TypeId) -> Result<(), StoreError> {
        let desc = self.descriptor(id)?;
        if !desc.is_class() || desc.is_generic() {
            return Err(self.invalid(id, "the universal root must be a non-generic class"));
        }
        self.well_known.root = Some(id);
        Ok(())
    }

    pub fn set_value_type_root(&mut self, id: TypeId) -> Result<(), StoreError> {
        let desc = self.descriptor(id)?;
        if !desc.is_class() || desc.is_generic() {
            return Err(self.invalid(id, "the value-type root must be a non-generic class"));
        }
        self.well_known.value_type_root = Some(id);
        Ok(())
    }

    pub fn set_nullable_definition(&mut self, id: TypeId) -> Result<(), StoreError> {
        let desc = self.descriptor(id)?;
        if !desc.is_value_type() || !desc.is_generic_definition() || desc.arity() != 1 {
            return Err(self.invalid(
                id,
                "the nullable wrapper must be a value type definition with one parameter",
            ));
        }
        self.well_known.nullable = Some(id);
        Ok(())
    }

    /// Register a keyword alias such as `int` for `System.Int32`.
    pub fn alias(&mut self, alias: &str, target: TypeId) -> Result<(), StoreError> {
        self.descriptor(target)?;
        let atom = self.interner.intern(alias);
        if self.aliases.contains_key(&atom) {
            return Err(StoreError::DuplicateType(alias.to_string()));
        }
        self.aliases.insert(atom, target);
        self.display_aliases.entry(target).or_insert(atom);
        Ok(())
    }

    // =========================================================================
    // Declaration
    // =========================================================================

    /// Declare a type and return its handle.
    ///
    /// The declaration's name is visible while its supertypes are resolved,
    /// so `struct Int32 : IEquatable<Int32>` works. On error the store is
    /// left exactly as it was.
    pub fn declare(&mut self, decl: &TypeDecl) -> Result<TypeId, StoreError> {
        let qualified = decl.qualified_name();
        self.validate_decl(decl, &qualified)?;

        let arity = decl.params.len();
        let name = self.interner.intern(&decl.name);
        let qualified_atom = self.interner.intern(&qualified);
        if self.by_qualified_name.contains_key(&(qualified_atom, arity)) {
            return Err(StoreError::DuplicateType(qualified));
        }
        let namespace = decl
            .namespace
            .as_deref()
            .filter(|ns| !ns.is_empty())
            .map(|ns| self.interner.intern(ns));

        let mark = self.types.len();
        let id = TypeId(mark as u32);
        let mut flags = TypeFlags::empty();
        if decl.is_static {
            flags |= TypeFlags::STATIC | TypeFlags::ABSTRACT | TypeFlags::SEALED;
        }
        if decl.is_abstract {
            flags |= TypeFlags::ABSTRACT;
        }
        if decl.is_sealed || decl.kind == TypeKind::ValueType {
            flags |= TypeFlags::SEALED;
        }
        if arity > 0 {
            flags |= TypeFlags::GENERIC_DEFINITION | TypeFlags::CONTAINS_PARAMETERS;
        }
        self.types.push(TypeDescriptor {
            name,
            namespace,
            kind: decl.kind,
            flags,
            definition: (arity > 0).then_some(id),
            generic_arguments: SmallVec::new(),
            base_type: None,
            interfaces: SmallVec::new(),
            declaring_type: None,
            parameter_position: None,
        });
        self.by_simple_name.entry((name, arity)).or_default().push(id);
        self.by_qualified_name.insert((qualified_atom, arity), id);

        match self.complete_declaration(id, decl) {
            Ok(()) => {
                debug!(
                    type_id = id.0,
                    name = %qualified,
                    kind = ?decl.kind,
                    arity,
                    "TypeStore::declare"
                );
                Ok(id)
            }
            Err(err) => {
                self.rollback(mark);
                Err(err)
            }
        }
    }

    fn validate_decl(&self, decl: &TypeDecl, qualified: &str) -> Result<(), StoreError> {
        let invalid = |reason: &str| StoreError::InvalidDeclaration {
            name: qualified.to_string(),
            reason: reason.to_string(),
        };
        // Names must round-trip through the expression parser.
        match TypeExpr::parse(&decl.name) {
            Ok(TypeExpr::Named { ref name, ref args }) if args.is_empty() && !name.contains('.') => {}
            _ => return Err(invalid("the name must be a simple identifier")),
        }
        if decl.kind == TypeKind::Parameter {
            return Err(invalid("generic parameters are created by their declaring type"));
        }
        if decl.is_static && decl.kind != TypeKind::Class {
            return Err(invalid("only classes can be static"));
        }
        if decl.base.is_some() && decl.kind != TypeKind::Class {
            return Err(invalid("only classes declare a base type"));
        }
        for (i, param) in decl.params.iter().enumerate() {
            if decl.params[..i].contains(param) {
                return Err(invalid("duplicate generic parameter name"));
            }
        }
        Ok(())
    }

    fn complete_declaration(&mut self, id: TypeId, decl: &TypeDecl) -> Result<(), StoreError> {
        let mut scope: Vec<(Atom, TypeId)> = Vec::with_capacity(decl.params.len());
        let mut params = ArgList::new();
        for (position, param) in decl.params.iter().enumerate() {
            let atom = self.interner.intern(param);
            let param_id = TypeId(self.types.len() as u32);
            self.types.push(TypeDescriptor {
                name: atom,
                namespace: None,
                kind: TypeKind::Parameter,
                flags: TypeFlags::empty(),
                definition: None,
                generic_arguments: SmallVec::new(),
                base_type: None,
                interfaces: SmallVec::new(),
                declaring_type: Some(id),
                parameter_position: Some(position as u32),
            });
            scope.push((atom, param_id));
            params.push(param_id);
        }
        self.types[id.index()].generic_arguments = params;

        let base = match &decl.base {
            Some(text) => {
                let base = self.resolve_in(&TypeExpr::parse(text)?, &scope)?;
                let desc = self.descriptor(base)?;
                if !desc.is_class() {
                    return Err(self.invalid(id, "the base type must be a class"));
                }
                if desc.flags.contains(TypeFlags::SEALED) {
                    return Err(self.invalid(id, "the base type is sealed"));
                }
                Some(base)
            }
            None => match decl.kind {
                TypeKind::Class => self.well_known.root.filter(|&root| root != id),
                TypeKind::ValueType => self.well_known.value_type_root,
                TypeKind::Interface | TypeKind::Parameter => None,
            },
        };

        let mut interfaces: SmallVec<[TypeId; 4]> = SmallVec::new();
        for text in &decl.interfaces {
            let iface = self.resolve_in(&TypeExpr::parse(text)?, &scope)?;
            if !self.descriptor(iface)?.is_interface() {
                let shown = self.display(iface);
                return Err(self.invalid(id, &format!("`{shown}` is not an interface")));
            }
            if !interfaces.contains(&iface) {
                interfaces.push(iface);
            }
        }

        let desc = &mut self.types[id.index()];
        desc.base_type = base;
        desc.interfaces = interfaces;

        // Instantiations of this definition made while its supertypes were
        // still unresolved (self-referential declarations) need them now.
        let stale: Vec<TypeId> = self
            .instantiations
            .iter()
            .filter(|((definition, _), _)| *definition == id)
            .map(|(_, &inst)| inst)
            .collect();
        for inst in stale {
            self.fill_supertypes(inst, id, 0)?;
        }
        Ok(())
    }

    /// Forget every type, name and instantiation created at or after `mark`.
    fn rollback(&mut self, mark: usize) {
        trace!(mark, len = self.types.len(), "TypeStore::rollback");
        self.types.truncate(mark);
        let keep = |id: TypeId| id.index() < mark;
        self.instantiations.retain(|(def, args), inst| {
            keep(*def) && keep(*inst) && args.iter().all(|&arg| keep(arg))
        });
        self.by_simple_name.retain(|_, ids| {
            ids.retain(|id| keep(*id));
            !ids.is_empty()
        });
        self.by_qualified_name.retain(|_, id| keep(*id));
        self.aliases.retain(|_, id| keep(*id));
        self.display_aliases.retain(|id, _| keep(*id));
        self.method_parameters.retain(|_, id| keep(*id));
    }

    fn invalid(&self, id: TypeId, reason: &str) -> StoreError {
        StoreError::InvalidDeclaration {
            name: self.display(id),
            reason: reason.to_string(),
        }
    }

    // =========================================================================
    // Instantiation
    // =========================================================================

    /// Build (or fetch) `definition<args...>`.
    ///
    /// Base type and interfaces of the new instantiation are the
    /// definition's, with parameters replaced by `args`.
    pub fn instantiate(&mut self, definition: TypeId, args: &[TypeId]) -> Result<TypeId, StoreError> {
        let mark = self.types.len();
        match self.instantiate_at_depth(definition, args, 0) {
            Ok(id) => Ok(id),
            Err(err) => {
                self.rollback(mark);
                Err(err)
            }
        }
    }

    /// `Nullable<ty>`.
    pub fn nullable_of(&mut self, ty: TypeId) -> Result<TypeId, StoreError> {
        let nullable = self
            .well_known
            .nullable
            .ok_or(StoreError::MissingNullableDefinition)?;
        self.instantiate(nullable, &[ty])
    }

    fn instantiate_at_depth(
        &mut self,
        definition: TypeId,
        args: &[TypeId],
        depth: u32,
    ) -> Result<TypeId, StoreError> {
        if depth > MAX_INSTANTIATION_DEPTH {
            return Err(StoreError::InstantiationTooDeep(self.display(definition)));
        }
        let def = self.descriptor(definition)?;
        if !def.is_generic_definition() {
            return Err(StoreError::NotGenericDefinition(self.display(definition)));
        }
        if def.arity() != args.len() {
            return Err(StoreError::ArityMismatch {
                name: self.display(definition),
                expected: def.arity(),
                found: args.len(),
            });
        }
        if def.generic_arguments.as_slice() == args {
            return Ok(definition);
        }
        let (name, namespace, kind, def_flags) = (def.name, def.namespace, def.kind, def.flags);

        let mut open = false;
        for &arg in args {
            open |= self.descriptor(arg)?.contains_generic_parameters();
        }

        let key = (definition, ArgList::from_slice(args));
        if let Some(&existing) = self.instantiations.get(&key) {
            return Ok(existing);
        }

        let mut flags = def_flags - TypeFlags::GENERIC_DEFINITION - TypeFlags::CONTAINS_PARAMETERS;
        if open {
            flags |= TypeFlags::CONTAINS_PARAMETERS;
        }
        let id = TypeId(self.types.len() as u32);
        self.types.push(TypeDescriptor {
            name,
            namespace,
            kind,
            flags,
            definition: Some(definition),
            generic_arguments: key.1.clone(),
            base_type: None,
            interfaces: SmallVec::new(),
            declaring_type: None,
            parameter_position: None,
        });
        // Registered before the supertypes are computed so that
        // `class Node<T> : Base<Node<T>>` terminates.
        self.instantiations.insert(key, id);
        self.fill_supertypes(id, definition, depth)?;
        trace!(type_id = id.0, definition = definition.0, open, "TypeStore::instantiate");
        Ok(id)
    }

    /// Compute base type and interfaces of instantiation `id` from `definition`.
    fn fill_supertypes(&mut self, id: TypeId, definition: TypeId, depth: u32) -> Result<(), StoreError> {
        let def = &self.types[definition.index()];
        let params = def.generic_arguments.clone();
        let def_base = def.base_type;
        let def_interfaces = def.interfaces.clone();
        let args = self.types[id.index()].generic_arguments.clone();

        let base = match def_base {
            Some(base) => Some(self.substitute(base, &params, &args, depth + 1)?),
            None => None,
        };
        let mut interfaces = SmallVec::with_capacity(def_interfaces.len());
        for iface in def_interfaces {
            interfaces.push(self.substitute(iface, &params, &args, depth + 1)?);
        }

        let desc = &mut self.types[id.index()];
        desc.base_type = base;
        desc.interfaces = interfaces;
        Ok(())
    }

    fn substitute(
        &mut self,
        ty: TypeId,
        params: &[TypeId],
        args: &[TypeId],
        depth: u32,
    ) -> Result<TypeId, StoreError> {
        if let Some(pos) = params.iter().position(|&p| p == ty) {
            return Ok(args[pos]);
        }
        let desc = self.descriptor(ty)?;
        if !desc.contains_generic_parameters() {
            return Ok(ty);
        }
        let Some(definition) = desc.definition else {
            // A parameter that is not being replaced.
            return Ok(ty);
        };
        // A definition here stands for itself applied to its own parameters,
        // which is how `Node<T>` reads inside the declaration of `Node<T>`.
        let inner = desc.generic_arguments.clone();
        let mut replaced = ArgList::with_capacity(inner.len());
        for &arg in &inner {
            replaced.push(self.substitute(arg, params, args, depth)?);
        }
        if replaced == inner {
            return Ok(ty);
        }
        self.instantiate_at_depth(definition, &replaced, depth)
    }

    /// A free generic parameter declared by a method, e.g. `TSource` in
    /// `Count<TSource>(IEnumerable<TSource>)`. Interned by name.
    pub fn method_parameter(&mut self, name: &str) -> TypeId {
        let atom = self.interner.intern(name);
        if let Some(&id) = self.method_parameters.get(&atom) {
            return id;
        }
        let id = TypeId(self.types.len() as u32);
        self.types.push(TypeDescriptor {
            name: atom,
            namespace: None,
            kind: TypeKind::Parameter,
            flags: TypeFlags::METHOD_PARAMETER,
            definition: None,
            generic_arguments: SmallVec::new(),
            base_type: None,
            interfaces: SmallVec::new(),
            declaring_type: None,
            parameter_position: None,
        });
        self.method_parameters.insert(atom, id);
        id
    }

    // =========================================================================
    // Name resolution
    // =========================================================================

    /// Find a declared type by name and arity.
    ///
    /// Keyword aliases are tried first, then qualified names, then simple
    /// names, which must be unambiguous.
    pub fn lookup(&self, name: &str, arity: usize) -> Result<TypeId, StoreError> {
        if let Some(atom) = self.interner.lookup(name) {
            if arity == 0 {
                if let Some(&id) = self.aliases.get(&atom) {
                    return Ok(id);
                }
            }
            if let Some(&id) = self.by_qualified_name.get(&(atom, arity)) {
                return Ok(id);
            }
            if let Some(ids) = self.by_simple_name.get(&(atom, arity)) {
                return match ids.as_slice() {
                    [id] => Ok(*id),
                    _ => Err(StoreError::AmbiguousTypeName {
                        name: name.to_string(),
                        candidates: ids
                            .iter()
                            .map(|&id| self.qualified_name(id))
                            .collect::<Vec<_>>()
                            .join(", "),
                    }),
                };
            }
        }
        Err(self.missing_name(name, arity))
    }

    fn missing_name(&self, name: &str, arity: usize) -> StoreError {
        let Some(atom) = self.interner.lookup(name) else {
            return StoreError::UnknownTypeName(name.to_string());
        };
        let other_arity = self
            .by_simple_name
            .keys()
            .chain(self.by_qualified_name.keys())
            .find(|(n, a)| *n == atom && *a != arity)
            .map(|&(_, a)| a);
        match other_arity {
            Some(expected) => StoreError::ArityMismatch {
                name: name.to_string(),
                expected,
                found: arity,
            },
            None => StoreError::UnknownTypeName(name.to_string()),
        }
    }

    /// Resolve an expression with no generic parameters in scope.
    pub fn resolve(&mut self, expr: &TypeExpr) -> Result<TypeId, StoreError> {
        self.resolve_in(expr, &[])
    }

    /// Resolve an expression where `scope` names generic parameters.
    pub fn resolve_in(&mut self, expr: &TypeExpr, scope: &[(Atom, TypeId)]) -> Result<TypeId, StoreError> {
        match expr {
            TypeExpr::Named { name, args } if args.is_empty() => {
                if let Some(atom) = self.interner.lookup(name) {
                    if let Some(&(_, param)) = scope.iter().find(|(n, _)| *n == atom) {
                        return Ok(param);
                    }
                }
                self.lookup(name, 0)
            }
            TypeExpr::Named { name, args } => {
                let definition = self.lookup(name, args.len())?;
                let mut resolved = ArgList::with_capacity(args.len());
                for arg in args {
                    resolved.push(self.resolve_in(arg, scope)?);
                }
                self.instantiate(definition, &resolved)
            }
            TypeExpr::Open { name, arity } => {
                let definition = self.lookup(name, *arity)?;
                if !self.descriptor(definition)?.is_generic_definition() {
                    return Err(StoreError::NotGenericDefinition(name.clone()));
                }
                Ok(definition)
            }
            TypeExpr::Nullable(inner) => {
                let inner = self.resolve_in(inner, scope)?;
                self.nullable_of(inner)
            }
        }
    }

    /// Parse and resolve a closed or open type: `List<int>`, `IEnumerable<>`.
    pub fn parse_type(&mut self, text: &str) -> Result<TypeId, StoreError> {
        self.resolve(&TypeExpr::parse(text)?)
    }

    /// Parse and resolve a type in which `vars` are free method-level
    /// parameters: `parse_type_with_vars("List<T>", &["T"])`.
    pub fn parse_type_with_vars(&mut self, text: &str, vars: &[&str]) -> Result<TypeId, StoreError> {
        let expr = TypeExpr::parse(text)?;
        let scope: Vec<(Atom, TypeId)> = vars
            .iter()
            .map(|var| {
                let id = self.method_parameter(var);
                (self.interner.intern(var), id)
            })
            .collect();
        self.resolve_in(&expr, &scope)
    }

    /// `Namespace.Name` for declared types; instantiations use their
    /// definition's qualified name.
    pub fn qualified_name(&self, id: TypeId) -> String {
        let Some(desc) = self.get(id) else {
            return format!("<unknown {}>", id.0);
        };
        let name = self.interner.resolve(desc.name);
        match desc.namespace {
            Some(ns) => format!("{}.{name}", self.interner.resolve(ns)),
            None => name.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/store_tests.rs"]
mod tests;
