//! Centralized limits for the type-relationship engine.
//!
//! Every walk in the engine terminates by construction: inheritance chains
//! are finite and generic instantiation depth is finite. These limits guard
//! against malformed universes (a base-type cycle injected by a broken
//! metadata source, a self-expanding generic, runaway type text) so a bad
//! input degrades into a negative answer or an error instead of a stack
//! overflow.

// =============================================================================
// Hierarchy walks
// =============================================================================

/// Maximum number of base-type hops followed from a single type.
///
/// Real class hierarchies are a handful of levels deep. A chain longer than
/// this means the metadata contains a cycle, and the walk stops.
///
/// ```text
/// SqlCommand -> DbCommand -> Component -> MarshalByRefObject -> Object
/// ```
pub const MAX_ANCESTOR_DEPTH: u32 = 256;

/// Maximum number of distinct types collected into one ancestry
/// (self + base chain + transitive interfaces).
pub const MAX_ANCESTRY_SIZE: usize = 4096;

// =============================================================================
// Parsing
// =============================================================================

/// Maximum nesting of generic arguments in a textual type expression.
///
/// The type-expression parser recurses once per level. Text nested deeper
/// than this is rejected with a parse error instead of exhausting the stack.
///
/// ```text
/// List<List<List<List</* ... 1000 levels ... */>>>>
/// ```
pub const MAX_PARSER_RECURSION_DEPTH: u32 = 1_000;

// =============================================================================
// Instantiation
// =============================================================================

/// Maximum nesting depth when substituting generic arguments into base types
/// and interfaces of a new instantiation.
///
/// ```text
/// class Node<T> : Base<Node<Node<T>>>   // expands forever without a bound
/// ```
pub const MAX_INSTANTIATION_DEPTH: u32 = 50;
