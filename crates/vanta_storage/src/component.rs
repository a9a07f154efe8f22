//! # Component Capability
//!
//! Components are typed payloads attached to at most one entity per type.
//! Storage is parameterized over this capability trait, so only types the
//! embedder has opted in can flow through sparse sets and registries.

/// Marker trait for component payload types.
///
/// Implementing this trait is the opt-in that lets a type be stored. The
/// storage layer itself needs nothing beyond ownership; `Default` is
/// required only by the default-emplace operations and `Clone` only by the
/// value-broadcasting batch insert.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone, Copy, Debug, Default)]
/// struct Health {
///     current: u32,
///     max: u32,
/// }
///
/// impl Component for Health {}
/// ```
pub trait Component: Send + Sync + 'static {}
