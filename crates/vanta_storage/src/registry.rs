//! # Component Registry
//!
//! Typed dispatch over a closed collection of sparse sets, one per
//! declared component type.
//!
//! A registry type is declared once, over a fixed type list, with the
//! [`registry!`](crate::registry!) macro. The macro stamps out one
//! [`SparseSet`] field per type together with the [`ComponentStore`]
//! accessor impls, so every generic operation resolves at compile time and
//! an undeclared type is a build error, not a runtime failure. The
//! registry adds no storage algorithm of its own: each call routes to the
//! matching set and fails exactly the way the set fails.

use crate::component::Component;
use crate::entity::EntityId;
use crate::error::{reject, StorageError, StorageResult};
use crate::sparse::SparseSet;

/// Access to the sparse set a registry holds for component type `C`.
///
/// Implementations are generated by [`registry!`](crate::registry!) for
/// every declared type. A type outside the declared list has no impl, so
/// requesting it does not compile.
pub trait ComponentStore<C: Component> {
    /// Shared access to the set storing `C`.
    fn store(&self) -> &SparseSet<C>;

    /// Exclusive access to the set storing `C`.
    fn store_mut(&mut self) -> &mut SparseSet<C>;
}

/// Uniform typed surface over a registry's sparse sets.
///
/// Only [`Registry::contains_type`] is required (the declared type list is
/// known to the macro expansion alone); every other operation is provided
/// here and routes through [`ComponentStore`].
pub trait Registry {
    /// True when `C` is part of this registry's declared type list.
    ///
    /// Unlike the other operations this is callable with *any* component
    /// type, declared or not, so callers can probe a configuration.
    fn contains_type<C: Component>(&self) -> bool;

    /// Default-constructs a `C` for `entity` in `C`'s sparse set.
    ///
    /// # Errors
    ///
    /// Fails exactly like [`SparseSet::emplace_default`].
    fn emplace<C>(&mut self, entity: EntityId) -> StorageResult<()>
    where
        C: Component + Default,
        Self: ComponentStore<C>,
    {
        self.store_mut().emplace_default(entity)
    }

    /// Applies [`Registry::emplace`] to each id independently.
    ///
    /// One result per id, in order; earlier successes are never rolled
    /// back, and a repeated id fails on its second occurrence.
    fn emplace_all<C>(&mut self, entities: &[EntityId]) -> Vec<StorageResult<()>>
    where
        C: Component + Default,
        Self: ComponentStore<C>,
    {
        self.store_mut().emplace_all(entities)
    }

    /// The component of type `C` held by `entity`.
    ///
    /// # Errors
    ///
    /// [`StorageError::MissingComponent`] when `entity` is out of range or
    /// holds no `C`. A required lookup that found nothing is an explicit
    /// failure, never an unchecked reference into storage.
    fn get<C>(&self, entity: EntityId) -> StorageResult<&C>
    where
        C: Component,
        Self: ComponentStore<C>,
    {
        match self.store().get(entity) {
            Some(value) => Ok(value),
            None => reject(StorageError::MissingComponent { entity }),
        }
    }

    /// Mutable variant of [`Registry::get`].
    ///
    /// # Errors
    ///
    /// Fails exactly like [`Registry::get`].
    fn get_mut<C>(&mut self, entity: EntityId) -> StorageResult<&mut C>
    where
        C: Component,
        Self: ComponentStore<C>,
    {
        match self.store_mut().get_mut(entity) {
            Some(value) => Ok(value),
            None => reject(StorageError::MissingComponent { entity }),
        }
    }

    /// Per-id [`Registry::get`] results for every id in `entities`.
    ///
    /// Ids may repeat or alias the same entity; each lookup is resolved
    /// independently and no consistency guarantee ties the results
    /// together.
    fn get_all<C>(&self, entities: &[EntityId]) -> Vec<StorageResult<&C>>
    where
        C: Component,
        Self: ComponentStore<C>,
    {
        entities.iter().map(|&entity| self.get(entity)).collect()
    }
}

/// Declares a registry over a fixed, compile-time list of component types.
///
/// Expands to a struct holding one [`SparseSet`] per listed type (created
/// with the default capacities), a `new()`/`Default` constructor, the
/// [`ComponentStore`] accessor impl for every declared type and the
/// [`Registry`] impl. The type list is closed: listing a type twice does
/// not compile (conflicting accessor impls), and neither does requesting
/// a type that was never listed.
///
/// # Example
///
/// ```rust,ignore
/// registry! {
///     /// Component storage for the simulation.
///     pub struct SimRegistry {
///         positions: Position,
///         healths: Health,
///     }
/// }
///
/// let mut sim = SimRegistry::new();
/// sim.emplace::<Health>(EntityId::new(4))?;
/// let health = sim.get::<Health>(EntityId::new(4))?;
/// ```
#[macro_export]
macro_rules! registry {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_attr:meta])*
                $field:ident: $component:ty
            ),+ $(,)?
        }
    ) => {
        $(#[$attr])*
        $vis struct $name {
            $(
                $(#[$field_attr])*
                $field: $crate::SparseSet<$component>,
            )+
        }

        impl $name {
            /// Creates the registry with one default-sized sparse set per
            /// declared component type.
            #[must_use]
            $vis fn new() -> Self {
                Self {
                    $($field: $crate::SparseSet::new(),)+
                }
            }
        }

        impl ::core::default::Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        $(
            impl $crate::ComponentStore<$component> for $name {
                fn store(&self) -> &$crate::SparseSet<$component> {
                    &self.$field
                }

                fn store_mut(&mut self) -> &mut $crate::SparseSet<$component> {
                    &mut self.$field
                }
            }
        )+

        impl $crate::Registry for $name {
            fn contains_type<C: $crate::Component>(&self) -> bool {
                let declared = [$(::core::any::TypeId::of::<$component>()),+];
                declared.contains(&::core::any::TypeId::of::<C>())
            }
        }
    };
}
