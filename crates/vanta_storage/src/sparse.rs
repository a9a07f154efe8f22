//! # Sparse Set Storage
//!
//! Dense, cache-friendly storage for a single component type, indexed by
//! entity id through a sparse lookup array.
//!
//! ## Layout
//!
//! ```text
//! sparse:  [None, Some(1), None, Some(0)]  <- entity id -> dense position
//! dense:   [C3, C1]                        <- packed component values
//! reverse: [3, 1]                          <- dense position -> entity id
//! ```
//!
//! Insert, remove and lookup are O(1). Iteration walks `dense` linearly,
//! so live components always sit in contiguous memory. Removal swaps the
//! vacated slot with the last element, which keeps the packing but means
//! dense order reflects insertion/removal history, not entity id order.

use crate::component::Component;
use crate::entity::EntityId;
use crate::error::{reject, StorageError, StorageResult};

/// Default number of component slots reserved in the dense array.
pub const DEFAULT_DENSE_CAPACITY: usize = 2048;

/// Default sparse capacity: the entity id range a fresh set can index.
pub const DEFAULT_SPARSE_CAPACITY: usize = 16384;

/// Sparse set for a single component type.
///
/// Three co-indexed arrays back the set (see the module docs). The
/// following invariants hold after every public operation:
///
/// 1. `dense` and `reverse` have the same length.
/// 2. `sparse[e] == Some(i)` implies `reverse[i] == e`.
/// 3. `sparse[reverse[i]] == Some(i)` for every dense position `i`.
/// 4. An entity holds at most one component of this type.
/// 5. The sparse length changes only through [`SparseSet::reserve`];
///    ids at or beyond it are rejected, never silently accommodated.
///
/// Absence is an explicit `None` slot, so no dense index can ever alias
/// an "absent" marker.
///
/// # Example
///
/// ```rust,ignore
/// let mut healths: SparseSet<Health> = SparseSet::new();
/// healths.insert(EntityId::new(7), Health::full(100))?;
/// assert!(healths.contains(EntityId::new(7)));
/// ```
#[derive(Clone, Debug)]
pub struct SparseSet<C: Component> {
    /// Entity id -> dense position, `None` when absent.
    sparse: Vec<Option<usize>>,
    /// Packed component values.
    dense: Vec<C>,
    /// Dense position -> owning entity id.
    reverse: Vec<EntityId>,
}

impl<C: Component> SparseSet<C> {
    /// Creates a set with the default dense and sparse capacities.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_DENSE_CAPACITY, DEFAULT_SPARSE_CAPACITY)
    }

    /// Creates a set with explicit capacities.
    ///
    /// `dense_capacity` is a heap reservation for the expected number of
    /// live components. `sparse_capacity` fixes the valid entity id range:
    /// ids in `0..sparse_capacity` are accepted, everything else is
    /// rejected until [`SparseSet::reserve`] grows the range.
    #[must_use]
    pub fn with_capacity(dense_capacity: usize, sparse_capacity: usize) -> Self {
        Self {
            sparse: vec![None; sparse_capacity],
            dense: Vec::with_capacity(dense_capacity),
            reverse: Vec::with_capacity(dense_capacity),
        }
    }

    /// Number of live components in the set.
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.dense.len()
    }

    /// True when the set holds no components.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Sparse capacity: the entity id range this set can index.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.sparse.len()
    }

    /// True when `entity` currently holds a component.
    #[inline]
    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.dense_index(entity).is_some()
    }

    /// The component held by `entity`, or `None` when the id is out of
    /// range or holds nothing.
    #[inline]
    #[must_use]
    pub fn get(&self, entity: EntityId) -> Option<&C> {
        self.dense_index(entity).map(|index| &self.dense[index])
    }

    /// Mutable variant of [`SparseSet::get`].
    #[inline]
    pub fn get_mut(&mut self, entity: EntityId) -> Option<&mut C> {
        self.dense_index(entity).map(|index| &mut self.dense[index])
    }

    /// Stores `value` for `entity`.
    ///
    /// # Errors
    ///
    /// [`StorageError::CapacityExceeded`] when the id is out of range,
    /// [`StorageError::DuplicateComponent`] when the entity already holds
    /// a component. Either way the set is untouched.
    pub fn insert(&mut self, entity: EntityId, value: C) -> StorageResult<()> {
        self.check_capacity(entity)?;
        if self.contains(entity) {
            return reject(StorageError::DuplicateComponent { entity });
        }

        self.sparse[entity.index()] = Some(self.dense.len());
        self.dense.push(value);
        self.reverse.push(entity);
        Ok(())
    }

    /// Stores a default-constructed component for `entity`.
    ///
    /// # Errors
    ///
    /// Fails exactly like [`SparseSet::insert`].
    pub fn emplace_default(&mut self, entity: EntityId) -> StorageResult<()>
    where
        C: Default,
    {
        self.insert(entity, C::default())
    }

    /// Removes and returns the component held by `entity`.
    ///
    /// The vacated dense slot is filled by swapping in the last element
    /// and re-pointing its sparse entry, so removal is O(1) at the cost
    /// of reordering dense storage. Removing the last live element swaps
    /// it with itself, which leaves nothing to re-point.
    ///
    /// # Errors
    ///
    /// [`StorageError::MissingComponent`] when the id is out of range or
    /// holds nothing; the set is untouched.
    pub fn remove(&mut self, entity: EntityId) -> StorageResult<C> {
        let Some(index) = self.dense_index(entity) else {
            return reject(StorageError::MissingComponent { entity });
        };

        let last = self.dense.len() - 1;
        let moved = self.reverse[last];
        let value = self.dense.swap_remove(index);
        self.reverse.swap_remove(index);
        if index != last {
            self.sparse[moved.index()] = Some(index);
        }
        self.sparse[entity.index()] = None;
        Ok(value)
    }

    /// Grows the sparse index range to at least `capacity`.
    ///
    /// New slots start absent. A `capacity` at or below the current one
    /// is a no-op; the range never shrinks.
    pub fn reserve(&mut self, capacity: usize) {
        if capacity > self.sparse.len() {
            self.sparse.resize(capacity, None);
        }
    }

    /// Stores a clone of `value` for every id in `entities`.
    ///
    /// Ids are processed in order and independently: one result per id,
    /// earlier successes are never rolled back, and a duplicate id fails
    /// on its second occurrence just like a separate call would. An empty
    /// batch is a no-op.
    pub fn insert_all(&mut self, entities: &[EntityId], value: &C) -> Vec<StorageResult<()>>
    where
        C: Clone,
    {
        entities
            .iter()
            .map(|&entity| self.insert(entity, value.clone()))
            .collect()
    }

    /// Stores a default-constructed component for every id in `entities`.
    ///
    /// Same per-id independence as [`SparseSet::insert_all`].
    pub fn emplace_all(&mut self, entities: &[EntityId]) -> Vec<StorageResult<()>>
    where
        C: Default,
    {
        entities
            .iter()
            .map(|&entity| self.emplace_default(entity))
            .collect()
    }

    /// Removes the component of every id in `entities`.
    ///
    /// Same per-id independence as [`SparseSet::insert_all`].
    pub fn remove_all(&mut self, entities: &[EntityId]) -> Vec<StorageResult<C>> {
        entities.iter().map(|&entity| self.remove(entity)).collect()
    }

    /// True when every id in `entities` currently holds a component.
    #[must_use]
    pub fn contains_all(&self, entities: &[EntityId]) -> bool {
        entities.iter().all(|&entity| self.contains(entity))
    }

    /// Empties the set.
    ///
    /// All three arrays are cleared together; clearing one of them in
    /// isolation would break the cross-array invariants, so no partial
    /// variant exists. The sparse capacity is preserved.
    pub fn clear(&mut self) {
        self.dense.clear();
        self.reverse.clear();
        for slot in &mut self.sparse {
            *slot = None;
        }
    }

    /// Releases excess heap capacity of all three arrays together.
    ///
    /// The sparse *length* (the valid id range) is untouched; only unused
    /// allocation beyond it is returned.
    pub fn shrink_to_fit(&mut self) {
        self.dense.shrink_to_fit();
        self.reverse.shrink_to_fit();
        self.sparse.shrink_to_fit();
    }

    /// Iterates `(entity, component)` pairs in dense order.
    ///
    /// Dense order reflects insertion/removal history. The borrow rules
    /// make iterating and mutating the same set mutually exclusive, so an
    /// iterator can never observe a half-applied removal.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &C)> {
        self.reverse.iter().copied().zip(self.dense.iter())
    }

    /// Iterates the owning entity ids in dense order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.reverse.iter().copied()
    }

    /// Iterates live component values in dense order.
    pub fn values(&self) -> impl Iterator<Item = &C> {
        self.dense.iter()
    }

    /// Mutable variant of [`SparseSet::values`].
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut C> {
        self.dense.iter_mut()
    }

    /// The packed component values as a slice, for batch processing.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[C] {
        &self.dense
    }

    /// Mutable variant of [`SparseSet::as_slice`].
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [C] {
        &mut self.dense
    }

    #[inline]
    fn dense_index(&self, entity: EntityId) -> Option<usize> {
        self.sparse.get(entity.index()).copied().flatten()
    }

    fn check_capacity(&self, entity: EntityId) -> StorageResult<()> {
        if entity.index() < self.sparse.len() {
            Ok(())
        } else {
            reject(StorageError::CapacityExceeded {
                entity,
                capacity: self.sparse.len(),
            })
        }
    }
}

impl<C: Component> Default for SparseSet<C> {
    fn default() -> Self {
        Self::new()
    }
}
