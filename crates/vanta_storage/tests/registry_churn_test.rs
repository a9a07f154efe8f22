//! Integration test: registry-driven component churn across two types.

use vanta_storage::{
    registry, Component, ComponentStore, EntityId, Registry, SparseSet, StorageError,
};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Position {
    x: f32,
    y: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Health {
    current: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Unregistered;

impl Component for Position {}
impl Component for Health {}
impl Component for Unregistered {}

registry! {
    /// Component storage for the test simulation.
    struct SimRegistry {
        positions: Position,
        healths: Health,
    }
}

fn id(index: usize) -> EntityId {
    EntityId::new(index)
}

#[test]
fn test_type_isolation_across_sets() {
    let mut sim = SimRegistry::new();

    sim.emplace::<Position>(id(5)).unwrap();

    assert!(sim.contains_type::<Position>());
    assert!(sim.contains_type::<Health>());
    assert!(!sim.contains_type::<Unregistered>());

    // Id 5 holds a Position but Health's set never saw it.
    assert!(sim.get::<Position>(id(5)).is_ok());
    assert_eq!(
        sim.get::<Health>(id(5)),
        Err(StorageError::MissingComponent { entity: id(5) })
    );
    assert!(ComponentStore::<Health>::store(&sim).is_empty());
}

#[test]
fn test_churn_keeps_sets_consistent() {
    let mut sim = SimRegistry::new();
    let entities: Vec<EntityId> = (0..64).map(EntityId::new).collect();

    let results = sim.emplace_all::<Health>(&entities);
    assert!(results.iter().all(Result::is_ok));

    // Knock out every odd id, then verify the even ones survived intact.
    let victims: Vec<EntityId> = entities
        .iter()
        .copied()
        .filter(|e| e.index() % 2 == 1)
        .collect();
    let removed = ComponentStore::<Health>::store_mut(&mut sim).remove_all(&victims);
    assert!(removed.iter().all(Result::is_ok));

    let healths: &SparseSet<Health> = sim.store();
    assert_eq!(healths.count(), 32);
    for entity in entities.iter().filter(|e| e.index() % 2 == 0) {
        assert!(healths.contains(*entity));
    }
    for entity in entities.iter().filter(|e| e.index() % 2 == 1) {
        assert_eq!(
            sim.get::<Health>(*entity),
            Err(StorageError::MissingComponent { entity: *entity })
        );
    }

    // Dense iteration sees exactly the survivors, tightly packed.
    let seen: Vec<usize> = healths.entities().map(EntityId::index).collect();
    assert_eq!(seen.len(), 32);
    assert!(seen.iter().all(|index| index % 2 == 0));
}

#[test]
fn test_mutation_through_the_registry() {
    let mut sim = SimRegistry::new();

    sim.emplace::<Health>(id(9)).unwrap();
    sim.get_mut::<Health>(id(9)).unwrap().current = 250;
    assert_eq!(sim.get::<Health>(id(9)).unwrap().current, 250);

    // Direct set access composes with the typed surface.
    ComponentStore::<Position>::store_mut(&mut sim)
        .insert(id(10), Position { x: 1.0, y: 2.0 })
        .unwrap();
    let position = sim.get::<Position>(id(10)).unwrap();
    assert!((position.x - 1.0).abs() < f32::EPSILON);
    assert!((position.y - 2.0).abs() < f32::EPSILON);
}

#[test]
fn test_get_all_with_aliasing_ids() {
    let mut sim = SimRegistry::new();

    sim.emplace::<Health>(id(1)).unwrap();
    sim.emplace::<Health>(id(2)).unwrap();

    let results = sim.get_all::<Health>(&[id(1), id(1), id(2), id(3)]);
    assert_eq!(results.len(), 4);
    assert!(results[0].is_ok());
    assert!(results[1].is_ok());
    assert!(results[2].is_ok());
    assert_eq!(
        results[3],
        Err(StorageError::MissingComponent { entity: id(3) })
    );
}

#[test]
fn test_batch_failures_do_not_roll_back() {
    let mut sim = SimRegistry::new();

    sim.emplace::<Position>(id(2)).unwrap();
    let results = sim.emplace_all::<Position>(&[id(1), id(2), id(3)]);

    assert_eq!(results[0], Ok(()));
    assert_eq!(
        results[1],
        Err(StorageError::DuplicateComponent { entity: id(2) })
    );
    assert_eq!(results[2], Ok(()));

    // The failed middle id never disturbed its neighbours.
    assert!(ComponentStore::<Position>::store(&sim).contains_all(&[id(1), id(2), id(3)]));
}

#[test]
fn test_reserve_extends_a_registry_set() {
    let mut sim = SimRegistry::new();
    let far = id(vanta_storage::DEFAULT_SPARSE_CAPACITY + 100);

    assert_eq!(
        sim.emplace::<Health>(far),
        Err(StorageError::CapacityExceeded {
            entity: far,
            capacity: vanta_storage::DEFAULT_SPARSE_CAPACITY,
        })
    );

    ComponentStore::<Health>::store_mut(&mut sim).reserve(far.index() + 1);
    sim.emplace::<Health>(far).unwrap();
    assert!(sim.get::<Health>(far).is_ok());
}
