//! Card archetypes, the standard catalog, and instance identity.

pub mod archetype;
pub mod catalog;

pub use archetype::{
    Ability, AllyRank, AllySpec, Archetype, ArchetypeId, AttackAbility, AttackEffect, AttackScope,
    CardKind, RelicPower, RelicSpec, ResourceKind, ENERGY_CELL_VALUE, FRAGMENT_POINTS, RELIC_COST,
    RELIC_POINTS,
};
pub use catalog::{
    archetype_of, CardFactory, CardId, CardInstance, Catalog, ALLY_ARCHETYPES, ALLY_STACK_SIZE,
    ENERGY_CELL_COST, ENERGY_CELL_STACK_SIZE, FRAGMENT_COST, FRAGMENT_STACK_SIZE, RELIC_ARCHETYPES,
    STARTING_ENERGY_CELLS, STARTING_FRAGMENTS,
};
