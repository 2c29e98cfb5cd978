//! The standard catalog and the card instance factory.
//!
//! The catalog is the immutable table of every archetype in the base set:
//! two resources, ten allies, ten relics. Card *instances* carry only their
//! unique id and an archetype reference; all stats are looked up here.
//! Instances are minted once by the `CardFactory` and then move between
//! zones by id — ownership transfer, never a copy.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::archetype::{
    Ability, AllyRank, AllySpec, Archetype, ArchetypeId, AttackAbility, AttackEffect, AttackScope,
    CardKind, RelicPower, RelicSpec, ResourceKind,
};

/// Number of ally archetypes in the market.
pub const ALLY_ARCHETYPES: usize = 10;

/// Number of relic archetypes.
pub const RELIC_ARCHETYPES: usize = 10;

/// Copies per ally market stack.
pub const ALLY_STACK_SIZE: usize = 5;

/// Copies in the Fusion Fragment market stack.
pub const FRAGMENT_STACK_SIZE: usize = 8;

/// Copies in the Energy Cell market stack.
pub const ENERGY_CELL_STACK_SIZE: usize = 10;

/// Market cost of an Energy Cell.
pub const ENERGY_CELL_COST: u32 = 1;

/// Market cost of a Fusion Fragment.
pub const FRAGMENT_COST: u32 = 3;

/// Energy Cells in each starting deck.
pub const STARTING_ENERGY_CELLS: usize = 8;

/// Fusion Fragments in each starting deck.
pub const STARTING_FRAGMENTS: usize = 2;

/// Globally unique identity of a card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A stamped card instance. Immutable once minted; zones hold these by id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    pub id: CardId,
    pub archetype: ArchetypeId,
}

/// Mints card instances with unique ids.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFactory {
    next_id: u32,
}

impl CardFactory {
    /// Create a factory starting at id 0.
    #[must_use]
    pub fn new() -> Self {
        Self { next_id: 0 }
    }

    /// Stamp a new instance of the given archetype.
    pub fn mint(&mut self, archetype: ArchetypeId) -> CardInstance {
        let id = CardId(self.next_id);
        self.next_id += 1;
        CardInstance { id, archetype }
    }
}

impl Default for CardFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// The immutable archetype table.
#[derive(Clone, Debug)]
pub struct Catalog {
    archetypes: Vec<Archetype>,
    energy_cell: ArchetypeId,
    fusion_fragment: ArchetypeId,
    allies: Vec<ArchetypeId>,
    relics: Vec<ArchetypeId>,
}

impl Catalog {
    /// Build the standard base-set catalog.
    #[must_use]
    pub fn standard() -> Self {
        let mut archetypes = Vec::new();
        let mut next = 0u16;
        let mut push = |archetypes: &mut Vec<Archetype>, name: &str, kind: CardKind| {
            let id = ArchetypeId::new(next);
            next += 1;
            archetypes.push(Archetype::new(id, name, kind));
            id
        };

        let energy_cell = push(
            &mut archetypes,
            "Energy Cell",
            CardKind::Resource(ResourceKind::EnergyCell),
        );
        let fusion_fragment = push(
            &mut archetypes,
            "Fusion Fragment",
            CardKind::Resource(ResourceKind::FusionFragment),
        );

        let ally = |rank, cost, energy, victory_points, shield_capable, ability| {
            CardKind::Ally(AllySpec {
                rank,
                cost,
                energy,
                victory_points,
                shield_capable,
                ability,
            })
        };
        let attack = |effect, scope, draws, retrieve_option| {
            Some(Ability::Attack(AttackAbility {
                effect,
                scope,
                draws,
                retrieve_option,
            }))
        };

        use AllyRank::{Efficient, Powerful};
        use AttackEffect::{DiscardOne, DustOne};
        use AttackScope::{AllOpponents, SingleOpponent};

        let allies = vec![
            push(
                &mut archetypes,
                "Beacon Relay",
                ally(Efficient, 2, 0, 0, false, Some(Ability::DrawToHandSize { target: 4 })),
            ),
            push(
                &mut archetypes,
                "Scrap Skimmer",
                ally(Efficient, 2, 1, 0, false, Some(Ability::RetrieveEnergyCell)),
            ),
            push(
                &mut archetypes,
                "Fusion Smith",
                ally(Efficient, 3, 1, 0, false, Some(Ability::DiscardFragmentForBonus { bonus: 2 })),
            ),
            push(
                &mut archetypes,
                "Raider Skiff",
                ally(Efficient, 3, 0, 1, false, attack(DiscardOne, SingleOpponent, 1, false)),
            ),
            push(&mut archetypes, "Hull Bastion", ally(Powerful, 4, 2, 1, true, None)),
            push(
                &mut archetypes,
                "Vanguard Warden",
                ally(Powerful, 4, 1, 1, true, attack(DustOne, SingleOpponent, 0, true)),
            ),
            push(
                &mut archetypes,
                "Gate Technician",
                ally(Efficient, 4, 0, 0, false, Some(Ability::DrawAndPrimePowerful)),
            ),
            push(
                &mut archetypes,
                "Venom Envoy",
                ally(Powerful, 5, 1, 0, false, attack(DiscardOne, AllOpponents, 1, false)),
            ),
            push(
                &mut archetypes,
                "Salvage Drones",
                ally(Efficient, 6, 1, 0, false, attack(DustOne, SingleOpponent, 1, false)),
            ),
            push(
                &mut archetypes,
                "Reclaimer Hawk",
                ally(Efficient, 6, 1, 0, false, Some(Ability::RetrieveFromDust { count: 2 })),
            ),
        ];

        let relic = |power, energy| CardKind::Relic(RelicSpec { power, energy });

        let relics = vec![
            push(&mut archetypes, "Overdrive Core", relic(RelicPower::FirstAllyEfficient, 1)),
            push(&mut archetypes, "Dust Reactor", relic(RelicPower::EnergyPerRelic, 0)),
            push(&mut archetypes, "Scrying Array", relic(RelicPower::PeekTopCard, 0)),
            push(&mut archetypes, "Expanded Hold", relic(RelicPower::ExpandedHand, 0)),
            push(&mut archetypes, "Aegis Satellite", relic(RelicPower::SatelliteBlock, 0)),
            push(&mut archetypes, "Signal Cloak", relic(RelicPower::HandFloor, 1)),
            push(&mut archetypes, "Twin Forge", relic(RelicPower::SecondAllyAction, 0)),
            push(&mut archetypes, "Chrono Beacon", relic(RelicPower::RecallFromDiscard, 0)),
            push(&mut archetypes, "Salvage Wings", relic(RelicPower::RetrieveFromDust, 0)),
            push(&mut archetypes, "Muster Helm", relic(RelicPower::RecruitOnAcquire, 0)),
        ];

        Self {
            archetypes,
            energy_cell,
            fusion_fragment,
            allies,
            relics,
        }
    }

    /// Look up an archetype.
    ///
    /// Panics on an unknown id; archetype ids never leave the catalog, so an
    /// unknown id is a programming error, not a player error.
    #[must_use]
    pub fn get(&self, id: ArchetypeId) -> &Archetype {
        &self.archetypes[id.raw() as usize]
    }

    /// The Energy Cell archetype.
    #[must_use]
    pub fn energy_cell(&self) -> ArchetypeId {
        self.energy_cell
    }

    /// The Fusion Fragment archetype.
    #[must_use]
    pub fn fusion_fragment(&self) -> ArchetypeId {
        self.fusion_fragment
    }

    /// The ten ally archetypes in market order.
    #[must_use]
    pub fn allies(&self) -> &[ArchetypeId] {
        &self.allies
    }

    /// The ten relic archetypes.
    #[must_use]
    pub fn relics(&self) -> &[ArchetypeId] {
        &self.relics
    }

    /// Find an ally archetype by name (test convenience).
    #[must_use]
    pub fn find(&self, name: &str) -> Option<ArchetypeId> {
        self.archetypes.iter().find(|a| a.name == name).map(|a| a.id)
    }
}

/// Convenience lookups over an instance table.
pub fn archetype_of<'c>(
    catalog: &'c Catalog,
    cards: &FxHashMap<CardId, CardInstance>,
    id: CardId,
) -> Option<&'c Archetype> {
    cards.get(&id).map(|instance| catalog.get(instance.archetype))
}
