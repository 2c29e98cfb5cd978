//! Card archetypes: the immutable definitions cards are stamped from.
//!
//! Abilities are a closed enumeration with typed parameters, resolved by
//! exhaustive pattern match. There is no free-text dispatch anywhere: a card
//! either carries one of these variants or it has no ability.
//!
//! ## Kinds
//!
//! - **Resource**: Energy Cells (energy 1) and Fusion Fragments (2 VP).
//! - **Ally**: market cards with a rank, cost, energy contribution, optional
//!   victory points, optional shield capability, and at most one ability.
//!   Attack abilities are mutually exclusive with non-attack abilities.
//! - **Relic**: fixed cost 8, fixed 5 VP, one relic power each. Owning any
//!   relic forces dusting one hand card at the start of each turn.

use serde::{Deserialize, Serialize};

/// Fixed cost of every relic.
pub const RELIC_COST: u32 = 8;

/// Victory points per relic.
pub const RELIC_POINTS: u32 = 5;

/// Victory points per Fusion Fragment.
pub const FRAGMENT_POINTS: u32 = 2;

/// Energy produced by one Energy Cell in the play area.
pub const ENERGY_CELL_VALUE: u32 = 1;

/// Identifier of a card archetype in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArchetypeId(pub u16);

impl ArchetypeId {
    /// Create a new archetype ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

/// Resource subkinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Produces 1 energy while in the play area.
    EnergyCell,
    /// Produces no energy; worth 2 VP at scoring.
    FusionFragment,
}

/// Ally ranks. Efficient allies never consume the per-turn ally action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllyRank {
    Efficient,
    Powerful,
}

/// What an attack takes from its victim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackEffect {
    /// Victim discards one card of their choice.
    DiscardOne,
    /// Victim dusts one card of their choice.
    DustOne,
}

/// How many opponents an attack touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackScope {
    /// One opponent; selected by the attacker in 3-4 player games.
    SingleOpponent,
    /// Every opponent, processed sequentially in rotation order.
    AllOpponents,
}

/// An attack ability and its secondary effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackAbility {
    pub effect: AttackEffect,
    pub scope: AttackScope,
    /// Cards the attacker draws once every victim has been processed. This
    /// resolves even when the attack is blocked or the victim has no cards.
    pub draws: u8,
    /// The attacker may instead retrieve one of the Dust's non-relic cards,
    /// skipping the attack entirely.
    pub retrieve_option: bool,
}

/// Closed set of ally abilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ability {
    /// Draw until the hand holds `target` cards.
    DrawToHandSize { target: usize },
    /// Retrieve one Energy Cell from the Dust, if any.
    RetrieveEnergyCell,
    /// Optionally discard a Fusion Fragment from hand for bonus energy.
    DiscardFragmentForBonus { bonus: u32 },
    /// Draw 1 and treat the next Powerful ally played this turn as Efficient.
    DrawAndPrimePowerful,
    /// Retrieve up to `count` non-relic cards from the Dust.
    RetrieveFromDust { count: usize },
    /// Attack an opponent or all opponents.
    Attack(AttackAbility),
}

impl Ability {
    /// Whether this is an attack-type ability.
    #[must_use]
    pub fn is_attack(&self) -> bool {
        matches!(self, Ability::Attack(_))
    }
}

/// Closed set of relic powers.
///
/// Passive powers are consulted where they apply (energy accounting, hand
/// targets, play legality); triggered powers fire during Relic phase or, for
/// `RecruitOnAcquire`, at acquisition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelicPower {
    /// Passive: the first ally played each turn is treated as Efficient.
    FirstAllyEfficient,
    /// Triggered: gain 1 energy per relic the owner has acquired.
    EnergyPerRelic,
    /// Triggered: look at the top deck card, dust/discard/keep it, draw 1.
    PeekTopCard,
    /// Passive: end-of-turn hand target becomes 6.
    ExpandedHand,
    /// Passive: blocks the first attack that would harm the owner each round.
    SatelliteBlock,
    /// Passive: hand minimum during opponents' turns becomes 4.
    HandFloor,
    /// Passive: a second ally action each turn.
    SecondAllyAction,
    /// Triggered: move one discard-pile card to the top of the deck.
    RecallFromDiscard,
    /// Triggered: retrieve one Dust card whose name differs from every card
    /// in hand.
    RetrieveFromDust,
    /// On acquisition: recruit market allies totalling cost 7 or less.
    RecruitOnAcquire,
}

impl RelicPower {
    /// Whether the power does something when triggered during Relic phase.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        matches!(
            self,
            RelicPower::EnergyPerRelic
                | RelicPower::PeekTopCard
                | RelicPower::RecallFromDiscard
                | RelicPower::RetrieveFromDust
        )
    }
}

/// Ally archetype data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllySpec {
    pub rank: AllyRank,
    pub cost: u32,
    pub energy: u32,
    pub victory_points: u32,
    /// May be installed in the shield slot.
    pub shield_capable: bool,
    pub ability: Option<Ability>,
}

/// Relic archetype data. Cost and VP are fixed crate-wide constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelicSpec {
    pub power: RelicPower,
    pub energy: u32,
}

/// The three card kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardKind {
    Resource(ResourceKind),
    Ally(AllySpec),
    Relic(RelicSpec),
}

/// An immutable card archetype. Instances reference archetypes by id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archetype {
    pub id: ArchetypeId,
    pub name: String,
    pub kind: CardKind,
}

impl Archetype {
    /// Create a new archetype.
    pub fn new(id: ArchetypeId, name: impl Into<String>, kind: CardKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
        }
    }

    /// Energy this card contributes from the play area, active relic row, or
    /// a face-up shield slot.
    #[must_use]
    pub fn energy(&self) -> u32 {
        match &self.kind {
            CardKind::Resource(ResourceKind::EnergyCell) => ENERGY_CELL_VALUE,
            CardKind::Resource(ResourceKind::FusionFragment) => 0,
            CardKind::Ally(spec) => spec.energy,
            CardKind::Relic(spec) => spec.energy,
        }
    }

    /// Victory points this single card is worth at scoring.
    #[must_use]
    pub fn victory_points(&self) -> u32 {
        match &self.kind {
            CardKind::Resource(ResourceKind::EnergyCell) => 0,
            CardKind::Resource(ResourceKind::FusionFragment) => FRAGMENT_POINTS,
            CardKind::Ally(spec) => spec.victory_points,
            CardKind::Relic(_) => RELIC_POINTS,
        }
    }

    /// Whether this is a relic.
    #[must_use]
    pub fn is_relic(&self) -> bool {
        matches!(self.kind, CardKind::Relic(_))
    }

    /// Whether this is an Energy Cell.
    #[must_use]
    pub fn is_energy_cell(&self) -> bool {
        matches!(self.kind, CardKind::Resource(ResourceKind::EnergyCell))
    }

    /// Whether this is a Fusion Fragment.
    #[must_use]
    pub fn is_fusion_fragment(&self) -> bool {
        matches!(self.kind, CardKind::Resource(ResourceKind::FusionFragment))
    }

    /// Ally data, if this is an ally.
    #[must_use]
    pub fn ally(&self) -> Option<&AllySpec> {
        match &self.kind {
            CardKind::Ally(spec) => Some(spec),
            _ => None,
        }
    }

    /// Relic data, if this is a relic.
    #[must_use]
    pub fn relic(&self) -> Option<&RelicSpec> {
        match &self.kind {
            CardKind::Relic(spec) => Some(spec),
            _ => None,
        }
    }

    /// The attack ability, if this card carries one.
    #[must_use]
    pub fn attack(&self) -> Option<AttackAbility> {
        match &self.kind {
            CardKind::Ally(AllySpec {
                ability: Some(Ability::Attack(attack)),
                ..
            }) => Some(*attack),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attack_ally(attack: AttackAbility) -> Archetype {
        Archetype::new(
            ArchetypeId::new(0),
            "Test Ally",
            CardKind::Ally(AllySpec {
                rank: AllyRank::Efficient,
                cost: 3,
                energy: 1,
                victory_points: 0,
                shield_capable: false,
                ability: Some(Ability::Attack(attack)),
            }),
        )
    }

    #[test]
    fn test_energy_contributions() {
        let cell = Archetype::new(
            ArchetypeId::new(0),
            "Energy Cell",
            CardKind::Resource(ResourceKind::EnergyCell),
        );
        let fragment = Archetype::new(
            ArchetypeId::new(1),
            "Fusion Fragment",
            CardKind::Resource(ResourceKind::FusionFragment),
        );

        assert_eq!(cell.energy(), 1);
        assert_eq!(fragment.energy(), 0);
        assert_eq!(fragment.victory_points(), FRAGMENT_POINTS);
    }

    #[test]
    fn test_relic_worth() {
        let relic = Archetype::new(
            ArchetypeId::new(2),
            "Dust Reactor",
            CardKind::Relic(RelicSpec {
                power: RelicPower::EnergyPerRelic,
                energy: 0,
            }),
        );

        assert!(relic.is_relic());
        assert_eq!(relic.victory_points(), RELIC_POINTS);
    }

    #[test]
    fn test_attack_extraction() {
        let attack = AttackAbility {
            effect: AttackEffect::DiscardOne,
            scope: AttackScope::SingleOpponent,
            draws: 1,
            retrieve_option: false,
        };
        let ally = attack_ally(attack);

        assert_eq!(ally.attack(), Some(attack));
        assert!(ally.ally().unwrap().ability.unwrap().is_attack());
    }

    #[test]
    fn test_triggered_powers() {
        assert!(RelicPower::EnergyPerRelic.is_triggered());
        assert!(RelicPower::PeekTopCard.is_triggered());
        assert!(!RelicPower::SatelliteBlock.is_triggered());
        assert!(!RelicPower::SecondAllyAction.is_triggered());
    }

    #[test]
    fn test_archetype_serialization() {
        let attack = AttackAbility {
            effect: AttackEffect::DustOne,
            scope: AttackScope::AllOpponents,
            draws: 1,
            retrieve_option: false,
        };
        let ally = attack_ally(attack);

        let json = serde_json::to_string(&ally).unwrap();
        let restored: Archetype = serde_json::from_str(&json).unwrap();

        assert_eq!(ally, restored);
    }
}
