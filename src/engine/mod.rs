//! The game engine: authorization, dispatch, snapshots, and setup.
//!
//! `GameEngine` owns the immutable catalog and the authoritative state. The
//! single entry point is [`GameEngine::apply`]: it validates the requesting
//! player against the current authorization, snapshots the mutable state,
//! dispatches the action, and on rejection restores the pre-action state so
//! rejections never leave side effects.
//!
//! Handler implementations live in the sibling modules (`play`, `market`,
//! `turn`, `attack`, `choices`, `resolver`), all as `impl GameEngine`
//! blocks.

pub mod action;
pub mod attack;
pub mod choices;
pub mod energy;
pub mod market;
pub mod play;
pub mod resolver;
pub mod score;
pub mod turn;
pub mod view;

use log::debug;

use crate::cards::{CardFactory, CardId, CardKind, Catalog, ALLY_STACK_SIZE, ENERGY_CELL_COST,
    ENERGY_CELL_STACK_SIZE, FRAGMENT_COST, FRAGMENT_STACK_SIZE, STARTING_ENERGY_CELLS,
    STARTING_FRAGMENTS};
use crate::core::{GameLog, GameRng, PlayerId, PlayerMap, MAX_PLAYERS, MIN_PLAYERS};
use crate::error::ActionError;
use crate::state::{
    CoreState, GameState, Market, MarketStack, Pending, PendingChoice, Phase, PlayerState,
    RelicRow, HAND_TARGET,
};

pub use action::{Action, PeekDecision};

use rustc_hash::FxHashMap;

/// The authoritative rules engine for one match.
pub struct GameEngine {
    catalog: Catalog,
    state: GameState,
}

/// Builder for a new match.
pub struct GameBuilder {
    players: usize,
    seed: u64,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self { players: 2, seed: 0 }
    }
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of seats (2-4).
    pub fn players(mut self, count: usize) -> Self {
        assert!(
            (MIN_PLAYERS..=MAX_PLAYERS).contains(&count),
            "player count must be {MIN_PLAYERS}-{MAX_PLAYERS}"
        );
        self.players = count;
        self
    }

    /// RNG seed for all shuffles.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Build the engine with shuffled decks and populated market.
    pub fn build(self) -> GameEngine {
        let catalog = Catalog::standard();
        let mut factory = CardFactory::new();
        let mut cards = FxHashMap::default();
        let mut rng = GameRng::new(self.seed);

        // Market: one stack of 5 per ally archetype, then fragments and cells.
        let mut stacks = Vec::new();
        for &archetype in catalog.allies() {
            let cost = catalog.get(archetype).ally().expect("ally archetype").cost;
            let mut stack = Vec::with_capacity(ALLY_STACK_SIZE);
            for _ in 0..ALLY_STACK_SIZE {
                let instance = factory.mint(archetype);
                cards.insert(instance.id, instance);
                stack.push(instance.id);
            }
            stacks.push(MarketStack {
                archetype,
                cost,
                cards: stack,
            });
        }
        for (archetype, cost, copies) in [
            (catalog.fusion_fragment(), FRAGMENT_COST, FRAGMENT_STACK_SIZE),
            (catalog.energy_cell(), ENERGY_CELL_COST, ENERGY_CELL_STACK_SIZE),
        ] {
            let mut stack = Vec::with_capacity(copies);
            for _ in 0..copies {
                let instance = factory.mint(archetype);
                cards.insert(instance.id, instance);
                stack.push(instance.id);
            }
            stacks.push(MarketStack {
                archetype,
                cost,
                cards: stack,
            });
        }

        // Relic row: one instance per relic archetype, shuffled, split 5/5.
        let mut relic_ids: Vec<CardId> = catalog
            .relics()
            .iter()
            .map(|&archetype| {
                let instance = factory.mint(archetype);
                cards.insert(instance.id, instance);
                instance.id
            })
            .collect();
        rng.shuffle(&mut relic_ids);
        let second = relic_ids.split_off(relic_ids.len() / 2);
        let relic_row = RelicRow {
            piles: [relic_ids, second],
        };

        // Starting decks: 8 Energy Cells + 2 Fusion Fragments, shuffled,
        // 5 drawn into hand.
        let players = PlayerMap::new(self.players, |_| PlayerState::default());
        let mut core = CoreState {
            players,
            cards,
            market: Market { stacks },
            relic_row,
            dust: Vec::new(),
            available_energy: 0,
            phase: Phase::Relic,
            turn_number: 1,
            current_player: PlayerId::new(0),
            end_turn_requested: false,
            final_round: None,
            game_over: false,
            pending: None,
            log: GameLog::new(),
            rng,
            factory,
        };

        for seat in PlayerId::all(self.players) {
            let mut deck = Vec::with_capacity(STARTING_ENERGY_CELLS + STARTING_FRAGMENTS);
            for _ in 0..STARTING_ENERGY_CELLS {
                let instance = core.factory.mint(catalog.energy_cell());
                core.cards.insert(instance.id, instance);
                deck.push(instance.id);
            }
            for _ in 0..STARTING_FRAGMENTS {
                let instance = core.factory.mint(catalog.fusion_fragment());
                core.cards.insert(instance.id, instance);
                deck.push(instance.id);
            }
            core.rng.shuffle(&mut deck);
            let hand = deck.split_off(deck.len() - HAND_TARGET);
            let player = core.player_mut(seat);
            player.deck = deck;
            player.hand = hand;
        }

        let mut engine = GameEngine {
            catalog,
            state: GameState::new(core),
        };
        engine.begin_turn(PlayerId::new(0));
        engine
    }
}

impl GameEngine {
    /// Start a match with defaults (2 players, seed 0).
    #[must_use]
    pub fn new(players: usize, seed: u64) -> Self {
        GameBuilder::new().players(players).seed(seed).build()
    }

    /// Rehydrate an engine around state loaded from an external store.
    ///
    /// The state shape is owned by the store; the engine only requires that
    /// it was produced by [`GameEngine::into_state`] (or deserialized from
    /// its serde form).
    #[must_use]
    pub fn from_state(state: GameState) -> Self {
        Self {
            catalog: Catalog::standard(),
            state,
        }
    }

    /// Surrender the state to an external store.
    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    /// The archetype catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The full state (core + history).
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The mutable core of the state, read-only.
    #[must_use]
    pub fn core(&self) -> &CoreState {
        &self.state.core
    }

    /// Apply one action from `actor`.
    ///
    /// On success the pre-action snapshot joins the undo history; on
    /// rejection the state is exactly as before the call.
    pub fn apply(&mut self, actor: PlayerId, action: Action) -> Result<(), ActionError> {
        self.authorize(actor, &action)?;

        if matches!(action, Action::Undo) {
            return self.handle_undo(actor);
        }

        let snapshot = self.state.core.clone();
        match self.dispatch(actor, &action) {
            Ok(()) => {
                self.state.push_snapshot(snapshot);
                Ok(())
            }
            Err(err) => {
                debug!("rejected {:?} from {actor}: {err}", action.label());
                self.state.core = snapshot;
                Err(err)
            }
        }
    }

    fn authorize(&self, actor: PlayerId, action: &Action) -> Result<(), ActionError> {
        let core = &self.state.core;

        if core.game_over {
            return Err(ActionError::GameOver);
        }
        if actor.index() >= core.player_count() {
            return Err(ActionError::NotAuthorized(actor));
        }
        if core.players[actor].eliminated {
            return Err(ActionError::NotAuthorized(actor));
        }

        match &core.pending {
            Some(pending) => {
                if actor != pending.actor() {
                    return Err(ActionError::NotAuthorized(actor));
                }
                if !Self::allowed_response(pending, action) {
                    return Err(ActionError::WrongPendingDecision);
                }
                Ok(())
            }
            None => {
                if actor != core.current_player {
                    return Err(ActionError::NotAuthorized(actor));
                }
                if action.is_response() {
                    return Err(ActionError::NoPendingDecision);
                }
                Ok(())
            }
        }
    }

    /// The restricted move set a pending record authorizes.
    fn allowed_response(pending: &Pending, action: &Action) -> bool {
        match pending {
            Pending::Attack(_) => {
                matches!(action, Action::BlockWithShield | Action::TakeHit)
            }
            Pending::Choice(choice) => matches!(
                (choice, action),
                (
                    PendingChoice::DiscardFragmentForBonus { .. },
                    Action::DiscardFragment { .. } | Action::DeclineFragment
                ) | (PendingChoice::PeekTopCard { .. }, Action::DecideTopCard { .. })
                    | (PendingChoice::RecallFromDiscard { .. }, Action::RecallCard { .. })
                    | (PendingChoice::RetrieveFromDust { .. }, Action::ChooseRetrieve { .. })
                    | (
                        PendingChoice::RecruitAllies { .. },
                        Action::RecruitAlly { .. } | Action::FinishRecruiting
                    )
                    | (
                        PendingChoice::AttackOrRetrieve { .. },
                        Action::ChooseAttack | Action::ChooseRetrieve { .. }
                    )
                    | (PendingChoice::SelectOpponent { .. }, Action::ChooseOpponent { .. })
                    | (PendingChoice::LoseCard { .. }, Action::SurrenderCard { .. })
            ),
        }
    }

    fn dispatch(&mut self, actor: PlayerId, action: &Action) -> Result<(), ActionError> {
        match *action {
            Action::PlayCard { card, as_shield } => self.handle_play_card(actor, card, as_shield),
            Action::PlayAllEnergyCells => self.handle_play_all_energy_cells(actor),
            Action::BuyCard { stack } => self.handle_buy_card(actor, stack),
            Action::AcquireRelic { pile } => self.handle_acquire_relic(actor, pile),
            Action::ActivateRelic { relic } => self.handle_activate_relic(actor, relic),
            Action::UseRelic { relic } => self.handle_use_relic(actor, relic),
            Action::DustCard { card } => self.handle_dust_card(actor, card),
            Action::SkipPhase => self.handle_skip_phase(actor),
            Action::EndTurn => self.handle_end_turn(actor),
            Action::Undo => unreachable!("undo handled in apply"),
            Action::BlockWithShield => self.handle_block(actor),
            Action::TakeHit => self.handle_take_hit(actor),
            Action::DiscardFragment { card } => self.handle_discard_fragment(actor, card),
            Action::DeclineFragment => self.handle_decline_fragment(actor),
            Action::ChooseOpponent { player } => self.handle_choose_opponent(actor, player),
            Action::SurrenderCard { card } => self.handle_surrender_card(actor, card),
            Action::ChooseAttack => self.handle_choose_attack(actor),
            Action::ChooseRetrieve { card } => self.handle_choose_retrieve(actor, card),
            Action::DecideTopCard { decision } => self.handle_decide_top_card(actor, decision),
            Action::RecallCard { card } => self.handle_recall_card(actor, card),
            Action::RecruitAlly { stack } => self.handle_recruit_ally(actor, stack),
            Action::FinishRecruiting => self.handle_finish_recruiting(actor),
        }
    }

    fn handle_undo(&mut self, actor: PlayerId) -> Result<(), ActionError> {
        if !self.state.undo() {
            return Err(ActionError::NoHistory);
        }
        self.state.core.log_entry(actor, "Undo", "last action was undone");
        Ok(())
    }

    // === Shared lookups ===

    /// The kind of a card instance (Copy, so callers keep `&mut self`).
    pub(crate) fn kind_of(&self, card: CardId) -> Result<CardKind, ActionError> {
        self.state
            .core
            .instance(card)
            .map(|instance| self.catalog.get(instance.archetype).kind)
            .ok_or(ActionError::UnknownCard(card.raw()))
    }

    /// Display name of a card instance.
    pub(crate) fn name_of(&self, card: CardId) -> String {
        self.state
            .core
            .instance(card)
            .map(|instance| self.catalog.get(instance.archetype).name.clone())
            .unwrap_or_else(|| format!("card {}", card.raw()))
    }

    /// Energy contribution of a card instance.
    pub(crate) fn energy_of(&self, card: CardId) -> u32 {
        self.state
            .core
            .instance(card)
            .map(|instance| self.catalog.get(instance.archetype).energy())
            .unwrap_or(0)
    }

    /// Whether `player` owns a relic (dormant or active) with `power`.
    pub(crate) fn owns_relic_power(
        &self,
        player: PlayerId,
        power: crate::cards::RelicPower,
    ) -> bool {
        let state = self.state.core.player(player);
        state
            .relics
            .iter()
            .chain(state.active_relics.iter())
            .any(|&relic| {
                self.state
                    .core
                    .instance(relic)
                    .and_then(|instance| self.catalog.get(instance.archetype).relic().copied())
                    .map(|spec| spec.power == power)
                    .unwrap_or(false)
            })
    }
}
