//! Market and acquisition tests: purchases, relic rows, end-game triggers.

use dust_engine::{
    Action, ActionError, FinalRound, GameEngine, Phase, PlayerId, RELIC_COST,
};

fn edit(engine: GameEngine, edit: impl FnOnce(&mut dust_engine::CoreState)) -> GameEngine {
    let mut state = engine.into_state();
    edit(&mut state.core);
    GameEngine::from_state(state)
}

/// Walk a fresh turn into Acquisition phase with a fixed energy pool.
fn into_acquisition(engine: GameEngine, player: PlayerId, energy: u32) -> GameEngine {
    let mut engine = engine;
    engine.apply(player, Action::SkipPhase).unwrap();
    assert_eq!(engine.core().phase, Phase::Acquisition);
    edit(engine, |core| core.available_energy = energy)
}

/// Buying a 3-cost stack with 5 energy leaves 2 energy in the pool.
#[test]
fn purchase_deducts_energy_and_transfers_the_card() {
    let engine = GameEngine::new(2, 5);
    let p0 = PlayerId::new(0);
    let mut engine = into_acquisition(engine, p0, 5);

    let stack_index = engine
        .core()
        .market
        .stacks
        .iter()
        .position(|s| s.cost == 3)
        .unwrap();
    let remaining_before = engine.core().market.stacks[stack_index].remaining();
    let top = *engine.core().market.stacks[stack_index].cards.last().unwrap();

    engine.apply(p0, Action::BuyCard { stack: stack_index }).unwrap();

    let core = engine.core();
    assert_eq!(core.available_energy, 2);
    assert_eq!(core.market.stacks[stack_index].remaining(), remaining_before - 1);
    assert!(core.player(p0).discard.contains(&top));
}

#[test]
fn empty_stack_and_poverty_are_rejected() {
    let engine = GameEngine::new(2, 5);
    let p0 = PlayerId::new(0);
    let mut engine = into_acquisition(engine, p0, 1);

    assert_eq!(
        engine.apply(p0, Action::BuyCard { stack: 2 }).unwrap_err(),
        ActionError::InsufficientEnergy { need: 3, have: 1 }
    );

    let mut engine = edit(engine, |core| {
        let drained: Vec<_> = core.market.stacks[0].cards.drain(..).collect();
        core.dust.extend(drained);
        core.available_energy = 10;
    });
    assert_eq!(
        engine.apply(p0, Action::BuyCard { stack: 0 }).unwrap_err(),
        ActionError::EmptyStack
    );
}

/// The fifth empty stack starts the final round: in a 3-player game every
/// other player gets one more turn.
#[test]
fn five_empty_stacks_trigger_the_final_round() {
    let engine = GameEngine::new(3, 5);
    let p0 = PlayerId::new(0);
    let engine = into_acquisition(engine, p0, 100);

    let mut engine = edit(engine, |core| {
        let mut drained = Vec::new();
        for stack in core.market.stacks.iter_mut().take(4) {
            drained.extend(stack.cards.drain(..));
        }
        // Leave exactly one card on the fifth stack.
        drained.extend(core.market.stacks[4].cards.drain(1..));
        core.dust.extend(drained);
    });

    engine.apply(p0, Action::BuyCard { stack: 4 }).unwrap();

    assert_eq!(
        engine.core().final_round,
        Some(FinalRound {
            triggered_by: Some(p0),
            turns_remaining: 2,
        })
    );
}

#[test]
fn final_round_gives_each_other_player_one_turn() {
    let engine = GameEngine::new(3, 5);
    let p0 = PlayerId::new(0);

    let mut engine = edit(engine, |core| {
        core.final_round = Some(FinalRound {
            triggered_by: Some(p0),
            turns_remaining: 2,
        });
    });

    engine.apply(p0, Action::EndTurn).unwrap();
    assert!(!engine.core().game_over);

    engine.apply(PlayerId::new(1), Action::EndTurn).unwrap();
    assert!(!engine.core().game_over);

    engine.apply(PlayerId::new(2), Action::EndTurn).unwrap();
    assert!(engine.core().game_over);
    assert!(engine.result().is_some());
}

#[test]
fn relic_acquisition_costs_eight_and_keeps_two_options() {
    let engine = GameEngine::new(2, 5);
    let p0 = PlayerId::new(0);
    let mut engine = into_acquisition(engine, p0, 10);

    let revealed = engine.core().relic_row.revealed(0).unwrap();
    engine.apply(p0, Action::AcquireRelic { pile: 0 }).unwrap();

    let core = engine.core();
    assert_eq!(core.available_energy, 10 - RELIC_COST);
    assert!(core.player(p0).relics.contains(&revealed));
    // Both piles still show an option.
    assert!(core.relic_row.revealed(0).is_some());
    assert!(core.relic_row.revealed(1).is_some());
    assert_eq!(core.relic_row.remaining(), 9);
}

#[test]
fn relic_needs_eight_energy() {
    let engine = GameEngine::new(2, 5);
    let p0 = PlayerId::new(0);
    let mut engine = into_acquisition(engine, p0, 7);

    assert_eq!(
        engine.apply(p0, Action::AcquireRelic { pile: 0 }).unwrap_err(),
        ActionError::InsufficientEnergy { need: 8, have: 7 }
    );
}

#[test]
fn dusted_relics_cannot_be_retrieved() {
    // A relic in the Dust is out of the game: the retrieval ability skips it.
    let engine = GameEngine::new(2, 5);
    let catalog = engine.catalog().clone();
    let p0 = PlayerId::new(0);

    let mut engine = edit(engine, |core| {
        let relic = core.relic_row.take(0).unwrap();
        core.dust.push(relic);
        let hawk_archetype = catalog.find("Reclaimer Hawk").unwrap();
        let hawk = core.factory.mint(hawk_archetype);
        core.cards.insert(hawk.id, hawk);
        core.player_mut(p0).hand.push(hawk.id);
    });

    let hawk = *engine.core().player(p0).hand.last().unwrap();
    let hand_before = engine.core().player(p0).hand.len();
    engine.apply(p0, Action::PlayCard { card: hawk, as_shield: false }).unwrap();

    // Played the hawk, retrieved nothing: the only Dust card is a relic.
    assert_eq!(engine.core().player(p0).hand.len(), hand_before - 1);
    assert_eq!(engine.core().dust.len(), 1);
}
