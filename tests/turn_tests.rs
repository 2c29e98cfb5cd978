//! Turn flow tests: phase cycle, relic dust requirement, end-of-turn
//! refill, elimination.

use dust_engine::{
    Action, ActionError, GameEngine, Phase, PlayerId, ShieldFace, ShieldSlot,
};

/// Rebuild the engine after editing its state directly (test setup goes
/// through the same door an external store would use).
fn edit(engine: GameEngine, edit: impl FnOnce(&mut dust_engine::CoreState)) -> GameEngine {
    let mut state = engine.into_state();
    edit(&mut state.core);
    GameEngine::from_state(state)
}

/// Mint an instance of the named archetype into the card table.
fn mint(core: &mut dust_engine::CoreState, catalog: &dust_engine::Catalog, name: &str) -> dust_engine::CardId {
    let archetype = catalog.find(name).expect("archetype exists");
    let instance = core.factory.mint(archetype);
    core.cards.insert(instance.id, instance);
    instance.id
}

#[test]
fn first_turn_opens_in_ally_phase() {
    let engine = GameEngine::new(2, 7);

    // No relics and no shield: Relic and Shield auto-skip.
    assert_eq!(engine.core().phase, Phase::Ally);
    assert_eq!(engine.core().current_player, PlayerId::new(0));
    assert_eq!(engine.core().turn_number, 1);
}

#[test]
fn relic_owner_must_dust_before_leaving_relic_phase() {
    let engine = GameEngine::new(2, 7);
    let catalog = engine.catalog().clone();
    let p0 = PlayerId::new(0);
    let p1 = PlayerId::new(1);

    let mut engine = edit(engine, |core| {
        let relic = mint(core, &catalog, "Expanded Hold");
        core.player_mut(p0).relics.push(relic);
    });

    // Cycle the table so p0's next turn begins with the relic owned.
    engine.apply(p0, Action::EndTurn).unwrap();
    engine.apply(p1, Action::EndTurn).unwrap();

    assert_eq!(engine.core().current_player, p0);
    assert_eq!(engine.core().phase, Phase::Relic);
    assert!(engine.core().player(p0).flags.must_dust_for_relic);

    // Every phase-leaving action is rejected until the dust happens.
    assert_eq!(
        engine.apply(p0, Action::SkipPhase).unwrap_err(),
        ActionError::MustDustFirst
    );
    assert_eq!(
        engine.apply(p0, Action::EndTurn).unwrap_err(),
        ActionError::MustDustFirst
    );

    let dusted = engine.core().player(p0).hand[0];
    engine.apply(p0, Action::DustCard { card: dusted }).unwrap();
    assert!(engine.core().dust.contains(&dusted));

    engine.apply(p0, Action::SkipPhase).unwrap();
    assert_ne!(engine.core().phase, Phase::Relic);
}

#[test]
fn end_turn_refills_to_five() {
    let mut engine = GameEngine::new(2, 11);
    let p0 = PlayerId::new(0);

    // Spend some cards first.
    engine.apply(p0, Action::PlayAllEnergyCells).unwrap();
    engine.apply(p0, Action::EndTurn).unwrap();

    assert_eq!(engine.core().player(p0).hand.len(), 5);
    assert!(engine.core().player(p0).play_area.is_empty());
    assert_eq!(engine.core().available_energy, 0);
    assert_eq!(engine.core().current_player, PlayerId::new(1));
}

#[test]
fn end_turn_refills_to_six_with_hand_relic() {
    let engine = GameEngine::new(2, 11);
    let catalog = engine.catalog().clone();
    let p0 = PlayerId::new(0);

    let mut engine = edit(engine, |core| {
        let relic = mint(core, &catalog, "Expanded Hold");
        core.player_mut(p0).relics.push(relic);
    });

    engine.apply(p0, Action::EndTurn).unwrap();

    assert_eq!(engine.core().player(p0).hand.len(), 6);
}

#[test]
fn end_turn_flips_every_charging_shield() {
    let engine = GameEngine::new(3, 11);
    let catalog = engine.catalog().clone();
    let p0 = PlayerId::new(0);
    let p2 = PlayerId::new(2);

    let mut engine = edit(engine, |core| {
        let shield = mint(core, &catalog, "Hull Bastion");
        core.player_mut(p2).shield = Some(ShieldSlot {
            card: shield,
            face: ShieldFace::Charging,
        });
    });

    engine.apply(p0, Action::EndTurn).unwrap();

    assert_eq!(
        engine.core().player(p2).shield.unwrap().face,
        ShieldFace::Active
    );
}

#[test]
fn shield_owner_turn_begins_in_shield_phase() {
    let engine = GameEngine::new(2, 11);
    let catalog = engine.catalog().clone();
    let p0 = PlayerId::new(0);
    let p1 = PlayerId::new(1);

    let mut engine = edit(engine, |core| {
        let shield = mint(core, &catalog, "Hull Bastion");
        core.player_mut(p1).shield = Some(ShieldSlot {
            card: shield,
            face: ShieldFace::Active,
        });
    });

    engine.apply(p0, Action::EndTurn).unwrap();

    assert_eq!(engine.core().current_player, p1);
    assert_eq!(engine.core().phase, Phase::Shield);
}

#[test]
fn decked_out_player_is_eliminated_with_relic_score() {
    let engine = GameEngine::new(2, 11);
    let catalog = engine.catalog().clone();
    let p0 = PlayerId::new(0);
    let p1 = PlayerId::new(1);

    // p1 is down to one hand card and a relic. A dust attack takes the
    // card; the hand-minimum refill then fails to draw and eliminates them.
    let mut engine = edit(engine, |core| {
        let relic = mint(core, &catalog, "Expanded Hold");
        let last_card = mint(core, &catalog, "Energy Cell");
        let victim = core.player_mut(p1);
        victim.deck.clear();
        victim.hand = vec![last_card];
        victim.discard.clear();
        victim.relics.push(relic);

        let drones = mint(core, &catalog, "Salvage Drones");
        core.player_mut(p0).hand.push(drones);
    });

    let drones = *engine.core().player(p0).hand.last().unwrap();
    engine.apply(p0, Action::PlayCard { card: drones, as_shield: false }).unwrap();

    let last_card = engine.core().player(p1).hand[0];
    engine.apply(p1, Action::SurrenderCard { card: last_card }).unwrap();

    assert!(engine.core().dust.contains(&last_card));
    assert!(engine.core().player(p1).eliminated);
    assert_eq!(engine.core().player(p1).victory_points, 5);
}

#[test]
fn all_players_decked_out_ends_the_game() {
    let engine = GameEngine::new(2, 11);
    let p0 = PlayerId::new(0);

    let mut engine = edit(engine, |core| {
        for seat in [PlayerId::new(0), PlayerId::new(1)] {
            let player = core.player_mut(seat);
            player.deck.clear();
            player.hand.clear();
            player.discard.clear();
        }
    });

    engine.apply(p0, Action::EndTurn).unwrap();

    assert!(engine.core().game_over);
    assert!(engine.result().is_some());
}
