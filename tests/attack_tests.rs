//! Attack/shield interrupt protocol tests against the public action
//! surface.

use dust_engine::{
    Action, ActionError, AttackEffect, GameEngine, Pending, PendingChoice, PlayerId, ShieldFace,
    ShieldSlot,
};

fn edit(engine: GameEngine, edit: impl FnOnce(&mut dust_engine::CoreState)) -> GameEngine {
    let mut state = engine.into_state();
    edit(&mut state.core);
    GameEngine::from_state(state)
}

fn mint(core: &mut dust_engine::CoreState, catalog: &dust_engine::Catalog, name: &str) -> dust_engine::CardId {
    let archetype = catalog.find(name).expect("archetype exists");
    let instance = core.factory.mint(archetype);
    core.cards.insert(instance.id, instance);
    instance.id
}

/// Attack into a face-up shield, target blocks.
#[test]
fn blocked_attack_spends_shield_but_attacker_still_draws() {
    let engine = GameEngine::new(2, 3);
    let catalog = engine.catalog().clone();
    let p0 = PlayerId::new(0);
    let p1 = PlayerId::new(1);

    let mut engine = edit(engine, |core| {
        let shield = mint(core, &catalog, "Hull Bastion");
        core.player_mut(p1).shield = Some(ShieldSlot {
            card: shield,
            face: ShieldFace::Active,
        });
        let skiff = mint(core, &catalog, "Raider Skiff");
        core.player_mut(p0).hand.push(skiff);
    });

    let skiff = *engine.core().player(p0).hand.last().unwrap();
    let attacker_hand_before = engine.core().player(p0).hand.len();
    let shield = engine.core().player(p1).shield.unwrap().card;

    engine.apply(p0, Action::PlayCard { card: skiff, as_shield: false }).unwrap();

    // A pending discard-one attack targets the shield owner...
    match &engine.core().pending {
        Some(Pending::Attack(attack)) => {
            assert_eq!(attack.attacker, p0);
            assert_eq!(attack.target, p1);
            assert_eq!(attack.effect, AttackEffect::DiscardOne);
        }
        other => panic!("expected pending attack, got {other:?}"),
    }

    // ...and only the target may respond.
    assert_eq!(
        engine.apply(p0, Action::SkipPhase).unwrap_err(),
        ActionError::NotAuthorized(p0)
    );

    engine.apply(p1, Action::BlockWithShield).unwrap();

    let core = engine.core();
    assert!(core.pending.is_none());
    assert!(core.player(p1).shield.is_none());
    assert!(core.player(p1).discard.contains(&shield));
    // Hand unchanged net: the skiff left, the blocked attack's draw arrived.
    assert_eq!(core.player(p0).hand.len(), attacker_hand_before);
    // The victim lost nothing.
    assert_eq!(core.player(p1).hand.len(), 5);
}

#[test]
fn unblockable_attack_lets_victim_choose_loss() {
    let engine = GameEngine::new(2, 3);
    let catalog = engine.catalog().clone();
    let p0 = PlayerId::new(0);
    let p1 = PlayerId::new(1);

    let mut engine = edit(engine, |core| {
        let skiff = mint(core, &catalog, "Raider Skiff");
        core.player_mut(p0).hand.push(skiff);
    });

    let skiff = *engine.core().player(p0).hand.last().unwrap();
    engine.apply(p0, Action::PlayCard { card: skiff, as_shield: false }).unwrap();

    let victim_card = match &engine.core().pending {
        Some(Pending::Choice(PendingChoice::LoseCard { victim, .. })) => {
            assert_eq!(*victim, p1);
            engine.core().player(p1).hand[2]
        }
        other => panic!("expected lose-card choice, got {other:?}"),
    };

    // The victim cannot dodge with a response that doesn't match.
    assert_eq!(
        engine.apply(p1, Action::BlockWithShield).unwrap_err(),
        ActionError::WrongPendingDecision
    );

    engine.apply(p1, Action::SurrenderCard { card: victim_card }).unwrap();

    assert!(engine.core().player(p1).discard.contains(&victim_card));
    assert!(engine.core().pending.is_none());
}

#[test]
fn three_player_attack_asks_for_a_target() {
    let engine = GameEngine::new(3, 3);
    let catalog = engine.catalog().clone();
    let p0 = PlayerId::new(0);
    let p2 = PlayerId::new(2);

    let mut engine = edit(engine, |core| {
        let skiff = mint(core, &catalog, "Raider Skiff");
        core.player_mut(p0).hand.push(skiff);
    });

    let skiff = *engine.core().player(p0).hand.last().unwrap();
    engine.apply(p0, Action::PlayCard { card: skiff, as_shield: false }).unwrap();

    match &engine.core().pending {
        Some(Pending::Choice(PendingChoice::SelectOpponent { attacker, .. })) => {
            assert_eq!(*attacker, p0);
        }
        other => panic!("expected opponent selection, got {other:?}"),
    }

    // The attacker cannot target themselves.
    assert_eq!(
        engine.apply(p0, Action::ChooseOpponent { player: p0 }).unwrap_err(),
        ActionError::InvalidSelection
    );

    engine.apply(p0, Action::ChooseOpponent { player: p2 }).unwrap();

    match &engine.core().pending {
        Some(Pending::Choice(PendingChoice::LoseCard { victim, .. })) => {
            assert_eq!(*victim, p2);
        }
        other => panic!("expected lose-card choice, got {other:?}"),
    }
}

#[test]
fn all_opponents_attack_chains_through_the_table() {
    let engine = GameEngine::new(4, 3);
    let catalog = engine.catalog().clone();
    let p0 = PlayerId::new(0);

    let mut engine = edit(engine, |core| {
        let envoy = mint(core, &catalog, "Venom Envoy");
        core.player_mut(p0).hand.push(envoy);
    });

    let envoy = *engine.core().player(p0).hand.last().unwrap();
    engine.apply(p0, Action::PlayCard { card: envoy, as_shield: false }).unwrap();

    // Victims resolve in rotation order: 1, then 2, then 3.
    for seat in [PlayerId::new(1), PlayerId::new(2), PlayerId::new(3)] {
        let card = match &engine.core().pending {
            Some(Pending::Choice(PendingChoice::LoseCard { victim, .. })) => {
                assert_eq!(*victim, seat);
                engine.core().player(seat).hand[0]
            }
            other => panic!("expected lose-card choice for {seat}, got {other:?}"),
        };
        engine.apply(seat, Action::SurrenderCard { card }).unwrap();
    }

    assert!(engine.core().pending.is_none());
    for seat in [PlayerId::new(1), PlayerId::new(2), PlayerId::new(3)] {
        assert_eq!(engine.core().player(seat).discard.len(), 1);
    }
}

#[test]
fn satellite_block_is_once_per_round() {
    let engine = GameEngine::new(2, 3);
    let catalog = engine.catalog().clone();
    let p0 = PlayerId::new(0);
    let p1 = PlayerId::new(1);

    let mut engine = edit(engine, |core| {
        let satellite = mint(core, &catalog, "Aegis Satellite");
        core.player_mut(p1).relics.push(satellite);
        let first = mint(core, &catalog, "Raider Skiff");
        let second = mint(core, &catalog, "Raider Skiff");
        core.player_mut(p0).hand.push(first);
        core.player_mut(p0).hand.push(second);
    });

    let hand: Vec<_> = engine.core().player(p0).hand.clone();
    let (first, second) = (hand[hand.len() - 2], hand[hand.len() - 1]);

    engine.apply(p0, Action::PlayCard { card: first, as_shield: false }).unwrap();
    engine.apply(p1, Action::BlockWithShield).unwrap();
    assert!(engine.core().player(p1).flags.satellite_block_used);

    // The second attack of the round finds no block available at all.
    engine.apply(p0, Action::PlayCard { card: second, as_shield: false }).unwrap();
    match &engine.core().pending {
        Some(Pending::Choice(PendingChoice::LoseCard { victim, .. })) => {
            assert_eq!(*victim, p1);
        }
        other => panic!("expected lose-card choice, got {other:?}"),
    }
}

#[test]
fn off_turn_victim_draws_back_to_hand_minimum() {
    let engine = GameEngine::new(2, 3);
    let catalog = engine.catalog().clone();
    let p0 = PlayerId::new(0);
    let p1 = PlayerId::new(1);

    // Victim at exactly the minimum: losing one card pulls a refill draw.
    let mut engine = edit(engine, |core| {
        let moved: Vec<_> = core.player_mut(p1).hand.drain(3..).collect();
        core.player_mut(p1).deck.extend(moved);
        let skiff = mint(core, &catalog, "Raider Skiff");
        core.player_mut(p0).hand.push(skiff);
    });
    assert_eq!(engine.core().player(p1).hand.len(), 3);

    let skiff = *engine.core().player(p0).hand.last().unwrap();
    engine.apply(p0, Action::PlayCard { card: skiff, as_shield: false }).unwrap();

    let lost = engine.core().player(p1).hand[0];
    engine.apply(p1, Action::SurrenderCard { card: lost }).unwrap();

    assert_eq!(engine.core().player(p1).hand.len(), 3);
}
