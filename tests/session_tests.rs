//! Session lifecycle and whole-game properties.
//!
//! Random games are driven through `legal_commands`, checking after every
//! step that no card is lost, that accepted and rejected commands match the
//! legal list, and that totals only ever grow.

use proptest::prelude::*;

use flip_seven::cards::DECK_SIZE;
use flip_seven::core::{EngineError, GameRng, GameSettings, PlayerId, SettingsUpdate};
use flip_seven::session::{Command, GameSession, GameStatus, PendingAction, RoundPhase};
use flip_seven::table::Table;

/// Cards held anywhere: piles, hands, and a duplicate awaiting a Second
/// Chance decision.
fn cards_accounted(session: &GameSession) -> usize {
    let pending = match session.pending_action() {
        Some(PendingAction::SecondChance { .. }) => 1,
        _ => 0,
    };
    session.deck().len() + session.discard_pile().len() + session.cards_in_hands() + pending
}

fn every_command(player_count: usize) -> Vec<Command> {
    let mut commands = vec![
        Command::StartRound,
        Command::EndRound,
        Command::DealNextCard,
        Command::SkipDealingAction,
        Command::Hit,
        Command::Stay,
        Command::AdvanceToNextPlayer,
        Command::ResolveFlipThreeCard,
        Command::SkipFlipThreeAction,
        Command::UseSecondChance { discard: true },
        Command::UseSecondChance { discard: false },
    ];
    for seat in 0..=player_count as u8 {
        commands.push(Command::ResolveDealingAction(PlayerId::new(seat)));
        commands.push(Command::ResolveActionCard(PlayerId::new(seat)));
    }
    commands
}

/// Pick a legal command, leaning towards staying once a hand is decent so
/// games finish.
fn choose(session: &GameSession, legal: &[Command], roll: u32) -> Command {
    let command = legal[roll as usize % legal.len()];
    match command {
        Command::Hit => {
            let state = &session.round_states()[session.current_player()];
            if state.number_cards.len() >= 3 && roll % 3 == 0 {
                Command::Stay
            } else {
                Command::Hit
            }
        }
        other => other,
    }
}

/// Test the player count bounds at creation.
#[test]
fn test_player_count_bounds() {
    let mut table = Table::default();

    for count in [0usize, 1, 19] {
        let names: Vec<String> = (0..count).map(|i| format!("P{}", i)).collect();
        assert!(matches!(
            table.create_session_with_seed(names, 1),
            Err(EngineError::InvalidPlayerCount { .. })
        ));
    }
    assert!(table.session().is_none());

    for count in [2usize, 10, 18] {
        let names: Vec<String> = (0..count).map(|i| format!("P{}", i)).collect();
        let session = table.create_session_with_seed(names, 1).unwrap();
        assert_eq!(session.player_count(), count);
        assert_eq!(session.deck().len(), DECK_SIZE);
    }
}

/// Test that a new session opens round 1 dealing at the seat after the dealer.
#[test]
fn test_session_opens_dealing() {
    let session = GameSession::new(["Ana", "Ben", "Cy", "Dee"], 21).unwrap();

    assert_eq!(session.status(), GameStatus::Playing);
    assert_eq!(session.current_round(), 1);
    assert_eq!(session.dealer(), PlayerId::new(0));
    assert_eq!(session.phase(), &RoundPhase::Dealing { seat: PlayerId::new(1) });
    assert!(session.round_history().is_empty());
    assert_eq!(session.legal_commands(), vec![Command::DealNextCard]);
}

/// Test that sessions serialize to JSON and back unchanged.
#[test]
fn test_session_json_round_trip() {
    let mut session = GameSession::new(["A", "B", "C"], 4).unwrap();
    session.deal_next_card().unwrap();

    let json = serde_json::to_string(&session).unwrap();
    let back: GameSession = serde_json::from_str(&json).unwrap();

    assert_eq!(back, session);
}

/// Test a full seeded game through the table until someone wins.
#[test]
fn test_full_game_to_game_over() {
    let mut table = Table::default();
    table.update_settings(SettingsUpdate { target_score: Some(60) });
    table.create_session_with_seed(["A", "B", "C"], 2024).unwrap();

    let mut rng = GameRng::new(17);
    for _ in 0..20_000 {
        let session = table.session().unwrap();
        if session.status() == GameStatus::GameOver {
            break;
        }
        let legal = session.legal_commands();
        let command = choose(session, &legal, rng.gen_range_usize(0..1_000) as u32);
        table.dispatch(command).unwrap();
    }

    let session = table.session().unwrap();
    assert_eq!(session.status(), GameStatus::GameOver);
    assert!(session.legal_commands().is_empty());

    let rounds = session.round_history().len();
    assert!(rounds >= 1);
    assert_eq!(session.current_round() as usize, rounds + 1);
    assert_eq!(session.dealer().index(), rounds % 3);

    let winners = session.winners();
    assert!(!winners.is_empty());
    assert!(winners.iter().all(|p| p.total_score >= 60));
    assert_eq!(session.standings()[0].total_score, winners[0].total_score);

    for player in session.players().values() {
        let summed: u32 = session
            .round_history()
            .iter()
            .filter_map(|round| round.score_of(player.id))
            .sum();
        assert_eq!(summed, player.total_score);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Property: random games never lose a card and accept exactly the
    /// legal commands
    #[test]
    fn prop_random_games_hold_invariants(
        seed in any::<u64>(),
        players in 2usize..=6,
        rolls in proptest::collection::vec(any::<u32>(), 50..400),
    ) {
        let names: Vec<String> = (0..players).map(|i| format!("P{}", i)).collect();
        let settings = GameSettings::new().with_target_score(80);
        let mut session = GameSession::new(names, seed).unwrap();
        let universe = every_command(players);

        for roll in rolls {
            prop_assert_eq!(cards_accounted(&session), DECK_SIZE);
            if session.status() == GameStatus::GameOver {
                break;
            }

            let legal = session.legal_commands();
            for &command in &universe {
                let mut trial = session.clone();
                let accepted = trial.execute(command, &settings).is_ok();
                prop_assert_eq!(accepted, legal.contains(&command), "{:?}", command);
                if !accepted {
                    prop_assert_eq!(&trial, &session);
                }
            }

            let totals: Vec<u32> = session.players().values().map(|p| p.total_score).collect();
            let command = choose(&session, &legal, roll);
            session.execute(command, &settings).unwrap();

            for (before, player) in totals.iter().zip(session.players().values()) {
                prop_assert!(player.total_score >= *before);
            }
            for state in session.round_states().values() {
                prop_assert!(!(state.is_busted && state.has_stayed));
                if !state.is_active {
                    prop_assert!(state.is_busted || state.has_stayed || state.is_frozen);
                }
            }
        }
    }

    /// Property: applying a command never changes the session it was applied to
    #[test]
    fn prop_apply_is_pure(seed in any::<u64>(), steps in 0usize..40) {
        let settings = GameSettings::default();
        let mut session = GameSession::new(["A", "B", "C"], seed).unwrap();
        for step in 0..steps {
            let legal = session.legal_commands();
            let command = choose(&session, &legal, step as u32);
            let before = session.clone();

            let transition = session.apply(command, &settings).unwrap();

            prop_assert_eq!(&session, &before);
            session = transition.session;
            prop_assert_eq!(transition.card.is_some(), command.draws_card());
        }
    }
}
