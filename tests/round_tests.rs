//! Round and turn scenarios over stacked decks.
//!
//! Each test lays out the exact draw order with `GameSession::with_deck`
//! and walks a round through the public operations, checking phases, turn
//! order and scores along the way.

use im::Vector;

use flip_seven::cards::{ActionKind, Card, CardId, Modifier, TargetAction};
use flip_seven::core::{EngineError, GameSettings, PlayerId};
use flip_seven::session::{GameSession, GameStatus, PendingAction, RoundPhase};

struct Stack {
    cards: Vec<Card>,
}

impl Stack {
    fn new() -> Self {
        Self { cards: Vec::new() }
    }

    fn next_id(&self) -> CardId {
        CardId::new(self.cards.len() as u32)
    }

    fn num(mut self, value: u8) -> Self {
        let card = Card::number(self.next_id(), value);
        self.cards.push(card);
        self
    }

    fn modifier(mut self, modifier: Modifier) -> Self {
        let card = Card::modifier(self.next_id(), modifier);
        self.cards.push(card);
        self
    }

    fn action(mut self, action: ActionKind) -> Self {
        let card = Card::action(self.next_id(), action);
        self.cards.push(card);
        self
    }

    /// Session whose draws come out in the order the cards were added.
    fn session(self, players: usize) -> GameSession {
        let names: Vec<String> = (0..players).map(|i| format!("P{}", i)).collect();
        let deck: Vector<Card> = self.cards.into_iter().rev().collect();
        GameSession::with_deck(names, deck, 99).unwrap()
    }
}

fn seat(i: u8) -> PlayerId {
    PlayerId::new(i)
}

fn deal_all(session: &mut GameSession) {
    while session.phase().is_dealing() {
        session.deal_next_card().unwrap();
    }
}

/// Test a short round: a bust, a stay, then settlement and the next round.
#[test]
fn test_bust_stay_and_settle() {
    let mut session = Stack::new().num(5).num(7).num(5).session(2);

    deal_all(&mut session);
    assert_eq!(session.phase(), &RoundPhase::PlayerTurn);
    assert_eq!(session.current_player(), seat(1));

    session.hit_player().unwrap();
    assert!(session.round_states()[seat(1)].is_busted);
    assert_eq!(session.current_player(), seat(0));

    session.stay_player().unwrap();
    assert_eq!(session.phase(), &RoundPhase::RoundEnd);
    assert!(session.hit_player().is_err());
    assert!(session.stay_player().is_err());

    let result = session.end_round(&GameSettings::default()).unwrap();
    assert_eq!(result.score_of(seat(0)), Some(7));
    assert_eq!(result.score_of(seat(1)), Some(0));
    assert_eq!(session.status(), GameStatus::RoundSummary);
    assert_eq!(session.dealer(), seat(1));
    assert_eq!(session.cards_in_hands(), 3);

    session.start_round().unwrap();
    assert_eq!(session.current_round(), 2);
    assert_eq!(session.cards_in_hands(), 0);
    assert_eq!(session.deck().len(), 3);
    assert!(session.discard_pile().is_empty());
    assert_eq!(session.dealing_seat(), Some(seat(0)));
}

/// Test that a frozen player's score stays locked while others play on.
#[test]
fn test_freeze_locks_score() {
    let mut session = Stack::new()
        .num(4)
        .num(10)
        .num(2)
        .action(ActionKind::Freeze)
        .modifier(Modifier::Plus10)
        .session(3);
    deal_all(&mut session);

    session.hit_player().unwrap();
    assert!(matches!(
        session.pending_action(),
        Some(PendingAction::Target { action: TargetAction::Freeze, .. })
    ));
    session.resolve_action_card(seat(2)).unwrap();
    assert_eq!(session.round_states()[seat(2)].round_score, 10);
    assert_eq!(session.current_player(), seat(0));

    session.hit_player().unwrap();
    session.stay_player().unwrap();
    assert_eq!(session.current_player(), seat(0));
    session.stay_player().unwrap();

    assert_eq!(session.phase(), &RoundPhase::RoundEnd);
    let result = session.end_round(&GameSettings::default()).unwrap();
    assert_eq!(result.score_of(seat(0)), Some(12));
    assert_eq!(result.score_of(seat(1)), Some(4));
    assert_eq!(result.score_of(seat(2)), Some(10));
}

/// Test that a Flip Three stops at the bust on its second draw.
#[test]
fn test_flip_three_stops_on_bust() {
    let mut session = Stack::new()
        .num(3)
        .num(8)
        .action(ActionKind::FlipThree)
        .num(1)
        .num(8)
        .num(11)
        .session(2);
    deal_all(&mut session);

    session.hit_player().unwrap();
    session.resolve_action_card(seat(0)).unwrap();
    assert_eq!(session.flip_three_state().map(|f| f.target), Some(seat(0)));
    assert_eq!(session.flip_three_state().map(|f| f.source), Some(seat(1)));

    session.resolve_flip_three_card().unwrap();
    assert!(session.flip_three_state().is_some());
    session.resolve_flip_three_card().unwrap();

    assert!(session.round_states()[seat(0)].is_busted);
    assert!(session.flip_three_state().is_none());
    assert_eq!(session.deck().len(), 1);
    assert_eq!(session.phase(), &RoundPhase::PlayerTurn);
    assert_eq!(session.current_player(), seat(1));
    assert_eq!(session.resolve_flip_three_card(), Err(EngineError::NoFlipThreeState));
}

/// Test spending a Second Chance, then the reshuffle of the discarded
/// duplicate once the draw pile runs dry.
#[test]
fn test_second_chance_and_reshuffle() {
    let mut session = Stack::new()
        .action(ActionKind::SecondChance)
        .num(6)
        .num(3)
        .num(6)
        .session(2);

    session.deal_next_card().unwrap();
    assert_eq!(session.dealing_seat(), Some(seat(1)));
    deal_all(&mut session);
    assert!(session.round_states()[seat(1)].has_second_chance);

    session.hit_player().unwrap();
    assert!(matches!(session.pending_action(), Some(PendingAction::SecondChance { .. })));
    assert!(session.stay_player().is_err());

    session.use_second_chance(true).unwrap();
    assert_eq!(session.current_player(), seat(1));
    assert!(!session.round_states()[seat(1)].has_second_chance);
    assert_eq!(session.discard_pile().len(), 1);

    session.stay_player().unwrap();
    assert_eq!(session.current_player(), seat(0));

    let card = session.hit_player().unwrap();
    assert_eq!(card.number_value(), Some(6));
    assert!(session.deck().is_empty() && session.discard_pile().is_empty());
    assert_eq!(session.round_states()[seat(0)].number_cards.len(), 2);

    let before = session.clone();
    assert_eq!(session.hit_player(), Err(EngineError::DeckExhausted));
    assert_eq!(session, before);
}

/// Test the Flip Seven auto-stay and its bonus.
#[test]
fn test_flip_seven() {
    let mut session = Stack::new()
        .num(0)
        .num(12)
        .num(1)
        .num(2)
        .num(3)
        .num(4)
        .num(5)
        .num(6)
        .session(2);
    deal_all(&mut session);

    session.hit_player().unwrap();
    session.stay_player().unwrap();
    for _ in 0..4 {
        session.hit_player().unwrap();
        assert_eq!(session.current_player(), seat(1));
    }
    session.hit_player().unwrap();

    let state = &session.round_states()[seat(1)];
    assert!(state.has_flip_seven && state.has_stayed);
    assert_eq!(state.round_score, 21 + 15);
    assert_eq!(session.phase(), &RoundPhase::RoundEnd);

    session.end_round(&GameSettings::default()).unwrap();
    assert_eq!(session.players()[seat(1)].total_score, 36);
    assert_eq!(session.players()[seat(0)].total_score, 12);
}

/// Test that a seat frozen during dealing gets no number card and that
/// turns start at the next eligible seat.
#[test]
fn test_freeze_during_dealing() {
    let mut session = Stack::new().action(ActionKind::Freeze).num(5).session(2);

    session.deal_next_card().unwrap();
    session.resolve_dealing_action(seat(1)).unwrap();
    assert_eq!(session.dealing_seat(), Some(seat(0)));

    session.deal_next_card().unwrap();

    assert_eq!(session.phase(), &RoundPhase::PlayerTurn);
    assert_eq!(session.current_player(), seat(0));
    assert!(session.round_states()[seat(1)].is_frozen);
    assert!(session.round_states()[seat(1)].number_cards.is_empty());
}

/// Test a Flip Three during dealing: the target is skipped by the rest
/// of the deal once it holds numbers.
#[test]
fn test_flip_three_during_dealing() {
    let mut session = Stack::new()
        .action(ActionKind::FlipThree)
        .num(1)
        .num(2)
        .num(3)
        .num(4)
        .num(5)
        .session(3);

    session.deal_next_card().unwrap();
    assert!(session.skip_flip_three_action().is_err());
    assert!(session.resolve_action_card(seat(2)).is_err());
    session.resolve_dealing_action(seat(2)).unwrap();
    assert!(session.phase().is_dealing());

    for _ in 0..3 {
        session.resolve_flip_three_card().unwrap();
    }
    assert_eq!(session.dealing_seat(), Some(seat(1)));

    session.deal_next_card().unwrap();
    assert_eq!(session.dealing_seat(), Some(seat(0)));
    session.deal_next_card().unwrap();

    assert_eq!(session.phase(), &RoundPhase::PlayerTurn);
    assert_eq!(session.current_player(), seat(1));
    assert_eq!(session.round_states()[seat(2)].number_cards.len(), 3);
}

/// Test the guards on advancing and targeting.
#[test]
fn test_rejections_leave_session_unchanged() {
    let mut session = Stack::new()
        .num(4)
        .num(9)
        .action(ActionKind::Freeze)
        .session(2);
    deal_all(&mut session);
    let live = session.clone();

    assert!(session.advance_to_next_player().is_err());
    assert!(session.resolve_flip_three_card().is_err());
    assert_eq!(session.use_second_chance(false), Err(EngineError::NoPendingAction));
    assert!(session.start_round().is_err());
    assert!(session.end_round(&GameSettings::default()).is_err());
    assert_eq!(session, live);

    session.hit_player().unwrap();
    let pending = session.clone();
    assert_eq!(session.resolve_action_card(seat(7)), Err(EngineError::InvalidTarget(seat(7))));
    assert!(session.skip_dealing_action().is_err());
    assert!(session.resolve_dealing_action(seat(0)).is_err());
    assert_eq!(session, pending);

    session.resolve_action_card(seat(1)).unwrap();
    assert_eq!(session.current_player(), seat(0));
}

/// Test that a round where one player busts and the others stay reaches
/// the round end on the last stay, with nothing left to advance.
#[test]
fn test_last_stay_ends_round() {
    let mut session = Stack::new().num(5).num(7).num(3).num(5).session(3);
    deal_all(&mut session);
    assert_eq!(session.current_player(), seat(1));

    session.hit_player().unwrap();
    assert!(session.round_states()[seat(1)].is_busted);
    assert_eq!(session.current_player(), seat(2));
    assert!(session.advance_to_next_player().is_err());

    session.stay_player().unwrap();
    assert_eq!(session.current_player(), seat(0));
    session.stay_player().unwrap();

    assert_eq!(session.phase(), &RoundPhase::RoundEnd);
    assert!(session.round_states().values().all(|s| !s.can_act()));
    let ended = session.clone();
    assert!(matches!(
        session.advance_to_next_player(),
        Err(EngineError::OutOfPhase { .. })
    ));
    assert_eq!(session, ended);

    let result = session.end_round(&GameSettings::default()).unwrap();
    assert_eq!(result.score_of(seat(0)), Some(3));
    assert_eq!(result.score_of(seat(1)), Some(0));
    assert_eq!(result.score_of(seat(2)), Some(7));
}
