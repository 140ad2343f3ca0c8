//! End-to-end game flows against seeded boards.

use memory_match::{
    CardStatus, Difficulty, DifficultyConfig, EventLog, GameEvent, GameSession, GameStatus,
    LossReason, Token, TracingListener, generate,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn seeded(difficulty: Difficulty, seed: u64) -> (GameSession<StdRng>, EventLog) {
    init_tracing();
    let mut session =
        GameSession::with_rng(difficulty.config(), StdRng::seed_from_u64(seed)).expect("valid tier");
    let log = EventLog::new();
    session.subscribe(log.clone());
    session.subscribe(TracingListener);
    (session, log)
}

fn pair_of(session: &GameSession<StdRng>, token: u16) -> (usize, usize) {
    let positions = session.board().positions_of(Token(token));
    (positions[0], positions[1])
}

/// Two hidden cards with different tokens.
fn mismatching_pair(session: &GameSession<StdRng>) -> (usize, usize) {
    let cards = session.board().cards();
    for a in cards.iter().filter(|c| c.status == CardStatus::Hidden) {
        if let Some(b) = cards
            .iter()
            .find(|c| c.status == CardStatus::Hidden && c.token != a.token)
        {
            return (a.index, b.index);
        }
    }
    panic!("no mismatching pair left");
}

fn play_pair(session: &mut GameSession<StdRng>, a: usize, b: usize) {
    assert!(session.select_card(a).is_none());
    let ticket = session.select_card(b).expect("second pick opens resolution");
    assert!(session.resolve_pending_pair(ticket));
}

#[test]
fn easy_board_has_six_pairs() {
    let mut rng = StdRng::seed_from_u64(1);
    let board = generate(&Difficulty::Easy.config(), &mut rng).unwrap();
    assert_eq!(board.len(), 12);
    for token in 0..6 {
        assert_eq!(board.positions_of(Token(token)).len(), 2);
    }
    assert!(board.verify_pairs().is_ok());
}

#[test]
fn generated_boards_always_pair_up() {
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        for token_count in 1..=12 {
            let config = DifficultyConfig::new(token_count, 5, 30);
            let board = generate(&config, &mut rng).unwrap();
            assert_eq!(board.len(), token_count * 2);
            assert!(board.verify_pairs().is_ok());
        }
    }
}

#[test]
fn matching_pair_is_locked_in() {
    let (mut session, log) = seeded(Difficulty::Easy, 10);
    let (a, b) = pair_of(&session, 0);
    play_pair(&mut session, a, b);

    assert_eq!(session.matched_count(), 2);
    assert_eq!(session.attempt_count(), 0);
    assert_eq!(session.board().get(a).unwrap().status, CardStatus::Matched);
    assert_eq!(session.board().get(b).unwrap().status, CardStatus::Matched);
    assert_eq!(
        log.events(),
        vec![
            GameEvent::CardRevealed(a),
            GameEvent::CardRevealed(b),
            GameEvent::PairMatched(a, b),
        ]
    );
}

#[test]
fn mismatching_pair_flips_back() {
    let (mut session, log) = seeded(Difficulty::Easy, 11);
    let (a, b) = mismatching_pair(&session);
    play_pair(&mut session, a, b);

    assert_eq!(session.attempt_count(), 1);
    assert_eq!(session.matched_count(), 0);
    assert_eq!(session.board().get(a).unwrap().status, CardStatus::Hidden);
    assert_eq!(session.board().get(b).unwrap().status, CardStatus::Hidden);
    assert_eq!(
        &log.events()[2..],
        &[
            GameEvent::PairMismatched(a, b),
            GameEvent::AttemptsChanged { count: 1, max: 20 },
        ]
    );
}

#[test]
fn twenty_mismatches_exhaust_easy() {
    let (mut session, log) = seeded(Difficulty::Easy, 12);
    for round in 1..=20 {
        let (a, b) = mismatching_pair(&session);
        play_pair(&mut session, a, b);
        assert_eq!(session.attempt_count(), round);
    }
    assert_eq!(session.status(), GameStatus::Lost(LossReason::AttemptsExhausted));
    assert_eq!(log.last(), Some(GameEvent::GameLost(LossReason::AttemptsExhausted)));

    let before = session.snapshot();
    assert!(session.select_card(0).is_none());
    session.tick();
    assert_eq!(session.snapshot(), before);
    assert_eq!(session.attempt_count(), 20);
}

#[test]
fn ninety_ticks_expire_easy() {
    let (mut session, log) = seeded(Difficulty::Easy, 13);
    for _ in 0..89 {
        session.tick();
    }
    assert_eq!(session.status(), GameStatus::Playing);
    assert_eq!(session.remaining_seconds(), 1);

    session.tick();
    assert_eq!(session.remaining_seconds(), 0);
    assert_eq!(session.status(), GameStatus::Lost(LossReason::TimeExpired));

    session.tick();
    assert_eq!(session.remaining_seconds(), 0);
    let lost = log
        .events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::GameLost(_)))
        .count();
    assert_eq!(lost, 1);
}

#[test]
fn clearing_the_board_wins_with_time_left() {
    let (mut session, log) = seeded(Difficulty::Easy, 14);
    let (a, b) = mismatching_pair(&session);
    play_pair(&mut session, a, b);
    session.tick();

    for token in 0..6 {
        assert_eq!(session.status(), GameStatus::Playing);
        let (a, b) = pair_of(&session, token);
        play_pair(&mut session, a, b);
    }

    assert_eq!(session.status(), GameStatus::Won);
    assert_eq!(session.matched_count(), 12);
    assert_eq!(log.last(), Some(GameEvent::GameWon));
    assert_eq!(session.remaining_seconds(), 89);

    session.tick();
    assert_eq!(session.remaining_seconds(), 89);

    let summary = session.summary();
    assert_eq!(summary.matches, 6);
    assert_eq!(summary.mismatches, 1);
    assert_eq!(summary.precision_pct, 86);
    assert_eq!(summary.elapsed_secs, 1);
}

#[test]
fn rejected_picks_change_nothing() {
    let (mut session, _log) = seeded(Difficulty::Normal, 15);
    let (a, b) = pair_of(&session, 3);
    play_pair(&mut session, a, b);

    let before = session.snapshot();
    assert!(session.select_card(16).is_none());
    assert!(session.select_card(usize::MAX).is_none());
    assert!(session.select_card(a).is_none());
    assert_eq!(session.snapshot(), before);
}

#[test]
fn double_pick_keeps_one_selection() {
    let (mut session, log) = seeded(Difficulty::Hard, 16);
    assert!(session.select_card(5).is_none());
    assert!(session.select_card(5).is_none());
    assert_eq!(session.selection(), &[5]);
    assert_eq!(log.len(), 1);
}

#[test]
fn third_pick_waits_for_resolution() {
    let (mut session, _log) = seeded(Difficulty::Hard, 17);
    let (a, b) = mismatching_pair(&session);
    let spare = (0..20).find(|i| *i != a && *i != b).unwrap();
    session.select_card(a);
    let ticket = session.select_card(b).unwrap();

    assert!(session.select_card(spare).is_none());
    assert!(session.select_card(a).is_none());
    assert_eq!(session.selection().len(), 2);
    assert_eq!(session.board().get(spare).unwrap().status, CardStatus::Hidden);

    assert!(session.resolve_pending_pair(ticket));
    assert!(session.select_card(spare).is_none());
    assert_eq!(session.selection(), &[spare]);
}

#[test]
fn attempts_never_exceed_limit() {
    let (mut session, _log) = seeded(Difficulty::Hard, 18);
    for _ in 0..30 {
        let (a, b) = mismatching_pair(&session);
        session.select_card(a);
        if let Some(ticket) = session.select_card(b) {
            session.resolve_pending_pair(ticket);
        }
        assert!(session.attempt_count() <= session.max_attempts());
    }
    assert_eq!(session.attempt_count(), 12);
}

#[test]
fn play_again_restores_initial_state() {
    let (mut session, log) = seeded(Difficulty::Hard, 19);
    let (a, b) = pair_of(&session, 1);
    play_pair(&mut session, a, b);
    for _ in 0..60 {
        session.tick();
    }
    assert_eq!(session.status(), GameStatus::Lost(LossReason::TimeExpired));

    log.take();
    session.play_again().unwrap();
    assert_eq!(session.status(), GameStatus::Playing);
    assert_eq!(session.config(), Difficulty::Hard.config());
    assert_eq!(session.remaining_seconds(), 60);
    assert_eq!(session.matched_count(), 0);
    assert_eq!(session.attempt_count(), 0);
    assert!(session.selection().is_empty());
    assert_eq!(session.board().count_with_status(CardStatus::Hidden), 20);
    assert!(session.board().verify_pairs().is_ok());
    assert_eq!(
        log.events(),
        vec![GameEvent::GameStarted {
            card_count: 20,
            max_attempts: 12,
            time_limit_secs: 60
        }]
    );
}

#[test]
fn matched_count_stays_even() {
    let (mut session, _log) = seeded(Difficulty::Normal, 20);
    for token in 0..8 {
        let (a, b) = pair_of(&session, token);
        session.select_card(a);
        assert_eq!(session.matched_count() % 2, 0);
        let ticket = session.select_card(b).unwrap();
        session.resolve_pending_pair(ticket);
        assert_eq!(session.matched_count(), 2 * (token as usize + 1));
    }
    assert_eq!(session.status(), GameStatus::Won);
}
