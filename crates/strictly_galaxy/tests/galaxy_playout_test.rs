//! Whole matches played with seeded randomness, checking the engine's
//! guarantees after every step.

use rand::SeedableRng;
use rand::rngs::StdRng;
use strictly_galaxy::{
    AiLevel, ClosedBoardsFrozen, GalaxyInvariants, GameState, InvariantSet, Phase, Player,
    apply_move, choose_move_with, legal_moves, random_throw_with, submit_final_throw,
    submit_micro_throw,
};

const STEP_CAP: usize = 1000;

#[derive(Debug, Default)]
struct Observed {
    micro_rounds: usize,
    galaxy_rounds: usize,
}

/// Plays one match to the end and returns what it ran into.
fn play_out(x: AiLevel, o: AiLevel, seed: u64) -> (GameState, Observed) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = GameState::new();
    let mut seen = Observed::default();

    for step in 0..STEP_CAP {
        let moves = legal_moves(&state);
        assert_eq!(
            moves.is_empty(),
            *state.phase() != Phase::Playing,
            "seed {seed} step {step}: legal moves disagree with {:?}",
            state.phase()
        );

        if state.is_over() {
            return (state, seen);
        }
        let next = match state.phase() {
            Phase::Finished { .. } => unreachable!("finished matches return above"),
            Phase::Playing => {
                let level = match state.current_player() {
                    Player::X => x,
                    Player::O => o,
                };
                let mov = choose_move_with(&state, level, &mut rng).expect("moves available");
                assert!(moves.contains(&mov), "seed {seed}: AI picked illegal {mov}");
                apply_move(&state, mov.board, mov.cell).unwrap()
            }
            Phase::MicroTiebreak { .. } => {
                seen.micro_rounds += 1;
                let state = submit_micro_throw(&state, Player::X, random_throw_with(&mut rng))
                    .unwrap()
                    .state;
                submit_micro_throw(&state, Player::O, random_throw_with(&mut rng))
                    .unwrap()
                    .state
            }
            Phase::GalaxyTiebreak { .. } => {
                seen.galaxy_rounds += 1;
                let state = submit_final_throw(&state, Player::X, random_throw_with(&mut rng))
                    .unwrap()
                    .state;
                submit_final_throw(&state, Player::O, random_throw_with(&mut rng))
                    .unwrap()
                    .state
            }
        };

        assert_eq!(
            ClosedBoardsFrozen::check(&state, &next),
            Ok(()),
            "seed {seed} step {step}: closed board changed"
        );
        assert!(GalaxyInvariants::check_all(&next).is_ok(), "seed {seed} step {step}");
        state = next;
    }
    panic!("seed {seed}: match did not finish in {STEP_CAP} steps");
}

#[test]
fn test_random_matches_finish_cleanly() {
    let mut totals = Observed::default();
    for seed in 0..40 {
        let (state, seen) = play_out(AiLevel::Easy, AiLevel::Easy, seed);
        assert!(state.is_over());
        assert!(state.macro_winner().is_some());
        totals.micro_rounds += seen.micro_rounds;
        totals.galaxy_rounds += seen.galaxy_rounds;
    }
    // Forty random matches without a single drawn micro-board would mean the
    // tiebreak path never ran.
    assert!(totals.micro_rounds > 0, "{totals:?}");
}

#[test]
fn test_decider_finish_records_score() {
    for seed in 0..200 {
        let (state, seen) = play_out(AiLevel::Easy, AiLevel::Easy, seed);
        if seen.galaxy_rounds == 0 {
            continue;
        }
        let Phase::Finished {
            winner,
            final_rps: Some(decider),
        } = state.phase()
        else {
            panic!("seed {seed}: decider ran but match did not end on it");
        };
        assert_eq!(decider.score(*winner), 2);
        assert!(decider.score(winner.opponent()) < 2);
        return;
    }
}

#[test]
fn test_search_against_random() {
    let (state, _) = play_out(AiLevel::Smart, AiLevel::Easy, 7);
    assert!(state.is_over());
}

#[test]
fn test_deep_search_against_random() {
    let (state, _) = play_out(AiLevel::Hard, AiLevel::Easy, 13);
    assert!(state.is_over());
    assert!(state.macro_winner().is_some());
}

#[test]
fn test_saved_text_resumes_mid_match() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut state = GameState::new();
    for _ in 0..12 {
        let Some(mov) = choose_move_with(&state, AiLevel::Easy, &mut rng) else {
            break;
        };
        state = apply_move(&state, mov.board, mov.cell).unwrap();
        let restored = GameState::from_text(&state.to_text().unwrap());
        assert_eq!(restored, state);
        assert_eq!(legal_moves(&restored), legal_moves(&state));
    }
}
