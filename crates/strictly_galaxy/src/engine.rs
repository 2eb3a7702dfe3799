//! Move engine: placements, cascading board resolution and move generation.

use super::action::{Move, MoveError};
use super::contracts::{Contract, MoveContract};
use super::phases::Phase;
use super::rpsls::RpsRound;
use super::rules::{detect_line_winner, determine_macro_winner, galaxy_stalled, is_full};
use super::tiebreak::FinalRps;
use super::{BoardStatus, GameState, Position, Square};
use tracing::{debug, instrument, trace};

/// Places the current player's mark and returns the resulting state.
///
/// Preconditions are checked in order (see
/// [`LegalPlacement`](crate::LegalPlacement)); a rejection leaves `state`
/// as it was. On success the micro-board is re-evaluated (a line claims it,
/// a full board without one opens a micro tiebreak), the galaxy is
/// re-evaluated, the next board is chosen by the send-anywhere rule and the
/// turn passes.
#[instrument(
    level = "debug",
    skip(state),
    fields(player = %state.current_player(), board = %board, cell = %cell)
)]
pub fn apply_move(
    state: &GameState,
    board: Position,
    cell: Position,
) -> Result<GameState, MoveError> {
    let player = state.current_player();
    let action = Move::new(player, board, cell);
    MoveContract::pre(state, &action)?;

    let mut next = state.clone();
    let micro = &mut next.boards[board.to_index()];
    micro.set(cell, Square::Occupied(player));

    if let Some(winner) = detect_line_winner(micro.squares()) {
        micro.set_status(BoardStatus::Won(winner));
        debug!(%board, %winner, "Micro-board claimed");
    } else if is_full(micro.squares()) {
        micro.set_status(BoardStatus::Cat);
        next.phase = Phase::MicroTiebreak {
            board,
            round: RpsRound::default(),
        };
        debug!(%board, "Micro-board drawn, RPS tiebreak pending");
    }

    next.next_board = next.board(cell).is_open().then_some(cell);
    next.current_player = player.opponent();
    settle(&mut next);

    #[cfg(debug_assertions)]
    MoveContract::post(state, &next)?;

    Ok(next)
}

/// Moves the match to whatever phase the boards now call for.
///
/// A galaxy line ends the match. Otherwise, if play is not held up by a
/// micro tiebreak and every board is closed, the galaxy decider starts at
/// 0-0. Shared by placements and micro tiebreak resolution.
pub(crate) fn settle(state: &mut GameState) {
    if let Some(winner) = determine_macro_winner(&state.boards) {
        debug!(%winner, "Galaxy line completed");
        state.phase = Phase::Finished {
            winner,
            final_rps: None,
        };
        return;
    }
    if state.phase == Phase::Playing && galaxy_stalled(&state.boards) {
        debug!("Every board closed without a galaxy line, arming decider");
        state.phase = Phase::GalaxyTiebreak {
            final_rps: FinalRps::default(),
        };
    }
}

/// The board play was sent to, if it is still open.
pub(crate) fn forced_board(state: &GameState) -> Option<Position> {
    state.next_board.filter(|board| state.board(*board).is_open())
}

/// Boards the current player may place in.
///
/// Empty while a tiebreak runs or once the match is over.
pub fn legal_boards(state: &GameState) -> Vec<Position> {
    if state.phase != Phase::Playing {
        return Vec::new();
    }
    match forced_board(state) {
        Some(board) => vec![board],
        None => Position::ALL
            .into_iter()
            .filter(|pos| state.board(*pos).is_open())
            .collect(),
    }
}

/// Every currently playable square, board by board in row-major order.
///
/// Empty exactly when a tiebreak is pending or the match has ended.
pub fn legal_moves(state: &GameState) -> Vec<Move> {
    let player = state.current_player();
    let moves: Vec<Move> = legal_boards(state)
        .into_iter()
        .flat_map(|board| {
            Position::valid_moves(state.board(board))
                .into_iter()
                .map(move |cell| Move::new(player, board, cell))
        })
        .collect();
    trace!(count = moves.len(), "Generated legal moves");
    moves
}
