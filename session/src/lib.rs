//! Interactive session layer: one owned live cube state, a move log with
//! undo, scrambling, and asynchronous solve requests against snapshots.
//!
//! All mutation goes through [`Session`]; nothing else holds a mutable
//! reference to the live state. Solvers only ever see immutable copies.

pub mod pieces;
pub mod scramble;

pub use pieces::{Piece, project};
pub use scramble::scramble;

use crossbeam_channel::{Receiver, bounded};
use cube_core::{FaceletCube, Move, ParseMoveError, parse_sequence};
use log::{debug, error, info};
use std::thread;
use twophase::{CancelToken, SolveError, Solution, TwoPhaseSolver};

/// One interactive cube session: the live facelet state plus the log of
/// moves applied to it since the last reset or scramble.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: FaceletCube,
    log: Vec<Move>,
}

impl Session {
    pub fn new() -> Session {
        Session {
            state: FaceletCube::SOLVED,
            log: Vec::new(),
        }
    }

    pub fn state(&self) -> &FaceletCube {
        &self.state
    }

    /// Moves applied since the last reset or scramble, oldest first.
    pub fn moves(&self) -> &[Move] {
        &self.log
    }

    pub fn apply_move(&mut self, mv: Move) {
        self.state.apply(mv);
        self.log.push(mv);
    }

    /// Parse and apply a whitespace-separated move sequence. The whole
    /// sequence is parsed before anything is applied, so a malformed token
    /// leaves both the state and the log untouched.
    ///
    /// # Errors
    ///
    /// `ParseMoveError` for any malformed token; never a silent no-op.
    pub fn apply_notation(&mut self, notation: &str) -> Result<(), ParseMoveError> {
        let moves = parse_sequence(notation)?;
        for mv in moves {
            self.apply_move(mv);
        }
        Ok(())
    }

    /// Replace the state with a fresh `length`-move scramble. The log is
    /// replaced by the scramble moves so the scramble itself can be
    /// displayed and replayed.
    pub fn scramble(&mut self, length: usize) -> &[Move] {
        let (state, moves) = scramble(length);
        self.state = state;
        self.log = moves;
        &self.log
    }

    /// Return to a fresh copy of the solved state and clear the log.
    pub fn reset(&mut self) {
        self.state = FaceletCube::SOLVED;
        self.log.clear();
    }

    /// Pop the most recent logged move and apply its inverse. The inverse
    /// is not logged. Returns the undone move, or `None` on an empty log.
    pub fn undo(&mut self) -> Option<Move> {
        let mv = self.log.pop()?;
        self.state.apply(mv.inverse());
        debug!("undid {mv}");
        Some(mv)
    }

    /// Whether the live state structurally equals the solved state. Always
    /// a full deep comparison, never inferred from the move log.
    pub fn is_solved(&self) -> bool {
        self.state.is_solved()
    }

    /// An immutable deep copy of the live state for consumers that outlive
    /// the next mutation.
    pub fn snapshot(&self) -> FaceletCube {
        self.state.clone()
    }

    /// The render-facing 26-piece projection of the live state.
    pub fn pieces(&self) -> Vec<Piece> {
        project(&self.state)
    }

    /// Start solving a snapshot of the live state on a worker thread.
    ///
    /// The session stays usable while the search runs; cancel the handle
    /// when the state it was taken from is superseded, so a stale result
    /// is never delivered.
    pub fn solve_in_background(&self) -> SolveHandle {
        let snapshot = self.snapshot();
        let cancel = CancelToken::new();
        let (sender, receiver) = bounded(1);

        let solver_cancel = cancel.clone();
        thread::spawn(move || {
            let solver = TwoPhaseSolver::new().with_cancel_token(solver_cancel);
            let result = solver.solve(&snapshot);
            if let Ok(solution) = &result {
                info!("background solve finished: {} moves", solution.move_count());
            }
            // The receiver dropping just means nobody wants the answer.
            let _ = sender.send(result);
        });

        SolveHandle { receiver, cancel }
    }
}

/// Handle to an in-flight background solve.
pub struct SolveHandle {
    receiver: Receiver<Result<Solution, SolveError>>,
    cancel: CancelToken,
}

impl SolveHandle {
    /// Abandon the search. The worker notices at its next node and returns
    /// `SolveError::Cancelled` instead of a solution.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// The result if the worker has finished, without blocking.
    pub fn try_result(&self) -> Option<Result<Solution, SolveError>> {
        self.receiver.try_recv().ok()
    }

    /// Block until the worker finishes.
    ///
    /// The worker dropping its channel without a result is expected after a
    /// cancellation; otherwise it means the worker died and is logged as an
    /// anomaly rather than passed off as a cancellation.
    pub fn wait(self) -> Result<Solution, SolveError> {
        match self.receiver.recv() {
            Ok(result) => result,
            Err(_) => {
                if !self.cancel.is_cancelled() {
                    error!("solver worker stopped without delivering a result");
                }
                Err(SolveError::Cancelled)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn undo_restores_state_and_empties_log() {
        let mut session = Session::new();
        session.apply_notation("R").unwrap();
        assert!(!session.is_solved());

        assert_eq!(session.undo(), Some("R".parse().unwrap()));
        assert!(session.is_solved());
        assert!(session.moves().is_empty());
        assert_eq!(session.undo(), None);
    }

    #[test_log::test]
    fn malformed_notation_leaves_session_untouched() {
        let mut session = Session::new();
        assert!(session.apply_notation("R U X'").is_err());
        assert!(session.is_solved());
        assert!(session.moves().is_empty());
    }

    #[test_log::test]
    fn sequence_and_literal_inverse_return_to_solved() {
        let mut session = Session::new();
        session.apply_notation("R U R' U'").unwrap();
        session.apply_notation("U R U' R'").unwrap();
        assert!(session.is_solved());
        assert_eq!(session.moves().len(), 8);
    }

    #[test_log::test]
    fn scramble_replaces_the_log() {
        let mut session = Session::new();
        session.apply_notation("F2 D").unwrap();
        let moves = session.scramble(25).to_vec();
        assert_eq!(moves.len(), 25);
        assert_eq!(session.moves(), moves);

        session.reset();
        assert!(session.is_solved());
        assert!(session.moves().is_empty());
    }

    #[test_log::test]
    fn snapshot_is_independent_of_later_mutation() {
        let mut session = Session::new();
        session.apply_notation("R U2 F'").unwrap();
        let snapshot = session.snapshot();
        session.reset();
        assert!(session.is_solved());
        assert_ne!(&snapshot, session.state());
    }

    #[test_log::test]
    fn background_solve_of_a_short_scramble_replays_to_solved() {
        let mut session = Session::new();
        session.apply_notation("L2 B D'").unwrap();
        let solution = session.solve_in_background().wait().unwrap();

        for mv in solution.moves() {
            session.apply_move(mv);
        }
        assert!(session.is_solved());
    }

    #[test_log::test]
    fn wait_on_a_dead_worker_does_not_hang() {
        let (sender, receiver) = bounded::<Result<Solution, SolveError>>(1);
        drop(sender);
        let handle = SolveHandle {
            receiver,
            cancel: CancelToken::new(),
        };
        match handle.wait() {
            Err(SolveError::Cancelled) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test_log::test]
    fn cancelled_background_solve_reports_cancellation() {
        let mut session = Session::new();
        session.scramble(20);
        let handle = session.solve_in_background();
        handle.cancel();
        // The worker may have finished before the cancel landed; either a
        // solution or a cancellation is acceptable, never a hang.
        match handle.wait() {
            Ok(_) | Err(SolveError::Cancelled) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
}
