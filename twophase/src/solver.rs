//! The bounded two-phase IDA* search and its solution/metadata types.

use crate::coords;
use crate::tables::{PHASE2_MOVES, SolverTables, preserves_subgroup};
use crate::{start, success, working};
use cube_core::{CubieCube, FaceletCube, InvalidState, Move, validate};
use itertools::Itertools;
use log::{Level, debug, error, info, log_enabled};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use thiserror::Error;

/// Phase 1 is never longer than 12 moves, phase 2 never longer than 18, so
/// any reachable state solves in at most 30.
pub const MAX_PHASE1: u8 = 12;
pub const MAX_PHASE2: u8 = 18;
pub const MAX_SOLUTION: u8 = MAX_PHASE1 + MAX_PHASE2;

/// Which phase of the search emitted a move. Metadata for display and
/// playback only; it never influences the search itself.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    One,
    Two,
}

impl Phase {
    pub const fn label(self) -> &'static str {
        match self {
            Phase::One => "phase 1",
            Phase::Two => "phase 2",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Phase::One => "orient all edges and corners and bring the slice edges home",
            Phase::Two => "permute the pieces using only U, D and half turns",
        }
    }
}

/// One move of a solution, tagged with the phase that produced it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub mv: Move,
    pub phase: Phase,
}

impl Step {
    pub const fn description(self) -> &'static str {
        self.phase.description()
    }
}

/// A coarse difficulty bucket derived purely from the total move count.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    /// Already solved; nothing to do.
    Trivial,
    Easy,
    Moderate,
    Hard,
}

impl Difficulty {
    pub const fn from_move_count(count: usize) -> Difficulty {
        match count {
            0 => Difficulty::Trivial,
            1..=14 => Difficulty::Easy,
            15..=22 => Difficulty::Moderate,
            _ => Difficulty::Hard,
        }
    }
}

/// An ordered move sequence returning some state to solved, with per-move
/// phase labels and summary metrics.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Solution {
    pub steps: Vec<Step>,
}

impl Solution {
    pub fn moves(&self) -> Vec<Move> {
        self.steps.iter().map(|step| step.mv).collect()
    }

    pub fn move_count(&self) -> usize {
        self.steps.len()
    }

    /// Move counts per phase, `[phase 1, phase 2]`.
    pub fn phase_counts(&self) -> [usize; 2] {
        let phase1 = self
            .steps
            .iter()
            .filter(|step| step.phase == Phase::One)
            .count();
        [phase1, self.steps.len() - phase1]
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_move_count(self.move_count())
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.steps.iter().map(|step| step.mv).join(" "))
    }
}

/// A shared flag for abandoning an in-flight solve. Cloning hands out
/// another handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Error)]
pub enum SolveError {
    /// The input failed reachability validation; carries every violated
    /// check. Never silently corrected.
    #[error(transparent)]
    InvalidState(#[from] InvalidState),
    /// The search exhausted its bounds on a state that passed validation.
    /// Unreachable for a correct engine, so it is logged as an anomaly.
    #[error("no solution within {0} moves for a state that passed validation")]
    Unsolvable(u8),
    /// The caller cancelled the search. Not a user-facing failure; the
    /// result is simply incomplete.
    #[error("search cancelled")]
    Cancelled,
}

/// The two-phase solver. Holds only configuration and a reference to the
/// shared tables; per-solve state lives in a private mutable struct so one
/// solver value can serve many sequential solves.
pub struct TwoPhaseSolver {
    tables: &'static SolverTables,
    max_length: u8,
    cancel: CancelToken,
}

impl Default for TwoPhaseSolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutable search state threaded through the recursion, in the manner of a
/// solver/mutable-companion split.
struct SearchMutable<'a> {
    tables: &'static SolverTables,
    cancel: &'a CancelToken,
    origin: &'a CubieCube,
    max_length: u8,
    phase1: Vec<Move>,
    phase2: Vec<Move>,
    nodes_visited: u64,
}

impl TwoPhaseSolver {
    pub fn new() -> TwoPhaseSolver {
        TwoPhaseSolver {
            tables: SolverTables::get(),
            max_length: MAX_SOLUTION,
            cancel: CancelToken::new(),
        }
    }

    /// Cap the total solution length. Anything below 20 may make easy
    /// states unsolvable within bounds; the default of 30 is always enough.
    #[must_use]
    pub fn with_max_length(mut self, max_length: u8) -> TwoPhaseSolver {
        self.max_length = max_length.min(MAX_SOLUTION);
        self
    }

    /// Attach a cancellation token. Cancelling it makes an in-flight solve
    /// return `SolveError::Cancelled` promptly.
    #[must_use]
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> TwoPhaseSolver {
        self.cancel = cancel;
        self
    }

    /// Validate `cube` and search for a solving sequence.
    ///
    /// # Errors
    ///
    /// `InvalidState` if the state is not reachable, `Cancelled` if the
    /// token fired, `Unsolvable` if the bounded search is exhausted (an
    /// engine defect, not a property of valid input).
    pub fn solve(&self, cube: &FaceletCube) -> Result<Solution, SolveError> {
        let cubies = validate(cube)?;
        self.solve_cubies(&cubies)
    }

    /// Search from an already-validated cubie state.
    pub fn solve_cubies(&self, cubies: &CubieCube) -> Result<Solution, SolveError> {
        if *cubies == CubieCube::SOLVED {
            return Ok(Solution::default());
        }

        info!(start!("Searching for a solution"));
        let started = Instant::now();

        let twist = coords::twist(cubies);
        let flip = coords::flip(cubies);
        let slice = coords::slice_combination(cubies);

        let mut mutable = SearchMutable {
            tables: self.tables,
            cancel: &self.cancel,
            origin: cubies,
            max_length: self.max_length,
            phase1: Vec::with_capacity(MAX_PHASE1 as usize),
            phase2: Vec::with_capacity(MAX_PHASE2 as usize),
            nodes_visited: 0,
        };

        let lower_bound = self.tables.pruning.phase1(twist, flip, slice);
        for depth in lower_bound..=MAX_PHASE1.min(self.max_length) {
            debug!(working!("Searching phase 1 at depth {}..."), depth);
            if mutable.phase1_search(twist, flip, slice, depth)? {
                let solution = Solution {
                    steps: mutable
                        .phase1
                        .iter()
                        .map(|&mv| Step {
                            mv,
                            phase: Phase::One,
                        })
                        .chain(mutable.phase2.iter().map(|&mv| Step {
                            mv,
                            phase: Phase::Two,
                        }))
                        .collect(),
                };
                let [phase1_count, phase2_count] = solution.phase_counts();
                info!(
                    success!("Solved in {:.3}s: {} moves ({} + {}), {} nodes"),
                    started.elapsed().as_secs_f64(),
                    solution.move_count(),
                    phase1_count,
                    phase2_count,
                    mutable.nodes_visited,
                );
                return Ok(solution);
            }
        }

        // A validated state always solves within the bounds, so reaching
        // this point means the engine itself is broken.
        error!(
            "Exhausted the search bounds on a validated state after visiting {} nodes",
            mutable.nodes_visited
        );
        Err(SolveError::Unsolvable(self.max_length))
    }
}

/// Whether `mv` may follow `previous` in a canonical sequence: never the
/// same face twice, and opposite faces only in one fixed axis order.
fn allowed_after(previous: Option<Move>, mv: Move) -> bool {
    match previous {
        None => true,
        Some(prev) => {
            prev.face != mv.face && prev.face as usize != mv.face as usize + 3
        }
    }
}

impl SearchMutable<'_> {
    /// Depth-limited phase 1 search. On success the phase 1 and phase 2
    /// move stacks hold the full solution.
    fn phase1_search(
        &mut self,
        twist: u16,
        flip: u16,
        slice: u16,
        togo: u8,
    ) -> Result<bool, SolveError> {
        if self.cancel.is_cancelled() {
            return Err(SolveError::Cancelled);
        }
        if log_enabled!(Level::Debug) {
            self.nodes_visited += 1;
        }

        if togo == 0 {
            if twist == 0 && flip == 0 && slice == 0 {
                // An endpoint whose last move stays inside the subgroup is a
                // shorter endpoint already tried at a lower depth with a
                // larger phase 2 budget; searching it again only duplicates
                // work.
                if let Some(&last) = self.phase1.last() {
                    if preserves_subgroup(last) {
                        return Ok(false);
                    }
                }
                return self.phase2_start();
            }
            return Ok(false);
        }

        for mv in Move::ALL {
            if !allowed_after(self.phase1.last().copied(), mv) {
                continue;
            }
            let next_twist = self.tables.moves.twist(twist, mv.index());
            let next_flip = self.tables.moves.flip(flip, mv.index());
            let next_slice = self.tables.moves.slice_combination(slice, mv.index());
            if self.tables.pruning.phase1(next_twist, next_flip, next_slice) >= togo {
                continue;
            }
            self.phase1.push(mv);
            if self.phase1_search(next_twist, next_flip, next_slice, togo - 1)? {
                return Ok(true);
            }
            self.phase1.pop();
        }
        Ok(false)
    }

    /// Entered at every phase 1 endpoint: compute the exact cubie state at
    /// the subgroup boundary and run the phase 2 deepening loop within the
    /// remaining move budget. Returning `false` backtracks into phase 1.
    fn phase2_start(&mut self) -> Result<bool, SolveError> {
        let mut cube = self.origin.clone();
        for mv in &self.phase1 {
            cube.multiply(mv.cubie());
        }

        let corner = coords::corner_perm(&cube);
        let ud_edges = coords::ud_edge_perm(&cube);
        let slice = coords::slice_perm(&cube);
        if corner == 0 && ud_edges == 0 && slice == 0 {
            return Ok(true);
        }

        let budget = MAX_PHASE2.min(self.max_length - self.phase1.len() as u8);
        let lower_bound = self.tables.pruning.phase2(corner, ud_edges, slice);
        for togo in lower_bound..=budget {
            self.phase2.clear();
            if self.phase2_search(corner, ud_edges, slice, togo)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn phase2_search(
        &mut self,
        corner: u16,
        ud_edges: u16,
        slice: u16,
        togo: u8,
    ) -> Result<bool, SolveError> {
        if self.cancel.is_cancelled() {
            return Err(SolveError::Cancelled);
        }
        if log_enabled!(Level::Debug) {
            self.nodes_visited += 1;
        }

        if togo == 0 {
            return Ok(corner == 0 && ud_edges == 0 && slice == 0);
        }

        for (phase2_index, &mv) in PHASE2_MOVES.iter().enumerate() {
            let previous = self
                .phase2
                .last()
                .or_else(|| self.phase1.last())
                .copied();
            if !allowed_after(previous, mv) {
                continue;
            }
            let next_corner = self.tables.moves.corner_perm(corner, phase2_index);
            let next_ud_edges = self.tables.moves.ud_edge_perm(ud_edges, phase2_index);
            let next_slice = self.tables.moves.slice_perm(slice, phase2_index);
            if self
                .tables
                .pruning
                .phase2(next_corner, next_ud_edges, next_slice)
                >= togo
            {
                continue;
            }
            self.phase2.push(mv);
            if self.phase2_search(next_corner, next_ud_edges, next_slice, togo - 1)? {
                return Ok(true);
            }
            self.phase2.pop();
        }
        Ok(false)
    }
}
