//! Kociemba-style two-phase solver for the 3x3 cube.
//!
//! Phase 1 searches the coset space of the subgroup generated by
//! {U, D, L2, R2, F2, B2}: it orients all edges and corners and brings the
//! four equatorial edges home. Phase 2 then permutes everything within that
//! subgroup. Both phases are bounded iterative-deepening searches over
//! small integer coordinates, pruned by precomputed distance tables.

pub mod coords;
pub mod solver;
pub mod tables;

pub use solver::{
    CancelToken, Difficulty, Phase, SolveError, Solution, Step, TwoPhaseSolver,
};
pub use tables::SolverTables;

#[macro_export]
macro_rules! start {
    ($msg:expr) => {
        concat!("⏳ ", $msg)
    };
}

#[macro_export]
macro_rules! working {
    ($msg:expr) => {
        concat!("🛠  ", $msg)
    };
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        concat!("✅ ", $msg)
    };
}
