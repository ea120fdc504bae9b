//! Random scramble generation.

use cube_core::{FaceletCube, Move};
use log::debug;

/// Apply `length` random moves to a solved cube and return the resulting
/// state together with the moves that produced it.
///
/// Consecutive moves never turn the same face, so no pair of adjacent
/// moves can cancel or merge and the effective scramble depth stays at
/// `length`. `scramble(0)` returns a solved cube and an empty list.
pub fn scramble(length: usize) -> (FaceletCube, Vec<Move>) {
    let mut cube = FaceletCube::SOLVED;
    let mut moves: Vec<Move> = Vec::with_capacity(length);
    while moves.len() < length {
        let mv = Move::ALL[fastrand::usize(..Move::ALL.len())];
        if let Some(&previous) = moves.last() {
            if previous.face == mv.face {
                continue;
            }
        }
        cube.apply(mv);
        moves.push(mv);
    }
    debug!("scrambled with {} moves", moves.len());
    (cube, moves)
}
