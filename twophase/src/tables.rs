//! Precomputed move and pruning tables backing the two-phase search.
//!
//! Move tables map (coordinate, move) to the successor coordinate; pruning
//! tables hold breadth-first distances to the solved coordinates and give
//! the search an admissible lower bound. Everything is generated once per
//! process behind a `LazyLock`.

use crate::coords::{
    self, N_CORNER_PERM, N_FLIP, N_SLICE, N_SLICE_PERM, N_TWIST, N_UD_EDGE_PERM,
};
use crate::{start, success};
use cube_core::{CubieCube, Face, Move, Turn};
use log::info;
use std::sync::LazyLock;
use std::time::Instant;

/// The ten moves that generate the phase 2 subgroup, in search order.
pub const PHASE2_MOVES: [Move; 10] = [
    Move::new(Face::U, Turn::Clockwise),
    Move::new(Face::U, Turn::Half),
    Move::new(Face::U, Turn::Counter),
    Move::new(Face::R, Turn::Half),
    Move::new(Face::F, Turn::Half),
    Move::new(Face::D, Turn::Clockwise),
    Move::new(Face::D, Turn::Half),
    Move::new(Face::D, Turn::Counter),
    Move::new(Face::L, Turn::Half),
    Move::new(Face::B, Turn::Half),
];

/// Whether a move is legal inside the phase 2 subgroup.
pub fn preserves_subgroup(mv: Move) -> bool {
    matches!(mv.face, Face::U | Face::D) || mv.turn == Turn::Half
}

/// Successor tables for every coordinate the search tracks. Phase 1 tables
/// cover all 18 moves; phase 2 tables only the subgroup alphabet, since the
/// phase 2 coordinates are undefined outside it.
pub struct MoveTables {
    twist: Vec<u16>,
    flip: Vec<u16>,
    slice_combination: Vec<u16>,
    corner_perm: Vec<u16>,
    ud_edge_perm: Vec<u16>,
    slice_perm: Vec<u16>,
}

impl MoveTables {
    fn generate() -> Self {
        MoveTables {
            twist: coordinate_table(N_TWIST, &Move::ALL, coords::set_twist, coords::twist),
            flip: coordinate_table(N_FLIP, &Move::ALL, coords::set_flip, coords::flip),
            slice_combination: coordinate_table(
                N_SLICE,
                &Move::ALL,
                coords::set_slice_combination,
                coords::slice_combination,
            ),
            corner_perm: coordinate_table(
                N_CORNER_PERM,
                &PHASE2_MOVES,
                coords::set_corner_perm,
                coords::corner_perm,
            ),
            ud_edge_perm: coordinate_table(
                N_UD_EDGE_PERM,
                &PHASE2_MOVES,
                coords::set_ud_edge_perm,
                coords::ud_edge_perm,
            ),
            slice_perm: coordinate_table(
                N_SLICE_PERM,
                &PHASE2_MOVES,
                coords::set_slice_perm,
                coords::slice_perm,
            ),
        }
    }

    #[inline]
    pub fn twist(&self, twist: u16, move_index: usize) -> u16 {
        self.twist[twist as usize * 18 + move_index]
    }

    #[inline]
    pub fn flip(&self, flip: u16, move_index: usize) -> u16 {
        self.flip[flip as usize * 18 + move_index]
    }

    #[inline]
    pub fn slice_combination(&self, slice: u16, move_index: usize) -> u16 {
        self.slice_combination[slice as usize * 18 + move_index]
    }

    #[inline]
    pub fn corner_perm(&self, corner: u16, phase2_index: usize) -> u16 {
        self.corner_perm[corner as usize * 10 + phase2_index]
    }

    #[inline]
    pub fn ud_edge_perm(&self, ud_edges: u16, phase2_index: usize) -> u16 {
        self.ud_edge_perm[ud_edges as usize * 10 + phase2_index]
    }

    #[inline]
    pub fn slice_perm(&self, slice: u16, phase2_index: usize) -> u16 {
        self.slice_perm[slice as usize * 10 + phase2_index]
    }
}

fn coordinate_table(
    count: usize,
    alphabet: &[Move],
    set: fn(&mut CubieCube, u16),
    get: fn(&CubieCube) -> u16,
) -> Vec<u16> {
    let mut table = vec![0; count * alphabet.len()];
    for coordinate in 0..count {
        let mut cube = CubieCube::SOLVED;
        set(&mut cube, coordinate as u16);
        for (m, mv) in alphabet.iter().enumerate() {
            table[coordinate * alphabet.len() + m] = get(&cube.multiplied(mv.cubie()));
        }
    }
    table
}

/// Breadth-first distance tables over pairs of coordinates.
pub struct PruningTables {
    twist_slice: Vec<u8>,
    flip_slice: Vec<u8>,
    corner_slice: Vec<u8>,
    ud_edge_slice: Vec<u8>,
}

impl PruningTables {
    fn generate(moves: &MoveTables) -> Self {
        PruningTables {
            twist_slice: distance_table(N_TWIST, N_SLICE, &moves.twist, &moves.slice_combination, 18),
            flip_slice: distance_table(N_FLIP, N_SLICE, &moves.flip, &moves.slice_combination, 18),
            corner_slice: distance_table(
                N_CORNER_PERM,
                N_SLICE_PERM,
                &moves.corner_perm,
                &moves.slice_perm,
                10,
            ),
            ud_edge_slice: distance_table(
                N_UD_EDGE_PERM,
                N_SLICE_PERM,
                &moves.ud_edge_perm,
                &moves.slice_perm,
                10,
            ),
        }
    }

    /// Admissible lower bound on the moves left in phase 1.
    #[inline]
    pub fn phase1(&self, twist: u16, flip: u16, slice: u16) -> u8 {
        let twist_slice = self.twist_slice[twist as usize * N_SLICE + slice as usize];
        let flip_slice = self.flip_slice[flip as usize * N_SLICE + slice as usize];
        twist_slice.max(flip_slice)
    }

    /// Admissible lower bound on the moves left in phase 2.
    #[inline]
    pub fn phase2(&self, corner: u16, ud_edges: u16, slice: u16) -> u8 {
        let corner_slice = self.corner_slice[corner as usize * N_SLICE_PERM + slice as usize];
        let ud_edge_slice = self.ud_edge_slice[ud_edges as usize * N_SLICE_PERM + slice as usize];
        corner_slice.max(ud_edge_slice)
    }
}

/// BFS from the solved pair (0, 0) over the product graph of two coordinate
/// move tables. Entries unreachable in the product stay at `u8::MAX`; real
/// cube states never project onto them.
fn distance_table(
    count_a: usize,
    count_b: usize,
    table_a: &[u16],
    table_b: &[u16],
    alphabet_len: usize,
) -> Vec<u8> {
    let mut distances = vec![u8::MAX; count_a * count_b];
    distances[0] = 0;
    let mut frontier = vec![0u32];
    let mut depth = 0u8;
    while !frontier.is_empty() {
        let mut next_frontier = Vec::new();
        for &index in &frontier {
            let a = index as usize / count_b;
            let b = index as usize % count_b;
            for m in 0..alphabet_len {
                let next_a = table_a[a * alphabet_len + m] as usize;
                let next_b = table_b[b * alphabet_len + m] as usize;
                let next_index = next_a * count_b + next_b;
                if distances[next_index] == u8::MAX {
                    distances[next_index] = depth + 1;
                    next_frontier.push(next_index as u32);
                }
            }
        }
        depth += 1;
        frontier = next_frontier;
    }
    distances
}

/// All tables the solver needs, generated once per process.
pub struct SolverTables {
    pub moves: MoveTables,
    pub pruning: PruningTables,
}

static TABLES: LazyLock<SolverTables> = LazyLock::new(|| {
    info!(start!("Generating move and pruning tables"));
    let started = Instant::now();
    let moves = MoveTables::generate();
    let pruning = PruningTables::generate(&moves);
    info!(
        success!("Tables ready in {:.3}s"),
        started.elapsed().as_secs_f64()
    );
    SolverTables { moves, pruning }
});

impl SolverTables {
    pub fn get() -> &'static SolverTables {
        &TABLES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cube_core::parse_sequence;

    #[test]
    fn phase1_tables_agree_with_cubie_composition() {
        let tables = SolverTables::get();
        let scramble = parse_sequence("R U2 F' D L2 B U R2").unwrap();
        let mut cube = CubieCube::SOLVED;
        for mv in &scramble {
            cube.multiply(mv.cubie());
        }
        for mv in Move::ALL {
            let moved = cube.multiplied(mv.cubie());
            assert_eq!(
                tables.moves.twist(coords::twist(&cube), mv.index()),
                coords::twist(&moved)
            );
            assert_eq!(
                tables.moves.flip(coords::flip(&cube), mv.index()),
                coords::flip(&moved)
            );
            assert_eq!(
                tables
                    .moves
                    .slice_combination(coords::slice_combination(&cube), mv.index()),
                coords::slice_combination(&moved)
            );
        }
    }

    #[test]
    fn phase2_tables_agree_with_cubie_composition() {
        let tables = SolverTables::get();
        // A state inside the phase 2 subgroup.
        let sequence = parse_sequence("U R2 D' F2 U2 L2 B2 D R2 U'").unwrap();
        let mut cube = CubieCube::SOLVED;
        for mv in &sequence {
            cube.multiply(mv.cubie());
        }
        for (phase2_index, mv) in PHASE2_MOVES.iter().enumerate() {
            let moved = cube.multiplied(mv.cubie());
            assert_eq!(
                tables
                    .moves
                    .corner_perm(coords::corner_perm(&cube), phase2_index),
                coords::corner_perm(&moved)
            );
            assert_eq!(
                tables
                    .moves
                    .ud_edge_perm(coords::ud_edge_perm(&cube), phase2_index),
                coords::ud_edge_perm(&moved)
            );
            assert_eq!(
                tables
                    .moves
                    .slice_perm(coords::slice_perm(&cube), phase2_index),
                coords::slice_perm(&moved)
            );
        }
    }

    #[test]
    fn pruning_distances_start_at_zero_and_step_by_at_most_one() {
        let tables = SolverTables::get();
        assert_eq!(tables.pruning.phase1(0, 0, 0), 0);
        assert_eq!(tables.pruning.phase2(0, 0, 0), 0);

        // Walking one move away from solved can raise the bound by at most 1.
        for mv in Move::ALL {
            let cube = CubieCube::SOLVED.multiplied(mv.cubie());
            let bound = tables.pruning.phase1(
                coords::twist(&cube),
                coords::flip(&cube),
                coords::slice_combination(&cube),
            );
            assert!(bound <= 1);
        }
        for mv in &PHASE2_MOVES {
            let cube = CubieCube::SOLVED.multiplied(mv.cubie());
            let bound = tables.pruning.phase2(
                coords::corner_perm(&cube),
                coords::ud_edge_perm(&cube),
                coords::slice_perm(&cube),
            );
            assert!(bound <= 1);
        }
    }

    #[test]
    fn subgroup_membership_matches_the_move_list() {
        let listed: Vec<Move> = Move::ALL
            .into_iter()
            .filter(|&mv| preserves_subgroup(mv))
            .collect();
        assert_eq!(listed.len(), 10);
        for mv in &PHASE2_MOVES {
            assert!(listed.contains(mv));
        }
    }
}
