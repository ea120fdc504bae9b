//! Coordinate abstractions over `CubieCube`.
//!
//! Each coordinate maps one aspect of the cube state to a small integer:
//!
//! - phase 1: corner orientation (`twist`, 3^7), edge orientation (`flip`,
//!   2^11), and the combination of positions the four slice edges occupy
//!   (`slice_combination`, C(12,4));
//! - phase 2: the corner permutation (8!), the permutation of the eight
//!   U/D-layer edges (8!), and the permutation of the slice edges within
//!   the slice (4!).
//!
//! The `set_*` counterparts are only used for move-table generation; they
//! write one aspect of a cube and leave the rest untouched.

use cube_core::{Corner, CubieCube, Edge};

pub const N_TWIST: usize = 2187;
pub const N_FLIP: usize = 2048;
pub const N_SLICE: usize = 495;
pub const N_CORNER_PERM: usize = 40320;
pub const N_UD_EDGE_PERM: usize = 40320;
pub const N_SLICE_PERM: usize = 24;

/// Corner orientation coordinate, 0..2187. Zero iff no corner is twisted.
pub fn twist(cube: &CubieCube) -> u16 {
    cube.co[..7]
        .iter()
        .fold(0, |acc, &o| 3 * acc + u16::from(o))
}

pub fn set_twist(cube: &mut CubieCube, mut twist: u16) {
    let mut total = 0;
    for i in (0..7).rev() {
        cube.co[i] = (twist % 3) as u8;
        total += cube.co[i];
        twist /= 3;
    }
    // The last corner's twist is forced by the invariant that twists sum to
    // zero mod 3.
    cube.co[7] = (3 - total % 3) % 3;
}

/// Edge orientation coordinate, 0..2048. Zero iff no edge is flipped.
pub fn flip(cube: &CubieCube) -> u16 {
    cube.eo[..11]
        .iter()
        .fold(0, |acc, &o| 2 * acc + u16::from(o))
}

pub fn set_flip(cube: &mut CubieCube, mut flip: u16) {
    let mut total = 0;
    for i in (0..11).rev() {
        cube.eo[i] = (flip % 2) as u8;
        total += cube.eo[i];
        flip /= 2;
    }
    cube.eo[11] = total % 2;
}

const fn binomials() -> [[u16; 5]; 13] {
    let mut c = [[0; 5]; 13];
    let mut n = 0;
    while n < 13 {
        c[n][0] = 1;
        let mut k = 1;
        while k < 5 {
            c[n][k] = if k > n {
                0
            } else if k == n {
                1
            } else {
                c[n - 1][k - 1] + c[n - 1][k]
            };
            k += 1;
        }
        n += 1;
    }
    c
}

const CHOOSE: [[u16; 5]; 13] = binomials();

fn choose(n: usize, k: i32) -> u16 {
    if k < 0 || k as usize > n {
        0
    } else {
        CHOOSE[n][k as usize]
    }
}

/// Which four positions the slice edges occupy, ignoring their order,
/// 0..495. Zero iff all four are home in the slice.
pub fn slice_combination(cube: &CubieCube) -> u16 {
    let mut coordinate = 0;
    let mut seen = 0i32;
    for (j, &edge) in cube.ep.iter().enumerate() {
        if edge >= Edge::Fr {
            seen += 1;
        } else if seen >= 1 {
            coordinate += choose(j, seen - 1);
        }
    }
    coordinate
}

pub fn set_slice_combination(cube: &mut CubieCube, mut coordinate: u16) {
    const SLICE_EDGES: [Edge; 4] = [Edge::Fr, Edge::Fl, Edge::Bl, Edge::Br];
    const OTHER_EDGES: [Edge; 8] = [
        Edge::Ur,
        Edge::Uf,
        Edge::Ul,
        Edge::Ub,
        Edge::Dr,
        Edge::Df,
        Edge::Dl,
        Edge::Db,
    ];
    let mut placed = [false; 12];
    let mut seen = 3i32;
    for j in (0..12).rev() {
        if i32::from(coordinate) - i32::from(choose(j, seen)) < 0 {
            cube.ep[j] = SLICE_EDGES[seen as usize];
            placed[j] = true;
            seen -= 1;
        } else {
            coordinate -= choose(j, seen);
        }
    }
    let mut next_other = 0;
    for j in 0..12 {
        if !placed[j] {
            cube.ep[j] = OTHER_EDGES[next_other];
            next_other += 1;
        }
    }
}

fn permutation_rank(perm: &mut [usize]) -> u16 {
    let mut rank = 0;
    for j in (1..perm.len()).rev() {
        let mut rotations = 0;
        while perm[j] != j {
            perm[..=j].rotate_left(1);
            rotations += 1;
        }
        rank = (j as u16 + 1) * rank + rotations;
    }
    rank
}

fn permutation_unrank(mut rank: u16, len: usize) -> [usize; 8] {
    let mut perm = [0usize; 8];
    for (i, slot) in perm.iter_mut().enumerate().take(len) {
        *slot = i;
    }
    for j in 1..len {
        let mut rotations = rank % (j as u16 + 1);
        rank /= j as u16 + 1;
        while rotations > 0 {
            perm[..=j].rotate_right(1);
            rotations -= 1;
        }
    }
    perm
}

/// Corner permutation coordinate, 0..40320. Zero iff every corner is home.
pub fn corner_perm(cube: &CubieCube) -> u16 {
    let mut perm: [usize; 8] = cube.cp.map(|c| c as usize);
    permutation_rank(&mut perm)
}

pub fn set_corner_perm(cube: &mut CubieCube, coordinate: u16) {
    let perm = permutation_unrank(coordinate, 8);
    for i in 0..8 {
        cube.cp[i] = Corner::ALL[perm[i]];
    }
}

/// Permutation coordinate of the eight U/D-layer edges, 0..40320. Only
/// meaningful when the slice edges are home (phase 2), where the eight
/// remaining edges stay within the U/D layers.
pub fn ud_edge_perm(cube: &CubieCube) -> u16 {
    let mut perm = [0usize; 8];
    for i in 0..8 {
        perm[i] = cube.ep[i] as usize;
    }
    permutation_rank(&mut perm)
}

pub fn set_ud_edge_perm(cube: &mut CubieCube, coordinate: u16) {
    let perm = permutation_unrank(coordinate, 8);
    for i in 0..8 {
        cube.ep[i] = Edge::ALL[perm[i]];
    }
    for i in 8..12 {
        cube.ep[i] = Edge::ALL[i];
    }
}

/// Permutation of the four slice edges within the slice, 0..24. Only
/// meaningful in phase 2, where the slice maps onto itself.
pub fn slice_perm(cube: &CubieCube) -> u16 {
    let mut perm = [0usize; 4];
    for i in 0..4 {
        perm[i] = cube.ep[8 + i] as usize - 8;
    }
    let mut rank = 0;
    for j in (1..4).rev() {
        let mut rotations = 0;
        while perm[j] != j {
            perm[..=j].rotate_left(1);
            rotations += 1;
        }
        rank = (j as u16 + 1) * rank + rotations;
    }
    rank
}

pub fn set_slice_perm(cube: &mut CubieCube, mut coordinate: u16) {
    let mut perm = [0usize, 1, 2, 3];
    for j in 1..4 {
        let mut rotations = coordinate % (j as u16 + 1);
        coordinate /= j as u16 + 1;
        while rotations > 0 {
            perm[..=j].rotate_right(1);
            rotations -= 1;
        }
    }
    for i in 0..4 {
        cube.ep[8 + i] = Edge::ALL[8 + perm[i]];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cube_core::parse_sequence;

    #[test]
    fn solved_cube_has_zero_coordinates() {
        let solved = CubieCube::SOLVED;
        assert_eq!(twist(&solved), 0);
        assert_eq!(flip(&solved), 0);
        assert_eq!(slice_combination(&solved), 0);
        assert_eq!(corner_perm(&solved), 0);
        assert_eq!(ud_edge_perm(&solved), 0);
        assert_eq!(slice_perm(&solved), 0);
    }

    #[test]
    fn twist_round_trips() {
        let mut cube = CubieCube::SOLVED;
        for coordinate in [0, 1, 2, 1000, 2186] {
            set_twist(&mut cube, coordinate);
            assert_eq!(twist(&cube), coordinate);
            assert_eq!(cube.co.iter().map(|&o| u32::from(o)).sum::<u32>() % 3, 0);
        }
    }

    #[test]
    fn flip_round_trips() {
        let mut cube = CubieCube::SOLVED;
        for coordinate in [0, 1, 2, 1024, 2047] {
            set_flip(&mut cube, coordinate);
            assert_eq!(flip(&cube), coordinate);
            assert_eq!(cube.eo.iter().map(|&o| u32::from(o)).sum::<u32>() % 2, 0);
        }
    }

    #[test]
    fn slice_combination_round_trips() {
        let mut cube = CubieCube::SOLVED;
        for coordinate in 0..N_SLICE as u16 {
            set_slice_combination(&mut cube, coordinate);
            assert_eq!(slice_combination(&cube), coordinate);
        }
    }

    #[test]
    fn corner_perm_round_trips() {
        let mut cube = CubieCube::SOLVED;
        for coordinate in [0, 1, 5039, 20000, 40319] {
            set_corner_perm(&mut cube, coordinate);
            assert_eq!(corner_perm(&cube), coordinate);
        }
    }

    #[test]
    fn ud_edge_perm_round_trips() {
        let mut cube = CubieCube::SOLVED;
        for coordinate in [0, 1, 7, 40319] {
            set_ud_edge_perm(&mut cube, coordinate);
            assert_eq!(ud_edge_perm(&cube), coordinate);
        }
    }

    #[test]
    fn slice_perm_round_trips() {
        let mut cube = CubieCube::SOLVED;
        for coordinate in 0..N_SLICE_PERM as u16 {
            set_slice_perm(&mut cube, coordinate);
            assert_eq!(slice_perm(&cube), coordinate);
        }
    }

    #[test]
    fn coordinates_track_real_move_sequences() {
        // Quarter turns of R and F disturb the phase 1 coordinates, while a
        // sequence that stays within the phase 2 subgroup leaves them zero.
        let r: cube_core::Move = "R".parse().unwrap();
        let cube = CubieCube::SOLVED.multiplied(r.cubie());
        assert_ne!(twist(&cube), 0);
        assert_ne!(slice_combination(&cube), 0);

        let f: cube_core::Move = "F".parse().unwrap();
        let cube = CubieCube::SOLVED.multiplied(f.cubie());
        assert_ne!(flip(&cube), 0);

        let subgroup = parse_sequence("U D' R2 F2 U2 L2 B2 D").unwrap();
        let mut cube = CubieCube::SOLVED;
        for mv in &subgroup {
            cube.multiply(mv.cubie());
        }
        assert_eq!(twist(&cube), 0);
        assert_eq!(flip(&cube), 0);
        assert_eq!(slice_combination(&cube), 0);
        assert_ne!(
            (corner_perm(&cube), ud_edge_perm(&cube), slice_perm(&cube)),
            (0, 0, 0)
        );
    }
}
