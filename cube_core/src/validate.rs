//! Reachability validation for externally supplied facelet states.
//!
//! States produced internally by the move engine are reachable by
//! construction, but a state reconstructed from, say, camera color
//! classification can violate any of the cube's invariants. The validator
//! reports every violated check, not just the first, so callers can show a
//! complete diagnosis.

use crate::cubie::{CORNER_COLOR, CORNER_FACELET, Corner, CubieCube, EDGE_COLOR, EDGE_FACELET, Edge};
use crate::facelet::{Color, Face, FaceletCube};
use thiserror::Error;

/// A single violated reachability check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateFlaw {
    #[error("color {color} appears {count} times instead of 9")]
    ColorCount { color: Color, count: usize },
    #[error("center of face {face} is {found}, expected {}", face.color())]
    CenterMismatch { face: Face, found: Color },
    #[error("stickers at corner position {0:?} match no physical corner piece")]
    UnknownCorner(Corner),
    #[error("stickers at edge position {0:?} match no physical edge piece")]
    UnknownEdge(Edge),
    #[error("corner piece {0:?} appears more than once")]
    RepeatedCorner(Corner),
    #[error("edge piece {0:?} appears more than once")]
    RepeatedEdge(Edge),
    #[error("total corner twist is {0}, not divisible by 3")]
    CornerTwist(u32),
    #[error("total edge flip is {0}, not divisible by 2 (single flipped edge)")]
    EdgeFlip(u32),
    #[error("corner and edge permutation parities differ (single swapped pair)")]
    PermutationParity,
}

/// A facelet state that no sequence of legal moves can reach. Carries every
/// violated check; never auto-corrected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unreachable cube state: {}", .flaws.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
pub struct InvalidState {
    pub flaws: Vec<StateFlaw>,
}

/// Check that `cube` is physically reachable and return its cubie-level
/// representation if so.
///
/// Checks run in order: per-color sticker counts, center fixity, corner and
/// edge piece identification, orientation sums, and combined permutation
/// parity. Later checks that depend on a complete piece assignment are
/// skipped when identification already failed.
pub fn validate(cube: &FaceletCube) -> Result<CubieCube, InvalidState> {
    let mut flaws = Vec::new();

    for (i, &count) in cube.color_counts().iter().enumerate() {
        if count != 9 {
            flaws.push(StateFlaw::ColorCount {
                color: Color::ALL[i],
                count,
            });
        }
    }

    for face in Face::ALL {
        let found = cube.center(face);
        if found != face.color() {
            flaws.push(StateFlaw::CenterMismatch { face, found });
        }
    }

    let stickers = cube.stickers();
    let mut result = CubieCube::SOLVED;
    let mut corners_ok = true;
    let mut corner_seen = [false; 8];
    for (i, slot) in Corner::ALL.into_iter().enumerate() {
        match identify_corner(stickers, i) {
            Some((piece, ori)) => {
                if corner_seen[piece as usize] {
                    flaws.push(StateFlaw::RepeatedCorner(piece));
                    corners_ok = false;
                }
                corner_seen[piece as usize] = true;
                result.cp[i] = piece;
                result.co[i] = ori;
            }
            None => {
                flaws.push(StateFlaw::UnknownCorner(slot));
                corners_ok = false;
            }
        }
    }

    let mut edges_ok = true;
    let mut edge_seen = [false; 12];
    for (i, slot) in Edge::ALL.into_iter().enumerate() {
        match identify_edge(stickers, i) {
            Some((piece, ori)) => {
                if edge_seen[piece as usize] {
                    flaws.push(StateFlaw::RepeatedEdge(piece));
                    edges_ok = false;
                }
                edge_seen[piece as usize] = true;
                result.ep[i] = piece;
                result.eo[i] = ori;
            }
            None => {
                flaws.push(StateFlaw::UnknownEdge(slot));
                edges_ok = false;
            }
        }
    }

    if corners_ok {
        let twist: u32 = result.co.iter().map(|&o| u32::from(o)).sum();
        if twist % 3 != 0 {
            flaws.push(StateFlaw::CornerTwist(twist));
        }
    }
    if edges_ok {
        let flip: u32 = result.eo.iter().map(|&o| u32::from(o)).sum();
        if flip % 2 != 0 {
            flaws.push(StateFlaw::EdgeFlip(flip));
        }
    }
    if corners_ok && edges_ok && result.corner_parity() != result.edge_parity() {
        flaws.push(StateFlaw::PermutationParity);
    }

    if flaws.is_empty() {
        Ok(result)
    } else {
        Err(InvalidState { flaws })
    }
}

fn identify_corner(stickers: &[Color; 54], position: usize) -> Option<(Corner, u8)> {
    let facelets = CORNER_FACELET[position];
    // The orientation is where the U/D sticker sits within the triple.
    let ori = (0..3).find(|&o| {
        matches!(
            stickers[facelets[o]].home_face(),
            Face::U | Face::D
        )
    })?;
    let col1 = stickers[facelets[(ori + 1) % 3]].home_face();
    let col2 = stickers[facelets[(ori + 2) % 3]].home_face();
    let ud = stickers[facelets[ori]].home_face();
    for piece in Corner::ALL {
        let home = CORNER_COLOR[piece as usize];
        if ud == home[0] && col1 == home[1] && col2 == home[2] {
            return Some((piece, ori as u8));
        }
    }
    None
}

fn identify_edge(stickers: &[Color; 54], position: usize) -> Option<(Edge, u8)> {
    let facelets = EDGE_FACELET[position];
    let a = stickers[facelets[0]].home_face();
    let b = stickers[facelets[1]].home_face();
    for piece in Edge::ALL {
        let home = EDGE_COLOR[piece as usize];
        if a == home[0] && b == home[1] {
            return Some((piece, 0));
        }
        if a == home[1] && b == home[0] {
            return Some((piece, 1));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::parse_sequence;

    #[test]
    fn solved_state_validates_to_solved_cubies() {
        assert_eq!(validate(&FaceletCube::SOLVED), Ok(CubieCube::SOLVED));
    }

    #[test]
    fn scrambled_reachable_states_validate() {
        let moves = parse_sequence("R U2 F' L D B2 R' U D2 F").unwrap();
        let cube = FaceletCube::SOLVED.applied_all(&moves);
        let cubies = validate(&cube).unwrap();
        assert_eq!(cubies.to_facelets(), cube);
    }

    #[test]
    fn round_trips_through_cubie_representation() {
        let moves = parse_sequence("L2 B D' R F2 U' B2 L' D2 F R2 U").unwrap();
        let cube = FaceletCube::SOLVED.applied_all(&moves);
        assert_eq!(validate(&cube).unwrap().to_facelets(), cube);
    }

    #[test]
    fn single_flipped_edge_is_rejected() {
        let mut cubies = CubieCube::SOLVED;
        cubies.eo[0] = 1;
        let err = validate(&cubies.to_facelets()).unwrap_err();
        assert_eq!(err.flaws, vec![StateFlaw::EdgeFlip(1)]);
    }

    #[test]
    fn single_twisted_corner_is_rejected() {
        let mut cubies = CubieCube::SOLVED;
        cubies.co[0] = 1;
        let err = validate(&cubies.to_facelets()).unwrap_err();
        assert_eq!(err.flaws, vec![StateFlaw::CornerTwist(1)]);
    }

    #[test]
    fn single_swapped_edge_pair_is_rejected() {
        let mut cubies = CubieCube::SOLVED;
        cubies.ep.swap(0, 1);
        let err = validate(&cubies.to_facelets()).unwrap_err();
        assert_eq!(err.flaws, vec![StateFlaw::PermutationParity]);
    }

    #[test]
    fn bad_color_counts_and_centers_are_all_reported() {
        // Overwrite the U center with green: one count flaw per affected
        // color plus the center mismatch.
        let mut cube = FaceletCube::SOLVED;
        cube.stickers[4] = Color::Green;
        let err = validate(&cube).unwrap_err();
        assert!(err.flaws.contains(&StateFlaw::ColorCount {
            color: Color::White,
            count: 8
        }));
        assert!(err.flaws.contains(&StateFlaw::ColorCount {
            color: Color::Green,
            count: 10
        }));
        assert!(err.flaws.contains(&StateFlaw::CenterMismatch {
            face: Face::U,
            found: Color::Green
        }));
    }

    #[test]
    fn impossible_sticker_pairs_are_reported_per_position() {
        // Two white stickers on one edge cannot belong to any physical piece.
        let mut cube = FaceletCube::SOLVED;
        cube.stickers[10] = Color::White; // R sticker of the UR edge
        let err = validate(&cube).unwrap_err();
        assert!(err.flaws.contains(&StateFlaw::UnknownEdge(Edge::Ur)));
    }
}
