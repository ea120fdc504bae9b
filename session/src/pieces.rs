//! Projection of the facelet state into a renderable piece model.
//!
//! The render space puts the cube center at the origin with the x axis
//! pointing through R, y through U and z through F. The 26 visible pieces
//! occupy the non-origin points of {-1, 0, 1}³: 8 corners with three
//! stickers, 12 edges with two and 6 centers with one.

use cube_core::{Color, Face, FaceletCube};
use serde::{Deserialize, Serialize};

/// One visible piece: its grid position and its stickers, keyed by the
/// face each sticker currently shows on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub position: [i8; 3],
    pub stickers: Vec<(Face, Color)>,
}

impl Piece {
    /// The sticker showing on `face`, if this piece touches that face.
    pub fn sticker_on(&self, face: Face) -> Option<Color> {
        self.stickers
            .iter()
            .find(|(f, _)| *f == face)
            .map(|&(_, color)| color)
    }
}

/// The face a position touches along each axis, with the (row, col) its
/// sticker occupies in that face's 3×3 grid. Rows and columns follow the
/// facelet-string layout, so e.g. the top-left sticker of U sits at the
/// back-left of the cube.
fn facing(position: [i8; 3]) -> Vec<(Face, usize, usize)> {
    let [x, y, z] = position.map(isize::from);
    let mut faces = Vec::with_capacity(3);
    if y == 1 {
        faces.push((Face::U, (z + 1) as usize, (x + 1) as usize));
    }
    if y == -1 {
        faces.push((Face::D, (1 - z) as usize, (x + 1) as usize));
    }
    if x == 1 {
        faces.push((Face::R, (1 - y) as usize, (1 - z) as usize));
    }
    if x == -1 {
        faces.push((Face::L, (1 - y) as usize, (z + 1) as usize));
    }
    if z == 1 {
        faces.push((Face::F, (1 - y) as usize, (x + 1) as usize));
    }
    if z == -1 {
        faces.push((Face::B, (1 - y) as usize, (1 - x) as usize));
    }
    faces
}

/// Derive the 26-piece render model from a facelet state. Read-only; the
/// projection never feeds back into the live state.
pub fn project(cube: &FaceletCube) -> Vec<Piece> {
    let mut pieces = Vec::with_capacity(26);
    for x in -1..=1i8 {
        for y in -1..=1i8 {
            for z in -1..=1i8 {
                if x == 0 && y == 0 && z == 0 {
                    continue;
                }
                let position = [x, y, z];
                let stickers = facing(position)
                    .into_iter()
                    .map(|(face, row, col)| (face, cube.sticker(face, row, col)))
                    .collect();
                pieces.push(Piece { position, stickers });
            }
        }
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use cube_core::parse_sequence;

    #[test_log::test]
    fn projection_has_26_pieces_with_the_right_sticker_counts() {
        let pieces = project(&FaceletCube::SOLVED);
        assert_eq!(pieces.len(), 26);

        let corners = pieces.iter().filter(|p| p.stickers.len() == 3).count();
        let edges = pieces.iter().filter(|p| p.stickers.len() == 2).count();
        let centers = pieces.iter().filter(|p| p.stickers.len() == 1).count();
        assert_eq!((corners, edges, centers), (8, 12, 6));
    }

    #[test_log::test]
    fn solved_projection_shows_home_colors_everywhere() {
        for piece in project(&FaceletCube::SOLVED) {
            for (face, color) in &piece.stickers {
                assert_eq!(*color, face.color());
            }
        }
    }

    #[test_log::test]
    fn urf_corner_tracks_a_turn() {
        let mut cube = FaceletCube::SOLVED;
        cube.apply_all(&parse_sequence("R").unwrap());
        let pieces = project(&cube);
        let urf = pieces
            .iter()
            .find(|p| p.position == [1, 1, 1])
            .unwrap();
        // R brings the DFR corner to URF: green up, yellow front, red right.
        assert_eq!(urf.sticker_on(Face::U), Some(Face::F.color()));
        assert_eq!(urf.sticker_on(Face::F), Some(Face::D.color()));
        assert_eq!(urf.sticker_on(Face::R), Some(Face::R.color()));
    }
}
