//! The facelet-level cube model: 6 faces of 3x3 colored stickers.
//!
//! Facelets are indexed U1..U9, R1..R9, F1..F9, D1..D9, L1..L9, B1..B9,
//! row-major per face with each face read looking at it straight on. This is
//! the layout used by facelet definition strings such as
//! `UUUUUUUUURRRRRRRRR...`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the six faces of the cube, in facelet-string order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    U,
    R,
    F,
    D,
    L,
    B,
}

/// A sticker color. Each color belongs to exactly one face on a solved cube;
/// centers never move, so the color of a face's center defines its identity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Red,
    Green,
    Yellow,
    Orange,
    Blue,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B];

    /// The color of this face's center on a solved cube.
    pub const fn color(self) -> Color {
        match self {
            Face::U => Color::White,
            Face::R => Color::Red,
            Face::F => Color::Green,
            Face::D => Color::Yellow,
            Face::L => Color::Orange,
            Face::B => Color::Blue,
        }
    }

    pub const fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::R => 'R',
            Face::F => 'F',
            Face::D => 'D',
            Face::L => 'L',
            Face::B => 'B',
        }
    }
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::White,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Orange,
        Color::Blue,
    ];

    /// The face this color lives on when the cube is solved.
    pub const fn home_face(self) -> Face {
        match self {
            Color::White => Face::U,
            Color::Red => Face::R,
            Color::Green => Face::F,
            Color::Yellow => Face::D,
            Color::Orange => Face::L,
            Color::Blue => Face::B,
        }
    }

    /// Facelet strings name stickers by their home face letter, not by a
    /// color initial, so that the same string works for any color scheme.
    pub const fn letter(self) -> char {
        self.home_face().letter()
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// The full sticker state of a cube: 54 colors in facelet order.
///
/// This is the single authoritative state representation. It is only ever
/// mutated through the move engine; everything else (piece projections,
/// solver input) is derived from immutable copies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaceletCube {
    #[serde(with = "sticker_serde")]
    pub(crate) stickers: [Color; 54],
}

/// Serde plumbing for the 54-element sticker array, which is larger than the
/// arrays serde implements its traits for. Serializes as a plain sequence.
mod sticker_serde {
    use super::Color;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub(super) fn serialize<S: Serializer>(
        stickers: &[Color; 54],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        stickers.as_slice().serialize(serializer)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<[Color; 54], D::Error> {
        let v = Vec::<Color>::deserialize(deserializer)?;
        v.try_into().map_err(|v: Vec<Color>| {
            serde::de::Error::invalid_length(v.len(), &"an array of 54 stickers")
        })
    }
}

/// Index of a facelet within the 54-sticker array.
#[inline]
pub(crate) const fn facelet_index(face: Face, row: usize, col: usize) -> usize {
    face as usize * 9 + row * 3 + col
}

impl FaceletCube {
    /// The solved cube. `reset` operations copy this template; it is never
    /// handed out by reference to mutable contexts.
    pub const SOLVED: FaceletCube = {
        let mut stickers = [Color::White; 54];
        let mut i = 0;
        while i < 54 {
            stickers[i] = Face::ALL[i / 9].color();
            i += 1;
        }
        FaceletCube { stickers }
    };

    /// The sticker at `(row, col)` of `face`, rows top to bottom as the face
    /// is viewed straight on.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not in `0..3`.
    pub fn sticker(&self, face: Face, row: usize, col: usize) -> Color {
        assert!(row < 3 && col < 3);
        self.stickers[facelet_index(face, row, col)]
    }

    /// The center sticker of `face`.
    pub fn center(&self, face: Face) -> Color {
        self.stickers[facelet_index(face, 1, 1)]
    }

    /// Deep structural equality against the solved template. This is the
    /// only notion of "solved" the engine uses; a cube whose faces are each
    /// uniform but mis-colored does not count.
    pub fn is_solved(&self) -> bool {
        *self == Self::SOLVED
    }

    /// How many stickers of each color the cube carries, in `Color::ALL`
    /// order. Every reachable state has exactly nine of each.
    pub fn color_counts(&self) -> [usize; 6] {
        let mut counts = [0; 6];
        for sticker in &self.stickers {
            counts[*sticker as usize] += 1;
        }
        counts
    }

    pub fn stickers(&self) -> &[Color; 54] {
        &self.stickers
    }
}

impl Default for FaceletCube {
    fn default() -> Self {
        Self::SOLVED
    }
}

/// A malformed facelet definition string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFaceletError {
    #[error("facelet string must be 54 characters, got {0}")]
    BadLength(usize),
    #[error("unrecognized facelet character {found:?} at position {index}")]
    BadCharacter { index: usize, found: char },
}

impl FromStr for FaceletCube {
    type Err = ParseFaceletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 54 {
            return Err(ParseFaceletError::BadLength(chars.len()));
        }
        let mut stickers = [Color::White; 54];
        for (index, &found) in chars.iter().enumerate() {
            let face = match found {
                'U' => Face::U,
                'R' => Face::R,
                'F' => Face::F,
                'D' => Face::D,
                'L' => Face::L,
                'B' => Face::B,
                _ => return Err(ParseFaceletError::BadCharacter { index, found }),
            };
            stickers[index] = face.color();
        }
        Ok(FaceletCube { stickers })
    }
}

impl fmt::Display for FaceletCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for sticker in &self.stickers {
            write!(f, "{sticker}")?;
        }
        Ok(())
    }
}
