//! The 18-move alphabet, its textual notation, and the facelet move engine.
//!
//! Every move's sticker permutation is derived at startup from the six cubie
//! generators, so all six faces are wired from one table and a face cannot
//! be left half-implemented. Half turns are two quarter turns and
//! counter-clockwise turns are three, by construction.

use crate::cubie::{CORNER_FACELET, CubieCube, EDGE_FACELET, GENERATORS};
use crate::facelet::{Face, FaceletCube};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

/// How far a face is turned.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    /// A 90 degree clockwise turn, viewed looking at the face.
    Clockwise,
    /// A 180 degree turn. Self-inverse.
    Half,
    /// A 90 degree counter-clockwise turn, written with a `'` suffix.
    Counter,
}

impl Turn {
    pub const ALL: [Turn; 3] = [Turn::Clockwise, Turn::Half, Turn::Counter];

    /// Number of clockwise quarter turns this is equivalent to.
    pub const fn quarter_turns(self) -> usize {
        match self {
            Turn::Clockwise => 1,
            Turn::Half => 2,
            Turn::Counter => 3,
        }
    }

    pub const fn inverse(self) -> Turn {
        match self {
            Turn::Clockwise => Turn::Counter,
            Turn::Half => Turn::Half,
            Turn::Counter => Turn::Clockwise,
        }
    }

    const fn suffix(self) -> &'static str {
        match self {
            Turn::Clockwise => "",
            Turn::Half => "2",
            Turn::Counter => "'",
        }
    }
}

/// One face turn out of the 18-move alphabet.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub face: Face,
    pub turn: Turn,
}

impl Move {
    /// All 18 moves, grouped by face: U, U2, U', R, R2, R', ...
    pub const ALL: [Move; 18] = {
        let mut all = [Move {
            face: Face::U,
            turn: Turn::Clockwise,
        }; 18];
        let mut i = 0;
        while i < 18 {
            all[i] = Move {
                face: Face::ALL[i / 3],
                turn: Turn::ALL[i % 3],
            };
            i += 1;
        }
        all
    };

    pub const fn new(face: Face, turn: Turn) -> Move {
        Move { face, turn }
    }

    /// Stable index into `Move::ALL` and all move-indexed tables.
    pub const fn index(self) -> usize {
        self.face as usize * 3 + self.turn as usize
    }

    /// The move that exactly undoes this one.
    #[must_use]
    pub const fn inverse(self) -> Move {
        Move {
            face: self.face,
            turn: self.turn.inverse(),
        }
    }

    /// The cubie-level transformation of this move.
    pub fn cubie(self) -> &'static CubieCube {
        &MOVE_CUBES[self.index()]
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face.letter(), self.turn.suffix())
    }
}

/// A malformed move token. Unrecognized notation is always an error; a
/// silent no-op would desynchronize the state from any replay or undo log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMoveError {
    #[error("empty move token")]
    Empty,
    #[error("unrecognized face {0:?}")]
    BadFace(char),
    #[error("unrecognized turn suffix {0:?}")]
    BadSuffix(String),
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let face = match chars.next() {
            None => return Err(ParseMoveError::Empty),
            Some('U') => Face::U,
            Some('R') => Face::R,
            Some('F') => Face::F,
            Some('D') => Face::D,
            Some('L') => Face::L,
            Some('B') => Face::B,
            Some(other) => return Err(ParseMoveError::BadFace(other)),
        };
        let turn = match chars.as_str() {
            "" => Turn::Clockwise,
            "2" => Turn::Half,
            "'" => Turn::Counter,
            other => return Err(ParseMoveError::BadSuffix(other.to_owned())),
        };
        Ok(Move { face, turn })
    }
}

/// Parse a whitespace-separated move sequence like `"R U R' U'"`.
pub fn parse_sequence(s: &str) -> Result<Vec<Move>, ParseMoveError> {
    s.split_whitespace().map(str::parse).collect()
}

/// Format a move sequence in standard notation.
pub fn format_sequence(moves: &[Move]) -> String {
    let mut out = String::new();
    for (i, mv) in moves.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&mv.to_string());
    }
    out
}

/// Cubie transformations for all 18 moves: powers of the face generators.
static MOVE_CUBES: LazyLock<[CubieCube; 18]> = LazyLock::new(|| {
    Move::ALL.map(|mv| {
        let mut cube = CubieCube::SOLVED;
        for _ in 0..mv.turn.quarter_turns() {
            cube.multiply(&GENERATORS[mv.face as usize]);
        }
        cube
    })
});

/// Sticker permutations for all 18 moves; entry `t` is the source index of
/// the sticker that ends up at `t`. Centers are fixed points of every entry.
static MOVE_PERMUTATIONS: LazyLock<[[u8; 54]; 18]> =
    LazyLock::new(|| MOVE_CUBES.each_ref().map(facelet_permutation));

fn facelet_permutation(cube: &CubieCube) -> [u8; 54] {
    let mut perm: [u8; 54] = std::array::from_fn(|i| i as u8);
    for i in 0..8 {
        let piece = cube.cp[i] as usize;
        let ori = cube.co[i] as usize;
        for k in 0..3 {
            perm[CORNER_FACELET[i][(k + ori) % 3]] = CORNER_FACELET[piece][k] as u8;
        }
    }
    for i in 0..12 {
        let piece = cube.ep[i] as usize;
        let ori = cube.eo[i] as usize;
        for k in 0..2 {
            perm[EDGE_FACELET[i][(k + ori) % 2]] = EDGE_FACELET[piece][k] as u8;
        }
    }
    perm
}

impl FaceletCube {
    /// Apply one move in place.
    pub fn apply(&mut self, mv: Move) {
        let perm = &MOVE_PERMUTATIONS[mv.index()];
        let old = self.stickers;
        for (target, &source) in perm.iter().enumerate() {
            self.stickers[target] = old[source as usize];
        }
    }

    /// Apply a move to a copy, leaving `self` untouched.
    #[must_use]
    pub fn applied(&self, mv: Move) -> FaceletCube {
        let mut next = self.clone();
        next.apply(mv);
        next
    }

    /// Apply a whole sequence in order.
    pub fn apply_all(&mut self, moves: &[Move]) {
        for &mv in moves {
            self.apply(mv);
        }
    }

    /// Apply a sequence to a copy.
    #[must_use]
    pub fn applied_all(&self, moves: &[Move]) -> FaceletCube {
        let mut next = self.clone();
        next.apply_all(moves);
        next
    }
}
