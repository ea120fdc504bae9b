//! The cubie-level cube model: where each corner and edge piece sits and how
//! it is twisted or flipped.
//!
//! The six clockwise quarter-turn generators defined here are the single
//! source of truth for move semantics; the facelet move engine and all
//! solver coordinate tables are derived from them.

use crate::facelet::{Color, Face, FaceletCube};

/// Corner positions/pieces, named by their three faces.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Corner {
    Urf,
    Ufl,
    Ulb,
    Ubr,
    Dfr,
    Dlf,
    Dbl,
    Drb,
}

/// Edge positions/pieces, named by their two faces. The last four are the
/// equatorial (UD-slice) edges.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Edge {
    Ur,
    Uf,
    Ul,
    Ub,
    Dr,
    Df,
    Dl,
    Db,
    Fr,
    Fl,
    Bl,
    Br,
}

impl Corner {
    pub const ALL: [Corner; 8] = [
        Corner::Urf,
        Corner::Ufl,
        Corner::Ulb,
        Corner::Ubr,
        Corner::Dfr,
        Corner::Dlf,
        Corner::Dbl,
        Corner::Drb,
    ];
}

impl Edge {
    pub const ALL: [Edge; 12] = [
        Edge::Ur,
        Edge::Uf,
        Edge::Ul,
        Edge::Ub,
        Edge::Dr,
        Edge::Df,
        Edge::Dl,
        Edge::Db,
        Edge::Fr,
        Edge::Fl,
        Edge::Bl,
        Edge::Br,
    ];
}

/// Facelet indices of each corner position, orientation-first: the facelet
/// on the U or D face comes first, then the other two clockwise.
pub(crate) const CORNER_FACELET: [[usize; 3]; 8] = [
    [8, 9, 20],   // URF
    [6, 18, 38],  // UFL
    [0, 36, 47],  // ULB
    [2, 45, 11],  // UBR
    [29, 26, 15], // DFR
    [27, 44, 24], // DLF
    [33, 53, 42], // DBL
    [35, 17, 51], // DRB
];

/// Facelet indices of each edge position, the U/D (or F/B for slice edges)
/// facelet first.
pub(crate) const EDGE_FACELET: [[usize; 2]; 12] = [
    [5, 10],  // UR
    [7, 19],  // UF
    [3, 37],  // UL
    [1, 46],  // UB
    [32, 16], // DR
    [28, 25], // DF
    [30, 43], // DL
    [34, 52], // DB
    [23, 12], // FR
    [21, 41], // FL
    [50, 39], // BL
    [48, 14], // BR
];

/// Home colors of each corner piece, in the same facelet order as
/// `CORNER_FACELET`.
pub(crate) const CORNER_COLOR: [[Face; 3]; 8] = [
    [Face::U, Face::R, Face::F],
    [Face::U, Face::F, Face::L],
    [Face::U, Face::L, Face::B],
    [Face::U, Face::B, Face::R],
    [Face::D, Face::F, Face::R],
    [Face::D, Face::L, Face::F],
    [Face::D, Face::B, Face::L],
    [Face::D, Face::R, Face::B],
];

/// Home colors of each edge piece.
pub(crate) const EDGE_COLOR: [[Face; 2]; 12] = [
    [Face::U, Face::R],
    [Face::U, Face::F],
    [Face::U, Face::L],
    [Face::U, Face::B],
    [Face::D, Face::R],
    [Face::D, Face::F],
    [Face::D, Face::L],
    [Face::D, Face::B],
    [Face::F, Face::R],
    [Face::F, Face::L],
    [Face::B, Face::L],
    [Face::B, Face::R],
];

/// A cube state as a permutation of pieces plus per-piece orientations.
///
/// `cp[i]` is the corner piece sitting at position `i`; `co[i]` its twist
/// (0..3, clockwise twists needed to restore its U/D facelet). `ep`/`eo`
/// likewise for edges with flips 0..2.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CubieCube {
    pub cp: [Corner; 8],
    pub co: [u8; 8],
    pub ep: [Edge; 12],
    pub eo: [u8; 12],
}

impl Default for CubieCube {
    fn default() -> Self {
        Self::SOLVED
    }
}

use Corner::*;
use Edge::*;

impl CubieCube {
    pub const SOLVED: CubieCube = CubieCube {
        cp: Corner::ALL,
        co: [0; 8],
        ep: Edge::ALL,
        eo: [0; 12],
    };

    /// Compose the corner layer: `self = self * rhs` (apply `rhs` after
    /// `self`, in goes-to convention).
    pub fn corner_multiply(&mut self, rhs: &CubieCube) {
        let mut cp = [Urf; 8];
        let mut co = [0; 8];
        for i in 0..8 {
            let from = rhs.cp[i] as usize;
            cp[i] = self.cp[from];
            co[i] = (self.co[from] + rhs.co[i]) % 3;
        }
        self.cp = cp;
        self.co = co;
    }

    /// Compose the edge layer: `self = self * rhs`.
    pub fn edge_multiply(&mut self, rhs: &CubieCube) {
        let mut ep = [Ur; 12];
        let mut eo = [0; 12];
        for i in 0..12 {
            let from = rhs.ep[i] as usize;
            ep[i] = self.ep[from];
            eo[i] = (self.eo[from] + rhs.eo[i]) % 2;
        }
        self.ep = ep;
        self.eo = eo;
    }

    /// `self = self * rhs` on both layers.
    pub fn multiply(&mut self, rhs: &CubieCube) {
        self.corner_multiply(rhs);
        self.edge_multiply(rhs);
    }

    /// `self * rhs` as a new value.
    #[must_use]
    pub fn multiplied(&self, rhs: &CubieCube) -> CubieCube {
        let mut out = self.clone();
        out.multiply(rhs);
        out
    }

    /// The group inverse: `self.multiplied(&self.inverse())` is solved.
    #[must_use]
    pub fn inverse(&self) -> CubieCube {
        let mut inv = CubieCube::SOLVED;
        for i in 0..12 {
            inv.ep[self.ep[i] as usize] = Edge::ALL[i];
        }
        for i in 0..12 {
            inv.eo[i] = self.eo[inv.ep[i] as usize];
        }
        for i in 0..8 {
            inv.cp[self.cp[i] as usize] = Corner::ALL[i];
        }
        for i in 0..8 {
            inv.co[i] = (3 - self.co[inv.cp[i] as usize]) % 3;
        }
        inv
    }

    /// Whether the corner permutation is odd.
    pub fn corner_parity(&self) -> bool {
        let mut inversions = 0;
        for i in 1..8 {
            for j in 0..i {
                if self.cp[j] > self.cp[i] {
                    inversions += 1;
                }
            }
        }
        inversions % 2 == 1
    }

    /// Whether the edge permutation is odd. Equals `corner_parity` on every
    /// reachable cube.
    pub fn edge_parity(&self) -> bool {
        let mut inversions = 0;
        for i in 1..12 {
            for j in 0..i {
                if self.ep[j] > self.ep[i] {
                    inversions += 1;
                }
            }
        }
        inversions % 2 == 1
    }

    /// Project this cubie state back to stickers.
    pub fn to_facelets(&self) -> FaceletCube {
        let mut stickers = [Color::White; 54];
        for face in Face::ALL {
            stickers[face as usize * 9 + 4] = face.color();
        }
        for i in 0..8 {
            let piece = self.cp[i] as usize;
            let ori = self.co[i] as usize;
            for k in 0..3 {
                stickers[CORNER_FACELET[i][(k + ori) % 3]] = CORNER_COLOR[piece][k].color();
            }
        }
        for i in 0..12 {
            let piece = self.ep[i] as usize;
            let ori = self.eo[i] as usize;
            for k in 0..2 {
                stickers[EDGE_FACELET[i][(k + ori) % 2]] = EDGE_COLOR[piece][k].color();
            }
        }
        FaceletCube { stickers }
    }
}

/// Clockwise quarter-turn generators, indexed by `Face` (U, R, F, D, L, B).
pub(crate) const GENERATORS: [CubieCube; 6] = [
    // U
    CubieCube {
        cp: [Ubr, Urf, Ufl, Ulb, Dfr, Dlf, Dbl, Drb],
        co: [0, 0, 0, 0, 0, 0, 0, 0],
        ep: [Ub, Ur, Uf, Ul, Dr, Df, Dl, Db, Fr, Fl, Bl, Br],
        eo: [0; 12],
    },
    // R
    CubieCube {
        cp: [Dfr, Ufl, Ulb, Urf, Drb, Dlf, Dbl, Ubr],
        co: [2, 0, 0, 1, 1, 0, 0, 2],
        ep: [Fr, Uf, Ul, Ub, Br, Df, Dl, Db, Dr, Fl, Bl, Ur],
        eo: [0; 12],
    },
    // F
    CubieCube {
        cp: [Ufl, Dlf, Ulb, Ubr, Urf, Dfr, Dbl, Drb],
        co: [1, 2, 0, 0, 2, 1, 0, 0],
        ep: [Ur, Fl, Ul, Ub, Dr, Fr, Dl, Db, Uf, Df, Bl, Br],
        eo: [0, 1, 0, 0, 0, 1, 0, 0, 1, 1, 0, 0],
    },
    // D
    CubieCube {
        cp: [Urf, Ufl, Ulb, Ubr, Dlf, Dbl, Drb, Dfr],
        co: [0, 0, 0, 0, 0, 0, 0, 0],
        ep: [Ur, Uf, Ul, Ub, Df, Dl, Db, Dr, Fr, Fl, Bl, Br],
        eo: [0; 12],
    },
    // L
    CubieCube {
        cp: [Urf, Ulb, Dbl, Ubr, Dfr, Ufl, Dlf, Drb],
        co: [0, 1, 2, 0, 0, 2, 1, 0],
        ep: [Ur, Uf, Bl, Ub, Dr, Df, Fl, Db, Fr, Ul, Dl, Br],
        eo: [0; 12],
    },
    // B
    CubieCube {
        cp: [Urf, Ufl, Ubr, Drb, Dfr, Dlf, Ulb, Dbl],
        co: [0, 0, 1, 2, 0, 0, 2, 1],
        ep: [Ur, Uf, Ul, Br, Dr, Df, Dl, Bl, Fr, Fl, Ub, Db],
        eo: [0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 1],
    },
];
