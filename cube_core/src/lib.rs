//! Core cube kinematics: facelet and cubie state models, the 18-move
//! alphabet with its notation, the permutation-table move engine, and the
//! reachability validator.
//!
//! All transformations are value-in/value-out; nothing in this crate holds
//! onto a shared mutable cube.

pub mod cubie;
pub mod facelet;
pub mod moves;
pub mod validate;

pub use cubie::{Corner, CubieCube, Edge};
pub use facelet::{Color, Face, FaceletCube, ParseFaceletError};
pub use moves::{Move, ParseMoveError, Turn, format_sequence, parse_sequence};
pub use validate::{InvalidState, StateFlaw, validate};
