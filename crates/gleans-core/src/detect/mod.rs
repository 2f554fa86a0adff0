//! The five glean detectors (D1–D5). Each is a pure function over the
//! parsed invoice/line-item tables; see spec §4.4–§4.8 for the exact
//! firing predicates.

pub mod d1;
pub mod d2;
pub mod d3;
pub mod d4;
pub mod d5;
