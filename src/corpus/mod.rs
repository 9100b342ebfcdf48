//! The OCR training corpus: protobuf output model and file I/O.
//!
//! A corpus file holds one [`Layout`]: staves sorted top to bottom, each
//! with its line geometry and the glyph [`Piece`]s placed on it, sorted
//! left to right. Pieces that failed validation keep a non-empty
//! `piece_error` so that training pipelines can filter them.

pub mod io_pb;
mod model;

pub use model::{Layout, Piece, Ref1, Ref2, Staff};
