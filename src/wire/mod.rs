//! The matrix wire format: layout constants and the binary decoder.
//!
//! Buffers arrive already-fetched from the I/O layer; this module turns them
//! into `DecodedMatrix` values without interpreting element contents.

pub mod decoder;
pub mod format;

#[cfg(test)]
pub(crate) mod encoder;

pub use decoder::decode_matrix;
pub use format::DecodedMatrix;
