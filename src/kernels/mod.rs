//! Pure, stateless transforms shared across the pipeline.
//!
//! Kernels never touch I/O or hold state; they take decoded data in and
//! return transformed data out.

pub mod ordered_set;
pub mod promote;
