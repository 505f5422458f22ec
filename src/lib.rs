//! This file is the root of the `cellscope_core` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of our library (`wire`,
//!     `dataframe`, `universe`, etc.) so the Rust compiler knows they exist.
//! 2.  Re-exporting the public API consumed by the application layer.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod config;
pub mod dataframe;
pub mod error;
pub mod kernels;
pub mod types;
pub mod universe;
pub mod wire;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================
pub use config::EngineConfig;
pub use dataframe::{Column, ColumnSummary, Dataframe, KeyIndex};
pub use error::CellscopeError;
pub use types::{CellValue, Key, MatrixDataType};
pub use universe::{create_universe_from_response, extract_var_data, Schema, SchemaDocument, Universe};
pub use wire::{decode_matrix, DecodedMatrix};

/// Turns on verbose logging via `env_logger`. Safe to call more than once;
/// later calls are no-ops.
pub fn enable_verbose_logging() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}
