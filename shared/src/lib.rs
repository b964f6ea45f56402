//! Shared types and calculation engines for the Scrap ERP
//!
//! This crate contains the domain models and the pure calculations shared
//! between the API client, the browser bindings (via WASM), and reporting:
//! weight conversion, invoice totals, ledger balance reconstruction and
//! amount-in-words rendering.

pub mod conversion;
pub mod ledger;
pub mod models;
pub mod normalize;
pub mod totals;
pub mod types;
pub mod validation;
pub mod words;

pub use models::*;
pub use types::*;
pub use validation::*;
