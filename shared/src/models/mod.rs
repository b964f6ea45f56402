//! Domain models for the Scrap ERP

mod invoice;
mod ledger;
mod material;
mod scrap;
mod stock;

pub use invoice::*;
pub use ledger::*;
pub use material::*;
pub use scrap::*;
pub use stock::*;
