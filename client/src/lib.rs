//! Scrap ERP client
//!
//! Talks to the scrap ERP backend on behalf of a logged-in session and
//! runs the shared calculation engines before anything is saved.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod session;

pub use api::{ApiClient, ApiResponse};
pub use config::Config;
pub use error::{ClientError, ClientResult};
pub use session::{CompanyCredentials, ProductionUnit, Session};
