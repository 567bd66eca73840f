//! Identity Screening API Client Library
//!
//! Async binding for the IDScan screening service: driver's-license
//! verification, identity fraud checks, and sex-offender, criminal record,
//! PEP, OFAC and foreign-official list searches.
//!
//! # Modules
//!
//! - `config`: Client configuration and environment loading.
//! - `errors`: Error handling types.
//! - `models`: Request and response shapes.
//! - `screening_client`: The HTTP client and its per-service operations.
//! - `services`: Screening service identifiers.
//! - `validation`: Argument checks and remote failure interpretation.
//!
//! # Example
//!
//! ```no_run
//! use idscan_screening::ScreeningClient;
//!
//! # async fn run() -> Result<(), idscan_screening::ScreeningError> {
//! let client = ScreeningClient::new("api-token")?;
//! for result in client.screen_ofac("Jane", "Doe", "1980-01-01").await? {
//!     if result.success && result.has_matches() {
//!         println!("{} match(es) on {}", result.profiles.len(), result.service_name);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod models;
pub mod screening_client;
pub mod services;
pub mod validation;

pub use config::ScreeningConfig;
pub use errors::ScreeningError;
pub use models::{ScreeningRequest, ScreeningResult};
pub use screening_client::ScreeningClient;
pub use services::ServiceType;
