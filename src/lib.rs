//! Typed blocking client for the Trakt.tv REST media catalog API
//!
//! ```no_run
//! use trakt::TraktClient;
//!
//! # fn main() -> Result<(), trakt::Error> {
//! let client = TraktClient::new("client-id", "client-secret")?;
//!
//! // Typed suite access
//! let countries = client.countries().get_countries("shows")?;
//!
//! // Dynamic dotted-name access
//! let countries: trakt::Executed<'_, Vec<trakt::models::Country>> = client.run(
//!     "countries.get_countries",
//!     trakt::CallContext::new().arg("type", "shows"),
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod executor;
pub mod http;
pub mod interfaces;
pub mod models;
pub mod oauth;
pub mod pagination;
pub mod parser;
pub mod paths;

pub use client::{TraktClient, TraktClientBuilder};
pub use config::ClientConfig;
pub use error::{Error, StatusError, StatusKind};
pub use executor::Executed;
pub use oauth::Credentials;
pub use pagination::PaginationIterator;
pub use paths::{CallContext, Extended};
