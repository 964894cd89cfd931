#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/bsheet/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! EDINET collaborators for balance sheet extraction.
//!
//! [`EdinetClient`] implements the three collaborator traits of `bsheet-core`
//! against the Japanese FSA's EDINET disclosure system:
//!
//! - [`CodeResolver`](bsheet_core::CodeResolver) - ticker to EDINET code via the code list
//! - [`FilingLocator`](bsheet_core::FilingLocator) - day-by-day document search
//! - [`PackageRetriever`](bsheet_core::PackageRetriever) - package download and unpacking
//!
//! # Example
//!
//! ```no_run
//! use bsheet_core::{CodeResolver, Ticker};
//! use bsheet_edinet::{EdinetClient, EdinetConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EdinetClient::with_config(EdinetConfig::from_env()?)?;
//!     let identity = client.lookup(&Ticker::new("7203")?).await?;
//!     println!("{} ({})", identity.entity_name, identity.filer_id);
//!     Ok(())
//! }
//! ```

/// HTTP client and collaborator implementations.
pub mod client;
/// Code list parsing and lookup.
pub mod codelist;
/// Client configuration.
pub mod config;
/// Package unpacking and primary document selection.
pub mod package;

mod search;

#[cfg(test)]
mod test_server;

pub use client::EdinetClient;
pub use codelist::{CodeList, CodeListEntry};
pub use config::{API_KEY_ENV, DEFAULT_API_BASE_URL, DEFAULT_CODE_LIST_URL, EdinetConfig};
pub use package::{select_primary_document, unpack_primary_document};
