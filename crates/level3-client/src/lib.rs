//! Client for the Level 3 CDN management API.
//!
//! [`ApiClient`] composes the request URL, signs it with
//! [`level3_auth`], sends it and either returns the body as text or parses
//! it into a [`level3_xml::XmlDocument`].
//!
//! Each call keeps a single request in flight and resolves once its response
//! has been read. Nothing is retried or sent in the background.
//!
//! # Usage
//!
//! ```no_run
//! use level3_auth::Credentials;
//! use level3_client::{ApiCall, ApiClient, ClientConfig};
//!
//! # async fn run() -> level3_client::Result<()> {
//! let client = ApiClient::new(Credentials::new("key-id", "secret"), ClientConfig::default())?;
//!
//! let call = ApiCall::builder()
//!     .method("rtm")
//!     .access_group("12345")
//!     .options(vec![
//!         ("serviceType".to_owned(), "caching".to_owned()),
//!         ("geo".to_owned(), "none".to_owned()),
//!     ])
//!     .build();
//!
//! let response = client.call(&call).await?;
//! if let Some(doc) = response.document() {
//!     let miss = doc.root().get("missPerSecond")?.value();
//!     println!("misses per second: {miss:?}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod invalidation;

pub use client::{ApiCall, ApiClient, Response};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use invalidation::invalidation_body;
