//! Map tile provider abstraction
//!
//! This module provides the traits and implementation for downloading
//! satellite imagery tiles. One provider is built in (Esri World Imagery);
//! the [`TileProvider`] trait keeps the compositor independent of the
//! imagery source, and the [`HttpClient`] trait keeps providers testable
//! without network access.

mod esri;
mod http;
mod types;

pub use esri::EsriWorldImagery;
pub use http::{HttpClient, ReqwestClient};
pub use types::{ProviderError, TileProvider};

#[cfg(test)]
pub use http::tests::MockHttpClient;
