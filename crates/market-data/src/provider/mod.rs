//! Provider clients and the HTTP transport they run on.
//!
//! - [`transport`] - the blocking [`HttpTransport`] seam and its `reqwest` implementation
//! - [`sina`] - Sina finance quote feed and listing endpoints

pub mod sina;
pub mod transport;

pub use sina::{SinaClient, SinaConfig};
pub use transport::{HttpTransport, ReqwestTransport};
