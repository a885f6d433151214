//! Registry sources
//!
//! Wire schemas and the client that fetches package listings from the Unity
//! package registry and a Verdaccio server.

pub mod client;
pub mod schema;
pub mod transport;

pub use client::RegistryClient;
pub use schema::{
    UnityPackageRecord, UnityPackageRegistry, VerdaccioPackageRecord, VerdaccioRegistry,
};
pub use transport::{HttpTransport, Transport};
