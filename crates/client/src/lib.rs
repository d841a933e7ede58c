pub use error::{GatewayError, RemoteError, Result};
pub use gateway::{Gateway, GatewayBuilder};
pub use remote::RemoteClient;
pub use routes::{LocalRouter, Route};

pub mod config;
mod error;
mod gateway;
mod remote;
mod routes;
