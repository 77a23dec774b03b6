#![allow(non_snake_case)]

pub mod api;
pub mod callback;
pub mod draft;
pub mod error;
pub mod resource;
pub mod session;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{asset_url, ApiClient, BlogApi, Upload};
pub use error::ClientError;
pub use resource::{Resource, ResourceState, Ticket};
pub use session::{MemoryStorage, SessionStore, TokenStorage, TOKEN_KEY};
