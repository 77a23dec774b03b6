pub mod post;
pub mod user;
pub use post::*;
pub use user::*;

/// Remote API origin, shared with server functions via Leptos context.
#[derive(Clone, Debug)]
pub struct ApiBase(pub String);
