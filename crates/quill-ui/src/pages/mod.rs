pub mod callback;
pub mod editor;
pub mod post;
pub mod posts;
