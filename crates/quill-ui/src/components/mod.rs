pub mod layout;
pub mod nav;
pub mod post_card;
pub mod toast;
