//! HTTP request handlers.

pub mod admin;
pub mod health;
pub mod links;
pub mod redirect;
pub mod resolve;

pub use admin::admin_stats_handler;
pub use health::health_handler;
pub use links::{create_link_handler, delete_link_handler, list_links_handler};
pub use redirect::redirect_handler;
pub use resolve::resolve_handler;
