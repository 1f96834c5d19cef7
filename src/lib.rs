// Re-export core modules for convenience
pub use gfcore::{envelope, multipart, net, start_param, types, wishlist};

pub mod app;
pub mod bridge;
pub mod client;
pub mod collections;
pub mod config;
pub mod error;
pub mod router;
pub mod santa;
pub mod test_utils;
pub mod views;
