pub mod envelope;
pub mod multipart;
pub mod net;
pub mod start_param;
pub mod types;
pub mod wishlist;
