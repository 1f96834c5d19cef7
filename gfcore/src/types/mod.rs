//! Wire types received from the GiftFlow backend.
//!
//! The client never owns authoritative state; these are cached copies for
//! rendering and are treated as stale after any mutating action.

mod chat;
mod collection;
mod santa;

pub use chat::Chat;
pub use collection::{Collection, CollectionStatus, CollectionSummary, MyCollections};
pub use santa::{GameStatus, SantaState};
