use serde::{Deserialize, Serialize};

/// A group chat the user shares with the bot, selectable as the target of a
/// new collection. The backend sends chat ids as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub chat_id: String,
    pub title: String,
}
