//! Immutable render models for the top-level screens.
//!
//! Each screen owns exactly the data it displays; the app replaces whole
//! values instead of patching them, so a snapshot is always renderable
//! as-is by whatever surface embeds the client.

use gfcore::types::{Chat, CollectionSummary};

/// Shared placeholder artwork for collections without an image. The detail
/// view's cache-buster must never be appended to this URL.
pub const DEFAULT_IMAGE: &str = "https://cdn-icons-png.flaticon.com/512/9466/9466245.png";

/// Goal text shown between opening a collection and the fetch resolving.
pub const LOADING_GOAL: &str = "Loading...";
pub const NO_DESCRIPTION: &str = "No description";
pub const EMPTY_LIST_PLACEHOLDER: &str = "Nothing here yet";
pub const NO_CHATS_PLACEHOLDER: &str = "No chats available";
pub const NO_PARTICIPANTS_PLACEHOLDER: &str = "Nobody yet...";
pub const DEFAULT_TARGET_NAME: &str = "Participant";

/// One line per collection, or the placeholder: never an empty container.
pub fn render_collection_list(list: &[CollectionSummary]) -> Vec<String> {
    if list.is_empty() {
        return vec![EMPTY_LIST_PLACEHOLDER.to_string()];
    }
    list.iter()
        .map(|c| {
            format!(
                "{} — {} / {} ⭐ ({}%)",
                c.goal, c.current, c.amount, c.percent
            )
        })
        .collect()
}

/// Options for the target-chat selector on the create screen.
pub fn render_chat_options(chats: &[Chat]) -> Vec<String> {
    if chats.is_empty() {
        return vec![NO_CHATS_PLACEHOLDER.to_string()];
    }
    chats.iter().map(|c| c.title.clone()).collect()
}

/// Free-text inputs of the create-collection form. Owned by the app so a
/// successful submit can clear them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateCollectionForm {
    pub chat_id: String,
    pub amount: String,
    pub goal: String,
}

/// The collection detail overlay. Starts as a loading placeholder and is
/// replaced wholesale once the fetch resolves; a failed fetch leaves the
/// placeholder in place (no rollback beyond the generic alert).
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionDetails {
    pub collection_id: String,
    pub goal: String,
    pub description: String,
    pub current: i64,
    pub amount: i64,
    pub percent: i64,
    pub image_url: String,
    /// Hidden slot consumed by the save action; refreshed by image uploads.
    pub pending_image_url: String,
    pub is_creator: bool,
    pub finished: bool,
    pub editing: bool,
    pub edit_description: String,
    pub upload_status: Option<String>,
}

impl CollectionDetails {
    pub fn loading(collection_id: impl Into<String>) -> Self {
        Self {
            collection_id: collection_id.into(),
            goal: LOADING_GOAL.to_string(),
            description: String::new(),
            current: 0,
            amount: 0,
            percent: 0,
            image_url: DEFAULT_IMAGE.to_string(),
            pending_image_url: DEFAULT_IMAGE.to_string(),
            is_creator: false,
            finished: false,
            editing: false,
            edit_description: String::new(),
            upload_status: None,
        }
    }
}

/// The Santa tab, one variant per game phase. `Unsupported` replaces the
/// original's silent non-render for status values the client doesn't know.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SantaScreen {
    #[default]
    Start,
    Lobby(SantaLobby),
    Game(SantaGame),
    Unsupported {
        status: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SantaLobby {
    pub title: String,
    pub participants_count: u32,
    pub participants: Vec<String>,
    pub wishlist_input: String,
    /// Start-draw and share controls, shown to the game's creator only.
    pub admin_controls: bool,
}

impl SantaLobby {
    pub fn participant_rows(&self) -> Vec<String> {
        if self.participants.is_empty() {
            return vec![NO_PARTICIPANTS_PLACEHOLDER.to_string()];
        }
        self.participants.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SantaGame {
    pub target_name: String,
    /// Pre-rendered through the markdown-lite formatter.
    pub target_wishlist_html: String,
}
