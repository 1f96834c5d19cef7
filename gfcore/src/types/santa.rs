use serde::{Deserialize, Serialize};

/// Phase of a Secret Santa game. The backend only emits `recruiting` and
/// `active` today; anything else is carried verbatim so the UI can show an
/// explicit unsupported-state screen instead of rendering nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GameStatus {
    Recruiting,
    Active,
    Other(String),
}

impl GameStatus {
    pub fn as_str(&self) -> &str {
        match self {
            GameStatus::Recruiting => "recruiting",
            GameStatus::Active => "active",
            GameStatus::Other(s) => s,
        }
    }
}

impl From<String> for GameStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "recruiting" => GameStatus::Recruiting,
            "active" => GameStatus::Active,
            _ => GameStatus::Other(s),
        }
    }
}

impl From<GameStatus> for String {
    fn from(status: GameStatus) -> Self {
        status.as_str().to_string()
    }
}

/// The user's view of their single tracked Secret Santa game, as returned by
/// the state endpoint. Fields outside the current phase are absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SantaState {
    pub game_id: String,
    #[serde(default)]
    pub invite_link: Option<String>,
    #[serde(default)]
    pub game_title: String,
    pub game_status: GameStatus,
    #[serde(default)]
    pub participants_count: u32,
    #[serde(default)]
    pub participants_list: Vec<String>,
    #[serde(default)]
    pub my_wishlist: String,
    #[serde(default)]
    pub is_creator: bool,
    #[serde(default)]
    pub target_user_name: Option<String>,
    #[serde(default)]
    pub target_wishlist: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recruiting_state_parses() {
        let raw = r#"{
            "game_id": "3", "game_title": "Office Santa", "game_status": "recruiting",
            "is_creator": true, "my_wishlist": "socks",
            "invite_link": "https://t.me/GiftFlowBot/app?startapp=santa_3",
            "participants_count": 4
        }"#;
        let state: SantaState = serde_json::from_str(raw).unwrap();
        assert_eq!(state.game_status, GameStatus::Recruiting);
        assert_eq!(state.participants_count, 4);
        assert!(state.participants_list.is_empty());
        assert!(state.is_creator);
    }

    #[test]
    fn active_state_parses_without_recruiting_fields() {
        let raw = r#"{
            "game_id": "3", "game_title": "Office Santa", "game_status": "active",
            "my_wishlist": "", "is_creator": false, "invite_link": null,
            "target_user_name": "@alice", "target_wishlist": "a kite"
        }"#;
        let state: SantaState = serde_json::from_str(raw).unwrap();
        assert_eq!(state.game_status, GameStatus::Active);
        assert_eq!(state.target_user_name.as_deref(), Some("@alice"));
        assert_eq!(state.participants_count, 0);
    }

    #[test]
    fn unknown_status_is_preserved() {
        let status: GameStatus = serde_json::from_str(r#""archived""#).unwrap();
        assert_eq!(status, GameStatus::Other("archived".to_string()));
        assert_eq!(status.as_str(), "archived");
    }
}
