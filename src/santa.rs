//! The Secret Santa feature. One game is tracked at a time; every mutating
//! action re-runs the state fetch afterwards instead of patching locally.

use gfcore::types::{GameStatus, SantaState};
use gfcore::wishlist;
use log::warn;
use serde_json::{Value, json};

use crate::app::App;
use crate::error::RequestFailed;
use crate::views::{DEFAULT_TARGET_NAME, SantaGame, SantaLobby, SantaScreen};

/// Title used when creating a game; the backend has the same default.
pub const DEFAULT_GAME_TITLE: &str = "Secret Santa";

const SHARE_TEXT: &str = "Join the Secret Santa!";

impl App {
    /// Fetches the current game state and resolves the Santa screen. Errors
    /// are non-fatal: the alert was already raised by the API client and the
    /// previous screen stays.
    pub(crate) async fn init_santa(&self, epoch: u64) {
        let Ok(data) = self.api.call("/santa/state", json!({})).await else {
            return;
        };

        let state = data.get("state").cloned().unwrap_or(Value::Null);
        if state.is_null() {
            self.apply_if_current(epoch, |st| {
                st.santa = SantaScreen::Start;
                st.santa_game_id = None;
                st.santa_invite_link = None;
            })
            .await;
            return;
        }

        let state: SantaState = match serde_json::from_value(state) {
            Ok(s) => s,
            Err(err) => {
                warn!(target: "Santa", "malformed santa state: {}", err);
                return;
            }
        };

        let screen = build_screen(&state);
        let game_id = state.game_id;
        let invite_link = state.invite_link;
        self.apply_if_current(epoch, move |st| {
            st.santa_game_id = Some(game_id);
            st.santa_invite_link = invite_link;
            st.santa = screen;
        })
        .await;
    }

    /// Resynchronizes against the current navigation epoch; the tail call of
    /// every mutating Santa action.
    async fn resync_santa(&self) {
        let epoch = self.current_epoch().await;
        self.init_santa(epoch).await;
    }

    pub async fn create_santa_game(&self) -> Result<(), RequestFailed> {
        self.api
            .call("/santa/create", json!({"title": DEFAULT_GAME_TITLE}))
            .await?;
        self.resync_santa().await;
        Ok(())
    }

    pub async fn set_wishlist_input(&self, text: impl Into<String>) {
        if let SantaScreen::Lobby(lobby) = &mut self.state.lock().await.santa {
            lobby.wishlist_input = text.into();
        }
    }

    /// Saves the lobby wishlist via the join endpoint (joining is
    /// idempotent; a repeat join updates the wishlist).
    pub async fn save_wishlist(&self) -> Result<(), RequestFailed> {
        let (game_id, wishlist) = {
            let st = self.state.lock().await;
            let wishlist = match &st.santa {
                SantaScreen::Lobby(lobby) => lobby.wishlist_input.clone(),
                _ => String::new(),
            };
            (st.santa_game_id.clone(), wishlist)
        };
        if wishlist.is_empty() {
            return Err(self.reject("Wishlist is empty!"));
        }

        self.api
            .call("/santa/join", json!({"game_id": game_id, "wishlist": wishlist}))
            .await?;
        self.bridge.show_alert("Saved!");
        self.resync_santa().await;
        Ok(())
    }

    /// Starts the draw. Confirmation-gated and creator-only server-side; the
    /// client additionally requires a cached game id.
    pub async fn start_santa_game(&self) -> Result<(), RequestFailed> {
        if !self.bridge.show_confirm("Start the draw?").await {
            return Ok(());
        }
        let Some(game_id) = self.state.lock().await.santa_game_id.clone() else {
            return Ok(());
        };

        self.api
            .call("/santa/start", json!({"game_id": game_id}))
            .await?;
        self.resync_santa().await;
        Ok(())
    }

    /// Hands the cached invite link to the host's share UI.
    pub async fn share_invite_link(&self) {
        let link = self.state.lock().await.santa_invite_link.clone();
        match link {
            Some(link) => {
                let url = format!(
                    "https://t.me/share/url?url={}&text={}",
                    urlencoding::encode(&link),
                    urlencoding::encode(SHARE_TEXT)
                );
                self.bridge.open_telegram_link(&url);
            }
            None => self.bridge.show_alert("Invite link not found"),
        }
    }

    pub async fn mark_gift_sent(&self) -> Result<(), RequestFailed> {
        if !self.bridge.show_confirm("Did you send the gift?").await {
            return Ok(());
        }
        let game_id = self.state.lock().await.santa_game_id.clone();
        self.api
            .call("/santa/sent", json!({"game_id": game_id}))
            .await?;
        self.bridge.show_alert("Done!");
        self.resync_santa().await;
        Ok(())
    }

    pub async fn mark_gift_received(&self) -> Result<(), RequestFailed> {
        if !self.bridge.show_confirm("Did you receive the gift?").await {
            return Ok(());
        }
        let game_id = self.state.lock().await.santa_game_id.clone();
        self.api
            .call("/santa/received", json!({"game_id": game_id}))
            .await?;
        self.bridge.show_alert("Great!");
        self.resync_santa().await;
        Ok(())
    }
}

fn build_screen(state: &SantaState) -> SantaScreen {
    match &state.game_status {
        GameStatus::Recruiting => SantaScreen::Lobby(SantaLobby {
            title: state.game_title.clone(),
            participants_count: state.participants_count,
            participants: state.participants_list.clone(),
            wishlist_input: state.my_wishlist.clone(),
            admin_controls: state.is_creator,
        }),
        GameStatus::Active => SantaScreen::Game(SantaGame {
            target_name: state
                .target_user_name
                .clone()
                .unwrap_or_else(|| DEFAULT_TARGET_NAME.to_string()),
            target_wishlist_html: wishlist::render_wishlist(state.target_wishlist.as_deref()),
        }),
        GameStatus::Other(status) => {
            warn!(target: "Santa", "unsupported game status '{}'", status);
            SantaScreen::Unsupported {
                status: status.clone(),
            }
        }
    }
}
