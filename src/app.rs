//! The application shell: session state, the view router, and the
//! deep-link bootstrap. Feature operations live in [`crate::collections`]
//! and [`crate::santa`] as further `impl App` blocks.

use std::sync::Arc;

use gfcore::net::HttpClient;
use gfcore::start_param::StartParam;
use gfcore::types::{Chat, MyCollections};
use log::{debug, info};
use serde_json::json;
use tokio::sync::Mutex;

use crate::bridge::HostBridge;
use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::router::View;
use crate::views::{CollectionDetails, CreateCollectionForm, SantaScreen};

/// Header color applied when the host theme does not provide one.
const DEFAULT_HEADER_COLOR: &str = "#1E1E2D";

/// All session state, replaced value-by-value and handed out as cloned
/// snapshots. Everything cached here is only valid for the current
/// view/session; mutating actions refetch instead of patching.
#[derive(Debug, Clone)]
pub struct AppState {
    pub view: View,
    /// Chat list for the create screen. Loaded at most once per session.
    pub chats: Option<Vec<Chat>>,
    pub create_form: CreateCollectionForm,
    pub collections: Option<MyCollections>,
    /// The detail overlay, independent of the current view.
    pub details: Option<CollectionDetails>,
    pub santa: SantaScreen,
    pub santa_game_id: Option<String>,
    pub santa_invite_link: Option<String>,
    /// Navigation epoch; async loads drop their result when it has moved.
    pub(crate) epoch: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            view: View::Home,
            chats: None,
            create_form: CreateCollectionForm::default(),
            collections: None,
            details: None,
            santa: SantaScreen::Start,
            santa_game_id: None,
            santa_invite_link: None,
            epoch: 0,
        }
    }
}

pub struct App {
    pub(crate) api: ApiClient,
    pub(crate) bridge: Arc<dyn HostBridge>,
    pub(crate) state: Mutex<AppState>,
}

impl App {
    pub fn builder() -> AppBuilder {
        AppBuilder::new()
    }

    /// An immutable snapshot of the current session state.
    pub async fn snapshot(&self) -> AppState {
        self.state.lock().await.clone()
    }

    /// One-time dispatch at process start: host setup, then either a
    /// deep-link jump or the default view.
    pub async fn bootstrap(&self) {
        self.setup_host();

        let param = self.bridge.start_param();
        match StartParam::parse(param.as_deref()) {
            StartParam::Donate(collection_id) => {
                info!(target: "App", "deep link: collection {}", collection_id);
                self.open_collection(&collection_id).await;
            }
            StartParam::SantaJoin(game_id) => {
                info!(target: "App", "deep link: santa game {}", game_id);
                self.state.lock().await.santa_game_id = Some(game_id.clone());
                // Silent join with an empty wishlist; a failure must not
                // block the initial render.
                if self
                    .api
                    .call("/santa/join", json!({"game_id": game_id, "wishlist": ""}))
                    .await
                    .is_err()
                {
                    debug!(target: "App", "deep-link santa join failed, showing the santa view anyway");
                }
                self.switch_view(View::Santa).await;
            }
            StartParam::None => self.switch_view(View::Home).await,
        }
    }

    fn setup_host(&self) {
        self.bridge.ready();
        self.bridge.expand();
        let color = self
            .bridge
            .theme_bg_color()
            .unwrap_or_else(|| DEFAULT_HEADER_COLOR.to_string());
        self.bridge.set_header_color(&color);
    }

    /// Enters a view and runs its load function. Re-entering the current
    /// view re-runs the load; only the chat list short-circuits when cached.
    pub async fn switch_view(&self, view: View) {
        let (epoch, chats_cached) = {
            let mut st = self.state.lock().await;
            st.view = view;
            st.epoch += 1;
            (st.epoch, st.chats.is_some())
        };
        info!(target: "App", "view -> {}", view.as_str());

        match view {
            View::Home => {
                if !chats_cached {
                    self.load_chats(epoch).await;
                }
            }
            View::MyCollections => self.load_my_collections(epoch).await,
            View::Santa => self.init_santa(epoch).await,
        }
    }

    pub async fn set_create_form(&self, form: CreateCollectionForm) {
        self.state.lock().await.create_form = form;
    }

    pub(crate) async fn current_epoch(&self) -> u64 {
        self.state.lock().await.epoch
    }

    pub(crate) async fn bump_epoch(&self) -> u64 {
        let mut st = self.state.lock().await;
        st.epoch += 1;
        st.epoch
    }

    /// Applies a state change only if no navigation happened since `epoch`
    /// was captured; otherwise the (now stale) result is dropped.
    pub(crate) async fn apply_if_current<F>(&self, epoch: u64, apply: F) -> bool
    where
        F: FnOnce(&mut AppState),
    {
        let mut st = self.state.lock().await;
        if st.epoch != epoch {
            debug!(
                target: "App",
                "dropping stale response (epoch {} superseded by {})", epoch, st.epoch
            );
            return false;
        }
        apply(&mut st);
        true
    }
}

#[derive(Default)]
pub struct AppBuilder {
    bridge: Option<Arc<dyn HostBridge>>,
    http_client: Option<Arc<dyn HttpClient>>,
    config: Option<ClientConfig>,
}

impl AppBuilder {
    fn new() -> Self {
        Self::default()
    }

    pub fn with_bridge(mut self, bridge: Arc<dyn HostBridge>) -> Self {
        self.bridge = Some(bridge);
        self
    }

    pub fn with_http_client(mut self, http_client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(http_client);
        self
    }

    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> anyhow::Result<App> {
        let bridge = self
            .bridge
            .ok_or_else(|| anyhow::anyhow!("A host bridge is required"))?;
        let http_client = self
            .http_client
            .ok_or_else(|| anyhow::anyhow!("An HTTP client is required"))?;
        let config = self
            .config
            .ok_or_else(|| anyhow::anyhow!("A client config is required"))?;

        Ok(App {
            api: ApiClient::new(http_client, bridge.clone(), config),
            bridge,
            state: Mutex::new(AppState::default()),
        })
    }
}
