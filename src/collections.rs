//! The collections feature: list loading, the detail overlay, and the
//! create/edit/delete/contribute actions.

use std::time::Duration;

use chrono::Utc;
use gfcore::types::{Chat, Collection, MyCollections};
use log::warn;
use serde_json::{Value, json};

use crate::app::App;
use crate::bridge::InvoiceStatus;
use crate::error::RequestFailed;
use crate::router::View;
use crate::views::{CollectionDetails, DEFAULT_IMAGE, NO_DESCRIPTION};

/// Time given to the backend to settle a payment before the lists are
/// refetched. Refetching immediately would still show the old totals.
const PAYMENT_SETTLE_DELAY_MS: u64 = 1500;

pub const UPLOAD_IN_PROGRESS: &str = "Uploading...";
pub const UPLOAD_OK: &str = "OK";
pub const UPLOAD_FAILED: &str = "Upload failed";

impl App {
    /// Loads the chat list for the create screen. Called once per session;
    /// the router short-circuits when the list is already cached.
    pub(crate) async fn load_chats(&self, epoch: u64) {
        let Ok(data) = self.api.call("/chats", json!({})).await else {
            return;
        };
        let chats: Vec<Chat> = data
            .get("chats")
            .cloned()
            .map(|v| serde_json::from_value(v).unwrap_or_default())
            .unwrap_or_default();
        self.apply_if_current(epoch, |st| st.chats = Some(chats))
            .await;
    }

    /// Loads both list halves of the my-collections screen in one call.
    pub(crate) async fn load_my_collections(&self, epoch: u64) {
        let Ok(data) = self.api.call("/collections/my", json!({})).await else {
            return;
        };
        let lists: MyCollections = data
            .get("data")
            .cloned()
            .map(|v| serde_json::from_value(v).unwrap_or_default())
            .unwrap_or_default();
        self.apply_if_current(epoch, |st| st.collections = Some(lists))
            .await;
    }

    /// Explicit invalidation step run at the end of every mutating action.
    async fn refresh_collections(&self) {
        let epoch = self.current_epoch().await;
        self.load_my_collections(epoch).await;
    }

    /// Submits the create form. All three guards short-circuit with an alert
    /// before any network traffic; success clears the free-text inputs and
    /// lands on the my-collections view.
    pub async fn create_collection(&self) -> Result<(), RequestFailed> {
        let form = self.state.lock().await.create_form.clone();

        if form.chat_id.is_empty() {
            return Err(self.reject("Select a chat!"));
        }
        let amount = form.amount.trim().parse::<i64>().ok().filter(|a| *a > 0);
        let Some(amount) = amount else {
            return Err(self.reject("Enter an amount!"));
        };
        if form.goal.is_empty() {
            return Err(self.reject("Enter a goal!"));
        }

        self.api
            .call(
                "/collections/create",
                json!({"target_chat_id": form.chat_id, "amount": amount, "goal": form.goal}),
            )
            .await?;

        self.bridge.show_alert("Collection created!");
        {
            let mut st = self.state.lock().await;
            st.create_form.amount.clear();
            st.create_form.goal.clear();
        }
        self.switch_view(View::MyCollections).await;
        Ok(())
    }

    /// Opens the detail overlay: the loading placeholder is published before
    /// the fetch, and a failed fetch leaves it in place.
    pub async fn open_collection(&self, collection_id: &str) {
        let epoch = {
            let mut st = self.state.lock().await;
            st.epoch += 1;
            st.details = Some(CollectionDetails::loading(collection_id));
            st.epoch
        };

        let Ok(data) = self
            .api
            .call("/collections/info", json!({"collection_id": collection_id}))
            .await
        else {
            return;
        };
        let collection: Collection = match data.get("data").cloned().map(serde_json::from_value) {
            Some(Ok(c)) => c,
            _ => {
                warn!(target: "Collections", "malformed detail payload for {}", collection_id);
                return;
            }
        };

        let viewer_id = self.api.effective_user_id().to_string();
        let details = build_details(collection_id, &collection, &viewer_id);
        self.apply_if_current(epoch, |st| st.details = Some(details))
            .await;
    }

    pub async fn close_details(&self) {
        let mut st = self.state.lock().await;
        // A detail fetch still in flight must not resurrect the overlay.
        st.epoch += 1;
        st.details = None;
    }

    /// Switches the overlay into edit mode, seeding the editable field from
    /// the displayed description. Creator-only.
    pub async fn enable_edit_mode(&self) {
        let mut st = self.state.lock().await;
        if let Some(details) = st.details.as_mut() {
            if !details.is_creator {
                return;
            }
            details.editing = true;
            details.edit_description = details.description.clone();
        }
    }

    pub async fn set_edit_description(&self, text: impl Into<String>) {
        if let Some(details) = self.state.lock().await.details.as_mut() {
            details.edit_description = text.into();
        }
    }

    /// Saves the edited description together with the pending image URL.
    pub async fn save_changes(&self) -> Result<(), RequestFailed> {
        let Some((collection_id, description, image_url)) =
            self.state.lock().await.details.as_ref().map(|d| {
                (
                    d.collection_id.clone(),
                    d.edit_description.clone(),
                    d.pending_image_url.clone(),
                )
            })
        else {
            return Ok(());
        };

        self.api
            .call(
                "/collections/update",
                json!({
                    "collection_id": collection_id,
                    "description": description,
                    "image_url": image_url,
                }),
            )
            .await?;

        self.bridge.show_alert("Saved!");
        self.close_details().await;
        self.refresh_collections().await;
        Ok(())
    }

    /// Deletes the open collection after confirmation.
    pub async fn delete_collection(&self) -> Result<(), RequestFailed> {
        let Some(collection_id) = self.current_collection_id().await else {
            return Ok(());
        };
        if !self.bridge.show_confirm("Delete this collection?").await {
            return Ok(());
        }

        self.api
            .call("/collections/delete", json!({"collection_id": collection_id}))
            .await?;

        self.bridge.show_alert("Deleted");
        self.close_details().await;
        self.refresh_collections().await;
        Ok(())
    }

    /// Requests an invoice for a contribution and hands it to the host's
    /// native payment UI. A paid invoice closes the overlay and refreshes
    /// the lists after the settle delay.
    pub async fn initiate_payment(&self, amount_input: &str) -> Result<(), RequestFailed> {
        let amount = amount_input.trim().parse::<i64>().ok().filter(|a| *a > 0);
        let Some(amount) = amount else {
            return Err(self.reject("Invalid amount!"));
        };
        let Some(collection_id) = self.current_collection_id().await else {
            return Ok(());
        };

        let data = self
            .api
            .call(
                "/collections/invoice",
                json!({"collection_id": collection_id, "amount": amount}),
            )
            .await?;
        let Some(invoice_url) = data.get("invoice_url").and_then(Value::as_str) else {
            return Err(self.reject("Invoice error"));
        };

        if self.bridge.open_invoice(invoice_url).await == InvoiceStatus::Paid {
            self.bridge.show_alert("Paid!");
            self.close_details().await;
            tokio::time::sleep(Duration::from_millis(PAYMENT_SETTLE_DELAY_MS)).await;
            self.refresh_collections().await;
        }
        Ok(())
    }

    /// Uploads an image for the open collection. Outcomes surface as inline
    /// status text on the overlay, never as a host alert.
    pub async fn upload_image(&self, filename: &str, data: &[u8]) {
        {
            let mut st = self.state.lock().await;
            let Some(details) = st.details.as_mut() else {
                return;
            };
            details.upload_status = Some(UPLOAD_IN_PROGRESS.to_string());
        }

        let result = self.api.upload_image(filename, data).await;

        let mut st = self.state.lock().await;
        let Some(details) = st.details.as_mut() else {
            return;
        };
        match result {
            Ok(url) => {
                details.pending_image_url = url;
                details.upload_status = Some(UPLOAD_OK.to_string());
            }
            Err(err) => {
                warn!(target: "Collections", "image upload failed: {}", err);
                details.upload_status = Some(UPLOAD_FAILED.to_string());
            }
        }
    }

    async fn current_collection_id(&self) -> Option<String> {
        self.state
            .lock()
            .await
            .details
            .as_ref()
            .map(|d| d.collection_id.clone())
    }

    /// Alerts a local validation message and returns it as the abandoned
    /// action's error. Never reaches the network.
    pub(crate) fn reject(&self, message: &str) -> RequestFailed {
        self.bridge.show_alert(message);
        RequestFailed::new(message)
    }
}

fn build_details(collection_id: &str, c: &Collection, viewer_id: &str) -> CollectionDetails {
    let raw_image = c
        .image_url
        .clone()
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| DEFAULT_IMAGE.to_string());
    // Cache-bust edited images so the host reloads them, but never the
    // shared default artwork.
    let image_url = if raw_image == DEFAULT_IMAGE {
        raw_image.clone()
    } else {
        format!("{}?t={}", raw_image, Utc::now().timestamp_millis())
    };

    CollectionDetails {
        collection_id: collection_id.to_string(),
        goal: c.goal.clone(),
        description: c
            .description
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        current: c.current,
        amount: c.amount,
        percent: c.percent,
        image_url,
        pending_image_url: raw_image,
        // String comparison on purpose: the host may hand out a numeric id
        // while the backend stores strings.
        is_creator: c.creator_id == viewer_id,
        finished: c.status.is_finished(),
        editing: false,
        edit_description: String::new(),
        upload_status: None,
    }
}
