//! Shared application state.
//!
//! Cloned per request. Handlers are cheap to build from the Arc-wrapped
//! ports, so they are created on demand.

use std::sync::Arc;

use crate::application::{
    ApproveDraftHandler, CreateListingHandler, DeleteListingHandler, DraftSettings,
    ListItemsHandler, ListMessagesHandler, ListNegotiationLogsHandler, PurchaseItemHandler,
    RegenerateDraftHandler, RejectDraftHandler, SendMessageHandler, UpdateListingHandler,
    ViewItemHandler,
};
use crate::ports::{
    ItemRepository, MessageRepository, NegotiationLogRepository, NegotiationReasoner,
};

#[derive(Clone)]
pub struct AppState {
    pub items: Arc<dyn ItemRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub logs: Arc<dyn NegotiationLogRepository>,
    pub reasoner: Arc<dyn NegotiationReasoner>,
    pub draft_settings: DraftSettings,
    /// Attempts for version-checked writes (purchase, price commit).
    pub max_commit_retries: u32,
}

impl AppState {
    pub fn new(
        items: Arc<dyn ItemRepository>,
        messages: Arc<dyn MessageRepository>,
        logs: Arc<dyn NegotiationLogRepository>,
        reasoner: Arc<dyn NegotiationReasoner>,
    ) -> Self {
        Self {
            items,
            messages,
            logs,
            reasoner,
            draft_settings: DraftSettings::default(),
            max_commit_retries: 5,
        }
    }

    pub fn with_draft_settings(mut self, settings: DraftSettings) -> Self {
        self.draft_settings = settings;
        self
    }

    pub fn with_max_commit_retries(mut self, attempts: u32) -> Self {
        self.max_commit_retries = attempts;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Item handlers
    // ─────────────────────────────────────────────────────────────────────────

    pub fn create_listing_handler(&self) -> CreateListingHandler {
        CreateListingHandler::new(self.items.clone())
    }

    pub fn list_items_handler(&self) -> ListItemsHandler {
        ListItemsHandler::new(self.items.clone())
    }

    pub fn view_item_handler(&self) -> ViewItemHandler {
        ViewItemHandler::new(self.items.clone())
    }

    pub fn update_listing_handler(&self) -> UpdateListingHandler {
        UpdateListingHandler::new(self.items.clone())
    }

    pub fn delete_listing_handler(&self) -> DeleteListingHandler {
        DeleteListingHandler::new(self.items.clone())
    }

    pub fn purchase_item_handler(&self) -> PurchaseItemHandler {
        PurchaseItemHandler::new(self.items.clone(), self.max_commit_retries)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Negotiation handlers
    // ─────────────────────────────────────────────────────────────────────────

    pub fn send_message_handler(&self) -> SendMessageHandler {
        SendMessageHandler::new(
            self.items.clone(),
            self.messages.clone(),
            self.reasoner.clone(),
            self.draft_settings,
        )
    }

    pub fn list_messages_handler(&self) -> ListMessagesHandler {
        ListMessagesHandler::new(self.items.clone(), self.messages.clone())
    }

    pub fn approve_draft_handler(&self) -> ApproveDraftHandler {
        ApproveDraftHandler::new(
            self.items.clone(),
            self.messages.clone(),
            self.max_commit_retries,
        )
    }

    pub fn reject_draft_handler(&self) -> RejectDraftHandler {
        RejectDraftHandler::new(self.items.clone(), self.messages.clone())
    }

    pub fn regenerate_draft_handler(&self) -> RegenerateDraftHandler {
        RegenerateDraftHandler::new(
            self.items.clone(),
            self.messages.clone(),
            self.reasoner.clone(),
            self.draft_settings,
        )
    }

    pub fn list_negotiation_logs_handler(&self) -> ListNegotiationLogsHandler {
        ListNegotiationLogsHandler::new(self.items.clone(), self.logs.clone())
    }
}
