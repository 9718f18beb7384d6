//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::item::{
    CreateListingCommand, CreateListingHandler, DeleteListingCommand, DeleteListingHandler,
    ListItemsHandler, PurchaseItemCommand, PurchaseItemHandler, UpdateListingCommand,
    UpdateListingHandler, ViewItemHandler, ViewItemQuery,
};
pub use handlers::negotiation::{
    ApproveDraftCommand, ApproveDraftHandler, ApproveDraftResult, DraftSettings, HistoryBuilder,
    ListMessagesHandler, ListMessagesQuery, ListNegotiationLogsHandler, ListNegotiationLogsQuery,
    RegenerateDraftCommand, RegenerateDraftHandler, RejectDraftCommand, RejectDraftHandler,
    SendMessageCommand, SendMessageHandler, SendMessageResult,
};
