//! Chat and negotiation-draft handlers.

mod approve_draft;
mod drafting;
mod history_builder;
mod list_messages;
mod list_negotiation_logs;
mod regenerate_draft;
mod reject_draft;
mod send_message;

pub use approve_draft::{ApproveDraftCommand, ApproveDraftHandler, ApproveDraftResult};
pub use drafting::DraftSettings;
pub use history_builder::HistoryBuilder;
pub use list_messages::{ListMessagesHandler, ListMessagesQuery};
pub use list_negotiation_logs::{ListNegotiationLogsHandler, ListNegotiationLogsQuery};
pub use regenerate_draft::{RegenerateDraftCommand, RegenerateDraftHandler};
pub use reject_draft::{RejectDraftCommand, RejectDraftHandler};
pub use send_message::{SendMessageCommand, SendMessageHandler, SendMessageResult};
