pub mod cli;
pub mod error;
pub mod markdown;
pub mod models;
pub mod session;
pub mod ui;

pub use error::{AppError, Result};
pub use models::backend::HttpResponder;
pub use models::responder::{ChatReply, Responder, ResponderError};
pub use session::message::Message;
pub use session::store::{ConversationStore, PendingSend};
