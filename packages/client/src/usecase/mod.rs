//! UseCase 層
//!
//! 画面（View）から呼び出され、Domain 層のポートとセッションストアを操作します。

pub mod error;
pub mod find_partner;
pub mod leave_room;
pub mod send_chat_message;

pub use error::UseCaseError;
pub use find_partner::FindPartnerUseCase;
pub use leave_room::{LeaveReport, LeaveRoomUseCase};
pub use send_chat_message::SendChatMessageUseCase;
