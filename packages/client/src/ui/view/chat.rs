//! Chat view: talk to the matched partner.

use async_trait::async_trait;
use randchat_shared::time::{format_clock, now_millis};

use crate::{
    domain::{ChatLine, CurrentMatch, SessionStore, Subscription},
    ui::{error::AppError, terminal::Terminal},
    usecase::{LeaveRoomUseCase, SendChatMessageUseCase, UseCaseError},
};

use super::{Navigation, View, ViewContext};

const LEAVE_COMMAND: &str = "/leave";
const QUIT_COMMAND: &str = "/quit";

#[derive(Debug, Default)]
pub struct ChatView;

impl ChatView {
    pub fn new() -> Self {
        Self
    }

    async fn subscribe(
        &self,
        ctx: &ViewContext,
        current: &CurrentMatch,
        terminal: &mut dyn Terminal,
    ) -> Option<Subscription> {
        let (Some(realtime), Some(token)) = (&ctx.realtime, &current.token) else {
            tracing::debug!(room = %current.room, "No real-time credentials; live updates disabled");
            return None;
        };
        match realtime.subscribe(token, &current.room).await {
            Ok(subscription) => Some(subscription),
            Err(e) => {
                tracing::warn!(room = %current.room, "Failed to subscribe: {}", e);
                terminal.print(&format!("Live updates are unavailable: {e}"));
                None
            }
        }
    }
}

/// Render an incoming message as a terminal line.
pub fn format_incoming(line: &ChatLine, millis: i64) -> String {
    let clock = format_clock(millis);
    if line.is_system() || line.sender.is_empty() {
        format!("[{clock}] * {}", line.message)
    } else {
        format!("[{clock}] {}: {}", line.sender, line.message)
    }
}

async fn next_incoming(subscription: &mut Option<Subscription>) -> Option<ChatLine> {
    match subscription {
        Some(subscription) => subscription.next().await,
        None => std::future::pending().await,
    }
}

#[async_trait]
impl View for ChatView {
    fn name(&self) -> &'static str {
        "Chat"
    }

    async fn render(
        &mut self,
        ctx: &ViewContext,
        terminal: &mut dyn Terminal,
    ) -> Result<Navigation, AppError> {
        let Some(current) = ctx.store.current_match().await else {
            terminal.print("No active chat. Back to the start.");
            return Ok(Navigation::To("/".to_string()));
        };
        let user = ctx.store.user().await.ok_or(UseCaseError::NoUser)?;

        terminal.print(&format!(
            "You are chatting with {}. Type {LEAVE_COMMAND} to end the chat or {QUIT_COMMAND} to exit.",
            current.partner.name
        ));

        let send = SendChatMessageUseCase::new(ctx.api.clone(), ctx.store.clone());
        let leave = LeaveRoomUseCase::new(ctx.api.clone(), ctx.store.clone());
        let mut subscription = self.subscribe(ctx, &current, terminal).await;

        loop {
            tokio::select! {
                line = terminal.read_line("> ") => {
                    let Some(line) = line? else {
                        return Ok(Navigation::Quit);
                    };
                    match line.trim() {
                        "" => {}
                        QUIT_COMMAND => return Ok(Navigation::Quit),
                        LEAVE_COMMAND => {
                            let report = leave.execute().await?;
                            if report.is_clean() {
                                terminal.print("You left the chat.");
                            } else {
                                terminal.print("You left the chat. Your partner may not have been notified.");
                            }
                            return Ok(Navigation::To("/".to_string()));
                        }
                        text => match send.execute(text).await {
                            Ok(_) => {}
                            Err(e @ (UseCaseError::Api(_) | UseCaseError::InvalidInput(_))) => {
                                terminal.print(&format!("Message not delivered: {e}"));
                            }
                            Err(e) => return Err(e.into()),
                        },
                    }
                }
                incoming = next_incoming(&mut subscription) => {
                    match incoming {
                        Some(line) if line.user_id == Some(user.id) && !line.is_system() => {}
                        Some(line) => terminal.print(&format_incoming(&line, now_millis())),
                        None => {
                            subscription = None;
                            terminal.print("Live updates disconnected.");
                        }
                    }
                }
            }
        }
    }
}
