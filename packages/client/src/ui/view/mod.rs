//! Terminal views selected by the router.

mod chat;
mod home;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    domain::{ChatApi, Gender, RealtimeChannel, SessionStore},
    ui::{error::AppError, terminal::Terminal},
};

pub use chat::ChatView;
pub use home::HomeView;

/// What the app should do after a view returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Show the view routed at this path
    To(String),
    /// Unmount the app
    Quit,
}

/// Search criteria given up front, skipping the home view's prompts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPrefill {
    pub gender: Option<Gender>,
    pub age_from: Option<u32>,
    pub age_to: Option<u32>,
}

/// Services a view may use while rendering
#[derive(Clone)]
pub struct ViewContext {
    pub store: Arc<dyn SessionStore>,
    pub api: Arc<dyn ChatApi>,
    pub realtime: Option<Arc<dyn RealtimeChannel>>,
    pub prefill: SearchPrefill,
}

/// A screen of the client.
///
/// `render` owns the terminal until the user navigates away.
#[async_trait]
pub trait View: Send {
    fn name(&self) -> &'static str;

    async fn render(
        &mut self,
        ctx: &ViewContext,
        terminal: &mut dyn Terminal,
    ) -> Result<Navigation, AppError>;
}
