//! Application bootstrap.
//!
//! The app is assembled in a fixed order: store, router, platform, then
//! configuration. `build` resolves the platform user and creates the
//! backend clients; `mount` hands the terminal to the routed views.

use std::sync::Arc;

use crate::{
    config::AppConfig,
    domain::{ChatApi, Platform, RealtimeChannel, SessionStore},
    infrastructure::{ApiClient, WsRealtimeChannel},
    ui::{
        error::{AppError, RouterError},
        router::{Route, Router},
        terminal::Terminal,
        view::{ChatView, HomeView, Navigation, SearchPrefill, View, ViewContext},
    },
};

/// Path shown when a requested path has no route
const FALLBACK_PATH: &str = "/";

/// Builder collecting the parts of an [`App`]
#[derive(Default)]
pub struct AppBuilder {
    store: Option<Arc<dyn SessionStore>>,
    router: Option<Router>,
    platform: Option<Box<dyn Platform>>,
    config: Option<AppConfig>,
    api: Option<Arc<dyn ChatApi>>,
    realtime: Option<Arc<dyn RealtimeChannel>>,
    realtime_disabled: bool,
    prefill: SearchPrefill,
}

impl AppBuilder {
    pub fn use_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn use_router(mut self, router: Router) -> Self {
        self.router = Some(router);
        self
    }

    pub fn use_platform(mut self, platform: Box<dyn Platform>) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn provide_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use `api` instead of an [`ApiClient`] built from the configuration.
    pub fn with_api(mut self, api: Arc<dyn ChatApi>) -> Self {
        self.api = Some(api);
        self
    }

    /// Use `realtime` instead of a [`WsRealtimeChannel`] on the configured URL.
    pub fn with_realtime(mut self, realtime: Arc<dyn RealtimeChannel>) -> Self {
        self.realtime = Some(realtime);
        self
    }

    /// Run without live updates.
    pub fn without_realtime(mut self) -> Self {
        self.realtime_disabled = true;
        self
    }

    pub fn with_search_prefill(mut self, prefill: SearchPrefill) -> Self {
        self.prefill = prefill;
        self
    }

    /// Assemble the app.
    ///
    /// # Errors
    ///
    /// Fails if a part is missing, the platform cannot name the user, or the
    /// HTTP client cannot be created.
    pub async fn build(self) -> Result<App, AppError> {
        let store = self.store.ok_or(AppError::MissingPart("store"))?;
        let router = self.router.ok_or(AppError::MissingPart("router"))?;
        let platform = self.platform.ok_or(AppError::MissingPart("platform"))?;
        let config = self.config.ok_or(AppError::MissingPart("configuration"))?;

        let user = platform.user()?;
        tracing::info!(
            platform = platform.name(),
            user_id = %user.id,
            "Resolved platform user"
        );
        store.set_user(user).await;

        let api = match self.api {
            Some(api) => api,
            None => Arc::new(ApiClient::new(&config)?),
        };
        let realtime = if self.realtime_disabled {
            None
        } else {
            Some(self.realtime.unwrap_or_else(|| {
                Arc::new(WsRealtimeChannel::new(config.realtime_url())) as Arc<dyn RealtimeChannel>
            }))
        };

        Ok(App {
            store,
            router,
            config,
            api,
            realtime,
            prefill: self.prefill,
        })
    }
}

/// Assembled client application
pub struct App {
    store: Arc<dyn SessionStore>,
    router: Router,
    config: AppConfig,
    api: Arc<dyn ChatApi>,
    realtime: Option<Arc<dyn RealtimeChannel>>,
    prefill: SearchPrefill,
}

impl App {
    pub fn builder() -> AppBuilder {
        AppBuilder::default()
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// View rendered for `route`
    pub fn view_for(&self, route: Route) -> Box<dyn View> {
        match route {
            Route::Home => Box::new(HomeView::new()),
            Route::Chat => Box::new(ChatView::new()),
        }
    }

    /// Resolve `path` and push it onto the history, falling back to `/`.
    pub fn navigate(&mut self, path: &str) -> Result<Route, AppError> {
        match self.router.push(path) {
            Ok(route) => Ok(route),
            Err(RouterError::NotFound(missing)) => {
                tracing::warn!(path = %missing, "No route for path; showing {}", FALLBACK_PATH);
                Ok(self.router.push(FALLBACK_PATH)?)
            }
        }
    }

    /// Show views on `terminal`, starting at `start_path`, until one quits.
    pub async fn mount(
        &mut self,
        terminal: &mut dyn Terminal,
        start_path: &str,
    ) -> Result<(), AppError> {
        let ctx = ViewContext {
            store: Arc::clone(&self.store),
            api: Arc::clone(&self.api),
            realtime: self.realtime.clone(),
            prefill: self.prefill.clone(),
        };

        let mut route = self.navigate(start_path)?;
        loop {
            let mut view = self.view_for(route);
            tracing::debug!(view = view.name(), "Rendering view");
            match view.render(&ctx, terminal).await? {
                Navigation::To(path) => route = self.navigate(&path)?,
                Navigation::Quit => {
                    tracing::info!("Unmounting");
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{PlatformError, PlatformUser, api::MockChatApi},
        infrastructure::{StaticPlatform, Store},
        ui::terminal::ScriptedTerminal,
    };

    struct BrokenPlatform;

    impl Platform for BrokenPlatform {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn user(&self) -> Result<PlatformUser, PlatformError> {
            Err(PlatformError::MissingUser)
        }
    }

    async fn build_app(api: MockChatApi) -> App {
        App::builder()
            .use_store(Arc::new(Store::new()))
            .use_router(Router::new())
            .use_platform(Box::new(StaticPlatform::new(10, "Alice")))
            .provide_config(AppConfig::default())
            .with_api(Arc::new(api))
            .without_realtime()
            .build()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_build_installs_user() {
        // テスト項目: build でプラットフォームのユーザーがストアに設定される
        // when (操作):
        let app = build_app(MockChatApi::new()).await;

        // then (期待する結果):
        let user = app.store().user().await.unwrap();
        assert_eq!(user.first_name, "Alice");
        assert_eq!(app.config(), &AppConfig::default());
    }

    #[tokio::test]
    async fn test_build_requires_every_part() {
        // テスト項目: 必要な部品が欠けていれば build は失敗する
        // when (操作):
        let result = App::builder()
            .use_store(Arc::new(Store::new()))
            .use_platform(Box::new(StaticPlatform::new(10, "Alice")))
            .provide_config(AppConfig::default())
            .build()
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(AppError::MissingPart("router"))));
    }

    #[tokio::test]
    async fn test_build_fails_without_platform_user() {
        // テスト項目: プラットフォームがユーザーを返せなければ build は失敗する
        // when (操作):
        let result = App::builder()
            .use_store(Arc::new(Store::new()))
            .use_router(Router::new())
            .use_platform(Box::new(BrokenPlatform))
            .provide_config(AppConfig::default())
            .build()
            .await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(AppError::Platform(PlatformError::MissingUser))
        ));
    }

    #[tokio::test]
    async fn test_routes_render_their_views() {
        // テスト項目: / はホーム画面、/chat はチャット画面を表示する
        // given (前提条件):
        let mut app = build_app(MockChatApi::new()).await;

        // when (操作):
        let home = app.navigate("/").unwrap();
        let chat = app.navigate("/chat").unwrap();

        // then (期待する結果):
        assert_eq!(app.view_for(home).name(), "Home");
        assert_eq!(app.view_for(chat).name(), "Chat");
    }

    #[tokio::test]
    async fn test_unknown_path_falls_back_to_home() {
        // テスト項目: 未定義のパスはホームにフォールバックする
        // given (前提条件):
        let mut app = build_app(MockChatApi::new()).await;

        // when (操作):
        let route = app.navigate("/settings").unwrap();

        // then (期待する結果):
        assert_eq!(route, Route::Home);
        assert_eq!(app.router().current(), Some("/"));
    }

    #[tokio::test]
    async fn test_mount_chat_without_match_redirects_home() {
        // テスト項目: マッチなしで /chat から起動するとホームに戻り、入力終了で終わる
        // given (前提条件):
        let mut api = MockChatApi::new();
        api.expect_find_partner().never();
        let mut app = build_app(api).await;
        let mut terminal = ScriptedTerminal::default();

        // when (操作):
        let result = app.mount(&mut terminal, "/chat").await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert!(terminal.printed("No active chat"));
        assert!(terminal.printed("Hi, Alice!"));
        assert_eq!(app.router().history(), ["/chat".to_string(), "/".to_string()]);
    }
}
