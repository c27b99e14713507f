//! Static route table.
//!
//! Two routes: `/` shows the home view and `/chat` shows the chat view.
//! Query strings, fragments, and trailing slashes are ignored when matching.

use super::error::RouterError;

/// Views reachable through the router
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Chat,
}

/// One entry of the route table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRecord {
    pub path: &'static str,
    pub name: &'static str,
    pub route: Route,
}

/// Route table of the client
pub const ROUTES: &[RouteRecord] = &[
    RouteRecord {
        path: "/",
        name: "Home",
        route: Route::Home,
    },
    RouteRecord {
        path: "/chat",
        name: "Chat",
        route: Route::Chat,
    },
];

/// Router with a navigation history
#[derive(Debug, Clone)]
pub struct Router {
    routes: &'static [RouteRecord],
    history: Vec<String>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            routes: ROUTES,
            history: Vec::new(),
        }
    }

    /// Find the route record for `path`.
    pub fn resolve(&self, path: &str) -> Result<&RouteRecord, RouterError> {
        let normalized = normalize(path);
        self.routes
            .iter()
            .find(|record| record.path == normalized)
            .ok_or_else(|| RouterError::NotFound(path.to_string()))
    }

    /// Find the route record named `name`.
    pub fn by_name(&self, name: &str) -> Option<&RouteRecord> {
        self.routes.iter().find(|record| record.name == name)
    }

    /// Navigate to `path`, recording it in the history.
    ///
    /// Revisiting a path already in the history rewinds to that entry, so
    /// each route appears at most once. The history is left untouched when
    /// the path has no route.
    pub fn push(&mut self, path: &str) -> Result<Route, RouterError> {
        let record = *self.resolve(path)?;
        match self.history.iter().position(|entry| entry == record.path) {
            Some(index) => self.history.truncate(index + 1),
            None => self.history.push(record.path.to_string()),
        }
        tracing::debug!(path = record.path, name = record.name, "Navigated");
        Ok(record.route)
    }

    /// Return to the previous entry of the history.
    ///
    /// Returns `None` when there is nothing to go back to.
    pub fn back(&mut self) -> Option<Route> {
        if self.history.len() < 2 {
            return None;
        }
        self.history.pop();
        let previous = self.history.last()?;
        self.resolve(previous).ok().map(|record| record.route)
    }

    /// Path of the current entry
    pub fn current(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}
