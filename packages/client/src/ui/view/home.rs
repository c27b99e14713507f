//! Home view: collect search criteria and look for a partner.

use async_trait::async_trait;

use crate::{
    domain::{Gender, PartnerSearchResponse, SessionStore},
    ui::{error::AppError, terminal::Terminal},
    usecase::{FindPartnerUseCase, UseCaseError},
};

use super::{Navigation, SearchPrefill, View, ViewContext};

const DEFAULT_WAITING_MESSAGE: &str = "Nobody is available yet. You are in the queue.";
const QUIT_COMMAND: &str = "/quit";

#[derive(Debug, Default)]
pub struct HomeView;

impl HomeView {
    pub fn new() -> Self {
        Self
    }

    /// Criteria from the prefill, or asked for interactively.
    ///
    /// Returns `None` when the user quits.
    async fn read_criteria(
        &self,
        prefill: &SearchPrefill,
        terminal: &mut dyn Terminal,
    ) -> Result<Option<SearchPrefill>, AppError> {
        if prefill.gender.is_some() {
            return Ok(Some(prefill.clone()));
        }

        let gender = loop {
            let Some(line) = terminal
                .read_line("Partner gender (male/female/any): ")
                .await?
            else {
                return Ok(None);
            };
            if line.trim() == QUIT_COMMAND {
                return Ok(None);
            }
            match Gender::new(line) {
                Ok(gender) => break gender,
                Err(e) => terminal.print(&format!("{e}. Try again.")),
            }
        };

        let Some(age_from) = read_age(terminal, "Minimum age (blank for any): ").await? else {
            return Ok(None);
        };
        let Some(age_to) = read_age(terminal, "Maximum age (blank for any): ").await? else {
            return Ok(None);
        };

        Ok(Some(SearchPrefill {
            gender: Some(gender),
            age_from,
            age_to,
        }))
    }
}

/// Ask for an optional age. The outer `None` means the user quit.
async fn read_age(
    terminal: &mut dyn Terminal,
    prompt: &str,
) -> Result<Option<Option<u32>>, AppError> {
    loop {
        let Some(line) = terminal.read_line(prompt).await? else {
            return Ok(None);
        };
        let line = line.trim();
        if line == QUIT_COMMAND {
            return Ok(None);
        }
        if line.is_empty() {
            return Ok(Some(None));
        }
        match line.parse::<u32>() {
            Ok(age) => return Ok(Some(Some(age))),
            Err(_) => terminal.print("Please enter a whole number or leave it blank."),
        }
    }
}

#[async_trait]
impl View for HomeView {
    fn name(&self) -> &'static str {
        "Home"
    }

    async fn render(
        &mut self,
        ctx: &ViewContext,
        terminal: &mut dyn Terminal,
    ) -> Result<Navigation, AppError> {
        let user = ctx.store.user().await.ok_or(UseCaseError::NoUser)?;
        terminal.print(&format!(
            "Hi, {}! Let's find you someone to talk to.",
            user.display_name()
        ));

        let usecase = FindPartnerUseCase::new(ctx.api.clone(), ctx.store.clone());
        loop {
            let Some(criteria) = self.read_criteria(&ctx.prefill, terminal).await? else {
                return Ok(Navigation::Quit);
            };
            let Some(gender) = criteria.gender else {
                return Ok(Navigation::Quit);
            };

            terminal.print("Searching for a partner...");
            match usecase
                .execute(gender, criteria.age_from, criteria.age_to)
                .await
            {
                Ok(PartnerSearchResponse::Matched { partner, .. }) => {
                    terminal.print(&format!("Matched with {}!", partner.name));
                    return Ok(Navigation::To("/chat".to_string()));
                }
                Ok(PartnerSearchResponse::Waiting { message, .. }) => {
                    terminal.print(message.as_deref().unwrap_or(DEFAULT_WAITING_MESSAGE));
                }
                Err(UseCaseError::Api(e)) => {
                    terminal.print(&format!("Search failed: {e}"));
                }
                Err(e) => return Err(e.into()),
            }

            match terminal
                .read_line("Press Enter to search again, or type /quit: ")
                .await?
            {
                Some(line) if line.trim() != QUIT_COMMAND => continue,
                _ => return Ok(Navigation::Quit),
            }
        }
    }
}
