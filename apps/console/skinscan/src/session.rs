//! Interactive session: one loaded page at a time, commands routed to its
//! controllers.

use crate::command::{Command, HELP_TEXT};
use crate::console_page::{ConsolePage, Screen, SharedInput};
use crate::error::ConsoleError;

use client_core::config::AppConfig;
use client_core::controller::{
    AnalysisEvent, AuthEvent, AuthOutcome, Controllers, HistoryEvent, HistoryOutcome,
};
use client_core::scan_client::ScanClient;

use common::ErrorLocation;
use models::{Credentials, SelectedFile, SignupForm, SignupReply};

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info, warn};

const PROMPT_SUFFIX: &str = "> ";

/// Whether the session keeps reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    client: ScanClient,
    config: AppConfig,
    screen: Arc<Screen>,
    input: SharedInput,
    page: ConsolePage,
    controllers: Controllers,
}

impl Session {
    /// Start on the login page.
    pub async fn start(
        client: ScanClient,
        config: AppConfig,
        screen: Arc<Screen>,
        input: SharedInput,
    ) -> Self {
        let login_path = config.routes.login_path.clone();
        let mut session = Self {
            client,
            config,
            screen,
            input,
            page: ConsolePage::blank(),
            controllers: Controllers::default(),
        };
        session.open(&login_path).await;
        session
    }

    pub fn page(&self) -> &ConsolePage {
        &self.page
    }

    pub fn controllers(&self) -> &Controllers {
        &self.controllers
    }

    /// Replace the current page and bind its controllers.
    pub async fn open(&mut self, path: &str) {
        info!("Opening page {}", path);
        self.page = ConsolePage::load(
            path,
            &self.config.routes,
            self.screen.clone(),
            self.input.clone(),
        );
        self.controllers = Controllers::bind(&self.client, &self.config, self.page.surfaces());

        self.screen
            .line(format_args!("== {} ({}) ==", self.page.path, self.page.kind));
        self.controllers.initialize().await;
    }

    /// Read and execute commands until `quit` or end of input.
    pub async fn run(&mut self) -> Result<(), ConsoleError> {
        self.screen.line("Type 'help' for commands.");

        loop {
            self.screen
                .prompt(&format!("{}{PROMPT_SUFFIX}", self.page.path));

            let Some(line) = self.read_line()? else {
                info!("Input closed, ending session");
                return Ok(());
            };
            if line.trim().is_empty() {
                continue;
            }

            let flow = match line.parse::<Command>() {
                Ok(command) => self.execute(command).await,
                Err(e) => {
                    debug!("Rejected input: {}", e);
                    self.screen.line(e.message());
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                return Ok(());
            }
        }
    }

    fn read_line(&self) -> Result<Option<String>, ConsoleError> {
        let mut line = String::new();
        let read = self
            .input
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .read_line(&mut line)
            .map_err(|e| ConsoleError::Console {
                message: format!("Failed to read input: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok((read > 0).then_some(line))
    }

    pub async fn execute(&mut self, command: Command) -> Flow {
        match command {
            Command::Login(credentials) => self.login(credentials).await,
            Command::Signup(form) => self.signup(&form).await,
            Command::Logout => self.logout().await,
            Command::Open(path) => self.open(&path).await,
            Command::Select(paths) => self.select(&paths).await,
            Command::Analyze => self.analyze().await,
            Command::History => self.reload_history().await,
            Command::Delete(id) => self.delete(id).await,
            Command::Page => self.describe_page(),
            Command::Help => self.screen.line(HELP_TEXT),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    async fn login(&mut self, credentials: Credentials) {
        let Some(auth) = &self.controllers.auth else {
            self.screen.line("This page has no login form.");
            return;
        };

        let outcome = auth.dispatch(AuthEvent::Submit(credentials)).await;
        if !matches!(outcome, AuthOutcome::Navigated(_)) {
            return;
        }

        if let Some(path) = self.page.navigator.take() {
            self.open(&path).await;
        }
    }

    /// Create an account, then go to the login page as the signup page does.
    async fn signup(&mut self, form: &SignupForm) {
        info!("Signing up user '{}'", form.username());

        match self.client.signup(form).await {
            Ok(SignupReply::Created) => {
                info!("Account '{}' created", form.username());
                self.screen.line("Account created. Please log in.");
                let login_path = self.config.routes.login_path.clone();
                self.open(&login_path).await;
            }
            Ok(SignupReply::UserExists) => {
                warn!("Signup refused: '{}' already exists", form.username());
                self.screen.line("User already exists.");
            }
            Ok(SignupReply::Failed(status)) => {
                warn!("Signup failed with HTTP {}", status);
                self.screen.line(format_args!("Signup failed (HTTP {status})."));
            }
            Err(e) => {
                warn!("Signup request failed: {}", e);
                self.screen
                    .line(format_args!("CONNECTION ERROR: {}", e.description()));
            }
        }
    }

    async fn logout(&mut self) {
        match self.client.logout().await {
            Ok(()) => {
                info!("Logged out");
                self.screen.line("Logged out.");
                let login_path = self.config.routes.login_path.clone();
                self.open(&login_path).await;
            }
            Err(e) => {
                warn!("Logout failed: {}", e);
                self.screen
                    .line(format_args!("Logout failed: {}", e.description()));
            }
        }
    }

    async fn select(&self, paths: &[PathBuf]) {
        let (Some(analysis), Some(file_input)) =
            (&self.controllers.analysis, &self.page.file_input)
        else {
            self.screen.line("This page has no upload form.");
            return;
        };

        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            match read_selected_file(path).await {
                Ok(file) => files.push(file),
                Err(e) => {
                    warn!("{}", e);
                    self.screen.line(e.message());
                    return;
                }
            }
        }

        let first = files.first().cloned();
        file_input.select(files);
        analysis.dispatch(AnalysisEvent::FileSelected(first)).await;
    }

    async fn analyze(&self) {
        match &self.controllers.analysis {
            Some(analysis) => {
                analysis.dispatch(AnalysisEvent::Submit).await;
            }
            None => self.screen.line("This page has no upload form."),
        }
    }

    async fn reload_history(&self) {
        match &self.controllers.history {
            Some(history) => {
                history.dispatch(HistoryEvent::Load).await;
            }
            None => self.screen.line("This page has no history list."),
        }
    }

    async fn delete(&self, id: i64) {
        let (Some(history), Some(grid)) = (&self.controllers.history, &self.page.grid) else {
            self.screen.line("This page has no history list.");
            return;
        };

        let Some(card) = grid.card(id) else {
            self.screen.line(format_args!("No record #{id} on this page."));
            return;
        };

        if let HistoryOutcome::Delete(outcome) =
            history.dispatch(HistoryEvent::Delete { id, card }).await
        {
            debug!("Delete of record {} finished: {:?}", id, outcome);
        }
    }

    fn describe_page(&self) {
        self.screen
            .line(format_args!("Page: {} ({})", self.page.path, self.page.kind));
        if let Some(grid) = &self.page.grid {
            self.screen
                .line(format_args!("Records on screen: {:?}", grid.visible_ids()));
        }
    }
}

/// Read an image from disk the way the file picker hands it over.
pub async fn read_selected_file(path: &Path) -> Result<SelectedFile, ConsoleError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ConsoleError::Console {
            message: format!("Cannot read {}: {e}", path.display()),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(SelectedFile::new(file_name, bytes))
}
