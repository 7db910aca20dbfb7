//! Console implementations of the page surfaces.
//!
//! A [`ConsolePage`] plays the role of one loaded document: it owns the
//! surfaces for whichever forms the route carries and prints every rendered
//! state to the [`Screen`].

use client_core::config::RoutesConfig;
use client_core::controller::{AnalysisSurfaces, AuthSurfaces, HistorySurfaces, PageSurfaces};
use client_core::page::{
    AnalysisView, CardHandle, Control, Dialogs, FileInput, HistoryGrid, HistoryView,
    LoginNotice, MessageArea, Navigator, PreviewArea, ResultArea,
};
use client_core::preview::ImagePreview;

use models::{HistoryCard, SelectedFile};

use std::fmt;
use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use log::warn;

const LOGIN_LABEL: &str = "LOGIN";
const ANALYZE_LABEL: &str = "ANALYZE";
const DELETE_LABEL: &str = "Delete Log";

/// Line-oriented input shared by the session loop and confirmation dialogs.
pub type SharedInput = Arc<Mutex<Box<dyn BufRead + Send>>>;

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Output sink for everything a page renders.
pub struct Screen {
    out: Mutex<Box<dyn Write + Send>>,
}

impl Screen {
    pub fn new(out: Box<dyn Write + Send>) -> Arc<Self> {
        Arc::new(Self {
            out: Mutex::new(out),
        })
    }

    pub fn stdout() -> Arc<Self> {
        Self::new(Box::new(std::io::stdout()))
    }

    pub fn line(&self, text: impl fmt::Display) {
        let mut out = lock(&self.out);
        if let Err(e) = writeln!(out, "{text}").and_then(|()| out.flush()) {
            warn!("Failed to write to console: {}", e);
        }
    }

    /// Write without a newline, for prompts.
    pub fn prompt(&self, text: &str) {
        let mut out = lock(&self.out);
        if let Err(e) = write!(out, "{text}").and_then(|()| out.flush()) {
            warn!("Failed to write to console: {}", e);
        }
    }
}

/// Which forms a route carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Login,
    Landing,
    History,
    /// A route with none of the known forms.
    Blank,
}

impl PageKind {
    pub fn for_path(path: &str, routes: &RoutesConfig) -> Self {
        if path == routes.login_path {
            PageKind::Login
        } else if path == routes.landing_path {
            PageKind::Landing
        } else if path == routes.history_path {
            PageKind::History
        } else {
            PageKind::Blank
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PageKind::Login => "login",
            PageKind::Landing => "analysis",
            PageKind::History => "history",
            PageKind::Blank => "blank",
        };
        write!(f, "{name}")
    }
}

/// A button printed as `[label]` whenever its label changes, and as
/// `[label (disabled)]` / `[label (enabled)]` when that flips.
pub struct ConsoleControl {
    label: Mutex<String>,
    enabled: AtomicBool,
    screen: Arc<Screen>,
}

impl ConsoleControl {
    pub fn new(label: &str, screen: Arc<Screen>) -> Arc<Self> {
        Arc::new(Self {
            label: Mutex::new(label.to_string()),
            enabled: AtomicBool::new(true),
            screen,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }
}

impl Control for ConsoleControl {
    fn label(&self) -> String {
        lock(&self.label).clone()
    }

    fn set_label(&self, label: &str) {
        *lock(&self.label) = label.to_string();
        self.screen.line(format_args!("[{label}]"));
    }

    fn set_enabled(&self, enabled: bool) {
        if self.enabled.swap(enabled, Ordering::SeqCst) == enabled {
            return;
        }
        let state = if enabled { "enabled" } else { "disabled" };
        self.screen
            .line(format_args!("[{} ({state})]", self.label()));
    }
}

pub struct ConsoleMessage {
    screen: Arc<Screen>,
}

impl MessageArea for ConsoleMessage {
    fn show(&self, notice: &LoginNotice) {
        self.screen.line(notice.text());
    }
}

/// Holds the requested route until the session performs the navigation.
#[derive(Default)]
pub struct ConsoleNavigator {
    pending: Mutex<Option<String>>,
}

impl ConsoleNavigator {
    pub fn take(&self) -> Option<String> {
        lock(&self.pending).take()
    }
}

impl Navigator for ConsoleNavigator {
    fn navigate(&self, path: &str) {
        *lock(&self.pending) = Some(path.to_string());
    }
}

#[derive(Default)]
pub struct ConsoleFileInput {
    files: Mutex<Vec<SelectedFile>>,
}

impl ConsoleFileInput {
    pub fn select(&self, files: Vec<SelectedFile>) {
        *lock(&self.files) = files;
    }
}

impl FileInput for ConsoleFileInput {
    fn selected(&self) -> Vec<SelectedFile> {
        lock(&self.files).clone()
    }

    fn clear(&self) {
        lock(&self.files).clear();
    }
}

pub struct ConsolePreview {
    screen: Arc<Screen>,
}

impl PreviewArea for ConsolePreview {
    fn show(&self, preview: &ImagePreview) {
        self.screen.line(format_args!(
            "Preview: {} ({} character data URL)",
            preview.file_name(),
            preview.data_url().len()
        ));
    }
}

pub struct ConsoleResult {
    screen: Arc<Screen>,
}

impl ResultArea for ConsoleResult {
    fn render(&self, view: &AnalysisView) {
        for line in view.lines() {
            self.screen.line(line);
        }
    }
}

pub struct ConsoleCard {
    card: HistoryCard,
    control: Arc<ConsoleControl>,
    removed: AtomicBool,
    screen: Arc<Screen>,
}

impl ConsoleCard {
    pub fn card(&self) -> &HistoryCard {
        &self.card
    }

    pub fn is_removed(&self) -> bool {
        self.removed.load(Ordering::SeqCst)
    }
}

impl CardHandle for ConsoleCard {
    fn id(&self) -> i64 {
        self.card.id
    }

    fn delete_control(&self) -> Arc<dyn Control> {
        self.control.clone()
    }

    fn fade_out(&self) {
        self.screen
            .line(format_args!("Record #{} fading out...", self.card.id));
    }

    fn remove(&self) {
        if !self.removed.swap(true, Ordering::SeqCst) {
            self.screen
                .line(format_args!("Record #{} removed.", self.card.id));
        }
    }
}

pub struct ConsoleGrid {
    cards: Mutex<Vec<Arc<ConsoleCard>>>,
    screen: Arc<Screen>,
}

impl ConsoleGrid {
    /// The card on screen for `id`, if it has not been removed.
    pub fn card(&self, id: i64) -> Option<Arc<ConsoleCard>> {
        lock(&self.cards)
            .iter()
            .find(|card| card.card.id == id && !card.is_removed())
            .cloned()
    }

    pub fn visible_ids(&self) -> Vec<i64> {
        lock(&self.cards)
            .iter()
            .filter(|card| !card.is_removed())
            .map(|card| card.card.id)
            .collect()
    }
}

impl HistoryGrid for ConsoleGrid {
    fn render(&self, view: &HistoryView) {
        lock(&self.cards).clear();
        self.screen.line(view.text());
    }

    fn clear(&self) {
        lock(&self.cards).clear();
    }

    fn append(&self, card: HistoryCard) -> Arc<dyn CardHandle> {
        self.screen.line(format_args!(
            "#{:<5} {}  {}",
            card.id, card.date, card.image_src
        ));
        self.screen.line(format_args!("       {}", card.excerpt));

        let card = Arc::new(ConsoleCard {
            card,
            control: ConsoleControl::new(DELETE_LABEL, self.screen.clone()),
            removed: AtomicBool::new(false),
            screen: self.screen.clone(),
        });
        lock(&self.cards).push(card.clone());
        card
    }
}

/// `confirm` reads a y/N answer from the session input.
pub struct ConsoleDialogs {
    screen: Arc<Screen>,
    input: SharedInput,
}

impl Dialogs for ConsoleDialogs {
    fn confirm(&self, prompt: &str) -> bool {
        self.screen.prompt(&format!("{prompt} [y/N] "));

        let mut answer = String::new();
        if let Err(e) = lock(&self.input).read_line(&mut answer) {
            warn!("Failed to read confirmation: {}", e);
            return false;
        }

        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }

    fn alert(&self, message: &str) {
        self.screen.line(format_args!("! {message}"));
    }
}

/// The surfaces of one loaded route.
pub struct ConsolePage {
    pub path: String,
    pub kind: PageKind,
    pub navigator: Arc<ConsoleNavigator>,
    pub file_input: Option<Arc<ConsoleFileInput>>,
    pub grid: Option<Arc<ConsoleGrid>>,
    surfaces: PageSurfaces,
}

impl ConsolePage {
    pub fn load(
        path: &str,
        routes: &RoutesConfig,
        screen: Arc<Screen>,
        input: SharedInput,
    ) -> Self {
        let kind = PageKind::for_path(path, routes);
        let navigator = Arc::new(ConsoleNavigator::default());
        let mut surfaces = PageSurfaces::default();
        let mut file_input = None;
        let mut grid = None;

        match kind {
            PageKind::Login => {
                surfaces.auth = Some(AuthSurfaces {
                    submit: ConsoleControl::new(LOGIN_LABEL, screen.clone()),
                    message: Arc::new(ConsoleMessage {
                        screen: screen.clone(),
                    }),
                    navigator: navigator.clone(),
                });
            }
            PageKind::Landing => {
                let input = Arc::new(ConsoleFileInput::default());
                surfaces.analysis = Some(AnalysisSurfaces {
                    file_input: input.clone(),
                    preview: Arc::new(ConsolePreview {
                        screen: screen.clone(),
                    }),
                    result: Arc::new(ConsoleResult {
                        screen: screen.clone(),
                    }),
                    submit: ConsoleControl::new(ANALYZE_LABEL, screen.clone()),
                });
                file_input = Some(input);
            }
            PageKind::History => {
                let history_grid = Arc::new(ConsoleGrid {
                    cards: Mutex::new(Vec::new()),
                    screen: screen.clone(),
                });
                surfaces.history = Some(HistorySurfaces {
                    grid: history_grid.clone(),
                    dialogs: Arc::new(ConsoleDialogs { screen, input }),
                });
                grid = Some(history_grid);
            }
            PageKind::Blank => {}
        }

        Self {
            path: path.to_string(),
            kind,
            navigator,
            file_input,
            grid,
            surfaces,
        }
    }

    /// No route loaded yet.
    pub fn blank() -> Self {
        Self {
            path: String::new(),
            kind: PageKind::Blank,
            navigator: Arc::new(ConsoleNavigator::default()),
            file_input: None,
            grid: None,
            surfaces: PageSurfaces::default(),
        }
    }

    pub fn surfaces(&self) -> PageSurfaces {
        self.surfaces.clone()
    }
}
