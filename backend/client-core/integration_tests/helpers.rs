//! Recording page surfaces for controller integration tests.
//!
//! Each fake stores what the controller asked it to show, so tests can assert
//! on rendered states without a document.

use client_core::page::{
    AnalysisView, CardHandle, Control, Dialogs, FileInput, HistoryGrid, HistoryView,
    LoginNotice, MessageArea, Navigator, PreviewArea, ResultArea,
};
use client_core::preview::ImagePreview;
use client_core::scan_client::ScanClient;

use models::{HistoryCard, SelectedFile};

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn client_for(server: &wiremock::MockServer) -> ScanClient {
    ScanClient::new(&server.uri()).expect("mock server URI should parse")
}

/// Client aimed at a local port nothing listens on.
pub fn unreachable_client() -> ScanClient {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local address").port();
    drop(listener);
    ScanClient::new(&format!("http://127.0.0.1:{port}")).expect("URL should parse")
}

pub fn png(name: &str) -> SelectedFile {
    SelectedFile::new(name, vec![0x89, b'P', b'N', b'G'])
}

#[derive(Default)]
pub struct RecordingControl {
    label: Mutex<String>,
    enabled: AtomicBool,
    labels: Mutex<Vec<String>>,
}

impl RecordingControl {
    pub fn labelled(label: &str) -> Arc<Self> {
        Arc::new(Self {
            label: Mutex::new(label.to_string()),
            enabled: AtomicBool::new(true),
            labels: Mutex::new(Vec::new()),
        })
    }

    pub fn current_label(&self) -> String {
        self.label.lock().unwrap().clone()
    }

    pub fn label_history(&self) -> Vec<String> {
        self.labels.lock().unwrap().clone()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }
}

impl Control for RecordingControl {
    fn label(&self) -> String {
        self.current_label()
    }

    fn set_label(&self, label: &str) {
        *self.label.lock().unwrap() = label.to_string();
        self.labels.lock().unwrap().push(label.to_string());
    }

    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct RecordingMessage {
    pub notices: Mutex<Vec<LoginNotice>>,
}

impl MessageArea for RecordingMessage {
    fn show(&self, notice: &LoginNotice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub visits: Mutex<Vec<String>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visits.lock().unwrap().push(path.to_string());
    }
}

#[derive(Default)]
pub struct StubFileInput {
    files: Mutex<Vec<SelectedFile>>,
    pub clears: AtomicUsize,
}

impl StubFileInput {
    pub fn with_files(files: Vec<SelectedFile>) -> Arc<Self> {
        Arc::new(Self {
            files: Mutex::new(files),
            clears: AtomicUsize::new(0),
        })
    }

    pub fn select(&self, files: Vec<SelectedFile>) {
        *self.files.lock().unwrap() = files;
    }

    pub fn selected_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

impl FileInput for StubFileInput {
    fn selected(&self) -> Vec<SelectedFile> {
        self.files.lock().unwrap().clone()
    }

    fn clear(&self) {
        self.files.lock().unwrap().clear();
        self.clears.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct RecordingPreview {
    pub shown: Mutex<Vec<ImagePreview>>,
}

impl PreviewArea for RecordingPreview {
    fn show(&self, preview: &ImagePreview) {
        self.shown.lock().unwrap().push(preview.clone());
    }
}

#[derive(Default)]
pub struct RecordingResult {
    pub views: Mutex<Vec<AnalysisView>>,
}

impl RecordingResult {
    pub fn last(&self) -> Option<AnalysisView> {
        self.views.lock().unwrap().last().cloned()
    }

    pub fn all(&self) -> Vec<AnalysisView> {
        self.views.lock().unwrap().clone()
    }
}

impl ResultArea for RecordingResult {
    fn render(&self, view: &AnalysisView) {
        self.views.lock().unwrap().push(view.clone());
    }
}

pub struct RecordingCard {
    pub card: HistoryCard,
    pub control: Arc<RecordingControl>,
    pub faded: AtomicBool,
    pub removals: AtomicUsize,
}

impl RecordingCard {
    pub fn new(card: HistoryCard) -> Arc<Self> {
        Arc::new(Self {
            card,
            control: RecordingControl::labelled("Delete Log"),
            faded: AtomicBool::new(false),
            removals: AtomicUsize::new(0),
        })
    }

    pub fn is_removed(&self) -> bool {
        self.removals.load(Ordering::SeqCst) > 0
    }
}

impl CardHandle for RecordingCard {
    fn id(&self) -> i64 {
        self.card.id
    }

    fn delete_control(&self) -> Arc<dyn Control> {
        self.control.clone()
    }

    fn fade_out(&self) {
        self.faded.store(true, Ordering::SeqCst);
    }

    fn remove(&self) {
        self.removals.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct RecordingGrid {
    pub views: Mutex<Vec<HistoryView>>,
    pub cards: Mutex<Vec<Arc<RecordingCard>>>,
    pub clears: AtomicUsize,
}

impl RecordingGrid {
    pub fn last_view(&self) -> Option<HistoryView> {
        self.views.lock().unwrap().last().copied()
    }

    pub fn cards(&self) -> Vec<Arc<RecordingCard>> {
        self.cards.lock().unwrap().clone()
    }
}

impl HistoryGrid for RecordingGrid {
    fn render(&self, view: &HistoryView) {
        self.views.lock().unwrap().push(*view);
    }

    fn clear(&self) {
        self.cards.lock().unwrap().clear();
        self.clears.fetch_add(1, Ordering::SeqCst);
    }

    fn append(&self, card: HistoryCard) -> Arc<dyn CardHandle> {
        let card = RecordingCard::new(card);
        self.cards.lock().unwrap().push(card.clone());
        card
    }
}

pub struct ScriptedDialogs {
    answer: bool,
    pub prompts: Mutex<Vec<String>>,
    pub alerts: Mutex<Vec<String>>,
}

impl ScriptedDialogs {
    pub fn answering(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            prompts: Mutex::new(Vec::new()),
            alerts: Mutex::new(Vec::new()),
        })
    }
}

impl Dialogs for ScriptedDialogs {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}
