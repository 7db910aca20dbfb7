use models::FormattedAnalysis;

pub const ACCESS_DENIED_PREFIX: &str = "ACCESS DENIED: ";
pub const CONNECTION_ERROR_TEXT: &str = "CONNECTION ERROR";

/// Text shown in the login message area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginNotice {
    AccessDenied(String),
    ConnectionError,
}

impl LoginNotice {
    pub fn text(&self) -> String {
        match self {
            LoginNotice::AccessDenied(reason) => format!("{ACCESS_DENIED_PREFIX}{reason}"),
            LoginNotice::ConnectionError => CONNECTION_ERROR_TEXT.to_string(),
        }
    }
}

/// States of the analysis result box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisView {
    /// A file was picked and previewed.
    Ready,
    MissingFile,
    MultipleFiles(usize),
    Busy,
    /// Rejected by the content-safety filter.
    Blocked,
    SystemError(String),
    Complete {
        analysis: FormattedAnalysis,
        history_path: String,
    },
    NetworkError(String),
}

impl AnalysisView {
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            AnalysisView::MissingFile
                | AnalysisView::MultipleFiles(_)
                | AnalysisView::Blocked
                | AnalysisView::SystemError(_)
                | AnalysisView::NetworkError(_)
        )
    }

    /// Display copy, one entry per paragraph.
    pub fn lines(&self) -> Vec<String> {
        match self {
            AnalysisView::Ready => vec![String::from("Image loaded. System ready to scan.")],
            AnalysisView::MissingFile => {
                vec![String::from("[ERROR] Please select an image file.")]
            }
            AnalysisView::MultipleFiles(count) => vec![format!(
                "[ERROR] Please select a single image file ({count} selected)."
            )],
            AnalysisView::Busy => vec![
                String::from("CONNECTING TO NEURAL NETWORK..."),
                String::from("PROCESSING IMAGE DATA..."),
            ],
            AnalysisView::Blocked => vec![
                String::from("ANALYSIS BLOCKED"),
                String::from(
                    "The AI safety filter flagged this image as sensitive medical content.",
                ),
                String::from("Try uploading a plant or object to test the system."),
            ],
            AnalysisView::SystemError(message) => vec![format!("[SYSTEM ERROR]: {message}")],
            AnalysisView::Complete {
                analysis,
                history_path,
            } => {
                let mut lines = vec![String::from("ANALYSIS COMPLETE")];
                lines.extend(analysis.lines().iter().cloned());
                lines.push(format!("Data saved to History Logs ({history_path})."));
                lines
            }
            AnalysisView::NetworkError(message) => vec![format!("[NETWORK ERROR]: {message}")],
        }
    }
}

/// Placeholder states of the history grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryView {
    Loading,
    Empty,
    Unavailable,
}

impl HistoryView {
    pub fn text(&self) -> &'static str {
        match self {
            HistoryView::Loading => "Accessing secure archives...",
            HistoryView::Empty => "No analysis logs found.",
            HistoryView::Unavailable => "Database connection failed.",
        }
    }
}
