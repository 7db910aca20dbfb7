//! Analysis responses and their display formatting.
//!
//! The service does not tag its analysis responses. A body carries either an
//! `analysis` text or an `error` text, and a content-safety rejection is only
//! recognizable by a phrase inside the error. [`AnalysisResponse`] turns that
//! into a closed enum in one place so the rule cannot drift between callers.

use crate::error::model_error::ModelError;
use crate::ErrorLocation;

use std::fmt;
use std::panic::Location;

use serde::Deserialize;

/// Phrase the service puts in errors raised by the content-safety filter.
/// Matched case-sensitively.
pub const BLOCKED_CONTENT_MARKER: &str = "blocked prompt";

/// Character in analysis text that starts a bullet.
pub const BULLET_MARKER: char = '*';

/// Glyph a bullet is rendered with.
pub const BULLET_GLYPH: char = '•';

/// Line separator used by [`FormattedAnalysis::to_markup`].
pub const MARKUP_LINE_BREAK: &str = "<br>";

/// The analysis response body exactly as sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawAnalysisResponse {
    #[serde(default)]
    pub analysis: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Classified analysis response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisResponse {
    Success { analysis: String },
    Blocked { message: String },
    Generic { message: String },
}

impl AnalysisResponse {
    /// Classify a raw body.
    ///
    /// 1. A non-empty `error` containing [`BLOCKED_CONTENT_MARKER`] is `Blocked`.
    /// 2. Any other non-empty `error` is `Generic`.
    /// 3. Otherwise a present `analysis` is `Success`.
    /// 4. A body with neither is a [`ModelError::Classification`].
    #[track_caller]
    pub fn classify(raw: RawAnalysisResponse) -> Result<Self, ModelError> {
        match raw {
            RawAnalysisResponse {
                error: Some(message),
                ..
            } if !message.is_empty() => {
                if message.contains(BLOCKED_CONTENT_MARKER) {
                    Ok(AnalysisResponse::Blocked { message })
                } else {
                    Ok(AnalysisResponse::Generic { message })
                }
            }
            RawAnalysisResponse {
                analysis: Some(analysis),
                ..
            } => Ok(AnalysisResponse::Success { analysis }),
            RawAnalysisResponse { .. } => Err(ModelError::Classification {
                message: String::from("Response carried neither an analysis nor an error"),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl TryFrom<RawAnalysisResponse> for AnalysisResponse {
    type Error = ModelError;

    #[track_caller]
    fn try_from(raw: RawAnalysisResponse) -> Result<Self, Self::Error> {
        AnalysisResponse::classify(raw)
    }
}

/// Analysis text split into display lines.
///
/// Every [`BULLET_MARKER`] ends the current line and opens a new one starting
/// with [`BULLET_GLYPH`]; every `\n` ends the current line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedAnalysis {
    lines: Vec<String>,
}

impl FormattedAnalysis {
    pub fn from_text(text: &str) -> Self {
        let mut lines = Vec::new();
        let mut current = String::new();

        for character in text.chars() {
            match character {
                BULLET_MARKER => {
                    lines.push(std::mem::take(&mut current));
                    current.push(BULLET_GLYPH);
                }
                '\n' => lines.push(std::mem::take(&mut current)),
                other => current.push(other),
            }
        }
        lines.push(current);

        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of line breaks the formatting introduced.
    pub fn break_count(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    /// HTML fragment with escaped text and `<br>` between lines.
    pub fn to_markup(&self) -> String {
        self.lines
            .iter()
            .map(|line| escape_markup(line))
            .collect::<Vec<_>>()
            .join(MARKUP_LINE_BREAK)
    }
}

impl fmt::Display for FormattedAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines.join("\n"))
    }
}

fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}
