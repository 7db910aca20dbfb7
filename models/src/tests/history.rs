use crate::history::{DEFAULT_EXCERPT_CHARS, DEFAULT_STATIC_PREFIX, TRUNCATION_MARKER};
use crate::{HistoryCard, HistoryRecord};

fn record(analysis: &str) -> HistoryRecord {
    HistoryRecord {
        id: 7,
        date: String::from("2025-03-01 14:05"),
        image_path: String::from("uploads/user_1/mole.png"),
        analysis: analysis.to_string(),
    }
}

/// **VALUE**: Verifies the list endpoint's records deserialize with every consumed field.
#[test]
fn given_history_json_when_deserialized_then_fields_populated() {
    let records: Vec<HistoryRecord> = serde_json::from_value(serde_json::json!([
        {"id": 3, "date": "2025-03-01 14:05", "image_path": "uploads/a.png", "analysis": "x"}
    ]))
    .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, 3);
    assert_eq!(records[0].image_path, "uploads/a.png");
}

/// **VALUE**: Verifies the truncation marker is appended even when nothing was cut.
///
/// **WHY THIS MATTERS**: History cards have always shown "..." after every excerpt.
/// Changing that silently would alter every card.
#[test]
fn given_short_analysis_when_excerpted_then_marker_still_appended() {
    let excerpt = record("Round and even").excerpt(DEFAULT_EXCERPT_CHARS);

    assert_eq!(excerpt, format!("Round and even{TRUNCATION_MARKER}"));
}

#[test]
fn given_long_analysis_when_excerpted_then_cut_at_limit() {
    let long = "x".repeat(300);

    let excerpt = record(&long).excerpt(DEFAULT_EXCERPT_CHARS);

    assert_eq!(excerpt.len(), DEFAULT_EXCERPT_CHARS + TRUNCATION_MARKER.len());
}

/// **VALUE**: Verifies excerpts count characters, not bytes.
///
/// **BUG THIS CATCHES**: Would catch byte slicing, which panics in the middle of a
/// multi-byte character such as the bullet glyph.
#[test]
fn given_multibyte_text_when_excerpted_then_no_split_character() {
    let text = "•".repeat(200);

    let excerpt = record(&text).excerpt(DEFAULT_EXCERPT_CHARS);

    assert_eq!(excerpt.chars().count(), DEFAULT_EXCERPT_CHARS + 3);
}

#[test]
fn given_record_when_card_built_then_image_under_static_prefix() {
    let card = HistoryCard::new(&record("text"), DEFAULT_STATIC_PREFIX, DEFAULT_EXCERPT_CHARS);

    assert_eq!(card.id, 7);
    assert_eq!(card.image_src, "/static/uploads/user_1/mole.png");
    assert_eq!(card.date, "2025-03-01 14:05");
}

#[test]
fn given_slashes_on_both_sides_when_joined_then_single_separator() {
    let mut leading = record("text");
    leading.image_path = String::from("/uploads/b.png");

    assert_eq!(leading.image_src("/static/"), "/static/uploads/b.png");
    assert_eq!(leading.image_src("/static"), "/static/uploads/b.png");
}
