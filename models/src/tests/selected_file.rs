use crate::selected_file::mime_type_for;
use crate::SelectedFile;

#[test]
fn given_image_extensions_when_mapped_then_image_mime_types() {
    assert_eq!(mime_type_for("mole.PNG"), "image/png");
    assert_eq!(mime_type_for("scan.jpeg"), "image/jpeg");
    assert_eq!(mime_type_for("scan.jpg"), "image/jpeg");
    assert_eq!(mime_type_for("notes"), "application/octet-stream");
}

/// **VALUE**: Verifies file bytes stay out of Debug output.
///
/// **BUG THIS CATCHES**: Would catch a derived Debug, which dumps megabytes of image
/// data into the log whenever a selection is traced.
#[test]
fn given_selected_file_when_debug_formatted_then_shows_length_only() {
    let file = SelectedFile::new("mole.png", vec![1, 2, 3, 4]);

    let debug = format!("{file:?}");

    assert!(debug.contains("len: 4"));
    assert!(!debug.contains("[1, 2, 3, 4]"));
    assert_eq!(file.mime_type, "image/png");
}
