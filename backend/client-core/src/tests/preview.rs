use crate::preview::ImagePreview;

use models::SelectedFile;

/// **VALUE**: Verifies the preview is a standard base64 data URL with the inferred MIME type.
///
/// **BUG THIS CATCHES**: Would catch URL-safe or unpadded encoding, which image elements
/// do not accept in `data:` URLs.
#[test]
fn given_png_file_when_previewed_then_data_url_with_mime() {
    let file = SelectedFile::new("mole.png", b"hello?".to_vec());

    let preview = ImagePreview::from_file(&file);

    assert_eq!(preview.data_url(), "data:image/png;base64,aGVsbG8/");
    assert_eq!(preview.file_name(), "mole.png");
}

#[test]
fn given_empty_file_when_previewed_then_empty_payload() {
    let file = SelectedFile::new("blank.jpg", Vec::new());

    let preview = ImagePreview::from_file(&file);

    assert_eq!(preview.data_url(), "data:image/jpeg;base64,");
}
