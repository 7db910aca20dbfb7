//! Local image previews for a freshly selected file.

use models::SelectedFile;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// A selected image encoded as a `data:` URL, ready for an image element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePreview {
    file_name: String,
    data_url: String,
}

impl ImagePreview {
    pub fn from_file(file: &SelectedFile) -> Self {
        Self {
            file_name: file.file_name.clone(),
            data_url: format!(
                "data:{};base64,{}",
                file.mime_type,
                STANDARD.encode(&file.bytes)
            ),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }
}
