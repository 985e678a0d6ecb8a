/// One file part of a multipart create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Form field the file was sent under, e.g. `mainImage`.
    pub field: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A file written to the public upload directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAsset {
    pub file_name: String,
    /// Path the site serves the file under, e.g. `/uploads/main-1700000000000-cover.jpg`.
    pub public_path: String,
}
