//! Request/response DTOs for the Web API.

use serde::Serialize;
use utoipa::ToSchema;

/// Simple message response, used for delete results and errors.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Create a new message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Metadata returned after a successful upload.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadedFile {
    /// Generated on-disk file name (`<millis>_<original>`).
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Content type captured from the upload.
    pub mimetype: String,
    /// URL the file is retrievable from.
    pub url: String,
}

/// Upload response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// Human-readable message.
    pub message: String,
    /// Uploaded file metadata.
    pub file: UploadedFile,
}

/// One entry in a folder listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct FileEntry {
    /// On-disk file name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// URL the file is retrievable from.
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_response_serialization() {
        let body = serde_json::to_value(MessageResponse::new("deleted")).unwrap();
        assert_eq!(body, json!({ "message": "deleted" }));
    }

    #[test]
    fn test_upload_response_serialization() {
        let response = UploadResponse {
            message: "upload complete".to_string(),
            file: UploadedFile {
                name: "1712345678901_hello.txt".to_string(),
                size: 2,
                mimetype: "text/plain".to_string(),
                url: "http://localhost:3000/uploads/demo/1712345678901_hello.txt".to_string(),
            },
        };

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["message"], "upload complete");
        assert_eq!(body["file"]["name"], "1712345678901_hello.txt");
        assert_eq!(body["file"]["size"], 2);
        assert_eq!(body["file"]["mimetype"], "text/plain");
    }

    #[test]
    fn test_file_entry_serialization() {
        let entry = FileEntry {
            name: "a.txt".to_string(),
            size: 10,
            url: "http://host/uploads/demo/a.txt".to_string(),
        };

        let body = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            body,
            json!({ "name": "a.txt", "size": 10, "url": "http://host/uploads/demo/a.txt" })
        );
    }
}
