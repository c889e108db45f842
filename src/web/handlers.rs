//! Request handlers for the Web API.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Host, Multipart, Path, State},
    http::HeaderMap,
    Json,
};
use utoipa;

use crate::storage::{generated_name, now_millis, validate_name, FolderStore};
use crate::web::dto::{FileEntry, MessageResponse, UploadResponse, UploadedFile};
use crate::web::error::ApiError;

/// Shared application state for the Web API.
pub struct AppState {
    /// Folder-scoped file store.
    pub store: FolderStore,
    /// Maximum upload size in bytes.
    pub max_upload_size: u64,
    /// Per-folder mutexes serializing filesystem mutations.
    folder_locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(store: FolderStore, max_upload_size: u64) -> Self {
        Self {
            store,
            max_upload_size,
            folder_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Get (or create) the mutation lock for a folder.
    ///
    /// Uploads and deletes for the same folder run under this lock, so
    /// two same-millisecond uploads of the same original name cannot
    /// silently overwrite each other.
    pub fn folder_lock(&self, folder: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.folder_locks.lock().expect("folder lock map poisoned");
        locks
            .entry(folder.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }
}

/// Build the request's base URL from the Host header and forwarded scheme.
fn base_url(headers: &HeaderMap, host: &str) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");

    format!("{scheme}://{host}")
}

/// Build the retrieval URL for a stored file.
fn file_url(base: &str, folder: &str, name: &str) -> String {
    format!("{base}/uploads/{folder}/{name}")
}

/// POST /upload/:folder - Upload a file into a folder.
///
/// Request body: multipart/form-data with a single `file` field.
#[utoipa::path(
    post,
    path = "/upload/{folder}",
    tag = "files",
    params(
        ("folder" = String, Path, description = "Folder name")
    ),
    request_body(content = Vec<u8>, content_type = "multipart/form-data",
        description = "Multipart form with a single `file` field"),
    responses(
        (status = 200, description = "File uploaded", body = UploadResponse),
        (status = 400, description = "Invalid folder/file name or multipart payload", body = MessageResponse),
        (status = 413, description = "File too large", body = MessageResponse)
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    Path(folder): Path<String>,
    Host(host): Host,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    validate_name(&folder)?;

    // Extract the file field from the multipart body
    let mut original_name: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut content: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::debug!("Failed to read multipart field: {}", e);
        ApiError::bad_request("invalid multipart data")
    })? {
        if field.name() != Some("file") {
            continue;
        }

        original_name = field.file_name().map(|s| s.to_string());
        content_type = field.content_type().map(|s| s.to_string());
        content = Some(
            field
                .bytes()
                .await
                .map_err(|e| {
                    tracing::debug!("Failed to read file content: {}", e);
                    ApiError::bad_request("failed to read file content")
                })?
                .to_vec(),
        );
    }

    let content = content.ok_or_else(|| ApiError::bad_request("missing file field"))?;
    let original_name =
        original_name.ok_or_else(|| ApiError::bad_request("file field has no filename"))?;
    validate_name(&original_name)?;

    if content.len() as u64 > state.max_upload_size {
        let max_mb = state.max_upload_size / 1024 / 1024;
        return Err(ApiError::payload_too_large(format!(
            "file too large (max {max_mb}MB)"
        )));
    }

    let mimetype = content_type.unwrap_or_else(|| {
        mime_guess::from_path(&original_name)
            .first_or_octet_stream()
            .to_string()
    });

    // Serialize mutations to this folder; on a same-millisecond name
    // collision the writer advances the timestamp instead of overwriting.
    let lock = state.folder_lock(&folder);
    let _guard = lock.lock().await;

    let mut millis = now_millis();
    let name = loop {
        let candidate = generated_name(millis, &original_name);
        if !state.store.contains(&folder, &candidate)? {
            break candidate;
        }
        millis += 1;
    };

    state.store.save(&folder, &name, &content)?;

    tracing::info!(
        folder = %folder,
        name = %name,
        size = content.len(),
        "File uploaded"
    );

    let url = file_url(&base_url(&headers, &host), &folder, &name);

    Ok(Json(UploadResponse {
        message: "upload complete".to_string(),
        file: UploadedFile {
            name,
            size: content.len() as u64,
            mimetype,
            url,
        },
    }))
}

/// GET /files/:folder - List the files in a folder.
///
/// A folder that has never been created yields an empty array.
#[utoipa::path(
    get,
    path = "/files/{folder}",
    tag = "files",
    params(
        ("folder" = String, Path, description = "Folder name")
    ),
    responses(
        (status = 200, description = "Files in the folder", body = Vec<FileEntry>),
        (status = 400, description = "Invalid folder name", body = MessageResponse)
    )
)]
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    Path(folder): Path<String>,
    Host(host): Host,
    headers: HeaderMap,
) -> Result<Json<Vec<FileEntry>>, ApiError> {
    let files = state.store.list(&folder)?;

    let base = base_url(&headers, &host);
    let entries = files
        .into_iter()
        .map(|f| {
            let url = file_url(&base, &folder, &f.name);
            FileEntry {
                name: f.name,
                size: f.size,
                url,
            }
        })
        .collect();

    Ok(Json(entries))
}

/// DELETE /delete/:folder/:filename - Delete a file from a folder.
#[utoipa::path(
    delete,
    path = "/delete/{folder}/{filename}",
    tag = "files",
    params(
        ("folder" = String, Path, description = "Folder name"),
        ("filename" = String, Path, description = "File name to delete")
    ),
    responses(
        (status = 200, description = "File deleted", body = MessageResponse),
        (status = 404, description = "File not found", body = MessageResponse),
        (status = 400, description = "Invalid folder/file name", body = MessageResponse)
    )
)]
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path((folder, filename)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    let lock = state.folder_lock(&folder);
    let _guard = lock.lock().await;

    if state.store.delete(&folder, &filename)? {
        tracing::info!(folder = %folder, name = %filename, "File deleted");
        Ok(Json(MessageResponse::new("deleted")))
    } else {
        Err(ApiError::not_found("not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_state() -> (TempDir, AppState) {
        let temp_dir = TempDir::new().unwrap();
        let store = FolderStore::new(temp_dir.path()).unwrap();
        let state = AppState::new(store, 1024);
        (temp_dir, state)
    }

    #[test]
    fn test_base_url_defaults_to_http() {
        let headers = HeaderMap::new();
        assert_eq!(base_url(&headers, "localhost:3000"), "http://localhost:3000");
    }

    #[test]
    fn test_base_url_honors_forwarded_proto() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-proto", "https".parse().unwrap());
        assert_eq!(base_url(&headers, "cdn.example.com"), "https://cdn.example.com");
    }

    #[test]
    fn test_file_url() {
        assert_eq!(
            file_url("http://localhost:3000", "demo", "1_a.txt"),
            "http://localhost:3000/uploads/demo/1_a.txt"
        );
    }

    #[test]
    fn test_folder_lock_is_shared_per_folder() {
        let (_temp_dir, state) = setup_state();

        let a1 = state.folder_lock("a");
        let a2 = state.folder_lock("a");
        let b = state.folder_lock("b");

        assert!(Arc::ptr_eq(&a1, &a2));
        assert!(!Arc::ptr_eq(&a1, &b));
    }
}
