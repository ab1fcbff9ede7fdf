//! Outgoing requests, described independently of the HTTP client that sends them.

use crate::config::{ClientConfig, TransportKind};
use crate::error::{TransportError, UploadError};
use crate::model::category::Category;
use crate::model::file_set::FileSet;

/// A POST request to one of the backend endpoints.
///
/// `path` is relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest<F> {
    pub path: String,
    pub body: RequestBody<F>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody<F> {
    Empty,
    /// Serialized JSON, sent with `Content-Type: application/json`.
    Json(String),
    /// Multipart form. The transport sets the content type and boundary.
    Multipart(Vec<FilePart<F>>),
}

/// One file of a multipart upload, sent under the category's field name.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart<F> {
    pub category: Category,
    pub file_name: String,
    pub file: F,
}

impl<F> FilePart<F> {
    pub fn field_name(&self) -> &'static str {
        self.category.as_str()
    }
}

/// Builds the upload request for the configured protocol.
///
/// - JSON: the whole file set as `{customers, products, interactions}` with
///   `null` for empty slots. Every ready slot must carry decoded text.
/// - Multipart: one part per ready category holding the original file.
pub fn upload_request<F: Clone>(
    config: &ClientConfig,
    files: &FileSet<F>,
) -> Result<HttpRequest<F>, UploadError> {
    if !files.any_ready() {
        return Err(UploadError::NothingToUpload);
    }

    let body = match config.transport {
        TransportKind::Json => {
            if let Some((category, _)) = files.ready().find(|(_, file)| file.text.is_none()) {
                return Err(UploadError::MissingText(category));
            }
            let json = serde_json::to_string(&files.text_snapshot())
                .map_err(|e| TransportError::new(e.to_string()))?;
            RequestBody::Json(json)
        }
        TransportKind::Multipart => RequestBody::Multipart(
            files
                .ready()
                .map(|(category, file)| FilePart {
                    category,
                    file_name: file.name.clone(),
                    file: file.handle.clone(),
                })
                .collect(),
        ),
    };

    Ok(HttpRequest {
        path: config.upload_path().to_string(),
        body,
    })
}

/// Builds the campaign request for `model_id`. The id is trimmed before use.
pub fn campaign_request<F>(config: &ClientConfig, model_id: &str) -> HttpRequest<F> {
    HttpRequest {
        path: config.campaign_path_for(model_id.trim()),
        body: RequestBody::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::file_set::CategoryFile;

    fn config(transport: TransportKind) -> ClientConfig {
        ClientConfig {
            transport,
            ..ClientConfig::default()
        }
    }

    #[test]
    fn empty_file_set_is_rejected() {
        let files: FileSet<()> = FileSet::new();
        assert_eq!(
            upload_request(&config(TransportKind::Json), &files),
            Err(UploadError::NothingToUpload)
        );
    }

    #[test]
    fn json_body_carries_the_whole_file_set() {
        let mut files: FileSet<()> = FileSet::new();
        files.set(
            Category::Interactions,
            CategoryFile::with_text("i.csv", (), "user_id,product_id\n1,P1".into()),
        );

        let request = upload_request(&config(TransportKind::Json), &files).unwrap();
        assert_eq!(request.path, "/upload_data");
        let RequestBody::Json(body) = request.body else {
            panic!("expected a JSON body");
        };
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["interactions"], "user_id,product_id\n1,P1");
        assert!(value["customers"].is_null());
        assert!(value["products"].is_null());
    }

    #[test]
    fn json_protocol_needs_decoded_text() {
        let mut files: FileSet<()> = FileSet::new();
        files.set(Category::Products, CategoryFile::without_text("p.csv", ()));
        assert_eq!(
            upload_request(&config(TransportKind::Json), &files),
            Err(UploadError::MissingText(Category::Products))
        );
    }

    #[test]
    fn multipart_body_has_one_part_per_ready_category() {
        let mut files: FileSet<&str> = FileSet::new();
        files.set(Category::Products, CategoryFile::without_text("p.csv", "P"));
        files.set(Category::Customers, CategoryFile::without_text("c.csv", "C"));

        let request = upload_request(&config(TransportKind::Multipart), &files).unwrap();
        assert_eq!(request.path, "/upload_files");
        let RequestBody::Multipart(parts) = request.body else {
            panic!("expected a multipart body");
        };
        let fields: Vec<_> = parts.iter().map(|p| (p.field_name(), p.file_name.as_str(), p.file)).collect();
        assert_eq!(fields, vec![("customers", "c.csv", "C"), ("products", "p.csv", "P")]);
    }

    #[test]
    fn campaign_request_targets_model() {
        let request: HttpRequest<()> = campaign_request(&ClientConfig::default(), " m-42 ");
        assert_eq!(request.path, "/send_rewards/m-42");
        assert_eq!(request.body, RequestBody::Empty);
    }
}
