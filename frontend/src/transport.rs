//! `gloo-net` implementation of the client transport.
//!
//! JSON bodies are sent with an explicit `Content-Type`. Multipart bodies are
//! built as a `FormData` and handed to `fetch` untouched so the browser sets
//! the content type and boundary itself.

use common::config::ClientConfig;
use common::error::TransportError;
use common::requests::{HttpRequest, RequestBody};
use common::transport::{HttpReply, Transport};
use gloo_net::http::Request;
use web_sys::FormData;

#[derive(Clone, Debug, PartialEq)]
pub struct BrowserTransport {
    config: ClientConfig,
}

impl BrowserTransport {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }
}

impl Transport for BrowserTransport {
    type File = web_sys::File;

    async fn send(&self, request: HttpRequest<web_sys::File>) -> Result<HttpReply, TransportError> {
        let url = self.config.url(&request.path);
        let builder = Request::post(&url);

        let prepared = match request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(json) => builder.header("Content-Type", "application/json").body(json),
            RequestBody::Multipart(parts) => {
                let form = FormData::new().map_err(js_error)?;
                for part in &parts {
                    form.append_with_blob_and_filename(part.field_name(), &part.file, &part.file_name)
                        .map_err(js_error)?;
                }
                builder.body(form)
            }
        }
        .map_err(|e| TransportError::new(e.to_string()))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;

        let status = response.status();
        // Body text is best effort: an unreadable body still yields the status.
        let body = response.text().await.unwrap_or_default();
        Ok(HttpReply { status, body })
    }
}

fn js_error(err: wasm_bindgen::JsValue) -> TransportError {
    TransportError::new(
        err.as_string()
            .unwrap_or_else(|| format!("{:?}", err)),
    )
}
