//! Browser-side utilities for the recommender page.
//!
//! - **User feedback**: short-lived toast notifications.
//! - **Downloads**: turns an exported string into a file the browser saves,
//!   through a `Blob` object URL and a temporary anchor.
//! - **Formatting**: thousands separators for the counters in the analytics
//!   panel.

use num_format::{Locale, ToFormattedString};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

const TOAST_MILLIS: u32 = 3000;

/// Displays a temporary notification at the bottom of the screen.
///
/// The toast is a `div.toast` (styled in `static/style.css`) that removes
/// itself after three seconds. Used for upload, export and campaign outcomes.
pub fn show_toast(message: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
        return;
    };
    toast.set_class_name("toast");
    toast.set_text_content(Some(message));
    if body.append_child(&toast).is_ok() {
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_MILLIS).await;
            toast.remove();
        });
    }
}

/// Saves `contents` as `file_name` through the browser's download flow.
///
/// # Errors
/// Any DOM call that fails (no `document`, blob creation, object URL) is
/// returned as the underlying `JsValue`.
pub fn download_text(file_name: &str, mime: &str, contents: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::of1(&JsValue::from_str(contents));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document available"))?;
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.style().set_property("display", "none")?;

    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no document body"))?;
    body.append_child(&anchor)?;
    anchor.click();
    body.remove_child(&anchor)?;
    Url::revoke_object_url(&url)
}

/// `12345` -> `"12,345"`.
pub fn format_count(value: u64) -> String {
    value.to_formatted_string(&Locale::en)
}

/// Renders a JS error for a toast.
pub fn js_error_text(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}
