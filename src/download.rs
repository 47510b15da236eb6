//! Browser download of an exported file

use wasm_bindgen::JsCast;

use crate::models::ExportPayload;

/// Hand the CSV to the webview as a file download
pub fn save_export(payload: &ExportPayload) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(payload.bytes.as_slice()));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(&payload.content_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|_| "could not create file".to_string())?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(|_| "could not create link".to_string())?;

    let anchor = document
        .create_element("a")
        .map_err(|_| "could not create link".to_string())?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "could not create link".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(&payload.filename);
    anchor.click();

    let _ = web_sys::Url::revoke_object_url(&url);
    web_sys::console::log_1(&format!("[INSIGHTS] exported {}", payload.filename).into());
    Ok(())
}
