use wasm_bindgen::JsCast;

pub fn trigger_csv_download(filename: &str, csv_data: &str) -> Result<(), String> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(csv_data));
    let blob = web_sys::Blob::new_with_str_sequence(&array)
        .map_err(|_| "Failed to create blob".to_string())?;

    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|_| "Failed to create object URL".to_string())?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("No document")?;
    let element = document
        .create_element("a")
        .map_err(|_| "Failed to create link".to_string())?;
    let a = element
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "Failed to cast anchor".to_string())?;
    a.set_href(&url);
    a.set_download(filename);
    a.style().set_property("display", "none").ok();
    document
        .body()
        .ok_or("No body")?
        .append_child(&a)
        .map_err(|_| "Append failed".to_string())?;
    a.click();
    a.remove();
    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

/// Opens a fetched PDF (invoice download endpoint) in a new tab via an
/// object URL, mirroring how CSV leaves through a synthetic anchor.
pub fn open_pdf_in_new_tab(bytes: &[u8]) -> Result<(), String> {
    let buffer = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&buffer.buffer());

    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/pdf");
    let blob = web_sys::Blob::new_with_buffer_source_sequence_and_options(&parts, &options)
        .map_err(|_| "Failed to create blob".to_string())?;

    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|_| "Failed to create object URL".to_string())?;

    let window = web_sys::window().ok_or("No window")?;
    window
        .open_with_url_and_target(&url, "_blank")
        .map_err(|_| "Failed to open window".to_string())?;
    Ok(())
}
