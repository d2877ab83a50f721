//! Formatting and browser helpers for the dynamic form.

use num_format::{Locale, ToFormattedString};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{BlobPropertyBag, HtmlAnchorElement, Url};

/// Formats an amount with Spanish grouping and two decimals, e.g.
/// `1234.5` as `1.234,50`. Amounts too large to show in cents read
/// `fuera de rango`.
pub fn format_amount(value: f64) -> String {
    let cents = (value * 100.0).round();
    if !cents.is_finite() || cents.abs() >= i64::MAX as f64 {
        return "fuera de rango".to_string();
    }
    let cents = cents as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!(
        "{}{},{:02}",
        sign,
        (cents / 100).to_formatted_string(&Locale::es),
        cents % 100
    )
}

/// Offers `contents` to the user as a file download.
///
/// Builds a `Blob`, points a temporary `<a download>` at its object URL and
/// clicks it.
pub fn download_text(filename: &str, mime: &str, contents: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::of1(&JsValue::from_str(contents));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into()
        .map_err(JsValue::from)?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    Url::revoke_object_url(&url)
}
