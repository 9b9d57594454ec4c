//! Image URL resolution and `<img>` emission.
//!
//! The hosted platform stores uploaded images under an internal URI scheme
//! (`wix:image://v1/<fileId>/<filename>#...`). For display the file id is
//! rewritten to the public media CDN. Anything that is neither an internal
//! URI nor a recognizable absolute URL resolves to a fixed placeholder so a
//! broken reference never renders as a broken image.

use std::borrow::Cow;
use std::fmt::Write;

use crate::util::escape_html;

/// Placeholder shown for unresolvable image references and `onerror` fallback.
pub const FALLBACK_IMAGE_URL: &str = "https://static.wixstatic.com/media/placeholder_image.png";

/// Internal media URI prefix produced by the upload pipeline.
const INTERNAL_IMAGE_SCHEME: &str = "wix:image://v1/";

/// Public CDN base that serves uploaded media by file id.
const MEDIA_CDN_BASE: &str = "https://static.wixstatic.com/media/";

/// Resolve an image reference to a displayable URL.
///
/// - `wix:image://v1/<fileId>/...` → `https://static.wixstatic.com/media/<fileId>`
/// - absolute URLs (`http://`, `https://`, `//`, `data:`) pass through unchanged
/// - everything else (including an internal URI with no file id) resolves to
///   [`FALLBACK_IMAGE_URL`]
#[must_use]
pub fn resolve_image_url(url: &str) -> Cow<'_, str> {
    if let Some(rest) = url.strip_prefix(INTERNAL_IMAGE_SCHEME) {
        let file_id = rest.split(['/', '#', '?']).next().unwrap_or("");
        if file_id.is_empty() {
            Cow::Borrowed(FALLBACK_IMAGE_URL)
        } else {
            Cow::Owned(format!("{MEDIA_CDN_BASE}{file_id}"))
        }
    } else if url.starts_with("http://")
        || url.starts_with("https://")
        || url.starts_with("//")
        || url.starts_with("data:")
    {
        Cow::Borrowed(url)
    } else {
        Cow::Borrowed(FALLBACK_IMAGE_URL)
    }
}

/// Write an `<img>` tag with lazy-loading hints and placeholder fallback.
pub(crate) fn write_img(src: &str, alt: &str, title: &str, out: &mut String) {
    let resolved = resolve_image_url(src);
    let title_attr = if title.is_empty() {
        String::new()
    } else {
        format!(r#" title="{}""#, escape_html(title))
    };
    write!(
        out,
        r#"<img src="{}" alt="{}"{title_attr} loading="lazy" decoding="async" onerror="this.onerror=null;this.src='{FALLBACK_IMAGE_URL}'">"#,
        escape_html(&resolved),
        escape_html(alt)
    )
    .unwrap();
}
