//! MIME type selection for downloaded icons.

/// MIME type used when neither the response nor the URL says otherwise.
pub const FALLBACK_MIME: &str = "image/x-icon";

/// Picks the MIME type to store for an icon fetched from `icon_url`.
///
/// A declared `Content-Type` wins when it is an `image/*` type (parameters
/// such as `; charset=` are dropped). Otherwise the type is inferred from the
/// extension of the URL path.
pub fn icon_mime_type(declared: Option<&str>, icon_url: &str) -> String {
    if let Some(essence) = declared.map(media_type_essence) {
        if essence.starts_with("image/") {
            return essence;
        }
    }
    mime_from_extension(icon_url).to_string()
}

/// `"Image/PNG; charset=binary"` -> `"image/png"`.
fn media_type_essence(value: &str) -> String {
    value
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

/// Maps the path extension of `icon_url` to an image MIME type.
pub fn mime_from_extension(icon_url: &str) -> &'static str {
    let path = match url::Url::parse(icon_url) {
        Ok(u) => u.path().to_ascii_lowercase(),
        Err(_) => icon_url
            .split(['?', '#'])
            .next()
            .unwrap_or("")
            .to_ascii_lowercase(),
    };
    let ext = match path.rsplit_once('.') {
        Some((_, ext)) if !ext.contains('/') => ext,
        _ => return FALLBACK_MIME,
    };
    match ext {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        _ => FALLBACK_MIME,
    }
}
