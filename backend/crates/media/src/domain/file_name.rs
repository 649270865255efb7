//! Generated File Names
//!
//! `<field>-<unix millis>-<random 0..1e9><.ext>`. The random part comes from
//! the OS generator on every call, so concurrent writers need no shared state.

use chrono::Utc;
use platform::crypto::random_below;

use super::policy::extension_of;

/// Maximum stored length of a client-supplied file name
const MAX_FILENAME_LENGTH: usize = 255;

/// Extensions kept verbatim from the original file name when they agree
/// with the declared content type
const KNOWN_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "avif"];

/// Build a fresh storage name for an upload
pub fn generate(field_name: &str, original_name: &str, content_type: Option<&str>) -> String {
    let field = sanitize_component(field_name);
    let field = if field.is_empty() { "file".to_string() } else { field };

    let ext = pick_extension(original_name, content_type)
        .map(|e| format!(".{e}"))
        .unwrap_or_default();

    format!(
        "{}-{}-{}{}",
        field,
        Utc::now().timestamp_millis(),
        random_below(1_000_000_000),
        ext
    )
}

fn pick_extension(original_name: &str, content_type: Option<&str>) -> Option<String> {
    let original = extension_of(original_name).filter(|e| KNOWN_EXTENSIONS.contains(&e.as_str()));

    let Some(content_type) = content_type else {
        return original;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    // The content type was validated, the file name was not
    if let Some(ext) = original {
        if mime_guess::from_ext(&ext)
            .iter()
            .any(|mime| mime.essence_str() == essence)
        {
            return Some(ext);
        }
    }

    let ext = match essence.as_str() {
        "image/jpeg" | "image/pjpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        other => return mime_guess::get_mime_extensions_str(other)?.first().map(|e| e.to_string()),
    };
    Some(ext.to_string())
}

fn sanitize_component(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .take(64)
        .collect()
}

/// Make a client-supplied file name safe to echo back and log
///
/// Drops directory components, keeps `[A-Za-z0-9._-]`, strips leading dots
/// and collapses repeated dots.
pub fn sanitize_original(raw: &str) -> String {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or(raw);

    let filtered: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_' || *c == '.')
        .collect();

    let mut out = String::with_capacity(filtered.len());
    for c in filtered.trim_start_matches('.').chars() {
        if c == '.' && out.ends_with('.') {
            continue;
        }
        out.push(c);
    }

    if out.len() > MAX_FILENAME_LENGTH {
        match out.rfind('.') {
            Some(pos) if out.len() - pos < MAX_FILENAME_LENGTH => {
                let ext = out[pos..].to_string();
                out.truncate(MAX_FILENAME_LENGTH - ext.len());
                out.push_str(&ext);
            }
            _ => out.truncate(MAX_FILENAME_LENGTH),
        }
    }

    if out.is_empty() {
        "upload".to_string()
    } else {
        out
    }
}
