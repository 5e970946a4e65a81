//! Object key and URL construction.

use uuid::Uuid;

/// Segment used when a filename sanitizes to nothing.
const FALLBACK_NAME: &str = "image";

/// Build a unique object key of the form `<prefix>/<uuid>_<name>`.
pub fn object_key(prefix: &str, original_name: &str) -> String {
    let name = sanitize_file_name(original_name);
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        format!("{}_{name}", Uuid::new_v4())
    } else {
        format!("{prefix}/{}_{name}", Uuid::new_v4())
    }
}

/// Reduce a client-supplied filename to a safe key segment.
///
/// Keeps only the last path component and replaces anything outside
/// `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_file_name(original: &str) -> String {
    let last = original.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = last
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches(['.', '_']).is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        cleaned
    }
}

/// Public URL of `key`: under `base_url` when one is configured, otherwise
/// the virtual-hosted S3 address of the bucket.
pub fn public_url(base_url: Option<&str>, bucket: &str, region: &str, key: &str) -> String {
    match base_url {
        Some(base) => format!("{}/{key}", base.trim_end_matches('/')),
        None => format!("https://{bucket}.s3.{region}.amazonaws.com/{key}"),
    }
}
