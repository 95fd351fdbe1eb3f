//! Product version loaded from an external JSON manifest.
//!
//! The manifest is the packaging system's file, shaped as
//! `{"info": {"productVersion": "1.2.3"}}`. It is read once at backend
//! construction; a missing or malformed manifest degrades silently to an
//! empty version string, since the caller can only display it.

use std::path::Path;

use serde::Deserialize;

/// On-disk manifest format. Unknown fields are ignored so the manifest can
/// carry unrelated packaging data.
#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    info: ManifestInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ManifestInfo {
    #[serde(default)]
    product_version: String,
}

/// Loads the product version string from the manifest at `path`.
///
/// Returns `""` when the file is missing, unreadable, or malformed; the
/// failure is logged at debug level only.
#[must_use]
pub fn load_version(path: &Path) -> String {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) => {
            tracing::debug!(
                "Version manifest '{}' not readable: {error}",
                path.display()
            );
            return String::new();
        }
    };

    match serde_json::from_str::<Manifest>(&contents) {
        Ok(manifest) => manifest.info.product_version,
        Err(error) => {
            tracing::debug!("Version manifest '{}' malformed: {error}", path.display());
            String::new()
        }
    }
}
