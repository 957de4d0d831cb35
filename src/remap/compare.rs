//! "Compare..." context-menu entry for two selected local files

use std::path::PathBuf;

use url::Url;

use crate::error::{OrthokeysError, Result};
use crate::services::LaunchRequest;

pub const COMPARE_ITEM_NAME: &str = "OrthokeysExtension::Compare_Files";

/// Context-menu entry offered to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenuEntry {
    pub name: String,
    pub label: String,
    pub tip: String,
}

impl ContextMenuEntry {
    fn compare() -> Self {
        Self {
            name: COMPARE_ITEM_NAME.to_string(),
            label: "Compare...".to_string(),
            tip: "Compare the two selected files".to_string(),
        }
    }
}

pub fn is_file_uri(uri: &str) -> bool {
    Url::parse(uri).map(|u| u.scheme() == "file").unwrap_or(false)
}

/// Local path of a `file:` URI, percent-decoded.
pub fn local_path(uri: &str) -> Option<PathBuf> {
    let url = Url::parse(uri).ok()?;
    if url.scheme() != "file" {
        return None;
    }
    url.to_file_path().ok()
}

/// Offered only for exactly two local files.
pub fn compare_entry(uris: &[String]) -> Option<ContextMenuEntry> {
    if uris.len() != 2 || !uris.iter().all(|u| is_file_uri(u)) {
        return None;
    }
    Some(ContextMenuEntry::compare())
}

/// Diff tool invocation for the selection, in selection order.
pub fn compare_request(diff: &str, uris: &[String]) -> Result<LaunchRequest> {
    let paths = uris
        .iter()
        .map(|u| local_path(u).ok_or_else(|| OrthokeysError::NotFileUri(u.clone())))
        .collect::<Result<Vec<_>>>()?;
    let request = LaunchRequest::from_command(diff, "diff")?;
    Ok(request.args(paths.iter().map(|p| p.to_string_lossy().into_owned())))
}
