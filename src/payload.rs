// The JSON artifact is the only contract between the two binaries.
use crate::model::{PayloadError, ReportPayload};
use std::fs;
use std::path::Path;

/// Writes the payload next to its destination and renames it into place so
/// `publish` never sees a half-written file.
pub fn save_payload(path: &Path, payload: &ReportPayload) -> Result<(), PayloadError> {
    let json = serde_json::to_string_pretty(payload)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_payload(path: &Path) -> Result<ReportPayload, PayloadError> {
    let content = fs::read_to_string(path)?;
    let payload = serde_json::from_str(&content)?;
    Ok(payload)
}
