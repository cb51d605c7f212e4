use std::path::Path;

use anyhow::Result;
use tokio::fs;

use crate::crawler::models::RawEstate;

/// Writes the full record sequence as indented JSON. The write goes through
/// a sibling temp file and a rename, so a crash mid-write never leaves a
/// half-written document at the target path.
pub async fn save_to_json(estates: &[RawEstate], path: &Path) -> Result<()> {
    let body = serde_json::to_vec_pretty(estates)?;

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, &body).await?;
    fs::rename(&tmp, path).await?;

    Ok(())
}
