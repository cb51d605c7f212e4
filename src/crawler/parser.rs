use serde::Deserialize;
use tracing::warn;

use crate::crawler::models::RawEstate;

/// Key that precedes the embedded payload in the server-rendered page text.
const MARKER: &str = "\"realEstatesData\":{";

#[derive(Deserialize)]
struct RealEstatesData {
    #[serde(rename = "realEstates", default)]
    real_estates: Vec<RawEstate>,
}

/// Pulls the `realEstates` array out of the `realEstatesData` object embedded
/// in a listings page. Every failure mode (marker missing, truncated object,
/// bad JSON) yields an empty vec; pagination treats that as end-of-data.
pub fn extract_realestates(text: &str) -> Vec<RawEstate> {
    let Some(start) = text.find(MARKER) else {
        return Vec::new();
    };

    // Brace-depth scan from the payload's opening `{`. Braces inside string
    // literals are counted like structural ones; this payload has never
    // produced an unbalanced brace inside a string, so the scan stays
    // byte-level. A string-aware scanner would change behavior if that
    // assumption ever breaks.
    let open = start + MARKER.len() - 1;
    let mut depth = 0usize;
    let mut end = None;
    for (i, b) in text.as_bytes()[open..].iter().copied().enumerate() {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    end = Some(open + i + 1);
                    break;
                }
            }
            _ => {}
        }
    }
    let Some(end) = end else {
        // truncated response
        return Vec::new();
    };

    match serde_json::from_str::<RealEstatesData>(&text[open..end]) {
        Ok(data) => data.real_estates,
        Err(e) => {
            warn!(error = %e, "failed to parse embedded realEstatesData block");
            Vec::new()
        }
    }
}
