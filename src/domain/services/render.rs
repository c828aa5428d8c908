use crate::domain::model::{JournalRecord, OutputProfile};
use crate::utils::error::Result;
use serde::Serialize;

#[derive(Serialize)]
struct SimpleRecord<'a> {
    name: &'a str,
    rating: &'a str,
}

/// Pretty JSON with a trailing newline. Non-ASCII text is written as-is.
pub fn render_json(records: &[JournalRecord], profile: OutputProfile) -> Result<String> {
    let mut json = match profile {
        OutputProfile::Full => serde_json::to_string_pretty(records)?,
        OutputProfile::Simple => {
            let simple: Vec<SimpleRecord<'_>> = records
                .iter()
                .map(|r| SimpleRecord {
                    name: &r.title,
                    rating: &r.rating,
                })
                .collect();
            serde_json::to_string_pretty(&simple)?
        }
    };
    json.push('\n');
    Ok(json)
}
