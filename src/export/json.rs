//! Hierarchical JSON artifact
//!
//! Unlike the flattened CSVs, the JSON keeps the entity structure: each
//! event owns its matchups, each fighter owns its bio and row sequences.
//! Field names follow the model's serde derivations.

use crate::export::ExportResult;
use crate::model::{Event, Fighter};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Serialize)]
struct ExportDocument<'a> {
    events: &'a [Event],
    fighters: &'a [Fighter],
}

/// Writes the combined hierarchical artifact
pub fn write_json(events: &[Event], fighters: &[Fighter], path: &Path) -> ExportResult<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &ExportDocument { events, fighters })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FighterBio, Matchup};
    use tempfile::tempdir;

    #[test]
    fn test_json_structure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");

        let events = vec![Event {
            name: "UFC 300".to_string(),
            date: "Apr 13, 2024".to_string(),
            location: "Las Vegas".to_string(),
            matchups: vec![Matchup::new(
                "A B".into(),
                "C D".into(),
                "FinalDec".into(),
                "A B".into(),
            )
            .unwrap()],
        }];
        let fighters = vec![Fighter {
            name: "A B".to_string(),
            bio: FighterBio {
                country: "USA".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }];

        write_json(&events, &fighters, &path).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["events"][0]["name"], "UFC 300");
        assert_eq!(parsed["events"][0]["matchups"][0]["winner"], "A B");
        assert_eq!(parsed["fighters"][0]["bio"]["country"], "USA");
        assert!(parsed["fighters"][0]["stats"].as_array().unwrap().is_empty());
    }
}
