//! CSV artifacts: events per matchup and fighters flattened
//!
//! The fighter flattening is positional on purpose: stats row i and history
//! row i land on the same output row purely by index, not by any date or
//! opponent join. The source tables give no reliable key to join on, so the
//! export preserves the independent row orders as-is.

use crate::export::ExportResult;
use crate::model::{Event, Fighter};
use std::path::Path;

const EVENT_HEADER: &[&str] = &[
    "Event Name",
    "Event Date",
    "Event Location",
    "Fighter 1",
    "Fighter 2",
    "Result",
    "Winner",
];

const FIGHTER_HEADER: &[&str] = &[
    "Name",
    "Country",
    "Weight Class",
    "Height/Weight",
    "Birthdate",
    "Team",
    "Nickname",
    "Stance",
    "Reach",
    "Stats_Date",
    "Stats_Opponent",
    "Stats_Event",
    "Stats_Result",
    "Stats_SDBL_A",
    "Stats_SDHL_A",
    "Stats_SDLL_A",
    "Stats_TSL",
    "Stats_TSA",
    "Stats_SSL",
    "Stats_SSA",
    "Stats_TSL_TSA",
    "Stats_KD",
    "Stats_BodyPerc",
    "Stats_HeadPerc",
    "Stats_LegPerc",
    "History_Date",
    "History_Opponent",
    "History_Result",
    "History_Decision",
    "History_Round",
    "History_Time",
    "History_Event",
];

const STATS_FIELDS: usize = 16;
const HISTORY_FIELDS: usize = 7;

/// Writes one CSV row per matchup, with its event fields repeated
pub fn write_events_csv(events: &[Event], path: &Path) -> ExportResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(EVENT_HEADER)?;

    for event in events {
        for matchup in &event.matchups {
            writer.write_record([
                event.name.as_str(),
                event.date.as_str(),
                event.location.as_str(),
                matchup.fighter1.as_str(),
                matchup.fighter2.as_str(),
                matchup.result.as_str(),
                matchup.winner.as_str(),
            ])?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Writes the flattened per-fighter rows
pub fn write_fighters_csv(fighters: &[Fighter], path: &Path) -> ExportResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(FIGHTER_HEADER)?;

    for fighter in fighters {
        for row in flatten_fighter(fighter) {
            writer.write_record(&row)?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Flattens one fighter into its export rows
///
/// Row count is max(stats, history) with a floor of one, so a fighter known
/// only by bio still exports. Bio fields repeat identically on every row;
/// a side past its own length contributes blank fields.
pub fn flatten_fighter(fighter: &Fighter) -> Vec<Vec<String>> {
    let rows = fighter.stats.len().max(fighter.history.len()).max(1);
    let mut out = Vec::with_capacity(rows);

    for i in 0..rows {
        let mut row = vec![
            fighter.name.clone(),
            fighter.bio.country.clone(),
            fighter.bio.weight_class.clone(),
            fighter.bio.height_weight.clone(),
            fighter.bio.birthdate.clone(),
            fighter.bio.team.clone(),
            fighter.bio.nickname.clone(),
            fighter.bio.stance.clone(),
            fighter.bio.reach.clone(),
        ];

        match fighter.stats.get(i) {
            Some(stats) => row.extend([
                stats.date.clone(),
                stats.opponent.clone(),
                stats.event.clone(),
                stats.result.clone(),
                stats.sdbl_a.clone(),
                stats.sdhl_a.clone(),
                stats.sdll_a.clone(),
                stats.tsl.clone(),
                stats.tsa.clone(),
                stats.ssl.clone(),
                stats.ssa.clone(),
                stats.tsl_tsa.clone(),
                stats.kd.clone(),
                stats.body_pct.clone(),
                stats.head_pct.clone(),
                stats.leg_pct.clone(),
            ]),
            None => row.extend(vec![String::new(); STATS_FIELDS]),
        }

        match fighter.history.get(i) {
            Some(entry) => row.extend([
                entry.date.clone(),
                entry.opponent.clone(),
                entry.result.clone(),
                entry.decision.clone(),
                entry.round.clone(),
                entry.time.clone(),
                entry.event.clone(),
            ]),
            None => row.extend(vec![String::new(); HISTORY_FIELDS]),
        }

        out.push(row);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FightHistoryEntry, FightStats, FighterBio, Matchup};
    use tempfile::tempdir;

    fn fighter_with(stats: usize, history: usize) -> Fighter {
        Fighter {
            name: "Jon Jones".to_string(),
            bio: FighterBio {
                country: "USA".to_string(),
                nickname: "Bones".to_string(),
                ..Default::default()
            },
            stats: (0..stats)
                .map(|i| FightStats::from_cells(&[format!("s{}", i)]))
                .collect(),
            history: (0..history)
                .map(|i| FightHistoryEntry::from_cells(&[format!("h{}", i)]))
                .collect(),
        }
    }

    #[test]
    fn test_flatten_row_count_is_max_of_sides() {
        let rows = flatten_fighter(&fighter_with(3, 1));
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_flatten_pads_short_side_with_blanks() {
        let rows = flatten_fighter(&fighter_with(3, 1));

        // row 0 carries the single history entry
        assert_eq!(rows[0][25], "h0");
        // rows past the history length have blank history fields
        for row in &rows[1..] {
            assert!(row[25..].iter().all(|f| f.is_empty()));
        }
    }

    #[test]
    fn test_flatten_repeats_bio_on_every_row() {
        let rows = flatten_fighter(&fighter_with(3, 1));
        for row in &rows {
            assert_eq!(row[0], "Jon Jones");
            assert_eq!(row[1], "USA");
            assert_eq!(row[6], "Bones");
        }
    }

    #[test]
    fn test_flatten_bio_only_fighter_exports_one_row() {
        let rows = flatten_fighter(&fighter_with(0, 0));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "Jon Jones");
        assert!(rows[0][9..].iter().all(|f| f.is_empty()));
    }

    #[test]
    fn test_flatten_row_width_matches_header() {
        let rows = flatten_fighter(&fighter_with(2, 2));
        for row in &rows {
            assert_eq!(row.len(), FIGHTER_HEADER.len());
        }
    }

    #[test]
    fn test_write_events_csv_row_per_matchup() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("events.csv");

        let events = vec![Event {
            name: "UFC 300".to_string(),
            date: "Apr 13, 2024".to_string(),
            location: "Las Vegas".to_string(),
            matchups: vec![
                Matchup::new("A B".into(), "C D".into(), "FinalDec".into(), "A B".into())
                    .unwrap(),
                Matchup::new("E F".into(), "G H".into(), String::new(), String::new())
                    .unwrap(),
            ],
        }];

        write_events_csv(&events, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Event Name,Event Date,Event Location,Fighter 1,Fighter 2,Result,Winner"
        );
        assert_eq!(lines[1], "UFC 300,\"Apr 13, 2024\",Las Vegas,A B,C D,FinalDec,A B");
        assert_eq!(lines[2], "UFC 300,\"Apr 13, 2024\",Las Vegas,E F,G H,,");
    }

    #[test]
    fn test_write_fighters_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fighters.csv");

        write_fighters_csv(&[fighter_with(1, 0)], &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Name,Country,"));
        assert!(lines[1].starts_with("Jon Jones,USA,"));
    }
}
