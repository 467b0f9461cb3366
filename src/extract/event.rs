//! Event-detail extraction
//!
//! A fight-center page renders one card wrapper per bout, each carrying the
//! event note, the two competitor headings, and the post-fight result cell.
//! Every card becomes a partial `Event` holding a single matchup; the
//! aggregation store merges cards of the same (name, date) into one event.

use crate::extract::clean::{clean_event_date, clean_location, clean_name, clean_result};
use crate::extract::{text_of, Rules};
use crate::config::WinnerSide;
use crate::model::{Event, Matchup};
use scraper::{ElementRef, Html};

/// Extracts one partial event per card wrapper found in the document
pub(crate) fn extract_events(document: &Html, rules: &Rules) -> Vec<Event> {
    let mut events = Vec::new();

    for card in document.root_element().select(&rules.event.card) {
        let name = text_of(card, &rules.event.name);
        let fighter1 = clean_name(&text_of(card, &rules.event.fighter1));
        let fighter2 = clean_name(&text_of(card, &rules.event.fighter2));
        let result = clean_result(&text_of(card, &rules.event.result));
        let date = clean_event_date(&text_of(card, &rules.event.date));
        let location = clean_location(
            &text_of(card, &rules.event.location),
            &rules.broadcast_keywords,
        );

        let winner = infer_winner(card, &fighter1, &fighter2, &result, rules);

        let Some(matchup) = Matchup::new(fighter1, fighter2, result, winner) else {
            tracing::debug!("Skipping card without two distinct fighters");
            continue;
        };

        events.push(Event {
            name,
            date,
            location,
            matchups: vec![matchup],
        });
    }

    events
}

/// Infers the winner of a decided bout from the card's marker element
///
/// The marker's visual meaning is asserted, not documented, so which corner
/// it awards comes from configuration. Draw and no-contest results collapse
/// to the shared "Draw/No Contest" value; undecided bouts have no winner.
fn infer_winner(
    card: ElementRef<'_>,
    fighter1: &str,
    fighter2: &str,
    result: &str,
    rules: &Rules,
) -> String {
    if result.is_empty() {
        return String::new();
    }

    let lower = result.to_lowercase();
    if lower.contains("draw") || lower.contains("no contest") {
        return "Draw/No Contest".to_string();
    }

    let marked = card.select(&rules.event.winner_marker).next().is_some();
    let first_wins = match rules.event.winner_when_marked {
        WinnerSide::Fighter1 => marked,
        WinnerSide::Fighter2 => !marked,
    };

    if first_wins {
        fighter1.to_string()
    } else {
        fighter2.to_string()
    }
}
