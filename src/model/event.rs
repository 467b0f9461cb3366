use serde::Serialize;

/// A single bout on a fight card
///
/// Identity is the unordered pair of cleaned fighter names, so "A vs B" and
/// "B vs A" observed on mirrored pages refer to the same matchup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Matchup {
    pub fighter1: String,
    pub fighter2: String,
    /// Free text; empty for bouts that have not happened yet
    pub result: String,
    /// One of fighter1, fighter2, "Draw/No Contest", or empty when the
    /// result is unknown
    pub winner: String,
}

impl Matchup {
    /// Builds a matchup, rejecting self-pairings and unnamed corners
    pub fn new(fighter1: String, fighter2: String, result: String, winner: String) -> Option<Self> {
        if fighter1.trim().is_empty() || fighter2.trim().is_empty() {
            return None;
        }
        if fighter1.trim().eq_ignore_ascii_case(fighter2.trim()) {
            return None;
        }
        Some(Self {
            fighter1,
            fighter2,
            result,
            winner,
        })
    }

    /// Identity key: the unordered, case-folded fighter pair
    pub fn key(&self) -> String {
        let a = self.fighter1.trim().to_lowercase();
        let b = self.fighter2.trim().to_lowercase();
        if a <= b {
            format!("{}|{}", a, b)
        } else {
            format!("{}|{}", b, a)
        }
    }

    /// Merges another observation of the same matchup into this one
    ///
    /// A settled result supersedes an empty placeholder; an empty result
    /// never overwrites a stored non-empty one. The winner travels with the
    /// result that carried it.
    pub fn merge(&mut self, incoming: Matchup) {
        if self.result.is_empty() && !incoming.result.is_empty() {
            self.result = incoming.result;
            self.winner = incoming.winner;
        }
    }
}

/// A fight card: name, date, venue, and the ordered list of bouts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Event {
    pub name: String,
    pub date: String,
    pub location: String,
    pub matchups: Vec<Matchup>,
}

impl Event {
    /// Identity key for a (name, date) pair
    pub fn identity_key(name: &str, date: &str) -> String {
        format!("{}|{}", name.trim().to_lowercase(), date.trim().to_lowercase())
    }

    /// Identity key of this event
    pub fn key(&self) -> String {
        Self::identity_key(&self.name, &self.date)
    }

    /// Merges a partial observation of the same event into this one
    ///
    /// Scalar fields fill empty slots only; matchups merge by identity,
    /// preserving first-seen order.
    pub fn merge(&mut self, incoming: Event) {
        if self.name.is_empty() && !incoming.name.is_empty() {
            self.name = incoming.name;
        }
        if self.date.is_empty() && !incoming.date.is_empty() {
            self.date = incoming.date;
        }
        if self.location.is_empty() && !incoming.location.is_empty() {
            self.location = incoming.location;
        }
        for matchup in incoming.matchups {
            self.merge_matchup(matchup);
        }
    }

    /// Inserts a matchup or merges it into the existing one with the same
    /// identity
    pub fn merge_matchup(&mut self, incoming: Matchup) {
        let key = incoming.key();
        if let Some(existing) = self.matchups.iter_mut().find(|m| m.key() == key) {
            existing.merge(incoming);
        } else {
            self.matchups.push(incoming);
        }
    }
}
