use serde::Serialize;

/// Setter signature used by the bio field table
pub(crate) type BioFieldSetter = for<'a> fn(&'a mut FighterBio) -> &'a mut String;

fn country(bio: &mut FighterBio) -> &mut String {
    &mut bio.country
}
fn weight_class(bio: &mut FighterBio) -> &mut String {
    &mut bio.weight_class
}
fn height_weight(bio: &mut FighterBio) -> &mut String {
    &mut bio.height_weight
}
fn birthdate(bio: &mut FighterBio) -> &mut String {
    &mut bio.birthdate
}
fn team(bio: &mut FighterBio) -> &mut String {
    &mut bio.team
}
fn nickname(bio: &mut FighterBio) -> &mut String {
    &mut bio.nickname
}
fn stance(bio: &mut FighterBio) -> &mut String {
    &mut bio.stance
}
fn reach(bio: &mut FighterBio) -> &mut String {
    &mut bio.reach
}

/// Field key to setter mapping; the config's `bio-labels` table routes page
/// label text onto these keys, so a new label is a config edit.
pub(crate) const BIO_FIELD_TABLE: &[(&str, BioFieldSetter)] = &[
    ("country", country),
    ("weight_class", weight_class),
    ("height_weight", height_weight),
    ("birthdate", birthdate),
    ("team", team),
    ("nickname", nickname),
    ("stance", stance),
    ("reach", reach),
];

/// Scalar profile fields scraped from a fighter bio page
///
/// Each field is independently settable and mutation-order-insensitive:
/// the last non-empty write per field wins, and empty values never clobber
/// stored ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FighterBio {
    pub country: String,
    pub weight_class: String,
    pub height_weight: String,
    pub birthdate: String,
    pub team: String,
    pub nickname: String,
    pub stance: String,
    pub reach: String,
}

impl FighterBio {
    /// Returns whether `key` names a known bio field
    pub fn is_field_key(key: &str) -> bool {
        BIO_FIELD_TABLE.iter().any(|(k, _)| *k == key)
    }

    /// Mutable access to a field by key
    pub fn field_mut(&mut self, key: &str) -> Option<&mut String> {
        BIO_FIELD_TABLE
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, setter)| setter(self))
    }

    /// Sets a field by key; a value only lands if non-empty
    pub fn set_field(&mut self, key: &str, value: &str) {
        if value.trim().is_empty() {
            return;
        }
        if let Some(slot) = self.field_mut(key) {
            *slot = value.trim().to_string();
        }
    }

    /// Folds another partial bio into this one, field by field
    pub fn absorb(&mut self, incoming: &FighterBio) {
        let mut src = incoming.clone();
        for (_, setter) in BIO_FIELD_TABLE {
            let value = setter(&mut src).clone();
            if !value.is_empty() {
                *setter(self) = value;
            }
        }
    }
}

/// One row of the per-fight statistics table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FightStats {
    pub date: String,
    pub opponent: String,
    pub event: String,
    pub result: String,
    pub sdbl_a: String,
    pub sdhl_a: String,
    pub sdll_a: String,
    pub tsl: String,
    pub tsa: String,
    pub ssl: String,
    pub ssa: String,
    pub tsl_tsa: String,
    pub kd: String,
    pub body_pct: String,
    pub head_pct: String,
    pub leg_pct: String,
}

impl FightStats {
    /// Builds a row from positional cells; missing cells become empty fields
    pub fn from_cells(cells: &[String]) -> Self {
        let cell = |i: usize| cells.get(i).cloned().unwrap_or_default();
        Self {
            date: cell(0),
            opponent: cell(1),
            event: cell(2),
            result: cell(3),
            sdbl_a: cell(4),
            sdhl_a: cell(5),
            sdll_a: cell(6),
            tsl: cell(7),
            tsa: cell(8),
            ssl: cell(9),
            ssa: cell(10),
            tsl_tsa: cell(11),
            kd: cell(12),
            body_pct: cell(13),
            head_pct: cell(14),
            leg_pct: cell(15),
        }
    }
}

/// One row of the fight history table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FightHistoryEntry {
    pub date: String,
    pub opponent: String,
    pub result: String,
    pub decision: String,
    pub round: String,
    pub time: String,
    pub event: String,
}

impl FightHistoryEntry {
    /// Builds a row from positional cells; missing cells become empty fields
    pub fn from_cells(cells: &[String]) -> Self {
        let cell = |i: usize| cells.get(i).cloned().unwrap_or_default();
        Self {
            date: cell(0),
            opponent: cell(1),
            result: cell(2),
            decision: cell(3),
            round: cell(4),
            time: cell(5),
            event: cell(6),
        }
    }
}

/// A fighter record grown from bio, stats, and history pages
///
/// Rows keep the order their source tables listed them in; the pages are
/// assumed chronological and no re-sorting happens here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Fighter {
    pub name: String,
    pub bio: FighterBio,
    pub stats: Vec<FightStats>,
    pub history: Vec<FightHistoryEntry>,
}

impl Fighter {
    /// Identity key for a cleaned display name
    pub fn identity_key(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Applies a partial observation from one fighter page
    pub fn apply(&mut self, update: FighterUpdate) {
        if self.name.is_empty() {
            self.name = update.name;
        }
        if let Some(bio) = update.bio {
            self.bio.absorb(&bio);
        }
        self.stats.extend(update.stats);
        self.history.extend(update.history);
    }
}

/// A partial fighter observation produced by one page extraction
#[derive(Debug, Clone, Default)]
pub struct FighterUpdate {
    pub name: String,
    pub bio: Option<FighterBio>,
    pub stats: Vec<FightStats>,
    pub history: Vec<FightHistoryEntry>,
}
