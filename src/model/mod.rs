//! Entity records produced by extraction and owned by the aggregation store
//!
//! # Components
//!
//! - `Event` / `Matchup`: a fight card and its bouts, merged by identity
//! - `Fighter` with `FighterBio`, `FightStats`, `FightHistoryEntry`: one
//!   record per fighter, grown from up to three different page kinds
//!
//! Identity keys are derived from normalized display strings so that partial
//! observations arriving from different pages (and different workers) land
//! on the same record.

mod event;
mod fighter;

pub use event::{Event, Matchup};
pub use fighter::{FightHistoryEntry, FightStats, Fighter, FighterBio, FighterUpdate};
