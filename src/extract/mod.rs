//! Page classification and record extraction
//!
//! Extraction is split from crawling: every function here is pure over a
//! parsed document plus the compiled rule set, so layouts can be unit
//! tested from string literals without a network in sight.
//!
//! # Components
//!
//! - `PageKind` and `classify`: which extractions apply to a fetched page
//! - `Rules`: configuration selectors compiled once at startup
//! - `extract_page`: the router invoking one extractor per applicable kind
//! - `clean`: text canonicalization rules shared by the extractors

mod clean;
mod event;
mod fighter;
mod links;

pub use clean::{clean_event_date, clean_location, clean_name, clean_result};
pub use links::discover_links;

use crate::config::{Config, WinnerSide};
use crate::model::{Event, FighterBio, FighterUpdate};
use crate::{ConfigError, ConfigResult};
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use std::fmt;
use url::Url;

/// The page kinds a fetched document can classify as
///
/// Classification yields a *set* of kinds, since one document can carry
/// markers for several (a fighter page with both a bio block and a history
/// table). `Unknown` pages are never extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageKind {
    EventListing,
    EventDetail,
    FighterBio,
    FighterStats,
    FighterHistory,
    Unknown,
}

impl PageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EventListing => "event-listing",
            Self::EventDetail => "event-detail",
            Self::FighterBio => "fighter-bio",
            Self::FighterStats => "fighter-stats",
            Self::FighterHistory => "fighter-history",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compiled extraction rule set
///
/// All selectors come from configuration; compiling them here means a typo
/// is a startup failure, never a mid-crawl panic.
#[derive(Debug, Clone)]
pub struct Rules {
    pub(crate) url_rules: Vec<(String, Vec<PageKind>)>,
    pub(crate) markers: Vec<(Selector, PageKind)>,
    pub(crate) event: EventRules,
    pub(crate) fighter: FighterRules,
    /// Page label text mapped to the bio field key it populates
    pub(crate) bio_labels: Vec<(String, String)>,
    pub(crate) broadcast_keywords: Vec<String>,
    pub(crate) links: Selector,
}

#[derive(Debug, Clone)]
pub(crate) struct EventRules {
    pub card: Selector,
    pub name: Selector,
    pub fighter1: Selector,
    pub fighter2: Selector,
    pub result: Selector,
    pub date: Selector,
    pub location: Selector,
    pub winner_marker: Selector,
    pub winner_when_marked: WinnerSide,
}

#[derive(Debug, Clone)]
pub(crate) struct FighterRules {
    pub name: Selector,
    pub bio_item: Selector,
    pub bio_label: Selector,
    pub bio_value: Selector,
    pub stats_row: Selector,
    pub history_table: Selector,
    pub history_row: Selector,
    pub cell: Selector,
}

impl Rules {
    /// Compiles every selector and validates the bio label mapping
    pub fn compile(config: &Config) -> ConfigResult<Self> {
        let classifier = &config.classifier;
        let extract = &config.extract;

        let mut markers = Vec::with_capacity(classifier.markers.len());
        for rule in &classifier.markers {
            markers.push((parse_selector(&rule.selector)?, rule.kind));
        }

        let mut bio_labels = Vec::with_capacity(extract.bio_labels.len());
        for (label, field_key) in &extract.bio_labels {
            if !FighterBio::is_field_key(field_key) {
                return Err(ConfigError::UnknownBioField(field_key.clone()));
            }
            bio_labels.push((label.clone(), field_key.clone()));
        }

        Ok(Self {
            url_rules: classifier
                .url_rules
                .iter()
                .map(|r| (r.contains.clone(), r.kinds.clone()))
                .collect(),
            markers,
            event: EventRules {
                card: parse_selector(&extract.event.card)?,
                name: parse_selector(&extract.event.name)?,
                fighter1: parse_selector(&extract.event.fighter1)?,
                fighter2: parse_selector(&extract.event.fighter2)?,
                result: parse_selector(&extract.event.result)?,
                date: parse_selector(&extract.event.date)?,
                location: parse_selector(&extract.event.location)?,
                winner_marker: parse_selector(&extract.event.winner_marker)?,
                winner_when_marked: extract.event.winner_when_marked,
            },
            fighter: FighterRules {
                name: parse_selector(&extract.fighter.name)?,
                bio_item: parse_selector(&extract.fighter.bio_item)?,
                bio_label: parse_selector(&extract.fighter.bio_label)?,
                bio_value: parse_selector(&extract.fighter.bio_value)?,
                stats_row: parse_selector(&extract.fighter.stats_row)?,
                history_table: parse_selector(&extract.fighter.history_table)?,
                history_row: parse_selector(&extract.fighter.history_row)?,
                cell: parse_selector(&extract.fighter.cell)?,
            },
            bio_labels,
            broadcast_keywords: extract.broadcast_keywords.clone(),
            links: parse_selector("a[href]")?,
        })
    }
}

fn parse_selector(selector: &str) -> ConfigResult<Selector> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Classifies a fetched document into its set of applicable page kinds
///
/// URL substring rules run first; marker selectors then add any kind whose
/// marker element is present, so mixed-content pages classify as several
/// kinds. An empty match set classifies as `[Unknown]`.
pub fn classify(url: &str, document: &Html, rules: &Rules) -> Vec<PageKind> {
    let mut kinds: Vec<PageKind> = Vec::new();

    for (pattern, rule_kinds) in &rules.url_rules {
        if url.contains(pattern.as_str()) {
            for kind in rule_kinds {
                if !kinds.contains(kind) {
                    kinds.push(*kind);
                }
            }
        }
    }

    for (selector, kind) in &rules.markers {
        if document.select(selector).next().is_some() && !kinds.contains(kind) {
            kinds.push(*kind);
        }
    }

    if kinds.is_empty() {
        kinds.push(PageKind::Unknown);
    }
    kinds
}

/// Everything one page contributed: entity fragments plus outbound URLs
#[derive(Debug, Default)]
pub struct PageExtraction {
    pub events: Vec<Event>,
    pub fighter: Option<FighterUpdate>,
    pub links: Vec<String>,
}

/// Runs every applicable extractor over one fetched document
///
/// Absent elements yield empty fields, never errors. Link discovery runs
/// for every page regardless of kind; event-listing pages contribute links
/// and nothing else.
pub fn extract_page(kinds: &[PageKind], url: &Url, document: &Html, rules: &Rules) -> PageExtraction {
    let mut out = PageExtraction {
        links: links::discover_links(document, url, &rules.links),
        ..Default::default()
    };

    for kind in kinds {
        match kind {
            PageKind::EventDetail => {
                out.events = event::extract_events(document, rules);
            }
            PageKind::FighterBio => {
                fighter::extract_bio(document, rules, &mut out);
            }
            PageKind::FighterStats => {
                fighter::extract_stats(document, rules, &mut out);
            }
            PageKind::FighterHistory => {
                fighter::extract_history(document, rules, &mut out);
            }
            PageKind::EventListing | PageKind::Unknown => {}
        }
    }

    out
}

/// Text of the first selector match inside `scope`, whitespace-collapsed
pub(crate) fn text_of(scope: ElementRef<'_>, selector: &Selector) -> String {
    scope
        .select(selector)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

/// Concatenated text of an element with internal whitespace collapsed
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_rules() -> Rules {
        let config: Config = toml::from_str("").unwrap();
        Rules::compile(&config).unwrap()
    }

    #[test]
    fn test_classify_by_url_rule() {
        let doc = Html::parse_document("<html><body></body></html>");
        let kinds = classify(
            "https://espn.com/mma/fighter/stats/_/id/123",
            &doc,
            &default_rules(),
        );
        assert_eq!(kinds, vec![PageKind::FighterStats]);
    }

    #[test]
    fn test_classify_fightcenter_is_listing_and_detail() {
        let doc = Html::parse_document("<html><body></body></html>");
        let kinds = classify("https://espn.com/mma/fightcenter", &doc, &default_rules());
        assert!(kinds.contains(&PageKind::EventListing));
        assert!(kinds.contains(&PageKind::EventDetail));
    }

    #[test]
    fn test_classify_by_marker() {
        let doc = Html::parse_document(
            r#"<html><body><div class="Bio__Item"><span class="Bio__Label">Country</span></div></body></html>"#,
        );
        let kinds = classify("https://espn.com/mma/fighter/_/id/123", &doc, &default_rules());
        assert_eq!(kinds, vec![PageKind::FighterBio]);
    }

    #[test]
    fn test_classify_markers_accumulate_kinds() {
        let doc = Html::parse_document(
            r#"<html><body>
            <div class="Bio__Item"><span class="Bio__Label">Country</span></div>
            <div class="ResponsiveTable fight-history"><table></table></div>
            </body></html>"#,
        );
        let kinds = classify("https://espn.com/mma/fighter/_/id/123", &doc, &default_rules());
        assert!(kinds.contains(&PageKind::FighterBio));
        assert!(kinds.contains(&PageKind::FighterHistory));
        assert_eq!(kinds.len(), 2);
    }

    #[test]
    fn test_classify_unmatched_is_unknown() {
        let doc = Html::parse_document("<html><body><p>nothing here</p></body></html>");
        let kinds = classify("https://espn.com/mma/other", &doc, &default_rules());
        assert_eq!(kinds, vec![PageKind::Unknown]);
    }

    #[test]
    fn test_unknown_page_yields_no_entities() {
        let doc = Html::parse_document(
            r#"<html><body><a href="https://espn.com/mma/fightcenter">x</a></body></html>"#,
        );
        let url = Url::parse("https://espn.com/mma/other").unwrap();
        let out = extract_page(&[PageKind::Unknown], &url, &doc, &default_rules());
        assert!(out.events.is_empty());
        assert!(out.fighter.is_none());
        // links are still harvested for the frontier
        assert_eq!(out.links.len(), 1);
    }

    #[test]
    fn test_kind_display_round_trip() {
        for kind in [
            PageKind::EventListing,
            PageKind::EventDetail,
            PageKind::FighterBio,
            PageKind::FighterStats,
            PageKind::FighterHistory,
            PageKind::Unknown,
        ] {
            let parsed: PageKind =
                serde_json::from_str(&format!("\"{}\"", kind.as_str())).unwrap();
            assert_eq!(parsed, kind);
        }
    }
}
