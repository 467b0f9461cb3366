use crate::extract::PageKind;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Main configuration structure for cagecrawl
///
/// Every section except `seeds` carries defaults tuned for the ESPN MMA
/// fight-center layout, so a minimal config only needs seed URLs. The
/// selectors and patterns are configuration data, not engine logic: a layout
/// change is a config edit, not a code change.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub admission: AdmissionConfig,
    /// Seed URLs entering the frontier at depth 0
    #[serde(default)]
    pub seeds: Vec<String>,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Number of concurrent workers draining the frontier
    #[serde(default = "default_workers")]
    pub workers: u32,

    /// Maximum link depth from seed URLs; deeper discoveries are dropped
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Overall wall-clock budget in seconds; when it elapses the frontier is
    /// closed and the crawl proceeds directly to export. Absent = unbounded.
    #[serde(rename = "max-runtime-secs", default)]
    pub max_runtime_secs: Option<u64>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            max_depth: default_max_depth(),
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout(),
            max_runtime_secs: None,
        }
    }
}

fn default_workers() -> u32 {
    8
}

fn default_max_depth() -> u32 {
    3
}

fn default_user_agent() -> String {
    "cagecrawl/0.3".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

/// URL admission policy: which discovered URLs are eligible for the frontier
///
/// A URL is admitted only when its host matches one of `allowed-domains`,
/// its full string contains at least one `allow` pattern, and contains no
/// `block` pattern.
#[derive(Debug, Clone, Deserialize)]
pub struct AdmissionConfig {
    #[serde(rename = "allowed-domains", default = "default_allowed_domains")]
    pub allowed_domains: Vec<String>,

    #[serde(default = "default_allow_patterns")]
    pub allow: Vec<String>,

    #[serde(default = "default_block_patterns")]
    pub block: Vec<String>,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            allowed_domains: default_allowed_domains(),
            allow: default_allow_patterns(),
            block: default_block_patterns(),
        }
    }
}

fn default_allowed_domains() -> Vec<String> {
    vec!["espn.com".to_string()]
}

fn default_allow_patterns() -> Vec<String> {
    vec!["/mma/fightcenter".to_string(), "/mma/fighter".to_string()]
}

fn default_block_patterns() -> Vec<String> {
    vec![
        "news".to_string(),
        "radio".to_string(),
        "watch".to_string(),
        "video".to_string(),
    ]
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the per-matchup event CSV
    #[serde(rename = "events-path", default = "default_events_path")]
    pub events_path: String,

    /// Path of the flattened fighter CSV
    #[serde(rename = "fighters-path", default = "default_fighters_path")]
    pub fighters_path: String,

    /// Path of the hierarchical JSON artifact; absent = no JSON export
    #[serde(rename = "json-path", default)]
    pub json_path: Option<String>,

    /// Stamp output filenames with the crawl start time before the extension
    #[serde(default)]
    pub timestamped: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            events_path: default_events_path(),
            fighters_path: default_fighters_path(),
            json_path: None,
            timestamped: false,
        }
    }
}

fn default_events_path() -> String {
    "mma_events.csv".to_string()
}

fn default_fighters_path() -> String {
    "mma_fighters.csv".to_string()
}

/// Page classification rules
///
/// URL rules are checked first; marker rules then add any kind whose marker
/// element is present in the document, so one page can classify as several
/// kinds at once (a fighter page carrying both a bio block and a history
/// table yields both).
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    #[serde(rename = "url-rules", default = "default_url_rules")]
    pub url_rules: Vec<UrlRule>,

    #[serde(default = "default_marker_rules")]
    pub markers: Vec<MarkerRule>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            url_rules: default_url_rules(),
            markers: default_marker_rules(),
        }
    }
}

/// Classifies by URL substring match
#[derive(Debug, Clone, Deserialize)]
pub struct UrlRule {
    pub contains: String,
    pub kinds: Vec<PageKind>,
}

/// Classifies by presence of a marker element in the document
#[derive(Debug, Clone, Deserialize)]
pub struct MarkerRule {
    pub selector: String,
    pub kind: PageKind,
}

fn default_url_rules() -> Vec<UrlRule> {
    vec![
        UrlRule {
            contains: "/mma/fightcenter".to_string(),
            kinds: vec![PageKind::EventListing, PageKind::EventDetail],
        },
        UrlRule {
            contains: "/mma/fighter/stats/".to_string(),
            kinds: vec![PageKind::FighterStats],
        },
        UrlRule {
            contains: "/mma/fighter/bio/".to_string(),
            kinds: vec![PageKind::FighterBio],
        },
        UrlRule {
            contains: "/mma/fighter/history/".to_string(),
            kinds: vec![PageKind::FighterHistory],
        },
    ]
}

fn default_marker_rules() -> Vec<MarkerRule> {
    vec![
        MarkerRule {
            selector: ".MMAFightCard__GameNote".to_string(),
            kind: PageKind::EventDetail,
        },
        MarkerRule {
            selector: "div.Bio__Item".to_string(),
            kind: PageKind::FighterBio,
        },
        MarkerRule {
            selector: "div.ResponsiveTable.fight-history".to_string(),
            kind: PageKind::FighterHistory,
        },
    ]
}

/// Which corner a winner marker element awards the win to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum WinnerSide {
    #[serde(rename = "fighter1")]
    Fighter1,
    #[serde(rename = "fighter2")]
    Fighter2,
}

/// Extraction rules: selectors and field mappings per page kind
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractConfig {
    #[serde(default)]
    pub event: EventSelectors,

    #[serde(default)]
    pub fighter: FighterSelectors,

    /// Bio label text as it appears on the page, mapped to the canonical
    /// field key it populates. New labels are config additions.
    #[serde(rename = "bio-labels", default = "default_bio_labels")]
    pub bio_labels: BTreeMap<String, String>,

    /// Venue text is cut before the first of these broadcast keywords
    #[serde(rename = "broadcast-keywords", default = "default_broadcast_keywords")]
    pub broadcast_keywords: Vec<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            event: EventSelectors::default(),
            fighter: FighterSelectors::default(),
            bio_labels: default_bio_labels(),
            broadcast_keywords: default_broadcast_keywords(),
        }
    }
}

/// Selectors for event-detail pages
#[derive(Debug, Clone, Deserialize)]
pub struct EventSelectors {
    #[serde(default = "d_event_card")]
    pub card: String,
    #[serde(default = "d_event_name")]
    pub name: String,
    #[serde(default = "d_event_fighter1")]
    pub fighter1: String,
    #[serde(default = "d_event_fighter2")]
    pub fighter2: String,
    #[serde(default = "d_event_result")]
    pub result: String,
    #[serde(default = "d_event_date")]
    pub date: String,
    #[serde(default = "d_event_location")]
    pub location: String,
    /// Element whose presence inside a card marks the decided corner
    #[serde(rename = "winner-marker", default = "d_event_winner_marker")]
    pub winner_marker: String,
    /// The corner the marker awards; page semantics are undocumented, so the
    /// direction is supplied here rather than hardcoded.
    #[serde(rename = "winner-when-marked", default = "d_winner_when_marked")]
    pub winner_when_marked: WinnerSide,
}

impl Default for EventSelectors {
    fn default() -> Self {
        Self {
            card: d_event_card(),
            name: d_event_name(),
            fighter1: d_event_fighter1(),
            fighter2: d_event_fighter2(),
            result: d_event_result(),
            date: d_event_date(),
            location: d_event_location(),
            winner_marker: d_event_winner_marker(),
            winner_when_marked: d_winner_when_marked(),
        }
    }
}

fn d_event_card() -> String {
    ".ResponsiveWrapper".to_string()
}
fn d_event_name() -> String {
    ".MMAFightCard__GameNote".to_string()
}
fn d_event_fighter1() -> String {
    ".MMACompetitor:first-child .MMACompetitor__Detail h2".to_string()
}
fn d_event_fighter2() -> String {
    ".MMACompetitor:last-child .MMACompetitor__Detail h2".to_string()
}
fn d_event_result() -> String {
    ".Gamestrip__Overview .ScoreCell__Time--post h3".to_string()
}
fn d_event_date() -> String {
    ".Gamestrip__Overview .ScoreCell__Time--post .n9".to_string()
}
fn d_event_location() -> String {
    ".MMAEventHeader__Event .n8.clr-gray-04".to_string()
}
fn d_event_winner_marker() -> String {
    ".MMACompetitor--reversed".to_string()
}
fn d_winner_when_marked() -> WinnerSide {
    WinnerSide::Fighter1
}

/// Selectors for the three fighter page kinds
#[derive(Debug, Clone, Deserialize)]
pub struct FighterSelectors {
    /// Display name heading
    #[serde(default = "d_fighter_name")]
    pub name: String,
    #[serde(rename = "bio-item", default = "d_bio_item")]
    pub bio_item: String,
    #[serde(rename = "bio-label", default = "d_bio_label")]
    pub bio_label: String,
    #[serde(rename = "bio-value", default = "d_bio_value")]
    pub bio_value: String,
    /// Table rows on the stats page
    #[serde(rename = "stats-row", default = "d_table_row")]
    pub stats_row: String,
    /// The history table wrapper; rows are selected inside it
    #[serde(rename = "history-table", default = "d_history_table")]
    pub history_table: String,
    #[serde(rename = "history-row", default = "d_table_row")]
    pub history_row: String,
    /// Cell selector within a row
    #[serde(default = "d_cell")]
    pub cell: String,
}

impl Default for FighterSelectors {
    fn default() -> Self {
        Self {
            name: d_fighter_name(),
            bio_item: d_bio_item(),
            bio_label: d_bio_label(),
            bio_value: d_bio_value(),
            stats_row: d_table_row(),
            history_table: d_history_table(),
            history_row: d_table_row(),
            cell: d_cell(),
        }
    }
}

fn d_fighter_name() -> String {
    "h1".to_string()
}
fn d_bio_item() -> String {
    "div.Bio__Item".to_string()
}
fn d_bio_label() -> String {
    "span.Bio__Label".to_string()
}
fn d_bio_value() -> String {
    "span.clr-gray-01".to_string()
}
fn d_table_row() -> String {
    "tr.Table__TR".to_string()
}
fn d_history_table() -> String {
    "div.ResponsiveTable.fight-history".to_string()
}
fn d_cell() -> String {
    "td".to_string()
}

fn default_bio_labels() -> BTreeMap<String, String> {
    [
        ("Country", "country"),
        ("WT Class", "weight_class"),
        ("HT/WT", "height_weight"),
        ("Birthdate", "birthdate"),
        ("Team", "team"),
        ("Nickname", "nickname"),
        ("Stance", "stance"),
        ("Reach", "reach"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn default_broadcast_keywords() -> Vec<String> {
    vec![
        "ESPN+".to_string(),
        "ESPN".to_string(),
        "PPV".to_string(),
        "ABC".to_string(),
        "FOX".to_string(),
    ]
}
