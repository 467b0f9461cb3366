//! Fighter-page extraction: bio fields, per-fight stats, fight history
//!
//! The three fighter page kinds share the display-name heading; each
//! contributes its own fragment to the page's `FighterUpdate`. Table rows
//! are read positionally and header or empty rows are skipped.

use crate::extract::clean::clean_name;
use crate::extract::{element_text, text_of, PageExtraction, Rules};
use crate::model::{FightHistoryEntry, FightStats, FighterBio, FighterUpdate};
use scraper::{ElementRef, Html, Selector};

/// Extracts bio label/value pairs into the page's fighter update
pub(crate) fn extract_bio(document: &Html, rules: &Rules, out: &mut PageExtraction) {
    let Some(update) = fighter_update(document, rules, out) else {
        return;
    };

    let bio = update.bio.get_or_insert_with(FighterBio::default);
    for item in document.root_element().select(&rules.fighter.bio_item) {
        let label = text_of(item, &rules.fighter.bio_label);
        let value = text_of(item, &rules.fighter.bio_value);

        if let Some((_, field_key)) = rules.bio_labels.iter().find(|(l, _)| *l == label) {
            bio.set_field(field_key, &value);
        }
    }
}

/// Extracts stats table rows into the page's fighter update
pub(crate) fn extract_stats(document: &Html, rules: &Rules, out: &mut PageExtraction) {
    let Some(update) = fighter_update(document, rules, out) else {
        return;
    };

    for row in document.root_element().select(&rules.fighter.stats_row) {
        let cells = row_cells(row, &rules.fighter.cell);
        if cells.iter().all(|c| c.is_empty()) {
            continue;
        }
        update.stats.push(FightStats::from_cells(&cells));
    }
}

/// Extracts fight-history rows into the page's fighter update
///
/// Rows are scoped to the history table wrapper so stat tables elsewhere on
/// a mixed page are not swept in.
pub(crate) fn extract_history(document: &Html, rules: &Rules, out: &mut PageExtraction) {
    let Some(update) = fighter_update(document, rules, out) else {
        return;
    };

    for table in document.root_element().select(&rules.fighter.history_table) {
        for row in table.select(&rules.fighter.history_row) {
            let cells = row_cells(row, &rules.fighter.cell);
            if cells.iter().all(|c| c.is_empty()) {
                continue;
            }
            update.history.push(FightHistoryEntry::from_cells(&cells));
        }
    }
}

/// Resolves the page's fighter update, creating it from the name heading
///
/// Returns None when no display name can be read; a nameless fragment has
/// no identity to aggregate under.
fn fighter_update<'a>(
    document: &Html,
    rules: &Rules,
    out: &'a mut PageExtraction,
) -> Option<&'a mut FighterUpdate> {
    if out.fighter.is_none() {
        let name = clean_name(&text_of(document.root_element(), &rules.fighter.name));
        if name.is_empty() {
            tracing::debug!("Fighter page without a readable display name");
            return None;
        }
        out.fighter = Some(FighterUpdate {
            name,
            ..Default::default()
        });
    }
    out.fighter.as_mut()
}

/// Collects the text of every cell in a row
fn row_cells(row: ElementRef<'_>, cell_selector: &Selector) -> Vec<String> {
    row.select(cell_selector).map(element_text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::extract::{extract_page, PageKind};
    use url::Url;

    fn rules() -> Rules {
        let config: Config = toml::from_str("").unwrap();
        Rules::compile(&config).unwrap()
    }

    fn page_url() -> Url {
        Url::parse("https://espn.com/mma/fighter/_/id/123/jon-jones").unwrap()
    }

    const BIO_PAGE: &str = r#"<html><body>
        <h1>Jon Jones</h1>
        <div class="Bio__Item"><span class="Bio__Label">Country</span><span class="clr-gray-01">USA</span></div>
        <div class="Bio__Item"><span class="Bio__Label">HT/WT</span><span class="clr-gray-01">6' 4", 248 lbs</span></div>
        <div class="Bio__Item"><span class="Bio__Label">Nickname</span><span class="clr-gray-01">Bones</span></div>
        <div class="Bio__Item"><span class="Bio__Label">Fan Club</span><span class="clr-gray-01">ignored</span></div>
    </body></html>"#;

    #[test]
    fn test_extract_bio_fields() {
        let doc = Html::parse_document(BIO_PAGE);
        let mut out = PageExtraction::default();
        extract_bio(&doc, &rules(), &mut out);

        let update = out.fighter.unwrap();
        assert_eq!(update.name, "Jon Jones");
        let bio = update.bio.unwrap();
        assert_eq!(bio.country, "USA");
        assert_eq!(bio.height_weight, "6' 4\", 248 lbs");
        assert_eq!(bio.nickname, "Bones");
        // unmapped labels are ignored, not errors
        assert_eq!(bio.team, "");
    }

    #[test]
    fn test_extract_stats_rows() {
        let doc = Html::parse_document(
            r#"<html><body>
            <h1>Jon Jones 27-1-0</h1>
            <table><tbody>
            <tr class="Table__TR"><th>Date</th></tr>
            <tr class="Table__TR">
                <td>Mar 4</td><td>Ciryl Gane</td><td>UFC 285</td><td>W</td>
                <td>1/1</td><td>2/2</td><td>3/3</td><td>10</td><td>12</td>
                <td>8</td><td>9</td><td>0.83</td><td>0</td><td>10%</td><td>80%</td><td>10%</td>
            </tr>
            </tbody></table>
        </body></html>"#,
        );
        let mut out = PageExtraction::default();
        extract_stats(&doc, &rules(), &mut out);

        let update = out.fighter.unwrap();
        assert_eq!(update.name, "Jon Jones");
        assert_eq!(update.stats.len(), 1);
        let stats = &update.stats[0];
        assert_eq!(stats.date, "Mar 4");
        assert_eq!(stats.opponent, "Ciryl Gane");
        assert_eq!(stats.tsl_tsa, "0.83");
        assert_eq!(stats.leg_pct, "10%");
    }

    #[test]
    fn test_extract_history_scoped_to_table() {
        let doc = Html::parse_document(
            r#"<html><body>
            <h1>Jon Jones</h1>
            <table><tbody>
            <tr class="Table__TR"><td>outside row, not history</td></tr>
            </tbody></table>
            <div class="ResponsiveTable fight-history"><table><tbody>
            <tr class="Table__TR">
                <td>Mar 4, 2023</td><td>Ciryl Gane</td><td>W</td>
                <td>Submission</td><td>1</td><td>2:04</td><td>UFC 285</td>
            </tr>
            </tbody></table></div>
        </body></html>"#,
        );
        let mut out = PageExtraction::default();
        extract_history(&doc, &rules(), &mut out);

        let update = out.fighter.unwrap();
        assert_eq!(update.history.len(), 1);
        let entry = &update.history[0];
        assert_eq!(entry.opponent, "Ciryl Gane");
        assert_eq!(entry.decision, "Submission");
        assert_eq!(entry.round, "1");
        assert_eq!(entry.event, "UFC 285");
    }

    #[test]
    fn test_short_rows_pad_with_empty_fields() {
        let doc = Html::parse_document(
            r#"<html><body>
            <h1>Jon Jones</h1>
            <table><tbody>
            <tr class="Table__TR"><td>Mar 4</td><td>Ciryl Gane</td></tr>
            </tbody></table>
        </body></html>"#,
        );
        let mut out = PageExtraction::default();
        extract_stats(&doc, &rules(), &mut out);

        let stats = &out.fighter.unwrap().stats[0];
        assert_eq!(stats.date, "Mar 4");
        assert_eq!(stats.event, "");
        assert_eq!(stats.leg_pct, "");
    }

    #[test]
    fn test_nameless_page_contributes_nothing() {
        let doc = Html::parse_document(
            r#"<html><body><div class="Bio__Item">
            <span class="Bio__Label">Country</span><span class="clr-gray-01">USA</span>
            </div></body></html>"#,
        );
        let mut out = PageExtraction::default();
        extract_bio(&doc, &rules(), &mut out);
        assert!(out.fighter.is_none());
    }

    #[test]
    fn test_mixed_page_extracts_both_kinds() {
        let doc = Html::parse_document(
            r#"<html><body>
            <h1>Jon Jones</h1>
            <div class="Bio__Item"><span class="Bio__Label">Stance</span><span class="clr-gray-01">Orthodox</span></div>
            <div class="ResponsiveTable fight-history"><table><tbody>
            <tr class="Table__TR"><td>Mar 4, 2023</td><td>Ciryl Gane</td><td>W</td><td>Sub</td><td>1</td><td>2:04</td><td>UFC 285</td></tr>
            </tbody></table></div>
            </body></html>"#,
        );
        let kinds = crate::extract::classify("https://espn.com/mma/fighter/_/id/123", &doc, &rules());
        let out = extract_page(&kinds, &page_url(), &doc, &rules());

        let update = out.fighter.unwrap();
        assert_eq!(update.bio.as_ref().unwrap().stance, "Orthodox");
        assert_eq!(update.history.len(), 1);
        assert!(matches!(
            kinds.as_slice(),
            [PageKind::FighterBio, PageKind::FighterHistory]
                | [PageKind::FighterHistory, PageKind::FighterBio]
        ));
    }
}
