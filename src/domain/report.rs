//! Plain-text rendering of selection results.

use crate::domain::catalog::Catalog;
use crate::domain::code::InstrumentCode;
use crate::domain::pipeline::SelectionResult;

pub const EMPTY_LINE: &str = "No matching instruments";

/// `<index>. <code> <name> (<region>) [<industry>]`, leaving out whatever the
/// catalog does not know.
pub fn format_pick(index: usize, code: &InstrumentCode, catalog: &Catalog) -> String {
    let mut parts = vec![format!("{index}."), code.to_string()];
    if let Some(meta) = catalog.get(code) {
        if let Some(name) = &meta.name {
            parts.push(name.clone());
        }
        if let Some(region) = &meta.region {
            parts.push(format!("({region})"));
        }
        if let Some(industry) = &meta.industry {
            parts.push(format!("[{industry}]"));
        }
    }
    format!("  {}", parts.join(" "))
}

pub fn render_section(result: &SelectionResult, catalog: &Catalog) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        format!("============== Selection results [{}] ==============", result.alias),
        format!("Trade date: {}", result.date.format("%Y-%m-%d")),
        format!("Matches: {}", result.picks.len()),
    ];
    if result.picks.is_empty() {
        lines.push(EMPTY_LINE.to_string());
    } else {
        lines.extend(
            result
                .picks
                .iter()
                .enumerate()
                .map(|(i, code)| format_pick(i + 1, code, catalog)),
        );
    }
    lines
}

/// Sections for successful selectors only, in run order. Failures were
/// already logged by the runner.
pub fn render_report(results: &[SelectionResult], catalog: &Catalog) -> Vec<String> {
    results
        .iter()
        .filter(|r| r.succeeded())
        .flat_map(|r| render_section(r, catalog))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::ColumnMap;
    use crate::domain::selector::SelectorError;
    use chrono::NaiveDate;

    fn code(s: &str) -> InstrumentCode {
        InstrumentCode::parse(s).unwrap()
    }

    fn catalog() -> Catalog {
        let map = ColumnMap::resolve(&["symbol", "name", "area", "industry"]).unwrap();
        Catalog::from_rows(
            map,
            vec![
                vec!["000001", "Ping An Bank", "Shenzhen", "Banking"],
                vec!["000002", "Vanke", "", ""],
            ],
        )
    }

    fn result(alias: &str, picks: &[&str]) -> SelectionResult {
        SelectionResult {
            alias: alias.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 12).unwrap(),
            picks: picks.iter().map(|c| code(c)).collect(),
            failure: None,
        }
    }

    #[test]
    fn pick_line_with_full_metadata() {
        assert_eq!(
            format_pick(1, &code("000001"), &catalog()),
            "  1. 000001 Ping An Bank (Shenzhen) [Banking]"
        );
    }

    #[test]
    fn pick_line_omits_absent_fields() {
        assert_eq!(format_pick(2, &code("000002"), &catalog()), "  2. 000002 Vanke");
    }

    #[test]
    fn pick_line_without_metadata() {
        assert_eq!(format_pick(3, &code("600519"), &catalog()), "  3. 600519");
        assert_eq!(format_pick(1, &code("000001"), &Catalog::empty()), "  1. 000001");
    }

    #[test]
    fn section_keeps_pick_order() {
        let lines = render_section(&result("momentum", &["000002", "000001"]), &catalog());
        assert_eq!(
            lines,
            vec![
                "",
                "============== Selection results [momentum] ==============",
                "Trade date: 2024-01-12",
                "Matches: 2",
                "  1. 000002 Vanke",
                "  2. 000001 Ping An Bank (Shenzhen) [Banking]",
            ]
        );
    }

    #[test]
    fn empty_section_prints_placeholder() {
        let lines = render_section(&result("quiet", &[]), &catalog());
        assert_eq!(lines.last().map(String::as_str), Some(EMPTY_LINE));
        assert!(lines.contains(&"Matches: 0".to_string()));
    }

    #[test]
    fn failed_selectors_are_left_out() {
        let mut failed = result("broken", &[]);
        failed.failure = Some(SelectorError::Evaluation("boom".into()));
        let lines = render_report(&[failed, result("ok", &["000001"])], &catalog());
        assert!(lines.iter().all(|l| !l.contains("broken")));
        assert!(lines.iter().any(|l| l.contains("[ok]")));
    }

    #[test]
    fn catalog_only_changes_rendering() {
        let results = [result("all", &["000001", "000002"])];
        let with = render_report(&results, &catalog());
        let without = render_report(&results, &Catalog::empty());
        assert_eq!(with.len(), without.len());
        assert_eq!(without[4], "  1. 000001");
        assert_eq!(without[5], "  2. 000002");
    }
}
