//! Franchise name normalisation and lookup.
//!
//! Franchises have been renamed and relocated over the years, and scraped
//! tables mix full names with abbreviations. Everything that groups by team
//! runs names through [`normalize_team`] first so a franchise is never
//! counted under two labels.

/// Sentinel used by source tables for abandoned or washed-out games.
pub const NO_RESULT: &str = "No Result";

/// Historical or alternate names and the canonical franchise they map to.
///
/// Kochi Tuskers Kerala and Pune Warriors India are defunct and kept as is.
pub const TEAM_ALIASES: &[(&str, &str)] = &[
    ("Delhi Daredevils", "Delhi Capitals"),
    ("Deccan Chargers", "Sunrisers Hyderabad"),
    ("Kings XI Punjab", "Punjab Kings"),
    ("Gujarat Lions", "Gujarat Titans"),
    ("Royal Challengers Bangalore", "Royal Challengers Bengaluru"),
    ("Rising Pune Supergiants", "Rising Pune Supergiant"),
];

/// Abbreviations used on standings pages.
pub const TEAM_ABBREVIATIONS: &[(&str, &str)] = &[
    ("DD", "Delhi Daredevils"),
    ("DC", "Delhi Capitals"),
    ("PBKS", "Punjab Kings"),
    ("KXIP", "Punjab Kings"),
    ("CSK", "Chennai Super Kings"),
    ("MI", "Mumbai Indians"),
    ("KKR", "Kolkata Knight Riders"),
    ("RCB", "Royal Challengers Bengaluru"),
    ("RR", "Rajasthan Royals"),
    ("SRH", "Sunrisers Hyderabad"),
    ("DEC", "Deccan Chargers"),
    ("GL", "Gujarat Lions"),
    ("RPS", "Rising Pune Supergiant"),
    ("PWI", "Pune Warriors India"),
    ("KTK", "Kochi Tuskers Kerala"),
    ("GT", "Gujarat Titans"),
    ("LSG", "Lucknow Super Giants"),
];

/// The ten franchises contesting the current competition.
pub const CURRENT_FRANCHISES: [&str; 10] = [
    "Mumbai Indians",
    "Chennai Super Kings",
    "Royal Challengers Bengaluru",
    "Kolkata Knight Riders",
    "Delhi Capitals",
    "Punjab Kings",
    "Rajasthan Royals",
    "Sunrisers Hyderabad",
    "Gujarat Titans",
    "Lucknow Super Giants",
];

/// Map a raw team label to its canonical franchise name.
///
/// Replacement is whole-value only and the alias targets are themselves
/// never aliases, so applying this twice is the same as applying it once.
pub fn normalize_team(raw: &str) -> String {
    let trimmed = raw.trim();

    let expanded = TEAM_ABBREVIATIONS
        .iter()
        .find(|(abbr, _)| abbr.eq_ignore_ascii_case(trimmed))
        .map(|(_, full)| *full)
        .unwrap_or(trimmed);

    TEAM_ALIASES
        .iter()
        .find(|(old, _)| *old == expanded)
        .map(|(_, new)| (*new).to_string())
        .unwrap_or_else(|| expanded.to_string())
}

/// Normalise an optional cell; blanks become `None`.
pub fn normalize_optional(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(normalize_team)
}

/// True for the labels source tables use when a match had no winner.
pub fn is_no_result(label: &str) -> bool {
    let label = label.trim();
    label.is_empty()
        || label.eq_ignore_ascii_case(NO_RESULT)
        || label.eq_ignore_ascii_case("NR")
        || label.eq_ignore_ascii_case("Abandoned")
}

/// Resolve a user-supplied team name against the known team list.
///
/// Exact match first (after normalisation), then a case-insensitive exact
/// match, then among names containing the query the one with the smallest
/// edit distance, ties broken alphabetically.
pub fn resolve_team(query: &str, known: &[String]) -> Option<String> {
    let normalized = normalize_team(query);
    if normalized.is_empty() {
        return None;
    }

    if let Some(exact) = known.iter().find(|t| **t == normalized) {
        return Some(exact.clone());
    }

    let needle = normalized.to_lowercase();
    if let Some(ci) = known.iter().find(|t| t.to_lowercase() == needle) {
        return Some(ci.clone());
    }

    known
        .iter()
        .filter(|t| t.to_lowercase().contains(&needle))
        .min_by(|a, b| {
            let da = strsim::levenshtein(&a.to_lowercase(), &needle);
            let db = strsim::levenshtein(&b.to_lowercase(), &needle);
            da.cmp(&db).then_with(|| a.cmp(b))
        })
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known() -> Vec<String> {
        vec![
            "Chennai Super Kings".to_string(),
            "Delhi Capitals".to_string(),
            "Punjab Kings".to_string(),
            "Rising Pune Supergiant".to_string(),
            "Pune Warriors India".to_string(),
            "Royal Challengers Bengaluru".to_string(),
        ]
    }

    #[test]
    fn test_aliases_map_to_current_names() {
        assert_eq!(normalize_team("Delhi Daredevils"), "Delhi Capitals");
        assert_eq!(normalize_team("Kings XI Punjab"), "Punjab Kings");
        assert_eq!(normalize_team("Deccan Chargers"), "Sunrisers Hyderabad");
        assert_eq!(
            normalize_team("Royal Challengers Bangalore"),
            "Royal Challengers Bengaluru"
        );
        assert_eq!(
            normalize_team("Rising Pune Supergiants"),
            "Rising Pune Supergiant"
        );
    }

    #[test]
    fn test_abbreviations_expand() {
        assert_eq!(normalize_team("PBKS"), "Punjab Kings");
        assert_eq!(normalize_team("kxip"), "Punjab Kings");
        assert_eq!(normalize_team("DD"), "Delhi Capitals");
        assert_eq!(normalize_team("RCB"), "Royal Challengers Bengaluru");
        assert_eq!(normalize_team("DEC"), "Sunrisers Hyderabad");
    }

    #[test]
    fn test_unmapped_names_pass_through() {
        assert_eq!(normalize_team("Kochi Tuskers Kerala"), "Kochi Tuskers Kerala");
        assert_eq!(normalize_team("  Mumbai Indians "), "Mumbai Indians");
        assert_eq!(normalize_team("Nonexistent FC"), "Nonexistent FC");
    }

    #[test]
    fn test_whole_value_replacement_only() {
        // Names containing an alias as a substring are left alone.
        assert_eq!(
            normalize_team("Delhi Daredevils Reserves"),
            "Delhi Daredevils Reserves"
        );
        assert_eq!(normalize_team("Punjab Kings XI"), "Punjab Kings XI");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let samples = TEAM_ALIASES
            .iter()
            .flat_map(|(a, b)| [*a, *b])
            .chain(TEAM_ABBREVIATIONS.iter().flat_map(|(a, b)| [*a, *b]))
            .chain(["", "  ", "No Result", "Unknown XI", "mi"]);

        for raw in samples {
            let once = normalize_team(raw);
            assert_eq!(normalize_team(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_alias_targets_are_not_aliases() {
        for (_, target) in TEAM_ALIASES {
            assert!(TEAM_ALIASES.iter().all(|(old, _)| old != target));
        }
    }

    #[test]
    fn test_no_result_labels() {
        assert!(is_no_result("No Result"));
        assert!(is_no_result("no result"));
        assert!(is_no_result(""));
        assert!(is_no_result("NR"));
        assert!(!is_no_result("Mumbai Indians"));
    }

    #[test]
    fn test_resolve_exact_and_alias() {
        let known = known();
        assert_eq!(
            resolve_team("Punjab Kings", &known).as_deref(),
            Some("Punjab Kings")
        );
        assert_eq!(
            resolve_team("Kings XI Punjab", &known).as_deref(),
            Some("Punjab Kings")
        );
        assert_eq!(
            resolve_team("delhi capitals", &known).as_deref(),
            Some("Delhi Capitals")
        );
    }

    #[test]
    fn test_resolve_substring_prefers_closest() {
        let known = known();
        // Both "Rising Pune Supergiant" and "Pune Warriors India" contain "pune".
        // "Pune Warriors India" is the closer edit.
        assert_eq!(
            resolve_team("pune", &known).as_deref(),
            Some("Pune Warriors India")
        );
        assert_eq!(
            resolve_team("Chennai", &known).as_deref(),
            Some("Chennai Super Kings")
        );
    }

    #[test]
    fn test_resolve_tie_breaks_alphabetically() {
        let known = vec!["Beta Kings".to_string(), "Alfa Kings".to_string()];
        assert_eq!(resolve_team("Kings", &known).as_deref(), Some("Alfa Kings"));
    }

    #[test]
    fn test_resolve_unknown() {
        assert_eq!(resolve_team("Nonexistent FC", &known()), None);
        assert_eq!(resolve_team("   ", &known()), None);
    }
}
