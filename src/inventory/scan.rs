//! Scanning the live cookie store against the known-cookie table.

use crate::inventory::descriptor::{CookieCategory, CookieDescriptor, CF_COOKIE_TABLE};
use crate::inventory::source::CookieSource;

/// Parse a cookie header into the cookie names it carries.
///
/// Values are ignored: the consent core classifies cookies by name only
/// and never reads what they contain.
pub fn parse_cookie_names(header: &str) -> Vec<String> {
    header
        .split(';')
        .map(|pair| pair.trim())
        .map(|pair| pair.split('=').next().unwrap_or("").trim())
        .filter(|name| !name.is_empty())
        .map(|name| name.to_string())
        .collect()
}

/// Detected cookie names grouped by consent category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredConsent {
    pub necessary: Vec<&'static str>,
    pub performance: Vec<&'static str>,
    pub functional: Vec<&'static str>,
}

/// Result of [`CookieInventory::summarize`].
#[derive(Debug, Clone)]
pub struct InventorySummary {
    /// Known cookies currently present, in table order.
    pub detected: Vec<&'static CookieDescriptor>,
    /// The detected cookies the user may decline.
    pub non_essential: Vec<&'static CookieDescriptor>,
    /// True iff any non-essential cookie is present.
    pub consent_required: bool,
}

/// A per-category consent profile inferred from what is actually present.
/// `necessary` is never part of the suggestion; it is always true by
/// policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuggestedConsent {
    pub performance: bool,
    pub functional: bool,
}

/// Read-only view of the cookie store through the known-cookie table.
///
/// All queries recompute from the live header on each call; nothing is
/// cached or persisted. Absence of a cookie context is the normal empty
/// case.
pub struct CookieInventory {
    source: Box<dyn CookieSource>,
}

impl CookieInventory {
    pub fn new(source: Box<dyn CookieSource>) -> Self {
        Self { source }
    }

    pub(crate) fn source(&self) -> &dyn CookieSource {
        self.source.as_ref()
    }

    /// Names of all cookies currently set, known or not.
    pub fn current_cookie_names(&self) -> Vec<String> {
        match self.source.cookie_header() {
            Some(header) => parse_cookie_names(&header),
            None => Vec::new(),
        }
    }

    /// Whether a specific cookie is currently present.
    pub fn has_cookie(&self, name: &str) -> bool {
        self.current_cookie_names().iter().any(|n| n == name)
    }

    /// Known cookies currently present, in table order.
    pub fn detect_known_cookies(&self) -> Vec<&'static CookieDescriptor> {
        let current = self.current_cookie_names();
        CF_COOKIE_TABLE
            .iter()
            .filter(|desc| current.iter().any(|n| n == desc.name))
            .collect()
    }

    /// Detected cookie names grouped by category, for the policy page.
    pub fn required_consent(&self) -> RequiredConsent {
        let mut grouped = RequiredConsent::default();
        for desc in self.detect_known_cookies() {
            match desc.category {
                CookieCategory::Necessary => grouped.necessary.push(desc.name),
                CookieCategory::Performance => grouped.performance.push(desc.name),
                CookieCategory::Functional => grouped.functional.push(desc.name),
            }
        }
        grouped
    }

    /// Consent summary for transparency: what is present, what of it the
    /// user may decline, and whether a consent prompt is warranted.
    pub fn summarize(&self) -> InventorySummary {
        let detected = self.detect_known_cookies();
        let non_essential: Vec<_> = detected
            .iter()
            .copied()
            .filter(|desc| desc.can_be_disabled)
            .collect();
        let consent_required = !non_essential.is_empty();
        InventorySummary {
            detected,
            non_essential,
            consent_required,
        }
    }

    /// Per-category suggestion derived from what is detected: a category
    /// is suggested iff at least one of its cookies is present.
    pub fn suggested_consent(&self) -> SuggestedConsent {
        let detected = self.detect_known_cookies();
        SuggestedConsent {
            performance: detected
                .iter()
                .any(|d| d.category == CookieCategory::Performance),
            functional: detected
                .iter()
                .any(|d| d.category == CookieCategory::Functional),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::source::{MemoryCookieJar, NoCookieContext};

    #[test]
    fn test_parse_cookie_names_basic() {
        let names = parse_cookie_names("__cf_bm=abc; cf_ob_info=1; theme=dark");
        assert_eq!(names, vec!["__cf_bm", "cf_ob_info", "theme"]);
    }

    #[test]
    fn test_parse_cookie_names_messy_input() {
        let names = parse_cookie_names(" ; a=1;; b ;=orphan; ");
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_cookie_names_empty() {
        assert!(parse_cookie_names("").is_empty());
    }

    #[test]
    fn test_no_context_detects_nothing() {
        let inv = CookieInventory::new(Box::new(NoCookieContext));
        assert!(inv.current_cookie_names().is_empty());
        assert!(inv.detect_known_cookies().is_empty());
        assert!(!inv.summarize().consent_required);
    }

    #[test]
    fn test_detection_preserves_table_order() {
        // Seed in reverse of table order; detection must follow the table.
        let jar = MemoryCookieJar::with_names(&["__cfseq", "cf_ob_info", "__cf_bm"]);
        let inv = CookieInventory::new(Box::new(jar));

        let names: Vec<_> = inv.detect_known_cookies().iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["__cf_bm", "cf_ob_info", "__cfseq"]);
    }

    #[test]
    fn test_unknown_names_never_detected() {
        let jar = MemoryCookieJar::with_names(&["session_id", "theme", "cf_clearance"]);
        let inv = CookieInventory::new(Box::new(jar));

        let detected = inv.detect_known_cookies();
        assert_eq!(detected.len(), 1);
        assert_eq!(detected[0].name, "cf_clearance");
    }

    #[test]
    fn test_summarize_necessary_only() {
        let jar = MemoryCookieJar::with_names(&["__cf_bm", "cf_clearance"]);
        let inv = CookieInventory::new(Box::new(jar));

        let summary = inv.summarize();
        assert_eq!(summary.detected.len(), 2);
        assert!(summary.non_essential.is_empty());
        assert!(!summary.consent_required);
    }

    #[test]
    fn test_summarize_with_non_essential() {
        let jar = MemoryCookieJar::with_names(&["__cf_bm", "cf_ob_info"]);
        let inv = CookieInventory::new(Box::new(jar));

        let summary = inv.summarize();
        assert!(summary.consent_required);
        assert_eq!(summary.non_essential.len(), 1);
        assert_eq!(summary.non_essential[0].name, "cf_ob_info");
    }

    #[test]
    fn test_suggested_consent_tracks_categories() {
        let jar = MemoryCookieJar::with_names(&["cf_ob_info", "__cfwaitingroom"]);
        let inv = CookieInventory::new(Box::new(jar));

        let suggested = inv.suggested_consent();
        assert!(suggested.performance);
        assert!(suggested.functional);
    }

    #[test]
    fn test_suggested_consent_necessary_only_suggests_nothing() {
        let jar = MemoryCookieJar::with_names(&["__cfruid"]);
        let inv = CookieInventory::new(Box::new(jar));

        assert_eq!(inv.suggested_consent(), SuggestedConsent::default());
    }

    #[test]
    fn test_required_consent_grouping() {
        let jar = MemoryCookieJar::with_names(&["__cf_bm", "cf_use_ob", "__cfseq"]);
        let inv = CookieInventory::new(Box::new(jar));

        let grouped = inv.required_consent();
        assert_eq!(grouped.necessary, vec!["__cf_bm"]);
        assert_eq!(grouped.performance, vec!["cf_use_ob"]);
        assert_eq!(grouped.functional, vec!["__cfseq"]);
    }

    #[test]
    fn test_has_cookie() {
        let jar = MemoryCookieJar::with_names(&["__cflb"]);
        let inv = CookieInventory::new(Box::new(jar));

        assert!(inv.has_cookie("__cflb"));
        assert!(!inv.has_cookie("cf_ob_info"));
    }
}
