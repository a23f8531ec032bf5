//! Best-effort deletion of declined cookies.
//!
//! The authoritative control over Cloudflare cookies is server-side; this
//! module only overwrites declined cookies with expired values and reports
//! what actually happened. Secure/HttpOnly cookies cannot be cleared from
//! the client by browser design, so they predictably end up in
//! [`PurgeReport::failed`] — that is the expected outcome, not an error.

use crate::consent::record::ConsentRecord;
use crate::inventory::{CookieCategory, CookieInventory};
use time::OffsetDateTime;

/// Outcome of one purge pass. All fields hold cookie names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurgeReport {
    /// Declined cookies that were present and targeted.
    pub attempted: Vec<String>,
    /// Cookies for which expiring overwrites were issued.
    pub deleted: Vec<String>,
    /// Cookies confirmed absent after the attempt.
    pub verified: Vec<String>,
    /// Cookies still present after the attempt (Secure/HttpOnly land here).
    pub failed: Vec<String>,
    /// Necessary cookies encountered; never touched.
    pub protected: Vec<String>,
}

impl PurgeReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Writes expiring overwrites for cookies the user has declined.
#[derive(Debug, Clone, Default)]
pub struct CookiePurger {
    /// Site domain for Domain-attribute variants; host-only variants are
    /// always attempted.
    domain: Option<String>,
}

impl CookiePurger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_domain(domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
        }
    }

    /// Purge every detected cookie whose category the record explicitly
    /// declines. A record that was never decided (`timestamp == 0`)
    /// declines nothing.
    pub fn purge(&self, record: &ConsentRecord, inventory: &CookieInventory) -> PurgeReport {
        let mut report = PurgeReport::default();

        for desc in inventory.detect_known_cookies() {
            if desc.category == CookieCategory::Necessary {
                report.protected.push(desc.name.to_string());
                continue;
            }
            if !desc.can_be_disabled || !self.declined(record, desc.category) {
                continue;
            }

            report.attempted.push(desc.name.to_string());
            for line in self.expiring_lines(desc.name) {
                inventory.source().write_cookie(&line);
            }
            report.deleted.push(desc.name.to_string());
        }

        // Verify against a fresh read of the live header.
        let remaining = inventory.current_cookie_names();
        for name in &report.attempted {
            if remaining.iter().any(|n| n == name) {
                report.failed.push(name.clone());
            } else {
                report.verified.push(name.clone());
            }
        }

        if !report.failed.is_empty() {
            tracing::debug!(
                failed = ?report.failed,
                "purge could not clear some cookies (expected for Secure/HttpOnly)"
            );
        }

        report
    }

    fn declined(&self, record: &ConsentRecord, category: CookieCategory) -> bool {
        if !record.is_decided() {
            return false;
        }
        match category {
            CookieCategory::Necessary => false,
            CookieCategory::Performance => !record.performance,
            CookieCategory::Functional => !record.functional,
        }
    }

    /// Expiring `Set-Cookie` lines across the plausible path/domain
    /// cross-product for one cookie name.
    fn expiring_lines(&self, name: &str) -> Vec<String> {
        let mut domains: Vec<Option<String>> = vec![None];
        if let Some(ref domain) = self.domain {
            let bare = domain.trim_start_matches('.').to_string();
            domains.push(Some(bare.clone()));
            domains.push(Some(format!(".{bare}")));
        }

        let mut lines = Vec::new();
        for domain in &domains {
            for path in [Some("/"), None] {
                let mut builder = cookie::Cookie::build((name, ""))
                    .max_age(time::Duration::ZERO)
                    .expires(OffsetDateTime::UNIX_EPOCH);
                if let Some(path) = path {
                    builder = builder.path(path);
                }
                if let Some(domain) = domain {
                    builder = builder.domain(domain.clone());
                }
                lines.push(builder.build().to_string());
            }
        }
        lines
    }
}
