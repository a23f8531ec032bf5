use serde::{Deserialize, Serialize};
use std::fmt;

/// Consent category of a known cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CookieCategory {
    /// Required for basic security/functioning; consent cannot be withdrawn.
    Necessary,
    Performance,
    Functional,
}

impl fmt::Display for CookieCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CookieCategory::Necessary => "necessary",
            CookieCategory::Performance => "performance",
            CookieCategory::Functional => "functional",
        };
        f.write_str(label)
    }
}

/// A known third-party cookie and its consent classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookieDescriptor {
    pub name: &'static str,
    pub category: CookieCategory,
    pub can_be_disabled: bool,
}

/// Map of Cloudflare cookies and their categories.
///
/// Mirrors Cloudflare's published cookie documentation. Necessary entries
/// can never be disabled; the table invariant is enforced by a test.
pub const CF_COOKIE_TABLE: &[CookieDescriptor] = &[
    // Strictly necessary (cannot be disabled)
    CookieDescriptor {
        name: "__cf_bm",
        category: CookieCategory::Necessary,
        can_be_disabled: false,
    },
    CookieDescriptor {
        name: "cf_clearance",
        category: CookieCategory::Necessary,
        can_be_disabled: false,
    },
    CookieDescriptor {
        name: "__cfruid",
        category: CookieCategory::Necessary,
        can_be_disabled: false,
    },
    CookieDescriptor {
        name: "_cfuvid",
        category: CookieCategory::Necessary,
        can_be_disabled: false,
    },
    CookieDescriptor {
        name: "__cflb",
        category: CookieCategory::Necessary,
        can_be_disabled: false,
    },
    // Performance (manageable via the CF dashboard)
    CookieDescriptor {
        name: "cf_ob_info",
        category: CookieCategory::Performance,
        can_be_disabled: true,
    },
    CookieDescriptor {
        name: "cf_use_ob",
        category: CookieCategory::Performance,
        can_be_disabled: true,
    },
    // Functional (manageable via the CF dashboard)
    CookieDescriptor {
        name: "__cfwaitingroom",
        category: CookieCategory::Functional,
        can_be_disabled: true,
    },
    CookieDescriptor {
        name: "__cfseq",
        category: CookieCategory::Functional,
        can_be_disabled: true,
    },
];

/// Look up the descriptor for a cookie name.
pub fn descriptor_for(name: &str) -> Option<&'static CookieDescriptor> {
    CF_COOKIE_TABLE.iter().find(|d| d.name == name)
}
