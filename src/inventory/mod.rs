//! Cookie inventory: the static table of known Cloudflare cookies and
//! read-only scanning of the live cookie store against it.
//!
//! The inventory never writes cookies. It parses the cookie header for
//! names only (values are never inspected), intersects with
//! [`CF_COOKIE_TABLE`](descriptor::CF_COOKIE_TABLE), and answers the two
//! policy questions the consent store needs:
//!
//! - is a consent prompt warranted at all
//!   ([`CookieInventory::summarize`](scan::CookieInventory::summarize))
//! - which categories are actually in play
//!   ([`CookieInventory::suggested_consent`](scan::CookieInventory::suggested_consent))
//!
//! The [`CookieSource`](source::CookieSource) trait is the seam to the
//! host environment; [`MemoryCookieJar`](source::MemoryCookieJar) serves
//! tests and non-browser embeddings, and a missing cookie context is the
//! normal "nothing detected" case rather than an error.

pub mod descriptor;
pub mod scan;
pub mod source;

pub use descriptor::{descriptor_for, CookieCategory, CookieDescriptor, CF_COOKIE_TABLE};
pub use scan::{
    parse_cookie_names, CookieInventory, InventorySummary, RequiredConsent, SuggestedConsent,
};
pub use source::{CookieSource, MemoryCookieJar, NoCookieContext};
