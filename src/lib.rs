//! # consentnet
//!
//! The consent core behind a cookie banner: a static inventory of known
//! Cloudflare cookies, a consent store with persistence and change
//! notification, and a best-effort purge of declined cookies.
//!
//! `consentnet` does not render anything. The presentation layer asks the
//! store whether the banner must show, commits the user's choice through
//! [`ConsentStore::update`](consent::ConsentStore::update), and subscribes
//! for re-render notifications; the cookie-policy page reads the
//! [`inventory`] directly for display.
//!
//! ## Quick start
//!
//! ```rust
//! use consentnet::consent::{ConsentStore, ConsentUpdate, MemoryStorage};
//! use consentnet::inventory::{CookieInventory, MemoryCookieJar};
//!
//! let jar = MemoryCookieJar::with_names(&["__cf_bm", "cf_ob_info"]);
//! let inventory = CookieInventory::new(Box::new(jar));
//! let mut store = ConsentStore::new(Box::new(MemoryStorage::new()), inventory);
//!
//! store.load();
//! assert!(store.is_banner_visible()); // cf_ob_info needs consent
//!
//! let record = store.update(ConsentUpdate::necessary_only());
//! assert!(record.necessary && !record.performance);
//! assert!(!store.is_banner_visible());
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Core error definitions
//! - [`inventory`] - Known-cookie table and live cookie-store scanning
//! - [`consent`] - Consent record, storage backends, store state machine,
//!   and purge
//!
//! ## Degradation
//!
//! Storage being unavailable, full, or corrupt never produces a
//! user-visible error: reads degrade to "no stored record", writes keep a
//! working in-memory session, and everything is logged through `tracing`.
//! The user always sees either no banner or the banner, never a failure
//! state.

pub mod base;
pub mod consent;
pub mod inventory;
