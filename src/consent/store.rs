//! The consent store: single source of truth for the user's decision.
//!
//! One store instance exists per session, owned by the application root
//! and passed down by reference (no ambient singleton). All mutation goes
//! through [`ConsentStore::update`] and [`ConsentStore::reset`]; observers
//! are invoked synchronously, in registration order, after every
//! committed mutation.

use crate::consent::purge::{CookiePurger, PurgeReport};
use crate::consent::record::{now_ms, ConsentRecord, ConsentUpdate, CONSENT_VERSION};
use crate::consent::storage::ConsentStorage;
use crate::inventory::{CookieCategory, CookieInventory};

/// When the consent banner must be shown for a client with no usable
/// stored decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BannerPolicy {
    /// Prompt only when non-essential known cookies are actually present.
    #[default]
    WhenCookiesDetected,
    /// Always prompt until the user decides.
    Always,
}

/// Observable lifecycle state of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    /// Constructed but `load()` has not run.
    Uninitialized,
    /// A decision is needed; the banner must show.
    AwaitingDecision,
    /// No decision needed, or one is already recorded.
    Decided,
}

/// Payload handed to observers after every committed mutation.
#[derive(Debug, Clone)]
pub struct ConsentEvent {
    pub record: ConsentRecord,
    /// Present when a purge ran as part of the mutation.
    pub purge: Option<PurgeReport>,
}

/// Capability to remove a previously registered observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&ConsentEvent)>;

/// Consent state machine with persistence and change notification.
///
/// Storage failures never surface through this API: reads degrade to "no
/// stored record", writes leave the in-memory state updated, both logged
/// at warning level. The one hard failure is calling a mutator or the
/// banner query before `load()`: that is a wiring bug and panics
/// immediately.
pub struct ConsentStore {
    storage: Box<dyn ConsentStorage>,
    inventory: CookieInventory,
    policy: BannerPolicy,
    purger: Option<CookiePurger>,
    record: ConsentRecord,
    loaded: bool,
    decided: bool,
    force_banner: bool,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl ConsentStore {
    pub fn new(storage: Box<dyn ConsentStorage>, inventory: CookieInventory) -> Self {
        Self {
            storage,
            inventory,
            policy: BannerPolicy::default(),
            purger: None,
            record: ConsentRecord::default(),
            loaded: false,
            decided: false,
            force_banner: false,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn with_policy(mut self, policy: BannerPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enable best-effort purge of declined cookies on every `update`.
    pub fn with_purger(mut self, purger: CookiePurger) -> Self {
        self.purger = Some(purger);
        self
    }

    /// Load the persisted decision and settle the initial banner state.
    ///
    /// A stored record is adopted only if it parses, carries the current
    /// policy revision, and is younger than the retention window. A
    /// malformed record is cleared once so it is not re-parsed on every
    /// load. With no usable record the banner decision falls to the
    /// configured [`BannerPolicy`].
    pub fn load(&mut self) {
        self.loaded = true;
        self.force_banner = false;

        if let Some(stored) = self.read_stored() {
            if stored.is_current(now_ms()) {
                tracing::debug!(timestamp = stored.timestamp_ms, "adopting stored consent");
                self.record = stored;
                self.decided = true;
                return;
            }
            tracing::debug!("stored consent expired or from an older policy revision");
            if let Err(e) = self.storage.remove() {
                tracing::warn!(error = %e, "failed to clear stale consent");
            }
        }

        let consent_required = match self.policy {
            BannerPolicy::Always => true,
            BannerPolicy::WhenCookiesDetected => self.inventory.summarize().consent_required,
        };

        self.record = ConsentRecord::default();
        if consent_required {
            // Pre-fill the in-memory record from what is detected, for
            // display only. Not persisted; timestamp stays 0.
            let suggested = self.inventory.suggested_consent();
            self.record.performance = suggested.performance;
            self.record.functional = suggested.functional;
            self.decided = false;
        } else {
            // Nothing to consent to; default profile, no persistence write.
            self.decided = true;
        }
    }

    /// Commit a decision. Merges the optional categories, forces
    /// `necessary = true`, stamps a strictly increasing timestamp and the
    /// current policy revision, persists best-effort, purges declined
    /// cookies when enabled, and notifies observers. Never fails.
    pub fn update(&mut self, update: ConsentUpdate) -> ConsentRecord {
        self.assert_loaded("update");

        if let Some(performance) = update.performance {
            self.record.performance = performance;
        }
        if let Some(functional) = update.functional {
            self.record.functional = functional;
        }
        self.record.necessary = true;
        self.record.timestamp_ms = now_ms().max(self.record.timestamp_ms + 1);
        self.record.schema_version = CONSENT_VERSION.to_string();

        self.persist();
        self.decided = true;
        self.force_banner = false;

        let purge = self
            .purger
            .as_ref()
            .map(|purger| purger.purge(&self.record, &self.inventory));

        self.notify(purge);
        self.record.clone()
    }

    /// Erase the persisted decision and return to the default profile.
    /// The banner shows again; observers are notified. Idempotent.
    pub fn reset(&mut self) {
        self.assert_loaded("reset");

        if let Err(e) = self.storage.remove() {
            tracing::warn!(error = %e, "failed to remove persisted consent");
        }
        self.record = ConsentRecord::default();
        self.decided = false;
        self.force_banner = true;
        self.notify(None);
    }

    /// Force the banner open (the "manage preferences" action) without
    /// touching the persisted record.
    pub fn show_banner(&mut self) {
        self.assert_loaded("show_banner");
        self.force_banner = true;
    }

    /// Close a banner opened by [`show_banner`](Self::show_banner). Only
    /// returns to `Decided` if a decision exists; otherwise the banner
    /// stays due.
    pub fn dismiss_banner(&mut self) {
        self.assert_loaded("dismiss_banner");
        self.force_banner = false;
    }

    pub fn is_banner_visible(&self) -> bool {
        self.assert_loaded("is_banner_visible");
        !self.decided || self.force_banner
    }

    pub fn state(&self) -> StoreState {
        if !self.loaded {
            StoreState::Uninitialized
        } else if !self.decided || self.force_banner {
            StoreState::AwaitingDecision
        } else {
            StoreState::Decided
        }
    }

    /// Read-only copy of the current record.
    pub fn snapshot(&self) -> ConsentRecord {
        self.record.clone()
    }

    /// Whether the user has committed an explicit decision.
    pub fn has_decided(&self) -> bool {
        self.decided && self.record.is_decided()
    }

    /// Whether a cookie category is currently enabled. Optional categories
    /// stay disabled until a decision exists; `necessary` is always on.
    pub fn category_enabled(&self, category: CookieCategory) -> bool {
        match category {
            CookieCategory::Necessary => true,
            CookieCategory::Performance => self.decided && self.record.performance,
            CookieCategory::Functional => self.decided && self.record.functional,
        }
    }

    pub fn inventory(&self) -> &CookieInventory {
        &self.inventory
    }

    /// Register an observer, invoked synchronously after every committed
    /// `update`/`reset`, in registration order.
    pub fn subscribe(&mut self, listener: impl FnMut(&ConsentEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove an observer. Returns false if the id was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn assert_loaded(&self, operation: &str) {
        assert!(
            self.loaded,
            "ConsentStore::{operation} called before load(); \
             construct the store and call load() during application startup"
        );
    }

    fn read_stored(&mut self) -> Option<ConsentRecord> {
        let blob = match self.storage.read() {
            Ok(Some(blob)) => blob,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "consent storage unreadable, treating as absent");
                return None;
            }
        };

        match serde_json::from_str::<ConsentRecord>(&blob) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(error = %e, "malformed stored consent, clearing");
                if let Err(e) = self.storage.remove() {
                    tracing::warn!(error = %e, "failed to clear malformed consent");
                }
                None
            }
        }
    }

    fn persist(&self) {
        let blob = match serde_json::to_string(&self.record) {
            Ok(blob) => blob,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize consent record");
                return;
            }
        };
        if let Err(e) = self.storage.write(&blob) {
            tracing::warn!(error = %e, "failed to persist consent, keeping in-memory state");
        }
    }

    fn notify(&mut self, purge: Option<PurgeReport>) {
        let event = ConsentEvent {
            record: self.record.clone(),
            purge,
        };
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }
}
