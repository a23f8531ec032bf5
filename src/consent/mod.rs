//! Consent state management: the persisted record, storage backends, the
//! store state machine, and best-effort purge of declined cookies.
//!
//! One [`ConsentStore`](store::ConsentStore) instance exists per session.
//! It loads the persisted [`ConsentRecord`](record::ConsentRecord) (valid
//! for [`RETENTION`](record::RETENTION) under the current
//! [`CONSENT_VERSION`](record::CONSENT_VERSION)), decides whether the
//! banner must show, and notifies observers after every committed
//! mutation. Persistence failures degrade to an in-memory session and are
//! never surfaced to callers.

pub mod purge;
pub mod record;
pub mod storage;
pub mod store;

pub use purge::{CookiePurger, PurgeReport};
pub use record::{ConsentRecord, ConsentUpdate, CONSENT_STORAGE_KEY, CONSENT_VERSION, RETENTION};
pub use storage::{ConsentStorage, FileStorage, LayeredStorage, MemoryStorage};
pub use store::{BannerPolicy, ConsentEvent, ConsentStore, StoreState, SubscriptionId};
