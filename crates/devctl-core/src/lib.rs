// devctl-core: Device state store between devctl-api and consumers.

pub mod error;
pub mod notify;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::CoreError;
pub use notify::{Notification, NotificationLevel};
pub use store::{DeviceStore, Pagination, PaginationUpdate, SearchFilter};

// Wire types are the domain model here: the device schema is owned by
// the backend and passes through this layer opaquely.
pub use devctl_api::{DeviceQuery, DeviceRecord, DeviceStatus, NewDevice};
