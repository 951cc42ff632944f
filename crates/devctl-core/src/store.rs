// ── Device store ──
//
// Holds the UI-relevant device state (list, pagination, search filter,
// loading flag) and the actions that mutate it. One store instance is
// constructed per application and passed to consumers explicitly; all
// state lives behind watch channels so views can observe changes.

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tracing::{debug, warn};

use devctl_api::{ApiClient, DeviceQuery, DeviceRecord, DeviceStatus};

use crate::error::CoreError;
use crate::notify::Notification;

const NOTIFY_CHANNEL_SIZE: usize = 32;

// ── State fragments ──────────────────────────────────────────────────

/// Pagination state, bound to the list view's pager.
///
/// `total` reflects the last fetch outcome: the backend's count after a
/// successful fetch, zero after a failed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page_num: u32,
    pub page_size: u32,
    pub total: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_num: 1,
            page_size: 10,
            total: 0,
        }
    }
}

/// Partial pagination change; only the provided fields are merged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaginationUpdate {
    pub page_num: Option<u32>,
    pub page_size: Option<u32>,
}

/// Search filter state, bound to the search bar.
///
/// Empty strings mean "no filter", matching how form fields behave;
/// they are dropped from the query before it goes on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub sn: String,
    pub vendor_name: String,
    pub status: Option<DeviceStatus>,
    pub start_time: Option<chrono::DateTime<chrono::Utc>>,
    pub end_time: Option<chrono::DateTime<chrono::Utc>>,
}

// ── Store ────────────────────────────────────────────────────────────

/// The device store.
///
/// Fetch failures are surfaced as [`Notification`]s and swallowed --
/// the list is cleared, the total reset, and the loading flag always
/// returns to `false`. Overlapping fetches are not sequenced: whichever
/// response arrives last wins, and in-flight requests cannot be
/// cancelled.
pub struct DeviceStore {
    api: Arc<ApiClient>,
    devices: watch::Sender<Arc<Vec<DeviceRecord>>>,
    loading: watch::Sender<bool>,
    pagination: watch::Sender<Pagination>,
    filter: watch::Sender<SearchFilter>,
    notify_tx: broadcast::Sender<Notification>,
}

impl DeviceStore {
    pub fn new(api: Arc<ApiClient>) -> Self {
        let (devices, _) = watch::channel(Arc::new(Vec::new()));
        let (loading, _) = watch::channel(false);
        let (pagination, _) = watch::channel(Pagination::default());
        let (filter, _) = watch::channel(SearchFilter::default());
        let (notify_tx, _) = broadcast::channel(NOTIFY_CHANNEL_SIZE);

        Self {
            api,
            devices,
            loading,
            pagination,
            filter,
            notify_tx,
        }
    }

    /// The underlying API client (shared with other consumers).
    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn devices(&self) -> Arc<Vec<DeviceRecord>> {
        self.devices.borrow().clone()
    }

    pub fn loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn pagination(&self) -> Pagination {
        *self.pagination.borrow()
    }

    pub fn filter(&self) -> SearchFilter {
        self.filter.borrow().clone()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_devices(&self) -> watch::Receiver<Arc<Vec<DeviceRecord>>> {
        self.devices.subscribe()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    pub fn subscribe_pagination(&self) -> watch::Receiver<Pagination> {
        self.pagination.subscribe()
    }

    /// Subscribe to transient user notifications.
    pub fn notifications(&self) -> broadcast::Receiver<Notification> {
        self.notify_tx.subscribe()
    }

    // ── Filter mutation (UI-driven) ──────────────────────────────────

    /// Replace the search filter. Does not fetch; the view decides when.
    pub fn set_filter(&self, filter: SearchFilter) {
        self.filter.send_replace(filter);
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Fetch the device list with the current pagination + filter.
    ///
    /// On success the list and total are replaced; on failure a
    /// notification is emitted, the list is cleared and the total reset.
    /// The loading flag is cleared on every path.
    pub async fn fetch(&self) {
        let query = self.assemble_query();
        debug!(
            page = query.page_num,
            size = query.page_size,
            "fetching device list"
        );

        self.loading.send_replace(true);

        match self.api.list_devices(&query).await {
            Ok(page) => {
                self.pagination.send_modify(|p| p.total = page.total);
                self.devices.send_replace(Arc::new(page.list));
            }
            Err(err) => {
                warn!(error = %err, "device list fetch failed");
                self.notify(Notification::error(err.user_message()));
                self.devices.send_replace(Arc::new(Vec::new()));
                self.pagination.send_modify(|p| p.total = 0);
            }
        }

        self.loading.send_replace(false);
    }

    /// Clear every filter field, reset to the first page, and fetch.
    pub async fn reset_filters(&self) {
        self.filter.send_replace(SearchFilter::default());
        self.pagination.send_modify(|p| p.page_num = 1);
        self.fetch().await;
    }

    /// Merge a partial pagination change and fetch.
    pub async fn update_pagination(&self, update: PaginationUpdate) {
        self.pagination.send_modify(|p| {
            if let Some(page_num) = update.page_num {
                p.page_num = page_num;
            }
            if let Some(page_size) = update.page_size {
                p.page_size = page_size;
            }
        });
        self.fetch().await;
    }

    /// Delete a device record.
    ///
    /// No automatic list refresh: the caller decides whether and when
    /// to re-fetch.
    pub async fn delete(&self, id: &str) -> Result<(), CoreError> {
        self.api.delete_device(id).await?;
        Ok(())
    }

    // ── Helpers ──────────────────────────────────────────────────────

    /// Assemble the list query from current pagination + filter state.
    fn assemble_query(&self) -> DeviceQuery {
        let pagination = *self.pagination.borrow();
        let filter = self.filter.borrow().clone();

        DeviceQuery {
            page_num: pagination.page_num,
            page_size: pagination.page_size,
            sn: non_empty(filter.sn),
            vendor_name: non_empty(filter.vendor_name),
            status: filter.status,
            start_time: filter.start_time,
            end_time: filter.end_time,
        }
    }

    fn notify(&self, notification: Notification) {
        // Send fails only when nobody is subscribed; that is fine.
        let _ = self.notify_tx.send(notification);
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn offline_store() -> DeviceStore {
        // Unbound port: every request fails with a connection error.
        let api = ApiClient::from_reqwest("http://127.0.0.1:9", reqwest_client()).unwrap();
        DeviceStore::new(Arc::new(api))
    }

    fn reqwest_client() -> reqwest::Client {
        reqwest::Client::new()
    }

    #[test]
    fn defaults_are_first_page_of_ten() {
        let store = offline_store();
        let p = store.pagination();
        assert_eq!((p.page_num, p.page_size, p.total), (1, 10, 0));
        assert!(store.devices().is_empty());
        assert!(!store.loading());
        assert_eq!(store.filter(), SearchFilter::default());
    }

    #[test]
    fn set_filter_replaces_state_without_fetch() {
        let store = offline_store();
        let filter = SearchFilter {
            sn: "SN-1".into(),
            vendor_name: "acme".into(),
            ..SearchFilter::default()
        };
        store.set_filter(filter.clone());
        assert_eq!(store.filter(), filter);
    }

    #[test]
    fn assemble_query_drops_empty_filter_fields() {
        let store = offline_store();
        store.set_filter(SearchFilter {
            sn: "SN-1".into(),
            ..SearchFilter::default()
        });
        let query = store.assemble_query();
        assert_eq!(query.sn.as_deref(), Some("SN-1"));
        assert_eq!(query.vendor_name, None);
        assert_eq!(query.status, None);
    }

    #[tokio::test]
    async fn failed_fetch_clears_state_and_notifies() {
        let store = offline_store();
        let mut notifications = store.notifications();

        store.fetch().await;

        assert!(store.devices().is_empty());
        assert_eq!(store.pagination().total, 0);
        assert!(!store.loading());

        let n = notifications.try_recv().unwrap();
        assert!(n.is_error());
        assert_eq!(n.message, "Network error, check your connection");
    }

    #[tokio::test]
    async fn reset_filters_restores_defaults_and_first_page() {
        let store = offline_store();
        store.set_filter(SearchFilter {
            sn: "SN-1".into(),
            vendor_name: "acme".into(),
            status: Some(DeviceStatus::Disabled),
            ..SearchFilter::default()
        });
        store.pagination.send_modify(|p| p.page_num = 7);

        store.reset_filters().await;

        assert_eq!(store.filter(), SearchFilter::default());
        assert_eq!(store.pagination().page_num, 1);
    }

    #[tokio::test]
    async fn update_pagination_merges_only_provided_fields() {
        let store = offline_store();

        store
            .update_pagination(PaginationUpdate {
                page_size: Some(20),
                ..PaginationUpdate::default()
            })
            .await;

        let p = store.pagination();
        assert_eq!(p.page_size, 20);
        assert_eq!(p.page_num, 1);
    }
}
