// Device endpoints
//
// Pure mapping of the three device operations to their routes; no
// business logic lives here and errors propagate unchanged from the
// client wrapper.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{DevicePage, DeviceQuery, NewDevice};

impl ApiClient {
    /// Fetch one page of the device list.
    ///
    /// `GET device/fetch` with pagination + filter query parameters.
    pub async fn list_devices(&self, query: &DeviceQuery) -> Result<DevicePage, Error> {
        debug!(page = query.page_num, size = query.page_size, "listing devices");
        self.get("device/fetch", &query.params()).await
    }

    /// Register a new device record.
    ///
    /// `POST device/add` with the record as JSON body.
    pub async fn add_device(&self, device: &NewDevice) -> Result<(), Error> {
        debug!(sn = %device.sn, "adding device");
        self.post_unit("device/add", device).await
    }

    /// Delete a device record by identifier.
    ///
    /// `DELETE device/{id}`
    pub async fn delete_device(&self, id: &str) -> Result<(), Error> {
        debug!(id, "deleting device");
        self.delete_unit(&format!("device/{id}")).await
    }
}
