// devctl-api: Async Rust client for the device-management console backend.

pub mod busy;
pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod devices;

pub use busy::{BusyGuard, BusySignal};
pub use client::ApiClient;
pub use error::Error;
pub use models::{
    DevicePage, DeviceQuery, DeviceRecord, DeviceStatus, Envelope, NewDevice,
};
pub use transport::ClientConfig;
