// Wire types for the console backend.
//
// Every endpoint wraps its payload in the `{Code, Data, Message}`
// envelope. The device schema is owned by the backend; fields use
// `#[serde(default)]` liberally so additions on the wire never break
// this layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Envelope `Code` value that signals success.
pub const SUCCESS_CODE: i32 = 200;

// ── Response envelope ────────────────────────────────────────────────

/// Standard backend response envelope.
///
/// ```json
/// { "Code": 200, "Data": { ... }, "Message": "" }
/// ```
///
/// Decoded at the client boundary into a discriminated result instead
/// of being duck-typed by each caller.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(rename = "Code")]
    pub code: i32,
    #[serde(rename = "Data", default = "Option::default")]
    pub data: Option<T>,
    #[serde(rename = "Message", default)]
    pub message: String,
}

impl<T> Envelope<T> {
    /// Split the envelope into success payload or application error.
    pub fn into_result(self) -> Result<Option<T>, crate::Error> {
        if self.code == SUCCESS_CODE {
            Ok(self.data)
        } else {
            Err(crate::Error::Api {
                code: self.code,
                message: self.message,
            })
        }
    }
}

// ── Device records ───────────────────────────────────────────────────

/// Lifecycle status of a device record.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DeviceStatus {
    Activated,
    Inactivated,
    Disabled,
    Scrapped,
}

/// One row of the device list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    pub sn: String,
    #[serde(default)]
    pub device_type: String,
    #[serde(default)]
    pub vendor_name: String,
    #[serde(default)]
    pub product_model: String,
    pub status: DeviceStatus,
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
}

/// `Data` payload of a list response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DevicePage {
    #[serde(default)]
    pub list: Vec<DeviceRecord>,
    #[serde(default)]
    pub total: i64,
}

/// Creation payload for `POST device/add`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDevice {
    pub sn: String,
    pub device_type: String,
    pub vendor_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DeviceStatus>,
}

// ── List query ───────────────────────────────────────────────────────

/// Query parameters for `GET device/fetch`.
///
/// Pagination always goes on the wire; filters are omitted when unset
/// so the backend sees only what the operator actually asked for.
#[derive(Debug, Clone)]
pub struct DeviceQuery {
    pub page_num: u32,
    pub page_size: u32,
    pub sn: Option<String>,
    pub vendor_name: Option<String>,
    pub status: Option<DeviceStatus>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl Default for DeviceQuery {
    fn default() -> Self {
        Self {
            page_num: 1,
            page_size: 10,
            sn: None,
            vendor_name: None,
            status: None,
            start_time: None,
            end_time: None,
        }
    }
}

impl DeviceQuery {
    /// Render the query string pairs for the list endpoint.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("pageNum", self.page_num.to_string()),
            ("pageSize", self.page_size.to_string()),
        ];
        if let Some(ref sn) = self.sn {
            params.push(("sn", sn.clone()));
        }
        if let Some(ref vendor) = self.vendor_name {
            params.push(("vendorName", vendor.clone()));
        }
        if let Some(status) = self.status {
            params.push(("status", status.to_string()));
        }
        if let Some(start) = self.start_time {
            params.push(("startTime", start.to_rfc3339()));
        }
        if let Some(end) = self.end_time {
            params.push(("endTime", end.to_rfc3339()));
        }
        params
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_success_yields_data() {
        let env: Envelope<DevicePage> = serde_json::from_value(json!({
            "Code": 200,
            "Data": { "list": [], "total": 0 },
            "Message": ""
        }))
        .unwrap();
        let page = env.into_result().unwrap().unwrap();
        assert_eq!(page.total, 0);
    }

    #[test]
    fn envelope_failure_carries_code_and_message() {
        let env: Envelope<DevicePage> = serde_json::from_value(json!({
            "Code": 3002,
            "Data": null,
            "Message": "device not found"
        }))
        .unwrap();
        match env.into_result() {
            Err(crate::Error::Api { code, message }) => {
                assert_eq!(code, 3002);
                assert_eq!(message, "device not found");
            }
            other => panic!("expected Api error, got: {other:?}"),
        }
    }

    #[test]
    fn envelope_tolerates_missing_data_and_message() {
        let env: Envelope<DevicePage> =
            serde_json::from_value(json!({ "Code": 200 })).unwrap();
        assert!(env.into_result().unwrap().is_none());
    }

    #[test]
    fn device_record_parses_wire_shape() {
        let record: DeviceRecord = serde_json::from_value(json!({
            "sn": "SN-001",
            "deviceType": "speaker",
            "vendorName": "acme",
            "productModel": "X1",
            "status": "activated",
            "createTime": "2025-06-01T08:00:00Z"
        }))
        .unwrap();
        assert_eq!(record.sn, "SN-001");
        assert_eq!(record.status, DeviceStatus::Activated);
        assert!(record.create_time.is_some());
    }

    #[test]
    fn default_query_is_first_page_of_ten() {
        let params = DeviceQuery::default().params();
        assert_eq!(
            params,
            vec![("pageNum", "1".to_owned()), ("pageSize", "10".to_owned())]
        );
    }

    #[test]
    fn filters_are_appended_when_set() {
        let query = DeviceQuery {
            sn: Some("SN-9".into()),
            vendor_name: Some("acme".into()),
            status: Some(DeviceStatus::Disabled),
            ..DeviceQuery::default()
        };
        let params = query.params();
        assert!(params.contains(&("sn", "SN-9".to_owned())));
        assert!(params.contains(&("vendorName", "acme".to_owned())));
        assert!(params.contains(&("status", "disabled".to_owned())));
    }

    #[test]
    fn status_round_trips_through_strings() {
        let parsed: DeviceStatus = "Scrapped".parse().unwrap();
        assert_eq!(parsed, DeviceStatus::Scrapped);
        assert_eq!(parsed.to_string(), "scrapped");
    }
}
