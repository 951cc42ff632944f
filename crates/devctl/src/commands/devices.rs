//! Device command handlers.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use devctl_api::{ApiClient, NewDevice};
use devctl_core::{
    DeviceStatus, DeviceStore, NotificationLevel, PaginationUpdate, SearchFilter,
};

use crate::cli::{DeviceStatusArg, DevicesArgs, DevicesCommand, GlobalOpts, ListArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Argument translation ────────────────────────────────────────────

fn status_from_arg(arg: DeviceStatusArg) -> DeviceStatus {
    match arg {
        DeviceStatusArg::Activated => DeviceStatus::Activated,
        DeviceStatusArg::Inactivated => DeviceStatus::Inactivated,
        DeviceStatusArg::Disabled => DeviceStatus::Disabled,
        DeviceStatusArg::Scrapped => DeviceStatus::Scrapped,
    }
}

fn parse_time(field: &str, value: &str) -> Result<DateTime<Utc>, CliError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| CliError::Validation {
            field: field.into(),
            reason: format!("expected RFC 3339 timestamp: {e}"),
        })
}

fn filter_from_args(args: &ListArgs) -> Result<SearchFilter, CliError> {
    Ok(SearchFilter {
        sn: args.sn.clone().unwrap_or_default(),
        vendor_name: args.vendor.clone().unwrap_or_default(),
        status: args.status.map(status_from_arg),
        start_time: args
            .since
            .as_deref()
            .map(|v| parse_time("since", v))
            .transpose()?,
        end_time: args
            .until
            .as_deref()
            .map(|v| parse_time("until", v))
            .transpose()?,
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    api: Arc<ApiClient>,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::List(list) => {
            let store = DeviceStore::new(Arc::clone(&api));
            store.set_filter(filter_from_args(&list)?);

            // One fetch, with pagination merged in. Errors surface as
            // notifications rather than a return value.
            let mut notes = store.notifications();
            util::with_spinner(
                api.busy(),
                "Fetching devices...",
                global.quiet,
                store.update_pagination(PaginationUpdate {
                    page_num: list.page,
                    page_size: list.page_size,
                }),
            )
            .await;

            let mut failure = None;
            while let Ok(note) = notes.try_recv() {
                match note.level {
                    NotificationLevel::Error => {
                        failure.get_or_insert(note.message);
                    }
                    NotificationLevel::Info => {
                        if !global.quiet {
                            eprintln!("{}", note.message);
                        }
                    }
                }
            }
            if let Some(message) = failure {
                return Err(CliError::RequestFailed { message });
            }

            let devices = store.devices();
            let color = output::should_color(&global.color);
            let out = output::render_devices(&global.output, devices.as_slice(), color);
            output::print_output(&out, global.quiet);

            if !global.quiet && matches!(global.output, crate::cli::OutputFormat::Table) {
                let p = store.pagination();
                eprintln!("Page {} ({} total)", p.page_num, p.total);
            }
            Ok(())
        }

        DevicesCommand::Add {
            sn,
            device_type,
            vendor,
            model,
            status,
            from_file,
        } => {
            let payload = match from_file {
                Some(path) => util::read_json_file::<NewDevice>(&path)?,
                None => NewDevice {
                    // required_unless_present guarantees these are set
                    sn: sn.unwrap_or_default(),
                    device_type: device_type.unwrap_or_default(),
                    vendor_name: vendor.unwrap_or_default(),
                    product_model: model,
                    status: status.map(status_from_arg),
                },
            };

            util::with_spinner(
                api.busy(),
                "Registering device...",
                global.quiet,
                api.add_device(&payload),
            )
            .await
            .map_err(devctl_core::CoreError::from)?;

            if !global.quiet {
                eprintln!("Device {} registered", payload.sn);
            }
            Ok(())
        }

        DevicesCommand::Remove { sn } => {
            if !util::confirm(&format!("Remove device {sn}?"), global.yes)? {
                return Ok(());
            }

            let store = DeviceStore::new(Arc::clone(&api));
            util::with_spinner(
                api.busy(),
                "Removing device...",
                global.quiet,
                store.delete(&sn),
            )
            .await?;

            if !global.quiet {
                eprintln!("Device {sn} removed");
            }
            Ok(())
        }
    }
}
