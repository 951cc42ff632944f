//! Clap derive structures for the `devctl` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// devctl -- CLI for the device management console
#[derive(Debug, Parser)]
#[command(
    name = "devctl",
    version,
    about = "Manage console device records from the command line",
    long_about = "A CLI for the device management console backend.\n\n\
        Talks to the same HTTP API as the web admin console: paginated\n\
        device listings with filters, device registration, and removal.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "DEVCTL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend base URL (overrides profile)
    #[arg(long, short = 'u', env = "DEVCTL_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Bearer token
    #[arg(long, env = "DEVCTL_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "DEVCTL_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds
    #[arg(long, env = "DEVCTL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one serial number per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage device records
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Store a bearer token for a profile
    ///
    /// Uses --token when given, otherwise prompts interactively.
    Login,

    /// Remove the stored bearer token for a profile
    Logout,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List device records (paginated)
    #[command(alias = "ls")]
    List(ListArgs),

    /// Register a new device
    Add {
        /// Serial number
        #[arg(long, required_unless_present = "from_file")]
        sn: Option<String>,

        /// Device type (e.g., sensor, gateway)
        #[arg(long = "type", required_unless_present = "from_file")]
        device_type: Option<String>,

        /// Vendor name
        #[arg(long, required_unless_present = "from_file")]
        vendor: Option<String>,

        /// Product model
        #[arg(long)]
        model: Option<String>,

        /// Initial status
        #[arg(long, value_enum)]
        status: Option<DeviceStatusArg>,

        /// Create from JSON file (overrides individual flags)
        #[arg(long, short = 'F', conflicts_with_all = &["sn", "device_type", "vendor"])]
        from_file: Option<PathBuf>,
    },

    /// Remove a device record
    #[command(alias = "rm")]
    Remove {
        /// Serial number
        sn: String,
    },
}

/// Pagination and filter arguments for `devices list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Filter by serial number
    #[arg(long)]
    pub sn: Option<String>,

    /// Filter by vendor name
    #[arg(long)]
    pub vendor: Option<String>,

    /// Filter by lifecycle status
    #[arg(long, value_enum)]
    pub status: Option<DeviceStatusArg>,

    /// Only records created at or after this time (RFC 3339)
    #[arg(long)]
    pub since: Option<String>,

    /// Only records created at or before this time (RFC 3339)
    #[arg(long)]
    pub until: Option<String>,

    /// Page number (1-based)
    #[arg(long)]
    pub page: Option<u32>,

    /// Records per page
    #[arg(long)]
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DeviceStatusArg {
    Activated,
    Inactivated,
    Disabled,
    Scrapped,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config file path
    Path,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
