//! Command-line interface definitions for the `penguin` binary.
//!
//! This module centralises the clap parser structures so both the main binary
//! and the build script can reuse them when generating the manual page.

use clap::{Args, Parser, Subcommand};

/// Top-level CLI for the `penguin` binary.
#[derive(Debug, Parser)]
#[command(
    name = "penguin",
    about = "Query and operate Penguin cloud resources from the command line",
    arg_required_else_help = true
)]
pub(crate) enum Cli {
    /// Check that the API is reachable.
    #[command(name = "health")]
    Health,
    /// Show service and database status.
    #[command(name = "internal-health")]
    InternalHealth,
    /// List availability zones.
    #[command(name = "zones")]
    Zones,
    /// Ask the service for the best shared bandwidth package right now.
    #[command(name = "bandwidth-package")]
    BandwidthPackage(BandwidthPackageCommand),
    /// Inspect or operate on a virtual machine.
    #[command(subcommand)]
    Vm(VmCommand),
    /// Issue a scoped JWT.
    #[command(name = "jwt")]
    Jwt(JwtCommand),
}

/// Arguments for `penguin bandwidth-package`.
#[derive(Debug, Args)]
pub(crate) struct BandwidthPackageCommand {
    /// Region to select a package in.
    #[arg(long)]
    pub(crate) region: String,
    /// Network type of the package (for example `BGP`).
    #[arg(long, value_name = "TYPE")]
    pub(crate) network_type: Option<String>,
}

/// Virtual machine subcommands.
#[derive(Debug, Subcommand)]
pub(crate) enum VmCommand {
    /// Show the current status of a virtual machine.
    #[command(name = "status")]
    Status(VmTarget),
    /// Show utilisation metrics for a virtual machine.
    #[command(name = "metrics")]
    Metrics(VmMetricsCommand),
    /// Show the VNC console URL for a virtual machine.
    #[command(name = "vnc")]
    Vnc(VmTarget),
    /// Extend a prepaid virtual machine.
    #[command(name = "renew")]
    Renew(VmRenewCommand),
    /// Reinstall the system disk from an image.
    #[command(name = "reinstall")]
    Reinstall(VmReinstallCommand),
    /// Generate a new root password.
    #[command(name = "reset-password")]
    ResetPassword(VmResetPasswordCommand),
    /// Reset the transfer usage counter.
    #[command(name = "reset-transfer")]
    ResetTransfer(VmTarget),
}

/// Identifies a single virtual machine.
#[derive(Debug, Args)]
pub(crate) struct VmTarget {
    /// Virtual machine identifier.
    pub(crate) id: String,
}

/// Arguments for `penguin vm metrics`.
#[derive(Debug, Args)]
pub(crate) struct VmMetricsCommand {
    /// Virtual machine identifier.
    pub(crate) id: String,
    /// Aggregation window (for example `1h` or `24h`).
    #[arg(long)]
    pub(crate) range: Option<String>,
}

/// Arguments for `penguin vm renew`.
#[derive(Debug, Args)]
pub(crate) struct VmRenewCommand {
    /// Virtual machine identifier.
    pub(crate) id: String,
    /// Months to extend the instance by.
    #[arg(long, value_name = "MONTHS")]
    pub(crate) period: Option<i64>,
    /// Renew automatically afterwards.
    #[arg(long)]
    pub(crate) auto_renew: Option<bool>,
}

/// Arguments for `penguin vm reinstall`.
#[derive(Debug, Args)]
pub(crate) struct VmReinstallCommand {
    /// Virtual machine identifier.
    pub(crate) id: String,
    /// Image to reinstall from.
    #[arg(long, value_name = "IMAGE")]
    pub(crate) image_id: String,
    /// Cloud-init user data for the new system disk.
    #[arg(long, value_name = "USER_DATA")]
    pub(crate) cloud_init_data: Option<String>,
}

/// Arguments for `penguin vm reset-password`.
#[derive(Debug, Args)]
pub(crate) struct VmResetPasswordCommand {
    /// Virtual machine identifier.
    pub(crate) id: String,
    /// Stop the instance first when it is running.
    #[arg(long)]
    pub(crate) force_stop: bool,
}

/// Arguments for `penguin jwt`.
#[derive(Debug, Args)]
pub(crate) struct JwtCommand {
    /// Token lifetime in minutes.
    #[arg(long, value_name = "MINUTES")]
    pub(crate) ttl_minutes: i64,
    /// Transfer quota granted to the token in KB.
    #[arg(long, value_name = "KB")]
    pub(crate) max_transfer_kb: Option<i64>,
    /// Instance type the token may create. Repeat for several.
    #[arg(long = "allowed-instance-type", value_name = "TYPE")]
    pub(crate) allowed_instance_types: Vec<String>,
    /// Zone the token may create instances in. Repeat for several.
    #[arg(long = "allowed-zone", value_name = "ZONE")]
    pub(crate) allowed_zones: Vec<String>,
    /// Highest bandwidth limit the token may request, in Mbps.
    #[arg(long, value_name = "MBPS")]
    pub(crate) max_bandwidth_mbps: Option<i64>,
    /// Project the token is scoped to.
    #[arg(long)]
    pub(crate) project_id: Option<i64>,
}
