//! Wire types for the Penguin API.
//!
//! Optional fields are omitted from request bodies when `None`, so an unset
//! value stays distinguishable from an explicit zero or empty string.

use serde::{Deserialize, Serialize};

/// Response from `GET /_internal/health`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct InternalHealth {
    /// Overall service status.
    pub status: String,
    /// Database connectivity status.
    pub database: String,
}

/// Availability zone known to the service.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Zone {
    /// Region identifier (for example `ap-guangzhou`).
    pub region: String,
    /// Display name of the region.
    pub region_name: String,
    /// Zone identifier (for example `ap-guangzhou-1`).
    pub zone: String,
    /// Display name of the zone.
    pub zone_name: String,
    /// Numeric zone identifier, when the service reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
    /// Availability state (for example `AVAILABLE`).
    pub state: String,
}

/// Response from `GET /tencentcloud/zones`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct ZonesResponse {
    /// Zones available to the caller.
    pub zones: Vec<Zone>,
}

/// Shared bandwidth package chosen by the service.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BandwidthPackageSelection {
    /// Bandwidth package identifier.
    pub id: String,
    /// Remaining capacity of the package at selection time.
    pub available_count: i64,
}

/// Payload for `POST /tencentcloud/vms`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateVirtualMachineRequest {
    /// Instance display name.
    pub name: String,
    /// Availability zone.
    pub zone: String,
    /// Instance type (for example `SA5.MEDIUM4`).
    pub instance_type: String,
    /// Security group identifier.
    pub security_group: String,
    /// System image identifier.
    pub system_image: String,
    /// VPC identifier.
    #[serde(rename = "vpcId")]
    pub vpc_id: String,
    /// Subnet identifier.
    pub subnet_id: String,
    /// Fixed private address inside the subnet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_ip_address: Option<String>,
    /// System disk size in GiB.
    #[serde(rename = "systemDiskSize")]
    pub system_disk_size_gib: i64,
    /// Shared bandwidth package to bill traffic against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_bandwidth_package_id: Option<String>,
    /// Elastic IP to attach instead of a public address.
    #[serde(rename = "elasticIpId", skip_serializing_if = "Option::is_none")]
    pub elastic_ip_id: Option<String>,
    /// Public bandwidth limit in Mbps.
    #[serde(rename = "bandwidthLimit", skip_serializing_if = "Option::is_none")]
    pub bandwidth_limit_mbps: Option<i64>,
    /// Billing mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge_type: Option<String>,
    /// Initial root password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_login_password: Option<String>,
    /// Total transfer quota in KB.
    #[serde(rename = "totalTransfer")]
    pub total_transfer_kb: i64,
    /// Cloud project identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    /// Prepaid period in months.
    #[serde(rename = "period", skip_serializing_if = "Option::is_none")]
    pub period_months: Option<i64>,
    /// Cloud-init user data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_init_data: Option<String>,
    /// Whether the instance renews automatically.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_renew: Option<bool>,
}

/// Response from `POST /tencentcloud/vms`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct CreateVirtualMachineResponse {
    /// Identifier assigned by the service.
    pub id: String,
}

/// Payload for `POST /tencentcloud/eips`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateElasticIpRequest {
    /// Region to allocate the address in.
    pub region: String,
    /// Shared bandwidth package to bill traffic against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_bandwidth_package_id: Option<String>,
    /// Bandwidth limit in Mbps.
    #[serde(rename = "bandwidthLimit")]
    pub bandwidth_limit_mbps: i64,
    /// Display name of the address.
    pub address_name: String,
}

/// Response from `POST /tencentcloud/eips`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct CreateElasticIpResponse {
    /// Identifier assigned by the service.
    pub id: String,
    /// Allocated public address.
    pub address: String,
}

/// Payload for `POST /tencentcloud/vms/{id}/bandwidth`.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct AdjustBandwidthRequest {
    /// New bandwidth limit in Mbps.
    #[serde(rename = "bandwidthLimit")]
    pub bandwidth_limit_mbps: i64,
}

/// Payload for `POST /tencentcloud/vms/{id}/renew`.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenewVirtualMachineRequest {
    /// Months to extend the instance by.
    #[serde(rename = "period", skip_serializing_if = "Option::is_none")]
    pub period_months: Option<i64>,
    /// Whether the instance renews automatically afterwards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_renew: Option<bool>,
}

/// Response from `POST /tencentcloud/vms/{id}/renew`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenewVirtualMachineResponse {
    /// New expiry timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired_at: Option<String>,
}

/// Payload for `POST /tencentcloud/vms/{id}/reinstall`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReinstallVirtualMachineRequest {
    /// Image to reinstall from.
    pub image_id: String,
    /// Cloud-init user data for the new system disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_init_data: Option<String>,
}

/// Payload for `POST /tencentcloud/vms/{id}/reset-password`.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResetVirtualMachinePasswordRequest {
    /// Stop the instance first when it is running.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_stop: Option<bool>,
}

/// Response from `POST /tencentcloud/vms/{id}/reset-password`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct ResetVirtualMachinePasswordResponse {
    /// Newly generated password.
    pub password: String,
}

/// Response from `GET /tencentcloud/vms/{id}/status`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VirtualMachineStatus {
    /// Service-side identifier.
    pub id: String,
    /// Availability zone.
    pub zone: String,
    /// Cloud provider instance identifier.
    pub instance_id: String,
    /// Instance type.
    pub instance_type: String,
    /// Lifecycle state (for example `RUNNING`).
    pub instance_state: String,
    /// Restriction state reported by the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restrict_state: Option<String>,
    /// Billing behaviour while stopped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_charging_mode: Option<String>,
    /// Renewal flag reported by the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renew_flag: Option<String>,
    /// Number of vCPUs.
    pub cpu: i64,
    /// Memory in GiB.
    #[serde(rename = "memoryGiB")]
    pub memory_gib: i64,
    /// System disk size in GiB.
    #[serde(rename = "systemDiskSizeGiB")]
    pub system_disk_size_gib: i64,
    /// Private addresses.
    pub private_ips: Vec<String>,
    /// Public addresses.
    pub public_ips: Vec<String>,
    /// Image the instance booted from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    /// Operating system name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_name: Option<String>,
    /// Creation timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Expiry timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired_at: Option<String>,
    /// Total transfer quota in KB.
    pub total_transfer: i64,
    /// Transfer consumed in KB.
    pub used_transfer: i64,
    /// Outbound transfer in KB.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_transfer: Option<i64>,
    /// Inbound transfer in KB.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rx_transfer: Option<i64>,
    /// Transfer remaining in KB.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_transfer: Option<i64>,
    /// Default login password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Default login user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_login_user: Option<String>,
}

/// Response from `GET /tencentcloud/vms/{id}/vnc`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct VirtualMachineVnc {
    /// Console URL.
    pub url: String,
}

/// Response from `GET /tencentcloud/vms/{id}/metrics`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VirtualMachineMetrics {
    /// Aggregation window (for example `1h`).
    pub range: String,
    /// Average CPU utilisation in percent.
    pub cpu_average_percent: f64,
    /// Average memory utilisation in percent.
    pub memory_average_percent: f64,
    /// Outbound traffic in KB.
    #[serde(rename = "networkOutKB")]
    pub network_out_kb: i64,
    /// Inbound traffic in KB.
    #[serde(rename = "networkInKB")]
    pub network_in_kb: i64,
    /// Window start timestamp.
    pub start: String,
    /// Window end timestamp.
    pub end: String,
}

/// Payload for `POST /auth/jwt`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IssueJwtRequest {
    /// Transfer quota granted to the token in KB.
    #[serde(rename = "maxTransferKB", skip_serializing_if = "Option::is_none")]
    pub max_transfer_kb: Option<i64>,
    /// Instance types the token may create.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_instance_types: Vec<String>,
    /// Zones the token may create instances in.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_zones: Vec<String>,
    /// Highest bandwidth limit the token may request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bandwidth_mbps: Option<i64>,
    /// Project the token is scoped to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    /// Token lifetime in minutes.
    pub ttl_minutes: i64,
}

/// Response from `POST /auth/jwt`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IssueJwtResponse {
    /// Signed token.
    pub token: String,
    /// Expiry timestamp.
    pub expires_at: String,
}
