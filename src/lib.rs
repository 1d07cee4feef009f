//! Core library for the Penguin provisioning tool.
//!
//! The crate exposes an HTTP client for the Penguin cloud API and a set of
//! reconcilers that drive virtual machines, elastic IPs, and bandwidth
//! package selections through their create, read, update, and delete
//! lifecycle, polling the service until it converges.

pub mod client;
pub mod config;
pub mod resource;
pub mod test_support;
pub mod wait;

pub use client::{ApiError, ClientError, Credentials, PenguinClient, PenguinClientBuilder};
pub use config::{ConfigError, PenguinConfig};
pub use resource::{
    BandwidthPackageSelectionReconciler, ElasticIpReconciler, ProvisioningApi, ReadOutcome,
    Reconciler, ResourceError, ResourceKind, VirtualMachineReconciler,
};
pub use wait::{WaitError, wait_until};
