//! Reconcilers that drive Penguin resources through their lifecycle.
//!
//! Each resource kind turns one create, read, update, or delete request into
//! a sequence of API calls plus bounded polling until the remote system
//! converges. Reconcilers talk to the service only through
//! [`ProvisioningApi`], so they carry no HTTP knowledge of their own.

mod api;
mod bandwidth_package;
mod elastic_ip;
mod error;
mod virtual_machine;

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

pub use api::{ApiFuture, ProvisioningApi};
pub use bandwidth_package::{
    BandwidthPackageSelectionPlan, BandwidthPackageSelectionReconciler,
    BandwidthPackageSelectionState, DEFAULT_NETWORK_TYPE,
};
pub use elastic_ip::{ElasticIpPlan, ElasticIpReconciler, ElasticIpState};
pub use error::ResourceError;
pub use virtual_machine::{
    VirtualMachineObserved, VirtualMachinePlan, VirtualMachineReconciler, VirtualMachineState,
};

/// Interval between status polls while waiting for the service to converge.
pub const POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Upper bound on a single provisioning or teardown wait.
pub const WAIT_TIMEOUT: Duration = Duration::from_secs(600);

/// The closed set of resource kinds managed by this crate.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ResourceKind {
    /// A virtual machine instance.
    VirtualMachine,
    /// An elastic (public) IP address.
    ElasticIp,
    /// A point-in-time choice of shared bandwidth package.
    BandwidthPackageSelection,
}

impl ResourceKind {
    /// Type name under which the host tool addresses this kind.
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::VirtualMachine => "penguin_tencentcloud_virtual_machine",
            Self::ElasticIp => "penguin_tencentcloud_elastic_ip",
            Self::BandwidthPackageSelection => "penguin_tencentcloud_bandwidth_package_selection",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::VirtualMachine => "virtual machine",
            Self::ElasticIp => "elastic IP",
            Self::BandwidthPackageSelection => "bandwidth package selection",
        })
    }
}

/// Result of refreshing a resource from the service.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReadOutcome<S> {
    /// The resource exists; carries the refreshed state.
    Present(S),
    /// The resource no longer exists remotely and should be purged from
    /// the caller's state store.
    Gone,
}

/// Future returned by reconciler operations.
pub type ReconcileFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, ResourceError>> + Send + 'a>>;

/// Create/read/update/delete lifecycle for one resource kind.
///
/// The caller serialises operations per resource identity; reconcilers do not
/// coordinate concurrent calls against the same remote object.
pub trait Reconciler {
    /// Desired attributes supplied by the caller.
    type Plan;
    /// Recorded state persisted by the caller between invocations.
    type State;

    /// Kind of resource this reconciler manages.
    fn kind(&self) -> ResourceKind;

    /// Creates the resource and returns its initial state.
    fn create<'a>(&'a self, plan: &'a Self::Plan) -> ReconcileFuture<'a, Self::State>;

    /// Refreshes recorded state from the service.
    fn read<'a>(&'a self, state: &'a Self::State) -> ReconcileFuture<'a, ReadOutcome<Self::State>>;

    /// Applies in-place changes from `plan` to an existing resource.
    fn update<'a>(
        &'a self,
        plan: &'a Self::Plan,
        prior: &'a Self::State,
    ) -> ReconcileFuture<'a, Self::State>;

    /// Destroys the resource. Deleting something already gone succeeds.
    fn delete<'a>(&'a self, state: &'a Self::State) -> ReconcileFuture<'a, ()>;
}
