//! Virtual machine reconciler.
//!
//! Creation and deletion are asynchronous on the service side, so both are
//! followed by a bounded status poll. The two polls read "not found"
//! differently: while provisioning it means the instance is not indexed yet,
//! while deleting it means the teardown finished. A plain refresh treats it as
//! the instance having disappeared.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info};

use super::{
    POLL_INTERVAL, ProvisioningApi, ReadOutcome, ReconcileFuture, Reconciler, ResourceError,
    ResourceKind, WAIT_TIMEOUT,
};
use crate::client::{CreateVirtualMachineRequest, VirtualMachineStatus};
use crate::wait::wait_until;

const KIND: ResourceKind = ResourceKind::VirtualMachine;

/// Desired attributes of a virtual machine.
///
/// Everything except `bandwidth_limit_mbps` forces replacement when changed.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VirtualMachinePlan {
    /// Instance display name.
    pub name: String,
    /// Availability zone. Overwritten by the zone the service reports.
    pub zone: String,
    /// Instance type. Overwritten by the type the service reports.
    pub instance_type: String,
    /// Security group identifier.
    pub security_group: String,
    /// System image identifier.
    pub system_image: String,
    /// VPC identifier.
    pub vpc_id: String,
    /// Subnet identifier.
    pub subnet_id: String,
    /// Fixed private address inside the subnet.
    pub private_ip_address: Option<String>,
    /// System disk size in GiB.
    pub system_disk_size_gib: i64,
    /// Shared bandwidth package to bill traffic against.
    pub shared_bandwidth_package_id: Option<String>,
    /// Elastic IP to attach. Excludes the two bandwidth settings.
    pub elastic_ip_id: Option<String>,
    /// Public bandwidth limit in Mbps. The only attribute mutable in place.
    pub bandwidth_limit_mbps: Option<i64>,
    /// Billing mode.
    pub charge_type: Option<String>,
    /// Initial root password.
    pub root_login_password: Option<String>,
    /// Total transfer quota in KB.
    pub total_transfer_kb: i64,
    /// Cloud project identifier.
    pub project_id: Option<i64>,
    /// Prepaid period in months.
    pub period_months: Option<i64>,
    /// Cloud-init user data.
    pub cloud_init_data: Option<String>,
    /// Whether the instance renews automatically.
    pub auto_renew: Option<bool>,
}

impl VirtualMachinePlan {
    /// Checks the network attachment rule: an elastic IP excludes both
    /// bandwidth settings, and without one a bandwidth limit is required.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidConfiguration`] when the rule is broken.
    pub fn validate(&self) -> Result<(), ResourceError> {
        if self.elastic_ip_id.is_some() {
            if self.shared_bandwidth_package_id.is_some() || self.bandwidth_limit_mbps.is_some() {
                return Err(ResourceError::invalid(
                    KIND,
                    "when `elastic_ip_id` is set, omit `shared_bandwidth_package_id` and \
                     `bandwidth_limit_mbps`",
                ));
            }
        } else if self.bandwidth_limit_mbps.is_none() {
            return Err(ResourceError::invalid(
                KIND,
                "`bandwidth_limit_mbps` is required when `elastic_ip_id` is not set",
            ));
        }
        Ok(())
    }

    /// Builds the creation payload for this plan.
    #[must_use]
    pub fn to_request(&self) -> CreateVirtualMachineRequest {
        CreateVirtualMachineRequest {
            name: self.name.clone(),
            zone: self.zone.clone(),
            instance_type: self.instance_type.clone(),
            security_group: self.security_group.clone(),
            system_image: self.system_image.clone(),
            vpc_id: self.vpc_id.clone(),
            subnet_id: self.subnet_id.clone(),
            private_ip_address: self.private_ip_address.clone(),
            system_disk_size_gib: self.system_disk_size_gib,
            shared_bandwidth_package_id: self.shared_bandwidth_package_id.clone(),
            elastic_ip_id: self.elastic_ip_id.clone(),
            bandwidth_limit_mbps: self.bandwidth_limit_mbps,
            charge_type: self.charge_type.clone(),
            root_login_password: self.root_login_password.clone(),
            total_transfer_kb: self.total_transfer_kb,
            project_id: self.project_id,
            period_months: self.period_months,
            cloud_init_data: self.cloud_init_data.clone(),
            auto_renew: self.auto_renew,
        }
    }
}

/// Attributes owned by the service and refreshed on every read.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VirtualMachineObserved {
    /// Cloud provider instance identifier.
    pub instance_id: String,
    /// Lifecycle state (for example `RUNNING`).
    pub instance_state: String,
    /// Number of vCPUs.
    pub cpu: i64,
    /// Memory in GiB.
    pub memory_gib: i64,
    /// Private addresses.
    pub private_ips: Vec<String>,
    /// Public addresses.
    pub public_ips: Vec<String>,
    /// Image the instance booted from.
    pub image_id: Option<String>,
    /// Operating system name.
    pub os_name: Option<String>,
    /// Creation timestamp.
    pub created_at: Option<String>,
    /// Expiry timestamp.
    pub expired_at: Option<String>,
    /// Transfer consumed in KB.
    pub used_transfer_kb: i64,
    /// Transfer remaining in KB.
    pub remaining_transfer_kb: Option<i64>,
    /// Default login password.
    pub password: Option<String>,
    /// Default login user.
    pub default_login_user: Option<String>,
}

impl From<VirtualMachineStatus> for VirtualMachineObserved {
    fn from(status: VirtualMachineStatus) -> Self {
        Self {
            instance_id: status.instance_id,
            instance_state: status.instance_state,
            cpu: status.cpu,
            memory_gib: status.memory_gib,
            private_ips: status.private_ips,
            public_ips: status.public_ips,
            image_id: status.image_id,
            os_name: status.os_name,
            created_at: status.created_at,
            expired_at: status.expired_at,
            used_transfer_kb: status.used_transfer,
            remaining_transfer_kb: status.remaining_transfer,
            password: status.password,
            default_login_user: status.default_login_user,
        }
    }
}

/// Recorded state of a virtual machine.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VirtualMachineState {
    /// Identifier assigned by the service at creation.
    pub id: String,
    /// Desired attributes as last applied, with service-owned fields refreshed.
    pub plan: VirtualMachinePlan,
    /// Attributes reported by the last status read.
    pub observed: VirtualMachineObserved,
}

impl VirtualMachineState {
    /// Builds state from a plan and a status read. Zone and instance type are
    /// taken from the status.
    #[must_use]
    pub fn from_status(id: String, mut plan: VirtualMachinePlan, status: VirtualMachineStatus) -> Self {
        plan.zone.clone_from(&status.zone);
        plan.instance_type.clone_from(&status.instance_type);
        Self {
            id,
            plan,
            observed: status.into(),
        }
    }
}

/// Drives a virtual machine through create, read, update, and delete.
#[derive(Clone, Debug)]
pub struct VirtualMachineReconciler<A> {
    api: A,
    poll_interval: Duration,
    wait_timeout: Duration,
}

impl<A: ProvisioningApi> VirtualMachineReconciler<A> {
    /// Creates a reconciler with the default poll interval and wait budget.
    #[must_use]
    pub const fn new(api: A) -> Self {
        Self {
            api,
            poll_interval: POLL_INTERVAL,
            wait_timeout: WAIT_TIMEOUT,
        }
    }

    /// Overrides the interval between status polls.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Overrides how long a provisioning or deletion wait may take.
    #[must_use]
    pub const fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }

    /// Returns the underlying API handle.
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    async fn wait_for_status(&self, id: &str) -> Result<VirtualMachineStatus, ResourceError> {
        let api = &self.api;
        wait_until(
            self.poll_interval,
            move || async move {
                match api.virtual_machine_status(id).await {
                    Ok(status) => Ok(Some(status)),
                    Err(err) if err.is_not_found() => {
                        debug!(id, "virtual machine not indexed yet");
                        Ok(None)
                    }
                    Err(err) => Err(err),
                }
            },
            sleep(self.wait_timeout),
        )
        .await
        .map_err(|err| ResourceError::from_wait(err, KIND, "read virtual machine status", id))
    }

    async fn wait_for_removal(&self, id: &str) -> Result<(), ResourceError> {
        let api = &self.api;
        wait_until(
            self.poll_interval,
            move || async move {
                match api.virtual_machine_status(id).await {
                    Ok(status) => {
                        debug!(id, state = %status.instance_state, "virtual machine still present");
                        Ok(None)
                    }
                    Err(err) if err.is_not_found() => Ok(Some(())),
                    Err(err) => Err(err),
                }
            },
            sleep(self.wait_timeout),
        )
        .await
        .map_err(|err| ResourceError::from_wait(err, KIND, "wait for virtual machine deletion", id))
    }

    async fn create_impl(&self, plan: &VirtualMachinePlan) -> Result<VirtualMachineState, ResourceError> {
        plan.validate()?;
        let created = self
            .api
            .create_virtual_machine(&plan.to_request())
            .await
            .map_err(|err| ResourceError::remote("create virtual machine", err))?;
        info!(id = %created.id, name = %plan.name, "virtual machine requested");

        let status = self.wait_for_status(&created.id).await?;
        info!(id = %created.id, state = %status.instance_state, "virtual machine active");
        Ok(VirtualMachineState::from_status(created.id, plan.clone(), status))
    }

    async fn read_impl(
        &self,
        state: &VirtualMachineState,
    ) -> Result<ReadOutcome<VirtualMachineState>, ResourceError> {
        match self.api.virtual_machine_status(&state.id).await {
            Ok(status) => Ok(ReadOutcome::Present(VirtualMachineState::from_status(
                state.id.clone(),
                state.plan.clone(),
                status,
            ))),
            Err(err) if err.is_not_found() => {
                info!(id = %state.id, "virtual machine no longer exists");
                Ok(ReadOutcome::Gone)
            }
            Err(err) => Err(ResourceError::remote("read virtual machine status", err)),
        }
    }

    async fn update_impl(
        &self,
        plan: &VirtualMachinePlan,
        prior: &VirtualMachineState,
    ) -> Result<VirtualMachineState, ResourceError> {
        if let Some(limit) = plan.bandwidth_limit_mbps
            && prior.plan.bandwidth_limit_mbps != Some(limit)
        {
            self.api
                .adjust_virtual_machine_bandwidth(&prior.id, limit)
                .await
                .map_err(|err| ResourceError::remote("adjust virtual machine bandwidth", err))?;
            info!(id = %prior.id, bandwidth_limit_mbps = limit, "virtual machine bandwidth adjusted");
        }

        let status = self
            .api
            .virtual_machine_status(&prior.id)
            .await
            .map_err(|err| ResourceError::remote("read virtual machine status", err))?;
        Ok(VirtualMachineState::from_status(prior.id.clone(), plan.clone(), status))
    }

    async fn delete_impl(&self, state: &VirtualMachineState) -> Result<(), ResourceError> {
        match self.api.delete_virtual_machine(&state.id).await {
            Ok(()) => {}
            Err(err) if err.is_not_found() => {
                info!(id = %state.id, "virtual machine already deleted");
                return Ok(());
            }
            Err(err) => return Err(ResourceError::remote("delete virtual machine", err)),
        }
        info!(id = %state.id, "virtual machine deletion requested");
        self.wait_for_removal(&state.id).await?;
        info!(id = %state.id, "virtual machine deleted");
        Ok(())
    }
}

impl<A: ProvisioningApi> Reconciler for VirtualMachineReconciler<A> {
    type Plan = VirtualMachinePlan;
    type State = VirtualMachineState;

    fn kind(&self) -> ResourceKind {
        KIND
    }

    fn create<'a>(&'a self, plan: &'a Self::Plan) -> ReconcileFuture<'a, Self::State> {
        Box::pin(self.create_impl(plan))
    }

    fn read<'a>(&'a self, state: &'a Self::State) -> ReconcileFuture<'a, ReadOutcome<Self::State>> {
        Box::pin(self.read_impl(state))
    }

    fn update<'a>(
        &'a self,
        plan: &'a Self::Plan,
        prior: &'a Self::State,
    ) -> ReconcileFuture<'a, Self::State> {
        Box::pin(self.update_impl(plan, prior))
    }

    fn delete<'a>(&'a self, state: &'a Self::State) -> ReconcileFuture<'a, ()> {
        Box::pin(self.delete_impl(state))
    }
}
