//! Elastic IP reconciler.
//!
//! The service has no read endpoint for elastic IPs, so the address recorded
//! at creation is trusted until the resource is replaced or deleted.

use tracing::info;

use super::{ProvisioningApi, ReadOutcome, ReconcileFuture, Reconciler, ResourceError, ResourceKind};
use crate::client::CreateElasticIpRequest;

const KIND: ResourceKind = ResourceKind::ElasticIp;

/// Desired attributes of an elastic IP. Every field forces replacement.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ElasticIpPlan {
    /// Region to allocate the address in.
    pub region: String,
    /// Bandwidth limit in Mbps.
    pub bandwidth_limit_mbps: i64,
    /// Display name of the address.
    pub address_name: String,
    /// Shared bandwidth package to bill traffic against.
    pub shared_bandwidth_package_id: Option<String>,
}

impl ElasticIpPlan {
    fn to_request(&self) -> CreateElasticIpRequest {
        CreateElasticIpRequest {
            region: self.region.clone(),
            shared_bandwidth_package_id: self.shared_bandwidth_package_id.clone(),
            bandwidth_limit_mbps: self.bandwidth_limit_mbps,
            address_name: self.address_name.clone(),
        }
    }
}

/// Recorded state of an elastic IP.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ElasticIpState {
    /// Identifier assigned by the service.
    pub id: String,
    /// Attributes the address was created with.
    pub plan: ElasticIpPlan,
    /// Allocated public address.
    pub address: String,
}

impl ElasticIpState {
    /// Parses an import identifier of the form `region:id` into a state stub
    /// carrying only the region and identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidImportId`] when the separator is
    /// missing or either part is empty.
    pub fn import(identifier: &str) -> Result<Self, ResourceError> {
        let invalid = || ResourceError::InvalidImportId {
            value: identifier.to_owned(),
        };
        let (region, id) = identifier.split_once(':').ok_or_else(invalid)?;
        if region.is_empty() || id.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            id: id.to_owned(),
            plan: ElasticIpPlan {
                region: region.to_owned(),
                ..ElasticIpPlan::default()
            },
            address: String::new(),
        })
    }
}

/// Allocates and releases elastic IPs.
#[derive(Clone, Debug)]
pub struct ElasticIpReconciler<A> {
    api: A,
}

impl<A: ProvisioningApi> ElasticIpReconciler<A> {
    /// Creates a reconciler backed by `api`.
    #[must_use]
    pub const fn new(api: A) -> Self {
        Self { api }
    }

    async fn create_impl(&self, plan: &ElasticIpPlan) -> Result<ElasticIpState, ResourceError> {
        let created = self
            .api
            .create_elastic_ip(&plan.to_request())
            .await
            .map_err(|err| ResourceError::remote("create elastic IP", err))?;
        info!(id = %created.id, address = %created.address, "elastic IP allocated");
        Ok(ElasticIpState {
            id: created.id,
            plan: plan.clone(),
            address: created.address,
        })
    }

    async fn delete_impl(&self, state: &ElasticIpState) -> Result<(), ResourceError> {
        match self
            .api
            .delete_elastic_ip(&state.plan.region, &state.id)
            .await
        {
            Ok(()) => {
                info!(id = %state.id, "elastic IP released");
                Ok(())
            }
            Err(err) if err.is_not_found() => {
                info!(id = %state.id, "elastic IP already released");
                Ok(())
            }
            Err(err) => Err(ResourceError::remote("delete elastic IP", err)),
        }
    }
}

impl<A: ProvisioningApi> Reconciler for ElasticIpReconciler<A> {
    type Plan = ElasticIpPlan;
    type State = ElasticIpState;

    fn kind(&self) -> ResourceKind {
        KIND
    }

    fn create<'a>(&'a self, plan: &'a Self::Plan) -> ReconcileFuture<'a, Self::State> {
        Box::pin(self.create_impl(plan))
    }

    fn read<'a>(&'a self, state: &'a Self::State) -> ReconcileFuture<'a, ReadOutcome<Self::State>> {
        Box::pin(async move { Ok::<_, ResourceError>(ReadOutcome::Present(state.clone())) })
    }

    fn update<'a>(
        &'a self,
        plan: &'a Self::Plan,
        prior: &'a Self::State,
    ) -> ReconcileFuture<'a, Self::State> {
        Box::pin(async move {
            Ok::<_, ResourceError>(ElasticIpState {
                id: prior.id.clone(),
                plan: plan.clone(),
                address: prior.address.clone(),
            })
        })
    }

    fn delete<'a>(&'a self, state: &'a Self::State) -> ReconcileFuture<'a, ()> {
        Box::pin(self.delete_impl(state))
    }
}
