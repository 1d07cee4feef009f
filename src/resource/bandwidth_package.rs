//! Bandwidth package selection reconciler.
//!
//! A selection is a point-in-time answer from the service. After creation it
//! is never re-queried so that dependents keep seeing the same package; the
//! only way to pick again is to replace the resource.

use tracing::info;

use super::{ProvisioningApi, ReadOutcome, ReconcileFuture, Reconciler, ResourceError, ResourceKind};

const KIND: ResourceKind = ResourceKind::BandwidthPackageSelection;

/// Network type used when the plan leaves it unset or blank.
pub const DEFAULT_NETWORK_TYPE: &str = "BGP";

/// Desired attributes of a bandwidth package selection.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BandwidthPackageSelectionPlan {
    /// Region to select a package in.
    pub region: String,
    /// Network type of the package.
    pub network_type: Option<String>,
}

impl BandwidthPackageSelectionPlan {
    fn normalised(&self) -> Result<(String, String), ResourceError> {
        let region = self.region.trim();
        if region.is_empty() {
            return Err(ResourceError::invalid(KIND, "`region` must not be empty"));
        }
        let network_type = self
            .network_type
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_NETWORK_TYPE);
        Ok((region.to_owned(), network_type.to_owned()))
    }
}

/// Recorded state of a bandwidth package selection.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BandwidthPackageSelectionState {
    /// Identity of the selection; equal to the selected package.
    pub id: String,
    /// Region the package was selected in.
    pub region: String,
    /// Network type the package was selected for.
    pub network_type: String,
    /// Selected bandwidth package identifier.
    pub bandwidth_package_id: String,
    /// Remaining capacity of the package when it was selected.
    pub available_count: i64,
}

/// Selects a shared bandwidth package once and then serves the snapshot.
#[derive(Clone, Debug)]
pub struct BandwidthPackageSelectionReconciler<A> {
    api: A,
}

impl<A: ProvisioningApi> BandwidthPackageSelectionReconciler<A> {
    /// Creates a reconciler backed by `api`.
    #[must_use]
    pub const fn new(api: A) -> Self {
        Self { api }
    }

    async fn create_impl(
        &self,
        plan: &BandwidthPackageSelectionPlan,
    ) -> Result<BandwidthPackageSelectionState, ResourceError> {
        let (region, network_type) = plan.normalised()?;
        let selection = self
            .api
            .select_bandwidth_package(&region, Some(&network_type))
            .await
            .map_err(|err| ResourceError::remote("select bandwidth package", err))?;
        info!(
            id = %selection.id,
            %region,
            %network_type,
            available = selection.available_count,
            "bandwidth package selected"
        );
        Ok(BandwidthPackageSelectionState {
            id: selection.id.clone(),
            region,
            network_type,
            bandwidth_package_id: selection.id,
            available_count: selection.available_count,
        })
    }
}

impl<A: ProvisioningApi> Reconciler for BandwidthPackageSelectionReconciler<A> {
    type Plan = BandwidthPackageSelectionPlan;
    type State = BandwidthPackageSelectionState;

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
            let (region, network_type) = plan.normalised()?;
            Ok::<_, ResourceError>(BandwidthPackageSelectionState {
                region,
                network_type,
                ..prior.clone()
            })
        })
    }

    fn delete<'a>(&'a self, _state: &'a Self::State) -> ReconcileFuture<'a, ()> {
        Box::pin(async { Ok::<_, ResourceError>(()) })
    }
}
