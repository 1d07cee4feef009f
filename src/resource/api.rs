//! The slice of the Penguin API that reconcilers depend on.

use std::future::Future;
use std::pin::Pin;

use crate::client::{
    BandwidthPackageSelection, ClientError, CreateElasticIpRequest, CreateElasticIpResponse,
    CreateVirtualMachineRequest, CreateVirtualMachineResponse, PenguinClient,
    VirtualMachineStatus,
};

/// Future returned by [`ProvisioningApi`] calls.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ClientError>> + Send + 'a>>;

/// Remote operations used by the resource reconcilers.
///
/// [`PenguinClient`] is the production implementation; tests substitute a
/// scripted double.
pub trait ProvisioningApi: Send + Sync {
    /// Creates a virtual machine and returns its identifier.
    fn create_virtual_machine<'a>(
        &'a self,
        request: &'a CreateVirtualMachineRequest,
    ) -> ApiFuture<'a, CreateVirtualMachineResponse>;

    /// Reads the current status of a virtual machine.
    fn virtual_machine_status<'a>(&'a self, id: &'a str) -> ApiFuture<'a, VirtualMachineStatus>;

    /// Changes the public bandwidth limit of a virtual machine.
    fn adjust_virtual_machine_bandwidth<'a>(
        &'a self,
        id: &'a str,
        bandwidth_limit_mbps: i64,
    ) -> ApiFuture<'a, ()>;

    /// Starts deletion of a virtual machine.
    fn delete_virtual_machine<'a>(&'a self, id: &'a str) -> ApiFuture<'a, ()>;

    /// Allocates an elastic IP.
    fn create_elastic_ip<'a>(
        &'a self,
        request: &'a CreateElasticIpRequest,
    ) -> ApiFuture<'a, CreateElasticIpResponse>;

    /// Releases an elastic IP.
    fn delete_elastic_ip<'a>(&'a self, region: &'a str, id: &'a str) -> ApiFuture<'a, ()>;

    /// Asks the service for the best shared bandwidth package right now.
    fn select_bandwidth_package<'a>(
        &'a self,
        region: &'a str,
        network_type: Option<&'a str>,
    ) -> ApiFuture<'a, BandwidthPackageSelection>;
}

impl ProvisioningApi for PenguinClient {
    fn create_virtual_machine<'a>(
        &'a self,
        request: &'a CreateVirtualMachineRequest,
    ) -> ApiFuture<'a, CreateVirtualMachineResponse> {
        Box::pin(Self::create_virtual_machine(self, request))
    }

    fn virtual_machine_status<'a>(&'a self, id: &'a str) -> ApiFuture<'a, VirtualMachineStatus> {
        Box::pin(Self::virtual_machine_status(self, id))
    }

    fn adjust_virtual_machine_bandwidth<'a>(
        &'a self,
        id: &'a str,
        bandwidth_limit_mbps: i64,
    ) -> ApiFuture<'a, ()> {
        Box::pin(Self::adjust_virtual_machine_bandwidth(
            self,
            id,
            bandwidth_limit_mbps,
        ))
    }

    fn delete_virtual_machine<'a>(&'a self, id: &'a str) -> ApiFuture<'a, ()> {
        Box::pin(Self::delete_virtual_machine(self, id))
    }

    fn create_elastic_ip<'a>(
        &'a self,
        request: &'a CreateElasticIpRequest,
    ) -> ApiFuture<'a, CreateElasticIpResponse> {
        Box::pin(Self::create_elastic_ip(self, request))
    }

    fn delete_elastic_ip<'a>(&'a self, region: &'a str, id: &'a str) -> ApiFuture<'a, ()> {
        Box::pin(Self::delete_elastic_ip(self, region, id))
    }

    fn select_bandwidth_package<'a>(
        &'a self,
        region: &'a str,
        network_type: Option<&'a str>,
    ) -> ApiFuture<'a, BandwidthPackageSelection> {
        Box::pin(Self::select_bandwidth_package(self, region, network_type))
    }
}
