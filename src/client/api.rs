//! Typed operations exposed by the Penguin API.

use reqwest::StatusCode;

use super::operation::Operation;
use super::types::{
    AdjustBandwidthRequest, BandwidthPackageSelection, CreateElasticIpRequest,
    CreateElasticIpResponse, CreateVirtualMachineRequest, CreateVirtualMachineResponse,
    InternalHealth, IssueJwtRequest, IssueJwtResponse, ReinstallVirtualMachineRequest,
    RenewVirtualMachineRequest, RenewVirtualMachineResponse, ResetVirtualMachinePasswordRequest,
    ResetVirtualMachinePasswordResponse, VirtualMachineMetrics, VirtualMachineStatus,
    VirtualMachineVnc, Zone, ZonesResponse,
};
use super::{ClientError, PenguinClient};

const OK: &[StatusCode] = &[StatusCode::OK];
const CREATED: &[StatusCode] = &[StatusCode::CREATED];
const ACCEPTED: &[StatusCode] = &[StatusCode::ACCEPTED];
const NO_CONTENT: &[StatusCode] = &[StatusCode::NO_CONTENT];

const VMS: &[&str] = &["tencentcloud", "vms"];
const EIPS: &[&str] = &["tencentcloud", "eips"];

fn vm(id: &str, accepted: &'static [StatusCode]) -> Operation {
    Operation::get(VMS, accepted).segment(id)
}

fn vm_action(id: &str, action: &str, accepted: &'static [StatusCode]) -> Operation {
    Operation::post(VMS, accepted).segment(id).segment(action)
}

impl PenguinClient {
    /// `GET /health`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the service is unreachable or unhealthy.
    pub async fn health(&self) -> Result<(), ClientError> {
        self.execute(&Operation::get(&["health"], OK)).await?;
        Ok(())
    }

    /// `GET /_internal/health`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails or is rejected.
    pub async fn internal_health(&self) -> Result<InternalHealth, ClientError> {
        self.call(&Operation::get(&["_internal", "health"], OK))
            .await
    }

    /// `GET /tencentcloud/zones`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails or is rejected.
    pub async fn list_zones(&self) -> Result<Vec<Zone>, ClientError> {
        let response: ZonesResponse = self
            .call(&Operation::get(&["tencentcloud", "zones"], OK))
            .await?;
        Ok(response.zones)
    }

    /// `GET /tencentcloud/bandwidth-packages?region=..&networkType=..`.
    ///
    /// The service returns the best package available right now, so repeated
    /// calls may yield different identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails or is rejected.
    pub async fn select_bandwidth_package(
        &self,
        region: &str,
        network_type: Option<&str>,
    ) -> Result<BandwidthPackageSelection, ClientError> {
        let operation = Operation::get(&["tencentcloud", "bandwidth-packages"], OK)
            .query("region", region)
            .optional_query("networkType", network_type);
        self.call(&operation).await
    }

    /// `POST /tencentcloud/vms`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails or is rejected.
    pub async fn create_virtual_machine(
        &self,
        request: &CreateVirtualMachineRequest,
    ) -> Result<CreateVirtualMachineResponse, ClientError> {
        self.call(&Operation::post(VMS, CREATED).json(request)?)
            .await
    }

    /// `DELETE /tencentcloud/vms/{id}`. Deletion completes asynchronously.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails or is rejected.
    pub async fn delete_virtual_machine(&self, id: &str) -> Result<(), ClientError> {
        self.execute(&Operation::delete(VMS, ACCEPTED).segment(id))
            .await?;
        Ok(())
    }

    /// `GET /tencentcloud/vms/{id}/status`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails or is rejected; a
    /// missing instance surfaces as an API error with status 404.
    pub async fn virtual_machine_status(
        &self,
        id: &str,
    ) -> Result<VirtualMachineStatus, ClientError> {
        self.call(&vm(id, OK).segment("status")).await
    }

    /// `GET /tencentcloud/vms/{id}/metrics?range=..`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails or is rejected.
    pub async fn virtual_machine_metrics(
        &self,
        id: &str,
        range: Option<&str>,
    ) -> Result<VirtualMachineMetrics, ClientError> {
        let operation = vm(id, OK)
            .segment("metrics")
            .optional_query("range", range);
        self.call(&operation).await
    }

    /// `GET /tencentcloud/vms/{id}/vnc`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails or is rejected.
    pub async fn virtual_machine_vnc(&self, id: &str) -> Result<VirtualMachineVnc, ClientError> {
        self.call(&vm(id, OK).segment("vnc")).await
    }

    /// `POST /tencentcloud/vms/{id}/bandwidth`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails or is rejected.
    pub async fn adjust_virtual_machine_bandwidth(
        &self,
        id: &str,
        bandwidth_limit_mbps: i64,
    ) -> Result<(), ClientError> {
        let payload = AdjustBandwidthRequest {
            bandwidth_limit_mbps,
        };
        self.execute(&vm_action(id, "bandwidth", ACCEPTED).json(&payload)?)
            .await?;
        Ok(())
    }

    /// `POST /tencentcloud/vms/{id}/renew`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails or is rejected.
    pub async fn renew_virtual_machine(
        &self,
        id: &str,
        request: &RenewVirtualMachineRequest,
    ) -> Result<RenewVirtualMachineResponse, ClientError> {
        self.call(&vm_action(id, "renew", OK).json(request)?).await
    }

    /// `POST /tencentcloud/vms/{id}/reinstall`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails or is rejected.
    pub async fn reinstall_virtual_machine(
        &self,
        id: &str,
        request: &ReinstallVirtualMachineRequest,
    ) -> Result<(), ClientError> {
        self.execute(&vm_action(id, "reinstall", ACCEPTED).json(request)?)
            .await?;
        Ok(())
    }

    /// `POST /tencentcloud/vms/{id}/reset-password`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails or is rejected.
    pub async fn reset_virtual_machine_password(
        &self,
        id: &str,
        request: &ResetVirtualMachinePasswordRequest,
    ) -> Result<ResetVirtualMachinePasswordResponse, ClientError> {
        self.call(&vm_action(id, "reset-password", OK).json(request)?)
            .await
    }

    /// `POST /tencentcloud/vms/{id}/reset-transfer`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails or is rejected.
    pub async fn reset_virtual_machine_transfer(&self, id: &str) -> Result<(), ClientError> {
        self.execute(&vm_action(id, "reset-transfer", NO_CONTENT))
            .await?;
        Ok(())
    }

    /// `POST /tencentcloud/eips`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails or is rejected.
    pub async fn create_elastic_ip(
        &self,
        request: &CreateElasticIpRequest,
    ) -> Result<CreateElasticIpResponse, ClientError> {
        self.call(&Operation::post(EIPS, CREATED).json(request)?)
            .await
    }

    /// `DELETE /tencentcloud/eips/{id}?region=..`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails or is rejected.
    pub async fn delete_elastic_ip(&self, region: &str, id: &str) -> Result<(), ClientError> {
        let operation = Operation::delete(EIPS, NO_CONTENT)
            .segment(id)
            .query("region", region);
        self.execute(&operation).await?;
        Ok(())
    }

    /// `POST /auth/jwt`. Requires the legacy token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the request fails or is rejected.
    pub async fn issue_jwt(&self, request: &IssueJwtRequest) -> Result<IssueJwtResponse, ClientError> {
        self.call(&Operation::post(&["auth", "jwt"], CREATED).json(request)?)
            .await
    }
}
