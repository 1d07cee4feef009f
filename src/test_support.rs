//! Test support utilities shared across unit and integration tests.

use std::collections::{BTreeSet, VecDeque};
use std::env;
use std::ffi::OsString;
use std::future::ready;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, MutexGuard};

use crate::client::{
    ApiError, BandwidthPackageSelection, ClientError, CreateElasticIpRequest,
    CreateElasticIpResponse, CreateVirtualMachineRequest, CreateVirtualMachineResponse,
    VirtualMachineStatus,
};
use crate::resource::{ApiFuture, ProvisioningApi};

/// Records a single call made through [`ScriptedApi`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ApiCall {
    /// `create_virtual_machine` with its payload.
    CreateVirtualMachine(CreateVirtualMachineRequest),
    /// `virtual_machine_status` for an identifier.
    VirtualMachineStatus(String),
    /// `adjust_virtual_machine_bandwidth`.
    AdjustBandwidth {
        /// Virtual machine identifier.
        id: String,
        /// Requested limit.
        bandwidth_limit_mbps: i64,
    },
    /// `delete_virtual_machine` for an identifier.
    DeleteVirtualMachine(String),
    /// `create_elastic_ip` with its payload.
    CreateElasticIp(CreateElasticIpRequest),
    /// `delete_elastic_ip`.
    DeleteElasticIp {
        /// Region query parameter.
        region: String,
        /// Elastic IP identifier.
        id: String,
    },
    /// `select_bandwidth_package`.
    SelectBandwidthPackage {
        /// Region query parameter.
        region: String,
        /// Network type query parameter.
        network_type: Option<String>,
    },
}

type Replies<T> = VecDeque<Result<T, ClientError>>;

#[derive(Debug, Default)]
struct Script {
    create_virtual_machine: Replies<CreateVirtualMachineResponse>,
    status: Replies<VirtualMachineStatus>,
    adjust_bandwidth: Replies<()>,
    delete_virtual_machine: Replies<()>,
    create_elastic_ip: Replies<CreateElasticIpResponse>,
    delete_elastic_ip: Replies<()>,
    select_bandwidth_package: Replies<BandwidthPackageSelection>,
    calls: Vec<ApiCall>,
}

/// Scripted [`ProvisioningApi`] that returns pre-seeded replies in FIFO order
/// per operation and records every call.
///
/// Clones share the same script, so a test can keep one handle for
/// assertions while a reconciler owns another. A call with no reply queued
/// fails with [`ClientError::Transport`].
#[derive(Clone, Debug, Default)]
pub struct ScriptedApi {
    script: Arc<Mutex<Script>>,
}

impl ScriptedApi {
    /// Creates an API double with nothing queued.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all calls recorded so far.
    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    /// Counts recorded calls matching `predicate`.
    #[must_use]
    pub fn count(&self, predicate: impl Fn(&ApiCall) -> bool) -> usize {
        self.lock().calls.iter().filter(|call| predicate(call)).count()
    }

    /// Number of status reads performed so far.
    #[must_use]
    pub fn status_calls(&self) -> usize {
        self.count(|call| matches!(call, ApiCall::VirtualMachineStatus(_)))
    }

    /// Queues a reply for `create_virtual_machine`.
    pub fn push_create_virtual_machine(&self, reply: Result<CreateVirtualMachineResponse, ClientError>) {
        self.lock().create_virtual_machine.push_back(reply);
    }

    /// Queues a reply for `virtual_machine_status`.
    pub fn push_status(&self, reply: Result<VirtualMachineStatus, ClientError>) {
        self.lock().status.push_back(reply);
    }

    /// Queues a reply for `adjust_virtual_machine_bandwidth`.
    pub fn push_adjust_bandwidth(&self, reply: Result<(), ClientError>) {
        self.lock().adjust_bandwidth.push_back(reply);
    }

    /// Queues a reply for `delete_virtual_machine`.
    pub fn push_delete_virtual_machine(&self, reply: Result<(), ClientError>) {
        self.lock().delete_virtual_machine.push_back(reply);
    }

    /// Queues a reply for `create_elastic_ip`.
    pub fn push_create_elastic_ip(&self, reply: Result<CreateElasticIpResponse, ClientError>) {
        self.lock().create_elastic_ip.push_back(reply);
    }

    /// Queues a reply for `delete_elastic_ip`.
    pub fn push_delete_elastic_ip(&self, reply: Result<(), ClientError>) {
        self.lock().delete_elastic_ip.push_back(reply);
    }

    /// Queues a reply for `select_bandwidth_package`.
    pub fn push_bandwidth_selection(&self, reply: Result<BandwidthPackageSelection, ClientError>) {
        self.lock().select_bandwidth_package.push_back(reply);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn reply<T>(
        &self,
        call: ApiCall,
        queue: impl FnOnce(&mut Script) -> &mut Replies<T>,
    ) -> Result<T, ClientError> {
        let mut script = self.lock();
        let description = format!("{call:?}");
        script.calls.push(call);
        queue(&mut *script).pop_front().unwrap_or_else(|| {
            Err(ClientError::Transport(format!(
                "no scripted response for {description}"
            )))
        })
    }
}

impl ProvisioningApi for ScriptedApi {
    fn create_virtual_machine<'a>(
        &'a self,
        request: &'a CreateVirtualMachineRequest,
    ) -> ApiFuture<'a, CreateVirtualMachineResponse> {
        let reply = self.reply(ApiCall::CreateVirtualMachine(request.clone()), |script| {
            &mut script.create_virtual_machine
        });
        Box::pin(ready(reply))
    }

    fn virtual_machine_status<'a>(&'a self, id: &'a str) -> ApiFuture<'a, VirtualMachineStatus> {
        let reply = self.reply(ApiCall::VirtualMachineStatus(id.to_owned()), |script| {
            &mut script.status
        });
        Box::pin(ready(reply))
    }

    fn adjust_virtual_machine_bandwidth<'a>(
        &'a self,
        id: &'a str,
        bandwidth_limit_mbps: i64,
    ) -> ApiFuture<'a, ()> {
        let call = ApiCall::AdjustBandwidth {
            id: id.to_owned(),
            bandwidth_limit_mbps,
        };
        let reply = self.reply(call, |script| &mut script.adjust_bandwidth);
        Box::pin(ready(reply))
    }

    fn delete_virtual_machine<'a>(&'a self, id: &'a str) -> ApiFuture<'a, ()> {
        let reply = self.reply(ApiCall::DeleteVirtualMachine(id.to_owned()), |script| {
            &mut script.delete_virtual_machine
        });
        Box::pin(ready(reply))
    }

    fn create_elastic_ip<'a>(
        &'a self,
        request: &'a CreateElasticIpRequest,
    ) -> ApiFuture<'a, CreateElasticIpResponse> {
        let reply = self.reply(ApiCall::CreateElasticIp(request.clone()), |script| {
            &mut script.create_elastic_ip
        });
        Box::pin(ready(reply))
    }

    fn delete_elastic_ip<'a>(&'a self, region: &'a str, id: &'a str) -> ApiFuture<'a, ()> {
        let call = ApiCall::DeleteElasticIp {
            region: region.to_owned(),
            id: id.to_owned(),
        };
        let reply = self.reply(call, |script| &mut script.delete_elastic_ip);
        Box::pin(ready(reply))
    }

    fn select_bandwidth_package<'a>(
        &'a self,
        region: &'a str,
        network_type: Option<&'a str>,
    ) -> ApiFuture<'a, BandwidthPackageSelection> {
        let call = ApiCall::SelectBandwidthPackage {
            region: region.to_owned(),
            network_type: network_type.map(str::to_owned),
        };
        let reply = self.reply(call, |script| &mut script.select_bandwidth_package);
        Box::pin(ready(reply))
    }
}

/// Builds an API error with the given status.
#[must_use]
pub fn api_error(status: u16, message: &str) -> ClientError {
    ClientError::Api(ApiError {
        status,
        message: message.to_owned(),
    })
}

/// Builds the 404 error the service returns for unknown identifiers.
#[must_use]
pub fn not_found() -> ClientError {
    api_error(404, "Not Found")
}

/// Global mutex used to serialise environment mutation in tests.
pub static ENV_LOCK: AsyncMutex<()> = AsyncMutex::const_new(());

/// Guard that holds the env mutex and restores variables on drop.
pub struct EnvGuard {
    previous: Vec<(String, Option<OsString>)>,
    _guard: MutexGuard<'static, ()>,
}

impl EnvGuard {
    /// Sets multiple environment variables while holding a global mutex.
    pub async fn set_vars(pairs: &[(&str, &str)]) -> Self {
        Self::apply(pairs.iter().map(|(key, value)| (*key, Some(*value)))).await
    }

    /// Removes environment variables while holding a global mutex.
    pub async fn remove_vars(keys: &[&str]) -> Self {
        Self::apply(keys.iter().map(|key| (*key, None))).await
    }

    async fn apply<'a>(requested: impl Iterator<Item = (&'a str, Option<&'a str>)>) -> Self {
        let changes: Vec<_> = requested.collect();
        debug_assert!(
            {
                let mut seen = BTreeSet::new();
                changes.iter().all(|(key, _)| seen.insert(*key))
            },
            "duplicate environment variable keys passed to EnvGuard"
        );

        let guard = ENV_LOCK.lock().await;
        let mut previous = Vec::with_capacity(changes.len());
        for (key, value) in changes {
            previous.push((key.to_owned(), env::var_os(key)));
            // SAFETY: Environment mutation is serialised by `ENV_LOCK`, preventing races.
            unsafe {
                match value {
                    Some(val) => env::set_var(key, val),
                    None => env::remove_var(key),
                }
            }
        }

        Self {
            previous,
            _guard: guard,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, old) in &self.previous {
            // SAFETY: Environment mutation is serialised by holding `_guard`.
            unsafe {
                match old {
                    Some(val) => env::set_var(key, val),
                    None => env::remove_var(key),
                }
            }
        }
    }
}
