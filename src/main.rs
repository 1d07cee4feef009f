//! Binary entry point for the Penguin CLI.

use std::io::{self, Write};
use std::process;

use clap::Parser;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use penguin::client::{
    ClientError, IssueJwtRequest, PenguinClient, ReinstallVirtualMachineRequest,
    RenewVirtualMachineRequest, ResetVirtualMachinePasswordRequest,
};
use penguin::config::{ConfigError, PenguinConfig};

mod cli;

use cli::{
    BandwidthPackageCommand, Cli, JwtCommand, VmCommand, VmReinstallCommand, VmRenewCommand,
    VmResetPasswordCommand,
};

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Client(#[from] ClientError),
    #[error("failed to render output: {0}")]
    Output(String),
}

/// Body printed for calls whose response carries no payload.
#[derive(Debug, Serialize)]
struct Acknowledged<'a> {
    id: &'a str,
    action: &'a str,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(err) => {
            report_error(&err);
            1
        }
    };

    process::exit(exit_code);
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("penguin=info"));
    // A subscriber installed by an embedding process takes precedence.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .ok();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = PenguinConfig::load_without_cli_args()?;
    let client = config.client()?;
    let output = dispatch(&client, cli).await?;
    write_json(io::stdout(), &output)
}

async fn dispatch(client: &PenguinClient, cli: Cli) -> Result<Value, CliError> {
    match cli {
        Cli::Health => {
            client.health().await?;
            to_json(&serde_json::json!({ "status": "ok" }))
        }
        Cli::InternalHealth => to_json(&client.internal_health().await?),
        Cli::Zones => to_json(&client.list_zones().await?),
        Cli::BandwidthPackage(BandwidthPackageCommand {
            region,
            network_type,
        }) => to_json(
            &client
                .select_bandwidth_package(&region, network_type.as_deref())
                .await?,
        ),
        Cli::Vm(command) => dispatch_vm(client, command).await,
        Cli::Jwt(command) => to_json(&client.issue_jwt(&jwt_request(command)).await?),
    }
}

async fn dispatch_vm(client: &PenguinClient, command: VmCommand) -> Result<Value, CliError> {
    match command {
        VmCommand::Status(target) => to_json(&client.virtual_machine_status(&target.id).await?),
        VmCommand::Metrics(metrics) => to_json(
            &client
                .virtual_machine_metrics(&metrics.id, metrics.range.as_deref())
                .await?,
        ),
        VmCommand::Vnc(target) => to_json(&client.virtual_machine_vnc(&target.id).await?),
        VmCommand::Renew(renew) => {
            let (id, request) = renew_request(renew);
            to_json(&client.renew_virtual_machine(&id, &request).await?)
        }
        VmCommand::Reinstall(reinstall) => {
            let (id, request) = reinstall_request(reinstall);
            client.reinstall_virtual_machine(&id, &request).await?;
            to_json(&Acknowledged {
                id: &id,
                action: "reinstall",
            })
        }
        VmCommand::ResetPassword(reset) => {
            let (id, request) = reset_password_request(reset);
            to_json(&client.reset_virtual_machine_password(&id, &request).await?)
        }
        VmCommand::ResetTransfer(target) => {
            client.reset_virtual_machine_transfer(&target.id).await?;
            to_json(&Acknowledged {
                id: &target.id,
                action: "reset-transfer",
            })
        }
    }
}

fn jwt_request(command: JwtCommand) -> IssueJwtRequest {
    IssueJwtRequest {
        max_transfer_kb: command.max_transfer_kb,
        allowed_instance_types: command.allowed_instance_types,
        allowed_zones: command.allowed_zones,
        max_bandwidth_mbps: command.max_bandwidth_mbps,
        project_id: command.project_id,
        ttl_minutes: command.ttl_minutes,
    }
}

fn renew_request(command: VmRenewCommand) -> (String, RenewVirtualMachineRequest) {
    let request = RenewVirtualMachineRequest {
        period_months: command.period,
        auto_renew: command.auto_renew,
    };
    (command.id, request)
}

fn reinstall_request(command: VmReinstallCommand) -> (String, ReinstallVirtualMachineRequest) {
    let request = ReinstallVirtualMachineRequest {
        image_id: command.image_id,
        cloud_init_data: command.cloud_init_data,
    };
    (command.id, request)
}

fn reset_password_request(
    command: VmResetPasswordCommand,
) -> (String, ResetVirtualMachinePasswordRequest) {
    let request = ResetVirtualMachinePasswordRequest {
        force_stop: command.force_stop.then_some(true),
    };
    (command.id, request)
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, CliError> {
    serde_json::to_value(value).map_err(|err| CliError::Output(err.to_string()))
}

fn write_json(mut target: impl Write, value: &Value) -> Result<(), CliError> {
    let rendered =
        serde_json::to_string_pretty(value).map_err(|err| CliError::Output(err.to_string()))?;
    writeln!(target, "{rendered}").map_err(|err| CliError::Output(err.to_string()))
}

fn report_error(err: &CliError) {
    write_error(io::stderr(), err);
}

fn write_error(mut target: impl Write, err: &CliError) {
    writeln!(target, "{err}").ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use penguin::client::ApiError;

    #[test]
    fn jwt_request_carries_every_flag() {
        let request = jwt_request(JwtCommand {
            ttl_minutes: 30,
            max_transfer_kb: Some(1024),
            allowed_instance_types: vec![String::from("SA5.MEDIUM4")],
            allowed_zones: vec![String::from("ap-guangzhou-3")],
            max_bandwidth_mbps: Some(100),
            project_id: None,
        });

        assert_eq!(request.ttl_minutes, 30);
        assert_eq!(request.max_transfer_kb, Some(1024));
        assert_eq!(request.allowed_instance_types, vec![String::from("SA5.MEDIUM4")]);
        assert_eq!(request.allowed_zones, vec![String::from("ap-guangzhou-3")]);
        assert_eq!(request.max_bandwidth_mbps, Some(100));
        assert_eq!(request.project_id, None);
    }

    #[test]
    fn reset_password_omits_force_stop_unless_requested() {
        let (id, request) = reset_password_request(VmResetPasswordCommand {
            id: String::from("ins-1"),
            force_stop: false,
        });
        assert_eq!(id, "ins-1");
        assert_eq!(request.force_stop, None);

        let (_, forced) = reset_password_request(VmResetPasswordCommand {
            id: String::from("ins-1"),
            force_stop: true,
        });
        assert_eq!(forced.force_stop, Some(true));
    }

    #[test]
    fn write_json_renders_pretty_output() {
        let mut buf = Vec::new();
        let value = to_json(&Acknowledged {
            id: "ins-1",
            action: "reset-transfer",
        })
        .unwrap_or_else(|err| panic!("serialise: {err}"));

        write_json(&mut buf, &value).unwrap_or_else(|err| panic!("write: {err}"));

        let rendered = String::from_utf8(buf).unwrap_or_else(|err| panic!("utf8: {err}"));
        assert!(rendered.contains("\"id\": \"ins-1\""), "rendered: {rendered}");
        assert!(rendered.ends_with('\n'));
    }

    #[test]
    fn write_error_writes_api_errors_verbatim() {
        let mut buf = Vec::new();
        let error = CliError::from(ClientError::from(ApiError {
            status: 401,
            message: String::from("unauthorized"),
        }));
        write_error(&mut buf, &error);
        let rendered = String::from_utf8(buf).unwrap_or_else(|err| panic!("utf8: {err}"));
        assert_eq!(rendered, "penguin API error 401: unauthorized\n");
    }
}
