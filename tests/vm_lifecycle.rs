//! End-to-end reconciler flows driven through the HTTP client.

use std::time::Duration;

use penguin::client::{Credentials, PenguinClient};
use penguin::resource::{
    ReadOutcome, Reconciler, VirtualMachinePlan, VirtualMachineReconciler, VirtualMachineState,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const POLL: Duration = Duration::from_millis(10);

fn reconciler(server: &MockServer) -> VirtualMachineReconciler<PenguinClient> {
    let client = PenguinClient::new(&server.uri(), Credentials::default())
        .unwrap_or_else(|err| panic!("client should build: {err}"));
    VirtualMachineReconciler::new(client)
        .with_poll_interval(POLL)
        .with_wait_timeout(Duration::from_secs(5))
}

fn plan() -> VirtualMachinePlan {
    VirtualMachinePlan {
        name: String::from("web-1"),
        zone: String::from("ap-guangzhou-3"),
        instance_type: String::from("SA5.MEDIUM4"),
        security_group: String::from("sg-1"),
        system_image: String::from("img-1"),
        vpc_id: String::from("vpc-1"),
        subnet_id: String::from("subnet-1"),
        system_disk_size_gib: 50,
        bandwidth_limit_mbps: Some(100),
        total_transfer_kb: 1024,
        ..VirtualMachinePlan::default()
    }
}

fn running_status() -> serde_json::Value {
    json!({
        "id": "ins-1",
        "zone": "ap-guangzhou-3",
        "instanceId": "ins-abc",
        "instanceType": "SA5.MEDIUM4",
        "instanceState": "RUNNING",
        "cpu": 2,
        "memoryGiB": 4,
        "privateIps": ["10.0.0.4"],
        "publicIps": ["203.0.113.7"],
        "usedTransfer": 0
    })
}

async fn mount_not_found_status(server: &MockServer, times: u64) {
    Mock::given(method("GET"))
        .and(path("/tencentcloud/vms/ins-1/status"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "status": 404, "message": "not found" })),
        )
        .up_to_n_times(times)
        .with_priority(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn create_waits_through_not_found_until_running() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tencentcloud/vms"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "ins-1" })))
        .expect(1)
        .mount(&server)
        .await;
    mount_not_found_status(&server, 2).await;
    Mock::given(method("GET"))
        .and(path("/tencentcloud/vms/ins-1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(running_status()))
        .with_priority(2)
        .mount(&server)
        .await;

    let state = reconciler(&server)
        .create(&plan())
        .await
        .unwrap_or_else(|err| panic!("create should succeed: {err}"));

    assert_eq!(state.observed.instance_state, "RUNNING");
    assert_eq!(state.observed.private_ips, vec![String::from("10.0.0.4")]);
    let status_reads = server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == "/tencentcloud/vms/ins-1/status")
        .count();
    assert_eq!(status_reads, 3);
}

#[tokio::test]
async fn update_sends_bandwidth_adjustment_then_refreshes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tencentcloud/vms/ins-1/bandwidth"))
        .and(body_json(json!({ "bandwidthLimit": 200 })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tencentcloud/vms/ins-1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(running_status()))
        .expect(1)
        .mount(&server)
        .await;

    let prior = VirtualMachineState {
        id: String::from("ins-1"),
        plan: plan(),
        ..VirtualMachineState::default()
    };
    let desired = VirtualMachinePlan {
        bandwidth_limit_mbps: Some(200),
        ..plan()
    };

    let state = reconciler(&server)
        .update(&desired, &prior)
        .await
        .unwrap_or_else(|err| panic!("update should succeed: {err}"));

    assert_eq!(state.plan.bandwidth_limit_mbps, Some(200));
    assert_eq!(state.observed.instance_id, "ins-abc");
}

#[tokio::test]
async fn read_after_out_of_band_deletion_reports_gone() {
    let server = MockServer::start().await;
    mount_not_found_status(&server, 1).await;

    let prior = VirtualMachineState {
        id: String::from("ins-1"),
        plan: plan(),
        ..VirtualMachineState::default()
    };

    let outcome = reconciler(&server)
        .read(&prior)
        .await
        .unwrap_or_else(|err| panic!("read should succeed: {err}"));

    assert_eq!(outcome, ReadOutcome::Gone);
}

#[tokio::test]
async fn delete_waits_until_status_disappears() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/tencentcloud/vms/ins-1"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tencentcloud/vms/ins-1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(running_status()))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tencentcloud/vms/ins-1/status"))
        .respond_with(ResponseTemplate::new(404))
        .with_priority(2)
        .mount(&server)
        .await;

    let prior = VirtualMachineState {
        id: String::from("ins-1"),
        plan: plan(),
        ..VirtualMachineState::default()
    };

    reconciler(&server)
        .delete(&prior)
        .await
        .unwrap_or_else(|err| panic!("delete should succeed: {err}"));
}
