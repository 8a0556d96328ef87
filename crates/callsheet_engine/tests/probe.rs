use std::sync::Arc;
use std::time::Duration;

use callsheet_core::ProbeReason;
use callsheet_engine::{
    ProbeError, ProbeFailure, ProbeHandle, ProbePoll, ProbeSettings, ReachabilityProbe,
    ReqwestProbe,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer, probe_path: &str) -> ProbeSettings {
    ProbeSettings {
        endpoint: format!("{}{}", server.uri(), probe_path),
        ..ProbeSettings::default()
    }
}

#[tokio::test]
async fn probe_succeeds_on_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let probe = ReqwestProbe::new(settings_for(&server, "/ping"));
    assert_eq!(probe.check().await, Ok(()));
}

#[tokio::test]
async fn probe_counts_error_status_as_reachable() {
    // Liveness oracle semantics: a 500 still proves the network path works.
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let probe = ReqwestProbe::new(settings_for(&server, "/ping"));
    assert_eq!(probe.check().await, Ok(()));
}

#[tokio::test]
async fn probe_times_out_on_hung_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(204).set_delay(Duration::from_millis(250)))
        .mount(&server)
        .await;

    let settings = ProbeSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server, "/slow")
    };
    let probe = ReqwestProbe::new(settings);

    let err = probe.check().await.unwrap_err();
    assert_eq!(err.kind, ProbeFailure::Timeout);
}

#[tokio::test]
async fn probe_rejects_garbage_endpoint() {
    let settings = ProbeSettings {
        endpoint: "not a url".to_string(),
        ..ProbeSettings::default()
    };
    let probe = ReqwestProbe::new(settings);

    let err = probe.check().await.unwrap_err();
    assert_eq!(err.kind, ProbeFailure::InvalidEndpoint);
}

struct ScriptedProbe {
    ok: bool,
}

#[async_trait::async_trait]
impl ReachabilityProbe for ScriptedProbe {
    async fn check(&self) -> Result<(), ProbeError> {
        if self.ok {
            Ok(())
        } else {
            Err(ProbeError {
                kind: ProbeFailure::Network,
                message: "scripted failure".to_string(),
            })
        }
    }
}

fn wait_for_event(handle: &ProbeHandle) -> Option<callsheet_engine::ProbeEvent> {
    for _ in 0..100 {
        if let Some(event) = handle.try_recv() {
            return Some(event);
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    None
}

#[test]
fn handle_reports_settled_probes_with_reason() {
    let handle = ProbeHandle::with_probe(Arc::new(ScriptedProbe { ok: true }));
    handle.request(ProbeReason::Manual);

    let event = wait_for_event(&handle).expect("probe event");
    assert_eq!(event.reason, ProbeReason::Manual);
    assert!(event.ok);
}

#[test]
fn event_poller_observes_disconnect_after_handle_drops() {
    let handle = ProbeHandle::with_probe(Arc::new(ScriptedProbe { ok: true }));
    let events = handle.events();
    assert_eq!(events.poll(), ProbePoll::Empty);

    // Dropping the last handle closes the command channel; the worker winds
    // down and the event channel disconnects.
    drop(handle);
    for _ in 0..100 {
        match events.poll() {
            ProbePoll::Disconnected => return,
            _ => std::thread::sleep(Duration::from_millis(10)),
        }
    }
    panic!("event channel never disconnected");
}

#[test]
fn handle_reports_probe_failure() {
    let handle = ProbeHandle::with_probe(Arc::new(ScriptedProbe { ok: false }));
    handle.request(ProbeReason::Periodic);

    let event = wait_for_event(&handle).expect("probe event");
    assert_eq!(event.reason, ProbeReason::Periodic);
    assert!(!event.ok);
}
