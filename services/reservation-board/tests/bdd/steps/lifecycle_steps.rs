//! BDD step definitions for mounting, settling and unmounting the view

use std::sync::Arc;
use std::time::Duration;

use cucumber::{given, then, when};

use reservation_board::client::ReservationClient;
use reservation_board::config::SourceConfig;
use reservation_board::io::{HttpClient, ReqwestHttpClient};
use reservation_board::{Phase, ReservationListView};

use crate::world::{BoardWorld, Reply, ScriptedHttpClient};

fn parse_phase(s: &str) -> Phase {
    match s {
        "Loading" => Phase::Loading,
        "Loaded" => Phase::Loaded,
        "Failed" => Phase::Failed,
        other => panic!("Unknown phase: {}", other),
    }
}

#[given(expr = "the reservations endpoint returns status {int} with body {string}")]
fn endpoint_returns(world: &mut BoardWorld, status: u16, body: String) {
    world.http = Some(Arc::new(ScriptedHttpClient::new(Reply::Respond {
        status,
        body,
    })));
}

#[given(
    expr = "the reservations endpoint returns status {int} with body {string} after {int} milliseconds"
)]
fn endpoint_returns_slowly(world: &mut BoardWorld, status: u16, body: String, delay_ms: u64) {
    world.http = Some(Arc::new(ScriptedHttpClient::new(Reply::RespondAfter {
        delay: Duration::from_millis(delay_ms),
        status,
        body,
    })));
}

#[given("the reservations endpoint is unreachable")]
fn endpoint_unreachable(world: &mut BoardWorld) {
    world.unreachable = true;
}

#[when("the view is mounted")]
fn mount_view(world: &mut BoardWorld) {
    let view = if world.unreachable {
        // Port 1 is reserved and unbound, so the connection is refused.
        let source = SourceConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            ..SourceConfig::default()
        };
        let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::default());
        ReservationListView::new(ReservationClient::new(&source, http))
    } else {
        let http: Arc<dyn HttpClient> = world.http.clone().expect("endpoint not configured");
        ReservationListView::new(ReservationClient::new(&SourceConfig::default(), http))
    };
    assert!(view.mount(), "first mount should start a fetch");
    world.view = Some(view);
}

#[when("the view is mounted again")]
fn mount_again(world: &mut BoardWorld) {
    assert!(!world.view().mount(), "second mount must not fetch");
}

#[when("the view settles")]
async fn view_settles(world: &mut BoardWorld) {
    world.view().settled().await;
}

#[when("the view is unmounted")]
fn unmount_view(world: &mut BoardWorld) {
    world.view().unmount();
}

#[then(expr = "the view phase is {string}")]
async fn view_phase_is(world: &mut BoardWorld, expected: String) {
    let phase = world.view().read().await.phase();
    assert_eq!(phase, parse_phase(&expected));
}

#[then(expr = "exactly {int} request(s) was/were issued to {string}")]
fn requests_issued(world: &mut BoardWorld, count: usize, path: String) {
    let http = world.http.as_ref().expect("endpoint not configured");
    let urls = http.requested_urls();
    assert_eq!(urls.len(), count, "requests: {:?}", urls);
    assert!(
        urls.iter().all(|u| u.ends_with(&path)),
        "unexpected request urls: {:?}",
        urls
    );
}
