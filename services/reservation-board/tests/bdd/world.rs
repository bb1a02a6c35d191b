//! BDD test world for the reservation board

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use cucumber::World;
use reservation_board::io::{HttpClient, HttpResponse};
use reservation_board::ReservationListView;

/// What the fake reservations endpoint does when asked
#[derive(Debug, Clone)]
pub enum Reply {
    Respond { status: u16, body: String },
    RespondAfter { delay: Duration, status: u16, body: String },
}

/// An HTTP client that records requested URLs and plays back one canned reply
#[derive(Debug)]
pub struct ScriptedHttpClient {
    pub reply: Reply,
    pub requests: Mutex<Vec<String>>,
}

impl ScriptedHttpClient {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for ScriptedHttpClient {
    async fn get(&self, url: &str) -> reservation_board::Result<HttpResponse> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.reply.clone() {
            Reply::Respond { status, body } => Ok(HttpResponse { status, body }),
            Reply::RespondAfter {
                delay,
                status,
                body,
            } => {
                tokio::time::sleep(delay).await;
                Ok(HttpResponse { status, body })
            }
        }
    }
}

#[derive(Debug, Default, World)]
pub struct BoardWorld {
    pub http: Option<Arc<ScriptedHttpClient>>,
    pub unreachable: bool,
    pub view: Option<ReservationListView>,
    pub rendered: Option<String>,
    pub previous_keys: Option<Vec<String>>,
}

impl BoardWorld {
    pub fn view(&self) -> &ReservationListView {
        self.view.as_ref().expect("view not mounted")
    }

    pub fn rendered(&self) -> &str {
        self.rendered.as_deref().expect("view not rendered")
    }
}
