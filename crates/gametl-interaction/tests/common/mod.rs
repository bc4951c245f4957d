#![allow(dead_code)]

use std::sync::Mutex;

use axum::Router;
use gametl_core::progress::{ProgressEmitter, ProgressEvent};

/// Serves `router` on an ephemeral port and returns its base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Emitter that records every event.
#[derive(Default)]
pub struct RecordingEmitter {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingEmitter {
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn messages(&self, thread_id: usize) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|e| e.thread_id == thread_id && !e.message.is_empty())
            .map(|e| e.message)
            .collect()
    }

    pub fn contains(&self, message: &str) -> bool {
        self.events().iter().any(|e| e.message == message)
    }
}

impl ProgressEmitter for RecordingEmitter {
    fn emit(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}
