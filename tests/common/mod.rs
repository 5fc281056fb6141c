// tests/common/mod.rs
// Local stand-in for the pricing backend

#![allow(dead_code)]

use axum::Router;
use serde_json::{Value, json};
use std::sync::Arc;

use finhealth::{ApiClient, ChatSession, Settings};

/// Serve `app` on an ephemeral port and return its base URL
pub async fn spawn_backend(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve test backend");
    });
    format!("http://{}", addr)
}

/// Session talking to the backend at `base_url`
pub fn session_for(base_url: &str) -> ChatSession {
    let client = ApiClient::new(base_url, None).expect("client");
    ChatSession::new(Arc::new(client))
}

/// Settings with follow-ups shown immediately
pub fn instant_settings() -> Settings {
    Settings {
        follow_up_delay_scale: 0.0,
        ..Settings::default()
    }
}

/// One priced hospital as the backend sends it
pub fn quote_json(name: &str, cash: f64) -> Value {
    json!({
        "hospital": {
            "name": name,
            "address": format!("1 {} Way", name),
            "phone": "(555) 010-0000",
            "rating": 4.4,
            "emergency": true,
            "average_wait_time": 25
        },
        "total_cost": cash + 150.0,
        "total_cash_cost": cash,
        "total_savings_cash": 150.0,
        "procedures": [
            {"procedure": "MRI", "base_price": cash + 150.0, "cash_price": cash, "savings_cash": 150.0}
        ]
    })
}
