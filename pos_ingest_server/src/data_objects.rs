use serde::{Deserialize, Serialize};

/// Body returned by the webhook endpoint when a payload has been queued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptedResponse {
    pub status: String,
}

impl AcceptedResponse {
    pub fn accepted() -> Self {
        Self { status: "accepted".to_string() }
    }
}

/// Body returned by the liveness route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoResponse {
    pub message: String,
}

impl InfoResponse {
    pub fn live() -> Self {
        Self { message: "Webhook live. POST /webhook".to_string() }
    }
}
