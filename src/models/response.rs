use serde::Serialize;

/// Body of a successful `POST /api/contact`
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

impl ContactResponse {
    pub fn sent() -> Self {
        Self {
            success: true,
            message: "Message sent successfully".to_string(),
        }
    }
}

/// Body of a successful `GET /api/test-email`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestEmailResponse {
    pub success: bool,
    pub message_id: String,
}
