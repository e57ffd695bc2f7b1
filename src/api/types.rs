//! API request and response types

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::models::RulingResponse;

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Ask request
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

/// Ask response: the full ruling record plus request envelope fields
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub success: bool,
    pub question: String,
    pub club_id: &'static str,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub ruling: RulingResponse,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub club_rules_loaded: usize,
    pub general_rules_loaded: usize,
    pub templates_loaded: usize,
    pub definitions_loaded: usize,
}

/// Definitions lookup parameters
#[derive(Debug, Deserialize)]
pub struct DefinitionsQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}
