use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::AuthSession;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn register<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    body: Result<Json<RegisterRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    let Json(body) = body?;
    let command = RegisterCommand::parse(&body.name, &body.phone, &body.pin)?;

    let session = state.user_service.register(command).await?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        SessionResponseData::new("User registered successfully", &session),
    ))
}

/// Missing fields deserialize as empty strings so they are reported by
/// field validation rather than as a malformed body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    #[serde(default)]
    name: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    pin: String,
}

/// Body returned by both register and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResponseData {
    pub message: String,
    pub token: String,
    pub user: UserData,
}

impl SessionResponseData {
    pub fn new(message: &str, session: &AuthSession) -> Self {
        Self {
            message: message.to_string(),
            token: session.token.token.clone(),
            user: UserData::from(&session.user),
        }
    }
}
