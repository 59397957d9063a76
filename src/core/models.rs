//! Wire types shared by the verifier, the auth API client and the UI.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// User identifier as returned by the backend (numeric in dev, UUID in production)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Numeric(id) => write!(f, "{}", id),
            UserId::Text(id) => f.write_str(id),
        }
    }
}

/// User record from the current-user endpoint.
///
/// Fields the client does not model are kept in `extra` so the record
/// round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Best human-facing name for the user
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) if !first.is_empty() => return format!("{} {}", first, last),
            (Some(first), _) if !first.is_empty() => return first.to_string(),
            _ => {}
        }
        self.username
            .clone()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| self.email.clone())
    }
}

/// Login request
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Register request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

impl RegisterRequest {
    pub const DEFAULT_ROLE: &'static str = "user";
}

/// Token and user returned by a successful login or register call
#[derive(Debug, Clone, PartialEq)]
pub struct AuthGrant {
    pub access_token: String,
    pub user: User,
}

/// Body of login/register responses, successful or not
#[derive(Debug, Deserialize)]
pub(crate) struct AuthEnvelope {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub detail: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AuthEnvelope {
    /// Error detail supplied by the server, if any.
    ///
    /// FastAPI validation errors put a list of `{msg}` objects in `detail`.
    pub fn error_detail(&self) -> Option<String> {
        let from_detail = match &self.detail {
            Some(Value::String(detail)) => Some(detail.clone()),
            Some(Value::Array(items)) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect();
                (!messages.is_empty()).then(|| messages.join("; "))
            }
            _ => None,
        };

        from_detail
            .or_else(|| self.error.clone())
            .or_else(|| self.message.clone())
            .filter(|detail| !detail.trim().is_empty())
    }

    /// Token and user, if this is a successful response.
    pub fn into_grant(self) -> Option<AuthGrant> {
        if self.success == Some(false) {
            return None;
        }
        match (self.access_token, self.user) {
            (Some(access_token), Some(user)) if !access_token.is_empty() => {
                Some(AuthGrant { access_token, user })
            }
            _ => None,
        }
    }
}

/// `{success, user?, error?}` result handed to UI callers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuthOutcome {
    pub fn ok(user: Option<User>) -> Self {
        Self {
            success: true,
            user,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            user: None,
            error: Some(error.into()),
        }
    }
}

impl From<Result<User, crate::core::AuthError>> for AuthOutcome {
    fn from(result: Result<User, crate::core::AuthError>) -> Self {
        match result {
            Ok(user) => AuthOutcome::ok(Some(user)),
            Err(err) => AuthOutcome::failed(err.to_string()),
        }
    }
}
