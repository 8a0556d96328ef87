use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The acting identity jobs are reconciled against. Read-only input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub username: String,
}

impl Identity {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
        }
    }

    /// Derives a username from an account handle, falling back to the local
    /// part of the email address. Returns `None` when neither yields a
    /// non-empty name.
    pub fn derive_username(handle: Option<&str>, email: Option<&str>) -> Option<String> {
        if let Some(handle) = handle {
            let handle = handle.trim();
            if !handle.is_empty() {
                return Some(handle.to_string());
            }
        }
        if let Some(email) = email {
            let local = email.split('@').next().unwrap_or("").trim();
            if !local.is_empty() {
                return Some(local.to_string());
            }
        }
        None
    }
}

/// A job record as stored in the remote `jobs` dataset.
///
/// Only the ownership metadata is typed; every other field (`status`,
/// `deadline`, `payments`, `tasks`, ...) rides along untouched in `extra`.
/// Deserialization is lenient: a wrong-typed ownership field decodes as
/// absent rather than failing the record, so one malformed entry can never
/// fault a whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub owner_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub owner_username: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_team_job: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_deleted: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Accepts any JSON value, yielding `Some` only for strings.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(text) => Ok(Some(text)),
        _ => Ok(None),
    }
}

/// Accepts any JSON value, yielding `true` only for a literal `true`.
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(matches!(value, Value::Bool(true)))
}
