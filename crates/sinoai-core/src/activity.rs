//! Activity rows read from the data store and the business counts built on them.
//!
//! Both activity tables share the columns used here (`chat_id`, `created_at`,
//! `ai_message`). Values arrive as loosely typed JSON, so identifiers and
//! payloads are kept as [`serde_json::Value`] and interpreted by the helpers
//! below.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;

/// Columns needed to count active users.
pub const ACTIVE_USER_COLUMNS: &[&str] = &["chat_id", "created_at"];

/// Columns needed to count AI messages.
pub const AI_MESSAGE_COLUMNS: &[&str] = &["ai_message", "created_at"];

/// One row of an activity table. Columns not selected are absent.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ActivityRow {
    #[serde(default)]
    pub chat_id: Option<Value>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub ai_message: Option<Value>,
}

/// Dedup key for a chat identifier.
///
/// `42` and `"42"` map to the same key; null has none.
pub fn chat_key(id: &Value) -> Option<String> {
    match id {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Number of distinct chat identifiers across all rows given.
pub fn count_distinct_chats<'a, I>(rows: I) -> usize
where
    I: IntoIterator<Item = &'a ActivityRow>,
{
    rows.into_iter()
        .filter_map(|r| r.chat_id.as_ref().and_then(chat_key))
        .collect::<HashSet<_>>()
        .len()
}

/// Whether a row carries a non-empty AI message.
pub fn has_ai_message(row: &ActivityRow) -> bool {
    match &row.ai_message {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_none_or(|f| f != 0.0),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

/// Number of rows with a non-empty AI message.
pub fn count_ai_messages<'a, I>(rows: I) -> usize
where
    I: IntoIterator<Item = &'a ActivityRow>,
{
    rows.into_iter().filter(|r| has_ai_message(r)).count()
}
