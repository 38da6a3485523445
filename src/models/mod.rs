use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored note. Also the on-disk record shape: the backing file is a
/// pretty-printed JSON array of these, `updatedAt` omitted until the note
/// is first updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
