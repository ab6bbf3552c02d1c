use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Email as held by the external mail store. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Email {
    pub id: i64,
    pub subject: String,
    pub sender: String,
    pub recipient: String,
    pub body: String,
    #[serde(with = "crate::timestamp")]
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_json: Option<String>,
}

/// A to-do item the mail service extracted from recent emails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub assignee: String,
    #[serde(default, with = "crate::timestamp::option")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Task text columns are nullable in the mail store; render them as empty.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Task {
    /// Human label for the 1 (highest) to 3 (lowest) priority scale.
    pub fn priority_label(&self) -> Option<&'static str> {
        match self.priority? {
            1 => Some("High"),
            2 => Some("Medium"),
            3 => Some("Low"),
            _ => None,
        }
    }
}

/// Search and date-range filter driving the email query. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailFilter {
    pub search_term: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl EmailFilter {
    /// Query string for `GET /emails/`.
    ///
    /// The search text is percent-encoded, dates become midnight-UTC ISO
    /// timestamps, and unset dates are sent as empty values.
    pub fn query_string(&self) -> String {
        format!(
            "search={}&start_date={}&end_date={}",
            urlencoding::encode(&self.search_term),
            self.start_date.map(iso_midnight).unwrap_or_default(),
            self.end_date.map(iso_midnight).unwrap_or_default(),
        )
    }
}

/// `YYYY-MM-DDT00:00:00.000Z`, the shape browsers produce for a date input.
pub fn iso_midnight(date: NaiveDate) -> String {
    date.and_time(NaiveTime::MIN)
        .and_utc()
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}
