use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use std::fmt;

/// Competition entry as returned by the Alpha competitive list
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCompetition {
    #[serde(default)]
    pub competition_id: Option<Scalar>,
    #[serde(default)]
    pub competition_name: Option<String>,
    pub symbol: String,
    pub reward_amount: Scalar,
    pub start_time: i64, // epoch ms
    pub end_time: i64,   // epoch ms
    #[serde(default)]
    pub volume_limit: Option<Scalar>,
}

impl RawCompetition {
    /// Active window is [start_time, end_time)
    pub fn is_active_at(&self, now_ms: i64) -> bool {
        self.start_time <= now_ms && now_ms < self.end_time
    }

    /// Stable identity used for deduplication
    pub fn id(&self) -> String {
        match &self.competition_id {
            Some(id) => id.to_string(),
            None => format!("{}-{}", self.symbol, self.start_time),
        }
    }
}

/// Upstream value that may arrive either as a JSON string or a number
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(n.into())
    }
}

/// A currently running competition, ready to be announced
#[derive(Debug, Clone, PartialEq)]
pub struct Competition {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub reward: Scalar,
    pub end: DateTime<Utc>,
    pub volume_limit: Option<Scalar>,
}

impl From<RawCompetition> for Competition {
    fn from(raw: RawCompetition) -> Self {
        let id = raw.id();
        let name = raw.competition_name.unwrap_or_else(|| id.clone());
        let end = Utc
            .timestamp_millis_opt(raw.end_time)
            .single()
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            id,
            name,
            symbol: raw.symbol,
            reward: raw.reward_amount,
            end,
            volume_limit: raw.volume_limit,
        }
    }
}
