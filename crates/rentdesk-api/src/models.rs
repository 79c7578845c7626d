// Backend API wire types
//
// Models for the Rentdesk backend's JSON API. Fields use `#[serde(default)]`
// liberally because the backend is inconsistent about field presence across
// record ages and deployment versions. Timestamps arrive as ISO 8601 strings
// (sometimes naive, without a timezone offset) and are kept as strings here;
// `rentdesk-core` normalizes them into `DateTime<Utc>`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ── Error body ───────────────────────────────────────────────────────

/// Error payload returned by the backend on any non-2xx response:
/// `{ "error": "..." }`.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Acknowledgment payload for write endpoints: `{ "success": true }`.
#[derive(Debug, Deserialize)]
pub struct Acknowledgment {
    #[serde(default)]
    pub success: bool,
}

// ── Rental requests ──────────────────────────────────────────────────

/// Rental request record from `GET /api/requests`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalRequestRecord {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<serde_json::Value>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub console_id: Option<String>,
    #[serde(default)]
    pub console_name: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub selected_hours: Option<u32>,
    #[serde(default)]
    pub processed_by: Option<String>,
    #[serde(default)]
    pub admin_note: Option<String>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Body for `POST /api/requests/action`.
#[derive(Debug, Serialize)]
pub struct RentalActionBody {
    pub id: String,
    /// `"approve"` or `"reject"`.
    pub action: String,
    pub admin_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

// ── KYC requests ─────────────────────────────────────────────────────

/// Identity-verification request record from `GET /api/kyc`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KycRequestRecord {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<serde_json::Value>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub status: String,
    /// Submission time. The KYC endpoint names this `timestamp`, not
    /// `created_at`.
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub processed_by: Option<String>,
    #[serde(default)]
    pub processed_at: Option<String>,
    #[serde(default)]
    pub admin_note: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Body for `POST /api/kyc/action`. The KYC endpoint names its id field
/// `request_id` where the rental endpoint uses `id`.
#[derive(Debug, Serialize)]
pub struct KycActionBody {
    pub request_id: String,
    pub action: String,
    pub admin_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

// ── Calendar overrides ───────────────────────────────────────────────

/// Per-date scheduling override from `GET /api/discounts`.
///
/// The collection endpoint returns an object keyed by `YYYY-MM-DD`; the
/// date itself is not repeated inside the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideRecord {
    /// `"discount"` or `"blackout"`.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub value: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body for `POST /api/discounts`. Deletion is expressed as a boolean
/// flag on the write payload, not a distinct verb.
#[derive(Debug, Serialize)]
pub struct OverrideWriteBody {
    pub date: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<bool>,
}

// ── Dashboard metrics ────────────────────────────────────────────────

/// Aggregate metrics from `GET /api/stats`, used for dashboard display only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    #[serde(default)]
    pub total_revenue: f64,
    #[serde(default)]
    pub revenue_per_minute: f64,
    #[serde(default)]
    pub active_rentals: u64,
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_consoles: u64,
    #[serde(default)]
    pub available_consoles: u64,
    #[serde(default)]
    pub activity: Vec<ActivityRecord>,
}

/// One row of the dashboard's recent-activity feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
}

// ── Operators ────────────────────────────────────────────────────────

/// Operator account record from the admins endpoints. The backend strips
/// the password hash before responding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorRecord {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub stats: Option<OperatorStatsRecord>,
}

/// Backend-computed activity counters attached to an operator record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OperatorStatsRecord {
    #[serde(default)]
    pub total_processed_requests: u64,
    #[serde(default)]
    pub total_processed_kyc: u64,
    /// Actions per ISO date, `"YYYY-MM-DD" -> count`.
    #[serde(default)]
    pub daily_actions: BTreeMap<String, u64>,
}

/// Body for `POST /api/admins/login`.
#[derive(Debug, Serialize)]
pub struct LoginBody {
    pub username: String,
    pub password: String,
}

/// One row of `GET /api/admins/reports/daily`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityReportRow {
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub today_actions: u64,
    #[serde(default)]
    pub total_requests: u64,
    #[serde(default)]
    pub total_kyc: u64,
}
