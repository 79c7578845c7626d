// ── Wire-to-domain conversions ──
//
// The backend's two review categories use different field names for the
// same concepts (`created_at` vs `timestamp`, `id` vs `request_id`);
// everything is normalized here so the rest of the crate sees one shape.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use rentdesk_api::models as wire;

use crate::error::CoreError;
use crate::model::{
    ActivityEntry, CalendarOverride, DashboardMetrics, Operator, OperatorActivity, OperatorId,
    OperatorRole, OperatorStats, PermissionSet, RequestId, RequestStatus, ReviewCategory,
    ReviewableRequest,
};

/// Parse a backend timestamp.
///
/// The backend emits naive local ISO 8601 (`2026-02-10T09:15:00.123456`)
/// for records it writes itself, but proxied fields occasionally carry an
/// offset. Naive values are taken as UTC.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>()
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn parse_timestamp_opt(raw: Option<&String>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| parse_timestamp(s))
}

fn parse_status(raw: &str) -> RequestStatus {
    // The status set is closed; anything unrecognized stays visible as
    // pending rather than vanishing from the review screen.
    raw.parse().unwrap_or(RequestStatus::Pending)
}

impl From<wire::RentalRequestRecord> for ReviewableRequest {
    fn from(record: wire::RentalRequestRecord) -> Self {
        Self {
            id: RequestId::new(record.id),
            category: ReviewCategory::Rental,
            subject: record.user_name.unwrap_or_else(|| "Unknown customer".into()),
            detail: record.console_name,
            created_at: parse_timestamp_opt(record.created_at.as_ref())
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
            status: parse_status(&record.status),
            reviewer_id: record.processed_by.map(OperatorId::new),
            note: record.admin_note,
            processed_at: parse_timestamp_opt(record.updated_at.as_ref()),
        }
    }
}

impl From<wire::KycRequestRecord> for ReviewableRequest {
    fn from(record: wire::KycRequestRecord) -> Self {
        Self {
            id: RequestId::new(record.id),
            category: ReviewCategory::Kyc,
            subject: record.user_name.unwrap_or_else(|| "Unknown customer".into()),
            detail: record.username.map(|u| format!("@{u}")),
            created_at: parse_timestamp_opt(record.timestamp.as_ref())
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
            status: parse_status(&record.status),
            reviewer_id: record.processed_by.map(OperatorId::new),
            note: record.admin_note,
            processed_at: parse_timestamp_opt(record.processed_at.as_ref()),
        }
    }
}

impl From<wire::OperatorRecord> for Operator {
    fn from(record: wire::OperatorRecord) -> Self {
        let stats = record.stats.unwrap_or_default();
        Self {
            id: OperatorId::new(record.id),
            username: record.username,
            full_name: record.full_name,
            role: record.role.parse().unwrap_or(OperatorRole::Staff),
            permissions: PermissionSet::from(record.permissions),
            bio: record.bio,
            created_at: parse_timestamp_opt(record.created_at.as_ref()),
            stats: OperatorStats {
                total_processed_requests: stats.total_processed_requests,
                total_processed_kyc: stats.total_processed_kyc,
                daily_actions: stats.daily_actions,
            },
        }
    }
}

impl From<wire::StatsResponse> for DashboardMetrics {
    fn from(stats: wire::StatsResponse) -> Self {
        Self {
            total_revenue: stats.total_revenue,
            revenue_per_minute: stats.revenue_per_minute,
            active_rentals: stats.active_rentals,
            total_users: stats.total_users,
            total_consoles: stats.total_consoles,
            available_consoles: stats.available_consoles,
            activity: stats.activity.into_iter().map(ActivityEntry::from).collect(),
        }
    }
}

impl From<wire::ActivityRecord> for ActivityEntry {
    fn from(record: wire::ActivityRecord) -> Self {
        Self {
            title: record.title,
            subtitle: record.subtitle,
            time: parse_timestamp_opt(record.time.as_ref()),
            amount: record.amount,
            status: record.status,
        }
    }
}

impl From<wire::ActivityReportRow> for OperatorActivity {
    fn from(row: wire::ActivityReportRow) -> Self {
        Self {
            id: OperatorId::new(row.id),
            full_name: row.full_name,
            role: row.role.parse().unwrap_or(OperatorRole::Staff),
            today_actions: row.today_actions,
            total_requests: row.total_requests,
            total_kyc: row.total_kyc,
        }
    }
}

/// Convert one entry of the overrides collection into a domain record.
///
/// Returns `Ok(None)` for the backend's explicit "no rule here" answer
/// (`type: "none"`), and an error for unparseable dates or discount
/// records that fail validation.
pub(crate) fn override_from_wire(
    date: &str,
    record: wire::OverrideRecord,
) -> Result<Option<CalendarOverride>, CoreError> {
    let date = date.parse().map_err(|_| CoreError::ValidationFailed {
        message: format!("invalid override date: {date}"),
    })?;

    match record.kind.as_str() {
        "discount" => {
            let raw = record.value.ok_or_else(|| CoreError::ValidationFailed {
                message: "discount override without a value".into(),
            })?;
            let percent = u8::try_from(raw).map_err(|_| CoreError::ValidationFailed {
                message: format!("discount must be 0-100 percent, got {raw}"),
            })?;
            CalendarOverride::discount(date, percent, record.description).map(Some)
        }
        "blackout" => Ok(Some(CalendarOverride::blackout(date, record.description))),
        "none" | "" => Ok(None),
        other => Err(CoreError::ValidationFailed {
            message: format!("unknown override type: {other}"),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::OverrideRule;

    #[test]
    fn parses_naive_backend_timestamps_as_utc() {
        let dt = parse_timestamp("2026-02-10T09:15:00.123456").unwrap();
        assert_eq!(dt.timestamp(), 1770714900);
    }

    #[test]
    fn parses_rfc3339_timestamps() {
        assert!(parse_timestamp("2026-02-10T09:15:00+02:00").is_some());
        assert!(parse_timestamp("not a date").is_none());
    }

    #[test]
    fn rental_record_normalizes_into_domain_shape() {
        let record = wire::RentalRequestRecord {
            id: "r-1".into(),
            user_id: None,
            user_name: Some("Dana Voss".into()),
            console_id: Some("c-17".into()),
            console_name: Some("PS5 #3".into()),
            status: "pending".into(),
            created_at: Some("2026-02-10T09:15:00".into()),
            updated_at: None,
            selected_hours: Some(24),
            processed_by: None,
            admin_note: None,
            extra: serde_json::Map::new(),
        };

        let request = ReviewableRequest::from(record);
        assert_eq!(request.category, ReviewCategory::Rental);
        assert_eq!(request.subject, "Dana Voss");
        assert_eq!(request.detail.as_deref(), Some("PS5 #3"));
        assert_eq!(request.status, RequestStatus::Pending);
    }

    #[test]
    fn kyc_record_uses_timestamp_field_for_created_at() {
        let record = wire::KycRequestRecord {
            id: "k-1".into(),
            user_id: None,
            user_name: Some("Mara Ilie".into()),
            username: Some("mara_i".into()),
            photo_url: None,
            status: "approved".into(),
            timestamp: Some("2026-02-09T12:00:00".into()),
            processed_by: Some("op-1".into()),
            processed_at: Some("2026-02-10T08:00:00".into()),
            admin_note: Some("ok".into()),
            extra: serde_json::Map::new(),
        };

        let request = ReviewableRequest::from(record);
        assert_eq!(request.category, ReviewCategory::Kyc);
        assert_eq!(request.detail.as_deref(), Some("@mara_i"));
        assert_eq!(request.status, RequestStatus::Approved);
        assert_eq!(request.reviewer_id, Some(OperatorId::from("op-1")));
        assert!(request.processed_at.is_some());
    }

    #[test]
    fn override_from_wire_handles_all_kinds() {
        let discount = override_from_wire(
            "2025-12-25",
            wire::OverrideRecord {
                kind: "discount".into(),
                value: Some(30),
                description: Some("Holiday".into()),
                updated_at: None,
            },
        )
        .unwrap()
        .unwrap();
        assert_eq!(discount.rule, OverrideRule::Discount { percent: 30 });

        let none = override_from_wire(
            "2025-12-26",
            wire::OverrideRecord {
                kind: "none".into(),
                value: None,
                description: None,
                updated_at: None,
            },
        )
        .unwrap();
        assert!(none.is_none());

        let bad = override_from_wire(
            "2025-12-27",
            wire::OverrideRecord {
                kind: "discount".into(),
                value: Some(250),
                description: None,
                updated_at: None,
            },
        );
        assert!(bad.is_err());
    }
}
