// ── Calendar overrides ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The rule an override applies to its date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "type")]
pub enum OverrideRule {
    /// Percentage discount on the standard rate.
    Discount { percent: u8 },
    /// Date fully closed for new rentals.
    Blackout,
}

/// A per-date scheduling rule. At most one per calendar date; writing a
/// date replaces any prior record wholesale, so a rule switch can never
/// leave fields from the previous rule behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarOverride {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub rule: OverrideRule,
    pub description: Option<String>,
}

impl CalendarOverride {
    /// Build a discount override. The percentage must be within `0..=100`;
    /// anything else is rejected before it can reach the backend.
    pub fn discount(
        date: NaiveDate,
        percent: u8,
        description: Option<String>,
    ) -> Result<Self, CoreError> {
        if percent > 100 {
            return Err(CoreError::ValidationFailed {
                message: format!("discount must be 0-100 percent, got {percent}"),
            });
        }
        Ok(Self {
            date,
            rule: OverrideRule::Discount { percent },
            description,
        })
    }

    /// Build a blackout override. Any discount value a caller might carry
    /// over is irrelevant by construction.
    pub fn blackout(date: NaiveDate, description: Option<String>) -> Self {
        Self {
            date,
            rule: OverrideRule::Blackout,
            description,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn discount_accepts_full_range() {
        assert!(CalendarOverride::discount(date("2025-12-25"), 0, None).is_ok());
        assert!(CalendarOverride::discount(date("2025-12-25"), 100, None).is_ok());
    }

    #[test]
    fn discount_rejects_out_of_range() {
        let err = CalendarOverride::discount(date("2025-12-25"), 101, None).unwrap_err();
        assert!(matches!(err, CoreError::ValidationFailed { .. }));
    }
}
