//! Daily forecast summary model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::theme::ConditionCategory;

/// Condensed forecast for one calendar day
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DailySummary {
    /// UTC calendar day, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    /// Lowest temperature of the day in whole degrees Celsius
    pub min_temp: i32,
    /// Highest temperature of the day in whole degrees Celsius
    pub max_temp: i32,
    /// Most frequent condition label of the day
    pub dominant_condition: String,
}

impl DailySummary {
    /// Short date label, e.g. "Sat, Oct 18"
    #[must_use]
    pub fn format_date(&self) -> String {
        self.date.format("%a, %b %-d").to_string()
    }

    /// Format the temperature range as "min° / max°"
    #[must_use]
    pub fn format_range(&self) -> String {
        format!("{}° / {}°", self.min_temp, self.max_temp)
    }

    #[must_use]
    pub fn category(&self) -> ConditionCategory {
        ConditionCategory::classify(&self.dominant_condition)
    }
}
