//! Parsed Fortune Entries
//!
//! Wire shape of a single fact in the provider's JSON answer.

use serde::{Deserialize, Serialize};

use super::fortune::{FortuneType, PeriodValue};

/// One generated fact for a (category, period) pair
///
/// The older response shape named the period field `month`; it is still
/// accepted on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FortuneEntry {
    pub fortune: FortuneType,
    #[serde(rename = "periodValue", alias = "month")]
    pub period_value: PeriodValue,
    pub result: String,
}

impl FortuneEntry {
    pub fn new(fortune: FortuneType, period_value: PeriodValue, result: impl Into<String>) -> Self {
        Self {
            fortune,
            period_value,
            result: result.into(),
        }
    }
}
