//! Fortune Request Model
//!
//! Birth data and requested options, validated at construction time.

use chrono::NaiveDate;
use serde::Serialize;
use sha2::{Digest, Sha256};

use super::error::{ValidationError, ValidationErrorKind};
use super::fortune::{
    AiType, CalendarType, CityType, FortuneType, GenderType, PeriodType, TimeType,
};

/// Rendered in place of an absent birth time or region
pub const UNKNOWN_LABEL: &str = "모름";

/// Longest lunar month
const MAX_LUNAR_DAY: u32 = 30;

// =============================================================================
// Birth Info
// =============================================================================

/// A user's birth data
///
/// Immutable once constructed. Solar dates must exist on the proleptic
/// Gregorian calendar; lunar dates only need month 1-12 and day 1-30.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthInfo {
    gender: GenderType,
    calendar: CalendarType,
    year: i32,
    month: u32,
    day: u32,
    time: Option<TimeType>,
    city: Option<CityType>,
}

impl BirthInfo {
    pub fn new(
        gender: GenderType,
        calendar: CalendarType,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<Self, ValidationError> {
        let valid = match calendar {
            CalendarType::Solar => NaiveDate::from_ymd_opt(year, month, day).is_some(),
            CalendarType::Lunar | CalendarType::LunarLeap => {
                (1..=12).contains(&month) && (1..=MAX_LUNAR_DAY).contains(&day)
            }
        };

        if !valid {
            return Err(ValidationError::new(
                ValidationErrorKind::InvalidBirthDate,
                format!("{}-{:02}-{:02} is not a valid date", year, month, day),
            )
            .with_field("birth_date"));
        }

        Ok(Self {
            gender,
            calendar,
            year,
            month,
            day,
            time: None,
            city: None,
        })
    }

    pub fn with_time(mut self, time: Option<TimeType>) -> Self {
        self.time = time;
        self
    }

    pub fn with_city(mut self, city: Option<CityType>) -> Self {
        self.city = city;
        self
    }

    pub fn gender(&self) -> GenderType {
        self.gender
    }

    pub fn calendar(&self) -> CalendarType {
        self.calendar
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn time(&self) -> Option<TimeType> {
        self.time
    }

    pub fn city(&self) -> Option<CityType> {
        self.city
    }

    pub fn birth_date(&self) -> String {
        format!("{}년 {}월 {}일", self.year, self.month, self.day)
    }

    pub fn time_label(&self) -> &'static str {
        self.time.map_or(UNKNOWN_LABEL, TimeType::label)
    }

    pub fn city_label(&self) -> &'static str {
        self.city.map_or(UNKNOWN_LABEL, CityType::label)
    }

    /// Human-readable block appended to every prompt
    pub fn render(&self) -> String {
        format!(
            "# 사용자 정보\n- 생년월일: {}\n- 양력/음력: {}\n- 성별: {}\n- 출생시간: {}\n- 출생장소: {}",
            self.birth_date(),
            self.calendar.label(),
            self.gender.label(),
            self.time_label(),
            self.city_label()
        )
    }

    /// Single-line rendition for log fields
    pub fn flattened(&self) -> String {
        self.render().replace('\n', " ")
    }
}

// =============================================================================
// Fortune Option
// =============================================================================

/// Requested provider, categories and period granularity
///
/// Holds at least one category; duplicates collapse to their first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FortuneOption {
    ai: AiType,
    fortunes: Vec<FortuneType>,
    period: PeriodType,
}

impl FortuneOption {
    pub fn new(
        ai: AiType,
        fortunes: impl IntoIterator<Item = FortuneType>,
        period: PeriodType,
    ) -> Result<Self, ValidationError> {
        let mut unique = Vec::new();
        for fortune in fortunes {
            if !unique.contains(&fortune) {
                unique.push(fortune);
            }
        }

        if unique.is_empty() {
            return Err(ValidationError::new(
                ValidationErrorKind::MissingField,
                "at least one fortune category is required",
            )
            .with_field("fortunes"));
        }

        Ok(Self {
            ai,
            fortunes: unique,
            period,
        })
    }

    pub fn ai(&self) -> AiType {
        self.ai
    }

    pub fn fortunes(&self) -> &[FortuneType] {
        &self.fortunes
    }

    pub fn period(&self) -> PeriodType {
        self.period
    }

    /// Category labels joined for prompts and titles, e.g. "애정, 건강"
    pub fn fortunes_label(&self) -> String {
        self.fortunes
            .iter()
            .map(|f| f.label())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Category keys joined for log fields, e.g. "love,health"
    pub fn fortunes_keys(&self) -> String {
        self.fortunes
            .iter()
            .map(|f| f.key())
            .collect::<Vec<_>>()
            .join(",")
    }
}

// =============================================================================
// Fortune Request
// =============================================================================

/// One pipeline invocation: who, what, and for which year
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FortuneRequest {
    pub birth: BirthInfo,
    pub option: FortuneOption,
    pub result_year: i32,
}

impl FortuneRequest {
    pub fn new(birth: BirthInfo, option: FortuneOption, result_year: i32) -> Self {
        Self {
            birth,
            option,
            result_year,
        }
    }

    /// Readable cache key; category order does not affect it
    pub fn cache_key(&self) -> String {
        let time_key = self.birth.time.map_or("UNKNOWN", TimeType::name);
        let city_key = self.birth.city.unwrap_or(CityType::Unknown).name();

        let mut fortune_keys: Vec<&str> = self.option.fortunes.iter().map(|f| f.name()).collect();
        fortune_keys.sort_unstable();

        [
            self.birth.gender.name().to_string(),
            self.birth.calendar.name().to_string(),
            self.birth.year.to_string(),
            self.birth.month.to_string(),
            self.birth.day.to_string(),
            time_key.to_string(),
            city_key.to_string(),
            fortune_keys.join(","),
            self.option.period.name().to_string(),
            self.result_year.to_string(),
        ]
        .join(":")
    }

    /// SHA-256 of the cache key, hex encoded
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.cache_key().as_bytes());
        digest.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Title used when the caller saves a result without naming it
    pub fn default_title(&self) -> String {
        format!(
            "{}년 {} {}",
            self.result_year,
            self.option.period.label(),
            self.option.fortunes_label()
        )
    }
}
