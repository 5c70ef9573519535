//! Fortune Domain Enumerations
//!
//! Closed sets used by requests and parsed provider output. Every enum
//! carries a fixed lookup table:
//!
//! - `name()`: stable SCREAMING_SNAKE identifier (cache keys, logs)
//! - `key()`: machine key used on the wire (exact match during parsing)
//! - `label()`: Korean display label used in prompts and titles
//!
//! `FromStr` is lenient (key or name, any case) for CLI and config input.
//! Serde is strict: only the exact `key()` deserializes, so an unknown key in
//! provider output fails fast.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

fn parse_lenient<T: Copy>(
    s: &str,
    all: &[T],
    key: impl Fn(T) -> &'static str,
    name: impl Fn(T) -> &'static str,
    kind: &str,
) -> Result<T, String> {
    let needle = s.trim();
    all.iter()
        .copied()
        .find(|v| key(*v).eq_ignore_ascii_case(needle) || name(*v).eq_ignore_ascii_case(needle))
        .ok_or_else(|| {
            let valid: Vec<&str> = all.iter().map(|v| key(*v)).collect();
            format!(
                "Unknown {}: {}. Valid values: {}",
                kind,
                s,
                valid.join(", ")
            )
        })
}

// =============================================================================
// Fortune Category
// =============================================================================

/// Life-domain topic a fortune is generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FortuneType {
    #[serde(rename = "overall")]
    Overall,
    #[serde(rename = "money")]
    Money,
    #[serde(rename = "love")]
    Love,
    #[serde(rename = "career")]
    Career,
    #[serde(rename = "study")]
    Study,
    #[serde(rename = "luck")]
    Luck,
    #[serde(rename = "family")]
    Family,
    #[serde(rename = "health")]
    Health,
}

impl FortuneType {
    pub const ALL: [FortuneType; 8] = [
        Self::Overall,
        Self::Money,
        Self::Love,
        Self::Career,
        Self::Study,
        Self::Luck,
        Self::Family,
        Self::Health,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Overall => "OVERALL",
            Self::Money => "MONEY",
            Self::Love => "LOVE",
            Self::Career => "CAREER",
            Self::Study => "STUDY",
            Self::Luck => "LUCK",
            Self::Family => "FAMILY",
            Self::Health => "HEALTH",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Overall => "overall",
            Self::Money => "money",
            Self::Love => "love",
            Self::Career => "career",
            Self::Study => "study",
            Self::Luck => "luck",
            Self::Family => "family",
            Self::Health => "health",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Overall => "종합",
            Self::Money => "재물",
            Self::Love => "애정",
            Self::Career => "직장 사업",
            Self::Study => "학업 시험",
            Self::Luck => "행운",
            Self::Family => "가정",
            Self::Health => "건강",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Overall => "🔮",
            Self::Money => "💰",
            Self::Love => "💕",
            Self::Career => "💼",
            Self::Study => "📚",
            Self::Luck => "🍀",
            Self::Family => "🏠",
            Self::Health => "💪",
        }
    }

    /// Whether the category is offered by default in the product UI
    pub fn enabled(self) -> bool {
        matches!(self, Self::Overall)
    }
}

impl fmt::Display for FortuneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for FortuneType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_lenient(s, &Self::ALL, Self::key, Self::name, "fortune type")
    }
}

// =============================================================================
// Period Granularity
// =============================================================================

/// Requested period granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Monthly,
    Quarterly,
    Yearly,
}

impl PeriodType {
    pub const ALL: [PeriodType; 3] = [Self::Monthly, Self::Quarterly, Self::Yearly];

    pub fn name(self) -> &'static str {
        match self {
            Self::Monthly => "MONTHLY",
            Self::Quarterly => "QUARTERLY",
            Self::Yearly => "YEARLY",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Monthly => "월별",
            Self::Quarterly => "분기별",
            Self::Yearly => "올 한해",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Monthly => "📆",
            Self::Quarterly => "📊",
            Self::Yearly => "📋",
        }
    }

    pub fn enabled(self) -> bool {
        matches!(self, Self::Monthly)
    }

    /// Period buckets a complete answer for this granularity covers
    pub fn values(self) -> &'static [PeriodValue] {
        match self {
            Self::Monthly => &PeriodValue::ALL[0..12],
            Self::Quarterly => &PeriodValue::ALL[12..16],
            Self::Yearly => &PeriodValue::ALL[16..17],
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for PeriodType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_lenient(s, &Self::ALL, Self::key, Self::name, "period type")
    }
}

// =============================================================================
// Period Value
// =============================================================================

/// A single period bucket: a month, a quarter, or the whole year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodValue {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
    Q1,
    Q2,
    Q3,
    Q4,
    Year,
}

impl PeriodValue {
    pub const ALL: [PeriodValue; 17] = [
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
        Self::Q1,
        Self::Q2,
        Self::Q3,
        Self::Q4,
        Self::Year,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::January => "JANUARY",
            Self::February => "FEBRUARY",
            Self::March => "MARCH",
            Self::April => "APRIL",
            Self::May => "MAY",
            Self::June => "JUNE",
            Self::July => "JULY",
            Self::August => "AUGUST",
            Self::September => "SEPTEMBER",
            Self::October => "OCTOBER",
            Self::November => "NOVEMBER",
            Self::December => "DECEMBER",
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
            Self::Year => "YEAR",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::January => "january",
            Self::February => "february",
            Self::March => "march",
            Self::April => "april",
            Self::May => "may",
            Self::June => "june",
            Self::July => "july",
            Self::August => "august",
            Self::September => "september",
            Self::October => "october",
            Self::November => "november",
            Self::December => "december",
            Self::Q1 => "q1",
            Self::Q2 => "q2",
            Self::Q3 => "q3",
            Self::Q4 => "q4",
            Self::Year => "year",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::January => "1월",
            Self::February => "2월",
            Self::March => "3월",
            Self::April => "4월",
            Self::May => "5월",
            Self::June => "6월",
            Self::July => "7월",
            Self::August => "8월",
            Self::September => "9월",
            Self::October => "10월",
            Self::November => "11월",
            Self::December => "12월",
            Self::Q1 => "1분기",
            Self::Q2 => "2분기",
            Self::Q3 => "3분기",
            Self::Q4 => "4분기",
            Self::Year => "연간",
        }
    }

    /// Ordinal within its granularity (month 1-12, quarter 1-4, year 1)
    pub fn number(self) -> u8 {
        match self {
            Self::Q1 => 1,
            Self::Q2 => 2,
            Self::Q3 => 3,
            Self::Q4 => 4,
            Self::Year => 1,
            month => month as u8 + 1,
        }
    }

    /// Granularity this bucket belongs to
    pub fn period_type(self) -> PeriodType {
        match self {
            Self::Q1 | Self::Q2 | Self::Q3 | Self::Q4 => PeriodType::Quarterly,
            Self::Year => PeriodType::Yearly,
            _ => PeriodType::Monthly,
        }
    }
}

impl fmt::Display for PeriodValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for PeriodValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_lenient(s, &Self::ALL, Self::key, Self::name, "period value")
    }
}

// =============================================================================
// Birth Attributes
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenderType {
    Female,
    Male,
}

impl GenderType {
    pub const ALL: [GenderType; 2] = [Self::Female, Self::Male];

    pub fn name(self) -> &'static str {
        match self {
            Self::Female => "FEMALE",
            Self::Male => "MALE",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Female => "여성",
            Self::Male => "남성",
        }
    }
}

impl fmt::Display for GenderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for GenderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_lenient(s, &Self::ALL, Self::key, Self::name, "gender")
    }
}

/// Calendar system the birth date is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarType {
    Solar,
    Lunar,
    LunarLeap,
}

impl CalendarType {
    pub const ALL: [CalendarType; 3] = [Self::Solar, Self::Lunar, Self::LunarLeap];

    pub fn name(self) -> &'static str {
        match self {
            Self::Solar => "SOLAR",
            Self::Lunar => "LUNAR",
            Self::LunarLeap => "LUNAR_LEAP",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Solar => "solar",
            Self::Lunar => "lunar",
            Self::LunarLeap => "lunar_leap",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Solar => "양력",
            Self::Lunar => "음력(평달)",
            Self::LunarLeap => "음력(윤달)",
        }
    }
}

impl fmt::Display for CalendarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for CalendarType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_lenient(s, &Self::ALL, Self::key, Self::name, "calendar type")
    }
}

/// Two-hour birth time slot, named by its start time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeType {
    #[serde(rename = "time_23_30")]
    Time2330,
    #[serde(rename = "time_01_30")]
    Time0130,
    #[serde(rename = "time_03_30")]
    Time0330,
    #[serde(rename = "time_05_30")]
    Time0530,
    #[serde(rename = "time_07_30")]
    Time0730,
    #[serde(rename = "time_09_30")]
    Time0930,
    #[serde(rename = "time_11_30")]
    Time1130,
    #[serde(rename = "time_13_30")]
    Time1330,
    #[serde(rename = "time_15_30")]
    Time1530,
    #[serde(rename = "time_17_30")]
    Time1730,
    #[serde(rename = "time_19_30")]
    Time1930,
    #[serde(rename = "time_21_30")]
    Time2130,
}

impl TimeType {
    pub const ALL: [TimeType; 12] = [
        Self::Time2330,
        Self::Time0130,
        Self::Time0330,
        Self::Time0530,
        Self::Time0730,
        Self::Time0930,
        Self::Time1130,
        Self::Time1330,
        Self::Time1530,
        Self::Time1730,
        Self::Time1930,
        Self::Time2130,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Time2330 => "TIME_23_30",
            Self::Time0130 => "TIME_01_30",
            Self::Time0330 => "TIME_03_30",
            Self::Time0530 => "TIME_05_30",
            Self::Time0730 => "TIME_07_30",
            Self::Time0930 => "TIME_09_30",
            Self::Time1130 => "TIME_11_30",
            Self::Time1330 => "TIME_13_30",
            Self::Time1530 => "TIME_15_30",
            Self::Time1730 => "TIME_17_30",
            Self::Time1930 => "TIME_19_30",
            Self::Time2130 => "TIME_21_30",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Time2330 => "time_23_30",
            Self::Time0130 => "time_01_30",
            Self::Time0330 => "time_03_30",
            Self::Time0530 => "time_05_30",
            Self::Time0730 => "time_07_30",
            Self::Time0930 => "time_09_30",
            Self::Time1130 => "time_11_30",
            Self::Time1330 => "time_13_30",
            Self::Time1530 => "time_15_30",
            Self::Time1730 => "time_17_30",
            Self::Time1930 => "time_19_30",
            Self::Time2130 => "time_21_30",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Time2330 => "자시(23:30 - 01:29)",
            Self::Time0130 => "축시(01:30 - 03:29)",
            Self::Time0330 => "인시(03:30 - 05:29)",
            Self::Time0530 => "묘시(05:30 - 07:29)",
            Self::Time0730 => "진시(07:30 - 09:29)",
            Self::Time0930 => "사시(09:30 - 11:29)",
            Self::Time1130 => "오시(11:30 - 13:29)",
            Self::Time1330 => "미시(13:30 - 15:29)",
            Self::Time1530 => "신시(15:30 - 17:29)",
            Self::Time1730 => "유시(17:30 - 19:29)",
            Self::Time1930 => "술시(19:30 - 21:29)",
            Self::Time2130 => "해시(21:30 - 23:29)",
        }
    }
}

impl fmt::Display for TimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for TimeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_lenient(s, &Self::ALL, Self::key, Self::name, "birth time")
    }
}

/// Birth region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CityType {
    Seoul,
    Gyeonggi,
    Incheon,
    Gangwon,
    Chungcheong,
    Jeolla,
    Gyeongsang,
    Jeju,
    Unknown,
}

impl CityType {
    pub const ALL: [CityType; 9] = [
        Self::Seoul,
        Self::Gyeonggi,
        Self::Incheon,
        Self::Gangwon,
        Self::Chungcheong,
        Self::Jeolla,
        Self::Gyeongsang,
        Self::Jeju,
        Self::Unknown,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Seoul => "SEOUL",
            Self::Gyeonggi => "GYEONGGI",
            Self::Incheon => "INCHEON",
            Self::Gangwon => "GANGWON",
            Self::Chungcheong => "CHUNGCHEONG",
            Self::Jeolla => "JEOLLA",
            Self::Gyeongsang => "GYEONGSANG",
            Self::Jeju => "JEJU",
            Self::Unknown => "UNKNOWN",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Seoul => "seoul",
            Self::Gyeonggi => "gyeonggi",
            Self::Incheon => "incheon",
            Self::Gangwon => "gangwon",
            Self::Chungcheong => "chungcheong",
            Self::Jeolla => "jeolla",
            Self::Gyeongsang => "gyeongsang",
            Self::Jeju => "jeju",
            Self::Unknown => "unknown",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Seoul => "서울특별시",
            Self::Gyeonggi => "경기도",
            Self::Incheon => "인천광역시",
            Self::Gangwon => "강원도",
            Self::Chungcheong => "충청도",
            Self::Jeolla => "전라도",
            Self::Gyeongsang => "경상도",
            Self::Jeju => "제주특별자치도",
            Self::Unknown => "모름",
        }
    }
}

impl fmt::Display for CityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for CityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_lenient(s, &Self::ALL, Self::key, Self::name, "birth region")
    }
}

// =============================================================================
// AI Provider Selection
// =============================================================================

/// Generative model family the caller asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiType {
    Claude,
    #[default]
    Gemini,
    Gpt,
}

impl AiType {
    pub const ALL: [AiType; 3] = [Self::Claude, Self::Gemini, Self::Gpt];

    pub fn name(self) -> &'static str {
        match self {
            Self::Claude => "CLAUDE",
            Self::Gemini => "GEMINI",
            Self::Gpt => "GPT",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Gemini => "gemini",
            Self::Gpt => "gpt",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Claude => "Claude",
            Self::Gemini => "Gemini",
            Self::Gpt => "GPT",
        }
    }

    /// Only providers with a wired client are enabled
    pub fn enabled(self) -> bool {
        matches!(self, Self::Gemini)
    }
}

impl fmt::Display for AiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for AiType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_lenient(s, &Self::ALL, Self::key, Self::name, "AI type")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fortune_type_serde_uses_exact_key() {
        let love: FortuneType = serde_json::from_str("\"love\"").unwrap();
        assert_eq!(love, FortuneType::Love);

        assert!(serde_json::from_str::<FortuneType>("\"LOVE\"").is_err());
        assert!(serde_json::from_str::<FortuneType>("\"romance\"").is_err());
        assert_eq!(serde_json::to_string(&FortuneType::Career).unwrap(), "\"career\"");
    }

    #[test]
    fn test_from_str_is_lenient() {
        assert_eq!("LOVE".parse::<FortuneType>().unwrap(), FortuneType::Love);
        assert_eq!(" health ".parse::<FortuneType>().unwrap(), FortuneType::Health);
        assert_eq!(
            "LUNAR_LEAP".parse::<CalendarType>().unwrap(),
            CalendarType::LunarLeap
        );
        assert_eq!("time_11_30".parse::<TimeType>().unwrap(), TimeType::Time1130);

        let err = "romance".parse::<FortuneType>().unwrap_err();
        assert!(err.contains("Valid values"));
    }

    #[test]
    fn test_period_value_numbers() {
        assert_eq!(PeriodValue::January.number(), 1);
        assert_eq!(PeriodValue::December.number(), 12);
        assert_eq!(PeriodValue::Q3.number(), 3);
        assert_eq!(PeriodValue::Year.number(), 1);
    }

    #[test]
    fn test_period_type_values() {
        assert_eq!(PeriodType::Monthly.values().len(), 12);
        assert_eq!(PeriodType::Quarterly.values(), &[
            PeriodValue::Q1,
            PeriodValue::Q2,
            PeriodValue::Q3,
            PeriodValue::Q4
        ]);
        assert_eq!(PeriodType::Yearly.values(), &[PeriodValue::Year]);

        for period in PeriodType::ALL {
            assert!(period.values().iter().all(|v| v.period_type() == period));
        }
    }

    #[test]
    fn test_only_gemini_enabled() {
        let enabled: Vec<AiType> = AiType::ALL.into_iter().filter(|a| a.enabled()).collect();
        assert_eq!(enabled, vec![AiType::Gemini]);
    }
}
