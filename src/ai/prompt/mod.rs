//! Fortune Prompt Builder
//!
//! Renders the provider prompt from a template plus the request.
//!
//! Template placeholders:
//! - `[ANALYSIS_YEAR]`: the year the fortune is generated for
//! - `[FORTUNE_TYPES]`: requested category labels, comma-joined
//! - `[PERIOD_TYPE]` (optional): period granularity label, e.g. "분기별"
//! - `[PERIOD_VALUES]` (optional): `periodValue` keys the answer must cover
//!
//! The birth rendition is appended after the substituted template. Inputs are
//! enum-backed or numeric, so substitution is direct with no escaping.

use crate::types::{BirthInfo, FortuneOption};

pub const YEAR_PLACEHOLDER: &str = "[ANALYSIS_YEAR]";
pub const FORTUNE_TYPES_PLACEHOLDER: &str = "[FORTUNE_TYPES]";
pub const PERIOD_TYPE_PLACEHOLDER: &str = "[PERIOD_TYPE]";
pub const PERIOD_VALUES_PLACEHOLDER: &str = "[PERIOD_VALUES]";

/// Built-in template used when no template is configured
pub const DEFAULT_TEMPLATE: &str = r#"당신은 사주 명리학에 정통한 운세 전문가입니다.
아래 사용자 정보를 바탕으로 [ANALYSIS_YEAR]년 [FORTUNE_TYPES] 운세를 분석해주세요.

# 분석 기간
- 단위: [PERIOD_TYPE]
- periodValue: [PERIOD_VALUES]

# 작성 규칙
- 각 운세 항목마다 분석 기간의 periodValue를 하나도 빠짐없이 작성합니다.
- 한 기간의 운세에 여러 내용이 있으면 " | " 로 구분합니다.
- 설명 없이 아래 JSON 배열만 응답합니다.

# 응답 형식
[
  {"fortune": "love", "periodValue": "분석 기간의 periodValue", "result": "내용 | 내용"}
]
- fortune: overall, money, love, career, study, luck, family, health 중 하나
- periodValue: 분석 기간에 나열된 값 중 하나

"#;

/// Render a prompt for one request
///
/// Pure: the same inputs always produce the same prompt.
pub fn build_prompt(template: &str, year: i32, option: &FortuneOption, birth: &BirthInfo) -> String {
    let period = option.period();
    let period_values = period
        .values()
        .iter()
        .map(|v| v.key())
        .collect::<Vec<_>>()
        .join(", ");

    let base = template
        .replace(YEAR_PLACEHOLDER, &year.to_string())
        .replace(FORTUNE_TYPES_PLACEHOLDER, &option.fortunes_label())
        .replace(PERIOD_TYPE_PLACEHOLDER, period.label())
        .replace(PERIOD_VALUES_PLACEHOLDER, &period_values);

    let mut prompt = String::with_capacity(base.len() + 160);
    prompt.push_str(&base);
    prompt.push_str(&birth.render());
    prompt
}

/// Check that a template carries both required placeholders
pub fn missing_placeholders(template: &str) -> Vec<&'static str> {
    [YEAR_PLACEHOLDER, FORTUNE_TYPES_PLACEHOLDER]
        .into_iter()
        .filter(|p| !template.contains(p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        AiType, CalendarType, CityType, FortuneType, GenderType, PeriodType, TimeType,
    };

    fn option() -> FortuneOption {
        option_for(PeriodType::Monthly)
    }

    fn option_for(period: PeriodType) -> FortuneOption {
        FortuneOption::new(AiType::Gemini, [FortuneType::Love, FortuneType::Health], period)
            .unwrap()
    }

    #[test]
    fn test_build_prompt_substitutes_and_appends_birth() {
        let birth = BirthInfo::new(GenderType::Female, CalendarType::Solar, 1995, 2, 16)
            .unwrap()
            .with_time(Some(TimeType::Time1130))
            .with_city(Some(CityType::Seoul));

        let prompt = build_prompt("[ANALYSIS_YEAR]년 [FORTUNE_TYPES] 운세 분석\n", 2025, &option(), &birth);

        assert!(prompt.starts_with("2025년 애정, 건강 운세 분석\n# 사용자 정보"));
        for expected in ["1995년 2월 16일", "양력", "여성", "오시", "서울특별시"] {
            assert!(prompt.contains(expected), "missing {expected}");
        }
        assert!(!prompt.contains(YEAR_PLACEHOLDER));
        assert!(!prompt.contains(FORTUNE_TYPES_PLACEHOLDER));
    }

    #[test]
    fn test_build_prompt_unknown_optional_fields() {
        let birth = BirthInfo::new(GenderType::Male, CalendarType::Lunar, 2000, 12, 31).unwrap();
        let prompt = build_prompt(DEFAULT_TEMPLATE, 2026, &option(), &birth);

        assert!(prompt.contains("2026년 애정, 건강 운세"));
        assert!(prompt.contains("- 출생시간: 모름"));
        assert!(prompt.contains("- 출생장소: 모름"));
    }

    #[test]
    fn test_build_prompt_is_deterministic() {
        let birth = BirthInfo::new(GenderType::Male, CalendarType::Solar, 1970, 1, 1).unwrap();
        let first = build_prompt(DEFAULT_TEMPLATE, 2025, &option(), &birth);
        let second = build_prompt(DEFAULT_TEMPLATE, 2025, &option(), &birth);
        assert_eq!(first, second);
    }

    #[test]
    fn test_replaces_every_placeholder_occurrence() {
        let birth = BirthInfo::new(GenderType::Male, CalendarType::Solar, 1970, 1, 1).unwrap();
        let prompt = build_prompt("[ANALYSIS_YEAR] / [ANALYSIS_YEAR]\n", 2030, &option(), &birth);
        assert!(prompt.starts_with("2030 / 2030\n"));
    }

    #[test]
    fn test_default_template_follows_requested_period() {
        let birth = BirthInfo::new(GenderType::Male, CalendarType::Solar, 1970, 1, 1).unwrap();

        let monthly = build_prompt(DEFAULT_TEMPLATE, 2025, &option(), &birth);
        assert!(monthly.contains("- 단위: 월별"));
        assert!(monthly.contains("january, february, march"));
        assert!(monthly.contains("december"));

        let quarterly =
            build_prompt(DEFAULT_TEMPLATE, 2025, &option_for(PeriodType::Quarterly), &birth);
        assert!(quarterly.contains("- 단위: 분기별"));
        assert!(quarterly.contains("- periodValue: q1, q2, q3, q4\n"));
        for monthly_only in ["월별", "12월", "january", "december"] {
            assert!(!quarterly.contains(monthly_only), "unexpected {monthly_only}");
        }

        let yearly = build_prompt(DEFAULT_TEMPLATE, 2025, &option_for(PeriodType::Yearly), &birth);
        assert!(yearly.contains("- 단위: 올 한해"));
        assert!(yearly.contains("- periodValue: year\n"));
        assert!(!yearly.contains("q1"));
    }

    #[test]
    fn test_period_placeholders_are_optional() {
        let birth = BirthInfo::new(GenderType::Male, CalendarType::Solar, 1970, 1, 1).unwrap();
        let prompt = build_prompt(
            "[PERIOD_TYPE]: [PERIOD_VALUES]\n",
            2025,
            &option_for(PeriodType::Yearly),
            &birth,
        );
        assert!(prompt.starts_with("올 한해: year\n"));
        assert!(missing_placeholders("[ANALYSIS_YEAR] [FORTUNE_TYPES]").is_empty());
    }

    #[test]
    fn test_missing_placeholders() {
        assert!(missing_placeholders(DEFAULT_TEMPLATE).is_empty());
        assert_eq!(missing_placeholders("[ANALYSIS_YEAR] only"), vec![FORTUNE_TYPES_PLACEHOLDER]);
    }
}
