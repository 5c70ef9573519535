//! Generate Command
//!
//! Build a fortune request from CLI arguments and run it.
//!
//! Usage:
//!   luckylog generate --gender female --calendar solar --birth 1995-02-16 \
//!       --fortunes love,health --period monthly [--time time_11_30] [--city seoul]
//!   luckylog prompt ...same arguments...

use chrono::Datelike;
use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::cli::ui::Output;
use crate::config::{Config, ConfigLoader};
use crate::fortune::{FortuneService, FortuneView};
use crate::types::{
    AiType, BirthInfo, CalendarType, CityType, FortuneOption, FortuneRequest, FortuneType,
    GenderType, LuckyError, PeriodType, Result, TimeType, ValidationError, ValidationErrorKind,
};

/// Years accepted for `--year`
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1900..=2100;

/// Request arguments shared by `generate` and `prompt`
#[derive(Debug, Clone)]
pub struct RequestArgs {
    pub gender: GenderType,
    pub calendar: CalendarType,
    pub birth: String,
    pub time: Option<TimeType>,
    pub city: Option<CityType>,
    pub fortunes: Vec<FortuneType>,
    pub period: PeriodType,
    pub ai: AiType,
    pub year: Option<i32>,
}

impl RequestArgs {
    pub fn into_request(self) -> Result<FortuneRequest> {
        let (year, month, day) = parse_birth_date(&self.birth)?;
        let birth = BirthInfo::new(self.gender, self.calendar, year, month, day)?
            .with_time(self.time)
            .with_city(self.city);

        let option = FortuneOption::new(self.ai, self.fortunes, self.period)?;

        let result_year = self.year.unwrap_or_else(|| chrono::Local::now().year());
        if !YEAR_RANGE.contains(&result_year) {
            return Err(ValidationError::new(
                ValidationErrorKind::Range,
                format!(
                    "year must be between {} and {}, got {}",
                    YEAR_RANGE.start(),
                    YEAR_RANGE.end(),
                    result_year
                ),
            )
            .with_field("year")
            .into());
        }

        Ok(FortuneRequest::new(birth, option, result_year))
    }
}

/// Options for the generate command
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub request: RequestArgs,
    pub config: Option<PathBuf>,
    pub model: Option<String>,
    pub json: bool,
}

/// Split "YYYY-MM-DD" into its parts; calendar validity is checked later
pub fn parse_birth_date(s: &str) -> std::result::Result<(i32, u32, u32), ValidationError> {
    let format_error = || {
        ValidationError::new(
            ValidationErrorKind::Format,
            format!("expected YYYY-MM-DD, got '{}'", s),
        )
        .with_field("birth")
    };

    let parts: Vec<&str> = s.trim().split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(format_error());
    };

    Ok((
        year.parse().map_err(|_| format_error())?,
        month.parse().map_err(|_| format_error())?,
        day.parse().map_err(|_| format_error())?,
    ))
}

/// Load configuration from an explicit file or the full resolution chain
pub fn load_config(path: Option<&PathBuf>, model: Option<String>) -> Result<Config> {
    let mut config = match path {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    // Loaders validate; recheck after the override
    if let Some(model) = model {
        config.gemini.model = model;
        config.validate()?;
    }

    Ok(config)
}

pub fn run(options: GenerateOptions) -> Result<()> {
    let config = load_config(options.config.as_ref(), options.model)?;
    let request = options.request.into_request()?;
    let service = FortuneService::from_config(&config)?;

    if !options.json {
        Output::new().info(&format!(
            "Generating {} with {}",
            request.default_title(),
            config.gemini.model
        ));
    }

    let rt = Runtime::new()?;
    let views = rt.block_on(service.generate_views(&request))?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&views)?);
    } else {
        print_views(&request, &views);
    }

    Ok(())
}

/// Print the rendered prompt without calling the provider
pub fn prompt(request: RequestArgs, config: Option<&PathBuf>) -> Result<()> {
    let config = load_config(config, None)?;
    let request = request.into_request()?;

    if !request.option.ai().enabled() {
        return Err(LuckyError::UnsupportedProvider(request.option.ai()));
    }

    let template = config.load_template()?;
    println!(
        "{}",
        crate::ai::build_prompt(
            &template,
            request.result_year,
            &request.option,
            &request.birth
        )
    );
    Ok(())
}

fn print_views(request: &FortuneRequest, views: &[FortuneView]) {
    let output = Output::new();
    output.header(&request.default_title());

    if views.is_empty() {
        output.warning("No fortune entries returned");
        return;
    }

    for view in views {
        output.section(&format!("{} {}", view.fortune.icon(), view.fortune.label()));
        for (period, text) in &view.contents {
            output.entry(period.label(), text);
        }
    }
}
