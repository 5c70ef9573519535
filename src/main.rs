use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use luckylog::cli::commands::generate::{GenerateOptions, RequestArgs};
use luckylog::cli::ui::Output;
use luckylog::types::{
    AiType, CalendarType, CityType, FortuneType, GenderType, LuckyError, PeriodType, TimeType,
};

#[derive(Parser)]
#[command(name = "luckylog")]
#[command(version, about = "AI-driven yearly fortune generator backed by Gemini")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, short, global = true, help = "Config file (skips global/project lookup)")]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a fortune for the given birth data
    Generate {
        #[command(flatten)]
        request: RequestCli,
        #[arg(long, help = "Gemini model override")]
        model: Option<String>,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },

    /// Print the prompt that would be sent, without calling the provider
    Prompt {
        #[command(flatten)]
        request: RequestCli,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args)]
struct RequestCli {
    #[arg(long, help = "female, male")]
    gender: GenderType,
    #[arg(long, default_value = "solar", help = "solar, lunar, lunar_leap")]
    calendar: CalendarType,
    #[arg(long, help = "Birth date as YYYY-MM-DD")]
    birth: String,
    #[arg(long, help = "Birth time slot, e.g. time_11_30 (omit if unknown)")]
    time: Option<TimeType>,
    #[arg(long, help = "Birth region, e.g. seoul (omit if unknown)")]
    city: Option<CityType>,
    #[arg(long, value_delimiter = ',', required = true, help = "Categories, e.g. love,health")]
    fortunes: Vec<FortuneType>,
    #[arg(long, default_value = "monthly", help = "monthly, quarterly, yearly")]
    period: PeriodType,
    #[arg(long, default_value = "gemini", help = "AI provider (only gemini is enabled)")]
    ai: AiType,
    #[arg(long, help = "Year to generate for (default: current year)")]
    year: Option<i32>,
}

impl From<RequestCli> for RequestArgs {
    fn from(cli: RequestCli) -> Self {
        Self {
            gender: cli.gender,
            calendar: cli.calendar,
            birth: cli.birth,
            time: cli.time,
            city: cli.city,
            fortunes: cli.fortunes,
            period: cli.period,
            ai: cli.ai,
            year: cli.year,
        }
    }
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(short = 'g', long, help = "Show global config file only")]
        global: bool,
        #[arg(
            short = 'f',
            long,
            default_value = "toml",
            help = "Output format: toml, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mluckylog encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let output = Output::new();
            match e.downcast_ref::<LuckyError>() {
                Some(LuckyError::Fortune(fortune)) => {
                    output.error(fortune.user_message());
                    eprintln!("  {} ({})", fortune, fortune.kind());
                }
                _ => output.error(&format!("Error: {}", e)),
            }
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Generate {
            request,
            model,
            format,
        } => {
            luckylog::cli::commands::generate::run(GenerateOptions {
                request: request.into(),
                config: cli.config,
                model,
                json: format == "json",
            })?;
        }
        Commands::Prompt { request } => {
            luckylog::cli::commands::generate::prompt(request.into(), cli.config.as_ref())?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { global, format } => {
                luckylog::cli::commands::config::show(global, &format)?;
            }
            ConfigAction::Path => {
                luckylog::cli::commands::config::path()?;
            }
            ConfigAction::Init { global, force } => {
                if global {
                    luckylog::cli::commands::config::init_global(force)?;
                } else {
                    luckylog::cli::commands::config::init_project(force)?;
                }
            }
        },
    }

    Ok(())
}
