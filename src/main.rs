use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{error, info, warn};

use riftcoach::coaching::{CoachingError, CoachingService, completion_client};
use riftcoach::config::{Config, LlmConfig};
use riftcoach::db::{Repository, SessionStore, run_migrations};
use riftcoach::error::AppError;
use riftcoach::logging;
use riftcoach::pipeline::{CoachRequest, run_coach, run_progress};
use riftcoach::riot::{Platform, RiotClient, RiotId};

/// League of Legends match analysis and coaching sessions.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Platform the player plays on (euw1, na1, kr, ...)
    #[arg(long, global = true, default_value = "euw1", env = "RIOT_PLATFORM")]
    platform: Platform,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Analyze recent matches and ask for coaching advice
    Coach {
        /// Riot ID, as gameName#tagLine
        #[arg(long)]
        riot_id: RiotId,
        /// Recent matches to consider, MATCH_COUNT by default
        #[arg(long)]
        match_count: Option<u32>,
        /// Queue id filter, ranked solo (420) by default
        #[arg(long)]
        queue: Option<i32>,
    },
    /// Show the trend across previous coaching sessions
    Progress {
        #[arg(long)]
        riot_id: RiotId,
    },
}

#[derive(Serialize)]
struct SaveFailure<'a> {
    status: &'static str,
    advice: &'a str,
    error: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let log_guard = logging::init();

    let cli = Cli::parse();

    let code = tokio::select! {
        res = run(cli) => match res {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!(error = %e, "❌ Command failed");
                report_failure(&e);
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted");
            ExitCode::from(130)
        }
    };

    drop(log_guard);
    code
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = Config::from_env()?;

    let riot = RiotClient::new(config.riot_api_key.clone(), config.riot_rate_limit_per_second);
    let store = match &config.database_url {
        Some(url) => Some(Arc::new(Repository::new(connect(url).await?)) as Arc<dyn SessionStore>),
        None => {
            info!("🗄️ DATABASE_URL not set, coaching sessions will not be saved");
            None
        }
    };

    match cli.command {
        Command::Coach {
            riot_id,
            match_count,
            queue,
        } => {
            let llm = completion_client(&LlmConfig::from_env()?).map_err(CoachingError::from)?;
            let service = CoachingService::new(llm, store);
            let request = CoachRequest {
                riot_id,
                platform: cli.platform,
                match_count: match_count.unwrap_or(config.match_count),
                queue,
            };

            let outcome = run_coach(&riot, &service, &request).await?;
            print_json(&outcome)
        }
        Command::Progress { riot_id } => {
            let progress = run_progress(&riot, store.as_deref(), &riot_id, cli.platform).await?;
            print_json(&progress)
        }
    }
}

async fn connect(url: &str) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Advice that could not be saved is still printed.
fn report_failure(e: &AppError) {
    if let AppError::Coaching(CoachingError::SessionSave { advice, source }) = e {
        let failure = SaveFailure {
            status: "unsaved",
            advice,
            error: source.to_string(),
        };
        if let Ok(json) = serde_json::to_string_pretty(&failure) {
            println!("{json}");
        }
    }
}
