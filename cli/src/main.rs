//! Member service — admin command line
//!
//! Runs single lifecycle operations against the configured store.
//!
//! ```sh
//! # Register with default config (~/.config/member-service/config.toml)
//! member-service register --email a@b.com --nickname ann --password secret
//!
//! # Lifecycle
//! member-service activate 1
//! member-service update 1 --nickname Ann --profile ann.b --birth-date 1990-05-17
//! member-service deactivate 1
//!
//! # Lookups
//! member-service show --profile ann.b
//!
//! # Validate config without touching storage
//! member-service --check
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing::{error, info};

use member_service::config::AppConfig;
use member_service::domain::{Member, RegisterMemberDto, UpdateMemberInfoDto};
use member_service::runtime::{init_tracing, ServiceHandle, ServiceOptions};
use member_service::{ConfigError, DomainError, ErrorKind};

/// sysexits `EX_CONFIG`
const EX_CONFIG: u8 = 78;

/// Registration and lifecycle administration.
#[derive(Parser, Debug)]
#[command(
    name = "member-service",
    version,
    about = "Member registration and lifecycle administration",
    long_about = "Runs member lifecycle operations (register, activate, deactivate, \
                  update, lookup) against the configured store.\n\n\
                  Default config: ~/.config/member-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "MEMBER_SERVICE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Override the database url (`memory` for a throwaway in-process store).
    #[arg(long)]
    database_url: Option<String>,

    /// Validate the configuration file and exit.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a new member (starts PENDING).
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        nickname: String,
        #[arg(long)]
        password: String,
    },
    /// Activate a PENDING member.
    Activate { id: i64 },
    /// Deactivate an ACTIVE member.
    Deactivate { id: i64 },
    /// Replace nickname, profile and birth date of an ACTIVE member.
    Update {
        id: i64,
        #[arg(long)]
        nickname: String,
        /// Profile handle; omit to clear it.
        #[arg(long, default_value = "")]
        profile: String,
        /// Birth date as YYYY-MM-DD.
        #[arg(long)]
        birth_date: Option<NaiveDate>,
    },
    /// Look a member up by one key.
    Show(ShowArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct ShowArgs {
    #[arg(long)]
    id: Option<i64>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    profile: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(member_service::default_config_path);

    let (mut config, load_error) = match resolve_config(&config_path, cli.check) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("Configuration is invalid: {}: {}", config_path.display(), e);
            return Ok(ExitCode::from(EX_CONFIG));
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(ref url) = cli.database_url {
        config.database.url = url.clone();
    }

    init_tracing(&config);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        if let Err(e) = config.validate() {
            eprintln!("Configuration is invalid: {}", e);
            return Ok(ExitCode::from(EX_CONFIG));
        }
        println!("Configuration is valid");
        println!("   Config file   : {}", config_path.display());
        println!("   Database      : {}", config.database.url);
        println!("   Log level     : {}", config.logging.level);
        println!("   Notifications : {}", config.notifications.enabled);
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        eprintln!("No command given, see --help");
        return Ok(ExitCode::from(64));
    };

    let handle = ServiceHandle::start(ServiceOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    let outcome = run(&handle, command).await;
    handle.shutdown().await;

    match outcome {
        Ok(member) => {
            println!("{}", serde_json::to_string_pretty(&member_json(&member))?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!(kind = %e.kind(), "Command failed: {}", e);
            eprintln!("error[{}]: {}", e.kind(), e);
            Ok(exit_code(e.kind()))
        }
    }
}

/// Load the config file. With `strict` (`--check`) any load failure is
/// returned; otherwise defaults are used and the failure is handed back for
/// logging.
fn resolve_config(
    path: &Path,
    strict: bool,
) -> Result<(AppConfig, Option<ConfigError>), ConfigError> {
    match AppConfig::load(path) {
        Ok(cfg) => Ok((cfg, None)),
        Err(e) if strict => Err(e),
        Err(e) => Ok((AppConfig::default(), Some(e))),
    }
}

async fn run(handle: &ServiceHandle, command: Command) -> Result<Member, DomainError> {
    match command {
        Command::Register {
            email,
            nickname,
            password,
        } => {
            handle
                .members
                .register(RegisterMemberDto {
                    email,
                    nickname,
                    password,
                })
                .await
        }
        Command::Activate { id } => handle.members.activate(id).await,
        Command::Deactivate { id } => handle.members.deactivate(id).await,
        Command::Update {
            id,
            nickname,
            profile,
            birth_date,
        } => {
            handle
                .members
                .update_info(
                    id,
                    UpdateMemberInfoDto {
                        nickname,
                        profile,
                        birth_date,
                    },
                )
                .await
        }
        Command::Show(ShowArgs { id: Some(id), .. }) => handle.finder.find_by_id(id).await,
        Command::Show(ShowArgs {
            email: Some(email), ..
        }) => handle.finder.find_by_email(&email).await,
        Command::Show(ShowArgs {
            profile: Some(profile),
            ..
        }) => handle.finder.find_by_profile(&profile).await,
        Command::Show(_) => Err(DomainError::Validation(
            "one of --id, --email or --profile is required".into(),
        )),
    }
}

/// Public view of a member; the password hash is never printed.
fn member_json(member: &Member) -> serde_json::Value {
    let detail = member.detail();
    json!({
        "id": member.id(),
        "email": member.email().as_str(),
        "nickname": member.nickname(),
        "status": member.status().as_str(),
        "profile": detail.profile().as_str(),
        "display_name": detail.profile().display_name(),
        "birth_date": detail.birth_date(),
        "created_at": member.created_at(),
        "updated_at": member.updated_at(),
    })
}

fn exit_code(kind: ErrorKind) -> ExitCode {
    match kind {
        ErrorKind::Validation => ExitCode::from(2),
        ErrorKind::DuplicateEmail => ExitCode::from(3),
        ErrorKind::InvalidState => ExitCode::from(4),
        ErrorKind::NotFound => ExitCode::from(5),
        ErrorKind::Infrastructure => ExitCode::from(1),
    }
}
