//! Headcount movements CLI
//!
//! Register exit/entry movements against the reference table of positions,
//! request missing posts, and review what a user has submitted.
//!
//! # Usage
//!
//! ```bash
//! # Cost centers available under a unit
//! headcount options cost_center --unit "Usina Norte"
//!
//! # Is this role valid for the chosen path?
//! headcount check role Operador --unit "Usina Norte" --cost-center 1001
//!
//! # Record a movement
//! headcount register --user analista --password senha123 --requester Ana \
//!     --exit-unit "Usina Norte" ... --entry-role Motorista --entry-qty 2
//!
//! # Review your history
//! headcount history --user analista --password senha123
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local, Utc};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use headcount_core::config::{CliOverrides, HeadcountConfig};
use headcount_core::errors::HeadcountErrorCode;
use headcount_core::form::{LegSelection, MovementDraft, PostRequestDraft, Side};
use headcount_core::hierarchy::{Constraints, HierarchyLevel, StoredMovement};
use headcount_core::tracing::init_tracing;
use headcount_core::traits::RecordStore;
use headcount_core::{LookupEngine, Session};
use headcount_storage::SqliteRecordStore;

#[derive(Parser)]
#[command(name = "headcount")]
#[command(version)]
#[command(about = "Register headcount movements against the positions reference table")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding headcount.toml; relative paths resolve against it
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Reference table (.xlsx or .csv), overrides config
    #[arg(long, global = true)]
    reference: Option<String>,

    /// SQLite database, overrides config
    #[arg(long, global = true)]
    database: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List valid options for a level, one per line
    Options {
        /// unit, cost_center, subprocess, manager, post or role
        #[arg(value_parser = parse_level)]
        level: HierarchyLevel,

        #[command(flatten)]
        prefix: PrefixArgs,

        /// Keep only options containing this text (case-insensitive)
        #[arg(long)]
        filter: Option<String>,
    },

    /// List requester names
    Requesters {
        /// Keep only names containing this text (case-insensitive)
        #[arg(long)]
        filter: Option<String>,
    },

    /// Exit non-zero unless VALUE is a valid selection for LEVEL
    Check {
        #[arg(value_parser = parse_level)]
        level: HierarchyLevel,

        value: String,

        #[command(flatten)]
        prefix: PrefixArgs,
    },

    /// Validate and record an exit/entry movement
    Register {
        #[command(flatten)]
        login: LoginArgs,

        #[arg(long)]
        requester: String,

        #[command(flatten)]
        exit: ExitArgs,

        #[command(flatten)]
        entry: EntryArgs,

        #[arg(long, default_value_t = 1)]
        exit_qty: u32,

        #[arg(long, default_value_t = 1)]
        entry_qty: u32,
    },

    /// Record a request for a post that does not exist yet
    RequestPost {
        #[command(flatten)]
        login: LoginArgs,

        #[arg(long)]
        unit: String,

        #[arg(long)]
        cost_center: String,

        #[arg(long)]
        subprocess: String,

        #[arg(long)]
        manager: String,

        #[arg(long)]
        role: String,
    },

    /// List the most recent post requests
    PostRequests {
        #[command(flatten)]
        login: LoginArgs,

        /// Defaults to storage.recent_limit
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show the logged-in user's movements, newest first
    History {
        #[command(flatten)]
        login: LoginArgs,
    },
}

#[derive(Args)]
struct LoginArgs {
    #[arg(long)]
    user: String,

    #[arg(long)]
    password: String,
}

/// Upstream selections for `options` and `check`.
#[derive(Args)]
struct PrefixArgs {
    #[arg(long)]
    unit: Option<String>,
    #[arg(long)]
    cost_center: Option<String>,
    #[arg(long)]
    subprocess: Option<String>,
    #[arg(long)]
    manager: Option<String>,
    #[arg(long)]
    post: Option<String>,
}

impl PrefixArgs {
    fn constraints(&self) -> Constraints {
        [
            (HierarchyLevel::Unit, &self.unit),
            (HierarchyLevel::CostCenter, &self.cost_center),
            (HierarchyLevel::Subprocess, &self.subprocess),
            (HierarchyLevel::Manager, &self.manager),
            (HierarchyLevel::Post, &self.post),
        ]
        .into_iter()
        .filter_map(|(level, value)| value.as_deref().map(|v| (level, v)))
        .collect()
    }
}

#[derive(Args)]
struct ExitArgs {
    #[arg(long)]
    exit_unit: String,
    #[arg(long)]
    exit_cost_center: String,
    #[arg(long)]
    exit_subprocess: String,
    #[arg(long)]
    exit_manager: String,
    #[arg(long)]
    exit_post: String,
    #[arg(long)]
    exit_role: String,
}

#[derive(Args)]
struct EntryArgs {
    #[arg(long)]
    entry_unit: String,
    #[arg(long)]
    entry_cost_center: String,
    #[arg(long)]
    entry_subprocess: String,
    #[arg(long)]
    entry_manager: String,
    #[arg(long)]
    entry_post: String,
    #[arg(long)]
    entry_role: String,
}

fn parse_level(s: &str) -> Result<HierarchyLevel, String> {
    s.parse()
}

/// Fill a leg top-down, the way the register screen does.
fn fill_leg(leg: &mut LegSelection, values: [&str; HierarchyLevel::COUNT]) {
    for (level, value) in HierarchyLevel::ALL.into_iter().zip(values) {
        leg.select(level, value);
    }
}

struct App {
    root: PathBuf,
    config: HeadcountConfig,
    engine: LookupEngine,
    /// Non-blocking startup problems, shown before the command runs.
    warnings: Vec<String>,
}

impl App {
    fn start(cli: &Cli) -> Result<Self> {
        let overrides = CliOverrides {
            reference_path: cli.reference.clone(),
            database_path: cli.database.clone(),
        };
        let config = HeadcountConfig::load(&cli.root, Some(&overrides))
            .map_err(|e| anyhow::anyhow!(e.ui_string()))?;

        let outcome = LookupEngine::load_or_empty(&config.reference_path(&cli.root));
        let mut warnings = Vec::new();
        if let Some(warning) = &outcome.warning {
            warnings.push(warning.ui_string());
            warnings.push("no options will be offered until the reference table is fixed".to_string());
        }

        Ok(Self {
            root: cli.root.clone(),
            config,
            engine: outcome.engine,
            warnings,
        })
    }

    fn login(&self, args: &LoginArgs) -> Result<Session> {
        let mut session = Session::new();
        session
            .login(&args.user, &args.password, &self.config.auth)
            .map_err(|e| anyhow::anyhow!(e.ui_string()))?;
        Ok(session)
    }

    fn store(&self) -> Result<SqliteRecordStore> {
        let path = self.config.database_path(&self.root);
        debug!(path = %path.display(), "opening record store");
        SqliteRecordStore::open(&path)
            .map_err(|e| anyhow::anyhow!(e.ui_string()))
            .with_context(|| format!("opening {}", path.display()))
    }

    /// Execute one command and return its output lines.
    fn run(&self, command: Commands) -> Result<Vec<String>> {
        let mut out = Vec::new();
        match command {
            Commands::Options {
                level,
                prefix,
                filter,
            } => {
                let constraints = prefix.constraints();
                out = match filter {
                    Some(typed) => self.engine.suggest(level, &constraints, &typed),
                    None => self.engine.options_for(level, &constraints),
                };
            }

            Commands::Requesters { filter } => {
                out = match filter {
                    Some(typed) => self.engine.suggest_requesters(&typed),
                    None => self.engine.requester_names(),
                };
            }

            Commands::Check {
                level,
                value,
                prefix,
            } => {
                let constraints = prefix.constraints();
                constraints
                    .check_prefix(level)
                    .map_err(|e| anyhow::anyhow!(e.ui_string()))?;
                self.engine
                    .validate_selection(level, value.trim(), &constraints)
                    .map_err(|e| anyhow::anyhow!(e.ui_string()))?;
                out.push("ok".to_string());
            }

            Commands::Register {
                login,
                requester,
                exit,
                entry,
                exit_qty,
                entry_qty,
            } => {
                let session = self.login(&login)?;
                let user = session.require_user()?;

                let mut draft = MovementDraft::new();
                draft.set_requester(requester);
                fill_leg(
                    draft.leg_mut(Side::Exit),
                    [
                        exit.exit_unit.as_str(),
                        exit.exit_cost_center.as_str(),
                        exit.exit_subprocess.as_str(),
                        exit.exit_manager.as_str(),
                        exit.exit_post.as_str(),
                        exit.exit_role.as_str(),
                    ],
                );
                fill_leg(
                    draft.leg_mut(Side::Entry),
                    [
                        entry.entry_unit.as_str(),
                        entry.entry_cost_center.as_str(),
                        entry.entry_subprocess.as_str(),
                        entry.entry_manager.as_str(),
                        entry.entry_post.as_str(),
                        entry.entry_role.as_str(),
                    ],
                );
                draft.set_quantity(Side::Exit, exit_qty);
                draft.set_quantity(Side::Entry, entry_qty);

                let record = match draft.confirm(&self.engine, user, Utc::now()) {
                    Ok(record) => record,
                    Err(e) => bail!("{}", e.ui_string()),
                };
                let id = self
                    .store()?
                    .append_movement(&record)
                    .map_err(|e| anyhow::anyhow!(e.ui_string()))?;
                out.push(format!("movement {id} recorded"));
            }

            Commands::RequestPost {
                login,
                unit,
                cost_center,
                subprocess,
                manager,
                role,
            } => {
                let session = self.login(&login)?;
                let user = session.require_user()?;

                let mut draft = PostRequestDraft::new();
                draft.select(HierarchyLevel::Unit, unit);
                draft.select(HierarchyLevel::CostCenter, cost_center);
                draft.select(HierarchyLevel::Subprocess, subprocess);
                draft.select(HierarchyLevel::Manager, manager);
                draft.select(HierarchyLevel::Role, role);

                let request = match draft.confirm(&self.engine, user, Utc::now()) {
                    Ok(request) => request,
                    Err(e) => bail!("{}", e.ui_string()),
                };
                let id = self
                    .store()?
                    .append_post_request(&request)
                    .map_err(|e| anyhow::anyhow!(e.ui_string()))?;
                out.push(format!("post request {id} recorded"));
            }

            Commands::PostRequests { login, limit } => {
                self.login(&login)?;
                let limit = limit.unwrap_or_else(|| self.config.storage.effective_recent_limit());
                let requests = self
                    .store()?
                    .recent_post_requests(limit)
                    .map_err(|e| anyhow::anyhow!(e.ui_string()))?;
                for stored in requests {
                    let r = &stored.request;
                    out.push(format!(
                        "{}\t{}\t{}\t{} / {} / {} / {}\t{}",
                        stored.id,
                        local_time(&r.requested_at, DATE_TIME),
                        r.submitted_by,
                        r.unit,
                        r.cost_center,
                        r.subprocess,
                        r.manager,
                        r.role,
                    ));
                }
            }

            Commands::History { login } => {
                let mut session = self.login(&login)?;
                session.show_history()?;
                let user = session.require_user()?;

                let store = self.store()?;
                let summary = store
                    .history_summary(user)
                    .map_err(|e| anyhow::anyhow!(e.ui_string()))?;
                let movements = store
                    .movements_by_user(user)
                    .map_err(|e| anyhow::anyhow!(e.ui_string()))?;

                out.push(format!("user: {user}"));
                out.push(format!("movements registered: {}", summary.total));
                out.push(match summary.last_submitted_at {
                    Some(at) => format!("last movement: {}", local_time(&at, DATE)),
                    None => "no movements registered yet".to_string(),
                });
                out.extend(movements.iter().map(history_line));
            }
        }
        Ok(out)
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let app = App::start(&cli)?;
    for warning in &app.warnings {
        eprintln!("warning: {warning}");
    }

    for line in app.run(cli.command)? {
        println!("{line}");
    }
    Ok(())
}

const DATE: &str = "%d/%m/%Y";
const DATE_TIME: &str = "%d/%m/%Y %H:%M";

/// Timestamps are stored in UTC and shown in the operator's zone.
fn local_time(at: &DateTime<Utc>, fmt: &str) -> String {
    at.with_timezone(&Local).format(fmt).to_string()
}

fn history_line(stored: &StoredMovement) -> String {
    let m = &stored.record;
    format!(
        "{}\t{}\t{}\t{} {} x{} -> {} {} x{}",
        stored.id,
        local_time(&m.submitted_at, DATE_TIME),
        m.requester,
        m.exit.post,
        m.exit.role,
        m.exit.quantity,
        m.entry.post,
        m.entry.role,
        m.entry.quantity,
    )
}
