use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use task_tracker::aggregate::{ceiling, Aggregate};
use task_tracker::cli::{Cli, ClientFields, ClientsCommand, Command};
use task_tracker::config::TrackerConfig;
use task_tracker::month::{MonthKey, SystemClock};
use task_tracker::progress::TaskField;
use task_tracker::report;
use task_tracker::roster::{Client, ClientId, Roster};
use task_tracker::storage::ProgressRepository;
use task_tracker::tracker::{Tracker, WritePolicy};
use task_tracker::TrackerError;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = TrackerConfig::load_or_default(cli.config.as_deref())?;
    tracing::debug!(?config, "Loaded configuration");

    match cli.command {
        Command::Status { month, client } => run_status(&config, month, client),
        Command::Set {
            client,
            field,
            value,
        } => {
            let mut tracker = open_tracker(&config)?;
            tracker.set(ClientId(client), field, value)?;
            print_field(&tracker, ClientId(client), field);
            Ok(())
        }
        Command::Add {
            client,
            field,
            delta,
        } => {
            let mut tracker = open_tracker(&config)?;
            tracker.adjust(ClientId(client), field, delta)?;
            print_field(&tracker, ClientId(client), field);
            Ok(())
        }
        Command::Months => {
            let tracker = open_tracker(&config)?;
            let current = tracker.current_month();
            for month in tracker.months() {
                let marker = if month == current { "  (current)" } else { "" };
                println!("{}  {}{}", month, month.display_name(), marker);
            }
            Ok(())
        }
        Command::Report { month } => {
            let tracker = open_tracker(&config)?;
            let month = month.unwrap_or_else(|| tracker.current_month());
            let summary = tracker.summary(&month);
            print!(
                "{}",
                report::share_message(&month, &summary, &config.report_heading)
            );
            Ok(())
        }
        Command::Clients(command) => run_clients(&config, command),
    }
}

fn open_tracker(config: &TrackerConfig) -> Result<Tracker<SystemClock>> {
    let roster = Roster::load(&config.roster_path()?)?;
    let repository = ProgressRepository::new(config.progress_path()?);
    let policy = WritePolicy {
        clamp_on_write: config.clamp_on_write,
    };
    Ok(Tracker::open(repository, roster, SystemClock, policy))
}

fn run_status(config: &TrackerConfig, month: Option<MonthKey>, client: Option<u32>) -> Result<()> {
    let tracker = open_tracker(config)?;
    let month = month.unwrap_or_else(|| tracker.current_month());
    let mut summary = tracker.summary(&month);

    if let Some(id) = client.map(ClientId) {
        let single = summary
            .client(id)
            .cloned()
            .ok_or(TrackerError::UnknownClient(id))?;
        summary = Aggregate {
            fleet: single.tasks,
            per_client: vec![single],
        };
    }

    print!(
        "{}",
        report::overview(&month, &summary, tracker.is_editable(&month))
    );
    Ok(())
}

fn print_field(tracker: &Tracker<SystemClock>, client: ClientId, field: TaskField) {
    let month = tracker.current_month();
    let summary = tracker.summary(&month);
    if let Some(client) = summary.client(client) {
        let progress = client.tasks.get(field);
        println!(
            "{} - {}: {} / {} ({:.0}%)",
            client.name,
            field,
            progress.completed,
            progress.total,
            progress.percentage()
        );
    }
}

fn run_clients(config: &TrackerConfig, command: ClientsCommand) -> Result<()> {
    let path = config.roster_path()?;
    let mut roster = Roster::load(&path)?;

    match command {
        ClientsCommand::List => {
            for client in roster.clients() {
                print_client(client);
            }
            Ok(())
        }
        ClientsCommand::Add { name, fields } => {
            let mut client = Client::new(name);
            apply_fields(&mut client, &fields);
            let id = roster.upsert(client)?;
            save_roster(&roster, &path)?;
            println!("Added client {}", id);
            Ok(())
        }
        ClientsCommand::Update { id, name, fields } => {
            let id = ClientId(id);
            let mut client = roster
                .get(id)
                .cloned()
                .ok_or(TrackerError::UnknownClient(id))?;
            if let Some(name) = name {
                client.name = name;
            }
            apply_fields(&mut client, &fields);
            roster.upsert(client)?;
            save_roster(&roster, &path)?;
            println!("Updated client {}", id);
            Ok(())
        }
        ClientsCommand::Remove { id } => {
            let id = ClientId(id);
            let removed = roster.remove(id).ok_or(TrackerError::UnknownClient(id))?;
            save_roster(&roster, &path)?;
            println!("Removed client {} ({})", id, removed.name);
            Ok(())
        }
    }
}

fn apply_fields(client: &mut Client, fields: &ClientFields) {
    if let Some(category) = &fields.category {
        client.category = category.clone();
    }
    for (field, quota) in fields.quotas() {
        client.tasks.set_quota(field, quota);
    }
}

fn save_roster(roster: &Roster, path: &Path) -> Result<()> {
    roster
        .save(path)
        .with_context(|| format!("Failed to save roster to {}", path.display()))
}

fn print_client(client: &Client) {
    println!("[{}] {}", client.id, client.name);
    for field in TaskField::ALL {
        let quota = client.tasks.quota(field);
        if quota.is_empty() {
            continue;
        }
        println!(
            "    {:<12} {} ({})",
            field.label(),
            quota,
            ceiling(client, field)
        );
    }
}
