//! `dinv` - CLI for donation-inventory
//!
//! This binary is the presentation layer: it turns commands into form edits
//! and store calls, then prints the derived views.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context};
use clap::Parser;

use donation_inventory::cli::output::{
    render_plain, render_statistics, render_summary, render_table,
};
use donation_inventory::cli::{
    AddCommand, Cli, Command, ConfigCommand, EditCommand, ListCommand, OutputFormat,
    RemoveCommand, StatsCommand, SummaryCommand,
};
use donation_inventory::{
    filter_by_type, init_logging, statistics, summarize, Config, DonationForm, DonationStore,
    FormField, SqliteBackend,
};

type Store = DonationStore<SqliteBackend>;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::Add(cmd) => handle_add(&mut open_store(&config)?, cmd),
        Command::Edit(cmd) => handle_edit(&mut open_store(&config)?, cmd),
        Command::Remove(cmd) => handle_remove(&mut open_store(&config)?, &cmd),
        Command::List(cmd) => handle_list(&open_store(&config)?, &config, &cmd),
        Command::Summary(cmd) => handle_summary(&open_store(&config)?, &config, &cmd),
        Command::Stats(cmd) => handle_stats(&open_store(&config)?, &cmd),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn open_store(config: &Config) -> anyhow::Result<Store> {
    let path = config.database_path();
    let backend = SqliteBackend::open(&path)
        .with_context(|| format!("opening donation database {}", path.display()))?;
    Ok(DonationStore::open(backend, config.storage.slot_key.as_str()))
}

fn handle_add(store: &mut Store, cmd: AddCommand) -> anyhow::Result<()> {
    let mut form = DonationForm::new();
    form.set_field(FormField::Donor, cmd.donor);
    form.set_field(FormField::Type, cmd.donation_type);
    form.set_field(FormField::Value, cmd.value);
    if let Some(date) = cmd.date {
        form.set_field(FormField::Date, date);
    }
    if let Some(hint) = form.hint() {
        println!("{hint}");
    }

    let record = form.apply(store)?;
    println!("Added donation {}", record.id);
    Ok(())
}

fn handle_edit(store: &mut Store, cmd: EditCommand) -> anyhow::Result<()> {
    let Some(record) = store.get(&cmd.id) else {
        bail!("no donation with id {}", cmd.id);
    };

    let mut form = DonationForm::new();
    form.begin_edit(record);
    let fields = [
        (FormField::Donor, cmd.donor),
        (FormField::Type, cmd.donation_type),
        (FormField::Value, cmd.value),
        (FormField::Date, cmd.date),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            form.set_field(field, value);
        }
    }

    let record = form.apply(store)?;
    println!("Saved changes to donation {}", record.id);
    Ok(())
}

fn handle_remove(store: &mut Store, cmd: &RemoveCommand) -> anyhow::Result<()> {
    if store.get(&cmd.id).is_none() {
        println!("No donation with id {}", cmd.id);
        return Ok(());
    }

    if !cmd.yes && !confirm("Delete this donation?")? {
        println!("Cancelled.");
        return Ok(());
    }

    if store.remove(&cmd.id)? {
        println!("Deleted donation {}", cmd.id);
    }
    Ok(())
}

fn handle_list(store: &Store, config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let filter = cmd.filter.unwrap_or_else(|| config.default_filter());
    let records = filter_by_type(store.records(), filter);

    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        OutputFormat::Table => println!("{}", render_table(&records)),
        OutputFormat::Plain => println!("{}", render_plain(&records)),
    }
    Ok(())
}

fn handle_summary(store: &Store, config: &Config, cmd: &SummaryCommand) -> anyhow::Result<()> {
    let donation_type = cmd.donation_type.unwrap_or(config.display.summary_type);
    let summary = summarize(store.records(), donation_type);

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", render_summary(&summary));
    }
    Ok(())
}

fn handle_stats(store: &Store, cmd: &StatsCommand) -> anyhow::Result<()> {
    let stats = statistics(store.records());

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{}", render_statistics(&stats));
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Slot key:           {}", config.storage.slot_key);
                println!();
                println!("[Display]");
                println!("  Summary type:       {}", config.display.summary_type);
                println!("  Default filter:     {}", config.display.default_filter);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

/// Ask a yes/no question on stdin; anything but "y"/"yes" is a no.
fn confirm(question: &str) -> anyhow::Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
