// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use std::env;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use agency_console::format::format_brl;
use agency_console::{
    default_range, import_csv, load_or_demo, AggregationEngine, DateRange, Settings, Workspace,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let settings = Settings::from_env()?;

    match args.get(1).map(String::as_str) {
        Some("report") => run_report(&settings, &args[2..])?,
        Some("import") => {
            let path = args.get(2).context("Usage: agency-console import <file.csv>")?;
            run_import(&settings, Path::new(path))?;
        }
        Some("health") => {
            let client_id = args.get(2).context("Usage: agency-console health <client-id>")?;
            run_health(&settings, client_id)?;
        }
        Some("help") | Some("--help") | Some("-h") => print_usage(),
        // UI mode (default)
        _ => run_ui_mode(&settings)?,
    }

    Ok(())
}

fn print_usage() {
    println!("agency-console {}", agency_console::VERSION);
    println!();
    println!("USAGE:");
    println!("  agency-console                     Open the cockpit (TUI)");
    println!("  agency-console report [START END]  Print the analytics report as JSON");
    println!("  agency-console import <file.csv>   Import transactions and summarise them");
    println!("  agency-console health <client-id>  Score a client's relationship health");
    println!();
    println!("Settings are read from ${}", agency_console::config::CONFIG_ENV_VAR);
}

fn load_workspace(settings: &Settings) -> Result<Workspace> {
    load_or_demo(settings.data.snapshot_path.as_deref())
}

/// Wall-clock moment every client health score is judged at
fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn today() -> NaiveDate {
    now().date()
}

fn run_report(settings: &Settings, args: &[String]) -> Result<()> {
    let workspace = load_workspace(settings)?;
    let finance = &workspace.finance;

    let range = match args {
        [start, end, ..] => DateRange::parse(start, end)?,
        [_] => anyhow::bail!("Usage: agency-console report [START END]"),
        [] => default_range(finance.transactions(), today()),
    };

    let engine = AggregationEngine::new(settings.clone());
    let report = engine.report(
        finance.transactions(),
        finance.categories(),
        finance.accounts(),
        range,
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_import(settings: &Settings, csv_path: &Path) -> Result<()> {
    println!("📂 Importing transactions");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let transactions = import_csv(csv_path)?;
    println!("✓ Loaded {} transactions from {}", transactions.len(), csv_path.display());

    let mut workspace = load_workspace(settings)?;
    let added = workspace.finance.extend_transactions(transactions);
    println!("✓ Added {} transactions to the books", added);

    let finance = &workspace.finance;
    let engine = AggregationEngine::new(settings.clone());
    let range = default_range(finance.transactions(), today());
    let report = engine.report(finance.transactions(), finance.categories(), finance.accounts(), range);

    println!("\n📊 Period {} → {} ({} days)", range.start, range.end, report.day_count);
    println!("   Receitas (pagas):  {}", format_brl(report.summary.income));
    println!("   Despesas (pagas):  {}", format_brl(report.summary.expense));
    println!("   Saldo em contas:   {}", format_brl(report.summary.balance));

    if !report.categories.is_empty() {
        println!("\n🥧 Despesas por categoria");
        for slice in &report.categories {
            println!("   {:<20} {:>14} {:>4}%", slice.name, format_brl(slice.amount), slice.percentage);
        }
    }

    if let Some(path) = &settings.data.snapshot_path {
        agency_console::save_snapshot(&workspace, path)?;
        println!("\n💾 Snapshot updated: {}", path.display());
    }

    println!("\n✅ Import complete");
    Ok(())
}

fn run_health(settings: &Settings, client_id: &str) -> Result<()> {
    let workspace = load_workspace(settings)?;
    let client = workspace.clients.get(client_id)?;

    let engine = AggregationEngine::new(settings.clone());
    let report = engine.client_health(client, workspace.tasks.tasks(), now());
    let diagnosis = report.diagnosis();

    println!("🩺 {} ({})", client.name, client.id);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Score:        {} / 100  [{}]", report.score, report.level.label_pt());
    println!("   Reclamações:  {}", report.complaints);
    println!("   Incidentes:   {}", report.incidents);
    println!("   Atrasadas:    {} de {} tarefas", report.overdue, report.total_tasks);
    println!("   Metas:        {} de {} ({}%)", report.goals, report.total_goals, report.goal_progress);
    println!();
    println!("   {}", diagnosis.summary);
    println!("   ➜ {}", diagnosis.action);

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(settings: &Settings) -> Result<()> {
    println!("🖥️  Loading Agency Console cockpit...\n");

    let workspace = load_workspace(settings)?;
    println!(
        "✓ Loaded {} transactions, {} clients\n",
        workspace.finance.transactions().len(),
        workspace.clients.clients().len()
    );
    println!("Starting UI... (Press 'q' to quit)\n");

    let mut app = ui::App::new(workspace, settings.clone(), now());
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_settings: &Settings) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use the API: cargo run --bin agency-server --features server");
    std::process::exit(1);
}
