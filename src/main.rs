mod models;
mod store;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use models::Application;
use store::{Store, StoreError, UpdateOutcome};

#[derive(Parser)]
#[command(name = "apptrack")]
#[command(about = "Track job and internship applications from the command line")]
struct Cli {
    /// Store file to use instead of the platform data directory
    #[arg(short, long)]
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let store = match cli.file {
        Some(path) => Store::new(path),
        None => Store::open()?,
    };
    store
        .ensure_initialized()
        .with_context(|| format!("Failed to initialize store at {}", store.path().display()))?;

    let stdin = io::stdin();
    run_menu(&store, &mut stdin.lock())
}

fn run_menu(store: &Store, input: &mut impl BufRead) -> Result<()> {
    loop {
        println!("=== Application Tracker ===");
        println!("1) Add application");
        println!("2) View all");
        println!("3) Search");
        println!("4) Update status");
        println!("5) Exit");

        let Some(choice) = prompt(input, "Choose (1-5)")? else {
            break;
        };
        match choice.as_str() {
            "1" => add_application(store, input)?,
            "2" => view_all(store)?,
            "3" => search(store, input)?,
            "4" => update_status(store, input)?,
            "5" => {
                println!("\nGood luck out there.\n");
                break;
            }
            _ => println!("\nPlease choose 1-5.\n"),
        }
    }
    Ok(())
}

fn add_application(store: &Store, input: &mut impl BufRead) -> Result<()> {
    let Some(company) = prompt(input, "Company")? else {
        return Ok(());
    };
    let Some(role) = prompt(input, "Role")? else {
        return Ok(());
    };
    if company.is_empty() || role.is_empty() {
        println!("\nCompany and Role are required.\n");
        return Ok(());
    }

    let Some(date_applied) = prompt(input, "Date applied (YYYY-MM-DD) [Enter for today]")? else {
        return Ok(());
    };
    let Some(status) = prompt(input, "Status (Applied/Interview/Rejected/Offer) [Enter for Applied]")?
    else {
        return Ok(());
    };
    let Some(notes) = prompt(input, "Notes (optional)")? else {
        return Ok(());
    };

    match store.add(&company, &role, &date_applied, &status, &notes) {
        Ok(app) => println!("\nSaved application #{}.\n", app.id),
        Err(StoreError::Validation) => println!("\nCompany and Role are required.\n"),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

fn view_all(store: &Store) -> Result<()> {
    let apps = store.load()?;
    if apps.is_empty() {
        println!("\nNo applications yet.\n");
        return Ok(());
    }

    println!();
    println!(
        "{:<5} {:<22} {:<22} {:<12} {:<12}",
        "ID", "COMPANY", "ROLE", "APPLIED", "STATUS"
    );
    println!("{}", "-".repeat(77));
    for app in &apps {
        print_row(app);
        if !app.notes.is_empty() {
            println!("      Notes: {}", app.notes);
        }
    }
    println!();
    Ok(())
}

fn search(store: &Store, input: &mut impl BufRead) -> Result<()> {
    let Some(keyword) = prompt(input, "Search company/role")? else {
        return Ok(());
    };

    let hits = store.search(&keyword)?;
    if hits.is_empty() {
        println!("\nNo matches found.\n");
        return Ok(());
    }

    println!();
    println!(
        "{:<5} {:<22} {:<22} {:<12} {:<12}",
        "ID", "COMPANY", "ROLE", "APPLIED", "STATUS"
    );
    println!("{}", "-".repeat(77));
    for app in &hits {
        print_row(app);
    }
    println!();
    Ok(())
}

fn update_status(store: &Store, input: &mut impl BufRead) -> Result<()> {
    let Some(id_text) = prompt(input, "Enter ID to update")? else {
        return Ok(());
    };
    let id: u32 = match id_text.parse() {
        Ok(id) => id,
        Err(_) => {
            println!("\nID must be a number.\n");
            return Ok(());
        }
    };

    let Some(app) = store.get(id)? else {
        println!("\nID not found.\n");
        return Ok(());
    };
    println!("Current status: {}", app.status);

    let Some(new_status) = prompt(input, "New status (Applied/Interview/Rejected/Offer)")? else {
        return Ok(());
    };

    match store.update_status(id, &new_status) {
        Ok(UpdateOutcome::Updated { .. }) => println!("\nStatus updated.\n"),
        Ok(UpdateOutcome::Unchanged) => println!("\nNo change made.\n"),
        Err(StoreError::NotFound(_)) => println!("\nID not found.\n"),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

/// Prompt with a label and return the trimmed reply, or `None` once
/// stdin is closed.
fn prompt(input: &mut impl BufRead, label: &str) -> Result<Option<String>> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn print_row(app: &Application) {
    println!(
        "{:<5} {:<22} {:<22} {:<12} {:<12}",
        app.id,
        truncate(&app.company, 20),
        truncate(&app.role, 20),
        truncate(&app.date_applied, 10),
        app.status
    );
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
