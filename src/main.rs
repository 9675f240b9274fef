//! creatorbook - Main entry point
//!
//! Launches the TUI by default; the subcommands run the same flows headless.

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io::stdout;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use creatorbook::app::App;
use creatorbook::booking::{Advance, BookingWizard};
use creatorbook::catalog::{InMemoryCatalog, ServiceCatalog};
use creatorbook::availability::InMemoryAvailability;
use creatorbook::cli::{Cli, Commands};
use creatorbook::config::AppConfig;
use creatorbook::dashboard::DashboardSummary;
use creatorbook::data::MarketplaceData;
use creatorbook::error::{AppError, Result};
use creatorbook::notify::TracingNotifier;
use creatorbook::payment::PaymentProcessor;
use creatorbook::session::SessionStore;
use creatorbook::types::long_date;

/// Initialize tracing. `RUST_LOG` overrides the configured filter.
///
/// The TUI owns the terminal, so in that mode events go to the log file.
fn init_logging(config: &AppConfig, tui: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    if tui {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }
    Ok(())
}

/// Configuration file (if any) with command-line overrides applied
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::default(),
    };

    if let Some(data) = &cli.data {
        config.data_file = Some(data.clone());
    }
    if let Some(session) = &cli.session {
        config.session_file = session.clone();
    }
    if let Some(delay) = cli.payment_delay_ms {
        config.payment_delay_ms = delay;
    }
    if cli.fail_payments {
        config.simulate_payment_failure = true;
    }

    config.validate()?;
    Ok(config)
}

/// Catalog and availability from the data file, or the built-in data
fn load_sources(config: &AppConfig) -> Result<(InMemoryCatalog, InMemoryAvailability)> {
    match &config.data_file {
        Some(path) => {
            info!(?path, "loading marketplace data");
            let data = MarketplaceData::load_from_file(path)?;
            data.validate()?;
            Ok(data.into_sources()?)
        }
        None => Ok((InMemoryCatalog::mock(), InMemoryAvailability::mock())),
    }
}

/// Main application entry point
fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_args();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config, cli.is_tui())?;
    info!("creatorbook starting up");
    debug!(?config, "configuration loaded");

    if let Err(e) = run(cli, &config) {
        error!(error = %e, "command failed");
        eprintln!("✗ {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: Cli, config: &AppConfig) -> Result<()> {
    match cli.command {
        None | Some(Commands::Tui) => run_tui(config),
        Some(Commands::Services { json }) => list_services(config, json),
        Some(Commands::Login { email, password }) => {
            let mut session = SessionStore::load(&config.session_file)?;
            let data = session.login(&email, &password)?;
            println!("✓ Signed in as {}", data.display_name());
            session.save()?;
            Ok(())
        }
        Some(Commands::Signup {
            name,
            email,
            password,
            creator,
        }) => {
            let mut session = SessionStore::load(&config.session_file)?;
            let data = session.signup(&name, &email, &password, creator)?;
            println!("✓ Account created for {} ({})", data.display_name(), data.user_type);
            session.save()?;
            Ok(())
        }
        Some(Commands::Logout) => {
            let mut session = SessionStore::load(&config.session_file)?;
            session.logout();
            session.save()?;
            println!("✓ Signed out");
            Ok(())
        }
        Some(Commands::Whoami) => {
            let session = SessionStore::load(&config.session_file)?;
            let data = session.data();
            if data.is_logged_in {
                println!("{} <{}> ({})", data.display_name(), data.email, data.user_type);
                if let Some(payout) = &data.payout {
                    println!("Payout: {} {}", payout.method, payout.masked_account());
                }
            } else {
                println!("Not signed in");
            }
            Ok(())
        }
        Some(Commands::Dashboard { json }) => show_dashboard(config, json),
        Some(Commands::Profile { name }) => {
            let mut session = SessionStore::load(&config.session_file)?;
            session.update_profile(&name)?;
            session.save()?;
            println!("✓ Profile updated successfully");
            Ok(())
        }
        Some(Commands::Password {
            new_password,
            confirm,
        }) => {
            let session = SessionStore::load(&config.session_file)?;
            session.change_password(&new_password, &confirm)?;
            session.save()?;
            println!("✓ Password changed successfully");
            Ok(())
        }
        Some(Commands::Payout {
            method,
            holder,
            account,
        }) => {
            let mut session = SessionStore::load(&config.session_file)?;
            session.update_payout(method, &holder, &account)?;
            session.save()?;
            println!("✓ Payment information updated");
            Ok(())
        }
        Some(Commands::Creator { username, json }) => show_creator(config, &username, json),
        Some(Commands::Book {
            service_id,
            date,
            time,
            confirm_age,
            json,
        }) => book(config, &service_id, date, &time, confirm_age, json),
        Some(Commands::Validate { data_file }) => {
            info!(?data_file, "validating marketplace data");
            let data = MarketplaceData::load_from_file(&data_file)?;
            data.validate()?;
            println!(
                "✓ Marketplace data is valid: {} services, {} availability dates",
                data.services.len(),
                data.availability.len()
            );
            Ok(())
        }
    }
}

/// Run the interactive terminal UI
fn run_tui(config: &AppConfig) -> Result<()> {
    let (catalog, availability) = load_sources(config)?;
    let session = SessionStore::load(&config.session_file)?;

    debug!("Initializing terminal for TUI mode");
    enable_raw_mode()
        .map_err(|e| AppError::terminal(format!("Failed to enable raw mode: {}", e)))?;
    crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen)
        .map_err(|e| AppError::terminal(format!("Failed to enter alternate screen: {}", e)))?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::terminal(format!("Failed to create terminal: {}", e)))?;

    let mut app = App::new(
        session,
        Arc::new(catalog),
        Arc::new(availability),
        Arc::new(config.payment_processor()),
    );
    let result = app.run(&mut terminal);

    // Always attempt cleanup, even if the app failed
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);

    result
}

fn list_services(config: &AppConfig, json: bool) -> Result<()> {
    let (catalog, _) = load_sources(config)?;
    let services = catalog.services();
    if json {
        println!("{}", serde_json::to_string_pretty(&services)?);
        return Ok(());
    }
    if services.is_empty() {
        println!("No services available.");
    }
    for service in &services {
        println!("[{}] {}", service.id, service.display_line());
    }
    Ok(())
}

fn show_creator(config: &AppConfig, username: &str, json: bool) -> Result<()> {
    let (catalog, _) = load_sources(config)?;
    let profile = catalog
        .creator_profile(username)
        .ok_or_else(|| AppError::general(format!("Creator '{}' not found", username)))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    let creator = &profile.creator;
    let verified = if creator.verified { " ✓ verified" } else { "" };
    println!("{} (@{}){}", creator.name, creator.username, verified);
    println!("{} · {}", creator.title, creator.location);
    println!("★ {} ({} reviews)", creator.rating, creator.review_count);
    println!("\n{}", creator.bio);
    println!("\nServices");
    if profile.services.is_empty() {
        println!("  No services offered yet.");
    }
    for service in &profile.services {
        println!("  [{}] {}", service.id, service.display_line());
    }
    if let Some(first) = profile.services.first() {
        println!(
            "\nBook with: creatorbook book {} --date YYYY-MM-DD --time HH:MM --confirm-age",
            first.id
        );
    }
    Ok(())
}

fn show_dashboard(config: &AppConfig, json: bool) -> Result<()> {
    let session = SessionStore::load(&config.session_file)?;
    if !session.data().is_logged_in {
        return Err(AppError::general("Please sign in to view your dashboard"));
    }
    let summary = DashboardSummary::build(session.data());
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Welcome back, {}", summary.welcome_name);
    for card in &summary.stats {
        println!("  {:<22} {}", card.label, card.value);
    }
    if summary.is_creator {
        println!("\nEarnings (last 6 months): ${}", summary.total_earnings());
        for earning in &summary.earnings {
            println!("  {:<4} ${}", earning.month, earning.amount);
        }
    }
    println!("\n{}", summary.bookings_heading());
    for booking in &summary.bookings {
        if summary.is_creator {
            println!(
                "  {:<32} {:<16} {} {} {}",
                booking.service, booking.client, booking.date, booking.time, booking.status
            );
        } else {
            println!(
                "  {:<32} {} {} {}",
                booking.service, booking.date, booking.time, booking.status
            );
        }
    }
    Ok(())
}

/// Walk the booking wizard from the command line
fn book(
    config: &AppConfig,
    service_id: &str,
    date: chrono::NaiveDate,
    time: &str,
    confirm_age: bool,
    json: bool,
) -> Result<()> {
    let (catalog, availability) = load_sources(config)?;
    let session = SessionStore::load(&config.session_file)?;
    let payment = config.payment_processor();

    let mut wizard = BookingWizard::open(
        service_id,
        &session,
        &catalog,
        Arc::new(availability),
        Arc::new(TracingNotifier),
    )?;
    wizard.select_date(date)?;
    wizard.select_time(time)?;
    wizard.advance()?;
    if confirm_age {
        wizard.toggle_age_verification()?;
    }

    let request = match wizard.advance()? {
        Advance::Submit(request) => request,
        Advance::Moved(step) => {
            return Err(AppError::general(format!("Unexpected booking step: {}", step)));
        }
    };
    if !json {
        println!(
            "Processing payment of ${} for {}...",
            request.amount.normalize(),
            wizard.service().title
        );
    }
    let outcome = payment.submit(&request);
    let confirmation = wizard.complete_submission(outcome)?;

    if json {
        println!("{}", serde_json::to_string_pretty(confirmation)?);
    } else {
        println!("✓ Booking confirmed!");
        println!("  {}", confirmation.summary());
        println!("  Date:      {}", long_date(confirmation.date));
        println!("  Reference: {}", confirmation.payment_reference);
    }
    Ok(())
}
