mod allocation;
mod display;
mod export;
mod parser;
mod store;
mod web;

use chrono::NaiveDate;

use allocation::allocate;
use display::print_allocation;
use export::write_allocation_csv;
use parser::load_preferences;
use store::load_workers_csv;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Check if we should run in web mode
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "web" {
        let port = args
            .get(2)
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);
        let password = std::env::var("ADMIN_PASSWORD")
            .unwrap_or_else(|_| "admin123".to_string()); // Default password, change this!
        let workers_path =
            std::env::var("WORKERS_CSV").unwrap_or_else(|_| "data/workers.csv".to_string());

        let workers = load_workers_csv(&workers_path)?;
        println!("Loaded {} workers from {}", workers.len(), workers_path);
        println!("Starting web server on port {}...", port);
        println!("Access the site at http://localhost:{}", port);

        web::start_server(port, password, workers).await?;
        return Ok(());
    }

    // CLI mode: one-shot allocation from file arguments
    if args.len() < 4 {
        eprintln!(
            "Usage: {} <preferences.csv> <workers.csv> <days> [start-date]",
            args[0]
        );
        eprintln!("       {} web [port]", args[0]);
        std::process::exit(2);
    }

    println!("Loading preferences from CSV...");
    let preferences = load_preferences(&args[1])?;
    println!(
        "Loaded {} preference records (repeat submissions merged)",
        preferences.len()
    );

    let workers = load_workers_csv(&args[2])?;
    println!("Loaded {} workers", workers.len());

    let days: i64 = args[3].parse()?;
    let start_date = match args.get(4) {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")?,
        None => chrono::Local::now().date_naive(),
    };

    let result = allocate(&workers, &preferences, days, start_date)?;
    print_allocation(&result);

    write_allocation_csv(&result, "shift_allocation.csv")?;
    println!("\nAllocation saved to shift_allocation.csv");

    Ok(())
}
