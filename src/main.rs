use std::io::Write as _;

use anyhow::Result;
use clap::{Arg, Command};
use luckyball_client::{config, service};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("luckyball")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Frequency-weighted Powerball lucky number generator")
        .arg(
            Arg::new("force-refresh")
                .long("force-refresh")
                .short('f')
                .action(clap::ArgAction::SetTrue)
                .help("Re-download the draw history even if the cache is fresh"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(clap::ArgAction::Count)
                .help("Set verbose output level"),
        )
        .get_matches();

    let log_level = match matches.get_count("verbose") {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new().filter_level(log_level).init();

    dotenvy::dotenv().ok();

    let mut app_config = config::load_default()?;
    app_config.force_refresh = matches.get_flag("force-refresh");

    let count = prompt_ticket_count()?;
    let tickets = service::generate_tickets(&app_config, count).await?;

    println!("\nYour Lucky Numbers:");
    for (i, ticket) in tickets.iter().enumerate() {
        println!("Ticket {}: {ticket}", i + 1);
    }

    Ok(())
}

fn prompt_ticket_count() -> Result<usize> {
    print!("How many lottery tickets would you like to generate? ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(parse_ticket_count(&line))
}

/// Any input that is not a positive integer quietly falls back to one ticket.
fn parse_ticket_count(input: &str) -> usize {
    match input.trim().parse::<usize>() {
        Ok(count) if count >= 1 => count,
        _ => {
            println!("Invalid input, defaulting to 1 ticket.");
            1
        }
    }
}
