use anyhow::Result;
use clap::{Arg, Command};
use luckyball_client::{HttpServer, config};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("luckyball-server")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Frequency-weighted lucky number HTTP service")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .help("Path to luckyball.toml"),
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
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(log_level).init();

    dotenvy::dotenv().ok();

    let app_config = match matches.get_one::<String>("config") {
        Some(path) => config::AppConfig::load(path)?,
        None => config::load_default()?,
    };

    let server = HttpServer::new(app_config);
    let handle = server.start().await?;
    handle.await?;

    Ok(())
}
