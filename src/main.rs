use clap::Parser;
use greeter::ServiceKind;
use greeter::core::config::{self, CliOverrides};
use greeter::core::greeter::greet_once;
use greeter::service::build_service;
use greeter::tui;
use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "greeter", about = "Greets you through a remote service")]
struct Args {
    /// Greet service to call
    #[arg(short, long, value_enum)]
    service: Option<ServiceKind>,

    /// Base URL of the HTTP greet service
    #[arg(short, long)]
    url: Option<String>,

    /// Prefill the name field
    #[arg(short, long)]
    name: Option<String>,

    /// Greet NAME once, print the greeting and exit
    #[arg(long, value_name = "NAME")]
    once: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to greeter.log in current directory.
    // The logger accepts everything; the global max level does the filtering.
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("greeter.log") {
        let _ = WriteLogger::init(LevelFilter::Trace, log_config, log_file);
    }
    log::set_max_level(config::DEFAULT_LOG_LEVEL);

    let loaded = config::load_config();
    let cli = CliOverrides {
        service: args.service,
        url: args.url.clone(),
    };
    let resolved = match &loaded {
        Ok(file_config) => config::resolve(file_config, &cli),
        Err(e) => {
            log::warn!("Ignoring config file: {}", e);
            config::resolve(&config::GreeterConfig::default(), &cli)
        }
    };
    log::set_max_level(resolved.log_level);

    log::info!(
        "Greeter starting up with service: {:?}",
        resolved.service
    );

    match args.once {
        Some(name) => {
            let service = build_service(&resolved);
            match greet_once(service, &name).await {
                Ok(greeting) => {
                    println!("{greeting}");
                    Ok(())
                }
                Err(failure) => Err(std::io::Error::other(failure)),
            }
        }
        None => tui::run(resolved, args.name),
    }
}
