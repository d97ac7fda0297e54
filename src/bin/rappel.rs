use anyhow::Result;
use rappel::cli;
use rappel::config::Config;
use rappel::controller::Controller;
use rappel::scheduler;
use rappel::system::DesktopChannel;
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::sync::Arc;
use tokio::sync::watch;

#[tokio::main]
async fn main() -> Result<()> {
    let args = match cli::parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Try 'rappel --help'.");
            std::process::exit(2);
        }
    };

    if args.help {
        cli::print_help();
        return Ok(());
    }

    TermLogger::init(
        LevelFilter::Info,
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let mut config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        // A URL on the command line is enough to run without a config file.
        Err(e) if Config::is_missing_config_error(&e) && args.url.is_some() => Config::default(),
        Err(e) if Config::is_missing_config_error(&e) => {
            let path = Config::default_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "the config file".to_string());
            eprintln!("No configuration found.");
            eprintln!("Create {} with at least:", path);
            eprintln!();
            eprintln!("    url = \"https://example.com/reminders.json\"");
            eprintln!();
            eprintln!("or pass --url <url>.");
            std::process::exit(2);
        }
        Err(e) => return Err(e),
    };
    if let Some(url) = args.url {
        config.url = url;
    }

    let check_time = scheduler::parse_check_time(&config.check_time)?;

    // Ctrl-C flips the shutdown flag; the connectivity waiter and the
    // scheduler loop both observe it.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("Received Ctrl+C, shutting down.");
            let _ = shutdown_tx.send(true);
        }
    });

    let channel = Arc::new(DesktopChannel::new(config.notification_timeout_secs));
    let controller = Controller::new(&config, channel, shutdown_rx.clone())?;

    if args.once {
        let ok = controller.run_check().await;
        std::process::exit(if ok { 0 } else { 1 });
    }

    log::info!(
        "Rappel started. Checking now, then daily at {}.",
        config.check_time
    );
    log::info!("Press Ctrl+C to stop.");

    if !controller.run_check().await {
        log::warn!("Startup check failed; will try again at the scheduled time");
    }
    scheduler::run_daily(&controller, check_time, shutdown_rx).await;

    Ok(())
}
