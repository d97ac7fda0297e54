// File: ./src/cli.rs
//! Shared command-line interface logic: argument scanning and help text.

use std::path::PathBuf;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub once: bool,
    pub help: bool,
    pub config: Option<PathBuf>,
    pub url: Option<String>,
}

/// Scan raw arguments (without the binary name).
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<CliArgs, String> {
    let mut out = CliArgs::default();
    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" | "help" => out.help = true,
            "-1" | "--once" => out.once = true,
            "-c" | "--config" => {
                let value = it
                    .next()
                    .ok_or_else(|| "--config requires a path".to_string())?;
                out.config = Some(PathBuf::from(value));
            }
            "-u" | "--url" => {
                let value = it
                    .next()
                    .ok_or_else(|| "--url requires a value".to_string())?;
                out.url = Some(value);
            }
            other => return Err(format!("Unknown argument '{}'", other)),
        }
    }
    Ok(out)
}

pub fn print_help() {
    println!(
        "Rappel v{} - a small daily reminder notifier",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("Fetches a JSON reminder list from a URL and shows a desktop notification");
    println!("for every entry whose day matches today's day of the month.");
    println!();
    println!("USAGE:");
    println!("    rappel [OPTIONS]             Check now, then re-check daily at check_time");
    println!("    rappel --once [OPTIONS]      Run a single check and exit");
    println!("    rappel --help                Show this help message");
    println!();
    println!("OPTIONS:");
    println!("    -1, --once            One-shot mode. Exits 0 when the check completed");
    println!("                          (even with no reminders due) and 1 when the");
    println!("                          reminder list could not be fetched.");
    println!("    -c, --config <path>   Use a different config file.");
    println!("    -u, --url <url>       Override the reminder document URL.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("CONFIGURATION:");
    println!("    Read from the platform config dir (e.g. ~/.config/rappel/config.toml):");
    println!();
    println!("    url                          Reminder document URL (required)");
    println!("    check_time                   Daily check time, \"HH:MM\" (default \"09:30\")");
    println!("    connectivity_url             Reachability probe endpoint");
    println!("    connectivity_timeout_secs    Probe timeout (default 10)");
    println!("    connectivity_retry_secs      Probe retry interval (default 60)");
    println!("    connectivity_deadline_secs   Give up waiting after this long (default: never)");
    println!("    fetch_timeout_secs           Download timeout (default 15)");
    println!("    notify_pacing_secs           Pause between notifications (default 2)");
    println!("    notification_timeout_secs    Notification display time (default 10)");
    println!();
    println!("DOCUMENT FORMAT:");
    println!("    A JSON array of objects: [{{\"day\": 14, \"message\": \"Pay rent\"}}, ...]");
    println!();
    println!("MORE INFO:");
    println!("    Repository: https://codeberg.org/trougnouf/rappel");
    println!("    License:    GPL-3.0");
}
