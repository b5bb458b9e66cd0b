//! Minimal CLI parsing for refresh overrides.

use std::env;
use std::time::Duration;

#[derive(Debug, Default)]
pub struct CliOptions {
    /// Overrides the settle delay before the refresh request.
    pub delay_override: Option<Duration>,
    /// Probe the server instead of triggering a refresh.
    pub check_only: bool,
}

impl CliOptions {
    pub fn from_args() -> Self {
        Self::parse(env::args().skip(1))
    }

    fn parse(mut args: impl Iterator<Item = String>) -> Self {
        let mut options = CliOptions::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--now" => options.delay_override = Some(Duration::ZERO),
                "--check" => options.check_only = true,
                "--delay" => {
                    if let Some(value) = args.next() {
                        options.delay_override = parse_delay(&value);
                    }
                }
                _ if arg.starts_with("--delay=") => {
                    if let Some(value) = arg.split_once('=').map(|(_, v)| v) {
                        options.delay_override = parse_delay(value);
                    }
                }
                _ => {}
            }
        }
        options
    }
}

fn parse_delay(value: &str) -> Option<Duration> {
    value.parse::<u64>().ok().map(Duration::from_secs)
}
