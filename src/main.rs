//! devmode - query and toggle developer mode on a connected phone.

use std::net::Ipv4Addr;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use devmode_client::output::{write_failure, write_report, write_stdout_line};
use devmode_client::protocol::Environment;
use devmode_client::{ClientConfig, Verb};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const PORT_HELP: &str = "port: 27177 for WP8, 27077 for WP7";

/// devmode - developer mode registration client
#[derive(Parser, Debug)]
#[command(name = "devmode")]
#[command(version, about, long_about = None, after_help = PORT_HELP)]
struct Cli {
    /// Port of the companion service
    port: u16,

    /// Operation to perform
    #[arg(value_enum)]
    verb: Verb,

    /// Auth cookie for lock and unlock
    cookie: Option<String>,

    /// Unlock against the internal environment instead of production
    #[arg(long)]
    internal: bool,

    /// Address of the companion service
    #[arg(long, default_value = "127.0.0.1")]
    host: Ipv4Addr,

    /// Print the result as a JSON line
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Cli {
    fn config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(self.port).with_host(self.host);
        if let Some(cookie) = &self.cookie {
            config = config.with_cookie(cookie.clone());
        }
        if self.internal {
            config = config.with_environment(Environment::Internal);
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            return Ok(());
        }
        Err(e) => {
            write_stdout_line(e.render().to_string().trim_end())?;
            write_stdout_line(PORT_HELP)?;
            return Ok(());
        }
    };

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = cli.config();
    match devmode_client::run(cli.verb, &config) {
        Ok(report) => write_report(&report, cli.json)?,
        Err(e) => {
            tracing::debug!("{} failed: {:?}", cli.verb, e);
            write_failure(&e)?;
        }
    }

    Ok(())
}
