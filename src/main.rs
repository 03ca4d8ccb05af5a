use anyhow::{Context, bail};
use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

use bobacom::core::config::{self, BobacomConfig};
use bobacom::core::state::{App, Connection};
use bobacom::{transport, tui};

#[derive(Parser)]
#[command(name = "bobacom", about = "Interactive terminal for serial devices")]
struct Args {
    /// Serial device to open, e.g. /dev/ttyUSB0 or COM3
    device: String,

    /// Baud rate (overrides BOBACOM_BAUD_RATE and the config file)
    #[arg(short = 'b', long = "baud")]
    baud_rate: Option<u32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // The config decides where logs go, so a bad file can only be reported
    // once the logger exists.
    let (file_config, config_error) = match config::load_config() {
        Ok(config) => (config, None),
        Err(e) => (BobacomConfig::default(), Some(e)),
    };
    let resolved = config::resolve(&file_config, args.baud_rate);

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }
    if let Some(e) = config_error {
        log::warn!("Ignoring config file: {}", e);
    }

    log::info!(
        "Bobacom starting: {} @ {} baud",
        args.device,
        resolved.baud_rate
    );
    log::debug!("Resolved config: {:?}", resolved);

    let transport =
        transport::open_serial(&args.device, resolved.baud_rate, resolved.write_timeout)?;
    let app = App::new(
        Connection::new(args.device, resolved.baud_rate),
        resolved.scrollback_lines,
    );

    let reason = tui::run(app, transport)
        .await
        .context("terminal I/O failed")?;

    if reason.is_failure() {
        bail!("connection lost: {}", reason);
    }
    Ok(())
}
