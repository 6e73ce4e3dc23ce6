use clap::Parser;
use log::{error, info, warn};
use miette::{IntoDiagnostic, Result};
use payment_notifier::application::dispatcher::Dispatcher;
use payment_notifier::application::pipeline::UploadPipeline;
use payment_notifier::config::{DEFAULT_MAX_IN_FLIGHT, DispatchConfig};
use payment_notifier::domain::ports::PaymentGatewayRef;
use payment_notifier::infrastructure::http::HttpPaymentGateway;
use payment_notifier::infrastructure::in_memory::InMemoryGateway;
use payment_notifier::infrastructure::uploads::UploadDir;
use payment_notifier::interfaces::report_writer::{ReportFormat, ReportWriter};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Spreadsheet with payment rows (xlsx, xlsm, xlsb, xls, ods or csv)
    input: PathBuf,

    /// Payment registration endpoint
    #[arg(long, env = "IWISP_API_URL")]
    api_url: String,

    /// API key sent with every submission
    #[arg(long, env = "IWISP_API_KEY", default_value = "", hide_env_values = true)]
    api_key: String,

    /// Maximum number of submissions in flight at once (1 = sequential)
    #[arg(long, env = "PAYMENT_NOTIFIER_MAX_IN_FLIGHT", default_value_t = DEFAULT_MAX_IN_FLIGHT)]
    max_in_flight: usize,

    /// Per-request timeout in seconds. Unset keeps the HTTP client defaults.
    #[arg(long, env = "PAYMENT_NOTIFIER_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Directory where the uploaded file is stored before it is read
    #[arg(long, default_value = "uploads")]
    upload_dir: PathBuf,

    /// Report format written to stdout
    #[arg(long, value_enum, default_value_t = ReportFormat::Json)]
    format: ReportFormat,

    /// Normalize and simulate submissions without contacting the API
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = DispatchConfig::new(cli.api_url, cli.api_key)
        .into_diagnostic()?
        .with_max_in_flight(cli.max_in_flight)
        .into_diagnostic()?
        .with_timeout(cli.timeout_secs.map(Duration::from_secs));
    info!("Using endpoint: {}", config.endpoint());
    info!("API key: {}", config.masked_api_key());

    let gateway: PaymentGatewayRef = if cli.dry_run {
        warn!("Dry run: submissions are recorded locally and never sent");
        Arc::new(InMemoryGateway::new())
    } else {
        Arc::new(HttpPaymentGateway::new(&config).into_diagnostic()?)
    };

    // Keep a working copy of the upload, then read from it
    let uploads = UploadDir::create(&cli.upload_dir).into_diagnostic()?;
    let stored = uploads.persist_file(&cli.input).into_diagnostic()?;

    let pipeline = UploadPipeline::new(Dispatcher::new(gateway, Arc::new(config)));
    let report = match pipeline.process_file(&stored).await {
        Ok(report) => report,
        Err(err) => {
            if err.is_batch_rejection() {
                error!("Upload rejected, nothing was submitted");
            }
            return Err(err).into_diagnostic();
        }
    };

    let stdout = io::stdout();
    let mut writer = ReportWriter::new(stdout.lock());
    writer.write_report(&report, cli.format).into_diagnostic()?;

    Ok(())
}
