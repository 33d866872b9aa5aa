//! apotd - CLI entry point.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use apotd::{
    cli::Args,
    config::{validate_config, Config, NotifyConfig},
    error::{Error, Result},
    fs::{default_config_path, SniffingFileTypes},
    metadata::platform_writer,
    net::HttpFetcher,
    notify::{report_failure, MailNotifier, NoopNotifier, Notifier},
    output::{print_error, print_run_summary, print_success, print_warning},
    MetadataStatus, Pipeline, PipelineOptions, Placement,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments
    let args = Args::parse();
    let debug = args.debug;

    // Set up logging; quiet unless asked so cron runs only mail on failure
    let log_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let explicit_config = args.config.is_some();
    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let cli_notify = NotifyConfig {
        mail_to: args.mail_to.clone(),
        ..Default::default()
    };

    let config = match load_config(&config_path, explicit_config, args) {
        Ok(config) => config,
        Err(e) => return fail(build_notifier(&cli_notify).as_ref(), e).await,
    };

    let notifier = build_notifier(&config.notify);
    match run(&config, debug).await {
        Ok(placement) => {
            print_success(&success_message(&placement));
            ExitCode::SUCCESS
        }
        Err(e) => fail(notifier.as_ref(), e).await,
    }
}

/// Load the config file and apply CLI overrides.
fn load_config(path: &Path, explicit: bool, args: Args) -> Result<Config> {
    if explicit && !path.exists() {
        print_warning(&format!(
            "Configuration file not found: {}, using defaults",
            path.display()
        ));
    }

    let mut config = Config::load_or_default(path)?;
    args.merge_into_config(&mut config);
    validate_config(&config)?;
    Ok(config)
}

/// Save today's image.
async fn run(config: &Config, debug: bool) -> Result<Placement> {
    let directory = config.download_directory();
    if debug {
        print_run_summary(
            &config.source.page_url,
            &directory.display().to_string(),
            config.options.filename.as_deref(),
        );
    }

    let fetcher = HttpFetcher::new(&config.source.user_agent, config.options.show_progress)?;
    let writer = platform_writer(config.options.write_metadata);
    let pipeline = Pipeline::new(&fetcher, &SniffingFileTypes, writer.as_ref());

    let options = PipelineOptions {
        page_url: config.source.page_url.clone(),
        directory,
        filename: config.options.filename.clone(),
        prepend_count: config.options.prepend_count,
        debug,
        today: chrono::Local::now().date_naive(),
    };

    pipeline.run(&options).await
}

fn build_notifier(notify: &NotifyConfig) -> Box<dyn Notifier> {
    match &notify.mail_to {
        Some(address) => Box::new(MailNotifier::new(notify.mail_command.clone(), address.clone())),
        None => Box::new(NoopNotifier),
    }
}

/// Report a fatal error and pick the exit code.
async fn fail(notifier: &dyn Notifier, error: Error) -> ExitCode {
    let message = report_failure(notifier, &error.to_string()).await;
    print_error(&message);
    ExitCode::from(error.exit_code() as u8)
}

fn success_message(placement: &Placement) -> String {
    match placement.metadata {
        MetadataStatus::Written => format!("Saved {} with comment", placement.path.display()),
        MetadataStatus::Skipped => format!("Saved {}", placement.path.display()),
    }
}
