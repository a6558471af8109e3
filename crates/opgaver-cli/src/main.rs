//! opgaver - download every Lectio assignment to disk.
//!
//! Asks for username, password and school until login succeeds (or the user
//! gives up), then writes every assignment with its metadata and attachments
//! under `./Opgaver`.

mod logging;
mod progress_bar;
mod prompt;

use anyhow::Result;
use indicatif::ProgressBar;
use opgaver_core::{authenticate, Config, DownloadReport, Downloader, LectioClient, LoginOutcome};
use tracing::{info, warn};

use progress_bar::ProgressBarReporter;
use prompt::TerminalPrompt;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    // Hidden until the download starts; log lines are written around it
    let bar = ProgressBar::hidden();
    let _log_guard = logging::init_tracing(bar.clone());
    info!("opgaver starting");

    let mut config = Config::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        Config::default()
    });
    config.apply_env();

    let client = LectioClient::with_base_url(&config.base_url, config.request_timeout())?;

    let mut prompt = TerminalPrompt::new(config.last_username.clone(), config.last_school_id.clone());
    let session = match authenticate(&client, &mut prompt).await? {
        LoginOutcome::Authenticated(session) => session,
        LoginOutcome::Abandoned => return Ok(()),
    };

    config.remember_login(session.username(), session.school_id());
    if let Err(e) = config.save() {
        warn!(error = %e, "Failed to save config");
    }

    let mut progress = ProgressBarReporter::new(bar);
    let report = Downloader::new(&client, &session)
        .with_root(&config.output_dir)
        .run(&mut progress)
        .await?;
    drop(progress);

    print_summary(&report);
    info!("opgaver finished");
    Ok(())
}

fn print_summary(report: &DownloadReport) {
    println!(
        "\nDownloaded {} opgaver with {} attachments to {} in {}s",
        report.assignments,
        report.attachments,
        report.root.display(),
        report.elapsed().num_seconds()
    );

    if report.is_clean() {
        return;
    }
    if report.suppressed > 0 {
        println!("{} metadata files or submissions were skipped", report.suppressed);
    }
    if !report.failures.is_empty() {
        println!("{} problems:", report.failures.len());
        for failure in &report.failures {
            match &failure.assignment {
                Some(title) => println!("  {}: failed to {}: {}", title, failure.kind, failure.message),
                None => println!("  failed to {}: {}", failure.kind, failure.message),
            }
        }
    }
}
