use clap::{Parser, Subcommand};
use std::path::PathBuf;
use trade_desk_core::config::Settings;
use trade_desk_core::domain::payload::RotationsPayload;
use trade_desk_core::mailer::resend::ResendMailer;
use trade_desk_core::mailer::{daily_subject, weekly_subject, Mailer};
use trade_desk_core::render::Renderer;
use trade_desk_core::storage::JsonFileStore;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod output;

use output::NewsletterKind;

#[derive(Debug, Parser)]
#[command(name = "trade_desk_worker")]
struct Args {
    #[command(subcommand)]
    job: Job,
}

#[derive(Debug, Subcommand)]
enum Job {
    /// Ingest today's holdings payload and write the daily newsletter.
    Daily {
        /// Holdings payload JSON. Defaults to ROTATIONS_PATH or data/rotations.json.
        #[arg(long)]
        payload: Option<PathBuf>,

        #[command(flatten)]
        common: CommonArgs,
    },
    /// Roll recorded history up into the weekly newsletter. Never writes state.
    Weekly {
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Debug, clap::Args)]
struct CommonArgs {
    /// State file. Defaults to STATE_PATH or data/state.json.
    #[arg(long)]
    state: Option<PathBuf>,

    /// Newsletter output directory. Defaults to OUT_DIR or out.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Directory with daily.md.hbs / weekly.md.hbs overrides.
    #[arg(long)]
    templates_dir: Option<PathBuf>,

    /// Email the newsletter through Resend after writing it.
    #[arg(long)]
    send: bool,

    /// Do everything except persisting state, writing files, or sending mail.
    #[arg(long)]
    dry_run: bool,
}

impl CommonArgs {
    fn state_path(&self, settings: &Settings) -> PathBuf {
        self.state
            .clone()
            .unwrap_or_else(|| settings.state_path.clone())
    }

    fn out_dir(&self, settings: &Settings) -> PathBuf {
        self.out_dir
            .clone()
            .unwrap_or_else(|| settings.out_dir.clone())
    }

    fn templates_dir(&self, settings: &Settings) -> Option<PathBuf> {
        self.templates_dir
            .clone()
            .or_else(|| settings.templates_dir.clone())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();

    let settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    if dotenv.is_err() {
        tracing::info!("no .env file found; relying on environment variables");
    }

    let args = Args::parse();

    let result = match args.job {
        Job::Daily { payload, common } => run_daily(&settings, payload, &common).await,
        Job::Weekly { common } => run_weekly(&settings, &common).await,
    };

    if let Err(err) = &result {
        sentry_anyhow::capture_anyhow(err);
        tracing::error!(error = %format!("{err:#}"), "newsletter run failed");
    }
    result
}

async fn run_daily(
    settings: &Settings,
    payload: Option<PathBuf>,
    common: &CommonArgs,
) -> anyhow::Result<()> {
    let payload_path = payload.unwrap_or_else(|| settings.rotations_path.clone());
    let today = RotationsPayload::from_path(&payload_path)?.validate_and_into_ingest()?;

    let store = JsonFileStore::new(common.state_path(settings));
    let report = trade_desk_core::jobs::daily::run(&store, &today, !common.dry_run)?;

    if !report.has_changes() {
        tracing::info!(date = %report.date, "no changes today; skipping newsletter");
        return Ok(());
    }

    let renderer = Renderer::with_overrides(common.templates_dir(settings).as_deref())?;
    let markdown = renderer.render_daily(&report)?;

    publish(
        settings,
        common,
        NewsletterKind::Daily,
        &report.date,
        &daily_subject(&report),
        &markdown,
    )
    .await
}

async fn run_weekly(settings: &Settings, common: &CommonArgs) -> anyhow::Result<()> {
    let store = JsonFileStore::new(common.state_path(settings));
    let Some(report) = trade_desk_core::jobs::weekly::run(&store)? else {
        return Ok(());
    };

    let renderer = Renderer::with_overrides(common.templates_dir(settings).as_deref())?;
    let markdown = renderer.render_weekly(&report)?;

    publish(
        settings,
        common,
        NewsletterKind::Weekly,
        &report.week_end,
        &weekly_subject(&report),
        &markdown,
    )
    .await
}

async fn publish(
    settings: &Settings,
    common: &CommonArgs,
    kind: NewsletterKind,
    date_label: &str,
    subject: &str,
    markdown: &str,
) -> anyhow::Result<()> {
    println!("{markdown}");

    if common.dry_run {
        tracing::info!(kind = kind.as_str(), dry_run = true, "not writing or sending newsletter");
        return Ok(());
    }

    let path = output::write_newsletter(&common.out_dir(settings), kind, date_label, markdown)?;
    tracing::info!(path = %path.display(), "wrote newsletter");

    if common.send {
        let mailer = ResendMailer::from_settings(settings)?;
        mailer.send_markdown(subject, markdown).await?;
        tracing::info!(provider = mailer.provider_name(), subject, "newsletter delivered");
    }

    Ok(())
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
