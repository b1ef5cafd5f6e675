//! Service entry-point: loads configuration, runs migrations, wires adapters,
//! and polls the chat platform until Ctrl-C.

use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use stock_intent::IntentParser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use stock_assistant::domain::{
    AssistantConfig, AssistantPorts, LiteralCommands, StockAssistant,
};
use stock_assistant::inbound::polling::{
    LaneConfig, PollBackoff, PollingRunner, ReplyingHandler,
};
use stock_assistant::outbound::files::{DirectoryReportArchive, StaticImageFile};
use stock_assistant::outbound::generative::HttpTextGenerator;
use stock_assistant::outbound::persistence::{
    DbPool, DieselStockLedger, PoolConfig, run_pending_migrations,
};
use stock_assistant::outbound::telegram::TelegramTransport;
use stock_assistant::settings::{AssistantSettings, ResolvedSettings};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    // Load `.env` before the subscriber so `RUST_LOG` from the file applies.
    let dotenv = dotenvy::dotenv();
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!(error = %e, ".env could not be loaded");
        }
    }

    let settings = AssistantSettings::load_from_iter(std::env::args_os())
        .wrap_err("failed to load settings")?
        .resolve()
        .wrap_err("invalid settings")?;

    let applied = run_pending_migrations(&settings.database_url)
        .await
        .wrap_err("failed to apply migrations")?;
    info!(applied, "database ready");

    let runner = build_runner(&settings).await?;
    runner
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "ctrl-c handler failed; shutting down");
            }
        })
        .await;
    Ok(())
}

async fn build_runner(settings: &ResolvedSettings) -> Result<PollingRunner<ReplyingHandler>> {
    let pool = DbPool::connect(
        PoolConfig::new(settings.database_url.clone())
            .with_connection_timeout(settings.storage_timeout),
    )
    .await
    .wrap_err("failed to build connection pool")?;

    let generator = HttpTextGenerator::new(
        settings.generative_endpoint.clone(),
        settings.generative_api_key.clone(),
        settings.generative_model.clone(),
        settings.generative_flavor,
        settings.generative_timeout,
    )
    .wrap_err("failed to build generative client")?;

    let archive = DirectoryReportArchive::open(&settings.report_dir)
        .wrap_err_with(|| format!("failed to open report directory {:?}", settings.report_dir))?;

    let transport = Arc::new(
        TelegramTransport::new(
            settings.telegram_api_base.clone(),
            settings.telegram_bot_token.clone(),
            settings.poll_timeout,
        )
        .wrap_err("failed to build chat transport")?,
    );

    let ports = AssistantPorts {
        ledger: Arc::new(DieselStockLedger::new(pool)),
        archive: Arc::new(archive),
        images: Arc::new(StaticImageFile::new(settings.image_path.clone())),
        generator: Arc::new(generator),
    };
    let config = AssistantConfig {
        commands: LiteralCommands::new(&settings.export_phrase, &settings.image_trigger),
        max_tokens: settings.generative_max_tokens,
        storage_timeout: settings.storage_timeout,
    };
    let parser = IntentParser::spanish().wrap_err("failed to compile command parser")?;
    let assistant = Arc::new(StockAssistant::new(parser, ports, config));

    let handler = Arc::new(ReplyingHandler::new(assistant, transport.clone()));
    let lanes = LaneConfig {
        idle_after: settings.lane_idle,
        ..LaneConfig::default()
    };
    Ok(PollingRunner::new(
        transport,
        handler,
        lanes,
        PollBackoff::default(),
    ))
}
