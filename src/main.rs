use clap::Parser;
use funding_trail::application::checkout::CheckoutWorkflow;
use funding_trail::config::Config;
use funding_trail::domain::ports::{
    CheckoutStoreBox, NotificationSenderBox, PaymentGatewayBox, ProgramStore, UserStore,
};
use funding_trail::infrastructure::gateway::HttpPaymentGateway;
use funding_trail::infrastructure::in_memory::{
    InMemoryCheckoutStore, InMemoryProgramStore, InMemoryUserStore,
};
use funding_trail::infrastructure::mailer::SmtpNotifier;
use funding_trail::interfaces::http::{AppState, build_router};
use miette::{IntoDiagnostic, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Listen address override (otherwise FUNDING_BIND, default 0.0.0.0:4000)
    #[arg(long)]
    bind: Option<String>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[cfg(feature = "storage-rocksdb")]
    #[arg(long)]
    db_path: Option<std::path::PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

type Stores = (
    Arc<dyn ProgramStore>,
    Arc<dyn UserStore>,
    CheckoutStoreBox,
);

fn in_memory_stores() -> Stores {
    (
        Arc::new(InMemoryProgramStore::new()),
        Arc::new(InMemoryUserStore::new()),
        Box::new(InMemoryCheckoutStore::new()),
    )
}

#[cfg(feature = "storage-rocksdb")]
fn build_stores(cli: &Cli) -> Result<Stores> {
    use funding_trail::infrastructure::rocksdb::RocksDBStore;

    if let Some(db_path) = &cli.db_path {
        // One RocksDB handle backs all three stores.
        let store = RocksDBStore::open(db_path).into_diagnostic()?;
        return Ok((
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Box::new(store),
        ));
    }
    Ok(in_memory_stores())
}

#[cfg(not(feature = "storage-rocksdb"))]
fn build_stores(_cli: &Cli) -> Result<Stores> {
    Ok(in_memory_stores())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = Config::from_env();

    if config.gateway.base_url.is_empty() {
        warn!("FUNDING_GATEWAY_URL is not set; checkout charges will fail");
    }

    let (programs, users, checkouts) = build_stores(&cli)?;

    let gateway: PaymentGatewayBox = Box::new(HttpPaymentGateway::new(&config.gateway));
    let notifier: NotificationSenderBox =
        Box::new(SmtpNotifier::new(&config.mail).into_diagnostic()?);
    let workflow = CheckoutWorkflow::new(gateway, notifier, checkouts);

    let state = AppState::new(
        Arc::new(workflow),
        programs,
        users,
        config.cors_allowed_origins.clone(),
    );
    let app = build_router(state);

    let bind_addr = cli.bind.unwrap_or(config.bind_addr);
    let listener = TcpListener::bind(&bind_addr).await.into_diagnostic()?;
    info!("funding-trail listening on {bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .into_diagnostic()
}
