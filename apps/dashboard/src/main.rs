use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use client_core::{
    ConfirmationPrompt, DashboardController, HttpProductApi, InMemorySessionStore, Notifier,
    ProductStore, SessionStore, NOTIFICATION_AUTO_DISMISS,
};
use shared::domain::{CategoryCatalog, ProductId};
use tracing::{error, info};

mod config;

#[derive(Parser, Debug)]
struct Args {
    /// Overrides API_BASE_URL from the environment.
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    /// Free-text filter applied to the listing.
    #[arg(long, default_value = "")]
    query: String,
    /// Ask to delete this product id after listing.
    #[arg(long)]
    delete: Option<String>,
}

struct StdinPrompt;

#[async_trait]
impl ConfirmationPrompt for StdinPrompt {
    async fn confirm(&self, message: &str) -> bool {
        println!("{message} [s/N]");
        let answer = tokio::task::spawn_blocking(|| {
            let mut line = String::new();
            std::io::stdin().read_line(&mut line).map(|_| line)
        })
        .await;
        matches!(
            answer,
            Ok(Ok(line)) if matches!(line.trim().to_lowercase().as_str(), "s" | "sim" | "y" | "yes")
        )
    }
}

struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(auto_dismiss_secs = NOTIFICATION_AUTO_DISMISS.as_secs(), "{message}");
    }

    fn error(&self, message: &str) {
        error!(auto_dismiss_secs = NOTIFICATION_AUTO_DISMISS.as_secs(), "{message}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();
    let settings = config::load_settings();
    let base_url = args.server_url.unwrap_or(settings.api_base_url);

    let session: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let api = HttpProductApi::new(&base_url, Arc::clone(&session))?;
    api.login(&args.email, &args.password).await?;

    let store = Arc::new(ProductStore::new(api));
    let mut controller = DashboardController::new(
        Arc::clone(&store),
        Arc::new(StdinPrompt),
        Arc::new(TracingNotifier),
    );

    store.refresh().await?;

    let categories = CategoryCatalog::new(["Móveis", "Eletrônicos", "Decoração", "Vestuário"]);
    println!("Categorias: {}", categories.labels().join(", "));

    for product in controller.search(&args.query).await {
        println!(
            "{}  {}  R$ {:.2}  {}  {}",
            product.id,
            product.name,
            product.price,
            product.status.label(),
            product.condition.label()
        );
    }

    if let Some(id) = args.delete {
        let _ = controller.request_delete(&ProductId::new(id)).await?;
    }

    Ok(())
}
