mod app;

use std::sync::Arc;

use eframe::{egui, NativeOptions};
use news_core::{AppConfig, AppState, Store, StoreContext};
use reqwest::{redirect, ClientBuilder};
use tokio::runtime::Runtime;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::app::{apply_theme, AppInit, NewsApp};

fn main() -> eframe::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let runtime = Arc::new(Runtime::new().expect("failed to initialise Tokio runtime"));
    let client = ClientBuilder::new()
        .redirect(redirect::Policy::limited(5))
        .user_agent("newsdesk/0.1")
        .build()
        .expect("failed to build HTTP client");

    let context = StoreContext {
        runtime: runtime.handle().clone(),
        client,
        base_url: base_url(&config),
        fetch: config.fetch_config(),
    };
    let store = Store::start(AppState::seeded(config.source.seed_filter.clone()), context);

    let init = AppInit {
        runtime,
        store,
        theme: config.theme.clone(),
        ui: config.ui.clone(),
    };

    eframe::run_native(
        "newsdesk",
        NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([960.0, 640.0])
                .with_min_inner_size([600.0, 400.0]),
            ..Default::default()
        },
        Box::new(move |cc| {
            apply_theme(&cc.egui_ctx, &init.theme, &init.ui);
            Box::new(NewsApp::new(init))
        }),
    )
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn base_url(config: &AppConfig) -> Url {
    match config.base_url() {
        Ok(url) => url,
        Err(e) => {
            warn!(error = %e, base_url = %config.source.base_url, "invalid base url, using default");
            Url::parse(news_core::config::DEFAULT_BASE_URL).expect("default base url is valid")
        }
    }
}
