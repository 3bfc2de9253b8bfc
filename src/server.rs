use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use axum::extract::{Path as UrlPath, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use clap::Args;
use serde::Serialize;
use serde_json::json;
use tokio::net::TcpListener;

use crate::chart::spec::ChartSpec;
use crate::chart::ChartSpecBuilder;
use crate::constants::SERVER_BIND_ADDR;
use crate::loader;
use crate::logging;
use crate::model::Tab;
use crate::store::TimeSeriesStore;

#[derive(Debug, Args, Clone)]
pub struct ServeArgs {
    /// Address to bind the dashboard server on
    #[arg(long, default_value = SERVER_BIND_ADDR)]
    pub addr: SocketAddr,

    /// Directory holding the three series tables
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Directory holding static assets (overview image)
    #[arg(long, default_value = "assets")]
    pub assets_dir: PathBuf,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            addr: SERVER_BIND_ADDR.parse().expect("valid default bind addr"),
            data_dir: PathBuf::from("data"),
            assets_dir: PathBuf::from("assets"),
        }
    }
}

struct AppState {
    store: TimeSeriesStore,
    assets_dir: PathBuf,
}

/// What a selected tab renders as: the overview's static image, or a figure
/// for the plot renderer.
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum TabContent {
    Image { src: String },
    Chart { figure: ChartSpec },
}

pub async fn run(args: ServeArgs) -> Result<()> {
    let store = loader::load_dir(&args.data_dir)?;
    let state = Arc::new(AppState {
        store,
        assets_dir: args.assets_dir.clone(),
    });

    let app = Router::new()
        .route("/", get(index))
        .route("/api/tabs", get(tabs))
        .route("/api/tab/:slug", get(tab_content))
        .route("/assets/overview.png", get(overview_image))
        .with_state(state);

    let listener = TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("failed to bind dashboard server at {}", args.addr))?;
    logging::info(
        "server.bind",
        "Dashboard listening",
        json!({ "addr": args.addr.to_string() }),
    );

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("dashboard server terminated with error")?;

    logging::info_simple("server.stop", "Dashboard server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        logging::info_simple("server.shutdown", "Ctrl-c received, shutting down");
    }
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

async fn tabs(State(state): State<Arc<AppState>>) -> Json<Vec<Tab>> {
    let mut tabs = vec![Tab::Overview];
    tabs.extend(state.store.sectors().map(|name| Tab::Sector {
        name: name.to_string(),
    }));
    Json(tabs)
}

async fn tab_content(
    UrlPath(slug): UrlPath<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    match Tab::from_slug(&slug) {
        Tab::Overview => Json(TabContent::Image {
            src: "/assets/overview.png".to_string(),
        })
        .into_response(),
        Tab::Sector { name } => sector_chart(&state.store, &name),
    }
}

fn sector_chart(store: &TimeSeriesStore, sector: &str) -> Response {
    let started = Instant::now();
    match ChartSpecBuilder::new(store).build(sector) {
        Ok(figure) => {
            logging::info(
                "chart.built",
                "Chart specification built",
                json!({
                    "sector": sector,
                    "empty": figure.is_empty(),
                    "elapsed_us": started.elapsed().as_micros() as u64,
                }),
            );
            Json(TabContent::Chart { figure }).into_response()
        }
        Err(err) => {
            logging::warn(
                "chart.failed",
                "Chart build aborted",
                json!({ "sector": sector, "error": err.to_string() }),
            );
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response()
        }
    }
}

async fn overview_image(State(state): State<Arc<AppState>>) -> Response {
    let path = state.assets_dir.join("overview.png");
    match tokio::fs::read(&path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "image/png")], bytes).into_response(),
        Err(err) => {
            logging::warn(
                "assets.missing",
                "Overview image unavailable",
                json!({
                    "path": path.display().to_string(),
                    "error": err.to_string(),
                }),
            );
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
