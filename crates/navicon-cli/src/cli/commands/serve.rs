//! `navicon serve` – run the HTTP server.

use anyhow::Result;
use navicon_core::config::NaviconConfig;
use navicon_core::server::{self, AppState};
use navicon_core::store::Store;

pub async fn run_serve(store: Store, cfg: &NaviconConfig, addr: &str) -> Result<()> {
    let state = AppState::new(store, cfg);
    println!("Serving icons at http://{addr}{}/{{id}}", cfg.icon_route());
    server::serve(addr, state).await
}
