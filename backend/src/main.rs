mod audit;
mod config;
mod job_controller;
mod services;
mod sheet;
mod sync;
#[cfg(test)]
mod test_log;

use crate::audit::SyncLog;
use crate::config::Config;
use crate::job_controller::state::JobsState;
use crate::sheet::{CsvSheet, SheetStore};
use crate::sync::{HttpTicketClient, SyncHandler};
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;
use std::collections::HashMap;
use std::io;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::load().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let sheet: Arc<dyn SheetStore> =
        Arc::new(CsvSheet::open(&config.sheet_csv_path, config.header_row).map_err(io::Error::other)?);
    let sync_log = SyncLog::open(&config.sync_log_db).map_err(io::Error::other)?;

    // Edits flow: HTTP handler -> edits queue -> sync worker -> updates -> job updater.
    let (edits_tx, edits_rx) = mpsc::channel(100);
    let (updates_tx, updates_rx) = mpsc::channel(100);
    let jobs_state = JobsState {
        jobs: Arc::new(RwLock::new(HashMap::new())),
        edits: edits_tx,
    };

    let updater_state = jobs_state.clone();
    tokio::spawn(async move {
        job_controller::state::start_job_updater(updater_state, updates_rx).await;
    });

    let endpoint = config.ticket_endpoint();
    let sheet_name = config.sheet_name.clone();
    let header_row = config.header_row;
    let store = sheet.clone();
    job_controller::worker::spawn_sync_worker(
        move || {
            let client = HttpTicketClient::new(endpoint)?;
            Ok(SyncHandler::new(sheet_name, header_row, sheet, Box::new(client)))
        },
        store,
        sync_log.clone(),
        edits_rx,
        updates_tx,
    )?;

    info!(
        "Syncing sheet '{}' ({}) to {}",
        config.sheet_name,
        config.sheet_csv_path.display(),
        config.ticket_endpoint()
    );
    info!("Server running at http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(jobs_state.clone()))
            .app_data(web::Data::new(sync_log.clone()))
            .service(services::ack::configure_routes())
            .service(services::health::configure_routes())
            .service(services::sheet::configure_routes())
            .service(services::sync_log::configure_routes())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
