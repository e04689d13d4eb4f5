mod errors;
mod logging;
mod initialization;
mod handlers;
mod manager_dataset;
mod manager_statistics;
mod models;

use actix_web::{middleware, web, App, HttpServer};
use actix_files::Files;
use log::info;
use crate::errors::UnrecoverableError;
use crate::handlers::{
    get_data, get_day_average, get_global_average, get_localities,
    get_locality_average, get_range_extremes, get_threshold_filter, get_weekly_summary,
};
use crate::initialization::config;
use crate::manager_dataset::load_dataset;
use crate::models::Dataset;

struct AppState {
    dataset: Dataset,
}

#[actix_web::main]
async fn main() -> Result<(), UnrecoverableError> {
    logging::setup_logger()?;
    let config = config()?;

    // The dataset is loaded exactly once, before the server binds. A failed
    // load keeps the process from serving at all.
    let dataset = load_dataset(&config.files.data_file)?;
    info!("loaded {} localities from {}", dataset.localities.len(), config.files.data_file);

    let web_data = web::Data::new(AppState { dataset });
    let static_dir = config.files.static_dir.clone();

    info!("starting web server");
    HttpServer::new(move || {
        App::new()
            .app_data(web_data.clone())
            .service(get_data)
            .service(get_localities)
            .service(get_global_average)
            .service(get_locality_average)
            .service(get_day_average)
            .service(get_threshold_filter)
            .service(get_weekly_summary)
            .service(get_range_extremes)
            .service(
                web::scope("")
                    .wrap(middleware::DefaultHeaders::new().add(("Cache-Control", "no-cache")))
                    .service(Files::new("/", static_dir.as_str()).index_file("index.html"))
            )
    })
        .bind((config.web_server.bind_address.as_str(), config.web_server.bind_port))?
        .disable_signals()
        .run()
        .await?;

    Ok(())
}
