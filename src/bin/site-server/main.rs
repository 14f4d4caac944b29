use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use manti_evi::{config::ServerConfig, page::PageState, provider::fetch_restaurant_data};
use std::sync::Arc;
use tokio::sync::watch;

mod api;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(true)
        .with_file(false)
        .pretty()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = ServerConfig::from_env()?;
    tracing::info!("starting with {:?}", config.provider);

    let (tx, rx) = watch::channel(PageState::Loading);
    let settings = config.provider.clone();
    tokio::spawn(async move {
        let data = fetch_restaurant_data(settings).await;
        if tx.send(PageState::Ready(Arc::new(data))).is_err() {
            tracing::warn!("page state receivers are gone, dropping restaurant data");
        }
    });

    let state = web::Data::new(api::ApiState::new(rx));
    let origin = config.cors_origin.clone();
    tracing::info!("listening on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::default().allowed_origin(&origin).allow_any_method())
            .service(api::index)
            .service(api::restaurant)
            .service(api::menu)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;
    Ok(())
}
