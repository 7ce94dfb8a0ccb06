use std::io;

use dotenvy::dotenv;
use storefront_service::infrastructure::inventory_source::HttpInventorySource;
use storefront_service::infrastructure::memory_store::MemoryStore;
use storefront_service::infrastructure::record_repo::DieselRecordStore;
use storefront_service::{build_server, create_pool, run_migrations, AppState, Config};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(io::Error::other)?;

    let pool = create_pool(&config.database_url).map_err(io::Error::other)?;
    run_migrations(&pool).map_err(io::Error::other)?;

    let state = AppState::new(
        DieselRecordStore::new(pool),
        MemoryStore::new(),
        HttpInventorySource::new(config.inventory_base_url.clone()),
        config.inventory_path.clone(),
    );

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(state, &config.host, config.port)?.await
}
