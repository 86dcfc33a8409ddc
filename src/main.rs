use ::std::sync::Arc;

use ::log::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn ::std::error::Error>> {
    ::dotenvy::dotenv().ok();
    ::env_logger::init();

    let config = ::verses::config::Config::from_env()?;

    info!(
        "Starting verses {} with {:?} backend",
        ::verses::version::VERSION,
        config.store_interface
    );

    let store = ::verses::store::make_store(&config)?;
    let accounts = ::verses::accounts::make_provider(&config)?;

    let repository = ::verses::repository::Repository::new(
        store,
        accounts,
        config.collections(),
    );

    let state = Arc::new(::verses::State::new(repository));

    let routes = ::verses::routes::api(state);

    let (address, server) = ::warp::serve(routes)
        .try_bind_with_graceful_shutdown(
            ([0, 0, 0, 0], config.http_port_api),
            async {
                if let Err(err) = ::tokio::signal::ctrl_c().await {
                    error!("failed to listen for shutdown signal: {}", err);
                }
                info!("shutting down");
            },
        )?;

    info!("API listening on {}", address);

    server.await;

    Ok(())
}
