use wayfarer::config::Config;
use wayfarer::engine::Engine;
use wayfarer::server::serve;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::from_env().expect("Failed to load configuration");
    let engine = Engine::from_config(&config);

    if let Err(err) = serve(engine, config.bind_addr).await {
        tracing::error!("server stopped: {}", err);
        std::process::exit(1);
    }
}
