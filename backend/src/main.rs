//! Backend entry-point: wires session settings, persistence, and routes.

use std::net::SocketAddr;

use mockable::{DefaultEnv, Env};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use backend::inbound::http::session_config::{session_settings_from_env, BuildMode};
use backend::outbound::persistence::{DbPool, PoolConfig};
use backend::server::{create_server, ServerConfig};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let env = DefaultEnv::new();
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;

    let bind_addr: SocketAddr = env
        .string("BIND_ADDR")
        .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned())
        .parse()
        .map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(session, bind_addr);
    match env.string("DATABASE_URL") {
        Some(url) => {
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .map_err(std::io::Error::other)?;
            config = config.with_db_pool(pool);
        }
        None => {
            warn!("DATABASE_URL not set; using in-memory stores");
        }
    }

    info!(addr = %bind_addr, "starting server");
    create_server(config)?.await
}
