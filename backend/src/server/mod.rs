//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerSettings;

use std::net::SocketAddr;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use bloglist::Trace;
#[cfg(debug_assertions)]
use bloglist::doc::ApiDoc;
use bloglist::inbound::http::blogs::{create_blog, delete_blog, get_blog, list_blogs, update_blog};
use bloglist::inbound::http::health::{HealthState, live, ready};
use bloglist::inbound::http::state::HttpState;
use bloglist::inbound::http::users::{create_user, list_users};
use bloglist::inbound::http::validation::json_config;
use bloglist::outbound::persistence::{DbPool, PoolConfig, apply_migrations};
use state_builders::build_http_state;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Listen on `bind_addr` with the in-memory store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
        }
    }

    /// Back the repositories with PostgreSQL instead of the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}

/// Translate settings into a [`ServerConfig`], migrating and connecting to
/// PostgreSQL when a database URL is configured.
///
/// # Errors
/// Returns [`std::io::Error`] when the bind address or pool size is invalid, migrations
/// fail or the pool cannot be built.
pub async fn prepare_config(settings: &ServerSettings) -> std::io::Result<ServerConfig> {
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let config = ServerConfig::new(bind_addr);

    let Some(url) = settings.database_url() else {
        warn!("no database URL configured; using the in-memory store");
        return Ok(config);
    };

    let max_connections = settings
        .db_max_connections()
        .map_err(std::io::Error::other)?;

    let migration_url = url.to_owned();
    tokio::task::spawn_blocking(move || apply_migrations(&migration_url))
        .await
        .map_err(std::io::Error::other)?
        .map_err(std::io::Error::other)?;

    let pool = DbPool::new(PoolConfig::new(url).with_max_size(max_connections.get()))
        .await
        .map_err(std::io::Error::other)?;
    info!(max_connections = max_connections.get(), "database pool ready");
    Ok(config.with_db_pool(pool))
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let api = web::scope("/api")
        .service(list_blogs)
        .service(get_blog)
        .service(create_blog)
        .service(update_blog)
        .service(delete_blog)
        .service(list_users)
        .service(create_user);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config));
    let bind_addr = config.bind_addr;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "server listening");
    health_state.mark_ready();
    Ok(server)
}
