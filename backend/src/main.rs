//! Backend entry-point: wires the identify endpoint, health probes, and
//! OpenAPI docs over a PostgreSQL-backed contact store.

use std::env;
use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use backend::ApiDoc;
use backend::Trace;
use backend::domain::IdentityResolver;
use backend::domain::ports::IdentifyContact;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::identify::identify;
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{DbPool, DieselContactRepository, PoolConfig, run_migrations};

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

    let database_url = env::var("DATABASE_URL")
        .map_err(|_| std::io::Error::other("DATABASE_URL must be set"))?;
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());

    // Idempotent schema setup; must precede any query.
    let migration_url = database_url.clone();
    tokio::task::spawn_blocking(move || run_migrations(&migration_url))
        .await
        .map_err(std::io::Error::other)?
        .map_err(std::io::Error::other)?;

    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .map_err(std::io::Error::other)?;
    let contacts = Arc::new(DieselContactRepository::new(pool));
    let resolver: Arc<dyn IdentifyContact> = Arc::new(IdentityResolver::new(contacts));
    let http_state = web::Data::new(HttpState::new(resolver));

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays reachable.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(http_state.clone())
            .app_data(server_health_state.clone())
            .wrap(Trace)
            .service(identify)
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(bind_addr)?;

    health_state.mark_ready();
    server.run().await
}
