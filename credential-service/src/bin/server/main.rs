use std::sync::Arc;

use auth::Authenticator;
use chrono::Duration;
use credential_service::config::Config;
use credential_service::domain::account::ports::AccountRepository;
use credential_service::domain::account::service::CredentialService;
use credential_service::inbound::grpc::CredentialGrpcService;
use credential_service::inbound::http::router::create_router;
use credential_service::outbound::repositories::InMemoryAccountRepository;
use credential_service::outbound::repositories::PostgresAccountRepository;
use credential_service::proto::credential_service_server::CredentialServiceServer;
use credential_service::server::run_servers;
use sqlx::postgres::PgPoolOptions;
use tonic::transport::Server;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "credential_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "credential-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        grpc_port = config.server.grpc_port,
        token_lifetime_hours = config.jwt.expiration_hours,
        max_concurrent_hashes = config.hashing.max_concurrent,
        persistent = config.database.is_some(),
        "Configuration loaded"
    );

    match &config.database {
        Some(database) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(database.max_connections)
                .connect(&database.url)
                .await?;
            tracing::info!(
                max_connections = database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            serve(&config, Arc::new(PostgresAccountRepository::new(pg_pool))).await
        }
        None => {
            tracing::warn!("No database configured, accounts are kept in memory");
            serve(&config, Arc::new(InMemoryAccountRepository::new())).await
        }
    }
}

async fn serve<AR: AccountRepository>(
    config: &Config,
    repository: Arc<AR>,
) -> Result<(), anyhow::Error> {
    let authenticator = Arc::new(Authenticator::with_token_lifetime(
        config.jwt.secret.as_bytes(),
        Duration::hours(config.jwt.expiration_hours),
    ));

    let credential_service = Arc::new(CredentialService::new(
        repository,
        authenticator,
        config.hashing.max_concurrent,
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(Arc::clone(&credential_service));
    let http_server =
        tokio::spawn(async move { axum::serve(http_listener, http_application).await });

    let grpc_address = format!("0.0.0.0:{}", config.server.grpc_port).parse()?;
    let grpc_service = CredentialGrpcService::new(Arc::clone(&credential_service));
    tracing::info!(
        address = %grpc_address,
        port = config.server.grpc_port,
        protocol = "grpc",
        "gRpc server listening"
    );

    let grpc_server = tokio::spawn(async move {
        Server::builder()
            .add_service(CredentialServiceServer::new(grpc_service))
            .serve(grpc_address)
            .await
    });

    if let Err(e) = run_servers(http_server, grpc_server).await {
        tracing::error!(error = ?e, "Server stopped");
        return Err(e);
    }

    tracing::info!("Servers exited successfully");
    Ok(())
}
