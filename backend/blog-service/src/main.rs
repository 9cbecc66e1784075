use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer};
use blog_service::error::AppError;
use blog_service::{auth, handlers, middleware};
use chrono::Utc;
use db_pool::{create_pool, DbConfig};
use object_store::ObjectStore;
use serde::Serialize;
use sqlx::PgPool;
use std::collections::HashMap;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct HealthState {
    db_pool: PgPool,
    store: ObjectStore,
}

#[derive(Serialize, Clone)]
#[serde(rename_all = "lowercase")]
enum ComponentStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Serialize)]
struct ComponentCheck {
    status: ComponentStatus,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
}

#[derive(Serialize)]
struct ReadinessResponse {
    ready: bool,
    status: ComponentStatus,
    checks: HashMap<String, ComponentCheck>,
    timestamp: String,
}

impl HealthState {
    async fn check_postgres(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.db_pool)
            .await
            .map(|_| ())
    }
}

async fn health_summary(state: web::Data<HealthState>) -> HttpResponse {
    match state.check_postgres().await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "blog-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "blog-service"
        })),
    }
}

async fn readiness_summary(state: web::Data<HealthState>) -> HttpResponse {
    let mut checks = HashMap::new();
    let mut ready = true;

    let start = Instant::now();
    let pg_result = state.check_postgres().await;
    let pg_latency = Some(start.elapsed().as_millis() as u64);
    let postgres_check = match pg_result {
        Ok(_) => ComponentCheck {
            status: ComponentStatus::Healthy,
            message: "PostgreSQL connection successful".to_string(),
            latency_ms: pg_latency,
        },
        Err(e) => {
            ready = false;
            ComponentCheck {
                status: ComponentStatus::Unhealthy,
                message: format!("PostgreSQL connection failed: {}", e),
                latency_ms: pg_latency,
            }
        }
    };
    checks.insert("postgresql".to_string(), postgres_check);

    // Object storage being down degrades image upload but not post CRUD,
    // so it does not gate readiness.
    let start = Instant::now();
    let store_result = state.store.health_check().await;
    let store_latency = Some(start.elapsed().as_millis() as u64);
    let storage_check = match store_result {
        Ok(_) => ComponentCheck {
            status: ComponentStatus::Healthy,
            message: "object storage reachable".to_string(),
            latency_ms: store_latency,
        },
        Err(e) => ComponentCheck {
            status: ComponentStatus::Degraded,
            message: format!("object storage check failed: {}", e),
            latency_ms: store_latency,
        },
    };
    checks.insert("object_storage".to_string(), storage_check);

    let status = if ready {
        ComponentStatus::Healthy
    } else {
        ComponentStatus::Unhealthy
    };

    let response = ReadinessResponse {
        ready,
        status,
        checks,
        timestamp: Utc::now().to_rfc3339(),
    };

    if ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = blog_service::Config::from_env()
        .map_err(|e| anyhow::anyhow!("failed to load configuration: {}", e))?;

    tracing::info!("Starting blog-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    match auth::load_validation_key() {
        Ok(public_key) => {
            auth::initialize_validation_key(&public_key)
                .map_err(|e| anyhow::anyhow!("failed to initialize JWT key: {}", e))?;
            tracing::info!("JWT validation key initialized");
        }
        Err(err) => {
            tracing::warn!(
                "JWT public key not configured ({err}); authenticated routes will reject requests"
            );
        }
    }

    // Initialize database connection pool
    let mut db_cfg = DbConfig::from_env().unwrap_or_default();
    if db_cfg.database_url.is_empty() {
        db_cfg.database_url = config.database.url.clone();
    }
    if db_cfg.max_connections < config.database.max_connections {
        db_cfg.max_connections = config.database.max_connections;
    }

    db_cfg.log_config();
    let db_pool = create_pool(db_cfg)
        .await
        .map_err(|e| anyhow::anyhow!("failed to create database pool: {}", e))?;

    tracing::info!("Connected to database via db-pool crate");

    // Apply schema migrations
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .map_err(|e| anyhow::anyhow!("failed to run migrations: {}", e))?;

    // Initialize object storage client
    let store = ObjectStore::from_env().await;
    let store_data = web::Data::new(store.clone());

    let health_state = web::Data::new(HealthState {
        db_pool: db_pool.clone(),
        store,
    });

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    HttpServer::new(move || {
        // Build CORS configuration
        let mut cors = Cors::default();
        for origin in config.cors.allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        // Malformed JSON bodies become typed 400s instead of the default
        // plain-text error.
        let json_config = web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into());

        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(store_data.clone())
            .app_data(health_state.clone())
            .app_data(json_config)
            .wrap(cors)
            .wrap(tracing_actix_web::TracingLogger::default())
            .wrap(middleware::RequestLog)
            // Health check endpoints
            .route("/api/v1/health", web::get().to(health_summary))
            .route("/api/v1/health/ready", web::get().to(readiness_summary))
            .route("/api/v1/health/live", web::get().to(liveness_check))
            // Auth provider webhook (verified upstream by the provider)
            .route(
                "/api/v1/webhooks/auth",
                web::post().to(handlers::auth_provider_webhook),
            )
            .service(
                web::scope("/api/v1")
                    .service(
                        web::scope("/posts")
                            .service(
                                web::resource("")
                                    .route(web::get().to(handlers::list_posts))
                                    .route(web::post().to(handlers::create_post)),
                            )
                            .service(
                                web::resource("/{post_id}")
                                    .route(web::get().to(handlers::get_post))
                                    .route(web::put().to(handlers::update_post))
                                    .route(web::delete().to(handlers::delete_post)),
                            ),
                    )
                    .service(
                        web::scope("/favorites").service(
                            web::resource("")
                                .route(web::post().to(handlers::toggle_favorite))
                                .route(web::get().to(handlers::list_favorites)),
                        ),
                    )
                    .service(
                        web::scope("/images").service(
                            web::resource("")
                                .route(web::post().to(handlers::upload_image))
                                .route(web::delete().to(handlers::delete_image)),
                        ),
                    ),
            )
    })
    .bind(&bind_address)?
    .workers(4)
    .run()
    .await?;

    tracing::info!("blog-service shutting down");

    Ok(())
}
