use axum::{
    extract::State,
    handler::Handler,
    http::StatusCode,
    middleware::from_fn,
    response::{IntoResponse, Json},
    routing::{delete, get, post, put},
    Router,
};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use commerce_api_rust::config;
use commerce_api_rust::database::{self, AppState};
use commerce_api_rust::handlers::{products, users};
use commerce_api_rust::middleware::{authenticate, require_admin, require_user};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting Commerce API in {:?} mode", config.environment);

    let pool = match database::pool::connect(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database connection failed: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = database::pool::migrate(&pool).await {
        tracing::error!("Database migration failed: {}", e);
        std::process::exit(1);
    }

    let app = app(AppState { pool });

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Commerce API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1", get(api_info))
        .route("/api/v1/health", get(health))
        .nest("/api/v1/products", product_routes())
        .nest("/api/v1/users", user_routes())
        // Uniform envelope for unmatched routes
        .fallback(route_not_found)
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn product_routes() -> Router<AppState> {
    // Admin mutations share paths with the public reads, so their auth chain
    // (authenticate, then require_admin) is applied per handler.
    Router::new()
        .route(
            "/",
            get(products::list_products).post(
                products::create_product
                    .layer(from_fn(require_admin))
                    .layer(from_fn(authenticate)),
            ),
        )
        .route("/category/:category_id", get(products::get_products_by_category))
        .route(
            "/:id",
            get(products::get_product)
                .put(
                    products::update_product
                        .layer(from_fn(require_admin))
                        .layer(from_fn(authenticate)),
                )
                .delete(
                    products::delete_product
                        .layer(from_fn(require_admin))
                        .layer(from_fn(authenticate)),
                ),
        )
        .route(
            "/:id/permanent",
            delete(
                products::hard_delete_product
                    .layer(from_fn(require_admin))
                    .layer(from_fn(authenticate)),
            ),
        )
}

fn user_routes() -> Router<AppState> {
    let public = Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login));

    // Layers added later run first, so authenticate precedes the role check
    let profile = Router::new()
        .route("/profile", get(users::get_profile).put(users::update_profile))
        .route_layer(from_fn(require_user))
        .route_layer(from_fn(authenticate));

    let admin = Router::new()
        .route("/", get(users::get_all_users))
        .route("/:id", put(users::update_user))
        .route_layer(from_fn(require_admin))
        .route_layer(from_fn(authenticate));

    public.merge(profile).merge(admin)
}

async fn api_info() -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "message": "E-commerce API v1",
        "data": {
            "name": "Commerce API (Rust)",
            "version": version,
            "endpoints": [
                "POST /api/v1/users/register - Register new user",
                "POST /api/v1/users/login - User login",
                "GET /api/v1/users/profile - Get own profile (auth required)",
                "PUT /api/v1/users/profile - Update own profile (auth required)",
                "GET /api/v1/users - List users (admin)",
                "PUT /api/v1/users/:id - Update user role/activation (admin)",
                "GET /api/v1/products - Browse active products",
                "GET /api/v1/products/:id - View product details",
                "GET /api/v1/products/category/:categoryId - Browse by category",
                "POST /api/v1/products - Create product (admin)",
                "PUT /api/v1/products/:id - Update product (admin)",
                "DELETE /api/v1/products/:id - Soft-delete product (admin)",
                "DELETE /api/v1/products/:id/permanent - Permanently delete product (admin)",
                "GET /api/v1/health - Health check",
            ],
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match database::pool::health_check(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "API is healthy",
                "data": {
                    "status": "healthy",
                    "timestamp": now,
                    "database": "connected"
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "message": "API is unhealthy",
                    "error": "database unavailable"
                })),
            )
        }
    }
}

async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "message": "Route not found"
        })),
    )
}
