/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use askbase_api::{app::AppState, config::Config};
/// use askbase_shared::render::{AnswerScrubber, MarkdownRenderer};
/// use askbase_shared::store::postgres::PgStore;
/// use sqlx::PgPool;
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(
///     Arc::new(PgStore::new(pool)),
///     MarkdownRenderer::new(),
///     AnswerScrubber::new(),
///     config,
/// );
/// let app = askbase_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError, middleware::security::SecurityHeadersLayer};
use askbase_shared::{
    auth::middleware::{authenticate, AuthError},
    render::{AnswerScrubber, MarkdownRenderer},
    store::Store,
};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, Level};

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Every field is behind an `Arc`, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Persistence backend
    pub store: Arc<dyn Store>,

    /// Markdown renderer for answer bodies
    pub renderer: Arc<MarkdownRenderer>,

    /// HTML scrubber applied to rendered bodies
    pub scrubber: Arc<AnswerScrubber>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(
        store: Arc<dyn Store>,
        renderer: MarkdownRenderer,
        scrubber: AnswerScrubber,
        config: Config,
    ) -> Self {
        Self {
            store,
            renderer: Arc::new(renderer),
            scrubber: Arc::new(scrubber),
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token validation
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET   /health                          # Health check (public)
/// ├── GET   /questions?page=N                # Paginated list (public)
/// ├── GET   /questions/tagged?tag=T          # Tag filter (public)
/// ├── GET   /questions/:id                   # Question with answers (public)
/// ├── GET   /questions/:id/answers/new       # New answer form (authenticated)
/// ├── POST  /questions/:id/answers           # Create answer (authenticated)
/// ├── GET   /answers/:id/edit                # Edit form (authenticated)
/// ├── PATCH /answers/:id                     # Update answer (authenticated)
/// ├── POST  /answers/:id/delete              # Soft-delete (authenticated)
/// └── POST  /answers/:id/undelete            # Restore (authenticated)
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Authentication (answer routes only)
/// 2. Logging (tower-http TraceLayer)
/// 3. CORS (tower-http CorsLayer)
/// 4. Security headers
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/questions", get(routes::questions::index))
        .route("/questions/tagged", get(routes::questions::tagged))
        .route("/questions/:id", get(routes::questions::show));

    // Answer routes require a signed-in user
    let answer_routes = Router::new()
        .route("/questions/:id/answers/new", get(routes::answers::new_answer))
        .route("/questions/:id/answers", post(routes::answers::create))
        .route("/answers/:id/edit", get(routes::answers::edit))
        .route("/answers/:id", patch(routes::answers::update))
        .route("/answers/:id/delete", post(routes::answers::destroy))
        .route("/answers/:id/undelete", post(routes::answers::undelete))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.iter().any(|o| o == "*") {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(public_routes)
        .merge(answer_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

/// JWT authentication middleware layer
///
/// Validates the bearer token, confirms the user still exists, then injects
/// `AuthContext` into request extensions. Requests without any credentials
/// are redirected to the sign-in page.
async fn jwt_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth = match authenticate(req.headers(), state.jwt_secret()) {
        Ok(auth) => auth,
        Err(AuthError::MissingCredentials) => {
            debug!(path = %req.uri().path(), "No credentials, redirecting to sign in");
            return Err(ApiError::LoginRequired {
                login_path: state.config.api.login_path.clone(),
            });
        }
        Err(e) => {
            debug!(error = %e, "Rejected bearer token");
            return Err(e.into());
        }
    };

    if state.store.find_user(auth.user_id).await?.is_none() {
        debug!(user_id = auth.user_id, "Token subject does not exist");
        return Err(ApiError::Unauthorized("Unknown user".to_string()));
    }

    req.extensions_mut().insert(auth);

    Ok(next.run(req).await)
}
