//! Application state and router construction

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, MethodRouter},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::Pagination;
use crate::config::{AppConfig, StoreBackend};
use crate::database::{DatabaseError, DatabaseManager, ItemStore, MemoryItemStore, PgItemStore};
use crate::handlers::{docs, items, system};
use crate::middleware::cors_layer;
use crate::models::Resource;
use crate::services::ItemService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    collections: ItemService,
    collectives: ItemService,
}

impl AppState {
    /// Build state with one store per resource
    pub fn with_stores<F>(config: AppConfig, mut make_store: F) -> Result<Self, DatabaseError>
    where
        F: FnMut(Resource) -> Result<Arc<dyn ItemStore>, DatabaseError>,
    {
        let collections = make_store(Resource::Collection)?;
        let collectives = make_store(Resource::Collective)?;
        Ok(Self::assemble(config, collections, collectives))
    }

    /// Fresh in-memory stores, regardless of the configured backend
    pub fn in_memory(config: AppConfig) -> Self {
        Self::assemble(
            config,
            Arc::new(MemoryItemStore::new()),
            Arc::new(MemoryItemStore::new()),
        )
    }

    fn assemble(
        config: AppConfig,
        collections: Arc<dyn ItemStore>,
        collectives: Arc<dyn ItemStore>,
    ) -> Self {
        let pagination = Pagination::from(&config.api);
        let collections = ItemService::new(Resource::Collection, collections, pagination);
        let collectives = ItemService::new(Resource::Collective, collectives, pagination);
        Self {
            inner: Arc::new(AppStateInner { config, collections, collectives }),
        }
    }

    /// Open the configured backend, creating PostgreSQL tables as needed
    pub async fn connect(config: AppConfig) -> Result<Self, DatabaseError> {
        match config.database.backend {
            StoreBackend::Memory => {
                info!("Using in-memory document store");
                Ok(Self::in_memory(config))
            }
            StoreBackend::Postgres => {
                let pool = DatabaseManager::connect(&config.database).await?;
                for resource in Resource::ALL {
                    DatabaseManager::ensure_table(&pool, resource.table_name()).await?;
                }
                Self::with_stores(config, |resource| {
                    let store = PgItemStore::new(resource.table_name(), pool.clone())?;
                    Ok(Arc::new(store) as Arc<dyn ItemStore>)
                })
            }
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn service(&self, resource: Resource) -> &ItemService {
        match resource {
            Resource::Collection => &self.inner.collections,
            Resource::Collective => &self.inner.collectives,
        }
    }

    pub fn services(&self) -> impl Iterator<Item = &ItemService> {
        Resource::ALL.into_iter().map(move |r| self.service(r))
    }
}

/// Create the Axum router with all routes and middleware
pub fn router(state: AppState) -> Router {
    let config = state.config().clone();

    let mut app = Router::new()
        .route("/", allow(get(system::root)))
        .route("/health", allow(get(system::health)))
        .with_state(state.clone())
        .merge(docs_routes());

    for resource in Resource::ALL {
        app = app.merge(item_routes(state.service(resource).clone()));
    }

    // Middleware stack
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    let app = app.fallback(system::not_found);
    let app = if config.security.enable_cors {
        app.layer(cors_layer(&config.security))
    } else {
        app
    };
    app.layer(middleware)
}

/// Routes for one resource family, e.g. `/collectives`, `/collectives/groups`, `/collectives/:name`
fn item_routes(service: ItemService) -> Router {
    let base = service.resource().base_path();

    Router::new()
        .route(base, allow(get(items::collection_get).post(items::collection_post)))
        // Static segment wins over `:name`
        .route(&format!("{}/groups", base), allow(get(items::groups_get)))
        .route(
            &format!("{}/:name", base),
            allow(
                get(items::record_get)
                    .patch(items::record_patch)
                    .delete(items::record_delete),
            ),
        )
        .with_state(service)
}

fn docs_routes() -> Router {
    Router::new()
        .route("/api-docs", allow(get(docs::ui)))
        .route("/api-docs/openapi.json", allow(get(docs::json)))
        .route("/api-docs/openapi.yaml", allow(get(docs::yaml)))
}

/// Structured 405 for methods a matched path doesn't support
fn allow<S>(methods: MethodRouter<S>) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    methods.fallback(system::method_not_allowed)
}
