#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use axum::Router;
    use chaos_escape::api;
    use chaos_escape::app::{shell, App};
    use chaos_escape::config::AppConfig;
    use chaos_escape::db::memory::InMemoryCatalog;
    use chaos_escape::db::page_repository::{MongoPageRepository, PageRepository};
    use chaos_escape::db::repository::{CatalogRepository, MongoCatalogRepository};
    use chaos_escape::state::AppState;
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use std::sync::Arc;
    use tower_http::services::ServeDir;
    use tower_http::trace::TraceLayer;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chaos_escape=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("Starting Chaos Escape server...");

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Load Leptos options from Cargo.toml metadata
    let conf = get_configuration(None).context("Failed to read Leptos configuration")?;
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let site_root = leptos_options.site_root.to_string();

    let (catalog_repo, page_repo): (Arc<dyn CatalogRepository>, Arc<dyn PageRepository>) =
        if config.demo_mode {
            tracing::info!("Demo mode: using the in-memory catalog");
            let catalog = Arc::new(InMemoryCatalog::new());
            let catalog_repo: Arc<dyn CatalogRepository> = catalog.clone();
            let page_repo: Arc<dyn PageRepository> = catalog;
            (catalog_repo, page_repo)
        } else {
            let mongo_client = mongodb::Client::with_uri_str(&config.mongodb_uri)
                .await
                .context("Failed to connect to MongoDB")?;
            let mongo_db = mongo_client.database(&config.mongodb_database);
            tracing::info!("Connected to MongoDB at {}", config.mongodb_uri);
            let catalog_repo: Arc<dyn CatalogRepository> =
                Arc::new(MongoCatalogRepository::new(&mongo_db));
            let page_repo: Arc<dyn PageRepository> = Arc::new(MongoPageRepository::new(&mongo_db));
            (catalog_repo, page_repo)
        };

    if config.should_seed() {
        chaos_escape::demo_seeder::seed_demo_data(catalog_repo.as_ref(), page_repo.as_ref())
            .await
            .context("Failed to seed demo data")?;
    }

    let app_state = AppState {
        catalog_repo,
        page_repo,
        service_token: config.service_token.clone(),
        leptos_options: leptos_options.clone(),
    };

    // Generate the Leptos route list for SSR
    let routes = generate_route_list(App);

    let app = Router::new()
        .merge(api::routes::api_routes())
        // Leptos SSR routes, with the state available to server functions
        .leptos_routes_with_context(
            &app_state,
            routes,
            {
                let app_state = app_state.clone();
                move || provide_context(app_state.clone())
            },
            {
                let leptos_options = leptos_options.clone();
                move || shell(leptos_options.clone())
            },
        )
        .fallback_service(ServeDir::new(&site_root))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

// When compiled for WASM (client-side), there's no main function.
// The hydrate() function in lib.rs handles client-side initialization.
#[cfg(not(feature = "ssr"))]
fn main() {}
