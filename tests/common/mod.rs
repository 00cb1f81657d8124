#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::mongo::Mongo;

use chaos_escape::api::routes::api_routes;
use chaos_escape::db::memory::InMemoryCatalog;
use chaos_escape::db::page_repository::{MongoPageRepository, PageRepository};
use chaos_escape::db::repository::{CatalogRepository, MongoCatalogRepository};
use chaos_escape::state::AppState;

pub const TEST_TOKEN: &str = "test-token";

/// Holds the repositories and the Axum router for integration tests.
///
/// When backed by MongoDB the container is kept alive for as long as this
/// struct lives and is cleaned up on drop.
pub struct TestEnv {
    _mongo: Option<ContainerAsync<Mongo>>,
    pub router: Router,
    pub catalog: Arc<dyn CatalogRepository>,
    pub pages: Arc<dyn PageRepository>,
}

impl TestEnv {
    /// An environment on the in-memory catalog, seeded with the demo data.
    pub async fn start() -> Self {
        let catalog = Arc::new(InMemoryCatalog::new());
        let env = Self::build(None, catalog.clone(), catalog);
        env.seed().await;
        env
    }

    /// An environment on a real MongoDB container, seeded with the demo data.
    pub async fn start_mongo() -> Self {
        let mongo_container = Mongo::default()
            .start()
            .await
            .expect("Failed to start MongoDB container");
        let mongo_port = mongo_container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");
        let mongo_uri = format!("mongodb://127.0.0.1:{}", mongo_port);
        let mongo_client = mongodb::Client::with_uri_str(&mongo_uri)
            .await
            .expect("Failed to connect to MongoDB");
        let mongo_db = mongo_client.database("chaos_escape_test");

        let catalog: Arc<dyn CatalogRepository> =
            Arc::new(MongoCatalogRepository::new(&mongo_db));
        let pages: Arc<dyn PageRepository> = Arc::new(MongoPageRepository::new(&mongo_db));

        let env = Self::build(Some(mongo_container), catalog, pages);
        env.seed().await;
        env
    }

    /// Build a router (API routes only, no Leptos SSR) around custom repositories.
    pub fn build(
        mongo: Option<ContainerAsync<Mongo>>,
        catalog: Arc<dyn CatalogRepository>,
        pages: Arc<dyn PageRepository>,
    ) -> Self {
        let leptos_options = leptos::prelude::LeptosOptions::builder()
            .output_name("chaos-escape")
            .build();

        let app_state = AppState {
            catalog_repo: catalog.clone(),
            page_repo: pages.clone(),
            service_token: TEST_TOKEN.to_string(),
            leptos_options,
        };

        let router = api_routes().with_state(app_state);

        Self {
            _mongo: mongo,
            router,
            catalog,
            pages,
        }
    }

    async fn seed(&self) {
        chaos_escape::demo_seeder::seed_demo_data(self.catalog.as_ref(), self.pages.as_ref())
            .await
            .expect("Failed to seed demo data");
    }

    /// Build an `axum_test::TestServer` from this environment's router.
    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .expect_success_by_default()
            .build(self.router.clone())
    }

    /// Build a `TestServer` that does NOT expect success by default (for error tests).
    pub fn server_permissive(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .build(self.router.clone())
    }

    /// Helper: run a search and return the JSON body.
    pub async fn search(&self, server: &axum_test::TestServer, term: &str) -> serde_json::Value {
        server
            .get("/api/v1/search")
            .add_query_param("search", term)
            .await
            .json()
    }
}

/// Add a visible "Alpine" brand (`renault-alpine`) with model `a110`, plus a
/// hidden brand whose url is `alpine`.
pub async fn seed_alpine_collision(catalog: &dyn CatalogRepository) {
    use chaos_escape::db::models::{Brand, Model};

    let brand = |id: &str, title: &str, visible: bool| Brand {
        id: id.to_string(),
        url: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        country_of_origin: "France".to_string(),
        logo_icon: None,
        seo: None,
        visible,
        updated_at: chrono::Utc::now(),
    };
    catalog
        .upsert_brand(brand("renault-alpine", "Alpine", true))
        .await
        .expect("Failed to insert brand");
    catalog
        .upsert_brand(brand("alpine", "Alpine Heritage", false))
        .await
        .expect("Failed to insert brand");
    catalog
        .upsert_model(Model {
            id: "renault-alpine-a110".to_string(),
            url: "a110".to_string(),
            title: "A110".to_string(),
            brand_id: "renault-alpine".to_string(),
            description: String::new(),
            visible: true,
            updated_at: chrono::Utc::now(),
        })
        .await
        .expect("Failed to insert model");
}

/// Open the API path of the first search result's link for `term`.
pub async fn follow_first_model_link(
    env: &TestEnv,
    server: &axum_test::TestServer,
    term: &str,
) -> serde_json::Value {
    let body = env.search(server, term).await;
    let result = &body["results"][0];
    assert_eq!(result["kind"], "Model");
    let path = format!(
        "/api/v1/brands/{}/{}",
        result["parentBrandTitle"].as_str().expect("model rows carry a parent"),
        result["url"].as_str().expect("rows carry a url")
    );
    server.get(&path).await.json()
}

/// `(kind, label)` of every result in a search response.
pub fn hits(body: &serde_json::Value) -> Vec<(String, String)> {
    body["results"]
        .as_array()
        .expect("results should be an array")
        .iter()
        .map(|r| {
            let kind = r["kind"].as_str().unwrap_or_default().to_string();
            let label = match r["parentBrandTitle"].as_str() {
                Some(parent) => format!("{} {}", parent, r["title"].as_str().unwrap_or_default()),
                None => r["title"].as_str().unwrap_or_default().to_string(),
            };
            (kind, label)
        })
        .collect()
}
