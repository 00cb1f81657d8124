mod common;

use common::{follow_first_model_link, seed_alpine_collision, TestEnv};

#[tokio::test]
async fn brands_are_listed_by_title_without_hidden_ones() {
    let env = TestEnv::start().await;
    let server = env.server();

    let brands: Vec<serde_json::Value> = server.get("/api/v1/brands").await.json();
    let titles: Vec<&str> = brands.iter().map(|b| b["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Ferrari", "Lamborghini", "Porsche"]);
}

#[tokio::test]
async fn brand_detail_includes_visible_models() {
    let env = TestEnv::start().await;
    let server = env.server();

    let detail: serde_json::Value = server.get("/api/v1/brands/ferrari").await.json();
    assert_eq!(detail["brand"]["country_of_origin"], "Italy");
    let models: Vec<&str> = detail["models"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap())
        .collect();
    assert_eq!(models, vec!["458", "Roma", "SF90 Stradale"]);
}

#[tokio::test]
async fn hidden_or_unknown_brand_is_not_found() {
    let env = TestEnv::start().await;
    let server = env.server_permissive();

    let hidden = server.get("/api/v1/brands/lancia").await;
    hidden.assert_status_not_found();
    hidden.assert_json(&serde_json::json!({ "error": "Brand not found" }));

    server.get("/api/v1/brands/trabant").await.assert_status_not_found();
}

#[tokio::test]
async fn search_result_links_resolve_to_models() {
    let env = TestEnv::start().await;
    let server = env.server();

    // Search links models as /brands/{parentBrandTitle}/{url}.
    let body = env.search(&server, "sf90").await;
    let result = &body["results"][0];
    let path = format!(
        "/api/v1/brands/{}/{}",
        result["parentBrandTitle"].as_str().unwrap(),
        result["url"].as_str().unwrap()
    );

    let detail: serde_json::Value = server.get(&path).await.json();
    assert_eq!(detail["model"]["title"], "SF90 Stradale");
    assert_eq!(detail["brand"]["id"], "ferrari");

    // Catalog pages link the same model by brand url.
    server
        .get("/api/v1/brands/ferrari/sf90-stradale")
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn title_link_resolves_when_another_brand_owns_that_url() {
    let env = TestEnv::start().await;
    seed_alpine_collision(env.catalog.as_ref()).await;
    let server = env.server();

    let detail = follow_first_model_link(&env, &server, "a110").await;
    assert_eq!(detail["brand"]["id"], "renault-alpine");
    assert_eq!(detail["model"]["id"], "renault-alpine-a110");
}

#[tokio::test]
async fn hidden_model_is_not_found() {
    let env = TestEnv::start().await;
    let server = env.server_permissive();

    let response = server.get("/api/v1/brands/ferrari/f80").await;
    response.assert_status_not_found();
    response.assert_json(&serde_json::json!({ "error": "Model not found" }));
}

#[tokio::test]
async fn dealers_are_listed_and_fetched_by_url() {
    let env = TestEnv::start().await;
    let server = env.server();

    let dealers: Vec<serde_json::Value> = server.get("/api/v1/dealers").await.json();
    let names: Vec<&str> = dealers.iter().map(|d| d["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec!["Modena Motori", "Riviera Supercars", "Stuttgart Sportwagen"]
    );

    let dealer: serde_json::Value = server.get("/api/v1/dealers/riviera-supercars").await.json();
    assert_eq!(dealer["city"], "Nice");

    env.server_permissive()
        .get("/api/v1/dealers/nowhere")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn page_is_rendered_to_html() {
    let env = TestEnv::start().await;
    let server = env.server();

    let page: serde_json::Value = server.get("/api/v1/pages/about").await.json();
    assert_eq!(page["title"], "About");
    let html = page["html"].as_str().unwrap();
    assert!(html.contains("<h1>About Chaos Escape</h1>"));
    assert!(html.contains("<table>"));

    env.server_permissive()
        .get("/api/v1/pages/missing")
        .await
        .assert_status_not_found();
}
