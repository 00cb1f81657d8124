//! Search and catalog behaviour against a real MongoDB (testcontainers).

mod common;

use chaos_escape::db::models::Dealer;
use common::{follow_first_model_link, hits, seed_alpine_collision, TestEnv, TEST_TOKEN};

fn strings(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, l)| (k.to_string(), l.to_string()))
        .collect()
}

#[tokio::test]
async fn mongo_search_matches_in_memory_semantics() {
    let env = TestEnv::start_mongo().await;
    let server = env.server();

    let body = env.search(&server, "Ferrari").await;
    assert_eq!(
        hits(&body),
        strings(&[
            ("Brand", "Ferrari"),
            ("Model", "Ferrari 458"),
            ("Model", "Ferrari Roma"),
            ("Model", "Ferrari SF90 Stradale"),
        ])
    );

    for term in ["ferrari 458", "458 ferrari", "FERRARI 458"] {
        let body = env.search(&server, term).await;
        assert_eq!(hits(&body), strings(&[("Model", "Ferrari 458")]), "term: {term}");
    }

    let dealers = env.search(&server, "motori").await;
    assert_eq!(hits(&dealers), strings(&[("Dealer", "Modena Motori")]));

    let none = env.search(&server, "zzzqqq").await;
    assert_eq!(none, serde_json::json!({ "state": "idle", "results": [] }));
}

#[tokio::test]
async fn mongo_search_excludes_hidden_and_escapes_patterns() {
    let env = TestEnv::start_mongo().await;
    let server = env.server();

    let lancia = env.search(&server, "lancia").await;
    assert!(hits(&lancia).iter().all(|(kind, _)| kind != "Brand"));
    assert_eq!(env.search(&server, "f80").await["results"], serde_json::json!([]));

    for term in ["f.r", ".*", "(", "fer[", "%", "\0ferrari"] {
        let body = env.search(&server, term).await;
        assert_eq!(body["results"], serde_json::json!([]), "term: {term}");
    }
}

#[tokio::test]
async fn mongo_search_is_capped_at_twenty() {
    let env = TestEnv::start_mongo().await;
    let server = env.server();

    for i in 0..25 {
        server
            .post("/api/v1/admin/brands")
            .json(&serde_json::json!({
                "service_token": TEST_TOKEN,
                "url": format!("rapid-{i:02}"),
                "title": format!("Rapid {i:02}"),
                "description": "Generated.",
                "country_of_origin": "Nowhere",
                "visible": true
            }))
            .await;
    }

    let body = env.search(&server, "rapid").await;
    let results = hits(&body);
    assert_eq!(results.len(), 20);
    assert_eq!(results[0], ("Brand".to_string(), "Rapid 00".to_string()));
    assert_eq!(results[19], ("Brand".to_string(), "Rapid 19".to_string()));
}

#[tokio::test]
async fn mongo_catalog_reads_and_page_rendering() {
    let env = TestEnv::start_mongo().await;
    let server = env.server();

    let brands: Vec<serde_json::Value> = server.get("/api/v1/brands").await.json();
    let titles: Vec<&str> = brands.iter().map(|b| b["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Ferrari", "Lamborghini", "Porsche"]);

    let model: serde_json::Value = server.get("/api/v1/brands/Ferrari/458").await.json();
    assert_eq!(model["model"]["id"], "ferrari-458");

    let page: serde_json::Value = server.get("/api/v1/pages/about").await.json();
    assert!(page["html"].as_str().unwrap().contains("<h1>About Chaos Escape</h1>"));
}

#[tokio::test]
async fn mongo_accented_titles_sort_like_in_memory() {
    let env = TestEnv::start_mongo().await;
    for (id, name) in [
        ("d-zagato", "Zagato Cars"),
        ("d-skoda", "Škoda Cars"),
        ("d-citroen", "Citroën Cars"),
        ("d-seat", "Seat Cars"),
    ] {
        env.catalog
            .upsert_dealer(Dealer {
                id: id.to_string(),
                url: id.to_string(),
                name: name.to_string(),
                city: None,
                description: String::new(),
            })
            .await
            .unwrap();
    }
    let server = env.server();

    let body = env.search(&server, "cars").await;
    let ids: Vec<&str> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec!["d-citroen", "riviera-supercars", "d-seat", "d-skoda", "d-zagato"]
    );
}

#[tokio::test]
async fn mongo_title_link_resolves_when_another_brand_owns_that_url() {
    let env = TestEnv::start_mongo().await;
    seed_alpine_collision(env.catalog.as_ref()).await;
    let server = env.server();

    let detail = follow_first_model_link(&env, &server, "a110").await;
    assert_eq!(detail["brand"]["id"], "renault-alpine");
}
