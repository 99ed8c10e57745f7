use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use tempfile::TempDir;

use scheme_assist::cache::ReplyCache;
use scheme_assist::catalog::SchemeCatalog;
use scheme_assist::config::SearchLimits;
use scheme_assist::error::GenerationError;
use scheme_assist::messages::{ErrorReason, Language, error_message};
use scheme_assist::provider::{GenerationSettings, Prompt, TextGenerator};
use scheme_assist::{AppContext, create_router};

const CATALOG: &str = r#"{
    "metadata": {"version": "1.0", "source": "test"},
    "schemes": {
        "housing": [
            {"title": "Pradhan Mantri Awas Yojana", "description": "Financial help to build a pucca house for rural families.", "link": "https://pmayg.nic.in", "keywords": ["house", "housing", "घर", "आवास"]},
            {"title": "Urban Housing Mission", "description": "Affordable house in cities.", "link": "https://pmaymis.gov.in", "keywords": ["urban"]}
        ],
        "employment": [
            {"title": "MGNREGA", "description": "100 days of guaranteed wage employment.", "link": "https://nrega.nic.in", "keywords": ["job", "नौकरी", "रोजगार"]}
        ],
        "health": [
            {"title": "Ayushman Bharat", "description": "Health cover up to 5 lakh rupees for a house hold.", "link": "https://pmjay.gov.in", "keywords": ["health", "इलाज"]}
        ]
    }
}"#;

struct FixedReply {
    text: Option<&'static str>,
}

#[async_trait]
impl TextGenerator for FixedReply {
    fn provider(&self) -> &str {
        "groq"
    }

    fn model(&self) -> &str {
        "test-model"
    }

    fn default_settings(&self) -> GenerationSettings {
        GenerationSettings {
            temperature: 0.3,
            max_tokens: 300,
            top_p: Some(0.9),
        }
    }

    async fn generate(
        &self,
        _prompt: &Prompt,
        _settings: GenerationSettings,
    ) -> Result<String, GenerationError> {
        self.text
            .map(str::to_string)
            .ok_or(GenerationError::Timeout)
    }
}

fn server_with(catalog: SchemeCatalog, generator: Option<Arc<dyn TextGenerator>>) -> TestServer {
    let ctx = AppContext::new(
        catalog,
        SearchLimits::default(),
        generator,
        ReplyCache::disabled(),
        Language::Hindi,
        "groq",
    );
    TestServer::new(create_router(Arc::new(ctx))).expect("Failed to create test server")
}

fn test_server() -> TestServer {
    server_with(SchemeCatalog::from_json_str(CATALOG).unwrap(), None)
}

#[tokio::test]
async fn root_reports_catalog_size() {
    let server = test_server();
    let response = server.get("/").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["search_type"], "curated_database");
    assert_eq!(body["total_schemes"], 4);
    assert_eq!(body["provider_available"], false);
}

#[tokio::test]
async fn schemes_lists_categories_in_file_order() {
    let server = test_server();
    let body: Value = server.get("/schemes").await.json();
    assert_eq!(body["categories"], json!(["housing", "employment", "health"]));
    assert_eq!(body["total_schemes"], 4);
}

#[tokio::test]
async fn search_returns_ranked_results() {
    let server = test_server();
    let response = server.post("/search").json(&json!({"query": "house"})).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["search_query"], "house");
    assert_eq!(body["total_found"], 3);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results[0]["title"], "Pradhan Mantri Awas Yojana");
    assert_eq!(results[0]["link"], "https://pmayg.nic.in");
}

#[tokio::test]
async fn empty_search_returns_no_results() {
    let server = test_server();
    for query in ["", "a", "   "] {
        let response = server.post("/search").json(&json!({"query": query})).await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["results"], json!([]));
        assert_eq!(body["total_found"], 0);
    }
}

#[tokio::test]
async fn query_without_provider_uses_fallback_with_link() {
    let server = test_server();
    let response = server.post("/query").json(&json!({"query": "नौकरी चाहिए"})).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["scheme_name"], "MGNREGA");
    assert_eq!(body["link"], "https://nrega.nic.in");
    let reply = body["reply"].as_str().unwrap();
    assert!(reply.starts_with("MGNREGA योजना आपके लिए उपलब्ध है।"));
    assert!(reply.contains("https://nrega.nic.in"));

    let again: Value = server
        .post("/query")
        .json(&json!({"query": "नौकरी चाहिए"}))
        .await
        .json();
    assert_eq!(again["reply"], body["reply"]);
}

#[tokio::test]
async fn query_uses_provider_reply() {
    let server = server_with(
        SchemeCatalog::from_json_str(CATALOG).unwrap(),
        Some(Arc::new(FixedReply {
            text: Some("  आयुष्मान भारत से मुफ्त इलाज मिलता है।  "),
        })),
    );
    let body: Value = server
        .post("/query")
        .json(&json!({"query": "इलाज"}))
        .await
        .json();
    assert_eq!(body["reply"], "आयुष्मान भारत से मुफ्त इलाज मिलता है।");
    assert_eq!(body["scheme_name"], "Ayushman Bharat");
}

#[tokio::test]
async fn query_falls_back_when_provider_fails() {
    let server = server_with(
        SchemeCatalog::from_json_str(CATALOG).unwrap(),
        Some(Arc::new(FixedReply { text: None })),
    );
    let body: Value = server
        .post("/query")
        .json(&json!({"query": "health"}))
        .await
        .json();
    let reply = body["reply"].as_str().unwrap();
    assert!(reply.starts_with("Ayushman Bharat योजना"));
    assert!(reply.contains("https://pmjay.gov.in"));
}

#[tokio::test]
async fn short_query_is_bad_request() {
    let server = test_server();
    let response = server.post("/query").json(&json!({"query": "a"})).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(
        body["detail"],
        error_message(Language::Hindi, ErrorReason::InvalidQuery, "a")
    );
}

#[tokio::test]
async fn unmatched_query_is_not_found() {
    let server = test_server();
    let response = server
        .post("/query")
        .json(&json!({"query": "tractor subsidy"}))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(
        body["detail"],
        error_message(Language::Hindi, ErrorReason::NoResults, "tractor subsidy")
    );
}

#[tokio::test]
async fn answer_covers_top_three() {
    let server = test_server();
    let response = server.post("/answer").json(&json!({"query": "house"})).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["total_found"], 3);
    assert_eq!(body["schemes"].as_array().unwrap().len(), 3);
    let reply = body["reply"].as_str().unwrap();
    assert!(reply.starts_with("Pradhan Mantri Awas Yojana आपके लिए एक उपयुक्त योजना है।"));
    assert!(reply.contains("2 और योजनाएं"));

    server
        .post("/answer")
        .json(&json!({"query": "zzz qqq"}))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn debug_shows_scores_and_enhancement() {
    let server = test_server();
    let response = server.get("/debug/house").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["query"], "house");
    assert_eq!(body["search_results"][0]["category"], "housing");
    assert_eq!(body["search_results"][0]["score"], 10.0);
    assert_eq!(body["enhanced_query"]["category"], "housing");
    assert_eq!(body["database_info"]["total_categories"], 3);
    assert_eq!(body["database_info"]["metadata"]["source"], "test");
}

#[tokio::test]
async fn provider_health_states() {
    let server = test_server();
    let body: Value = server.get("/health/groq").await.json();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["client_initialized"], false);
    assert_eq!(body["fallback_available"], true);

    let response = server.get("/health/openai").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "unknown_provider");

    let healthy = server_with(
        SchemeCatalog::empty(),
        Some(Arc::new(FixedReply { text: Some("नमस्ते") })),
    );
    let body: Value = healthy.get("/health/groq").await.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["api_connection"], true);
    assert_eq!(body["model"], "test-model");

    let failing = server_with(SchemeCatalog::empty(), Some(Arc::new(FixedReply { text: None })));
    let body: Value = failing.get("/health/groq").await.json();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["client_initialized"], true);
    assert_eq!(body["api_connection"], false);
}

#[tokio::test]
async fn missing_catalog_still_serves() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let catalog = SchemeCatalog::load_or_empty(&dir.path().join("schemes_database.json"));
    let server = server_with(catalog, None);

    let body: Value = server.get("/").await.json();
    assert_eq!(body["total_schemes"], 0);

    let body: Value = server
        .post("/search")
        .json(&json!({"query": "house"}))
        .await
        .json();
    assert_eq!(body["results"], json!([]));

    server
        .post("/query")
        .json(&json!({"query": "house"}))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn catalog_file_round_trip() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("schemes_database.json");
    std::fs::write(
        &path,
        r#"{"metadata": {}, "schemes": {"misc": [
            {"title": "Scheme X", "description": "", "link": "https://x.gov.in", "keywords": ["alpha"]}
        ]}}"#,
    )
    .unwrap();

    let server = server_with(SchemeCatalog::load_or_empty(&path), None);
    let body: Value = server
        .post("/query")
        .json(&json!({"query": "alpha"}))
        .await
        .json();
    assert_eq!(body["scheme_name"], "Scheme X");
}

#[tokio::test]
async fn unreadable_body_gets_detail_json() {
    let server = test_server();

    let response = server.post("/query").text("house").await;
    response.assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body: Value = response.json();
    assert!(body["detail"].as_str().is_some_and(|d| !d.is_empty()));

    let response = server.post("/search").json(&json!({"query": 5})).await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert!(body["detail"].is_string());
}
