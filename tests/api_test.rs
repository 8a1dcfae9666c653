//! API integration tests
//!
//! REST endpoints and server-rendered pages against a temporary SQLite file

#![cfg(feature = "server")]

use anyhow::Result;
use axum::http::StatusCode;
use axum_test::TestServer;
use grant_relief::database::connection::setup_database;
use grant_relief::server::app::create_app;
use grant_relief::services::PageSize;
use sea_orm::Database;
use serde_json::{json, Value};
use tempfile::NamedTempFile;

/// Create a test server backed by a fresh database file
async fn setup_test_server() -> Result<(TestServer, NamedTempFile)> {
    let temp_file = NamedTempFile::new()?;
    let db_url = format!("sqlite://{}?mode=rwc", temp_file.path().display());

    let db = Database::connect(&db_url).await?;
    setup_database(&db).await?;

    let app = create_app(db, Some("*"), PageSize::default()).await?;
    let server = TestServer::new(app)?;

    Ok((server, temp_file))
}

fn research_payload(award_number: &str, title: &str, instrument: &str, amount: f64) -> Value {
    json!({
        "award_number": award_number,
        "title": title,
        "abstract": "Field measurements and modeling.",
        "principal_investigator": "Marie Curie",
        "pi_email_address": "curie@columbia.edu",
        "co_pi_names": "Rosalind Franklin, Lise Meitner",
        "award_instrument": instrument,
        "start_date": "2023-09-01",
        "end_date": "2026-08-31",
        "organization": "Columbia University",
        "organization_street": "116th St and Broadway",
        "organization_city": "New York",
        "organization_state": "NY",
        "organization_zip": "10027",
        "organization_phone": "2128541754",
        "nsf_organization": "OCE",
        "nsf_directorate": "GEO",
        "program_manager": "Alan Turing",
        "programs": "Physical Oceanography",
        "awarded_amount_to_date": amount
    })
}

/// Insert research through the API and return its numeric id
async fn create_research(
    server: &TestServer,
    award_number: &str,
    title: &str,
    instrument: &str,
    amount: f64,
) -> i64 {
    let response = server
        .post("/api/v1/research")
        .json(&research_payload(award_number, title, instrument, amount))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

async fn seed(server: &TestServer) {
    create_research(server, "2400003", "Ocean Acidification Monitoring", "Standard Grant", 7_500_000.0).await;
    create_research(server, "2400001", "Quantum Materials Lab", "Continuing Grant", 450_000.0).await;
    create_research(server, "2400002", "Deep Ocean Floor Mapping", "Standard Grant", 10_000_000.0).await;
}

#[tokio::test]
async fn test_health_endpoint() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["service"], "grant-relief");
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_search_filters_and_ordering() -> Result<()> {
    let (server, _db) = setup_test_server().await?;
    seed(&server).await;

    let body: Value = server.get("/api/v1/research").await.json();
    assert_eq!(body["total_count"], 3);
    assert_eq!(body["items"][0]["award_number"], "2400001");
    assert_eq!(body["items"][2]["award_number"], "2400003");

    let body: Value = server
        .get("/api/v1/research")
        .add_query_param("search", "OCEAN")
        .add_query_param("award_instrument", "Standard Grant")
        .add_query_param("amount_range", "5m-10m")
        .await
        .json();
    assert_eq!(body["total_count"], 1);
    assert_eq!(body["items"][0]["award_number"], "2400003");

    // 10M is the lower edge of the top bucket
    let body: Value = server
        .get("/api/v1/research")
        .add_query_param("amount_range", "over10m")
        .await
        .json();
    assert_eq!(body["total_count"], 1);
    assert_eq!(body["items"][0]["award_number"], "2400002");

    Ok(())
}

#[tokio::test]
async fn test_pagination_and_page_size() -> Result<()> {
    let (server, _db) = setup_test_server().await?;
    for i in 0..12 {
        create_research(&server, &format!("25{:05}", i), "Pilot Study", "Standard Grant", 1000.0).await;
    }

    let body: Value = server
        .get("/api/v1/research")
        .add_query_param("page", "2")
        .add_query_param("page_size", "10")
        .await
        .json();
    assert_eq!(body["total_count"], 12);
    assert_eq!(body["total_pages"], 2);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["items"][0]["award_number"], "2500010");

    let response = server
        .get("/api/v1/research")
        .add_query_param("page_size", "30")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].as_str().unwrap().contains("page size"));

    Ok(())
}

#[tokio::test]
async fn test_huge_page_numbers_are_rejected() -> Result<()> {
    let (server, _db) = setup_test_server().await?;
    seed(&server).await;

    let response = server
        .get("/api/v1/research")
        .add_query_param("page", "1000000000000000000")
        .add_query_param("page_size", "100")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Invalid page number 1000000000000000000"
    );

    let response = server
        .get("/api/v1/grants")
        .add_query_param("page", "18446744073709551615")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server
        .get("/")
        .add_query_param("page", "18446744073709551615")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.text().contains("Invalid page number 18446744073709551615"));

    Ok(())
}

#[tokio::test]
async fn test_search_matches_accented_titles() -> Result<()> {
    let (server, _db) = setup_test_server().await?;
    create_research(&server, "2400077", "École Polytechnique Études", "Standard Grant", 300_000.0).await;

    for term in ["ÉCOLE", "école"] {
        let body: Value = server
            .get("/api/v1/research")
            .add_query_param("search", term)
            .await
            .json();
        assert_eq!(body["total_count"], 1, "search term {}", term);
        assert_eq!(body["items"][0]["award_number"], "2400077");
    }

    Ok(())
}

#[tokio::test]
async fn test_research_detail() -> Result<()> {
    let (server, _db) = setup_test_server().await?;
    seed(&server).await;

    let body: Value = server.get("/api/v1/research/2400002").await.json();
    assert_eq!(body["research"]["title"], "Deep Ocean Floor Mapping");
    assert_eq!(body["co_pi_names"], json!(["Rosalind Franklin", "Lise Meitner"]));
    assert_eq!(body["claims"], json!([]));

    let response = server.get("/api/v1/research/9999999").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>()["error"],
        "Research with award number '9999999' not found"
    );

    Ok(())
}

#[tokio::test]
async fn test_duplicate_and_invalid_research() -> Result<()> {
    let (server, _db) = setup_test_server().await?;
    seed(&server).await;

    let response = server
        .post("/api/v1/research")
        .json(&research_payload("2400001", "Again", "Standard Grant", 1.0))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    let mut payload = research_payload("2400009", "No Manager", "Standard Grant", 1.0);
    payload["program_manager"] = json!("");
    let response = server.post("/api/v1/research").json(&payload).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Program manager is required");

    Ok(())
}

#[tokio::test]
async fn test_claim_and_pledge_submission() -> Result<()> {
    let (server, _db) = setup_test_server().await?;
    let id = create_research(&server, "2400001", "Quantum Materials Lab", "Continuing Grant", 450_000.0).await;

    let response = server
        .post(&format!("/api/v1/research/{}/claims", id))
        .json(&json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "ada@example.edu",
            "amended_amount": 120000,
            "grant_canceled_confirmed": true
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let claim: Value = response.json();
    assert_eq!(claim["research_id"], id);
    assert_eq!(claim["amended_amount"], 120000);
    assert_eq!(claim["asks"], Value::Null);

    let response = server
        .post(&format!("/api/v1/research/{}/pledges", id))
        .json(&json!({
            "first_name": "Grace",
            "last_name": "Hopper",
            "email": "grace@example.org",
            "amount": "$1,250.50"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["amount"], 1250.5);

    let body: Value = server.get("/api/v1/research/2400001").await.json();
    assert_eq!(body["claims"].as_array().unwrap().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_rejected_submissions() -> Result<()> {
    let (server, _db) = setup_test_server().await?;
    let id = create_research(&server, "2400001", "Quantum Materials Lab", "Continuing Grant", 450_000.0).await;

    let response = server
        .post(&format!("/api/v1/research/{}/claims", id))
        .json(&json!({
            "first_name": "Ada",
            "last_name": "",
            "email": "ada@example.edu",
            "grant_canceled_confirmed": true
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Last name is required");

    let response = server
        .post("/api/v1/research/4242/pledges")
        .json(&json!({
            "first_name": "Grace",
            "last_name": "Hopper",
            "email": "grace@example.org"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let body: Value = server.get("/api/v1/research/2400001").await.json();
    assert_eq!(body["claims"], json!([]));

    Ok(())
}

#[tokio::test]
async fn test_grants_listing_starts_empty() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let body: Value = server.get("/api/v1/grants").await.json();
    assert_eq!(body["total_count"], 0);
    assert_eq!(body["items"], json!([]));

    let response = server.get("/api/v1/grants").add_query_param("page", "0").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn test_home_page() -> Result<()> {
    let (server, _db) = setup_test_server().await?;
    seed(&server).await;

    let response = server
        .get("/")
        .add_query_param("search", "ocean")
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.contains("Ocean Acidification Monitoring"));
    assert!(html.contains("Deep Ocean Floor Mapping"));
    assert!(!html.contains("Quantum Materials Lab"));
    assert!(html.contains("$7,500,000"));
    assert!(html.contains("Page 1 of 1"));

    let response = server
        .get("/")
        .add_query_param("amount_range", "huge")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.text().contains("Unknown amount range"));

    Ok(())
}

#[tokio::test]
async fn test_home_page_goto_ignores_out_of_range_input() -> Result<()> {
    let (server, _db) = setup_test_server().await?;
    for i in 0..12 {
        create_research(&server, &format!("25{:05}", i), "Pilot Study", "Standard Grant", 1000.0).await;
    }

    let html = server
        .get("/")
        .add_query_param("page_size", "10")
        .add_query_param("page", "1")
        .add_query_param("goto", "2")
        .await
        .text();
    assert!(html.contains("Page 2 of 2"));
    assert!(html.contains("2500011"));

    let html = server
        .get("/")
        .add_query_param("page_size", "10")
        .add_query_param("page", "1")
        .add_query_param("goto", "9")
        .await
        .text();
    assert!(html.contains("Page 1 of 2"));
    assert!(html.contains(r#"name="goto" min="1" value="9""#));

    Ok(())
}

#[tokio::test]
async fn test_detail_page_claim_form() -> Result<()> {
    let (server, _db) = setup_test_server().await?;
    seed(&server).await;

    let response = server
        .post("/research/2400001/claim")
        .form(&[
            ("first_name", "Ada"),
            ("last_name", "Lovelace"),
            ("email", "ada@example.edu"),
            ("amended_amount", "90000"),
            ("asks", "Summer salary"),
            ("grant_canceled_confirmed", "on"),
        ])
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert!(html.contains("your claim has been submitted"));
    assert!(html.contains("Summer salary"));

    let response = server
        .post("/research/2400001/claim")
        .form(&[
            ("first_name", "Ada"),
            ("last_name", "Lovelace"),
            ("email", "ada@example.edu"),
        ])
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response
        .text()
        .contains("Please confirm that this research grant has been canceled"));

    let response = server.get("/research/0000000").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_add_research_page() -> Result<()> {
    let (server, _db) = setup_test_server().await?;

    let response = server.get("/claims/add").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains(r#"name="award_number""#));

    let payload = research_payload("2400042", "Glacier Melt Sensors", "Cooperative Agreement", 2_000_000.0);
    let form: Vec<(String, String)> = payload
        .as_object()
        .unwrap()
        .iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), value)
        })
        .collect();

    let response = server.post("/claims/add").form(&form).await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert!(response.text().contains(r#"href="/research/2400042""#));

    let body: Value = server
        .get("/api/v1/research")
        .add_query_param("search", "glacier")
        .await
        .json();
    assert_eq!(body["total_count"], 1);

    let response = server.post("/claims/add").form(&form).await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    Ok(())
}
