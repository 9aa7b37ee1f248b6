//! DataService against an in-process fake of the Sheets and HubSpot APIs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use lia_core::topics::{TopicCache, TopicSource};
use lia_core::types::Origin;
use lia_data::{hubspot::HubSpotClient, sheets::SheetsClient, DataService};
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing_test::traced_test;

#[derive(Clone, Default)]
struct Fake {
    sheet_hits: Arc<AtomicUsize>,
    crm_hits: Arc<AtomicUsize>,
    broken: bool,
}

async fn values(
    State(fake): State<Fake>,
    Path((_id, range)): Path<(String, String)>,
    Query(q): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    fake.sheet_hits.fetch_add(1, Ordering::SeqCst);
    if fake.broken || q.get("key").map(String::as_str) != Some("sheet-key") {
        return (StatusCode::FORBIDDEN, Json(json!({ "error": "denied" })));
    }
    let body = match range.as_str() {
        "Articles!A:Z" => json!({ "values": [
            ["Slug", "Title", "Summary", "Category"],
            ["talc", "Talc and Ovarian Cancer", "Talc lawsuits", "Conditions"],
            ["burns", "Burn Injuries", "Workplace burns", "Injuries"],
        ]}),
        "Settlements!A:Z" => json!({ "values": [
            ["Condition", "State", "Average Settlement", "Cases Reported", "Notes"],
            ["Mesothelioma", "TX", "$1,200,000", "40", "trust funds"],
            ["Mesothelioma", "CA", "$1,500,000", "55", ""],
            ["Talc", "", "$250,000", "12", ""],
        ]}),
        "LIA Cases!A:Z" => json!({ "values": [
            ["Case Type", "Name", "Description", "Keywords", "Active", "Last Updated"],
            ["talc", "Talc Litigation", "talc and ovarian cancer cases", "talc, baby powder", "yes", "2025-01-15"],
            ["roundup", "Roundup", "Roundup cases", "roundup", "no", ""],
        ]}),
        _ => json!({}),
    };
    (StatusCode::OK, Json(body))
}

async fn companies(State(fake): State<Fake>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    fake.crm_hits.fetch_add(1, Ordering::SeqCst);
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if fake.broken || auth != "Bearer crm-token" {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    (
        StatusCode::OK,
        Json(json!({ "results": [
            { "id": "1", "properties": { "name": "Gulf Injury Law", "specialties": "Mesothelioma; Talc", "city": "Houston", "state": "TX" } },
            { "id": "2", "properties": { "name": "Bay Counsel", "specialties": "Aviation", "city": "Oakland", "state": "CA", "rating": "4.8" } },
        ]})),
    )
}

async fn serve(fake: Fake) -> String {
    let app = Router::new()
        .route("/v4/spreadsheets/:id/values/:range", get(values))
        .route("/crm/v3/objects/companies/search", post(companies))
        .with_state(fake);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

async fn service(fake: Fake, ttl: Duration) -> DataService {
    let base = serve(fake).await;
    let http = reqwest::Client::new();
    let sheets = SheetsClient::new(http.clone(), "sheet-key", "sheet-1").with_base_url(format!("{base}/v4"));
    let hubspot = HubSpotClient::new(http, "crm-token").with_base_url(base);
    DataService::with_clients(Some(sheets), Some(hubspot), ttl)
}

#[tokio::test]
async fn articles_come_from_the_sheet_and_are_cached() {
    let fake = Fake::default();
    let svc = service(fake.clone(), Duration::from_secs(60)).await;

    let articles = svc.all_articles().await;
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].slug, "talc");
    assert_eq!(articles[0].url, "/article/talc");
    assert_eq!(articles[0].source, Origin::Remote);

    svc.all_articles().await;
    assert_eq!(fake.sheet_hits.load(Ordering::SeqCst), 1);

    svc.clear_cache();
    svc.all_articles().await;
    assert_eq!(fake.sheet_hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn expired_entries_are_refetched() {
    let fake = Fake::default();
    let svc = service(fake.clone(), Duration::ZERO).await;
    svc.law_firms(None, None).await;
    svc.law_firms(None, None).await;
    assert_eq!(fake.crm_hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn unknown_slug_falls_back_to_builtin_articles() {
    let svc = service(Fake::default(), Duration::from_secs(60)).await;
    assert_eq!(svc.article("burns").await.unwrap().source, Origin::Remote);
    let meso = svc.article("mesothelioma").await.unwrap();
    assert_eq!(meso.source, Origin::Fallback);
    assert!(svc.article("nope").await.is_none());
}

#[tokio::test]
async fn law_firms_filter_by_specialty_and_location() {
    let svc = service(Fake::default(), Duration::from_secs(60)).await;
    let all = svc.law_firms(None, None).await;
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].rating, Some(4.8));

    let meso = svc.law_firms(Some("mesothelioma"), None).await;
    assert_eq!(meso.len(), 1);
    assert_eq!(meso[0].location, "Houston, TX");

    assert!(svc.law_firms(Some("talc"), Some("CA")).await.is_empty());
}

#[tokio::test]
async fn settlements_filter_by_condition_and_state() {
    let svc = service(Fake::default(), Duration::from_secs(60)).await;
    let meso = svc.settlement_data(Some("mesothelioma"), None).await;
    assert_eq!(meso.len(), 2);
    let tx = svc.settlement_data(Some("mesothelioma"), Some("tx")).await;
    assert_eq!(tx.len(), 1);
    assert_eq!(tx[0].average_settlement, Some(1_200_000.0));
    assert_eq!(tx[0].cases_reported, 40);
}

#[tokio::test]
#[traced_test]
async fn remote_failures_serve_fallback_data() {
    let fake = Fake {
        broken: true,
        ..Fake::default()
    };
    let svc = service(fake.clone(), Duration::from_secs(60)).await;

    let articles = svc.all_articles().await;
    assert!(articles.iter().all(|a| a.source == Origin::Fallback));
    let firms = svc.law_firms(None, None).await;
    assert_eq!(firms[0].name, "Legal Injury Advocates");
    assert!(svc.settlement_data(None, None).await.is_empty());
    assert!(logs_contain("fetch failed, using fallback"));

    // fallbacks are not cached
    svc.all_articles().await;
    assert_eq!(fake.sheet_hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn topic_sheet_feeds_the_topic_cache() {
    let svc = Arc::new(service(Fake::default(), Duration::from_secs(60)).await);
    let records = svc.fetch_active_topics().await.unwrap();
    assert_eq!(records.len(), 2);
    assert!(records[0].last_updated.is_some());

    let cache = TopicCache::new(svc.clone());
    let set = cache.snapshot().await;
    assert_eq!(set.source, Origin::Remote);
    assert_eq!(set.total_cases, 2);
    assert_eq!(set.total_active, 1);

    let hit = cache.classify("My wife used baby powder for years").await;
    assert_eq!(hit.case_type.as_deref(), Some("talc"));
    assert!(!cache.classify("roundup exposure").await.is_active);

    let search = svc.search_condition("talc", &set).await;
    assert!(search.active_case.is_active);
    assert_eq!(search.articles.len(), 1);
    assert_eq!(search.law_firms.len(), 1);
    assert_eq!(search.settlements.len(), 1);
}

#[tokio::test]
async fn broken_topic_sheet_yields_fallback_topics() {
    let fake = Fake {
        broken: true,
        ..Fake::default()
    };
    let svc = Arc::new(service(fake, Duration::from_secs(60)).await);
    let set = TopicCache::new(svc).snapshot().await;
    assert_eq!(set.source, Origin::Fallback);
    assert_eq!(set.active_cases[0].case_type, "mesothelioma");
}
