//! API integration tests
//!
//! Run against a live server with a migrated database:
//! `cargo test -- --ignored`

use reqwest::Client;
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Distinct account id per call so reruns never collide
fn fresh_account() -> i64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    (nanos % 1_000_000_000_000) as i64
}

async fn touch_client(client: &Client, account_id: i64, name: &str) {
    let response = client
        .put(format!("{}/clients/{}", BASE_URL, account_id))
        .header("X-Account-Id", account_id.to_string())
        .json(&json!({ "handle": name, "display_name": name, "phone": null }))
        .send()
        .await
        .expect("Failed to touch client");
    assert!(response.status().is_success());
}

/// Register a provider bound to `account_id` and return its id
async fn register_provider(client: &Client, account_id: i64, specialty: &str) -> i64 {
    touch_client(client, account_id, "provider").await;

    let response = client
        .post(format!("{}/providers", BASE_URL))
        .header("X-Account-Id", account_id.to_string())
        .json(&json!({
            "name": format!("Provider {}", account_id),
            "specialty": specialty,
            "contact": "@provider",
            "address": "10 Pushkin St",
            "secret": "super-secret"
        }))
        .send()
        .await
        .expect("Failed to register provider");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse provider");
    body["id"].as_i64().expect("No provider id")
}

async fn add_offering(client: &Client, account_id: i64, provider_id: i64, minutes: u32) -> i64 {
    let response = client
        .post(format!("{}/providers/{}/offerings", BASE_URL, provider_id))
        .header("X-Account-Id", account_id.to_string())
        .json(&json!({
            "name": "Haircut",
            "price": "1500.00",
            "duration_minutes": minutes
        }))
        .send()
        .await
        .expect("Failed to create offering");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse offering");
    body["id"].as_i64().expect("No offering id")
}

async fn add_window(
    client: &Client,
    account_id: i64,
    provider_id: i64,
    date: &str,
    start: &str,
    end: &str,
) -> i64 {
    let response = client
        .post(format!("{}/providers/{}/windows", BASE_URL, provider_id))
        .header("X-Account-Id", account_id.to_string())
        .json(&json!({ "date": date, "start_time": start, "end_time": end }))
        .send()
        .await
        .expect("Failed to create window");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse window");
    body["id"].as_i64().expect("No window id")
}

async fn get_slots(client: &Client, provider_id: i64, date: &str, offering_id: i64) -> Vec<String> {
    let response = client
        .get(format!(
            "{}/providers/{}/slots?date={}&offering_id={}",
            BASE_URL, provider_id, date, offering_id
        ))
        .send()
        .await
        .expect("Failed to fetch slots");
    assert!(response.status().is_success());

    let body: Vec<String> = response.json().await.expect("Failed to parse slots");
    body
}

fn book_request(
    client: &Client,
    account_id: i64,
    provider_id: i64,
    offering_id: i64,
    date: &str,
    time: &str,
) -> reqwest::RequestBuilder {
    client
        .post(format!("{}/bookings", BASE_URL))
        .header("X-Account-Id", account_id.to_string())
        .json(&json!({
            "client_id": account_id,
            "provider_id": provider_id,
            "offering_id": offering_id,
            "date": date,
            "time": time
        }))
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_booking_flow_excludes_taken_slot() {
    let client = Client::new();
    let provider_account = fresh_account();
    let provider_id = register_provider(&client, provider_account, "hair").await;
    let offering_id = add_offering(&client, provider_account, provider_id, 60).await;
    add_window(&client, provider_account, provider_id, "2999-01-01", "10:00", "13:00").await;

    let slots = get_slots(&client, provider_id, "2999-01-01", offering_id).await;
    assert_eq!(slots, vec!["10:00:00", "11:00:00", "12:00:00"]);

    let booker = fresh_account();
    touch_client(&client, booker, "client").await;
    let response = book_request(&client, booker, provider_id, offering_id, "2999-01-01", "10:00")
        .send()
        .await
        .expect("Failed to book");
    assert_eq!(response.status(), 201);

    let confirmation: Value = response.json().await.expect("Failed to parse confirmation");
    assert_eq!(confirmation["offering_name"], "Haircut");
    assert_eq!(confirmation["start_time"], "10:00:00");

    // the taken slot is no longer offered
    let slots = get_slots(&client, provider_id, "2999-01-01", offering_id).await;
    assert_eq!(slots, vec!["11:00:00", "12:00:00"]);
}

#[tokio::test]
#[ignore]
async fn test_concurrent_commits_one_wins() {
    let client = Client::new();
    let provider_account = fresh_account();
    let provider_id = register_provider(&client, provider_account, "nails").await;
    let offering_id = add_offering(&client, provider_account, provider_id, 60).await;
    add_window(&client, provider_account, provider_id, "2999-01-02", "10:00", "12:00").await;

    let first = fresh_account();
    let second = first + 1;
    touch_client(&client, first, "first").await;
    touch_client(&client, second, "second").await;

    let (a, b) = tokio::join!(
        book_request(&client, first, provider_id, offering_id, "2999-01-02", "10:00").send(),
        book_request(&client, second, provider_id, offering_id, "2999-01-02", "10:00").send(),
    );
    let a = a.expect("first request failed");
    let b = b.expect("second request failed");

    let statuses = [a.status().as_u16(), b.status().as_u16()];
    assert!(
        statuses.contains(&201) && statuses.contains(&409),
        "expected one success and one conflict, got {:?}",
        statuses
    );
}

#[tokio::test]
#[ignore]
async fn test_booking_in_past_is_rejected() {
    let client = Client::new();
    let provider_account = fresh_account();
    let provider_id = register_provider(&client, provider_account, "hair").await;
    let offering_id = add_offering(&client, provider_account, provider_id, 60).await;
    add_window(&client, provider_account, provider_id, "2020-01-01", "09:00", "18:00").await;

    // a window in the past yields no offers
    let slots = get_slots(&client, provider_id, "2020-01-01", offering_id).await;
    assert!(slots.is_empty());

    let booker = fresh_account();
    touch_client(&client, booker, "client").await;
    let response = book_request(&client, booker, provider_id, offering_id, "2020-01-01", "09:00")
        .send()
        .await
        .expect("Failed to send booking");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_cancel_is_idempotent_and_frees_the_slot() {
    let client = Client::new();
    let provider_account = fresh_account();
    let provider_id = register_provider(&client, provider_account, "hair").await;
    let offering_id = add_offering(&client, provider_account, provider_id, 60).await;
    add_window(&client, provider_account, provider_id, "2999-01-03", "10:00", "12:00").await;

    let booker = fresh_account();
    touch_client(&client, booker, "client").await;
    let response = book_request(&client, booker, provider_id, offering_id, "2999-01-03", "10:00")
        .send()
        .await
        .expect("Failed to book");
    assert_eq!(response.status(), 201);
    let confirmation: Value = response.json().await.expect("Failed to parse confirmation");
    let booking_id = confirmation["id"].as_i64().expect("No booking id");

    for _ in 0..2 {
        let response = client
            .post(format!("{}/bookings/{}/cancel", BASE_URL, booking_id))
            .header("X-Account-Id", booker.to_string())
            .send()
            .await
            .expect("Failed to cancel");
        assert_eq!(response.status(), 204);
    }

    let slots = get_slots(&client, provider_id, "2999-01-03", offering_id).await;
    assert_eq!(slots, vec!["10:00:00", "11:00:00"]);
}

#[tokio::test]
#[ignore]
async fn test_delete_window_is_idempotent() {
    let client = Client::new();
    let provider_account = fresh_account();
    let provider_id = register_provider(&client, provider_account, "hair").await;
    let window_id =
        add_window(&client, provider_account, provider_id, "2999-01-04", "10:00", "12:00").await;

    for _ in 0..2 {
        let response = client
            .delete(format!("{}/windows/{}", BASE_URL, window_id))
            .header("X-Account-Id", provider_account.to_string())
            .send()
            .await
            .expect("Failed to delete window");
        assert_eq!(response.status(), 204);
    }
}

#[tokio::test]
#[ignore]
async fn test_foreign_account_cannot_mutate_provider() {
    let client = Client::new();
    let provider_account = fresh_account();
    let provider_id = register_provider(&client, provider_account, "hair").await;

    let intruder = fresh_account();
    touch_client(&client, intruder, "intruder").await;
    let response = client
        .post(format!("{}/providers/{}/windows", BASE_URL, provider_id))
        .header("X-Account-Id", intruder.to_string())
        .json(&json!({ "date": "2999-01-05", "start_time": "10:00", "end_time": "12:00" }))
        .send()
        .await
        .expect("Failed to send window request");
    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_secret_verification_binds_account_once() {
    let client = Client::new();

    // register without an acting account: the provider starts unbound
    let response = client
        .post(format!("{}/providers", BASE_URL))
        .json(&json!({
            "name": format!("Unbound {}", fresh_account()),
            "specialty": "brows",
            "secret": "first-login-secret"
        }))
        .send()
        .await
        .expect("Failed to register provider");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse provider");
    let provider_id = body["id"].as_i64().expect("No provider id");
    assert!(body["bound_account_id"].is_null());

    let owner = fresh_account();
    let wrong = client
        .post(format!("{}/providers/{}/verify-secret", BASE_URL, provider_id))
        .header("X-Account-Id", owner.to_string())
        .json(&json!({ "secret": "nope" }))
        .send()
        .await
        .expect("Failed to verify");
    assert_eq!(wrong.status(), 403);

    let right = client
        .post(format!("{}/providers/{}/verify-secret", BASE_URL, provider_id))
        .header("X-Account-Id", owner.to_string())
        .json(&json!({ "secret": "first-login-secret" }))
        .send()
        .await
        .expect("Failed to verify");
    assert_eq!(right.status(), 200);
    let bound: Value = right.json().await.expect("Failed to parse provider");
    assert_eq!(bound["bound_account_id"].as_i64(), Some(owner));

    // the binding is one-way: another account is rejected even with the
    // right secret
    let other = fresh_account();
    let rebind = client
        .post(format!("{}/providers/{}/verify-secret", BASE_URL, provider_id))
        .header("X-Account-Id", other.to_string())
        .json(&json!({ "secret": "first-login-secret" }))
        .send()
        .await
        .expect("Failed to verify");
    assert_eq!(rebind.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_malformed_date_is_a_format_error() {
    let client = Client::new();
    let provider_account = fresh_account();
    let provider_id = register_provider(&client, provider_account, "hair").await;
    let offering_id = add_offering(&client, provider_account, provider_id, 60).await;

    let response = client
        .get(format!(
            "{}/providers/{}/slots?date=01.02.2999&offering_id={}",
            BASE_URL, provider_id, offering_id
        ))
        .send()
        .await
        .expect("Failed to fetch slots");
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse error");
    assert_eq!(body["error"], "format");
}
