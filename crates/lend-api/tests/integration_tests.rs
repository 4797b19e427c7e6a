//! End-to-end tests over the assembled router.
//!
//! Each test builds a fresh in-memory `AppState` pinned to a fixed
//! clock, drives the HTTP surface with `tower::ServiceExt::oneshot`,
//! and asserts on status codes and JSON bodies.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Duration, TimeZone, Utc};
use http_body_util::BodyExt;
use lend_api::state::AppState;
use lend_core::FixedClock;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

struct TestApp {
    app: Router,
    clock: Arc<FixedClock>,
}

fn test_app() -> TestApp {
    let clock = Arc::new(FixedClock::new(t0()));
    let state = AppState::with_clock(clock.clone());
    TestApp {
        app: lend_api::app(state),
        clock,
    }
}

impl TestApp {
    async fn send(
        &self,
        method: &str,
        path: &str,
        sharer: Option<Uuid>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(id) = sharer {
            builder = builder.header("X-Sharer-User-Id", id.to_string());
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::String(
                String::from_utf8_lossy(&bytes).into_owned(),
            ))
        };
        (status, value)
    }

    async fn create_user(&self, name: &str) -> Uuid {
        let (status, body) = self
            .send(
                "POST",
                "/users",
                None,
                Some(json!({ "name": name, "email": format!("{name}@example.com") })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_str().unwrap().parse().unwrap()
    }

    async fn create_item(&self, owner: Uuid, name: &str, available: bool) -> Uuid {
        let (status, body) = self
            .send(
                "POST",
                "/items",
                Some(owner),
                Some(json!({
                    "name": name,
                    "description": format!("{name} for rent"),
                    "available": available,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_str().unwrap().parse().unwrap()
    }

    async fn create_booking(&self, booker: Uuid, item: Uuid, start_days: i64, end_days: i64) -> Uuid {
        let (status, body) = self
            .send(
                "POST",
                "/bookings",
                Some(booker),
                Some(json!({
                    "item_id": item,
                    "start": t0() + Duration::days(start_days),
                    "end": t0() + Duration::days(end_days),
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_str().unwrap().parse().unwrap()
    }

    async fn decide(&self, owner: Uuid, booking: Uuid, approve: bool) -> (StatusCode, Value) {
        self.send(
            "PATCH",
            &format!("/bookings/{booking}?approved={approve}"),
            Some(owner),
            None,
        )
        .await
    }
}

fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or("<no code>")
}

// ── Health & plumbing ──────────────────────────────────────────────

#[tokio::test]
async fn health_probes_need_no_identity() {
    let t = test_app();
    let (status, _) = t.send("GET", "/health/liveness", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = t.send("GET", "/health/readiness", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn openapi_spec_is_served() {
    let t = test_app();
    let (status, body) = t.send("GET", "/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/bookings"].is_object());
}

#[tokio::test]
async fn missing_sharer_header_is_rejected() {
    let t = test_app();
    let (status, body) = t.send("GET", "/bookings", None, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), "VALIDATION_ERROR");
}

// ── Users & items ──────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_email_conflicts() {
    let t = test_app();
    t.create_user("ada").await;
    let (status, body) = t
        .send(
            "POST",
            "/users",
            None,
            Some(json!({ "name": "other", "email": "ada@example.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "CONFLICT");
}

#[tokio::test]
async fn item_patch_is_owner_only_and_masks_as_not_found() {
    let t = test_app();
    let owner = t.create_user("owner").await;
    let other = t.create_user("other").await;
    let item = t.create_item(owner, "drill", true).await;

    let (status, body) = t
        .send(
            "PATCH",
            &format!("/items/{item}"),
            Some(other),
            Some(json!({ "available": false })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "NOT_AUTHORIZED");

    let (status, body) = t
        .send(
            "PATCH",
            &format!("/items/{item}"),
            Some(owner),
            Some(json!({ "available": false })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], json!(false));
}

#[tokio::test]
async fn listing_items_without_any_is_not_found() {
    let t = test_app();
    let user = t.create_user("empty").await;
    let (status, _) = t.send("GET", "/items", Some(user), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── Booking lifecycle ──────────────────────────────────────────────

#[tokio::test]
async fn booking_lifecycle_create_approve() {
    let t = test_app();
    let owner = t.create_user("owner").await;
    let renter = t.create_user("renter").await;
    let item = t.create_item(owner, "kayak", true).await;

    let booking = t.create_booking(renter, item, 1, 3).await;

    let (status, body) = t
        .send("GET", &format!("/bookings/{booking}"), Some(renter), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "WAITING");

    let (status, body) = t.decide(owner, booking, true).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["status"], "APPROVED");
}

#[tokio::test]
async fn second_decision_conflicts_with_distinct_messages() {
    let t = test_app();
    let owner = t.create_user("owner").await;
    let renter = t.create_user("renter").await;
    let item = t.create_item(owner, "kayak", true).await;

    let approved = t.create_booking(renter, item, 1, 2).await;
    t.decide(owner, approved, true).await;
    let (status, body) = t.decide(owner, approved, true).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "ALREADY_DECIDED");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("already approved"));

    let rejected = t.create_booking(renter, item, 5, 6).await;
    t.decide(owner, rejected, false).await;
    let (status, body) = t.decide(owner, rejected, true).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("already rejected"));
}

#[tokio::test]
async fn renter_cannot_decide() {
    let t = test_app();
    let owner = t.create_user("owner").await;
    let renter = t.create_user("renter").await;
    let item = t.create_item(owner, "kayak", true).await;
    let booking = t.create_booking(renter, item, 1, 2).await;

    let (status, body) = t.decide(renter, booking, true).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "NOT_AUTHORIZED");
}

#[tokio::test]
async fn stranger_cannot_read_a_booking() {
    let t = test_app();
    let owner = t.create_user("owner").await;
    let renter = t.create_user("renter").await;
    let stranger = t.create_user("stranger").await;
    let item = t.create_item(owner, "kayak", true).await;
    let booking = t.create_booking(renter, item, 1, 2).await;

    for reader in [renter, owner] {
        let (status, _) = t
            .send("GET", &format!("/bookings/{booking}"), Some(reader), None)
            .await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, body) = t
        .send("GET", &format!("/bookings/{booking}"), Some(stranger), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "NOT_AUTHORIZED");
}

#[tokio::test]
async fn self_booking_is_denied_as_not_found() {
    let t = test_app();
    let owner = t.create_user("owner").await;
    let item = t.create_item(owner, "kayak", true).await;

    let (status, body) = t
        .send(
            "POST",
            "/bookings",
            Some(owner),
            Some(json!({
                "item_id": item,
                "start": t0() + Duration::days(1),
                "end": t0() + Duration::days(2),
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "SELF_BOOKING_DENIED");
}

#[tokio::test]
async fn inverted_window_and_unavailable_item_are_unprocessable() {
    let t = test_app();
    let owner = t.create_user("owner").await;
    let renter = t.create_user("renter").await;
    let item = t.create_item(owner, "kayak", true).await;

    let (status, body) = t
        .send(
            "POST",
            "/bookings",
            Some(renter),
            Some(json!({
                "item_id": item,
                "start": t0() + Duration::days(2),
                "end": t0() + Duration::days(1),
            })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), "INVALID_WINDOW");

    let hidden = t.create_item(owner, "tent", false).await;
    let (status, body) = t
        .send(
            "POST",
            "/bookings",
            Some(renter),
            Some(json!({
                "item_id": hidden,
                "start": t0() + Duration::days(1),
                "end": t0() + Duration::days(2),
            })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), "ITEM_UNAVAILABLE");
}

#[tokio::test]
async fn approved_window_blocks_new_overlap_but_waiting_does_not() {
    let t = test_app();
    let owner = t.create_user("owner").await;
    let first = t.create_user("first").await;
    let second = t.create_user("second").await;
    let item = t.create_item(owner, "kayak", true).await;

    // Overlapping WAITING bookings coexist.
    let b1 = t.create_booking(first, item, 1, 3).await;
    t.create_booking(second, item, 2, 4).await;

    // Approve the first; the same window is now closed.
    t.decide(owner, b1, true).await;
    let (status, body) = t
        .send(
            "POST",
            "/bookings",
            Some(second),
            Some(json!({
                "item_id": item,
                "start": t0() + Duration::days(2),
                "end": t0() + Duration::days(4),
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "WINDOW_CONFLICT");
}

#[tokio::test]
async fn losing_approval_after_a_won_race_conflicts() {
    let t = test_app();
    let owner = t.create_user("owner").await;
    let first = t.create_user("first").await;
    let second = t.create_user("second").await;
    let item = t.create_item(owner, "kayak", true).await;

    let b1 = t.create_booking(first, item, 1, 3).await;
    let b2 = t.create_booking(second, item, 2, 4).await;

    let (status, _) = t.decide(owner, b1, true).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = t.decide(owner, b2, true).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "WINDOW_CONFLICT");

    // The loser is still WAITING and may be rejected.
    let (status, body) = t.decide(owner, b2, false).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "REJECTED");
}

// ── Listings ───────────────────────────────────────────────────────

#[tokio::test]
async fn renter_listing_is_newest_start_first_and_filterable() {
    let t = test_app();
    let owner = t.create_user("owner").await;
    let renter = t.create_user("renter").await;
    let item = t.create_item(owner, "kayak", true).await;

    let early = t.create_booking(renter, item, 1, 2).await;
    let late = t.create_booking(renter, item, 5, 6).await;
    t.decide(owner, late, false).await;

    let (status, body) = t.send("GET", "/bookings", Some(renter), None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![late.to_string(), early.to_string()]);

    let (status, body) = t
        .send("GET", "/bookings?state=REJECTED", Some(renter), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let rejected = body.as_array().unwrap();
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0]["id"], late.to_string());
}

#[tokio::test]
async fn current_and_past_filters_follow_the_clock() {
    let t = test_app();
    let owner = t.create_user("owner").await;
    let renter = t.create_user("renter").await;
    let item = t.create_item(owner, "kayak", true).await;
    let booking = t.create_booking(renter, item, 1, 3).await;

    t.clock.advance(Duration::days(2));
    let (_, body) = t
        .send("GET", "/bookings?state=CURRENT", Some(renter), None)
        .await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], booking.to_string());

    t.clock.advance(Duration::days(2));
    let (_, body) = t
        .send("GET", "/bookings?state=CURRENT", Some(renter), None)
        .await;
    assert!(body.as_array().unwrap().is_empty());
    let (_, body) = t
        .send("GET", "/bookings?state=PAST", Some(renter), None)
        .await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_state_filter_fails_closed() {
    let t = test_app();
    let renter = t.create_user("renter").await;
    let (status, body) = t
        .send("GET", "/bookings?state=UNSUPPORTED_STATUS", Some(renter), None)
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), "VALIDATION_ERROR");
}

#[tokio::test]
async fn no_history_is_not_found_but_empty_filtered_page_is_ok() {
    let t = test_app();
    let owner = t.create_user("owner").await;
    let renter = t.create_user("renter").await;
    let item = t.create_item(owner, "kayak", true).await;

    let (status, body) = t.send("GET", "/bookings", Some(renter), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "NO_BOOKING_HISTORY");

    t.create_booking(renter, item, 1, 2).await;
    let (status, body) = t
        .send("GET", "/bookings?state=REJECTED", Some(renter), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn owner_listing_spans_all_owned_items() {
    let t = test_app();
    let owner = t.create_user("owner").await;
    let renter = t.create_user("renter").await;
    let kayak = t.create_item(owner, "kayak", true).await;
    let tent = t.create_item(owner, "tent", true).await;

    t.create_booking(renter, kayak, 1, 2).await;
    t.create_booking(renter, tent, 3, 4).await;

    let (status, body) = t.send("GET", "/bookings/owner", Some(owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    // The renter has no owner-side history.
    let (status, body) = t.send("GET", "/bookings/owner", Some(renter), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "NO_BOOKING_HISTORY");
}

#[tokio::test]
async fn pagination_from_is_a_page_index_seed() {
    let t = test_app();
    let owner = t.create_user("owner").await;
    let renter = t.create_user("renter").await;
    let item = t.create_item(owner, "kayak", true).await;

    // Six bookings, newest start first in listings.
    for day in 1..=6 {
        t.create_booking(renter, item, day, day + 1).await;
    }

    let (status, body) = t
        .send("GET", "/bookings?from=3&size=2", Some(renter), None)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    // from=3, size=2 selects page 1 (rows 2..4 of the descending list),
    // not rows starting at offset 3.
    let starts: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["start"].as_str().unwrap())
        .collect();
    assert_eq!(starts.len(), 2);
    assert!(starts[0] > starts[1], "still newest first inside the page");

    let (status, body) = t
        .send("GET", "/bookings?from=3", Some(renter), None)
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{body}");
}

// ── Projections & comments ─────────────────────────────────────────

#[tokio::test]
async fn owner_sees_projection_other_viewers_do_not() {
    let t = test_app();
    let owner = t.create_user("owner").await;
    let renter = t.create_user("renter").await;
    let item = t.create_item(owner, "kayak", true).await;
    let booking = t.create_booking(renter, item, 1, 2).await;

    let (_, body) = t
        .send("GET", &format!("/items/{item}"), Some(owner), None)
        .await;
    assert_eq!(body["last_booking"]["id"], booking.to_string());
    assert_eq!(body["next_booking"]["id"], booking.to_string());
    assert_eq!(body["next_booking"]["booker_id"], renter.to_string());

    let (_, body) = t
        .send("GET", &format!("/items/{item}"), Some(renter), None)
        .await;
    assert!(body.get("last_booking").is_none());
    assert!(body.get("next_booking").is_none());
}

#[tokio::test]
async fn last_projection_is_the_earliest_start_overall() {
    let t = test_app();
    let owner = t.create_user("owner").await;
    let renter = t.create_user("renter").await;
    let item = t.create_item(owner, "kayak", true).await;

    let first = t.create_booking(renter, item, 1, 2).await;
    t.create_booking(renter, item, 3, 4).await;
    let third = t.create_booking(renter, item, 6, 7).await;

    t.clock.advance(Duration::days(5));
    let (_, body) = t
        .send("GET", &format!("/items/{item}"), Some(owner), None)
        .await;
    assert_eq!(body["last_booking"]["id"], first.to_string());
    assert_eq!(body["next_booking"]["id"], third.to_string());
}

#[tokio::test]
async fn comment_gate_enforces_a_started_approved_booking() {
    let t = test_app();
    let owner = t.create_user("owner").await;
    let renter = t.create_user("renter").await;
    let item = t.create_item(owner, "kayak", true).await;
    let path = format!("/items/{item}/comments");
    let comment = json!({ "text": "stable and fast" });

    // No booking at all.
    let (status, body) = t.send("POST", &path, Some(renter), Some(comment.clone())).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), "NO_ELIGIBLE_BOOKING");

    // Approved but still in the future.
    let booking = t.create_booking(renter, item, 1, 3).await;
    t.decide(owner, booking, true).await;
    let (status, body) = t.send("POST", &path, Some(renter), Some(comment.clone())).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), "BOOKING_NOT_YET_STARTED");

    // Started: the comment lands and shows up on the item read.
    t.clock.advance(Duration::days(2));
    let (status, body) = t.send("POST", &path, Some(renter), Some(comment)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["text"], "stable and fast");

    let (_, body) = t
        .send("GET", &format!("/items/{item}"), Some(renter), None)
        .await;
    assert_eq!(body["comments"].as_array().unwrap().len(), 1);

    // Blank text never reaches the gate.
    let (status, _) = t
        .send("POST", &path, Some(renter), Some(json!({ "text": "  " })))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn owner_item_listing_carries_projections_and_pages() {
    let t = test_app();
    let owner = t.create_user("owner").await;
    let renter = t.create_user("renter").await;
    let kayak = t.create_item(owner, "kayak", true).await;
    t.create_item(owner, "tent", true).await;
    let booking = t.create_booking(renter, kayak, 1, 2).await;

    let (status, body) = t.send("GET", "/items", Some(owner), None).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["next_booking"]["id"], booking.to_string());
    assert!(items[1].get("next_booking").is_none());

    let (status, body) = t.send("GET", "/items?from=0&size=1", Some(owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn pagination_seed_past_u32_is_rejected_not_truncated() {
    let t = test_app();
    let owner = t.create_user("owner").await;
    let renter = t.create_user("renter").await;
    let item = t.create_item(owner, "kayak", true).await;
    for day in 1..=6 {
        t.create_booking(renter, item, day, day + 1).await;
    }

    // 4294967299 would wrap to 3 if cast blindly and return a wrong page.
    let (status, body) = t
        .send("GET", "/bookings?from=4294967299&size=2", Some(renter), None)
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{body}");
    assert_eq!(error_code(&body), "VALIDATION_ERROR");
}

// ── Item requests ──────────────────────────────────────────────────

#[tokio::test]
async fn item_request_lifecycle_collects_answers() {
    let t = test_app();
    let requester = t.create_user("requester").await;
    let owner = t.create_user("owner").await;

    let (status, body) = t
        .send(
            "POST",
            "/requests",
            Some(requester),
            Some(json!({ "description": "need a sea kayak" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let request_id: Uuid = body["id"].as_str().unwrap().parse().unwrap();
    assert_eq!(body["requester_id"], requester.to_string());
    assert!(body["items"].as_array().unwrap().is_empty());

    // Other sharers see it under /requests/all; the requester does not.
    let (status, body) = t.send("GET", "/requests/all", Some(owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    let (_, body) = t.send("GET", "/requests/all", Some(requester), None).await;
    assert!(body.as_array().unwrap().is_empty());

    // The owner answers by listing an item linked to the request.
    let (status, body) = t
        .send(
            "POST",
            "/items",
            Some(owner),
            Some(json!({
                "name": "kayak",
                "description": "sea kayak",
                "available": true,
                "request_id": request_id,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let item_id = body["id"].as_str().unwrap();
    assert_eq!(body["request_id"], request_id.to_string());

    // The answer shows up on every request read.
    let (status, body) = t
        .send("GET", &format!("/requests/{request_id}"), Some(owner), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"][0]["id"], item_id);
    assert_eq!(body["items"][0]["request_id"], request_id.to_string());

    let (_, body) = t.send("GET", "/requests", Some(requester), None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn request_endpoints_validate_sharer_and_request() {
    let t = test_app();
    let user = t.create_user("user").await;

    // Blank description never creates a request.
    let (status, body) = t
        .send(
            "POST",
            "/requests",
            Some(user),
            Some(json!({ "description": "  " })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), "VALIDATION_ERROR");

    // Unregistered sharers get 404 on every request read.
    let stranger = Uuid::new_v4();
    let (status, body) = t.send("GET", "/requests", Some(stranger), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "USER_NOT_FOUND");

    // Unknown request id.
    let missing = Uuid::new_v4();
    let (status, body) = t
        .send("GET", &format!("/requests/{missing}"), Some(user), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "REQUEST_NOT_FOUND");

    // An item cannot claim to answer a request that does not exist.
    let (status, body) = t
        .send(
            "POST",
            "/items",
            Some(user),
            Some(json!({
                "name": "kayak",
                "description": "sea kayak",
                "available": true,
                "request_id": missing,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND, "{body}");
    assert_eq!(error_code(&body), "REQUEST_NOT_FOUND");
}

#[tokio::test]
async fn other_requests_listing_is_oldest_first_and_pages() {
    let t = test_app();
    let requester = t.create_user("requester").await;
    let viewer = t.create_user("viewer").await;

    for thing in ["tent", "drill", "ladder"] {
        let (status, _) = t
            .send(
                "POST",
                "/requests",
                Some(requester),
                Some(json!({ "description": format!("need a {thing}") })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = t.send("GET", "/requests/all", Some(viewer), None).await;
    assert_eq!(status, StatusCode::OK);
    let descriptions: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["description"].as_str().unwrap())
        .collect();
    assert_eq!(descriptions, vec!["need a tent", "need a drill", "need a ladder"]);

    let (status, body) = t
        .send("GET", "/requests/all?from=0&size=2", Some(viewer), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, _) = t
        .send("GET", "/requests/all?size=2", Some(viewer), None)
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
