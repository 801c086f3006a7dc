mod common;

use actix_web::{App, http::StatusCode, test};
use serde_json::{Value, json};

use common::TestContext;
use timeflow::adapters::http::{ApiRouteDependencies, RequestIdMiddleware, configure_api_routes};
use timeflow::domain::tracking::CurrencyCode;

fn dependencies(ctx: &TestContext) -> ApiRouteDependencies {
  ApiRouteDependencies::new(
    ctx.tracking.clone(),
    ctx.invoices.clone(),
    ctx.reporting.clone(),
    CurrencyCode::usd(),
    200,
  )
}

macro_rules! init_app {
  ($ctx:expr) => {{
    let deps = dependencies(&$ctx);
    test::init_service(
      App::new()
        .wrap(RequestIdMiddleware::new())
        .configure(move |cfg| configure_api_routes(cfg, deps)),
    )
    .await
  }};
}

#[actix_web::test]
async fn test_health() {
  let ctx = TestContext::new();
  let app = init_app!(ctx);

  let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert!(resp.headers().contains_key("x-request-id"));

  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn test_invoice_lifecycle_over_http() {
  let ctx = TestContext::new();
  let app = init_app!(ctx);

  // Catalog
  let req = test::TestRequest::post()
    .uri("/api/v1/clients")
    .set_json(json!({ "name": "Acme", "defaultRate": "50" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let client: Value = test::read_body_json(resp).await;
  assert_eq!(client["currency"], "USD");
  let client_id = client["id"].as_str().unwrap().to_string();

  let req = test::TestRequest::post()
    .uri("/api/v1/projects")
    .set_json(json!({ "clientId": client_id, "name": "Website" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let project: Value = test::read_body_json(resp).await;
  let project_id = project["id"].as_str().unwrap().to_string();

  // Time
  let req = test::TestRequest::post()
    .uri("/api/v1/time")
    .set_json(json!({
      "clientId": client_id,
      "projectId": project_id,
      "startAt": "2025-01-10T09:00:00Z",
      "endAt": "2025-01-10T10:01:01Z",
      "durationSeconds": 3661,
      "note": "Homepage",
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let entry: Value = test::read_body_json(resp).await;
  assert_eq!(entry["durationSeconds"], 3661);
  assert_eq!(entry["invoiced"], false);
  let entry_id = entry["id"].as_str().unwrap().to_string();

  // Preview
  let req = test::TestRequest::post()
    .uri("/api/v1/invoices/preview")
    .set_json(json!({ "clientId": client_id, "start": "2025-01-01", "end": "2025-01-31" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let preview: Value = test::read_body_json(resp).await;
  assert_eq!(preview["lines"][0]["displaySeconds"], 3660);
  assert_eq!(preview["lines"][0]["_seconds"], 3660);
  assert_eq!(preview["lines"][0]["amount"], "50.83");
  assert_eq!(preview["totals"]["subtotal"], "50.83");
  assert_eq!(preview["currency"], "USD");

  // Number
  let req = test::TestRequest::get()
    .uri("/api/v1/counters/next-invoice")
    .to_request();
  let number: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(number["number"], 1001);

  // Commit
  let invoice_body = json!({
    "clientId": client_id,
    "number": 1001,
    "issueDate": "2025-02-01",
    "totals": preview["totals"],
    "lines": preview["lines"],
  });
  let req = test::TestRequest::post()
    .uri("/api/v1/invoices")
    .set_json(&invoice_body)
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let invoice: Value = test::read_body_json(resp).await;
  assert_eq!(invoice["number"], 1001);
  assert_eq!(invoice["dueDate"], "2025-02-15");
  assert_eq!(invoice["status"], "draft");
  assert_eq!(invoice["grandTotal"], "50.83");
  let invoice_id = invoice["id"].as_str().unwrap().to_string();

  // Same entries again
  let mut again = invoice_body.clone();
  again["number"] = json!(1002);
  let req = test::TestRequest::post()
    .uri("/api/v1/invoices")
    .set_json(&again)
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CONFLICT);
  let error: Value = test::read_body_json(resp).await;
  assert_eq!(error["error"], "conflict");

  // Status
  let req = test::TestRequest::patch()
    .uri(&format!("/api/v1/invoices/{}/status", invoice_id))
    .set_json(json!({ "status": "sent" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let req = test::TestRequest::get()
    .uri(&format!("/api/v1/invoices/{}", invoice_id))
    .to_request();
  let details: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(details["status"], "sent");
  assert_eq!(details["lines"].as_array().unwrap().len(), 1);
  assert_eq!(details["lines"][0]["timeEntryId"], entry_id);

  let req = test::TestRequest::get().uri("/api/v1/invoices").to_request();
  let list: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(list["invoices"].as_array().unwrap().len(), 1);

  // Nothing left to bill
  let req = test::TestRequest::get()
    .uri("/api/v1/metrics/uninvoiced-amount")
    .to_request();
  let amount: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(amount["amount"], "0.00");

  // Delete releases the entry
  let req = test::TestRequest::delete()
    .uri(&format!("/api/v1/invoices/{}", invoice_id))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let deleted: Value = test::read_body_json(resp).await;
  assert_eq!(deleted["releasedEntries"], json!([entry_id]));

  let req = test::TestRequest::get()
    .uri("/api/v1/metrics/uninvoiced-amount")
    .to_request();
  let amount: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(amount["amount"], "50.83");

  let req = test::TestRequest::delete()
    .uri(&format!("/api/v1/invoices/{}", invoice_id))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_revise_preview_over_http() {
  let ctx = TestContext::new();
  let app = init_app!(ctx);

  let draft = json!({
    "lines": [],
    "totals": { "hoursSeconds": 0, "subtotal": "0", "grandTotal": "0" },
    "currency": "USD",
  });
  let req = test::TestRequest::post()
    .uri("/api/v1/invoices/preview/revise")
    .set_json(json!({
      "draft": draft,
      "edits": [
        { "op": "addManualLine", "date": "2025-01-15", "hours": "2", "rate": "75", "project": "Consulting" },
        { "op": "setDescription", "index": 0, "description": "Workshop" },
        { "op": "setRate", "index": 0, "rate": "80" },
      ],
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let revised: Value = test::read_body_json(resp).await;
  assert_eq!(revised["lines"][0]["description"], "Workshop");
  assert_eq!(revised["lines"][0]["displaySeconds"], 7200);
  assert_eq!(revised["lines"][0]["amount"], "160.00");
  assert_eq!(revised["lines"][0]["entryId"], Value::Null);
  assert_eq!(revised["totals"]["subtotal"], "160.00");

  let req = test::TestRequest::post()
    .uri("/api/v1/invoices/preview/revise")
    .set_json(json!({
      "draft": draft,
      "edits": [{ "op": "setRate", "index": 3, "rate": "80" }],
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_write_path_errors_map_to_status_codes() {
  let ctx = TestContext::new();
  let acme = ctx.client("Acme", rust_decimal::Decimal::from(50)).await;
  let globex = ctx.client("Globex", rust_decimal::Decimal::from(50)).await;
  let globex_project = ctx.project(globex.id, "Intranet", None).await;
  let app = init_app!(ctx);

  // Project of another client
  let req = test::TestRequest::post()
    .uri("/api/v1/time")
    .set_json(json!({
      "clientId": acme.id,
      "projectId": globex_project.id,
      "startAt": "2025-01-10T09:00:00Z",
      "endAt": "2025-01-10T10:00:00Z",
      "durationSeconds": 3600,
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

  // Zero duration
  let req = test::TestRequest::post()
    .uri("/api/v1/time")
    .set_json(json!({
      "clientId": globex.id,
      "projectId": globex_project.id,
      "startAt": "2025-01-10T09:00:00Z",
      "endAt": "2025-01-10T10:00:00Z",
      "durationSeconds": 0,
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  // Duration far beyond any tracked span
  let req = test::TestRequest::post()
    .uri("/api/v1/time")
    .set_json(json!({
      "clientId": globex.id,
      "projectId": globex_project.id,
      "startAt": "2025-01-10T09:00:00Z",
      "endAt": "2025-01-10T10:00:00Z",
      "durationSeconds": i64::MAX,
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  // Rate wider than the stored precision
  let req = test::TestRequest::post()
    .uri("/api/v1/clients")
    .set_json(json!({ "name": "Initech", "defaultRate": "10000000000" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  // Manual line whose amount cannot be represented
  let req = test::TestRequest::post()
    .uri("/api/v1/invoices/preview/revise")
    .set_json(json!({
      "draft": {
        "lines": [],
        "totals": { "hoursSeconds": 0, "subtotal": "0", "grandTotal": "0" },
        "currency": "USD",
      },
      "edits": [{ "op": "addManualLine", "hours": "10", "rate": rust_decimal::Decimal::MAX }],
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  // Unknown client
  let req = test::TestRequest::post()
    .uri("/api/v1/projects")
    .set_json(json!({ "clientId": uuid::Uuid::new_v4(), "name": "Ghost" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);

  // Unparseable date
  let req = test::TestRequest::post()
    .uri("/api/v1/invoices/preview")
    .set_json(json!({ "clientId": acme.id, "start": "last week", "end": "2025-01-31" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  // Malformed body
  let req = test::TestRequest::post()
    .uri("/api/v1/invoices/preview")
    .set_json(json!({ "start": "2025-01-01" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let error: Value = test::read_body_json(resp).await;
  assert_eq!(error["error"], "validation_error");

  // Empty status
  let req = test::TestRequest::patch()
    .uri(&format!("/api/v1/invoices/{}/status", uuid::Uuid::new_v4()))
    .set_json(json!({ "status": "" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  // Limit out of range
  let req = test::TestRequest::get()
    .uri("/api/v1/time/recent?limit=0")
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_catalog_listing_and_metrics() {
  let ctx = TestContext::new();
  let acme = ctx.client("Acme", rust_decimal::Decimal::from(50)).await;
  ctx.client("Beta", rust_decimal::Decimal::from(50)).await;
  let project = ctx.project(acme.id, "Website", None).await;
  ctx.todo(project.id, "Zeta task").await;
  ctx.todo(project.id, "Alpha task").await;
  ctx
    .entry(&project, None, "2025-01-10T09:00:00Z", 1800, "")
    .await;
  let app = init_app!(ctx);

  let req = test::TestRequest::get().uri("/api/v1/clients").to_request();
  let clients: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(clients[0]["name"], "Acme");
  assert_eq!(clients[1]["name"], "Beta");

  let req = test::TestRequest::get().uri("/api/v1/todos").to_request();
  let todos: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(todos[0]["title"], "Alpha task");
  assert_eq!(todos[1]["title"], "Zeta task");

  let req = test::TestRequest::get()
    .uri("/api/v1/time/recent?limit=5")
    .to_request();
  let recent: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(recent.as_array().unwrap().len(), 1);

  let req = test::TestRequest::post()
    .uri("/api/v1/metrics/summary-range")
    .set_json(json!({ "start": "2025-01-01", "end": "2025-01-31" }))
    .to_request();
  let summary: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(summary["totals"]["totalSeconds"], 1800);
  assert_eq!(summary["byClient"][0]["clientName"], "Acme");
  assert_eq!(summary["byClient"][1]["totalSeconds"], 0);

  let req = test::TestRequest::get().uri("/api/v1/time/export").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(
    resp.headers().get("content-type").unwrap(),
    "text/csv; charset=utf-8"
  );
  let body = test::read_body(resp).await;
  let text = String::from_utf8(body.to_vec()).unwrap();
  assert!(text.starts_with(r#""Date","Client""#));

  let req = test::TestRequest::post()
    .uri("/api/v1/time/mark-invoiced")
    .set_json(json!({ "ids": [uuid::Uuid::new_v4()] }))
    .to_request();
  let marked: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(marked["requested"], 1);
  assert_eq!(marked["updated"], 0);
}
