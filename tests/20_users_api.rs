mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn create_returns_201_with_generated_id() -> Result<()> {
    let (server, _) = common::spawn().await?;

    let payload = json!({ "email": "a@b.com", "name": "A", "age": 5, "city": "X", "zipCode": "12345" });
    let res = server.post("/users", &payload).send().await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = res.json::<Value>().await?;
    assert!(body["id"].is_i64(), "missing generated id: {}", body);
    for field in ["email", "name", "age", "city", "zipCode"] {
        assert_eq!(body[field], payload[field], "field {} changed", field);
    }
    Ok(())
}

#[tokio::test]
async fn create_rejects_client_supplied_id() -> Result<()> {
    let (server, store) = common::spawn().await?;

    let mut payload = common::john();
    payload["id"] = json!(777);
    let res = server.post("/users", &payload).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.text().await?, "\"id\" is not allowed");

    assert!(store.raw_row(777).is_none());
    assert_eq!(store.write_count(), 0);
    Ok(())
}

#[tokio::test]
async fn create_then_get_returns_same_fields() -> Result<()> {
    let (server, _) = common::spawn().await?;

    let created = common::create_user(&server, &common::john()).await?;
    let res = server.get(&format!("/users/{}", created["id"])).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, created);
    Ok(())
}

#[tokio::test]
async fn create_rejects_invalid_payloads() -> Result<()> {
    let (server, store) = common::spawn().await?;

    let res = server.post("/users", &json!({ "email": "invalid-email" })).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.text().await?, "\"email\" must be a valid email");

    let mut payload = common::john();
    payload["zipCode"] = json!("1234");
    let res = server.post("/users", &payload).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.text().await?, "\"zipCode\" length must be 5 characters long");

    assert_eq!(store.write_count(), 0);
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() -> Result<()> {
    let (server, _) = common::spawn().await?;

    let res = server
        .client
        .post(server.api("/users"))
        .basic_auth(common::AUTH_USER, Some(common::AUTH_PASS))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{\"email\": ")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn list_returns_live_users_only() -> Result<()> {
    let (server, _) = common::spawn().await?;

    let first = common::create_user(&server, &common::john()).await?;
    let second = common::create_user(&server, &common::john()).await?;

    let res = server.delete(&format!("/users/{}", first["id"])).send().await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let users = server.get("/users").send().await?.json::<Vec<Value>>().await?;
    let ids: Vec<&Value> = users.iter().map(|u| &u["id"]).collect();
    assert_eq!(ids, vec![&second["id"]]);
    Ok(())
}

#[tokio::test]
async fn get_with_non_integer_id_is_400() -> Result<()> {
    let (server, _) = common::spawn().await?;

    for id in ["abc", "invalid-id", "1.5"] {
        let res = server.get(&format!("/users/{}", id)).send().await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "id {}", id);
        assert!(res.text().await?.starts_with("\"value\" must be"));
    }
    Ok(())
}

#[tokio::test]
async fn get_unknown_user_is_404() -> Result<()> {
    let (server, _) = common::spawn().await?;

    let res = server.get("/users/42").send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await?, "User not found");
    Ok(())
}

#[tokio::test]
async fn put_replaces_all_fields() -> Result<()> {
    let (server, _) = common::spawn().await?;
    let created = common::create_user(&server, &common::john()).await?;

    let replacement = json!({
        "email": "jane@example.com",
        "name": "Jane Roe",
        "age": 41,
        "city": "LA",
        "zipCode": "90001"
    });
    let res = server.put(&format!("/users/{}", created["id"]), &replacement).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["id"], created["id"]);
    for field in ["email", "name", "age", "city", "zipCode"] {
        assert_eq!(body[field], replacement[field]);
    }
    Ok(())
}

#[tokio::test]
async fn put_validates_id_and_body() -> Result<()> {
    let (server, _) = common::spawn().await?;

    let res = server.put("/users/abc", &common::john()).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = server.put("/users/1", &json!({ "name": "Only" })).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.text().await?, "\"email\" is required");

    let res = server.put("/users/1", &common::john()).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await?, "User not found");
    Ok(())
}

#[tokio::test]
async fn patch_changes_only_supplied_fields() -> Result<()> {
    let (server, _) = common::spawn().await?;
    let created = common::create_user(&server, &common::john()).await?;
    assert_eq!(created["age"], 30);

    let res = server.patch("/users/1", &json!({ "age": 31 })).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["age"], 31);
    for field in ["id", "email", "name", "city", "zipCode"] {
        assert_eq!(body[field], created[field], "field {} changed", field);
    }

    let stored = server.get("/users/1").send().await?.json::<Value>().await?;
    assert_eq!(stored, body);
    Ok(())
}

#[tokio::test]
async fn patch_converts_numeric_string_age() -> Result<()> {
    let (server, _) = common::spawn().await?;
    common::create_user(&server, &common::john()).await?;

    let res = server.patch("/users/1", &json!({ "age": "31" })).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?["age"], 31);
    Ok(())
}

#[tokio::test]
async fn patch_rejects_empty_and_invalid_payloads() -> Result<()> {
    let (server, store) = common::spawn().await?;
    common::create_user(&server, &common::john()).await?;
    let writes = store.write_count();

    let res = server.patch("/users/1", &json!({})).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.text().await?, "\"value\" must contain at least 1 key");

    let res = server.patch("/users/1", &json!({ "age": "invalid-age" })).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.text().await?, "\"age\" must be a number");

    let res = server.patch("/users/1", &json!({ "isDeleted": true })).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.text().await?, "\"isDeleted\" is not allowed");

    assert_eq!(store.write_count(), writes);
    Ok(())
}

#[tokio::test]
async fn patch_unknown_user_is_404() -> Result<()> {
    let (server, store) = common::spawn().await?;

    let res = server.patch("/users/9", &json!({ "age": 31 })).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await?, "User not found");
    assert_eq!(store.write_count(), 0);
    Ok(())
}

#[tokio::test]
async fn delete_is_soft_and_idempotent_for_existing_rows() -> Result<()> {
    let (server, store) = common::spawn().await?;
    let created = common::create_user(&server, &common::john()).await?;
    let path = format!("/users/{}", created["id"]);

    let res = server.delete(&path).send().await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.text().await?.is_empty());

    let res = server.get(&path).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Row is kept, flagged
    assert!(store.raw_row(1).map(|u| u.is_deleted).unwrap_or(false));

    // Second delete of an existing (already deleted) row still succeeds
    let res = server.delete(&path).send().await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    // But it can no longer be updated
    let res = server.patch(&path, &json!({ "age": 1 })).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_unknown_user_is_404() -> Result<()> {
    let (server, _) = common::spawn().await?;

    let res = server.delete("/users/999").send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await?, "User not found");

    let res = server.delete("/users/abc").send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn unknown_routes_are_404() -> Result<()> {
    let (server, _) = common::spawn().await?;

    let res = server.get("/accounts").send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await?, "Cannot GET /api/accounts");
    Ok(())
}
