//! Full axum HTTP roundtrip with a reqwest client.

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::{json, Value};
use teams_todo::{
    handlers, router, ClaimsIdentityResolver, InMemoryTodoStore, StaticIdentityResolver, TodoApp,
};
use tokio::net::TcpListener;

use crate::support::{ada, grace};

async fn spawn(app: Arc<TodoApp<InMemoryTodoStore>>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router(app)).await.unwrap();
    });

    format!("http://{}", addr)
}

fn static_app() -> Arc<TodoApp<InMemoryTodoStore>> {
    let resolver = StaticIdentityResolver::new()
        .with_token("tok-ada", ada())
        .with_token("tok-grace", grace());
    Arc::new(TodoApp::new(
        handlers::todo_service(InMemoryTodoStore::new()),
        resolver,
    ))
}

#[tokio::test]
async fn axum_http_roundtrip() {
    let base = spawn(static_app()).await;
    let url = format!("{}/todo", base);
    let client = reqwest::Client::new();

    // 1. Create
    let resp = client
        .post(&url)
        .bearer_auth("tok-ada")
        .json(&json!({
            "description": "buy milk",
            "isCompleted": false,
            "channelOrChatId": "chat1"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let created: Value = resp.json().await.unwrap();
    assert_eq!(created["objectId"], "U1");
    let id = created["id"].as_str().unwrap().to_string();

    // 2. List
    let resp = client
        .get(&url)
        .query(&[("channelOrChatId", "chat1")])
        .bearer_auth("tok-grace")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let todos: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0]["description"], "buy milk");
    assert_eq!(todos[0]["isCompleted"], 0);

    // 3. Complete; empty body back
    let resp = client
        .put(&url)
        .bearer_auth("tok-ada")
        .json(&json!({ "id": id, "isCompleted": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.bytes().await.unwrap().is_empty());

    let todos: Vec<Value> = client
        .get(&url)
        .query(&[("channelOrChatId", "chat1")])
        .bearer_auth("tok-ada")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(todos[0]["isCompleted"], 1);
    assert_eq!(todos[0]["description"], "buy milk");

    // 4. Delete by id
    let resp = client
        .delete(&url)
        .bearer_auth("tok-ada")
        .json(&json!({ "id": id }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let todos: Vec<Value> = client
        .get(&url)
        .query(&[("channelOrChatId", "chat1")])
        .bearer_auth("tok-ada")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(todos.is_empty());
}

#[tokio::test]
async fn bulk_delete_without_body() {
    let app = static_app();
    let base = spawn(app.clone()).await;
    let url = format!("{}/todo", base);
    let client = reqwest::Client::new();

    for (token, description) in [("tok-ada", "a1"), ("tok-ada", "a2"), ("tok-grace", "g1")] {
        let resp = client
            .post(&url)
            .bearer_auth(token)
            .json(&json!({ "description": description, "isCompleted": 0, "channelOrChatId": "chat1" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    let resp = client.delete(&url).bearer_auth("tok-ada").send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let store = app.service().store();
    assert_eq!(store.len().unwrap(), 1);
}

#[tokio::test]
async fn failures_use_error_envelope() {
    let base = spawn(static_app()).await;
    let url = format!("{}/todo", base);
    let client = reqwest::Client::new();

    // No token
    let resp = client
        .get(&url)
        .query(&[("channelOrChatId", "chat1")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "unauthorized: missing bearer token" }));

    // Unknown token
    let resp = client.get(&url).bearer_auth("tok-nobody").send().await.unwrap();
    assert_eq!(resp.status(), 401);

    // Missing channelOrChatId
    let resp = client.get(&url).bearer_auth("tok-ada").send().await.unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());

    // Broken JSON
    let resp = client
        .post(&url)
        .bearer_auth("tok-ada")
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // Unsupported method
    let resp = client.patch(&url).bearer_auth("tok-ada").send().await.unwrap();
    assert_eq!(resp.status(), 405);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "method not allowed: PATCH" }));
}

#[tokio::test]
async fn oversized_body_uses_error_envelope() {
    let base = spawn(static_app()).await;
    let client = reqwest::Client::new();

    let description = "x".repeat(teams_todo::service::MAX_BODY_BYTES + 1);
    let resp = client
        .post(format!("{}/todo", base))
        .bearer_auth("tok-ada")
        .json(&json!({ "description": description, "channelOrChatId": "chat1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 413);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn health_and_me() {
    let base = spawn(static_app()).await;
    let client = reqwest::Client::new();

    let health: Value = client
        .get(format!("{}/health", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        health,
        json!({ "ok": true, "methods": ["DELETE", "GET", "POST", "PUT"] })
    );

    let me: Value = client
        .get(format!("{}/me", base))
        .bearer_auth("tok-grace")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(me["objectId"], "U2");
    assert_eq!(me["displayName"], "Grace");
    assert_eq!(me["profile"]["objectId"], "U2");
}

#[tokio::test]
async fn claims_resolver_over_http() {
    let app = Arc::new(TodoApp::new(
        handlers::todo_service(InMemoryTodoStore::new()),
        ClaimsIdentityResolver::new().with_audience("api://todo"),
    ));
    let base = spawn(app).await;
    let client = reqwest::Client::new();

    let token = |claims: Value| {
        format!(
            "{}.{}.sig",
            URL_SAFE_NO_PAD.encode(br#"{"alg":"none"}"#),
            URL_SAFE_NO_PAD.encode(claims.to_string())
        )
    };

    let good = token(json!({ "oid": "U7", "name": "Lin", "aud": "api://todo", "tid": "T1" }));
    let me: Value = client
        .get(format!("{}/me", base))
        .bearer_auth(&good)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(me["objectId"], "U7");
    assert_eq!(me["profile"]["tenantId"], "T1");

    let expired = token(json!({ "oid": "U7", "aud": "api://todo", "exp": 1 }));
    let resp = client
        .get(format!("{}/todo", base))
        .query(&[("channelOrChatId", "c")])
        .bearer_auth(&expired)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let wrong_audience = token(json!({ "oid": "U7", "aud": "api://other" }));
    let resp = client
        .get(format!("{}/me", base))
        .bearer_auth(&wrong_audience)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}
