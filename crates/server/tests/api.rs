#![forbid(unsafe_code)]

use bb_server::{AppState, ServerConfig, serve};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = base.join(format!("bb_server_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

async fn start(test_name: &str) -> SocketAddr {
    let config = ServerConfig {
        storage_dir: temp_dir(test_name),
        pool_size: 4,
        ..ServerConfig::default()
    };
    let state = AppState::new(&config).expect("open state");
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        serve(listener, state, std::future::pending())
            .await
            .expect("serve app")
    });
    addr
}

async fn send_raw(
    addr: SocketAddr,
    method: &str,
    path: &str,
    content_type: Option<&str>,
    body: &str,
) -> (u16, Value) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let mut req = format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n");
    if let Some(content_type) = content_type {
        req.push_str(&format!("Content-Type: {content_type}\r\n"));
    }
    req.push_str(&format!("Content-Length: {}\r\n\r\n{body}", body.len()));
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");

    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response must have separator");
    let status = head
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse::<u16>().ok())
        .expect("status code");
    let json = serde_json::from_str(body).unwrap_or(Value::Null);
    (status, json)
}

async fn get(addr: SocketAddr, path: &str) -> (u16, Value) {
    send_raw(addr, "GET", path, None, "").await
}

async fn send_json(addr: SocketAddr, method: &str, path: &str, body: Value) -> (u16, Value) {
    send_raw(
        addr,
        method,
        path,
        Some("application/json"),
        &body.to_string(),
    )
    .await
}

async fn create(addr: SocketAddr, board: &str, title: &str) -> i64 {
    let (status, json) = send_json(
        addr,
        "POST",
        "/api/posts",
        json!({ "board_type": board, "title": title, "author": "bob", "content": "hi" }),
    )
    .await;
    assert_eq!(status, 200, "create failed: {json}");
    json["id"].as_i64().expect("new id")
}

#[tokio::test]
async fn post_lifecycle_scenario() {
    let addr = start("post_lifecycle_scenario").await;

    let id = create(addr, "notice", "A").await;
    assert_eq!(id, 1);

    let (status, json) = get(addr, "/api/posts/1").await;
    assert_eq!(status, 200);
    assert_eq!(json["success"], json!(true));
    assert_eq!(json["data"]["view_count"], json!(1));
    assert_eq!(json["data"]["board_type"], json!("notice"));
    assert_eq!(json["data"]["board_name"], json!("Notices"));
    let created_at = json["data"]["created_at"].clone();

    let (_, json) = get(addr, "/api/posts/1").await;
    assert_eq!(json["data"]["view_count"], json!(2));

    let (status, json) = send_json(
        addr,
        "PUT",
        "/api/posts/1",
        json!({ "title": "B", "author": "bob", "content": "hi", "board_type": "free" }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(json, json!({ "success": true }));

    let (_, json) = get(addr, "/api/posts/1").await;
    assert_eq!(json["data"]["title"], json!("B"));
    assert_eq!(json["data"]["board_type"], json!("notice"));
    assert_eq!(json["data"]["created_at"], created_at);
    assert_eq!(json["data"]["view_count"], json!(3));

    let (status, json) = send_raw(addr, "DELETE", "/api/posts/1", None, "").await;
    assert_eq!(status, 200);
    assert_eq!(json, json!({ "success": true }));

    let (status, json) = get(addr, "/api/posts/1").await;
    assert_eq!(status, 404);
    assert_eq!(json["success"], json!(false));
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn list_paginates_and_filters() {
    let addr = start("list_paginates_and_filters").await;
    for n in 1..=12 {
        create(addr, "free", &format!("Topic {n}")).await;
    }
    create(addr, "notice", "Topic notice").await;

    let (status, json) = get(addr, "/api/posts").await;
    assert_eq!(status, 200);
    assert_eq!(json["success"], json!(true));
    assert_eq!(
        json["pagination"],
        json!({ "totalCount": 12, "totalPages": 2, "currentPage": 1 })
    );
    let ids = json["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|post| post["id"].as_i64().expect("id"))
        .collect::<Vec<_>>();
    assert_eq!(ids, (3..=12).rev().collect::<Vec<_>>());

    let (_, json) = get(addr, "/api/posts?board=free&page=2&pageSize=10").await;
    assert_eq!(json["data"].as_array().expect("data").len(), 2);
    assert_eq!(json["pagination"]["currentPage"], json!(2));

    let (_, json) = get(addr, "/api/posts?board=notice").await;
    assert_eq!(json["pagination"]["totalCount"], json!(1));

    let (_, json) = get(addr, "/api/posts?board=free&keyword=%20topic%201").await;
    let titles = json["data"]
        .as_array()
        .expect("data")
        .iter()
        .map(|post| post["title"].as_str().expect("title").to_string())
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["Topic 12", "Topic 11", "Topic 10", "Topic 1"]);

    let (_, json) = get(addr, "/api/posts?board=bogus&page=zero&pageSize=-5").await;
    assert_eq!(json["pagination"]["currentPage"], json!(1));
    assert_eq!(json["pagination"]["totalPages"], json!(2));
}

#[tokio::test]
async fn invalid_ids_are_rejected() {
    let addr = start("invalid_ids_are_rejected").await;

    let (status, json) = get(addr, "/api/posts/abc").await;
    assert_eq!(status, 400);
    assert_eq!(json["success"], json!(false));

    let (status, _) = send_json(
        addr,
        "PUT",
        "/api/posts/abc",
        json!({ "title": "t", "author": "a", "content": "c" }),
    )
    .await;
    assert_eq!(status, 400);

    let (status, _) = send_raw(addr, "DELETE", "/api/posts/abc", None, "").await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn missing_posts_are_not_found() {
    let addr = start("missing_posts_are_not_found").await;

    let (status, _) = get(addr, "/api/posts/99").await;
    assert_eq!(status, 404);

    let (status, json) = send_json(
        addr,
        "PUT",
        "/api/posts/99",
        json!({ "title": "t", "author": "a", "content": "c" }),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(json["success"], json!(false));

    let (status, _) = send_raw(addr, "DELETE", "/api/posts/99", None, "").await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn create_validates_and_coerces() {
    let addr = start("create_validates_and_coerces").await;

    let (status, json) = send_json(
        addr,
        "POST",
        "/api/posts",
        json!({ "board_type": "free", "title": "t", "author": "", "content": "c" }),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(json["success"], json!(false));

    let (status, _) = send_raw(addr, "POST", "/api/posts", None, "title=t").await;
    assert_eq!(status, 400);

    let (status, _) = send_raw(
        addr,
        "POST",
        "/api/posts",
        Some("application/json"),
        "{not json",
    )
    .await;
    assert_eq!(status, 400);

    let (_, json) = get(addr, "/api/posts").await;
    assert_eq!(json["pagination"]["totalCount"], json!(0));

    let id = create(addr, "announcements", "coerced").await;
    let (_, json) = get(addr, &format!("/api/posts/{id}")).await;
    assert_eq!(json["data"]["board_type"], json!("free"));

    let (status, json) = send_raw(
        addr,
        "POST",
        "/api/posts",
        Some("application/x-www-form-urlencoded"),
        "board_type=notice&title=Form+post&author=eve&content=from%20a%20form",
    )
    .await;
    assert_eq!(status, 200);
    let id = json["id"].as_i64().expect("id");
    let (_, json) = get(addr, &format!("/api/posts/{id}")).await;
    assert_eq!(json["data"]["title"], json!("Form post"));
    assert_eq!(json["data"]["content"], json!("from a form"));
    assert_eq!(json["data"]["board_type"], json!("notice"));
}

#[tokio::test]
async fn update_requires_every_field() {
    let addr = start("update_requires_every_field").await;
    let id = create(addr, "free", "A").await;

    let (status, _) = send_json(
        addr,
        "PUT",
        &format!("/api/posts/{id}"),
        json!({ "title": "B", "author": "bob" }),
    )
    .await;
    assert_eq!(status, 400);

    let (_, json) = get(addr, &format!("/api/posts/{id}")).await;
    assert_eq!(json["data"]["title"], json!("A"));
}

#[tokio::test]
async fn list_tolerates_repeated_keys() {
    let addr = start("list_tolerates_repeated_keys").await;
    let notice = create(addr, "notice", "Notice").await;
    create(addr, "free", "Free").await;

    let (status, json) = get(addr, "/api/posts?page=1&page=2").await;
    assert_eq!(status, 200, "{json}");
    assert_eq!(json["success"], json!(true));
    assert_eq!(json["pagination"]["currentPage"], json!(1));

    let (status, json) = get(addr, "/api/posts?board=notice&board=free").await;
    assert_eq!(status, 200, "{json}");
    assert_eq!(json["data"][0]["id"], json!(notice));
    assert_eq!(json["data"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn undecodable_ids_use_the_json_envelope() {
    let addr = start("undecodable_ids_use_the_json_envelope").await;

    for method in ["GET", "DELETE"] {
        let (status, json) = send_raw(addr, method, "/api/posts/%FF", None, "").await;
        assert_eq!(status, 400);
        assert_eq!(json, json!({ "success": false, "message": "invalid id" }));
    }

    let (status, json) = send_json(
        addr,
        "PUT",
        "/api/posts/%FF",
        json!({ "title": "t", "author": "a", "content": "c" }),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(json, json!({ "success": false, "message": "invalid id" }));
}

#[tokio::test]
async fn oversized_ids_are_not_found() {
    let addr = start("oversized_ids_are_not_found").await;

    let (status, json) = get(addr, "/api/posts/99999999999999999999").await;
    assert_eq!(status, 404);
    assert_eq!(json, json!({ "success": false, "message": "post not found" }));
}
