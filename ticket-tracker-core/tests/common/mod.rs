#![allow(dead_code)]

use bson::oid::ObjectId;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::sync::Once;

static INIT_ENV_ONCE: Once = Once::new();

pub fn init_env() {
    INIT_ENV_ONCE.call_once(|| {
        let _ = dotenvy::dotenv();
    });
}

pub fn address() -> String {
    std::env::var("TICKET_TRACKER_BIND_ADDRESS").unwrap()
}

pub fn url(path: &str) -> String {
    format!("http://{}/api{}", address(), path)
}

///
/// Token signed with server secret for user that may not exist
///
pub fn create_jwt(user_id: ObjectId) -> String {
    let jwt_secret = std::env::var("TICKET_TRACKER_JWT_SECRET").unwrap();

    jwt_auth::test::create_jwt(&user_id.to_hex(), &jwt_secret)
}

pub fn create_expired_jwt(user_id: ObjectId) -> String {
    let jwt_secret = std::env::var("TICKET_TRACKER_JWT_SECRET").unwrap();

    jwt_auth::test::create_expired_jwt(&user_id.to_hex(), &jwt_secret)
}

pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}.{}@example.com", ObjectId::new().to_hex())
}

pub struct Account {
    pub id: String,
    pub token: String,
}

pub async fn response_json(response: reqwest::Response) -> Value {
    let bytes = response.bytes().await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn register(client: &Client, name: &str, email: &str) -> Account {
    let response = client
        .post(url("/auth/register"))
        .json(&json!({
            "name": name,
            "email": email,
            "password": "secret123",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    account(response_json(response).await)
}

pub async fn login(client: &Client, email: &str, password: &str) -> Account {
    let response = client
        .post(url("/auth/login"))
        .json(&json!({
            "email": email,
            "password": password,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    account(response_json(response).await)
}

///
/// Logs in as administrator created at startup from
/// `TICKET_TRACKER_ADMIN_EMAIL` and `TICKET_TRACKER_ADMIN_PASSWORD`
///
pub async fn login_admin(client: &Client) -> Account {
    let email = std::env::var("TICKET_TRACKER_ADMIN_EMAIL").unwrap();
    let password = std::env::var("TICKET_TRACKER_ADMIN_PASSWORD").unwrap();

    login(client, &email, &password).await
}

fn account(body: Value) -> Account {
    Account {
        id: body["user"]["id"].as_str().unwrap().to_string(),
        token: body["token"].as_str().unwrap().to_string(),
    }
}
