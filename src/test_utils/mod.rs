#![allow(missing_docs)]

use axum_test::TestServer;
use rusqlite::Connection;
use serde_json::json;

use crate::{TokenResponse, build_router, stores::sqlite::create_app_state};

/// A password that passes the strength check.
pub(crate) const STRONG_PASSWORD: &str = "averysafeandsecurepassword";

/// A server backed by a fresh in-memory database.
pub(crate) fn get_test_server() -> TestServer {
    let conn = Connection::open_in_memory().expect("Could not open database in memory.");
    let state = create_app_state(conn, "42")
        .expect("Could not create app state.")
        .with_password_hash_cost(4);

    TestServer::try_new(build_router(state)).expect("Could not create test server.")
}

/// Sign up `username` and return their bearer token.
pub(crate) async fn sign_up(server: &TestServer, username: &str) -> String {
    server
        .post("/auth/signup")
        .json(&json!({"username": username, "password": STRONG_PASSWORD}))
        .await
        .json::<TokenResponse>()
        .token
}
