//! End-to-end tests against a running server
//!
//! Each test starts its own server over a temporary SQLite file and upload
//! directory, so ticket ids start at 1 in every test.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_redirect, assert_status, Account, TestServer, ADMIN_EMAIL,
    ADMIN_PASSWORD,
};
use reqwest::StatusCode;
use serde_json::Value;

async fn signed_up(server: &TestServer, account: &Account) -> integration_tests::Browser {
    let browser = server.browser();
    browser
        .sign_up(&account.username, &account.email, &account.password)
        .await
        .unwrap();
    browser
}

async fn admin(server: &TestServer) -> integration_tests::Browser {
    let browser = server.browser();
    assert_redirect(
        browser.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap(),
        "/dashboard",
    )
    .await
    .unwrap();
    browser
}

fn has_message(page: &Value, message: &str) -> bool {
    page["messages"]
        .as_array()
        .is_some_and(|messages| messages.iter().any(|m| m == message))
}

fn tickets(page: &Value) -> &Vec<Value> {
    page["tickets"].as_array().expect("tickets array")
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.browser().get("/health").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.browser().get("/health/ready").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
    assert_eq!(body["checks"]["upload_dir"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_returned() {
    let server = TestServer::start().await.unwrap();
    let response = server.browser().get("/login").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_index_redirects_to_login() {
    let server = TestServer::start().await.unwrap();
    let response = server.browser().get("/").await.unwrap();
    assert_redirect(response, "/login").await.unwrap();
}

#[tokio::test]
async fn test_rate_limit_is_per_client() {
    let server = TestServer::start_with(&[
        ("RATE_LIMIT_REQUESTS_PER_SECOND", "1"),
        ("RATE_LIMIT_BURST", "3"),
    ])
    .await
    .unwrap();
    let client = reqwest::Client::new();
    let url = format!("{}/login", server.base_url());
    let from = |ip: &str| client.get(&url).header("x-forwarded-for", ip).send();

    for _ in 0..3 {
        let response = from("203.0.113.10").await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
    let response = from("203.0.113.10").await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let response = from("203.0.113.20").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// ============================================================================
// Registration and Login
// ============================================================================

#[tokio::test]
async fn test_register_then_login() {
    let server = TestServer::start().await.unwrap();
    let browser = server.browser();
    let account = Account::unique();

    let response = browser
        .register(&account.username, &account.email, &account.password)
        .await
        .unwrap();
    assert_redirect(response, "/login").await.unwrap();

    // The success message is shown once, on the next page
    let page = browser.page("/login").await.unwrap();
    assert_eq!(page["page"], "login");
    assert!(has_message(&page, "Account created! Please login."));
    let page = browser.page("/login").await.unwrap();
    assert!(page["messages"].as_array().unwrap().is_empty());

    let response = browser.login(&account.email, &account.password).await.unwrap();
    assert_redirect(response, "/dashboard").await.unwrap();

    let dashboard = browser.page("/dashboard").await.unwrap();
    assert_eq!(dashboard["user"]["username"], account.username.as_str());
    assert_eq!(dashboard["user"]["role"], "user");
}

#[tokio::test]
async fn test_password_is_hashed() {
    let server = TestServer::start().await.unwrap();
    let account = Account::unique();
    signed_up(&server, &account).await;

    let repo = server.state.service_context().user_repo();
    let user = repo.find_by_email(&account.email).await.unwrap().unwrap();
    let hash = repo.get_password_hash(user.id).await.unwrap().unwrap();
    assert_ne!(hash, account.password);
    assert!(hash.starts_with("$argon2"));
}

#[tokio::test]
async fn test_each_login_opens_a_distinct_session() {
    let server = TestServer::start().await.unwrap();
    let account = Account::unique();
    let first = signed_up(&server, &account).await;

    let second = server.browser();
    assert_redirect(
        second.login(&account.email, &account.password).await.unwrap(),
        "/dashboard",
    )
    .await
    .unwrap();

    // Ending one session leaves the other intact
    assert_redirect(first.get("/logout").await.unwrap(), "/login")
        .await
        .unwrap();
    assert_redirect(first.get("/dashboard").await.unwrap(), "/login")
        .await
        .unwrap();
    assert_status(second.get("/dashboard").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let server = TestServer::start().await.unwrap();
    let browser = server.browser();
    let account = Account::unique();

    browser
        .register(&account.username, &account.email, &account.password)
        .await
        .unwrap();
    let response = browser
        .register("someone-else", &account.email, "other")
        .await
        .unwrap();
    assert_redirect(response, "/register").await.unwrap();

    let page = browser.page("/register").await.unwrap();
    assert!(has_message(&page, "Email already registered"));
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let server = TestServer::start().await.unwrap();
    let browser = server.browser();
    let account = Account::unique();

    browser
        .register(&account.username, &account.email, &account.password)
        .await
        .unwrap();
    let response = browser
        .register(&account.username, "fresh@example.com", "other")
        .await
        .unwrap();
    assert_redirect(response, "/register").await.unwrap();

    let page = browser.page("/register").await.unwrap();
    assert!(has_message(&page, "Username already taken"));
}

#[tokio::test]
async fn test_register_missing_field() {
    let server = TestServer::start().await.unwrap();
    let browser = server.browser();

    let response = browser
        .post_form("/register", &[("username", "bob"), ("email", "bob@example.com")])
        .await
        .unwrap();
    assert_redirect(response, "/register").await.unwrap();

    let page = browser.page("/register").await.unwrap();
    assert!(has_message(&page, "Password is required (max 200 characters)"));
}

#[tokio::test]
async fn test_wrong_password_never_creates_session() {
    let server = TestServer::start().await.unwrap();
    let account = Account::unique();
    signed_up(&server, &account).await;

    let browser = server.browser();
    let response = browser.login(&account.email, "not-the-password").await.unwrap();
    let page: Value = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(page["page"], "login");
    assert_eq!(page["error"], "Invalid email or password");

    assert_redirect(browser.get("/dashboard").await.unwrap(), "/login")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_unknown_email_looks_like_wrong_password() {
    let server = TestServer::start().await.unwrap();
    let account = Account::unique();
    signed_up(&server, &account).await;

    let browser = server.browser();
    let wrong_password: Value = assert_json(
        browser.login(&account.email, "nope").await.unwrap(),
        StatusCode::UNAUTHORIZED,
    )
    .await
    .unwrap();
    let unknown_email: Value = assert_json(
        browser.login("ghost@example.com", &account.password).await.unwrap(),
        StatusCode::UNAUTHORIZED,
    )
    .await
    .unwrap();

    assert_eq!(wrong_password, unknown_email);
}

#[tokio::test]
async fn test_tampered_session_cookie_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    let response = client
        .get(format!("{}/dashboard", server.base_url()))
        .header("Cookie", "desk_session=forged-token")
        .send()
        .await
        .unwrap();
    assert_redirect(response, "/login").await.unwrap();
}

// ============================================================================
// Protected Routes
// ============================================================================

#[tokio::test]
async fn test_anonymous_requests_are_redirected_to_login() {
    let server = TestServer::start().await.unwrap();
    let browser = server.browser();

    for path in ["/dashboard", "/create_ticket", "/admin", "/logout", "/uploads/x_file.txt"] {
        let response = browser.get(path).await.unwrap();
        assert_redirect(response, "/login").await.unwrap();
    }

    let response = browser
        .post_form("/update_status/1", &[("status", "Closed")])
        .await
        .unwrap();
    assert_redirect(response, "/login").await.unwrap();

    let response = browser.create_ticket("t", "d", None).await.unwrap();
    assert_redirect(response, "/login").await.unwrap();
}

#[tokio::test]
async fn test_logout_ends_session() {
    let server = TestServer::start().await.unwrap();
    let browser = signed_up(&server, &Account::unique()).await;

    assert_status(browser.get("/dashboard").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_redirect(browser.get("/logout").await.unwrap(), "/login")
        .await
        .unwrap();
    assert_redirect(browser.get("/dashboard").await.unwrap(), "/login")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_non_admin_is_denied() {
    let server = TestServer::start().await.unwrap();
    let browser = signed_up(&server, &Account::unique()).await;

    let response = browser.get("/admin").await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(response.text().await.unwrap(), "Access denied");
}

// ============================================================================
// Tickets
// ============================================================================

#[tokio::test]
async fn test_scenario_ticket_without_attachment() {
    let server = TestServer::start().await.unwrap();
    let alice = signed_up(&server, &Account::alice()).await;

    let response = alice
        .create_ticket("Printer broken", "...", None)
        .await
        .unwrap();
    assert_redirect(response, "/dashboard").await.unwrap();

    let dashboard = alice.page("/dashboard").await.unwrap();
    assert!(has_message(&dashboard, "Ticket created successfully!"));

    let rows = tickets(&dashboard);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["title"], "Printer broken");
    assert_eq!(rows[0]["description"], "...");
    assert_eq!(rows[0]["status"], "Open");
    assert!(rows[0]["attachment"].is_null());
}

#[tokio::test]
async fn test_empty_file_part_means_no_attachment() {
    let server = TestServer::start().await.unwrap();
    let alice = signed_up(&server, &Account::unique()).await;

    let response = alice
        .create_ticket("No file chosen", "desc", Some(("", Vec::new())))
        .await
        .unwrap();
    assert_redirect(response, "/dashboard").await.unwrap();

    let dashboard = alice.page("/dashboard").await.unwrap();
    assert!(tickets(&dashboard)[0]["attachment"].is_null());
    assert!(server.stored_files().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_ticket_requires_title() {
    let server = TestServer::start().await.unwrap();
    let alice = signed_up(&server, &Account::unique()).await;

    let response = alice.create_ticket("  ", "desc", None).await.unwrap();
    assert_redirect(response, "/create_ticket").await.unwrap();

    let page = alice.page("/create_ticket").await.unwrap();
    assert_eq!(page["page"], "create_ticket");
    assert!(has_message(&page, "Title is required (max 200 characters)"));

    let dashboard = alice.page("/dashboard").await.unwrap();
    assert!(tickets(&dashboard).is_empty());
}

#[tokio::test]
async fn test_tickets_are_private_to_their_owner() {
    let server = TestServer::start().await.unwrap();
    let a = signed_up(&server, &Account::unique()).await;
    let b = signed_up(&server, &Account::unique()).await;

    a.create_ticket("A's ticket", "mine", None).await.unwrap();
    b.create_ticket("B's ticket", "mine", None).await.unwrap();

    let a_rows = a.page("/dashboard").await.unwrap();
    let b_rows = b.page("/dashboard").await.unwrap();

    let a_titles: Vec<_> = tickets(&a_rows).iter().map(|t| t["title"].clone()).collect();
    let b_titles: Vec<_> = tickets(&b_rows).iter().map(|t| t["title"].clone()).collect();
    assert_eq!(a_titles, vec!["A's ticket"]);
    assert_eq!(b_titles, vec!["B's ticket"]);
}

// ============================================================================
// Attachments
// ============================================================================

#[tokio::test]
async fn test_upload_path_traversal_is_stripped() {
    let server = TestServer::start().await.unwrap();
    let alice = signed_up(&server, &Account::unique()).await;

    let response = alice
        .create_ticket("Logs", "see file", Some(("../../etc/passwd", b"root:x:0:0".to_vec())))
        .await
        .unwrap();
    assert_redirect(response, "/dashboard").await.unwrap();

    let dashboard = alice.page("/dashboard").await.unwrap();
    let stored = tickets(&dashboard)[0]["attachment"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(stored.ends_with("_etc_passwd"));
    assert!(!stored.contains('/'));
    assert!(!stored.contains(".."));

    // Written inside the upload directory and nowhere else
    assert_eq!(server.stored_files().unwrap(), vec![stored.clone()]);
    let on_disk = std::fs::read(server.upload_dir().join(&stored)).unwrap();
    assert_eq!(on_disk, b"root:x:0:0");
}

#[tokio::test]
async fn test_same_filename_does_not_overwrite() {
    let server = TestServer::start().await.unwrap();
    let alice = signed_up(&server, &Account::unique()).await;

    alice
        .create_ticket("One", "d", Some(("report.txt", b"first".to_vec())))
        .await
        .unwrap();
    alice
        .create_ticket("Two", "d", Some(("report.txt", b"second".to_vec())))
        .await
        .unwrap();

    let files = server.stored_files().unwrap();
    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|f| f.ends_with("_report.txt")));
}

#[tokio::test]
async fn test_download_attachment() {
    let server = TestServer::start().await.unwrap();
    let alice = signed_up(&server, &Account::unique()).await;
    let bob = signed_up(&server, &Account::unique()).await;
    let admin = admin(&server).await;

    alice
        .create_ticket("Screenshot", "d", Some(("screen shot.txt", b"pixels".to_vec())))
        .await
        .unwrap();
    let dashboard = alice.page("/dashboard").await.unwrap();
    let url = tickets(&dashboard)[0]["attachment_url"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(url.starts_with("/uploads/"));
    assert!(url.ends_with("_screen_shot.txt"));

    let response = alice.get(&url).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.bytes().await.unwrap().as_ref(), b"pixels");

    assert_status(admin.get(&url).await.unwrap(), StatusCode::OK)
        .await
        .unwrap();

    // Other users cannot tell the file exists
    assert_status(bob.get(&url).await.unwrap(), StatusCode::NOT_FOUND)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_download_rejects_traversal_and_unknown_names() {
    let server = TestServer::start().await.unwrap();
    let alice = signed_up(&server, &Account::unique()).await;

    for path in ["/uploads/..%2Fsite.db", "/uploads/%2E%2E%2Fsite.db", "/uploads/nothing.txt"] {
        assert_status(alice.get(path).await.unwrap(), StatusCode::NOT_FOUND)
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let server = TestServer::start().await.unwrap();
    let alice = signed_up(&server, &Account::unique()).await;

    // MAX_FILE_SIZE_MB is 1 on test servers
    let big = vec![b'x'; 1024 * 1024 + 1];
    let response = alice
        .create_ticket("Huge", "d", Some(("big.bin", big)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

    assert!(server.stored_files().unwrap().is_empty());
    let dashboard = alice.page("/dashboard").await.unwrap();
    assert!(tickets(&dashboard).is_empty());
}

// ============================================================================
// Admin
// ============================================================================

#[tokio::test]
async fn test_admin_sees_every_ticket() {
    let server = TestServer::start().await.unwrap();
    let alice_account = Account::unique();
    let bob_account = Account::unique();
    let alice = signed_up(&server, &alice_account).await;
    let bob = signed_up(&server, &bob_account).await;
    let admin = admin(&server).await;

    alice.create_ticket("First", "d", None).await.unwrap();
    bob.create_ticket("Second", "d", None).await.unwrap();

    let page = admin.page("/admin").await.unwrap();
    assert_eq!(page["page"], "admin");
    let rows = tickets(&page);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["title"], "First");
    assert_eq!(rows[0]["owner_username"], alice_account.username.as_str());
    assert_eq!(rows[1]["title"], "Second");
    assert_eq!(rows[1]["owner_username"], bob_account.username.as_str());
}

#[tokio::test]
async fn test_scenario_admin_closes_ticket() {
    let server = TestServer::start().await.unwrap();
    let alice = signed_up(&server, &Account::alice()).await;
    let admin = admin(&server).await;

    alice
        .create_ticket("Printer broken", "...", None)
        .await
        .unwrap();

    // A non-admin is refused and nothing changes
    let response = alice
        .post_form("/update_status/1", &[("status", "Closed")])
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(response.text().await.unwrap(), "Access denied");
    let dashboard = alice.page("/dashboard").await.unwrap();
    assert_eq!(tickets(&dashboard)[0]["status"], "Open");

    let response = admin
        .post_form("/update_status/1", &[("status", "Closed")])
        .await
        .unwrap();
    assert_redirect(response, "/admin").await.unwrap();

    let dashboard = alice.page("/dashboard").await.unwrap();
    assert_eq!(tickets(&dashboard)[0]["id"], 1);
    assert_eq!(tickets(&dashboard)[0]["status"], "Closed");
}

#[tokio::test]
async fn test_update_status_unknown_ticket() {
    let server = TestServer::start().await.unwrap();
    let admin = admin(&server).await;

    let response = admin
        .post_form("/update_status/999", &[("status", "Closed")])
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = admin
        .post_form("/update_status/not-a-number", &[("status", "Closed")])
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_status_rejects_blank_status() {
    let server = TestServer::start().await.unwrap();
    let alice = signed_up(&server, &Account::unique()).await;
    let admin = admin(&server).await;
    alice.create_ticket("VPN", "down", None).await.unwrap();

    let response = admin
        .post_form("/update_status/1", &[("status", "   ")])
        .await
        .unwrap();
    assert_redirect(response, "/admin").await.unwrap();

    let page = admin.page("/admin").await.unwrap();
    assert!(has_message(&page, "Status is required (max 50 characters)"));
    assert_eq!(tickets(&page)[0]["status"], "Open");
}

#[tokio::test]
async fn test_admin_bootstrap_promotes_existing_account() {
    let server = TestServer::start().await.unwrap();
    let account = Account::unique();
    signed_up(&server, &account).await;

    let config = desk_common::AdminConfig {
        email: account.email.clone(),
        username: account.username.clone(),
        password: account.password.clone(),
    };
    desk_service::AuthService::new(server.state.service_context())
        .ensure_admin(&config)
        .await
        .unwrap();

    let browser = server.browser();
    browser.login(&account.email, &account.password).await.unwrap();
    assert_status(browser.get("/admin").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
}
