//! Integration tests for backoffice authentication, authorization, and the
//! inventory CRUD round-trips.

use secrecy::SecretString;

use motorstand_integration_tests::{StubSheet, TestContext};
use motorstand_storefront::config::BootstrapAdmin;
use motorstand_storefront::services::auth::hash_password;

const PASSWORD: &str = "stand aurora 9";

async fn context_with_admin() -> TestContext {
    let sheet = StubSheet::spawn().await;
    sheet.seed_user(
        "gerente",
        &hash_password(PASSWORD).expect("hash"),
        "gerente@example.com",
        1,
    );
    TestContext::spawn(sheet).await
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_anonymous_backoffice_visit_lands_on_login() {
    let ctx = TestContext::spawn(StubSheet::spawn().await).await;

    let body = ctx.get_ok("/admin").await;
    assert!(body.contains("Sign in"));
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let ctx = context_with_admin().await;

    let body = ctx.login("gerente", "not the password").await;
    assert!(body.contains("Invalid credentials."));
    assert!(body.contains("Sign in"));
}

#[tokio::test]
async fn test_register_stores_a_hash_and_allows_login() {
    let ctx = TestContext::spawn(StubSheet::spawn().await).await;

    let body = ctx
        .post_form(
            "/admin/register",
            &[
                ("email", "ana@example.com".to_string()),
                ("username", "ana".to_string()),
                ("password", PASSWORD.to_string()),
            ],
        )
        .await;
    assert!(body.contains("Account created. Please log in."));

    // The sheet row holds an argon2 hash, never the plaintext.
    let users = ctx.sheet.users();
    assert_eq!(users.len(), 1);
    let stored = users[0]["password"].as_str().expect("password cell");
    assert!(stored.starts_with("$argon2"));
    assert_ne!(stored, PASSWORD);
    assert_eq!(users[0]["admin"], 0);

    // Fresh accounts are not admins: the restricted screen shows.
    let body = ctx.login("ana", PASSWORD).await;
    assert!(body.contains("Welcome, ana."));
    assert!(body.contains("does not have administrator privileges"));
}

#[tokio::test]
async fn test_register_rejects_taken_username() {
    let ctx = context_with_admin().await;

    let body = ctx
        .post_form(
            "/admin/register",
            &[
                ("email", "other@example.com".to_string()),
                ("username", "gerente".to_string()),
                ("password", PASSWORD.to_string()),
            ],
        )
        .await;

    assert!(body.contains("Username is already taken."));
    assert_eq!(ctx.sheet.users().len(), 1);
}

#[tokio::test]
async fn test_admin_flag_gates_the_inventory_form() {
    let sheet = StubSheet::spawn().await;
    sheet.seed_user("chefe", &hash_password(PASSWORD).expect("hash"), "chefe@example.com", 1);
    sheet.seed_user("vendedor", &hash_password(PASSWORD).expect("hash"), "v@example.com", 0);
    let ctx = TestContext::spawn(sheet).await;

    let body = ctx.login("chefe", PASSWORD).await;
    assert!(body.contains("Inventory management"));

    ctx.post_form("/admin/logout", &[]).await;

    let body = ctx.login("vendedor", PASSWORD).await;
    assert!(!body.contains("Inventory management"));
    assert!(body.contains("does not have administrator privileges"));
}

#[tokio::test]
async fn test_bootstrap_admin_logs_in_without_a_user_row() {
    let sheet = StubSheet::spawn().await;
    let mut config = TestContext::config_for(&sheet);
    config.bootstrap_admin = Some(BootstrapAdmin {
        username: "root".to_string(),
        password_hash: SecretString::from(hash_password(PASSWORD).expect("hash")),
        email: "root@example.com".to_string(),
    });
    let ctx = TestContext::spawn_with_config(sheet, config).await;

    let body = ctx.login("root", PASSWORD).await;
    assert!(body.contains("Inventory management"));
}

#[tokio::test]
async fn test_logout_clears_the_session() {
    let ctx = context_with_admin().await;
    ctx.login("gerente", PASSWORD).await;

    ctx.post_form("/admin/logout", &[]).await;

    let body = ctx.get_ok("/admin").await;
    assert!(body.contains("Sign in"));
}

// =============================================================================
// Inventory CRUD
// =============================================================================

#[tokio::test]
async fn test_create_vehicle_round_trips_sheet_and_catalog() {
    let ctx = context_with_admin().await;
    ctx.login("gerente", PASSWORD).await;

    let body = ctx
        .post_form(
            "/admin/vehicles",
            &[
                ("model", "NSX".to_string()),
                ("year", "2005".to_string()),
                ("description", "Mid-engine coupe".to_string()),
                ("photo_url", "https://img.example/nsx.jpg".to_string()),
            ],
        )
        .await;
    assert!(body.contains("Vehicle created."));

    // The sheet got the canonical column spellings and assigned an id.
    let rows = ctx.sheet.vehicles();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["modelo"], "NSX");
    assert_eq!(rows[0]["descricao"], "Mid-engine coupe");
    assert!(rows[0]["id"].is_i64());

    // The storefront shows it without a reload.
    let catalog = ctx.get_ok("/").await;
    assert!(catalog.contains("NSX"));
}

#[tokio::test]
async fn test_update_vehicle_merges_the_submitted_fields_locally() {
    let sheet = StubSheet::spawn().await;
    sheet.seed_user(
        "gerente",
        &hash_password(PASSWORD).expect("hash"),
        "gerente@example.com",
        1,
    );
    let id = sheet.seed_vehicle("Civic", "2020");
    sheet.seed_vehicle("Accord", "2021");
    let ctx = TestContext::spawn(sheet).await;
    ctx.login("gerente", PASSWORD).await;

    let body = ctx
        .post_form(
            &format!("/admin/vehicles/{id}"),
            &[
                ("model", "Civic Type R".to_string()),
                ("year", "2024".to_string()),
                ("description", "Hot hatch".to_string()),
                ("photo_url", "https://img.example/typer.jpg".to_string()),
            ],
        )
        .await;
    assert!(body.contains("Vehicle updated."));

    let rows = ctx.sheet.vehicles();
    let row = rows.iter().find(|r| r["id"] == id).expect("updated row");
    assert_eq!(row["modelo"], "Civic Type R");

    let catalog = ctx.get_ok("/").await;
    assert!(catalog.contains("Civic Type R"));
    assert!(catalog.contains("Accord"));
}

#[tokio::test]
async fn test_delete_vehicle_removes_it_everywhere() {
    let sheet = StubSheet::spawn().await;
    sheet.seed_user(
        "gerente",
        &hash_password(PASSWORD).expect("hash"),
        "gerente@example.com",
        1,
    );
    let id = sheet.seed_vehicle("Civic", "2020");
    sheet.seed_vehicle("Accord", "2021");
    let ctx = TestContext::spawn(sheet).await;
    ctx.login("gerente", PASSWORD).await;

    let body = ctx
        .post_form(&format!("/admin/vehicles/{id}/delete"), &[])
        .await;
    assert!(body.contains("Vehicle deleted."));

    assert_eq!(ctx.sheet.vehicles().len(), 1);

    let catalog = ctx.get_ok("/").await;
    assert!(!catalog.contains("Civic"));
    assert!(catalog.contains("Accord"));
}

#[tokio::test]
async fn test_failed_sheet_call_leaves_local_state_unchanged() {
    let sheet = StubSheet::spawn().await;
    sheet.seed_vehicle("Civic", "2020");
    let mut config = TestContext::config_for(&sheet);
    config.bootstrap_admin = Some(BootstrapAdmin {
        username: "root".to_string(),
        password_hash: SecretString::from(hash_password(PASSWORD).expect("hash")),
        email: "root@example.com".to_string(),
    });
    let ctx = TestContext::spawn_with_config(sheet, config).await;

    // Bootstrap login needs no sheet call, so it works while the sheet is down.
    ctx.login("root", PASSWORD).await;
    ctx.sheet.set_fail(true);

    let rows_before = ctx.sheet.vehicles();
    let id = rows_before[0]["id"].as_i64().expect("id");

    let body = ctx
        .post_form(&format!("/admin/vehicles/{id}/delete"), &[])
        .await;
    assert!(body.contains("Deleting failed."));

    // Neither side lost the record.
    assert_eq!(ctx.sheet.vehicles(), rows_before);
    ctx.sheet.set_fail(false);
    let catalog = ctx.get_ok("/").await;
    assert!(catalog.contains("Civic"));
}
