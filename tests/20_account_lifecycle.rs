mod common;

use axum::http::StatusCode;
use green_gateway::database::models::Group;
use green_gateway::database::DataStore;
use serde_json::json;

#[tokio::test]
async fn register_creates_limbo_account() {
    let (store, namespace) = common::seeded_store();
    let app = common::router(store.clone());

    let (status, body) = common::post_json(
        &app,
        "/account/register",
        json!({
            "username": "tien",
            "namespace": common::NAMESPACE,
            "userInfos": { "job": "engineer" },
            "userGroups": [],
            "userTags": [],
            "userEmail": "tien@example.com",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["account"], "tien");
    assert_eq!(body["tempPassword"].as_str().unwrap().len(), 10);

    let account = store
        .find_account("tien", namespace.id)
        .await
        .unwrap()
        .expect("account saved");
    assert!(account.limbo);
    assert!(account.active);
    assert_eq!(account.email.as_deref(), Some("tien@example.com"));
    assert_eq!(account.infos["job"], json!("engineer"));
}

#[tokio::test]
async fn register_accepts_info_line_string() {
    let (store, namespace) = common::seeded_store();
    let app = common::router(store.clone());

    let (status, _) = common::post_json(
        &app,
        "/account/register",
        json!({
            "username": "lined",
            "namespace": common::NAMESPACE,
            "userInfos": "job:engineer;team:core",
            "userGroups": [],
            "userTags": [],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = common::post_json(
        &app,
        "/account/register",
        json!({
            "username": "mapped",
            "namespace": common::NAMESPACE,
            "userInfos": { "job": "engineer", "team": "core" },
            "userGroups": [],
            "userTags": [],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let lined = store.find_account("lined", namespace.id).await.unwrap().unwrap();
    let mapped = store.find_account("mapped", namespace.id).await.unwrap().unwrap();
    assert_eq!(lined.infos, mapped.infos);
}

#[tokio::test]
async fn register_rejects_malformed_info_line() {
    let (store, namespace) = common::seeded_store();
    let app = common::router(store.clone());

    let (status, body) = common::post_json(
        &app,
        "/account/register",
        json!({
            "username": "tien",
            "namespace": common::NAMESPACE,
            "userInfos": "job-engineer",
            "userGroups": [],
            "userTags": [],
        }),
    )
    .await;
    common::assert_refused(status, &body, 4506);
    assert_eq!(
        body["description"],
        "Info line: \"job-engineer\" format error"
    );

    assert!(store
        .find_account("tien", namespace.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn register_validates_username_and_namespace() {
    let (store, _) = common::seeded_store();
    let app = common::router(store);

    let (status, body) = common::post_json(
        &app,
        "/account/register",
        json!({
            "username": "ab",
            "namespace": common::NAMESPACE,
            "userInfos": {},
            "userGroups": [],
            "userTags": [],
        }),
    )
    .await;
    common::assert_refused(status, &body, 5010);
    assert_eq!(body["description"], "Invalid username: \"too short\"");

    let (status, body) = common::post_json(
        &app,
        "/account/register",
        json!({
            "username": "tien",
            "namespace": "portal.nowhere",
            "userInfos": {},
            "userGroups": [],
            "userTags": [],
        }),
    )
    .await;
    common::assert_refused(status, &body, 6204);
}

#[tokio::test]
async fn register_refuses_duplicates_and_internal_groups() {
    let (store, namespace) = common::seeded_store();
    store.seed_account(common::plain_account("tien", &namespace));
    store.seed_group(Group::internal("platform-admin".to_string()));
    let app = common::router(store);

    let (status, body) = common::post_json(
        &app,
        "/account/register",
        json!({
            "username": "tien",
            "namespace": common::NAMESPACE,
            "userInfos": {},
            "userGroups": [],
            "userTags": [],
        }),
    )
    .await;
    common::assert_refused(status, &body, 6220);

    let (status, body) = common::post_json(
        &app,
        "/account/register",
        json!({
            "username": "fresh",
            "namespace": common::NAMESPACE,
            "userInfos": {},
            "userGroups": ["platform-admin"],
            "userTags": [],
        }),
    )
    .await;
    common::assert_refused(status, &body, 7001);
}

#[tokio::test]
async fn register_drops_unknown_group_and_tag_names() {
    let (store, namespace) = common::seeded_store();
    store.seed_group(Group::new("blue".to_string()));
    let app = common::router(store.clone());

    let (status, _) = common::post_json(
        &app,
        "/account/register",
        json!({
            "username": "tien",
            "namespace": common::NAMESPACE,
            "userInfos": {},
            "userGroups": ["blue", "no-such-group"],
            "userTags": ["no-such-tag"],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let account = store.find_account("tien", namespace.id).await.unwrap().unwrap();
    assert_eq!(account.groups.len(), 1);
    assert!(account.tags.is_empty());
}

#[tokio::test]
async fn register_requires_matching_body_shape() {
    let (store, _) = common::seeded_store();
    let app = common::router(store);

    let (status, body) = common::post_json(&app, "/account/register", json!({})).await;
    common::assert_refused(status, &body, 5005);
    assert_eq!(
        body["description"],
        "Request does not match pattern: \"username\""
    );

    let (status, body) = common::post_empty(&app, "/account/register").await;
    common::assert_refused(status, &body, 4500);
}

#[tokio::test]
async fn activation_flips_are_guarded_against_repeats() {
    let (store, namespace) = common::seeded_store();
    store.seed_account(common::plain_account("tien", &namespace));
    let app = common::router(store);

    let pair = json!({ "username": "tien", "namespace": common::NAMESPACE });

    let (status, body) = common::post_json(&app, "/account/deactivate", pair.clone()).await;
    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["deactivated"], true);

    let (status, body) = common::post_json(&app, "/account/deactivate", pair.clone()).await;
    common::assert_refused(status, &body, 6321);

    let (status, body) = common::post_json(&app, "/account/activate", pair.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["activated"], true);

    let (status, body) = common::post_json(&app, "/account/activate", pair).await;
    common::assert_refused(status, &body, 6320);
    assert_eq!(body["description"], "Target: \"tien\" already activated");
}

#[tokio::test]
async fn activation_requires_a_known_pair() {
    let (store, namespace) = common::seeded_store();
    store.seed_account(common::plain_account("tien", &namespace));
    let app = common::router(store);

    let (status, body) = common::post_json(
        &app,
        "/account/activate",
        json!({ "username": "stranger", "namespace": common::NAMESPACE }),
    )
    .await;
    common::assert_refused(status, &body, 6202);
}

#[tokio::test]
async fn limbo_resets_password_and_attempts() {
    let (store, namespace) = common::seeded_store();
    let mut account = common::plain_account("tien", &namespace);
    account.attempts = 4;
    let previous_digest = account.password.clone();
    store.seed_account(account);
    let app = common::router(store.clone());

    let (status, body) = common::post_json(
        &app,
        "/account/limbo",
        json!({ "username": "tien", "namespace": common::NAMESPACE }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["limbo"], true);
    assert_eq!(body["tempPassword"].as_str().unwrap().len(), 10);

    let account = store.find_account("tien", namespace.id).await.unwrap().unwrap();
    assert!(account.limbo);
    assert_eq!(account.attempts, 0);
    assert_ne!(account.password, previous_digest);
}

#[tokio::test]
async fn update_applies_validated_contact_fields() {
    let (store, namespace) = common::seeded_store();
    store.seed_account(common::plain_account("tien", &namespace));
    let app = common::router(store.clone());

    let (status, body) = common::post_json(
        &app,
        "/account/update",
        json!({
            "username": "tien",
            "namespace": common::NAMESPACE,
            "email": "tien@example.com",
            "displayName": "Tien",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["username"], "tien");
    assert_eq!(body["namespace"], common::NAMESPACE);
    assert_eq!(body["email"], "tien@example.com");
    assert_eq!(body["displayName"], "Tien");
    assert_eq!(body["limbo"], false);

    let (status, body) = common::post_json(
        &app,
        "/account/update",
        json!({
            "username": "tien",
            "namespace": common::NAMESPACE,
            "email": "not an address",
        }),
    )
    .await;
    common::assert_refused(status, &body, 5011);

    let account = store.find_account("tien", namespace.id).await.unwrap().unwrap();
    assert_eq!(account.email.as_deref(), Some("tien@example.com"));

    // No fields supplied: nothing to save, still answers with the detail.
    let (status, body) = common::post_json(
        &app,
        "/account/update",
        json!({ "username": "tien", "namespace": common::NAMESPACE }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "tien@example.com");
    assert_eq!(body["displayName"], "Tien");
}

#[tokio::test]
async fn verify_answers_without_erroring() {
    let (store, namespace) = common::seeded_store();
    store.seed_account(common::plain_account("tien", &namespace));
    let mut sleeping = common::plain_account("sleeping", &namespace);
    sleeping.active = false;
    store.seed_account(sleeping);
    let app = common::router(store);

    let (status, body) = common::post_json(
        &app,
        "/account/verify",
        json!({ "username": "tien", "namespace": common::NAMESPACE }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);
    assert_eq!(body["account"]["username"], "tien");
    assert_eq!(body["account"]["namespace"], common::NAMESPACE);

    for username in ["sleeping", "stranger"] {
        let (status, body) = common::post_json(
            &app,
            "/account/verify",
            json!({ "username": username, "namespace": common::NAMESPACE }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], false, "username: {username}");
        assert!(body.get("account").is_none());
    }

    let (status, body) = common::post_json(
        &app,
        "/account/verify",
        json!({ "username": "tien", "namespace": "portal.nowhere" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], false);
}

#[tokio::test]
async fn detail_reports_the_full_shape() {
    let (store, namespace) = common::seeded_store();
    let mut account = common::plain_account("tien", &namespace);
    account.phone = Some("14155550100".to_string());
    store.seed_account(account);
    let app = common::router(store);

    let path = format!("/account/detail/tien/{}", common::NAMESPACE);
    let (status, body) = common::get(&app, &path).await;
    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["active"], true);
    assert_eq!(body["username"], "tien");
    assert_eq!(body["namespace"], common::NAMESPACE);
    assert_eq!(body["limbo"], false);
    assert_eq!(body["phone"], "14155550100");
    assert!(body.get("email").is_none());

    let path = format!("/account/detail/stranger/{}", common::NAMESPACE);
    let (status, body) = common::get(&app, &path).await;
    common::assert_refused(status, &body, 6202);
}
