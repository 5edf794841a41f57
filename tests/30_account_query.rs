mod common;

use axum::http::StatusCode;
use green_gateway::database::models::{Group, Namespace, Organization, Tag};
use green_gateway::database::DataStore;
use serde_json::json;

fn query_body(patch: serde_json::Value) -> serde_json::Value {
    let mut body = json!({
        "organizations": [],
        "groups": [],
        "tags": [],
    });
    if let (Some(base), Some(extra)) = (body.as_object_mut(), patch.as_object()) {
        for (key, value) in extra {
            base.insert(key.clone(), value.clone());
        }
    }
    body
}

#[tokio::test]
async fn query_filters_by_activation() {
    let (store, namespace) = common::seeded_store();
    store.seed_account(common::plain_account("awake", &namespace));
    let mut asleep = common::plain_account("asleep", &namespace);
    asleep.active = false;
    store.seed_account(asleep);
    let app = common::router(store);

    let (status, body) = common::post_json(&app, "/account/query", query_body(json!({}))).await;
    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["count"], 2);

    let (status, body) = common::post_json(
        &app,
        "/account/query",
        query_body(json!({ "activation": "active" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["accounts"][0]["username"], "awake");

    let (status, body) = common::post_json(
        &app,
        "/account/query",
        query_body(json!({ "activation": "inactive" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accounts"][0]["username"], "asleep");
}

#[tokio::test]
async fn query_group_modes_differ() {
    let (store, namespace) = common::seeded_store();
    let blue = Group::new("blue".to_string());
    let red = Group::new("red".to_string());

    let mut only_blue = common::plain_account("only-blue", &namespace);
    only_blue.groups = vec![blue.id];
    let mut both = common::plain_account("both", &namespace);
    both.groups = vec![blue.id, red.id];
    let mut only_red = common::plain_account("only-red", &namespace);
    only_red.groups = vec![red.id];

    store.seed_group(blue);
    store.seed_group(red);
    store.seed_account(only_blue);
    store.seed_account(both);
    store.seed_account(only_red);
    let app = common::router(store);

    let (status, body) = common::post_json(
        &app,
        "/account/query",
        query_body(json!({ "groups": ["blue", "red"], "groupsMode": "or" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);

    let (status, body) = common::post_json(
        &app,
        "/account/query",
        query_body(json!({ "groups": ["blue", "red"], "groupsMode": "and" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["accounts"][0]["username"], "both");
}

#[tokio::test]
async fn query_unresolvable_namespace_facet_is_skipped() {
    let (store, namespace) = common::seeded_store();
    let other = Namespace::new("portal.other".to_string());
    store.seed_namespace(other.clone());
    store.seed_account(common::plain_account("here", &namespace));
    store.seed_account(common::plain_account("there", &other));
    let app = common::router(store);

    let (status, body) = common::post_json(
        &app,
        "/account/query",
        query_body(json!({ "namespace": common::NAMESPACE })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["accounts"][0]["username"], "here");

    let (status, body) = common::post_json(
        &app,
        "/account/query",
        query_body(json!({ "namespace": "portal.nowhere" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
}

#[tokio::test]
async fn query_with_only_unknown_names_matches_nothing() {
    let (store, namespace) = common::seeded_store();
    store.seed_account(common::plain_account("tien", &namespace));
    let app = common::router(store);

    let (status, body) = common::post_json(
        &app,
        "/account/query",
        query_body(json!({ "groups": ["ghost"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["accounts"], json!([]));
}

#[tokio::test]
async fn query_elements_resolve_names() {
    let (store, namespace) = common::seeded_store();
    let blue = Group::new("blue".to_string());
    let vip = Tag::new("vip".to_string());

    let mut owner = common::plain_account("owner", &namespace);
    let organization = Organization::create("Phosphorus Labs".to_string(), owner.id);
    owner.groups = vec![blue.id];
    owner.tags = vec![vip.id];
    owner.organization = Some(organization.id);
    owner.display_name = Some("The Owner".to_string());

    store.seed_group(blue);
    store.seed_tag(vip);
    store.seed_organization(organization);
    store.seed_account(owner);
    let app = common::router(store);

    let (status, body) = common::post_json(
        &app,
        "/account/query",
        query_body(json!({ "organizations": ["Phosphorus Labs"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["count"], 1);

    let element = &body["accounts"][0];
    assert_eq!(element["username"], "owner");
    assert_eq!(element["namespace"], common::NAMESPACE);
    assert_eq!(element["groups"], json!(["blue"]));
    assert_eq!(element["tags"], json!(["vip"]));
    assert_eq!(element["organization"], "Phosphorus Labs");
    assert_eq!(element["displayName"], "The Owner");
    assert!(element.get("email").is_none());
}

#[tokio::test]
async fn group_listing_returns_active_members_only() {
    let (store, namespace) = common::seeded_store();
    let blue = Group::new("blue".to_string());

    let mut awake = common::plain_account("awake", &namespace);
    awake.groups = vec![blue.id];
    let mut asleep = common::plain_account("asleep", &namespace);
    asleep.groups = vec![blue.id];
    asleep.active = false;

    store.seed_group(blue);
    store.seed_account(awake);
    store.seed_account(asleep);
    let app = common::router(store);

    let (status, body) = common::get(&app, "/account/group/blue").await;
    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["accounts"].as_array().unwrap().len(), 1);
    assert_eq!(body["accounts"][0]["username"], "awake");
    assert_eq!(body["accounts"][0]["groups"], json!(["blue"]));

    let (status, body) = common::get(&app, "/account/group/ghost").await;
    common::assert_refused(status, &body, 6201);
}

#[tokio::test]
async fn organization_listing_includes_inactive_members() {
    let (store, namespace) = common::seeded_store();
    let mut owner = common::plain_account("owner", &namespace);
    let organization = Organization::create("Phosphorus Labs".to_string(), owner.id);
    owner.organization = Some(organization.id);
    let mut retired = common::plain_account("retired", &namespace);
    retired.organization = Some(organization.id);
    retired.active = false;

    store.seed_organization(organization);
    store.seed_account(owner);
    store.seed_account(retired);
    let app = common::router(store);

    let (status, body) = common::get(&app, "/account/organization/Phosphorus%20Labs").await;
    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["accounts"].as_array().unwrap().len(), 2);

    let (status, body) = common::get(&app, "/account/organization/Nowhere").await;
    common::assert_refused(status, &body, 6203);
}

#[tokio::test]
async fn specific_listing_intersects_organization_and_group() {
    let (store, namespace) = common::seeded_store();
    let blue = Group::new("blue".to_string());
    let mut owner = common::plain_account("owner", &namespace);
    let organization = Organization::create("Phosphorus Labs".to_string(), owner.id);

    owner.organization = Some(organization.id);
    owner.groups = vec![blue.id];
    let mut outside = common::plain_account("outside", &namespace);
    outside.groups = vec![blue.id];
    let mut ungrouped = common::plain_account("ungrouped", &namespace);
    ungrouped.organization = Some(organization.id);

    store.seed_group(blue);
    store.seed_organization(organization);
    store.seed_account(owner);
    store.seed_account(outside);
    store.seed_account(ungrouped);
    let app = common::router(store);

    let (status, body) = common::get(&app, "/account/specific/Phosphorus%20Labs/blue").await;
    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["accounts"].as_array().unwrap().len(), 1);
    assert_eq!(body["accounts"][0]["username"], "owner");
}

#[tokio::test]
async fn group_replace_is_all_or_nothing() {
    let (store, namespace) = common::seeded_store();
    let blue = Group::new("blue".to_string());
    let red = Group::new("red".to_string());
    let blue_id = blue.id;
    store.seed_group(blue);
    store.seed_group(red);
    store.seed_group(Group::internal("platform-admin".to_string()));
    let mut account = common::plain_account("tien", &namespace);
    account.groups = vec![blue_id];
    store.seed_account(account);
    let app = common::router(store.clone());

    let (status, body) = common::post_json(
        &app,
        "/account/group/replace",
        json!({
            "username": "tien",
            "namespace": common::NAMESPACE,
            "groups": ["red", "ghost"],
        }),
    )
    .await;
    common::assert_refused(status, &body, 6201);
    assert_eq!(body["description"], "Group: \"multiple\" not found");

    let (status, body) = common::post_json(
        &app,
        "/account/group/replace",
        json!({
            "username": "tien",
            "namespace": common::NAMESPACE,
            "groups": ["red", "platform-admin"],
        }),
    )
    .await;
    common::assert_refused(status, &body, 7001);

    let untouched = store.find_account("tien", namespace.id).await.unwrap().unwrap();
    assert_eq!(untouched.groups, vec![blue_id]);

    let (status, body) = common::post_json(
        &app,
        "/account/group/replace",
        json!({
            "username": "tien",
            "namespace": common::NAMESPACE,
            "groups": ["red"],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["groups"], json!(["red"]));

    let replaced = store.find_account("tien", namespace.id).await.unwrap().unwrap();
    assert_eq!(replaced.groups.len(), 1);
    assert_ne!(replaced.groups[0], blue_id);
}

#[tokio::test]
async fn tag_replace_requires_every_name() {
    let (store, namespace) = common::seeded_store();
    store.seed_tag(Tag::new("vip".to_string()));
    store.seed_account(common::plain_account("tien", &namespace));
    let app = common::router(store.clone());

    let (status, body) = common::post_json(
        &app,
        "/account/tag/replace",
        json!({
            "username": "tien",
            "namespace": common::NAMESPACE,
            "tags": ["vip", "ghost"],
        }),
    )
    .await;
    common::assert_refused(status, &body, 6205);
    assert_eq!(body["description"], "Tag: \"multiple\" not found");

    let (status, body) = common::post_json(
        &app,
        "/account/tag/replace",
        json!({
            "username": "tien",
            "namespace": common::NAMESPACE,
            "tags": ["vip"],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tags"], json!(["vip"]));

    let account = store.find_account("tien", namespace.id).await.unwrap().unwrap();
    assert_eq!(account.tags.len(), 1);
}

#[tokio::test]
async fn history_record_appends_an_audit_entry() {
    let (store, namespace) = common::seeded_store();
    store.seed_account(common::plain_account("target", &namespace));
    store.seed_account(common::plain_account("operator", &namespace));
    let app = common::router(store.clone());

    let (status, body) = common::post_json(
        &app,
        "/account/history/record",
        json!({
            "target": "target",
            "targetNamespace": common::NAMESPACE,
            "type": "password-change",
            "application": common::APPLICATION_KEY,
            "by": "operator",
            "byNamespace": common::NAMESPACE,
            "content": "rotated by operator",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "body: {body}");

    let target = store.find_account("target", namespace.id).await.unwrap().unwrap();
    assert_eq!(body["account"], target.id.to_hex());
    assert_eq!(target.history.len(), 1);

    let entry = &target.history[0];
    assert_eq!(entry.kind, "password-change");
    assert_eq!(entry.content, json!("rotated by operator"));

    let application = store
        .find_application_by_key(common::APPLICATION_KEY)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(entry.application, application.id);

    let operator = store.find_account("operator", namespace.id).await.unwrap().unwrap();
    assert_eq!(entry.by, operator.id);
}

#[tokio::test]
async fn history_record_guards_its_inputs() {
    let (store, namespace) = common::seeded_store();
    store.seed_account(common::plain_account("target", &namespace));
    store.seed_account(common::plain_account("operator", &namespace));
    let app = common::router(store);

    let base = json!({
        "target": "target",
        "targetNamespace": common::NAMESPACE,
        "type": "password-change",
        "application": common::APPLICATION_KEY,
        "by": "operator",
        "byNamespace": common::NAMESPACE,
        "content": "rotated",
    });

    let mut unknown_action = base.clone();
    unknown_action["type"] = json!("promote");
    let (status, body) = common::post_json(&app, "/account/history/record", unknown_action).await;
    common::assert_refused(status, &body, 5015);

    let mut unknown_target = base.clone();
    unknown_target["target"] = json!("stranger");
    let (status, body) = common::post_json(&app, "/account/history/record", unknown_target).await;
    common::assert_refused(status, &body, 6202);

    let mut unknown_application = base;
    unknown_application["application"] = json!("no-such-app");
    let (status, body) =
        common::post_json(&app, "/account/history/record", unknown_application).await;
    common::assert_refused(status, &body, 6200);
}
