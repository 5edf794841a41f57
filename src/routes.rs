// routes.rs - Route table and middleware layering
//
// Everything except /health and the static assets sits behind the green
// gate; the gate itself never rejects, it only marks the request so each
// handler can refuse with a uniform error.

use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::config;
use crate::handlers::{account, application, organization, validate};
use crate::handlers::{decorator, group, health, namespace, tag};
use crate::is_development;
use crate::middleware::green_auth_middleware;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let green = Router::new()
        .merge(account_routes())
        .merge(organization_routes())
        .merge(validate_routes())
        .merge(catalog_routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            green_auth_middleware,
        ));

    let app: Router = Router::new()
        .route("/health", get(health::health))
        .merge(green)
        .fallback_service(ServeDir::new(&config().assets.dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if is_development!() {
        return app.layer(CorsLayer::permissive());
    }
    app
}

fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/account/register", post(account::account_register))
        .route("/account/activate", post(account::account_activate))
        .route("/account/deactivate", post(account::account_deactivate))
        .route("/account/limbo", post(account::account_limbo))
        .route("/account/update", post(account::account_update))
        .route("/account/query", post(account::account_query))
        .route("/account/verify", post(account::account_verify))
        .route("/account/tag/replace", post(account::account_tag_replace))
        .route(
            "/account/group/replace",
            post(account::account_group_replace),
        )
        .route(
            "/account/history/record",
            post(account::account_history_record),
        )
        .route(
            "/account/detail/:username/:namespace",
            get(account::account_detail),
        )
        .route("/account/group/:group", get(account::account_list_by_group))
        .route(
            "/account/organization/:organization",
            get(account::account_list_by_organization),
        )
        .route(
            "/account/specific/:organization/:group",
            get(account::account_list_specific),
        )
}

fn organization_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/organization/inplode",
            post(organization::organization_inplode),
        )
        .route(
            "/organization/register/sub-account",
            post(organization::organization_sub_account),
        )
        .route("/organization/query", post(organization::organization_query))
        .route(
            "/organization/add-tag",
            post(organization::organization_add_tag),
        )
        .route(
            "/organization/remove-tag",
            post(organization::organization_remove_tag),
        )
        .route(
            "/organization/verify/:organization",
            get(organization::organization_verify),
        )
        .route(
            "/organization/single/:name",
            get(organization::organization_single),
        )
        .route(
            "/organization/list",
            get(organization::organization_list_all),
        )
        .route(
            "/organization/list/:tag",
            get(organization::organization_list_by_tag),
        )
}

fn validate_routes() -> Router<AppState> {
    Router::new()
        .route("/validate/bridge", post(validate::validate_bridge))
        .route("/validate/direct", post(validate::validate_direct))
        .route(
            "/application/public-key/fetch",
            post(application::application_public_key),
        )
}

fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/group/query", post(group::group_query))
        .route("/tag/query", post(tag::tag_query))
        .route("/namespace/query", post(namespace::namespace_query))
        .route("/decorator/query", post(decorator::decorator_query))
}
