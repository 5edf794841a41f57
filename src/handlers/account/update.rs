use axum::extract::State;
use axum::response::Json;
use axum::Extension;
use serde::Deserialize;
use serde_json::Value;

use crate::error::GreenError;
use crate::handlers::account::detail_payload;
use crate::handlers::{check_email, check_phone, ensure_green, parse_body, require_account};
use crate::middleware::GreenAuth;
use crate::pattern::Pattern;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateBody {
    username: String,
    namespace: String,
    email: Option<String>,
    phone: Option<String>,
    display_name: Option<String>,
    avatar: Option<String>,
}

fn update_pattern() -> Pattern {
    Pattern::strict_map(vec![
        ("username", Pattern::string()),
        ("namespace", Pattern::string()),
        ("email", Pattern::string().optional()),
        ("phone", Pattern::string().optional()),
        ("displayName", Pattern::string().optional()),
        ("avatar", Pattern::string().optional()),
    ])
}

/// POST /account/update - patch contact fields, saving only on change
pub async fn account_update(
    State(state): State<AppState>,
    Extension(green): Extension<GreenAuth>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, GreenError> {
    ensure_green(&green)?;
    let body: UpdateBody = parse_body(body, &update_pattern())?;

    let store = state.store.as_ref();
    let mut account = require_account(store, &body.username, &body.namespace).await?;

    let mut changed = false;
    if let Some(email) = body.email {
        check_email(&email)?;
        changed |= account.update_email(email);
    }
    if let Some(phone) = body.phone {
        check_phone(&phone)?;
        changed |= account.update_phone(phone);
    }
    if let Some(display_name) = body.display_name {
        changed |= account.update_display_name(display_name);
    }
    if let Some(avatar) = body.avatar {
        changed |= account.update_avatar(avatar);
    }

    if changed {
        store.save_account(&account).await?;
    }

    Ok(Json(detail_payload(&account, &body.namespace)))
}
