use std::env;

/// Deployment version stamped into the build environment, or "LOCAL" when
/// running outside a release pipeline.
pub fn release_version() -> String {
    env::var("RELEASE_VERSION").unwrap_or_else(|_| "LOCAL".to_string())
}
