// Domain error taxonomy shared with the other platform services
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// Module prefix carried in every error message.
pub const MODULE_NAME: &str = "Green-Gateway";

/// Closed set of numeric error codes. Every domain failure a handler can
/// produce maps to exactly one of these; the numeric ranges group them by
/// kind (41xx credential, 45xx/50xx request shape, 62xx lookup, 63xx state
/// conflict, 64xx limits, 70xx permission, 8000 catch-all).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    ApplicationGreenNotValid = 4121,

    InsufficientInformation = 4500,
    InsufficientSpecificInformation = 4501,
    InfoLineFormatError = 4506,

    RequestDoesNotMatchPattern = 5005,
    RequestFormatError = 5006,

    InvalidUsername = 5010,
    InvalidEmail = 5011,
    InvalidPhone = 5012,
    InvalidDisplayName = 5013,
    InvalidCommonName = 5014,
    InvalidAccountAction = 5015,

    ApplicationNotFound = 6200,
    GroupNotFound = 6201,
    AccountNotFound = 6202,
    OrganizationNotFound = 6203,
    NamespaceNotFound = 6204,
    TagNotFound = 6205,

    DuplicateAccount = 6220,
    DuplicateOrganization = 6221,
    DuplicateTag = 6222,

    AlreadyActivated = 6320,
    AlreadyDeactivated = 6321,

    OrganizationLimitExceed = 6400,

    CannotModifyInternalGroup = 7001,

    InternalError = 8000,
}

impl ErrorCode {
    /// Message template; `"{}"` placeholders are filled from the error
    /// arguments in order.
    pub fn template(&self) -> &'static str {
        match self {
            ErrorCode::ApplicationGreenNotValid => "Application green not valid",
            ErrorCode::InsufficientInformation => "Insufficient information",
            ErrorCode::InsufficientSpecificInformation => "Insufficient information, need: \"{}\"",
            ErrorCode::InfoLineFormatError => "Info line: \"{}\" format error",
            ErrorCode::RequestDoesNotMatchPattern => "Request does not match pattern: \"{}\"",
            ErrorCode::RequestFormatError => {
                "Request format error: \"{}\", expect: \"{}\", actual: \"{}\""
            }
            ErrorCode::InvalidUsername => "Invalid username: \"{}\"",
            ErrorCode::InvalidEmail => "Invalid email: \"{}\"",
            ErrorCode::InvalidPhone => "Invalid phone: \"{}\"",
            ErrorCode::InvalidDisplayName => "Invalid display name: \"{}\"",
            ErrorCode::InvalidCommonName => "Invalid common name: \"{}\"",
            ErrorCode::InvalidAccountAction => "Invalid account action: \"{}\"",
            ErrorCode::ApplicationNotFound => "Application: \"{}\" not found",
            ErrorCode::GroupNotFound => "Group: \"{}\" not found",
            ErrorCode::AccountNotFound => "Account: \"{}\" not found",
            ErrorCode::OrganizationNotFound => "Organization: \"{}\" not found",
            ErrorCode::NamespaceNotFound => "Namespace: \"{}\" not found",
            ErrorCode::TagNotFound => "Tag: \"{}\" not found",
            ErrorCode::DuplicateAccount => "Account: \"{}\" already exists",
            ErrorCode::DuplicateOrganization => "Organization: \"{}\" already exists",
            ErrorCode::DuplicateTag => "Tag: \"{}\" already exists",
            ErrorCode::AlreadyActivated => "Target: \"{}\" already activated",
            ErrorCode::AlreadyDeactivated => "Target: \"{}\" already deactivated",
            ErrorCode::OrganizationLimitExceed => "Organization limit: \"{}\" of \"{}\" exceeded",
            ErrorCode::CannotModifyInternalGroup => "Internal groups cannot be modified",
            ErrorCode::InternalError => "Internal error: \"{}\"",
        }
    }
}

/// A domain error: one taxonomy code plus the arguments substituted into its
/// template. Handlers return `Result<_, GreenError>` and the response
/// conversion below is the single place the HTTP mapping happens.
#[derive(Debug, Clone)]
pub struct GreenError {
    code: ErrorCode,
    args: Vec<String>,
}

impl GreenError {
    pub fn new(code: ErrorCode) -> Self {
        GreenError { code, args: Vec::new() }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn numeric(&self) -> u16 {
        self.code as u16
    }

    /// Template with placeholders filled in argument order; surplus
    /// placeholders are left as-is, surplus arguments are dropped.
    pub fn description(&self) -> String {
        let mut out = self.code.template().to_string();
        for arg in &self.args {
            if !out.contains("{}") {
                break;
            }
            out = out.replacen("{}", arg, 1);
        }
        out
    }

    pub fn to_json(&self) -> Value {
        json!({
            "status": 400,
            "code": self.numeric(),
            "description": self.description(),
            "message": self.to_string(),
        })
    }
}

// Static constructors, one per code the handlers raise.
impl GreenError {
    pub fn green_not_valid() -> Self {
        GreenError::new(ErrorCode::ApplicationGreenNotValid)
    }

    pub fn insufficient_information() -> Self {
        GreenError::new(ErrorCode::InsufficientInformation)
    }

    pub fn insufficient_specific(need: impl Into<String>) -> Self {
        GreenError::new(ErrorCode::InsufficientSpecificInformation).arg(need)
    }

    pub fn info_line_format(line: impl Into<String>) -> Self {
        GreenError::new(ErrorCode::InfoLineFormatError).arg(line)
    }

    pub fn pattern_mismatch(first_invalid: impl Into<String>) -> Self {
        GreenError::new(ErrorCode::RequestDoesNotMatchPattern).arg(first_invalid)
    }

    pub fn format_error(
        what: impl Into<String>,
        expect: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        GreenError::new(ErrorCode::RequestFormatError)
            .arg(what)
            .arg(expect)
            .arg(actual)
    }

    pub fn invalid_username(reason: impl Into<String>) -> Self {
        GreenError::new(ErrorCode::InvalidUsername).arg(reason)
    }

    pub fn invalid_email(reason: impl Into<String>) -> Self {
        GreenError::new(ErrorCode::InvalidEmail).arg(reason)
    }

    pub fn invalid_phone(reason: impl Into<String>) -> Self {
        GreenError::new(ErrorCode::InvalidPhone).arg(reason)
    }

    pub fn invalid_display_name(reason: impl Into<String>) -> Self {
        GreenError::new(ErrorCode::InvalidDisplayName).arg(reason)
    }

    pub fn invalid_common_name(reason: impl Into<String>) -> Self {
        GreenError::new(ErrorCode::InvalidCommonName).arg(reason)
    }

    pub fn invalid_account_action(action: impl Into<String>) -> Self {
        GreenError::new(ErrorCode::InvalidAccountAction).arg(action)
    }

    pub fn application_not_found(key: impl Into<String>) -> Self {
        GreenError::new(ErrorCode::ApplicationNotFound).arg(key)
    }

    pub fn group_not_found(name: impl Into<String>) -> Self {
        GreenError::new(ErrorCode::GroupNotFound).arg(name)
    }

    pub fn account_not_found(username: impl Into<String>) -> Self {
        GreenError::new(ErrorCode::AccountNotFound).arg(username)
    }

    pub fn organization_not_found(name: impl Into<String>) -> Self {
        GreenError::new(ErrorCode::OrganizationNotFound).arg(name)
    }

    pub fn namespace_not_found(namespace: impl Into<String>) -> Self {
        GreenError::new(ErrorCode::NamespaceNotFound).arg(namespace)
    }

    pub fn tag_not_found(name: impl Into<String>) -> Self {
        GreenError::new(ErrorCode::TagNotFound).arg(name)
    }

    pub fn duplicate_account(username: impl Into<String>) -> Self {
        GreenError::new(ErrorCode::DuplicateAccount).arg(username)
    }

    pub fn duplicate_organization(name: impl Into<String>) -> Self {
        GreenError::new(ErrorCode::DuplicateOrganization).arg(name)
    }

    pub fn duplicate_tag(name: impl Into<String>) -> Self {
        GreenError::new(ErrorCode::DuplicateTag).arg(name)
    }

    pub fn already_activated(username: impl Into<String>) -> Self {
        GreenError::new(ErrorCode::AlreadyActivated).arg(username)
    }

    pub fn already_deactivated(username: impl Into<String>) -> Self {
        GreenError::new(ErrorCode::AlreadyDeactivated).arg(username)
    }

    pub fn organization_limit_exceed(count: u64, limit: u64) -> Self {
        GreenError::new(ErrorCode::OrganizationLimitExceed)
            .arg(count.to_string())
            .arg(limit.to_string())
    }

    pub fn cannot_modify_internal_group() -> Self {
        GreenError::new(ErrorCode::CannotModifyInternalGroup)
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        GreenError::new(ErrorCode::InternalError).arg(detail)
    }
}

impl From<crate::database::StoreError> for GreenError {
    fn from(err: crate::database::StoreError) -> Self {
        GreenError::internal(err.to_string())
    }
}

impl std::fmt::Display for GreenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", MODULE_NAME, self.description())
    }
}

impl std::error::Error for GreenError {}

// Every domain error answers 400 with the structured payload; the trace
// layer supplies the request context around this line.
impl IntoResponse for GreenError {
    fn into_response(self) -> axum::response::Response {
        if self.code == ErrorCode::InternalError {
            tracing::error!("{} ({})", self, self.numeric());
        } else {
            tracing::debug!("{} ({})", self, self.numeric());
        }
        (StatusCode::BAD_REQUEST, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_substitution() {
        let err = GreenError::organization_limit_exceed(5, 5);
        assert_eq!(err.description(), "Organization limit: \"5\" of \"5\" exceeded");
        assert_eq!(err.numeric(), 6400);
    }

    #[test]
    fn test_surplus_placeholders_kept() {
        let err = GreenError::new(ErrorCode::RequestFormatError).arg("key-length");
        assert_eq!(
            err.description(),
            "Request format error: \"key-length\", expect: \"{}\", actual: \"{}\""
        );
    }

    #[test]
    fn test_message_is_module_prefixed() {
        let err = GreenError::account_not_found("tien");
        assert_eq!(err.to_string(), "Green-Gateway: Account: \"tien\" not found");
    }

    #[test]
    fn test_payload_shape() {
        let body = GreenError::green_not_valid().to_json();
        assert_eq!(body["status"], 400);
        assert_eq!(body["code"], 4121);
        assert_eq!(body["description"], "Application green not valid");
    }
}
