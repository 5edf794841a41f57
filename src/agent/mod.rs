pub mod group;
pub mod namespace;
pub mod organization;
pub mod tag;

pub use group::GroupAgent;
pub use namespace::NamespaceAgent;
pub use organization::OrganizationAgent;
pub use tag::TagAgent;
