pub mod account;
pub mod application;
pub mod decorator;
pub mod group;
pub mod namespace;
pub mod organization;
pub mod tag;

pub use account::{Account, HistoryEntry};
pub use application::Application;
pub use decorator::Decorator;
pub use group::Group;
pub use namespace::Namespace;
pub use organization::{Organization, DEFAULT_MEMBER_LIMIT};
pub use tag::Tag;
