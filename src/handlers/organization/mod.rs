// handlers/organization/mod.rs - Organization lifecycle and membership routes

pub mod add_tag;
pub mod inplode;
pub mod list_all;
pub mod list_by_tag;
pub mod query;
pub mod remove_tag;
pub mod single;
pub mod sub_account;
pub mod verify;

pub use add_tag::organization_add_tag;
pub use inplode::organization_inplode;
pub use list_all::organization_list_all;
pub use list_by_tag::organization_list_by_tag;
pub use query::organization_query;
pub use remove_tag::organization_remove_tag;
pub use single::organization_single;
pub use sub_account::organization_sub_account;
pub use verify::organization_verify;
