pub mod infos;
pub mod password;
pub mod validate;
pub mod version;
