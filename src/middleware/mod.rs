pub mod green;

pub use green::{green_auth_middleware, GreenAuth};
