// handlers/application/mod.rs - Application material routes

pub mod public_key;

pub use public_key::application_public_key;
