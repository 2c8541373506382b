// handlers/public/mod.rs - Public handlers (no credential required)
//
// Security Level: None (completely public access)
// Middleware: None

pub mod health;
pub mod root;

pub use health::health;
pub use root::root;
