// handlers/protected/mod.rs - Site-scoped handlers (x-api-key required)
//
// Security Level: per-site API key, resolved by the gateway
// Middleware: api_key_middleware (injects PresentedKey)

pub mod content;

pub use content::content_get;
