// Guarded outbound HTTP: the only path to the network

pub mod client;
pub mod guard;

pub use client::{GuardedClient, RequestOptions};
pub use guard::{RequestGuard, DEFAULT_ALLOWED_HOSTS};
