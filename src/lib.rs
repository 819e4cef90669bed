//! HTTP transport for the blackjack round engine.
//!
//! The engine itself lives in `packages/blackjack`; this crate owns the
//! actix-web surface: one shared [`blackjack::Round`] behind a lock, a
//! small JSON API and the process configuration.

pub mod error;
pub mod msg;
pub mod server;

pub use server::Server;
