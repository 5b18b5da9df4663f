//! # Vriksha
//!
//! Storefront core for the Vriksha plant store: a shopping-cart engine, a
//! plant-care chat assistant that falls back across remote providers and
//! built-in rules, mocked accounts, and a hosted-checkout hand-off.
//!
//! The runtime-free pieces (cart, conversation, catalog, rule-based
//! replies, repository and session traits) live in `vriksha-core`; this
//! crate adds the HTTP providers, persistence, the server, and the CLI.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  POST /api/chat  ┌────────────┐    ┌─────────────────┐
//! │ chat widget  │─────────────────▶│  server    │───▶│   Assistant     │
//! └──────────────┘                  └────────────┘    │ gemini → openai │
//!                                                     │ → rules         │
//!                                                     └─────────────────┘
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────────────────────┐
//! │ CLI (vriksha)│──▶│ AuthService  │──▶│ SqliteUserRepository / file  │
//! └──────────────┘   └──────────────┘   │ session store                │
//!                                       └──────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`logging`] | `tracing` subscriber setup |
//! | [`providers`] | Gemini and OpenAI clients |
//! | [`assistant`] | Provider fallback chain |
//! | [`server`] | HTTP API |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema migrations |
//! | [`sqlite_users`] | SQLite user repository |
//! | [`session_store`] | File-backed session store |
//! | [`auth`] | Mocked sign-in, sign-up, and Google sign-in |
//! | [`checkout`] | Hosted checkout hand-off |

pub mod assistant;
pub mod auth;
pub mod checkout;
pub mod config;
pub mod db;
pub mod logging;
pub mod migrate;
pub mod providers;
pub mod server;
pub mod session_store;
pub mod sqlite_users;
