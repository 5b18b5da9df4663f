//! # Vriksha Core
//!
//! Shared, runtime-free logic for the Vriksha storefront: data models, the
//! cart state engine, the conversation log, the rule-based plant-care
//! responder, provider request construction, and the repository/session
//! traits the native shell plugs into.
//!
//! This crate contains no tokio, sqlx, reqwest, or filesystem I/O. Network
//! providers, SQLite storage, and the HTTP endpoint live in the `vriksha`
//! crate and talk to this one through [`provider::ChatProvider`],
//! [`users::UserRepository`], and [`session::SessionStore`].

pub mod cart;
pub mod catalog;
pub mod chat;
pub mod models;
pub mod prompt;
pub mod provider;
pub mod responder;
pub mod session;
pub mod users;
