// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # dinebot
//!
//! A keyword-and-fuzzy-matching assistant for restaurant chat: it works out
//! what a customer is asking about and which dish or FAQ entry they mean.
//!
//! ## Architecture
//!
//! - **NLU core** (`nlu`): normalization, synonym expansion, fuzzy string
//!   similarity, intent scoring, the ordered intent decision policy, and menu
//!   and FAQ resolution. Pure and deterministic.
//! - **Data** (`data`): the restaurant snapshot (catalog, FAQ, branches,
//!   hours, about) read leniently from JSON.
//! - **Configuration** (`config`): intent keyword tables and synonym groups
//!   from TOML, with a bundled default.
//! - **Rendering** (`respond`) and the **assistant** facade (`assistant`).
//!
//! ## Library usage
//!
//! ```no_run
//! use std::path::Path;
//! use dinebot::assistant::Assistant;
//! use dinebot::nlu::Intent;
//!
//! let assistant = Assistant::open(Some(Path::new("data"))).unwrap();
//! let reply = assistant.reply("what time do you open");
//! assert_eq!(reply.intent, Intent::HoursQuery);
//! println!("{}", reply.answer);
//! ```

pub mod assistant;
pub mod config;
pub mod data;
pub mod error;
pub mod nlu;
pub mod respond;
