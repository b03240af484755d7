//! Chirpy - Short-Message Posting Service
//!
//! A REST API backed by PostgreSQL. The engineering core is the
//! authentication and session-token subsystem in [`core::auth`]; the
//! surrounding chirp/user/admin/webhook handlers are thin glue over
//! repository queries.

pub mod core;
