//! Core domain modules for the Chirpy service

pub mod admin;
pub mod auth;
pub mod chirps;
pub mod config;
pub mod db;
pub mod moderation;
pub mod users;
pub mod webhooks;
