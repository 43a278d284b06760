//! # Toolhub Backend
//!
//! [`SupabaseClient`] speaks the hosted backend's two HTTP dialects: the
//! auth service under `/auth/v1` and the table API under `/rest/v1`. It
//! implements every collaborator trait from `toolhub_core::traits`, so the
//! web layer never sees a URL or a status code.
//!
//! Row-level policies on the backend decide what each token may read or
//! write; this crate forwards the caller's token and reports what came back.

mod auth;
mod client;
mod error;
mod rest;

pub use client::SupabaseClient;
