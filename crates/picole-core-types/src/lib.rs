//! Core types shared across the picole facilities
//!
//! This crate provides the canonical field keys and event names used by
//! the logging facility in `picole-core` and by every repository in
//! `picole-store`, so that log consumers see one stable schema.

pub mod schema;
