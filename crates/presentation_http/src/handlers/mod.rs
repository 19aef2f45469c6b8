//! HTTP request handlers

pub mod catalog;
pub mod common;
pub mod health;
pub mod internal;
