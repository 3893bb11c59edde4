//! HTTP request handlers

pub mod chaos;
pub mod health;
pub mod items;
