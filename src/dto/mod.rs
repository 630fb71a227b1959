//! DTO modules shaping the JSON bodies of the HTTP surface.

pub mod api;
