//! Call-site workflows built on top of the repository traits.

pub mod contacts;
