//! Bakery Domain Concerns

pub mod orders;
