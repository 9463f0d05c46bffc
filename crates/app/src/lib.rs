//! Shared application domain, persistence and notification modules.

pub mod clock;
pub mod context;
pub mod database;
pub mod domain;
pub mod notifications;

#[cfg(test)]
mod test;
