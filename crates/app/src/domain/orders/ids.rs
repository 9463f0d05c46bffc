//! Order identifiers

use std::sync::atomic::{AtomicI64, Ordering};

use jiff::Timestamp;

use crate::domain::orders::models::OrderId;

/// Issues `ORD-<millis>` identifiers that never repeat within the process.
///
/// When two orders arrive in the same millisecond the later one takes the
/// next unused millisecond value, so issued ids are strictly increasing.
#[derive(Debug, Default)]
pub struct OrderIdGenerator {
    last: AtomicI64,
}

impl OrderIdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self, now: Timestamp) -> OrderId {
        let millis = now.as_millisecond();
        let mut last = self.last.load(Ordering::Acquire);

        loop {
            let candidate = millis.max(last.saturating_add(1));

            match self
                .last
                .compare_exchange_weak(last, candidate, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return OrderId::from_millis(candidate),
                Err(current) => last = current,
            }
        }
    }
}
