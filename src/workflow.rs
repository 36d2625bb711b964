use chrono::{DateTime, SubsecRound, Utc};

use crate::models::{Order, OrderStatus};

/// Externally triggered status changes of an order.
///
/// Transitions carry no precondition on the current status: completing a
/// pending order skips `InProcess`, and approving a completed order moves it
/// back to `InProcess`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Supplier accepted the order.
    Approve,
    /// Store received the goods.
    Complete,
}

impl Transition {
    pub fn target(self) -> OrderStatus {
        match self {
            Transition::Approve => OrderStatus::InProcess,
            Transition::Complete => OrderStatus::Completed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Transition::Approve => "approve",
            Transition::Complete => "complete",
        }
    }
}

/// Current time at the precision Postgres `TIMESTAMPTZ` keeps (microseconds),
/// so a timestamp reads back exactly as it was first returned.
pub fn stored_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// `updatedAt` never moves backwards, even if the clock does.
pub fn refreshed_at(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    previous.max(now)
}

impl Order {
    /// Applies `transition`, leaving line items and `created_at` untouched.
    pub fn apply(&mut self, transition: Transition, now: DateTime<Utc>) {
        self.status = transition.target();
        self.updated_at = refreshed_at(self.updated_at, now);
    }
}
