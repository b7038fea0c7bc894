//! Long-poll channel subscriptions.
//!
//! Each subscription is one background task running [`PollLoop`] and one
//! [`Subscription`] handle that receives its messages. The task owns the
//! continuation token; the handle only sees messages and, at the end, a
//! [`SubscriptionEnd`] carrying the last token for resumption.

mod handle;
mod poll_loop;

pub use handle::{Subscription, SubscriptionEnd};
pub(crate) use poll_loop::PollLoop;
