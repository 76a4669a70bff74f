//! # Radio Link Budget
//!
//! `linkbudget` combines transmit power, antenna gains, feed losses and
//! planning margins into the maximum allowable path loss (MAPL) of a
//! one-way radio link. Everything is plain dB-domain arithmetic; a budget
//! that closes at or below zero loss is reported as infeasible rather
//! than clamped.

mod budget;
mod error;

pub use crate::{
    budget::{LinkBudget, LinkBudgetBuilder},
    error::LinkBudgetError,
};
