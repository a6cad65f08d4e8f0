use crate::model::Money;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("unknown participant '{name}'")]
    UnknownParticipant { name: String },
    #[error("expense must be split among at least one participant")]
    EmptySplit,
    #[error("amount must be positive (got {amount})")]
    NonPositiveAmount { amount: Money },
    #[error("participant name must not be empty")]
    EmptyName,
    #[error("expense description must not be empty")]
    EmptyDescription,
    #[error("participant '{name}' already exists")]
    DuplicateParticipant { name: String },
    #[error("participant '{name}' appears more than once in the split")]
    DuplicateSplitMember { name: String },
    #[error("roster is full (maximum {capacity} participants)")]
    RosterFull { capacity: usize },
    #[error("amounts are too large to add up")]
    AmountOverflow,
}
