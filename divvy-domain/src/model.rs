use std::{
    borrow::Borrow,
    fmt,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use chrono::{DateTime, Utc};
use fxhash::FxBuildHasher;
use indexmap::{IndexMap, IndexSet};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::error::DomainError;

/// Roster size limit applied when none is configured.
pub const DEFAULT_ROSTER_CAPACITY: usize = 20;

/// Signed monetary amount.
///
/// Balances derived from equal splits are not rounded, so every comparison
/// against zero goes through [`Money::TOLERANCE`].
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);
    /// Amounts within this distance of zero count as settled.
    pub const TOLERANCE: Self = Self(Decimal::from_parts(1, 0, 0, false, 2));

    pub fn new(num: i64, scale: u32) -> Self {
        Self(Decimal::new(num, scale))
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Owed money beyond the tolerance band.
    pub fn is_credit(self) -> bool {
        self > Self::TOLERANCE
    }

    /// Owes money beyond the tolerance band.
    pub fn is_debit(self) -> bool {
        self < -Self::TOLERANCE
    }

    /// Remaining amount small enough to stop matching against.
    pub fn is_below_tolerance(self) -> bool {
        self < Self::TOLERANCE
    }

    pub fn is_settled(self) -> bool {
        self.abs() <= Self::TOLERANCE
    }

    /// One equal share of `self` among `parts` members. `parts` must be non-zero.
    pub fn split_evenly(self, parts: usize) -> Self {
        Self(self.0 / Decimal::from(parts))
    }

    pub fn checked_add(self, rhs: Self) -> Result<Self, DomainError> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or(DomainError::AmountOverflow)
    }

    pub fn checked_sub(self, rhs: Self) -> Result<Self, DomainError> {
        self.0
            .checked_sub(rhs.0)
            .map(Self)
            .ok_or(DomainError::AmountOverflow)
    }

    /// Sum that reports overflow instead of panicking.
    pub fn checked_sum<I>(amounts: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = Self>,
    {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, |acc, amount| acc.checked_add(amount))
    }

    pub fn round_for_display(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(precision) => write!(f, "{:.*}", precision, self.0),
            None => write!(f, "{}", self.0.normalize()),
        }
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Self)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

/// Display name identifying a participant. Case-sensitive, never blank.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "SmolStr", into = "SmolStr")]
pub struct ParticipantName(SmolStr);

impl ParticipantName {
    pub fn new(name: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyName);
        }
        Ok(Self(SmolStr::new(trimmed)))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ParticipantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Borrow<str> for ParticipantName {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for ParticipantName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<SmolStr> for ParticipantName {
    type Error = DomainError;

    fn try_from(value: SmolStr) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ParticipantName> for SmolStr {
    fn from(value: ParticipantName) -> Self {
        value.0
    }
}

/// Ordered, duplicate-free list of participants.
///
/// Insertion order is significant: it decides the order in which creditors
/// and debtors are matched when settlements are computed.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    names: IndexSet<ParticipantName, FxBuildHasher>,
    capacity: Option<usize>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a roster from stored names, rejecting duplicates. No capacity
    /// limit is applied to names that are already stored.
    pub fn from_names<I>(names: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = ParticipantName>,
    {
        let mut roster = Self::new();
        for name in names {
            roster.try_add(name)?;
        }
        Ok(roster)
    }

    pub fn with_capacity_limit(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn try_add(&mut self, name: ParticipantName) -> Result<(), DomainError> {
        if self.names.contains(name.as_str()) {
            return Err(DomainError::DuplicateParticipant {
                name: name.as_str().to_owned(),
            });
        }
        match self.capacity {
            Some(capacity) if self.names.len() >= capacity => {
                return Err(DomainError::RosterFull { capacity });
            }
            _ => {}
        }
        self.names.insert(name);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.names.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Checks that `name` is on the roster.
    pub fn require(&self, name: &str) -> Result<(), DomainError> {
        if self.contains(name) {
            Ok(())
        } else {
            Err(DomainError::UnknownParticipant {
                name: name.to_owned(),
            })
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParticipantName> + '_ {
        self.names.iter()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn to_vec(&self) -> Vec<ParticipantName> {
        self.names.iter().cloned().collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(alias = "desc")]
    pub description: String,
    pub amount: Money,
    pub paid_by: ParticipantName,
    pub split_among: Vec<ParticipantName>,
    #[serde(alias = "date")]
    pub timestamp: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        paid_by: ParticipantName,
        split_among: Vec<ParticipantName>,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let description = description.into().trim().to_owned();
        if description.is_empty() {
            return Err(DomainError::EmptyDescription);
        }

        let mut seen: IndexSet<&str, FxBuildHasher> = IndexSet::default();
        for member in &split_among {
            if !seen.insert(member.as_str()) {
                return Err(DomainError::DuplicateSplitMember {
                    name: member.as_str().to_owned(),
                });
            }
        }

        let expense = Self {
            description,
            amount,
            paid_by,
            split_among,
            timestamp,
        };
        expense.validate()?;
        Ok(expense)
    }

    /// Checks the invariants balance accounting relies on.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.amount.is_positive() {
            return Err(DomainError::NonPositiveAmount {
                amount: self.amount,
            });
        }
        if self.split_among.is_empty() {
            return Err(DomainError::EmptySplit);
        }
        Ok(())
    }

    pub fn share(&self) -> Money {
        self.amount.split_evenly(self.split_among.len())
    }

    pub fn references(&self, name: &str) -> bool {
        self.paid_by.as_str() == name || self.split_among.iter().any(|m| m.as_str() == name)
    }
}

/// A real-world payment that has already been made. Append-only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaidSettlement {
    pub from: ParticipantName,
    pub to: ParticipantName,
    pub amount: Money,
    #[serde(alias = "date")]
    pub timestamp: DateTime<Utc>,
}

impl PaidSettlement {
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.amount.is_positive() {
            return Err(DomainError::NonPositiveAmount {
                amount: self.amount,
            });
        }
        Ok(())
    }

    pub fn references(&self, name: &str) -> bool {
        self.from.as_str() == name || self.to.as_str() == name
    }
}

/// Proposed payment from a debtor to a creditor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: ParticipantName,
    pub to: ParticipantName,
    pub amount: Money,
}

/// Net balance per participant, in roster order.
///
/// Positive: the participant is owed money. Negative: the participant owes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Balances(IndexMap<ParticipantName, Money, FxBuildHasher>);

impl Balances {
    pub fn zeroed(roster: &Roster) -> Self {
        Self(
            roster
                .iter()
                .cloned()
                .map(|name| (name, Money::ZERO))
                .collect(),
        )
    }

    pub fn get(&self, name: &str) -> Option<Money> {
        self.0.get(name).copied()
    }

    pub fn credit(&mut self, name: &ParticipantName, amount: Money) -> Result<(), DomainError> {
        let balance = self.entry_mut(name)?;
        *balance = balance.checked_add(amount)?;
        Ok(())
    }

    pub fn debit(&mut self, name: &ParticipantName, amount: Money) -> Result<(), DomainError> {
        let balance = self.entry_mut(name)?;
        *balance = balance.checked_sub(amount)?;
        Ok(())
    }

    fn entry_mut(&mut self, name: &ParticipantName) -> Result<&mut Money, DomainError> {
        self.0
            .get_mut(name.as_str())
            .ok_or_else(|| DomainError::UnknownParticipant {
                name: name.as_str().to_owned(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantName, Money)> + '_ {
        self.0.iter().map(|(name, balance)| (name, *balance))
    }

    pub fn total(&self) -> Result<Money, DomainError> {
        Money::checked_sum(self.0.values().copied())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_settled(&self) -> bool {
        self.0.values().all(|balance| balance.is_settled())
    }

    pub fn creditor_count(&self) -> usize {
        self.0.values().filter(|balance| balance.is_credit()).count()
    }

    pub fn debtor_count(&self) -> usize {
        self.0.values().filter(|balance| balance.is_debit()).count()
    }
}

impl FromIterator<(ParticipantName, Money)> for Balances {
    fn from_iter<T: IntoIterator<Item = (ParticipantName, Money)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
