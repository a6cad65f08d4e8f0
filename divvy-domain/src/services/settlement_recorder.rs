use chrono::{DateTime, Utc};

use crate::{
    error::DomainError,
    model::{Money, PaidSettlement, ParticipantName},
};

/// Builds paid-settlement records for the append-only log.
///
/// Only the names and the amount are checked. Nothing is compared against
/// the currently outstanding transfers, so recording the same transfer twice
/// (or an amount no debt backs) skews every later balance. Callers should
/// offer "paid" only for transfers the minimizer produced.
pub struct SettlementRecorder;

impl SettlementRecorder {
    pub fn record(
        &self,
        from: &str,
        to: &str,
        amount: Money,
        timestamp: DateTime<Utc>,
    ) -> Result<PaidSettlement, DomainError> {
        let settlement = PaidSettlement {
            from: ParticipantName::new(from)?,
            to: ParticipantName::new(to)?,
            amount,
            timestamp,
        };
        settlement.validate()?;

        tracing::info!(
            from = %settlement.from,
            to = %settlement.to,
            amount = %settlement.amount,
            "Recorded paid settlement"
        );

        Ok(settlement)
    }

    /// Records a settlement and appends it to `log`.
    pub fn append(
        &self,
        log: &mut Vec<PaidSettlement>,
        from: &str,
        to: &str,
        amount: Money,
        timestamp: DateTime<Utc>,
    ) -> Result<PaidSettlement, DomainError> {
        let settlement = self.record(from, to, amount, timestamp)?;
        log.push(settlement.clone());
        Ok(settlement)
    }
}
