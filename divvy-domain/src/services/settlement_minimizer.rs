use crate::model::{Balances, Money, ParticipantName, Transfer};

/// Settlement calculation service
///
/// Greedy two-cursor cash-flow reduction: debtors and creditors are each
/// walked once, in roster order, and every step fully retires at least one
/// side. This keeps the transfer count at or below
/// `creditors + debtors - 1`, which is never more than `participants - 1`.
/// It is not guaranteed to be the global minimum.
pub struct SettlementMinimizer;

struct OpenPosition<'a> {
    name: &'a ParticipantName,
    remaining: Money,
}

impl SettlementMinimizer {
    /// Calculate the transfers that settle every balance
    ///
    /// # Arguments
    /// * `balances` - Net balances, in roster order
    ///
    /// # Returns
    /// Transfers in emission order; empty when every balance is within
    /// tolerance of zero
    pub fn minimize(&self, balances: &Balances) -> Vec<Transfer> {
        let mut creditors: Vec<OpenPosition<'_>> = Vec::new();
        let mut debtors: Vec<OpenPosition<'_>> = Vec::new();

        for (name, balance) in balances.iter() {
            if balance.is_credit() {
                creditors.push(OpenPosition {
                    name,
                    remaining: balance,
                });
            } else if balance.is_debit() {
                debtors.push(OpenPosition {
                    name,
                    remaining: -balance,
                });
            }
        }

        let mut transfers = Vec::with_capacity(creditors.len().max(debtors.len()));
        let mut i = 0;
        let mut j = 0;

        while i < debtors.len() && j < creditors.len() {
            let debtor = &mut debtors[i];
            let creditor = &mut creditors[j];

            let pay = debtor.remaining.min(creditor.remaining);
            transfers.push(Transfer {
                from: debtor.name.clone(),
                to: creditor.name.clone(),
                amount: pay,
            });

            debtor.remaining -= pay;
            creditor.remaining -= pay;

            if debtor.remaining.is_below_tolerance() {
                i += 1;
            }
            if creditor.remaining.is_below_tolerance() {
                j += 1;
            }
        }

        tracing::debug!(
            creditor_count = creditors.len(),
            debtor_count = debtors.len(),
            transfer_count = transfers.len(),
            "Minimized settlements"
        );

        transfers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn minimizer() -> SettlementMinimizer {
        SettlementMinimizer
    }

    fn name(value: &str) -> ParticipantName {
        ParticipantName::new(value).expect("valid name")
    }

    fn balances(entries: &[(&str, &str)]) -> Balances {
        entries
            .iter()
            .map(|(member, amount)| (name(member), amount.parse().expect("valid decimal")))
            .collect()
    }

    fn transfers(entries: &[(&str, &str, &str)]) -> Vec<Transfer> {
        entries
            .iter()
            .map(|(from, to, amount)| Transfer {
                from: name(from),
                to: name(to),
                amount: amount.parse().expect("valid decimal"),
            })
            .collect()
    }

    #[rstest]
    #[case::single_creditor(
        &[("A", "200"), ("B", "-100"), ("C", "-100")],
        &[("B", "A", "100"), ("C", "A", "100")]
    )]
    #[case::two_people(&[("A", "15"), ("B", "-15")], &[("B", "A", "15")])]
    #[case::all_zero(&[("A", "0"), ("B", "0"), ("C", "0")], &[])]
    #[case::empty(&[], &[])]
    #[case::within_tolerance(&[("A", "0.01"), ("B", "-0.01")], &[])]
    #[case::debtor_split_across_creditors(
        &[("A", "30"), ("B", "70"), ("C", "-100")],
        &[("C", "A", "30"), ("C", "B", "70")]
    )]
    #[case::roster_order_not_magnitude(
        &[("A", "-10"), ("B", "50"), ("C", "-40"), ("D", "0")],
        &[("A", "B", "10"), ("C", "B", "40")]
    )]
    #[case::staggered_amounts(
        &[("A", "3"), ("B", "7"), ("C", "-5"), ("D", "-5")],
        &[("C", "A", "3"), ("C", "B", "2"), ("D", "B", "5")]
    )]
    fn minimizes_settlements(
        minimizer: SettlementMinimizer,
        #[case] input: &[(&str, &str)],
        #[case] expected: &[(&str, &str, &str)],
    ) {
        let result = minimizer.minimize(&balances(input));
        assert_eq!(result, transfers(expected));
    }

    #[rstest]
    fn drift_residue_does_not_emit_dust_transfers(minimizer: SettlementMinimizer) {
        let result = minimizer.minimize(&balances(&[
            ("A", "66.666666666667"),
            ("B", "-33.333333333333"),
            ("C", "-33.333333333333"),
        ]));

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|t| t.to.as_str() == "A"));
    }
}
