use crate::text_table::{Alignment, TextTableBuilder};
use divvy_application::SettlementSummary;
use divvy_domain::{Balances, Money, ReductionStats, Transfer};
use divvy_i18n as i18n;
use std::{borrow::Cow, fmt};

pub struct SettlementPresenter;

pub struct SettlementView {
    pub balance_table: String,
    pub transfer_table: Option<String>,
    pub stats_line: String,
    pub total_spent_line: String,
}

impl fmt::Display for SettlementView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.total_spent_line)?;
        writeln!(f)?;
        write!(f, "{}", self.balance_table)?;
        writeln!(f)?;
        match &self.transfer_table {
            Some(table) => write!(f, "{table}")?,
            None => writeln!(f, "{}", i18n::ALL_SETTLED)?,
        }
        writeln!(f)?;
        writeln!(f, "{}", self.stats_line)
    }
}

impl SettlementPresenter {
    pub fn render(summary: &SettlementSummary, currency: &str) -> SettlementView {
        let transfer_table = if summary.transfers.is_empty() {
            None
        } else {
            Some(Self::build_transfer_table(&summary.transfers, currency))
        };

        SettlementView {
            balance_table: Self::build_balance_table(&summary.balances, currency),
            transfer_table,
            stats_line: Self::stats_line(&summary.stats),
            total_spent_line: format!(
                "{}: {}",
                i18n::TOTAL_SPENT,
                format_amount(currency, summary.total_spent)
            ),
        }
    }

    pub fn build_balance_table(balances: &Balances, currency: &str) -> String {
        let mut builder = TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Right])
            .headers(&[Cow::Borrowed(i18n::MEMBER), Cow::Borrowed(i18n::BALANCE)]);

        for (name, balance) in balances.iter() {
            builder = builder.row([
                Cow::Borrowed(name.as_str()),
                Cow::Owned(balance_label(balance, currency)),
            ]);
        }

        builder.build()
    }

    pub fn build_transfer_table(transfers: &[Transfer], currency: &str) -> String {
        let mut builder = TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Left, Alignment::Right])
            .headers(&[
                Cow::Borrowed(i18n::FROM),
                Cow::Borrowed(i18n::TO),
                Cow::Borrowed(i18n::AMOUNT),
            ]);

        for transfer in transfers {
            builder = builder.row([
                Cow::Borrowed(transfer.from.as_str()),
                Cow::Borrowed(transfer.to.as_str()),
                Cow::Owned(format_amount(currency, transfer.amount)),
            ]);
        }

        builder.build()
    }

    pub fn stats_line(stats: &ReductionStats) -> String {
        i18n::reduction_summary(stats.naive, stats.optimized, stats.reduction_percent)
    }
}

fn balance_label(balance: Money, currency: &str) -> String {
    if balance.is_credit() {
        i18n::to_receive(format_amount(currency, balance))
    } else if balance.is_debit() {
        i18n::owes(format_amount(currency, balance.abs()))
    } else {
        i18n::SETTLED.to_string()
    }
}

/// Currency symbol followed by the amount at two decimal places.
pub fn format_amount(currency: &str, amount: Money) -> String {
    format!("{currency}{:.2}", amount.round_for_display())
}
