use crate::{
    settlement_presenter::format_amount,
    text_table::{Alignment, TextTableBuilder},
};
use chrono::SecondsFormat;
use divvy_application::ExpenseEntry;
use divvy_i18n as i18n;
use std::borrow::Cow;

pub struct ExpensePresenter;

impl ExpensePresenter {
    /// Expense list with the ledger position each row can be deleted or
    /// edited by. Returns the empty-state text when there is nothing to show.
    pub fn render(entries: &[ExpenseEntry], currency: &str) -> String {
        if entries.is_empty() {
            return format!("{}\n", i18n::NO_EXPENSES);
        }

        let rows: Vec<[Cow<'_, str>; 4]> = entries
            .iter()
            .map(|entry| {
                let expense = &entry.expense;
                [
                    Cow::Owned(entry.index.to_string()),
                    capitalize(&expense.description),
                    Cow::Owned(i18n::expense_details(
                        format_amount(currency, expense.amount),
                        &expense.paid_by,
                        expense.split_among.len(),
                    )),
                    Cow::Owned(
                        expense
                            .timestamp
                            .to_rfc3339_opts(SecondsFormat::Secs, true),
                    ),
                ]
            })
            .collect();

        TextTableBuilder::new()
            .alignments(&[
                Alignment::Right,
                Alignment::Left,
                Alignment::Left,
                Alignment::Left,
            ])
            .headers(&[
                Cow::Borrowed(i18n::POSITION),
                Cow::Borrowed(i18n::DESCRIPTION),
                Cow::Borrowed(i18n::DETAILS),
                Cow::Borrowed(i18n::WHEN),
            ])
            .rows(rows)
            .build()
    }
}

fn capitalize(text: &str) -> Cow<'_, str> {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => {
            Cow::Owned(first.to_uppercase().chain(chars).collect())
        }
        _ => Cow::Borrowed(text),
    }
}
