#![warn(clippy::uninlined_format_args)]

pub mod expense_presenter;
pub mod participant_presenter;
pub mod settlement_presenter;
pub mod text_table;

pub use expense_presenter::ExpensePresenter;
pub use participant_presenter::ParticipantPresenter;
pub use settlement_presenter::{SettlementPresenter, SettlementView, format_amount};
pub use text_table::{Alignment, TextTableBuilder};
