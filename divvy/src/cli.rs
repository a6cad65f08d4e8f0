use clap::{Args, Parser, Subcommand};
use divvy_domain::Money;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "divvy", version, about = "Split shared expenses and settle up")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Default, Clone)]
pub struct GlobalArgs {
    /// Directory holding the ledger documents [env: DIVVY_DATA_DIR]
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Currency symbol shown before amounts [env: DIVVY_CURRENCY]
    #[arg(long, global = true)]
    pub currency: Option<String>,

    /// Roster size limit [env: DIVVY_MAX_PARTICIPANTS]
    #[arg(long, global = true)]
    pub max_participants: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage the roster
    #[command(subcommand)]
    Participant(ParticipantCommand),

    /// Manage recorded expenses
    #[command(subcommand)]
    Expense(ExpenseCommand),

    /// Show who pays whom to settle every balance
    Settle,

    /// Record that FROM paid TO an amount
    Paid {
        from: String,
        to: String,
        amount: Money,
    },

    /// Total spent, balances, transfers and the reduction statistic
    Summary,
}

#[derive(Subcommand, Debug)]
pub enum ParticipantCommand {
    /// Add one or more participants
    Add {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Remove a participant no expense or payment refers to
    Remove { name: String },
    List,
    /// Remove every participant
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum ExpenseCommand {
    Add(ExpenseArgs),
    /// Newest expenses first
    List {
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// Delete the expense at a ledger position
    Delete { index: usize },
    /// Replace the expense at a ledger position; it moves to the end
    Edit {
        index: usize,
        #[command(flatten)]
        expense: ExpenseArgs,
    },
}

#[derive(Args, Debug)]
pub struct ExpenseArgs {
    pub description: String,
    pub amount: Money,

    #[arg(long)]
    pub paid_by: String,

    /// Members sharing the cost, comma separated or repeated
    #[arg(long, value_delimiter = ',', required_unless_present = "all", conflicts_with = "all")]
    pub split: Vec<String>,

    /// Split among everyone on the roster
    #[arg(long)]
    pub all: bool,
}
