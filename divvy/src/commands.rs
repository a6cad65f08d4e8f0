use crate::{
    CliResult,
    bootstrap::AppConfig,
    cli::{Command, ExpenseArgs, ExpenseCommand, ParticipantCommand},
};
use divvy_application::{LedgerService, NewExpense};
use divvy_i18n as i18n;
use divvy_presentation::{
    ExpensePresenter, ParticipantPresenter, SettlementPresenter, format_amount,
};

const RECENT_AFTER_CHANGE: usize = 5;

/// Runs one subcommand and returns what should be printed on stdout.
pub fn execute(
    command: Command,
    service: &LedgerService<'_>,
    config: &AppConfig,
) -> CliResult<String> {
    let currency = config.currency.as_str();
    let capacity = Some(config.max_participants);

    match command {
        Command::Participant(command) => {
            match command {
                ParticipantCommand::Add { names } => {
                    for name in &names {
                        service.add_participant(name).map_err(|e| e.to_string())?;
                    }
                }
                ParticipantCommand::Remove { name } => {
                    service.remove_participant(&name).map_err(|e| e.to_string())?;
                }
                ParticipantCommand::Clear => {
                    service.clear_participants().map_err(|e| e.to_string())?;
                }
                ParticipantCommand::List => {}
            }
            let participants = service.participants().map_err(|e| e.to_string())?;
            Ok(ParticipantPresenter::render(&participants, capacity))
        }
        Command::Expense(command) => {
            let limit = match command {
                ExpenseCommand::Add(args) => {
                    let input = new_expense(service, args)?;
                    service.add_expense(input).map_err(|e| e.to_string())?;
                    RECENT_AFTER_CHANGE
                }
                ExpenseCommand::Delete { index } => {
                    service.delete_expense(index).map_err(|e| e.to_string())?;
                    RECENT_AFTER_CHANGE
                }
                ExpenseCommand::Edit { index, expense } => {
                    let input = new_expense(service, expense)?;
                    service
                        .edit_expense(index, input)
                        .map_err(|e| e.to_string())?;
                    RECENT_AFTER_CHANGE
                }
                ExpenseCommand::List { limit } => limit,
            };
            let entries = service
                .recent_expenses(limit)
                .map_err(|e| e.to_string())?;
            Ok(ExpensePresenter::render(&entries, currency))
        }
        Command::Settle => {
            let summary = service.summary().map_err(|e| e.to_string())?;
            let view = SettlementPresenter::render(&summary, currency);
            let transfers = view
                .transfer_table
                .unwrap_or_else(|| format!("{}\n", i18n::ALL_SETTLED));
            Ok(format!("{transfers}\n{}\n", view.stats_line))
        }
        Command::Paid { from, to, amount } => {
            let settlement = service
                .record_paid(&from, &to, amount)
                .map_err(|e| e.to_string())?;
            Ok(format!(
                "{}\n",
                i18n::recorded_payment(
                    &settlement.from,
                    &settlement.to,
                    format_amount(currency, settlement.amount),
                )
            ))
        }
        Command::Summary => {
            let summary = service.summary().map_err(|e| e.to_string())?;
            Ok(SettlementPresenter::render(&summary, currency).to_string())
        }
    }
}

fn new_expense(service: &LedgerService<'_>, args: ExpenseArgs) -> CliResult<NewExpense> {
    let split_among = if args.all {
        service
            .participants()
            .map_err(|e| e.to_string())?
            .into_iter()
            .map(|name| name.as_str().to_string())
            .collect()
    } else {
        args.split
    };

    Ok(NewExpense {
        description: args.description,
        amount: args.amount,
        paid_by: args.paid_by,
        split_among,
    })
}
