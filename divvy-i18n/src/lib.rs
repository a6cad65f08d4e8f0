#[cfg(all(feature = "ja", feature = "en"))]
compile_error!("Cannot enable both 'ja' and 'en' features at the same time");

#[cfg(feature = "ja")]
pub mod strings {
    pub const MEMBER: &str = "メンバー";
    pub const BALANCE: &str = "収支";
    pub const FROM: &str = "支払人";
    pub const TO: &str = "受取人";
    pub const AMOUNT: &str = "金額";
    pub const POSITION: &str = "番号";
    pub const DESCRIPTION: &str = "内容";
    pub const DETAILS: &str = "詳細";
    pub const WHEN: &str = "日時";
    pub const SETTLED: &str = "精算済み";
    pub const ALL_SETTLED: &str = "全員精算済みです 🎉";
    pub const NO_EXPENSES: &str = "まだ支出がありません";
    pub const NO_PARTICIPANTS: &str = "参加者がいません";
    pub const TOTAL_SPENT: &str = "総支出";
}

#[cfg(not(feature = "ja"))]
pub mod strings {
    pub const MEMBER: &str = "Member";
    pub const BALANCE: &str = "Balance";
    pub const FROM: &str = "From";
    pub const TO: &str = "To";
    pub const AMOUNT: &str = "Amount";
    pub const POSITION: &str = "#";
    pub const DESCRIPTION: &str = "Description";
    pub const DETAILS: &str = "Details";
    pub const WHEN: &str = "When";
    pub const SETTLED: &str = "settled";
    pub const ALL_SETTLED: &str = "All settled 🎉";
    pub const NO_EXPENSES: &str = "No expenses yet";
    pub const NO_PARTICIPANTS: &str = "No participants yet";
    pub const TOTAL_SPENT: &str = "Total spent";
}

pub use strings::*;

use std::fmt::Display;

#[cfg(feature = "ja")]
pub fn to_receive(amount: impl Display) -> String {
    format!("+{amount} 受取")
}

#[cfg(feature = "ja")]
pub fn owes(amount: impl Display) -> String {
    format!("{amount} 支払")
}

#[cfg(feature = "ja")]
pub fn expense_details(amount: impl Display, payer: impl Display, people: usize) -> String {
    format!("{amount} · {payer} が支払 · {people} 人")
}

#[cfg(feature = "ja")]
pub fn participant_count(count: usize, capacity: Option<usize>) -> String {
    match capacity {
        Some(capacity) => format!("参加者 {count}/{capacity} 人"),
        None => format!("参加者 {count} 人"),
    }
}

#[cfg(feature = "ja")]
pub fn reduction_summary(naive: usize, optimized: usize, percent: i64) -> String {
    format!("最適化により {naive} 件の送金を {optimized} 件に削減しました ({percent}%)")
}

#[cfg(feature = "ja")]
pub fn recorded_payment(from: impl Display, to: impl Display, amount: impl Display) -> String {
    format!("{from} から {to} への {amount} の支払いを記録しました")
}

#[cfg(not(feature = "ja"))]
pub fn to_receive(amount: impl Display) -> String {
    format!("+{amount} to receive")
}

#[cfg(not(feature = "ja"))]
pub fn owes(amount: impl Display) -> String {
    format!("{amount} owes")
}

#[cfg(not(feature = "ja"))]
pub fn expense_details(amount: impl Display, payer: impl Display, people: usize) -> String {
    let noun = if people == 1 { "person" } else { "people" };
    format!("{amount} · {payer} paid · {people} {noun}")
}

#[cfg(not(feature = "ja"))]
pub fn participant_count(count: usize, capacity: Option<usize>) -> String {
    match capacity {
        Some(capacity) => format!("{count}/{capacity} participants"),
        None if count == 1 => "1 participant".to_string(),
        None => format!("{count} participants"),
    }
}

#[cfg(not(feature = "ja"))]
pub fn reduction_summary(naive: usize, optimized: usize, percent: i64) -> String {
    format!(
        "Greedy matching reduced {naive} potential transactions to just {optimized} ({percent}%)"
    )
}

#[cfg(not(feature = "ja"))]
pub fn recorded_payment(from: impl Display, to: impl Display, amount: impl Display) -> String {
    format!("Recorded {from} paid {to} {amount}")
}
