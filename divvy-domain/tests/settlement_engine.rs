use chrono::{DateTime, TimeZone, Utc};
use divvy_domain::{
    BalanceCalculator, Balances, Expense, Money, PaidSettlement, ParticipantName, ReductionStats,
    Roster, SettlementMinimizer, SettlementRecorder,
};
use proptest::prelude::*;

const NAMES: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

fn name(value: &str) -> ParticipantName {
    ParticipantName::new(value).expect("valid name")
}

fn at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

fn roster_of(member_count: usize) -> Roster {
    Roster::from_names(NAMES[..member_count].iter().copied().map(name)).expect("valid roster")
}

fn expense(amount: Money, paid_by: &str, split: &[&str]) -> Expense {
    Expense::new(
        "expense",
        amount,
        name(paid_by),
        split.iter().copied().map(name).collect(),
        at(),
    )
    .expect("valid expense")
}

fn build_expenses(member_count: usize, raw: &[(u32, usize, u8)]) -> Vec<Expense> {
    raw.iter()
        .map(|&(amount, payer_idx, split_mask)| {
            let mut split: Vec<&str> = (0..member_count)
                .filter(|idx| split_mask & (1 << idx) != 0)
                .map(|idx| NAMES[idx])
                .collect();
            if split.is_empty() {
                split.push(NAMES[0]);
            }
            expense(
                Money::from_i64(i64::from(amount)),
                NAMES[payer_idx % member_count],
                &split,
            )
        })
        .collect()
}

fn build_paid(member_count: usize, raw: &[(u32, usize, usize)]) -> Vec<PaidSettlement> {
    raw.iter()
        .map(|&(amount, from_idx, to_idx)| {
            SettlementRecorder
                .record(
                    NAMES[from_idx % member_count],
                    NAMES[to_idx % member_count],
                    Money::from_i64(i64::from(amount)),
                    at(),
                )
                .expect("valid settlement")
        })
        .collect()
}

fn settle(balances: &Balances) -> Vec<divvy_domain::Transfer> {
    SettlementMinimizer.minimize(balances)
}

proptest! {
    #[test]
    fn balances_sum_to_zero(
        member_count in 1usize..=6,
        raw_expenses in prop::collection::vec((1u32..=10_000, 0usize..6, 1u8..=63), 0..=30),
        raw_paid in prop::collection::vec((1u32..=5_000, 0usize..6, 0usize..6), 0..=10),
    ) {
        let roster = roster_of(member_count);
        let expenses = build_expenses(member_count, &raw_expenses);
        let paid = build_paid(member_count, &raw_paid);

        let balances = BalanceCalculator
            .calculate(&roster, &expenses, &paid)
            .expect("balances");

        prop_assert_eq!(balances.len(), member_count);
        let total = balances.total().expect("total");
        prop_assert!(total.is_settled(), "total drifted: {}", total);
    }

    #[test]
    fn transfer_count_stays_within_bound(
        member_count in 1usize..=6,
        raw_expenses in prop::collection::vec((1u32..=10_000, 0usize..6, 1u8..=63), 0..=30),
    ) {
        let roster = roster_of(member_count);
        let expenses = build_expenses(member_count, &raw_expenses);
        let balances = BalanceCalculator
            .calculate(&roster, &expenses, &[])
            .expect("balances");

        let transfers = settle(&balances);
        let open_positions = balances.creditor_count() + balances.debtor_count();

        prop_assert!(transfers.len() <= open_positions.saturating_sub(1));
        prop_assert!(transfers.len() <= member_count.saturating_sub(1));
        for transfer in &transfers {
            prop_assert!(transfer.amount.is_positive());
            prop_assert_ne!(&transfer.from, &transfer.to);
        }
    }

    #[test]
    fn paying_every_transfer_settles_the_group(
        member_count in 1usize..=6,
        raw_expenses in prop::collection::vec((1u32..=10_000, 0usize..6, 1u8..=63), 0..=30),
    ) {
        let roster = roster_of(member_count);
        let expenses = build_expenses(member_count, &raw_expenses);
        let balances = BalanceCalculator
            .calculate(&roster, &expenses, &[])
            .expect("balances");

        let mut paid = Vec::new();
        for transfer in settle(&balances) {
            SettlementRecorder
                .append(&mut paid, transfer.from.as_str(), transfer.to.as_str(), transfer.amount, at())
                .expect("record transfer");
        }

        let after = BalanceCalculator
            .calculate(&roster, &expenses, &paid)
            .expect("balances after payment");

        prop_assert!(after.is_settled());
        prop_assert!(settle(&after).is_empty());
    }
}

#[test]
fn no_records_means_zero_balances_and_no_transfers() {
    let roster = roster_of(3);
    let balances = BalanceCalculator
        .calculate(&roster, &[], &[])
        .expect("balances");

    for (_, balance) in balances.iter() {
        assert!(balance.is_zero());
    }
    assert!(settle(&balances).is_empty());
}

#[test]
fn three_way_split_settles_to_payer() {
    let roster = roster_of(3);
    let expenses = vec![expense(Money::from_i64(300), "A", &["A", "B", "C"])];

    let balances = BalanceCalculator
        .calculate(&roster, &expenses, &[])
        .expect("balances");
    assert_eq!(balances.get("A"), Some(Money::from_i64(200)));
    assert_eq!(balances.get("B"), Some(Money::from_i64(-100)));
    assert_eq!(balances.get("C"), Some(Money::from_i64(-100)));

    let transfers = settle(&balances);
    let summary: Vec<(&str, &str, Money)> = transfers
        .iter()
        .map(|t| (t.from.as_str(), t.to.as_str(), t.amount))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("B", "A", Money::from_i64(100)),
            ("C", "A", Money::from_i64(100)),
        ]
    );

    let stats = ReductionStats::compute(&expenses, &transfers);
    assert_eq!(stats.naive, 2);
    assert_eq!(stats.optimized, 2);
    assert_eq!(stats.reduction_percent, 0);
}

#[test]
fn recorded_payment_clears_offsetting_expenses() {
    let roster = roster_of(2);
    let expenses = vec![
        expense(Money::from_i64(90), "A", &["A", "B"]),
        expense(Money::from_i64(60), "B", &["A", "B"]),
    ];

    let balances = BalanceCalculator
        .calculate(&roster, &expenses, &[])
        .expect("balances");
    assert_eq!(balances.get("A"), Some(Money::from_i64(15)));
    assert_eq!(balances.get("B"), Some(Money::from_i64(-15)));

    let transfers = settle(&balances);
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].from.as_str(), "B");
    assert_eq!(transfers[0].to.as_str(), "A");
    assert_eq!(transfers[0].amount, Money::from_i64(15));

    let mut paid = Vec::new();
    SettlementRecorder
        .append(&mut paid, "B", "A", Money::from_i64(15), at())
        .expect("record");

    let after = BalanceCalculator
        .calculate(&roster, &expenses, &paid)
        .expect("balances after payment");
    assert_eq!(after.get("A"), Some(Money::ZERO));
    assert_eq!(after.get("B"), Some(Money::ZERO));
    assert!(settle(&after).is_empty());
}

#[test]
fn rounded_payment_of_uneven_split_is_absorbed_by_tolerance() {
    let roster = roster_of(3);
    let expenses = vec![expense(Money::from_i64(100), "A", &["A", "B", "C"])];
    let balances = BalanceCalculator
        .calculate(&roster, &expenses, &[])
        .expect("balances");

    let mut paid = Vec::new();
    for transfer in settle(&balances) {
        SettlementRecorder
            .append(
                &mut paid,
                transfer.from.as_str(),
                transfer.to.as_str(),
                transfer.amount.round_for_display(),
                at(),
            )
            .expect("record");
    }

    let after = BalanceCalculator
        .calculate(&roster, &expenses, &paid)
        .expect("balances after payment");
    assert!(after.is_settled());
    assert!(settle(&after).is_empty());
}
