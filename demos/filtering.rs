//! Example: Filtering
//!
//! This example demonstrates the three query predicates - free-text search,
//! status filter, and date filter - over a locker contract collection.
//!
//! Run with: cargo run --example filtering

use chrono::NaiveDate;
use eyre::Result;
use memberstore::models::{LockerContract, LockerSize, LockerStatus};
use memberstore::query::{self, QueryParams, StatusFilter};

fn locker(i: u64, status: LockerStatus) -> LockerContract {
    LockerContract {
        id: i,
        locker_number: format!("L{:03}", i),
        member_id: i,
        member_code: format!("MEM{:04}", i),
        member_name: format!("会員{}", i),
        location: ["1階", "2階", "3階"][(i % 3) as usize].to_string(),
        size: LockerSize::M,
        monthly_fee: 1000 + (i % 3) as i64 * 500,
        contract_date: NaiveDate::from_ymd_opt(2024, 1, i as u32 % 28 + 1).unwrap(),
        start_date: NaiveDate::from_ymd_opt(2024, 1, i as u32 % 28 + 1).unwrap(),
        end_date: None,
        status,
        remarks: None,
    }
}

fn main() -> Result<()> {
    println!("MemberStore Filtering Example");
    println!("=============================\n");

    let lockers: Vec<LockerContract> = (1..=30)
        .map(|i| {
            let status = match i % 3 {
                0 => LockerStatus::Active,
                1 => LockerStatus::Expired,
                _ => LockerStatus::Available,
            };
            locker(i, status)
        })
        .collect();

    // Search is case-insensitive and matches any searchable field
    let params = QueryParams {
        search: "mem0007".to_string(),
        ..Default::default()
    };
    let found = query::filter(&lockers, &params);
    println!("Search 'mem0007' matched {} record(s)", found.len());

    // Status filter matches exactly; "all" disables it
    let params = QueryParams {
        status: StatusFilter::Is("ACTIVE".to_string()),
        ..Default::default()
    };
    let active = query::filter(&lockers, &params);
    println!("{} lockers are ACTIVE", active.len());

    // Date filter matches the contract day
    let params = QueryParams {
        date: NaiveDate::from_ymd_opt(2024, 1, 8),
        ..Default::default()
    };
    let on_day = query::filter(&lockers, &params);
    println!("{} contracts signed on 2024-01-08", on_day.len());

    // Aggregates run over the full collection, not the filtered view
    let revenue = query::sum_by(&lockers, |l| {
        if l.status == LockerStatus::Active { l.monthly_fee } else { 0 }
    });
    println!("Monthly revenue from active lockers: {}円", revenue);

    Ok(())
}
