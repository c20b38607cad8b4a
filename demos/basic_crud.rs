//! Example: Basic CRUD
//!
//! This example demonstrates creating, reading, updating, and deleting
//! member records in an in-memory collection.
//!
//! Run with: cargo run --example basic_crud

use chrono::NaiveDate;
use eyre::Result;
use memberstore::Collection;
use memberstore::models::{EnrollmentMethod, Member, MemberStatus};

fn member(code: &str, first: &str, last: &str) -> Member {
    Member {
        id: 0,
        member_code: code.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}@example.com", code.to_lowercase()),
        phone: None,
        status: MemberStatus::Active,
        enrollment_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        enrollment_method: EnrollmentMethod::Tablet,
    }
}

fn main() -> Result<()> {
    println!("MemberStore Basic CRUD Example");
    println!("==============================\n");

    let mut members: Collection<Member> = Collection::new();

    // Create: ids are assigned as max(existing) + 1
    let taro = members.create(member("MEM0001", "太郎", "山田"));
    let hanako = members.create(member("MEM0002", "花子", "佐藤"));
    println!("Created members with ids {} and {}", taro, hanako);

    // Read
    let record = members.get(taro).expect("member exists");
    println!("Member {}: {} {}", record.member_code, record.last_name, record.first_name);

    // Update: the replacement keeps the id
    let mut changed = record.clone();
    changed.status = MemberStatus::Inactive;
    members.update(taro, changed)?;
    println!(
        "Member {} is now {:?}",
        taro,
        members.get(taro).unwrap().status
    );

    // Delete
    let removed = members.delete(hanako)?;
    println!("Deleted {} ({} records left)", removed.member_code, members.len());

    Ok(())
}
