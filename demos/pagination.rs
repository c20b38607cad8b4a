//! Example: Pagination
//!
//! This example walks a 50-record collection page by page and shows the
//! sliding 5-button page window a list view renders.
//!
//! Run with: cargo run --example pagination

use chrono::NaiveDate;
use eyre::Result;
use memberstore::models::{EnrollmentMethod, Member, MemberStatus};
use memberstore::query::{self, QueryParams};
use memberstore::view::ListView;
use memberstore::Collection;

fn main() -> Result<()> {
    println!("MemberStore Pagination Example");
    println!("==============================\n");

    let members: Vec<Member> = (1..=50)
        .map(|i| Member {
            id: i,
            member_code: format!("MEM{:04}", i),
            first_name: format!("太郎{}", i),
            last_name: "山田".to_string(),
            email: format!("member{}@example.com", i),
            phone: None,
            status: if i % 2 == 0 { MemberStatus::Active } else { MemberStatus::Inactive },
            enrollment_date: NaiveDate::from_ymd_opt(2024, 1, (i % 28 + 1) as u32).unwrap(),
            enrollment_method: EnrollmentMethod::Web,
        })
        .collect();

    // Pure engine: one page at a time
    let params = QueryParams { page: 3, page_size: 7, ..Default::default() };
    let page = query::query(&members, &params);
    println!(
        "Page {}/{}: {} items ({})",
        page.page,
        page.total_pages,
        page.items.len(),
        page.range_label()
    );
    println!("Page window: {:?}\n", query::page_window(page.page, page.total_pages));

    // Stateful view: filter changes snap back to page 1
    let mut view = ListView::new(Collection::from_records(members));
    view.set_page(5);
    println!("On page {}", view.params().page);
    view.set_search("MEM004");
    let page = view.page();
    println!(
        "After searching 'MEM004': back on page {}, {} matches",
        page.page, page.total_count
    );

    Ok(())
}
