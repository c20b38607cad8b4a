use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::{Context, Result, eyre};
use memberstore::api::ApiClient;
use memberstore::config::Config;
use memberstore::models::{
    self, AttendanceRecord, Billing, LockerContract, Member, MemberCard, Seminar, StoreBranch,
};
use memberstore::query::{self, QueryPage, QueryParams, StatusFilter};
use memberstore::record::Record;
use std::fs;
use std::path::PathBuf;

const COLLECTIONS: &[&str] = &[
    "members",
    "cards",
    "lockers",
    "billings",
    "seminars",
    "attendance",
    "stores",
];

#[derive(Parser)]
#[command(name = "memberstore")]
#[command(about = "Membership collection query tool - search, filter, and paginate club records")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query a collection and print one page of results
    List {
        /// Collection name: members, cards, lockers, billings, seminars, attendance, stores
        collection: String,

        /// Load records from a JSON array file instead of the API
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Free-text search over the collection's searchable fields
        #[arg(short, long, default_value = "")]
        search: String,

        /// Status value to match exactly, or "all"
        #[arg(long, default_value = "all")]
        status: String,

        /// Day filter (YYYY-MM-DD or ISO datetime)
        #[arg(long)]
        date: Option<String>,

        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Records per page (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Print summary statistics for a collection
    Stats {
        /// Collection name: members, cards, lockers, billings, seminars, attendance, stores
        collection: String,

        /// Load records from a JSON array file instead of the API
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::List {
            collection,
            file,
            search,
            status,
            date,
            page,
            page_size,
        } => {
            let params = QueryParams {
                search,
                status: StatusFilter::parse(&status),
                date: date.as_deref().map(models::parse_day).transpose()?,
                page,
                page_size: page_size.unwrap_or(config.default_page_size),
            };
            dispatch_list(&collection, file.as_deref(), &config, &params)
        }
        Commands::Stats { collection, file } => {
            dispatch_stats(&collection, file.as_deref(), &config)
        }
    }
}

fn dispatch_list(
    collection: &str,
    file: Option<&std::path::Path>,
    config: &Config,
    params: &QueryParams,
) -> Result<()> {
    match collection {
        "members" => run_list::<Member>(file, config, params),
        "cards" => run_list::<MemberCard>(file, config, params),
        "lockers" => run_list::<LockerContract>(file, config, params),
        "billings" => run_list::<Billing>(file, config, params),
        "seminars" => run_list::<Seminar>(file, config, params),
        "attendance" => run_list::<AttendanceRecord>(file, config, params),
        "stores" => run_list::<StoreBranch>(file, config, params),
        other => Err(unknown_collection(other)),
    }
}

fn dispatch_stats(collection: &str, file: Option<&std::path::Path>, config: &Config) -> Result<()> {
    match collection {
        "members" => {
            let records: Vec<Member> = load_records(file, config)?;
            print_stats(&[
                ("会員数", records.len() as i64),
                ("有効", count_status(&records, "ACTIVE")),
                ("退会", count_status(&records, "INACTIVE")),
            ])
        }
        "cards" => {
            let records: Vec<MemberCard> = load_records(file, config)?;
            print_stats(&[
                ("発行枚数", records.len() as i64),
                ("有効", count_status(&records, "ACTIVE")),
                ("期限切れ", count_status(&records, "EXPIRED")),
            ])
        }
        "lockers" => {
            let records: Vec<LockerContract> = load_records(file, config)?;
            print_stats(&[
                ("契約中", count_status(&records, "ACTIVE")),
                ("空き", count_status(&records, "AVAILABLE")),
                (
                    "月額収入",
                    query::sum_by(&records, |l| {
                        if l.status() == Some("ACTIVE") { l.monthly_fee } else { 0 }
                    }),
                ),
            ])
        }
        "billings" => {
            let records: Vec<Billing> = load_records(file, config)?;
            print_stats(&[
                ("請求総額", query::sum_by(&records, |b| b.amount)),
                (
                    "入金済み",
                    query::sum_by(&records, |b| if b.status() == Some("PAID") { b.amount } else { 0 }),
                ),
                (
                    "未入金",
                    query::sum_by(&records, |b| {
                        if b.status() == Some("PENDING") { b.amount } else { 0 }
                    }),
                ),
            ])
        }
        "seminars" => {
            let records: Vec<Seminar> = load_records(file, config)?;
            print_stats(&[
                ("開催数", records.len() as i64),
                ("参加者", query::sum_by(&records, |s| i64::from(s.registered_count))),
                ("定員合計", query::sum_by(&records, |s| i64::from(s.capacity))),
            ])
        }
        "attendance" => {
            let records: Vec<AttendanceRecord> = load_records(file, config)?;
            print_stats(&[
                ("入場記録", records.len() as i64),
                ("入場中", count_status(&records, "CHECKED_IN")),
                ("退場済", count_status(&records, "CHECKED_OUT")),
            ])
        }
        "stores" => {
            let records: Vec<StoreBranch> = load_records(file, config)?;
            print_stats(&[
                ("店舗数", records.len() as i64),
                ("総会員数", query::sum_by(&records, |s| i64::from(s.total_members))),
                ("月間売上", query::sum_by(&records, |s| s.monthly_revenue)),
            ])
        }
        other => Err(unknown_collection(other)),
    }
}

fn unknown_collection(name: &str) -> eyre::Report {
    eyre!("Unknown collection '{}' (expected one of: {})", name, COLLECTIONS.join(", "))
}

fn count_status<T: Record>(records: &[T], status: &str) -> i64 {
    query::count_where(records, |r| r.status() == Some(status)) as i64
}

fn load_records<T: Record>(file: Option<&std::path::Path>, config: &Config) -> Result<Vec<T>> {
    match file {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("{} is not a JSON array of {}", path.display(), T::collection_name()))
        }
        None => {
            let client = ApiClient::new(config)?;
            client.fetch_page(0, 200)
        }
    }
}

fn run_list<T: Record + Row>(
    file: Option<&std::path::Path>,
    config: &Config,
    params: &QueryParams,
) -> Result<()> {
    let records: Vec<T> = load_records(file, config)?;
    let page = query::query(&records, params);
    print_page(&page);
    Ok(())
}

fn print_page<T: Row>(page: &QueryPage<T>) {
    let header: Vec<String> = T::header().iter().map(|h| h.bold().to_string()).collect();
    println!("{}", header.join("  "));

    if page.items.is_empty() {
        println!("{}", "該当するレコードがありません".dimmed());
    }
    for item in &page.items {
        println!("{}", item.cells().join("  "));
    }

    println!();
    println!("{}", page.range_label().dimmed());

    let buttons: Vec<String> = query::page_window(page.page, page.total_pages)
        .into_iter()
        .map(|n| {
            if n == page.page {
                n.to_string().reversed().to_string()
            } else {
                n.to_string()
            }
        })
        .collect();
    println!("{}", buttons.join(" "));
}

fn print_stats(lines: &[(&str, i64)]) -> Result<()> {
    for (label, value) in lines {
        println!("{}: {}", label.bold(), value);
    }
    Ok(())
}

/// Table rendering for one record type
trait Row {
    fn header() -> Vec<&'static str>;
    fn cells(&self) -> Vec<String>;
}

impl Row for Member {
    fn header() -> Vec<&'static str> {
        vec!["ID", "会員コード", "氏名", "メール", "ステータス", "入会日"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.member_code.clone(),
            format!("{} {}", self.last_name, self.first_name),
            self.email.clone(),
            self.status.as_str().to_string(),
            self.enrollment_date.to_string(),
        ]
    }
}

impl Row for MemberCard {
    fn header() -> Vec<&'static str> {
        vec!["ID", "カード番号", "会員コード", "会員名", "発行日", "ステータス"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.card_number.clone(),
            self.member_code.clone(),
            self.member_name.clone(),
            self.issue_date.to_string(),
            self.status.as_str().to_string(),
        ]
    }
}

impl Row for LockerContract {
    fn header() -> Vec<&'static str> {
        vec!["ID", "ロッカー", "会員コード", "会員名", "場所", "月額", "ステータス"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.locker_number.clone(),
            self.member_code.clone(),
            self.member_name.clone(),
            self.location.clone(),
            self.monthly_fee.to_string(),
            self.status.as_str().to_string(),
        ]
    }
}

impl Row for Billing {
    fn header() -> Vec<&'static str> {
        vec!["ID", "会員コード", "会員名", "金額", "請求日", "ステータス"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.member_code.clone(),
            self.member_name.clone(),
            self.amount.to_string(),
            self.billing_date.to_string(),
            self.status.as_str().to_string(),
        ]
    }
}

impl Row for Seminar {
    fn header() -> Vec<&'static str> {
        vec!["ID", "コード", "タイトル", "講師", "開催日", "定員", "参加", "ステータス"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.seminar_code.clone(),
            self.title.clone(),
            self.instructor.clone(),
            self.date.to_string(),
            self.capacity.to_string(),
            self.registered_count.to_string(),
            self.status.as_str().to_string(),
        ]
    }
}

impl Row for AttendanceRecord {
    fn header() -> Vec<&'static str> {
        vec!["ID", "会員コード", "会員名", "入場", "退場", "ステータス"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.member_code.clone(),
            self.member_name.clone(),
            self.check_in_time.format("%Y-%m-%d %H:%M").to_string(),
            self.check_out_time
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
            self.status.as_str().to_string(),
        ]
    }
}

impl Row for StoreBranch {
    fn header() -> Vec<&'static str> {
        vec!["ID", "店舗コード", "店舗名", "店長", "会員数", "ステータス"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.store_code.clone(),
            self.store_name.clone(),
            self.manager.clone(),
            self.total_members.to_string(),
            self.status.as_str().to_string(),
        ]
    }
}
