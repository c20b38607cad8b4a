// Data models for the membership resources
//
// Field names serialize in camelCase and status values in
// SCREAMING_SNAKE_CASE, matching the membership service wire format.

use crate::record::Record;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};

/// Normalize a date string to a day
///
/// Form inputs and API payloads carry either a plain date or a full ISO-8601
/// datetime; both reduce to the day for filtering and storage.
pub fn parse_day(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    if let Ok(day) = value.parse::<NaiveDate>() {
        return Ok(day);
    }
    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(value) {
        return Ok(ts.date_naive());
    }
    if let Ok(ts) = value.parse::<NaiveDateTime>() {
        return Ok(ts.date());
    }
    Err(eyre!("Unrecognized date: {}", value))
}

/// Gym member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: u64,
    pub member_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: MemberStatus,
    pub enrollment_date: NaiveDate,
    pub enrollment_method: EnrollmentMethod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberStatus {
    Active,
    Inactive,
}

impl MemberStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MemberStatus::Active => "ACTIVE",
            MemberStatus::Inactive => "INACTIVE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentMethod {
    Tablet,
    Web,
    Staff,
}

impl Record for Member {
    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn collection_name() -> &'static str {
        "members"
    }

    fn search_text(&self) -> Vec<&str> {
        let mut fields = vec![
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.email.as_str(),
            self.member_code.as_str(),
        ];
        if let Some(phone) = &self.phone {
            fields.push(phone);
        }
        fields
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn event_date(&self) -> Option<NaiveDate> {
        Some(self.enrollment_date)
    }
}

/// Membership card issued to a member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberCard {
    pub id: u64,
    pub member_id: u64,
    pub member_code: String,
    pub member_name: String,
    pub card_number: String,
    pub issue_date: NaiveDate,
    pub expiry_date: Option<NaiveDate>,
    pub status: CardStatus,
    pub qr_code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardStatus {
    Active,
    Expired,
    Lost,
}

impl CardStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CardStatus::Active => "ACTIVE",
            CardStatus::Expired => "EXPIRED",
            CardStatus::Lost => "LOST",
        }
    }
}

impl Record for MemberCard {
    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn collection_name() -> &'static str {
        "cards"
    }

    fn search_text(&self) -> Vec<&str> {
        vec![&self.member_name, &self.member_code, &self.card_number]
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

/// Rented locker contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockerContract {
    pub id: u64,
    pub locker_number: String,
    pub member_id: u64,
    pub member_code: String,
    pub member_name: String,
    pub location: String,
    pub size: LockerSize,
    pub monthly_fee: i64,
    pub contract_date: NaiveDate,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: LockerStatus,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockerSize {
    S,
    M,
    L,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LockerStatus {
    Active,
    Expired,
    Available,
}

impl LockerStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            LockerStatus::Active => "ACTIVE",
            LockerStatus::Expired => "EXPIRED",
            LockerStatus::Available => "AVAILABLE",
        }
    }
}

impl Record for LockerContract {
    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn collection_name() -> &'static str {
        "lockers"
    }

    fn search_text(&self) -> Vec<&str> {
        vec![&self.member_name, &self.member_code, &self.locker_number]
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn event_date(&self) -> Option<NaiveDate> {
        Some(self.contract_date)
    }
}

/// Monthly bank-transfer billing entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Billing {
    pub id: u64,
    pub member_id: u64,
    pub member_code: String,
    pub member_name: String,
    pub bank_name: String,
    pub branch_name: String,
    pub account_type: String,
    pub account_number: String,
    pub amount: i64,
    pub billing_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: BillingStatus,
    pub payment_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillingStatus {
    Paid,
    Pending,
    Failed,
}

impl BillingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BillingStatus::Paid => "PAID",
            BillingStatus::Pending => "PENDING",
            BillingStatus::Failed => "FAILED",
        }
    }
}

impl Record for Billing {
    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn collection_name() -> &'static str {
        "billings"
    }

    fn search_text(&self) -> Vec<&str> {
        vec![&self.member_name, &self.member_code]
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn event_date(&self) -> Option<NaiveDate> {
        Some(self.billing_date)
    }
}

/// Seminar or class event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seminar {
    pub id: u64,
    pub seminar_code: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub instructor: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub capacity: u32,
    pub registered_count: u32,
    pub status: SeminarStatus,
    pub repeat_pattern: Option<RepeatPattern>,
    pub next_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeminarStatus {
    Open,
    Full,
    Completed,
    Cancelled,
}

impl SeminarStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SeminarStatus::Open => "OPEN",
            SeminarStatus::Full => "FULL",
            SeminarStatus::Completed => "COMPLETED",
            SeminarStatus::Cancelled => "CANCELLED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepeatPattern {
    Daily,
    Weekly,
    Monthly,
}

impl Record for Seminar {
    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn collection_name() -> &'static str {
        "seminars"
    }

    fn search_text(&self) -> Vec<&str> {
        vec![&self.title, &self.instructor, &self.seminar_code]
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn event_date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }
}

/// Check-in/check-out attendance record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: u64,
    pub member_id: u64,
    pub member_code: String,
    pub member_name: String,
    pub check_in_time: NaiveDateTime,
    pub check_out_time: Option<NaiveDateTime>,
    /// Minutes between check-in and check-out, set on check-out
    pub duration: Option<u32>,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    CheckedIn,
    CheckedOut,
}

impl AttendanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceStatus::CheckedIn => "CHECKED_IN",
            AttendanceStatus::CheckedOut => "CHECKED_OUT",
        }
    }
}

impl Record for AttendanceRecord {
    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn collection_name() -> &'static str {
        "attendance"
    }

    fn search_text(&self) -> Vec<&str> {
        vec![&self.member_name, &self.member_code]
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn event_date(&self) -> Option<NaiveDate> {
        Some(self.check_in_time.date())
    }
}

/// One store in a multi-store deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreBranch {
    pub id: u64,
    pub store_code: String,
    pub store_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub manager: String,
    pub open_date: NaiveDate,
    pub status: StoreStatus,
    pub total_members: u32,
    pub monthly_revenue: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoreStatus {
    Open,
    Closed,
    Maintenance,
}

impl StoreStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreStatus::Open => "OPEN",
            StoreStatus::Closed => "CLOSED",
            StoreStatus::Maintenance => "MAINTENANCE",
        }
    }
}

impl Record for StoreBranch {
    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn collection_name() -> &'static str {
        "stores"
    }

    fn search_text(&self) -> Vec<&str> {
        vec![&self.store_name, &self.store_code, &self.manager]
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_string(&MemberStatus::Active).unwrap(), "\"ACTIVE\"");
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::CheckedIn).unwrap(),
            "\"CHECKED_IN\""
        );
        assert_eq!(serde_json::to_string(&BillingStatus::Paid).unwrap(), "\"PAID\"");
        assert_eq!(
            serde_json::to_string(&StoreStatus::Maintenance).unwrap(),
            "\"MAINTENANCE\""
        );
    }

    #[test]
    fn test_member_round_trips_in_camel_case() {
        let member = Member {
            id: 1,
            member_code: "MEM0001".to_string(),
            first_name: "太郎".to_string(),
            last_name: "山田".to_string(),
            email: "taro@example.com".to_string(),
            phone: Some("090-0000-0001".to_string()),
            status: MemberStatus::Active,
            enrollment_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            enrollment_method: EnrollmentMethod::Tablet,
        };

        let json = serde_json::to_string(&member).unwrap();
        assert!(json.contains("\"memberCode\":\"MEM0001\""));
        assert!(json.contains("\"enrollmentDate\":\"2024-01-15\""));
        assert!(json.contains("\"enrollmentMethod\":\"TABLET\""));

        let back: Member = serde_json::from_str(&json).unwrap();
        assert_eq!(back, member);
    }

    #[test]
    fn test_member_selectors() {
        let member = Member {
            id: 9,
            member_code: "MEM0009".to_string(),
            first_name: "花子".to_string(),
            last_name: "佐藤".to_string(),
            email: "hanako@example.com".to_string(),
            phone: None,
            status: MemberStatus::Inactive,
            enrollment_date: NaiveDate::from_ymd_opt(2023, 11, 2).unwrap(),
            enrollment_method: EnrollmentMethod::Web,
        };

        assert_eq!(member.search_text(), vec!["花子", "佐藤", "hanako@example.com", "MEM0009"]);
        assert_eq!(member.status(), Some("INACTIVE"));
        assert_eq!(member.event_date(), NaiveDate::from_ymd_opt(2023, 11, 2));
        assert_eq!(Member::collection_name(), "members");
    }

    #[test]
    fn test_attendance_event_date_is_check_in_day() {
        let record = AttendanceRecord {
            id: 1,
            member_id: 1,
            member_code: "MEM0001".to_string(),
            member_name: "会員1".to_string(),
            check_in_time: NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            check_out_time: None,
            duration: None,
            status: AttendanceStatus::CheckedIn,
        };
        assert_eq!(record.event_date(), NaiveDate::from_ymd_opt(2024, 6, 1));
    }

    #[test]
    fn test_parse_day_accepts_date_and_datetime() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(parse_day("2024-01-15").unwrap(), day);
        assert_eq!(parse_day("2024-01-15T10:30:00").unwrap(), day);
        assert_eq!(parse_day("2024-01-15T10:30:00+09:00").unwrap(), day);
        assert_eq!(parse_day("  2024-01-15  ").unwrap(), day);
    }

    #[test]
    fn test_parse_day_rejects_garbage() {
        assert!(parse_day("").is_err());
        assert!(parse_day("15/01/2024").is_err());
        assert!(parse_day("next tuesday").is_err());
    }

    #[test]
    fn test_locker_serialization() {
        let locker = LockerContract {
            id: 3,
            locker_number: "L003".to_string(),
            member_id: 3,
            member_code: "MEM0003".to_string(),
            member_name: "会員3".to_string(),
            location: "2階".to_string(),
            size: LockerSize::M,
            monthly_fee: 1500,
            contract_date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            end_date: None,
            status: LockerStatus::Available,
            remarks: Some("要確認".to_string()),
        };

        let json = serde_json::to_string(&locker).unwrap();
        assert!(json.contains("\"lockerNumber\":\"L003\""));
        assert!(json.contains("\"status\":\"AVAILABLE\""));
        assert!(json.contains("\"size\":\"M\""));

        let back: LockerContract = serde_json::from_str(&json).unwrap();
        assert_eq!(back, locker);
    }
}
