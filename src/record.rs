// Generic record trait for any queryable resource type

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Core trait that any membership resource must implement
///
/// The three selector methods (`search_text`, `status`, `event_date`)
/// describe which fields the list query engine may match against. Resources
/// without a categorical or date field keep the defaults.
pub trait Record: Serialize + for<'de> Deserialize<'de> + Clone + Send + Sync + 'static {
    /// Unique numeric identifier for this record
    fn id(&self) -> u64;

    /// Overwrite the identifier (used when a new record is appended)
    fn set_id(&mut self, id: u64);

    /// Collection name for this record type (e.g., "members", "lockers")
    /// Doubles as the API path segment: /api/{collection}
    fn collection_name() -> &'static str
    where
        Self: Sized;

    /// Text fields eligible for substring search, in display order
    fn search_text(&self) -> Vec<&str>;

    /// Categorical status value, if this resource has one
    fn status(&self) -> Option<&str> {
        None
    }

    /// Date the record is filed under, truncated to day, if any
    fn event_date(&self) -> Option<NaiveDate> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct TestRecord {
        id: u64,
        name: String,
        code: String,
        status: String,
        visited: NaiveDate,
    }

    impl Record for TestRecord {
        fn id(&self) -> u64 {
            self.id
        }

        fn set_id(&mut self, id: u64) {
            self.id = id;
        }

        fn collection_name() -> &'static str {
            "test"
        }

        fn search_text(&self) -> Vec<&str> {
            vec![&self.name, &self.code]
        }

        fn status(&self) -> Option<&str> {
            Some(&self.status)
        }

        fn event_date(&self) -> Option<NaiveDate> {
            Some(self.visited)
        }
    }

    #[test]
    fn test_record_trait_implementation() {
        let mut record = TestRecord {
            id: 7,
            name: "Test".to_string(),
            code: "MEM0007".to_string(),
            status: "ACTIVE".to_string(),
            visited: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        };

        assert_eq!(record.id(), 7);
        assert_eq!(TestRecord::collection_name(), "test");
        assert_eq!(record.search_text(), vec!["Test", "MEM0007"]);
        assert_eq!(record.status(), Some("ACTIVE"));
        assert_eq!(
            record.event_date(),
            Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );

        record.set_id(8);
        assert_eq!(record.id(), 8);
    }

    #[test]
    fn test_selector_defaults() {
        #[derive(Debug, Clone, Serialize, Deserialize)]
        struct Bare {
            id: u64,
            label: String,
        }

        impl Record for Bare {
            fn id(&self) -> u64 {
                self.id
            }

            fn set_id(&mut self, id: u64) {
                self.id = id;
            }

            fn collection_name() -> &'static str {
                "bare"
            }

            fn search_text(&self) -> Vec<&str> {
                vec![&self.label]
            }
        }

        let bare = Bare {
            id: 1,
            label: "x".to_string(),
        };
        assert_eq!(bare.status(), None);
        assert_eq!(bare.event_date(), None);
    }
}
