//! Shared test utilities
//!
//! - `TestDatabase`: PostgreSQL container with the schema migrated (feature: "postgres")
//! - `TestDataBuilder`: Deterministic test data generation
//! - `assertions`: Custom assertion helpers
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! #[ignore = "requires Docker"]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_postgres_test");
//!
//!     let title = builder.title("main");
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Builder for test data with deterministic randomization
///
/// The same seed always yields the same values, so failures reproduce.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed derived from the test name, so each test gets distinct but
    /// stable data.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_task");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Unique name of the form `test-{prefix}-{seed}-{suffix}`.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.name("task", "main"), "test-task-7-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    pub fn title(&self, suffix: &str) -> String {
        self.name("task", suffix)
    }

    pub fn description(&self, suffix: &str) -> String {
        format!("Description for {}", self.title(suffix))
    }

    /// String of exactly `len` characters, for length-boundary tests.
    pub fn text_of_len(&self, len: usize) -> String {
        let alphabet = b"abcdefghijklmnopqrstuvwxyz";
        let offset = (self.seed % alphabet.len() as u64) as usize;
        (0..len)
            .map(|i| alphabet[(offset + i) % alphabet.len()] as char)
            .collect()
    }
}

/// Test assertion helpers
pub mod assertions {
    use chrono::{DateTime, Duration, Utc};

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that `timestamp` lies within `tolerance` of now.
    pub fn assert_recent(timestamp: DateTime<Utc>, tolerance: Duration, context: &str) {
        let drift = (Utc::now() - timestamp).abs();
        assert!(
            drift <= tolerance,
            "{}: timestamp {} is {} away from now (tolerance {})",
            context,
            timestamp,
            drift,
            tolerance
        );
    }

    /// Assert `earlier <= later`.
    pub fn assert_not_before(later: DateTime<Utc>, earlier: DateTime<Utc>, context: &str) {
        assert!(
            later >= earlier,
            "{}: expected {} to be at or after {}",
            context,
            later,
            earlier
        );
    }
}
