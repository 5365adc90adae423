//! Radar Coverage Fuzz Harness
//!
//! Reusable property-based testing infrastructure for the coverage and
//! traffic crates. Provides domain strategies (positions inside the region,
//! sensors, altitude selections, airports) and the property suites under
//! `tests/`.
//!
//! # Usage
//!
//! ```rust
//! use fuzz_harness::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn my_fuzz_test(p in geo_point()) {
//!         prop_assert!(p.lat >= 35.0);
//!     }
//! }
//! ```

pub mod generators;

pub mod prelude {
    pub use crate::generators::*;
    pub use proptest::prelude::*;
}

// Re-export proptest for convenience
pub use proptest;
