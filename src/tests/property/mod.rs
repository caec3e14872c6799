//! Property-based tests for the ancestry roller
//!
//! This module contains property-based tests using the proptest framework.
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Running Property Tests
//!
//! ```sh
//! cargo test property --release
//! ```
//!
//! ## Test Modules
//!
//! - `picker_props`: weighted selection
//!   - The pick is always an element of the input
//!   - All-zero weights select the first entry
//!   - Same seed, same pick
//!
//! - `features_props`: distinct feature pairs
//!   - The two features never share a name
//!   - Verb trimming only ever shortens the second feature
//!
//! - `merger_props`: catalog merging
//!   - Ancestry and archetype names are unique
//!   - Merging a document twice changes nothing
//!   - A whole-source block removes every ancestry of that source
//!
//! ## Configuration
//!
//! By default, proptest runs 256 cases per property. Use `PROPTEST_CASES`
//! to change that.

mod features_props;
mod merger_props;
mod picker_props;
