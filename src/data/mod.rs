/// Data layer: core types, ingestion, aggregation, and filtering.
///
/// Architecture:
/// ```text
///  measurements/*.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse one file → Vec<MeasurementRecord>
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  discover files, concatenate → Dataset
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  equality predicate / viewer selections → new view
///   └──────────┘
/// ```
pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
