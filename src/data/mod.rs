//! Data layer: record types, loading, caching, filtering, sampling, aggregation.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse + clean → RecordStore
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  cache    │  Arc<RecordStore>, one epoch per source fingerprint
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐     ┌──────────┐     ┌───────────┐
//!   │  filter   │ ──▶ │  sample   │ ──▶ │ aggregate  │
//!   └──────────┘     └──────────┘     └───────────┘
//!    year range       seeded subset     counts, top-K, summary
//! ```

pub mod aggregate;
pub mod cache;
pub mod dates;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod sample;
