//! Core contracts for plastgen.
//!
//! This crate defines the row/key model for the plastics schema, the shared
//! error type, run configuration, and the `Store` trait implemented by
//! persistence adapters.

pub mod config;
pub mod error;
pub mod model;
pub mod report;
pub mod store;

pub use config::{validate_records, BranchPolicy, IdPolicy, RunConfig, MAX_RECORDS, RANDOM_POLICY_MAX};
pub use error::{Error, Result};
pub use model::{
    BaseProductRow, BatchRow, BatchStamp, Dni, LegalBuyerRow, MaterialCode, PersonRow,
    PlasticCategory, ProductCode, QuotedProductRow, RawMaterialRow, Ruc, SaleCode, SaleRow,
};
pub use report::{RunReport, TableCounts};
pub use store::Store;
