use serde::{Deserialize, Serialize};

/// Rows inserted per table during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCounts {
    pub persons: u64,
    pub employees: u64,
    pub natural_buyers: u64,
    pub legal_buyers: u64,
    pub products: u64,
    pub base_products: u64,
    pub quoted_products: u64,
    pub raw_materials: u64,
    pub batches: u64,
    pub sales: u64,
    pub represents: u64,
    pub contains: u64,
    pub produces: u64,
    pub requires: u64,
    pub requests: u64,
}

/// Summary of one generation run, emitted after commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: String,
    pub seed: u64,
    pub records: u64,
    pub elapsed_ms: u64,
    pub counts: TableCounts,
    /// Events whose `legal_representation` branch fired.
    pub legal_representation_events: u64,
    /// Events whose sale line referenced the quoted product.
    pub quoted_sale_events: u64,
}
