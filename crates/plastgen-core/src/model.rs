use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// National identity number (DNI): fixed-width 8-digit numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Dni(pub String);

/// Company tax number (RUC): fixed-width 11-digit numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Ruc(pub String);

/// Surrogate product code assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductCode(pub i64);

/// Surrogate sale code assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SaleCode(pub i64);

/// Surrogate raw-material code assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialCode(pub i64);

/// Composite natural key of a production batch: unique (date, time) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BatchStamp {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl fmt::Display for Dni {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Ruc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ProductCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resin classification used by `ProductoBase.Categoria`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlasticCategory {
    Pet,
    Hdpe,
    Ldpe,
    Pp,
    Ps,
    Pvc,
    Other,
}

impl PlasticCategory {
    pub const ALL: [PlasticCategory; 7] = [
        PlasticCategory::Pet,
        PlasticCategory::Hdpe,
        PlasticCategory::Ldpe,
        PlasticCategory::Pp,
        PlasticCategory::Ps,
        PlasticCategory::Pvc,
        PlasticCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlasticCategory::Pet => "PET",
            PlasticCategory::Hdpe => "HDPE",
            PlasticCategory::Ldpe => "LDPE",
            PlasticCategory::Pp => "PP",
            PlasticCategory::Ps => "PS",
            PlasticCategory::Pvc => "PVC",
            PlasticCategory::Other => "Other",
        }
    }
}

/// One `Persona` row. The DNI is allocated by the caller, never by the store.
#[derive(Debug, Clone)]
pub struct PersonRow {
    pub dni: Dni,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

/// One `CompradorJuridico` row.
#[derive(Debug, Clone)]
pub struct LegalBuyerRow {
    pub ruc: Ruc,
    pub company_name: String,
}

/// One `ProductoBase` row. `code` must come from a prior `Producto` insert.
#[derive(Debug, Clone)]
pub struct BaseProductRow {
    pub code: ProductCode,
    pub name: String,
    pub stock: i64,
    pub unit_price: i64,
    pub category: PlasticCategory,
}

/// One `ProductoCotizado` row. `base_code` must reference a `ProductoBase`
/// created earlier in the same event.
#[derive(Debug, Clone)]
pub struct QuotedProductRow {
    pub code: ProductCode,
    pub new_unit_price: i64,
    pub base_code: ProductCode,
}

/// One `MateriaPrima` row; the code is a store-assigned surrogate.
#[derive(Debug, Clone)]
pub struct RawMaterialRow {
    pub name: String,
    pub stock: i64,
    pub unit_value: i64,
}

/// One `Lote` row, keyed by its (date, time) stamp.
#[derive(Debug, Clone)]
pub struct BatchRow {
    pub stamp: BatchStamp,
    pub total_cost: i64,
}

/// One `Venta` row; the code is a store-assigned surrogate.
#[derive(Debug, Clone)]
pub struct SaleRow {
    pub total_price: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub employee: Dni,
    pub buyer: Dni,
}
