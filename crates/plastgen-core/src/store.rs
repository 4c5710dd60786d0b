use async_trait::async_trait;

use crate::error::Result;
use crate::model::{
    BaseProductRow, BatchRow, BatchStamp, Dni, LegalBuyerRow, MaterialCode, PersonRow,
    ProductCode, QuotedProductRow, RawMaterialRow, Ruc, SaleCode, SaleRow,
};

/// Persistence session consumed by the generation engine.
///
/// Each method persists exactly one row through a parameterized single-row
/// statement and returns any store-assigned key. Inserts are sequential and
/// belong to a single transaction; nothing becomes visible until
/// [`Store::commit`]. Constraint violations and session failures surface as
/// errors and abort the run — implementations must not retry.
#[async_trait]
pub trait Store: Send {
    async fn insert_person(&mut self, row: &PersonRow) -> Result<Dni>;

    /// Specialization of a `Persona` row inserted earlier in the session.
    async fn insert_employee(&mut self, dni: &Dni) -> Result<Dni>;

    /// Specialization of a `Persona` row inserted earlier in the session.
    async fn insert_natural_buyer(&mut self, dni: &Dni) -> Result<Dni>;

    async fn insert_legal_buyer(&mut self, row: &LegalBuyerRow) -> Result<Ruc>;

    /// Pure identity row; the returned surrogate code feeds the base or
    /// quoted product insert that follows.
    async fn insert_product(&mut self) -> Result<ProductCode>;

    async fn insert_base_product(&mut self, row: &BaseProductRow) -> Result<ProductCode>;

    async fn insert_quoted_product(&mut self, row: &QuotedProductRow) -> Result<ProductCode>;

    async fn insert_raw_material(&mut self, row: &RawMaterialRow) -> Result<MaterialCode>;

    async fn insert_batch(&mut self, row: &BatchRow) -> Result<BatchStamp>;

    async fn insert_sale(&mut self, row: &SaleRow) -> Result<SaleCode>;

    async fn insert_represents(&mut self, buyer: &Dni, legal: &Ruc) -> Result<()>;

    async fn insert_contains(
        &mut self,
        sale: SaleCode,
        product: ProductCode,
        quantity: i64,
    ) -> Result<()>;

    async fn insert_produces(
        &mut self,
        product: ProductCode,
        batch: BatchStamp,
        quantity: i64,
    ) -> Result<()>;

    async fn insert_requires(
        &mut self,
        product: ProductCode,
        material: MaterialCode,
        quantity: i64,
    ) -> Result<()>;

    async fn insert_requests(
        &mut self,
        quoted: ProductCode,
        employee: &Dni,
        buyer: &Dni,
    ) -> Result<()>;

    /// Commit the whole batch and release the session. Dropping a store
    /// without committing leaves the transaction uncommitted.
    async fn commit(self) -> Result<()>
    where
        Self: Sized;
}
