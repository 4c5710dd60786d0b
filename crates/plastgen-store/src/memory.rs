//! In-memory store used by tests and dry runs.
//!
//! The handle models the session; the shared inner state models the
//! database, so it survives [`Store::commit`] consuming the handle and can
//! be inspected afterwards. Uniqueness and FK checks mirror what the live
//! schema's constraints would enforce.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use plastgen_core::{
    BaseProductRow, BatchRow, BatchStamp, Dni, Error, LegalBuyerRow, MaterialCode, PersonRow,
    ProductCode, QuotedProductRow, RawMaterialRow, Result, Ruc, SaleCode, SaleRow, Store,
};

/// Everything a run has written, one field per table.
#[derive(Debug, Clone, Default)]
pub struct MemData {
    pub persons: Vec<PersonRow>,
    pub employees: Vec<Dni>,
    pub natural_buyers: Vec<Dni>,
    pub legal_buyers: Vec<LegalBuyerRow>,
    pub products: Vec<ProductCode>,
    pub base_products: Vec<BaseProductRow>,
    pub quoted_products: Vec<QuotedProductRow>,
    pub raw_materials: Vec<(MaterialCode, RawMaterialRow)>,
    pub batches: Vec<BatchRow>,
    pub sales: Vec<(SaleCode, SaleRow)>,
    pub represents: Vec<(Dni, Ruc)>,
    pub contains: Vec<(SaleCode, ProductCode, i64)>,
    pub produces: Vec<(ProductCode, BatchStamp, i64)>,
    pub requires: Vec<(ProductCode, MaterialCode, i64)>,
    pub requests: Vec<(ProductCode, Dni, Dni)>,
    pub committed: bool,
    next_product: i64,
    next_sale: i64,
    next_material: i64,
}

impl MemData {
    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
            && self.employees.is_empty()
            && self.natural_buyers.is_empty()
            && self.legal_buyers.is_empty()
            && self.products.is_empty()
            && self.base_products.is_empty()
            && self.quoted_products.is_empty()
            && self.raw_materials.is_empty()
            && self.batches.is_empty()
            && self.sales.is_empty()
            && self.represents.is_empty()
            && self.contains.is_empty()
            && self.produces.is_empty()
            && self.requires.is_empty()
            && self.requests.is_empty()
    }
}

/// In-memory implementation of [`Store`].
#[derive(Debug, Clone, Default)]
pub struct MemStore {
    inner: Arc<Mutex<MemData>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A second handle on the same data, kept by callers that want to
    /// inspect rows after the session handle is consumed by commit.
    pub fn handle(&self) -> MemStore {
        MemStore {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn snapshot(&self) -> MemData {
        self.inner
            .lock()
            .map(|data| data.clone())
            .unwrap_or_default()
    }

    /// Clear every table and restart the surrogate counters, as the admin
    /// reset does on the live database.
    pub fn reset_all(&self) -> Result<()> {
        let mut data = self.lock()?;
        *data = MemData::default();
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemData>> {
        self.inner
            .lock()
            .map_err(|_| Error::Other("memory store lock poisoned".to_string()))
    }
}

fn constraint(message: impl Into<String>) -> Error {
    Error::Constraint(message.into())
}

fn check_quantity(table: &str, quantity: i64) -> Result<()> {
    if quantity < 1 {
        return Err(constraint(format!(
            "{table}: quantity must be >= 1, got {quantity}"
        )));
    }
    Ok(())
}

#[async_trait]
impl Store for MemStore {
    async fn insert_person(&mut self, row: &PersonRow) -> Result<Dni> {
        let mut data = self.lock()?;
        if data.persons.iter().any(|p| p.dni == row.dni) {
            return Err(constraint(format!("duplicate DNI {}", row.dni)));
        }
        data.persons.push(row.clone());
        Ok(row.dni.clone())
    }

    async fn insert_employee(&mut self, dni: &Dni) -> Result<Dni> {
        let mut data = self.lock()?;
        if !data.persons.iter().any(|p| &p.dni == dni) {
            return Err(constraint(format!("Empleado: no Persona with DNI {dni}")));
        }
        if data.employees.contains(dni) {
            return Err(constraint(format!("duplicate Empleado {dni}")));
        }
        data.employees.push(dni.clone());
        Ok(dni.clone())
    }

    async fn insert_natural_buyer(&mut self, dni: &Dni) -> Result<Dni> {
        let mut data = self.lock()?;
        if !data.persons.iter().any(|p| &p.dni == dni) {
            return Err(constraint(format!(
                "CompradorNatural: no Persona with DNI {dni}"
            )));
        }
        if data.natural_buyers.contains(dni) {
            return Err(constraint(format!("duplicate CompradorNatural {dni}")));
        }
        data.natural_buyers.push(dni.clone());
        Ok(dni.clone())
    }

    async fn insert_legal_buyer(&mut self, row: &LegalBuyerRow) -> Result<Ruc> {
        let mut data = self.lock()?;
        if data.legal_buyers.iter().any(|b| b.ruc == row.ruc) {
            return Err(constraint(format!("duplicate RUC {}", row.ruc)));
        }
        data.legal_buyers.push(row.clone());
        Ok(row.ruc.clone())
    }

    async fn insert_product(&mut self) -> Result<ProductCode> {
        let mut data = self.lock()?;
        data.next_product += 1;
        let code = ProductCode(data.next_product);
        data.products.push(code);
        Ok(code)
    }

    async fn insert_base_product(&mut self, row: &BaseProductRow) -> Result<ProductCode> {
        let mut data = self.lock()?;
        if !data.products.contains(&row.code) {
            return Err(constraint(format!(
                "ProductoBase: no Producto with code {}",
                row.code
            )));
        }
        if data.base_products.iter().any(|p| p.code == row.code) {
            return Err(constraint(format!("duplicate ProductoBase {}", row.code)));
        }
        data.base_products.push(row.clone());
        Ok(row.code)
    }

    async fn insert_quoted_product(&mut self, row: &QuotedProductRow) -> Result<ProductCode> {
        let mut data = self.lock()?;
        if !data.products.contains(&row.code) {
            return Err(constraint(format!(
                "ProductoCotizado: no Producto with code {}",
                row.code
            )));
        }
        if !data.base_products.iter().any(|p| p.code == row.base_code) {
            return Err(constraint(format!(
                "ProductoCotizado: no ProductoBase with code {}",
                row.base_code
            )));
        }
        if data.quoted_products.iter().any(|p| p.code == row.code) {
            return Err(constraint(format!(
                "duplicate ProductoCotizado {}",
                row.code
            )));
        }
        data.quoted_products.push(row.clone());
        Ok(row.code)
    }

    async fn insert_raw_material(&mut self, row: &RawMaterialRow) -> Result<MaterialCode> {
        let mut data = self.lock()?;
        data.next_material += 1;
        let code = MaterialCode(data.next_material);
        data.raw_materials.push((code, row.clone()));
        Ok(code)
    }

    async fn insert_batch(&mut self, row: &BatchRow) -> Result<BatchStamp> {
        let mut data = self.lock()?;
        if data.batches.iter().any(|b| b.stamp == row.stamp) {
            return Err(constraint(format!(
                "duplicate Lote ({}, {})",
                row.stamp.date, row.stamp.time
            )));
        }
        data.batches.push(row.clone());
        Ok(row.stamp)
    }

    async fn insert_sale(&mut self, row: &SaleRow) -> Result<SaleCode> {
        let mut data = self.lock()?;
        if !data.employees.contains(&row.employee) {
            return Err(constraint(format!(
                "Venta: no Empleado with DNI {}",
                row.employee
            )));
        }
        if !data.natural_buyers.contains(&row.buyer) {
            return Err(constraint(format!(
                "Venta: no CompradorNatural with DNI {}",
                row.buyer
            )));
        }
        data.next_sale += 1;
        let code = SaleCode(data.next_sale);
        data.sales.push((code, row.clone()));
        Ok(code)
    }

    async fn insert_represents(&mut self, buyer: &Dni, legal: &Ruc) -> Result<()> {
        let mut data = self.lock()?;
        if !data.natural_buyers.contains(buyer) {
            return Err(constraint(format!(
                "Representa: no CompradorNatural with DNI {buyer}"
            )));
        }
        if !data.legal_buyers.iter().any(|b| &b.ruc == legal) {
            return Err(constraint(format!(
                "Representa: no CompradorJuridico with RUC {legal}"
            )));
        }
        data.represents.push((buyer.clone(), legal.clone()));
        Ok(())
    }

    async fn insert_contains(
        &mut self,
        sale: SaleCode,
        product: ProductCode,
        quantity: i64,
    ) -> Result<()> {
        check_quantity("Tiene", quantity)?;
        let mut data = self.lock()?;
        if !data.sales.iter().any(|(code, _)| *code == sale) {
            return Err(constraint(format!("Tiene: no Venta with code {}", sale.0)));
        }
        if !data.products.contains(&product) {
            return Err(constraint(format!("Tiene: no Producto with code {product}")));
        }
        data.contains.push((sale, product, quantity));
        Ok(())
    }

    async fn insert_produces(
        &mut self,
        product: ProductCode,
        batch: BatchStamp,
        quantity: i64,
    ) -> Result<()> {
        check_quantity("Produce", quantity)?;
        let mut data = self.lock()?;
        if !data.base_products.iter().any(|p| p.code == product) {
            return Err(constraint(format!(
                "Produce: no ProductoBase with code {product}"
            )));
        }
        if !data.batches.iter().any(|b| b.stamp == batch) {
            return Err(constraint(format!(
                "Produce: no Lote ({}, {})",
                batch.date, batch.time
            )));
        }
        data.produces.push((product, batch, quantity));
        Ok(())
    }

    async fn insert_requires(
        &mut self,
        product: ProductCode,
        material: MaterialCode,
        quantity: i64,
    ) -> Result<()> {
        check_quantity("Requiere", quantity)?;
        let mut data = self.lock()?;
        if !data.base_products.iter().any(|p| p.code == product) {
            return Err(constraint(format!(
                "Requiere: no ProductoBase with code {product}"
            )));
        }
        if !data.raw_materials.iter().any(|(code, _)| *code == material) {
            return Err(constraint(format!(
                "Requiere: no MateriaPrima with code {}",
                material.0
            )));
        }
        data.requires.push((product, material, quantity));
        Ok(())
    }

    async fn insert_requests(
        &mut self,
        quoted: ProductCode,
        employee: &Dni,
        buyer: &Dni,
    ) -> Result<()> {
        let mut data = self.lock()?;
        if !data.quoted_products.iter().any(|p| p.code == quoted) {
            return Err(constraint(format!(
                "Pide: no ProductoCotizado with code {quoted}"
            )));
        }
        if !data.employees.contains(employee) {
            return Err(constraint(format!("Pide: no Empleado with DNI {employee}")));
        }
        if !data.natural_buyers.contains(buyer) {
            return Err(constraint(format!(
                "Pide: no CompradorNatural with DNI {buyer}"
            )));
        }
        data.requests.push((quoted, employee.clone(), buyer.clone()));
        Ok(())
    }

    async fn commit(self) -> Result<()> {
        let mut data = self.lock()?;
        data.committed = true;
        Ok(())
    }
}
