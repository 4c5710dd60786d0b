//! Postgres persistence session: one sqlx transaction per generation run,
//! parameterized single-row inserts with `RETURNING`.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::{PgPool, Postgres, Transaction};

use plastgen_core::{
    BaseProductRow, BatchRow, BatchStamp, Dni, Error, LegalBuyerRow, MaterialCode, PersonRow,
    ProductCode, QuotedProductRow, RawMaterialRow, Result, Ruc, SaleCode, SaleRow, Store,
};

/// SQLSTATE class for integrity constraint violations.
const CONSTRAINT_CLASS: &str = "23";

/// Store backed by a single Postgres transaction. Dropping the store without
/// calling [`Store::commit`] rolls the whole batch back.
pub struct PostgresStore {
    tx: Transaction<'static, Postgres>,
}

impl PostgresStore {
    /// Open a session by starting a transaction on the pool. Table names are
    /// unqualified; the pool's `search_path` selects the schema.
    pub async fn begin(pool: &PgPool) -> Result<Self> {
        let tx = pool.begin().await.map_err(map_db_err)?;
        Ok(Self { tx })
    }
}

fn map_db_err(err: sqlx::Error) -> Error {
    if let sqlx::Error::Database(db) = &err
        && db.code().is_some_and(|code| code.starts_with(CONSTRAINT_CLASS))
    {
        return Error::Constraint(db.message().to_string());
    }
    Error::Db(err.to_string())
}

#[async_trait]
impl Store for PostgresStore {
    async fn insert_person(&mut self, row: &PersonRow) -> Result<Dni> {
        let dni = sqlx::query_scalar::<_, String>(
            "INSERT INTO Persona (DNI, Nombre, Celular, CorreoElectronico, Direccion) \
             VALUES ($1, $2, $3, $4, $5) RETURNING DNI",
        )
        .bind(&row.dni.0)
        .bind(&row.name)
        .bind(&row.phone)
        .bind(&row.email)
        .bind(&row.address)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_db_err)?;
        Ok(Dni(dni))
    }

    async fn insert_employee(&mut self, dni: &Dni) -> Result<Dni> {
        let dni = sqlx::query_scalar::<_, String>(
            "INSERT INTO Empleado (DNI) VALUES ($1) RETURNING DNI",
        )
        .bind(&dni.0)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_db_err)?;
        Ok(Dni(dni))
    }

    async fn insert_natural_buyer(&mut self, dni: &Dni) -> Result<Dni> {
        let dni = sqlx::query_scalar::<_, String>(
            "INSERT INTO CompradorNatural (DNI) VALUES ($1) RETURNING DNI",
        )
        .bind(&dni.0)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_db_err)?;
        Ok(Dni(dni))
    }

    async fn insert_legal_buyer(&mut self, row: &LegalBuyerRow) -> Result<Ruc> {
        let ruc = sqlx::query_scalar::<_, String>(
            "INSERT INTO CompradorJuridico (RUC, Nombre) VALUES ($1, $2) RETURNING RUC",
        )
        .bind(&row.ruc.0)
        .bind(&row.company_name)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_db_err)?;
        Ok(Ruc(ruc))
    }

    async fn insert_product(&mut self) -> Result<ProductCode> {
        let code = sqlx::query_scalar::<_, i32>(
            "INSERT INTO Producto (Codigo) VALUES (DEFAULT) RETURNING Codigo",
        )
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_db_err)?;
        Ok(ProductCode(code.into()))
    }

    async fn insert_base_product(&mut self, row: &BaseProductRow) -> Result<ProductCode> {
        let code = sqlx::query_scalar::<_, i32>(
            "INSERT INTO ProductoBase (Codigo, Nombre, Stock, PrecioUnitario, Categoria) \
             VALUES ($1, $2, $3, $4, $5) RETURNING Codigo",
        )
        .bind(row.code.0 as i32)
        .bind(&row.name)
        .bind(row.stock)
        .bind(row.unit_price)
        .bind(row.category.as_str())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_db_err)?;
        Ok(ProductCode(code.into()))
    }

    async fn insert_quoted_product(&mut self, row: &QuotedProductRow) -> Result<ProductCode> {
        let code = sqlx::query_scalar::<_, i32>(
            "INSERT INTO ProductoCotizado (Codigo, NuevoPrecioUnitario, ProductoBaseCodigo) \
             VALUES ($1, $2, $3) RETURNING Codigo",
        )
        .bind(row.code.0 as i32)
        .bind(row.new_unit_price)
        .bind(row.base_code.0 as i32)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_db_err)?;
        Ok(ProductCode(code.into()))
    }

    async fn insert_raw_material(&mut self, row: &RawMaterialRow) -> Result<MaterialCode> {
        let code = sqlx::query_scalar::<_, i32>(
            "INSERT INTO MateriaPrima (Codigo, Nombre, Stock, ValorUnitario) \
             VALUES (DEFAULT, $1, $2, $3) RETURNING Codigo",
        )
        .bind(&row.name)
        .bind(row.stock)
        .bind(row.unit_value)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_db_err)?;
        Ok(MaterialCode(code.into()))
    }

    async fn insert_batch(&mut self, row: &BatchRow) -> Result<BatchStamp> {
        let (date, time) = sqlx::query_as::<_, (NaiveDate, NaiveTime)>(
            "INSERT INTO Lote (Fecha, Hora, CostoTotal) VALUES ($1, $2, $3) \
             RETURNING Fecha, Hora",
        )
        .bind(row.stamp.date)
        .bind(row.stamp.time)
        .bind(row.total_cost)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_db_err)?;
        Ok(BatchStamp { date, time })
    }

    async fn insert_sale(&mut self, row: &SaleRow) -> Result<SaleCode> {
        let code = sqlx::query_scalar::<_, i32>(
            "INSERT INTO Venta (Codigo, PrecioTotal, Fecha, Hora, EmpleadoDNI, CompradorNaturalDNI) \
             VALUES (DEFAULT, $1, $2, $3, $4, $5) RETURNING Codigo",
        )
        .bind(row.total_price)
        .bind(row.date)
        .bind(row.time)
        .bind(&row.employee.0)
        .bind(&row.buyer.0)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_db_err)?;
        Ok(SaleCode(code.into()))
    }

    async fn insert_represents(&mut self, buyer: &Dni, legal: &Ruc) -> Result<()> {
        sqlx::query(
            "INSERT INTO Representa (CompradorNaturalDNI, CompradorJuridicoRUC) VALUES ($1, $2)",
        )
        .bind(&buyer.0)
        .bind(&legal.0)
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_err)?;
        Ok(())
    }

    async fn insert_contains(
        &mut self,
        sale: SaleCode,
        product: ProductCode,
        quantity: i64,
    ) -> Result<()> {
        sqlx::query("INSERT INTO Tiene (VentaCodigo, ProductoCodigo, Cantidad) VALUES ($1, $2, $3)")
            .bind(sale.0 as i32)
            .bind(product.0 as i32)
            .bind(quantity)
            .execute(&mut *self.tx)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    async fn insert_produces(
        &mut self,
        product: ProductCode,
        batch: BatchStamp,
        quantity: i64,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO Produce (ProductoBaseCodigo, LoteFecha, LoteHora, Cantidad) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(product.0 as i32)
        .bind(batch.date)
        .bind(batch.time)
        .bind(quantity)
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_err)?;
        Ok(())
    }

    async fn insert_requires(
        &mut self,
        product: ProductCode,
        material: MaterialCode,
        quantity: i64,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO Requiere (ProductoBaseCodigo, MateriaPrimaCodigo, Cantidad) \
             VALUES ($1, $2, $3)",
        )
        .bind(product.0 as i32)
        .bind(material.0 as i32)
        .bind(quantity)
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_err)?;
        Ok(())
    }

    async fn insert_requests(
        &mut self,
        quoted: ProductCode,
        employee: &Dni,
        buyer: &Dni,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO Pide (ProductoCotizadoCodigo, EmpleadoDNI, CompradorNaturalDNI) \
             VALUES ($1, $2, $3)",
        )
        .bind(quoted.0 as i32)
        .bind(&employee.0)
        .bind(&buyer.0)
        .execute(&mut *self.tx)
        .await
        .map_err(map_db_err)?;
        Ok(())
    }

    async fn commit(self) -> Result<()> {
        self.tx.commit().await.map_err(map_db_err)
    }
}
