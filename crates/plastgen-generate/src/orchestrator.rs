//! Record orchestrator: one invocation produces one fully-linked business
//! event, invoking entity and relationship generators in the single
//! FK-valid topological order.

use rand::Rng;
use tracing::trace;

use plastgen_core::{
    BaseProductRow, BatchRow, BatchStamp, BranchPolicy, Dni, LegalBuyerRow, MaterialCode,
    PersonRow, ProductCode, QuotedProductRow, RawMaterialRow, Result, Ruc, SaleCode, SaleRow,
    Store,
};

use crate::identity::{IdAllocator, PersonRole};
use crate::providers;

/// Every key minted during one event, for downstream verification.
#[derive(Debug, Clone)]
pub struct EventKeys {
    pub employee: Dni,
    pub buyer: Dni,
    pub legal_buyer: Option<Ruc>,
    pub base_product: ProductCode,
    pub quoted_product: ProductCode,
    pub sale: SaleCode,
    /// The product the sale line references: the event's quoted product when
    /// the `quoted_sale` branch fired, its base product otherwise.
    pub sale_product: ProductCode,
    pub batch: BatchStamp,
    pub raw_material: MaterialCode,
}

impl EventKeys {
    pub fn sale_is_quoted(&self) -> bool {
        self.sale_product == self.quoted_product
    }
}

/// Drives entity and relationship generators for single events.
pub struct EventOrchestrator<'a, S, R> {
    store: &'a mut S,
    rng: &'a mut R,
    allocator: IdAllocator,
    branches: BranchPolicy,
}

impl<'a, S: Store, R: Rng + Send> EventOrchestrator<'a, S, R> {
    pub fn new(
        store: &'a mut S,
        rng: &'a mut R,
        allocator: IdAllocator,
        branches: BranchPolicy,
    ) -> Self {
        Self {
            store,
            rng,
            allocator,
            branches,
        }
    }

    /// Produce one business event. Relationship inserts only ever reference
    /// keys returned earlier in this call, so referential validity holds by
    /// construction; the first persistence failure aborts the event.
    pub async fn run_event(&mut self, event_index: u64) -> Result<EventKeys> {
        let employee = self.create_employee(event_index).await?;
        let buyer = self.create_natural_buyer(event_index).await?;

        let legal_buyer = if self.rng.random_bool(self.branches.legal_representation) {
            let ruc = self.create_legal_buyer(event_index).await?;
            self.link_represents(&buyer, &ruc).await?;
            Some(ruc)
        } else {
            None
        };

        let base_product = self.create_base_product().await?;
        let quoted_product = self.create_quoted_product(base_product).await?;
        self.link_requests(quoted_product, &employee, &buyer).await?;

        let sale = self.create_sale(&employee, &buyer).await?;
        let sale_product = if self.rng.random_bool(self.branches.quoted_sale) {
            quoted_product
        } else {
            base_product
        };
        self.link_contains(sale, sale_product).await?;

        let batch = self.create_batch(event_index).await?;
        let raw_material = self.create_raw_material().await?;
        self.link_produces(base_product, batch).await?;
        self.link_requires(base_product, raw_material).await?;

        trace!(event = event_index, %employee, %buyer, "event complete");

        Ok(EventKeys {
            employee,
            buyer,
            legal_buyer,
            base_product,
            quoted_product,
            sale,
            sale_product,
            batch,
            raw_material,
        })
    }

    async fn create_person(&mut self, event_index: u64, role: PersonRole) -> Result<Dni> {
        let row = PersonRow {
            dni: self.allocator.person_id(self.rng, event_index, role),
            name: providers::full_name(self.rng),
            phone: providers::phone_number(self.rng),
            email: providers::email(self.rng),
            address: providers::street_address(self.rng),
        };
        self.store.insert_person(&row).await
    }

    async fn create_employee(&mut self, event_index: u64) -> Result<Dni> {
        let dni = self.create_person(event_index, PersonRole::Employee).await?;
        self.store.insert_employee(&dni).await
    }

    async fn create_natural_buyer(&mut self, event_index: u64) -> Result<Dni> {
        let dni = self.create_person(event_index, PersonRole::Buyer).await?;
        self.store.insert_natural_buyer(&dni).await
    }

    async fn create_legal_buyer(&mut self, event_index: u64) -> Result<Ruc> {
        let row = LegalBuyerRow {
            ruc: self.allocator.tax_id(self.rng, event_index),
            company_name: providers::company_name(self.rng),
        };
        self.store.insert_legal_buyer(&row).await
    }

    async fn create_base_product(&mut self) -> Result<ProductCode> {
        let code = self.store.insert_product().await?;
        let row = BaseProductRow {
            code,
            name: providers::product_name(self.rng),
            stock: providers::amount(self.rng, 3),
            unit_price: providers::amount(self.rng, 2),
            category: providers::plastic_category(self.rng),
        };
        self.store.insert_base_product(&row).await
    }

    async fn create_quoted_product(&mut self, base_code: ProductCode) -> Result<ProductCode> {
        let code = self.store.insert_product().await?;
        let row = QuotedProductRow {
            code,
            new_unit_price: providers::amount(self.rng, 2),
            base_code,
        };
        self.store.insert_quoted_product(&row).await
    }

    async fn create_sale(&mut self, employee: &Dni, buyer: &Dni) -> Result<SaleCode> {
        let row = SaleRow {
            total_price: providers::amount(self.rng, 2),
            date: providers::past_date(self.rng),
            time: providers::clock_time(self.rng),
            employee: employee.clone(),
            buyer: buyer.clone(),
        };
        self.store.insert_sale(&row).await
    }

    async fn create_batch(&mut self, event_index: u64) -> Result<BatchStamp> {
        let row = BatchRow {
            stamp: self.allocator.batch_stamp(self.rng, event_index),
            total_cost: providers::amount(self.rng, 4),
        };
        self.store.insert_batch(&row).await
    }

    async fn create_raw_material(&mut self) -> Result<MaterialCode> {
        let row = RawMaterialRow {
            name: providers::raw_material_name(self.rng),
            stock: providers::amount(self.rng, 3),
            unit_value: providers::amount(self.rng, 2),
        };
        self.store.insert_raw_material(&row).await
    }

    async fn link_represents(&mut self, buyer: &Dni, legal: &Ruc) -> Result<()> {
        self.store.insert_represents(buyer, legal).await
    }

    async fn link_contains(&mut self, sale: SaleCode, product: ProductCode) -> Result<()> {
        let quantity = providers::quantity(self.rng, 2);
        self.store.insert_contains(sale, product, quantity).await
    }

    async fn link_produces(&mut self, product: ProductCode, batch: BatchStamp) -> Result<()> {
        let quantity = providers::quantity(self.rng, 3);
        self.store.insert_produces(product, batch, quantity).await
    }

    async fn link_requires(&mut self, product: ProductCode, material: MaterialCode) -> Result<()> {
        let quantity = providers::quantity(self.rng, 2);
        self.store.insert_requires(product, material, quantity).await
    }

    async fn link_requests(
        &mut self,
        quoted: ProductCode,
        employee: &Dni,
        buyer: &Dni,
    ) -> Result<()> {
        self.store.insert_requests(quoted, employee, buyer).await
    }
}
