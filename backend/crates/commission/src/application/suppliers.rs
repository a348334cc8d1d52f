//! Supplier Use Cases

use std::sync::Arc;

use crate::domain::entities::Supplier;
use crate::domain::repository::SupplierRepository;
use crate::domain::value_objects::SupplierName;
use crate::error::{CommissionError, CommissionResult};

pub struct CreateSupplierUseCase<R>
where
    R: SupplierRepository,
{
    repo: Arc<R>,
}

impl<R> CreateSupplierUseCase<R>
where
    R: SupplierRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, name: &str) -> CommissionResult<Supplier> {
        let name = SupplierName::new(name)?;

        if self.repo.supplier_name_exists(&name).await? {
            return Err(CommissionError::SupplierNameTaken);
        }

        let supplier = Supplier::new(name);
        self.repo.create_supplier(&supplier).await?;

        tracing::info!(supplier_id = %supplier.id, name = %supplier.name, "Supplier created");

        Ok(supplier)
    }
}

pub struct ListSuppliersUseCase<R>
where
    R: SupplierRepository,
{
    repo: Arc<R>,
}

impl<R> ListSuppliersUseCase<R>
where
    R: SupplierRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> CommissionResult<Vec<Supplier>> {
        self.repo.list_suppliers().await
    }
}
