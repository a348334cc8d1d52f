//! Supplier Column Mapping Use Cases

use std::sync::Arc;

use crate::domain::entities::SupplierColumnMapping;
use crate::domain::repository::{ColumnMappingRepository, SupplierRepository};
use crate::domain::value_objects::{ColumnLetter, ColumnMappingId, ColumnSet, SupplierId};
use crate::error::{CommissionError, CommissionResult};

pub struct ColumnMappingInput {
    pub supplier: SupplierId,
    pub code_column_letter: String,
    pub type_column_letter: String,
    pub amount_column_letter: String,
}

impl ColumnMappingInput {
    fn columns(&self) -> CommissionResult<ColumnSet> {
        Ok(ColumnSet::new(
            ColumnLetter::new(&self.code_column_letter)?,
            ColumnLetter::new(&self.type_column_letter)?,
            ColumnLetter::new(&self.amount_column_letter)?,
        )?)
    }
}

async fn ensure_supplier<R>(repo: &R, supplier_id: &SupplierId) -> CommissionResult<()>
where
    R: SupplierRepository,
{
    match repo.find_supplier(supplier_id).await? {
        Some(_) => Ok(()),
        None => Err(CommissionError::SupplierNotFound),
    }
}

// ============================================================================
// Create
// ============================================================================

pub struct CreateColumnMappingUseCase<R>
where
    R: SupplierRepository + ColumnMappingRepository,
{
    repo: Arc<R>,
}

impl<R> CreateColumnMappingUseCase<R>
where
    R: SupplierRepository + ColumnMappingRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: ColumnMappingInput) -> CommissionResult<SupplierColumnMapping> {
        let columns = input.columns()?;

        ensure_supplier(self.repo.as_ref(), &input.supplier).await?;

        if self
            .repo
            .find_column_mapping_by_supplier(&input.supplier)
            .await?
            .is_some()
        {
            return Err(CommissionError::SupplierAlreadyMapped);
        }

        let mapping = SupplierColumnMapping::new(input.supplier, columns);
        self.repo.create_column_mapping(&mapping).await?;

        tracing::info!(
            mapping_id = %mapping.id,
            supplier_id = %mapping.supplier_id,
            "Supplier column mapping created"
        );

        Ok(mapping)
    }
}

// ============================================================================
// Update
// ============================================================================

pub struct UpdateColumnMappingUseCase<R>
where
    R: SupplierRepository + ColumnMappingRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateColumnMappingUseCase<R>
where
    R: SupplierRepository + ColumnMappingRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        id: &ColumnMappingId,
        input: ColumnMappingInput,
    ) -> CommissionResult<SupplierColumnMapping> {
        let mut mapping = self
            .repo
            .find_column_mapping(id)
            .await?
            .ok_or(CommissionError::ColumnMappingNotFound)?;

        let columns = input.columns()?;

        if input.supplier != mapping.supplier_id {
            ensure_supplier(self.repo.as_ref(), &input.supplier).await?;

            if self
                .repo
                .find_column_mapping_by_supplier(&input.supplier)
                .await?
                .is_some()
            {
                return Err(CommissionError::SupplierAlreadyMapped);
            }
        }

        mapping.reassign(input.supplier, columns);
        self.repo.update_column_mapping(&mapping).await?;

        tracing::info!(mapping_id = %mapping.id, "Supplier column mapping updated");

        Ok(mapping)
    }
}

// ============================================================================
// Delete / List
// ============================================================================

pub struct DeleteColumnMappingUseCase<R>
where
    R: ColumnMappingRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteColumnMappingUseCase<R>
where
    R: ColumnMappingRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: &ColumnMappingId) -> CommissionResult<()> {
        if !self.repo.delete_column_mapping(id).await? {
            return Err(CommissionError::ColumnMappingNotFound);
        }

        tracing::info!(mapping_id = %id, "Supplier column mapping deleted");
        Ok(())
    }
}

pub struct ListColumnMappingsUseCase<R>
where
    R: ColumnMappingRepository,
{
    repo: Arc<R>,
}

impl<R> ListColumnMappingsUseCase<R>
where
    R: ColumnMappingRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> CommissionResult<Vec<SupplierColumnMapping>> {
        self.repo.list_column_mappings().await
    }
}
