//! Commission Import Use Cases
//!
//! Uploaded supplier files are kept byte for byte. Reading their rows is left
//! to whoever consumes them; a user's view bundles what that needs: the
//! user's codes and, per file, the supplier's column mapping.

use std::collections::HashMap;
use std::sync::Arc;

use kernel::error::app_error::AppError;

use crate::domain::entities::{CommissionImport, SupplierColumnMapping};
use crate::domain::repository::{
    ColumnMappingRepository, ImportRepository, SupplierRepository, UserCodeRepository,
    UserDirectory,
};
use crate::domain::value_objects::{
    CommissionCode, CommissionImportId, ImportFileName, SupplierId, UserId,
};
use crate::error::{CommissionError, CommissionResult};

/// Largest accepted upload (10 MiB)
pub const MAX_IMPORT_BYTES: usize = 10 * 1024 * 1024;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug)]
pub struct NewImportInput {
    pub supplier: SupplierId,
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

// ============================================================================
// Upload
// ============================================================================

pub struct CreateImportUseCase<R>
where
    R: ImportRepository + SupplierRepository,
{
    repo: Arc<R>,
}

impl<R> CreateImportUseCase<R>
where
    R: ImportRepository + SupplierRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: NewImportInput) -> CommissionResult<CommissionImport> {
        let file_name = ImportFileName::new(&input.file_name)?;

        if input.data.is_empty() {
            return Err(AppError::bad_request("File is empty").into());
        }
        if input.data.len() > MAX_IMPORT_BYTES {
            return Err(AppError::bad_request(format!(
                "File must be at most {} MiB",
                MAX_IMPORT_BYTES / (1024 * 1024)
            ))
            .into());
        }

        if self.repo.find_supplier(&input.supplier).await?.is_none() {
            return Err(CommissionError::SupplierNotFound);
        }

        let content_type = input
            .content_type
            .map(|ct| ct.trim().to_string())
            .filter(|ct| !ct.is_empty())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

        let import = CommissionImport::new(
            input.supplier,
            file_name,
            content_type,
            input.data.len() as u64,
        );
        self.repo.create_import(&import, &input.data).await?;

        tracing::info!(
            import_id = %import.id,
            supplier_id = %import.supplier_id,
            file_name = %import.file_name,
            size_bytes = import.size_bytes,
            "Commission file uploaded"
        );

        Ok(import)
    }
}

// ============================================================================
// Read
// ============================================================================

pub struct ListImportsUseCase<R>
where
    R: ImportRepository,
{
    repo: Arc<R>,
}

impl<R> ListImportsUseCase<R>
where
    R: ImportRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> CommissionResult<Vec<CommissionImport>> {
        self.repo.list_imports().await
    }
}

pub struct DownloadImportUseCase<R>
where
    R: ImportRepository,
{
    repo: Arc<R>,
}

impl<R> DownloadImportUseCase<R>
where
    R: ImportRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        id: &CommissionImportId,
    ) -> CommissionResult<(CommissionImport, Vec<u8>)> {
        self.repo
            .find_import_file(id)
            .await?
            .ok_or(CommissionError::ImportNotFound)
    }
}

/// Imports readable for one user: those whose supplier has a column mapping
#[derive(Debug, Clone)]
pub struct UserImports {
    pub user_id: UserId,
    pub codes: Vec<CommissionCode>,
    pub imports: Vec<(CommissionImport, SupplierColumnMapping)>,
}

pub struct UserImportsUseCase<R, D>
where
    R: ImportRepository + ColumnMappingRepository + UserCodeRepository,
    D: UserDirectory,
{
    repo: Arc<R>,
    users: Arc<D>,
}

impl<R, D> UserImportsUseCase<R, D>
where
    R: ImportRepository + ColumnMappingRepository + UserCodeRepository,
    D: UserDirectory,
{
    pub fn new(repo: Arc<R>, users: Arc<D>) -> Self {
        Self { repo, users }
    }

    pub async fn execute(&self, user_id: &UserId) -> CommissionResult<UserImports> {
        if !self.users.user_exists(user_id).await? {
            return Err(CommissionError::AppUserNotFound);
        }

        let codes = self
            .repo
            .find_user_codes_by_user(user_id)
            .await?
            .map(|mapping| mapping.codes.into_iter().map(|entry| entry.code).collect())
            .unwrap_or_default();

        let mappings: HashMap<SupplierId, SupplierColumnMapping> = self
            .repo
            .list_column_mappings()
            .await?
            .into_iter()
            .map(|mapping| (mapping.supplier_id, mapping))
            .collect();

        let imports = self
            .repo
            .list_imports()
            .await?
            .into_iter()
            .filter_map(|import| {
                let mapping = mappings.get(&import.supplier_id)?.clone();
                Some((import, mapping))
            })
            .collect();

        Ok(UserImports {
            user_id: *user_id,
            codes,
            imports,
        })
    }
}

// ============================================================================
// Delete
// ============================================================================

pub struct DeleteImportUseCase<R>
where
    R: ImportRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteImportUseCase<R>
where
    R: ImportRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: &CommissionImportId) -> CommissionResult<()> {
        if !self.repo.delete_import(id).await? {
            return Err(CommissionError::ImportNotFound);
        }

        tracing::info!(import_id = %id, "Commission import deleted");

        Ok(())
    }
}
