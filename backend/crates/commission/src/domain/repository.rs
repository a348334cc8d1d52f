//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entities::{
    Commission, CommissionImport, Supplier, SupplierColumnMapping, UserCommissionCode,
};
use crate::domain::value_objects::{
    ColumnMappingId, CommissionCode, CommissionId, CommissionImportId, SupplierId, SupplierName,
    UserCodeId, UserId,
};
use crate::error::CommissionResult;

/// Supplier repository trait
#[trait_variant::make(SupplierRepository: Send)]
pub trait LocalSupplierRepository {
    async fn create_supplier(&self, supplier: &Supplier) -> CommissionResult<()>;

    async fn find_supplier(&self, id: &SupplierId) -> CommissionResult<Option<Supplier>>;

    /// Case-insensitive name lookup
    async fn supplier_name_exists(&self, name: &SupplierName) -> CommissionResult<bool>;

    /// Subset of `ids` that exist
    async fn existing_suppliers(&self, ids: &[SupplierId]) -> CommissionResult<Vec<SupplierId>>;

    /// All suppliers ordered by name
    async fn list_suppliers(&self) -> CommissionResult<Vec<Supplier>>;
}

/// Supplier column mapping repository trait
#[trait_variant::make(ColumnMappingRepository: Send)]
pub trait LocalColumnMappingRepository {
    async fn create_column_mapping(&self, mapping: &SupplierColumnMapping) -> CommissionResult<()>;

    async fn find_column_mapping(
        &self,
        id: &ColumnMappingId,
    ) -> CommissionResult<Option<SupplierColumnMapping>>;

    async fn find_column_mapping_by_supplier(
        &self,
        supplier_id: &SupplierId,
    ) -> CommissionResult<Option<SupplierColumnMapping>>;

    async fn update_column_mapping(&self, mapping: &SupplierColumnMapping) -> CommissionResult<()>;

    /// Returns false when nothing was deleted
    async fn delete_column_mapping(&self, id: &ColumnMappingId) -> CommissionResult<bool>;

    async fn list_column_mappings(&self) -> CommissionResult<Vec<SupplierColumnMapping>>;
}

/// User commission code repository trait
#[trait_variant::make(UserCodeRepository: Send)]
pub trait LocalUserCodeRepository {
    async fn create_user_codes(&self, mapping: &UserCommissionCode) -> CommissionResult<()>;

    async fn find_user_codes(&self, id: &UserCodeId)
    -> CommissionResult<Option<UserCommissionCode>>;

    async fn find_user_codes_by_user(
        &self,
        user_id: &UserId,
    ) -> CommissionResult<Option<UserCommissionCode>>;

    /// Replaces the mapping's user and its whole entry list
    async fn update_user_codes(&self, mapping: &UserCommissionCode) -> CommissionResult<()>;

    /// Returns false when nothing was deleted
    async fn delete_user_codes(&self, id: &UserCodeId) -> CommissionResult<bool>;

    async fn list_user_codes(&self) -> CommissionResult<Vec<UserCommissionCode>>;

    /// Which mapping currently holds each of `codes` (absent codes are omitted)
    async fn find_code_holders(
        &self,
        codes: &[CommissionCode],
    ) -> CommissionResult<Vec<(CommissionCode, UserCodeId)>>;
}

/// Commission repository trait
#[trait_variant::make(CommissionRepository: Send)]
pub trait LocalCommissionRepository {
    /// Stores the commission and its supplier lines atomically
    async fn create_commission(&self, commission: &Commission) -> CommissionResult<()>;

    async fn find_commission(&self, id: &CommissionId) -> CommissionResult<Option<Commission>>;

    /// Newest date first
    async fn list_commissions(&self) -> CommissionResult<Vec<Commission>>;
}

/// Uploaded commission file repository trait
#[trait_variant::make(ImportRepository: Send)]
pub trait LocalImportRepository {
    /// Stores the metadata together with the raw file content
    async fn create_import(&self, import: &CommissionImport, data: &[u8]) -> CommissionResult<()>;

    /// Metadata and raw content of one import
    async fn find_import_file(
        &self,
        id: &CommissionImportId,
    ) -> CommissionResult<Option<(CommissionImport, Vec<u8>)>>;

    /// Returns false when nothing was deleted
    async fn delete_import(&self, id: &CommissionImportId) -> CommissionResult<bool>;

    /// Metadata only, newest first
    async fn list_imports(&self) -> CommissionResult<Vec<CommissionImport>>;
}

/// Read access to application users, owned by the auth side
#[trait_variant::make(UserDirectory: Send)]
pub trait LocalUserDirectory {
    async fn user_exists(&self, user_id: &UserId) -> CommissionResult<bool>;
}

/// Everything the commission routes need from storage
pub trait CommissionStore:
    SupplierRepository
    + ColumnMappingRepository
    + UserCodeRepository
    + CommissionRepository
    + ImportRepository
    + Send
    + Sync
    + 'static
{
}

impl<T> CommissionStore for T where
    T: SupplierRepository
        + ColumnMappingRepository
        + UserCodeRepository
        + CommissionRepository
        + ImportRepository
        + Send
        + Sync
        + 'static
{
}
