//! Domain Entities
//!
//! Core business entities for the commission domain.

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::value_objects::{
    Amount, CodeEntryId, ColumnMappingId, ColumnSet, CommissionCode, CommissionId,
    CommissionImportId, ImportFileName, SupplierId, SupplierName, UserCodeId, UserId,
};
use crate::error::{CommissionError, CommissionResult};

/// Supplier whose commission files are imported
#[derive(Debug, Clone)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: SupplierName,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Supplier {
    pub fn new(name: SupplierName) -> Self {
        let now = Utc::now();
        Self {
            id: SupplierId::new(),
            name,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Which spreadsheet columns hold code, type and amount for one supplier
#[derive(Debug, Clone)]
pub struct SupplierColumnMapping {
    pub id: ColumnMappingId,
    pub supplier_id: SupplierId,
    pub columns: ColumnSet,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SupplierColumnMapping {
    pub fn new(supplier_id: SupplierId, columns: ColumnSet) -> Self {
        let now = Utc::now();
        Self {
            id: ColumnMappingId::new(),
            supplier_id,
            columns,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn reassign(&mut self, supplier_id: SupplierId, columns: ColumnSet) {
        self.supplier_id = supplier_id;
        self.columns = columns;
        self.updated_at = Utc::now().max(self.updated_at);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeEntry {
    pub id: CodeEntryId,
    pub code: CommissionCode,
}

/// Codes by which suppliers identify one application user
#[derive(Debug, Clone)]
pub struct UserCommissionCode {
    pub id: UserCodeId,
    pub user_id: UserId,
    pub codes: Vec<CodeEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserCommissionCode {
    pub fn new(user_id: UserId, codes: Vec<CodeEntry>) -> Self {
        let now = Utc::now();
        Self {
            id: UserCodeId::new(),
            user_id,
            codes,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn reassign(&mut self, user_id: UserId, codes: Vec<CodeEntry>) {
        self.user_id = user_id;
        self.codes = codes;
        self.updated_at = Utc::now().max(self.updated_at);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommissionSupplierLine {
    pub supplier_id: SupplierId,
    /// Assets under management ("encours")
    pub outstanding: Amount,
    pub production: Amount,
}

/// Commission record for one user and period
#[derive(Debug, Clone)]
pub struct Commission {
    pub id: CommissionId,
    pub user_id: UserId,
    pub date: NaiveDate,
    pub structured_product: bool,
    pub title: Option<String>,
    pub up_front: Option<Amount>,
    pub broker: Option<String>,
    pub suppliers: Vec<CommissionSupplierLine>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Commission {
    pub fn total_outstanding(&self) -> CommissionResult<Amount> {
        Amount::checked_sum(self.suppliers.iter().map(|line| line.outstanding))
            .ok_or(CommissionError::TotalOverflow)
    }

    pub fn total_production(&self) -> CommissionResult<Amount> {
        Amount::checked_sum(self.suppliers.iter().map(|line| line.production))
            .ok_or(CommissionError::TotalOverflow)
    }
}

/// Supplier commission file as uploaded; its content is stored, not read
#[derive(Debug, Clone)]
pub struct CommissionImport {
    pub id: CommissionImportId,
    pub supplier_id: SupplierId,
    pub file_name: ImportFileName,
    pub content_type: String,
    pub size_bytes: u64,
    pub created_at: DateTime<Utc>,
}

impl CommissionImport {
    pub fn new(
        supplier_id: SupplierId,
        file_name: ImportFileName,
        content_type: String,
        size_bytes: u64,
    ) -> Self {
        Self {
            id: CommissionImportId::new(),
            supplier_id,
            file_name,
            content_type,
            size_bytes,
            created_at: Utc::now(),
        }
    }
}
