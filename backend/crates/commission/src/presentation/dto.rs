//! API DTOs (Data Transfer Objects)
//!
//! Field names follow the front-end's contract: snake_case keys, French
//! `encours` / `broqueur` for outstanding and broker, and camelCase
//! `createdAt` / `updatedAt` timestamps.

use chrono::{DateTime, NaiveDate, Utc};
use kernel::validation::{Validate, ValidationErrors};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::{
    CodeInput, ColumnMappingInput, CreateCommissionInput, NewImportInput, SupplierLineInput,
    UserCodesInput, UserImports,
};
use crate::domain::entities::{
    Commission, CommissionImport, Supplier, SupplierColumnMapping, UserCommissionCode,
};
use crate::domain::services::duplicates;
use crate::domain::value_objects::{
    ColumnLetter, ColumnSet, CommissionCode, ImportFileName, SupplierId, SupplierName,
};
use crate::error::{CommissionError, CommissionResult};

/// Longest accepted free-text field (title, broker)
const MAX_TEXT_LENGTH: usize = 200;

/// List envelope shared by every collection endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub docs: Vec<T>,
    pub total_docs: usize,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(docs: Vec<T>) -> Self {
        Self {
            total_docs: docs.len(),
            docs,
        }
    }
}

// ============================================================================
// Suppliers
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSupplierRequest {
    pub name: String,
}

impl Validate for CreateSupplierRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Err(e) = SupplierName::new(&self.name) {
            errors.add_field("name", e.message());
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SupplierResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<&Supplier> for SupplierResponse {
    fn from(supplier: &Supplier) -> Self {
        Self {
            id: supplier.id.into_uuid(),
            name: supplier.name.as_str().to_string(),
            created_at: supplier.created_at,
            updated_at: supplier.updated_at,
        }
    }
}

// ============================================================================
// Supplier Column Mappings
// ============================================================================

/// Body of POST and PATCH /api/suppliers-commissions-column
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnMappingRequest {
    pub supplier: Uuid,
    pub code_column_letter: String,
    pub type_column_letter: String,
    pub amount_column_letter: String,
}

impl Validate for ColumnMappingRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let mut letter = |field: &str, raw: &str| match ColumnLetter::new(raw) {
            Ok(letter) => Some(letter),
            Err(e) => {
                errors.add_field(field, e.message());
                None
            }
        };
        let code = letter("code_column_letter", &self.code_column_letter);
        let kind = letter("type_column_letter", &self.type_column_letter);
        let amount = letter("amount_column_letter", &self.amount_column_letter);

        if let (Some(code), Some(kind), Some(amount)) = (code, kind, amount) {
            if let Err(e) = ColumnSet::new(code, kind, amount) {
                errors.add(e.message());
            }
        }

        errors.into_result()
    }
}

impl From<ColumnMappingRequest> for ColumnMappingInput {
    fn from(req: ColumnMappingRequest) -> Self {
        Self {
            supplier: SupplierId::from_uuid(req.supplier),
            code_column_letter: req.code_column_letter,
            type_column_letter: req.type_column_letter,
            amount_column_letter: req.amount_column_letter,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnMappingResponse {
    pub id: Uuid,
    pub supplier: Uuid,
    pub code_column_letter: String,
    pub type_column_letter: String,
    pub amount_column_letter: String,
    /// 1-based positions of the three columns
    pub code_column_index: u32,
    pub type_column_index: u32,
    pub amount_column_index: u32,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<&SupplierColumnMapping> for ColumnMappingResponse {
    fn from(mapping: &SupplierColumnMapping) -> Self {
        let columns = &mapping.columns;
        Self {
            id: mapping.id.into_uuid(),
            supplier: mapping.supplier_id.into_uuid(),
            code_column_letter: columns.code.as_str().to_string(),
            type_column_letter: columns.kind.as_str().to_string(),
            amount_column_letter: columns.amount.as_str().to_string(),
            code_column_index: columns.code.index(),
            type_column_index: columns.kind.index(),
            amount_column_index: columns.amount.index(),
            created_at: mapping.created_at,
            updated_at: mapping.updated_at,
        }
    }
}

// ============================================================================
// User Commission Codes
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CodeEntryRequest {
    pub code: String,
    #[serde(default)]
    pub id: Option<Uuid>,
}

/// Body of POST and PATCH /api/app-users-commissions-code
#[derive(Debug, Clone, Deserialize)]
pub struct UserCodesRequest {
    pub app_user: Uuid,
    pub code: Vec<CodeEntryRequest>,
}

impl Validate for UserCodesRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.code.is_empty() {
            errors.add_field("code", "At least one code is required");
        }

        let mut valid = Vec::new();
        for (index, entry) in self.code.iter().enumerate() {
            match CommissionCode::new(&entry.code) {
                Ok(code) => valid.push(code),
                Err(e) => errors
                    .field("code")
                    .field(&index.to_string())
                    .add_field("code", e.message()),
            }
        }
        for code in duplicates(valid.iter()) {
            errors.add_field("code", format!("Duplicate code: {code}"));
        }

        errors.into_result()
    }
}

impl From<UserCodesRequest> for UserCodesInput {
    fn from(req: UserCodesRequest) -> Self {
        Self {
            app_user: req.app_user.into(),
            codes: req
                .code
                .into_iter()
                .map(|entry| CodeInput {
                    id: entry.id.map(Into::into),
                    code: entry.code,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CodeEntryResponse {
    pub id: Uuid,
    pub code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserCodesResponse {
    pub id: Uuid,
    pub app_user: Uuid,
    pub code: Vec<CodeEntryResponse>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<&UserCommissionCode> for UserCodesResponse {
    fn from(mapping: &UserCommissionCode) -> Self {
        Self {
            id: mapping.id.into_uuid(),
            app_user: mapping.user_id.into_uuid(),
            code: mapping
                .codes
                .iter()
                .map(|entry| CodeEntryResponse {
                    id: entry.id.into_uuid(),
                    code: entry.code.as_str().to_string(),
                })
                .collect(),
            created_at: mapping.created_at,
            updated_at: mapping.updated_at,
        }
    }
}

// ============================================================================
// Commissions
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CommissionSupplierRequest {
    pub supplier: Uuid,
    /// Assets under management
    #[serde(rename = "encours", alias = "outstanding")]
    pub outstanding: Decimal,
    pub production: Decimal,
}

/// Body of POST /api/commissions/commission-suppliers
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommissionRequest {
    pub app_user: Uuid,
    /// `YYYY-MM-DD`
    pub date: NaiveDate,
    #[serde(default)]
    pub structured_product: bool,
    pub title: Option<String>,
    pub up_front: Option<Decimal>,
    #[serde(rename = "broqueur", alias = "broker")]
    pub broker: Option<String>,
    pub commission_suppliers: Vec<CommissionSupplierRequest>,
}

fn check_text(errors: &mut ValidationErrors, field: &str, value: Option<&str>) {
    if value.is_some_and(|v| v.trim().chars().count() > MAX_TEXT_LENGTH) {
        errors.add_field(
            field,
            format!("Must be at most {MAX_TEXT_LENGTH} characters"),
        );
    }
}

impl Validate for CreateCommissionRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        check_text(&mut errors, "title", self.title.as_deref());
        check_text(&mut errors, "broqueur", self.broker.as_deref());

        if self.up_front.is_some_and(|v| v < Decimal::ZERO) {
            errors.add_field("up_front", "Amount cannot be negative");
        }

        if self.commission_suppliers.is_empty() {
            errors.add_field("commission_suppliers", "At least one supplier is required");
        }
        let mut lines = ValidationErrors::new();
        for (index, line) in self.commission_suppliers.iter().enumerate() {
            if line.outstanding < Decimal::ZERO {
                lines
                    .field(&index.to_string())
                    .add_field("encours", "Amount cannot be negative");
            }
            if line.production < Decimal::ZERO {
                lines
                    .field(&index.to_string())
                    .add_field("production", "Amount cannot be negative");
            }
        }
        errors.merge_field("commission_suppliers", lines);
        for supplier in duplicates(self.commission_suppliers.iter().map(|l| &l.supplier)) {
            errors.add_field(
                "commission_suppliers",
                format!("Supplier {supplier} is listed twice"),
            );
        }

        errors.into_result()
    }
}

impl From<CreateCommissionRequest> for CreateCommissionInput {
    fn from(req: CreateCommissionRequest) -> Self {
        Self {
            app_user: req.app_user.into(),
            date: req.date,
            structured_product: req.structured_product,
            title: req.title,
            up_front: req.up_front,
            broker: req.broker,
            suppliers: req
                .commission_suppliers
                .into_iter()
                .map(|line| SupplierLineInput {
                    supplier: line.supplier.into(),
                    outstanding: line.outstanding,
                    production: line.production,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommissionSupplierResponse {
    pub supplier: Uuid,
    #[serde(rename = "encours")]
    pub outstanding: Decimal,
    pub production: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommissionResponse {
    pub id: Uuid,
    pub app_user: Uuid,
    pub date: NaiveDate,
    pub structured_product: bool,
    pub title: Option<String>,
    pub up_front: Option<Decimal>,
    #[serde(rename = "broqueur")]
    pub broker: Option<String>,
    pub commission_suppliers: Vec<CommissionSupplierResponse>,
    #[serde(rename = "total_encours")]
    pub total_outstanding: Decimal,
    pub total_production: Decimal,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<&Commission> for CommissionResponse {
    type Error = CommissionError;

    fn try_from(commission: &Commission) -> CommissionResult<Self> {
        Ok(Self {
            id: commission.id.into_uuid(),
            app_user: commission.user_id.into_uuid(),
            date: commission.date,
            structured_product: commission.structured_product,
            title: commission.title.clone(),
            up_front: commission.up_front.map(|a| a.value()),
            broker: commission.broker.clone(),
            commission_suppliers: commission
                .suppliers
                .iter()
                .map(|line| CommissionSupplierResponse {
                    supplier: line.supplier_id.into_uuid(),
                    outstanding: line.outstanding.value(),
                    production: line.production.value(),
                })
                .collect(),
            total_outstanding: commission.total_outstanding()?.value(),
            total_production: commission.total_production()?.value(),
            created_at: commission.created_at,
            updated_at: commission.updated_at,
        })
    }
}

// ============================================================================
// Commission Imports
// ============================================================================

/// File part of a multipart upload
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// Fields of POST /api/commission-imports/custom-create (`multipart/form-data`)
#[derive(Debug, Clone, Default)]
pub struct ImportUploadForm {
    pub supplier: Option<String>,
    pub file: Option<UploadedFile>,
}

impl ImportUploadForm {
    /// Field-level checks, reported in one tree like JSON bodies
    pub fn into_input(self) -> Result<NewImportInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let supplier = match self.supplier.as_deref().map(str::trim) {
            None | Some("") => {
                errors.add_field("supplier", "Required");
                None
            }
            Some(raw) => match raw.parse::<SupplierId>() {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.add_field("supplier", "Invalid uuid");
                    None
                }
            },
        };

        match &self.file {
            None => errors.add_field("file", "Required"),
            Some(file) => {
                match file.file_name.as_deref() {
                    None => errors.add_field("file", "File name is missing"),
                    Some(name) => {
                        if let Err(e) = ImportFileName::new(name) {
                            errors.add_field("file", e.message());
                        }
                    }
                }
                if file.data.is_empty() {
                    errors.add_field("file", "File is empty");
                }
            }
        }

        errors.into_result()?;

        match (supplier, self.file) {
            (Some(supplier), Some(file)) => Ok(NewImportInput {
                supplier,
                file_name: file.file_name.unwrap_or_default(),
                content_type: file.content_type,
                data: file.data,
            }),
            _ => Err(ValidationErrors::root("Invalid upload")),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommissionImportResponse {
    pub id: Uuid,
    pub supplier: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub size: u64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<&CommissionImport> for CommissionImportResponse {
    fn from(import: &CommissionImport) -> Self {
        Self {
            id: import.id.into_uuid(),
            supplier: import.supplier_id.into_uuid(),
            file_name: import.file_name.as_str().to_string(),
            content_type: import.content_type.clone(),
            size: import.size_bytes,
            created_at: import.created_at,
        }
    }
}

/// One readable file with the columns to read it by
#[derive(Debug, Clone, Serialize)]
pub struct UserImportEntry {
    #[serde(flatten)]
    pub import: CommissionImportResponse,
    pub code_column_letter: String,
    pub type_column_letter: String,
    pub amount_column_letter: String,
}

/// Response of GET /api/commission-imports/{userId}
#[derive(Debug, Clone, Serialize)]
pub struct CommissionImportUserResponse {
    pub app_user: Uuid,
    pub codes: Vec<String>,
    pub imports: Vec<UserImportEntry>,
}

impl From<&UserImports> for CommissionImportUserResponse {
    fn from(view: &UserImports) -> Self {
        Self {
            app_user: view.user_id.into_uuid(),
            codes: view.codes.iter().map(|c| c.as_str().to_string()).collect(),
            imports: view
                .imports
                .iter()
                .map(|(import, mapping)| UserImportEntry {
                    import: CommissionImportResponse::from(import),
                    code_column_letter: mapping.columns.code.as_str().to_string(),
                    type_column_letter: mapping.columns.kind.as_str().to_string(),
                    amount_column_letter: mapping.columns.amount.as_str().to_string(),
                })
                .collect(),
        }
    }
}
