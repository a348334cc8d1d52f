//! PostgreSQL Repository Implementations

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use kernel::error::app_error::AppError;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::entities::{
    CodeEntry, Commission, CommissionImport, CommissionSupplierLine, Supplier,
    SupplierColumnMapping, UserCommissionCode,
};
use crate::domain::repository::{
    ColumnMappingRepository, CommissionRepository, ImportRepository, SupplierRepository,
    UserCodeRepository,
};
use crate::domain::value_objects::{
    Amount, CodeEntryId, ColumnLetter, ColumnMappingId, ColumnSet, CommissionCode, CommissionId,
    CommissionImportId, ImportFileName, SupplierId, SupplierName, UserCodeId, UserId,
};
use crate::error::{CommissionError, CommissionResult};

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgCommissionRepository {
    pool: PgPool,
}

impl PgCommissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_ID_CONSTRAINT: &str = "user_commission_codes_user_id_key";

/// Map constraint violations left over after the use case checks (races)
fn violation(err: sqlx::Error, on_unique: CommissionError, on_fk: CommissionError) -> CommissionError {
    match &err {
        sqlx::Error::Database(e) if e.is_unique_violation() => on_unique,
        sqlx::Error::Database(e) if e.is_foreign_key_violation() => on_fk,
        _ => err.into(),
    }
}

fn uuids<T>(ids: &[kernel::id::Id<T>]) -> Vec<Uuid> {
    ids.iter().map(|id| id.into_uuid()).collect()
}

// ============================================================================
// Supplier Repository Implementation
// ============================================================================

impl SupplierRepository for PgCommissionRepository {
    async fn create_supplier(&self, supplier: &Supplier) -> CommissionResult<()> {
        sqlx::query(
            r#"
            INSERT INTO suppliers (id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(supplier.id.as_uuid())
        .bind(supplier.name.as_str())
        .bind(supplier.created_at)
        .bind(supplier.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            violation(
                e,
                CommissionError::SupplierNameTaken,
                CommissionError::Internal("unexpected foreign key on suppliers".into()),
            )
        })?;

        Ok(())
    }

    async fn find_supplier(&self, id: &SupplierId) -> CommissionResult<Option<Supplier>> {
        let row = sqlx::query_as::<_, SupplierRow>(
            "SELECT id, name, created_at, updated_at FROM suppliers WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SupplierRow::into_supplier))
    }

    async fn supplier_name_exists(&self, name: &SupplierName) -> CommissionResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM suppliers WHERE lower(name) = lower($1))",
        )
        .bind(name.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn existing_suppliers(&self, ids: &[SupplierId]) -> CommissionResult<Vec<SupplierId>> {
        let found = sqlx::query_scalar::<_, Uuid>("SELECT id FROM suppliers WHERE id = ANY($1)")
            .bind(uuids(ids))
            .fetch_all(&self.pool)
            .await?;

        Ok(found.into_iter().map(SupplierId::from_uuid).collect())
    }

    async fn list_suppliers(&self) -> CommissionResult<Vec<Supplier>> {
        let rows = sqlx::query_as::<_, SupplierRow>(
            "SELECT id, name, created_at, updated_at FROM suppliers ORDER BY lower(name)",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SupplierRow::into_supplier).collect())
    }
}

// ============================================================================
// Column Mapping Repository Implementation
// ============================================================================

const MAPPING_COLUMNS: &str = "id, supplier_id, code_column_letter, type_column_letter, \
     amount_column_letter, created_at, updated_at";

impl ColumnMappingRepository for PgCommissionRepository {
    async fn create_column_mapping(&self, mapping: &SupplierColumnMapping) -> CommissionResult<()> {
        sqlx::query(
            r#"
            INSERT INTO supplier_column_mappings (
                id,
                supplier_id,
                code_column_letter,
                type_column_letter,
                amount_column_letter,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(mapping.id.as_uuid())
        .bind(mapping.supplier_id.as_uuid())
        .bind(mapping.columns.code.as_str())
        .bind(mapping.columns.kind.as_str())
        .bind(mapping.columns.amount.as_str())
        .bind(mapping.created_at)
        .bind(mapping.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            violation(
                e,
                CommissionError::SupplierAlreadyMapped,
                CommissionError::SupplierNotFound,
            )
        })?;

        Ok(())
    }

    async fn find_column_mapping(
        &self,
        id: &ColumnMappingId,
    ) -> CommissionResult<Option<SupplierColumnMapping>> {
        let row = sqlx::query_as::<_, ColumnMappingRow>(&format!(
            "SELECT {MAPPING_COLUMNS} FROM supplier_column_mappings WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ColumnMappingRow::into_mapping))
    }

    async fn find_column_mapping_by_supplier(
        &self,
        supplier_id: &SupplierId,
    ) -> CommissionResult<Option<SupplierColumnMapping>> {
        let row = sqlx::query_as::<_, ColumnMappingRow>(&format!(
            "SELECT {MAPPING_COLUMNS} FROM supplier_column_mappings WHERE supplier_id = $1"
        ))
        .bind(supplier_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ColumnMappingRow::into_mapping))
    }

    async fn update_column_mapping(&self, mapping: &SupplierColumnMapping) -> CommissionResult<()> {
        sqlx::query(
            r#"
            UPDATE supplier_column_mappings
            SET supplier_id = $2,
                code_column_letter = $3,
                type_column_letter = $4,
                amount_column_letter = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(mapping.id.as_uuid())
        .bind(mapping.supplier_id.as_uuid())
        .bind(mapping.columns.code.as_str())
        .bind(mapping.columns.kind.as_str())
        .bind(mapping.columns.amount.as_str())
        .bind(mapping.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            violation(
                e,
                CommissionError::SupplierAlreadyMapped,
                CommissionError::SupplierNotFound,
            )
        })?;

        Ok(())
    }

    async fn delete_column_mapping(&self, id: &ColumnMappingId) -> CommissionResult<bool> {
        let result = sqlx::query("DELETE FROM supplier_column_mappings WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_column_mappings(&self) -> CommissionResult<Vec<SupplierColumnMapping>> {
        let rows = sqlx::query_as::<_, ColumnMappingRow>(&format!(
            "SELECT {MAPPING_COLUMNS} FROM supplier_column_mappings ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ColumnMappingRow::into_mapping).collect())
    }
}

// ============================================================================
// User Code Repository Implementation
// ============================================================================

impl PgCommissionRepository {
    async fn insert_code_entries(
        tx: &mut Transaction<'static, Postgres>,
        mapping: &UserCommissionCode,
    ) -> CommissionResult<()> {
        for (position, entry) in mapping.codes.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO user_commission_code_entries (id, user_code_id, code, position)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(entry.id.as_uuid())
            .bind(mapping.id.as_uuid())
            .bind(entry.code.as_str())
            .bind(i32::try_from(position).unwrap_or(i32::MAX))
            .execute(&mut **tx)
            .await
            // a concurrent request grabbed one of the codes
            .map_err(|e| CommissionError::from(AppError::from(e)))?;
        }
        Ok(())
    }

    /// Attach entry lists to their parent rows
    async fn with_entries(&self, rows: Vec<UserCodeRow>) -> CommissionResult<Vec<UserCommissionCode>> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();

        let entries = sqlx::query_as::<_, CodeEntryRow>(
            r#"
            SELECT id, user_code_id, code
            FROM user_commission_code_entries
            WHERE user_code_id = ANY($1)
            ORDER BY position
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<CodeEntry>> = HashMap::new();
        for entry in entries {
            grouped
                .entry(entry.user_code_id)
                .or_default()
                .push(entry.into_entry());
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let codes = grouped.remove(&row.id).unwrap_or_default();
                row.into_mapping(codes)
            })
            .collect())
    }
}

impl UserCodeRepository for PgCommissionRepository {
    async fn create_user_codes(&self, mapping: &UserCommissionCode) -> CommissionResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO user_commission_codes (id, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(mapping.id.as_uuid())
        .bind(mapping.user_id.as_uuid())
        .bind(mapping.created_at)
        .bind(mapping.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.constraint() == Some(USER_ID_CONSTRAINT) => {
                CommissionError::UserAlreadyMapped
            }
            _ => violation(
                e,
                CommissionError::UserAlreadyMapped,
                CommissionError::AppUserNotFound,
            ),
        })?;

        Self::insert_code_entries(&mut tx, mapping).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn find_user_codes(
        &self,
        id: &UserCodeId,
    ) -> CommissionResult<Option<UserCommissionCode>> {
        let row = sqlx::query_as::<_, UserCodeRow>(
            "SELECT id, user_id, created_at, updated_at FROM user_commission_codes WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.with_entries(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_user_codes_by_user(
        &self,
        user_id: &UserId,
    ) -> CommissionResult<Option<UserCommissionCode>> {
        let row = sqlx::query_as::<_, UserCodeRow>(
            "SELECT id, user_id, created_at, updated_at FROM user_commission_codes WHERE user_id = $1",
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.with_entries(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn update_user_codes(&self, mapping: &UserCommissionCode) -> CommissionResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE user_commission_codes SET user_id = $2, updated_at = $3 WHERE id = $1")
            .bind(mapping.id.as_uuid())
            .bind(mapping.user_id.as_uuid())
            .bind(mapping.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                violation(
                    e,
                    CommissionError::UserAlreadyMapped,
                    CommissionError::AppUserNotFound,
                )
            })?;

        // entry ids are carried over by re-inserting them
        sqlx::query("DELETE FROM user_commission_code_entries WHERE user_code_id = $1")
            .bind(mapping.id.as_uuid())
            .execute(&mut *tx)
            .await?;

        Self::insert_code_entries(&mut tx, mapping).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn delete_user_codes(&self, id: &UserCodeId) -> CommissionResult<bool> {
        let result = sqlx::query("DELETE FROM user_commission_codes WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_user_codes(&self) -> CommissionResult<Vec<UserCommissionCode>> {
        let rows = sqlx::query_as::<_, UserCodeRow>(
            "SELECT id, user_id, created_at, updated_at FROM user_commission_codes ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        self.with_entries(rows).await
    }

    async fn find_code_holders(
        &self,
        codes: &[CommissionCode],
    ) -> CommissionResult<Vec<(CommissionCode, UserCodeId)>> {
        let codes: Vec<&str> = codes.iter().map(CommissionCode::as_str).collect();

        let rows = sqlx::query_as::<_, (String, Uuid)>(
            "SELECT code, user_code_id FROM user_commission_code_entries WHERE code = ANY($1)",
        )
        .bind(codes)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(code, holder)| (CommissionCode::from_db(code), UserCodeId::from_uuid(holder)))
            .collect())
    }
}

// ============================================================================
// Commission Repository Implementation
// ============================================================================

const COMMISSION_COLUMNS: &str = "id, user_id, date, structured_product, title, up_front, \
     broker, created_at, updated_at";

impl PgCommissionRepository {
    async fn with_lines(&self, rows: Vec<CommissionRow>) -> CommissionResult<Vec<Commission>> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();

        let lines = sqlx::query_as::<_, SupplierLineRow>(
            r#"
            SELECT commission_id, supplier_id, outstanding, production
            FROM commission_suppliers
            WHERE commission_id = ANY($1)
            ORDER BY position
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<CommissionSupplierLine>> = HashMap::new();
        for line in lines {
            grouped
                .entry(line.commission_id)
                .or_default()
                .push(line.into_line());
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let lines = grouped.remove(&row.id).unwrap_or_default();
                row.into_commission(lines)
            })
            .collect())
    }
}

impl CommissionRepository for PgCommissionRepository {
    async fn create_commission(&self, commission: &Commission) -> CommissionResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO commissions (
                id,
                user_id,
                date,
                structured_product,
                title,
                up_front,
                broker,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(commission.id.as_uuid())
        .bind(commission.user_id.as_uuid())
        .bind(commission.date)
        .bind(commission.structured_product)
        .bind(commission.title.as_deref())
        .bind(commission.up_front.map(|a| a.value()))
        .bind(commission.broker.as_deref())
        .bind(commission.created_at)
        .bind(commission.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            violation(
                e,
                CommissionError::Internal("commission id collision".into()),
                CommissionError::AppUserNotFound,
            )
        })?;

        for (position, line) in commission.suppliers.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO commission_suppliers (
                    commission_id,
                    supplier_id,
                    outstanding,
                    production,
                    position
                ) VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(commission.id.as_uuid())
            .bind(line.supplier_id.as_uuid())
            .bind(line.outstanding.value())
            .bind(line.production.value())
            .bind(i32::try_from(position).unwrap_or(i32::MAX))
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                violation(
                    e,
                    AppError::bad_request("Supplier is listed twice").into(),
                    CommissionError::SupplierNotFound,
                )
            })?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn find_commission(&self, id: &CommissionId) -> CommissionResult<Option<Commission>> {
        let row = sqlx::query_as::<_, CommissionRow>(&format!(
            "SELECT {COMMISSION_COLUMNS} FROM commissions WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.with_lines(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list_commissions(&self) -> CommissionResult<Vec<Commission>> {
        let rows = sqlx::query_as::<_, CommissionRow>(&format!(
            "SELECT {COMMISSION_COLUMNS} FROM commissions ORDER BY date DESC, created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        self.with_lines(rows).await
    }
}

// ============================================================================
// Import Repository Implementation
// ============================================================================

const IMPORT_COLUMNS: &str = "id, supplier_id, file_name, content_type, size_bytes, created_at";

impl ImportRepository for PgCommissionRepository {
    async fn create_import(&self, import: &CommissionImport, data: &[u8]) -> CommissionResult<()> {
        let size_bytes = i64::try_from(import.size_bytes)
            .map_err(|_| CommissionError::Internal("import size out of range".into()))?;

        sqlx::query(
            r#"
            INSERT INTO commission_imports (
                id,
                supplier_id,
                file_name,
                content_type,
                size_bytes,
                data,
                created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(import.id.as_uuid())
        .bind(import.supplier_id.as_uuid())
        .bind(import.file_name.as_str())
        .bind(&import.content_type)
        .bind(size_bytes)
        .bind(data)
        .bind(import.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            violation(
                e,
                CommissionError::Internal("duplicate commission import id".into()),
                CommissionError::SupplierNotFound,
            )
        })?;

        Ok(())
    }

    async fn find_import_file(
        &self,
        id: &CommissionImportId,
    ) -> CommissionResult<Option<(CommissionImport, Vec<u8>)>> {
        let row = sqlx::query_as::<_, ImportFileRow>(&format!(
            "SELECT {IMPORT_COLUMNS}, data FROM commission_imports WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ImportFileRow::into_parts))
    }

    async fn delete_import(&self, id: &CommissionImportId) -> CommissionResult<bool> {
        let result = sqlx::query("DELETE FROM commission_imports WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_imports(&self) -> CommissionResult<Vec<CommissionImport>> {
        let rows = sqlx::query_as::<_, ImportRow>(&format!(
            "SELECT {IMPORT_COLUMNS} FROM commission_imports ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ImportRow::into_import).collect())
    }
}

// Internal row types for sqlx mapping
#[derive(sqlx::FromRow)]
struct SupplierRow {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SupplierRow {
    fn into_supplier(self) -> Supplier {
        Supplier {
            id: SupplierId::from_uuid(self.id),
            name: SupplierName::from_db(self.name),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ColumnMappingRow {
    id: Uuid,
    supplier_id: Uuid,
    code_column_letter: String,
    type_column_letter: String,
    amount_column_letter: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ColumnMappingRow {
    fn into_mapping(self) -> SupplierColumnMapping {
        SupplierColumnMapping {
            id: ColumnMappingId::from_uuid(self.id),
            supplier_id: SupplierId::from_uuid(self.supplier_id),
            columns: ColumnSet {
                code: ColumnLetter::from_db(self.code_column_letter),
                kind: ColumnLetter::from_db(self.type_column_letter),
                amount: ColumnLetter::from_db(self.amount_column_letter),
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct UserCodeRow {
    id: Uuid,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserCodeRow {
    fn into_mapping(self, codes: Vec<CodeEntry>) -> UserCommissionCode {
        UserCommissionCode {
            id: UserCodeId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            codes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CodeEntryRow {
    id: Uuid,
    user_code_id: Uuid,
    code: String,
}

impl CodeEntryRow {
    fn into_entry(self) -> CodeEntry {
        CodeEntry {
            id: CodeEntryId::from_uuid(self.id),
            code: CommissionCode::from_db(self.code),
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommissionRow {
    id: Uuid,
    user_id: Uuid,
    date: NaiveDate,
    structured_product: bool,
    title: Option<String>,
    up_front: Option<Decimal>,
    broker: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CommissionRow {
    fn into_commission(self, suppliers: Vec<CommissionSupplierLine>) -> Commission {
        Commission {
            id: CommissionId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            date: self.date,
            structured_product: self.structured_product,
            title: self.title,
            up_front: self.up_front.map(Amount::from_db),
            broker: self.broker,
            suppliers,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SupplierLineRow {
    commission_id: Uuid,
    supplier_id: Uuid,
    outstanding: Decimal,
    production: Decimal,
}

impl SupplierLineRow {
    fn into_line(self) -> CommissionSupplierLine {
        CommissionSupplierLine {
            supplier_id: SupplierId::from_uuid(self.supplier_id),
            outstanding: Amount::from_db(self.outstanding),
            production: Amount::from_db(self.production),
        }
    }
}

#[derive(sqlx::FromRow)]
struct ImportRow {
    id: Uuid,
    supplier_id: Uuid,
    file_name: String,
    content_type: String,
    size_bytes: i64,
    created_at: DateTime<Utc>,
}

impl ImportRow {
    fn into_import(self) -> CommissionImport {
        CommissionImport {
            id: CommissionImportId::from_uuid(self.id),
            supplier_id: SupplierId::from_uuid(self.supplier_id),
            file_name: ImportFileName::from_db(self.file_name),
            content_type: self.content_type,
            size_bytes: u64::try_from(self.size_bytes).unwrap_or_default(),
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ImportFileRow {
    #[sqlx(flatten)]
    import: ImportRow,
    data: Vec<u8>,
}

impl ImportFileRow {
    fn into_parts(self) -> (CommissionImport, Vec<u8>) {
        (self.import.into_import(), self.data)
    }
}
