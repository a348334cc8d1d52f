//! Commission Use Cases

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use kernel::error::app_error::AppError;
use rust_decimal::Decimal;

use crate::domain::entities::{Commission, CommissionSupplierLine};
use crate::domain::repository::{CommissionRepository, SupplierRepository, UserDirectory};
use crate::domain::services::duplicates;
use crate::domain::value_objects::{Amount, CommissionId, SupplierId, UserId};
use crate::error::{CommissionError, CommissionResult};

pub struct SupplierLineInput {
    pub supplier: SupplierId,
    pub outstanding: Decimal,
    pub production: Decimal,
}

pub struct CreateCommissionInput {
    pub app_user: UserId,
    pub date: NaiveDate,
    pub structured_product: bool,
    pub title: Option<String>,
    pub up_front: Option<Decimal>,
    pub broker: Option<String>,
    pub suppliers: Vec<SupplierLineInput>,
}

/// Trimmed text, blank treated as absent
fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn supplier_lines(inputs: Vec<SupplierLineInput>) -> CommissionResult<Vec<CommissionSupplierLine>> {
    if inputs.is_empty() {
        return Err(AppError::bad_request("At least one supplier is required").into());
    }
    if let Some(id) = duplicates(inputs.iter().map(|l| &l.supplier)).first() {
        return Err(AppError::bad_request(format!("Supplier {id} is listed twice")).into());
    }

    let lines = inputs
        .into_iter()
        .map(|line| -> CommissionResult<CommissionSupplierLine> {
            Ok(CommissionSupplierLine {
                supplier_id: line.supplier,
                outstanding: Amount::new(line.outstanding)?,
                production: Amount::new(line.production)?,
            })
        })
        .collect::<CommissionResult<Vec<_>>>()?;

    // Totals are computed on every read, so they must fit before anything is stored
    let outstanding = Amount::checked_sum(lines.iter().map(|l| l.outstanding));
    let production = Amount::checked_sum(lines.iter().map(|l| l.production));
    if outstanding.is_none() || production.is_none() {
        return Err(CommissionError::TotalOverflow);
    }

    Ok(lines)
}

// ============================================================================
// Create
// ============================================================================

pub struct CreateCommissionUseCase<R, D>
where
    R: CommissionRepository + SupplierRepository,
    D: UserDirectory,
{
    repo: Arc<R>,
    users: Arc<D>,
}

impl<R, D> CreateCommissionUseCase<R, D>
where
    R: CommissionRepository + SupplierRepository,
    D: UserDirectory,
{
    pub fn new(repo: Arc<R>, users: Arc<D>) -> Self {
        Self { repo, users }
    }

    pub async fn execute(&self, input: CreateCommissionInput) -> CommissionResult<Commission> {
        let suppliers = supplier_lines(input.suppliers)?;
        let up_front = input.up_front.map(Amount::new).transpose()?;

        if !self.users.user_exists(&input.app_user).await? {
            return Err(CommissionError::AppUserNotFound);
        }

        let ids: Vec<SupplierId> = suppliers.iter().map(|l| l.supplier_id).collect();
        let existing = self.repo.existing_suppliers(&ids).await?;
        if let Some(missing) = ids.iter().find(|id| !existing.contains(id)) {
            tracing::debug!(supplier_id = %missing, "Commission references unknown supplier");
            return Err(CommissionError::SupplierNotFound);
        }

        let now = Utc::now();
        let commission = Commission {
            id: CommissionId::new(),
            user_id: input.app_user,
            date: input.date,
            structured_product: input.structured_product,
            title: optional_text(input.title),
            up_front,
            broker: optional_text(input.broker),
            suppliers,
            created_at: now,
            updated_at: now,
        };

        self.repo.create_commission(&commission).await?;

        tracing::info!(
            commission_id = %commission.id,
            user_id = %commission.user_id,
            date = %commission.date,
            suppliers = commission.suppliers.len(),
            "Commission created"
        );

        Ok(commission)
    }
}

// ============================================================================
// Read
// ============================================================================

pub struct GetCommissionUseCase<R>
where
    R: CommissionRepository,
{
    repo: Arc<R>,
}

impl<R> GetCommissionUseCase<R>
where
    R: CommissionRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: &CommissionId) -> CommissionResult<Commission> {
        self.repo
            .find_commission(id)
            .await?
            .ok_or(CommissionError::CommissionNotFound)
    }
}

pub struct ListCommissionsUseCase<R>
where
    R: CommissionRepository,
{
    repo: Arc<R>,
}

impl<R> ListCommissionsUseCase<R>
where
    R: CommissionRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> CommissionResult<Vec<Commission>> {
        self.repo.list_commissions().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(Some("  Q1 ".into())), Some("Q1".to_string()));
        assert_eq!(optional_text(Some("   ".into())), None);
        assert_eq!(optional_text(None), None);
    }

    #[test]
    fn test_supplier_lines_rules() {
        let supplier = SupplierId::new();
        let line = |outstanding: i64| SupplierLineInput {
            supplier,
            outstanding: Decimal::from(outstanding),
            production: Decimal::ZERO,
        };

        assert!(supplier_lines(Vec::new()).is_err());
        assert!(supplier_lines(vec![line(1), line(2)]).is_err());
        assert!(supplier_lines(vec![line(-1)]).is_err());

        let lines = supplier_lines(vec![line(10)]).unwrap();
        assert_eq!(lines[0].outstanding.value(), Decimal::from(10));
    }

    #[test]
    fn test_supplier_lines_reject_totals_past_decimal_range() {
        let huge = Decimal::from_str_exact("50000000000000000000000000000").unwrap();
        let line = |production: Decimal| SupplierLineInput {
            supplier: SupplierId::new(),
            outstanding: Decimal::ONE,
            production,
        };

        let err = supplier_lines(vec![line(huge), line(huge)]).unwrap_err();
        assert!(matches!(err, CommissionError::TotalOverflow));
        assert!(supplier_lines(vec![line(huge), line(Decimal::ONE)]).is_ok());
    }
}
