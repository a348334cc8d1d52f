//! User Commission Code Use Cases
//!
//! A user owns at most one code mapping, and a code belongs to at most one
//! user.

use std::sync::Arc;

use crate::domain::entities::UserCommissionCode;
use crate::domain::repository::{UserCodeRepository, UserDirectory};
use crate::domain::services::{RequestedCode, ensure_codes_free, merge_code_entries};
use crate::domain::value_objects::{CodeEntryId, CommissionCode, UserCodeId, UserId};
use crate::error::{CommissionError, CommissionResult};

pub struct CodeInput {
    pub id: Option<CodeEntryId>,
    pub code: String,
}

pub struct UserCodesInput {
    pub app_user: UserId,
    pub codes: Vec<CodeInput>,
}

fn parse_codes(codes: Vec<CodeInput>) -> CommissionResult<Vec<RequestedCode>> {
    codes
        .into_iter()
        .map(|c| -> CommissionResult<RequestedCode> {
            Ok(RequestedCode {
                id: c.id,
                code: CommissionCode::new(&c.code)?,
            })
        })
        .collect()
}

async fn ensure_user<D>(users: &D, user_id: &UserId) -> CommissionResult<()>
where
    D: UserDirectory,
{
    if users.user_exists(user_id).await? {
        Ok(())
    } else {
        Err(CommissionError::AppUserNotFound)
    }
}

fn codes_of(mapping: &UserCommissionCode) -> Vec<CommissionCode> {
    mapping.codes.iter().map(|e| e.code.clone()).collect()
}

// ============================================================================
// Create
// ============================================================================

pub struct CreateUserCodesUseCase<R, D>
where
    R: UserCodeRepository,
    D: UserDirectory,
{
    repo: Arc<R>,
    users: Arc<D>,
}

impl<R, D> CreateUserCodesUseCase<R, D>
where
    R: UserCodeRepository,
    D: UserDirectory,
{
    pub fn new(repo: Arc<R>, users: Arc<D>) -> Self {
        Self { repo, users }
    }

    pub async fn execute(&self, input: UserCodesInput) -> CommissionResult<UserCommissionCode> {
        let requested = parse_codes(input.codes)?;
        let entries = merge_code_entries(&[], requested)?;

        ensure_user(self.users.as_ref(), &input.app_user).await?;

        if self
            .repo
            .find_user_codes_by_user(&input.app_user)
            .await?
            .is_some()
        {
            return Err(CommissionError::UserAlreadyMapped);
        }

        let mapping = UserCommissionCode::new(input.app_user, entries);

        let holders = self.repo.find_code_holders(&codes_of(&mapping)).await?;
        ensure_codes_free(&holders, None)?;

        self.repo.create_user_codes(&mapping).await?;

        tracing::info!(
            mapping_id = %mapping.id,
            user_id = %mapping.user_id,
            codes = mapping.codes.len(),
            "User commission codes created"
        );

        Ok(mapping)
    }
}

// ============================================================================
// Update
// ============================================================================

pub struct UpdateUserCodesUseCase<R, D>
where
    R: UserCodeRepository,
    D: UserDirectory,
{
    repo: Arc<R>,
    users: Arc<D>,
}

impl<R, D> UpdateUserCodesUseCase<R, D>
where
    R: UserCodeRepository,
    D: UserDirectory,
{
    pub fn new(repo: Arc<R>, users: Arc<D>) -> Self {
        Self { repo, users }
    }

    pub async fn execute(
        &self,
        id: &UserCodeId,
        input: UserCodesInput,
    ) -> CommissionResult<UserCommissionCode> {
        let mut mapping = self
            .repo
            .find_user_codes(id)
            .await?
            .ok_or(CommissionError::UserCodesNotFound)?;

        let requested = parse_codes(input.codes)?;
        let entries = merge_code_entries(&mapping.codes, requested)?;

        if input.app_user != mapping.user_id {
            ensure_user(self.users.as_ref(), &input.app_user).await?;

            if self
                .repo
                .find_user_codes_by_user(&input.app_user)
                .await?
                .is_some()
            {
                return Err(CommissionError::UserAlreadyMapped);
            }
        }

        mapping.reassign(input.app_user, entries);

        let holders = self.repo.find_code_holders(&codes_of(&mapping)).await?;
        ensure_codes_free(&holders, Some(mapping.id))?;

        self.repo.update_user_codes(&mapping).await?;

        tracing::info!(
            mapping_id = %mapping.id,
            user_id = %mapping.user_id,
            codes = mapping.codes.len(),
            "User commission codes updated"
        );

        Ok(mapping)
    }
}

// ============================================================================
// Delete / List
// ============================================================================

pub struct DeleteUserCodesUseCase<R>
where
    R: UserCodeRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteUserCodesUseCase<R>
where
    R: UserCodeRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: &UserCodeId) -> CommissionResult<()> {
        if !self.repo.delete_user_codes(id).await? {
            return Err(CommissionError::UserCodesNotFound);
        }

        tracing::info!(mapping_id = %id, "User commission codes deleted");
        Ok(())
    }
}

pub struct ListUserCodesUseCase<R>
where
    R: UserCodeRepository,
{
    repo: Arc<R>,
}

impl<R> ListUserCodesUseCase<R>
where
    R: UserCodeRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> CommissionResult<Vec<UserCommissionCode>> {
        self.repo.list_user_codes().await
    }
}
