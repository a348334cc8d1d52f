//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::IntoResponse;
use kernel::error::app_error::AppError;
use kernel::id::Id;
use platform::request::ValidatedJson;

use crate::application::{
    CreateColumnMappingUseCase, CreateCommissionUseCase, CreateImportUseCase,
    CreateSupplierUseCase, CreateUserCodesUseCase, DeleteColumnMappingUseCase,
    DeleteImportUseCase, DeleteUserCodesUseCase, DownloadImportUseCase, GetCommissionUseCase,
    ListColumnMappingsUseCase, ListCommissionsUseCase, ListImportsUseCase, ListSuppliersUseCase,
    ListUserCodesUseCase, UpdateColumnMappingUseCase, UpdateUserCodesUseCase, UserImportsUseCase,
};
use crate::domain::repository::{CommissionStore, UserDirectory};
use crate::error::CommissionResult;
use crate::presentation::dto::{
    ColumnMappingRequest, ColumnMappingResponse, CommissionImportResponse,
    CommissionImportUserResponse, CommissionResponse, CreateCommissionRequest,
    CreateSupplierRequest, ImportUploadForm, ListResponse, SupplierResponse, UploadedFile,
    UserCodesRequest, UserCodesResponse,
};

/// Shared state for commission handlers
pub struct CommissionAppState<R, D>
where
    R: CommissionStore,
    D: UserDirectory + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub users: Arc<D>,
}

impl<R, D> CommissionAppState<R, D>
where
    R: CommissionStore,
    D: UserDirectory + Send + Sync + 'static,
{
    pub fn new(repo: R, users: D) -> Self {
        Self {
            repo: Arc::new(repo),
            users: Arc::new(users),
        }
    }
}

impl<R, D> Clone for CommissionAppState<R, D>
where
    R: CommissionStore,
    D: UserDirectory + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            users: self.users.clone(),
        }
    }
}

/// Path id, rejected with a problem document rather than axum's plain text
fn parse_id<T>(raw: &str) -> CommissionResult<Id<T>> {
    Ok(raw.parse::<Id<T>>().map_err(AppError::from)?)
}

fn list<T, U>(items: &[T]) -> Json<ListResponse<U>>
where
    U: for<'a> From<&'a T>,
{
    Json(ListResponse::from(items.iter().map(U::from).collect::<Vec<_>>()))
}

// ============================================================================
// Suppliers
// ============================================================================

/// GET /api/suppliers
pub async fn list_suppliers<R, D>(
    State(state): State<CommissionAppState<R, D>>,
) -> CommissionResult<Json<ListResponse<SupplierResponse>>>
where
    R: CommissionStore,
    D: UserDirectory + Send + Sync + 'static,
{
    let suppliers = ListSuppliersUseCase::new(state.repo.clone()).execute().await?;
    Ok(list(&suppliers))
}

/// POST /api/suppliers
pub async fn create_supplier<R, D>(
    State(state): State<CommissionAppState<R, D>>,
    ValidatedJson(req): ValidatedJson<CreateSupplierRequest>,
) -> CommissionResult<impl IntoResponse>
where
    R: CommissionStore,
    D: UserDirectory + Send + Sync + 'static,
{
    let supplier = CreateSupplierUseCase::new(state.repo.clone())
        .execute(&req.name)
        .await?;

    Ok((StatusCode::CREATED, Json(SupplierResponse::from(&supplier))))
}

// ============================================================================
// Supplier Column Mappings
// ============================================================================

/// GET /api/suppliers-commissions-column
pub async fn list_column_mappings<R, D>(
    State(state): State<CommissionAppState<R, D>>,
) -> CommissionResult<Json<ListResponse<ColumnMappingResponse>>>
where
    R: CommissionStore,
    D: UserDirectory + Send + Sync + 'static,
{
    let mappings = ListColumnMappingsUseCase::new(state.repo.clone())
        .execute()
        .await?;
    Ok(list(&mappings))
}

/// POST /api/suppliers-commissions-column
pub async fn create_column_mapping<R, D>(
    State(state): State<CommissionAppState<R, D>>,
    ValidatedJson(req): ValidatedJson<ColumnMappingRequest>,
) -> CommissionResult<impl IntoResponse>
where
    R: CommissionStore,
    D: UserDirectory + Send + Sync + 'static,
{
    let mapping = CreateColumnMappingUseCase::new(state.repo.clone())
        .execute(req.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ColumnMappingResponse::from(&mapping)),
    ))
}

/// PATCH /api/suppliers-commissions-column/{id}
pub async fn update_column_mapping<R, D>(
    State(state): State<CommissionAppState<R, D>>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<ColumnMappingRequest>,
) -> CommissionResult<Json<ColumnMappingResponse>>
where
    R: CommissionStore,
    D: UserDirectory + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let mapping = UpdateColumnMappingUseCase::new(state.repo.clone())
        .execute(&id, req.into())
        .await?;

    Ok(Json(ColumnMappingResponse::from(&mapping)))
}

/// DELETE /api/suppliers-commissions-column/{id}
pub async fn delete_column_mapping<R, D>(
    State(state): State<CommissionAppState<R, D>>,
    Path(id): Path<String>,
) -> CommissionResult<StatusCode>
where
    R: CommissionStore,
    D: UserDirectory + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    DeleteColumnMappingUseCase::new(state.repo.clone())
        .execute(&id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// User Commission Codes
// ============================================================================

/// GET /api/app-users-commissions-code
pub async fn list_user_codes<R, D>(
    State(state): State<CommissionAppState<R, D>>,
) -> CommissionResult<Json<ListResponse<UserCodesResponse>>>
where
    R: CommissionStore,
    D: UserDirectory + Send + Sync + 'static,
{
    let mappings = ListUserCodesUseCase::new(state.repo.clone()).execute().await?;
    Ok(list(&mappings))
}

/// POST /api/app-users-commissions-code
pub async fn create_user_codes<R, D>(
    State(state): State<CommissionAppState<R, D>>,
    ValidatedJson(req): ValidatedJson<UserCodesRequest>,
) -> CommissionResult<impl IntoResponse>
where
    R: CommissionStore,
    D: UserDirectory + Send + Sync + 'static,
{
    let mapping = CreateUserCodesUseCase::new(state.repo.clone(), state.users.clone())
        .execute(req.into())
        .await?;

    Ok((StatusCode::CREATED, Json(UserCodesResponse::from(&mapping))))
}

/// PATCH /api/app-users-commissions-code/{id}
pub async fn update_user_codes<R, D>(
    State(state): State<CommissionAppState<R, D>>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UserCodesRequest>,
) -> CommissionResult<Json<UserCodesResponse>>
where
    R: CommissionStore,
    D: UserDirectory + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let mapping = UpdateUserCodesUseCase::new(state.repo.clone(), state.users.clone())
        .execute(&id, req.into())
        .await?;

    Ok(Json(UserCodesResponse::from(&mapping)))
}

/// DELETE /api/app-users-commissions-code/{id}
pub async fn delete_user_codes<R, D>(
    State(state): State<CommissionAppState<R, D>>,
    Path(id): Path<String>,
) -> CommissionResult<StatusCode>
where
    R: CommissionStore,
    D: UserDirectory + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    DeleteUserCodesUseCase::new(state.repo.clone())
        .execute(&id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Commissions
// ============================================================================

/// GET /api/commissions
pub async fn list_commissions<R, D>(
    State(state): State<CommissionAppState<R, D>>,
) -> CommissionResult<Json<ListResponse<CommissionResponse>>>
where
    R: CommissionStore,
    D: UserDirectory + Send + Sync + 'static,
{
    let commissions = ListCommissionsUseCase::new(state.repo.clone())
        .execute()
        .await?;
    let docs = commissions
        .iter()
        .map(CommissionResponse::try_from)
        .collect::<CommissionResult<Vec<_>>>()?;
    Ok(Json(ListResponse::from(docs)))
}

/// GET /api/commissions/{id}
pub async fn get_commission<R, D>(
    State(state): State<CommissionAppState<R, D>>,
    Path(id): Path<String>,
) -> CommissionResult<Json<CommissionResponse>>
where
    R: CommissionStore,
    D: UserDirectory + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let commission = GetCommissionUseCase::new(state.repo.clone())
        .execute(&id)
        .await?;

    Ok(Json(CommissionResponse::try_from(&commission)?))
}

/// POST /api/commissions/commission-suppliers
pub async fn create_commission<R, D>(
    State(state): State<CommissionAppState<R, D>>,
    ValidatedJson(req): ValidatedJson<CreateCommissionRequest>,
) -> CommissionResult<impl IntoResponse>
where
    R: CommissionStore,
    D: UserDirectory + Send + Sync + 'static,
{
    let commission = CreateCommissionUseCase::new(state.repo.clone(), state.users.clone())
        .execute(req.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CommissionResponse::try_from(&commission)?),
    ))
}

// ============================================================================
// Commission Imports
// ============================================================================

fn bad_multipart(err: MultipartError) -> AppError {
    AppError::bad_request("Invalid multipart body").with_source(err)
}

/// Collect the `supplier` and `file` parts; other parts are ignored
async fn read_upload(mut multipart: Multipart) -> Result<ImportUploadForm, AppError> {
    let mut form = ImportUploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("supplier") => {
                form.supplier = Some(field.text().await.map_err(bad_multipart)?);
            }
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(bad_multipart)?;
                form.file = Some(UploadedFile {
                    file_name,
                    content_type,
                    data: data.to_vec(),
                });
            }
            _ => {}
        }
    }

    Ok(form)
}

/// GET /api/commission-imports
pub async fn list_imports<R, D>(
    State(state): State<CommissionAppState<R, D>>,
) -> CommissionResult<Json<ListResponse<CommissionImportResponse>>>
where
    R: CommissionStore,
    D: UserDirectory + Send + Sync + 'static,
{
    let imports = ListImportsUseCase::new(state.repo.clone()).execute().await?;
    Ok(list(&imports))
}

/// POST /api/commission-imports/custom-create (`multipart/form-data`)
pub async fn create_import<R, D>(
    State(state): State<CommissionAppState<R, D>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> CommissionResult<impl IntoResponse>
where
    R: CommissionStore,
    D: UserDirectory + Send + Sync + 'static,
{
    let multipart = multipart.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    let input = read_upload(multipart)
        .await?
        .into_input()
        .map_err(AppError::validation)?;

    let import = CreateImportUseCase::new(state.repo.clone())
        .execute(input)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CommissionImportResponse::from(&import)),
    ))
}

/// GET /api/commission-imports/{userId}
pub async fn user_imports<R, D>(
    State(state): State<CommissionAppState<R, D>>,
    Path(id): Path<String>,
) -> CommissionResult<Json<CommissionImportUserResponse>>
where
    R: CommissionStore,
    D: UserDirectory + Send + Sync + 'static,
{
    let user_id = parse_id(&id)?;
    let view = UserImportsUseCase::new(state.repo.clone(), state.users.clone())
        .execute(&user_id)
        .await?;

    Ok(Json(CommissionImportUserResponse::from(&view)))
}

/// GET /api/commission-imports/{id}/file
pub async fn download_import<R, D>(
    State(state): State<CommissionAppState<R, D>>,
    Path(id): Path<String>,
) -> CommissionResult<impl IntoResponse>
where
    R: CommissionStore,
    D: UserDirectory + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let (import, data) = DownloadImportUseCase::new(state.repo.clone())
        .execute(&id)
        .await?;

    let content_type = HeaderValue::from_str(&import.content_type)
        .unwrap_or(HeaderValue::from_static("application/octet-stream"));
    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        import.file_name.as_str().replace(['"', '\\'], "_")
    ))
    .unwrap_or(HeaderValue::from_static("attachment"));

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        data,
    ))
}

/// DELETE /api/commission-imports/{id}
pub async fn delete_import<R, D>(
    State(state): State<CommissionAppState<R, D>>,
    Path(id): Path<String>,
) -> CommissionResult<StatusCode>
where
    R: CommissionStore,
    D: UserDirectory + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    DeleteImportUseCase::new(state.repo.clone())
        .execute(&id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
