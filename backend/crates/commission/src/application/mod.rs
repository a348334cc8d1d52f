//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.
//! Contains use case implementations.

pub mod column_mappings;
pub mod commissions;
pub mod imports;
pub mod suppliers;
pub mod user_codes;

pub use column_mappings::{
    ColumnMappingInput, CreateColumnMappingUseCase, DeleteColumnMappingUseCase,
    ListColumnMappingsUseCase, UpdateColumnMappingUseCase,
};
pub use commissions::{
    CreateCommissionInput, CreateCommissionUseCase, GetCommissionUseCase, ListCommissionsUseCase,
    SupplierLineInput,
};
pub use imports::{
    CreateImportUseCase, DeleteImportUseCase, DownloadImportUseCase, ListImportsUseCase,
    MAX_IMPORT_BYTES, NewImportInput, UserImports, UserImportsUseCase,
};
pub use suppliers::{CreateSupplierUseCase, ListSuppliersUseCase};
pub use user_codes::{
    CodeInput, CreateUserCodesUseCase, DeleteUserCodesUseCase, ListUserCodesUseCase,
    UpdateUserCodesUseCase, UserCodesInput,
};
