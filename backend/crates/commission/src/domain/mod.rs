//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Supplier, SupplierColumnMapping, UserCommissionCode, Commission,
//!   CommissionImport)
//! - Domain value objects (ColumnLetter, CommissionCode, Amount)
//! - Domain services (code entry merging, ownership checks)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
