//! Domain Value Objects
//!
//! Immutable value types for the commission domain.

use std::fmt;

use kernel::error::app_error::{AppError, AppResult};
use rust_decimal::Decimal;
use serde::Serialize;

pub use kernel::id::{
    CodeEntryId, ColumnMappingId, CommissionId, CommissionImportId, SupplierId, UserCodeId, UserId,
};

// ============================================================================
// Supplier Name
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SupplierName(String);

impl SupplierName {
    pub const MAX_LENGTH: usize = 200;

    pub fn new(raw: &str) -> AppResult<Self> {
        let name = raw.trim();

        if name.is_empty() {
            return Err(AppError::bad_request("Supplier name cannot be empty"));
        }
        if name.chars().count() > Self::MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Supplier name must be at most {} characters",
                Self::MAX_LENGTH
            )));
        }
        if name.chars().any(char::is_control) {
            return Err(AppError::bad_request(
                "Supplier name contains invalid characters",
            ));
        }

        Ok(Self(name.to_string()))
    }

    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Names are unique regardless of case
    pub fn matches(&self, other: &SupplierName) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }
}

impl fmt::Display for SupplierName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Column Letter
// ============================================================================

/// Spreadsheet column reference (`A` to `XFD`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColumnLetter(String);

impl ColumnLetter {
    /// Column count of an xlsx sheet; `XFD`
    pub const MAX_INDEX: u32 = 16_384;

    pub fn new(raw: &str) -> AppResult<Self> {
        let letters = raw.trim().to_ascii_uppercase();

        if letters.is_empty() {
            return Err(AppError::bad_request("Column letter cannot be empty"));
        }
        if letters.len() > 3 || !letters.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(AppError::bad_request(
                "Column letter must be 1 to 3 letters (A to XFD)",
            ));
        }
        if column_index(&letters) > Self::MAX_INDEX {
            return Err(AppError::bad_request(
                "Column letter must not be past XFD",
            ));
        }

        Ok(Self(letters))
    }

    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 1-based column index (`A` = 1, `AA` = 27)
    pub fn index(&self) -> u32 {
        column_index(&self.0)
    }
}

impl fmt::Display for ColumnLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn column_index(letters: &str) -> u32 {
    letters
        .bytes()
        .fold(0, |acc, b| acc * 26 + u32::from(b - b'A' + 1))
}

// ============================================================================
// Column Set
// ============================================================================

/// The three columns read from a supplier's commission file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSet {
    pub code: ColumnLetter,
    pub kind: ColumnLetter,
    pub amount: ColumnLetter,
}

impl ColumnSet {
    pub fn new(code: ColumnLetter, kind: ColumnLetter, amount: ColumnLetter) -> AppResult<Self> {
        if code == kind || code == amount || kind == amount {
            return Err(AppError::bad_request(
                "Code, type and amount columns must be different",
            ));
        }
        Ok(Self { code, kind, amount })
    }
}

// ============================================================================
// Commission Code
// ============================================================================

/// Supplier-side code identifying a user in commission files
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CommissionCode(String);

impl CommissionCode {
    pub const MAX_LENGTH: usize = 64;

    pub fn new(raw: &str) -> AppResult<Self> {
        let code = raw.trim();

        if code.is_empty() {
            return Err(AppError::bad_request("Code cannot be empty"));
        }
        if code.chars().count() > Self::MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Code must be at most {} characters",
                Self::MAX_LENGTH
            )));
        }
        if code.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(AppError::bad_request("Code cannot contain spaces"));
        }

        Ok(Self(code.to_string()))
    }

    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommissionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Amount
// ============================================================================

/// Non-negative monetary amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    pub fn new(value: Decimal) -> AppResult<Self> {
        if value < Decimal::ZERO {
            return Err(AppError::bad_request("Amount cannot be negative"));
        }
        Ok(Self(value.normalize()))
    }

    pub fn from_db(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// `None` when the sum does not fit in a `Decimal`
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    /// Sum of all amounts, `None` on overflow
    pub fn checked_sum(amounts: impl IntoIterator<Item = Amount>) -> Option<Amount> {
        amounts
            .into_iter()
            .try_fold(Amount::ZERO, |acc, amount| acc.checked_add(amount))
    }
}

// ============================================================================
// Import File Name
// ============================================================================

/// Name of an uploaded commission spreadsheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImportFileName(String);

impl ImportFileName {
    pub const MAX_LENGTH: usize = 255;
    pub const EXTENSIONS: [&'static str; 2] = ["xlsx", "xls"];

    /// Keeps only the last path component browsers may send
    pub fn new(raw: &str) -> AppResult<Self> {
        let name = raw
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .trim();

        if name.is_empty() {
            return Err(AppError::bad_request("File name cannot be empty"));
        }
        if name.chars().count() > Self::MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "File name must be at most {} characters",
                Self::MAX_LENGTH
            )));
        }
        if name.chars().any(char::is_control) {
            return Err(AppError::bad_request("File name contains invalid characters"));
        }

        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        if !Self::EXTENSIONS.contains(&extension.as_str()) {
            return Err(AppError::bad_request("Only .xlsx and .xls files are accepted"));
        }

        Ok(Self(name.to_string()))
    }

    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImportFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_column_letter_normalizes() {
        let col = ColumnLetter::new(" ab ").unwrap();
        assert_eq!(col.as_str(), "AB");
        assert_eq!(col.index(), 28);
    }

    #[test]
    fn test_column_letter_index() {
        assert_eq!(ColumnLetter::new("A").unwrap().index(), 1);
        assert_eq!(ColumnLetter::new("Z").unwrap().index(), 26);
        assert_eq!(ColumnLetter::new("AA").unwrap().index(), 27);
        assert_eq!(ColumnLetter::new("ZZ").unwrap().index(), 702);
        assert_eq!(ColumnLetter::new("XFD").unwrap().index(), 16_384);
    }

    #[test]
    fn test_column_letter_rejects() {
        for raw in ["", "  ", "A1", "ABCD", "XFE", "ZZZ", "É", "-"] {
            assert!(ColumnLetter::new(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn test_column_set_requires_distinct_columns() {
        let a = ColumnLetter::new("A").unwrap();
        let b = ColumnLetter::new("B").unwrap();
        let c = ColumnLetter::new("C").unwrap();

        assert!(ColumnSet::new(a.clone(), b.clone(), c).is_ok());
        assert!(ColumnSet::new(a.clone(), b, a).is_err());
    }

    #[test]
    fn test_commission_code() {
        assert_eq!(CommissionCode::new("  AB-123 ").unwrap().as_str(), "AB-123");
        assert!(CommissionCode::new("").is_err());
        assert!(CommissionCode::new("AB 123").is_err());
        assert!(CommissionCode::new(&"x".repeat(65)).is_err());
        assert!(CommissionCode::new(&"x".repeat(64)).is_ok());
    }

    #[test]
    fn test_supplier_name() {
        let name = SupplierName::new("  Generali ").unwrap();
        assert_eq!(name.as_str(), "Generali");
        assert!(name.matches(&SupplierName::new("GENERALI").unwrap()));
        assert!(SupplierName::new(" ").is_err());
        assert!(SupplierName::new(&"n".repeat(201)).is_err());
    }

    #[test]
    fn test_import_file_name() {
        assert_eq!(
            ImportFileName::new(" C:\\Users\\me\\Generali-2024.XLSX ").unwrap().as_str(),
            "Generali-2024.XLSX"
        );
        assert_eq!(ImportFileName::new("dir/q1.xls").unwrap().as_str(), "q1.xls");
        for raw in ["", "report.pdf", "noext", "folder/", &format!("{}.xlsx", "a".repeat(251))] {
            assert!(ImportFileName::new(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn test_amount() {
        assert!(Amount::new(Decimal::from_str("-0.01").unwrap()).is_err());
        assert_eq!(Amount::new(Decimal::ZERO).unwrap(), Amount::ZERO);

        let total = Amount::checked_sum(
            ["10.50", "0.25", "100"]
                .iter()
                .map(|s| Amount::new(Decimal::from_str(s).unwrap()).unwrap()),
        )
        .unwrap();
        assert_eq!(total.value(), Decimal::from_str("110.75").unwrap());
    }

    #[test]
    fn test_amount_sum_overflow() {
        let big = Amount::new(Decimal::from_str("5e28").unwrap()).unwrap();
        assert!(big.checked_add(big).is_none());
        assert!(Amount::checked_sum([big, Amount::ZERO, big]).is_none());
        assert_eq!(Amount::checked_sum([big]), Some(big));
    }
}
