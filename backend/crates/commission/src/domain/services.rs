//! Domain Services
//!
//! Rules spanning several entities: code entry merging and ownership checks.

use std::borrow::Cow;
use std::collections::HashSet;
use std::hash::Hash;

use kernel::error::app_error::AppError;

use crate::domain::entities::CodeEntry;
use crate::domain::value_objects::{CodeEntryId, CommissionCode, UserCodeId};
use crate::error::{CommissionError, CommissionResult};

/// Code as submitted by a client, optionally naming the entry it replaces
#[derive(Debug, Clone)]
pub struct RequestedCode {
    pub id: Option<CodeEntryId>,
    pub code: CommissionCode,
}

/// Values occurring more than once, in first-repeat order
pub fn duplicates<'a, T, I>(items: I) -> Vec<&'a T>
where
    T: Eq + Hash + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut out = Vec::new();
    for item in items {
        if !seen.insert(item) && reported.insert(item) {
            out.push(item);
        }
    }
    out
}

/// Build the new entry list of a mapping
///
/// Entries carrying an id must belong to `existing` and keep that id; entries
/// without one get a fresh id. Order follows the request.
pub fn merge_code_entries(
    existing: &[CodeEntry],
    requested: Vec<RequestedCode>,
) -> CommissionResult<Vec<CodeEntry>> {
    if requested.is_empty() {
        return Err(rejected("At least one code is required"));
    }
    if let Some(code) = duplicates(requested.iter().map(|r| &r.code)).first() {
        return Err(rejected(format!("Duplicate code: {code}")));
    }

    let known: HashSet<CodeEntryId> = existing.iter().map(|e| e.id).collect();
    if let Some(id) = requested
        .iter()
        .filter_map(|r| r.id)
        .find(|id| !known.contains(id))
    {
        return Err(rejected(format!("Unknown code entry: {id}")));
    }
    let ids: Vec<CodeEntryId> = requested.iter().filter_map(|r| r.id).collect();
    if !duplicates(ids.iter()).is_empty() {
        return Err(rejected("The same code entry is listed twice"));
    }

    Ok(requested
        .into_iter()
        .map(|r| CodeEntry {
            id: r.id.unwrap_or_default(),
            code: r.code,
        })
        .collect())
}

fn rejected(message: impl Into<Cow<'static, str>>) -> CommissionError {
    CommissionError::Rejected(AppError::bad_request(message))
}

/// Fail on the first code held by a mapping other than `owner`
pub fn ensure_codes_free(
    holders: &[(CommissionCode, UserCodeId)],
    owner: Option<UserCodeId>,
) -> CommissionResult<()> {
    match holders
        .iter()
        .find(|(_, holder)| Some(*holder) != owner)
    {
        Some((code, _)) => Err(CommissionError::CodeTaken(code.to_string())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(raw: &str) -> CommissionCode {
        CommissionCode::new(raw).unwrap()
    }

    #[test]
    fn test_duplicates() {
        let items = ["a", "b", "a", "c", "b", "a"];
        assert_eq!(duplicates(items.iter()), vec![&"a", &"b"]);
        assert!(duplicates(["x", "y"].iter()).is_empty());
    }

    #[test]
    fn test_merge_keeps_known_ids() {
        let kept = CodeEntry {
            id: CodeEntryId::new(),
            code: code("OLD-1"),
        };

        let merged = merge_code_entries(
            std::slice::from_ref(&kept),
            vec![
                RequestedCode {
                    id: Some(kept.id),
                    code: code("OLD-1-RENAMED"),
                },
                RequestedCode {
                    id: None,
                    code: code("NEW-2"),
                },
            ],
        )
        .unwrap();

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].id, kept.id);
        assert_eq!(merged[0].code.as_str(), "OLD-1-RENAMED");
        assert_ne!(merged[1].id, kept.id);
    }

    #[test]
    fn test_merge_rejects_duplicates() {
        let err = merge_code_entries(
            &[],
            vec![
                RequestedCode {
                    id: None,
                    code: code("A1"),
                },
                RequestedCode {
                    id: None,
                    code: code("A1"),
                },
            ],
        )
        .unwrap_err();

        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(AppError::from(err).message(), "Duplicate code: A1");
    }

    #[test]
    fn test_merge_rejects_foreign_entry_id() {
        let err = merge_code_entries(
            &[],
            vec![RequestedCode {
                id: Some(CodeEntryId::new()),
                code: code("A1"),
            }],
        )
        .unwrap_err();

        assert!(AppError::from(err).message().starts_with("Unknown code entry"));
    }

    #[test]
    fn test_merge_requires_a_code() {
        assert!(merge_code_entries(&[], Vec::new()).is_err());
    }

    #[test]
    fn test_ensure_codes_free() {
        let mine = UserCodeId::new();
        let theirs = UserCodeId::new();

        assert!(ensure_codes_free(&[], None).is_ok());
        assert!(ensure_codes_free(&[(code("A"), mine)], Some(mine)).is_ok());

        let err = ensure_codes_free(&[(code("A"), mine), (code("B"), theirs)], Some(mine))
            .unwrap_err();
        assert!(matches!(err, CommissionError::CodeTaken(c) if c == "B"));

        assert!(ensure_codes_free(&[(code("A"), mine)], None).is_err());
    }
}
