//! Identity query helpers
//!
//! Turns the textual `order` option into typed sort clauses.

use crate::domain::{DomainError, DomainResult, SortDirection, SortField, SortSpec};

/// Parse an order option such as `"email:desc,name:asc"`.
///
/// Entries are separated by `,`, each entry is `field:direction`, and
/// the direction is matched case-insensitively. A blank option yields
/// no clauses.
///
/// Malformed entries fail with [`DomainError::InvalidSortOption`] here,
/// so the store is never called with an unparsed option.
pub fn parse_order(order: &str) -> DomainResult<Vec<SortSpec>> {
    if order.trim().is_empty() {
        return Ok(Vec::new());
    }
    order.split(',').map(parse_order_entry).collect()
}

fn parse_order_entry(entry: &str) -> DomainResult<SortSpec> {
    let (field, direction) = entry.split_once(':').ok_or_else(|| {
        DomainError::InvalidSortOption(format!("expected field:direction, got '{}'", entry))
    })?;

    let field = field
        .parse::<SortField>()
        .map_err(|_| DomainError::InvalidSortOption(format!("unknown sort field '{}'", field)))?;

    let direction = direction.parse::<SortDirection>().map_err(|_| {
        DomainError::InvalidSortOption(format!("unknown sort direction '{}'", direction))
    })?;

    Ok(SortSpec { field, direction })
}
