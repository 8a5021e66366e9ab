//! Read-query construction for information listings.
//!
//! A listing runs under an [`InformationFilter`]: a set of predicates built
//! from the caller's view scope (restricted readers) and the optional
//! request parameters (admin-wide queries). Stores translate the filter
//! into their own predicate form; results are always newest first.

use chrono::NaiveDate;
use serde::Deserialize;

use fieldintel_auth::ViewScope;
use fieldintel_core::{DomainError, DomainResult, UserId};

use crate::record::parse_info_date;

/// Optional query parameters accepted by the list endpoints. All strings as
/// the request supplied them; empty values count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    /// Exact `info_date` (ISO date).
    pub date: Option<String>,
    /// Inclusive range start; only honored together with `to`.
    pub from: Option<String>,
    /// Inclusive range end; only honored together with `from`.
    pub to: Option<String>,
    pub type_bu: Option<String>,
    pub type_info: Option<String>,
    pub user_id: Option<String>,
}

/// Predicate over `info_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePredicate {
    /// Exact-day match.
    On(NaiveDate),
    /// Inclusive range.
    Between { from: NaiveDate, to: NaiveDate },
}

/// The predicate set a listing runs under. Present predicates compose
/// conjunctively; an all-`None` filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InformationFilter {
    /// Restrict to records owned by this user.
    pub owner: Option<UserId>,
    /// Restrict `type_bu` to this set. A single-element set is an exact
    /// match.
    pub business_units: Option<Vec<String>>,
    /// Restrict `type_info` to exactly this value.
    pub type_info: Option<String>,
    /// Restrict `info_date`.
    pub date: Option<DatePredicate>,
}

impl InformationFilter {
    /// Every record owned by `user` (the own-records listing).
    pub fn owned_by(user: UserId) -> Self {
        Self {
            owner: Some(user),
            ..Self::default()
        }
    }

    /// Admin-wide listing: every optional parameter applies.
    pub fn for_admin(params: &ListParams) -> DomainResult<Self> {
        let mut filter = Self {
            date: date_predicate(params)?,
            ..Self::default()
        };

        if let Some(bu) = non_empty(&params.type_bu) {
            filter.business_units = Some(vec![bu.to_string()]);
        }
        if let Some(type_info) = non_empty(&params.type_info) {
            filter.type_info = Some(type_info.to_string());
        }
        if let Some(raw) = non_empty(&params.user_id) {
            let owner: UserId = raw
                .parse()
                .map_err(|_| DomainError::validation("Invalid user ID"))?;
            filter.owner = Some(owner);
        }

        Ok(filter)
    }

    /// Scoped listing for a restricted reader.
    ///
    /// A concrete scope pins `type_bu` to its units and ignores any
    /// `type_bu` parameter; the `ALL` scope applies no unit restriction of
    /// its own and honors the parameter as an exact match. Ownership is
    /// never filtered here.
    pub fn for_view(scope: &ViewScope, params: &ListParams) -> DomainResult<Self> {
        let mut filter = Self {
            date: date_predicate(params)?,
            ..Self::default()
        };

        match scope.units() {
            Some(units) => filter.business_units = Some(units.to_vec()),
            None => {
                if let Some(bu) = non_empty(&params.type_bu) {
                    filter.business_units = Some(vec![bu.to_string()]);
                }
            }
        }
        if let Some(type_info) = non_empty(&params.type_info) {
            filter.type_info = Some(type_info.to_string());
        }

        Ok(filter)
    }
}

/// `date` takes precedence over `from`/`to`. A lone `from` or `to` applies
/// no date restriction at all; the pair is required for a range.
fn date_predicate(params: &ListParams) -> DomainResult<Option<DatePredicate>> {
    if let Some(raw) = non_empty(&params.date) {
        return Ok(Some(DatePredicate::On(parse_info_date(raw)?)));
    }

    match (non_empty(&params.from), non_empty(&params.to)) {
        (Some(from), Some(to)) => Ok(Some(DatePredicate::Between {
            from: parse_info_date(from)?,
            to: parse_info_date(to)?,
        })),
        _ => Ok(None),
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
