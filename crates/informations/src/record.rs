//! Information records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use fieldintel_core::{DomainError, DomainResult, InformationId, UserId};

/// A single field observation recorded by a user.
///
/// Records are immutable once created; `created_at` is server-assigned and
/// is the default ordering key for every listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Information {
    pub id: InformationId,
    /// Owning user.
    pub user_id: UserId,
    /// Business unit the observation belongs to; scoping key for
    /// restricted readers.
    pub type_bu: String,
    /// Kind of observation.
    pub type_info: String,
    /// Laboratory concerned, when relevant.
    pub lab: Option<String>,
    /// Competing product named in the observation.
    pub competitor_product: Option<String>,
    /// Business date of the observation.
    pub info_date: NaiveDate,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Creation payload. Fields arrive as the request supplied them; validation
/// happens in [`Information::create`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewInformation {
    pub type_bu: Option<String>,
    pub type_info: Option<String>,
    pub lab: Option<String>,
    pub competitor_product: Option<String>,
    /// ISO date (`YYYY-MM-DD`).
    pub info_date: Option<String>,
    pub comment: Option<String>,
}

impl Information {
    /// Validate a creation payload and assemble the record, owned by the
    /// caller. `type_bu`, `type_info` and `info_date` are mandatory; empty
    /// strings count as absent.
    pub fn create(owner: UserId, payload: NewInformation, now: DateTime<Utc>) -> DomainResult<Self> {
        let type_bu = payload.type_bu.filter(|v| !v.is_empty());
        let type_info = payload.type_info.filter(|v| !v.is_empty());
        let info_date = payload.info_date.filter(|v| !v.is_empty());
        let (Some(type_bu), Some(type_info), Some(info_date)) = (type_bu, type_info, info_date)
        else {
            return Err(DomainError::validation("Missing required fields"));
        };

        let info_date = parse_info_date(&info_date)?;

        Ok(Self {
            id: InformationId::new(),
            user_id: owner,
            type_bu,
            type_info,
            lab: payload.lab,
            competitor_product: payload.competitor_product,
            info_date,
            comment: payload.comment,
            created_at: now,
        })
    }
}

pub(crate) fn parse_info_date(raw: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| DomainError::validation("Invalid date format"))
}
