//! Resolution of semantic column roles to row indices
//!
//! Combines the configured mapping with the positional fallbacks used by
//! planner exports whose header text is unstable but whose column order is
//! fixed.

use tracing::debug;

use crate::config::{ColumnConfig, ColumnRole};
use crate::constants::fallback_columns;
use crate::{Error, Result};

/// Row indices of the semantically mapped columns for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumns {
    /// Ventil / pen number column (required)
    pub ventil: usize,

    /// Ear tag column (required)
    pub ear_tag: usize,

    /// Mating date column
    pub event_date: Option<usize>,

    /// Pregnancy status column
    pub pregnancy_status: Option<usize>,

    /// Health status column
    pub health_status: Option<usize>,
}

impl ResolvedColumns {
    /// Resolve all mapped roles against a cleaned header row.
    ///
    /// The two required roles fall back to the conventional MusterPlan
    /// positions (ear tag at 1, ventil at 3, date at 4) when their header
    /// text does not match; resolution failure for either required role is a
    /// configuration error and surfaces before any row is processed.
    pub fn resolve(headers: &[String], config: &ColumnConfig) -> Result<Self> {
        let ventil = config
            .resolve_index_with_fallback(headers, ColumnRole::VentilNumber, fallback_columns::VENTIL)
            .ok_or_else(|| {
                Error::configuration("ventil number column not found in header row")
            })?;
        let ear_tag = config
            .resolve_index_with_fallback(headers, ColumnRole::EarTagNumber, fallback_columns::EAR_TAG)
            .ok_or_else(|| Error::configuration("ear tag column not found in header row"))?;

        let resolved = Self {
            ventil,
            ear_tag,
            event_date: config.resolve_index_with_fallback(
                headers,
                ColumnRole::EventDate,
                fallback_columns::EVENT_DATE,
            ),
            pregnancy_status: config.resolve_index(headers, ColumnRole::PregnancyStatus),
            health_status: config.resolve_index(headers, ColumnRole::HealthStatus),
        };

        debug!(
            "resolved columns: ventil={}, ear_tag={}, event_date={:?}",
            resolved.ventil, resolved.ear_tag, resolved.event_date
        );

        Ok(resolved)
    }

    /// Minimum number of fields a row must have to be mergeable
    pub fn required_width(&self) -> usize {
        self.ventil.max(self.ear_tag) + 1
    }
}
