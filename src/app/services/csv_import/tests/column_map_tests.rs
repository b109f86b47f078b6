//! Tests for semantic column resolution

use super::{musterplan_headers, test_config};
use crate::app::services::csv_import::ResolvedColumns;
use crate::config::{ColumnConfig, ColumnRole, ColumnType};

#[test]
fn test_musterplan_resolution() {
    let resolved = ResolvedColumns::resolve(&musterplan_headers(), &test_config()).unwrap();
    assert_eq!(resolved.ear_tag, 1);
    assert_eq!(resolved.ventil, 3);
    // Dynamic date header resolves through the positional _Spalte address
    assert_eq!(resolved.event_date, Some(4));
}

#[test]
fn test_unstable_headers_fall_back_to_fixed_positions() {
    let mut config = ColumnConfig::new("renamed");
    config.add_column("Ventil-Umbenannt", ColumnType::Number, ColumnRole::VentilNumber);
    config.add_column("Tag-Umbenannt", ColumnType::Text, ColumnRole::EarTagNumber);

    let resolved = ResolvedColumns::resolve(&musterplan_headers(), &config).unwrap();
    assert_eq!(resolved.ventil, 3);
    assert_eq!(resolved.ear_tag, 1);
}

#[test]
fn test_named_match_wins_over_fallback() {
    let mut config = ColumnConfig::new("named");
    config.add_column("TK", ColumnType::Number, ColumnRole::VentilNumber);
    config.add_column("Abf.", ColumnType::Text, ColumnRole::EarTagNumber);

    let resolved = ResolvedColumns::resolve(&musterplan_headers(), &config).unwrap();
    assert_eq!(resolved.ventil, 5);
    assert_eq!(resolved.ear_tag, 1);
}

#[test]
fn test_required_role_unresolvable_is_configuration_error() {
    let mut config = ColumnConfig::new("narrow");
    config.add_column("Ventil-X", ColumnType::Number, ColumnRole::VentilNumber);
    config.add_column("Tag-X", ColumnType::Text, ColumnRole::EarTagNumber);

    // Two columns: no name match and the fixed fallbacks lie outside
    let headers: Vec<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
    let result = ResolvedColumns::resolve(&headers, &config);
    assert!(result.is_err());
}

#[test]
fn test_optional_roles_resolve_when_mapped() {
    let mut config = ColumnConfig::musterplan();
    config.add_column("Gesundheit", ColumnType::Text, ColumnRole::HealthStatus);

    let mut headers = musterplan_headers();
    headers.push("Gesundheit".to_string());

    let resolved = ResolvedColumns::resolve(&headers, &config).unwrap();
    assert_eq!(resolved.health_status, Some(headers.len() - 1));
    assert_eq!(resolved.pregnancy_status, None);
}

#[test]
fn test_required_width() {
    let resolved = ResolvedColumns::resolve(&musterplan_headers(), &test_config()).unwrap();
    assert_eq!(resolved.required_width(), 4);
}
