use super::SyncError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use common::model::row::{Column, SheetRow};
use common::model::ticket::{TicketPayload, DEFAULT_PRIORITY, DEFAULT_STATUS};

const REQUIRED: [Column; 3] = [Column::PropertyId, Column::Type, Column::Issue];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Turns a sheet row into a ticket creation request.
///
/// `row` is only used to label errors.
pub(crate) fn build_payload(row: usize, cells: &SheetRow) -> Result<TicketPayload, SyncError> {
    let missing: Vec<&'static str> = REQUIRED
        .iter()
        .filter(|c| cells.cell(**c).trim().is_empty())
        .map(|c| c.field_name())
        .collect();
    if !missing.is_empty() {
        return Err(SyncError::MissingFields {
            row,
            fields: missing,
        });
    }

    let property_id = coerce_integer(&cells.property_id).ok_or_else(|| SyncError::InvalidField {
        row,
        field: Column::PropertyId.field_name(),
        value: cells.property_id.clone(),
        reason: "not an integer".to_string(),
    })?;

    let sla_due_at = match optional(&cells.sla_due_at) {
        None => None,
        Some(raw) => Some(normalize_timestamp(&raw).ok_or_else(|| SyncError::InvalidField {
            row,
            field: Column::SlaDueAt.field_name(),
            value: raw.clone(),
            reason: "not a recognizable date or time".to_string(),
        })?),
    };

    Ok(TicketPayload {
        property_id,
        ticket_type: cells.ticket_type.trim().to_string(),
        issue: cells.issue.trim().to_string(),
        priority: optional(&cells.priority).unwrap_or_else(|| DEFAULT_PRIORITY.to_string()),
        status: optional(&cells.status).unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        assigned_to: optional(&cells.assigned_to),
        maintenance_category: optional(&cells.maintenance_category),
        sla_due_at,
    })
}

fn optional(cell: &str) -> Option<String> {
    let trimmed = cell.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Accepts `12` as well as the `12.0` a spreadsheet produces for numeric cells.
fn coerce_integer(cell: &str) -> Option<i64> {
    let trimmed = cell.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Some(n);
    }
    let f = trimmed.parse::<f64>().ok()?;
    (f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
}

/// Parses a date or date-time and renders it as an RFC 3339 UTC timestamp
/// with millisecond precision. Values without an offset are taken as UTC.
fn normalize_timestamp(raw: &str) -> Option<String> {
    parse_timestamp(raw).map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.with_timezone(&Utc));
    }
    if let Ok(t) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f %z") {
        return Some(t.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(t) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(t.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> SheetRow {
        SheetRow::from_cells(cells)
    }

    #[test]
    fn empty_priority_and_status_get_defaults() {
        let payload = build_payload(2, &row(&["", "5", "maintenance", "No hot water"])).unwrap();
        assert_eq!(payload.priority, "medium");
        assert_eq!(payload.status, "open");
        assert_eq!(payload.assigned_to, None);
        assert_eq!(payload.maintenance_category, None);
        assert_eq!(payload.sla_due_at, None);
    }

    #[test]
    fn filled_optional_fields_are_kept() {
        let payload = build_payload(
            3,
            &row(&[
                "", "5", "maintenance", "Boiler", "high", "in_progress", "Dana", "hvac", "", "",
            ]),
        )
        .unwrap();
        assert_eq!(payload.priority, "high");
        assert_eq!(payload.status, "in_progress");
        assert_eq!(payload.assigned_to.as_deref(), Some("Dana"));
        assert_eq!(payload.maintenance_category.as_deref(), Some("hvac"));
    }

    #[test]
    fn missing_required_fields_are_all_reported() {
        let err = build_payload(7, &row(&["", "", "task", "  "])).unwrap_err();
        match err {
            SyncError::MissingFields { row, fields } => {
                assert_eq!(row, 7);
                assert_eq!(fields, vec!["property_id", "issue"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn property_id_accepts_spreadsheet_numbers() {
        assert_eq!(coerce_integer("12"), Some(12));
        assert_eq!(coerce_integer(" 12.0 "), Some(12));
        assert_eq!(coerce_integer("12.5"), None);
        assert_eq!(coerce_integer("twelve"), None);
    }

    #[test]
    fn non_integer_property_id_is_invalid() {
        let err = build_payload(4, &row(&["", "abc", "task", "Paint"])).unwrap_err();
        assert!(matches!(
            err,
            SyncError::InvalidField { row: 4, field: "property_id", .. }
        ));
    }

    #[test]
    fn naive_sla_is_normalized_to_utc() {
        let payload = build_payload(
            2,
            &row(&["", "1", "task", "Inspect", "", "", "", "", "2026-02-20T20:50:00"]),
        )
        .unwrap();
        let sla = payload.sla_due_at.unwrap();
        assert_eq!(sla, "2026-02-20T20:50:00.000Z");
        let parsed = DateTime::parse_from_rfc3339(&sla).unwrap();
        assert_eq!(
            parsed.with_timezone(&Utc),
            NaiveDate::from_ymd_opt(2026, 2, 20)
                .unwrap()
                .and_hms_opt(20, 50, 0)
                .unwrap()
                .and_utc()
        );
    }

    #[test]
    fn offset_sla_is_converted_to_utc() {
        assert_eq!(
            normalize_timestamp("2026-02-20T20:50:00+02:00").as_deref(),
            Some("2026-02-20T18:50:00.000Z")
        );
        assert_eq!(
            normalize_timestamp("2026-02-20").as_deref(),
            Some("2026-02-20T00:00:00.000Z")
        );
    }

    #[test]
    fn unparseable_sla_is_invalid() {
        let err = build_payload(
            9,
            &row(&["", "1", "task", "Inspect", "", "", "", "", "next tuesday"]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SyncError::InvalidField { row: 9, field: "sla_due_at", .. }
        ));
    }
}
