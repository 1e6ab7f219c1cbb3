use crate::api::AttendanceRecord;
use crate::components::badge::StatusBadge;
use crate::utils::csv::build_csv;
use chrono::NaiveDate;
use leptos::*;

/// Date-range + filter descriptor for attendance listings. The token bump
/// makes every submitted query distinct, so a stale in-flight response can
/// never replace the result of a newer one.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct AttendanceQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub token: u32,
}

impl AttendanceQuery {
    pub fn new(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self {
        Self {
            start_date,
            end_date,
            token: 0,
        }
    }

    pub fn with_range(self, start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self {
        Self {
            start_date,
            end_date,
            token: self.token.wrapping_add(1),
        }
    }

    pub fn refresh(self) -> Self {
        Self {
            token: self.token.wrapping_add(1),
            ..self
        }
    }
}

pub const ATTENDANCE_CSV_HEADERS: [&str; 6] =
    ["Employee", "Date", "Check-in", "Check-out", "Hours", "Status"];

/// One CSV shape for every attendance export.
pub fn attendance_csv(records: &[AttendanceRecord]) -> String {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            vec![
                record
                    .employee_name
                    .clone()
                    .unwrap_or_else(|| record.employee_id.clone()),
                record.date.to_string(),
                record
                    .check_in_time
                    .map(|t| t.format("%H:%M").to_string())
                    .unwrap_or_default(),
                record
                    .check_out_time
                    .map(|t| t.format("%H:%M").to_string())
                    .unwrap_or_default(),
                record
                    .total_hours
                    .map(|h| format!("{h:.2}"))
                    .unwrap_or_default(),
                record.status.clone(),
            ]
        })
        .collect();
    build_csv(&ATTENDANCE_CSV_HEADERS, &rows)
}

pub fn attendance_export_filename(
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> String {
    match (start_date, end_date) {
        (Some(from), Some(to)) => format!("attendance_{from}_{to}.csv"),
        (Some(from), None) => format!("attendance_from_{from}.csv"),
        (None, Some(to)) => format!("attendance_until_{to}.csv"),
        (None, None) => "attendance.csv".to_string(),
    }
}

/// Case-insensitive in-memory match on employee name/id, used by the pages
/// that filter client-side instead of re-querying.
pub fn matches_search(record: &AttendanceRecord, search: &str) -> bool {
    if search.trim().is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    record
        .employee_name
        .as_deref()
        .map(|name| name.to_lowercase().contains(&needle))
        .unwrap_or(false)
        || record.employee_id.to_lowercase().contains(&needle)
}

#[component]
pub fn AttendanceTable(records: Vec<AttendanceRecord>) -> impl IntoView {
    view! {
        <div class="overflow-x-auto">
            <table class="min-w-full divide-y divide-border">
                <thead>
                    <tr>
                        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Employee"</th>
                        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Date"</th>
                        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Check-in"</th>
                        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Check-out"</th>
                        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Hours"</th>
                        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">"Status"</th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-border">
                    <For each=move || records.clone() key=|record| record.id.clone() children=|record| {
                        view! {
                            <tr>
                                <td class="px-4 py-3 text-sm text-fg">{record.employee_name.clone().unwrap_or_else(|| record.employee_id.clone())}</td>
                                <td class="px-4 py-3 text-sm text-fg-muted">{record.date.to_string()}</td>
                                <td class="px-4 py-3 text-sm text-fg-muted">{record.check_in_time.map(|t| t.format("%H:%M").to_string()).unwrap_or_default()}</td>
                                <td class="px-4 py-3 text-sm text-fg-muted">{record.check_out_time.map(|t| t.format("%H:%M").to_string()).unwrap_or_default()}</td>
                                <td class="px-4 py-3 text-sm text-fg">{record.total_hours.map(|h| format!("{h:.2}")).unwrap_or_default()}</td>
                                <td class="px-4 py-3"><StatusBadge status=record.status.clone() /></td>
                            </tr>
                        }
                    } />
                </tbody>
            </table>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn record(id: &str, name: Option<&str>, status: &str) -> AttendanceRecord {
        AttendanceRecord {
            id: id.to_string(),
            employee_id: "e1".to_string(),
            employee_name: name.map(str::to_string),
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            check_in_time: NaiveDateTime::parse_from_str("2026-03-02 09:02:00", "%Y-%m-%d %H:%M:%S")
                .ok(),
            check_out_time: None,
            total_hours: Some(7.5),
            status: status.to_string(),
        }
    }

    #[test]
    fn csv_has_one_line_per_record_plus_header() {
        let records = vec![
            record("a1", Some("Ana Ruiz"), "present"),
            record("a2", Some("Doe, Jane"), "late"),
        ];
        let csv = attendance_csv(&records);
        assert_eq!(csv.lines().count(), 3);
        // The comma in the name stays inside one quoted field.
        assert!(csv.contains("\"Doe, Jane\""));
    }

    #[test]
    fn csv_falls_back_to_employee_id_without_a_name() {
        let csv = attendance_csv(&[record("a1", None, "present")]);
        assert!(csv.lines().nth(1).unwrap().starts_with("e1,"));
    }

    #[test]
    fn export_filename_reflects_the_range() {
        let from = NaiveDate::from_ymd_opt(2026, 3, 1);
        let to = NaiveDate::from_ymd_opt(2026, 3, 31);
        assert_eq!(
            attendance_export_filename(from, to),
            "attendance_2026-03-01_2026-03-31.csv"
        );
        assert_eq!(attendance_export_filename(None, None), "attendance.csv");
    }

    #[test]
    fn search_matches_name_and_id_case_insensitively() {
        let named = record("a1", Some("Ana Ruiz"), "present");
        assert!(matches_search(&named, "ana"));
        assert!(matches_search(&named, "RUIZ"));
        assert!(matches_search(&named, ""));
        assert!(!matches_search(&named, "bob"));

        let unnamed = record("a2", None, "present");
        assert!(matches_search(&unnamed, "E1"));
    }

    #[test]
    fn query_token_changes_on_every_submission() {
        let query = AttendanceQuery::new(None, None);
        let next = query.with_range(NaiveDate::from_ymd_opt(2026, 3, 1), None);
        assert_ne!(query, next);
        assert_ne!(next, next.refresh());
    }
}
