use serde::{Deserialize, Serialize};

/// Number of cells in a ticket row.
pub const ROW_WIDTH: usize = 10;

/// Value written to the `Source` column once a row has been turned into a ticket.
pub const SYNC_MARKER: &str = "Sheet";

/// The columns of the ticket sheet, in sheet order.
///
/// This is the only place that knows where a field sits in a row. Everything
/// else goes through [`Column::index`] or the named fields of [`SheetRow`], so
/// reordering the sheet only means reordering this enum and [`Column::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Column {
    Id,
    PropertyId,
    Type,
    Issue,
    Priority,
    Status,
    AssignedTo,
    MaintenanceCategory,
    SlaDueAt,
    Source,
}

impl Column {
    pub const ALL: [Column; ROW_WIDTH] = [
        Column::Id,
        Column::PropertyId,
        Column::Type,
        Column::Issue,
        Column::Priority,
        Column::Status,
        Column::AssignedTo,
        Column::MaintenanceCategory,
        Column::SlaDueAt,
        Column::Source,
    ];

    /// 0-based position of the column inside a row.
    pub fn index(self) -> usize {
        Column::ALL
            .iter()
            .position(|c| *c == self)
            .unwrap_or_default()
    }

    /// Looks up a column by its 1-based spreadsheet number.
    pub fn from_number(number: usize) -> Option<Column> {
        number.checked_sub(1).and_then(|i| Column::ALL.get(i).copied())
    }

    /// Title shown in the header row.
    pub fn title(self) -> &'static str {
        match self {
            Column::Id => "ID",
            Column::PropertyId => "Property ID",
            Column::Type => "Type",
            Column::Issue => "Issue",
            Column::Priority => "Priority",
            Column::Status => "Status",
            Column::AssignedTo => "Assigned To",
            Column::MaintenanceCategory => "Maintenance Category",
            Column::SlaDueAt => "SLA Due At",
            Column::Source => "Source",
        }
    }

    /// Field name used in diagnostics and in the outbound payload.
    pub fn field_name(self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::PropertyId => "property_id",
            Column::Type => "type",
            Column::Issue => "issue",
            Column::Priority => "priority",
            Column::Status => "status",
            Column::AssignedTo => "assigned_to",
            Column::MaintenanceCategory => "maintenance_category",
            Column::SlaDueAt => "sla_due_at",
            Column::Source => "source",
        }
    }
}

/// Header row written to an empty sheet.
pub fn header_cells() -> Vec<String> {
    Column::ALL.iter().map(|c| c.title().to_string()).collect()
}

/// One ticket candidate as it appears in the sheet, with every cell kept as
/// raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRow {
    pub id: String,
    pub property_id: String,
    pub ticket_type: String,
    pub issue: String,
    pub priority: String,
    pub status: String,
    pub assigned_to: String,
    pub maintenance_category: String,
    pub sla_due_at: String,
    pub source: String,
}

impl SheetRow {
    /// Builds a row from positional cells. Short rows are padded with empty
    /// cells and anything past [`ROW_WIDTH`] is ignored.
    pub fn from_cells<S: AsRef<str>>(cells: &[S]) -> Self {
        let mut row = SheetRow::default();
        for column in Column::ALL {
            if let Some(value) = cells.get(column.index()) {
                *row.cell_mut(column) = value.as_ref().to_string();
            }
        }
        row
    }

    pub fn to_cells(&self) -> Vec<String> {
        Column::ALL.iter().map(|c| self.cell(*c).to_string()).collect()
    }

    pub fn cell(&self, column: Column) -> &str {
        match column {
            Column::Id => &self.id,
            Column::PropertyId => &self.property_id,
            Column::Type => &self.ticket_type,
            Column::Issue => &self.issue,
            Column::Priority => &self.priority,
            Column::Status => &self.status,
            Column::AssignedTo => &self.assigned_to,
            Column::MaintenanceCategory => &self.maintenance_category,
            Column::SlaDueAt => &self.sla_due_at,
            Column::Source => &self.source,
        }
    }

    pub fn cell_mut(&mut self, column: Column) -> &mut String {
        match column {
            Column::Id => &mut self.id,
            Column::PropertyId => &mut self.property_id,
            Column::Type => &mut self.ticket_type,
            Column::Issue => &mut self.issue,
            Column::Priority => &mut self.priority,
            Column::Status => &mut self.status,
            Column::AssignedTo => &mut self.assigned_to,
            Column::MaintenanceCategory => &mut self.maintenance_category,
            Column::SlaDueAt => &mut self.sla_due_at,
            Column::Source => &mut self.source,
        }
    }

    /// A row counts as synchronized as soon as its source cell holds anything
    /// other than whitespace.
    pub fn is_synced(&self) -> bool {
        !self.source.trim().is_empty()
    }
}
