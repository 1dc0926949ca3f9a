use serde::Serialize;

/// Bucket a schedule falls into relative to a reference day.
///
/// `Paused` schedules never land in a due bucket: they only show up when
/// the list is unfiltered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DueStatus {
    Overdue,
    DueToday,
    DueThisWeek,
    Scheduled,
    Paused,
}

impl DueStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DueStatus::Overdue => "Overdue",
            DueStatus::DueToday => "Due today",
            DueStatus::DueThisWeek => "This week",
            DueStatus::Scheduled => "Scheduled",
            DueStatus::Paused => "Paused",
        }
    }
}

impl std::fmt::Display for DueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
