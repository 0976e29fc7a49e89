use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Status filter applied after search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
    Overdue,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Active,
        StatusFilter::Completed,
        StatusFilter::Overdue,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Completed => "completed",
            StatusFilter::Overdue => "overdue",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Active => "Active",
            StatusFilter::Completed => "Completed",
            StatusFilter::Overdue => "Overdue",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" | "open" => Ok(StatusFilter::Active),
            "completed" | "done" => Ok(StatusFilter::Completed),
            "overdue" => Ok(StatusFilter::Overdue),
            other => Err(format!(
                "unknown filter '{}' (all, active, completed, overdue)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortCriteria {
    Title,
    Priority,
    CreatedAt,
    DueDate,
}

impl SortCriteria {
    pub fn as_str(self) -> &'static str {
        match self {
            SortCriteria::Title => "title",
            SortCriteria::Priority => "priority",
            SortCriteria::CreatedAt => "createdAt",
            SortCriteria::DueDate => "dueDate",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// A sort selection, written `criteria-order` (e.g. `priority-desc`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortMode {
    pub criteria: SortCriteria,
    pub order: SortOrder,
}

impl SortMode {
    /// The modes offered by the list view's sort selector, in cycle order
    pub const CYCLE: [SortMode; 8] = [
        SortMode::new(SortCriteria::CreatedAt, SortOrder::Desc),
        SortMode::new(SortCriteria::CreatedAt, SortOrder::Asc),
        SortMode::new(SortCriteria::Title, SortOrder::Asc),
        SortMode::new(SortCriteria::Title, SortOrder::Desc),
        SortMode::new(SortCriteria::Priority, SortOrder::Desc),
        SortMode::new(SortCriteria::Priority, SortOrder::Asc),
        SortMode::new(SortCriteria::DueDate, SortOrder::Asc),
        SortMode::new(SortCriteria::DueDate, SortOrder::Desc),
    ];

    pub const fn new(criteria: SortCriteria, order: SortOrder) -> Self {
        SortMode { criteria, order }
    }

    /// Next mode in the selector cycle
    pub fn next(self) -> SortMode {
        let idx = Self::CYCLE.iter().position(|m| *m == self).unwrap_or(0);
        Self::CYCLE[(idx + 1) % Self::CYCLE.len()]
    }

    /// Human-readable label for the status row
    pub fn label(self) -> &'static str {
        match (self.criteria, self.order) {
            (SortCriteria::CreatedAt, SortOrder::Desc) => "newest first",
            (SortCriteria::CreatedAt, SortOrder::Asc) => "oldest first",
            (SortCriteria::Title, SortOrder::Asc) => "title A-Z",
            (SortCriteria::Title, SortOrder::Desc) => "title Z-A",
            (SortCriteria::Priority, SortOrder::Desc) => "priority high-low",
            (SortCriteria::Priority, SortOrder::Asc) => "priority low-high",
            (SortCriteria::DueDate, SortOrder::Asc) => "due soonest",
            (SortCriteria::DueDate, SortOrder::Desc) => "due latest",
        }
    }
}

impl Default for SortMode {
    fn default() -> Self {
        SortMode::CYCLE[0]
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let order = match self.order {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        };
        write!(f, "{}-{}", self.criteria.as_str(), order)
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (criteria, order) = match s.rsplit_once('-') {
            Some((c, o)) => (c, Some(o)),
            None => (s, None),
        };
        let criteria = match criteria.to_ascii_lowercase().as_str() {
            "title" => SortCriteria::Title,
            "priority" => SortCriteria::Priority,
            "createdat" | "created" => SortCriteria::CreatedAt,
            "duedate" | "due" => SortCriteria::DueDate,
            other => {
                return Err(format!(
                    "unknown sort criteria '{}' (title, priority, createdAt, dueDate)",
                    other
                ));
            }
        };
        let order = match order.map(|o| o.to_ascii_lowercase()) {
            None => SortOrder::Asc,
            Some(o) if o == "asc" => SortOrder::Asc,
            Some(o) if o == "desc" => SortOrder::Desc,
            Some(o) => return Err(format!("unknown sort order '{}' (asc, desc)", o)),
        };
        Ok(SortMode { criteria, order })
    }
}
