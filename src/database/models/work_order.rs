use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::filter::{Listable, SortDirection, SortKey};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkOrder {
    pub id: i64,
    pub tenant_id: i64,
    pub customer_id: i64,
    pub associate_id: Option<i64>,
    pub assignment_date: Option<DateTime<Utc>>,
    pub is_ongoing: bool,
    pub start_date: DateTime<Utc>,
    pub type_of: i16,
    pub state: i16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkOrderSort {
    Id,
    AssignmentDate,
    StartDate,
    LastModifiedTime,
}

impl SortKey for WorkOrderSort {
    fn column(self) -> &'static str {
        match self {
            WorkOrderSort::Id => "id",
            WorkOrderSort::AssignmentDate => "assignment_date",
            WorkOrderSort::StartDate => "start_date",
            WorkOrderSort::LastModifiedTime => "last_modified_time",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "id" => Some(WorkOrderSort::Id),
            "assignment_date" => Some(WorkOrderSort::AssignmentDate),
            "start_date" => Some(WorkOrderSort::StartDate),
            "last_modified_time" => Some(WorkOrderSort::LastModifiedTime),
            _ => None,
        }
    }
}

impl Listable for WorkOrder {
    type Sort = WorkOrderSort;

    const NAME: &'static str = "orders";
    const TABLE: &'static str = "work_orders";
    const COLUMNS: &'static str = "id, tenant_id, customer_id, associate_id, assignment_date, is_ongoing, start_date, type_of, state";
    const FOREIGN_KEYS: &'static [&'static str] = &["customer_id", "associate_id"];
    const DEFAULT_SORT: WorkOrderSort = WorkOrderSort::LastModifiedTime;
    const DEFAULT_ORDER: SortDirection = SortDirection::Desc;

    fn id(&self) -> i64 {
        self.id
    }
}
