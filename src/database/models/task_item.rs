use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::filter::{EntityFilter, Listable, SortDirection, SortKey, SqlParam};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TaskItem {
    pub id: i64,
    pub tenant_id: i64,
    pub state: i16,
    pub due_date: DateTime<Utc>,
    pub type_of: i16,
    pub customer_id: Option<i64>,
    pub associate_id: Option<i64>,
    pub is_closed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskItemSort {
    Id,
    DueDate,
}

impl SortKey for TaskItemSort {
    fn column(self) -> &'static str {
        match self {
            TaskItemSort::Id => "id",
            TaskItemSort::DueDate => "due_date",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "id" => Some(TaskItemSort::Id),
            "due_date" => Some(TaskItemSort::DueDate),
            _ => None,
        }
    }
}

impl Listable for TaskItem {
    type Sort = TaskItemSort;

    const NAME: &'static str = "tasks";
    const TABLE: &'static str = "task_items";
    const COLUMNS: &'static str = "id, tenant_id, state, due_date, type_of, customer_id, associate_id, is_closed";
    const FOREIGN_KEYS: &'static [&'static str] = &["customer_id", "associate_id"];
    const DEFAULT_SORT: TaskItemSort = TaskItemSort::DueDate;
    const DEFAULT_ORDER: SortDirection = SortDirection::Desc;
    const DEFAULT_STATES: &'static [i16] = &[1];

    fn id(&self) -> i64 {
        self.id
    }

    /// Task listings only ever show open tasks.
    fn scope(filter: &mut EntityFilter<Self>) {
        filter.equals.push(("is_closed", SqlParam::Bool(false)));
    }
}
