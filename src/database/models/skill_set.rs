use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::filter::{Listable, SortKey};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SkillSet {
    pub id: i64,
    pub tenant_id: i64,
    pub category: String,
    pub sub_category: String,
    pub state: i16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillSetSort {
    Id,
    Category,
    SubCategory,
}

impl SortKey for SkillSetSort {
    fn column(self) -> &'static str {
        match self {
            SkillSetSort::Id => "id",
            SkillSetSort::Category => "category",
            SkillSetSort::SubCategory => "sub_category",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "id" => Some(SkillSetSort::Id),
            "category" => Some(SkillSetSort::Category),
            "sub_category" => Some(SkillSetSort::SubCategory),
            _ => None,
        }
    }
}

impl Listable for SkillSet {
    type Sort = SkillSetSort;

    const NAME: &'static str = "skill sets";
    const TABLE: &'static str = "skill_sets";
    const COLUMNS: &'static str = "id, tenant_id, category, sub_category, state";
    const SEARCH_COLUMNS: &'static [&'static str] = &["category", "sub_category"];
    const DEFAULT_SORT: SkillSetSort = SkillSetSort::Category;

    fn id(&self) -> i64 {
        self.id
    }
}
