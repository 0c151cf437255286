pub mod associate;
pub mod customer;
pub mod skill_set;
pub mod staff;
pub mod task_item;
pub mod tenant;
pub mod user;
pub mod work_order;

pub use associate::Associate;
pub use customer::Customer;
pub use skill_set::SkillSet;
pub use staff::Staff;
pub use task_item::TaskItem;
pub use tenant::Tenant;
pub use user::{NewUser, User};
pub use work_order::WorkOrder;
