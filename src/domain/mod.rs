// ==========================================
// 交期报价系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、业务规则接口
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod capacity;
pub mod overrides;
pub mod profile;
pub mod quote;
pub mod types;

// 重导出核心类型
pub use capacity::{
    compute_utilization, CapacityDay, CapacityLedgerEntry, CapacityUpsertEntry,
};
pub use overrides::{LeadtimeOverride, OverrideUpsert};
pub use profile::{LeadtimeProfile, ProfileUpdate};
pub use quote::{LeadtimeOption, LeadtimeResponse, PricingHookInput};
pub use types::LeadClass;
