// ==========================================
// 交期报价系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 产能感知交期决策引擎 (上游: 定价编排器; 下游: 运营控制台)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 日历层 - 工作日运算与统计
pub mod calendar;

// 缓存层 - TTL 键值缓存
pub mod cache;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 决策策略
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/schema）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 组合根
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    CapacityDay, CapacityLedgerEntry, CapacityUpsertEntry, LeadClass, LeadtimeOption,
    LeadtimeOverride, LeadtimeProfile, LeadtimeResponse, OverrideUpsert, PricingHookInput,
    ProfileUpdate,
};

// 日历
pub use calendar::BusinessCalendar;

// 缓存
pub use cache::{CacheStore, MemoryCacheStore};

// 引擎
pub use engine::{
    CapacityWindowAccessor, ClassPolicyEngine, EngineError, LeadtimeOrchestrator,
    OverrideResolver, ProfileAccessor,
};

// 配置
pub use config::EngineConfig;

// API
pub use api::{LeadtimeApi, LeadtimeApiImpl};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "交期报价系统";
