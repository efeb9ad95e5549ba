// ==========================================
// 交期报价系统 - API 层
// ==========================================
// 职责: 业务接口 (传输无关)
// ==========================================

pub mod dto;
pub mod error;
pub mod leadtime_api;
pub mod leadtime_api_impl;

// 重导出核心类型
pub use dto::*;
pub use error::{ApiError, ApiResult};
pub use leadtime_api::LeadtimeApi;
pub use leadtime_api_impl::LeadtimeApiImpl;
