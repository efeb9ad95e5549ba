// ==========================================
// 交期报价系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 口径: 单档位计算中的任何 I/O 失败都收敛为 EngineError,
//       由编排器记录并丢弃该档位,绝不向调用方抛出
// ==========================================

use crate::cache::CacheError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("仓储访问失败: {0}")]
    Repository(#[from] RepositoryError),

    #[error("缓存访问失败: {0}")]
    Cache(#[from] CacheError),

    #[error("缓存数据编解码失败: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("内部错误: {0}")]
    Internal(String),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
