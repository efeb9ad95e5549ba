// ==========================================
// 交期报价系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 说明: 组合根 - 连接/缓存/仓储/访问器/编排器在此装配,
//       全部依赖经构造函数显式注入
// ==========================================

use std::error::Error;
use std::sync::{Arc, Mutex};

use crate::api::LeadtimeApiImpl;
use crate::cache::{CacheStore, MemoryCacheStore};
use crate::config::EngineConfig;
use crate::engine::{
    CapacityWindowAccessor, ClassPolicyEngine, LeadtimeOrchestrator, OverrideResolver,
    ProfileAccessor,
};
use crate::repository::{
    CapacityRepository, OrgRepository, OverrideRepository, ProfileRepository,
};

/// 应用状态
///
/// 包含交期引擎全部组件实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 数据库连接 (共享)
    pub conn: Arc<Mutex<rusqlite::Connection>>,

    /// 缓存客户端 (共享)
    pub cache: Arc<dyn CacheStore>,

    /// 交期编排器
    pub orchestrator: Arc<LeadtimeOrchestrator>,

    /// 交期 API
    pub leadtime_api: Arc<LeadtimeApiImpl>,
}

impl AppState {
    /// 初始化应用状态 (打开数据库、建表、装配组件)
    pub fn new(db_path: String) -> Result<Self, Box<dyn Error>> {
        let conn = crate::db::open_sqlite_connection(&db_path)?;
        crate::db::init_leadtime_schema(&conn)?;
        let conn = Arc::new(Mutex::new(conn));

        let cache: Arc<dyn CacheStore> = Arc::new(MemoryCacheStore::new());
        let config = EngineConfig::load(&conn)?;

        // 仓储层
        let capacity_repo = Arc::new(CapacityRepository::new(conn.clone()));
        let override_repo = Arc::new(OverrideRepository::new(conn.clone()));
        let profile_repo = Arc::new(ProfileRepository::new(conn.clone()));
        let org_repo = Arc::new(OrgRepository::new(conn.clone()));

        // 引擎层
        let profiles = Arc::new(ProfileAccessor::new(
            profile_repo.clone(),
            org_repo,
            cache.clone(),
        ));
        let policy = Arc::new(ClassPolicyEngine::new(
            Arc::new(CapacityWindowAccessor::new(
                capacity_repo.clone(),
                cache.clone(),
            )),
            Arc::new(OverrideResolver::new(override_repo.clone())),
        ));
        let orchestrator = Arc::new(LeadtimeOrchestrator::new(
            profiles,
            policy,
            cache.clone(),
            config,
        ));

        // API 层
        let leadtime_api = Arc::new(LeadtimeApiImpl::new(
            orchestrator.clone(),
            capacity_repo,
            override_repo,
            profile_repo,
        ));

        Ok(Self {
            db_path,
            conn,
            cache,
            orchestrator,
            leadtime_api,
        })
    }
}

/// 默认数据库路径
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var("LEADTIME_ENGINE_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    // 使用用户数据目录;拿不到时回退当前目录
    let mut path = PathBuf::from("./leadtime_engine.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("leadtime-engine");
        std::fs::create_dir_all(&dir).ok();
        path = dir.join("leadtime_engine.db");
    }

    path.to_string_lossy().to_string()
}
