// ==========================================
// 交期报价系统 - 演示入口
// ==========================================
// 技术栈: Rust + SQLite
// 用途: 初始化引擎,写入一份演示数据,计算一次交期报价
// ==========================================

use leadtime_engine::api::{ComputeLeadtimeRequest, LeadtimeApi};
use leadtime_engine::app::{get_default_db_path, AppState};
use leadtime_engine::logging;

#[tokio::main]
async fn main() {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 产能感知交期决策引擎", leadtime_engine::APP_NAME);
    tracing::info!("系统版本: {}", leadtime_engine::VERSION);
    tracing::info!("==================================================");

    // 获取数据库路径
    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);

    // 创建AppState
    tracing::info!("正在初始化AppState...");
    let state = match AppState::new(db_path) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("无法初始化AppState: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("AppState初始化成功");

    // 写入演示数据 (幂等)
    if let Err(e) = seed_demo_data(&state) {
        tracing::error!("写入演示数据失败: {}", e);
        std::process::exit(1);
    }

    // 计算一次交期报价
    let request = ComputeLeadtimeRequest {
        org_id: "demo-org".to_string(),
        process: "cnc_milling".to_string(),
        machine_group: "cnc-3axis".to_string(),
        base_price: 1000.0,
        estimated_minutes: 120.0,
        desired_class: None,
    };

    match state.leadtime_api.compute_options(request).await {
        Ok(response) => {
            tracing::info!("交期选项计算完成: {} 个选项", response.options.len());
            match serde_json::to_string_pretty(&response) {
                Ok(json) => println!("{}", json),
                Err(e) => tracing::error!("序列化响应失败: {}", e),
            }
        }
        Err(e) => {
            tracing::error!("交期报价失败: {}", e);
            std::process::exit(1);
        }
    }
}

/// 写入演示组织与档位配置 (INSERT OR IGNORE,重复运行安全)
fn seed_demo_data(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let conn = state
        .conn
        .lock()
        .map_err(|e| format!("锁获取失败: {}", e))?;

    conn.execute(
        "INSERT OR IGNORE INTO org (org_id, org_name, timezone) \
         VALUES ('demo-org', '演示组织', 'Asia/Shanghai')",
        [],
    )?;
    conn.execute(
        "INSERT OR IGNORE INTO leadtime_profile \
         (id, org_id, process, econ_days, std_days, express_days, surge_multiplier) \
         VALUES ('demo-profile', 'demo-org', 'cnc_milling', 10, 5, 2, 1.2)",
        [],
    )?;

    Ok(())
}
