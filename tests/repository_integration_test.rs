// ==========================================
// 仓储层集成测试
// ==========================================
// 职责: 验证仓储在真实文件数据库上的读写口径
// 测试范围: 档位配置部分更新、覆盖自然键、产能区间读取、运营 API 路径
// ==========================================

// 导入测试辅助模块
#[path = "test_helpers.rs"]
mod test_helpers;

#[cfg(test)]
mod repository_integration_test {
    use chrono::NaiveDate;
    use leadtime_engine::api::{
        GetCapacityWindowRequest, GetProfileRequest, LeadtimeApi, ListOverridesRequest,
        UpdateProfileRequest,
    };
    use leadtime_engine::app::AppState;
    use leadtime_engine::domain::types::LeadClass;
    use tempfile::NamedTempFile;

    use crate::test_helpers::{create_test_db, seed_capacity, seed_org, seed_profile};

    const ORG: &str = "ORG001";
    const PROCESS: &str = "cnc_milling";
    const GROUP: &str = "cnc-3axis";

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn setup_env() -> (NamedTempFile, AppState) {
        let (temp_file, db_path) = create_test_db().unwrap();
        {
            let conn = leadtime_engine::db::open_sqlite_connection(&db_path).unwrap();
            seed_org(&conn, ORG, "UTC", None);
            seed_profile(&conn, ORG, PROCESS, 10, 5, 2, 1.2);
        }
        let state = AppState::new(db_path).unwrap();
        (temp_file, state)
    }

    // ==========================================
    // 测试1: 档位配置查询与部分更新
    // ==========================================

    #[tokio::test]
    async fn test_profile_read_and_partial_update() {
        let (_temp, state) = setup_env();

        let profile = state
            .leadtime_api
            .get_profile(GetProfileRequest {
                org_id: ORG.to_string(),
                process: PROCESS.to_string(),
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.std_days, 5);

        // 只更新 surge_multiplier
        let updated = state
            .leadtime_api
            .update_profile(
                ORG,
                PROCESS,
                UpdateProfileRequest {
                    surge_multiplier: Some(1.35),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated);

        let profile = state
            .leadtime_api
            .get_profile(GetProfileRequest {
                org_id: ORG.to_string(),
                process: PROCESS.to_string(),
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.surge_multiplier, 1.35);
        assert_eq!(profile.std_days, 5);

        // 全空更新: 无操作
        let updated = state
            .leadtime_api
            .update_profile(ORG, PROCESS, UpdateProfileRequest::default())
            .await
            .unwrap();
        assert!(!updated);

        // 不存在的 (组织, 工艺): false
        let updated = state
            .leadtime_api
            .update_profile(
                "ORG404",
                PROCESS,
                UpdateProfileRequest {
                    std_days: Some(6),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(!updated);
    }

    // ==========================================
    // 测试2: 产能区间读取 (运营路径)
    // ==========================================

    #[tokio::test]
    async fn test_capacity_window_range_read() {
        let (_temp, state) = setup_env();

        {
            let conn = state.conn.lock().unwrap();
            seed_capacity(&conn, ORG, PROCESS, GROUP, day("2026-03-03"), 480, 240);
            seed_capacity(&conn, ORG, PROCESS, GROUP, day("2026-03-05"), 480, 960);
            // 区间外
            seed_capacity(&conn, ORG, PROCESS, GROUP, day("2026-04-01"), 480, 0);
        }

        let rows = state
            .leadtime_api
            .get_capacity_window(GetCapacityWindowRequest {
                org_id: ORG.to_string(),
                process: PROCESS.to_string(),
                machine_group: GROUP.to_string(),
                from: "2026-03-01".to_string(),
                to: "2026-03-31".to_string(),
            })
            .await
            .unwrap();

        // 区间读取不合成缺失日期
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].day, day("2026-03-03"));
        assert_eq!(rows[0].utilization, 0.5);
        // 超订截断到 1.0
        assert_eq!(rows[1].utilization, 1.0);
    }

    // ==========================================
    // 测试3: 覆盖写入与区间列表
    // ==========================================

    #[tokio::test]
    async fn test_override_upsert_and_list() {
        let (_temp, state) = setup_env();

        let request = |day: &str, class: &str, blocked: bool| {
            leadtime_engine::api::UpsertOverrideRequest {
                org_id: ORG.to_string(),
                process: PROCESS.to_string(),
                day: day.to_string(),
                class: class.to_string(),
                blocked,
                reason: None,
            }
        };

        let id1 = state
            .leadtime_api
            .upsert_override(request("2026-03-03", "express", true), Some("ops_a".to_string()))
            .await
            .unwrap();

        // 同自然键重写: 后写覆盖,ID 不变
        let id2 = state
            .leadtime_api
            .upsert_override(request("2026-03-03", "express", false), Some("ops_b".to_string()))
            .await
            .unwrap();
        assert_eq!(id1, id2);

        state
            .leadtime_api
            .upsert_override(request("2026-03-04", "econ", true), None)
            .await
            .unwrap();

        let rows = state
            .leadtime_api
            .list_overrides(ListOverridesRequest {
                org_id: ORG.to_string(),
                process: PROCESS.to_string(),
                from: "2026-03-01".to_string(),
                to: "2026-03-31".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].day, day("2026-03-03"));
        assert_eq!(rows[0].class, LeadClass::Express);
        assert!(!rows[0].blocked); // 后写覆盖生效
        assert_eq!(rows[0].created_by.as_deref(), Some("ops_b"));
        assert_eq!(rows[1].day, day("2026-03-04"));
        assert_eq!(rows[1].class, LeadClass::Econ);
        assert!(rows[1].blocked);
    }

    // ==========================================
    // 测试4: 无效输入在边界被拒绝
    // ==========================================

    #[tokio::test]
    async fn test_boundary_validation_rejects_bad_requests() {
        let (_temp, state) = setup_env();

        // 非法日期
        let result = state
            .leadtime_api
            .get_capacity_window(GetCapacityWindowRequest {
                org_id: ORG.to_string(),
                process: PROCESS.to_string(),
                machine_group: GROUP.to_string(),
                from: "bad-date".to_string(),
                to: "2026-03-31".to_string(),
            })
            .await;
        assert!(result.is_err());

        // 非法档位
        let result = state
            .leadtime_api
            .upsert_override(
                leadtime_engine::api::UpsertOverrideRequest {
                    org_id: ORG.to_string(),
                    process: PROCESS.to_string(),
                    day: "2026-03-03".to_string(),
                    class: "overnight".to_string(),
                    blocked: true,
                    reason: None,
                },
                None,
            )
            .await;
        assert!(result.is_err());

        // 非法加价系数
        let result = state
            .leadtime_api
            .update_profile(
                ORG,
                PROCESS,
                UpdateProfileRequest {
                    surge_multiplier: Some(0.5),
                    ..Default::default()
                },
            )
            .await;
        assert!(result.is_err());
    }
}
