// ==========================================
// 交期报价系统 - 交期编排器
// ==========================================
// 职责: 对三个档位运行决策引擎,容忍单档失败,按天数排序,
//       整体失败时降级为固定的标准档响应
// 红线: 本引擎任何错误都不得以异常形式到达调用方;
//       最坏可观测行为是降级响应
// ==========================================

use crate::calendar::BusinessCalendar;
use crate::cache::CacheStore;
use crate::config::EngineConfig;
use crate::domain::quote::{LeadtimeOption, LeadtimeResponse, PricingHookInput};
use crate::domain::types::LeadClass;
use crate::engine::cache_keys;
use crate::engine::class_policy::ClassPolicyEngine;
use crate::engine::error::EngineResult;
use crate::engine::profile_accessor::ProfileAccessor;
use std::sync::Arc;
use std::time::Instant;

/// 交期编排器
pub struct LeadtimeOrchestrator {
    /// 档位配置访问器
    profiles: Arc<ProfileAccessor>,
    /// 档位决策引擎
    policy: Arc<ClassPolicyEngine>,
    /// 缓存客户端 (失效操作用,显式注入)
    cache: Arc<dyn CacheStore>,
    /// 引擎配置
    config: EngineConfig,
}

impl LeadtimeOrchestrator {
    /// 创建新的交期编排器
    pub fn new(
        profiles: Arc<ProfileAccessor>,
        policy: Arc<ClassPolicyEngine>,
        cache: Arc<dyn CacheStore>,
        config: EngineConfig,
    ) -> Self {
        Self {
            profiles,
            policy,
            cache,
            config,
        }
    }

    /// 计算交期选项 (对外主入口)
    ///
    /// 永不返回错误: 整体失败收敛为降级响应
    pub async fn compute_options(&self, input: &PricingHookInput) -> LeadtimeResponse {
        let started = Instant::now();

        match self.try_compute(input).await {
            Ok(response) => {
                tracing::info!(
                    "计算完成 {} 个交期选项,耗时 {}ms, org={}, process={}",
                    response.options.len(),
                    started.elapsed().as_millis(),
                    input.org_id,
                    input.process
                );
                response
            }
            Err(e) => {
                tracing::error!(
                    "交期选项计算失败,返回降级响应 org={}, process={}: {}",
                    input.org_id,
                    input.process,
                    e
                );
                self.fallback_response(input.base_price)
            }
        }
    }

    async fn try_compute(&self, input: &PricingHookInput) -> EngineResult<LeadtimeResponse> {
        let timezone = self
            .profiles
            .org_timezone(&input.org_id, &self.config.default_timezone)
            .await?;

        let Some(profile) = self.profiles.profile(&input.org_id, &input.process).await? else {
            tracing::warn!(
                "未找到交期档位配置 org={}, process={}",
                input.org_id,
                input.process
            );
            return Ok(self.fallback_response(input.base_price));
        };

        let holidays = self.profiles.org_holidays(&input.org_id).await?;
        let calendar = BusinessCalendar::new(&timezone, holidays);

        let mut options = Vec::new();
        for cls in LeadClass::ALL {
            match self
                .policy
                .evaluate_class(cls, &profile, input, &calendar)
                .await
            {
                Ok(Some(option)) => options.push(option),
                Ok(None) => {}
                Err(e) => {
                    // 单档失败只丢该档,其余档位继续
                    tracing::error!("档位 {} 计算失败,已跳过: {}", cls, e);
                }
            }
        }

        // 档位评估顺序无依赖,输出统一按天数升序
        options.sort_by_key(|o| o.days);

        Ok(LeadtimeResponse {
            options,
            base_price: input.base_price,
            currency: self.config.fallback_currency.clone(),
        })
    }

    /// 降级响应: 单个标准档选项,零价格调整
    ///
    /// 天数与币种来自引擎配置 (默认 7 天 / INR)
    pub fn fallback_response(&self, base_price: f64) -> LeadtimeResponse {
        let calendar = BusinessCalendar::new(&self.config.default_timezone, Vec::new());
        let days = self.config.fallback_std_days;
        let ship_date =
            BusinessCalendar::format_day(calendar.add_business_days(calendar.today(), days));

        LeadtimeResponse {
            options: vec![LeadtimeOption {
                class: LeadClass::Standard,
                days,
                ship_date,
                price_delta: 0.0,
                surge_applied: false,
                utilization_window: 0.0,
                reasons: vec!["产能数据不可用，使用默认配置".to_string()],
            }],
            base_price,
            currency: self.config.fallback_currency.clone(),
        }
    }

    /// 失效产能窗口缓存 (写入后调用,相对写事务 fire-and-forget)
    ///
    /// machine_group 缺省时覆盖该 (组织, 工艺) 的全部机组
    pub async fn invalidate_capacity_cache(
        &self,
        org_id: &str,
        process: &str,
        machine_group: Option<&str>,
    ) {
        let pattern = cache_keys::window_pattern(org_id, process, machine_group);

        let keys = match self.cache.keys(&pattern).await {
            Ok(keys) => keys,
            Err(e) => {
                tracing::warn!("读取缓存键失败 pattern={}: {}", pattern, e);
                return;
            }
        };

        if keys.is_empty() {
            return;
        }

        let deletions = keys.iter().map(|key| self.cache.del(key));
        let results = futures::future::join_all(deletions).await;

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            tracing::warn!("缓存失效部分失败 {}/{}, pattern={}", failed, keys.len(), pattern);
        } else {
            tracing::debug!("已失效 {} 个缓存键, pattern={}", keys.len(), pattern);
        }
    }

    /// 失效档位配置缓存 (配置更新后调用)
    pub async fn invalidate_profile_cache(&self, org_id: &str, process: &str) {
        let key = cache_keys::profile_key(org_id, process);
        if let Err(e) = self.cache.del(&key).await {
            tracing::warn!("失效档位配置缓存失败 key={}: {}", key, e);
        } else {
            tracing::debug!("已失效档位配置缓存: {}", key);
        }
    }
}
