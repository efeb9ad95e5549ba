// ==========================================
// 交期报价系统 - 档位决策引擎
// ==========================================
// 职责: 单档位的完整决策链:
//       候选窗口 -> P95 利用率 -> 封锁否决 -> 高利用率下架/人工解救
//       -> 加价/折扣/下限截断 -> 发货日期 -> 可解释注记
// 红线: 封锁检查先于一切利用率判断,且无条件获胜;
//       人工解救的档位必带加价
// ==========================================

use crate::calendar::{stats, BusinessCalendar};
use crate::domain::profile::LeadtimeProfile;
use crate::domain::quote::{LeadtimeOption, PricingHookInput};
use crate::domain::types::LeadClass;
use crate::engine::capacity_window::CapacityWindowAccessor;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::override_resolver::OverrideResolver;
use std::sync::Arc;

/// P95 利用率达到该值即应用加价系数
const SURGE_THRESHOLD: f64 = 0.85;

/// P95 利用率达到该值即视为不可用 (除非人工放行)
const UNAVAILABLE_THRESHOLD: f64 = 0.95;

/// 经济档折扣的 P95 利用率上限
const ECON_DISCOUNT_THRESHOLD: f64 = 0.5;

/// 经济档折扣比例 (基础价的 3%)
const ECON_DISCOUNT_RATE: f64 = 0.03;

/// 档位决策引擎
pub struct ClassPolicyEngine {
    /// 产能窗口访问器
    capacity: Arc<CapacityWindowAccessor>,
    /// 人工覆盖解析器
    overrides: Arc<OverrideResolver>,
}

impl ClassPolicyEngine {
    /// 创建新的档位决策引擎
    pub fn new(capacity: Arc<CapacityWindowAccessor>, overrides: Arc<OverrideResolver>) -> Self {
        Self { capacity, overrides }
    }

    /// 评估单个档位
    ///
    /// # 返回
    /// - Ok(Some(option)): 档位存活,带定价与注记
    /// - Ok(None): 档位被压制 (封锁覆盖,或高利用率且无人工放行)
    /// - Err: 档位内部 I/O 失败,由编排器记录并跳过该档位
    pub async fn evaluate_class(
        &self,
        cls: LeadClass,
        profile: &LeadtimeProfile,
        input: &PricingHookInput,
        calendar: &BusinessCalendar,
    ) -> EngineResult<Option<LeadtimeOption>> {
        let days = profile.class_days(cls);

        // 候选窗口: 从明天起的 days 个工作日
        let today = calendar.today();
        let window_start = today
            .succ_opt()
            .ok_or_else(|| EngineError::Internal("日期溢出".to_string()))?;
        let window_end = calendar.add_business_days(window_start, days.saturating_sub(1));
        let window = calendar.business_days_window(window_start, window_end);

        // 窗口产能与 P95 利用率 (无数据时为 0)
        let capacity_days = self
            .capacity
            .window(&input.org_id, &input.process, &input.machine_group, &window)
            .await?;
        let utilizations: Vec<f64> = capacity_days.iter().map(|d| d.utilization).collect();
        let p95 = stats::p95(&utilizations);

        // 封锁否决: 先于任何利用率判断,无条件获胜
        if self
            .overrides
            .is_blocked(&input.org_id, &input.process, cls, &window)?
        {
            tracing::debug!(
                "档位 {} 被人工覆盖封锁 org={}, process={}",
                cls,
                input.org_id,
                input.process
            );
            return Ok(None);
        }

        let mut surge_applied = p95 >= SURGE_THRESHOLD;
        let unavailable = p95 >= UNAVAILABLE_THRESHOLD;

        if unavailable {
            let unblocked = self
                .overrides
                .is_manually_unblocked(&input.org_id, &input.process, cls, &window)?;

            if !unblocked {
                tracing::debug!(
                    "档位 {} 因高利用率下架 p95={:.3}, org={}",
                    cls,
                    p95,
                    input.org_id
                );
                return Ok(None);
            }

            // 人工解救必带加价
            surge_applied = true;
        }

        // 价格调整
        let multiplier = if surge_applied {
            profile.surge_multiplier
        } else {
            1.0
        };
        let mut price_delta = input.base_price * (multiplier - 1.0);

        // 经济档低利用率折扣: 不叠加在正向加价上,
        // 有正向加价时以其绝对值为上限做替换
        if cls == LeadClass::Econ && p95 <= ECON_DISCOUNT_THRESHOLD {
            let discount = input.base_price * ECON_DISCOUNT_RATE;
            let prior = price_delta.abs();
            price_delta = if prior > 0.0 {
                -discount.min(prior)
            } else {
                -discount
            };
        }

        // 下限截断: 成交价不可为负
        price_delta = price_delta.max(-input.base_price);

        // 发货日期: 今天 + days 个工作日 (组织时区)
        let ship_date = BusinessCalendar::format_day(calendar.add_business_days(today, days));

        let reasons = explain_option(cls, p95, surge_applied, profile, &capacity_days);

        Ok(Some(LeadtimeOption {
            class: cls,
            days,
            ship_date,
            price_delta: round2(price_delta),
            surge_applied,
            utilization_window: round3(p95),
            reasons,
        }))
    }
}

/// 生成可解释注记 (固定顺序)
fn explain_option(
    cls: LeadClass,
    p95: f64,
    surge_applied: bool,
    profile: &LeadtimeProfile,
    capacity_days: &[crate::domain::capacity::CapacityDay],
) -> Vec<String> {
    let mut reasons = Vec::new();

    // 窗口为空,或全部是合成占位行 (台账无一行真实数据),即视为无产能信号
    let no_signal = capacity_days
        .iter()
        .all(|d| d.capacity_minutes == 0 && d.booked_minutes == 0 && d.utilization == 0.0);
    if no_signal {
        reasons.push("无产能数据，按默认交期处理".to_string());
    }

    if p95 <= ECON_DISCOUNT_THRESHOLD && cls == LeadClass::Econ {
        reasons.push("窗口利用率低 - 已应用经济档折扣".to_string());
    }

    if surge_applied {
        reasons.push(format!(
            "P95 利用率 >= 85% => 应用加价系数 {}x",
            profile.surge_multiplier
        ));
    }

    if p95 >= UNAVAILABLE_THRESHOLD {
        reasons.push("高利用率 (>=95%) - 该档位存在下架风险".to_string());
    }

    reasons
}

/// 保留 2 位小数 (价格)
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 保留 3 位小数 (利用率)
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
