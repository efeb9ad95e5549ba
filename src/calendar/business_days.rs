// ==========================================
// 交期报价系统 - 工作日日历
// ==========================================
// 职责: 时区感知的工作日运算 (加/数/窗口/成员判定)
// 红线: "一天"的边界以组织时区为准,不是 UTC;
//       周末/节假日判定用时区本地的星期数
// ==========================================

use chrono::{Datelike, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use std::collections::HashSet;

/// 默认周末 (周六/周日)
const DEFAULT_WEEKEND: [Weekday; 2] = [Weekday::Sat, Weekday::Sun];

// ==========================================
// BusinessCalendar - 工作日日历
// ==========================================
// 持有: 时区 + 节假日集合 + 周末星期集合
pub struct BusinessCalendar {
    timezone: Tz,
    holidays: HashSet<NaiveDate>,
    weekend_days: HashSet<Weekday>,
}

impl BusinessCalendar {
    /// 创建日历
    ///
    /// # 参数
    /// - timezone: IANA 时区名 (如 "Asia/Kolkata");无法解析时回退 UTC 并告警
    /// - holidays: 节假日列表 (组织本地日期)
    pub fn new(timezone: &str, holidays: Vec<NaiveDate>) -> Self {
        let tz = match timezone.parse::<Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                tracing::warn!("无法解析时区 {},回退到 UTC", timezone);
                Tz::UTC
            }
        };

        Self {
            timezone: tz,
            holidays: holidays.into_iter().collect(),
            weekend_days: DEFAULT_WEEKEND.into_iter().collect(),
        }
    }

    /// 覆盖周末星期集合 (默认周六/周日)
    pub fn with_weekend_days(mut self, weekend_days: &[Weekday]) -> Self {
        self.weekend_days = weekend_days.iter().copied().collect();
        self
    }

    /// 日历时区
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// 今天的本地日期 (按日历时区归一)
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }

    /// 判定是否工作日 (非周末且非节假日)
    pub fn is_business_day(&self, day: NaiveDate) -> bool {
        if self.weekend_days.contains(&day.weekday()) {
            return false;
        }
        !self.holidays.contains(&day)
    }

    /// 向后推进 n 个工作日
    ///
    /// 逐日推进,跳过周末与节假日; n=0 时原样返回
    /// (时区归一在调用方把时刻转换成本地日期时完成)
    pub fn add_business_days(&self, start: NaiveDate, n: u32) -> NaiveDate {
        let mut current = start;
        let mut added = 0;

        while added < n {
            let Some(next) = current.succ_opt() else {
                // 日期溢出 (公元 262143 年),就地返回
                return current;
            };
            current = next;

            if self.is_business_day(current) {
                added += 1;
            }
        }

        current
    }

    /// 统计 (start, end] 区间内的工作日数
    ///
    /// 不含 start 当天,逐日推进到 end
    pub fn count_business_days(&self, start: NaiveDate, end: NaiveDate) -> u32 {
        let mut current = start;
        let mut count = 0;

        while current < end {
            let Some(next) = current.succ_opt() else {
                break;
            };
            current = next;

            if self.is_business_day(current) {
                count += 1;
            }
        }

        count
    }

    /// 枚举 [start, end] 区间内的工作日 (两端含),升序
    pub fn business_days_window(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        let mut days = Vec::new();
        let mut current = start;

        while current <= end {
            if self.is_business_day(current) {
                days.push(current);
            }

            let Some(next) = current.succ_opt() else {
                break;
            };
            current = next;
        }

        days
    }

    /// 格式化为 YYYY-MM-DD
    pub fn format_day(day: NaiveDate) -> String {
        day.format("%Y-%m-%d").to_string()
    }
}

/// 指定时区的今日日期字符串 (YYYY-MM-DD)
pub fn today_in_timezone(timezone: &str) -> String {
    BusinessCalendar::format_day(BusinessCalendar::new(timezone, Vec::new()).today())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn utc_calendar() -> BusinessCalendar {
        BusinessCalendar::new("UTC", Vec::new())
    }

    #[test]
    fn test_add_zero_days_is_noop() {
        let cal = utc_calendar();
        // 2026-03-07 是周六: n=0 不推进,也不跳周末
        assert_eq!(cal.add_business_days(day("2026-03-07"), 0), day("2026-03-07"));
        assert_eq!(cal.add_business_days(day("2026-03-04"), 0), day("2026-03-04"));
    }

    #[test]
    fn test_add_skips_weekend() {
        let cal = utc_calendar();
        // 2026-03-06 是周五,+1 工作日落到周一
        assert_eq!(cal.add_business_days(day("2026-03-06"), 1), day("2026-03-09"));
        // +5 工作日 = 下周五
        assert_eq!(cal.add_business_days(day("2026-03-06"), 5), day("2026-03-13"));
    }

    #[test]
    fn test_add_skips_holiday() {
        let cal = BusinessCalendar::new("UTC", vec![day("2026-03-09")]);
        // 周一是节假日,+1 工作日落到周二
        assert_eq!(cal.add_business_days(day("2026-03-06"), 1), day("2026-03-10"));
    }

    #[test]
    fn test_add_never_lands_on_nonbusiness_day() {
        let cal = BusinessCalendar::new("UTC", vec![day("2026-03-11"), day("2026-03-17")]);
        let mut current = day("2026-03-02");
        for n in 1..30u32 {
            let landed = cal.add_business_days(current, n);
            assert!(cal.is_business_day(landed), "落点 {} 不是工作日", landed);
        }
        // 逐步推进与一次推进一致
        for _ in 0..10 {
            current = cal.add_business_days(current, 1);
            assert!(cal.is_business_day(current));
        }
    }

    #[test]
    fn test_count_business_days() {
        let cal = utc_calendar();
        // (周五, 下周五] = 5 个工作日
        assert_eq!(cal.count_business_days(day("2026-03-06"), day("2026-03-13")), 5);
        // 同日为 0
        assert_eq!(cal.count_business_days(day("2026-03-06"), day("2026-03-06")), 0);
        // 纯周末区间为 0
        assert_eq!(cal.count_business_days(day("2026-03-06"), day("2026-03-08")), 0);
    }

    #[test]
    fn test_business_days_window_inclusive() {
        let cal = utc_calendar();
        // 周四到下周一: 周四/周五/周一
        let window = cal.business_days_window(day("2026-03-05"), day("2026-03-09"));
        assert_eq!(
            window,
            vec![day("2026-03-05"), day("2026-03-06"), day("2026-03-09")]
        );
    }

    #[test]
    fn test_business_days_window_excludes_holiday() {
        let cal = BusinessCalendar::new("UTC", vec![day("2026-03-05")]);
        let window = cal.business_days_window(day("2026-03-05"), day("2026-03-09"));
        assert_eq!(window, vec![day("2026-03-06"), day("2026-03-09")]);
    }

    #[test]
    fn test_is_business_day() {
        let cal = BusinessCalendar::new("UTC", vec![day("2026-03-04")]);
        assert!(cal.is_business_day(day("2026-03-03")));
        assert!(!cal.is_business_day(day("2026-03-04"))); // 节假日
        assert!(!cal.is_business_day(day("2026-03-07"))); // 周六
        assert!(!cal.is_business_day(day("2026-03-08"))); // 周日
    }

    #[test]
    fn test_custom_weekend_days() {
        // 中东式周末 (周五/周六)
        let cal = utc_calendar().with_weekend_days(&[Weekday::Fri, Weekday::Sat]);
        assert!(!cal.is_business_day(day("2026-03-06"))); // 周五
        assert!(cal.is_business_day(day("2026-03-08"))); // 周日
    }

    #[test]
    fn test_invalid_timezone_falls_back_to_utc() {
        let cal = BusinessCalendar::new("Mars/Olympus", Vec::new());
        assert_eq!(cal.timezone(), Tz::UTC);
    }

    #[test]
    fn test_today_in_timezone_format() {
        let today = today_in_timezone("Asia/Shanghai");
        assert_eq!(today.len(), 10);
        assert!(NaiveDate::parse_from_str(&today, "%Y-%m-%d").is_ok());
    }
}
