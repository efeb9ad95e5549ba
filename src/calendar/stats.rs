// ==========================================
// 交期报价系统 - 利用率统计工具
// ==========================================
// 职责: 中位数与最近秩百分位 (P95/P99)
// 红线: 百分位索引公式 ceil(n*p)-1 直接参与定价判定,
//       必须保持逐位一致,不做线性插值
// ==========================================

/// 最近秩百分位
///
/// 规则:
/// - 空样本 -> 0
/// - 单元素 -> 该元素
/// - 其余: 升序排序后取 index = ceil(n * p) - 1,截断到 [0, n-1]
///
/// 返回值恒为样本成员 (n > 0 时)
fn percentile_nearest_rank(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    if values.len() == 1 {
        return values[0];
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let index = ((n as f64 * p).ceil() as usize)
        .saturating_sub(1)
        .min(n - 1);
    sorted[index]
}

/// P95 (95 百分位)
pub fn p95(values: &[f64]) -> f64 {
    percentile_nearest_rank(values, 0.95)
}

/// P99 (99 百分位)
pub fn p99(values: &[f64]) -> f64 {
    percentile_nearest_rank(values, 0.99)
}

/// 中位数
///
/// 偶数个样本取中间两数平均,奇数个取正中
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    if values.len() == 1 {
        return values[0];
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_p95_empty_is_zero() {
        assert_eq!(p95(&[]), 0.0);
    }

    #[test]
    fn test_p95_singleton() {
        assert_eq!(p95(&[0.42]), 0.42);
    }

    #[test]
    fn test_p95_is_sample_member() {
        // 最近秩选择恒为样本成员
        let samples = vec![0.1, 0.9, 0.3, 0.7, 0.5, 0.2, 0.8];
        let value = p95(&samples);
        assert!(samples.contains(&value));
    }

    #[test]
    fn test_p95_small_window_is_max() {
        // n < 20 时 ceil(n*0.95)-1 = n-1,即窗口最大值
        assert_eq!(p95(&[0.2, 0.97, 0.4]), 0.97);
        assert_eq!(p95(&[0.0, 0.0, 0.0, 0.0, 0.97]), 0.97);
    }

    #[test]
    fn test_p95_rank_index() {
        // n=20: index = ceil(19)-1 = 18,第二大的值
        let mut samples: Vec<f64> = (1..=20).map(|i| i as f64 / 20.0).collect();
        samples.reverse();
        assert_eq!(p95(&samples), 19.0 / 20.0);
    }

    #[test]
    fn test_p99() {
        assert_eq!(p99(&[]), 0.0);
        assert_eq!(p99(&[0.5]), 0.5);
        assert_eq!(p99(&[0.1, 0.2, 0.3]), 0.3);
    }

    #[test]
    fn test_median_odd() {
        assert_eq!(median(&[0.3, 0.1, 0.2]), 0.2);
    }

    #[test]
    fn test_median_even() {
        assert_eq!(median(&[0.4, 0.1, 0.2, 0.3]), 0.25);
    }

    #[test]
    fn test_median_edge() {
        assert_eq!(median(&[]), 0.0);
        assert_eq!(median(&[0.7]), 0.7);
    }
}
