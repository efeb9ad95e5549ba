// ==========================================
// 交期报价系统 - 数据库工具模块
// ==========================================
// 职责: 提供日集合查询所需的 IN 子句构建函数
// ==========================================

/// 构建 IN 子句的 SQL 片段
///
/// # 参数
/// - `column_name`: IN 子句应用的列名
/// - `count`: 占位符个数
///
/// # 返回
/// - 生成的 IN 子句片段,例如: "day IN (?, ?, ?)"
/// - count 为 0 时返回永假条件 "1 = 0",确保 SQL 语法正确
///
/// # 示例
/// ```
/// use leadtime_engine::repository::sql_utils::build_in_clause;
///
/// assert_eq!(build_in_clause("day", 2), "day IN (?, ?)");
/// assert_eq!(build_in_clause("day", 0), "1 = 0");
/// ```
pub fn build_in_clause(column_name: &str, count: usize) -> String {
    if count == 0 {
        return "1 = 0".to_string();
    }

    let placeholders = vec!["?"; count].join(", ");
    format!("{} IN ({})", column_name, placeholders)
}
