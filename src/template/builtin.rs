//! Checklist used when no catalog template can be resolved

use crate::catalog::ChecklistEntry;

/// (function, points) pairs of the built-in checklist
pub const BUILTIN_ITEMS: [(&str, &str); 6] = [
    ("功能完整性测试", "验证所有声明功能是否正常工作"),
    ("性能测试", "测试系统响应时间、吞吐量"),
    ("兼容性测试", "验证与主流环境的兼容性"),
    ("稳定性测试", "进行长时间运行测试"),
    ("用户界面测试", "检查UI布局、交互逻辑"),
    ("数据准确性测试", "验证输入输出数据的一致性"),
];

/// The built-in checklist as entries
pub fn builtin_entries() -> Vec<ChecklistEntry> {
    BUILTIN_ITEMS
        .iter()
        .map(|(function, points)| ChecklistEntry::new(*function, *points))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_six_entries() {
        let entries = builtin_entries();
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0].function, "功能完整性测试");
        assert_eq!(entries[5].points, "验证输入输出数据的一致性");
    }
}
