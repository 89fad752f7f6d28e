use crate::domain::model::EmployeeRecord;

pub const DEFAULT_TOP_EARNERS: usize = 10;

/// 姓名包含子字串（不分大小寫）；空字串符合全部
pub fn search_by_name(records: Vec<EmployeeRecord>, fragment: &str) -> Vec<EmployeeRecord> {
    if fragment.is_empty() {
        return records;
    }
    let needle = fragment.to_lowercase();
    records
        .into_iter()
        .filter(|record| {
            record
                .name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .collect()
}

/// 沒有任何薪資時回傳 0，與真正的零薪資無法區分
pub fn highest_salary(records: &[EmployeeRecord]) -> u64 {
    records
        .iter()
        .filter_map(|record| record.salary)
        .max()
        .unwrap_or(0)
}

pub fn top_earning_names(records: Vec<EmployeeRecord>, limit: usize) -> Vec<String> {
    let mut earners: Vec<(String, u64)> = records
        .into_iter()
        .filter_map(|record| Some((record.name?, record.salary?)))
        .collect();

    // sort_by 為穩定排序，同薪資保留上游順序
    earners.sort_by(|a, b| b.1.cmp(&a.1));
    earners.into_iter().take(limit).map(|(name, _)| name).collect()
}
