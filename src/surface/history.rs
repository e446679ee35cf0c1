//! 前进/后退历史模型
//! 导航按钮可用态 = 历史位置的重算结果，与本次加载成败无关

/// 前进/后退历史（当前位置 + 条目列表）
#[derive(Debug, Clone, Default)]
pub struct NavigationHistory {
    entries: Vec<String>,
    // 当前条目下标；entries为空时无意义
    current: usize,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 是否存在上一条目
    pub fn can_go_back(&self) -> bool {
        self.current > 0 && !self.entries.is_empty()
    }

    /// 是否存在下一条目
    pub fn can_go_forward(&self) -> bool {
        !self.entries.is_empty() && self.current + 1 < self.entries.len()
    }

    /// 记录一次成功加载：截断前向历史并追加新条目
    pub fn record_load(&mut self, url: String) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.current + 1);
        }
        self.entries.push(url);
        self.current = self.entries.len() - 1;
    }

    /// 记录一次失败加载：历史不变，仅触发按钮态重算
    pub fn record_load_failure(&mut self) {}

    /// 后退，返回目标条目
    pub fn go_back(&mut self) -> Option<&str> {
        if !self.can_go_back() {
            return None;
        }
        self.current -= 1;
        Some(self.entries[self.current].as_str())
    }

    /// 前进，返回目标条目
    pub fn go_forward(&mut self) -> Option<&str> {
        if !self.can_go_forward() {
            return None;
        }
        self.current += 1;
        Some(self.entries[self.current].as_str())
    }

    /// 当前条目
    pub fn current_url(&self) -> Option<&str> {
        self.entries.get(self.current).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history_disables_both_buttons() {
        let history = NavigationHistory::new();
        assert!(!history.can_go_back());
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_button_state_tracks_history_position() {
        let mut history = NavigationHistory::new();
        history.record_load("https://a.example".to_string());
        assert!(!history.can_go_back());
        assert!(!history.can_go_forward());

        history.record_load("https://b.example".to_string());
        assert!(history.can_go_back());
        assert!(!history.can_go_forward());

        assert_eq!(history.go_back(), Some("https://a.example"));
        assert!(!history.can_go_back());
        assert!(history.can_go_forward());

        assert_eq!(history.go_forward(), Some("https://b.example"));
        assert!(history.can_go_back());
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_failed_load_keeps_button_state() {
        let mut history = NavigationHistory::new();
        history.record_load("https://a.example".to_string());
        history.record_load("https://b.example".to_string());

        // 加载失败：按钮态依据当前历史重算，不依据加载结果
        history.record_load_failure();
        assert!(history.can_go_back());
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_new_load_truncates_forward_entries() {
        let mut history = NavigationHistory::new();
        history.record_load("https://a.example".to_string());
        history.record_load("https://b.example".to_string());
        history.go_back();

        history.record_load("https://c.example".to_string());
        assert!(!history.can_go_forward());
        assert_eq!(history.current_url(), Some("https://c.example"));
        assert_eq!(history.go_back(), Some("https://a.example"));
    }
}
