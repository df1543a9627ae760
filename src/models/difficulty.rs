/// 难度枚举
///
/// 只是原样传给 LLM 的标签，内部没有任何基于难度的逻辑。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// 获取写入提示词的标签
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// 尝试从字符串解析难度（忽略大小写，支持中文）
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "简单" => Some(Difficulty::Easy),
            "medium" | "中等" => Some(Difficulty::Medium),
            "hard" | "困难" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_ignores_case() {
        assert_eq!(Difficulty::from_str("EASY"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_str(" hard "), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("中等"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("extreme"), None);
    }

    #[test]
    fn test_label_is_forwarded_verbatim() {
        assert_eq!(Difficulty::Medium.to_string(), "Medium");
    }
}
