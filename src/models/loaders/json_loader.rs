use crate::models::PublicQuestion;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 把生成的测验写入 JSON 文件
pub async fn save_quiz(path: &Path, questions: &[PublicQuestion]) -> Result<()> {
    let json = serde_json::to_string_pretty(questions)?;
    fs::write(path, json)
        .await
        .with_context(|| format!("无法写入测验文件: {}", path.display()))?;
    Ok(())
}

/// 从 JSON 文件加载测验
pub async fn load_quiz(path: &Path) -> Result<Vec<PublicQuestion>> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取测验文件: {}", path.display()))?;
    let questions: Vec<PublicQuestion> = serde_json::from_str(&content)
        .with_context(|| format!("无法解析测验文件: {}", path.display()))?;
    Ok(questions)
}

/// 从 JSON 文件加载作答记录
///
/// 格式为 `[2, null, 0, ...]`，`null` 表示未作答。
pub async fn load_answers(path: &Path) -> Result<Vec<Option<usize>>> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取作答文件: {}", path.display()))?;
    let answers: Vec<Option<usize>> = serde_json::from_str(&content)
        .with_context(|| format!("无法解析作答文件: {}", path.display()))?;
    Ok(answers)
}
