use crate::config::Config;
use crate::models::{Difficulty, GenerationRequest};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

/// TOML 请求文件的结构
///
/// ```toml
/// source_file = "chapter1.txt"   # 或者直接写 source_text = "..."
/// difficulty = "Hard"
/// question_count = 23
/// ```
#[derive(Debug, Deserialize)]
struct RequestFile {
    source_text: Option<String>,
    source_file: Option<String>,
    difficulty: Option<String>,
    question_count: Option<usize>,
}

/// 从 TOML 文件加载出题请求
///
/// `source_file` 为相对路径时，相对于 TOML 文件所在目录解析。
pub async fn load_toml_to_request(toml_file_path: &Path, config: &Config) -> Result<GenerationRequest> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", toml_file_path.display()))?;

    let file: RequestFile = toml::from_str(&content)
        .with_context(|| format!("无法解析TOML文件: {}", toml_file_path.display()))?;

    let source_text = match (file.source_text, file.source_file) {
        (Some(text), _) => text,
        (None, Some(source_file)) => {
            let base = toml_file_path.parent().unwrap_or_else(|| Path::new("."));
            let source_path = base.join(source_file);
            fs::read_to_string(&source_path)
                .await
                .with_context(|| format!("无法读取文本文件: {}", source_path.display()))?
        }
        (None, None) => anyhow::bail!(
            "TOML文件缺少 source_text 或 source_file: {}",
            toml_file_path.display()
        ),
    };

    let difficulty = match file.difficulty {
        Some(label) => Difficulty::from_str(&label)
            .with_context(|| format!("无法解析难度: {}", label))?,
        None => config.default_difficulty,
    };

    Ok(GenerationRequest {
        source_text,
        difficulty,
        question_count: file.question_count.unwrap_or(config.default_question_count),
    })
}

/// 加载出题请求
///
/// `.toml` 文件按请求文件解析，其他文件整体作为原文，难度和题目数量取配置默认值。
pub async fn load_generation_request(path: &Path, config: &Config) -> Result<GenerationRequest> {
    if !path.exists() {
        anyhow::bail!("文件不存在: {}", path.display());
    }

    if path.extension().and_then(|s| s.to_str()) == Some("toml") {
        return load_toml_to_request(path, config).await;
    }

    tracing::info!(
        "正在加载原文: {}",
        path.file_name().unwrap_or_default().to_string_lossy()
    );
    let source_text = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取文本文件: {}", path.display()))?;

    Ok(GenerationRequest {
        source_text,
        difficulty: config.default_difficulty,
        question_count: config.default_question_count,
    })
}
