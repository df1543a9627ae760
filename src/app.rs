use crate::config::Config;
use crate::models::loaders::{load_answers, load_generation_request, load_quiz, save_quiz};
use crate::orchestrator::QuizGenerator;
use crate::services::{grade, LlmService};
use crate::utils::logging;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

const USAGE: &str = "用法:
  quiz-generator generate <输入文件(.toml/.txt)> [输出文件.json]
  quiz-generator grade <测验.json> <作答.json> [用时秒数]";

/// 命令行命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 根据原文生成测验
    Generate {
        input: PathBuf,
        output: Option<PathBuf>,
    },
    /// 根据作答记录计算成绩
    Grade {
        quiz: PathBuf,
        answers: PathBuf,
        time_taken_secs: u64,
    },
}

impl Command {
    /// 从命令行参数解析（不含程序名）
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let args: Vec<String> = args.into_iter().collect();
        match args.first().map(String::as_str) {
            Some("generate") => {
                let input = args.get(1).ok_or_else(|| anyhow::anyhow!("缺少输入文件\n{}", USAGE))?;
                Ok(Command::Generate {
                    input: PathBuf::from(input),
                    output: args.get(2).map(PathBuf::from),
                })
            }
            Some("grade") => {
                let (quiz, answers) = match (args.get(1), args.get(2)) {
                    (Some(quiz), Some(answers)) => (quiz, answers),
                    _ => anyhow::bail!("缺少测验文件或作答文件\n{}", USAGE),
                };
                let time_taken_secs = match args.get(3) {
                    Some(secs) => secs
                        .parse()
                        .map_err(|_| anyhow::anyhow!("用时秒数无效: {}", secs))?,
                    None => 0,
                };
                Ok(Command::Grade {
                    quiz: PathBuf::from(quiz),
                    answers: PathBuf::from(answers),
                    time_taken_secs,
                })
            }
            _ => anyhow::bail!("{}", USAGE),
        }
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    generator: QuizGenerator,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        config.validate()?;

        logging::log_startup(&config);

        let backend = Arc::new(LlmService::new(&config));
        let generator = QuizGenerator::new(backend, &config);

        Ok(Self { config, generator })
    }

    /// 运行命令
    pub async fn run(&self, command: Command) -> Result<()> {
        match command {
            Command::Generate { input, output } => self.generate(input, output).await,
            Command::Grade {
                quiz,
                answers,
                time_taken_secs,
            } => self.grade(quiz, answers, time_taken_secs).await,
        }
    }

    /// 生成测验并写入 JSON 文件
    async fn generate(&self, input: PathBuf, output: Option<PathBuf>) -> Result<()> {
        info!("\n📁 正在加载出题请求: {}", input.display());
        let request = load_generation_request(&input, &self.config).await?;

        info!(
            "✓ 原文 {} 字符 | 难度: {} | 题数: {}",
            request.source_text.chars().count(),
            request.difficulty,
            request.question_count
        );

        let outcome = match self.generator.generate_with_report(&request).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("❌ {}", e);
                return Err(e.into());
            }
        };

        let output = output.unwrap_or_else(|| PathBuf::from(&self.config.output_file));
        save_quiz(&output, &outcome.questions).await?;

        if self.config.verbose_logging {
            for question in &outcome.questions {
                info!("  {}", question);
            }
        }

        logging::print_final_stats(&outcome.report, &output.to_string_lossy());

        Ok(())
    }

    /// 计算成绩
    async fn grade(&self, quiz: PathBuf, answers: PathBuf, time_taken_secs: u64) -> Result<()> {
        let questions = load_quiz(&quiz).await?;
        let answers = load_answers(&answers).await?;

        if answers.len() > questions.len() {
            anyhow::bail!(
                "作答数量 {} 多于题目数量 {}",
                answers.len(),
                questions.len()
            );
        }

        let result = grade(&questions, &answers, Duration::from_secs(time_taken_secs));
        logging::print_quiz_result(&result);

        Ok(())
    }
}
