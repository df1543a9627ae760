use anyhow::Result;
use quiz_generator::app::{App, Command};
use quiz_generator::config::Config;
use quiz_generator::utils::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(config.verbose_logging);

    let command = Command::from_args(std::env::args().skip(1))?;

    // 初始化并运行应用
    App::initialize(config)?.run(command).await?;

    Ok(())
}
