//! rshighlight 命令行工具
//! 离线验证触发词规则：读取规则文件与一条消息，输出每个订阅者的命中区间与渲染结果
//!
//! 规则文件格式：`{"触发词": ["用户名", ...]}`，以配置的前缀（默认 `~`）开头的触发词按正则处理
//!
//! 运行命令：
//! cargo run --features cli -- --rules rules.json --message "hello world"

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use rshighlight::{ConfigManager, HighlightConfig, HighlightDetector, RuleSet};
use tracing_subscriber::EnvFilter;

/// Trigger matching and highlight rendering for chat messages
#[derive(Parser)]
#[command(name = "rshighlight")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Rules file: JSON object mapping trigger -> list of recipients
    #[arg(short, long)]
    rules: PathBuf,

    /// Message to scan
    #[arg(short, long)]
    message: String,

    /// Message author, excluded from notifications
    #[arg(short, long)]
    author: Option<String>,

    /// Optional JSON config file (missing fields use defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<HighlightConfig> {
    let Some(path) = path else {
        return Ok(ConfigManager::get_default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    ConfigManager::from_json(&json).with_context(|| format!("invalid config file {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_ref())?;
    let rules_json = std::fs::read_to_string(&cli.rules)
        .with_context(|| format!("failed to read rules file {}", cli.rules.display()))?;
    let rule_set = RuleSet::from_json(&rules_json, &config)
        .with_context(|| format!("invalid rules file {}", cli.rules.display()))?;

    let exclude = if config.exclude_author { cli.author.as_deref() } else { None };
    let detector = HighlightDetector::new(config);
    let highlights = detector.highlight(&rule_set, &cli.message, exclude);

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&highlights)?);
        }
        OutputFormat::Text => {
            if highlights.is_empty() {
                println!("no matches");
            }
            for highlight in &highlights {
                let spans: Vec<String> = highlight.spans.iter().map(ToString::to_string).collect();
                println!("{}: {}", highlight.recipient, spans.join(" "));
                println!("  plain:  {}", highlight.plain);
                println!("  markup: {}", highlight.markup);
            }
        }
    }

    Ok(())
}
