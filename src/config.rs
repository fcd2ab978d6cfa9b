//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `TRIP__*` 覆盖（双下划线表示嵌套，如 `TRIP__LLM__PROVIDER=mock`）。

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::trip::{Budget, TravelStyle, DEFAULT_INTERESTS};

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSection,
    #[serde(default)]
    pub llm: LlmSection,
    #[serde(default)]
    pub defaults: DefaultsSection,
}

/// [app] 段：行程文件下载目录
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppSection {
    /// 下载行程文件的目录，未设置时用当前目录
    pub output_dir: Option<PathBuf>,
}

impl AppSection {
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// [llm] 段：后端选择与模型
#[derive(Debug, Clone, Deserialize)]
pub struct LlmSection {
    /// 后端：openai / mock
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    pub base_url: Option<String>,
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_model() -> String {
    crate::llm::DEFAULT_MODEL.to_string()
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            base_url: None,
        }
    }
}

/// [defaults] 段：表单预填值（出发地、目的地、兴趣、预算、风格、日期偏移）
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultsSection {
    #[serde(default = "default_origin")]
    pub origin: String,
    #[serde(default = "default_destination")]
    pub destination: String,
    #[serde(default = "default_interests")]
    pub interests: Vec<String>,
    #[serde(default)]
    pub budget: Budget,
    #[serde(default)]
    pub travel_style: TravelStyle,
    /// 默认出发日 = 今天 + N 天
    #[serde(default = "default_start_offset_days")]
    pub start_offset_days: u32,
    /// 默认行程天数（含首尾）
    #[serde(default = "default_trip_length_days")]
    pub trip_length_days: u32,
}

fn default_origin() -> String {
    "New York".to_string()
}

fn default_destination() -> String {
    "Paris".to_string()
}

fn default_interests() -> Vec<String> {
    DEFAULT_INTERESTS.iter().map(|s| s.to_string()).collect()
}

fn default_start_offset_days() -> u32 {
    7
}

fn default_trip_length_days() -> u32 {
    6
}

impl Default for DefaultsSection {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            destination: default_destination(),
            interests: default_interests(),
            budget: Budget::default(),
            travel_style: TravelStyle::default(),
            start_offset_days: default_start_offset_days(),
            trip_length_days: default_trip_length_days(),
        }
    }
}

/// 环境变量前缀
pub const ENV_PREFIX: &str = "TRIP";

/// 从 config 目录加载配置，环境变量 TRIP__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml、default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 TRIP__*（双下划线表示嵌套键，兴趣列表用逗号分隔）
pub fn load_config(config_path: Option<&Path>) -> Result<AppConfig, config::ConfigError> {
    load_config_with_env(config_path, ENV_PREFIX)
}

fn load_config_with_env(
    config_path: Option<&Path>,
    env_prefix: &str,
) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default", "default"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.to_path_buf()).required(false));
        } else {
            tracing::warn!("Config file {} not found, ignoring", path.display());
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix(env_prefix)
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("defaults.interests"),
    );

    let c = builder.build()?;
    c.try_deserialize()
}
