//! 规则引擎错误类型

use thiserror::Error;

/// 规则引擎错误
///
/// 四类致命失败：定义源读取、定义解析、表达式编译、表达式求值。
/// 所有错误都不重试、不降级，直接向上传播终止本次运行。
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("规则定义源读取失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("规则定义解析失败: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON 处理失败: {0}")]
    Json(#[from] serde_json::Error),

    #[error("规则定义无效: {0}")]
    Parse(String),

    #[error("表达式编译失败 [{backend}] `{expr}`: {message}")]
    Compile {
        backend: &'static str,
        expr: String,
        message: String,
    },

    #[error("表达式求值失败 [{backend}] `{expr}`: {message}")]
    Evaluation {
        backend: &'static str,
        expr: String,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, RuleError>;
