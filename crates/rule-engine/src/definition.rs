//! 规则定义
//!
//! 从规则定义文件解析出的中间表示，也可以在代码中以流式 API 构造。
//! 条件与动作以表达式字符串保存，具体语法由编译它的后端决定。

use serde::{Deserialize, Serialize};

/// 未指定优先级时的默认值，保证这类规则排在所有显式优先级之后
fn default_priority() -> i32 {
    i32::MAX - 1
}

/// 规则定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_priority")]
    pub priority: i32,
    pub condition: String,
    #[serde(default)]
    pub actions: Vec<String>,
}

impl RuleDefinition {
    /// 创建空定义，配合 when/then 流式构造内联规则
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            priority: default_priority(),
            condition: String::new(),
            actions: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// 设置条件表达式
    pub fn when(mut self, condition: impl Into<String>) -> Self {
        self.condition = condition.into();
        self
    }

    /// 追加一条动作表达式
    pub fn then(mut self, action: impl Into<String>) -> Self {
        self.actions.push(action.into());
        self
    }
}
