//! 规则定义读取器
//!
//! 将结构化文本解析为规则定义列表。解析失败时不返回任何部分结果。

use crate::definition::RuleDefinition;
use crate::error::Result;
use serde::Deserialize;
use std::io::Read;

/// 规则定义读取器
pub trait RuleDefinitionReader {
    /// 从文本源解析全部规则定义
    fn read(&self, source: &mut dyn Read) -> Result<Vec<RuleDefinition>>;
}

/// YAML 规则定义读取器
///
/// 每个 YAML 文档对应一条规则，`---` 分隔的多文档流定义多条规则。
/// 空文档（例如结尾多余的分隔符）被跳过。
#[derive(Debug, Default)]
pub struct YamlRuleDefinitionReader;

impl YamlRuleDefinitionReader {
    pub fn new() -> Self {
        Self
    }
}

impl RuleDefinitionReader for YamlRuleDefinitionReader {
    fn read(&self, source: &mut dyn Read) -> Result<Vec<RuleDefinition>> {
        let mut text = String::new();
        source.read_to_string(&mut text)?;

        let mut definitions = Vec::new();
        for document in serde_yaml::Deserializer::from_str(&text) {
            let value = serde_yaml::Value::deserialize(document)?;
            if value.is_null() {
                continue;
            }
            definitions.push(serde_yaml::from_value(value)?);
        }
        Ok(definitions)
    }
}

/// JSON 规则定义读取器
///
/// 顶层为规则定义对象的数组。
#[derive(Debug, Default)]
pub struct JsonRuleDefinitionReader;

impl JsonRuleDefinitionReader {
    pub fn new() -> Self {
        Self
    }
}

impl RuleDefinitionReader for JsonRuleDefinitionReader {
    fn read(&self, source: &mut dyn Read) -> Result<Vec<RuleDefinition>> {
        let mut text = String::new();
        source.read_to_string(&mut text)?;
        Ok(serde_json::from_str(&text)?)
    }
}
