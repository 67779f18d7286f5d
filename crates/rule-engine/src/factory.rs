//! 规则工厂
//!
//! 把规则定义读取器与表达式后端组合成可执行规则的构造入口。

use crate::backend::ExpressionBackend;
use crate::definition::RuleDefinition;
use crate::error::{Result, RuleError};
use crate::reader::RuleDefinitionReader;
use crate::rule::Rule;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// 规则工厂
pub struct RuleFactory {
    backend: Box<dyn ExpressionBackend>,
    reader: Box<dyn RuleDefinitionReader>,
}

impl RuleFactory {
    pub fn new(
        backend: Box<dyn ExpressionBackend>,
        reader: Box<dyn RuleDefinitionReader>,
    ) -> Self {
        Self { backend, reader }
    }

    /// 后端标识
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// 编译单条定义（内联规则走这里）
    pub fn compile(&self, definition: &RuleDefinition) -> Result<Box<dyn Rule>> {
        if definition.name.is_empty() {
            return Err(RuleError::Parse("规则名称不能为空".to_string()));
        }
        if definition.condition.is_empty() {
            return Err(RuleError::Parse(format!(
                "规则 '{}' 缺少条件表达式",
                definition.name
            )));
        }

        debug!(backend = self.backend.name(), rule = %definition.name, "编译规则");
        self.backend.compile(definition)
    }

    /// 从文本源读取规则定义，要求恰好一条
    pub fn create_rule(&self, source: &mut dyn Read) -> Result<Box<dyn Rule>> {
        let mut definitions = self.reader.read(source)?;
        if definitions.len() != 1 {
            return Err(RuleError::Parse(format!(
                "期望恰好一条规则定义，实际 {} 条",
                definitions.len()
            )));
        }
        self.compile(&definitions.remove(0))
    }

    /// 从文本源读取全部规则定义
    pub fn create_rules(&self, source: &mut dyn Read) -> Result<Vec<Box<dyn Rule>>> {
        let definitions = self.reader.read(source)?;
        definitions
            .iter()
            .map(|definition| self.compile(definition))
            .collect()
    }

    /// 从文件读取单条规则，文件句柄在解析结束后随作用域释放
    pub fn create_rule_from_file(&self, path: impl AsRef<Path>) -> Result<Box<dyn Rule>> {
        let mut file = File::open(path.as_ref())?;
        self.create_rule(&mut file)
    }

    /// 从文件读取全部规则
    pub fn create_rules_from_file(&self, path: impl AsRef<Path>) -> Result<Vec<Box<dyn Rule>>> {
        let mut file = File::open(path.as_ref())?;
        self.create_rules(&mut file)
    }
}
