//! 表达式后端
//!
//! 每个后端把规则定义编译为绑定其表达式语法的可执行规则：
//!
//! - [`RhaiBackend`] - 嵌入式脚本语言，事实投影为作用域变量
//! - [`TeraBackend`] - 模板语言，条件渲染布尔字面量，动作渲染 JSON 补丁
//! - [`EvalexprBackend`] - 轻量表达式语言，事实展平为点号变量名

mod evalexpr;
mod rhai;
mod tera;

pub use self::evalexpr::{EvalexprBackend, EvalexprRule};
pub use self::rhai::{RhaiBackend, RhaiRule};
pub use self::tera::{TeraBackend, TeraRule};

use crate::definition::RuleDefinition;
use crate::error::Result;
use crate::rule::Rule;

/// 表达式后端
///
/// 编译失败（语法错误）在 `compile` 暴露；求值错误推迟到触发时。
pub trait ExpressionBackend {
    /// 后端标识，用于日志与错误信息
    fn name(&self) -> &'static str;

    /// 将规则定义编译为可执行规则
    fn compile(&self, definition: &RuleDefinition) -> Result<Box<dyn Rule>>;
}
