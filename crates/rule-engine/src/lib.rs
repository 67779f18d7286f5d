//! 小型业务规则引擎
//!
//! 面向演示与基准测试场景，提供：
//! - YAML / JSON 规则定义的加载与解析
//! - 三种表达式后端（rhai / tera / evalexpr）的条件与动作编译
//! - 按优先级触发的规则引擎
//!
//! 表达式求值本身完全由第三方表达式库承担，本 crate 只做编排。

pub mod backend;
pub mod definition;
pub mod engine;
pub mod error;
pub mod facts;
pub mod factory;
pub mod reader;
pub mod rule;

pub use backend::{EvalexprBackend, ExpressionBackend, RhaiBackend, TeraBackend};
pub use definition::RuleDefinition;
pub use engine::{RulesEngine, RulesEngineParams};
pub use error::{Result, RuleError};
pub use facts::Facts;
pub use factory::RuleFactory;
pub use reader::{JsonRuleDefinitionReader, RuleDefinitionReader, YamlRuleDefinitionReader};
pub use rule::{Rule, Rules};
