//! tera 后端
//!
//! 条件与动作都是模板：条件渲染结果必须是字面的 `true`/`false`；
//! 动作渲染出一个 JSON 补丁对象，深合并进事实集合。模板语言无法
//! 直接修改渲染上下文，补丁是它表达事实变更的方式。

use super::ExpressionBackend;
use crate::definition::RuleDefinition;
use crate::error::{Result, RuleError};
use crate::facts::Facts;
use crate::rule::Rule;
use serde_json::Value;
use tera::{Context, Tera};

const BACKEND: &str = "tera";
const CONDITION_TEMPLATE: &str = "__condition";

/// tera 表达式后端
#[derive(Debug, Default)]
pub struct TeraBackend;

impl TeraBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ExpressionBackend for TeraBackend {
    fn name(&self) -> &'static str {
        BACKEND
    }

    fn compile(&self, definition: &RuleDefinition) -> Result<Box<dyn Rule>> {
        Ok(Box::new(TeraRule::from_definition(definition)?))
    }
}

/// 编译完成的 tera 规则
pub struct TeraRule {
    name: String,
    description: String,
    priority: i32,
    tera: Tera,
    condition_expr: String,
    action_exprs: Vec<String>,
}

impl TeraRule {
    pub fn from_definition(definition: &RuleDefinition) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(CONDITION_TEMPLATE, &definition.condition)
            .map_err(|e| compile_error(&definition.condition, e))?;
        for (index, action) in definition.actions.iter().enumerate() {
            tera.add_raw_template(&action_template_name(index), action)
                .map_err(|e| compile_error(action, e))?;
        }

        Ok(Self {
            name: definition.name.clone(),
            description: definition.description.clone(),
            priority: definition.priority,
            tera,
            condition_expr: definition.condition.clone(),
            action_exprs: definition.actions.clone(),
        })
    }

    fn render(&self, template: &str, expr: &str, facts: &Facts) -> Result<String> {
        let context = Context::from_serialize(facts.as_value())
            .map_err(|e| evaluation_error(expr, e))?;
        self.tera
            .render(template, &context)
            .map_err(|e| evaluation_error(expr, e))
    }
}

fn action_template_name(index: usize) -> String {
    format!("__action_{index}")
}

fn compile_error(expr: &str, source: tera::Error) -> RuleError {
    RuleError::Compile {
        backend: BACKEND,
        expr: expr.to_string(),
        message: source.to_string(),
    }
}

fn evaluation_error(expr: &str, message: impl ToString) -> RuleError {
    RuleError::Evaluation {
        backend: BACKEND,
        expr: expr.to_string(),
        message: message.to_string(),
    }
}

/// 把补丁对象递归合并进目标值
fn deep_merge(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(target_map), Value::Object(patch_map)) => {
            for (key, value) in patch_map {
                match target_map.get_mut(&key) {
                    Some(slot) => deep_merge(slot, value),
                    None => {
                        target_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

impl Rule for TeraRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn evaluate(&self, facts: &Facts) -> Result<bool> {
        let rendered = self.render(CONDITION_TEMPLATE, &self.condition_expr, facts)?;
        match rendered.trim() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(evaluation_error(
                &self.condition_expr,
                format!("条件渲染结果不是布尔字面量: `{other}`"),
            )),
        }
    }

    fn execute(&self, facts: &mut Facts) -> Result<()> {
        for (index, expr) in self.action_exprs.iter().enumerate() {
            // 每条动作都基于前一条动作之后的事实状态渲染
            let rendered = self.render(&action_template_name(index), expr, facts)?;
            let patch: Value = serde_json::from_str(rendered.trim())
                .map_err(|e| evaluation_error(expr, format!("动作渲染结果不是合法 JSON: {e}")))?;
            let Value::Object(patch_map) = patch else {
                return Err(evaluation_error(expr, "动作补丁必须是 JSON 对象"));
            };

            for (name, value) in patch_map {
                match facts.get_value_mut(&name) {
                    Some(existing) => deep_merge(existing, value),
                    None => facts.put_value(name, value),
                }
            }
        }
        Ok(())
    }
}
