//! evalexpr 后端
//!
//! 事实展平为点号分隔的变量名（如 `person.age`）放入求值上下文。
//! 动作通过赋值表达式修改上下文，执行完成后把根段与事实同名的变量
//! 折叠回事实集合，动作内的临时变量被丢弃。

use super::ExpressionBackend;
use crate::definition::RuleDefinition;
use crate::error::{Result, RuleError};
use crate::facts::Facts;
use crate::rule::Rule;
use evalexpr::{
    ContextWithMutableVariables, HashMapContext, IterateVariablesContext, Node,
    Value as ExprValue, build_operator_tree,
};
use serde_json::Value;

const BACKEND: &str = "evalexpr";

/// evalexpr 表达式后端
#[derive(Debug, Default)]
pub struct EvalexprBackend;

impl EvalexprBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ExpressionBackend for EvalexprBackend {
    fn name(&self) -> &'static str {
        BACKEND
    }

    fn compile(&self, definition: &RuleDefinition) -> Result<Box<dyn Rule>> {
        Ok(Box::new(EvalexprRule::from_definition(definition)?))
    }
}

/// 编译完成的 evalexpr 规则
pub struct EvalexprRule {
    name: String,
    description: String,
    priority: i32,
    condition_expr: String,
    condition: Node,
    actions: Vec<(String, Node)>,
}

impl EvalexprRule {
    pub fn from_definition(definition: &RuleDefinition) -> Result<Self> {
        let condition = compile_expr(&definition.condition)?;
        let actions = definition
            .actions
            .iter()
            .map(|action| Ok((action.clone(), compile_expr(action)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: definition.name.clone(),
            description: definition.description.clone(),
            priority: definition.priority,
            condition_expr: definition.condition.clone(),
            condition,
            actions,
        })
    }
}

fn compile_expr(expr: &str) -> Result<Node> {
    build_operator_tree(expr).map_err(|e| RuleError::Compile {
        backend: BACKEND,
        expr: expr.to_string(),
        message: e.to_string(),
    })
}

fn evaluation_error(expr: &str, message: impl ToString) -> RuleError {
    RuleError::Evaluation {
        backend: BACKEND,
        expr: expr.to_string(),
        message: message.to_string(),
    }
}

/// 把事实集合展平为求值上下文
fn context_from(facts: &Facts) -> Result<HashMapContext> {
    let mut context = HashMapContext::new();
    for (name, value) in facts.iter() {
        flatten_into(&mut context, name, value)?;
    }
    Ok(context)
}

fn flatten_into(context: &mut HashMapContext, path: &str, value: &Value) -> Result<()> {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_into(context, &format!("{path}.{key}"), child)?;
            }
        }
        other => {
            let converted = to_expr_value(path, other)?;
            context
                .set_value(path.to_string(), converted)
                .map_err(|e| evaluation_error(path, e))?;
        }
    }
    Ok(())
}

fn to_expr_value(path: &str, value: &Value) -> Result<ExprValue> {
    Ok(match value {
        Value::Null => ExprValue::Empty,
        Value::Bool(b) => ExprValue::Boolean(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => ExprValue::Int(i),
            None => ExprValue::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => ExprValue::String(s.clone()),
        Value::Array(items) => ExprValue::Tuple(
            items
                .iter()
                .map(|item| to_expr_value(path, item))
                .collect::<Result<Vec<_>>>()?,
        ),
        Value::Object(_) => {
            return Err(evaluation_error(path, "数组中嵌套对象无法展平为变量"));
        }
    })
}

fn from_expr_value(value: &ExprValue) -> Value {
    match value {
        ExprValue::Empty => Value::Null,
        ExprValue::Boolean(b) => Value::Bool(*b),
        ExprValue::Int(i) => Value::from(*i),
        ExprValue::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ExprValue::String(s) => Value::String(s.clone()),
        ExprValue::Tuple(items) => Value::Array(items.iter().map(from_expr_value).collect()),
    }
}

/// 沿 `a.b.c` 路径写入嵌套对象，中间层按需创建
fn set_nested(root: &mut Value, path: &str, new_value: Value) {
    let mut segments: Vec<&str> = path.split('.').collect();
    let Some(last) = segments.pop() else { return };

    let mut current = root;
    for segment in segments {
        let Value::Object(map) = current else { return };
        current = map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(serde_json::Map::new()));
    }
    if let Value::Object(map) = current {
        map.insert(last.to_string(), new_value);
    }
}

impl Rule for EvalexprRule {
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
        let context = context_from(facts)?;
        self.condition
            .eval_boolean_with_context(&context)
            .map_err(|e| evaluation_error(&self.condition_expr, e))
    }

    fn execute(&self, facts: &mut Facts) -> Result<()> {
        let mut context = context_from(facts)?;
        for (expr, node) in &self.actions {
            node.eval_with_context_mut(&mut context)
                .map_err(|e| evaluation_error(expr, e))?;
        }

        // 写回：只折叠根段与现有事实同名的变量
        for (name, value) in context.iter_variables() {
            match name.split_once('.') {
                Some((root, rest)) => {
                    if let Some(fact) = facts.get_value_mut(root) {
                        set_nested(fact, rest, from_expr_value(&value));
                    }
                }
                None => {
                    if facts.get_value(&name).is_some() {
                        facts.put_value(name, from_expr_value(&value));
                    }
                }
            }
        }
        Ok(())
    }
}
