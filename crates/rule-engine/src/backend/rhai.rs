//! rhai 后端
//!
//! 条件与动作在构造时编译为 AST。求值时把每个事实投影为作用域里的
//! 一个对象映射变量，动作执行完成后把同名作用域变量写回事实集合。

use super::ExpressionBackend;
use crate::definition::RuleDefinition;
use crate::error::{Result, RuleError};
use crate::facts::Facts;
use crate::rule::Rule;
use rhai::serde::{from_dynamic, to_dynamic};
use rhai::{AST, Engine, Scope};
use serde_json::Value;

const BACKEND: &str = "rhai";

/// rhai 表达式后端
#[derive(Debug, Default)]
pub struct RhaiBackend;

impl RhaiBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ExpressionBackend for RhaiBackend {
    fn name(&self) -> &'static str {
        BACKEND
    }

    fn compile(&self, definition: &RuleDefinition) -> Result<Box<dyn Rule>> {
        Ok(Box::new(RhaiRule::from_definition(definition)?))
    }
}

/// 编译完成的 rhai 规则
pub struct RhaiRule {
    name: String,
    description: String,
    priority: i32,
    engine: Engine,
    condition_expr: String,
    condition: AST,
    actions: Vec<(String, AST)>,
}

impl RhaiRule {
    pub fn from_definition(definition: &RuleDefinition) -> Result<Self> {
        let engine = Engine::new();
        let condition = compile_expr(&engine, &definition.condition)?;
        let actions = definition
            .actions
            .iter()
            .map(|action| Ok((action.clone(), compile_expr(&engine, action)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: definition.name.clone(),
            description: definition.description.clone(),
            priority: definition.priority,
            engine,
            condition_expr: definition.condition.clone(),
            condition,
            actions,
        })
    }

    /// 把事实集合投影为 rhai 作用域
    fn scope_from(&self, facts: &Facts) -> Result<Scope<'static>> {
        let mut scope = Scope::new();
        for (name, value) in facts.iter() {
            let dynamic =
                to_dynamic(value).map_err(|e| evaluation_error(&self.condition_expr, e))?;
            scope.push_dynamic(name.clone(), dynamic);
        }
        Ok(scope)
    }
}

fn compile_expr(engine: &Engine, expr: &str) -> Result<AST> {
    engine.compile(expr).map_err(|e| RuleError::Compile {
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

impl Rule for RhaiRule {
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
        let mut scope = self.scope_from(facts)?;
        self.engine
            .eval_ast_with_scope::<bool>(&mut scope, &self.condition)
            .map_err(|e| evaluation_error(&self.condition_expr, e))
    }

    fn execute(&self, facts: &mut Facts) -> Result<()> {
        let mut scope = self.scope_from(facts)?;
        for (expr, ast) in &self.actions {
            self.engine
                .run_ast_with_scope(&mut scope, ast)
                .map_err(|e| evaluation_error(expr, e))?;
        }

        // 写回与事实同名的作用域变量，脚本内声明的局部变量不进入事实
        let names: Vec<String> = facts.names().cloned().collect();
        for name in names {
            if let Some(dynamic) = scope.get(&name) {
                let value: Value = from_dynamic(dynamic).map_err(|e| evaluation_error(&name, e))?;
                facts.put_value(name, value);
            }
        }
        Ok(())
    }
}
