//! 规则触发引擎
//!
//! 按优先级对规则集合求值，对条件成立的规则执行动作。

use crate::error::Result;
use crate::facts::Facts;
use crate::rule::Rules;
use std::collections::BTreeMap;
use tracing::debug;

/// 引擎参数
#[derive(Debug, Clone)]
pub struct RulesEngineParams {
    /// 优先级阈值，数值大于阈值的规则不参与触发
    pub priority_threshold: i32,
    /// 第一条动作执行完成后停止本轮触发
    pub skip_on_first_applied_rule: bool,
}

impl Default for RulesEngineParams {
    fn default() -> Self {
        Self {
            priority_threshold: i32::MAX,
            skip_on_first_applied_rule: false,
        }
    }
}

impl RulesEngineParams {
    pub fn priority_threshold(mut self, threshold: i32) -> Self {
        self.priority_threshold = threshold;
        self
    }

    pub fn skip_on_first_applied_rule(mut self, skip: bool) -> Self {
        self.skip_on_first_applied_rule = skip;
        self
    }
}

/// 规则触发引擎
///
/// 无内部可变状态，同一实例可以对同一组规则与事实反复触发。
#[derive(Debug, Default)]
pub struct RulesEngine {
    params: RulesEngineParams,
}

impl RulesEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(params: RulesEngineParams) -> Self {
        Self { params }
    }

    /// 触发一轮规则
    ///
    /// 优先级数值小的规则先求值；条件成立则立即执行其动作，动作对事实
    /// 的修改对同一轮内的后续规则可见。条件或动作出错时中止本轮并向上
    /// 传播，不做部分恢复。
    pub fn fire(&self, rules: &Rules, facts: &mut Facts) -> Result<()> {
        for rule in rules.sorted_by_priority() {
            if rule.priority() > self.params.priority_threshold {
                debug!(rule = rule.name(), "优先级超过阈值，停止本轮触发");
                break;
            }

            if rule.evaluate(facts)? {
                debug!(rule = rule.name(), "条件成立，执行动作");
                rule.execute(facts)?;
                if self.params.skip_on_first_applied_rule {
                    break;
                }
            } else {
                debug!(rule = rule.name(), "条件不成立");
            }
        }
        Ok(())
    }

    /// 只求值条件，不执行动作
    pub fn check(&self, rules: &Rules, facts: &Facts) -> Result<BTreeMap<String, bool>> {
        let mut results = BTreeMap::new();
        for rule in rules.sorted_by_priority() {
            if rule.priority() > self.params.priority_threshold {
                break;
            }
            results.insert(rule.name().to_string(), rule.evaluate(facts)?);
        }
        Ok(results)
    }
}
