//! 规则抽象与规则集合

use crate::error::Result;
use crate::facts::Facts;

/// 规则
///
/// 一条命名的、带优先级的 (条件, 动作) 对，构造完成后不可变。
/// 条件只读事实，动作可以修改事实。
pub trait Rule {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// 优先级数值越小越先触发
    fn priority(&self) -> i32;

    /// 对事实集合求值条件
    fn evaluate(&self, facts: &Facts) -> Result<bool>;

    /// 执行动作
    fn execute(&self, facts: &mut Facts) -> Result<()>;
}

/// 规则集合
///
/// 以名称为标识的规则集，注册同名规则时替换旧规则。
/// 触发顺序由引擎按优先级决定，集合本身不保证顺序。
#[derive(Default)]
pub struct Rules {
    rules: Vec<Box<dyn Rule>>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册一条规则，同名规则被替换
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        match self.rules.iter_mut().find(|r| r.name() == rule.name()) {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|rule| rule.as_ref())
    }

    /// 按优先级升序返回规则，平级保持注册顺序（稳定排序）
    pub(crate) fn sorted_by_priority(&self) -> Vec<&dyn Rule> {
        let mut sorted: Vec<&dyn Rule> = self.rules.iter().map(|rule| rule.as_ref()).collect();
        sorted.sort_by_key(|rule| rule.priority());
        sorted
    }
}
