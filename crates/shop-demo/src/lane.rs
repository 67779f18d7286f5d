//! 演示通道
//!
//! 每个通道 = 一种表达式语法 + 一条内联规则 + 一个规则定义文件。
//! 通道配置以数据表驱动，三个通道共用同一段执行逻辑。

use rule_engine::{
    EvalexprBackend, ExpressionBackend, Facts, Result, RhaiBackend, RuleDefinition, RuleFactory,
    Rules, RulesEngine, TeraBackend, YamlRuleDefinitionReader,
};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;

/// 通道配置
pub struct Lane {
    /// 展示名称
    pub label: &'static str,
    /// 后端构造器
    backend: fn() -> Box<dyn ExpressionBackend>,
    /// 内联规则定义（通道语法）
    pub inline_rule: RuleDefinition,
    /// 默认规则定义文件（相对工作目录）
    pub default_rule_file: &'static str,
}

impl Lane {
    /// 本通道使用的规则工厂
    pub fn factory(&self) -> RuleFactory {
        RuleFactory::new((self.backend)(), Box::new(YamlRuleDefinitionReader::new()))
    }

    /// 解析本通道的规则文件路径，命令行覆盖优先于通道默认值
    pub fn rule_file(&self, override_path: Option<&Path>) -> PathBuf {
        override_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(self.default_rule_file))
    }
}

/// 全部通道的配置表，按演示顺序排列
pub fn lanes() -> Vec<Lane> {
    vec![
        Lane {
            label: "rhai",
            backend: || Box::new(RhaiBackend::new()),
            inline_rule: RuleDefinition::new("age rule")
                .description("年满 18 岁的顾客标记为成年人")
                .priority(1)
                .when("person.age > 18")
                .then("person.adult = true;"),
            default_rule_file: "rules/alcohol-rhai.yml",
        },
        Lane {
            label: "tera",
            backend: || Box::new(TeraBackend::new()),
            inline_rule: RuleDefinition::new("age rule")
                .description("年满 18 岁的顾客标记为成年人")
                .priority(1)
                .when("{% if person.age > 18 %}true{% else %}false{% endif %}")
                .then(r#"{"person": {"adult": true}}"#),
            default_rule_file: "rules/alcohol-tera.yml",
        },
        Lane {
            label: "evalexpr",
            backend: || Box::new(EvalexprBackend::new()),
            inline_rule: RuleDefinition::new("age rule")
                .description("年满 18 岁的顾客标记为成年人")
                .priority(1)
                .when("person.age > 18")
                .then("person.adult = true"),
            default_rule_file: "rules/alcohol-evalexpr.yml",
        },
    ]
}

/// 运行一个通道：构造规则、注册、预热后计时触发
///
/// 返回计时循环的总耗时。加载、编译或求值错误直接向上传播，
/// 调用方据此终止整个运行。
pub fn run_lane(
    lane: &Lane,
    rule_file: &Path,
    facts: &mut Facts,
    iterations: u64,
    warmup: u64,
) -> Result<Duration> {
    let factory = lane.factory();

    let mut rules = Rules::new();
    rules.register(factory.compile(&lane.inline_rule)?);
    for rule in factory.create_rules_from_file(rule_file)? {
        rules.register(rule);
    }
    info!(
        lane = lane.label,
        rules = rules.len(),
        file = %rule_file.display(),
        "通道规则就绪"
    );

    let engine = RulesEngine::new();
    for _ in 0..warmup {
        engine.fire(&rules, facts)?;
    }

    let start = Instant::now();
    for _ in 0..iterations {
        engine.fire(&rules, facts)?;
    }
    Ok(start.elapsed())
}

/// 打印事实集合，按名称排序保证输出稳定
pub fn print_facts(facts: &Facts, tag: &str) {
    println!("-- Facts ({tag}) --");
    for (name, value) in facts.iter() {
        println!("{name} = {value}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_lanes_in_demo_order() {
        let labels: Vec<&str> = lanes().iter().map(|lane| lane.label).collect();
        assert_eq!(labels, vec!["rhai", "tera", "evalexpr"]);
    }

    #[test]
    fn test_inline_rules_compile_in_their_own_lane() {
        for lane in lanes() {
            assert!(lane.factory().compile(&lane.inline_rule).is_ok(), "lane {}", lane.label);
        }
    }

    #[test]
    fn test_rule_file_override_wins() {
        let lane = &lanes()[0];
        let override_path = Path::new("custom/rules.yml");

        assert_eq!(lane.rule_file(Some(override_path)), PathBuf::from("custom/rules.yml"));
        assert_eq!(lane.rule_file(None), PathBuf::from("rules/alcohol-rhai.yml"));
    }
}
