//! 规则引擎集成测试
//!
//! 覆盖完整的 读取定义 -> 工厂编译 -> 引擎触发 工作流，三个表达式
//! 后端各跑一遍同一套场景。

use rule_engine::{
    EvalexprBackend, ExpressionBackend, Facts, JsonRuleDefinitionReader, RhaiBackend,
    RuleDefinition, RuleError, RuleFactory, Rules, RulesEngine, TeraBackend,
    YamlRuleDefinitionReader,
};
use serde_json::json;

/// 一个后端的完整场景描述：内联规则 + 文件规则使用该后端的语法
struct BackendScenario {
    backend: fn() -> Box<dyn ExpressionBackend>,
    inline_condition: &'static str,
    inline_action: &'static str,
    file_rule_yaml: &'static str,
}

fn scenarios() -> Vec<BackendScenario> {
    vec![
        BackendScenario {
            backend: || Box::new(RhaiBackend::new()),
            inline_condition: "person.age > 18",
            inline_action: "person.adult = true;",
            file_rule_yaml: r#"
name: "alcohol rule"
description: "inform the parent"
priority: 2
condition: "person.age < 21"
actions:
  - "parent.informed = true;"
"#,
        },
        BackendScenario {
            backend: || Box::new(TeraBackend::new()),
            inline_condition: "{% if person.age > 18 %}true{% else %}false{% endif %}",
            inline_action: r#"{"person": {"adult": true}}"#,
            file_rule_yaml: r#"
name: "alcohol rule"
description: "inform the parent"
priority: 2
condition: "{% if person.age < 21 %}true{% else %}false{% endif %}"
actions:
  - '{"parent": {"informed": true}}'
"#,
        },
        BackendScenario {
            backend: || Box::new(EvalexprBackend::new()),
            inline_condition: "person.age > 18",
            inline_action: "person.adult = true",
            file_rule_yaml: r#"
name: "alcohol rule"
description: "inform the parent"
priority: 2
condition: "person.age < 21"
actions:
  - "parent.informed = true"
"#,
        },
    ]
}

fn shop_facts(age: i64) -> Facts {
    let mut facts = Facts::new();
    facts.put_value("person", json!({"name": "Tom", "age": age, "adult": false}));
    facts.put_value("parent", json!({"age": 30, "informed": false}));
    facts
}

fn build_rules(scenario: &BackendScenario) -> Rules {
    let factory = RuleFactory::new(
        (scenario.backend)(),
        Box::new(YamlRuleDefinitionReader::new()),
    );

    let inline = RuleDefinition::new("age rule")
        .description("mark adults")
        .priority(1)
        .when(scenario.inline_condition)
        .then(scenario.inline_action);

    let mut rules = Rules::new();
    rules.register(factory.compile(&inline).unwrap());

    let mut source = scenario.file_rule_yaml.as_bytes();
    for rule in factory.create_rules(&mut source).unwrap() {
        rules.register(rule);
    }
    rules
}

#[test]
fn test_single_firing_applies_matching_rules() {
    for scenario in scenarios() {
        let rules = build_rules(&scenario);
        assert_eq!(rules.len(), 2);

        let mut facts = shop_facts(19);
        RulesEngine::new().fire(&rules, &mut facts).unwrap();

        let person = facts.get_value("person").unwrap();
        assert_eq!(person["adult"], json!(true));
        let parent = facts.get_value("parent").unwrap();
        assert_eq!(parent["informed"], json!(true));
    }
}

#[test]
fn test_false_condition_leaves_facts_unchanged() {
    for scenario in scenarios() {
        let rules = build_rules(&scenario);

        // 15 岁：age rule 不触发，alcohol rule 触发
        let mut facts = shop_facts(15);
        RulesEngine::new().fire(&rules, &mut facts).unwrap();

        assert_eq!(facts.get_value("person").unwrap()["adult"], json!(false));
        assert_eq!(facts.get_value("parent").unwrap()["informed"], json!(true));

        // 30 岁：alcohol rule 不触发
        let mut facts = shop_facts(30);
        RulesEngine::new().fire(&rules, &mut facts).unwrap();

        assert_eq!(facts.get_value("person").unwrap()["adult"], json!(true));
        assert_eq!(facts.get_value("parent").unwrap()["informed"], json!(false));
    }
}

#[test]
fn test_repeated_firing_is_stable() {
    for scenario in scenarios() {
        let rules = build_rules(&scenario);
        let engine = RulesEngine::new();
        let mut facts = shop_facts(19);

        for _ in 0..50 {
            engine.fire(&rules, &mut facts).unwrap();
        }

        assert_eq!(facts.get_value("person").unwrap()["adult"], json!(true));
        assert_eq!(facts.get_value("parent").unwrap()["informed"], json!(true));
    }
}

#[test]
fn test_check_reports_conditions_without_side_effects() {
    for scenario in scenarios() {
        let rules = build_rules(&scenario);
        let facts = shop_facts(19);

        let results = RulesEngine::new().check(&rules, &facts).unwrap();

        assert_eq!(results.get("age rule"), Some(&true));
        assert_eq!(results.get("alcohol rule"), Some(&true));
        assert_eq!(facts.get_value("person").unwrap()["adult"], json!(false));
    }
}

#[test]
fn test_rule_count_matches_definition_entries() {
    let factory = RuleFactory::new(
        Box::new(EvalexprBackend::new()),
        Box::new(YamlRuleDefinitionReader::new()),
    );
    let yaml = r#"
name: "one"
condition: "true"
---
name: "two"
condition: "true"
---
name: "three"
condition: "true"
"#;
    let mut source = yaml.as_bytes();
    let rules = factory.create_rules(&mut source).unwrap();
    assert_eq!(rules.len(), 3);
}

#[test]
fn test_missing_file_fails_without_partial_registration() {
    let factory = RuleFactory::new(
        Box::new(RhaiBackend::new()),
        Box::new(YamlRuleDefinitionReader::new()),
    );

    let mut rules = Rules::new();
    let result = factory.create_rules_from_file("rules/definitely-missing.yml");
    assert!(matches!(result, Err(RuleError::Io(_))));
    assert!(rules.is_empty());

    // 错误发生后集合仍然可用
    let ok = factory
        .compile(&RuleDefinition::new("late").when("1 > 0"))
        .unwrap();
    rules.register(ok);
    assert_eq!(rules.len(), 1);
}

#[test]
fn test_compilation_error_in_file_is_fatal() {
    let factory = RuleFactory::new(
        Box::new(RhaiBackend::new()),
        Box::new(YamlRuleDefinitionReader::new()),
    );
    let yaml = r#"
name: "broken"
condition: "person.age >"
"#;
    let mut source = yaml.as_bytes();
    assert!(matches!(
        factory.create_rules(&mut source),
        Err(RuleError::Compile { .. })
    ));
}

#[test]
fn test_json_reader_end_to_end() {
    let factory = RuleFactory::new(
        Box::new(EvalexprBackend::new()),
        Box::new(JsonRuleDefinitionReader::new()),
    );
    let json_rules = r#"[
        {
            "name": "age rule",
            "priority": 1,
            "condition": "person.age > 18",
            "actions": ["person.adult = true"]
        }
    ]"#;

    let mut source = json_rules.as_bytes();
    let mut rules = Rules::new();
    for rule in factory.create_rules(&mut source).unwrap() {
        rules.register(rule);
    }

    let mut facts = shop_facts(19);
    RulesEngine::new().fire(&rules, &mut facts).unwrap();
    assert_eq!(facts.get_value("person").unwrap()["adult"], json!(true));
}

#[test]
fn test_priority_order_across_rules() {
    // 低优先级数值的规则先执行：记录执行顺序的动作相互覆盖
    let factory = RuleFactory::new(
        Box::new(EvalexprBackend::new()),
        Box::new(YamlRuleDefinitionReader::new()),
    );
    let yaml = r#"
name: "second"
priority: 5
condition: "true"
actions:
  - "marker.winner = \"second\""
---
name: "first"
priority: 1
condition: "true"
actions:
  - "marker.winner = \"first\""
"#;
    let mut source = yaml.as_bytes();
    let mut rules = Rules::new();
    for rule in factory.create_rules(&mut source).unwrap() {
        rules.register(rule);
    }

    let mut facts = Facts::new();
    facts.put_value("marker", json!({"winner": ""}));
    RulesEngine::new().fire(&rules, &mut facts).unwrap();

    // priority 5 后执行，最终覆盖 priority 1 的写入
    assert_eq!(facts.get_value("marker").unwrap()["winner"], json!("second"));
}
