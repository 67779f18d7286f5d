//! 演示事实模型
//!
//! 商店场景的两个事实记录：顾客与家长。

use rule_engine::{Facts, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 顾客
///
/// adult 标记默认为 false，由规则在触发时判定。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    name: String,
    age: u32,
    adult: bool,
}

impl Person {
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            age,
            adult: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn adult(&self) -> bool {
        self.adult
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_age(&mut self, age: u32) {
        self.age = age;
    }

    pub fn set_adult(&mut self, adult: bool) {
        self.adult = adult;
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Person {{ name: {}, age: {}, adult: {} }}",
            self.name, self.age, self.adult
        )
    }
}

/// 家长
///
/// informed 原则上允许缺省。结构相等性与哈希按字段派生，对缺省值
/// 同样成立。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parent {
    age: u32,
    informed: Option<bool>,
}

impl Parent {
    pub fn new(age: u32, informed: bool) -> Self {
        Self {
            age,
            informed: Some(informed),
        }
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn informed(&self) -> Option<bool> {
        self.informed
    }

    pub fn set_age(&mut self, age: u32) {
        self.age = age;
    }

    pub fn set_informed(&mut self, informed: Option<bool>) {
        self.informed = informed;
    }
}

impl fmt::Display for Parent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.informed {
            Some(informed) => write!(f, "Parent {{ age: {}, informed: {} }}", self.age, informed),
            None => write!(f, "Parent {{ age: {}, informed: null }}", self.age),
        }
    }
}

/// 构造一套新的演示事实
///
/// 每次调用返回全新实例，通道之间不共享任何可变状态。
pub fn build_facts() -> Result<Facts> {
    let mut facts = Facts::new();
    facts.put("person", &Person::new("Tom", 19))?;
    facts.put("parent", &Parent::new(30, false))?;
    Ok(facts)
}
