//! 事实集合
//!
//! 规则求值的输入数据，以命名事实的有序映射表示。
//! 值统一使用 JSON 表示，便于在不同表达式后端之间投影。

use crate::error::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;

/// 事实集合
///
/// 名称到值的映射。BTreeMap 保证遍历顺序按名称稳定，展示输出不依赖
/// 插入顺序。每个通道构造自己的事实集合，不跨通道共享。
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Facts {
    inner: BTreeMap<String, Value>,
}

impl Facts {
    pub fn new() -> Self {
        Self::default()
    }

    /// 放入一个可序列化的事实，同名事实被覆盖
    pub fn put<T: Serialize>(&mut self, name: impl Into<String>, value: &T) -> Result<()> {
        self.inner.insert(name.into(), serde_json::to_value(value)?);
        Ok(())
    }

    /// 放入一个原始 JSON 值
    pub fn put_value(&mut self, name: impl Into<String>, value: Value) {
        self.inner.insert(name.into(), value);
    }

    /// 获取事实的原始值
    pub fn get_value(&self, name: &str) -> Option<&Value> {
        self.inner.get(name)
    }

    pub(crate) fn get_value_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.inner.get_mut(name)
    }

    /// 以目标类型取出事实的一个副本
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        match self.inner.get(name) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.inner.remove(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.inner.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.inner.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// 整个事实集合的 JSON 对象视图
    pub fn as_value(&self) -> Value {
        Value::Object(
            self.inner
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        )
    }
}
