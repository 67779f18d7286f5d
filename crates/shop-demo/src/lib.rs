//! 规则引擎演示库
//!
//! 把事实模型与通道编排暴露为库，供二进制入口、集成测试与基准复用。

pub mod cli;
pub mod facts;
pub mod lane;
