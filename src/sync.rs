//! 库同步与推荐引擎
//!
//! 核心逻辑所在模块：
//! 1. naming：名称规范化原语
//! 2. dedup：新发现目录与已安装库的去重
//! 3. threads：订阅帖子与目录平台的对账
//! 4. update_feed：待处理更新视图
//! 5. recommend：基于标签频率的推荐
//!
//! 引擎组件只通过 store 模块的 trait 访问持久层，目录平台通过
//! [`crate::catalog::RemoteCatalog`] 注入，便于测试替换。

pub mod dedup;
pub mod naming;
pub mod ranking;
pub mod recommend;
pub mod store;
pub mod threads;
pub mod update_feed;

#[cfg(test)]
pub(crate) mod testing;
