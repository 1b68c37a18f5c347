//! # kecheng-algo - 课程个性化核心算法库
//!
//! 本 crate 提供纯 Rust 实现的个性化算法:
//!
//! - **协同过滤推荐** - 基于用户相似度的课程推荐 (k-NN, 余弦距离)
//! - **热门课程兜底** - 冷启动场景按报名人数排序
//! - **自适应学习路径** - 根据测验表现筛选课时序列
//!
//! ## 设计理念
//!
//! 本 crate 的设计目标:
//! - **纯 Rust** - 无存储、无网络依赖，可在任何 Rust 项目中使用
//! - **请求级快照** - 每次调用基于独立快照重建全部状态，天然支持并行
//! - **永不失败** - 数据不足时降级为热门排序，而不是抛出错误
//! - **充分测试** - 所有算法都有完整的单元测试与属性测试
//!
//! ## 模块结构
//!
//! - [`matrix`] - 用户-课程交互矩阵
//! - [`scaler`] - 按列标准化 (零均值、单位方差)
//! - [`neighbors`] - k-NN 近邻索引 (余弦距离)
//! - [`recommend`] - 推荐选择器与热门兜底
//! - [`path`] - 自适应学习路径
//! - [`snapshot`] - 请求级数据快照与校验
//! - [`types`] - 公共类型和常量
//!
//! ## 使用示例
//!
//! ```rust
//! use kecheng_algo::{recommend, Snapshot};
//!
//! // 空快照: 推荐降级为热门兜底
//! let snapshot = Snapshot::default();
//! let outcome = recommend(&snapshot, "student-1", 5);
//! assert!(outcome.is_fallback());
//! ```

// ============================================================================
// 模块声明
// ============================================================================

pub mod matrix;
pub mod neighbors;
pub mod path;
pub mod recommend;
pub mod scaler;
pub mod snapshot;
pub mod types;

// ============================================================================
// 重新导出
// ============================================================================

/// 重新导出所有公共类型
pub use types::*;

/// 重新导出交互矩阵
pub use matrix::InteractionMatrix;

/// 重新导出标准化器
pub use scaler::StandardScaler;

/// 重新导出近邻索引
pub use neighbors::{cosine_distance, NeighborIndex};

/// 重新导出推荐入口
pub use recommend::{popular, recommend};

/// 重新导出学习路径入口
pub use path::{adjust_path, PathError};

/// 重新导出数据快照
pub use snapshot::{Snapshot, SnapshotError};
