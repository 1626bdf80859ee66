//! 统一错误处理模块
//!
//! 提供引擎范围内的统一错误类型定义
//!
//! ## 错误类型分层
//!
//! - **配置层错误** ([`crate::config::ConfigError`]): 配置加载与校验错误
//! - **引擎层错误** ([`ParticleError`]): 配置错误加上粒子池的底层分配失败
//!
//! 池满、零寿命等稳态条件不属于错误，由正常控制流处理。

use thiserror::Error;

use crate::config::ConfigError;

/// 粒子引擎错误类型
#[derive(Error, Debug)]
pub enum ParticleError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// 粒子池在配置期的后备存储分配失败。
    /// 引擎没有后备存储无法运行，该错误是致命的，直接上抛给调用方。
    #[error("Particle pool allocation failed: {0}")]
    PoolAllocation(#[from] std::collections::TryReserveError),
}

/// 粒子引擎操作结果
pub type ParticleResult<T> = Result<T, ParticleError>;
