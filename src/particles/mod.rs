//! 粒子模拟模块
//!
//! CPU 侧的 2D 粒子模拟：固定容量粒子池、每帧物理积分与生命周期插值。
//!
//! ## 架构设计
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                   Particle Simulation                    │
//! ├─────────────────────────────────────────────────────────┤
//! │  1. Emission                                             │
//! │     - 发射速率 = 容量 / 粒子寿命（每帧重新推导）           │
//! │     - 按累计器补发，上限为池容量                           │
//! │                                                          │
//! │  2. Simulation                                           │
//! │     - 重力模式：速度积分 + 径向/切向加速度                 │
//! │     - 径向模式：绕源点旋转，半径逐步收缩                   │
//! │     - 颜色/大小按预除增量线性过渡                          │
//! │                                                          │
//! │  3. Render Buffer                                        │
//! │     - 紧凑的 {x, y, size, rgba} 顶点切片                  │
//! │     - 由外部渲染器上传与绘制                               │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 使用示例
//!
//! ```ignore
//! let config = EmitterConfig {
//!     max_particles: 1000,
//!     particle_lifespan: 2.0,
//!     gravity: Vec2::new(0.0, 98.0),
//!     ..Default::default()
//! };
//! let mut emitter = Emitter::new(config)?;
//! emitter.advance(1.0 / 60.0);
//! ```

pub mod emitter;
pub mod particle;
pub mod pool;
pub mod system;


pub use emitter::{Emitter, EmitterStats, NOMINAL_UPDATE_RATE};
pub use particle::{Particle, ParticleVertex};
pub use pool::{ParticlePool, StepOutcome};
pub use system::ParticleSystemManager;
