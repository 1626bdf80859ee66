//! 粒子状态与渲染顶点
//!
//! `Particle` 是 CPU 侧模拟记录，`ParticleVertex` 是交给外部渲染器的
//! 平铺缓冲区条目，两者分离（模拟字段不进渲染缓冲区）。

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};

/// 单个粒子的模拟状态
///
/// 槽位在池内被反复复用：每次生成都会完整覆写全部字段，
/// 没有逐粒子堆分配。
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    /// 当前位置
    pub position: Vec2,
    /// 出生时的发射源位置（重力模式的径向/切向分解基准点）
    pub start_position: Vec2,
    /// 速度向量
    pub direction: Vec2,
    /// 径向模式：当前角度（弧度）
    pub angle: f32,
    /// 径向模式：角速度（弧度/秒）
    pub degrees_per_second: f32,
    /// 径向模式：当前半径
    pub radius: f32,
    /// 径向模式：每步半径递减量（按名义更新频率预除）
    pub radius_delta: f32,
    /// 径向加速度，出生时从配置拷贝，终生不变
    pub radial_acceleration: f32,
    /// 切向加速度，出生时从配置拷贝，终生不变
    pub tangential_acceleration: f32,
    /// 剩余寿命（秒），> 0 表示存活
    pub time_to_live: f32,
    /// 当前颜色（RGBA）
    pub color: Vec4,
    /// 每步颜色增量（按名义更新频率预除）
    pub color_delta: Vec4,
    /// 当前大小
    pub size: f32,
    /// 每步大小增量（按名义更新频率预除）
    pub size_delta: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            start_position: Vec2::ZERO,
            direction: Vec2::ZERO,
            angle: 0.0,
            degrees_per_second: 0.0,
            radius: 0.0,
            radius_delta: 0.0,
            radial_acceleration: 0.0,
            tangential_acceleration: 0.0,
            time_to_live: 0.0,
            color: Vec4::ZERO,
            color_delta: Vec4::ZERO,
            size: 0.0,
            size_delta: 0.0,
        }
    }
}

impl Particle {
    /// 粒子是否存活
    pub fn is_alive(&self) -> bool {
        self.time_to_live > 0.0
    }
}

/// 渲染顶点（外部渲染器消费的平铺缓冲区条目）
///
/// `#[repr(C)]` + `Pod`，渲染器可以把整个切片直接上传。
/// 缓冲区只在下一次更新前有效，池内的交换移除会搬动存活条目，
/// 调用方不得跨帧保留指向它的引用。
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ParticleVertex {
    /// 位置 x
    pub x: f32,
    /// 位置 y
    pub y: f32,
    /// 粒子大小（已钳制为非负）
    pub size: f32,
    /// 颜色（RGBA）
    pub color: [f32; 4],
}

impl ParticleVertex {
    /// 从粒子状态生成渲染顶点
    pub fn from_particle(particle: &Particle) -> Self {
        Self {
            x: particle.position.x,
            y: particle.position.y,
            size: particle.size.max(0.0),
            color: particle.color.to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_particle_is_dead() {
        let particle = Particle::default();
        assert!(!particle.is_alive());
    }

    #[test]
    fn test_vertex_clamps_negative_size() {
        let particle = Particle {
            position: Vec2::new(3.0, 4.0),
            size: -2.5,
            color: Vec4::new(1.0, 0.5, 0.25, 1.0),
            ..Default::default()
        };
        let vertex = ParticleVertex::from_particle(&particle);
        assert_eq!(vertex.x, 3.0);
        assert_eq!(vertex.y, 4.0);
        assert_eq!(vertex.size, 0.0);
        assert_eq!(vertex.color, [1.0, 0.5, 0.25, 1.0]);
    }

    #[test]
    fn test_vertex_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<ParticleVertex>(), 7 * 4);
    }
}
