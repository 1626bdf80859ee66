//! 粒子池
//!
//! 固定容量、紧凑排列的粒子存储。只有下标 `[0, live_count)` 是存活粒子；
//! 顺序不作保证，移除会用尾部存活粒子回填空出的槽位（交换移除）。
//! 存储在构造时一次性分配，之后不再变化，单帧工作量上界为 O(容量)。

use crate::error::ParticleResult;
use crate::particles::particle::Particle;

/// 单个粒子一步推进的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// 粒子仍然存活，保留槽位
    Alive,
    /// 粒子死亡，槽位交还给池
    Dead,
}

/// 固定容量粒子池
///
/// 池独占全部粒子存储，外部没有别名；生成、推进、移除都经由池的接口。
#[derive(Debug)]
pub struct ParticlePool {
    slots: Vec<Particle>,
    live_count: usize,
}

impl ParticlePool {
    /// 创建指定容量的粒子池
    ///
    /// 后备存储分配失败是致命错误，直接上抛（引擎没有存储无法运行）。
    pub fn with_capacity(capacity: usize) -> ParticleResult<Self> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity)?;
        slots.resize(capacity, Particle::default());
        Ok(Self {
            slots,
            live_count: 0,
        })
    }

    /// 池容量（构造时固定）
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// 当前存活粒子数
    pub fn live_count(&self) -> usize {
        self.live_count
    }

    /// 池是否已满
    pub fn is_full(&self) -> bool {
        self.live_count == self.slots.len()
    }

    /// 尝试生成一个粒子
    ///
    /// 池满是正常的稳态条件而不是错误：返回 `false` 且无副作用，
    /// 由调用方决定下一帧是否重试。否则取 `live_count` 处的槽位，
    /// 调用 `init` 覆写它并递增存活计数。
    pub fn try_spawn(&mut self, init: impl FnOnce(&mut Particle)) -> bool {
        if self.live_count == self.slots.len() {
            return false;
        }
        init(&mut self.slots[self.live_count]);
        self.live_count += 1;
        true
    }

    /// 推进所有存活粒子一帧
    ///
    /// 对调用开始时存活的每个粒子恰好调用一次 `step`。逆序遍历：
    /// 死亡槽位由尾部粒子回填，而尾部下标此刻都已被访问过，
    /// 因此回填进来的粒子不会在同一趟里被二次推进，也不会被跳过。
    /// 一趟结束后存活粒子仍紧凑排列在 `[0, live_count)`。
    pub fn advance_all(
        &mut self,
        delta_seconds: f32,
        mut step: impl FnMut(&mut Particle, f32) -> StepOutcome,
    ) {
        let snapshot = self.live_count;
        for index in (0..snapshot).rev() {
            match step(&mut self.slots[index], delta_seconds) {
                StepOutcome::Alive => {}
                StepOutcome::Dead => {
                    let last = self.live_count - 1;
                    if index != last {
                        self.slots.swap(index, last);
                    }
                    self.live_count -= 1;
                }
            }
        }
    }

    /// 存活粒子切片 `[0, live_count)`
    pub fn live(&self) -> &[Particle] {
        &self.slots[..self.live_count]
    }

    /// 清空池（所有槽位交还，存储保留）
    pub fn clear(&mut self) {
        self.live_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_with_ttl(pool: &mut ParticlePool, time_to_live: f32) -> bool {
        pool.try_spawn(|particle| {
            particle.time_to_live = time_to_live;
        })
    }

    fn age_step(particle: &mut Particle, delta: f32) -> StepOutcome {
        particle.time_to_live -= delta;
        if particle.time_to_live > 0.0 {
            StepOutcome::Alive
        } else {
            StepOutcome::Dead
        }
    }

    #[test]
    fn test_spawn_up_to_capacity() {
        let mut pool = ParticlePool::with_capacity(3).unwrap();
        assert_eq!(pool.capacity(), 3);
        assert!(spawn_with_ttl(&mut pool, 1.0));
        assert!(spawn_with_ttl(&mut pool, 1.0));
        assert!(spawn_with_ttl(&mut pool, 1.0));
        assert_eq!(pool.live_count(), 3);
        assert!(pool.is_full());

        // 池满时生成失败且无副作用
        assert!(!spawn_with_ttl(&mut pool, 1.0));
        assert_eq!(pool.live_count(), 3);
    }

    #[test]
    fn test_zero_capacity_pool() {
        let mut pool = ParticlePool::with_capacity(0).unwrap();
        assert!(!spawn_with_ttl(&mut pool, 1.0));
        pool.advance_all(0.1, age_step);
        assert_eq!(pool.live_count(), 0);
    }

    #[test]
    fn test_advance_removes_dead_and_stays_packed() {
        let mut pool = ParticlePool::with_capacity(4).unwrap();
        spawn_with_ttl(&mut pool, 10.0);
        spawn_with_ttl(&mut pool, 0.05);
        spawn_with_ttl(&mut pool, 10.0);
        spawn_with_ttl(&mut pool, 0.05);

        pool.advance_all(0.1, age_step);

        assert_eq!(pool.live_count(), 2);
        for particle in pool.live() {
            assert!(particle.is_alive());
        }
    }

    #[test]
    fn test_advance_steps_each_particle_exactly_once() {
        let mut pool = ParticlePool::with_capacity(8).unwrap();
        // 交替的死亡模式，逼出交换移除路径
        for ttl in [0.05, 10.0, 0.05, 10.0, 0.05, 10.0, 0.05, 10.0] {
            spawn_with_ttl(&mut pool, ttl);
        }

        let mut invocations = 0;
        pool.advance_all(0.1, |particle, delta| {
            invocations += 1;
            age_step(particle, delta)
        });

        assert_eq!(invocations, 8);
        assert_eq!(pool.live_count(), 4);
    }

    #[test]
    fn test_advance_when_all_die() {
        let mut pool = ParticlePool::with_capacity(5).unwrap();
        for _ in 0..5 {
            spawn_with_ttl(&mut pool, 0.01);
        }

        let mut invocations = 0;
        pool.advance_all(1.0, |particle, delta| {
            invocations += 1;
            age_step(particle, delta)
        });

        assert_eq!(invocations, 5);
        assert_eq!(pool.live_count(), 0);
    }

    #[test]
    fn test_slot_reuse_after_death() {
        let mut pool = ParticlePool::with_capacity(1).unwrap();
        spawn_with_ttl(&mut pool, 0.01);
        pool.advance_all(1.0, age_step);
        assert_eq!(pool.live_count(), 0);

        // 槽位被回收后可以再次生成
        assert!(spawn_with_ttl(&mut pool, 5.0));
        assert_eq!(pool.live_count(), 1);
        assert!((pool.live()[0].time_to_live - 5.0).abs() < 1e-6);
    }
}
