//! 粒子系统管理器
//!
//! 管理多个粒子发射器，提供统一的更新接口。

use crate::config::EmitterConfig;
use crate::error::ParticleResult;
use crate::particles::emitter::Emitter;

/// 粒子系统管理器
///
/// 管理有上限的一组发射器，提供统一的推进与查询接口。
pub struct ParticleSystemManager {
    /// 发射器列表
    emitters: Vec<Emitter>,
    /// 最大发射器数
    max_emitters: usize,
}

impl ParticleSystemManager {
    /// 创建新的粒子系统管理器
    ///
    /// # 参数
    ///
    /// * `max_emitters` - 最大发射器数
    pub fn new(max_emitters: usize) -> Self {
        Self {
            emitters: Vec::with_capacity(max_emitters),
            max_emitters,
        }
    }

    /// 添加发射器
    ///
    /// 达到上限时返回 `Ok(None)`；配置校验或池分配失败时返回错误。
    ///
    /// # 返回
    ///
    /// 返回发射器ID（如果成功）。
    pub fn add_emitter(&mut self, config: EmitterConfig) -> ParticleResult<Option<usize>> {
        if self.emitters.len() >= self.max_emitters {
            return Ok(None);
        }

        let emitter = Emitter::new(config)?;
        let id = self.emitters.len();
        self.emitters.push(emitter);
        Ok(Some(id))
    }

    /// 获取发射器
    pub fn get_emitter(&self, id: usize) -> Option<&Emitter> {
        self.emitters.get(id)
    }

    /// 获取发射器（可变引用）
    pub fn get_emitter_mut(&mut self, id: usize) -> Option<&mut Emitter> {
        self.emitters.get_mut(id)
    }

    /// 推进所有发射器一帧
    ///
    /// # 参数
    ///
    /// * `delta_seconds` - 时间增量（秒）
    pub fn advance_all(&mut self, delta_seconds: f32) {
        for emitter in &mut self.emitters {
            emitter.advance(delta_seconds);
        }
    }

    /// 获取发射器数量
    pub fn emitter_count(&self) -> usize {
        self.emitters.len()
    }

    /// 所有发射器的存活粒子总数
    pub fn total_particle_count(&self) -> usize {
        self.emitters.iter().map(Emitter::particle_count).sum()
    }

    /// 移除发射器
    ///
    /// # 返回
    ///
    /// 如果成功移除返回`true`，否则返回`false`。
    pub fn remove_emitter(&mut self, id: usize) -> bool {
        if id < self.emitters.len() {
            self.emitters.remove(id);
            true
        } else {
            false
        }
    }

    /// 清空所有发射器
    pub fn clear(&mut self) {
        self.emitters.clear();
    }
}

impl Default for ParticleSystemManager {
    fn default() -> Self {
        Self::new(64)
    }
}
