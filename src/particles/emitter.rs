//! 粒子发射器
//!
//! 驱动每帧模拟：从配置推导发射速率、生成新粒子、推进所有存活粒子，
//! 并产出供外部渲染器消费的顶点缓冲区。
//!
//! 发射器拥有自己的随机数生成器（可用种子构造），同一粒配置加同一粒
//! 种子可以完整复现一次模拟。

use glam::{Vec2, Vec4};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::{EmitterConfig, EmitterMode};
use crate::error::ParticleResult;
use crate::particles::particle::{Particle, ParticleVertex};
use crate::particles::pool::{ParticlePool, StepOutcome};

/// 名义更新频率（Hz）
///
/// 出生时预除的各步进增量以该频率为基准：宿主以接近此频率调用更新时，
/// 每帧一次的 `value += delta` 累加恰好在粒子寿命内完成从出生值到
/// 死亡值的线性过渡。
pub const NOMINAL_UPDATE_RATE: f32 = 90.0;

/// 发射器统计
#[derive(Debug, Default, Clone, Copy)]
pub struct EmitterStats {
    /// 当前存活粒子数
    pub alive_count: u32,
    /// 本帧生成数
    pub frame_spawned: u32,
    /// 累计生成数
    pub total_spawned: u64,
}

/// 粒子发射器
///
/// 持有配置、粒子池和帧间瞬态（发射累计器、累计运行时间、活跃标志、
/// 上一次更新时间戳）。单线程、同步：一帧一次更新调用，更新产出的
/// 顶点缓冲区在下一次更新前只读有效。
pub struct Emitter {
    config: EmitterConfig,
    pool: ParticlePool,
    vertices: Vec<ParticleVertex>,
    /// 运行期发射源位置；宿主可移动发射器，配置本身保持不变
    source_position: Vec2,
    emit_counter: f32,
    elapsed_time: f32,
    active: bool,
    last_update_millis: Option<u64>,
    rng: SmallRng,
    stats: EmitterStats,
}

impl Emitter {
    /// 用给定配置创建发射器（随机种子来自系统熵源）
    ///
    /// 配置校验失败或粒子池分配失败时返回错误，此时没有发射器产生。
    pub fn new(config: EmitterConfig) -> ParticleResult<Self> {
        Self::with_rng(config, SmallRng::from_entropy())
    }

    /// 用给定配置和确定性种子创建发射器
    ///
    /// 相同配置 + 相同种子 + 相同的增量序列可以完整复现一次模拟，
    /// 供可重现的测试使用。
    pub fn with_seed(config: EmitterConfig, seed: u64) -> ParticleResult<Self> {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: EmitterConfig, rng: SmallRng) -> ParticleResult<Self> {
        config.validate()?;

        let capacity = config.max_particles as usize;
        let pool = ParticlePool::with_capacity(capacity)?;
        let mut vertices = Vec::new();
        vertices.try_reserve_exact(capacity)?;

        log::info!(
            "particle emitter created: capacity={}, mode={:?}",
            capacity,
            config.emitter_mode
        );

        Ok(Self {
            source_position: config.source_position,
            config,
            pool,
            vertices,
            emit_counter: 0.0,
            elapsed_time: 0.0,
            active: true,
            last_update_millis: None,
            rng,
            stats: EmitterStats::default(),
        })
    }

    /// 以外部单调时间戳（毫秒）驱动一帧更新
    ///
    /// 增量由本次与上一次时间戳之差得出；首帧没有上一次时间戳，
    /// 增量为 0。自行计算增量的宿主直接调用 [`Emitter::advance`]。
    pub fn update(&mut self, elapsed_millis: u64) {
        let delta_seconds = match self.last_update_millis {
            Some(previous) => elapsed_millis.saturating_sub(previous) as f32 / 1000.0,
            None => 0.0,
        };
        self.last_update_millis = Some(elapsed_millis);
        self.advance(delta_seconds);
    }

    /// 以秒级增量推进一帧模拟
    ///
    /// 发射速率每帧都从当前配置重新推导（`max_particles /
    /// particle_lifespan`），不缓存；寿命不为正时按零速率处理，
    /// 避免除零。大增量会按累计器一次补发多个粒子，上限是池容量。
    /// 发射停止后存活粒子继续老化、渲染，直至各自寿命耗尽。
    pub fn advance(&mut self, delta_seconds: f32) {
        self.stats.frame_spawned = 0;

        if self.active {
            let emission_rate = if self.config.particle_lifespan > 0.0 {
                self.config.max_particles as f32 / self.config.particle_lifespan
            } else {
                0.0
            };

            if emission_rate > 0.0 {
                let period = 1.0 / emission_rate;
                self.emit_counter += delta_seconds;
                while !self.pool.is_full() && self.emit_counter > period {
                    self.spawn_particle();
                    self.emit_counter -= period;
                }
            }

            self.elapsed_time += delta_seconds;
            if self.config.duration != -1.0 && self.elapsed_time > self.config.duration {
                self.stop();
            }
        }

        let config = &self.config;
        let source_position = self.source_position;
        self.pool.advance_all(delta_seconds, |particle, delta| {
            step_particle(particle, delta, config, source_position)
        });

        self.vertices.clear();
        self.vertices
            .extend(self.pool.live().iter().map(ParticleVertex::from_particle));
        self.stats.alive_count = self.pool.live_count() as u32;
    }

    /// 停止发射
    ///
    /// 活跃标志清除，累计运行时间与发射累计器归零。已存活的粒子
    /// 不受影响，在后续更新中自然老化。
    pub fn stop(&mut self) {
        self.active = false;
        self.elapsed_time = 0.0;
        self.emit_counter = 0.0;
        log::debug!("particle emitter stopped");
    }

    /// 恢复发射
    pub fn start(&mut self) {
        self.active = true;
    }

    /// 发射是否活跃
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// 当前存活粒子数
    pub fn particle_count(&self) -> usize {
        self.pool.live_count()
    }

    /// 粒子池容量
    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// 本帧渲染缓冲区 `[0, live_count)`
    ///
    /// 只在下一次更新前有效；交换移除会搬动条目，不要跨帧保留引用。
    pub fn vertices(&self) -> &[ParticleVertex] {
        &self.vertices
    }

    /// 当前发射源位置
    pub fn source_position(&self) -> Vec2 {
        self.source_position
    }

    /// 移动发射源（例如宿主拖拽发射器）
    pub fn set_source_position(&mut self, position: Vec2) {
        self.source_position = position;
    }

    /// 累计运行时间（秒）
    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time
    }

    /// 发射器配置（只读）
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// 发射器统计
    pub fn stats(&self) -> EmitterStats {
        self.stats
    }

    fn spawn_particle(&mut self) -> bool {
        let config = &self.config;
        let source_position = self.source_position;
        let rng = &mut self.rng;
        let spawned = self
            .pool
            .try_spawn(|particle| init_particle(particle, config, source_position, rng));
        if spawned {
            self.stats.frame_spawned += 1;
            self.stats.total_spawned += 1;
        }
        spawned
    }
}

/// 均匀随机数，[-1, 1]
///
/// 每处方差应用都是一次独立采样，不复用。
fn random_minus_one_to_one(rng: &mut SmallRng) -> f32 {
    rng.gen_range(-1.0..=1.0)
}

fn random_color_offset(rng: &mut SmallRng) -> Vec4 {
    Vec4::new(
        random_minus_one_to_one(rng),
        random_minus_one_to_one(rng),
        random_minus_one_to_one(rng),
        random_minus_one_to_one(rng),
    )
}

/// 按配置初始化一个粒子
///
/// 各“每步增量”字段在此一次算好并按名义更新频率预除，
/// 更新路径里只做加法。
fn init_particle(
    particle: &mut Particle,
    config: &EmitterConfig,
    source_position: Vec2,
    rng: &mut SmallRng,
) {
    particle.position = source_position
        + config.source_position_variance
            * Vec2::new(
                random_minus_one_to_one(rng),
                random_minus_one_to_one(rng),
            );
    // 出生点记录的是配置的发射源，不是加过方差的出生位置；
    // 重力模式的径向/切向分解以它为基准
    particle.start_position = source_position;

    let direction_angle =
        (config.angle + config.angle_variance * random_minus_one_to_one(rng)).to_radians();
    let vector_speed = config.speed + config.speed_variance * random_minus_one_to_one(rng);
    particle.direction =
        Vec2::new(direction_angle.cos(), direction_angle.sin()) * vector_speed;

    particle.radius = config.max_radius + config.max_radius_variance * random_minus_one_to_one(rng);
    // 生成路径只在发射速率为正（寿命 > 0）时可达
    particle.radius_delta =
        (config.max_radius / config.particle_lifespan) * (1.0 / NOMINAL_UPDATE_RATE);
    // 粒子自身角度是与方向角独立的第二次采样
    particle.angle =
        (config.angle + config.angle_variance * random_minus_one_to_one(rng)).to_radians();
    particle.degrees_per_second = (config.rotate_per_second
        + config.rotate_per_second_variance * random_minus_one_to_one(rng))
    .to_radians();

    particle.radial_acceleration = config.radial_acceleration;
    particle.tangential_acceleration = config.tangential_acceleration;

    particle.time_to_live = (config.particle_lifespan
        + config.particle_lifespan_variance * random_minus_one_to_one(rng))
    .max(0.0);

    let start_size = config.start_size + config.start_size_variance * random_minus_one_to_one(rng);
    let finish_size =
        config.finish_size + config.finish_size_variance * random_minus_one_to_one(rng);
    let start_color = config.start_color + config.start_color_variance * random_color_offset(rng);
    let finish_color =
        config.finish_color + config.finish_color_variance * random_color_offset(rng);

    particle.size = start_size.max(0.0);
    particle.color = start_color;
    if particle.time_to_live > 0.0 {
        let per_step = 1.0 / (particle.time_to_live * NOMINAL_UPDATE_RATE);
        particle.size_delta = (finish_size - start_size) * per_step;
        particle.color_delta = (finish_color - start_color) * per_step;
    } else {
        // 方差把寿命压到 0：不做除法，粒子在首次推进即死亡
        particle.size_delta = 0.0;
        particle.color_delta = Vec4::ZERO;
    }
}

/// 推进单个粒子一帧
///
/// 先扣寿命：耗尽的粒子立即返回死亡，不再做任何修改。
fn step_particle(
    particle: &mut Particle,
    delta_seconds: f32,
    config: &EmitterConfig,
    source_position: Vec2,
) -> StepOutcome {
    particle.time_to_live -= delta_seconds;
    if particle.time_to_live <= 0.0 {
        return StepOutcome::Dead;
    }

    match config.emitter_mode {
        EmitterMode::Radial => {
            particle.angle += particle.degrees_per_second * delta_seconds;
            // 半径按步递减（增量已按名义频率预除），不乘以秒级增量
            particle.radius -= particle.radius_delta;

            particle.position = source_position
                - Vec2::new(particle.angle.cos(), particle.angle.sin()) * particle.radius;

            // 低于最小半径只标记死亡：本帧仍进入渲染缓冲区，
            // 下一帧的寿命检查才移除它
            if particle.radius < config.min_radius {
                particle.time_to_live = 0.0;
            }
        }
        EmitterMode::Gravity => {
            // 固定顺序：减去出生点 → 相对原点分解径向/切向 → 积分速度与
            // 位置 → 加回出生点。重排会改变轨迹。
            let pivot = particle.start_position;
            particle.position -= pivot;

            let mut radial = Vec2::ZERO;
            if particle.position.x != 0.0 || particle.position.y != 0.0 {
                radial = particle.position.normalize();
            }
            let mut tangential = radial;
            radial *= particle.radial_acceleration;
            tangential = Vec2::new(-tangential.y, tangential.x);
            tangential *= particle.tangential_acceleration;

            let acceleration = (radial + tangential + config.gravity) * delta_seconds;
            particle.direction += acceleration;
            particle.position += particle.direction * delta_seconds;
            particle.position += pivot;
        }
    }

    particle.color += particle.color_delta;
    particle.size += particle.size_delta;

    StepOutcome::Alive
}
