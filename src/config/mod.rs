/// 发射器配置系统
///
/// 提供TOML/JSON配置加载、字段级默认值和加载后校验。
/// 配置一经加载即不可变；模拟期间引擎只读取它。
use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// 发射器配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 文件读取错误
    #[error("Config file error: {0}")]
    FileError(#[from] std::io::Error),
    /// 解析错误
    #[error("Config parse error: {0}")]
    ParseError(String),
    /// 验证错误
    #[error("Config validation error: {0}")]
    ValidationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// 发射器运动模型
///
/// 外部配置以小整数编码：`0` = Gravity，`1` = Radial。
/// 与历史格式保持一致，非 `1` 的值一律按 Gravity 处理。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum EmitterMode {
    /// 重力模式：速度积分 + 重力 + 相对出生点的径向/切向加速度
    Gravity,
    /// 径向模式：绕固定点以收缩半径旋转
    Radial,
}

impl Default for EmitterMode {
    fn default() -> Self {
        Self::Gravity
    }
}

impl From<u8> for EmitterMode {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Radial,
            _ => Self::Gravity,
        }
    }
}

impl From<EmitterMode> for u8 {
    fn from(mode: EmitterMode) -> u8 {
        match mode {
            EmitterMode::Gravity => 0,
            EmitterMode::Radial => 1,
        }
    }
}

/// 发射器主配置
///
/// 所有字段都有数值默认值，缺失字段在反序列化时自动回填，
/// 因此任意键/属性来源（JSON、TOML 或宿主自带的解析器）都能喂给它。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// 运动模型（0 = Gravity，1 = Radial）
    pub emitter_mode: EmitterMode,

    /// 发射源位置
    pub source_position: Vec2,
    /// 发射源位置方差
    pub source_position_variance: Vec2,
    /// 粒子池容量（同时存活的粒子上限）
    pub max_particles: u32,
    /// 粒子寿命（秒）
    pub particle_lifespan: f32,
    /// 粒子寿命方差（秒）
    pub particle_lifespan_variance: f32,

    /// 发射角度（度）
    pub angle: f32,
    /// 发射角度方差（度）
    pub angle_variance: f32,
    /// 初速度
    pub speed: f32,
    /// 初速度方差
    pub speed_variance: f32,
    /// 重力加速度
    pub gravity: Vec2,
    /// 径向加速度（以出生点为基准）
    pub radial_acceleration: f32,
    /// 径向加速度方差（历史格式字段，模拟不读取）
    pub radial_acceleration_variance: f32,
    /// 切向加速度（以出生点为基准）
    pub tangential_acceleration: f32,
    /// 切向加速度方差（历史格式字段，模拟不读取）
    pub tangential_acceleration_variance: f32,

    /// 径向模式：初始最大半径
    pub max_radius: f32,
    /// 径向模式：最大半径方差
    pub max_radius_variance: f32,
    /// 径向模式：低于该半径的粒子被标记死亡
    pub min_radius: f32,
    /// 径向模式：半径收缩速度（历史格式字段，模拟不读取）
    pub radius_speed: f32,
    /// 径向模式：每秒旋转角度（度）
    pub rotate_per_second: f32,
    /// 径向模式：每秒旋转角度方差（度）
    pub rotate_per_second_variance: f32,

    /// 出生颜色（RGBA，0-1）
    pub start_color: Vec4,
    /// 出生颜色方差
    pub start_color_variance: Vec4,
    /// 死亡颜色（RGBA，0-1）
    pub finish_color: Vec4,
    /// 死亡颜色方差
    pub finish_color_variance: Vec4,
    /// 出生大小
    pub start_size: f32,
    /// 出生大小方差
    pub start_size_variance: f32,
    /// 死亡大小
    pub finish_size: f32,
    /// 死亡大小方差
    pub finish_size_variance: f32,

    /// 发射持续时间（秒），-1 表示无限
    pub duration: f32,

    /// 混合源因子，原样转发给外部渲染器
    pub blend_func_source: u32,
    /// 混合目标因子，原样转发给外部渲染器
    pub blend_func_destination: u32,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            emitter_mode: EmitterMode::Gravity,
            source_position: Vec2::ZERO,
            source_position_variance: Vec2::ZERO,
            max_particles: 0,
            particle_lifespan: 0.0,
            particle_lifespan_variance: 0.0,
            angle: 0.0,
            angle_variance: 0.0,
            speed: 0.0,
            speed_variance: 0.0,
            gravity: Vec2::ZERO,
            radial_acceleration: 0.0,
            radial_acceleration_variance: 0.0,
            tangential_acceleration: 0.0,
            tangential_acceleration_variance: 0.0,
            max_radius: 0.0,
            max_radius_variance: 0.0,
            min_radius: 0.0,
            radius_speed: 0.0,
            rotate_per_second: 0.0,
            rotate_per_second_variance: 0.0,
            start_color: Vec4::ONE,
            start_color_variance: Vec4::ONE,
            finish_color: Vec4::ONE,
            finish_color_variance: Vec4::ONE,
            start_size: 0.0,
            start_size_variance: 0.0,
            finish_size: 0.0,
            finish_size_variance: 0.0,
            duration: -1.0,
            blend_func_source: 0,
            blend_func_destination: 0,
        }
    }
}

impl EmitterConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 从TOML文件加载配置
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_toml_str(&content)
    }

    /// 从TOML字符串解析配置
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 从JSON文件加载配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_json_str(&content)
    }

    /// 从JSON字符串解析配置
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 保存为TOML文件
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 保存为JSON文件
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        fs::write(path, content).map_err(ConfigError::FileError)
    }

    /// 验证配置
    ///
    /// 非有限数值会在粒子状态中扩散为 NaN/Inf，必须在加载期拒绝。
    /// 零寿命、零容量是合法的稳态配置（不发射），只记录警告。
    pub fn validate(&self) -> ConfigResult<()> {
        let scalars = [
            ("particle_lifespan", self.particle_lifespan),
            ("particle_lifespan_variance", self.particle_lifespan_variance),
            ("angle", self.angle),
            ("angle_variance", self.angle_variance),
            ("speed", self.speed),
            ("speed_variance", self.speed_variance),
            ("radial_acceleration", self.radial_acceleration),
            ("tangential_acceleration", self.tangential_acceleration),
            ("max_radius", self.max_radius),
            ("max_radius_variance", self.max_radius_variance),
            ("min_radius", self.min_radius),
            ("rotate_per_second", self.rotate_per_second),
            ("rotate_per_second_variance", self.rotate_per_second_variance),
            ("start_size", self.start_size),
            ("start_size_variance", self.start_size_variance),
            ("finish_size", self.finish_size),
            ("finish_size_variance", self.finish_size_variance),
            ("duration", self.duration),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }

        let vectors = [
            ("source_position", self.source_position),
            ("source_position_variance", self.source_position_variance),
            ("gravity", self.gravity),
        ];
        for (name, value) in vectors {
            if !value.is_finite() {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }

        let colors = [
            ("start_color", self.start_color),
            ("start_color_variance", self.start_color_variance),
            ("finish_color", self.finish_color),
            ("finish_color_variance", self.finish_color_variance),
        ];
        for (name, value) in colors {
            if !value.is_finite() {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }

        if self.particle_lifespan <= 0.0 {
            log::warn!(
                "particle_lifespan is {}, emission rate will be zero",
                self.particle_lifespan
            );
        }
        if self.max_particles == 0 {
            log::warn!("max_particles is 0, emitter will never spawn particles");
        }

        Ok(())
    }
}
