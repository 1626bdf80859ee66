use glam::Vec2;
use particle_engine::config::{EmitterConfig, EmitterMode};
use particle_engine::particles::{Emitter, ParticleSystemManager};

fn base_config() -> EmitterConfig {
    EmitterConfig {
        max_particles: 100,
        particle_lifespan: 2.0,
        ..Default::default()
    }
}

#[test]
fn test_emission_timing_scenario() {
    // 速率 = 100 / 2.0 = 50/s，周期 0.02s：一次 0.1s 更新恰好补发 5 个
    let mut emitter = Emitter::with_seed(base_config(), 1).unwrap();
    emitter.advance(0.1);
    assert_eq!(emitter.particle_count(), 5);
    assert_eq!(emitter.vertices().len(), 5);
}

#[test]
fn test_capacity_bound_scenario() {
    let config = EmitterConfig {
        max_particles: 3,
        particle_lifespan: 2.0,
        ..Default::default()
    };
    let mut emitter = Emitter::with_seed(config, 1).unwrap();
    // 按时间应发 500 个，但容量只有 3
    emitter.advance(10.0);
    assert_eq!(emitter.particle_count(), 3);
}

#[test]
fn test_deactivation_scenario() {
    let config = EmitterConfig {
        max_particles: 40,
        particle_lifespan: 0.6,
        duration: 1.0,
        ..Default::default()
    };
    let mut emitter = Emitter::with_seed(config, 1).unwrap();

    let mut peak = 0;
    for _ in 0..12 {
        emitter.advance(0.1);
        peak = peak.max(emitter.particle_count());
    }
    // 超过 duration 之后发射停止，但存活粒子继续老化、渲染
    assert!(!emitter.is_active());
    assert!(emitter.particle_count() > 0);
    assert!(peak > 0);

    for _ in 0..10 {
        emitter.advance(0.1);
    }
    assert_eq!(emitter.particle_count(), 0);
}

#[test]
fn test_config_consumed_from_json() -> anyhow::Result<()> {
    let config = EmitterConfig::from_json_str(
        r#"{
            "emitter_mode": 1,
            "max_particles": 30,
            "particle_lifespan": 1.0,
            "max_radius": 80.0,
            "min_radius": 4.0,
            "rotate_per_second": 45.0,
            "source_position": [160.0, 240.0]
        }"#,
    )?;
    assert_eq!(config.emitter_mode, EmitterMode::Radial);
    assert_eq!(config.source_position, Vec2::new(160.0, 240.0));
    // 缺失字段回填默认值
    assert_eq!(config.duration, -1.0);

    let mut emitter = Emitter::with_seed(config, 1)?;
    for _ in 0..30 {
        emitter.advance(1.0 / 60.0);
    }
    assert!(emitter.particle_count() > 0);
    assert!(emitter.particle_count() <= 30);
    Ok(())
}

#[test]
fn test_radial_particles_orbit_source() {
    let config = EmitterConfig {
        emitter_mode: EmitterMode::Radial,
        max_particles: 20,
        particle_lifespan: 2.0,
        max_radius: 50.0,
        min_radius: 0.0,
        rotate_per_second: 90.0,
        source_position: Vec2::new(100.0, 100.0),
        ..Default::default()
    };
    let mut emitter = Emitter::with_seed(config, 1).unwrap();
    for _ in 0..10 {
        emitter.advance(1.0 / 60.0);
    }
    // 径向模式粒子始终位于源点周围 max_radius 以内
    for vertex in emitter.vertices() {
        let offset = Vec2::new(vertex.x - 100.0, vertex.y - 100.0);
        assert!(offset.length() <= 50.0 + 1e-3);
    }
}

#[test]
fn test_timestamp_driven_update_loop() {
    let mut emitter = Emitter::with_seed(base_config(), 1).unwrap();
    // 模拟 60Hz 宿主循环：外部时钟给毫秒时间戳，引擎自己算增量
    let mut clock_ms = 0u64;
    for _ in 0..60 {
        clock_ms += 16;
        emitter.update(clock_ms);
    }
    assert!(emitter.particle_count() > 0);
    assert!(emitter.particle_count() <= emitter.capacity());
}

#[test]
fn test_manager_drives_multiple_emitters() {
    let mut manager = ParticleSystemManager::new(8);
    let first = manager.add_emitter(base_config()).unwrap().unwrap();
    let second = manager
        .add_emitter(EmitterConfig {
            emitter_mode: EmitterMode::Radial,
            max_particles: 10,
            particle_lifespan: 1.0,
            max_radius: 30.0,
            ..Default::default()
        })
        .unwrap()
        .unwrap();
    assert_ne!(first, second);

    manager.advance_all(0.2);
    assert!(manager.total_particle_count() > 0);

    let emitter = manager.get_emitter_mut(second).unwrap();
    emitter.stop();
    assert!(!emitter.is_active());
}
