//! # Particle Engine
//!
//! A config-driven 2D particle simulation engine built with Rust.
//!
//! ## Features
//!
//! - **Fixed-Capacity Pool**: densely packed particle storage with O(1) swap removal
//! - **Two Motion Models**: velocity/gravity integration or radial orbit, selected per emitter
//! - **Lifetime Interpolation**: per-particle color and size transition from birth to death values
//! - **Declarative Configuration**: serde-based emitter config with per-field defaults
//! - **Deterministic Testing**: seedable per-emitter random generator
//!
//! ## Architecture Design
//!
//! This engine is the CPU simulation core only. Texture loading, blend-state
//! setup and the actual draw calls belong to the host renderer; the engine
//! produces a flat, tightly packed vertex buffer per frame:
//!
//! - **Config (配置)**: immutable emitter parameters, loaded once
//! - **Pool (粒子池)**: fixed-capacity storage owning all particle state
//! - **Emitter (发射器)**: per-frame orchestration and render buffer production
//!
//! ### Example
//!
//! ```ignore
//! use particle_engine::config::EmitterConfig;
//! use particle_engine::particles::Emitter;
//!
//! let config = EmitterConfig::from_json_file("fire.json")?;
//! let mut emitter = Emitter::new(config)?;
//!
//! // once per frame, driven by the host loop
//! emitter.advance(1.0 / 60.0);
//! renderer.upload(emitter.vertices());
//! ```
//!
//! ## Modules
//!
//! - [`config`]: emitter configuration loading and validation
//! - [`error`]: unified error types
//! - [`particles`]: particle pool, emitter and per-frame simulation

/// Emitter configuration loading and validation
pub mod config;
/// Unified error types
pub mod error;
/// Particle simulation core (pool, emitter, render vertices)
pub mod particles;
