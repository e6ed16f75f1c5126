//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - player: marker, controller (input gate), control rotation
//! - camera: boom + follow camera + aim flag
//! - movement: kinematic movement + накопленный input
//! - assets: ссылки на внешние ассеты, skeletal sockets
//! - equipment: экипированное оружие, стартовый loadout
//!
//! Item компоненты живут в `crate::item`, overlap counter: в `crate::overlap`.

pub mod assets;
pub mod camera;
pub mod equipment;
pub mod movement;
pub mod player;

pub use assets::*;
pub use camera::*;
pub use equipment::*;
pub use movement::*;
pub use player::*;
