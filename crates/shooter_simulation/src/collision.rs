//! Collision channels и responses
//!
//! ## Модель:
//! - **Channel:** по какому каналу идёт запрос (trace) или с каким типом объекта
//!   пересекается volume (Pawn).
//! - **Response:** Ignore / Overlap / Block на каждый channel.
//! - **Enabled:** NoCollision / QueryOnly / QueryAndPhysics: глобальный выключатель volume.
//!
//! ## Rapier groups:
//! - GROUP_1: Visibility traces
//! - GROUP_2: Camera traces
//! - GROUP_3: Pawn (персонажи)
//!
//! Block на trace channel → collider входит в memberships соответствующей группы.
//! Overlap на Pawn → sensor с collision events (detection sphere).

use bevy::prelude::*;
use bevy_rapier3d::prelude::Group;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum CollisionChannel {
    Visibility,
    Camera,
    Pawn,
}

impl CollisionChannel {
    pub const ALL: [CollisionChannel; 3] = [
        CollisionChannel::Visibility,
        CollisionChannel::Camera,
        CollisionChannel::Pawn,
    ];

    fn index(self) -> usize {
        match self {
            CollisionChannel::Visibility => 0,
            CollisionChannel::Camera => 1,
            CollisionChannel::Pawn => 2,
        }
    }

    pub fn group(self) -> Group {
        match self {
            CollisionChannel::Visibility => Group::GROUP_1,
            CollisionChannel::Camera => Group::GROUP_2,
            CollisionChannel::Pawn => Group::GROUP_3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum ChannelResponse {
    #[default]
    Ignore,
    Overlap,
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum CollisionEnabled {
    #[default]
    NoCollision,
    QueryOnly,
    QueryAndPhysics,
}

impl CollisionEnabled {
    pub fn has_query(self) -> bool {
        !matches!(self, CollisionEnabled::NoCollision)
    }

    pub fn has_physics(self) -> bool {
        matches!(self, CollisionEnabled::QueryAndPhysics)
    }
}

/// Response на каждый channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub struct ResponseSet {
    responses: [ChannelResponse; 3],
}

impl ResponseSet {
    /// Один response на все channels
    pub fn all(response: ChannelResponse) -> Self {
        Self {
            responses: [response; 3],
        }
    }

    /// Override одного channel
    pub fn with(mut self, channel: CollisionChannel, response: ChannelResponse) -> Self {
        self.responses[channel.index()] = response;
        self
    }

    pub fn get(&self, channel: CollisionChannel) -> ChannelResponse {
        self.responses[channel.index()]
    }

    pub fn any(&self, response: ChannelResponse) -> bool {
        self.responses.contains(&response)
    }
}

/// Collision конфигурация одного volume (mesh / box / sphere)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub struct VolumeProfile {
    pub enabled: CollisionEnabled,
    pub responses: ResponseSet,
}

impl VolumeProfile {
    pub fn new(enabled: CollisionEnabled, responses: ResponseSet) -> Self {
        Self { enabled, responses }
    }

    /// Полностью выключенный volume
    pub fn disabled() -> Self {
        Self::new(CollisionEnabled::NoCollision, ResponseSet::all(ChannelResponse::Ignore))
    }

    /// Блокирует ли trace по channel (enabled + Block)
    pub fn blocks(&self, channel: CollisionChannel) -> bool {
        self.enabled.has_query() && self.responses.get(channel) == ChannelResponse::Block
    }

    /// Генерирует ли overlap события с pawn'ами
    pub fn overlaps_pawns(&self) -> bool {
        self.enabled.has_query() && self.responses.get(CollisionChannel::Pawn) == ChannelResponse::Overlap
    }

    /// Rapier groups: memberships = blocked trace channels (+ Pawn для overlap)
    pub fn memberships(&self) -> Group {
        let mut groups = Group::NONE;
        if !self.enabled.has_query() {
            return groups;
        }
        for channel in CollisionChannel::ALL {
            match self.responses.get(channel) {
                ChannelResponse::Block => groups |= channel.group(),
                ChannelResponse::Overlap if channel == CollisionChannel::Pawn => groups |= channel.group(),
                _ => {}
            }
        }
        groups
    }
}
