//! Overlap counter + prompt focus персонажа
//!
//! Инварианты:
//! - `count >= 0` для любой последовательности delta
//! - `trace_for_hit == (count > 0)`
//! - focus держит не больше одного item'а → виден максимум один prompt

use bevy::prelude::*;

/// Сколько detection spheres сейчас пересекает персонажа
///
/// `overlapping`: какие именно (для fallback выбора ближайшего item'а,
/// когда crosshair trace ни в один item не попал).
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlapCounter {
    pub count: i8,
    pub trace_for_hit: bool,
    pub overlapping: Vec<Entity>,
}

impl OverlapCounter {
    /// `count' = max(0, count + delta)`
    pub fn apply(&mut self, item: Entity, delta: i8) {
        let next = self.count.saturating_add(delta);
        if next <= 0 {
            self.count = 0;
            self.trace_for_hit = false;
        } else {
            self.count = next;
            self.trace_for_hit = true;
        }

        if delta > 0 {
            if !self.overlapping.contains(&item) {
                self.overlapping.push(item);
            }
        } else if delta < 0 {
            self.overlapping.retain(|&overlapped| overlapped != item);
        }

        if self.count == 0 {
            self.overlapping.clear();
        }
    }
}

impl OverlapCounter {
    /// Убрать item из кандидатов на focus (count не трогаем: exit придёт от backend'а)
    pub fn forget(&mut self, item: Entity) {
        self.overlapping.retain(|&overlapped| overlapped != item);
    }
}

/// Изменение видимости prompt'ов за tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusChange {
    pub show: Option<Entity>,
    pub hide: Option<Entity>,
}

/// Item, чей prompt показан сейчас (weak reference, только lookup)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemFocus {
    pub last_item: Option<Entity>,
}

impl ItemFocus {
    /// Новый кандидат на focus этого tick'а
    ///
    /// Предыдущий prompt прячется, только если он отличается от нового.
    pub fn focus(&mut self, candidate: Option<Entity>) -> FocusChange {
        let hide = match (self.last_item, candidate) {
            (Some(last), Some(current)) if last == current => None,
            (last, _) => last,
        };

        self.last_item = candidate;
        FocusChange { show: candidate, hide }
    }

    /// Counter упал до нуля → спрятать последний prompt
    pub fn clear(&mut self) -> FocusChange {
        FocusChange {
            show: None,
            hide: self.last_item.take(),
        }
    }

    /// Item ушёл из мира/в руку → забыть без изменения видимости
    pub fn forget(&mut self, item: Entity) -> bool {
        if self.last_item == Some(item) {
            self.last_item = None;
            true
        } else {
            false
        }
    }
}
