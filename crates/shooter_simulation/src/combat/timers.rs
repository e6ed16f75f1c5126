//! Keyed one-shot timer queue
//!
//! Замена engine timer handles: один pending timer на key,
//! `set_timer` с тем же key отменяет предыдущий (cancel + reschedule).
//! Сработавшие keys возвращаются в порядке очереди (детерминированно).

use bevy::prelude::*;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct TimerQueue<K> {
    entries: Vec<(K, Timer)>,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<K: Copy + PartialEq> TimerQueue<K> {
    /// Запланировать `key` через `seconds`
    ///
    /// ≤ 0 или NaN → сработает на ближайшем tick'е; слишком большое или
    /// бесконечное значение → `Duration::MAX` (timer просто никогда не сработает).
    pub fn set_timer(&mut self, key: K, seconds: f32) {
        self.clear_timer(key);
        let delay = Duration::try_from_secs_f32(seconds.max(0.0)).unwrap_or(Duration::MAX);
        self.entries.push((key, Timer::new(delay, TimerMode::Once)));
    }

    /// Отменить pending timer; `true` если он был
    pub fn clear_timer(&mut self, key: K) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(pending, _)| *pending != key);
        before != self.entries.len()
    }

    pub fn is_pending(&self, key: K) -> bool {
        self.entries.iter().any(|(pending, _)| *pending == key)
    }

    pub fn remaining_secs(&self, key: K) -> Option<f32> {
        self.entries
            .iter()
            .find(|(pending, _)| *pending == key)
            .map(|(_, timer)| timer.remaining_secs())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Продвинуть все timers, вернуть сработавшие (и убрать их из очереди)
    pub fn tick(&mut self, delta: Duration) -> Vec<K> {
        let mut fired = Vec::new();
        for (key, timer) in self.entries.iter_mut() {
            if timer.tick(delta).finished() {
                fired.push(*key);
            }
        }
        self.entries.retain(|(_, timer)| !timer.finished());
        fired
    }
}
