//! Selection marker — decal на точке цели с fade in/out
//!
//! Fade — явная timed-task value внутри компонента, продвигается
//! `advance_marker_fades`. Новый Show/Hide заменяет текущий fade
//! (last caller wins, без очереди).

#[cfg(test)]
mod marker_tests;

use bevy::prelude::*;

use crate::config::FADE_DURATION;
use crate::TacticsSet;

/// Линейный fade opacity `from → to` за `duration` секунд
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeTask {
    pub from: f32,
    pub to: f32,
    pub elapsed: f32,
    pub duration: f32,
}

impl FadeTask {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            elapsed: 0.0,
            duration,
        }
    }

    /// Продвинуть на `dt`. Возвращает (opacity, finished).
    ///
    /// Последний шаг выдаёт ровно `to`.
    pub fn advance(&mut self, dt: f32) -> (f32, bool) {
        self.elapsed += dt.max(0.0);
        if self.elapsed >= self.duration {
            return (self.to, true);
        }

        let t = self.elapsed / self.duration;
        (self.from + (self.to - self.from) * t, false)
    }
}

/// Decal маркера цели. Presentation слой читает `opacity`.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
#[require(Transform)]
pub struct SelectionMarker {
    /// Opacity в [0, 1]
    pub opacity: f32,
    pub fade: Option<FadeTask>,
}

impl SelectionMarker {
    /// Fade к 1 (от текущей opacity)
    pub fn show(&mut self) {
        self.fade = Some(FadeTask::new(self.opacity, 1.0, FADE_DURATION));
    }

    /// Fade к 0 (от текущей opacity)
    pub fn hide(&mut self) {
        self.fade = Some(FadeTask::new(self.opacity, 0.0, FADE_DURATION));
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    pub fn tick(&mut self, dt: f32) {
        let Some(fade) = self.fade.as_mut() else {
            return;
        };

        let (opacity, finished) = fade.advance(dt);
        self.opacity = opacity.clamp(0.0, 1.0);
        if finished {
            self.fade = None;
        }
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum MarkerRequest {
    /// Переместить marker в точку и показать
    Show { at: Vec3 },
    Hide,
}

/// Система: последний MarkerRequest кадра побеждает
///
/// # Schedule
/// - Update, TacticsSet::Marker
pub fn apply_marker_requests(
    mut requests: EventReader<MarkerRequest>,
    mut markers: Query<(&mut SelectionMarker, &mut Transform)>,
) {
    let Some(request) = requests.read().last().copied() else {
        return;
    };

    for (mut marker, mut transform) in markers.iter_mut() {
        match request {
            MarkerRequest::Show { at } => {
                transform.translation = at;
                marker.show();
            }
            MarkerRequest::Hide => marker.hide(),
        }
    }
}

/// Система: продвижение fade
///
/// # Schedule
/// - Update, TacticsSet::Marker (после apply_marker_requests)
pub fn advance_marker_fades(time: Res<Time>, mut markers: Query<&mut SelectionMarker>) {
    let dt = time.delta_secs();
    for mut marker in markers.iter_mut() {
        if marker.is_fading() {
            marker.tick(dt);
        }
    }
}

pub struct MarkerPlugin;

impl Plugin for MarkerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<MarkerRequest>().add_systems(
            Update,
            (apply_marker_requests, advance_marker_fades)
                .chain()
                .in_set(TacticsSet::Marker),
        );
    }
}
