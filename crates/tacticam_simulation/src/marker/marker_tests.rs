//! Tests for marker fade

#[cfg(test)]
mod tests {
    use super::super::{FadeTask, SelectionMarker};
    use crate::config::FADE_DURATION;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_show_reaches_exact_endpoint() {
        let mut marker = SelectionMarker::default();
        marker.show();

        let mut frames = 0;
        while marker.is_fading() {
            marker.tick(DT);
            assert!((0.0..=1.0).contains(&marker.opacity));
            frames += 1;
            assert!(frames < 1000, "fade never finished");
        }

        assert_eq!(marker.opacity, 1.0);
        // 0.35 / (1/60) = 21 кадр (+1 на накопление float ошибки)
        assert!((21..=22).contains(&frames), "frames = {frames}");
    }

    #[test]
    fn test_fade_is_linear() {
        let mut fade = FadeTask::new(0.0, 1.0, FADE_DURATION);
        let (opacity, finished) = fade.advance(FADE_DURATION * 0.5);

        assert!(!finished);
        assert!((opacity - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_large_step_forces_endpoint() {
        let mut marker = SelectionMarker {
            opacity: 1.0,
            fade: None,
        };
        marker.hide();
        marker.tick(10.0);

        assert_eq!(marker.opacity, 0.0);
        assert!(!marker.is_fading());
    }

    #[test]
    fn test_hide_mid_fade_starts_from_current() {
        let mut marker = SelectionMarker::default();
        marker.show();
        marker.tick(FADE_DURATION * 0.4);
        let midway = marker.opacity;
        assert!(midway > 0.0 && midway < 1.0);

        // Новый fade отменяет старый, без скачка к 1
        marker.hide();
        marker.tick(0.0);
        assert!((marker.opacity - midway).abs() < 1e-6);

        marker.tick(FADE_DURATION);
        assert_eq!(marker.opacity, 0.0);
    }

    #[test]
    fn test_idle_marker_does_not_change() {
        let mut marker = SelectionMarker {
            opacity: 0.6,
            fade: None,
        };
        marker.tick(1.0);
        assert_eq!(marker.opacity, 0.6);
    }
}
