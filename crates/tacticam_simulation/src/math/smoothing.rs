//! Критически демпфированное сглаживание (settle time, не per-frame lerp)
//!
//! Пружина с omega = 2 / smooth_time, экспонента аппроксимирована
//! полиномом (Game Programming Gems 4, "Critically Damped Ease-In/Ease-Out").
//! Результат не зависит от frame rate и никогда не перелетает target.

use bevy::prelude::*;

/// Минимальный settle time (защита от деления на 0)
const MIN_SMOOTH_TIME: f32 = 0.0001;

/// Сглаживание скаляра к `target`.
///
/// `velocity` — состояние пружины, живёт между кадрами у вызывающего.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let mut output = target + (change + temp) * decay;

    // Не перелетаем target
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = (output - target) / dt;
    }

    output
}

/// Покомпонентное сглаживание Vec3
pub fn smooth_damp_vec3(current: Vec3, target: Vec3, velocity: &mut Vec3, smooth_time: f32, dt: f32) -> Vec3 {
    Vec3::new(
        smooth_damp(current.x, target.x, &mut velocity.x, smooth_time, dt),
        smooth_damp(current.y, target.y, &mut velocity.y, smooth_time, dt),
        smooth_damp(current.z, target.z, &mut velocity.z, smooth_time, dt),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dt_is_noop() {
        let mut velocity = 3.0;
        assert_eq!(smooth_damp(1.0, 10.0, &mut velocity, 0.25, 0.0), 1.0);
        assert_eq!(velocity, 3.0);
    }

    #[test]
    fn test_approaches_without_overshoot() {
        let mut value = 0.0;
        let mut velocity = 0.0;
        let mut previous = value;

        for _ in 0..120 {
            value = smooth_damp(value, 10.0, &mut velocity, 0.25, 1.0 / 60.0);
            assert!(value >= previous, "монотонно растёт");
            assert!(value <= 10.0, "не перелетает target: {}", value);
            previous = value;
        }

        // 2 секунды >> settle time
        assert!((value - 10.0).abs() < 1e-3, "value = {}", value);
    }

    #[test]
    fn test_frame_rate_independent() {
        let run = |steps: usize, dt: f32| {
            let mut value = 0.0;
            let mut velocity = 0.0;
            for _ in 0..steps {
                value = smooth_damp(value, 1.0, &mut velocity, 0.5, dt);
            }
            value
        };

        // 0.5 sec при 30 и 120 fps
        let coarse = run(15, 1.0 / 30.0);
        let fine = run(60, 1.0 / 120.0);
        assert!((coarse - fine).abs() < 0.02, "coarse {} vs fine {}", coarse, fine);
    }

    #[test]
    fn test_vec3_smooths_per_component() {
        let mut velocity = Vec3::ZERO;
        let out = smooth_damp_vec3(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0), &mut velocity, 0.25, 1.0 / 60.0);
        assert_eq!(out.x, 0.0);
        assert_eq!(out.z, 0.0);
        assert!(out.y > 0.0 && out.y < 5.0);
        assert!(velocity.y > 0.0);
    }
}
