//! Tests for the scaling engine.

use pretty_assertions::assert_eq;

use super::*;

fn scaled_values(data: &[f64], width: SampleWidth, scale: Option<Scale>) -> Vec<i32> {
    float_to_integer(&FloatBuffer::mono(data.to_vec()), width, scale)
        .unwrap()
        .samples
        .into_samples()
}

/// The two-tone test signal: a 3 second, 22050 Hz sum of 440 Hz and 880 Hz
/// sinusoids under a parabolic envelope. Its extremes are
/// -1.1745469775555515 and 1.093833464065767.
fn harmonic_signal() -> Vec<f64> {
    let rate = 22050.0;
    let duration = 3.0;
    let n = (rate * duration) as usize;
    let omega1 = 2.0 * std::f64::consts::PI * 440.0;
    let omega2 = 2.0 * std::f64::consts::PI * 880.0;
    (0..n)
        .map(|i| {
            let t = i as f64 / rate;
            let envelope = (4.0 / (duration * duration)) * (t * (duration - t));
            envelope * ((omega1 * t).sin() + 0.3 * (omega2 * t + 0.2).sin())
        })
        .collect()
}

fn min_max(values: &[i32]) -> (i32, i32) {
    let min = values.iter().copied().min().unwrap();
    let max = values.iter().copied().max().unwrap();
    (min, max)
}

// =========================================================================
// Rounding
// =========================================================================

#[test]
fn test_round_half_toward_zero() {
    assert_eq!(round_half_toward_zero(2.5), 2.0);
    assert_eq!(round_half_toward_zero(-2.5), -2.0);
    assert_eq!(round_half_toward_zero(2.6), 3.0);
    assert_eq!(round_half_toward_zero(-2.6), -3.0);
    assert_eq!(round_half_toward_zero(2.4), 2.0);
    assert_eq!(round_half_toward_zero(0.5), 0.0);
    assert_eq!(round_half_toward_zero(-0.25), 0.0);
    assert_eq!(round_half_toward_zero(0.0), 0.0);
}

#[test]
fn test_scale_factor() {
    assert_eq!(scale_factor(SampleWidth::U8), 127.5);
    assert_eq!(scale_factor(SampleWidth::I16), 32767.5);
    assert_eq!(scale_factor(SampleWidth::I24), 8_388_607.5);
    assert_eq!(scale_factor(SampleWidth::I32), 2_147_483_647.5);
}

// =========================================================================
// Float conversion
// =========================================================================

#[test]
fn test_zero_maps_to_midpoint() {
    let scales = [None, Some(Scale::Fixed(0.001)), Some(Scale::Fixed(7.5)), Some(Scale::Auto)];
    for width in SampleWidth::ALL {
        for scale in scales {
            let values = scaled_values(&[0.0, -0.0, 0.5, 0.0], width, scale);
            let midpoint = width.midpoint() as i32;
            assert_eq!(values[0], midpoint, "{width} scale {scale:?}");
            assert_eq!(values[1], midpoint, "{width} scale {scale:?}");
            assert_eq!(values[3], midpoint, "{width} scale {scale:?}");
        }
    }
}

#[test]
fn test_full_scale_limits() {
    let cases = [
        (SampleWidth::U8, [1, 128, 255]),
        (SampleWidth::I16, [-32767, 0, 32767]),
        (SampleWidth::I24, [-8_388_607, 0, 8_388_607]),
        (SampleWidth::I32, [-2_147_483_647, 0, 2_147_483_647]),
    ];
    for (width, expected) in cases {
        let result =
            float_to_integer(&FloatBuffer::mono(vec![-1.0, 0.0, 1.0]), width, Some(Scale::Fixed(1.0)))
                .unwrap();
        assert_eq!(result.samples.samples(), &expected[..], "{width}");
        assert!(result.clip.is_none(), "{width}");
    }
}

#[test]
fn test_negative_headroom_is_not_clipping() {
    // -(1 + 1/c) is still representable, so nothing here is clipped.
    for scale in [None, Some(Scale::Fixed(1.0)), Some(Scale::Auto)] {
        let result = float_to_integer(
            &FloatBuffer::mono(vec![-1.0075, -1.005, -1.0, 0.0, 1.0]),
            SampleWidth::U8,
            scale,
        )
        .unwrap();
        assert_eq!(result.samples.samples(), &[0, 0, 1, 128, 255]);
        assert!(result.clip.is_none());
    }
}

#[test]
fn test_auto_scale_24_bit() {
    let d = 1.0 / (8_388_608.0 - 0.5);
    let data: Vec<f64> = [
        -1.0 - 0.96 * d,
        -1.0 - 0.01 * d,
        -1.0,
        -1.0 + 0.75 * d,
        -1.0 + 1.25 * d,
        -2.0 * d,
        -d,
        -0.25 * d,
        0.0,
        0.25 * d,
        d,
        2.0 * d,
        1.0 - 1.25 * d,
        1.0 - 0.75 * d,
        1.0,
    ]
    .iter()
    .map(|v| 4.0 * v)
    .collect();

    let values = scaled_values(&data, SampleWidth::I24, Some(Scale::Auto));
    let m = 1 << 23;
    assert_eq!(
        values,
        vec![
            -m,
            -m,
            -m + 1,
            -m + 1,
            -m + 2,
            -2,
            -1,
            0,
            0,
            0,
            1,
            2,
            m - 2,
            m - 1,
            m - 1
        ]
    );
}

#[test]
fn test_harmonic_fixed_scale() {
    let y = harmonic_signal();
    let result =
        float_to_integer(&FloatBuffer::mono(y), SampleWidth::I16, Some(Scale::Fixed(2.0))).unwrap();
    assert_eq!(min_max(result.samples.samples()), (-19243, 17921));
    assert!(result.clip.is_none());
}

#[test]
fn test_harmonic_auto_scale() {
    let y = harmonic_signal();
    let values = scaled_values(&y, SampleWidth::I16, Some(Scale::Auto));
    assert_eq!(min_max(&values), (-32768, 30517));
}

#[test]
fn test_float_clipping_is_reported_and_clamped() {
    let data = vec![0.5, 0.25, 0.0, -0.9, -1.5, 0.0, 3.0];
    let result =
        float_to_integer(&FloatBuffer::mono(data), SampleWidth::I16, Some(Scale::Fixed(1.0)))
            .unwrap();

    assert_eq!(result.samples.get(4, 0), Some(-32768));
    assert_eq!(result.samples.get(6, 0), Some(32767));

    let report = result.clip.expect("clipping should be reported");
    assert_eq!(report.clipped, 2);
    assert_eq!(report.total, 7);
    assert_eq!(report.upper, 1.0);
    assert_eq!(report.scale, Some(1.0));
    assert!(report.lower < -1.0);
    assert!(report.to_string().contains("with scale=1"));
}

#[test]
fn test_float_clipping_unsigned() {
    let values = scaled_values(&[-2.0, 2.0], SampleWidth::U8, None);
    assert_eq!(values, vec![0, 255]);
}

#[test]
fn test_huge_values_saturate() {
    let values = scaled_values(&[1e300, -1e300], SampleWidth::U8, None);
    assert_eq!(values, vec![255, 0]);
}

#[test]
fn test_rejects_non_finite_samples() {
    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = float_to_integer(&FloatBuffer::mono(vec![0.0, bad]), SampleWidth::I16, None)
            .unwrap_err();
        assert!(matches!(err, WavError::InvalidParameter { .. }));
    }
}

#[test]
fn test_rejects_bad_fixed_scale() {
    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let err = float_to_integer(
            &FloatBuffer::mono(vec![0.0]),
            SampleWidth::I16,
            Some(Scale::Fixed(bad)),
        )
        .unwrap_err();
        assert!(matches!(err, WavError::InvalidParameter { .. }), "{bad}");
    }
}

#[test]
fn test_auto_scale_of_silence() {
    assert_eq!(effective_scale(&[0.0, 0.0], Some(Scale::Auto), SampleWidth::I16).unwrap(), 1.0);
    assert_eq!(effective_scale(&[], Some(Scale::Auto), SampleWidth::I16).unwrap(), 1.0);
    assert_eq!(scaled_values(&[0.0; 4], SampleWidth::U8, Some(Scale::Auto)), vec![128; 4]);
}

#[test]
fn test_default_scale_is_one() {
    assert_eq!(effective_scale(&[5.0], None, SampleWidth::I16).unwrap(), 1.0);
    assert_eq!(
        effective_scale(&[5.0], Some(Scale::Fixed(2.0)), SampleWidth::I16).unwrap(),
        2.0
    );
}

// =========================================================================
// Integer clipping
// =========================================================================

#[test]
fn test_clip_integers_to_unsigned_byte() {
    let input = Frames::mono(vec![-100i64, 0, 100, 200, 300, 325]);
    let result = clip_integers(&input, SampleWidth::U8);
    assert_eq!(result.samples.samples(), &[0, 0, 100, 200, 255, 255]);

    let report = result.clip.unwrap();
    assert_eq!(report.clipped, 3);
    assert_eq!(report.scale, None);
    assert_eq!((report.lower, report.upper), (0.0, 255.0));
}

#[test]
fn test_clip_integers_is_passthrough_in_range() {
    let input = Frames::new(vec![-32768i64, -1, 0, 32767], 2).unwrap();
    let result = clip_integers(&input, SampleWidth::I16);
    assert_eq!(result.samples.samples(), &[-32768, -1, 0, 32767]);
    assert_eq!(result.samples.channels(), 2);
    assert!(result.clip.is_none());
}

#[test]
fn test_clip_integers_never_shifts() {
    // Signed 16-bit data written as 8-bit is clipped, not re-centered.
    let input = Frames::mono(vec![0i64, 10000, 0, -10000]);
    let result = clip_integers(&input, SampleWidth::U8);
    assert_eq!(result.samples.samples(), &[0, 255, 0, 0]);
    assert_eq!(result.clip.unwrap().clipped, 2);
}

// =========================================================================
// Policy and configuration
// =========================================================================

#[test]
fn test_clip_policy_check() {
    let report = ClipReport {
        clipped: 1,
        total: 2,
        lower: 0.0,
        upper: 255.0,
        scale: None,
    };
    assert!(ClipPolicy::Ignore.check(Some(&report)).is_ok());
    assert!(ClipPolicy::Warn.check(Some(&report)).is_ok());
    assert!(ClipPolicy::Raise.check(None).is_ok());

    let err = ClipPolicy::Raise.check(Some(&report)).unwrap_err();
    assert_eq!(err.code(), "WAV_006");
    assert!(err.to_string().contains("1 of 2"));
}

#[test]
fn test_parse_scale_and_policy() {
    assert_eq!("auto".parse::<Scale>().unwrap(), Scale::Auto);
    assert_eq!("AUTO".parse::<Scale>().unwrap(), Scale::Auto);
    assert_eq!("2.5".parse::<Scale>().unwrap(), Scale::Fixed(2.5));
    assert!("0".parse::<Scale>().is_err());
    assert!("loud".parse::<Scale>().is_err());

    assert_eq!("raise".parse::<ClipPolicy>().unwrap(), ClipPolicy::Raise);
    assert_eq!("Ignore".parse::<ClipPolicy>().unwrap(), ClipPolicy::Ignore);
    assert!("explode".parse::<ClipPolicy>().is_err());
    assert_eq!(ClipPolicy::default(), ClipPolicy::Warn);
}

#[test]
fn test_scale_serde() {
    assert_eq!(serde_json::from_str::<Scale>("2").unwrap(), Scale::Fixed(2.0));
    assert_eq!(serde_json::from_str::<Scale>("\"auto\"").unwrap(), Scale::Auto);
    assert!(serde_json::from_str::<Scale>("-1").is_err());
    assert!(serde_json::from_str::<Scale>("\"max\"").is_err());

    assert_eq!(serde_json::to_string(&Scale::Auto).unwrap(), "\"auto\"");
    assert_eq!(serde_json::to_string(&Scale::Fixed(0.5)).unwrap(), "0.5");
    assert_eq!(
        serde_json::from_str::<ClipPolicy>("\"raise\"").unwrap(),
        ClipPolicy::Raise
    );
}
