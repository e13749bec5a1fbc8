use super::*;

fn pattern(w: u32, h: u32) -> RgbImage {
    RgbImage::from_fn(w, h, |x, y| {
        image::Rgb([(x * 7 + y) as u8, (y * 13 + x) as u8, (x ^ y) as u8])
    })
}

#[test]
fn pass_through_frames_are_identical_and_glitched_keep_dimensions() {
    let original = pattern(64, 48);
    let (mut untouched, mut glitched) = (0, 0);
    for seed in 0..64u64 {
        let mut frame = original.clone();
        let mut rng = StdRng::seed_from_u64(seed);
        let changed = glitch_frame(&mut frame, 20, &mut rng);
        assert_eq!(frame.dimensions(), original.dimensions());
        if changed {
            glitched += 1;
        } else {
            assert_eq!(frame, original, "seed {seed}");
            untouched += 1;
        }
    }
    assert!(untouched > 0);
    assert!(glitched > 0);
}

#[test]
fn glitch_only_moves_pixels_within_rows() {
    let original = pattern(40, 60);
    for seed in 0..32u64 {
        let mut frame = original.clone();
        if !glitch_frame(&mut frame, 15, &mut StdRng::seed_from_u64(seed)) {
            continue;
        }
        for y in 0..original.height() {
            for c in 0..3 {
                let mut a: Vec<u8> = (0..40).map(|x| original.get_pixel(x, y)[c]).collect();
                let mut b: Vec<u8> = (0..40).map(|x| frame.get_pixel(x, y)[c]).collect();
                a.sort_unstable();
                b.sort_unstable();
                assert_eq!(a, b, "seed {seed} row {y} channel {c}");
            }
        }
    }
}

#[test]
fn tiny_frames_do_not_panic() {
    for (w, h) in [(1, 1), (3, 2), (1, 9), (8, 4)] {
        let mut frame = pattern(w, h);
        for seed in 0..16u64 {
            glitch_frame(&mut frame, 20, &mut StdRng::seed_from_u64(seed));
            assert_eq!(frame.dimensions(), (w, h));
        }
    }
}

#[test]
fn roll_row_wraps_in_both_directions() {
    let mut frame = RgbImage::from_fn(4, 1, |x, _| image::Rgb([x as u8; 3]));
    roll_row(&mut frame, 0, 1, 0..3);
    assert_eq!(frame.get_pixel(0, 0).0, [3, 3, 3]);
    assert_eq!(frame.get_pixel(1, 0).0, [0, 0, 0]);
    roll_row(&mut frame, 0, -1, 0..3);
    assert_eq!(frame.get_pixel(0, 0).0, [0, 0, 0]);

    roll_row(&mut frame, 0, -1, 2..3);
    assert_eq!(frame.get_pixel(0, 0).0, [0, 0, 1]);
    assert_eq!(frame.get_pixel(3, 0).0, [3, 3, 0]);
}

#[test]
fn seeded_effect_is_reproducible() {
    let original = pattern(32, 32);
    let mut a = GlitchEffect::new(20, Some(7));
    let mut b = GlitchEffect::new(20, Some(7));
    assert_eq!(a.intensity(), 20);
    for _ in 0..10 {
        let (mut fa, mut fb) = (original.clone(), original.clone());
        assert_eq!(a.apply(&mut fa), b.apply(&mut fb));
        assert_eq!(fa, fb);
    }
}
