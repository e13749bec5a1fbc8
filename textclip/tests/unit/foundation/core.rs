use super::*;

#[test]
fn fps_validation() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    assert_eq!(Fps::whole(24).unwrap().as_f64(), 24.0);
}

#[test]
fn frame_count_rounds_partial_frames_up() {
    let fps = Fps::whole(10).unwrap();
    assert_eq!(fps.secs_to_frames_ceil(2.0), 20);
    assert_eq!(fps.secs_to_frames_ceil(2.05), 21);
    assert_eq!(fps.secs_to_frames_ceil(0.0), 0);

    let fps = Fps::whole(60).unwrap();
    assert_eq!(fps.secs_to_frames_ceil(3.0), 180);
}

#[test]
fn frame_to_secs_uses_rational_fps() {
    let fps = Fps::new(30_000, 1001).unwrap();
    let t = fps.frame_to_secs(FrameIndex(30));
    assert!((t - 1.001).abs() < 1e-9);
}

#[test]
fn canvas_parses_width_comma_height() {
    let c: Canvas = "1280,720".parse().unwrap();
    assert_eq!(
        c,
        Canvas {
            width: 1280,
            height: 720
        }
    );
    let c: Canvas = " 64 , 32 ".parse().unwrap();
    assert_eq!(c.width, 64);
    assert_eq!(c.height, 32);
}

#[test]
fn canvas_rejects_malformed_sizes() {
    for bad in ["1920", "1920x1080", "a,b", "0,10", "-5,10", ""] {
        let err = bad.parse::<Canvas>().unwrap_err();
        assert!(matches!(err, TextclipError::Format(_)), "{bad}: {err}");
    }
}

#[test]
fn rgb8_parses_comma_triples() {
    let c: Rgb8 = "255,128,0".parse().unwrap();
    assert_eq!(c, Rgb8::new(255, 128, 0));
    assert_eq!(image::Rgb::from(c), image::Rgb([255, 128, 0]));
}
