use super::*;

const RED: Rgb8 = Rgb8::new(255, 0, 0);
const GREEN: Rgb8 = Rgb8::new(0, 255, 0);
const BLUE: Rgb8 = Rgb8::new(0, 0, 255);

fn row(img: &RgbImage, y: u32) -> Vec<[u8; 3]> {
    (0..img.width()).map(|x| img.get_pixel(x, y).0).collect()
}

#[test]
fn single_stop_is_solid() {
    let img = gradient_image(7, 5, &[Rgb8::new(12, 34, 56)]).unwrap();
    assert_eq!(img.dimensions(), (7, 5));
    assert!(img.pixels().all(|p| p.0 == [12, 34, 56]));
}

#[test]
fn two_stops_hit_both_ends() {
    let img = gradient_image(4, 11, &[RED, GREEN]).unwrap();
    assert!(row(&img, 0).iter().all(|p| *p == [255, 0, 0]));
    assert!(row(&img, 10).iter().all(|p| *p == [0, 255, 0]));
    // Midpoint is a truncated 50/50 mix.
    assert_eq!(img.get_pixel(0, 5).0, [127, 127, 0]);
}

#[test]
fn rows_are_uniform() {
    let img = gradient_image(9, 6, &[RED, GREEN, BLUE]).unwrap();
    for y in 0..img.height() {
        let r = row(&img, y);
        assert!(r.iter().all(|p| *p == r[0]), "row {y}");
    }
}

#[test]
fn three_stops_pass_through_the_middle_stop() {
    let img = gradient_image(1, 5, &[RED, GREEN, BLUE]).unwrap();
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0]);
    assert_eq!(img.get_pixel(0, 2).0, [0, 255, 0]);
    assert_eq!(img.get_pixel(0, 4).0, [0, 0, 255]);
}

#[test]
fn height_one_uses_first_stop() {
    let img = gradient_image(3, 1, &[BLUE, RED]).unwrap();
    assert_eq!(row(&img, 0), vec![[0, 0, 255]; 3]);
}

#[test]
fn rejects_empty_stops_and_zero_dims() {
    assert!(matches!(
        gradient_image(4, 4, &[]),
        Err(TextclipError::Validation(_))
    ));
    assert!(matches!(
        gradient_image(0, 4, &[RED]),
        Err(TextclipError::Validation(_))
    ));
    assert!(matches!(
        gradient_image(4, 0, &[RED]),
        Err(TextclipError::Validation(_))
    ));
}

#[test]
fn clips_carry_duration_and_canvas_size() {
    let canvas = Canvas::new(8, 6).unwrap();
    let clip = solid_clip(canvas, GREEN, 2.5).unwrap();
    assert_eq!(clip.duration, 2.5);
    assert_eq!(clip.image.dimensions(), (8, 6));
    assert!(clip.image.pixels().all(|p| p.0 == [0, 255, 0]));

    let clip = create_gradient_clip(canvas, &[RED, BLUE], 1.0).unwrap();
    assert_eq!(clip.image.get_pixel(0, 5).0, [0, 0, 255]);
}
