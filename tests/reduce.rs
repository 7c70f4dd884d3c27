//! Frame reducer tests.

use image::{Rgb, RgbImage};

use filmstripe::{FilmstripeError, reduce};

#[test]
fn uniform_rows_reduce_to_their_exact_colour() {
    let frame = RgbImage::from_pixel(4, 3, Rgb([7, 250, 13]));

    let column = reduce::frame_column(&frame).expect("reduce should succeed");

    assert_eq!(column.len(), 3);
    for pixel in &column {
        assert_eq!(*pixel, Rgb([7, 250, 13]), "no drift when all inputs are equal");
    }
}

#[test]
fn mean_uses_truncating_division() {
    let mut frame = RgbImage::new(2, 1);
    frame.put_pixel(0, 0, Rgb([0, 0, 0]));
    frame.put_pixel(1, 0, Rgb([10, 20, 30]));

    let column = reduce::frame_column(&frame).expect("reduce should succeed");

    // (0 + 10) / 2, (0 + 20) / 2, (0 + 30) / 2 with integer truncation.
    assert_eq!(column, vec![Rgb([5, 10, 15])]);
}

#[test]
fn truncation_rounds_toward_zero() {
    let mut frame = RgbImage::new(3, 1);
    frame.put_pixel(0, 0, Rgb([1, 1, 255]));
    frame.put_pixel(1, 0, Rgb([0, 1, 255]));
    frame.put_pixel(2, 0, Rgb([0, 0, 255]));

    let column = reduce::frame_column(&frame).expect("reduce should succeed");

    // Sums are 1, 2, 765; divided by 3 that truncates to 0, 0, 255.
    assert_eq!(column, vec![Rgb([0, 0, 255])]);
}

#[test]
fn rows_reduce_independently() {
    let mut frame = RgbImage::new(2, 2);
    frame.put_pixel(0, 0, Rgb([100, 0, 0]));
    frame.put_pixel(1, 0, Rgb([200, 0, 0]));
    frame.put_pixel(0, 1, Rgb([0, 0, 40]));
    frame.put_pixel(1, 1, Rgb([0, 0, 60]));

    let column = reduce::frame_column(&frame).expect("reduce should succeed");

    assert_eq!(column, vec![Rgb([150, 0, 0]), Rgb([0, 0, 50])]);
}

#[test]
fn reduction_is_idempotent() {
    let mut frame = RgbImage::new(3, 2);
    for (index, pixel) in frame.pixels_mut().enumerate() {
        *pixel = Rgb([index as u8 * 17, 255 - index as u8, 3]);
    }

    let first = reduce::frame_column(&frame).expect("reduce should succeed");
    let second = reduce::frame_column(&frame).expect("reduce should succeed");

    assert_eq!(first, second);
}

#[test]
fn zero_width_frame_is_rejected() {
    let frame = RgbImage::new(0, 3);

    let result = reduce::frame_column(&frame);

    assert!(matches!(result, Err(FilmstripeError::EmptyRow)));
}

#[test]
fn zero_height_frame_reduces_to_nothing() {
    let frame = RgbImage::new(3, 0);

    let column = reduce::frame_column(&frame).expect("reduce should succeed");

    assert!(column.is_empty());
}
