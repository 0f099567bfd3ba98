//! Rotation about a pivot.

/// Rotates `(x, y)` about `(center_x, center_y)` by `angle_degrees`,
/// counter-clockwise in a y-up frame.
///
/// The angle is normalized into `[0, 360)` before conversion to radians.
pub fn rotate_point(x: f64, y: f64, center_x: f64, center_y: f64, angle_degrees: f64) -> (f64, f64) {
    let (sin, cos) = angle_degrees.rem_euclid(360.0).to_radians().sin_cos();

    let tx = x - center_x;
    let ty = y - center_y;

    (
        tx * cos - ty * sin + center_x,
        tx * sin + ty * cos + center_y,
    )
}
