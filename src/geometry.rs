use imageproc::contours::Contour;
use imageproc::point::Point;
use imageproc::rect::Rect;

/// Axis-aligned bounding rect of a contour's points.
pub fn contour_bounding_rect(contour: &Contour<i32>) -> Rect {
    let mut min_x = i32::MAX;
    let mut min_y = i32::MAX;
    let mut max_x = i32::MIN;
    let mut max_y = i32::MIN;

    for point in &contour.points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Rect::at(min_x, min_y).of_size((max_x - min_x + 1) as u32, (max_y - min_y + 1) as u32)
}

pub fn aspect_ratio(rect: &Rect) -> f32 {
    rect.width() as f32 / rect.height() as f32
}

pub fn center_of_rect(rect: &Rect) -> Point<f32> {
    Point::new(
        rect.left() as f32 + rect.width() as f32 / 2.0,
        rect.top() as f32 + rect.height() as f32 / 2.0,
    )
}
