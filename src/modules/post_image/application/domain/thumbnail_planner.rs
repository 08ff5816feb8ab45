use crate::post_image::application::domain::entities::{ImageDimensions, ResizePlan};

/// Decides whether a thumbnail must be scaled down to fit `max_resolution`.
///
/// Only the longer side is bounded and the aspect ratio is kept. Square images
/// are never resized, whatever their size.
pub fn plan_resize(dimensions: ImageDimensions, max_resolution: u32) -> ResizePlan {
    let width = dimensions.width();
    let height = dimensions.height();
    let aspect_ratio = width as f64 / height as f64;
    let max = max_resolution as f64;

    // portrait
    if width < height && height > max_resolution {
        return ResizePlan {
            should_resize: true,
            target_width: (aspect_ratio * max).round() as u32,
            target_height: max_resolution,
        };
    }

    // landscape
    if width > height && width > max_resolution {
        return ResizePlan {
            should_resize: true,
            target_width: max_resolution,
            target_height: (max / aspect_ratio).round() as u32,
        };
    }

    ResizePlan {
        should_resize: false,
        target_width: width,
        target_height: height,
    }
}
