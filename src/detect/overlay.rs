//! Box overlays burned into RGB frames.

use super::result::Detection;
use crate::frame::Frame;

/// Outline thickness in pixels.
pub const BOX_THICKNESS: i32 = 2;
/// Height of the score tab drawn above each box.
pub const TAB_HEIGHT: i32 = 6;

// Ultralytics default palette.
const PALETTE: [[u8; 3]; 20] = [
    [0xFF, 0x38, 0x38],
    [0xFF, 0x9D, 0x97],
    [0xFF, 0x70, 0x1F],
    [0xFF, 0xB2, 0x1D],
    [0xCF, 0xD2, 0x31],
    [0x48, 0xF9, 0x0A],
    [0x92, 0xCC, 0x17],
    [0x3D, 0xDB, 0x86],
    [0x1A, 0x93, 0x34],
    [0x00, 0xD4, 0xBB],
    [0x2C, 0x99, 0xA8],
    [0x00, 0xC2, 0xFF],
    [0x34, 0x45, 0x93],
    [0x64, 0x73, 0xFF],
    [0x00, 0x18, 0xEC],
    [0x84, 0x38, 0xFF],
    [0x52, 0x00, 0x85],
    [0xCB, 0x38, 0xFF],
    [0xFF, 0x95, 0xC8],
    [0xFF, 0x37, 0xC7],
];

pub fn class_color(class_id: usize) -> [u8; 3] {
    PALETTE[class_id % PALETTE.len()]
}

/// Draw one detection: a class-colored outline plus a filled tab whose width
/// tracks the score.
pub fn draw_detection(frame: &mut Frame, detection: &Detection) {
    if frame.width == 0 || frame.height == 0 {
        return;
    }
    let max_x = frame.width as i32 - 1;
    let max_y = frame.height as i32 - 1;
    let left = (detection.x1.round() as i32).clamp(0, max_x);
    let top = (detection.y1.round() as i32).clamp(0, max_y);
    let right = (detection.x2.round() as i32).clamp(0, max_x);
    let bottom = (detection.y2.round() as i32).clamp(0, max_y);
    if right <= left || bottom <= top {
        return;
    }

    let color = class_color(detection.class_id);
    for inset in 0..BOX_THICKNESS {
        draw_rectangle(
            frame,
            left + inset,
            top + inset,
            right - inset,
            bottom - inset,
            color,
        );
    }

    let score = detection.confidence.clamp(0.0, 1.0);
    let tab_width = (((right - left) as f32 * score).round() as i32).max(1);
    let (tab_top, tab_bottom) = if top >= TAB_HEIGHT {
        (top - TAB_HEIGHT, top - 1)
    } else {
        (top, top + TAB_HEIGHT - 1)
    };
    fill_rect(frame, left, tab_top, left + tab_width - 1, tab_bottom, color);
}

fn draw_rectangle(frame: &mut Frame, left: i32, top: i32, right: i32, bottom: i32, color: [u8; 3]) {
    if right < left || bottom < top {
        return;
    }
    for x in left..=right {
        frame.put_pixel(x, top, color);
        frame.put_pixel(x, bottom, color);
    }
    for y in top..=bottom {
        frame.put_pixel(left, y, color);
        frame.put_pixel(right, y, color);
    }
}

fn fill_rect(frame: &mut Frame, left: i32, top: i32, right: i32, bottom: i32, color: [u8; 3]) {
    for y in top..=bottom {
        for x in left..=right {
            frame.put_pixel(x, y, color);
        }
    }
}
