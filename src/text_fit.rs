//! Largest-size search for rendering a word inside a bounding box.
//!
//! The search assumes the measured extent never shrinks as the size grows.
//! Layout engines that reflow (wrapping, ligatures, hinting jumps) can break
//! that assumption, in which case the result is still in range but may not be
//! the true maximum.

use unicode_width::UnicodeWidthStr;

pub const MIN_SIZE: u16 = 1;
pub const MAX_SIZE: u16 = 500;

/// Reports the rendered extent `(width, height)` of `text` at `size`.
pub trait Measure {
    fn measure(&self, text: &str, size: u16) -> (u32, u32);
}

/// Terminal cells: every glyph is scaled to `size` columns per display column
/// and `size` rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMeasure;

impl Measure for CellMeasure {
    fn measure(&self, text: &str, size: u16) -> (u32, u32) {
        (text.width() as u32 * size as u32, size as u32)
    }
}

/// Binary search for the largest size in `MIN_SIZE..=MAX_SIZE` whose extent
/// stays within `max_width` and, if given, `max_height`. Falls back to
/// `MIN_SIZE` when nothing fits.
pub fn fit_size<M: Measure + ?Sized>(
    measure: &M,
    text: &str,
    max_width: u32,
    max_height: Option<u32>,
) -> u16 {
    let fits = |size: u16| {
        let (width, height) = measure.measure(text, size);
        width <= max_width && max_height.map_or(true, |max| height <= max)
    };

    let (mut lo, mut hi) = (MIN_SIZE, MAX_SIZE);
    while lo < hi {
        let mid = lo + (hi - lo + 1) / 2;
        if fits(mid) {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }

    lo
}
