use graymap::GrayImage;

/// Generates a simple high-contrast checkerboard image.
pub fn checkerboard_u8(width: usize, height: usize, cell: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let cx = x / cell;
            let cy = y / cell;
            let val = if (cx + cy) & 1 == 0 { 32u8 } else { 220u8 };
            img[y * width + x] = val;
        }
    }
    img
}

pub fn checkerboard(width: usize, height: usize, cell: usize) -> GrayImage {
    GrayImage::from_raw(width, height, 255, checkerboard_u8(width, height, cell))
        .expect("checkerboard buffer matches dimensions")
}

/// Deterministic pseudo-random levels (LCG), distinct per seed.
pub fn noise(width: usize, height: usize, seed: u32) -> GrayImage {
    let mut state = seed;
    let data = (0..width * height)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 24) as u8
        })
        .collect();
    GrayImage::from_raw(width, height, 255, data).expect("noise buffer matches dimensions")
}

/// Diagonal ramp: level `(x + y) * step`, saturating at 255.
pub fn diagonal_ramp(width: usize, height: usize, step: usize) -> GrayImage {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            data.push(((x + y) * step).min(255) as u8);
        }
    }
    GrayImage::from_raw(width, height, 255, data).expect("ramp buffer matches dimensions")
}
