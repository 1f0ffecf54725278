#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use imgconv::Image;
use imgconv::rgb::RGB8;

pub fn checkerboard(w: usize, h: usize) -> Image {
    let mut image = Image::new(w, h, Image::BLACK);
    for y in 0..h {
        for (x, px) in image.row_mut(y).iter_mut().enumerate() {
            *px = if (x + y) % 2 == 0 {
                RGB8::new(200, 220, 240)
            } else {
                RGB8::new(10, 40, 70)
            };
        }
    }
    image
}

pub fn noise_pattern(w: usize, h: usize, seed: u32) -> Image {
    let mut image = Image::new(w, h, Image::BLACK);
    let mut state: u32 = seed | 1;
    for px in image.pixels_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *px = RGB8::new(state as u8, (state >> 8) as u8, (state >> 16) as u8);
    }
    image
}

/// Unique path under the system temp dir; the file is not created.
pub fn temp_path(name: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!("imgconv-tests-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(format!("{n}-{name}"))
}
