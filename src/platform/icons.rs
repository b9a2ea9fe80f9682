//! Tray icon generation.
//!
//! Draws a small speaker as RGBA data: sound waves when playing, a cross
//! when muted.

/// Icon size in pixels.
pub const ICON_SIZE: u32 = 32;

const ACTIVE: (u8, u8, u8) = (0, 122, 255);
const MUTED: (u8, u8, u8) = (220, 60, 60);

/// Generate the tray icon for a speaker mute state as RGBA data.
pub fn generate_speaker_icon(muted: bool) -> Vec<u8> {
    let size = ICON_SIZE as usize;
    let mut rgba = vec![0u8; size * size * 4];

    let (r, g, b) = if muted { MUTED } else { ACTIVE };
    draw_disc(&mut rgba, size, (r, g, b));
    draw_speaker_shape(&mut rgba, size);

    if muted {
        draw_cross(&mut rgba, size);
    } else {
        draw_waves(&mut rgba, size);
    }

    rgba
}

fn put(rgba: &mut [u8], size: usize, x: usize, y: usize, value: u8) {
    if x < size && y < size {
        let idx = (y * size + x) * 4;
        rgba[idx] = value;
        rgba[idx + 1] = value;
        rgba[idx + 2] = value;
        rgba[idx + 3] = 255;
    }
}

/// Filled circle with an anti-aliased edge.
fn draw_disc(rgba: &mut [u8], size: usize, (r, g, b): (u8, u8, u8)) {
    let center = size as f32 / 2.0;
    let radius = size as f32 / 2.0 - 2.0;

    for y in 0..size {
        for x in 0..size {
            let idx = (y * size + x) * 4;
            let dx = x as f32 + 0.5 - center;
            let dy = y as f32 + 0.5 - center;
            let dist = (dx * dx + dy * dy).sqrt();

            let alpha = if dist < radius {
                255
            } else if dist < radius + 1.0 {
                ((radius + 1.0 - dist) * 255.0) as u8
            } else {
                continue;
            };
            rgba[idx] = r;
            rgba[idx + 1] = g;
            rgba[idx + 2] = b;
            rgba[idx + 3] = alpha;
        }
    }
}

/// Speaker body: a square magnet and a cone widening to the right.
fn draw_speaker_shape(rgba: &mut [u8], size: usize) {
    let mid = size / 2;

    for y in (mid - 3)..(mid + 3) {
        for x in 7..11 {
            put(rgba, size, x, y, 255);
        }
    }

    for (step, x) in (11..17).enumerate() {
        let half = 3 + step;
        for y in (mid - half)..(mid + half) {
            put(rgba, size, x, y, 255);
        }
    }
}

fn draw_waves(rgba: &mut [u8], size: usize) {
    let mid = size as f32 / 2.0;
    for radius in [4.0f32, 8.0] {
        let steps = 24;
        for i in 0..=steps {
            let angle = -0.8 + 1.6 * i as f32 / steps as f32;
            let x = 16.0 + radius * angle.cos();
            let y = mid + radius * angle.sin();
            put(rgba, size, x as usize + 2, y as usize, 255);
        }
    }
}

fn draw_cross(rgba: &mut [u8], size: usize) {
    let mid = size / 2;
    for i in 0..7 {
        put(rgba, size, 19 + i, mid - 3 + i, 255);
        put(rgba, size, 25 - i, mid - 3 + i, 255);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha_at(rgba: &[u8], x: usize, y: usize) -> u8 {
        rgba[(y * ICON_SIZE as usize + x) * 4 + 3]
    }

    #[test]
    fn test_icon_dimensions() {
        for muted in [false, true] {
            assert_eq!(
                generate_speaker_icon(muted).len(),
                (ICON_SIZE * ICON_SIZE * 4) as usize
            );
        }
    }

    #[test]
    fn test_corners_are_transparent() {
        let rgba = generate_speaker_icon(false);
        let last = ICON_SIZE as usize - 1;
        assert_eq!(alpha_at(&rgba, 0, 0), 0);
        assert_eq!(alpha_at(&rgba, last, last), 0);
    }

    #[test]
    fn test_muted_icon_differs() {
        let active = generate_speaker_icon(false);
        let muted = generate_speaker_icon(true);
        assert_ne!(active, muted);

        // Disc color shows through above the speaker body
        let idx = (5 * ICON_SIZE as usize + 16) * 4;
        assert_eq!(&muted[idx..idx + 3], &[MUTED.0, MUTED.1, MUTED.2]);
        assert_eq!(&active[idx..idx + 3], &[ACTIVE.0, ACTIVE.1, ACTIVE.2]);
    }
}
