use crate::palette::Rgb;
use crate::surface::PixelBuffer;
use ratatui::style::Color;

/// Braille character rendering for high-resolution terminal graphics.
/// Each Braille character represents a 2x4 grid of dots (8 dots total).
///
/// Dot positions and their bit values:
/// ```text
/// (0,0)=0x01  (1,0)=0x08
/// (0,1)=0x02  (1,1)=0x10
/// (0,2)=0x04  (1,2)=0x20
/// (0,3)=0x40  (1,3)=0x80
/// ```
///
/// Unicode Braille patterns: U+2800 to U+28FF (256 patterns)
const BRAILLE_BASE: u32 = 0x2800;

/// Dot position to bit mapping for Braille characters
const BRAILLE_DOTS: [[u8; 4]; 2] = [
    [0x01, 0x02, 0x04, 0x40], // Left column (x=0): rows 0,1,2,3
    [0x08, 0x10, 0x20, 0x80], // Right column (x=1): rows 0,1,2,3
];

/// Dimmest a lit cell gets, so tiny pixels stay visible
const MIN_BRIGHTNESS: f32 = 0.35;

/// A single rendered Braille cell with position and color
#[derive(Clone, Copy)]
pub struct BrailleCell {
    pub x: u16,
    pub y: u16,
    pub char: char,
    pub color: Color,
}

/// Render the pixel buffer to Braille characters, one buffer pixel per dot.
/// Cell brightness follows how much of its dots the pixels cover.
pub fn render_to_braille(buffer: &PixelBuffer, canvas_width: u16, canvas_height: u16) -> Vec<BrailleCell> {
    let mut cells = Vec::new();

    for cy in 0..canvas_height {
        for cx in 0..canvas_width {
            let mut pattern: u8 = 0;
            let mut total_coverage: f32 = 0.0;
            let mut dot_count: usize = 0;
            let mut strongest: Option<(Rgb, f32)> = None;

            let base_bx = cx as usize * 2;
            let base_by = cy as usize * 4;

            for dx in 0..2 {
                for dy in 0..4 {
                    if let Some(dot) = buffer.get(base_bx + dx, base_by + dy) {
                        pattern |= BRAILLE_DOTS[dx][dy];
                        dot_count += 1;
                        total_coverage += dot.coverage;
                        if strongest.map_or(true, |(_, c)| dot.coverage > c) {
                            strongest = Some((dot.color, dot.coverage));
                        }
                    }
                }
            }

            // Only emit cells that have at least one dot
            if let Some((color, _)) = strongest {
                let braille_char = char::from_u32(BRAILLE_BASE + pattern as u32).unwrap_or(' ');
                let avg = total_coverage / dot_count as f32;
                let brightness = MIN_BRIGHTNESS + (1.0 - MIN_BRIGHTNESS) * avg;

                cells.push(BrailleCell {
                    x: cx,
                    y: cy,
                    char: braille_char,
                    color: color.scaled(brightness).into(),
                });
            }
        }
    }

    cells
}

/// Surface size (in dots) behind a canvas of the given character size
pub fn calculate_surface_size(canvas_width: u16, canvas_height: u16) -> (usize, usize) {
    // Braille gives 2x4 resolution per character
    (canvas_width as usize * 2, canvas_height as usize * 4)
}
