use super::*;

fn flat_edge(w: u32, y: f32) -> BurnEdge {
    BurnEdge {
        ys: vec![y; w as usize],
        base_y: y,
    }
}

#[test]
fn band_covers_rows_near_the_edge_only() {
    let canvas = Canvas::new(4, 20).unwrap();
    let mask = band_mask(&flat_edge(4, 10.0), canvas, 2.0);
    let at = |y: usize| mask[y * 4];
    assert_eq!(at(9), 255);
    assert_eq!(at(10), 255);
    assert_eq!(at(0), 0);
    assert_eq!(at(19), 0);
}

#[test]
fn glow_leaves_far_pixels_untouched() {
    let canvas = Canvas::new(8, 40).unwrap();
    let mut frame = vec![0u8; canvas.byte_len()];
    for px in frame.chunks_exact_mut(4) {
        px.copy_from_slice(&[10, 20, 30, 255]);
    }
    let passes = [GlowPass {
        half_width: 2.0,
        opacity: 1.0,
        blur_radius: 1,
    }];
    apply_glow(&mut frame, &flat_edge(8, 20.0), canvas, &passes).unwrap();
    assert_eq!(&frame[0..4], &[10, 20, 30, 255]);
    let row20 = 20 * 8 * 4;
    assert_ne!(&frame[row20..row20 + 4], &[10, 20, 30, 255]);
}

#[test]
fn offscreen_edge_is_a_noop() {
    let canvas = Canvas::new(8, 8).unwrap();
    let mut frame = vec![7u8; canvas.byte_len()];
    let passes = [GlowPass {
        half_width: 2.0,
        opacity: 1.0,
        blur_radius: 0,
    }];
    apply_glow(&mut frame, &flat_edge(8, -50.0), canvas, &passes).unwrap();
    assert!(frame.iter().all(|&b| b == 7));
}
