use asciify::{
    compute_grid, fit_scale, present, AsciiError, AsciiRenderer, GlyphRamp, RenderConfig,
    SourceImage, TargetGeometry, BASE_LINE_HEIGHT, MIN_LINE_HEIGHT,
};
use image::{DynamicImage, Rgba, RgbaImage};

const CLASSIC: &str = "@#%*+=-:. ";

fn source_from_fn(
    width: u32,
    height: u32,
    f: impl FnMut(u32, u32) -> Rgba<u8>,
) -> SourceImage {
    SourceImage::new(DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, f))).unwrap()
}

fn uniform(width: u32, height: u32, rgb: [u8; 3]) -> SourceImage {
    source_from_fn(width, height, |_, _| Rgba([rgb[0], rgb[1], rgb[2], 255]))
}

fn config(columns: u16, ramp: &str) -> RenderConfig {
    RenderConfig { columns, ramp: GlyphRamp::new(ramp), ..RenderConfig::default() }
}

#[test]
fn two_by_two_stripes_render_one_row() {
    let white = Rgba([255, 255, 255, 255]);
    let black = Rgba([0, 0, 0, 255]);
    let source = source_from_fn(2, 2, |x, _| if x == 0 { white } else { black });

    let grid = compute_grid(Some(&source), &config(2, "#. "), 0.5).unwrap();

    assert_eq!((grid.columns, grid.rows), (2, 1));
    let glyphs: Vec<char> = grid.cells.iter().map(|cell| cell.ch).collect();
    assert_eq!(glyphs, vec!['#', ' ']);
    assert_eq!(grid.cells[0].fg, [255, 255, 255]);
    assert_eq!(grid.cells[1].fg, [0, 0, 0]);
}

#[test]
fn white_and_black_hit_the_ramp_ends() {
    let white = compute_grid(Some(&uniform(1, 1, [255; 3])), &config(1, CLASSIC), 1.0).unwrap();
    assert_eq!(white.cells.len(), 1);
    assert_eq!(white.cells[0].ch, '@');

    let black = compute_grid(Some(&uniform(1, 1, [0; 3])), &config(1, CLASSIC), 1.0).unwrap();
    assert_eq!(black.cells[0].ch, ' ');
}

#[test]
fn cell_count_matches_geometry() {
    let source = source_from_fn(173, 91, |x, y| Rgba([(x % 256) as u8, (y % 256) as u8, 40, 255]));
    for columns in [1u16, 2, 13, 80, 200] {
        for multiplier in [0.25f32, 1.0, 1.75] {
            let cfg = RenderConfig { aspect_multiplier: multiplier, ..config(columns, CLASSIC) };
            let grid = compute_grid(Some(&source), &cfg, 0.55).unwrap();
            let expected = TargetGeometry::derive(columns, 173, 91, 0.55, multiplier).unwrap();
            assert_eq!((grid.columns, grid.rows), (expected.columns, expected.rows));
            assert_eq!(grid.cells.len(), grid.columns as usize * grid.rows as usize);
            assert!(grid.rows >= 1);
        }
    }
}

#[test]
fn rendering_is_deterministic() {
    let source = source_from_fn(64, 48, |x, y| Rgba([(x * 4) as u8, (y * 5) as u8, 99, 255]));
    let cfg = RenderConfig { edge_boost: true, ..config(30, CLASSIC) };
    let first = compute_grid(Some(&source), &cfg, 0.5).unwrap();
    let second = compute_grid(Some(&source), &cfg, 0.5).unwrap();
    assert_eq!(first, second);
}

#[test]
fn inverting_mid_gray_mirrors_the_index() {
    let source = uniform(4, 4, [128; 3]);
    let plain = compute_grid(Some(&source), &config(2, CLASSIC), 0.5).unwrap();
    let inverted = compute_grid(
        Some(&source),
        &RenderConfig { invert: true, ..config(2, CLASSIC) },
        0.5,
    )
    .unwrap();

    let ramp: Vec<char> = CLASSIC.chars().collect();
    let index_of = |ch: char| ramp.iter().position(|&c| c == ch).unwrap();
    for (a, b) in plain.cells.iter().zip(&inverted.cells) {
        assert_eq!(index_of(a.ch) + index_of(b.ch), ramp.len() - 1);
    }
}

#[test]
fn booster_keeps_extremes() {
    let cfg = RenderConfig { edge_boost: true, ..config(1, CLASSIC) };

    let white = compute_grid(Some(&uniform(1, 1, [255; 3])), &cfg, 1.0).unwrap();
    assert_eq!(white.cells[0].fg, [255, 255, 255]);
    assert_eq!(white.cells[0].ch, '@');

    let black = compute_grid(Some(&uniform(1, 1, [0; 3])), &cfg, 1.0).unwrap();
    assert_eq!(black.cells[0].fg, [0, 0, 0]);
    assert_eq!(black.cells[0].ch, ' ');
}

#[test]
fn booster_darkens_shadows_and_lifts_highlights() {
    let cfg = config(1, CLASSIC);
    let boosted = RenderConfig { edge_boost: true, ..cfg.clone() };

    let dark = uniform(1, 1, [70; 3]);
    let before = compute_grid(Some(&dark), &cfg, 1.0).unwrap().cells[0].fg[0];
    let after = compute_grid(Some(&dark), &boosted, 1.0).unwrap().cells[0].fg[0];
    assert!(after < before);

    let light = uniform(1, 1, [190; 3]);
    let before = compute_grid(Some(&light), &cfg, 1.0).unwrap().cells[0].fg[0];
    let after = compute_grid(Some(&light), &boosted, 1.0).unwrap().cells[0].fg[0];
    assert!(after > before);
}

#[test]
fn missing_source_is_an_empty_result() {
    let grid = compute_grid(None, &RenderConfig::default(), 0.5).unwrap();
    assert!(grid.is_empty());
    assert_eq!((grid.columns, grid.rows), (0, 0));
    assert_eq!(present::plain_text(&grid), "");
}

#[test]
fn invalid_configuration_is_rejected() {
    let source = uniform(8, 8, [30; 3]);
    let zero_columns = config(0, CLASSIC);
    assert!(matches!(
        compute_grid(Some(&source), &zero_columns, 0.5),
        Err(AsciiError::InvalidConfig(_))
    ));

    let bad_multiplier = RenderConfig { aspect_multiplier: 0.0, ..config(8, CLASSIC) };
    assert!(matches!(
        compute_grid(Some(&source), &bad_multiplier, 0.5),
        Err(AsciiError::InvalidConfig(_))
    ));
}

#[test]
fn oversized_grids_are_resource_errors() {
    let tall = uniform(1, 400, [30; 3]);
    let result = compute_grid(Some(&tall), &config(5000, CLASSIC), 0.5);
    assert!(matches!(result, Err(AsciiError::ResourceExhaustion { .. })));
}

#[test]
fn tall_sources_under_the_cell_budget_render() {
    let tall = uniform(1, 200_000, [255; 3]);
    let grid = compute_grid(Some(&tall), &config(1, CLASSIC), 0.5).unwrap();
    assert_eq!((grid.columns, grid.rows), (1, 100_000));
    assert_eq!(grid.cells.len(), 100_000);
}

#[test]
fn empty_ramp_falls_back_to_spaces() {
    let grid = compute_grid(Some(&uniform(3, 3, [10, 200, 30])), &config(3, ""), 0.5).unwrap();
    assert!(grid.cells.iter().all(|cell| cell.ch == ' '));
}

#[test]
fn two_phase_render_matches_one_shot() {
    let source = source_from_fn(40, 30, |x, y| Rgba([(x * 6) as u8, (y * 8) as u8, 0, 255]));
    let cfg = config(16, CLASSIC);
    let renderer = AsciiRenderer::new(0.5);

    let prepared = renderer.prepare(Some(&source), &cfg).unwrap();
    let geometry = prepared.geometry().unwrap();
    let grid = prepared.compute();

    assert_eq!((grid.columns, grid.rows), (geometry.columns, geometry.rows));
    assert_eq!(grid, compute_grid(Some(&source), &cfg, 0.5).unwrap());
}

#[test]
fn fit_scale_stays_between_floor_and_baseline() {
    for (columns, rows) in [(1u32, 1u32), (80, 40), (300, 120), (2000, 900)] {
        for (w, h) in [(100.0f32, 80.0f32), (1200.0, 800.0), (10_000.0, 10_000.0)] {
            let fit = fit_scale(columns, rows, 0.5, w, h);
            assert!(fit.line_height <= BASE_LINE_HEIGHT);
            assert!(fit.line_height >= MIN_LINE_HEIGHT);
            assert_eq!(fit.char_width, 0.5 * fit.line_height);
            if fit.line_height > MIN_LINE_HEIGHT {
                assert!(fit.fits(columns, rows, w, h));
            }
        }
    }
}
