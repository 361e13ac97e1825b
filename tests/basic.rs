use zenpalette::{color, Palette, PaletteBuilder, PaletteError, Swatch};

#[test]
fn uniform_red_buffer() {
    let pixels = vec![0xFFFF_0000u32; 16];
    let palette = PaletteBuilder::from_argb_pixels(pixels, 4, 4)
        .maximum_color_count(16)
        .generate()
        .unwrap();

    // Pure red passes the default filter (h = 0 sits below the 10..37
    // band) and quantizes to the top five bits of each channel.
    assert_eq!(palette.swatches().len(), 1);
    let swatch = &palette.swatches()[0];
    assert_eq!(swatch.rgb(), 0xFFF8_0000);
    assert_eq!(swatch.hex(), "#F80000");
    assert_eq!(swatch.population(), 16);

    assert_eq!(palette.dominant_swatch(), Some(swatch));
    assert_eq!(palette.vibrant_swatch(), Some(swatch));
}

#[test]
fn black_and_white_buffer_is_fully_filtered() {
    let mut pixels = vec![0xFF00_0000u32; 100];
    pixels.extend(vec![0xFFFF_FFFFu32; 100]);
    let palette = PaletteBuilder::from_argb_pixels(pixels, 10, 20)
        .generate()
        .unwrap();

    assert!(palette.swatches().is_empty());
    assert!(palette.dominant_swatch().is_none());
    assert!(palette.vibrant_swatch().is_none());
    assert!(palette.light_vibrant_swatch().is_none());
    assert!(palette.dark_vibrant_swatch().is_none());
    assert!(palette.muted_swatch().is_none());
    assert!(palette.light_muted_swatch().is_none());
    assert!(palette.dark_muted_swatch().is_none());
    assert_eq!(palette.dominant_color(0x1234), 0x1234);
}

#[test]
fn two_distinct_colors_with_filters_cleared() {
    // A = bluish (lower histogram key), 3 pixels; B = reddish, 1 pixel
    let a = color::rgb(64, 64, 200);
    let b = color::rgb(200, 64, 64);
    let pixels = vec![a, a, a, b];
    let palette = PaletteBuilder::from_argb_pixels(pixels, 2, 2)
        .maximum_color_count(2)
        .clear_filters()
        .generate()
        .unwrap();

    assert_eq!(palette.swatches().len(), 2);
    assert_eq!(palette.swatches()[0].population(), 3);
    assert_eq!(palette.swatches()[1].population(), 1);
    assert_eq!(palette.dominant_swatch().unwrap().population(), 3);
}

#[test]
fn single_pixel_image() {
    let pixels = vec![color::rgb(90, 140, 200)];
    let palette = PaletteBuilder::from_argb_pixels(pixels, 1, 1)
        .generate()
        .unwrap();
    assert_eq!(palette.swatches().len(), 1);
    assert_eq!(palette.swatches()[0].population(), 1);
}

#[test]
fn output_never_exceeds_max_colors() {
    let width = 32usize;
    let height = 32usize;
    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / width) as u8;
            let g = (y * 255 / height) as u8;
            pixels.push(color::rgb(r, g, 128));
        }
    }

    for max in [2u32, 4, 8, 16] {
        let palette = PaletteBuilder::from_argb_pixels(pixels.clone(), 32, 32)
            .clear_filters()
            .maximum_color_count(max)
            .generate()
            .unwrap();
        assert!(palette.swatches().len() <= max as usize, "max {max}");
        assert!(!palette.swatches().is_empty());
    }
}

#[test]
fn populations_sum_to_pixel_count_without_filters() {
    let width = 24usize;
    let height = 24usize;
    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            pixels.push(color::rgb((x * 11) as u8, (y * 9) as u8, ((x + y) * 5) as u8));
        }
    }

    let palette = PaletteBuilder::from_argb_pixels(pixels, 24, 24)
        .clear_filters()
        .maximum_color_count(8)
        .generate()
        .unwrap();

    let total: u32 = palette.swatches().iter().map(Swatch::population).sum();
    assert_eq!(total as usize, width * height);

    for swatch in palette.swatches() {
        assert!(swatch.population() >= 1);
        let [h, s, l] = swatch.hsl();
        assert!((0.0..360.0).contains(&h));
        assert!((0.0..=1.0).contains(&s));
        assert!((0.0..=1.0).contains(&l));
    }
}

#[test]
fn generation_is_deterministic() {
    let pixels: Vec<u32> = (0..1024u32)
        .map(|i| color::rgb((i * 3 % 256) as u8, (i * 7 % 256) as u8, (i % 256) as u8))
        .collect();

    let a = PaletteBuilder::from_argb_pixels(pixels.clone(), 32, 32)
        .generate()
        .unwrap();
    let b = PaletteBuilder::from_argb_pixels(pixels, 32, 32)
        .generate()
        .unwrap();

    assert_eq!(a.swatches(), b.swatches());
    assert_eq!(a.dominant_swatch(), b.dominant_swatch());
}

#[test]
fn palette_from_own_swatches_round_trips() {
    let width = 16usize;
    let mut pixels = Vec::new();
    for i in 0..width * width {
        let c = match i % 3 {
            0 => color::rgb(248, 0, 0),
            1 => color::rgb(96, 0, 0),
            _ => color::rgb(120, 136, 120),
        };
        pixels.push(c);
    }
    let first = PaletteBuilder::from_argb_pixels(pixels, 16, 16)
        .generate()
        .unwrap();

    let second = PaletteBuilder::from_swatches(first.swatches().to_vec())
        .generate()
        .unwrap();

    assert_eq!(first.dominant_swatch(), second.dominant_swatch());
    assert_eq!(first.vibrant_swatch(), second.vibrant_swatch());
    assert_eq!(first.dark_vibrant_swatch(), second.dark_vibrant_swatch());
    assert_eq!(first.muted_swatch(), second.muted_swatch());
}

#[test]
fn from_swatches_without_targets_keeps_dominant_only() {
    let swatches = vec![
        Swatch::new(color::rgb(10, 20, 30), 2),
        Swatch::new(color::rgb(200, 30, 30), 9),
    ];
    let palette = Palette::from_swatches(swatches).unwrap();
    assert!(palette.targets().is_empty());
    assert_eq!(palette.dominant_swatch().unwrap().population(), 9);
    assert!(palette.vibrant_swatch().is_none());
}

#[test]
fn error_paths() {
    assert!(matches!(
        PaletteBuilder::from_argb_pixels(vec![0; 5], 2, 2).generate(),
        Err(PaletteError::BufferSizeMismatch { len: 5, .. })
    ));
    assert!(matches!(
        PaletteBuilder::from_argb_pixels(Vec::new(), 0, 0).generate(),
        Err(PaletteError::EmptyInput)
    ));
    assert!(matches!(
        PaletteBuilder::from_swatches(Vec::new()).generate(),
        Err(PaletteError::EmptyInput)
    ));
    assert!(matches!(
        color::with_alpha(0, 300),
        Err(PaletteError::InvalidAlpha(300))
    ));
    let translucent = color::argb(80, 0, 0, 0);
    assert!(matches!(
        color::contrast_ratio(color::WHITE, translucent),
        Err(PaletteError::TranslucentBackground)
    ));
}

#[test]
fn default_targets_are_the_builtin_six() {
    let palette = PaletteBuilder::from_swatches(vec![Swatch::new(0, 1)])
        .generate()
        .unwrap();
    assert_eq!(palette.targets().len(), 6);
}
