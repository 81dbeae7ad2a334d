//! Integration tests for paintctx-rs.

use paintctx_rs::{
    ColorComponent, CompOp, Context, ContextError, ExtendMode, FillRule, Gradient, Image,
    ImageFormat, Matrix2D, Path, Pattern, Point, Rect, RectI, Rgba32, StrokeCap,
    StrokeCapPosition, StrokeJoin, Style,
};
use rstest::rstest;

fn blank(width: u32, height: u32) -> Image {
    Image::new(width, height, ImageFormat::Prgb32).unwrap()
}

fn manual_context(image: &Image) -> Context {
    Context::builder().flush_threshold(0).build_with_image(image)
}

/// Fill the whole image, then two disjoint rectangles, and check all three
/// colors after a flush.
#[test]
fn test_fill_all_then_rectangles() {
    let image = blank(100, 60);
    let mut ctx = manual_context(&image);

    ctx.set_fill_style(Rgba32::WHITE).unwrap();
    ctx.fill_all().unwrap();
    ctx.set_fill_style(Rgba32::new(255, 0, 0, 255)).unwrap();
    ctx.fill_rect(Rect::new(10.0, 10.0, 20.0, 20.0)).unwrap();
    ctx.set_fill_style(Rgba32::new(0, 0, 255, 255)).unwrap();
    ctx.fill_rect(Rect::new(60.0, 30.0, 20.0, 20.0)).unwrap();
    assert_eq!(ctx.pending_ops(), 3);

    ctx.flush().unwrap();
    assert_eq!(ctx.pending_ops(), 0);

    assert_eq!(image.pixel(20, 20), Some(Rgba32::new(255, 0, 0, 255)));
    assert_eq!(image.pixel(70, 40), Some(Rgba32::new(0, 0, 255, 255)));
    assert_eq!(image.pixel(50, 5), Some(Rgba32::WHITE));
    assert_eq!(image.pixel(20, 40), Some(Rgba32::WHITE));
}

/// Dropping a context with queued work still paints it.
#[test]
fn test_drop_flushes_pending_ops() {
    let image = blank(10, 10);
    {
        let mut ctx = manual_context(&image);
        ctx.set_fill_style(Rgba32::new(0, 255, 0, 255)).unwrap();
        ctx.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        assert_eq!(image.pixel(5, 5), Some(Rgba32::TRANSPARENT));
    }
    assert_eq!(image.pixel(5, 5), Some(Rgba32::new(0, 255, 0, 255)));
}

#[test]
fn test_end_then_drop_flushes_once() {
    let image = blank(4, 4);
    let mut ctx = manual_context(&image);
    ctx.fill_all().unwrap();
    ctx.end().unwrap();
    assert_eq!(image.pixel(1, 1), Some(Rgba32::BLACK));

    let mut other = manual_context(&image);
    other.set_fill_style(Rgba32::WHITE).unwrap();
    other.fill_all().unwrap();
    other.end().unwrap();

    // The ended context has nothing left to paint
    drop(ctx);
    assert_eq!(image.pixel(1, 1), Some(Rgba32::WHITE));
}

#[test]
fn test_property_round_trips() {
    let image = blank(4, 4);
    let mut ctx = manual_context(&image);

    ctx.set_comp_op(CompOp::Multiply).unwrap();
    assert_eq!(ctx.comp_op(), CompOp::Multiply);
    ctx.set_global_alpha(0.25).unwrap();
    assert_eq!(ctx.global_alpha(), 0.25);
    ctx.set_fill_alpha(0.5).unwrap();
    assert_eq!(ctx.fill_alpha(), 0.5);
    ctx.set_stroke_alpha(0.75).unwrap();
    assert_eq!(ctx.stroke_alpha(), 0.75);
    ctx.set_fill_rule(FillRule::EvenOdd).unwrap();
    assert_eq!(ctx.fill_rule(), FillRule::EvenOdd);
    ctx.set_stroke_width(20.0).unwrap();
    assert_eq!(ctx.stroke_width(), 20.0);
    ctx.set_stroke_miter_limit(8.0).unwrap();
    assert_eq!(ctx.stroke_miter_limit(), 8.0);
    ctx.set_stroke_join(StrokeJoin::Round).unwrap();
    assert_eq!(ctx.stroke_join(), StrokeJoin::Round);
    ctx.set_stroke_dash_offset(3.5).unwrap();
    assert_eq!(ctx.stroke_dash_offset(), 3.5);
    ctx.set_stroke_dash_array(&[4.0, 2.0]).unwrap();
    assert_eq!(ctx.stroke_dash_array(), &[4.0, 2.0]);

    ctx.set_stroke_caps(StrokeCap::Round).unwrap();
    assert_eq!(ctx.stroke_cap(StrokeCapPosition::Start), StrokeCap::Round);
    assert_eq!(ctx.stroke_cap(StrokeCapPosition::End), StrokeCap::Round);
    ctx.set_stroke_cap(StrokeCapPosition::End, StrokeCap::Triangle)
        .unwrap();
    assert_eq!(ctx.stroke_cap(StrokeCapPosition::Start), StrokeCap::Round);
    assert_eq!(ctx.stroke_cap(StrokeCapPosition::End), StrokeCap::Triangle);
}

#[rstest]
#[case(0.0, 0.0, 0.0)]
#[case(0.5, 10.0, 20.0)]
#[case(-1.25, -7.0, 3.0)]
#[case(3.0, 100.0, -50.0)]
fn test_rotate_around_matches_translate_rotate_translate(
    #[case] angle: f64,
    #[case] x: f64,
    #[case] y: f64,
) {
    let image = blank(4, 4);
    let mut pivot = manual_context(&image);
    pivot.rotate_around(angle, x, y).unwrap();

    let mut steps = manual_context(&image);
    steps.translate(x, y).unwrap();
    steps.rotate(angle).unwrap();
    steps.translate(-x, -y).unwrap();

    for pt in [Point::new(0.0, 0.0), Point::new(x, y), Point::new(13.0, -4.0)] {
        let a = pivot.user_transform().map_point(pt);
        let b = steps.user_transform().map_point(pt);
        assert!((a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9);
    }
    let fixed = pivot.user_transform().map_point(Point::new(x, y));
    assert!((fixed.x - x).abs() < 1e-9 && (fixed.y - y).abs() < 1e-9);
}

#[test]
fn test_set_transform_replaces_previous() {
    let image = blank(4, 4);
    let mut ctx = manual_context(&image);
    let m1 = Matrix2D::new(2.0, 0.0, 0.0, 2.0, 5.0, 5.0);
    let m2 = Matrix2D::new(1.0, 0.5, 0.0, 1.0, -3.0, 4.0);
    ctx.set_transform(m1).unwrap();
    ctx.set_transform(m2).unwrap();
    assert_eq!(ctx.user_transform(), m2);
}

#[test]
fn test_scope_restores_after_panic() {
    let image = blank(4, 4);
    let mut ctx = manual_context(&image);
    ctx.set_stroke_width(2.0).unwrap();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let mut scope = ctx.scope().unwrap();
        scope.set_stroke_width(50.0).unwrap();
        scope.translate(10.0, 10.0).unwrap();
        panic!("drawing failed");
    }));
    assert!(result.is_err());
    assert_eq!(ctx.stroke_width(), 2.0);
    assert!(ctx.user_transform().is_identity());
    assert_eq!(ctx.saved_states(), 0);
}

#[test]
fn test_scoped_restores_after_error() {
    let image = blank(4, 4);
    let mut ctx = manual_context(&image);
    let result = ctx.scoped(|ctx| {
        ctx.set_comp_op(CompOp::Screen)?;
        ctx.translate(4.0, 4.0)?;
        Err::<(), _>(ContextError::InvalidValue("boom".to_string()))
    });
    assert!(matches!(result, Err(ContextError::InvalidValue(_))));
    assert_eq!(ctx.comp_op(), CompOp::SrcOver);
    assert!(ctx.user_transform().is_identity());
}

#[rstest]
#[case(&[0, 0, 0, 0], 0x0000_0000)]
#[case(&[255, 255, 255, 255], 0xFFFF_FFFF)]
#[case(&[255, 128, 0], 0xFFFF_8000)]
fn test_int_color_packing_reads_back(#[case] rgba: &[i64], #[case] expected: u32) {
    let components: Vec<ColorComponent> = rgba.iter().map(|&v| ColorComponent::Int(v)).collect();
    let image = blank(4, 4);
    let mut ctx = manual_context(&image);
    ctx.set_fill_style(Rgba32::from_components(&components).unwrap())
        .unwrap();
    assert!(matches!(ctx.fill_style(), Style::Color(c) if c.value() == expected));
}

#[rstest]
#[case(&[0.0, 0.0, 0.0, 0.0], 0x0000_0000)]
#[case(&[1.0, 1.0, 1.0, 1.0], 0xFFFF_FFFF)]
#[case(&[1.0, 1.0, 1.0], 0xFFFF_FFFF)]
fn test_float_color_packing_reads_back(#[case] rgba: &[f64], #[case] expected: u32) {
    let components: Vec<ColorComponent> =
        rgba.iter().map(|&v| ColorComponent::Float(v)).collect();
    let image = blank(4, 4);
    let mut ctx = manual_context(&image);
    ctx.set_stroke_style(Rgba32::from_components(&components).unwrap())
        .unwrap();
    assert!(matches!(ctx.stroke_style(), Style::Color(c) if c.value() == expected));
}

#[test]
fn test_detached_context() {
    let mut ctx = Context::new();
    assert_eq!(ctx.stroke_width(), 1.0);
    assert!(ctx.user_transform().is_identity());
    assert!(matches!(ctx.fill_all(), Err(ContextError::InvalidState)));
    assert!(matches!(ctx.rotate(1.0), Err(ContextError::InvalidState)));
    assert!(matches!(
        ctx.set_fill_style(Rgba32::WHITE),
        Err(ContextError::InvalidState)
    ));
    assert!(matches!(
        ctx.blit_image(Point::new(0.0, 0.0), &blank(2, 2), None),
        Err(ContextError::InvalidState)
    ));

    let image = blank(4, 4);
    ctx.begin(&image).unwrap();
    ctx.fill_all().unwrap();
    ctx.end().unwrap();
    assert_eq!(image.pixel(1, 1), Some(Rgba32::BLACK));
}

#[test]
fn test_stroke_circle_and_ellipse() {
    let image = blank(60, 60);
    let mut ctx = manual_context(&image);
    ctx.set_stroke_style(Rgba32::new(255, 0, 0, 255)).unwrap();
    ctx.set_stroke_width(4.0).unwrap();
    ctx.stroke_circle(Point::new(30.0, 30.0), 20.0).unwrap();
    ctx.fill_ellipse(Point::new(30.0, 30.0), 5.0, 3.0).unwrap();
    ctx.flush().unwrap();

    assert_eq!(image.pixel(50, 30).map(|c| c.r()), Some(255));
    assert_eq!(image.pixel(30, 30), Some(Rgba32::BLACK));
    assert_eq!(image.pixel(40, 30).map(|c| c.a()), Some(0));
}

#[test]
fn test_stroke_path_with_quadratic_curve() {
    let image = blank(100, 100);
    let mut ctx = manual_context(&image);
    let mut path = Path::new();
    path.move_to(10.0, 90.0);
    path.quad_to(50.0, 10.0, 90.0, 90.0);
    ctx.set_stroke_width(6.0).unwrap();
    ctx.set_stroke_caps(StrokeCap::Butt).unwrap();
    ctx.stroke_path(&path).unwrap();
    ctx.flush().unwrap();

    // Apex of the curve at t = 0.5
    assert!(image.pixel(50, 50).unwrap().a() > 200);
    assert_eq!(image.pixel(50, 90).map(|c| c.a()), Some(0));
}

#[test]
fn test_pattern_fill_repeats() {
    let tile = Image::from_rgba8(
        2,
        1,
        &[255, 0, 0, 255, 0, 0, 255, 255],
        ImageFormat::Prgb32,
    )
    .unwrap();
    let pattern = Pattern::new(&tile, None, ExtendMode::Repeat).unwrap();

    let image = blank(8, 2);
    let mut ctx = manual_context(&image);
    ctx.set_fill_style(pattern).unwrap();
    ctx.fill_all().unwrap();
    ctx.flush().unwrap();

    let left = image.pixel(4, 0).unwrap();
    let right = image.pixel(5, 0).unwrap();
    assert!(left.r() > right.r());
    assert!(right.b() > left.b());
}

#[test]
fn test_pattern_with_area_uses_sub_image() {
    let tile = Image::from_rgba8(
        2,
        1,
        &[255, 0, 0, 255, 0, 255, 0, 255],
        ImageFormat::Prgb32,
    )
    .unwrap();
    let mut pattern = Pattern::new(&tile, Some(RectI::new(1, 0, 1, 1)), ExtendMode::Pad).unwrap();
    pattern.set_transform(Matrix2D::scaling(2.0, 2.0));
    assert_eq!(pattern.transform(), Matrix2D::scaling(2.0, 2.0));

    let image = blank(4, 4);
    let mut ctx = manual_context(&image);
    ctx.set_fill_style(pattern).unwrap();
    ctx.fill_all().unwrap();
    ctx.flush().unwrap();
    assert_eq!(image.pixel(2, 2), Some(Rgba32::new(0, 255, 0, 255)));
}

#[test]
fn test_radial_gradient_center_color() {
    let mut gradient = Gradient::radial(20.0, 20.0, 20.0, 20.0, 20.0);
    gradient.add_stop(0.0, Rgba32::WHITE).unwrap();
    gradient.add_stop(1.0, Rgba32::BLACK).unwrap();
    gradient.set_extend_mode(ExtendMode::Pad);

    let image = blank(40, 40);
    let mut ctx = manual_context(&image);
    ctx.set_fill_style(gradient).unwrap();
    ctx.fill_all().unwrap();
    ctx.flush().unwrap();

    let center = image.pixel(20, 20).unwrap();
    let corner = image.pixel(0, 0).unwrap();
    assert!(center.r() > 230);
    assert_eq!(corner.r(), 0);
}

#[test]
fn test_global_and_fill_alpha_combine() {
    let image = blank(4, 4);
    let mut ctx = manual_context(&image);
    ctx.set_global_alpha(0.5).unwrap();
    ctx.set_fill_alpha(0.5).unwrap();
    ctx.fill_all().unwrap();
    ctx.flush().unwrap();
    let a = image.pixel(1, 1).unwrap().a();
    assert!((63..=65).contains(&a), "alpha {}", a);
}

#[test]
fn test_src_copy_replaces_destination() {
    let image = blank(4, 4);
    let mut ctx = manual_context(&image);
    ctx.set_fill_style(Rgba32::WHITE).unwrap();
    ctx.fill_all().unwrap();
    ctx.set_comp_op(CompOp::SrcCopy).unwrap();
    ctx.set_fill_style(Rgba32::TRANSPARENT).unwrap();
    ctx.fill_rect(Rect::new(0.0, 0.0, 2.0, 4.0)).unwrap();
    ctx.flush().unwrap();
    assert_eq!(image.pixel(0, 0), Some(Rgba32::TRANSPARENT));
    assert_eq!(image.pixel(3, 0), Some(Rgba32::WHITE));
}

#[test]
fn test_png_file_round_trip() {
    let image = blank(16, 8);
    let mut ctx = manual_context(&image);
    ctx.set_fill_style(Rgba32::new(10, 200, 30, 255)).unwrap();
    ctx.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0)).unwrap();
    ctx.end().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.png");
    image.write_to_file(&path).unwrap();

    let loaded = Image::read_from_file(&path).unwrap();
    assert_eq!((loaded.width(), loaded.height()), (16, 8));
    assert_eq!(loaded.format(), ImageFormat::Prgb32);
    assert_eq!(loaded.to_rgba8(), image.to_rgba8());
}

#[test]
fn test_read_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Image::read_from_file(dir.path().join("missing.png")),
        Err(ContextError::Io(_))
    ));
}
