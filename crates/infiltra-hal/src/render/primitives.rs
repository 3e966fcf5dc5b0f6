use super::*;

pub(super) fn text_style(
    font: &'static MonoFont<'static>,
    color: Rgb565,
) -> MonoTextStyle<'static, Rgb565> {
    MonoTextStyle::new(font, color)
}

pub(super) fn draw_text<D>(
    display: &mut D,
    text: &str,
    position: Point,
    style: MonoTextStyle<'static, Rgb565>,
    alignment: Alignment,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    Text::with_alignment(text, position, style, alignment).draw(display)?;
    Ok(())
}

pub(super) fn draw_centered<D>(
    display: &mut D,
    text: &str,
    y: i32,
    font: &'static MonoFont<'static>,
    color: Rgb565,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let x = display.bounding_box().size.width as i32 / 2;
    draw_text(
        display,
        text,
        Point::new(x, y),
        text_style(font, color),
        Alignment::Center,
    )
}

pub(super) fn fill_rect<D>(
    display: &mut D,
    x: i32,
    y: i32,
    w: u32,
    h: u32,
    color: Rgb565,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    Rectangle::new(Point::new(x, y), Size::new(w, h))
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(display)
}

pub(super) fn round_frame<D>(
    display: &mut D,
    x: i32,
    y: i32,
    w: u32,
    h: u32,
    radius: u32,
    color: Rgb565,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    RoundedRectangle::with_equal_corners(
        Rectangle::new(Point::new(x, y), Size::new(w, h)),
        Size::new(radius, radius),
    )
    .into_styled(PrimitiveStyle::with_stroke(color, 1))
    .draw(display)
}

pub(super) fn round_fill<D>(
    display: &mut D,
    x: i32,
    y: i32,
    w: u32,
    h: u32,
    radius: u32,
    color: Rgb565,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    RoundedRectangle::with_equal_corners(
        Rectangle::new(Point::new(x, y), Size::new(w, h)),
        Size::new(radius, radius),
    )
    .into_styled(PrimitiveStyle::with_fill(color))
    .draw(display)
}

pub(super) fn hline<D>(
    display: &mut D,
    x0: i32,
    x1: i32,
    y: i32,
    color: Rgb565,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    Line::new(Point::new(x0, y), Point::new(x1, y))
        .into_styled(PrimitiveStyle::with_stroke(color, 1))
        .draw(display)
}

pub(super) fn vline<D>(
    display: &mut D,
    x: i32,
    y0: i32,
    y1: i32,
    color: Rgb565,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    Line::new(Point::new(x, y0), Point::new(x, y1))
        .into_styled(PrimitiveStyle::with_stroke(color, 1))
        .draw(display)
}

/// Rounded border framing option lists and tool panes.
pub(super) fn draw_options_layer_background<D>(display: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let size = display.bounding_box().size;
    round_frame(
        display,
        LAYER_INSET,
        LAYER_INSET,
        size.width.saturating_sub(2 * LAYER_INSET as u32),
        size.height.saturating_sub(2 * LAYER_INSET as u32),
        LAYER_RADIUS,
        FRAME,
    )
}
