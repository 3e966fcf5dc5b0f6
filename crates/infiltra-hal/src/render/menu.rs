use super::*;

const TITLE_Y: i32 = 24;
const RULE_Y: i32 = 32;
const LIST_TOP: i32 = 40;
const ROW_HEIGHT: i32 = 22;
const ROW_INSET: i32 = 6;
const PIP_PITCH: i32 = 8;
const PIP_DIAMETER: u32 = 5;

pub(super) fn draw_ring<D>(
    display: &mut D,
    label: &str,
    index: usize,
    count: usize,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let size = display.bounding_box().size;
    let (w, h) = (size.width as i32, size.height as i32);
    let mid_y = h / 2;

    round_frame(display, 8, mid_y - 30, (w - 16) as u32, 52, 10, FRAME)?;
    draw_centered(display, label, mid_y + 2, &FONT_10X20, FOREGROUND)?;
    draw_text(
        display,
        "<",
        Point::new(14, mid_y + 2),
        text_style(&FONT_9X15_BOLD, MUTED),
        Alignment::Left,
    )?;
    draw_text(
        display,
        ">",
        Point::new(w - 14, mid_y + 2),
        text_style(&FONT_9X15_BOLD, MUTED),
        Alignment::Right,
    )?;

    let pips_w = count as i32 * PIP_PITCH;
    let start_x = (w - pips_w) / 2 + 1;
    for pip in 0..count {
        let color = if pip == index { FOREGROUND } else { FRAME };
        Circle::new(
            Point::new(start_x + pip as i32 * PIP_PITCH, h - 28),
            PIP_DIAMETER,
        )
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(display)?;
    }

    Ok(())
}

pub(super) fn draw_submenu<D>(
    display: &mut D,
    title: &str,
    items: &[&str],
    cursor: usize,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let w = display.bounding_box().size.width as i32;
    draw_centered(display, title, TITLE_Y, &FONT_9X15_BOLD, FOREGROUND)?;
    hline(display, 10, w - 10, RULE_Y, FRAME)?;
    draw_option_rows(display, items, cursor)
}

/// Repaints only the option rows.
pub(super) fn draw_option_rows<D>(
    display: &mut D,
    items: &[&str],
    cursor: usize,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let size = display.bounding_box().size;
    let (w, h) = (size.width as i32, size.height as i32);
    let visible_rows = ((h - LIST_TOP - LAYER_INSET * 2) / ROW_HEIGHT).max(1) as usize;
    let first = cursor.saturating_sub(visible_rows - 1);

    fill_rect(
        display,
        ROW_INSET,
        LIST_TOP,
        (w - 2 * ROW_INSET) as u32,
        (visible_rows as i32 * ROW_HEIGHT) as u32,
        BACKGROUND,
    )?;

    for (row, (index, item)) in items
        .iter()
        .enumerate()
        .skip(first)
        .take(visible_rows)
        .enumerate()
    {
        let y = LIST_TOP + row as i32 * ROW_HEIGHT;
        let selected = index == cursor;
        if selected {
            round_fill(
                display,
                ROW_INSET,
                y,
                (w - 2 * ROW_INSET) as u32,
                (ROW_HEIGHT - 2) as u32,
                4,
                FOREGROUND,
            )?;
        }
        let color = if selected { BACKGROUND } else { MUTED };
        draw_text(
            display,
            item,
            Point::new(ROW_INSET + 6, y + ROW_HEIGHT / 2 + 3),
            text_style(&FONT_7X13_BOLD, color),
            Alignment::Left,
        )?;
    }

    Ok(())
}

pub(super) fn draw_option_detail<D>(
    display: &mut D,
    title: &str,
    option: &str,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let size = display.bounding_box().size;
    let (w, h) = (size.width as i32, size.height as i32);

    draw_centered(display, title, TITLE_Y, &FONT_7X13_BOLD, MUTED)?;
    hline(display, 10, w - 10, RULE_Y, FRAME)?;
    draw_centered(display, option, h / 2 - 8, &FONT_9X15_BOLD, FOREGROUND)?;
    draw_centered(display, "Not available", h / 2 + 12, &FONT_6X10, MUTED)?;
    draw_centered(display, "C: back", h - 16, &FONT_6X10, MUTED)
}
