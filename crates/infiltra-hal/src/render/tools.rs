use super::*;

const HEADER_Y: i32 = 18;
const TIME_Y: i32 = 72;
const TIME_FIELD: (i32, i32, u32, u32) = (60, 56, 120, 22);

const TILE_COLS: usize = 2;
const TILE_W: u32 = 100;
const TILE_H: u32 = 38;
const TILE_GAP: i32 = 12;
const TILE_START: (i32, i32) = (14, 28);

const BEZEL: (i32, i32, u32, u32) = (18, 30, 204, 100);
const KEY_W: u32 = 90;
const KEY_H: u32 = 24;
const KEY_GAP: i32 = 8;

const WAVE_LEFT: i32 = 10;
const WAVE_WIDTH: u32 = 220;
const WAVE_HIGH: i32 = 92;
const WAVE_LOW: i32 = 110;

fn stopwatch_text(reading: StopwatchReading) -> String<16> {
    let mut text = String::new();
    let _ = write!(
        text,
        "{:02}:{:02}.{:02}",
        reading.minutes, reading.seconds, reading.centis
    );
    text
}

pub(super) fn draw_stopwatch<D>(
    display: &mut D,
    reading: StopwatchReading,
    running: bool,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let h = display.bounding_box().size.height as i32;
    draw_centered(display, "Stopwatch", HEADER_Y, &FONT_9X15_BOLD, FOREGROUND)?;
    draw_stopwatch_time(display, reading)?;
    let (status, color) = if running {
        ("RUNNING", ACCENT)
    } else {
        ("PAUSED", MUTED)
    };
    draw_centered(display, status, TIME_Y + 24, &FONT_6X10, color)?;
    draw_centered(display, "A: start/pause   back: exit", h - 10, &FONT_6X10, MUTED)
}

pub(super) fn draw_stopwatch_time<D>(
    display: &mut D,
    reading: StopwatchReading,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let (x, y, w, h) = TIME_FIELD;
    fill_rect(display, x, y, w, h, BACKGROUND)?;
    draw_centered(display, &stopwatch_text(reading), TIME_Y, &FONT_10X20, FOREGROUND)
}

pub(super) fn draw_bgone_menu<D>(
    display: &mut D,
    items: &[&str],
    selected: usize,
    page_start: usize,
    per_page: usize,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    draw_centered(display, "B-Gone", HEADER_Y, &FONT_7X13_BOLD, FOREGROUND)?;

    let end = (page_start + per_page).min(items.len());
    for (slot, index) in (page_start..end).enumerate() {
        let x = TILE_START.0 + (slot % TILE_COLS) as i32 * (TILE_W as i32 + TILE_GAP);
        let y = TILE_START.1 + (slot / TILE_COLS) as i32 * (TILE_H as i32 + TILE_GAP);
        let is_selected = index == selected;
        let frame = if is_selected { FOREGROUND } else { FRAME };

        round_frame(display, x, y, TILE_W, TILE_H, 6, frame)?;
        if is_selected {
            round_frame(display, x - 1, y - 1, TILE_W + 2, TILE_H + 2, 7, frame)?;
        }
        let label = if is_selected { FOREGROUND } else { MUTED };
        draw_text(
            display,
            items[index],
            Point::new(x + TILE_W as i32 - 8, y + TILE_H as i32 / 2 + 5),
            text_style(&FONT_9X15_BOLD, label),
            Alignment::Right,
        )?;
    }

    let pages = items.len().div_ceil(per_page.max(1));
    if pages > 1 {
        let mut indicator = String::<8>::new();
        let _ = write!(indicator, "{}/{}", page_start / per_page.max(1) + 1, pages);
        let w = display.bounding_box().size.width as i32;
        draw_text(
            display,
            &indicator,
            Point::new(w - 10, HEADER_Y),
            text_style(&FONT_6X10, MUTED),
            Alignment::Right,
        )?;
    }

    Ok(())
}

pub(super) fn draw_tv_remote<D>(
    display: &mut D,
    keys: &[&str],
    selected: usize,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    draw_centered(display, "TV Remote", HEADER_Y, &FONT_7X13_BOLD, FOREGROUND)?;

    let (bx, by, bw, bh) = BEZEL;
    round_frame(display, bx, by, bw, bh, 8, FRAME)?;

    for (index, key) in keys.iter().enumerate() {
        let x = bx + KEY_GAP + (index % 2) as i32 * (KEY_W as i32 + KEY_GAP);
        let y = by + KEY_GAP + (index / 2) as i32 * (KEY_H as i32 + KEY_GAP);
        let is_selected = index == selected;
        if is_selected {
            round_fill(display, x, y, KEY_W, KEY_H, 5, FOREGROUND)?;
        } else {
            round_frame(display, x, y, KEY_W, KEY_H, 5, FRAME)?;
        }
        let color = if is_selected { BACKGROUND } else { MUTED };
        draw_text(
            display,
            key,
            Point::new(x + KEY_W as i32 / 2, y + KEY_H as i32 / 2 + 4),
            text_style(&FONT_7X13_BOLD, color),
            Alignment::Center,
        )?;
    }

    Ok(())
}

pub(super) struct IrReadView<'a> {
    pub state: IrReadState,
    pub paused: bool,
    pub protocol: Option<IrProtocol>,
    pub address: u32,
    pub command: u32,
    pub value: u64,
    pub raw: &'a [u16],
}

pub(super) fn draw_ir_read<D>(display: &mut D, view: IrReadView<'_>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let w = display.bounding_box().size.width as i32;
    let h = display.bounding_box().size.height as i32;

    draw_text(
        display,
        "IR Read",
        Point::new(12, HEADER_Y),
        text_style(&FONT_7X13_BOLD, FOREGROUND),
        Alignment::Left,
    )?;
    let (badge, color) = if view.paused {
        ("PAUSED", MUTED)
    } else {
        ("LIVE", ACCENT)
    };
    draw_text(
        display,
        badge,
        Point::new(w - 12, HEADER_Y),
        text_style(&FONT_6X10, color),
        Alignment::Right,
    )?;

    match (view.state, view.protocol) {
        (IrReadState::Received, Some(protocol)) => {
            let mut line = String::<40>::new();
            let _ = write!(line, "Proto: {}", protocol.label());
            draw_text(
                display,
                &line,
                Point::new(12, 40),
                text_style(&FONT_7X13_BOLD, FOREGROUND),
                Alignment::Left,
            )?;

            line.clear();
            let _ = write!(line, "Addr 0x{:04X}  Cmd 0x{:04X}", view.address, view.command);
            draw_text(
                display,
                &line,
                Point::new(12, 56),
                text_style(&FONT_6X10, MUTED),
                Alignment::Left,
            )?;

            line.clear();
            let _ = write!(line, "Value 0x{:08X}  n={}", view.value, view.raw.len());
            draw_text(
                display,
                &line,
                Point::new(12, 70),
                text_style(&FONT_6X10, MUTED),
                Alignment::Left,
            )?;

            draw_waveform(display, view.raw)?;
        }
        _ => draw_centered(display, "Waiting for signal...", h / 2, &FONT_7X13_BOLD, MUTED)?,
    }

    draw_centered(display, "A: clear  B: pause  back: exit", h - 8, &FONT_6X10, MUTED)
}

/// Square wave of alternating mark/space durations scaled to the pane width.
fn draw_waveform<D>(display: &mut D, raw: &[u16]) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let total: u32 = raw.iter().map(|duration| *duration as u32).sum();
    if total == 0 {
        return Ok(());
    }

    let mut elapsed = 0u32;
    let mut x = WAVE_LEFT;
    for (index, duration) in raw.iter().enumerate() {
        elapsed += *duration as u32;
        let next_x = WAVE_LEFT + (elapsed as u64 * WAVE_WIDTH as u64 / total as u64) as i32;
        let level = if index % 2 == 0 { WAVE_HIGH } else { WAVE_LOW };
        hline(display, x, next_x, level, ACCENT)?;
        if index + 1 < raw.len() {
            vline(display, next_x, WAVE_HIGH, WAVE_LOW, ACCENT)?;
        }
        x = next_x;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopwatch_text_pads_fields() {
        let text = stopwatch_text(StopwatchReading::from_millis(65_070));
        assert_eq!(text.as_str(), "01:05.07");
    }

    #[test]
    fn long_runs_keep_growing_minutes() {
        let text = stopwatch_text(StopwatchReading::from_millis(6_000_000));
        assert_eq!(text.as_str(), "100:00.00");
    }
}
