// ============================================================================
// SCENE RENDERING
// ============================================================================
//
// Each frame is described as a list of draw commands, then rasterized onto
// the RGBA framebuffer with anti-aliased software primitives.

use rusttype::{point, Font, PositionedGlyph, Scale};
use std::f64::consts::TAU;
use std::path::Path;
use tracing::{debug, warn};

use crate::config::{slice_color, WheelConfig};
use crate::error::WheelError;
use crate::history::HistoryLog;
use crate::layout::{Layout, Rect};

type Rgb = (u8, u8, u8);

const WHITE: Rgb = (0xff, 0xff, 0xff);
const MUTED: Rgb = (0x99, 0x99, 0x99);
const ROW_SHADE: Rgb = (0xf7, 0xf7, 0xf7);
const FIELD: Rgb = (0xee, 0xee, 0xee);
const ACCENT: Rgb = (0x4e, 0xcd, 0xc4);
const DANGER: Rgb = (0xff, 0x6b, 0x6b);
const DISABLED: Rgb = (0xbb, 0xbb, 0xbb);

/// Fonts tried when none is configured.
pub const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// Loads the configured font, or the first system font that parses.
///
/// A configured font that is missing or broken is an error. Without a
/// configured font, failing to find one only costs the text labels.
pub fn load_font(path: Option<&Path>) -> Result<Option<Font<'static>>, WheelError> {
    if let Some(path) = path {
        let data = std::fs::read(path).map_err(|source| WheelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let font =
            Font::try_from_vec(data).ok_or_else(|| WheelError::InvalidFont(path.to_path_buf()))?;
        return Ok(Some(font));
    }

    for candidate in FONT_CANDIDATES {
        let Ok(data) = std::fs::read(candidate) else {
            continue;
        };
        if let Some(font) = Font::try_from_vec(data) {
            debug!(font = *candidate, "using system font");
            return Ok(Some(font));
        }
    }
    warn!("no usable font found; labels will not be drawn (pass --font to choose one)");
    Ok(None)
}

// ============================================================================
// FRAME DESCRIPTION
// ============================================================================

/// Everything a frame shows, borrowed from the session and the view state.
pub struct FrameView<'a> {
    pub items: &'a [String],
    pub rotation: f64,
    pub history: &'a HistoryLog,
    pub input: &'a str,
    pub input_blank: bool,
    pub item_scroll: usize,
    pub pending: Option<&'a str>,
    pub spinning: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Clone, Debug)]
enum DrawCommand {
    Clear(Rgb),
    Wheel {
        cx: i32,
        cy: i32,
        r: i32,
        rotation: f64,
        colors: Vec<Rgb>,
    },
    Line {
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        thickness: f32,
        color: Rgb,
    },
    Ring {
        cx: i32,
        cy: i32,
        r: i32,
        thickness: i32,
        color: Rgb,
    },
    Circle {
        cx: i32,
        cy: i32,
        radius: i32,
        color: Rgb,
    },
    Triangle {
        points: [(i32, i32); 3],
        color: Rgb,
    },
    Rect {
        rect: Rect,
        color: Rgb,
        alpha: f32,
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        font_size: f32,
        align: TextAlign,
        max_width: Option<i32>,
        color: Rgb,
    },
    RadialText {
        cx: i32,
        cy: i32,
        angle: f64,
        end_radius: f64,
        text: String,
        font_size: f32,
        color: Rgb,
    },
}

struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    fn fill(&mut self, rect: Rect, color: Rgb) {
        self.add_command(DrawCommand::Rect {
            rect,
            color,
            alpha: 1.0,
        });
    }

    fn text(
        &mut self,
        x: i32,
        y: i32,
        text: impl Into<String>,
        font_size: f32,
        align: TextAlign,
        color: Rgb,
    ) {
        self.add_command(DrawCommand::Text {
            x,
            y,
            text: text.into(),
            font_size,
            align,
            max_width: None,
            color,
        });
    }

    fn clipped_text(&mut self, rect: Rect, text: impl Into<String>, font_size: f32, color: Rgb) {
        self.add_command(DrawCommand::Text {
            x: rect.x,
            y: rect.y + rect.h / 2,
            text: text.into(),
            font_size,
            align: TextAlign::Left,
            max_width: Some(rect.w),
            color,
        });
    }

    fn button(&mut self, rect: Rect, label: &str, font_size: f32, color: Rgb) {
        self.fill(rect, color);
        let (cx, cy) = rect.center();
        self.text(cx, cy, label, font_size, TextAlign::Center, WHITE);
    }

    fn render(&self, canvas: &mut Canvas, font: Option<&Font>) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => canvas.clear(*color),
                DrawCommand::Wheel {
                    cx,
                    cy,
                    r,
                    rotation,
                    colors,
                } => render_wheel_immediate(canvas, *cx, *cy, *r, *rotation, colors),
                DrawCommand::Line {
                    x0,
                    y0,
                    x1,
                    y1,
                    thickness,
                    color,
                } => draw_thick_line_aa(canvas, *x0, *y0, *x1, *y1, *thickness, *color),
                DrawCommand::Ring {
                    cx,
                    cy,
                    r,
                    thickness,
                    color,
                } => render_ring_immediate(canvas, *cx, *cy, *r, *thickness, *color),
                DrawCommand::Circle {
                    cx,
                    cy,
                    radius,
                    color,
                } => draw_circle(canvas, *cx, *cy, *radius, *color),
                DrawCommand::Triangle { points, color } => fill_triangle(canvas, *points, *color),
                DrawCommand::Rect { rect, color, alpha } => {
                    fill_rect(canvas, *rect, *color, *alpha)
                }
                DrawCommand::Text {
                    x,
                    y,
                    text,
                    font_size,
                    align,
                    max_width,
                    color,
                } => {
                    let Some(font) = font else { continue };
                    let scale = Scale::uniform(*font_size);
                    let text = match max_width {
                        Some(width) => fit_text(text, font, scale, *width),
                        None => text.clone(),
                    };
                    draw_text(canvas, *x, *y, &text, font, scale, *align, *color);
                }
                DrawCommand::RadialText {
                    cx,
                    cy,
                    angle,
                    end_radius,
                    text,
                    font_size,
                    color,
                } => {
                    let Some(font) = font else { continue };
                    draw_radial_text(
                        canvas,
                        *cx,
                        *cy,
                        *angle,
                        *end_radius,
                        text,
                        font,
                        Scale::uniform(*font_size),
                        *color,
                    );
                }
            }
        }
    }
}

// ============================================================================
// CORE DATA TYPES
// ============================================================================

pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        Self {
            frame,
            width,
            height,
        }
    }

    fn clear(&mut self, color: Rgb) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.0, color.1, color.2, 0xff]);
        }
    }
}

// ============================================================================
// SCENE CONSTRUCTION
// ============================================================================

pub fn render_frame(
    canvas: &mut Canvas,
    view: &FrameView,
    layout: &Layout,
    config: &WheelConfig,
    font: Option<&Font>,
) {
    build_scene(view, layout, config).render(canvas, font);
}

fn build_scene(view: &FrameView, layout: &Layout, config: &WheelConfig) -> Scene {
    let mut scene = Scene::new();
    scene.add_command(DrawCommand::Clear(config.background_color.as_tuple()));

    add_wheel(&mut scene, view, layout, config);
    add_panel(&mut scene, view, layout, config);
    if let Some(winner) = view.pending {
        add_result_dialog(&mut scene, winner, layout, config);
    }
    scene
}

fn add_wheel(scene: &mut Scene, view: &FrameView, layout: &Layout, config: &WheelConfig) {
    let (cx, cy, r) = (layout.wheel_cx, layout.wheel_cy, layout.wheel_radius);
    let text_color = config.text_color.as_tuple();

    if view.items.is_empty() {
        scene.add_command(DrawCommand::Ring {
            cx,
            cy,
            r,
            thickness: 2,
            color: DISABLED,
        });
        scene.text(
            cx,
            cy + r / 3,
            "Add at least one item",
            config.panel_font_size,
            TextAlign::Center,
            MUTED,
        );
    } else {
        let count = view.items.len();
        let slice = TAU / count as f64;
        scene.add_command(DrawCommand::Wheel {
            cx,
            cy,
            r,
            rotation: view.rotation,
            colors: (0..count).map(|i| slice_color(i).as_tuple()).collect(),
        });

        if count > 1 {
            for i in 0..count {
                let angle = view.rotation + i as f64 * slice;
                scene.add_command(DrawCommand::Line {
                    x0: cx,
                    y0: cy,
                    x1: (cx as f64 + angle.cos() * r as f64).round() as i32,
                    y1: (cy as f64 + angle.sin() * r as f64).round() as i32,
                    thickness: config.slice_border_thickness,
                    color: WHITE,
                });
            }
        }

        for (i, item) in view.items.iter().enumerate() {
            scene.add_command(DrawCommand::RadialText {
                cx,
                cy,
                angle: view.rotation + i as f64 * slice + slice / 2.0,
                end_radius: r as f64 - config.label_inset,
                text: item.clone(),
                font_size: config.label_font_size,
                color: WHITE,
            });
        }
    }

    // Hub
    scene.add_command(DrawCommand::Circle {
        cx,
        cy,
        radius: config.hub_radius,
        color: WHITE,
    });
    scene.add_command(DrawCommand::Ring {
        cx,
        cy,
        r: config.hub_radius + config.hub_ring_thickness / 2,
        thickness: config.hub_ring_thickness,
        color: text_color,
    });
    scene.text(
        cx,
        cy,
        config.hub_label.clone(),
        config.hub_font_size,
        TextAlign::Center,
        text_color,
    );

    // Pointer
    let tip_y = config.pointer_top;
    let base_y = config.pointer_top + config.pointer_height;
    scene.add_command(DrawCommand::Triangle {
        points: [
            (cx, tip_y),
            (cx - config.pointer_half_width, base_y),
            (cx + config.pointer_half_width, base_y),
        ],
        color: config.pointer_color.as_tuple(),
    });
}

fn add_panel(scene: &mut Scene, view: &FrameView, layout: &Layout, config: &WheelConfig) {
    let font_size = config.panel_font_size;
    let text_color = config.text_color.as_tuple();
    scene.fill(layout.panel, config.panel_color.as_tuple());

    // Input
    scene.fill(layout.input_box, FIELD);
    let field = Rect::new(
        layout.input_box.x + 8,
        layout.input_box.y,
        layout.input_box.w - 16,
        layout.input_box.h,
    );
    if view.input.is_empty() {
        scene.clipped_text(field, "Type a name, Enter to add", font_size, MUTED);
    } else {
        scene.clipped_text(field, format!("{}|", view.input), font_size, text_color);
    }
    let add_color = if view.input_blank { DISABLED } else { ACCENT };
    scene.button(layout.add_button, "Add", font_size, add_color);

    let (spin_label, spin_color) = if view.spinning {
        ("Spinning...", DISABLED)
    } else if view.items.is_empty() {
        ("Spin", DISABLED)
    } else {
        ("Spin", ACCENT)
    };
    scene.button(layout.spin_button, spin_label, font_size, spin_color);

    // Items
    scene.clipped_text(
        layout.items_header,
        format!("Items ({})", view.items.len()),
        font_size,
        text_color,
    );
    if view.items.is_empty() {
        scene.clipped_text(layout.item_row(0), "Add at least one item", font_size, MUTED);
    } else {
        scene.button(layout.clear_items_button, "Clear all", font_size, DANGER);
    }
    for slot in 0..layout.visible_item_rows() {
        let index = view.item_scroll + slot;
        let Some(item) = view.items.get(index) else {
            break;
        };
        let row = layout.item_row(slot);
        if index % 2 == 1 {
            scene.fill(row, ROW_SHADE);
        }
        let remove = layout.item_remove_button(slot);
        let label = Rect::new(row.x + 4, row.y, remove.x - row.x - 8, row.h);
        scene.clipped_text(label, format!("{}. {}", index + 1, item), font_size, text_color);
        scene.button(remove, "x", font_size, DISABLED);
    }
    if view.item_scroll + layout.visible_item_rows() < view.items.len() {
        let last = layout.item_row(layout.visible_item_rows() - 1);
        scene.text(last.center().0, last.bottom(), "...", font_size, TextAlign::Center, MUTED);
    }

    // History
    scene.clipped_text(
        layout.history_header,
        format!("History ({})", view.history.len()),
        font_size,
        text_color,
    );
    if view.history.is_empty() {
        scene.clipped_text(layout.history_row(0), "No spins yet", font_size, MUTED);
    } else {
        scene.button(layout.clear_history_button, "Clear", font_size, DANGER);
    }
    for (slot, entry) in view
        .history
        .iter()
        .take(layout.visible_history_rows())
        .enumerate()
    {
        let row = layout.history_row(slot);
        if slot % 2 == 1 {
            scene.fill(row, ROW_SHADE);
        }
        let label = Rect::new(row.x + 4, row.y, row.w - 90, row.h);
        scene.clipped_text(label, format!("{}. {}", slot + 1, entry.result), font_size, text_color);
        scene.text(
            row.right() - 4,
            row.y + row.h / 2,
            entry.timestamp.clone(),
            font_size * 0.85,
            TextAlign::Right,
            MUTED,
        );
    }

    if view.spinning {
        let (cx, _) = layout.panel.center();
        scene.text(
            cx,
            layout.window.bottom() - 8,
            "Spinning...",
            font_size * 0.85,
            TextAlign::Center,
            MUTED,
        );
    }
}

fn add_result_dialog(scene: &mut Scene, winner: &str, layout: &Layout, config: &WheelConfig) {
    let text_color = config.text_color.as_tuple();
    scene.add_command(DrawCommand::Rect {
        rect: layout.window,
        color: (0x00, 0x00, 0x00),
        alpha: 0.45,
    });
    scene.fill(layout.dialog, WHITE);

    let (cx, _) = layout.dialog.center();
    let top = layout.dialog.y;
    scene.text(cx, top + 36, "Result", config.dialog_font_size, TextAlign::Center, text_color);
    scene.text(cx, top + 76, "The wheel picked:", config.panel_font_size, TextAlign::Center, MUTED);
    scene.add_command(DrawCommand::Text {
        x: cx,
        y: top + 112,
        text: winner.to_string(),
        font_size: config.dialog_font_size * 1.2,
        align: TextAlign::Center,
        max_width: Some(layout.dialog.w - 40),
        color: text_color,
    });
    scene.button(layout.remove_winner_button, "Remove", config.panel_font_size, DANGER);
    scene.button(layout.keep_winner_button, "Keep", config.panel_font_size, ACCENT);
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn calculate_text_width(text: &str, font: &Font, scale: Scale) -> i32 {
    let glyphs: Vec<PositionedGlyph> = font.layout(text, scale, point(0.0, 0.0)).collect();
    let (min_x, max_x) = glyphs
        .iter()
        .filter_map(|g| g.pixel_bounding_box())
        .fold((i32::MAX, i32::MIN), |(min_x, max_x), bb| {
            (min_x.min(bb.min.x), max_x.max(bb.max.x))
        });
    if min_x < max_x {
        max_x - min_x
    } else {
        0
    }
}

/// Shortens `text` with a trailing "..." until it fits in `max_width` pixels.
fn fit_text(text: &str, font: &Font, scale: Scale, max_width: i32) -> String {
    if calculate_text_width(text, font, scale) <= max_width {
        return text.to_string();
    }
    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate = format!("{}...", chars.iter().collect::<String>().trim_end());
        if calculate_text_width(&candidate, font, scale) <= max_width {
            return candidate;
        }
    }
    String::new()
}

/// Tight pixel bounds of a laid-out run: (min_x, max_x, min_y, max_y).
fn glyph_bounds(glyphs: &[PositionedGlyph]) -> Option<(i32, i32, i32, i32)> {
    let bounds = glyphs.iter().filter_map(|g| g.pixel_bounding_box()).fold(
        (i32::MAX, i32::MIN, i32::MAX, i32::MIN),
        |(min_x, max_x, min_y, max_y), bb| {
            (
                min_x.min(bb.min.x),
                max_x.max(bb.max.x),
                min_y.min(bb.min.y),
                max_y.max(bb.max.y),
            )
        },
    );
    (bounds.0 < bounds.1 && bounds.2 < bounds.3).then_some(bounds)
}

// ============================================================================
// DRAWING PRIMITIVES
// ============================================================================

fn set_pixel(canvas: &mut Canvas, x: usize, y: usize, color: Rgb, alpha: f32) {
    if x < canvas.width && y < canvas.height {
        let idx = (y * canvas.width + x) * 4;
        let frame = &mut *canvas.frame;
        let src = [color.0 as f32, color.1 as f32, color.2 as f32];
        let dst = [frame[idx] as f32, frame[idx + 1] as f32, frame[idx + 2] as f32];
        let a = alpha.clamp(0.0, 1.0);
        let out = [
            (src[0] * a + dst[0] * (1.0 - a)).round() as u8,
            (src[1] * a + dst[1] * (1.0 - a)).round() as u8,
            (src[2] * a + dst[2] * (1.0 - a)).round() as u8,
            0xff,
        ];
        frame[idx..idx + 4].copy_from_slice(&out);
    }
}

fn set_pixel_i32(canvas: &mut Canvas, x: i32, y: i32, color: Rgb, alpha: f32) {
    if x >= 0 && y >= 0 {
        set_pixel(canvas, x as usize, y as usize, color, alpha);
    }
}

fn draw_thick_line_aa(
    canvas: &mut Canvas,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    thickness: f32,
    color: Rgb,
) {
    let min_x = x0.min(x1) - thickness.ceil() as i32 - 1;
    let max_x = x0.max(x1) + thickness.ceil() as i32 + 1;
    let min_y = y0.min(y1) - thickness.ceil() as i32 - 1;
    let max_y = y0.max(y1) + thickness.ceil() as i32 + 1;
    let dx = (x1 - x0) as f32;
    let dy = (y1 - y0) as f32;
    let len_sq = (dx * dx + dy * dy).max(f32::EPSILON);
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let px = x as f32 - x0 as f32;
            let py = y as f32 - y0 as f32;
            let t = ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0);
            let lx = x0 as f32 + t * dx;
            let ly = y0 as f32 + t * dy;
            let dist = ((lx - x as f32).powi(2) + (ly - y as f32).powi(2)).sqrt();
            let aa = (1.0 - (dist - thickness / 2.0).clamp(0.0, 1.0)).clamp(0.0, 1.0);
            if aa > 0.01 {
                set_pixel_i32(canvas, x, y, color, aa);
            }
        }
    }
}

/// Filled disk, one color per slice. Slice `i` starts at `rotation + i * 2π/n`
/// measured clockwise from the +x axis.
fn render_wheel_immediate(
    canvas: &mut Canvas,
    cx: i32,
    cy: i32,
    r: i32,
    rotation: f64,
    colors: &[Rgb],
) {
    if colors.is_empty() {
        return;
    }
    let slice = TAU / colors.len() as f64;
    for y in (cy - r - 1).max(0)..=(cy + r + 1).min(canvas.height as i32 - 1) {
        for x in (cx - r - 1).max(0)..=(cx + r + 1).min(canvas.width as i32 - 1) {
            let dx = x - cx;
            let dy = y - cy;
            let dist = ((dx * dx + dy * dy) as f64).sqrt();
            if dist > r as f64 + 1.0 {
                continue;
            }
            let aa = if dist > r as f64 {
                1.0 - (dist - r as f64).min(1.0)
            } else {
                1.0
            };
            let angle = ((dy as f64).atan2(dx as f64) - rotation).rem_euclid(TAU);
            let index = ((angle / slice) as usize).min(colors.len() - 1);
            if aa > 0.0 {
                set_pixel(canvas, x as usize, y as usize, colors[index], aa as f32);
            }
        }
    }
}

/// Full-circle band between `r - thickness` and `r`.
fn render_ring_immediate(
    canvas: &mut Canvas,
    cx: i32,
    cy: i32,
    r: i32,
    thickness: i32,
    color: Rgb,
) {
    for y in (cy - r - 1)..=(cy + r + 1) {
        for x in (cx - r - 1)..=(cx + r + 1) {
            let dx = x - cx;
            let dy = y - cy;
            let dist = ((dx * dx + dy * dy) as f64).sqrt();
            let aa = if dist > r as f64 {
                1.0 - (dist - r as f64).min(1.0)
            } else if dist < (r - thickness) as f64 {
                1.0 - ((r - thickness) as f64 - dist).min(1.0)
            } else {
                1.0
            };
            if dist >= (r - thickness - 1) as f64 && dist <= (r + 1) as f64 && aa > 0.0 {
                set_pixel_i32(canvas, x, y, color, aa as f32);
            }
        }
    }
}

fn draw_circle(canvas: &mut Canvas, cx: i32, cy: i32, radius: i32, color: Rgb) {
    for y in -radius - 1..=radius + 1 {
        for x in -radius - 1..=radius + 1 {
            let dist = ((x * x + y * y) as f64).sqrt();
            let aa = if dist > radius as f64 {
                1.0 - (dist - radius as f64).min(1.0)
            } else {
                1.0
            };
            if dist <= radius as f64 + 1.0 && aa > 0.0 {
                set_pixel_i32(canvas, cx + x, cy + y, color, aa as f32);
            }
        }
    }
}

fn fill_triangle(canvas: &mut Canvas, points: [(i32, i32); 3], color: Rgb) {
    let [(ax, ay), (bx, by), (cx, cy)] = points.map(|(x, y)| (x as f64, y as f64));
    let edge = |x0: f64, y0: f64, x1: f64, y1: f64, px: f64, py: f64| {
        (x1 - x0) * (py - y0) - (y1 - y0) * (px - x0)
    };
    let min_x = ax.min(bx).min(cx).floor() as i32;
    let max_x = ax.max(bx).max(cx).ceil() as i32;
    let min_y = ay.min(by).min(cy).floor() as i32;
    let max_y = ay.max(by).max(cy).ceil() as i32;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let (px, py) = (x as f64 + 0.5, y as f64 + 0.5);
            let e0 = edge(ax, ay, bx, by, px, py);
            let e1 = edge(bx, by, cx, cy, px, py);
            let e2 = edge(cx, cy, ax, ay, px, py);
            let inside = (e0 >= 0.0 && e1 >= 0.0 && e2 >= 0.0)
                || (e0 <= 0.0 && e1 <= 0.0 && e2 <= 0.0);
            if inside {
                set_pixel_i32(canvas, x, y, color, 1.0);
            }
        }
    }
}

fn fill_rect(canvas: &mut Canvas, rect: Rect, color: Rgb, alpha: f32) {
    let x_end = rect.right().min(canvas.width as i32);
    let y_end = rect.bottom().min(canvas.height as i32);
    for y in rect.y.max(0)..y_end {
        for x in rect.x.max(0)..x_end {
            set_pixel(canvas, x as usize, y as usize, color, alpha);
        }
    }
}

/// Draws `text` vertically centered on `y`, anchored at `x` per `align`.
fn draw_text(
    canvas: &mut Canvas,
    x: i32,
    y: i32,
    text: &str,
    font: &Font,
    scale: Scale,
    align: TextAlign,
    color: Rgb,
) {
    let v_metrics = font.v_metrics(scale);
    let glyphs: Vec<PositionedGlyph> = font
        .layout(text, scale, point(0.0, v_metrics.ascent))
        .collect();
    let Some((min_x, max_x, min_y, max_y)) = glyph_bounds(&glyphs) else {
        return;
    };
    let width_px = max_x - min_x;
    let height_px = max_y - min_y;
    let offset_x = match align {
        TextAlign::Left => x,
        TextAlign::Center => x - width_px / 2,
        TextAlign::Right => x - width_px,
    };
    let offset_y = y - height_px / 2;
    for glyph in &glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let px = offset_x + gx as i32 + bb.min.x - min_x;
                let py = offset_y + gy as i32 + bb.min.y - min_y;
                set_pixel_i32(canvas, px, py, color, v);
            });
        }
    }
}

/// Draws `text` along the ray at `angle` from (`cx`, `cy`), right-aligned so
/// it ends `end_radius` pixels from the center.
fn draw_radial_text(
    canvas: &mut Canvas,
    cx: i32,
    cy: i32,
    angle: f64,
    end_radius: f64,
    text: &str,
    font: &Font,
    scale: Scale,
    color: Rgb,
) {
    let v_metrics = font.v_metrics(scale);
    let glyphs: Vec<PositionedGlyph> = font
        .layout(text, scale, point(0.0, v_metrics.ascent))
        .collect();
    let Some((min_x, max_x, min_y, max_y)) = glyph_bounds(&glyphs) else {
        return;
    };
    let width = (max_x - min_x) as f64;
    let half_height = (max_y - min_y) as f64 / 2.0;
    let (sin_a, cos_a) = angle.sin_cos();

    for glyph in &glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                if v > 0.001 {
                    let along = end_radius - width + (gx as i32 + bb.min.x - min_x) as f64;
                    let across = (gy as i32 + bb.min.y - min_y) as f64 - half_height;
                    let final_x = cx as f64 + along * cos_a - across * sin_a;
                    let final_y = cy as f64 + along * sin_a + across * cos_a;
                    draw_antialiased_pixel(canvas, final_x, final_y, color, v);
                }
            });
        }
    }
}

fn draw_antialiased_pixel(canvas: &mut Canvas, x: f64, y: f64, color: Rgb, alpha: f32) {
    let x_floor = x.floor() as i32;
    let y_floor = y.floor() as i32;
    let x_frac = x - x_floor as f64;
    let y_frac = y - y_floor as f64;

    // Bilinear split over the four nearest pixels
    let samples = [
        (x_floor, y_floor, (1.0 - x_frac) * (1.0 - y_frac)),
        (x_floor + 1, y_floor, x_frac * (1.0 - y_frac)),
        (x_floor, y_floor + 1, (1.0 - x_frac) * y_frac),
        (x_floor + 1, y_floor + 1, x_frac * y_frac),
    ];

    for (px, py, weight) in samples {
        let final_alpha = alpha * weight as f32;
        if final_alpha > 0.001 {
            set_pixel_i32(canvas, px, py, color, final_alpha);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animator::final_rotation;
    use pretty_assertions::assert_eq;

    struct Fixture {
        config: WheelConfig,
        layout: Layout,
        items: Vec<String>,
        history: HistoryLog,
    }

    impl Fixture {
        fn new(items: &[&str]) -> Self {
            let config = WheelConfig::default();
            let layout = Layout::new(&config);
            Self {
                config,
                layout,
                items: items.iter().map(|s| s.to_string()).collect(),
                history: HistoryLog::new(),
            }
        }

        fn view(&self, rotation: f64, pending: Option<&'static str>) -> FrameView<'_> {
            FrameView {
                items: &self.items,
                rotation,
                history: &self.history,
                input: "",
                input_blank: true,
                item_scroll: 0,
                pending,
                spinning: false,
            }
        }

        fn draw(&self, view: &FrameView) -> Vec<u8> {
            let (w, h) = (self.config.window_width(), self.config.window_height());
            let mut frame = vec![0u8; w * h * 4];
            let mut canvas = Canvas::new(&mut frame, w, h);
            render_frame(&mut canvas, view, &self.layout, &self.config, None);
            frame
        }

        fn pixel(&self, frame: &[u8], x: usize, y: usize) -> Rgb {
            let idx = (y * self.config.window_width() + x) * 4;
            (frame[idx], frame[idx + 1], frame[idx + 2])
        }
    }

    #[test]
    fn slices_follow_rotation_and_palette() {
        let fixture = Fixture::new(&["A", "B", "C", "D"]);
        let frame = fixture.draw(&fixture.view(final_rotation(0, 4), None));

        // Slice 0 covers the lower-left quadrant at rest.
        assert_eq!(fixture.pixel(&frame, 150, 450), slice_color(0).as_tuple());
        // Slice 2 is opposite it.
        assert_eq!(fixture.pixel(&frame, 450, 150), slice_color(2).as_tuple());
    }

    #[test]
    fn hub_and_pointer_sit_on_top_of_the_wheel() {
        let fixture = Fixture::new(&["A", "B", "C", "D"]);
        let frame = fixture.draw(&fixture.view(0.0, None));
        assert_eq!(fixture.pixel(&frame, 300, 300), WHITE);
        assert_eq!(
            fixture.pixel(&frame, 300, 35),
            fixture.config.pointer_color.as_tuple()
        );
    }

    #[test]
    fn background_shows_outside_the_wheel() {
        let fixture = Fixture::new(&["A"]);
        let frame = fixture.draw(&fixture.view(0.0, None));
        assert_eq!(
            fixture.pixel(&frame, 3, 3),
            fixture.config.background_color.as_tuple()
        );
        assert_eq!(fixture.pixel(&frame, 800, 5), WHITE);
    }

    #[test]
    fn empty_list_draws_no_slices() {
        let fixture = Fixture::new(&[]);
        let scene = build_scene(&fixture.view(0.0, None), &fixture.layout, &fixture.config);
        assert!(!scene
            .commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Wheel { .. })));
    }

    #[test]
    fn one_label_and_border_per_slice() {
        let fixture = Fixture::new(&["A", "B", "C"]);
        let scene = build_scene(&fixture.view(0.0, None), &fixture.layout, &fixture.config);
        let labels = scene
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::RadialText { .. }))
            .count();
        let borders = scene
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count();
        assert_eq!((labels, borders), (3, 3));
    }

    #[test]
    fn pending_result_dims_the_window() {
        let fixture = Fixture::new(&["A", "B"]);
        let idle = fixture.draw(&fixture.view(0.0, None));
        let pending = fixture.draw(&fixture.view(0.0, Some("A")));
        let before = fixture.pixel(&idle, 20, 20);
        let after = fixture.pixel(&pending, 20, 20);
        assert!(after.0 < before.0);

        let (x, y) = fixture.layout.dialog.center();
        assert_eq!(fixture.pixel(&pending, x as usize, y as usize), WHITE);
    }

    #[test]
    fn spin_button_greys_out_while_unusable() {
        let fixture = Fixture::new(&["A", "B"]);
        let (x, y) = fixture.layout.spin_button.center();
        let (x, y) = (x as usize, y as usize);

        let idle = fixture.draw(&fixture.view(0.0, None));
        assert_eq!(fixture.pixel(&idle, x, y), ACCENT);

        let spinning = FrameView {
            spinning: true,
            ..fixture.view(0.0, None)
        };
        let frame = fixture.draw(&spinning);
        assert_eq!(fixture.pixel(&frame, x, y), DISABLED);

        let empty = Fixture::new(&[]);
        let frame = empty.draw(&empty.view(0.0, None));
        assert_eq!(empty.pixel(&frame, x, y), DISABLED);
    }

    #[test]
    fn configured_font_must_exist() {
        let err = load_font(Some(Path::new("/no/such/font.ttf"))).unwrap_err();
        assert!(matches!(err, WheelError::Read { .. }));
    }
}
