use std::time::Instant;

use featherview_core::consts::WHEEL_ANGLE_PER_LINE;
use featherview_core::controller::{GesturePhase, PointerButton, ViewCommand, ViewKey};
use featherview_core::cursor::CursorShape;
use featherview_core::geometry::{Point, Rect, Size};

use crate::app::FeatherViewApp;

/// Points egui scrolls for one wheel line.
const POINTS_PER_SCROLL_LINE: f32 = 50.0;

pub fn show(ctx: &egui::Context, app: &mut FeatherViewApp) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE.fill(egui::Color32::BLACK))
        .show(ctx, |ui| {
            let rect = ui.available_rect_before_wrap();
            ui.allocate_rect(rect, egui::Sense::click_and_drag());

            app.controller.resized(
                Size::new(f64::from(rect.width()), f64::from(rect.height())),
                f64::from(ctx.pixels_per_point()),
            );

            handle_input(ui, app, rect);
            execute_commands(ctx, app, rect);

            if !draw_image(ui, app, rect) {
                show_placeholder(ui, app, rect);
            }

            ctx.set_cursor_icon(cursor_icon(app.controller.cursor_shape()));
        });
}

fn handle_input(ui: &egui::Ui, app: &mut FeatherViewApp, rect: egui::Rect) {
    let now = Instant::now();
    let (events, double_clicked, multi_touch, hover) = ui.input(|i| {
        (
            i.events.clone(),
            i.pointer.button_double_clicked(egui::PointerButton::Primary),
            i.multi_touch(),
            i.pointer.hover_pos(),
        )
    });
    let focus = to_local(hover.unwrap_or(rect.center()), rect);

    for event in events {
        match event {
            egui::Event::PointerMoved(pos) => {
                app.controller.pointer_moved(to_local(pos, rect), now);
            }
            egui::Event::PointerButton {
                pos,
                button,
                pressed,
                ..
            } => {
                let Some(button) = map_button(button) else {
                    continue;
                };
                if !pressed {
                    app.controller.pointer_released(button, now);
                } else if rect.contains(pos) {
                    app.controller.pointer_pressed(button, to_local(pos, rect));
                }
            }
            egui::Event::MouseWheel {
                unit,
                delta,
                modifiers,
                ..
            } => {
                let angle = wheel_angle(unit, delta, rect);
                app.controller.wheel(angle, focus, modifiers.command);
            }
            egui::Event::Zoom(factor) => {
                app.controller
                    .pinch(GesturePhase::Update, f64::from(factor), focus, now);
            }
            egui::Event::Key {
                key, pressed: true, ..
            } => {
                if let Some(key) = map_key(key) {
                    app.controller.key_pressed(key);
                }
            }
            _ => {}
        }
    }

    // Quiet pinches are ended by the controller's tick; egui reports no
    // explicit gesture end.
    if let Some(touch) = multi_touch {
        if touch.zoom_delta != 1.0 {
            app.controller.pinch(
                GesturePhase::Update,
                f64::from(touch.zoom_delta),
                to_local(touch.center_pos, rect),
                now,
            );
        }
    }

    if double_clicked {
        app.controller.double_clicked();
    }
}

fn execute_commands(ctx: &egui::Context, app: &mut FeatherViewApp, rect: egui::Rect) {
    for command in app.controller.take_commands() {
        match command {
            ViewCommand::WarpPointer(target) => {
                let pos = rect.min + egui::vec2(target.x as f32, target.y as f32);
                ctx.send_viewport_cmd(egui::ViewportCommand::CursorPosition(pos));
            }
            ViewCommand::SetFullscreen(fullscreen) => {
                ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(fullscreen));
            }
            ViewCommand::Repaint => ctx.request_repaint(),
        }
    }
}

/// Paint the visible part of the image. Returns false when there is nothing
/// to draw.
fn draw_image(ui: &egui::Ui, app: &mut FeatherViewApp, rect: egui::Rect) -> bool {
    let Some(plan) = app.controller.prepare_frame() else {
        return false;
    };
    let Some(image_size) = app.controller.viewport().image_size() else {
        return false;
    };
    let Some(texture) = app.viewport.texture(ui.ctx(), plan.smooth) else {
        return false;
    };

    let uv = egui::Rect::from_min_max(
        egui::pos2(
            (plan.source.x / image_size.width) as f32,
            (plan.source.y / image_size.height) as f32,
        ),
        egui::pos2(
            (plan.source.max().x / image_size.width) as f32,
            (plan.source.max().y / image_size.height) as f32,
        ),
    );
    let target = to_screen(plan.target, rect);
    ui.painter()
        .image(texture.id(), target, uv, egui::Color32::WHITE);
    true
}

fn show_placeholder(ui: &egui::Ui, app: &FeatherViewApp, rect: egui::Rect) {
    let text = match &app.load_error {
        Some(message) => message.clone(),
        None if app.image.is_none() => format!("Loading {}", app.path.display()),
        None => return,
    };
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        text,
        egui::FontId::proportional(18.0),
        egui::Color32::from_gray(100),
    );
}

fn to_local(pos: egui::Pos2, rect: egui::Rect) -> Point {
    Point::new(
        f64::from(pos.x - rect.min.x),
        f64::from(pos.y - rect.min.y),
    )
}

fn to_screen(r: Rect, panel: egui::Rect) -> egui::Rect {
    egui::Rect::from_min_size(
        panel.min + egui::vec2(r.x as f32, r.y as f32),
        egui::vec2(r.width as f32, r.height as f32),
    )
}

/// Convert an egui wheel delta to mouse angle units (120 per notch).
fn wheel_angle(unit: egui::MouseWheelUnit, delta: egui::Vec2, rect: egui::Rect) -> Point {
    let per_line = WHEEL_ANGLE_PER_LINE as f32;
    let scale = match unit {
        egui::MouseWheelUnit::Point => per_line / POINTS_PER_SCROLL_LINE,
        egui::MouseWheelUnit::Line => per_line,
        egui::MouseWheelUnit::Page => per_line * rect.height() / POINTS_PER_SCROLL_LINE,
    };
    Point::new(f64::from(delta.x * scale), f64::from(delta.y * scale))
}

fn map_button(button: egui::PointerButton) -> Option<PointerButton> {
    match button {
        egui::PointerButton::Primary => Some(PointerButton::Primary),
        egui::PointerButton::Secondary => Some(PointerButton::Secondary),
        egui::PointerButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

fn map_key(key: egui::Key) -> Option<ViewKey> {
    match key {
        egui::Key::F11 => Some(ViewKey::F11),
        egui::Key::Escape => Some(ViewKey::Escape),
        egui::Key::F => Some(ViewKey::F),
        egui::Key::ArrowLeft => Some(ViewKey::ArrowLeft),
        egui::Key::ArrowRight => Some(ViewKey::ArrowRight),
        egui::Key::ArrowUp => Some(ViewKey::ArrowUp),
        egui::Key::ArrowDown => Some(ViewKey::ArrowDown),
        _ => None,
    }
}

fn cursor_icon(shape: CursorShape) -> egui::CursorIcon {
    match shape {
        CursorShape::Default => egui::CursorIcon::Default,
        CursorShape::Move => egui::CursorIcon::Move,
        CursorShape::Hidden => egui::CursorIcon::None,
    }
}
