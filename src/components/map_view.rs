use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, TouchEvent};
use yew::prelude::*;

use crate::levels::Landmark;
use crate::mapper::{locate_tap, raw_to_screen};
use crate::model::{ImageSize, Round, RoundAction, ViewPoint};
use crate::overlay::{self, OverlayScene};
use crate::state::{Camera, TouchOutcome, TouchState};
use crate::util::clog;

use super::{
    camera_controls::CameraControls, guess_panel::GuessPanel, result_overlay::ResultOverlay,
};

const ZOOM_STEP: f64 = 1.25;
const PIN_RADIUS: f64 = 10.0;
/// Distance from the pin tip (the tapped point) to the centre of its head.
const PIN_HEAD_OFFSET: f64 = 24.0;

type DrawRef = Rc<RefCell<Option<Rc<dyn Fn()>>>>;

#[derive(Properties, PartialEq, Clone)]
pub struct MapViewProps {
    pub map_image: AttrValue,
    pub landmark: Landmark,
    pub play_again: Callback<()>,
}

/// Decoded size of the map, or `None` while it is still loading or failed to decode.
fn loaded_size(img: &Option<HtmlImageElement>) -> Option<ImageSize> {
    let img = img.as_ref()?;
    if !img.complete() {
        return None;
    }
    ImageSize::from_natural(img.natural_width(), img.natural_height())
}

fn canvas_point(canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> ViewPoint {
    let rect = canvas.get_bounding_client_rect();
    ViewPoint::new(client_x - rect.left(), client_y - rect.top())
}

fn draw_pin(ctx: &CanvasRenderingContext2d, tip: ViewPoint) {
    let hx = tip.x;
    let hy = tip.y - PIN_HEAD_OFFSET;
    ctx.set_fill_style_str("#f85149");
    ctx.begin_path();
    ctx.move_to(tip.x, tip.y);
    ctx.line_to(hx - PIN_RADIUS * 0.8, hy + PIN_RADIUS * 0.6);
    ctx.line_to(hx + PIN_RADIUS * 0.8, hy + PIN_RADIUS * 0.6);
    ctx.close_path();
    ctx.fill();
    ctx.begin_path();
    ctx.arc(hx, hy, PIN_RADIUS, 0.0, TAU).ok();
    ctx.fill();
    ctx.set_fill_style_str("#ffffff");
    ctx.begin_path();
    ctx.arc(hx, hy, PIN_RADIUS * 0.4, 0.0, TAU).ok();
    ctx.fill();
}

fn paint_overlay(ctx: &CanvasRenderingContext2d, scene: &OverlayScene) {
    ctx.save();
    ctx.set_stroke_style_str(overlay::INK);
    ctx.set_fill_style_str(overlay::INK);
    ctx.set_line_width(overlay::STROKE_WIDTH);
    ctx.begin_path();
    ctx.arc(scene.marker.x, scene.marker.y, overlay::CIRCLE_RADIUS, 0.0, TAU)
        .ok();
    ctx.stroke();
    ctx.begin_path();
    ctx.move_to(scene.marker.x, scene.marker.y);
    ctx.line_to(scene.target.x, scene.target.y);
    ctx.stroke();
    ctx.set_font(overlay::LABEL_FONT);
    ctx.fill_text(&scene.label(), overlay::LABEL_ANCHOR.x, overlay::LABEL_ANCHOR.y)
        .ok();
    ctx.restore();
}

/// Shared handles the pointer listeners act on.
struct PointerInput {
    camera: Rc<RefCell<Camera>>,
    touch: Rc<RefCell<TouchState>>,
    image: Rc<RefCell<Option<HtmlImageElement>>>,
    round: Rc<RefCell<UseReducerHandle<Round>>>,
    coords_text: UseStateHandle<String>,
    draw: DrawRef,
}

impl PointerInput {
    fn redraw(&self) {
        if let Some(f) = &*self.draw.borrow() {
            f();
        }
    }

    fn round(&self) -> UseReducerHandle<Round> {
        self.round.borrow().clone()
    }

    /// Input is disabled for good once the guess is confirmed.
    fn locked(&self) -> bool {
        self.round().is_confirmed()
    }

    fn press(&self, p: ViewPoint) {
        if self.locked() {
            return;
        }
        self.touch.borrow_mut().press(p.x, p.y);
        let size = loaded_size(&self.image.borrow());
        let transform = self.camera.borrow().transform();
        let Some(raw) = locate_tap(p, &transform, size) else {
            return;
        };
        self.coords_text
            .set(format!("X: {}, Y: {}", raw.x.round(), raw.y.round()));
        self.round().dispatch(RoundAction::Tap { raw });
    }

    fn apply(&self, outcome: TouchOutcome) {
        match outcome {
            TouchOutcome::PanStarted { dx, dy } => {
                self.round().dispatch(RoundAction::Pan);
                self.camera.borrow_mut().pan_by(dx, dy);
                self.redraw();
            }
            TouchOutcome::Panning { dx, dy } => {
                self.camera.borrow_mut().pan_by(dx, dy);
                self.redraw();
            }
            TouchOutcome::Tap | TouchOutcome::None => {}
        }
    }

    fn moved(&self, p: ViewPoint) {
        if self.locked() {
            return;
        }
        let outcome = self.touch.borrow_mut().track(p.x, p.y);
        self.apply(outcome);
    }

    fn released(&self, p: ViewPoint) {
        if self.locked() {
            self.touch.borrow_mut().cancel();
            return;
        }
        let outcome = self.touch.borrow_mut().release(p.x, p.y);
        self.apply(outcome);
    }

    fn pinch_start(&self, dist: f64) {
        if self.locked() {
            return;
        }
        let outcome = self.touch.borrow_mut().pinch_start(dist);
        self.apply(outcome);
    }

    fn pinch(&self, center: ViewPoint, dist: f64) {
        if self.locked() {
            return;
        }
        let factor = self.touch.borrow_mut().pinch_factor(dist);
        self.camera
            .borrow_mut()
            .zoom_at(center.x, center.y, factor);
        self.redraw();
    }

    fn zoom(&self, center: ViewPoint, factor: f64) {
        if self.locked() {
            return;
        }
        self.round().dispatch(RoundAction::Pan);
        self.camera
            .borrow_mut()
            .zoom_at(center.x, center.y, factor);
        self.redraw();
    }
}

fn two_finger(canvas: &HtmlCanvasElement, e: &TouchEvent) -> Option<(ViewPoint, f64)> {
    let touches = e.touches();
    let t0 = touches.item(0)?;
    let t1 = touches.item(1)?;
    let a = canvas_point(canvas, t0.client_x() as f64, t0.client_y() as f64);
    let b = canvas_point(canvas, t1.client_x() as f64, t1.client_y() as f64);
    let center = ViewPoint::new((a.x + b.x) * 0.5, (a.y + b.y) * 0.5);
    Some((center, (b.x - a.x).hypot(b.y - a.y)))
}

#[function_component(MapView)]
pub fn map_view(props: &MapViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let camera = use_mut_ref(Camera::default);
    let touch_state = use_mut_ref(TouchState::default);
    let image_ref = use_mut_ref(|| None::<HtmlImageElement>);
    let draw_ref: DrawRef = use_mut_ref(|| None::<Rc<dyn Fn()>>);
    let round = use_reducer(|| Round::new(props.landmark.target));
    let round_ref = use_mut_ref(|| round.clone());
    let scene_ref = use_mut_ref(|| None::<OverlayScene>);
    let coords_text = use_state(String::new);

    // Effect: refresh the round handle, freeze the overlay on confirmation, redraw
    {
        let round_ref = round_ref.clone();
        let current = round.clone();
        let scene_ref = scene_ref.clone();
        let camera = camera.clone();
        let image_ref = image_ref.clone();
        let draw_ref = draw_ref.clone();
        use_effect_with((*round).clone(), move |r| {
            *round_ref.borrow_mut() = current.clone();
            if !r.is_confirmed() {
                *scene_ref.borrow_mut() = None;
            } else if scene_ref.borrow().is_none() {
                let transform = camera.borrow().transform();
                let size = loaded_size(&image_ref.borrow());
                let scene = OverlayScene::from_round(r, &transform, size);
                if let Some(report) = r.report() {
                    clog(&format!(
                        "guess confirmed: score={} distance={:.1}",
                        report.score, report.distance
                    ));
                }
                *scene_ref.borrow_mut() = scene;
            }
            if let Some(f) = &*draw_ref.borrow() {
                f();
            }
            || ()
        });
    }

    // Main mount effect (image, events)
    {
        let canvas_ref = canvas_ref.clone();
        let camera = camera.clone();
        let image_ref = image_ref.clone();
        let draw_ref_setup = draw_ref.clone();
        let round_ref = round_ref.clone();
        let scene_ref = scene_ref.clone();
        let input = Rc::new(PointerInput {
            camera: camera.clone(),
            touch: touch_state.clone(),
            image: image_ref.clone(),
            round: round_ref.clone(),
            coords_text: coords_text.clone(),
            draw: draw_ref.clone(),
        });
        let map_image = props.map_image.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("window");
            let canvas: HtmlCanvasElement = canvas_ref.cast::<HtmlCanvasElement>().expect("canvas");
            let compute_and_apply_canvas_size = {
                let canvas = canvas.clone();
                let window = window.clone();
                move || {
                    let width = window
                        .inner_width()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(760.0);
                    let height = window
                        .inner_height()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(400.0);
                    canvas.set_width(width.max(0.0) as u32);
                    canvas.set_height(height.max(0.0) as u32);
                }
            };
            compute_and_apply_canvas_size();

            let draw_closure: Rc<dyn Fn()> = {
                let canvas = canvas.clone();
                let camera = camera.clone();
                let image_ref = image_ref.clone();
                let round_ref = round_ref.clone();
                let scene_ref = scene_ref.clone();
                Rc::new(move || {
                    if !canvas.is_connected() {
                        return;
                    }
                    let ctx = match canvas
                        .get_context("2d")
                        .ok()
                        .flatten()
                        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
                    {
                        Some(c) => c,
                        None => return,
                    };
                    let w = canvas.width() as f64;
                    let h = canvas.height() as f64;
                    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
                    ctx.set_fill_style_str("#0e1116");
                    ctx.fill_rect(0.0, 0.0, w, h);

                    let image = image_ref.borrow();
                    let size = loaded_size(&image);
                    let t = camera.borrow().transform();
                    if let (Some(img), Some(_)) = (image.as_ref(), size) {
                        ctx.set_transform(t.a, t.b, t.c, t.d, t.e, t.f).ok();
                        ctx.draw_image_with_html_image_element(img, 0.0, 0.0).ok();
                        ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
                    } else {
                        ctx.set_fill_style_str("#8b949e");
                        ctx.set_font("16px sans-serif");
                        ctx.fill_text("Loading map…", 16.0, h - 16.0).ok();
                    }

                    let round = round_ref.borrow().clone();
                    if let (Some(marker), Some(_)) = (round.marker(), size) {
                        draw_pin(&ctx, raw_to_screen(marker, &t, size));
                    }
                    if let Some(scene) = &*scene_ref.borrow() {
                        paint_overlay(&ctx, scene);
                    }
                })
            };
            *draw_ref_setup.borrow_mut() = Some(draw_closure.clone());

            // Map image
            let img = HtmlImageElement::new().expect("image element");
            let onload_cb = {
                let canvas = canvas.clone();
                let camera = camera.clone();
                let image_ref = image_ref.clone();
                let draw_closure = draw_closure.clone();
                Closure::wrap(Box::new(move || {
                    let size = loaded_size(&image_ref.borrow());
                    if let Some(size) = size {
                        let mut cam = camera.borrow_mut();
                        if !cam.initialized {
                            cam.fit(canvas.width() as f64, canvas.height() as f64, size);
                        }
                        clog(&format!("map loaded: {}x{}", size.width, size.height));
                    }
                    draw_closure();
                }) as Box<dyn FnMut()>)
            };
            img.set_onload(Some(onload_cb.as_ref().unchecked_ref()));
            img.set_src(&map_image);
            *image_ref.borrow_mut() = Some(img.clone());

            // Mouse events
            let mousedown_cb = {
                let canvas = canvas.clone();
                let input = input.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    if e.button() == 0 {
                        input.press(canvas_point(&canvas, e.client_x() as f64, e.client_y() as f64));
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("mousedown", mousedown_cb.as_ref().unchecked_ref())
                .ok();
            let mousemove_cb = {
                let canvas = canvas.clone();
                let input = input.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    input.moved(canvas_point(&canvas, e.client_x() as f64, e.client_y() as f64));
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("mousemove", mousemove_cb.as_ref().unchecked_ref())
                .ok();
            let mouseup_cb = {
                let canvas = canvas.clone();
                let input = input.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    if e.button() == 0 {
                        input.released(canvas_point(&canvas, e.client_x() as f64, e.client_y() as f64));
                    }
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("mouseup", mouseup_cb.as_ref().unchecked_ref())
                .ok();
            // Wheel zoom
            let wheel_cb = {
                let canvas = canvas.clone();
                let input = input.clone();
                Closure::wrap(Box::new(move |e: web_sys::WheelEvent| {
                    e.prevent_default();
                    let zoom_change = (-e.delta_y() * 0.001).exp();
                    input.zoom(
                        canvas_point(&canvas, e.client_x() as f64, e.client_y() as f64),
                        zoom_change,
                    );
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref())
                .ok();
            let resize_cb = {
                let draw_closure = draw_closure.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    compute_and_apply_canvas_size();
                    draw_closure();
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                .ok();
            // Touch
            let touch_start_cb = {
                let canvas = canvas.clone();
                let input = input.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    e.prevent_default();
                    let touches = e.touches();
                    if touches.length() == 1 {
                        if let Some(t0) = touches.item(0) {
                            input.press(canvas_point(&canvas, t0.client_x() as f64, t0.client_y() as f64));
                        }
                    } else if let Some((_, dist)) = two_finger(&canvas, &e) {
                        input.pinch_start(dist);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("touchstart", touch_start_cb.as_ref().unchecked_ref())
                .ok();
            let touch_move_cb = {
                let canvas = canvas.clone();
                let input = input.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    e.prevent_default();
                    let touches = e.touches();
                    if touches.length() == 1 {
                        if let Some(t0) = touches.item(0) {
                            input.moved(canvas_point(&canvas, t0.client_x() as f64, t0.client_y() as f64));
                        }
                    } else if let Some((center, dist)) = two_finger(&canvas, &e) {
                        input.pinch(center, dist);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("touchmove", touch_move_cb.as_ref().unchecked_ref())
                .ok();
            let touch_end_cb = {
                let canvas = canvas.clone();
                let input = input.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    e.prevent_default();
                    let remaining = e.touches();
                    if remaining.length() == 0 {
                        match e.changed_touches().item(0) {
                            Some(t) => input.released(canvas_point(&canvas, t.client_x() as f64, t.client_y() as f64)),
                            None => input.touch.borrow_mut().cancel(),
                        }
                    } else if remaining.length() == 1 {
                        if let Some(t0) = remaining.item(0) {
                            let p = canvas_point(&canvas, t0.client_x() as f64, t0.client_y() as f64);
                            input.touch.borrow_mut().pinch_end(p.x, p.y);
                        }
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("touchend", touch_end_cb.as_ref().unchecked_ref())
                .ok();
            canvas
                .add_event_listener_with_callback("touchcancel", touch_end_cb.as_ref().unchecked_ref())
                .ok();

            draw_closure();

            // Cleanup
            move || {
                let _ = canvas.remove_event_listener_with_callback(
                    "mousedown",
                    mousedown_cb.as_ref().unchecked_ref(),
                );
                let _ = window.remove_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                );
                let _ = window.remove_event_listener_with_callback(
                    "mouseup",
                    mouseup_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "wheel",
                    wheel_cb.as_ref().unchecked_ref(),
                );
                let _ = window.remove_event_listener_with_callback(
                    "resize",
                    resize_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchstart",
                    touch_start_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchmove",
                    touch_move_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchend",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchcancel",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                img.set_onload(None);
                let _keep_alive = (&onload_cb,);
            }
        });
    }

    let confirm_cb: Callback<()> = {
        let round = round.clone();
        Callback::from(move |()| round.dispatch(RoundAction::Confirm))
    };
    let zoom_cb = |factor: f64| -> Callback<()> {
        let canvas_ref = canvas_ref.clone();
        let camera = camera.clone();
        let round = round.clone();
        let draw_ref = draw_ref.clone();
        Callback::from(move |()| {
            if round.is_confirmed() {
                return;
            }
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                round.dispatch(RoundAction::Pan);
                camera.borrow_mut().zoom_at(
                    canvas.width() as f64 * 0.5,
                    canvas.height() as f64 * 0.5,
                    factor,
                );
            }
            if let Some(f) = &*draw_ref.borrow() {
                f();
            }
        })
    };
    let fit_cb: Callback<()> = {
        let canvas_ref = canvas_ref.clone();
        let camera = camera.clone();
        let image_ref = image_ref.clone();
        let round = round.clone();
        let draw_ref = draw_ref.clone();
        Callback::from(move |()| {
            if round.is_confirmed() {
                return;
            }
            let size = loaded_size(&image_ref.borrow());
            if let (Some(canvas), Some(size)) = (canvas_ref.cast::<HtmlCanvasElement>(), size) {
                round.dispatch(RoundAction::Pan);
                camera
                    .borrow_mut()
                    .fit(canvas.width() as f64, canvas.height() as f64, size);
            }
            if let Some(f) = &*draw_ref.borrow() {
                f();
            }
        })
    };

    let confirmed = round.is_confirmed();
    html! {<div style="position:relative; width:100vw; height:100vh; overflow:hidden;">
        <canvas ref={canvas_ref.clone()} id="map-canvas" style="display:block; width:100%; height:100%; touch-action:none;"></canvas>
        <GuessPanel landmark_name={props.landmark.name.clone()} coords_text={(*coords_text).clone()} can_confirm={round.can_confirm()} on_confirm={confirm_cb} />
        { if !confirmed { html!{ <CameraControls on_zoom_in={zoom_cb(ZOOM_STEP)} on_zoom_out={zoom_cb(1.0 / ZOOM_STEP)} on_fit={fit_cb} /> } } else { html!{} } }
        <ResultOverlay report={round.report()} landmark_name={props.landmark.name.clone()} play_again={props.play_again.clone()} />
    </div> }
}
