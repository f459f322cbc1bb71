//! Dot Drop entry point
//!
//! Platform wiring only: the canvas-backed surface, pointer/touch input,
//! the speed control, the score display, and the animation-frame pump.
//! All gameplay lives in `dot_drop::sim`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Element, HtmlCanvasElement, HtmlInputElement, MouseEvent,
        TouchEvent,
    };

    use dot_drop::settings::GameOptions;
    use dot_drop::sim::Engine;
    use dot_drop::surface::{DrawSurface, ScoreDisplay, Viewport};

    /// Canvas 2D implementation of the draw surface
    struct CanvasSurface {
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    }

    impl CanvasSurface {
        fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
            let ctx = canvas
                .get_context("2d")?
                .ok_or_else(|| JsValue::from_str("no 2d context"))?
                .dyn_into::<CanvasRenderingContext2d>()?;
            ctx.set_fill_style(&JsValue::from_str("#e91e63"));
            ctx.set_stroke_style(&JsValue::from_str("#880e4f"));
            Ok(Self { canvas, ctx })
        }

        /// Match the canvas backing store to its CSS size
        fn sync_size(&self) {
            let w = self.canvas.client_width().max(0) as u32;
            let h = self.canvas.client_height().max(0) as u32;
            if self.canvas.width() != w {
                self.canvas.set_width(w);
            }
            if self.canvas.height() != h {
                self.canvas.set_height(h);
            }
        }
    }

    impl DrawSurface for CanvasSurface {
        fn viewport(&self) -> Viewport {
            let rect = self.canvas.get_bounding_client_rect();
            Viewport {
                width: self.canvas.width() as f32,
                height: self.canvas.height() as f32,
                offset: Vec2::new(rect.left() as f32, rect.top() as f32),
            }
        }

        fn clear(&mut self, width: f32, height: f32) {
            self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
        }

        fn begin_shape(&mut self) {
            self.ctx.begin_path();
        }

        fn circle(
            &mut self,
            center_x: f32,
            center_y: f32,
            radius: f32,
            start_angle: f32,
            end_angle: f32,
        ) {
            let _ = self.ctx.arc(
                center_x as f64,
                center_y as f64,
                radius as f64,
                start_angle as f64,
                end_angle as f64,
            );
        }

        fn end_shape(&mut self) {
            self.ctx.close_path();
        }

        fn fill(&mut self) {
            self.ctx.fill();
        }

        fn stroke(&mut self, width: f32) {
            self.ctx.set_line_width(width as f64);
            self.ctx.stroke();
        }

        fn contains_point(&self, x: f32, y: f32) -> bool {
            self.ctx.is_point_in_path_with_f64(x as f64, y as f64)
        }
    }

    /// Writes the score into the score element as plain text
    struct DomScore {
        el: Element,
    }

    impl ScoreDisplay for DomScore {
        fn show(&mut self, score: u64) {
            self.el.set_text_content(Some(&score.to_string()));
        }
    }

    /// Game instance holding the engine and its collaborators
    struct Game {
        engine: Engine,
        surface: CanvasSurface,
        score_out: DomScore,
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Dot Drop starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("board")
            .ok_or_else(|| JsValue::from_str("no #board canvas"))?
            .dyn_into()?;
        let score_el = document
            .get_element_by_id("score")
            .ok_or_else(|| JsValue::from_str("no #score element"))?;
        let speed_input: HtmlInputElement = document
            .get_element_by_id("speed")
            .ok_or_else(|| JsValue::from_str("no #speed input"))?
            .dyn_into()?;

        let mut surface = CanvasSurface::new(canvas.clone())?;
        surface.sync_size();

        let options = GameOptions::load();
        let seed = js_sys::Date::now() as u64;
        let mut engine = Engine::new(options, &surface, seed, now_ms())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        engine.set_speed_input(&speed_input.value());

        let mut score_out = DomScore { el: score_el };
        score_out.show(engine.score());
        engine.start(&mut surface);

        let game = Rc::new(RefCell::new(Game {
            engine,
            surface,
            score_out,
        }));

        setup_pointer_handlers(&canvas, game.clone());
        setup_speed_control(&speed_input, game.clone());
        setup_window_handlers(game.clone());

        request_animation_frame(game);

        log::info!("Dot Drop running!");
        Ok(())
    }

    fn setup_pointer_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
                let g = &mut *game.borrow_mut();
                let offset = g.surface.viewport().offset;
                let point = Vec2::new(
                    event.client_x() as f32 - offset.x,
                    event.client_y() as f32 - offset.y,
                );
                g.engine
                    .handle_pointer(point, now_ms(), &mut g.surface, &mut g.score_out);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let g = &mut *game.borrow_mut();
                    let offset = g.surface.viewport().offset;
                    let point = Vec2::new(
                        touch.client_x() as f32 - offset.x,
                        touch.client_y() as f32 - offset.y,
                    );
                    g.engine
                        .handle_pointer(point, now_ms(), &mut g.surface, &mut g.score_out);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_speed_control(speed_input: &HtmlInputElement, game: Rc<RefCell<Game>>) {
        let input = speed_input.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().engine.set_speed_input(&input.value());
        });
        let _ = speed_input
            .add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_window_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Resize: resync the backing store now, let the engine recompute
        // geometry at the start of its next tick
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let g = &mut *game.borrow_mut();
                g.surface.sync_size();
                g.engine.notify_resized();
            });
            let _ =
                window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Leaving the page: flush pending one-shot timers
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().engine.teardown();
            });
            let _ = window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let g = &mut *game.borrow_mut();
            g.engine.pump(time, &mut g.surface);
        }
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dot Drop (native) starting...");
    log::info!("Native mode is headless - build the wasm target for the playable version");

    println!("\nRunning headless smoke game...");
    smoke_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Deterministic headless session: spawn, fall, one scored hit
#[cfg(not(target_arch = "wasm32"))]
fn smoke_run() {
    use dot_drop::settings::GameOptions;
    use dot_drop::sim::Engine;
    use dot_drop::surface::{HeadlessSurface, ScoreProbe};
    use glam::Vec2;

    let options = GameOptions::default();
    let frame_ms = options.frame_interval_ms();

    let mut surface = HeadlessSurface::new(400.0, 600.0);
    let mut probe = ScoreProbe::default();
    let mut engine =
        Engine::new(options, &surface, 7, 0.0).expect("default options fit a 400x600 board");

    engine.start(&mut surface);
    assert!(engine.state().dots[0].drawn.is_some(), "first frame rendered");

    // run two seconds of wall clock through the timer set
    let mut clock = 0.0;
    while clock < 2_000.0 {
        clock += frame_ms;
        engine.pump(clock, &mut surface);
    }

    // click the most recently rendered dot
    let target = engine
        .state()
        .dots
        .iter()
        .rev()
        .find_map(|d| d.drawn)
        .expect("a rendered dot to aim at");
    let outcome = engine.handle_pointer(
        Vec2::new(target.x, target.y),
        clock,
        &mut surface,
        &mut probe,
    );
    assert_eq!(outcome.removed, 1, "pointer on a dot center scores it");

    let flushed = engine.teardown();
    println!(
        "✓ Smoke game passed: score {}, {} live dot(s), {} timer(s) flushed",
        engine.score(),
        engine.state().dots.len(),
        flushed
    );
}
