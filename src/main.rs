//! Stack Tower entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, PointerEvent};

    use stack_tower::consts::SIM_DT;
    use stack_tower::platform::web::DomGameOver;
    use stack_tower::renderer::BlockRenderer;
    use stack_tower::{Game, Settings};

    /// Page-level state shared by every callback
    struct App {
        game: Game<BlockRenderer, DomGameOver>,
        canvas: HtmlCanvasElement,
        last_time: f64,
    }

    impl App {
        /// Match the canvas backing store to its CSS size
        fn fit_canvas(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height) = canvas_pixel_size(&window, &self.canvas);
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.game.resize(width, height);
        }
    }

    fn canvas_pixel_size(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        (width.max(1), height.max(1))
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Stack Tower starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        let (width, height) = canvas_pixel_size(&window, &canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {}", e);
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let settings = Settings::load();
        let renderer = match BlockRenderer::new(surface, &adapter, width, height, &settings).await
        {
            Ok(renderer) => renderer,
            Err(e) => {
                log::error!("Failed to create device: {}", e);
                return;
            }
        };

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(settings, seed, renderer, DomGameOver::new(document.clone()));
        let app = Rc::new(RefCell::new(App {
            game,
            canvas,
            last_time: 0.0,
        }));

        setup_input_handlers(&window, app.clone());
        setup_resize_handler(&window, app.clone());
        setup_restart_button(&document, app.clone());

        // The loop is scheduled once for the life of the page
        if app.borrow_mut().game.start_frame_loop() {
            request_animation_frame(app);
        }

        log::info!("Stack Tower running!");
    }

    /// Pointer taps place blocks; drags orbit the camera
    fn setup_input_handlers(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        let down_app = app.clone();
        let down = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            // Primary button only
            if event.button() == 0 {
                let (x, y) = (event.client_x() as f32, event.client_y() as f32);
                down_app.borrow_mut().game.pointer_down(x, y);
            }
        });
        let _ = window.add_event_listener_with_callback("pointerdown", down.as_ref().unchecked_ref());
        down.forget();

        let move_app = app.clone();
        let moved = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            let (x, y) = (event.client_x() as f32, event.client_y() as f32);
            move_app.borrow_mut().game.pointer_move(x, y);
        });
        let _ = window.add_event_listener_with_callback("pointermove", moved.as_ref().unchecked_ref());
        moved.forget();

        let up = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
            if let Some(placement) = app.borrow_mut().game.pointer_up() {
                log::debug!("Placement: {:?}", placement);
            }
        });
        let _ = window.add_event_listener_with_callback("pointerup", up.as_ref().unchecked_ref());
        up.forget();
    }

    fn setup_resize_handler(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().fit_canvas();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(document: &web_sys::Document, app: Rc<RefCell<App>>) {
        let Some(btn) = document.get_element_by_id("restart-btn") else {
            log::warn!("No #restart-btn element");
            return;
        };

        // A press on the button must not start a window tap on the new session
        let press = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            event.stop_propagation();
        });
        let _ = btn.add_event_listener_with_callback("pointerdown", press.as_ref().unchecked_ref());
        press.forget();

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            app.borrow_mut().game.restart();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            // Calculate delta time
            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            a.last_time = time;

            a.game.frame(dt);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Stack Tower (native) starting...");
    log::info!("Native mode runs a headless autoplay session - run with `trunk serve` for web version");

    autoplay::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless session driven by a scripted player
#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use stack_tower::consts::SIM_DT;
    use stack_tower::platform::{HeadlessOverlay, HeadlessScene};
    use stack_tower::sim::overlap;
    use stack_tower::{Game, Settings};

    /// Give up after ten minutes of simulated play
    const MAX_FRAMES: u32 = 60 * 60 * 10;
    /// Widest miss the scripted player will accept before dropping
    const MAX_AIM: f32 = 1.2;

    pub fn run() {
        let settings = Settings::load().validated();
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        let mut game = Game::new(
            settings,
            seed,
            HeadlessScene::new(800, 600),
            HeadlessOverlay::default(),
        );
        game.start_frame_loop();

        let mut player = Pcg32::seed_from_u64(seed.rotate_left(17));
        let mut aim = player.random_range(0.0..MAX_AIM);

        for _ in 0..MAX_FRAMES {
            game.frame(SIM_DT);
            if game.game_over() {
                break;
            }

            let session = game.session();
            let len = session.stack.len();
            if len < 2 {
                break;
            }
            let top = &session.stack[len - 1];
            let (delta, _) = overlap(top, &session.stack[len - 2], top.axis.resolved());

            if delta.abs() <= aim {
                let placement = game.place();
                log::debug!("Dropped at {:+.3}: {:?}", delta, placement);
                aim = player.random_range(0.0..MAX_AIM);
            }
        }

        let session = game.session();
        log::info!(
            "Session finished: score {}, {} layers, {} frames rendered",
            game.score(),
            session.height(),
            game.scene().frames
        );
        if let Ok(json) = serde_json::to_string(&session.stack) {
            log::debug!("Final stack: {}", json);
        }

        game.restart();
        log::info!(
            "Restarted: {} layers, game over = {}",
            game.session().height(),
            game.game_over()
        );
    }
}
