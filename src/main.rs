//! Brick Breaker entry point
//!
//! On the web this wires the canvas, WebGPU, DOM controls and the animation frame
//! loop. Natively it plays one headless session without input and reports the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent};

    use brick_breaker::renderer::{Frame, RenderError, RenderState};
    use brick_breaker::{Arena, FrameScheduler, GameController, GameTuning, Overlay};

    type FrameCallback = Closure<dyn FnMut(f64)>;

    /// Setup failures before the game loop exists
    #[derive(Debug, thiserror::Error)]
    pub enum StartupError {
        #[error("no window or document")]
        NoDocument,
        #[error("missing element #{0}")]
        MissingElement(&'static str),
        #[error(transparent)]
        Render(#[from] RenderError),
    }

    /// `requestAnimationFrame` scheduler. The callback is installed once the game
    /// it drives exists.
    struct BrowserScheduler {
        window: web_sys::Window,
        callback: Rc<RefCell<Option<FrameCallback>>>,
    }

    impl FrameScheduler for BrowserScheduler {
        type Handle = i32;

        fn request_frame(&mut self) -> i32 {
            let callback = self.callback.borrow();
            let Some(callback) = callback.as_ref() else {
                log::warn!("Frame requested before the frame callback was installed");
                return 0;
            };
            match self
                .window
                .request_animation_frame(callback.as_ref().unchecked_ref())
            {
                Ok(id) => id,
                Err(e) => {
                    log::error!("requestAnimationFrame failed: {:?}", e);
                    0
                }
            }
        }

        fn cancel_frame(&mut self, handle: i32) {
            let _ = self.window.cancel_animation_frame(handle);
        }
    }

    /// Rules panel, start button and game over message
    struct DomOverlay {
        game_over: Option<HtmlElement>,
        start: Option<HtmlElement>,
        rules: Option<Element>,
    }

    impl DomOverlay {
        fn new(document: &Document) -> Self {
            let html = |id: &str| {
                document
                    .get_element_by_id(id)
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            };
            Self {
                game_over: html("game-over-message"),
                start: html("start-btn"),
                rules: document.get_element_by_id("rules"),
            }
        }

        fn set_display(el: &Option<HtmlElement>, visible: bool) {
            if let Some(el) = el {
                let display = if visible { "block" } else { "none" };
                let _ = el.style().set_property("display", display);
            }
        }
    }

    impl Overlay for DomOverlay {
        fn set_game_over_visible(&mut self, visible: bool) {
            Self::set_display(&self.game_over, visible);
        }

        fn set_start_visible(&mut self, visible: bool) {
            Self::set_display(&self.start, visible);
        }

        fn set_rules_open(&mut self, open: bool) {
            if let Some(rules) = &self.rules {
                let classes = rules.class_list();
                let _ = if open {
                    classes.add_1("show")
                } else {
                    classes.remove_1("show")
                };
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        controller: GameController<BrowserScheduler, DomOverlay>,
        render_state: Option<RenderState>,
        score_el: Option<Element>,
    }

    impl Game {
        /// Animation frame callback
        fn frame(&mut self) {
            if let Some(frame) = self.controller.on_frame() {
                self.paint(&frame);
            }
        }

        fn paint(&mut self, frame: &Frame) {
            if let Some(ref mut render_state) = self.render_state {
                render_state.paint(frame);
            }
            if let Some(el) = &self.score_el {
                if el.text_content().as_deref() != Some(frame.score.text.as_str()) {
                    el.set_text_content(Some(&frame.score.text));
                }
            }
        }
    }

    pub async fn run() -> Result<(), StartupError> {
        log::info!("Brick Breaker starting...");

        let window = web_sys::window().ok_or(StartupError::NoDocument)?;
        let document = window.document().ok_or(StartupError::NoDocument)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into().ok())
            .ok_or(StartupError::MissingElement("canvas"))?;

        // Canvas size is read once; all geometry derives from it
        let arena = Arena::from_canvas(canvas.width(), canvas.height());
        canvas.set_width(arena.width as u32);
        canvas.set_height(arena.height as u32);

        let tuning = GameTuning::load();
        let seed = js_sys::Date::now() as u64;

        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        let scheduler = BrowserScheduler {
            window: window.clone(),
            callback: callback.clone(),
        };
        let controller =
            GameController::new(arena, tuning, seed, scheduler, DomOverlay::new(&document));

        let game = Rc::new(RefCell::new(Game {
            controller,
            render_state: None,
            score_el: document.get_element_by_id("score"),
        }));

        {
            let game = game.clone();
            *callback.borrow_mut() = Some(Closure::new(move |_time: f64| {
                game.borrow_mut().frame();
            }));
        }

        // Initialize WebGPU (WebGL2 fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(RenderError::from)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(RenderError::from)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(
            surface,
            &adapter,
            canvas.width(),
            canvas.height(),
            arena,
        )
        .await?;

        // Nothing is drawn until the first start
        game.borrow_mut().render_state = Some(render_state);

        setup_buttons(&document, game.clone());
        setup_keyboard(&document, game);

        log::info!("Brick Breaker ready");
        Ok(())
    }

    /// Attach a click handler to `#id` if the element exists
    fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler());
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("No #{} element, control disabled", id);
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            on_click(document, "rules-btn", move || game.borrow_mut().controller.show_rules());
        }
        {
            let game = game.clone();
            on_click(document, "close-btn", move || game.borrow_mut().controller.hide_rules());
        }
        // Start and restart are the same operation
        for id in ["start-btn", "restart-btn"] {
            let game = game.clone();
            on_click(document, id, move || game.borrow_mut().controller.start_game());
        }
    }

    fn setup_keyboard(document: &Document, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().controller.key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().controller.key_up(&event.key());
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    if let Err(e) = wasm_game::run().await {
        log::error!("Brick Breaker failed to start: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use brick_breaker::{Arena, GameController, GameTuning, HeadlessOverlay, ManualScheduler};

    /// Upper bound for a session where the ball never drops
    const MAX_HEADLESS_TICKS: u64 = 1_000_000;

    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

    log::info!("Brick Breaker (native) starting headless session...");
    log::info!("Run with `trunk serve` for the playable web version");

    let mut game = GameController::new(
        Arena::default(),
        GameTuning::load(),
        seed,
        ManualScheduler::new(),
        HeadlessOverlay::default(),
    );
    game.start_game();

    let mut ticks = 0u64;
    while ticks < MAX_HEADLESS_TICKS && game.pump().is_some() {
        ticks += 1;
    }

    println!(
        "seed {}: score {} after {} ticks ({})",
        seed,
        game.state().score,
        ticks,
        if game.is_running() {
            "still running"
        } else {
            "game over"
        }
    );
    log::debug!(
        "final state: {}",
        serde_json::to_string(game.state()).unwrap_or_default()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
