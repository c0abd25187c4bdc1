//! Life Canvas entry point
//!
//! Handles platform-specific initialization and runs the simulation loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use glam::Vec2;
    use life_canvas::renderer::RenderState;
    use life_canvas::settings::SpeedPreset;
    use life_canvas::sim::{PATTERNS, Simulation, StepClock, TickInput, tick};
    use life_canvas::{Settings, cell_at};

    /// App instance holding all state
    struct App {
        sim: Simulation,
        settings: Settings,
        clock: StepClock,
        render_state: Option<RenderState>,
        input: TickInput,
        last_time: f64,
        /// Backing pixel size of the canvas
        canvas_size: Vec2,
        /// Last rendered generation/population, to skip redundant DOM writes
        last_hud: (u64, usize),
        /// Index into `PATTERNS` of the next pattern the `p` key seeds
        next_pattern: usize,
        /// Set by display-only changes (palette, cell size)
        needs_redraw: bool,
    }

    impl App {
        fn new(sim: Simulation, settings: Settings, canvas_size: Vec2) -> Self {
            let clock = StepClock::new(settings.tick_interval_ms());
            Self {
                sim,
                settings,
                clock,
                render_state: None,
                input: TickInput::default(),
                last_time: 0.0,
                canvas_size,
                last_hud: (u64::MAX, usize::MAX),
                next_pattern: 0,
                needs_redraw: false,
            }
        }

        /// Apply pending input and run due generations; returns true if the
        /// grid may have changed
        fn update(&mut self, dt: f32) -> bool {
            let due = if self.sim.is_running() {
                self.clock.advance(dt)
            } else {
                self.clock.reset();
                0
            };

            if !self.input.is_idle() || due > 0 {
                let density = self.settings.soup_density();
                let report = tick(&mut self.sim, &self.input, due, density);
                if !report.errors.is_empty() {
                    log::warn!("{} command(s) rejected this frame", report.errors.len());
                }
                self.input.consume();
                return true;
            }
            false
        }

        fn set_speed(&mut self, preset: SpeedPreset) {
            if self.settings.speed == preset {
                return;
            }
            self.settings.speed = preset;
            self.clock.set_interval_ms(self.settings.tick_interval_ms());
            self.settings.save();
            log::info!("Speed: {}", preset.as_str());
        }

        fn toggle_high_contrast(&mut self) {
            self.settings.high_contrast = !self.settings.high_contrast;
            if let Some(ref mut render_state) = self.render_state {
                render_state.clear_color = self.settings.palette().1;
            }
            self.needs_redraw = true;
            self.settings.save();
            log::info!("High contrast: {}", self.settings.high_contrast);
        }

        fn nudge_soup_density(&mut self, steps: i32) {
            let density = self.settings.nudge_soup_density(steps);
            self.settings.save();
            log::info!("Soup density: {:.2}", density);
        }

        /// Queue the next built-in pattern
        fn queue_next_pattern(&mut self) {
            let pattern = &PATTERNS[self.next_pattern % PATTERNS.len()];
            self.next_pattern = (self.next_pattern + 1) % PATTERNS.len();
            log::info!("Seeding {}", pattern.name);
            self.input.pattern = Some(pattern);
        }

        /// Change the cell size and rebuild an empty grid to fit the canvas
        fn resize_cells(&mut self, grow: bool) {
            let previous = self.settings.cell_size;
            if !self.settings.step_cell_size(grow) {
                return;
            }
            let (width, height) = (self.canvas_size.x as u32, self.canvas_size.y as u32);
            match Simulation::from_canvas(width, height, self.settings.cell_size) {
                Ok(sim) => {
                    self.sim = sim;
                    self.input.consume();
                    self.clock.reset();
                    self.settings.save();
                    self.needs_redraw = true;
                    let (cols, rows) = self.sim.grid().dimensions();
                    log::info!(
                        "Grid dimensions: {}x{} (cell size {})",
                        cols,
                        rows,
                        self.settings.cell_size
                    );
                }
                Err(e) => {
                    log::warn!("Keeping cell size {}: {}", previous, e);
                    self.settings.cell_size = previous;
                }
            }
        }

        /// Render the current grid
        fn render(&mut self) {
            let (live, _) = self.settings.palette();
            let cell_size = self.settings.cell_size;
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render_grid(self.sim.grid(), cell_size, live) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update generation/population counters in the DOM
        fn update_hud(&mut self) {
            let hud = (self.sim.generation(), self.sim.population());
            if hud == self.last_hud {
                return;
            }
            self.last_hud = hud;

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("generation") {
                el.set_text_content(Some(&hud.0.to_string()));
            }
            if let Some(el) = document.get_element_by_id("population") {
                el.set_text_content(Some(&hud.1.to_string()));
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("DOM loaded, initializing simulation...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();
        let (width, height) = (canvas.width(), canvas.height());

        let mut sim = match Simulation::from_canvas(width, height, settings.cell_size) {
            Ok(sim) => sim,
            Err(e) => {
                log::error!("Cannot size grid for {}x{} canvas: {}", width, height, e);
                return;
            }
        };
        let (cols, rows) = sim.grid().dimensions();
        log::info!(
            "Grid dimensions: {}x{} (cell size {})",
            cols,
            rows,
            settings.cell_size
        );

        if settings.seed_glider_on_start {
            if let Err(e) = sim.seed_glider() {
                log::warn!("Skipping initial glider: {}", e);
            }
        }

        let clear_color = settings.palette().1;
        let canvas_size = Vec2::new(width as f32, height as f32);
        let app = Rc::new(RefCell::new(App::new(sim, settings, canvas_size)));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height, clear_color).await {
            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Failed to create device: {}", e),
        }

        setup_buttons(app.clone());
        setup_canvas_click(&canvas, app.clone());
        setup_keyboard(app.clone());
        setup_visibility(app.clone());

        app.borrow_mut().render();
        request_animation_frame(app);

        log::info!("Simulation ready");
    }

    /// Register a click handler on the element with `id`, if present
    fn on_click(id: &str, handler: impl FnMut(MouseEvent) + 'static) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        match document.get_element_by_id(id) {
            Some(el) => {
                let closure = Closure::<dyn FnMut(MouseEvent)>::new(handler);
                let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
            None => log::debug!("No #{} element", id),
        }
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        {
            let app = app.clone();
            on_click("startBtn", move |_| {
                log::info!("Start button clicked");
                app.borrow_mut().input.start = true;
            });
        }
        {
            let app = app.clone();
            on_click("stopBtn", move |_| {
                log::info!("Stop button clicked");
                app.borrow_mut().input.stop = true;
            });
        }
        {
            let app = app.clone();
            on_click("clearBtn", move |_| {
                log::info!("Clear button clicked");
                app.borrow_mut().input.clear = true;
            });
        }
        {
            let app = app.clone();
            on_click("gliderBtn", move |_| {
                log::info!("Glider button clicked");
                app.borrow_mut().input.seed_glider = true;
            });
        }
        on_click("randomBtn", move |_| {
            let seed = js_sys::Date::now() as u64;
            log::info!("Random button clicked (seed {})", seed);
            app.borrow_mut().input.randomize = Some(seed);
        });
    }

    fn setup_canvas_click(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let rect = canvas_clone.get_bounding_client_rect();
            let pointer = Vec2::new(
                (event.client_x() as f64 - rect.left()) as f32,
                (event.client_y() as f64 - rect.top()) as f32,
            );
            let client = Vec2::new(rect.width() as f32, rect.height() as f32);

            let mut a = app.borrow_mut();
            let dims = a.sim.grid().dimensions();
            if let Some((x, y)) = cell_at(pointer, client, a.canvas_size, a.settings.cell_size, dims) {
                log::info!("Toggling cell at: {} {}", x, y);
                a.input.toggles.push((x, y));
            }
        });
        let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut a = app.borrow_mut();
            let key = event.key();
            if let Some(preset) = SpeedPreset::from_key(&key) {
                a.set_speed(preset);
                return;
            }
            match key.as_str() {
                " " => {
                    // Keep the page from scrolling
                    event.prevent_default();
                    if a.sim.is_running() {
                        a.input.stop = true;
                    } else {
                        a.input.start = true;
                    }
                }
                "n" | "N" => a.input.step_once = true,
                "c" | "C" => a.input.clear = true,
                "g" | "G" => a.input.seed_glider = true,
                "p" | "P" => a.queue_next_pattern(),
                "h" | "H" => a.toggle_high_contrast(),
                "+" | "=" => a.nudge_soup_density(1),
                "-" | "_" => a.nudge_soup_density(-1),
                "]" => a.resize_cells(true),
                "[" => a.resize_cells(false),
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_visibility(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            // Don't replay the time spent hidden as a burst of generations
            if document_clone.visibility_state() == web_sys::VisibilityState::Visible {
                let mut a = app.borrow_mut();
                a.clock.reset();
                a.last_time = 0.0;
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            a.last_time = time;

            let changed = a.update(dt);
            if changed || std::mem::take(&mut a.needs_redraw) {
                a.render();
            }
            a.update_hud();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

/// Read a numeric environment variable, falling back to `default`
#[cfg(not(target_arch = "wasm32"))]
fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                log::warn!("Ignoring {}={:?}: not a number", key, raw);
                default
            }
        },
        Err(_) => default,
    }
}

/// Terminal driver: a plain blocking loop printing each generation
#[cfg(not(target_arch = "wasm32"))]
fn run_native() -> Result<(), life_canvas::SimError> {
    use life_canvas::Simulation;
    use life_canvas::settings::SpeedPreset;
    use life_canvas::sim::{ConfigError, Pattern};
    use std::time::Duration;

    let mut settings = life_canvas::Settings::load();
    if let Ok(raw) = std::env::var("LIFE_SPEED") {
        match SpeedPreset::from_str(&raw) {
            Some(preset) => settings = life_canvas::Settings::from_preset(preset),
            None => log::warn!("Ignoring LIFE_SPEED={:?}: expected slow, normal or fast", raw),
        }
    }
    let cols: usize = env_or("LIFE_COLS", 20);
    let rows: usize = env_or("LIFE_ROWS", 20);
    let generations: u64 = env_or("LIFE_GENERATIONS", 40);
    let delay = Duration::from_millis(env_or("LIFE_TICK_MS", settings.tick_interval_ms()) as u64);

    let mut sim = Simulation::new(cols, rows)?;
    if let Ok(seed) = std::env::var("LIFE_SEED") {
        let seed = seed.parse().unwrap_or_else(|_| {
            log::warn!("Ignoring LIFE_SEED={:?}: not a number", seed);
            0
        });
        sim.randomize(seed, settings.soup_density())?;
    } else {
        let name = std::env::var("LIFE_PATTERN").unwrap_or_else(|_| "glider".to_string());
        let pattern = Pattern::by_name(&name).ok_or(ConfigError::UnknownPattern(name))?;
        sim.seed_pattern(pattern)?;
    }
    sim.start();
    log::info!("Grid dimensions: {}x{}, {} generations", cols, rows, generations);

    print!("{}", sim.grid());
    while sim.is_running() && sim.generation() < generations {
        std::thread::sleep(delay);
        sim.step();
        println!(
            "\ngeneration {} (population {})",
            sim.generation(),
            sim.population()
        );
        print!("{}", sim.grid());
        if sim.grid().is_empty() {
            log::info!("Grid died out at generation {}", sim.generation());
            sim.stop();
        }
    }

    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Life Canvas (native) starting...");
    log::info!("Native mode prints to the terminal - run with `trunk serve` for the canvas version");

    if let Err(e) = run_native() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
