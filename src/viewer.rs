use sfml::graphics::{
    Color, FloatRect, Font, PrimitiveType, RenderStates, RenderTarget, RenderTexture, RenderWindow,
    Text, Transformable, Vertex, View,
};
use sfml::system::{Clock, Vector2f, Vector2u};
use sfml::window::{ContextSettings, Event, Key, Style, VideoMode};
use sfml::SfBox;

use bitflags::bitflags;
use glam::Vec3;

use hypocycloid::{
    ColorChannel, Curve, Parameter, Primitive, Scene, ShapeKind, ShapeParameters, ViewerConfig,
};

bitflags! {
    pub struct Flags: u8 {
        const FULLSCREEN = 1 << 0;
        const PAUSE = 1 << 1;
        const FONT_FAILURE = 1 << 2;
        const DRAW_GUI = 1 << 3;
        const SHOW_CURSOR = 1 << 4;
    }
}

/// Control panel entry under the selection marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Shape(Parameter),
    Background(ColorChannel),
}

impl Selection {
    pub const PANEL: [Selection; 8] = [
        Selection::Shape(Parameter::BigRadius),
        Selection::Shape(Parameter::SmallRadius),
        Selection::Shape(Parameter::Rotation),
        Selection::Shape(Parameter::Scale),
        Selection::Shape(Parameter::Cycles),
        Selection::Background(ColorChannel::Red),
        Selection::Background(ColorChannel::Green),
        Selection::Background(ColorChannel::Blue),
    ];

    fn offset(self, by: usize) -> Selection {
        let len = Self::PANEL.len();
        let index = Self::PANEL.iter().position(|&s| s == self).unwrap_or(0);
        Self::PANEL[(index + by) % len]
    }

    pub fn next(self) -> Selection {
        self.offset(1)
    }

    pub fn previous(self) -> Selection {
        self.offset(Self::PANEL.len() - 1)
    }
}

pub struct App {
    pub config: ViewerConfig,

    pub fps_clock: SfBox<Clock>,
    pub ctx_settings: ContextSettings,

    pub flags: Flags,
    pub font: Option<SfBox<Font>>,

    pub panel_text: String,

    pub background: Color,

    pub window: Option<RenderWindow>,
    pub size: Vector2u,
    pub fps_limit: u32,

    /// Values edited by the control panel; they reach the scene on draw.
    pub params: ShapeParameters,
    pub animate: bool,
    pub selected: Selection,

    pub scene: Scene,
}

impl App {
    //
    // Lifecycle code
    //

    pub fn new(config: ViewerConfig, params: ShapeParameters) -> App {
        App {
            fps_clock: Clock::start(),
            ctx_settings: ContextSettings::default(),
            flags: Flags::empty(),
            font: None,
            panel_text: String::new(),
            background: to_color(config.background),
            window: None,
            size: config.size.into(),
            fps_limit: config.fps_limit,
            params,
            animate: false,
            selected: Selection::Shape(Parameter::BigRadius),
            scene: Scene::new(),
            config,
        }
    }

    pub fn init(&mut self, full: bool) {
        if full {
            self.flags = Flags::SHOW_CURSOR | Flags::DRAW_GUI;

            if let Some(font) = Font::from_file(&self.config.font_path) {
                self.font = Some(font);
            } else {
                log::warn!(
                    "could not load font '{}', control panel disabled",
                    self.config.font_path
                );
                self.flags |= Flags::FONT_FAILURE;
            }

            self.ctx_settings.antialiasing_level = self.config.antialiasing_level;
            self.draw_scene();
        }

        if let Some(window) = self.window.as_mut() {
            if window.is_open() {
                window.close()
            }
        }

        let mut window = RenderWindow::new(
            if self.flags.contains(Flags::FULLSCREEN) {
                VideoMode::desktop_mode()
            } else {
                VideoMode::from((self.size.x, self.size.y))
            },
            &self.config.title,
            if self.flags.contains(Flags::FULLSCREEN) {
                Style::FULLSCREEN
            } else {
                Style::DEFAULT
            },
            &self.ctx_settings,
        );
        window.set_framerate_limit(self.fps_limit);
        window.set_mouse_cursor_visible(self.flags.contains(Flags::SHOW_CURSOR));

        self.size = window.size();
        self.window = Some(window);
    }

    pub fn run(&mut self) {
        if self.window.is_none() {
            self.init(true);
        }

        'main_loop: while self.window.as_ref().map_or(false, |window| window.is_open()) {
            while let Some(event) = self.window.as_mut().and_then(|window| window.poll_event()) {
                match event {
                    Event::Closed => {
                        self.close();
                        break 'main_loop;
                    }
                    Event::KeyPressed { code, shift, .. } => {
                        if !self.process_key(code, shift) {
                            break 'main_loop;
                        }
                    }
                    Event::Resized { width, height } => self.resize(width, height),
                    _ => (),
                }
            }

            self.request_update();
            self.request_draw();
            if let Some(window) = self.window.as_mut() {
                window.display();
            }
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        let min_size = self.config.min_size;
        let new_width = width.max(min_size);
        let new_height = height.max(min_size);

        if let Some(window) = self.window.as_mut() {
            window.set_view(&View::from_rect(FloatRect::new(
                0.0,
                0.0,
                new_width as f32,
                new_height as f32,
            )));
            if width.min(height) < min_size {
                window.set_size((new_width, new_height));
            }
            self.size = window.size();
        }
    }

    //
    // Input processing code
    //

    pub fn process_key(&mut self, code: Key, shift: bool) -> bool {
        match code {
            Key::Escape => {
                self.close();
                return false;
            }
            Key::Up => self.selected = self.selected.previous(),
            Key::Down => self.selected = self.selected.next(),
            Key::Left => self.adjust_selected(-Self::get_shift_multiplier(shift)),
            Key::Right => self.adjust_selected(Self::get_shift_multiplier(shift)),
            Key::Enter | Key::D => self.draw_scene(),
            Key::A => self.toggle_animate(),
            Key::Backspace => {
                self.params = ShapeParameters::default();
                self.config.background = ViewerConfig::default().background;
                self.background = to_color(self.config.background);
                self.selected = Selection::Shape(Parameter::BigRadius);
            }
            Key::Space => self.flags.toggle(Flags::PAUSE),
            Key::F3 => self.flags.toggle(Flags::DRAW_GUI),
            Key::F2 => self.save_screenshot(),
            Key::H => {
                self.flags.toggle(Flags::SHOW_CURSOR);
                if let Some(window) = self.window.as_mut() {
                    window.set_mouse_cursor_visible(self.flags.contains(Flags::SHOW_CURSOR));
                }
            }
            Key::F | Key::F11 => {
                self.flags.toggle(Flags::FULLSCREEN);
                self.init(false);
            }
            Key::RBracket => {
                if self.ctx_settings.antialiasing_level < 16 {
                    self.ctx_settings.antialiasing_level += 1;
                    self.init(false);
                }
            }
            Key::LBracket => {
                if self.ctx_settings.antialiasing_level > 0 {
                    self.ctx_settings.antialiasing_level -= 1;
                    self.init(false);
                }
            }
            _ => (),
        }
        true
    }

    pub fn get_shift_multiplier(shift: bool) -> i32 {
        if shift {
            10
        } else {
            1
        }
    }

    fn adjust_selected(&mut self, steps: i32) {
        match self.selected {
            Selection::Shape(parameter) => self.params.nudge(parameter, steps),
            Selection::Background(channel) => {
                self.config.nudge_background(channel, steps);
                self.background = to_color(self.config.background);
            }
        }
    }

    fn close(&mut self) {
        if let Some(window) = self.window.as_mut() {
            window.close();
        }
    }

    //
    // Scene control code
    //

    fn checked_params(&mut self) -> ShapeParameters {
        if let Err(error) = self.params.validate() {
            log::warn!("{}, clamping parameters", error);
            self.params = self.params.clamped();
        }
        self.params
    }

    pub fn draw_scene(&mut self) {
        let params = self.checked_params();
        self.scene.draw(&params, self.animate);
    }

    pub fn toggle_animate(&mut self) {
        self.animate = !self.animate;
        let params = self.checked_params();
        self.scene.set_animate(self.animate, &params);
    }

    //
    // Update code
    //

    pub fn request_update(&mut self) {
        let fps = self.get_fps();

        if !self.flags.contains(Flags::PAUSE) {
            self.scene.step();
        }

        let marker = |entry: Selection| if entry == self.selected { ">" } else { " " };
        let shape = |parameter| marker(Selection::Shape(parameter));
        let color = |channel| marker(Selection::Background(channel));
        let cursor = self.scene.cursor();
        let points = self
            .scene
            .curve(ShapeKind::Hypocycloid)
            .map_or(0, |curve| curve.points.len());
        let window_antialiasing = self
            .window
            .as_ref()
            .map_or(0, |window| window.settings().antialiasing_level);

        self.panel_text = format!(
            include_str!("panel_template.txt"),
            fps,
            if self.fps_limit > 0 {
                format!(
                    " (max: {} - {:6.2}%)",
                    self.fps_limit,
                    fps / self.fps_limit as f32 * 100.0
                )
            } else {
                "".to_owned()
            },
            if self.flags.contains(Flags::PAUSE) {
                "[paused]"
            } else {
                ""
            },
            shape(Parameter::BigRadius),
            self.params.big_radius,
            shape(Parameter::SmallRadius),
            self.params.small_radius,
            shape(Parameter::Rotation),
            self.params.rotation,
            shape(Parameter::Scale),
            self.params.scale,
            shape(Parameter::Cycles),
            self.params.cycles,
            color(ColorChannel::Red),
            self.config.background.x,
            color(ColorChannel::Green),
            self.config.background.y,
            color(ColorChannel::Blue),
            self.config.background.z,
            if self.animate { "on" } else { "off" },
            self.scene.phase(),
            cursor.angle(),
            cursor.bound(),
            cursor.progress() * 100.0,
            points,
            self.size.x,
            self.size.y,
            window_antialiasing,
            self.ctx_settings.antialiasing_level,
        );
    }

    fn get_fps(&mut self) -> f32 {
        let current_time = self.fps_clock.restart().as_seconds();
        1.0 / current_time
    }

    //
    // Draw code
    //

    pub fn request_draw(&mut self) {
        let render_target = match self.window.as_mut() {
            Some(window) => window,
            None => return,
        };
        Self::draw_frame(
            render_target,
            self.background,
            &self.scene,
            &self.config,
            self.size,
        );

        if self.flags.contains(Flags::DRAW_GUI) && !self.flags.contains(Flags::FONT_FAILURE) {
            if let Some(font) = self.font.as_ref() {
                let mut panel = Text::new(&self.panel_text, font, 16);
                panel.set_fill_color(Color::WHITE);
                panel.set_outline_color(Color::BLACK);
                panel.set_outline_thickness(1.5);
                panel.set_position((10.0, 10.0));
                render_target.draw(&panel);
            }
        }
    }

    pub fn draw_frame(
        render_target: &mut dyn RenderTarget,
        background: Color,
        scene: &Scene,
        config: &ViewerConfig,
        size: Vector2u,
    ) {
        render_target.clear(background);
        for curve in scene.curves() {
            let vertices = Self::curve_vertices(curve, config, size);
            render_target.draw_primitives(
                &vertices,
                match curve.primitive {
                    Primitive::LineStrip => PrimitiveType::LINE_STRIP,
                    Primitive::Points => PrimitiveType::POINTS,
                },
                &RenderStates::DEFAULT,
            );
        }
    }

    fn curve_vertices(curve: &Curve, config: &ViewerConfig, size: Vector2u) -> Vec<Vertex> {
        let color = to_color(curve.color);
        curve
            .world_points()
            .map(|point| {
                let (x, y) = config.world_to_screen((point.x, point.y), (size.x, size.y));
                Vertex::new(Vector2f::new(x, y), color, Vector2f::new(0.0, 0.0))
            })
            .collect()
    }

    fn save_screenshot(&mut self) {
        let (width, height) = self.config.screenshot_size;
        let mut render_texture =
            match RenderTexture::with_settings(width, height, &self.ctx_settings) {
                Some(render_texture) => render_texture,
                None => {
                    log::warn!("could not create a {}x{} render texture", width, height);
                    return;
                }
            };

        Self::draw_frame(
            &mut render_texture,
            self.background,
            &self.scene,
            &self.config,
            (width, height).into(),
        );
        render_texture.display();

        let path = &self.config.screenshot_path;
        let saved = render_texture
            .texture()
            .copy_to_image()
            .map_or(false, |image| image.save_to_file(path));
        if saved {
            log::info!("saved frame to '{}'", path);
        } else {
            log::warn!("could not save frame to '{}'", path);
        }
    }
}

fn to_color(rgb: Vec3) -> Color {
    let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::rgb(channel(rgb.x), channel(rgb.y), channel(rgb.z))
}
