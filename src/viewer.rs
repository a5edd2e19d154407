use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use raylib::prelude::*;
use tracing::{info, warn};

use rotator::constants::{FPS, RENDER_HEIGHT, RENDER_WIDTH};
use rotator::{ElementSource, Fade, FadeCompletion, Opacity, Renderer, Rotation, RotationConfig};

use crate::slide::Slide;
use crate::texture_loader::load_texture_with_exif_rotation;

const JUMP_KEYS: [KeyboardKey; 9] = [
    KeyboardKey::KEY_ONE,
    KeyboardKey::KEY_TWO,
    KeyboardKey::KEY_THREE,
    KeyboardKey::KEY_FOUR,
    KeyboardKey::KEY_FIVE,
    KeyboardKey::KEY_SIX,
    KeyboardKey::KEY_SEVEN,
    KeyboardKey::KEY_EIGHT,
    KeyboardKey::KEY_NINE,
];

/// Cross-fades loaded textures in a raylib window.
pub struct SlideRenderer {
    slides: Vec<Slide>,
}

impl SlideRenderer {
    pub fn new(slides: Vec<Slide>) -> Self {
        Self { slides }
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle) {
        // Raised slide last so it ends up on top
        for slide in self.slides.iter().filter(|s| !s.raised) {
            slide.draw(d);
        }
        for slide in self.slides.iter().filter(|s| s.raised) {
            slide.draw(d);
        }
    }
}

impl ElementSource for SlideRenderer {
    fn len(&self) -> usize {
        self.slides.len()
    }
}

impl Renderer for SlideRenderer {
    fn show(&mut self, index: usize) {
        let slide = &mut self.slides[index];
        slide.visible = true;
        slide.alpha = 1.0;
        slide.fade = None;
    }

    fn hide(&mut self, index: usize) {
        let slide = &mut self.slides[index];
        slide.visible = false;
        slide.alpha = 0.0;
        slide.fade = None;
    }

    fn raise(&mut self, index: usize) {
        self.slides[index].raised = true;
    }

    fn lower(&mut self, index: usize) {
        self.slides[index].raised = false;
    }

    fn fade_to(
        &mut self,
        index: usize,
        opacity: Opacity,
        duration: Duration,
        on_complete: Option<FadeCompletion>,
    ) {
        let slide = &mut self.slides[index];
        slide.visible = true;
        slide.fade = Some(Fade::new(slide.alpha, opacity, duration, on_complete));
    }

    fn halt(&mut self) {
        for slide in self.slides.iter_mut() {
            slide.fade = None;
        }
    }

    fn update(&mut self, dt: Duration) {
        for slide in self.slides.iter_mut() {
            slide.update(dt);
        }
    }
}

pub fn run(paths: Vec<PathBuf>, config: RotationConfig, reverse: bool) -> Result<()> {
    let (mut rl, thread) = raylib::init()
        .size(RENDER_WIDTH / 2, RENDER_HEIGHT / 2)
        .title("Rotator")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let mut slides = Vec::with_capacity(paths.len());
    for path in &paths {
        match load_texture_with_exif_rotation(&mut rl, &thread, path) {
            Ok(texture) => slides.push(Slide::new(texture)),
            Err(e) => warn!(path = %path.display(), "skipping image: {e:#}"),
        }
    }
    if slides.is_empty() {
        bail!("no slides were loaded");
    }
    info!(slides = slides.len(), "slides loaded");

    let autoplay = config.autoplay;
    let mut rotation = Rotation::new(
        SlideRenderer::new(slides),
        config.with_autoplay(autoplay && !reverse),
    )
    .context("failed to start rotation")?;
    if autoplay && reverse {
        rotation.play(true);
    }
    rotation.bind("cycleEnd", |_, index| info!(index, "cycle finished"));

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = Duration::from_secs_f32(rl.get_frame_time());

        if rl.is_key_pressed(KeyboardKey::KEY_SPACE) {
            if rotation.is_playing() {
                rotation.stop();
            } else {
                rotation.play(reverse);
            }
        }
        if rl.is_key_pressed(KeyboardKey::KEY_RIGHT) {
            rotation.next();
        }
        if rl.is_key_pressed(KeyboardKey::KEY_LEFT) {
            rotation.prev();
        }
        for (index, key) in JUMP_KEYS.iter().enumerate() {
            if rl.is_key_pressed(*key) && index < rotation.len() {
                rotation.jump(index)?;
            }
        }

        rotation.update(dt);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        rotation.renderer().draw(&mut d);
    }

    Ok(())
}
