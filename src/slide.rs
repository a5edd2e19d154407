use std::time::Duration;

use raylib::prelude::*;

use rotator::Fade;

pub struct Slide {
    image: Texture2D,

    pub visible: bool,
    pub raised: bool,
    pub alpha: f32,

    pub fade: Option<Fade>,
}

impl Slide {
    pub fn new(image: Texture2D) -> Self {
        Self {
            image,
            visible: false,
            raised: false,
            alpha: 0.0,
            fade: None,
        }
    }

    pub fn update(&mut self, dt: Duration) {
        let Some(fade) = self.fade.as_mut() else {
            return;
        };
        self.alpha = fade.update(dt);
        if fade.is_finished() {
            self.visible = fade.target() > 0.0;
            self.fade = None;
        }
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle) {
        if !self.visible {
            return;
        }
        let screen_width = d.get_screen_width() as f32;
        let screen_height = d.get_screen_height() as f32;

        let tex_width = self.image.width() as f32;
        let tex_height = self.image.height() as f32;

        // Fit into 90% of the window, never upscale
        let scale = (screen_width * 0.9 / tex_width)
            .min(screen_height * 0.9 / tex_height)
            .min(1.0);
        let scaled_width = tex_width * scale;
        let scaled_height = tex_height * scale;

        let alpha = (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8;

        d.draw_texture_pro(
            &self.image,
            Rectangle::new(0.0, 0.0, tex_width, tex_height),
            Rectangle::new(
                (screen_width - scaled_width) * 0.5,
                (screen_height - scaled_height) * 0.5,
                scaled_width,
                scaled_height,
            ),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::new(255, 255, 255, alpha),
        );
    }
}
