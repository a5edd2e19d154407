use std::time::Duration;

use tracing::info;

use crate::fade::Fade;
use crate::renderer::{ElementSource, FadeCompletion, Opacity, Renderer};

pub struct Element {
    pub name: String,
    pub visible: bool,
    pub alpha: f32,
    pub raised: bool,
    fade: Option<Fade>,
}

impl Element {
    fn new(name: String) -> Self {
        Self {
            name,
            visible: false,
            alpha: 0.0,
            raised: false,
            fade: None,
        }
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }
}

/// Headless renderer that animates opacities on the rotation clock and logs
/// every visual change. Used by `rotator simulate` and handy for tests.
pub struct LogRenderer {
    elements: Vec<Element>,
}

impl LogRenderer {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            elements: names.into_iter().map(|name| Element::new(name.into())).collect(),
        }
    }

    /// Elements named `slide-0`, `slide-1`, ...
    pub fn with_count(count: usize) -> Self {
        Self::new((0..count).map(|i| format!("slide-{i}")))
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Index of the element drawn on top, if any is visible.
    pub fn front(&self) -> Option<usize> {
        self.elements
            .iter()
            .position(|e| e.visible && e.raised)
            .or_else(|| self.elements.iter().position(|e| e.visible))
    }
}

impl ElementSource for LogRenderer {
    fn len(&self) -> usize {
        self.elements.len()
    }
}

impl Renderer for LogRenderer {
    fn show(&mut self, index: usize) {
        let element = &mut self.elements[index];
        element.visible = true;
        element.alpha = 1.0;
        element.fade = None;
        info!(index, name = %element.name, "show");
    }

    fn hide(&mut self, index: usize) {
        let element = &mut self.elements[index];
        element.visible = false;
        element.alpha = 0.0;
        element.fade = None;
    }

    fn raise(&mut self, index: usize) {
        self.elements[index].raised = true;
    }

    fn lower(&mut self, index: usize) {
        self.elements[index].raised = false;
    }

    fn fade_to(
        &mut self,
        index: usize,
        opacity: Opacity,
        duration: Duration,
        on_complete: Option<FadeCompletion>,
    ) {
        let element = &mut self.elements[index];
        element.visible = true;
        element.fade = Some(Fade::new(element.alpha, opacity, duration, on_complete));
        info!(index, name = %element.name, ?opacity, ?duration, "fade");
    }

    fn halt(&mut self) {
        for element in self.elements.iter_mut() {
            // Dropping the fade drops its completion unfired.
            element.fade = None;
        }
    }

    fn update(&mut self, dt: Duration) {
        for element in self.elements.iter_mut() {
            let Some(fade) = element.fade.as_mut() else {
                continue;
            };
            element.alpha = fade.update(dt);
            if fade.is_finished() {
                element.visible = fade.target() > 0.0;
                element.fade = None;
            }
        }
    }
}
