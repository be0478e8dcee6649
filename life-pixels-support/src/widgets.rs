use crate::canvas::{Canvas, Rect};
use crate::font;
use life_grid::{Event, Simulation};

const WIDGET_COLOR: [u8; 4] = [138, 43, 226, 0xff];
const OUTLINE_COLOR: [u8; 4] = [0, 0, 0, 0xff];
const TEXT_COLOR: [u8; 4] = [0, 0, 0, 0xff];

pub const BAR_HEIGHT: u32 = 12;
const BAR_MARGIN: u32 = 2;
const WIDGET_GAP: u32 = 4;
const TEXT_PADDING: u32 = 4;

const BUTTONS: [(Event, &str); 4] = [
    (Event::TogglePause, "Play/Pause"),
    (Event::Restart, "Restart"),
    (Event::SlowDown, "Decrease Speed"),
    (Event::SpeedUp, "Increase Speed"),
];

// Labels are sized for their widest expected text.
const SPEED_LABEL_TEMPLATE: &str = "Speed: 10";
const GENERATION_LABEL_TEMPLATE: &str = "Generation: 999999";

#[derive(Clone, Debug)]
pub struct Widget {
    rect: Rect,
    text: String,
}

impl Widget {
    fn new(rect: Rect, text: impl Into<String>) -> Self {
        Self {
            rect,
            text: text.into(),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
    }

    pub fn hover(&self, x: u32, y: u32) -> bool {
        self.rect.contains(x, y)
    }

    fn draw(&self, canvas: &mut Canvas) {
        canvas.fill_rect(self.rect, OUTLINE_COLOR);
        canvas.fill_rect(self.rect.inset(1), WIDGET_COLOR);
        canvas.draw_text_centered(self.rect, &self.text, TEXT_COLOR);
    }
}

/// The row of buttons and labels along the bottom of the window. Built once; only
/// the label texts change afterwards.
#[derive(Clone, Debug)]
pub struct ControlBar {
    buttons: Vec<(Event, Widget)>,
    speed_label: Widget,
    generation_label: Widget,
}

impl ControlBar {
    pub fn new(frame_height: u32) -> Self {
        let mut layout = RowLayout::new(BAR_MARGIN, frame_height.saturating_sub(BAR_HEIGHT));
        let buttons = BUTTONS
            .iter()
            .map(|&(event, text)| (event, Widget::new(layout.next_rect(text), text)))
            .collect();
        let speed_label = Widget::new(layout.next_rect(SPEED_LABEL_TEMPLATE), "");
        let generation_label = Widget::new(layout.next_rect(GENERATION_LABEL_TEMPLATE), "");
        Self {
            buttons,
            speed_label,
            generation_label,
        }
    }

    pub fn buttons(&self) -> impl Iterator<Item = &(Event, Widget)> {
        self.buttons.iter()
    }

    pub fn speed_label(&self) -> &Widget {
        &self.speed_label
    }

    pub fn generation_label(&self) -> &Widget {
        &self.generation_label
    }

    /// The event for the button under `(x, y)`, if any. Labels never match.
    pub fn hit(&self, x: u32, y: u32) -> Option<Event> {
        self.buttons
            .iter()
            .find(|(_, button)| button.hover(x, y))
            .map(|&(event, _)| event)
    }

    pub fn update_labels(&mut self, simulation: &Simulation) {
        self.speed_label
            .set_text(format!("Speed: {}", simulation.speed()));
        self.generation_label
            .set_text(format!("Generation: {}", simulation.generation()));
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        for (_, button) in &self.buttons {
            button.draw(canvas);
        }
        self.speed_label.draw(canvas);
        self.generation_label.draw(canvas);
    }
}

struct RowLayout {
    x: u32,
    y: u32,
}

impl RowLayout {
    fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    fn next_rect(&mut self, text: &str) -> Rect {
        let width = font::text_width(text) + 2 * TEXT_PADDING;
        let rect = Rect::new(self.x, self.y, width, BAR_HEIGHT);
        self.x += width + WIDGET_GAP;
        rect
    }
}
