use life_grid::Event;
use winit::keyboard::KeyCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Control(Event),
    Exit,
}

pub fn key_action(code: KeyCode) -> Option<KeyAction> {
    match code {
        KeyCode::Escape | KeyCode::KeyQ | KeyCode::KeyX => Some(KeyAction::Exit),
        KeyCode::Space => Some(KeyAction::Control(Event::TogglePause)),
        KeyCode::KeyR => Some(KeyAction::Control(Event::Restart)),
        KeyCode::Minus | KeyCode::NumpadSubtract | KeyCode::ArrowLeft => {
            Some(KeyAction::Control(Event::SlowDown))
        }
        KeyCode::Equal | KeyCode::NumpadAdd | KeyCode::ArrowRight => {
            Some(KeyAction::Control(Event::SpeedUp))
        }
        _ => None,
    }
}
