use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

/// Events that can occur in the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    /// Close the overlay
    Quit,
    /// Toggle help overlay
    ToggleHelp,
    /// Switch between face and gauges
    ToggleView,
    /// Show or hide the network readout
    ToggleNetwork,
    /// Switch expression policy
    CyclePolicy,
    /// Blink now
    Blink,
    /// Move the overlay by a number of cells
    Move { dx: i16, dy: i16 },
    /// No action
    None,
}

/// Translate a key press into an overlay event.
pub fn map_key(key: KeyEvent) -> OverlayEvent {
    if key.kind != KeyEventKind::Press {
        return OverlayEvent::None;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => OverlayEvent::Quit,
        KeyCode::Char('?') | KeyCode::Char('h') => OverlayEvent::ToggleHelp,
        KeyCode::Tab | KeyCode::Char('v') => OverlayEvent::ToggleView,
        KeyCode::Char('n') => OverlayEvent::ToggleNetwork,
        KeyCode::Char('p') => OverlayEvent::CyclePolicy,
        KeyCode::Char(' ') => OverlayEvent::Blink,
        KeyCode::Left => OverlayEvent::Move { dx: -1, dy: 0 },
        KeyCode::Right => OverlayEvent::Move { dx: 1, dy: 0 },
        KeyCode::Up => OverlayEvent::Move { dx: 0, dy: -1 },
        KeyCode::Down => OverlayEvent::Move { dx: 0, dy: 1 },
        _ => OverlayEvent::None,
    }
}
