use core_events::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::event::{
    KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind as CKeyEventKind,
    KeyModifiers as CKeyModifiers,
};

/// Map a crossterm key event into the runtime's `KeyEvent`.
///
/// Returns `None` for releases and for key codes the playground has no use for
/// (media keys, lock keys, bare modifiers).
pub(crate) fn map_key_event(event: &CKeyEvent) -> Option<KeyEvent> {
    if !matches!(event.kind, CKeyEventKind::Press | CKeyEventKind::Repeat) {
        return None;
    }
    let code = map_key_code(&event.code)?;
    Some(KeyEvent::new(code, map_mods(event.modifiers)))
}

pub(crate) fn map_key_code(code: &CKeyCode) -> Option<KeyCode> {
    let mapped = match code {
        CKeyCode::Char(c) => KeyCode::Char(*c),
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Delete => KeyCode::Delete,
        CKeyCode::Tab | CKeyCode::BackTab => KeyCode::Tab,
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        CKeyCode::Home | CKeyCode::PageUp => KeyCode::Home,
        CKeyCode::End | CKeyCode::PageDown => KeyCode::End,
        CKeyCode::F(n) => KeyCode::F(*n),
        CKeyCode::Insert
        | CKeyCode::Null
        | CKeyCode::CapsLock
        | CKeyCode::ScrollLock
        | CKeyCode::NumLock
        | CKeyCode::PrintScreen
        | CKeyCode::Pause
        | CKeyCode::Menu
        | CKeyCode::KeypadBegin
        | CKeyCode::Media(_)
        | CKeyCode::Modifier(_) => return None,
    };
    Some(mapped)
}

pub(crate) fn map_mods(m: CKeyModifiers) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    if m.contains(CKeyModifiers::CONTROL) {
        out |= KeyModifiers::CTRL;
    }
    if m.contains(CKeyModifiers::ALT) {
        out |= KeyModifiers::ALT;
    }
    if m.contains(CKeyModifiers::SHIFT) {
        out |= KeyModifiers::SHIFT;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MediaKeyCode};

    #[test]
    fn shifted_punctuation_stays_a_plain_char() {
        let ev = CKeyEvent::new(CKeyCode::Char('<'), CKeyModifiers::SHIFT);
        let mapped = map_key_event(&ev).unwrap();
        assert_eq!(mapped.code, KeyCode::Char('<'));
        assert!(!mapped.is_chord());
    }

    #[test]
    fn ctrl_and_alt_map_to_chords() {
        let ev = CKeyEvent::new(
            CKeyCode::Char('t'),
            CKeyModifiers::CONTROL | CKeyModifiers::ALT,
        );
        let mapped = map_key_event(&ev).unwrap();
        assert!(mapped.mods.contains(KeyModifiers::CTRL | KeyModifiers::ALT));
    }

    #[test]
    fn releases_and_media_keys_are_dropped() {
        let release = CKeyEvent {
            code: CKeyCode::Char('a'),
            modifiers: CKeyModifiers::NONE,
            kind: CKeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(map_key_event(&release).is_none());
        assert!(map_key_code(&CKeyCode::Media(MediaKeyCode::Play)).is_none());
        assert_eq!(map_key_code(&CKeyCode::BackTab), Some(KeyCode::Tab));
        assert_eq!(map_key_code(&CKeyCode::F(3)), Some(KeyCode::F(3)));
    }
}
