// crates/lightbox-ui/src/input.rs
//
// Keyboard layer: turns raw egui events into ViewerCommands on the app's
// pending queue. Printable characters arrive as Event::Text (so Shift
// variants like '"' come through directly); named keys and Ctrl chords are
// matched on Event::Key, which also delivers OS key-repeat for held arrows.

use std::time::{Duration, Instant};

use eframe::egui;
use lightbox_core::{NavMode, PanDirection, ViewerCommand};

use crate::app::LightboxApp;

/// Second key of a two-key chord must land within this window.
pub const COMBO_WINDOW: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboKind {
    Move,
    Copy,
    Quit,
}

pub enum ComboOutcome {
    /// First key of a chord accepted; nothing to execute yet.
    Armed(ComboKind),
    /// Chord completed.
    Command(ViewerCommand),
    /// Not part of a chord; handle the character normally.
    Pass,
}

/// Two-key chord tracker: `m<slot>` move, `c<slot>` copy, `qq` quit.
/// A stale first key (outside the window) is forgotten and the new character
/// is fed through fresh.
#[derive(Debug, Default)]
pub struct ComboState {
    pending: Option<(ComboKind, Instant)>,
}

impl ComboState {
    pub fn feed(&mut self, ch: char, now: Instant) -> ComboOutcome {
        if let Some((kind, armed)) = self.pending.take() {
            if now.duration_since(armed) <= COMBO_WINDOW {
                return match kind {
                    ComboKind::Quit if ch == 'q' => ComboOutcome::Command(ViewerCommand::Quit),
                    // `q` followed by anything else falls through to normal
                    // handling of the second character.
                    ComboKind::Quit => self.feed_fresh(ch, now),
                    ComboKind::Move => ComboOutcome::Command(ViewerCommand::MoveCurrent(ch)),
                    ComboKind::Copy => ComboOutcome::Command(ViewerCommand::CopyCurrent(ch)),
                };
            }
        }
        self.feed_fresh(ch, now)
    }

    fn feed_fresh(&mut self, ch: char, now: Instant) -> ComboOutcome {
        match ch {
            'm' => {
                self.pending = Some((ComboKind::Move, now));
                ComboOutcome::Armed(ComboKind::Move)
            }
            'c' => {
                self.pending = Some((ComboKind::Copy, now));
                ComboOutcome::Armed(ComboKind::Copy)
            }
            'q' => {
                self.pending = Some((ComboKind::Quit, now));
                ComboOutcome::Armed(ComboKind::Quit)
            }
            _ => ComboOutcome::Pass,
        }
    }
}

/// Single-character commands. Shifted punctuation arrives pre-shifted from
/// Event::Text, so `'` and `"` are distinct entries here.
fn command_for_char(ch: char) -> Option<ViewerCommand> {
    use ViewerCommand::*;
    Some(match ch {
        '\'' => Advance { mode: NavMode::Sequential, step: 1 },
        '"' => Advance { mode: NavMode::Sequential, step: 10 },
        ';' => Retreat { mode: NavMode::Sequential, step: 1 },
        ':' => Retreat { mode: NavMode::Sequential, step: 10 },
        ']' => Advance { mode: NavMode::LocalShuffle, step: 1 },
        '[' => Retreat { mode: NavMode::LocalShuffle, step: 1 },
        '.' => Advance { mode: NavMode::Random, step: 1 },
        ',' => Retreat { mode: NavMode::Random, step: 1 },
        's' => ToggleSlideshow,
        'S' => GrowSlideshowInterval,
        'z' | '1' => ZoomOneToOne,
        'x' => FitToWindow,
        '2'..='4' => ZoomTo((ch as u8 - b'0') as f32),
        '-' => ZoomOut,
        '=' => ZoomIn,
        'f' => ToggleFullscreen,
        _ => return None,
    })
}

/// Anything that isn't slideshow control stops a running slideshow — the user
/// has taken over.
fn cancels_slideshow(cmd: &ViewerCommand) -> bool {
    !matches!(
        cmd,
        ViewerCommand::ToggleSlideshow
            | ViewerCommand::GrowSlideshowInterval
            | ViewerCommand::ShrinkSlideshowInterval
    )
}

/// Pan divisor for held modifiers: finer steps the stronger the modifier.
fn pan_divisor(mods: egui::Modifiers) -> f32 {
    if mods.alt {
        18.0
    } else if mods.ctrl {
        5.0
    } else if mods.shift {
        2.0
    } else {
        1.0
    }
}

impl LightboxApp {
    pub(crate) fn handle_input(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        let events = ctx.input(|i| i.events.clone());
        for event in &events {
            match event {
                egui::Event::Text(text) => {
                    for ch in text.chars() {
                        self.handle_char(ch, now);
                    }
                }
                egui::Event::Key { key, pressed: true, modifiers, .. } => {
                    self.handle_key(*key, *modifiers, now);
                }
                _ => {}
            }
        }
    }

    fn handle_char(&mut self, ch: char, now: Instant) {
        match self.combo.feed(ch, now) {
            ComboOutcome::Command(cmd) => self.push_char_command(cmd),
            ComboOutcome::Armed(ComboKind::Move | ComboKind::Copy) => {
                self.pending_cmds.push(ViewerCommand::ShowDestinations);
            }
            ComboOutcome::Armed(ComboKind::Quit) => {}
            ComboOutcome::Pass => {
                if let Some(cmd) = command_for_char(ch) {
                    self.push_char_command(cmd);
                }
            }
        }
    }

    fn push_char_command(&mut self, cmd: ViewerCommand) {
        if cancels_slideshow(&cmd) && self.slideshow.active() {
            self.slideshow.cancel();
            self.feedback("slideshow stopped");
        }
        self.pending_cmds.push(cmd);
    }

    fn handle_key(&mut self, key: egui::Key, mods: egui::Modifiers, now: Instant) {
        use egui::Key;
        use ViewerCommand::*;
        let cmd = match key {
            Key::PageDown => Advance { mode: NavMode::Sequential, step: 1 },
            Key::PageUp => Retreat { mode: NavMode::Sequential, step: 1 },
            Key::Home => JumpFirst,
            Key::End => JumpLast,
            Key::Delete => DeleteCurrent,
            // Ctrl suppresses Event::Text, so the big navigation steps are
            // matched on the key itself.
            Key::Quote if mods.ctrl => Advance { mode: NavMode::Sequential, step: 50 },
            Key::Semicolon if mods.ctrl => Retreat { mode: NavMode::Sequential, step: 50 },
            Key::S if mods.ctrl => {
                self.pending_cmds.push(ShrinkSlideshowInterval);
                return;
            }
            Key::ArrowUp => self.pan(PanDirection::Up, mods, now),
            Key::ArrowDown => self.pan(PanDirection::Down, mods, now),
            Key::ArrowLeft => self.pan(PanDirection::Left, mods, now),
            Key::ArrowRight => self.pan(PanDirection::Right, mods, now),
            _ => return,
        };
        self.pending_cmds.push(cmd);
    }

    fn pan(&mut self, dir: PanDirection, mods: egui::Modifiers, now: Instant) -> ViewerCommand {
        let amount = self.scroll.tick(now) / pan_divisor(mods);
        ViewerCommand::Pan { dir, amount }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_chord_completes_within_the_window() {
        let mut combo = ComboState::default();
        let t0 = Instant::now();
        assert!(matches!(combo.feed('m', t0), ComboOutcome::Armed(ComboKind::Move)));
        match combo.feed('a', t0 + Duration::from_millis(300)) {
            ComboOutcome::Command(ViewerCommand::MoveCurrent('a')) => {}
            _ => panic!("expected MoveCurrent('a')"),
        }
    }

    #[test]
    fn stale_chord_prefix_is_forgotten() {
        let mut combo = ComboState::default();
        let t0 = Instant::now();
        combo.feed('c', t0);
        // Two seconds later 'q' is not the second chord key, it arms quit.
        assert!(matches!(
            combo.feed('q', t0 + Duration::from_secs(2)),
            ComboOutcome::Armed(ComboKind::Quit)
        ));
    }

    #[test]
    fn double_q_quits_and_q_other_passes_through() {
        let mut combo = ComboState::default();
        let t0 = Instant::now();
        combo.feed('q', t0);
        assert!(matches!(
            combo.feed('q', t0 + Duration::from_millis(500)),
            ComboOutcome::Command(ViewerCommand::Quit)
        ));

        combo.feed('q', t0);
        // 'q' then 's' should behave as if 's' were pressed alone.
        assert!(matches!(combo.feed('s', t0 + Duration::from_millis(100)), ComboOutcome::Pass));
    }

    #[test]
    fn char_map_covers_the_navigation_punctuation() {
        use ViewerCommand::*;
        assert_eq!(
            command_for_char('\''),
            Some(Advance { mode: NavMode::Sequential, step: 1 })
        );
        assert_eq!(
            command_for_char('"'),
            Some(Advance { mode: NavMode::Sequential, step: 10 })
        );
        assert_eq!(
            command_for_char(':'),
            Some(Retreat { mode: NavMode::Sequential, step: 10 })
        );
        assert_eq!(
            command_for_char(']'),
            Some(Advance { mode: NavMode::LocalShuffle, step: 1 })
        );
        assert_eq!(command_for_char(','), Some(Retreat { mode: NavMode::Random, step: 1 }));
        assert_eq!(command_for_char('3'), Some(ZoomTo(3.0)));
        assert_eq!(command_for_char('z'), Some(ZoomOneToOne));
        assert_eq!(command_for_char('1'), Some(ZoomOneToOne));
        assert_eq!(command_for_char('x'), Some(FitToWindow));
        assert_eq!(command_for_char('k'), None);
    }

    #[test]
    fn pan_divisor_prefers_the_strongest_modifier() {
        let none = egui::Modifiers::default();
        assert_eq!(pan_divisor(none), 1.0);
        assert_eq!(pan_divisor(egui::Modifiers { shift: true, ..none }), 2.0);
        assert_eq!(pan_divisor(egui::Modifiers { ctrl: true, ..none }), 5.0);
        assert_eq!(pan_divisor(egui::Modifiers { alt: true, ctrl: true, ..none }), 18.0);
    }
}
