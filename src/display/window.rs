use anyhow::{Context, Result};
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::time::Duration;

use super::DisplaySink;
use crate::frame::Frame;

/// Native window sink backed by minifb.
///
/// The window is created lazily by the first `show`, sized to that frame.
/// Later frames of a different size are stretched to fit.
#[derive(Default)]
pub struct MinifbDisplay {
    window: Option<Window>,
    title: String,
}

impl MinifbDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    fn window_for(&mut self, title: &str, frame: &Frame) -> Result<&mut Window> {
        if self.window.is_none() || self.title != title {
            let window = Window::new(
                title,
                frame.width as usize,
                frame.height as usize,
                WindowOptions::default(),
            )
            .with_context(|| format!("failed to open display window '{}'", title))?;
            log::debug!(
                "display: opened window '{}' {}x{}",
                title,
                frame.width,
                frame.height
            );
            self.title = title.to_string();
            self.window = Some(window);
        }
        self.window
            .as_mut()
            .context("display window missing after creation")
    }
}

impl DisplaySink for MinifbDisplay {
    fn show(&mut self, title: &str, frame: &Frame) -> Result<()> {
        let argb = frame.to_argb();
        let window = self.window_for(title, frame)?;
        window
            .update_with_buffer(&argb, frame.width as usize, frame.height as usize)
            .context("failed to present frame")?;
        Ok(())
    }

    fn poll_key(&mut self, wait: Duration) -> Result<Option<char>> {
        std::thread::sleep(wait);
        let Some(window) = self.window.as_ref() else {
            return Ok(None);
        };
        // Events are pumped once per iteration, by `show`. Pumping again here
        // would age a fresh press past the one update where minifb reports it.
        Ok(select_key(
            window.get_keys_pressed(KeyRepeat::No),
            window.get_keys(),
        ))
    }

    fn is_open(&self) -> bool {
        self.window.as_ref().map_or(true, Window::is_open)
    }

    fn close_all(&mut self) {
        if self.window.take().is_some() {
            log::debug!("display: closed window '{}'", self.title);
        }
    }
}

/// First mappable key, taking fresh presses before keys that are merely held.
fn select_key(pressed: Vec<Key>, down: Vec<Key>) -> Option<char> {
    pressed.into_iter().chain(down).find_map(key_to_char)
}

fn key_to_char(key: Key) -> Option<char> {
    let c = match key {
        Key::A => 'a',
        Key::B => 'b',
        Key::C => 'c',
        Key::D => 'd',
        Key::E => 'e',
        Key::F => 'f',
        Key::G => 'g',
        Key::H => 'h',
        Key::I => 'i',
        Key::J => 'j',
        Key::K => 'k',
        Key::L => 'l',
        Key::M => 'm',
        Key::N => 'n',
        Key::O => 'o',
        Key::P => 'p',
        Key::Q => 'q',
        Key::R => 'r',
        Key::S => 's',
        Key::T => 't',
        Key::U => 'u',
        Key::V => 'v',
        Key::W => 'w',
        Key::X => 'x',
        Key::Y => 'y',
        Key::Z => 'z',
        Key::Key0 => '0',
        Key::Key1 => '1',
        Key::Key2 => '2',
        Key::Key3 => '3',
        Key::Key4 => '4',
        Key::Key5 => '5',
        Key::Key6 => '6',
        Key::Key7 => '7',
        Key::Key8 => '8',
        Key::Key9 => '9',
        Key::Space => ' ',
        Key::Escape => '\u{1b}',
        _ => return None,
    };
    Some(c)
}
