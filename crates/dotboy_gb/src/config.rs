use typed_builder::TypedBuilder;

use crate::machine::Button;

/// Construction-time options for a [`GameBoy`](crate::GameBoy).
///
/// ```
/// use dotboy_gb::{GameBoyConfig, RamInit};
///
/// let config = GameBoyConfig::builder().ram_init(RamInit::Zeroed).build();
/// assert_eq!(config.ram_init, RamInit::Zeroed);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, TypedBuilder)]
pub struct GameBoyConfig {
    /// Mapping from frontend key codes to the eight DMG buttons.
    #[builder(default)]
    pub key_map: KeyMap,
    /// Power-on contents of WRAM and HRAM.
    #[builder(default)]
    pub ram_init: RamInit,
}

impl Default for GameBoyConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Power-on fill pattern for internal RAM.
///
/// Hardware leaves WRAM/HRAM with effectively random contents. The default
/// uses a fixed-seed PRNG so runs stay reproducible while software still
/// cannot rely on an all-zero pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RamInit {
    Zeroed,
    Pseudorandom { seed: u32 },
}

impl Default for RamInit {
    fn default() -> Self {
        RamInit::Pseudorandom { seed: 0xC0DE_1234 }
    }
}

/// Key-code to button bindings.
///
/// Codes are opaque to the core; the defaults are DOM `keyCode` values so
/// that a browser or desktop frontend can forward them unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyMap {
    bindings: Vec<(u32, Button)>,
}

impl KeyMap {
    /// A map with no bindings at all.
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Bind `code` to `button`, replacing any existing binding for `code`.
    pub fn bind(&mut self, code: u32, button: Button) {
        match self.bindings.iter_mut().find(|(c, _)| *c == code) {
            Some(entry) => entry.1 = button,
            None => self.bindings.push((code, button)),
        }
    }

    pub fn with_binding(mut self, code: u32, button: Button) -> Self {
        self.bind(code, button);
        self
    }

    pub fn unbind(&mut self, code: u32) {
        self.bindings.retain(|(c, _)| *c != code);
    }

    pub fn button(&self, code: u32) -> Option<Button> {
        self.bindings
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, button)| *button)
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::empty()
            .with_binding(37, Button::Left)
            .with_binding(38, Button::Up)
            .with_binding(39, Button::Right)
            .with_binding(40, Button::Down)
            .with_binding(90, Button::A) // Z
            .with_binding(88, Button::B) // X
            .with_binding(13, Button::Start) // Enter
            .with_binding(16, Button::Select) // Shift
    }
}
