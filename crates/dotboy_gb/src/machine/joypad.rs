use super::interrupts::{Interrupt, InterruptController};

/// The eight DMG buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    Right,
    Left,
    Up,
    Down,
    A,
    B,
    Select,
    Start,
}

impl Button {
    fn is_direction(self) -> bool {
        matches!(self, Button::Right | Button::Left | Button::Up | Button::Down)
    }

    /// Bit within the button's group nibble.
    fn mask(self) -> u8 {
        match self {
            Button::Right | Button::A => 0x01,
            Button::Left | Button::B => 0x02,
            Button::Up | Button::Select => 0x04,
            Button::Down | Button::Start => 0x08,
        }
    }

    /// P1 select bit that has to be low for this group to be read.
    fn select_bit(self) -> u8 {
        if self.is_direction() {
            DIRECTION_SELECT
        } else {
            ACTION_SELECT
        }
    }
}

impl std::str::FromStr for Button {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "right" => Ok(Button::Right),
            "left" => Ok(Button::Left),
            "up" => Ok(Button::Up),
            "down" => Ok(Button::Down),
            "a" => Ok(Button::A),
            "b" => Ok(Button::B),
            "select" => Ok(Button::Select),
            "start" => Ok(Button::Start),
            other => Err(format!("unknown button `{other}`")),
        }
    }
}

const DIRECTION_SELECT: u8 = 0x10;
const ACTION_SELECT: u8 = 0x20;

/// P1/JOYP (FF00).
///
/// Pressed buttons are kept as set bits; the register inverts them on read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Joypad {
    select: u8,
    directions: u8,
    actions: u8,
    /// Latched release->press edge for leaving STOP.
    stop_wake: bool,
}

impl Joypad {
    pub(crate) fn new() -> Self {
        Self {
            select: DIRECTION_SELECT | ACTION_SELECT,
            directions: 0,
            actions: 0,
            stop_wake: false,
        }
    }

    fn group_mut(&mut self, button: Button) -> &mut u8 {
        if button.is_direction() {
            &mut self.directions
        } else {
            &mut self.actions
        }
    }

    pub(crate) fn press(&mut self, button: Button, interrupts: &mut InterruptController) {
        let mask = button.mask();
        let group = self.group_mut(button);
        if *group & mask != 0 {
            return;
        }
        *group |= mask;

        self.stop_wake = true;
        if self.select & button.select_bit() == 0 {
            interrupts.raise(Interrupt::JOYPAD);
        }
        log::debug!("GB joypad: {button:?} pressed, P1=0x{:02X}", self.read());
    }

    pub(crate) fn release(&mut self, button: Button) {
        let mask = button.mask();
        *self.group_mut(button) &= !mask;
    }

    pub(crate) fn read(&self) -> u8 {
        let mut low = 0x0F;
        if self.select & DIRECTION_SELECT == 0 {
            low &= !self.directions;
        }
        if self.select & ACTION_SELECT == 0 {
            low &= !self.actions;
        }
        0xC0 | self.select | (low & 0x0F)
    }

    /// Only the two select bits are writable.
    pub(crate) fn write(&mut self, value: u8) {
        self.select = value & (DIRECTION_SELECT | ACTION_SELECT);
    }

    pub(crate) fn take_stop_wake(&mut self) -> bool {
        std::mem::take(&mut self.stop_wake)
    }
}
