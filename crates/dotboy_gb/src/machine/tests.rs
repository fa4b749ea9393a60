use super::GameBoy;
use crate::config::{GameBoyConfig, RamInit};
use crate::cpu::Bus;
use crate::error::GameBoyError;
use crate::machine::Button;
use crate::{CYCLES_PER_FRAME, SCREEN_HEIGHT, SCREEN_WIDTH};

const IF: u16 = 0xFF0F;
const LINE: u32 = 456;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Minimal cartridge image: `JP 0x0150` at the entry point and the
/// program placed right after the header.
struct RomBuilder {
    rom: Vec<u8>,
}

impl RomBuilder {
    fn new() -> Self {
        let mut rom = vec![0u8; 0x8000];
        rom[0x100..0x104].copy_from_slice(&[0x00, 0xC3, 0x50, 0x01]);
        Self { rom }
    }

    fn title(mut self, title: &str) -> Self {
        self.rom[0x134..0x134 + title.len()].copy_from_slice(title.as_bytes());
        self
    }

    fn program(mut self, code: &[u8]) -> Self {
        self.rom[0x150..0x150 + code.len()].copy_from_slice(code);
        self
    }

    fn bytes_at(mut self, addr: usize, bytes: &[u8]) -> Self {
        self.rom[addr..addr + bytes.len()].copy_from_slice(bytes);
        self
    }

    fn build(self) -> Vec<u8> {
        self.rom
    }
}

fn machine(rom: &[u8]) -> GameBoy {
    init_logger();
    let config = GameBoyConfig::builder().ram_init(RamInit::Zeroed).build();
    GameBoy::new(rom, config).unwrap()
}

fn idle_machine() -> GameBoy {
    // JR -2
    machine(&RomBuilder::new().program(&[0x18, 0xFE]).build())
}

/// Turn the LCD off, fill tile 0 with (`lo`, `hi`) rows, turn it back on
/// and fall into `main`.
fn tile_program(lo: u8, hi: u8, main: &[u8]) -> Vec<u8> {
    let mut code = vec![
        0xAF, // XOR A
        0xE0, 0x40, // LDH (LCDC),A
        0x21, 0x00, 0x80, // LD HL,0x8000
        0x06, 0x08, // LD B,8
        0x3E, lo, // LD A,lo
        0x22, // LD (HL+),A
        0x3E, hi, // LD A,hi
        0x22, // LD (HL+),A
        0x05, // DEC B
        0x20, 0xF7, // JR NZ,-9
        0x3E, 0x91, // LD A,0x91
        0xE0, 0x40, // LDH (LCDC),A
    ];
    code.extend_from_slice(main);
    code
}

fn tile_rom(lo: u8, hi: u8, main: &[u8]) -> Vec<u8> {
    RomBuilder::new().program(&tile_program(lo, hi, main)).build()
}

/// Step the machine through whole instructions for at least `cycles`.
fn run_cycles(gb: &mut GameBoy, cycles: u32) {
    let mut elapsed = 0;
    while elapsed < cycles {
        elapsed += gb.step_instruction().unwrap();
    }
}

fn fill_banks(num_banks: usize) -> Vec<u8> {
    let mut rom = vec![0u8; num_banks * 0x4000];
    for (bank, chunk) in rom.chunks_mut(0x4000).enumerate() {
        chunk.fill(bank as u8);
    }
    rom
}

#[test]
fn header_is_parsed_from_rom() {
    let gb = machine(&RomBuilder::new().title("DOTBOY").build());
    let header = gb.header();
    assert_eq!(header.title, "DOTBOY");
    assert_eq!(header.cartridge_type, 0x00);
    assert!(!header.checksum_ok());
}

#[test]
fn short_rom_is_rejected() {
    let rom = vec![0u8; 0x14F];
    let err = GameBoy::new(&rom, GameBoyConfig::default()).unwrap_err();
    assert_eq!(err, GameBoyError::RomTooShort { len: 0x14F });
}

#[test]
fn unsupported_cartridge_type_is_rejected() {
    // MBC3 + timer + battery.
    let rom = RomBuilder::new().bytes_at(0x147, &[0x0F]).build();
    let err = GameBoy::new(&rom, GameBoyConfig::default()).unwrap_err();
    assert_eq!(
        err,
        GameBoyError::UnsupportedCartridge {
            cartridge_type: 0x0F
        }
    );
}

#[test]
fn boot_state_matches_dmg() {
    let mut gb = idle_machine();
    assert_eq!(gb.cpu().regs.pc, 0x0100);
    assert_eq!(gb.bus.read8(0xFF04), 0xAB);
    assert_eq!(gb.bus.read8(IF), 0xE1);
    assert_eq!(gb.bus.read8(0xFF40), 0x91);
    assert_eq!(gb.bus.read8(0xFF00), 0xFF);
    assert_eq!(gb.bus.read8(0xFFFF), 0x00);
    assert_eq!(gb.ly(), 0);
    assert_eq!(
        gb.palettes(),
        crate::Palettes {
            bgp: 0xFC,
            obp0: 0xFF,
            obp1: 0xFF
        }
    );
}

/// Pseudo-random RAM fill depends only on the seed.
#[test]
fn ram_init_seed_is_reproducible() {
    let rom = RomBuilder::new().build();
    let config = GameBoyConfig::builder()
        .ram_init(RamInit::Pseudorandom { seed: 0x1234_5678 })
        .build();
    let mut a = GameBoy::new(&rom, config.clone()).unwrap();
    let mut b = GameBoy::new(&rom, config).unwrap();

    let wram_a: Vec<u8> = (0xC000..0xC100).map(|addr| a.bus.read8(addr)).collect();
    let wram_b: Vec<u8> = (0xC000..0xC100).map(|addr| b.bus.read8(addr)).collect();
    assert_eq!(wram_a, wram_b);
    assert!(wram_a.iter().any(|&byte| byte != 0));
}

#[test]
fn frame_is_70224_cycles_with_one_vblank() {
    let mut gb = idle_machine();
    gb.bus.write8(IF, 0x00);

    let mut vblanks = 0;
    let mut frames = 0;
    for step in 1..=CYCLES_PER_FRAME / 4 {
        gb.bus.advance(4);
        if gb.bus.read8(IF) & 0x01 != 0 {
            vblanks += 1;
            gb.bus.write8(IF, 0x00);
            assert_eq!(step * 4, 144 * LINE);
            assert_eq!(gb.ly(), 144);
            assert_eq!(gb.bus.read8(0xFF41) & 0x03, 1);
        }
        if gb.bus.ppu.take_frame_ready() {
            frames += 1;
        }
    }

    assert_eq!(vblanks, 1);
    assert_eq!(frames, 1);
    assert_eq!(gb.ly(), 0);
    assert_eq!(gb.bus.read8(0xFF41) & 0x03, 2);
}

#[test]
fn line_modes_follow_dot_counter() {
    let mut gb = idle_machine();
    let mode = |gb: &mut GameBoy| gb.bus.read8(0xFF41) & 0x03;

    assert_eq!(mode(&mut gb), 2);
    gb.bus.advance(80);
    assert_eq!(mode(&mut gb), 3);
    // No sprites and SCX=0: mode 3 lasts 172 dots.
    gb.bus.advance(171);
    assert_eq!(mode(&mut gb), 3);
    gb.bus.advance(1);
    assert_eq!(mode(&mut gb), 0);
    gb.bus.advance(LINE - 252);
    assert_eq!(gb.ly(), 1);
    assert_eq!(mode(&mut gb), 2);
}

#[test]
fn scx_fine_scroll_stretches_mode_3() {
    let mut gb = idle_machine();
    gb.bus.write8(0xFF43, 0x05);
    gb.bus.advance(80 + 172);
    assert_eq!(gb.bus.read8(0xFF41) & 0x03, 3);
    gb.bus.advance(5);
    assert_eq!(gb.bus.read8(0xFF41) & 0x03, 0);
}

#[test]
fn lcd_off_keeps_frame_pacing() {
    let mut gb = idle_machine();
    gb.bus.advance(3 * LINE);
    gb.bus.write8(0xFF40, 0x11);

    assert_eq!(gb.ly(), 0);
    assert_eq!(gb.bus.read8(0xFF41) & 0x03, 0);
    let before = gb.frame().clone();

    gb.bus.advance(CYCLES_PER_FRAME - 1);
    assert!(!gb.bus.ppu.take_frame_ready());
    gb.bus.advance(1);
    assert!(gb.bus.ppu.take_frame_ready());
    assert_eq!(gb.ly(), 0);
    assert_eq!(gb.frame(), &before);

    // LY writes are ignored.
    gb.bus.write8(0xFF44, 0x20);
    assert_eq!(gb.bus.read8(0xFF44), 0);

    // Back on: restart at LY=0 in mode 2.
    gb.bus.write8(0xFF40, 0x91);
    assert_eq!(gb.ly(), 0);
    assert_eq!(gb.bus.read8(0xFF41) & 0x03, 2);
}

#[test]
fn step_frame_stops_at_vblank() {
    let mut gb = idle_machine();
    gb.step_frame().unwrap();
    assert_eq!(gb.ly(), 144);
    gb.step_frame().unwrap();
    assert_eq!(gb.ly(), 144);
}

#[test]
fn step_frames_zero_is_a_no_op() {
    let mut gb = machine(&tile_rom(0x55, 0xAA, &[0x18, 0xFE]));
    gb.step_frames(3).unwrap();
    // Land mid-line so the PPU dot, STAT mode and timer are all non-trivial.
    for _ in 0..7 {
        gb.step_instruction().unwrap();
    }

    let cpu = gb.cpu().clone();
    let bus = gb.bus.clone();

    gb.step_frames(0).unwrap();

    assert_eq!(gb.cpu(), &cpu);
    assert!(gb.bus == bus, "bus state changed");
    assert_eq!(gb.interrupts(), &bus.interrupts);
    assert_eq!(gb.bus.timer, bus.timer);
}

#[test]
fn timer_overflow_reloads_tma_and_requests_interrupt() {
    let mut gb = idle_machine();
    gb.bus.write8(0xFF04, 0x00);
    gb.bus.write8(0xFF06, 0xF0);
    gb.bus.write8(0xFF05, 0xFE);
    // Enabled, divider bit 3: one increment every 16 cycles.
    gb.bus.write8(0xFF07, 0x05);
    gb.bus.write8(IF, 0x00);

    gb.bus.timer.advance(16, &mut gb.bus.interrupts);
    assert_eq!(gb.bus.read8(0xFF05), 0xFF);
    assert_eq!(gb.bus.read8(IF) & 0x04, 0);

    gb.bus.timer.advance(16, &mut gb.bus.interrupts);
    assert_eq!(gb.bus.read8(0xFF05), 0xF0);
    assert_eq!(gb.bus.read8(IF) & 0x04, 0x04);

    // Fifteen more increments do not overflow again.
    gb.bus.write8(IF, 0x00);
    gb.bus.timer.advance(15 * 16, &mut gb.bus.interrupts);
    assert_eq!(gb.bus.read8(0xFF05), 0xFF);
    assert_eq!(gb.bus.read8(IF) & 0x04, 0);
}

#[test]
fn timer_period_follows_tac_select() {
    for (tac, period) in [(0x04u8, 1024u32), (0x05, 16), (0x06, 64), (0x07, 256)] {
        let mut gb = idle_machine();
        gb.bus.write8(0xFF04, 0x00);
        gb.bus.write8(0xFF05, 0x00);
        gb.bus.write8(0xFF07, tac);

        gb.bus.timer.advance(period * 3 - 1, &mut gb.bus.interrupts);
        assert_eq!(gb.bus.read8(0xFF05), 2, "TAC={tac:#04X}");
        gb.bus.timer.advance(1, &mut gb.bus.interrupts);
        assert_eq!(gb.bus.read8(0xFF05), 3, "TAC={tac:#04X}");
    }
}

#[test]
fn disabled_timer_leaves_tima_alone() {
    let mut gb = idle_machine();
    gb.bus.write8(0xFF05, 0x10);
    gb.bus.write8(0xFF07, 0x01);
    gb.bus.timer.advance(4096, &mut gb.bus.interrupts);
    assert_eq!(gb.bus.read8(0xFF05), 0x10);
    // DIV keeps running regardless.
    assert_eq!(gb.bus.read8(0xFF04), 0xAB_u8.wrapping_add(0x10));
}

#[test]
fn div_write_with_selected_bit_high_bumps_tima() {
    let mut gb = idle_machine();
    gb.bus.write8(0xFF04, 0x00);
    gb.bus.write8(0xFF05, 0x00);
    gb.bus.write8(0xFF07, 0x05);

    gb.bus.timer.advance(8, &mut gb.bus.interrupts);
    assert_eq!(gb.bus.read8(0xFF05), 0x00);

    gb.bus.write8(0xFF04, 0x42);
    assert_eq!(gb.bus.read8(0xFF05), 0x01);
    assert_eq!(gb.bus.read8(0xFF04), 0x00);
}

#[test]
fn tac_write_that_drops_the_input_bumps_tima() {
    let mut gb = idle_machine();
    gb.bus.write8(0xFF04, 0x00);
    gb.bus.write8(0xFF05, 0x00);
    gb.bus.write8(0xFF07, 0x05);
    gb.bus.timer.advance(8, &mut gb.bus.interrupts);

    // Disabling the timer while the selected bit is high is a falling edge.
    gb.bus.write8(0xFF07, 0x01);
    assert_eq!(gb.bus.read8(0xFF05), 0x01);
}

#[test]
fn io_registers_read_back_unused_bits_as_one() {
    let mut gb = idle_machine();
    gb.bus.write8(0xFF07, 0x05);
    assert_eq!(gb.bus.read8(0xFF07), 0xFD);
    gb.bus.write8(IF, 0x00);
    assert_eq!(gb.bus.read8(IF), 0xE0);
    gb.bus.write8(IF, 0xFF);
    assert_eq!(gb.bus.read8(IF), 0xFF);
    assert_eq!(gb.bus.read8(0xFF41) & 0x80, 0x80);
    assert_eq!(gb.bus.read8(0xFF02), 0x7E);
}

#[test]
fn unmapped_addresses_read_ff_and_ignore_writes() {
    let mut gb = idle_machine();
    for addr in [0xFEA0u16, 0xFEFF, 0xFF03, 0xFF08, 0xFF4C, 0xFF50, 0xFF7F] {
        gb.bus.write8(addr, 0x12);
        assert_eq!(gb.bus.read8(addr), 0xFF, "addr {addr:#06X}");
    }
    // ROM-only cartridge without RAM.
    gb.bus.write8(0xA000, 0x12);
    assert_eq!(gb.bus.read8(0xA000), 0xFF);
    // ROM writes do not change ROM.
    gb.bus.write8(0x0150, 0x00);
    assert_eq!(gb.bus.read8(0x0150), 0x18);
}

#[test]
fn echo_ram_mirrors_wram() {
    let mut gb = idle_machine();
    gb.bus.write8(0xC123, 0x5A);
    assert_eq!(gb.bus.read8(0xE123), 0x5A);
    gb.bus.write8(0xFDFF, 0xA5);
    assert_eq!(gb.bus.read8(0xDDFF), 0xA5);

    gb.bus.write8(0xFF80, 0x11);
    gb.bus.write8(0xFFFE, 0x22);
    assert_eq!(gb.bus.read8(0xFF80), 0x11);
    assert_eq!(gb.bus.read8(0xFFFE), 0x22);
}

#[test]
fn serial_registers_are_plain_slots() {
    let mut gb = idle_machine();
    gb.bus.write8(0xFF01, 0x42);
    gb.bus.write8(0xFF02, 0x81);
    assert_eq!(gb.bus.read8(0xFF01), 0x42);
    assert_eq!(gb.bus.read8(0xFF02), 0xFF);
    assert_eq!(gb.bus.read8(IF) & 0x08, 0);
}

#[test]
fn sound_registers_are_gated_by_nr52() {
    let mut gb = idle_machine();
    assert_eq!(gb.bus.read8(0xFF26), 0xF1);
    gb.bus.write8(0xFF12, 0xA0);
    assert_eq!(gb.bus.read8(0xFF12), 0xA0);

    gb.bus.write8(0xFF26, 0x00);
    assert_eq!(gb.bus.read8(0xFF26), 0x70);
    assert_eq!(gb.bus.read8(0xFF12), 0x00);
    gb.bus.write8(0xFF12, 0xF0);
    assert_eq!(gb.bus.read8(0xFF12), 0x00);

    // Wave RAM stays writable.
    gb.bus.write8(0xFF30, 0x3C);
    assert_eq!(gb.bus.read8(0xFF30), 0x3C);

    gb.bus.write8(0xFF26, 0x80);
    gb.bus.write8(0xFF12, 0xF0);
    assert_eq!(gb.bus.read8(0xFF12), 0xF0);
}

#[test]
fn vram_and_oam_are_locked_by_ppu_mode() {
    let mut gb = idle_machine();
    gb.bus.write8(0xFF40, 0x00);
    gb.bus.write8(0x8000, 0x11);
    gb.bus.write8(0xFE00, 0x22);
    gb.bus.write8(0xFF40, 0x91);

    // Mode 2: OAM locked, VRAM open.
    assert_eq!(gb.bus.read8(0xFE00), 0xFF);
    assert_eq!(gb.bus.read8(0x8000), 0x11);

    // Mode 3: both locked, writes dropped.
    gb.bus.advance(84);
    assert_eq!(gb.bus.read8(0xFF41) & 0x03, 3);
    assert_eq!(gb.bus.read8(0x8000), 0xFF);
    gb.bus.write8(0x8000, 0x33);
    gb.bus.write8(0xFE00, 0x44);

    // Mode 0: both open again.
    gb.bus.advance(200);
    assert_eq!(gb.bus.read8(0xFF41) & 0x03, 0);
    assert_eq!(gb.bus.read8(0x8000), 0x11);
    assert_eq!(gb.bus.read8(0xFE00), 0x22);
}

#[test]
fn oam_dma_copies_160_bytes() {
    let mut gb = idle_machine();
    gb.bus.write8(0xFF40, 0x00);
    for i in 0..0xA0u16 {
        gb.bus.write8(0xC000 + i, i as u8 ^ 0x5A);
    }

    gb.bus.write8(0xFF46, 0xC0);

    assert_eq!(gb.bus.read8(0xFF46), 0xC0);
    for i in 0..0xA0u16 {
        assert_eq!(gb.bus.read8(0xFE00 + i), i as u8 ^ 0x5A);
    }
}

#[test]
fn lyc_stat_interrupt_fires_on_rising_edge_only() {
    let mut gb = idle_machine();
    gb.bus.write8(0xFF45, 2);
    gb.bus.write8(0xFF41, 0x40);
    gb.bus.write8(IF, 0x00);

    gb.bus.advance(2 * LINE - 1);
    assert_eq!(gb.bus.read8(IF) & 0x02, 0);
    gb.bus.advance(1);
    assert_eq!(gb.ly(), 2);
    assert_eq!(gb.bus.read8(IF) & 0x02, 0x02);
    assert_eq!(gb.bus.read8(0xFF41) & 0x04, 0x04);

    gb.bus.write8(IF, 0x00);
    gb.bus.advance(100);
    assert_eq!(gb.bus.read8(IF) & 0x02, 0);
}

#[test]
fn hblank_stat_interrupt_fires_once_per_line() {
    let mut gb = idle_machine();
    gb.bus.write8(0xFF41, 0x08);
    gb.bus.write8(IF, 0x00);

    let mut requests = 0;
    for _ in 0..10 * LINE {
        gb.bus.advance(1);
        if gb.bus.read8(IF) & 0x02 != 0 {
            requests += 1;
            gb.bus.write8(IF, 0x00);
        }
    }
    assert_eq!(requests, 10);
}

#[test]
fn oam_stat_select_also_fires_at_vblank() {
    let mut gb = idle_machine();
    gb.bus.advance(144 * LINE - 1);
    gb.bus.write8(0xFF41, 0x20);
    gb.bus.write8(IF, 0x00);
    gb.bus.advance(1);
    assert_eq!(gb.ly(), 144);
    assert_eq!(gb.bus.read8(IF) & 0x03, 0x03);
}

#[test]
fn joypad_press_edge_raises_single_interrupt() {
    let mut gb = idle_machine();
    // Select the action group.
    gb.bus.write8(0xFF00, 0x10);
    gb.bus.write8(IF, 0x00);

    gb.press(Button::A);
    assert_eq!(gb.bus.read8(IF) & 0x10, 0x10);
    assert_eq!(gb.bus.read8(0xFF00), 0xDE);

    gb.bus.write8(IF, 0x00);
    gb.press(Button::A);
    assert_eq!(gb.bus.read8(IF) & 0x10, 0);

    gb.release(Button::A);
    assert_eq!(gb.bus.read8(0xFF00), 0xDF);
    gb.press(Button::A);
    assert_eq!(gb.bus.read8(IF) & 0x10, 0x10);
}

#[test]
fn joypad_unselected_group_raises_nothing() {
    let mut gb = idle_machine();
    gb.bus.write8(0xFF00, 0x10);
    gb.bus.write8(IF, 0x00);

    gb.key_down(38);
    assert_eq!(gb.bus.read8(IF) & 0x10, 0);
    assert_eq!(gb.bus.read8(0xFF00) & 0x0F, 0x0F);

    gb.bus.write8(0xFF00, 0x20);
    assert_eq!(gb.bus.read8(0xFF00), 0xEB);

    gb.key_up(38);
    assert_eq!(gb.bus.read8(0xFF00), 0xEF);

    // Unbound codes are ignored.
    gb.key_down(1234);
    assert_eq!(gb.bus.read8(0xFF00), 0xEF);
}

#[test]
fn joypad_press_wakes_stop() {
    // STOP 0x00; LD A,0x42; LDH (0x80),A; JR -2
    let rom = RomBuilder::new()
        .program(&[0x10, 0x00, 0x3E, 0x42, 0xE0, 0x80, 0x18, 0xFE])
        .build();
    let mut gb = machine(&rom);

    run_cycles(&mut gb, 20_000);
    assert!(gb.cpu().is_stopped());
    assert_eq!(gb.bus.read8(0xFF80), 0x00);

    gb.press(Button::Start);
    run_cycles(&mut gb, 64);
    assert!(!gb.cpu().is_stopped());
    assert_eq!(gb.bus.read8(0xFF80), 0x42);
}

#[test]
fn mbc1_rom_banking() {
    let mut rom = fill_banks(4);
    rom[0x147] = 0x01;
    let mut gb = machine(&rom);

    assert_eq!(gb.bus.read8(0x0000), 0);
    assert_eq!(gb.bus.read8(0x4000), 1);

    gb.bus.write8(0x2000, 0x02);
    assert_eq!(gb.bus.read8(0x4000), 2);
    assert_eq!(gb.bus.read8(0x0000), 0);

    gb.bus.write8(0x2000, 0x03);
    assert_eq!(gb.bus.read8(0x7FFF), 3);

    // Bank 0 is not selectable in the switchable window.
    gb.bus.write8(0x2000, 0x00);
    assert_eq!(gb.bus.read8(0x4000), 1);
}

#[test]
fn mbc1_mode_1_remaps_the_low_bank() {
    let mut rom = fill_banks(64);
    rom[0x147] = 0x01;
    let mut gb = machine(&rom);

    gb.bus.write8(0x4000, 0x01);
    gb.bus.write8(0x2000, 0x01);
    assert_eq!(gb.bus.read8(0x4000), 33);
    assert_eq!(gb.bus.read8(0x0000), 0);

    gb.bus.write8(0x6000, 0x01);
    assert_eq!(gb.bus.read8(0x0000), 32);
    assert_eq!(gb.bus.read8(0x4000), 33);

    gb.bus.write8(0x6000, 0x00);
    assert_eq!(gb.bus.read8(0x0000), 0);
}

#[test]
fn mbc1_ram_enable_and_banking() {
    let mut rom = fill_banks(2);
    rom[0x147] = 0x03;
    // 4 x 8 KiB.
    rom[0x149] = 0x03;
    let mut gb = machine(&rom);

    assert_eq!(gb.bus.read8(0xA000), 0xFF);
    gb.bus.write8(0xA000, 0x42);
    assert_eq!(gb.bus.read8(0xA000), 0xFF);

    gb.bus.write8(0x0000, 0x0A);
    gb.bus.write8(0xA000, 0x42);
    assert_eq!(gb.bus.read8(0xA000), 0x42);

    // Mode 1 selects the RAM bank from BANK2.
    gb.bus.write8(0x6000, 0x01);
    gb.bus.write8(0x4000, 0x02);
    gb.bus.write8(0xA000, 0x99);
    assert_eq!(gb.bus.read8(0xA000), 0x99);
    gb.bus.write8(0x4000, 0x00);
    assert_eq!(gb.bus.read8(0xA000), 0x42);

    gb.bus.write8(0x0000, 0x00);
    assert_eq!(gb.bus.read8(0xA000), 0xFF);
}

#[test]
fn mbc5_rom_banking_uses_nine_bits() {
    // 10 banks so bit 8 still changes the bank after the modulo.
    let mut rom = fill_banks(10);
    rom[0x147] = 0x19;
    let mut gb = machine(&rom);

    assert_eq!(gb.bus.read8(0x0000), 0);
    assert_eq!(gb.bus.read8(0x4000), 1);

    gb.bus.write8(0x2000, 0x02);
    assert_eq!(gb.bus.read8(0x4000), 2);

    // Bank 0 is selectable on MBC5.
    gb.bus.write8(0x2000, 0x00);
    assert_eq!(gb.bus.read8(0x4000), 0);

    // 0x101 % 10 = 7.
    gb.bus.write8(0x2000, 0x01);
    gb.bus.write8(0x3000, 0x01);
    assert_eq!(gb.bus.read8(0x4000), 7);
}

#[test]
fn mbc5_ram_banks() {
    let mut rom = fill_banks(2);
    rom[0x147] = 0x1B;
    rom[0x149] = 0x03;
    let mut gb = machine(&rom);

    gb.bus.write8(0x0000, 0x0A);
    for bank in 0..4u8 {
        gb.bus.write8(0x4000, bank);
        gb.bus.write8(0xB000, 0x10 + bank);
    }
    for bank in 0..4u8 {
        gb.bus.write8(0x4000, bank);
        assert_eq!(gb.bus.read8(0xB000), 0x10 + bank);
    }
}

#[test]
fn cartridge_ram_survives_reset() {
    let mut rom = fill_banks(2);
    rom[0x147] = 0x03;
    rom[0x149] = 0x02;
    let mut gb = machine(&rom);

    gb.bus.write8(0x0000, 0x0A);
    gb.bus.write8(0xA010, 0x77);
    gb.reset();

    assert_eq!(gb.bus.read8(0xA010), 0xFF);
    gb.bus.write8(0x0000, 0x0A);
    assert_eq!(gb.bus.read8(0xA010), 0x77);
}

#[test]
fn reset_returns_to_power_on_state() {
    let mut gb = machine(&tile_rom(0xFF, 0x00, &[0x18, 0xFE]));
    gb.step_frames(5).unwrap();
    gb.press(Button::Down);

    gb.reset();

    assert_eq!(gb.cpu().regs.pc, 0x0100);
    assert_eq!(gb.ly(), 0);
    assert_eq!(gb.bus.read8(0xFF04), 0xAB);
    assert_eq!(gb.bus.read8(0xFF40), 0x91);
    gb.bus.write8(0xFF00, 0x20);
    assert_eq!(gb.bus.read8(0xFF00), 0xEF);
}

#[test]
fn background_tile_fills_the_screen() {
    // Rows of lo=0xFF, hi=0x00: every pixel is color 1.
    let mut gb = machine(&tile_rom(0xFF, 0x00, &[0x18, 0xFE]));
    gb.step_frames(2).unwrap();

    // BGP=0xFC maps color 1 to shade 3.
    assert!(gb.frame().pixels().iter().all(|&shade| shade == 3));

    let mut rgb = vec![0u8; SCREEN_WIDTH * SCREEN_HEIGHT * crate::RGB24_BYTES_PER_PIXEL];
    gb.video_frame(&mut rgb);
    assert!(rgb.iter().all(|&byte| byte == 0x00));
}

#[test]
fn sprites_draw_over_background() {
    let mut gb = idle_machine();
    gb.bus.write8(0xFF40, 0x00);
    for i in 0..16 {
        gb.bus.write8(0x8010 + i, 0xFF);
    }
    // Sprite 0 at screen (20, 10), tile 1.
    for (i, byte) in [26u8, 28, 1, 0].into_iter().enumerate() {
        gb.bus.write8(0xFE00 + i as u16, byte);
    }
    gb.bus.write8(0xFF48, 0xE4);
    gb.bus.write8(0xFF40, 0x93);

    gb.bus.advance(CYCLES_PER_FRAME);

    let frame = gb.frame();
    assert_eq!(frame.pixel(20, 10), 3);
    assert_eq!(frame.pixel(27, 17), 3);
    assert_eq!(frame.pixel(19, 10), 0);
    assert_eq!(frame.pixel(28, 10), 0);
    assert_eq!(frame.pixel(20, 18), 0);
}

#[test]
fn sprite_behind_background_shows_only_over_color_0() {
    let mut gb = idle_machine();
    gb.bus.write8(0xFF40, 0x00);
    // Tile 1: solid color 3. Tile 2: left half color 1, right half color 0.
    for i in 0..16 {
        gb.bus.write8(0x8010 + i, 0xFF);
        gb.bus.write8(0x8020 + i, if i % 2 == 0 { 0xF0 } else { 0x00 });
    }
    gb.bus.write8(0x9800, 2);
    for (i, byte) in [16u8, 8, 1, 0x80].into_iter().enumerate() {
        gb.bus.write8(0xFE00 + i as u16, byte);
    }
    gb.bus.write8(0xFF47, 0xE4);
    gb.bus.write8(0xFF48, 0xE4);
    gb.bus.write8(0xFF40, 0x93);

    gb.bus.advance(CYCLES_PER_FRAME);

    let frame = gb.frame();
    assert_eq!(frame.pixel(0, 0), 1);
    assert_eq!(frame.pixel(4, 0), 3);
}

#[test]
fn disabled_background_is_white_under_sprites() {
    let mut gb = idle_machine();
    gb.bus.write8(0xFF40, 0x00);
    // Tile 0 (the BG map's tile) and tile 1 are both solid color 3.
    for i in 0..32 {
        gb.bus.write8(0x8000 + i, 0xFF);
    }
    // Sprite 0 at screen (20, 10), tile 1, behind the BG.
    for (i, byte) in [26u8, 28, 1, 0x80].into_iter().enumerate() {
        gb.bus.write8(0xFE00 + i as u16, byte);
    }
    gb.bus.write8(0xFF47, 0xFF);
    gb.bus.write8(0xFF48, 0xE4);
    // LCD and sprites on, BG/window off.
    gb.bus.write8(0xFF40, 0x92);

    gb.bus.advance(CYCLES_PER_FRAME);

    let frame = gb.frame();
    assert_eq!(frame.pixel(0, 0), 0);
    assert_eq!(frame.pixel(159, 143), 0);
    assert_eq!(frame.pixel(20, 10), 3);
}

#[test]
fn lower_x_sprite_wins_and_flips_apply() {
    let mut gb = idle_machine();
    gb.bus.write8(0xFF40, 0x00);
    // Tile 1: only the leftmost column set, color 1. Tile 2: solid color 2.
    for row in 0..8 {
        gb.bus.write8(0x8010 + row * 2, 0x80);
        gb.bus.write8(0x8020 + row * 2 + 1, 0xFF);
    }
    // Sprite 0 at x=4 (solid), sprite 1 at x=0 X-flipped (rightmost column).
    let oam = [16u8, 12, 2, 0, 16, 8, 1, 0x20];
    for (i, byte) in oam.into_iter().enumerate() {
        gb.bus.write8(0xFE00 + i as u16, byte);
    }
    gb.bus.write8(0xFF48, 0xE4);
    gb.bus.write8(0xFF40, 0x93);

    gb.bus.advance(CYCLES_PER_FRAME);

    let frame = gb.frame();
    assert_eq!(frame.pixel(0, 0), 0);
    // Overlap at x=7: the lower-X sprite 1 is in front.
    assert_eq!(frame.pixel(7, 0), 1);
    assert_eq!(frame.pixel(6, 0), 2);
    assert_eq!(frame.pixel(8, 0), 2);
}

#[test]
fn only_ten_sprites_per_line() {
    let mut gb = idle_machine();
    gb.bus.write8(0xFF40, 0x00);
    for i in 0..16 {
        gb.bus.write8(0x8010 + i, 0xFF);
    }
    for sprite in 0..11u16 {
        let base = 0xFE00 + sprite * 4;
        gb.bus.write8(base, 16);
        gb.bus.write8(base + 1, 8 + sprite as u8 * 10);
        gb.bus.write8(base + 2, 1);
        gb.bus.write8(base + 3, 0);
    }
    gb.bus.write8(0xFF48, 0xE4);
    gb.bus.write8(0xFF40, 0x93);

    gb.bus.advance(CYCLES_PER_FRAME);

    let frame = gb.frame();
    assert_eq!(frame.pixel(90, 0), 3);
    assert_eq!(frame.pixel(100, 0), 0);
}

#[test]
fn tall_sprites_span_two_tiles() {
    let mut gb = idle_machine();
    gb.bus.write8(0xFF40, 0x00);
    // Tiles 2 and 3 form the sprite; tile 3 is solid.
    for i in 0..16 {
        gb.bus.write8(0x8030 + i, 0xFF);
    }
    // Odd tile number: the low bit is ignored.
    for (i, byte) in [16u8, 8, 3, 0].into_iter().enumerate() {
        gb.bus.write8(0xFE00 + i as u16, byte);
    }
    gb.bus.write8(0xFF48, 0xE4);
    gb.bus.write8(0xFF40, 0x97);

    gb.bus.advance(CYCLES_PER_FRAME);

    let frame = gb.frame();
    assert_eq!(frame.pixel(0, 7), 0);
    assert_eq!(frame.pixel(0, 8), 3);
    assert_eq!(frame.pixel(0, 15), 3);
    assert_eq!(frame.pixel(0, 16), 0);
}

#[test]
fn window_covers_background_from_wx_wy() {
    let mut gb = idle_machine();
    gb.bus.write8(0xFF40, 0x00);
    for i in 0..16 {
        gb.bus.write8(0x8010 + i, 0xFF);
    }
    for addr in 0x9C00..0xA000u16 {
        gb.bus.write8(addr, 1);
    }
    gb.bus.write8(0xFF4A, 50);
    gb.bus.write8(0xFF4B, 87);
    gb.bus.write8(0xFF40, 0xF1);

    gb.bus.advance(CYCLES_PER_FRAME);

    let frame = gb.frame();
    assert_eq!(frame.pixel(80, 50), 3);
    assert_eq!(frame.pixel(159, 143), 3);
    assert_eq!(frame.pixel(79, 50), 0);
    assert_eq!(frame.pixel(80, 49), 0);
}

#[test]
fn vblank_interrupt_runs_handler_once_per_frame() {
    let rom = RomBuilder::new()
        // LDH A,(0x80); INC A; LDH (0x80),A; RETI
        .bytes_at(0x40, &[0xF0, 0x80, 0x3C, 0xE0, 0x80, 0xD9])
        // IE=VBLANK; IF=0; EI; HALT; JR -3
        .program(&[0x3E, 0x01, 0xE0, 0xFF, 0xAF, 0xE0, 0x0F, 0xFB, 0x76, 0x18, 0xFD])
        .build();
    let mut gb = machine(&rom);

    gb.step_frames(3).unwrap();
    assert_eq!(gb.bus.read8(0xFF80), 2);
    gb.step_frames(4).unwrap();
    assert_eq!(gb.bus.read8(0xFF80), 6);
}

#[test]
fn opcode_hole_stops_stepping() {
    let mut gb = machine(&RomBuilder::new().program(&[0xD3]).build());

    // NOP; JP 0x0150
    assert_eq!(gb.step_instruction().unwrap(), 4);
    assert_eq!(gb.step_instruction().unwrap(), 16);
    let expected = GameBoyError::UnimplementedOpcode {
        opcode: 0xD3,
        pc: 0x0150,
    };
    assert_eq!(gb.step_instruction(), Err(expected));
    assert_eq!(gb.step_frame(), Err(expected));
    assert_eq!(gb.step_frames(2), Err(expected));
}

/// Joypad-driven ROM: reads the direction group every iteration and uses
/// P1 as the background palette, so holding a direction shows on screen.
fn joypad_palette_rom() -> Vec<u8> {
    let main = [
        0x3E, 0x20, // LD A,0x20
        0xE0, 0x00, // LDH (P1),A
        0xF0, 0x00, // LDH A,(P1)
        0xE0, 0x47, // LDH (BGP),A
        0x18, 0xF6, // JR main
    ];
    tile_rom(0xFF, 0x00, &main)
}

fn run_joypad_scenario(rom: &[u8]) -> (Vec<u8>, Vec<u8>) {
    let mut gb = machine(rom);
    gb.step_frames(40).unwrap();
    let before = gb.frame().pixels().to_vec();
    gb.key_down(38);
    gb.step_frames(10).unwrap();
    (before, gb.frame().pixels().to_vec())
}

#[test]
fn joypad_scenario_is_reproducible() {
    let rom = joypad_palette_rom();
    let (before_a, after_a) = run_joypad_scenario(&rom);
    let (before_b, after_b) = run_joypad_scenario(&rom);

    assert_eq!(before_a, before_b);
    assert_eq!(after_a, after_b);

    // Idle P1 0xEF gives color 1 shade 3; holding Up gives 0xEB, shade 2.
    assert!(before_a.iter().all(|&shade| shade == 3));
    assert!(after_a.iter().all(|&shade| shade == 2));
}

#[test]
fn different_roms_produce_different_frames() {
    let mut light = machine(&tile_rom(0x00, 0x00, &[0x18, 0xFE]));
    let mut dark = machine(&tile_rom(0xFF, 0xFF, &[0x18, 0xFE]));

    light.step_frames(5).unwrap();
    dark.step_frames(5).unwrap();

    assert_ne!(light.frame(), dark.frame());
}

#[test]
fn gameboy_is_send() {
    fn assert_send<T: Send>() {}
    assert_send::<GameBoy>();
}

#[test]
fn interrupt_priority_follows_bit_order() {
    use crate::Interrupt;

    let mut gb = idle_machine();
    gb.bus.write8(0xFFFF, 0x1F);
    gb.bus.write8(IF, 0x00);
    assert_eq!(gb.interrupts().highest_priority(), None);

    gb.bus.interrupts.raise(Interrupt::JOYPAD);
    gb.bus.interrupts.raise(Interrupt::TIMER);
    assert_eq!(gb.interrupts().highest_priority(), Some(Interrupt::TIMER));
    assert_eq!(Interrupt::TIMER.vector(), 0x0050);

    gb.bus.interrupts.clear(Interrupt::TIMER);
    assert_eq!(gb.interrupts().highest_priority(), Some(Interrupt::JOYPAD));
    assert_eq!(Interrupt::JOYPAD.vector(), 0x0060);

    // Disabled lines are requested but never selected.
    gb.bus.write8(0xFFFF, 0x01);
    assert_eq!(gb.interrupts().requested_and_enabled(), Interrupt::empty());
    assert_eq!(gb.bus.read8(IF), 0xF0);
}
