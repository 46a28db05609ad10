//! SSD1306 command vocabulary
//!
//! Bytes sent on the command stream. Multi-byte commands are followed by
//! their parameter bytes in the same command list.

/// Control byte: following bytes are commands and parameters
pub const CONTROL_COMMAND: u8 = 0x00;
/// Control byte: following bytes are display RAM data
pub const CONTROL_DATA: u8 = 0x40;

// Fundamental
pub const SET_CONTRAST: u8 = 0x81;
pub const DISPLAY_FOLLOW_RAM: u8 = 0xA4;
pub const DISPLAY_IGNORE_RAM: u8 = 0xA5;
pub const DISPLAY_NOT_INVERTED: u8 = 0xA6;
pub const DISPLAY_INVERTED: u8 = 0xA7;
pub const DISPLAY_OFF: u8 = 0xAE;
pub const DISPLAY_ON: u8 = 0xAF;

// Scrolling
pub const SCROLL_RIGHT: u8 = 0x26;
pub const SCROLL_LEFT: u8 = 0x27;
pub const SCROLL_VERT_RIGHT: u8 = 0x29;
pub const SCROLL_VERT_LEFT: u8 = 0x2A;
pub const SCROLL_DEACTIVATE: u8 = 0x2E;
pub const SCROLL_ACTIVATE: u8 = 0x2F;
pub const SCROLL_SET_VERT_AREA: u8 = 0xA3;

// Addressing
pub const SET_MEM_ADDR_MODE: u8 = 0x20;
pub const MEM_ADDR_MODE_HORIZONTAL: u8 = 0x00;
pub const MEM_ADDR_MODE_VERTICAL: u8 = 0x01;
pub const MEM_ADDR_MODE_PAGE: u8 = 0x02;
/// OR with the low nibble of the start column (page mode)
pub const SET_COL_START_LOW: u8 = 0x00;
/// OR with the high nibble of the start column (page mode)
pub const SET_COL_START_HIGH: u8 = 0x10;
/// OR with the start page (page mode)
pub const SET_PAGE_START: u8 = 0xB0;
/// Followed by start and end column
pub const SET_COL_ADDR: u8 = 0x21;
/// Followed by start and end page
pub const SET_PAGE_ADDR: u8 = 0x22;

// Hardware configuration
/// OR with the start line (0-63)
pub const SET_START_LINE: u8 = 0x40;
/// OR with 1 to map column 127 to SEG0
pub const SET_SEG_REMAP: u8 = 0xA0;
pub const SET_MUX_RATIO: u8 = 0xA8;
pub const SET_COM_SCAN_NORMAL: u8 = 0xC0;
pub const SET_COM_SCAN_REMAPPED: u8 = 0xC8;
pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
pub const SET_COM_PINS: u8 = 0xDA;

// Timing and driving scheme
pub const SET_CLOCK_DIV: u8 = 0xD5;
pub const SET_PRECHARGE: u8 = 0xD9;
pub const SET_VCOMH_DESELECT: u8 = 0xDB;
pub const NOP: u8 = 0xE3;

// Charge pump
pub const SET_CHARGE_PUMP: u8 = 0x8D;
pub const CHARGE_PUMP_OFF: u8 = 0x10;
pub const CHARGE_PUMP_ON: u8 = 0x14;
