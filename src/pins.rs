//! GPIO / peripheral pin assignments for the ETboard (ESP32) street-light node.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Board labels are given alongside each GPIO.

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// CdS photoresistor divider, board A3.  Larger reading = brighter.
pub const CDS_ADC_GPIO: i32 = 39;
/// ADC1 channel wired to [`CDS_ADC_GPIO`].
pub const CDS_ADC1_CHANNEL: u32 = 3;

/// HC-SR04 echo line, board D8.  Input.
pub const ECHO_GPIO: i32 = 16;
/// HC-SR04 trigger line, board D9.  Output, idles low.
pub const TRIGGER_GPIO: i32 = 17;

// ---------------------------------------------------------------------------
// Indicators (active HIGH)
// ---------------------------------------------------------------------------

/// Red LED, board D2: lit while in Automatic mode.
pub const MODE_LED_GPIO: i32 = 25;
/// Blue LED, board D3: something is near.
pub const NEAR_PROXIMITY_LED_GPIO: i32 = 26;
/// Green LED, board D4: ambient light is low.
pub const LOW_LIGHT_LED_GPIO: i32 = 27;

/// Every output driven through [`crate::drivers::hw_init::gpio_write`].
pub const INDICATOR_GPIOS: [i32; 3] = [MODE_LED_GPIO, NEAR_PROXIMITY_LED_GPIO, LOW_LIGHT_LED_GPIO];
