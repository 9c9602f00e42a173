//! Battery voltage probe
//!
//! One-shot ADC read on GPIO4 behind a 2:1 resistor divider. Conversion
//! to cell millivolts happens here; clamping and the gauge label live in
//! vellum-core.

use esp_hal::analog::adc::{Adc, AdcConfig, AdcPin, Attenuation};
use esp_hal::peripherals::{ADC1, GPIO4};
use esp_hal::Blocking;

use vellum_core::traits::BatteryProbe;

/// Full-scale reference at 11 dB attenuation
const ADC_REF_MV: u32 = 3300;
/// 12-bit conversion
const ADC_MAX_COUNTS: u32 = 4095;
/// The divider halves the cell voltage before the pin
const DIVIDER_RATIO: u32 = 2;

/// Raw ADC counts to cell millivolts through the divider
fn counts_to_cell_mv(raw: u32) -> u32 {
    raw * ADC_REF_MV / ADC_MAX_COUNTS * DIVIDER_RATIO
}

pub struct BoardBattery {
    adc: Adc<'static, ADC1<'static>, Blocking>,
    pin: AdcPin<GPIO4<'static>, ADC1<'static>>,
}

impl BoardBattery {
    pub fn new(adc1: ADC1<'static>, gpio: GPIO4<'static>) -> Self {
        let mut config = AdcConfig::new();
        let pin = config.enable_pin(gpio, Attenuation::_11dB);
        let adc = Adc::new(adc1, config);
        Self { adc, pin }
    }
}

impl BatteryProbe for BoardBattery {
    fn millivolts(&mut self) -> u32 {
        // A failed conversion reads as empty rather than wedging the cycle
        let raw = match nb::block!(self.adc.read_oneshot(&mut self.pin)) {
            Ok(counts) => u32::from(counts),
            Err(_) => 0,
        };
        counts_to_cell_mv(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_counts_is_zero_mv() {
        assert_eq!(counts_to_cell_mv(0), 0);
    }

    #[test]
    fn test_full_scale_counts_is_double_reference() {
        assert_eq!(counts_to_cell_mv(4095), 6600);
    }

    #[test]
    fn test_midscale_counts_is_one_reference() {
        // 2048/4095 of 3.3V, doubled by the divider
        assert_eq!(counts_to_cell_mv(2048), 3300);
    }
}
