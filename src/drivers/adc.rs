//! ADC1 oneshot driver for the two thermistor channels.
//!
//! Configures the unit and both channels through raw ESP-IDF sys calls and
//! exposes them as an [`AdcSource`].  Owned by the probe reader; dropping
//! it releases the unit.

use esp_idf_svc::sys::*;
use log::info;

use crate::error::{Probe, SensorError};
use crate::pins;
use crate::sensors::AdcSource;

/// Errors during ADC bring-up, carrying the ESP-IDF return code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdcInitError(pub i32);

impl core::fmt::Display for AdcInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "ADC1 init failed (rc={})", self.0)
    }
}

impl std::error::Error for AdcInitError {}

pub struct OneshotAdc {
    handle: adc_oneshot_unit_handle_t,
}

impl OneshotAdc {
    /// Bring up ADC1 and configure both probe channels at 12 bits, 12 dB.
    pub fn new() -> Result<Self, AdcInitError> {
        let init_cfg = adc_oneshot_unit_init_cfg_t {
            unit_id: adc_unit_t_ADC_UNIT_1,
            ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
            ..Default::default()
        };
        let mut handle: adc_oneshot_unit_handle_t = core::ptr::null_mut();
        // SAFETY: `handle` is a valid out-pointer for the duration of the call.
        let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &mut handle) };
        if ret != ESP_OK as i32 {
            return Err(AdcInitError(ret));
        }
        let adc = Self { handle };

        let chan_cfg = adc_oneshot_chan_cfg_t {
            atten: adc_atten_t_ADC_ATTEN_DB_12,
            bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
        };
        for channel in [pins::BOX_PROBE_ADC_CHANNEL, pins::DOUGH_PROBE_ADC_CHANNEL] {
            // SAFETY: handle was initialised above and is owned by `adc`.
            let ret = unsafe { adc_oneshot_config_channel(adc.handle, channel, &chan_cfg) };
            if ret != ESP_OK as i32 {
                return Err(AdcInitError(ret));
            }
        }

        info!(
            "adc: ADC1 configured (CH{}=box, CH{}=dough)",
            pins::BOX_PROBE_ADC_CHANNEL,
            pins::DOUGH_PROBE_ADC_CHANNEL
        );
        Ok(adc)
    }
}

impl AdcSource for OneshotAdc {
    fn read_raw(&mut self, probe: Probe) -> Result<u16, SensorError> {
        let channel = match probe {
            Probe::Box => pins::BOX_PROBE_ADC_CHANNEL,
            Probe::Dough => pins::DOUGH_PROBE_ADC_CHANNEL,
        };
        let mut raw: i32 = 0;
        // SAFETY: handle is valid for the lifetime of `self`; the control
        // loop is the only caller.
        let ret = unsafe { adc_oneshot_read(self.handle, channel, &mut raw) };
        if ret != ESP_OK as i32 {
            return Err(SensorError::AdcReadFailed(probe));
        }
        Ok(raw.clamp(0, i32::from(u16::MAX)) as u16)
    }
}

impl Drop for OneshotAdc {
    fn drop(&mut self) {
        // SAFETY: handle came from adc_oneshot_new_unit and is deleted once.
        unsafe {
            adc_oneshot_del_unit(self.handle);
        }
    }
}
