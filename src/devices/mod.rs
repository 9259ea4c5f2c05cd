use cpal::traits::{DeviceTrait, HostTrait};
use tracing::warn;

/// Metadata for one input-capable device, in the host's enumeration order.
#[derive(serde::Serialize, Debug, Clone)]
pub struct AudioDeviceInfo {
    pub index: usize,
    pub name: String,
    pub channels: u16,
    pub sample_rate: u32,
}

/// Enumerate input-capable audio devices.
pub fn list_input_devices() -> Result<Vec<AudioDeviceInfo>, String> {
    let host = cpal::default_host();
    let devices = host
        .input_devices()
        .map_err(|e| format!("Failed to enumerate input devices: {}", e))?;

    let mut infos = Vec::new();
    for (index, device) in devices.enumerate() {
        let name = device
            .name()
            .unwrap_or_else(|_| format!("Unknown Device {}", index));
        let (channels, sample_rate) = match device.default_input_config() {
            Ok(config) => (config.channels(), config.sample_rate().0),
            // Some backends refuse to describe a device they can still open.
            Err(_) => (2, 48_000),
        };
        if channels == 0 {
            continue;
        }
        infos.push(AudioDeviceInfo {
            index,
            name,
            channels,
            sample_rate,
        });
    }
    Ok(infos)
}

/// Print the device listing. This is a terminal command: enumeration trouble
/// degrades to a notice, never a process failure.
pub fn report() {
    let devices = match list_input_devices() {
        Ok(devices) => devices,
        Err(message) => {
            warn!("can't list audio devices: {}", message);
            return;
        }
    };

    println!();
    println!("=== Available Audio Devices ===");
    if devices.is_empty() {
        println!("  No input devices found");
    }
    for device in &devices {
        println!("{}", format_device(device));
    }
    println!("{}", "=".repeat(40));
}

fn format_device(device: &AudioDeviceInfo) -> String {
    format!(
        "  [{}] {} (Input)\n      Channels: {}, Sample Rate: {}",
        device.index, device.name, device.channels, device.sample_rate
    )
}
